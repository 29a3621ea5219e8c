//! Repository layer for dynamic runtime data
//!
//! Repositories handle data that CHANGES during gameplay: the saved session
//! of each player. Static game content (world graph, monsters, heroes) is
//! handled by Oracles, not Repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSessionRepository;
pub use memory::InMemorySessionRepo;
pub use traits::SessionRepository;
