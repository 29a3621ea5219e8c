//! In-memory repository implementation for testing and development.

mod session;

pub use session::InMemorySessionRepo;
