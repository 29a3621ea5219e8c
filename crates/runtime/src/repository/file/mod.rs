//! File-based repository implementation.

mod session;

pub use session::FileSessionRepository;
