//! Persistence of the logged-in user between invocations.

pub mod file;
pub mod memory;
pub mod store;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
pub use store::SessionStore;
