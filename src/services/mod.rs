// Service exports
pub mod directory;
pub mod session;

pub use directory::{DirectoryClient, DirectoryError};
pub use session::{SessionStore, SwipeSession};
