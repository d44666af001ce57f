pub mod catalog;
pub mod session;

// Re-export public API
pub use catalog::CatalogStore;
pub use session::{SessionStore, CONNECTED_FLAG_KEY};
