// src/domain/mod.rs
pub mod errors;
pub mod models;
pub mod repository;
pub mod service;

// Re-export common types for convenience
pub use errors::{
    AppError, AppResult, CatalogError, CatalogResult, DomainError, DomainResult, SessionError,
    SessionResult,
};
pub use models::{
    Category, CategoryId, ExploreQuery, Listing, Notification, NotificationId, NotificationKind,
    Review, SessionState, SortKey, Transaction, WalletAccount,
};
