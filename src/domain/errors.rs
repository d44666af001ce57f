// src/domain/errors.rs
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::Unknown(s)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Listing not found: {0}")]
    NotFound(String),

    #[error("Listing already owned: {0}")]
    AlreadyOwned(String),

    #[error("Purchase already in progress: {0}")]
    PurchaseInProgress(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Settlement failed: {0}")]
    Settlement(String),

    #[error("Purchase cancelled: {0}")]
    Cancelled(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Connection already in progress")]
    AlreadyConnecting,

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Connection cancelled")]
    Cancelled,
}

/// Errors reported by the injected ports (wallet, ledger, storage)
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Wallet error: {0}")]
    WalletError(String),

    #[error("Ledger error: {0}")]
    LedgerError(String),

    #[error("Storage error: {0}")]
    StorageError(String),
}

pub type AppResult<T> = Result<T, AppError>;
pub type CatalogResult<T> = Result<T, CatalogError>;
pub type SessionResult<T> = Result<T, SessionError>;
pub type DomainResult<T> = Result<T, DomainError>;
