// src/domain/repository/mod.rs
// Port interfaces for the outside world the stores depend on

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::domain::errors::DomainResult;
use crate::domain::models::WalletAccount;

/// Wallet provider the session store connects through
#[async_trait]
pub trait WalletProvider {
    /// Ask the wallet for an account and its balance
    async fn request_account(&self) -> DomainResult<WalletAccount>;

    /// Account to restore from a persisted connection, without prompting
    fn last_known_account(&self) -> Option<WalletAccount>;
}

/// What the catalog hands to the ledger for settlement
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseOrder {
    pub listing_id: String,
    pub listing_name: String,
    pub buyer: String,
    pub seller: String,
    pub price: Decimal,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettlementReceipt {
    pub transaction_hash: String,
    pub settled_at: DateTime<Utc>,
}

/// Ledger that settles a purchase order
#[async_trait]
pub trait LedgerSettlement {
    async fn settle(&self, order: &PurchaseOrder) -> DomainResult<SettlementReceipt>;
}

/// Durable string key/value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> DomainResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> DomainResult<()>;
    fn remove(&self, key: &str) -> DomainResult<()>;
}
