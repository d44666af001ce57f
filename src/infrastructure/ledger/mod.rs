// src/infrastructure/ledger/mod.rs
// Simulated ledger settlement

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::repository::{LedgerSettlement, PurchaseOrder, SettlementReceipt};

/// Ledger that accepts every order after a fixed delay
pub struct SimulatedLedger {
    delay: Duration,
}

impl SimulatedLedger {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

/// Random 32-byte hash rendered as `0x` + 64 hex digits
fn random_transaction_hash() -> String {
    format!(
        "0x{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

#[async_trait]
impl LedgerSettlement for SimulatedLedger {
    async fn settle(&self, order: &PurchaseOrder) -> DomainResult<SettlementReceipt> {
        log::debug!(
            "Simulating settlement of {} {} for {} ({:?})",
            order.price,
            order.currency,
            order.listing_id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        Ok(SettlementReceipt {
            transaction_hash: random_transaction_hash(),
            settled_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test(start_paused = true)]
    async fn test_settle_returns_hash() {
        let ledger = SimulatedLedger::new(Duration::from_millis(2000));
        let order = PurchaseOrder {
            listing_id: "model-1".to_string(),
            listing_name: "ImageCraft Pro".to_string(),
            buyer: "0xbuyer".to_string(),
            seller: "0xseller".to_string(),
            price: dec!(0.5),
            currency: "ETH".to_string(),
        };

        let receipt = ledger.settle(&order).await.unwrap();
        assert_eq!(receipt.transaction_hash.len(), 66);
        assert!(receipt.transaction_hash.starts_with("0x"));
        assert!(receipt.transaction_hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
    }
}
