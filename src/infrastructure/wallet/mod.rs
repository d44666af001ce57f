// src/infrastructure/wallet/mod.rs
// Simulated wallet provider

use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::domain::errors::DomainResult;
use crate::domain::models::WalletAccount;
use crate::domain::repository::WalletProvider;

pub const PLACEHOLDER_ADDRESS: &str = "0x1234567890123456789012345678901234567890";
pub const PLACEHOLDER_BALANCE: Decimal = dec!(1.234);

/// Wallet that answers every request with a fixed account after a delay
pub struct SimulatedWallet {
    delay: Duration,
    account: WalletAccount,
}

impl SimulatedWallet {
    pub fn new(delay: Duration, address: impl Into<String>, balance: Decimal) -> Self {
        Self {
            delay,
            account: WalletAccount {
                address: address.into(),
                balance,
            },
        }
    }

    pub fn placeholder(delay: Duration) -> Self {
        Self::new(delay, PLACEHOLDER_ADDRESS, PLACEHOLDER_BALANCE)
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    async fn request_account(&self) -> DomainResult<WalletAccount> {
        log::debug!("Simulating wallet connection ({:?})", self.delay);
        tokio::time::sleep(self.delay).await;
        Ok(self.account.clone())
    }

    fn last_known_account(&self) -> Option<WalletAccount> {
        Some(self.account.clone())
    }
}
