// src/domain/models.rs
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::errors::CatalogError;

/// Marketplace categories. The set is fixed; counts are always derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryId {
    ImageGeneration,
    TextGeneration,
    AudioGeneration,
    DataAnalysis,
    ComputerVision,
}

impl CategoryId {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryId::ImageGeneration => "image-generation",
            CategoryId::TextGeneration => "text-generation",
            CategoryId::AudioGeneration => "audio-generation",
            CategoryId::DataAnalysis => "data-analysis",
            CategoryId::ComputerVision => "computer-vision",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CategoryId::ImageGeneration => "Image Generation",
            CategoryId::TextGeneration => "Text Generation",
            CategoryId::AudioGeneration => "Audio Generation",
            CategoryId::DataAnalysis => "Data Analysis",
            CategoryId::ComputerVision => "Computer Vision",
        }
    }

    pub fn all() -> &'static [CategoryId] {
        &[
            CategoryId::ImageGeneration,
            CategoryId::TextGeneration,
            CategoryId::AudioGeneration,
            CategoryId::DataAnalysis,
            CategoryId::ComputerVision,
        ]
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryId::all()
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// A purchasable AI model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    pub description: String,
    pub creator: String,
    pub creator_wallet: String,
    pub price: Decimal,
    pub currency: String,
    pub image_url: String,
    /// Average rating, 0.0 to 5.0
    pub rating: f64,
    pub reviews: u32,
    pub category: CategoryId,
    pub tags: Vec<String>,
    pub created: NaiveDate,
    #[serde(default)]
    pub owned: bool,
    #[serde(default)]
    pub featured: bool,
}

/// Category with a live listing count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_avatar: String,
    pub rating: u8,
    pub comment: String,
    pub date: NaiveDate,
}

/// Settled purchase. Never mutated after it is recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub model_id: String,
    pub model_name: String,
    pub buyer_wallet: String,
    pub seller_wallet: String,
    pub price: Decimal,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
    pub transaction_hash: String,
}

/// Sort orders offered by the explore view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Most reviewed first
    #[default]
    Popularity,
    Newest,
    PriceLow,
    PriceHigh,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Popularity => "popularity",
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortKey::Popularity),
            "newest" => Ok(SortKey::Newest),
            "price-low" => Ok(SortKey::PriceLow),
            "price-high" => Ok(SortKey::PriceHigh),
            "rating" => Ok(SortKey::Rating),
            _ => Err(CatalogError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Explore view filter. Category and search text narrow the result together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExploreQuery {
    pub category: Option<CategoryId>,
    pub search: String,
    pub sort: SortKey,
}

/// Account returned by a wallet provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
    pub balance: Decimal,
}

/// Wallet session state.
///
/// The account only exists while connected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "account", rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Disconnected,
    Connecting,
    Connected(WalletAccount),
}

impl SessionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, SessionState::Connected(_))
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, SessionState::Connecting)
    }

    pub fn account(&self) -> Option<&WalletAccount> {
        match self {
            SessionState::Connected(account) => Some(account),
            _ => None,
        }
    }

    pub fn address(&self) -> Option<&str> {
        self.account().map(|a| a.address.as_str())
    }

    pub fn balance(&self) -> Option<Decimal> {
        self.account().map(|a| a.balance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NotificationKind::Success => write!(f, "success"),
            NotificationKind::Error => write!(f, "error"),
            NotificationKind::Info => write!(f, "info"),
            NotificationKind::Warning => write!(f, "warning"),
        }
    }
}

pub type NotificationId = Uuid;

/// Transient user-facing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub message: String,
}
