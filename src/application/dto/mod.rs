// src/application/dto/mod.rs
// View data handed to the presentation layer

pub mod format;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::models::{
    Category, CategoryId, Listing, Review, SortKey, Transaction, WalletAccount,
};

#[derive(Debug, Clone, Serialize)]
pub struct HomeView {
    pub featured: Vec<Listing>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExploreView {
    pub category: Option<CategoryId>,
    pub search: String,
    pub sort: SortKey,
    pub categories: Vec<Category>,
    pub results: Vec<Listing>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingDetailView {
    pub listing: Listing,
    pub reviews: Vec<Review>,
    pub creator_short: String,
    pub purchase_pending: bool,
    /// Whether the buy action is offered (not owned, nothing pending)
    pub can_purchase: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub short_hash: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub account: WalletAccount,
    pub short_address: String,
    pub owned: Vec<Listing>,
    pub transactions: Vec<TransactionRow>,
    pub total_spent: Decimal,
    pub total_earned: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileView {
    pub account: WalletAccount,
    pub short_address: String,
    pub explorer_url: String,
    pub owned_count: usize,
}

/// Everything a route can resolve to
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "view", rename_all = "kebab-case")]
pub enum View {
    Home(HomeView),
    Explore(ExploreView),
    ListingDetail(ListingDetailView),
    ListingNotFound { id: String },
    Dashboard(DashboardView),
    Profile(ProfileView),
    /// Route needs a connected wallet
    ConnectWallet { route: String },
    NotFound { path: String },
}
