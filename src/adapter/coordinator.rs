// src/adapter/coordinator.rs
// Marketplace coordinator: wires the stores and resolves routes to views

use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::adapter::routes::Route;
use crate::application::dto::format::{
    explorer_address_url, explorer_tx_url, short_address, short_hash,
};
use crate::application::dto::{
    DashboardView, ExploreView, HomeView, ListingDetailView, ProfileView, TransactionRow, View,
};
use crate::application::service::NotificationBus;
use crate::application::usecase::{CatalogStore, SessionStore};
use crate::config::Config;
use crate::domain::errors::{CatalogError, CatalogResult, SessionResult};
use crate::domain::models::{Listing, NotificationKind, SessionState, WalletAccount};
use crate::domain::repository::{KeyValueStore, LedgerSettlement, WalletProvider};
use crate::infrastructure::catalog::{seed_listings, seed_reviews, seed_transactions};
use crate::infrastructure::ledger::SimulatedLedger;
use crate::infrastructure::storage::{FileStore, MemoryStore};
use crate::infrastructure::wallet::SimulatedWallet;

pub struct MarketplaceCoordinator {
    catalog: Arc<CatalogStore>,
    session: Arc<SessionStore>,
    notifications: NotificationBus,
    explorer_url: String,
    shutdown: CancellationToken,
}

impl MarketplaceCoordinator {
    pub fn new(
        wallet: Arc<dyn WalletProvider + Send + Sync>,
        settlement: Arc<dyn LedgerSettlement + Send + Sync>,
        storage: Arc<dyn KeyValueStore + Send + Sync>,
        notifications: NotificationBus,
        explorer_url: impl Into<String>,
    ) -> Self {
        let shutdown = CancellationToken::new();

        let catalog = Arc::new(CatalogStore::new(
            seed_listings(),
            seed_reviews(),
            seed_transactions(),
            settlement,
            notifications.clone(),
            shutdown.child_token(),
        ));

        let session = Arc::new(SessionStore::new(
            wallet,
            storage,
            notifications.clone(),
            shutdown.child_token(),
        ));

        Self {
            catalog,
            session,
            notifications,
            explorer_url: explorer_url.into(),
            shutdown,
        }
    }

    /// Build the simulated marketplace described by the configuration
    pub fn from_config(config: &Config) -> Self {
        let wallet = Arc::new(SimulatedWallet::new(
            config.simulation.connect_delay(),
            config.wallet.address.clone(),
            config.wallet.balance,
        ));
        let ledger = Arc::new(SimulatedLedger::new(config.simulation.purchase_delay()));
        let storage: Arc<dyn KeyValueStore + Send + Sync> = match &config.storage.path {
            Some(path) => {
                log::info!("Persisting session state to {}", path);
                Arc::new(FileStore::new(path))
            }
            None => Arc::new(MemoryStore::new()),
        };

        Self::new(
            wallet,
            ledger,
            storage,
            NotificationBus::with_ttl(config.notifications.ttl()),
            config.wallet.explorer_url.clone(),
        )
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn notifications(&self) -> &NotificationBus {
        &self.notifications
    }

    pub async fn connect(&self) -> SessionResult<WalletAccount> {
        self.session.connect().await
    }

    pub fn disconnect(&self) {
        self.session.disconnect();
    }

    /// Buy a listing with the connected account
    pub async fn purchase(&self, listing_id: &str) -> CatalogResult<Listing> {
        let buyer = match self.session.address() {
            Some(address) => address,
            None => {
                log::warn!("Purchase of {} attempted without a wallet", listing_id);
                self.notifications.publish(
                    NotificationKind::Warning,
                    "Connect your wallet to purchase models.",
                );
                return Err(CatalogError::NotConnected);
            }
        };

        self.catalog.purchase(listing_id, &buyer).await
    }

    pub fn render_path(&self, path: &str) -> View {
        self.render(&Route::parse(path))
    }

    pub fn render(&self, route: &Route) -> View {
        log::debug!("Rendering {}", route);

        match route {
            Route::Home => View::Home(HomeView {
                featured: self.catalog.featured(),
                categories: self.catalog.categories(),
            }),
            Route::Explore { .. } => self.render_explore(route),
            Route::ListingDetail { id } => self.render_detail(id),
            Route::Dashboard | Route::Profile => match self.session.state() {
                SessionState::Connected(account) => {
                    if *route == Route::Dashboard {
                        View::Dashboard(self.dashboard(account))
                    } else {
                        View::Profile(self.profile(account))
                    }
                }
                _ => View::ConnectWallet {
                    route: route.to_string(),
                },
            },
            Route::NotFound { path } => View::NotFound { path: path.clone() },
        }
    }

    fn render_explore(&self, route: &Route) -> View {
        let (query, known_category) = match route.explore_query() {
            Some(q) => q,
            None => return View::NotFound { path: route.to_string() },
        };

        let results = if known_category {
            self.catalog.explore(&query)
        } else {
            Vec::new()
        };

        View::Explore(ExploreView {
            category: query.category,
            search: query.search,
            sort: query.sort,
            categories: self.catalog.categories(),
            results,
        })
    }

    fn render_detail(&self, id: &str) -> View {
        match self.catalog.get_by_id(id) {
            Some(listing) => {
                let purchase_pending = self.catalog.is_purchase_pending(id);
                View::ListingDetail(ListingDetailView {
                    creator_short: short_address(&listing.creator_wallet),
                    can_purchase: !listing.owned && !purchase_pending,
                    reviews: self.catalog.reviews_for(id),
                    purchase_pending,
                    listing,
                })
            }
            None => View::ListingNotFound { id: id.to_string() },
        }
    }

    fn dashboard(&self, account: WalletAccount) -> DashboardView {
        let transactions = self.catalog.transactions_for(&account.address);

        let total_spent: Decimal = transactions
            .iter()
            .filter(|t| t.buyer_wallet.eq_ignore_ascii_case(&account.address))
            .map(|t| t.price)
            .sum();
        let total_earned: Decimal = transactions
            .iter()
            .filter(|t| t.seller_wallet.eq_ignore_ascii_case(&account.address))
            .map(|t| t.price)
            .sum();

        let rows = transactions
            .into_iter()
            .map(|t| TransactionRow {
                short_hash: short_hash(&t.transaction_hash),
                explorer_url: explorer_tx_url(&self.explorer_url, &t.transaction_hash),
                transaction: t,
            })
            .collect();

        DashboardView {
            short_address: short_address(&account.address),
            owned: self.catalog.owned(),
            transactions: rows,
            total_spent,
            total_earned,
            account,
        }
    }

    fn profile(&self, account: WalletAccount) -> ProfileView {
        ProfileView {
            short_address: short_address(&account.address),
            explorer_url: explorer_address_url(&self.explorer_url, &account.address),
            owned_count: self.catalog.owned().len(),
            account,
        }
    }

    /// Cancel pending operations and expiry timers
    pub fn stop(&self) {
        if self.shutdown.is_cancelled() {
            return;
        }

        self.shutdown.cancel();
        self.notifications.shutdown();
        log::info!("Marketplace coordinator stopped");
    }
}

impl Drop for MarketplaceCoordinator {
    fn drop(&mut self) {
        self.stop();
    }
}
