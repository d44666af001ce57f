// src/application/usecase/catalog.rs
// Catalog store: owns the listing collection and runs purchases

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, RwLock};

use tokio_util::sync::CancellationToken;

use crate::application::service::NotificationBus;
use crate::domain::errors::{CatalogError, CatalogResult};
use crate::domain::models::{
    Category, CategoryId, ExploreQuery, Listing, NotificationKind, Review, Transaction,
};
use crate::domain::repository::{LedgerSettlement, PurchaseOrder};
use crate::domain::service;

pub struct CatalogStore {
    // Replaced wholesale on every write; readers keep their snapshot
    listings: RwLock<Arc<Vec<Listing>>>,
    transactions: RwLock<Arc<Vec<Transaction>>>,
    reviews: HashMap<String, Vec<Review>>,
    pending: Mutex<HashSet<String>>,
    settlement: Arc<dyn LedgerSettlement + Send + Sync>,
    notifications: NotificationBus,
    shutdown: CancellationToken,
}

/// Clears the pending mark when a purchase finishes or its future is dropped
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<String>>,
    id: String,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.lock().unwrap().remove(&self.id);
    }
}

impl CatalogStore {
    /// Build a store over a fixed collection. Duplicate ids keep the first entry.
    pub fn new(
        listings: Vec<Listing>,
        reviews: HashMap<String, Vec<Review>>,
        transactions: Vec<Transaction>,
        settlement: Arc<dyn LedgerSettlement + Send + Sync>,
        notifications: NotificationBus,
        shutdown: CancellationToken,
    ) -> Self {
        let mut seen = HashSet::new();
        let listings: Vec<Listing> = listings
            .into_iter()
            .filter(|l| {
                let fresh = seen.insert(l.id.clone());
                if !fresh {
                    log::warn!("Dropping duplicate listing id {}", l.id);
                }
                fresh
            })
            .map(|mut l| {
                l.rating = l.rating.clamp(0.0, 5.0);
                l
            })
            .collect();

        log::debug!("Catalog loaded with {} listings", listings.len());

        Self {
            listings: RwLock::new(Arc::new(listings)),
            transactions: RwLock::new(Arc::new(transactions)),
            reviews,
            pending: Mutex::new(HashSet::new()),
            settlement,
            notifications,
            shutdown,
        }
    }

    /// Immutable view of the current collection
    pub fn snapshot(&self) -> Arc<Vec<Listing>> {
        self.listings.read().unwrap().clone()
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.snapshot().as_ref().clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<Listing> {
        service::find_by_id(&self.snapshot(), id).cloned()
    }

    pub fn get_by_category(&self, category: CategoryId) -> Vec<Listing> {
        service::filter_by_category(&self.snapshot(), category)
    }

    pub fn search(&self, query: &str) -> Vec<Listing> {
        service::search(&self.snapshot(), query)
    }

    pub fn featured(&self) -> Vec<Listing> {
        service::featured(&self.snapshot())
    }

    pub fn categories(&self) -> Vec<Category> {
        service::categories(&self.snapshot())
    }

    pub fn explore(&self, query: &ExploreQuery) -> Vec<Listing> {
        service::explore(&self.snapshot(), query)
    }

    pub fn owned(&self) -> Vec<Listing> {
        service::owned(&self.snapshot())
    }

    pub fn reviews_for(&self, id: &str) -> Vec<Review> {
        self.reviews.get(id).cloned().unwrap_or_default()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.read().unwrap().as_ref().clone()
    }

    /// Transactions where the account bought or sold
    pub fn transactions_for(&self, account: &str) -> Vec<Transaction> {
        self.transactions
            .read()
            .unwrap()
            .iter()
            .filter(|t| {
                t.buyer_wallet.eq_ignore_ascii_case(account)
                    || t.seller_wallet.eq_ignore_ascii_case(account)
            })
            .cloned()
            .collect()
    }

    pub fn is_purchase_pending(&self, id: &str) -> bool {
        self.pending.lock().unwrap().contains(id)
    }

    /// Settle a purchase and mark the listing as owned.
    ///
    /// Every outcome except cancellation publishes a notification.
    pub async fn purchase(&self, listing_id: &str, buyer: &str) -> CatalogResult<Listing> {
        let result = self.try_purchase(listing_id, buyer).await;

        match &result {
            Ok(listing) => {
                log::info!("Purchased {} for {} {}", listing.id, listing.price, listing.currency);
                self.notifications
                    .publish(NotificationKind::Success, "Model purchased successfully!");
            }
            Err(CatalogError::Cancelled(id)) => {
                log::info!("Purchase of {} cancelled", id);
            }
            Err(e @ (CatalogError::AlreadyOwned(_) | CatalogError::PurchaseInProgress(_))) => {
                log::warn!("Purchase rejected: {}", e);
                let message = match e {
                    CatalogError::AlreadyOwned(_) => "You already own this model.",
                    _ => "A purchase for this model is already in progress.",
                };
                self.notifications.publish(NotificationKind::Warning, message);
            }
            Err(e) => {
                log::error!("Error purchasing model: {}", e);
                self.notifications.publish(
                    NotificationKind::Error,
                    "Failed to purchase model. Please try again.",
                );
            }
        }

        result
    }

    async fn try_purchase(&self, listing_id: &str, buyer: &str) -> CatalogResult<Listing> {
        let listing = self
            .get_by_id(listing_id)
            .ok_or_else(|| CatalogError::NotFound(listing_id.to_string()))?;

        if listing.owned {
            return Err(CatalogError::AlreadyOwned(listing.id));
        }

        let _guard = self.mark_pending(&listing.id)?;

        let order = PurchaseOrder {
            listing_id: listing.id.clone(),
            listing_name: listing.name.clone(),
            buyer: buyer.to_string(),
            seller: listing.creator_wallet.clone(),
            price: listing.price,
            currency: listing.currency.clone(),
        };

        log::debug!("Settling purchase of {} by {}", order.listing_id, order.buyer);
        let receipt = tokio::select! {
            _ = self.shutdown.cancelled() => {
                return Err(CatalogError::Cancelled(listing.id.clone()));
            }
            settled = self.settlement.settle(&order) => {
                settled.map_err(|e| CatalogError::Settlement(e.to_string()))?
            }
        };

        let updated = {
            let mut listings = self.listings.write().unwrap();
            let next = service::mark_owned(&listings, &listing.id);
            let updated = service::find_by_id(&next, &listing.id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(listing.id.clone()))?;
            *listings = Arc::new(next);
            updated
        };

        {
            let mut transactions = self.transactions.write().unwrap();
            let mut next = transactions.as_ref().clone();
            next.push(Transaction {
                id: format!("tx-{}", next.len() + 1),
                model_id: order.listing_id,
                model_name: order.listing_name,
                buyer_wallet: order.buyer,
                seller_wallet: order.seller,
                price: order.price,
                currency: order.currency,
                timestamp: receipt.settled_at,
                transaction_hash: receipt.transaction_hash,
            });
            *transactions = Arc::new(next);
        }

        Ok(updated)
    }

    fn mark_pending(&self, id: &str) -> CatalogResult<PendingGuard<'_>> {
        let mut pending = self.pending.lock().unwrap();
        if !pending.insert(id.to_string()) {
            return Err(CatalogError::PurchaseInProgress(id.to_string()));
        }

        Ok(PendingGuard {
            pending: &self.pending,
            id: id.to_string(),
        })
    }
}
