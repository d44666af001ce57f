// src/application/usecase/session.rs
// Session store: simulated wallet connection state

use std::sync::{Arc, Mutex};

use tokio_util::sync::CancellationToken;

use crate::application::service::NotificationBus;
use crate::domain::errors::{SessionError, SessionResult};
use crate::domain::models::{NotificationKind, SessionState, WalletAccount};
use crate::domain::repository::{KeyValueStore, WalletProvider};

/// Storage key of the persisted connection flag
pub const CONNECTED_FLAG_KEY: &str = "wallet-connected";

struct SessionInner {
    state: SessionState,
    // Cancels the connect attempt in flight, if any
    attempt: Option<CancellationToken>,
    // Bumped on every connect attempt
    generation: u64,
}

// Falls back to Disconnected if its attempt ends while still Connecting,
// including when the connect future is dropped mid-flight.
struct ConnectGuard<'a> {
    inner: &'a Mutex<SessionInner>,
    generation: u64,
}

impl Drop for ConnectGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation == self.generation && inner.state.is_connecting() {
            inner.state = SessionState::Disconnected;
            inner.attempt = None;
        }
    }
}

pub struct SessionStore {
    inner: Mutex<SessionInner>,
    wallet: Arc<dyn WalletProvider + Send + Sync>,
    storage: Arc<dyn KeyValueStore + Send + Sync>,
    notifications: NotificationBus,
    shutdown: CancellationToken,
}

impl SessionStore {
    /// Create the store and restore a persisted connection, if any
    pub fn new(
        wallet: Arc<dyn WalletProvider + Send + Sync>,
        storage: Arc<dyn KeyValueStore + Send + Sync>,
        notifications: NotificationBus,
        shutdown: CancellationToken,
    ) -> Self {
        let state = Self::restore(wallet.as_ref(), storage.as_ref());

        Self {
            inner: Mutex::new(SessionInner {
                state,
                attempt: None,
                generation: 0,
            }),
            wallet,
            storage,
            notifications,
            shutdown,
        }
    }

    fn restore(
        wallet: &(dyn WalletProvider + Send + Sync),
        storage: &(dyn KeyValueStore + Send + Sync),
    ) -> SessionState {
        match storage.get(CONNECTED_FLAG_KEY) {
            Ok(Some(flag)) if flag == "true" => match wallet.last_known_account() {
                Some(account) => {
                    log::info!("Restored wallet session for {}", account.address);
                    SessionState::Connected(account)
                }
                None => {
                    log::warn!("Persisted wallet flag set but no account to restore");
                    SessionState::Disconnected
                }
            },
            Ok(_) => SessionState::Disconnected,
            Err(e) => {
                log::warn!("Failed to read persisted wallet flag: {}", e);
                SessionState::Disconnected
            }
        }
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().unwrap().state.clone()
    }

    pub fn is_connected(&self) -> bool {
        self.inner.lock().unwrap().state.is_connected()
    }

    pub fn address(&self) -> Option<String> {
        self.inner.lock().unwrap().state.address().map(str::to_string)
    }

    /// Connect through the wallet provider.
    ///
    /// Returns the current account without side effects when already
    /// connected. A second call while connecting is rejected.
    pub async fn connect(&self) -> SessionResult<WalletAccount> {
        let attempt = {
            let mut inner = self.inner.lock().unwrap();
            if let SessionState::Connected(account) = &inner.state {
                log::debug!("Wallet already connected as {}", account.address);
                return Ok(account.clone());
            }

            if inner.state.is_connecting() {
                None
            } else {
                let attempt = self.shutdown.child_token();
                inner.state = SessionState::Connecting;
                inner.attempt = Some(attempt.clone());
                inner.generation += 1;
                Some((attempt, inner.generation))
            }
        };

        let (attempt, guard) = match attempt {
            Some((attempt, generation)) => (
                attempt,
                ConnectGuard {
                    inner: &self.inner,
                    generation,
                },
            ),
            None => {
                log::warn!("Wallet connection already in progress");
                self.notifications.publish(
                    NotificationKind::Warning,
                    "Wallet connection already in progress.",
                );
                return Err(SessionError::AlreadyConnecting);
            }
        };

        let requested = tokio::select! {
            _ = attempt.cancelled() => Err(SessionError::Cancelled),
            account = self.wallet.request_account() => {
                account.map_err(|e| SessionError::Wallet(e.to_string()))
            }
        };

        let result = requested.and_then(|account| self.finish_connect(&attempt, account));

        match &result {
            Ok(account) => {
                log::info!("Wallet connected: {}", account.address);
                self.notifications
                    .publish(NotificationKind::Success, "Wallet connected successfully!");
            }
            Err(SessionError::Cancelled) => {
                log::info!("Wallet connection cancelled");
            }
            Err(e) => {
                log::error!("Error connecting wallet: {}", e);
                drop(guard);
                self.notifications.publish(
                    NotificationKind::Error,
                    "Failed to connect wallet. Please try again.",
                );
            }
        }

        result
    }

    // Commit a resolved connect unless it was cancelled meanwhile
    fn finish_connect(
        &self,
        attempt: &CancellationToken,
        account: WalletAccount,
    ) -> SessionResult<WalletAccount> {
        let mut inner = self.inner.lock().unwrap();
        if attempt.is_cancelled() || !inner.state.is_connecting() {
            return Err(SessionError::Cancelled);
        }

        self.storage
            .set(CONNECTED_FLAG_KEY, "true")
            .map_err(|e| SessionError::Storage(e.to_string()))?;

        inner.state = SessionState::Connected(account.clone());
        inner.attempt = None;
        Ok(account)
    }

    /// Clear the session and the persisted flag. Aborts a pending connect.
    pub fn disconnect(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            if let Some(attempt) = inner.attempt.take() {
                attempt.cancel();
            }
            inner.state = SessionState::Disconnected;
        }

        if let Err(e) = self.storage.remove(CONNECTED_FLAG_KEY) {
            log::warn!("Failed to clear persisted wallet flag: {}", e);
        }

        log::info!("Wallet disconnected");
        self.notifications
            .publish(NotificationKind::Info, "Wallet disconnected.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{DomainError, DomainResult};
    use crate::infrastructure::storage::MemoryStore;
    use crate::infrastructure::wallet::SimulatedWallet;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;
    use std::time::Duration;
    use tokio::time::Instant;

    struct RejectingWallet;

    #[async_trait]
    impl WalletProvider for RejectingWallet {
        async fn request_account(&self) -> DomainResult<WalletAccount> {
            Err(DomainError::WalletError("user rejected".to_string()))
        }

        fn last_known_account(&self) -> Option<WalletAccount> {
            None
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> DomainResult<Option<String>> {
            Err(DomainError::StorageError("unavailable".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> DomainResult<()> {
            Err(DomainError::StorageError("unavailable".to_string()))
        }

        fn remove(&self, _key: &str) -> DomainResult<()> {
            Err(DomainError::StorageError("unavailable".to_string()))
        }
    }

    fn wallet() -> Arc<SimulatedWallet> {
        Arc::new(SimulatedWallet::placeholder(Duration::from_millis(1000)))
    }

    fn session_with(
        wallet: Arc<dyn WalletProvider + Send + Sync>,
        storage: Arc<dyn KeyValueStore + Send + Sync>,
    ) -> (Arc<SessionStore>, NotificationBus) {
        let bus = NotificationBus::new();
        let store = SessionStore::new(wallet, storage, bus.clone(), CancellationToken::new());
        (Arc::new(store), bus)
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_persists_flag() {
        let storage = Arc::new(MemoryStore::new());
        let (session, bus) = session_with(wallet(), storage.clone());
        assert_eq!(session.state(), SessionState::Disconnected);

        let started = Instant::now();
        let account = session.connect().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(1000));
        assert_eq!(account.address.len(), 42);
        assert!(account.address.starts_with("0x"));
        assert_eq!(account.balance, dec!(1.234));
        assert!(session.is_connected());
        assert_eq!(storage.get(CONNECTED_FLAG_KEY).unwrap().as_deref(), Some("true"));
        assert_eq!(bus.notifications()[0].kind, NotificationKind::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_connecting_state_is_visible() {
        let (session, _) = session_with(wallet(), Arc::new(MemoryStore::new()));

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::task::yield_now().await;
        assert!(session.state().is_connecting());
        assert_eq!(session.address(), None);

        assert_eq!(session.connect().await, Err(SessionError::AlreadyConnecting));
        assert!(pending.await.unwrap().is_ok());
        assert!(session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_clears_everything() {
        let storage = Arc::new(MemoryStore::new());
        let (session, bus) = session_with(wallet(), storage.clone());
        session.connect().await.unwrap();

        session.disconnect();

        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(session.address(), None);
        assert_eq!(storage.get(CONNECTED_FLAG_KEY).unwrap(), None);
        let last = bus.notifications().pop().unwrap();
        assert_eq!(last.kind, NotificationKind::Info);
    }

    #[tokio::test(start_paused = true)]
    async fn test_disconnect_cancels_pending_connect() {
        let storage = Arc::new(MemoryStore::new());
        let (session, bus) = session_with(wallet(), storage.clone());

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(300)).await;
        session.disconnect();

        assert_eq!(pending.await.unwrap(), Err(SessionError::Cancelled));
        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(storage.get(CONNECTED_FLAG_KEY).unwrap(), None);
        assert!(bus
            .notifications()
            .iter()
            .all(|n| n.kind != NotificationKind::Success));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wallet_failure_resets_state() {
        let (session, bus) = session_with(Arc::new(RejectingWallet), Arc::new(MemoryStore::new()));

        let result = session.connect().await;

        assert!(matches!(result, Err(SessionError::Wallet(_))));
        assert_eq!(session.state(), SessionState::Disconnected);
        assert_eq!(bus.notifications()[0].kind, NotificationKind::Error);
    }

    #[tokio::test(start_paused = true)]
    async fn test_storage_failure_leaves_disconnected() {
        let (session, bus) = session_with(wallet(), Arc::new(BrokenStore));

        let result = session.connect().await;

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(!session.is_connected());
        assert_eq!(bus.notifications()[0].kind, NotificationKind::Error);

        // Disconnect still succeeds
        session.disconnect();
        assert_eq!(session.state(), SessionState::Disconnected);
    }

    #[test]
    fn test_restore_from_persisted_flag() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(CONNECTED_FLAG_KEY, "true").unwrap();

        let (session, bus) = session_with(wallet(), storage);

        assert!(session.is_connected());
        assert_eq!(
            session.address().as_deref(),
            Some("0x1234567890123456789012345678901234567890")
        );
        assert!(bus.notifications().is_empty());
    }

    #[test]
    fn test_restore_ignores_other_values() {
        let storage = Arc::new(MemoryStore::new());
        storage.set(CONNECTED_FLAG_KEY, "false").unwrap();
        let (session, _) = session_with(wallet(), storage);
        assert!(!session.is_connected());

        let (session, _) = session_with(wallet(), Arc::new(BrokenStore));
        assert!(!session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_connect_allows_retry() {
        let (session, _) = session_with(wallet(), Arc::new(MemoryStore::new()));

        let timed_out = tokio::time::timeout(Duration::from_millis(500), session.connect()).await;
        assert!(timed_out.is_err());
        assert_eq!(session.state(), SessionState::Disconnected);

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        pending.abort();
        let _ = pending.await;
        assert_eq!(session.state(), SessionState::Disconnected);

        assert!(session.connect().await.is_ok());
        assert!(session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_during_connect_resets_state() {
        let shutdown = CancellationToken::new();
        let session = Arc::new(SessionStore::new(
            wallet(),
            Arc::new(MemoryStore::new()),
            NotificationBus::new(),
            shutdown.clone(),
        ));

        let pending = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        shutdown.cancel();

        assert_eq!(pending.await.unwrap(), Err(SessionError::Cancelled));
        assert_eq!(session.state(), SessionState::Disconnected);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_attempt_keeps_newer_connect() {
        let (session, _) = session_with(wallet(), Arc::new(MemoryStore::new()));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;
        session.disconnect();

        let second = {
            let session = session.clone();
            tokio::spawn(async move { session.connect().await })
        };
        tokio::task::yield_now().await;
        assert_eq!(first.await.unwrap(), Err(SessionError::Cancelled));
        assert!(session.state().is_connecting());

        assert!(second.await.unwrap().is_ok());
        assert!(session.is_connected());
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_when_connected_is_noop() {
        let (session, bus) = session_with(wallet(), Arc::new(MemoryStore::new()));
        let first = session.connect().await.unwrap();
        let started = Instant::now();

        let second = session.connect().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(started.elapsed(), Duration::ZERO);
        assert_eq!(bus.notifications().len(), 1);
    }
}
