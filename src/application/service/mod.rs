// src/application/service/mod.rs
// Application services shared by the stores

pub mod notifications;

pub use notifications::{Listener, NotificationBus, Subscription, DEFAULT_TTL};
