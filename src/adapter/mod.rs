// src/adapter/mod.rs
pub mod coordinator;
pub mod routes;

pub use coordinator::MarketplaceCoordinator;
pub use routes::Route;
