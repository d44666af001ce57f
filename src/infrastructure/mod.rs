// src/infrastructure/mod.rs
// Concrete implementations of the domain ports

pub mod catalog;
pub mod ledger;
pub mod storage;
pub mod wallet;
