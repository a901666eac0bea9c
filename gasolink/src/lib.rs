//! Fuel station discovery.
//!
//! Fetches station lists with per-fuel prices, narrows them by fuel,
//! price and freshness, orders and pages them for display, and keeps a
//! durable list of favorite stations.

pub mod browser;
pub mod config;
pub mod domain;
pub mod engine;
pub mod favorites;
pub mod source;
