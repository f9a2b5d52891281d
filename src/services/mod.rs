//! Collaborators around the evaluation core: market data, alert storage and
//! delivery hooks.

pub mod alert_store;
pub mod market_data;
pub mod notifier;

pub use alert_store::{AlertStore, InMemoryAlertStore, JsonFileAlertStore};
pub use market_data::{CachedMarketDataProvider, MarketDataProvider, StaticMarketData};
pub use notifier::{AlertNotifier, LogNotifier};
