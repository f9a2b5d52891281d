//! Read-only candle data shared by every alert in a batch

use crate::models::candle::Candle;
use std::collections::HashMap;

/// Base-resolution series per symbol, fetched once before evaluation starts
#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    series: HashMap<String, Vec<Candle>>,
}

impl MarketSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, symbol: &str, candles: Vec<Candle>) {
        self.series.insert(normalize(symbol), candles);
    }

    pub fn with_series(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.insert(symbol, candles);
        self
    }

    /// Unknown symbols read as an empty series.
    pub fn candles(&self, symbol: &str) -> &[Candle] {
        self.series
            .get(&normalize(symbol))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.series.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_ascii_uppercase()
}
