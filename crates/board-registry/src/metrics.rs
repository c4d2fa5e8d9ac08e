use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

use crate::error::Result;
use crate::registry::board_registry;
use crate::BoardId;

#[derive(Clone)]
pub struct LookupMetrics {
    pub known_boards: IntGauge,
    pub lookups: IntCounter,
    pub misses: IntCounter,
    pub configs_loaded: IntGauge,
}

#[derive(Clone)]
pub struct MetricsHub {
    pub registry: Registry,
    pub lookup: LookupMetrics,
}

impl MetricsHub {
    pub fn new() -> Result<Self, String> {
        let registry = Registry::new();
        let known_boards = IntGauge::new(
            "board_registry_known_boards",
            "Number of board identifiers in the registry",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let lookups = IntCounter::new(
            "board_registry_lookups_total",
            "Total board lookups by code or name",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let misses = IntCounter::new(
            "board_registry_lookup_misses_total",
            "Lookups matching no registered board",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let configs_loaded = IntGauge::new(
            "board_registry_configs_loaded",
            "Number of board session configs loaded",
        )
        .map_err(|e| format!("metrics init error: {e}"))?;
        let lookup = LookupMetrics {
            known_boards,
            lookups,
            misses,
            configs_loaded,
        };
        let _ = registry.register(Box::new(lookup.known_boards.clone()));
        let _ = registry.register(Box::new(lookup.lookups.clone()));
        let _ = registry.register(Box::new(lookup.misses.clone()));
        let _ = registry.register(Box::new(lookup.configs_loaded.clone()));
        lookup.known_boards.set(board_registry().len() as i64);
        Ok(Self { registry, lookup })
    }

    /// Counts one lookup, by code or by name, and a miss if it failed.
    pub fn record_lookup(&self, result: &Result<BoardId>) {
        self.lookup.lookups.inc();
        if result.is_err() {
            self.lookup.misses.inc();
        }
    }

    pub fn encode_text(&self) -> String {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        if let Err(e) = encoder.encode(&self.registry.gather(), &mut buf) {
            return format!("error encoding metrics: {e}");
        }
        String::from_utf8(buf).unwrap_or_default()
    }
}
