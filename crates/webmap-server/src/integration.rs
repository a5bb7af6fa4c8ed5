use serde_json::{Map, Value};
use std::sync::{Arc, PoisonError, RwLock};
use webmap_common::UnitPos;
use webmap_logger::log;
use webmap_logger::LogSeverity::Info;

/// Optional source of extra per-unit metadata, such as land claims from another plugin
pub trait MetadataEnricher: Send + Sync {
    fn name(&self) -> &str;

    /// Whether the capability behind this enricher is present in the running host
    fn is_available(&self) -> bool;

    fn fill_metadata(&self, unit: UnitPos, dimension: &str, meta: &mut Map<String, Value>);
}

/// Enrichers that passed their availability probe
pub struct IntegrationRegistry {
    candidates: Vec<Arc<dyn MetadataEnricher>>,
    active: RwLock<Vec<Arc<dyn MetadataEnricher>>>,
}

impl IntegrationRegistry {
    pub fn new(candidates: Vec<Arc<dyn MetadataEnricher>>) -> Self {
        let registry = Self {
            candidates,
            active: RwLock::new(Vec::new()),
        };
        registry.probe();
        registry
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Re-runs every candidate's availability check and keeps the ones that pass
    pub fn probe(&self) {
        let available: Vec<Arc<dyn MetadataEnricher>> = self
            .candidates
            .iter()
            .filter(|enricher| enricher.is_available())
            .cloned()
            .collect();

        for enricher in &available {
            log(format!("Enabled {} integration", enricher.name()), Info);
        }

        *self
            .active
            .write()
            .unwrap_or_else(PoisonError::into_inner) = available;
    }

    pub fn active_names(&self) -> Vec<String> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|enricher| enricher.name().to_owned())
            .collect()
    }

    pub fn fill_metadata(&self, unit: UnitPos, dimension: &str, meta: &mut Map<String, Value>) {
        for enricher in self
            .active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
        {
            enricher.fill_metadata(unit, dimension, meta);
        }
    }
}

type ClaimLookup = dyn Fn(UnitPos, &str) -> Option<String> + Send + Sync;
type Probe = dyn Fn() -> bool + Send + Sync;

/// Tags claimed units with the owning team's name under `"team"`
pub struct ClaimEnricher {
    probe: Box<Probe>,
    lookup: Box<ClaimLookup>,
}

impl ClaimEnricher {
    pub fn new(
        probe: impl Fn() -> bool + Send + Sync + 'static,
        lookup: impl Fn(UnitPos, &str) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            probe: Box::new(probe),
            lookup: Box::new(lookup),
        }
    }
}

impl MetadataEnricher for ClaimEnricher {
    fn name(&self) -> &str {
        "claims"
    }

    fn is_available(&self) -> bool {
        (self.probe)()
    }

    fn fill_metadata(&self, unit: UnitPos, dimension: &str, meta: &mut Map<String, Value>) {
        if let Some(team) = (self.lookup)(unit, dimension) {
            meta.insert("team".to_owned(), Value::String(team));
        }
    }
}
