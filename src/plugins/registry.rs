use std::collections::HashMap;

use super::detectors::{
    BestBuyDetector, GameStopDetector, GenericDetector, PokemonCenterDetector, TargetDetector,
};
use super::traits::StockDetector;
use crate::models::{AvailabilityVerdict, SourceKind};
use crate::utils::error::AppError;

pub type DetectorBox = Box<dyn StockDetector>;

/// One detector per source kind. Built once at startup, read-only afterwards.
pub struct DetectorRegistry {
    detectors: HashMap<SourceKind, DetectorBox>,
}

impl DetectorRegistry {
    pub fn new() -> Self {
        Self {
            detectors: HashMap::new(),
        }
    }

    /// Registry covering every `SourceKind`.
    pub fn with_default_detectors() -> Self {
        let mut registry = Self::new();
        registry.register_detector(Box::new(TargetDetector::new()));
        registry.register_detector(Box::new(BestBuyDetector::new()));
        registry.register_detector(Box::new(PokemonCenterDetector::new()));
        registry.register_detector(Box::new(GameStopDetector::new()));
        registry.register_detector(Box::new(GenericDetector::for_source(SourceKind::Amazon)));
        registry.register_detector(Box::new(GenericDetector::new()));
        registry
    }

    /// Register a detector for its source, returning the one it replaces.
    pub fn register_detector(&mut self, detector: DetectorBox) -> Option<DetectorBox> {
        let source = detector.source();
        tracing::debug!("Registering {} for {}", detector.name(), source);
        self.detectors.insert(source, detector)
    }

    pub fn has_detector(&self, source: SourceKind) -> bool {
        self.detectors.contains_key(&source)
    }

    pub fn list_sources(&self) -> Vec<SourceKind> {
        SourceKind::ALL
            .iter()
            .copied()
            .filter(|source| self.detectors.contains_key(source))
            .collect()
    }

    pub fn detector_for(&self, source: SourceKind) -> Result<&dyn StockDetector, AppError> {
        self.detectors
            .get(&source)
            .map(|detector| detector.as_ref())
            .ok_or_else(|| AppError::DetectorNotFound {
                source_kind: source.to_string(),
            })
    }

    /// Classify page content with the detector registered for `source`.
    pub fn detect(&self, source: SourceKind, content: &str) -> Result<AvailabilityVerdict, AppError> {
        Ok(self.detector_for(source)?.detect(content))
    }
}

impl Default for DetectorRegistry {
    fn default() -> Self {
        Self::with_default_detectors()
    }
}
