use crate::models::{AvailabilityVerdict, SourceKind};

/// Availability heuristics for one source's product pages.
///
/// Implementations never fail: a page they cannot make sense of degrades to `Unknown` or to the
/// source's negative default.
pub trait StockDetector: Send + Sync {
    /// Plugin metadata
    fn name(&self) -> &str;
    fn source(&self) -> SourceKind;

    /// Classify raw page content.
    fn detect(&self, content: &str) -> AvailabilityVerdict;
}
