pub mod detectors;
pub mod dispatcher;
pub mod notifiers;
pub mod registry;
pub mod traits;

pub use dispatcher::{AlertDispatcher, DispatchHandle, SinkOutcome};
pub use registry::DetectorRegistry;
pub use traits::{AlertSink, StockDetector};
