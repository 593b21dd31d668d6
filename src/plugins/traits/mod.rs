pub mod detector;
pub mod notifier;

pub use detector::StockDetector;
pub use notifier::AlertSink;
