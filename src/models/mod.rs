pub mod restock_event;
pub mod source;
pub mod verdict;
pub mod watch_item;

// Re-exports for convenience
pub use restock_event::*;
pub use source::*;
pub use verdict::*;
pub use watch_item::*;
