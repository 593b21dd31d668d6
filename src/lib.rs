pub mod config;
pub mod models;
pub mod plugins;
pub mod scheduler;
pub mod scraper;
pub mod state;
pub mod utils;
pub mod watchlist;

// Re-export commonly used types
pub use config::AppConfig;
pub use scheduler::StockMonitor;
pub use utils::error::AppError;

pub type Result<T> = std::result::Result<T, AppError>;
