// Detector plugin implementations
pub mod best_buy;
pub mod gamestop;
pub mod generic;
pub mod page;
pub mod pokemon_center;
pub mod price;
pub mod target;

pub use best_buy::BestBuyDetector;
pub use gamestop::GameStopDetector;
pub use generic::GenericDetector;
pub use pokemon_center::PokemonCenterDetector;
pub use target::TargetDetector;

/// Phrases that mark a page as out of stock for most stores.
pub const OUT_OF_STOCK_PHRASES: &[&str] = &["out of stock", "sold out", "unavailable", "not available"];

/// Cart control labels.
pub const ADD_TO_CART_PHRASES: &[&str] = &["add to cart", "add to bag"];

/// Positive phrases for pages without known markup.
pub const IN_STOCK_PHRASES: &[&str] = &["add to cart", "add to bag", "buy now"];
