// Domain types and value objects
mod coin;
mod daily_bar;
mod ticker;

// Re-export commonly used types to the world
pub use coin::{Coin, CoinListing};
pub use daily_bar::{BarType, DailyBar};
pub use ticker::Ticker;
