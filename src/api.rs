mod client;
pub mod entsoe;
pub mod heartbeat;
pub mod home_assistant;
mod price_source;

pub use self::price_source::PriceSource;
