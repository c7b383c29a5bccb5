//! HTML parsers for polymarket.com pages.

pub mod map;
pub mod odds;

pub use map::MapParser;
pub use odds::OddsParser;
