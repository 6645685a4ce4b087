//! Domain definitions.

pub mod auction;

pub use self::auction::Auction;
