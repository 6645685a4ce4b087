//! Marker types.

/// Marker type describing an entity creation.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Marker type describing a sale (the auction itself).
#[derive(Clone, Copy, Debug)]
pub struct Sale;
