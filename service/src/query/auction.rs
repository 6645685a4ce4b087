//! [`Query`] collection related to a single [`Auction`].

use common::operations::By;

use crate::domain::{auction, Auction};
#[cfg(doc)]
use crate::Query;

use super::DatasetQuery;

/// Queries an [`Auction`] by its [`auction::Id`].
///
/// An absent [`Auction`] is [`None`] rather than an error.
pub type ById = DatasetQuery<By<Option<Auction>, auction::Id>>;
