//! [`Query`] collection related to multiple [`Auction`]s.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Auction, Query};
use crate::read::auction::{list, view};

use super::DatasetQuery;

/// Queries a [`list::Page`] of filtered and sorted [`Auction`]s.
pub type List = DatasetQuery<By<list::Page, list::Selector>>;

/// Queries the soonest upcoming [`Auction`]s.
pub type Upcoming = DatasetQuery<By<list::Page, view::Upcoming>>;

/// Queries the [`Auction`]s with the biggest discounts.
pub type Opportunities = DatasetQuery<By<list::Page, view::Opportunities>>;

/// Queries the most recently recorded [`Auction`]s.
pub type MostRecent = DatasetQuery<By<list::Page, view::MostRecent>>;

/// Queries the furthest upcoming [`Auction`]s.
pub type Distant = DatasetQuery<By<list::Page, view::Distant>>;

/// Queries the upcoming [`Auction`]s lacking essential attributes.
pub type Incomplete = DatasetQuery<By<list::Page, view::Incomplete>>;
