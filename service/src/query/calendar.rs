//! [`Query`] collection related to a [`Calendar`].

use common::operations::By;

use crate::read::{calendar, Calendar};
#[cfg(doc)]
use crate::Query;

use super::DatasetQuery;

/// Queries the [`Calendar`] of visits.
pub type Visits = DatasetQuery<By<Calendar, calendar::Selector>>;
