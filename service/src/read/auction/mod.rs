//! [`Auction`]-related read definitions.

mod filter;
pub mod sort;

use serde::Deserialize;

use crate::domain::{auction::Department, Auction};

pub use self::{
    filter::{Filter, Range},
    sort::{Comparable, SortBy},
};

/// Coarse pre-filter applied by the specialized views before anything else.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Scope {
    /// [`Department`]s to keep. Empty means all of them.
    #[serde(alias = "department")]
    pub departments: Vec<Department>,
}

impl Scope {
    /// Creates a [`Scope`] limited to the provided [`Department`]s.
    #[must_use]
    pub fn departments(
        departments: impl IntoIterator<Item = impl Into<Department>>,
    ) -> Self {
        Self {
            departments: departments.into_iter().map(Into::into).collect(),
        }
    }

    /// Checks whether the provided [`Auction`] falls into this [`Scope`].
    #[must_use]
    pub fn contains(&self, auction: &Auction) -> bool {
        self.departments.is_empty()
            || self.departments.contains(&auction.department)
    }
}

pub mod list {
    //! [`Auction`] list definitions.

    use common::pagination::{self, Order};

    use super::{Filter, SortBy};
    #[cfg(doc)]
    use crate::domain::Auction;
    use crate::domain::Auction as Node;

    /// A [`Page`] of [`Auction`]s.
    ///
    /// [`Page`]: pagination::Page
    pub type Page = pagination::Page<Node>;

    /// Arguments for selecting a [`Page`].
    pub type Arguments = pagination::Arguments;

    /// [`Page`] selector.
    #[derive(Clone, Debug)]
    pub struct Selector {
        /// [`Filter`] the [`Auction`]s must match.
        pub filter: Filter,

        /// Key to order the matching [`Auction`]s by.
        pub sort_by: SortBy,

        /// Direction to order the matching [`Auction`]s in.
        pub order: Order,

        /// Pagination [`Arguments`].
        pub arguments: Arguments,
    }
}

pub mod view {
    //! Specialized read-only views over [`Auction`]s.
    //!
    //! Every view selects the first `limit` [`Auction`]s as page `1`, while
    //! reporting the size of the whole matching collection as the total.

    use std::num::NonZeroUsize;

    use super::Scope;
    #[cfg(doc)]
    use crate::domain::Auction;

    /// Upcoming [`Auction`]s, soonest first.
    #[derive(Clone, Debug)]
    pub struct Upcoming {
        /// Maximum number of [`Auction`]s to return.
        pub limit: NonZeroUsize,

        /// [`Scope`] to select within.
        pub scope: Scope,
    }

    /// [`Auction`]s being opportunities, biggest discount first.
    #[derive(Clone, Debug)]
    pub struct Opportunities {
        /// Maximum number of [`Auction`]s to return.
        pub limit: NonZeroUsize,

        /// [`Scope`] to select within.
        pub scope: Scope,
    }

    /// Most recently recorded [`Auction`]s, newest first.
    #[derive(Clone, Debug)]
    pub struct MostRecent {
        /// Maximum number of [`Auction`]s to return.
        pub limit: NonZeroUsize,

        /// [`Scope`] to select within.
        pub scope: Scope,
    }

    /// Upcoming [`Auction`]s, furthest in the future first.
    #[derive(Clone, Debug)]
    pub struct Distant {
        /// Maximum number of [`Auction`]s to return.
        pub limit: NonZeroUsize,

        /// [`Scope`] to select within.
        pub scope: Scope,
    }

    /// Upcoming [`Auction`]s lacking a starting price, a city, a surface or
    /// a postal code, soonest first.
    #[derive(Clone, Copy, Debug)]
    pub struct Incomplete {
        /// Maximum number of [`Auction`]s to return.
        pub limit: NonZeroUsize,
    }
}
