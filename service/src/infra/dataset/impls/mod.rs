//! [`Dataset`] implementations.
//!
//! Every [`Select`] loads the current snapshot and works on it in memory,
//! so none of them fails.
//!
//! [`Dataset`]: crate::infra::Dataset
//! [`Select`]: common::operations::Select

mod auction;
mod calendar;
mod stats;

use common::pagination::{Arguments, Page};

use crate::domain::Auction;

/// Selects the first `limit` of the provided matching [`Auction`]s, while
/// reporting all of them in the total.
fn top(
    matching: &[&Auction],
    limit: std::num::NonZeroUsize,
) -> Page<Auction> {
    Page::paginate(matching, Arguments::first(limit)).map(Auction::clone)
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{By, Fetch};

    use crate::{
        infra::{DatasetCache, Source},
        read::Listing,
    };

    /// [`Source`] serving a fixed JSON [`Listing`].
    #[derive(Debug)]
    pub(super) struct Fixture(serde_json::Value);

    impl Source<Fetch<By<Listing, ()>>> for Fixture {
        type Ok = Listing;
        type Err = serde_json::Error;

        async fn execute(
            &self,
            _: Fetch<By<Listing, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            serde_json::from_value(self.0.clone())
        }
    }

    /// Creates a [`DatasetCache`] over the provided JSON `auctions`.
    pub(super) fn cache(auctions: serde_json::Value) -> DatasetCache<Fixture> {
        DatasetCache::new(
            Fixture(serde_json::json!({ "auctions": auctions })),
            Duration::from_secs(300),
        )
    }

    /// Collects IDs of the provided [`Auction`]s.
    ///
    /// [`Auction`]: crate::domain::Auction
    pub(super) fn ids<'a>(
        auctions: impl IntoIterator<Item = &'a crate::domain::Auction>,
    ) -> Vec<String> {
        auctions.into_iter().map(|a| a.id.to_string()).collect()
    }
}
