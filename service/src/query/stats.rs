//! [`Query`] collection related to [`Stats`].

use common::operations::{By, Fetch};

use crate::{
    infra::{Dataset, DatasetCache},
    read::{auction::Scope, Stats},
    Service,
};

use super::{DatasetQuery, Query};

/// Queries [`Stats`] computed over the loaded [`Auction`]s in a [`Scope`].
///
/// [`Auction`]: crate::domain::Auction
pub type Summary = DatasetQuery<By<Stats, Scope>>;

/// Queries [`Stats`] precomputed by the exporter.
#[derive(Clone, Copy, Debug, Default)]
pub struct Precomputed;

impl<S> Query<Precomputed> for Service<S>
where
    DatasetCache<S>: Dataset<Fetch<By<Stats, ()>>, Ok = Stats>,
{
    type Ok = Stats;
    type Err = <DatasetCache<S> as Dataset<Fetch<By<Stats, ()>>>>::Err;

    async fn execute(&self, _: Precomputed) -> Result<Self::Ok, Self::Err> {
        self.dataset().execute(Fetch(By::all())).await
    }
}
