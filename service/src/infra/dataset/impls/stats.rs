//! [`Stats`]-related [`Dataset`] implementations.

use std::convert::Infallible;

use common::operations::{By, Fetch, Select};

use crate::{
    infra::{dataset::ListingSource, Dataset, DatasetCache, Source},
    read::{auction::Scope, Stats},
};

impl<S: ListingSource> Dataset<Select<By<Stats, Scope>>> for DatasetCache<S> {
    type Ok = Stats;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Stats, Scope>>,
    ) -> Result<Self::Ok, Self::Err> {
        let scope = by.into_inner();

        let auctions = self.load().await;
        Ok(Stats::compute(auctions.iter().filter(|a| scope.contains(a))))
    }
}

/// Precomputed [`Stats`] are passed through from the [`Source`] uncached.
impl<S> Dataset<Fetch<By<Stats, ()>>> for DatasetCache<S>
where
    S: Source<Fetch<By<Stats, ()>>, Ok = Stats>,
{
    type Ok = Stats;
    type Err = <S as Source<Fetch<By<Stats, ()>>>>::Err;

    async fn execute(
        &self,
        fetch: Fetch<By<Stats, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.source().execute(fetch).await
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde_json::json;

    use crate::{
        infra::Dataset as _,
        read::{auction::Scope, Stats},
    };

    use super::super::spec::cache;

    #[tokio::test]
    async fn computes_scoped_stats() {
        let cache = cache(json!([
            {"id": "a", "department": "75", "city": "Paris", "discountPercent": 30},
            {"id": "b", "department": "92", "city": "Nanterre", "status": "completed"},
        ]));

        let all = cache
            .execute(Select(By::<Stats, _>::new(Scope::default())))
            .await
            .unwrap();
        assert_eq!(all.total, 2);
        assert_eq!(all.upcoming, 1);
        assert_eq!(all.opportunities, 1);

        let scoped = cache
            .execute(Select(By::<Stats, _>::new(Scope::departments(["92"]))))
            .await
            .unwrap();
        assert_eq!(scoped.total, 1);
        assert_eq!(scoped.opportunities, 0);
        assert_eq!(scoped.by_city.get("Nanterre"), Some(&1));
    }
}
