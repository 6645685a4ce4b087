//! [`Calendar`]-related [`Dataset`] implementations.

use std::convert::Infallible;

use common::operations::{By, Select};

use crate::{
    infra::{dataset::ListingSource, Dataset, DatasetCache},
    read::{calendar, Calendar},
};

impl<S: ListingSource> Dataset<Select<By<Calendar, calendar::Selector>>>
    for DatasetCache<S>
{
    type Ok = Calendar;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Calendar, calendar::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let calendar::Selector { scope, from, to } = by.into_inner();

        let auctions = self.load().await;
        Ok(Calendar::build(
            auctions.iter().filter(|a| scope.contains(a)),
            from,
            to,
        ))
    }
}

#[cfg(test)]
mod spec {
    use common::operations::{By, Select};
    use serde_json::json;

    use crate::{
        infra::Dataset as _,
        read::{auction::Scope, calendar, Calendar},
    };

    use super::super::spec::cache;

    #[tokio::test]
    async fn builds_scoped_calendar() {
        let cache = cache(json!([
            {"id": "a", "department": "75", "visitDates": ["2025-03-01", "2025-03-01T14:00:00"]},
            {"id": "b", "department": "92", "visitDates": ["2025-03-02"]},
            {"id": "c", "department": "75"},
        ]));

        let all = cache
            .execute(Select(By::<Calendar, _>::new(calendar::Selector::default())))
            .await
            .unwrap();
        assert_eq!(all.total, 3);
        assert_eq!(all.days, 2);

        let scoped = cache
            .execute(Select(By::<Calendar, _>::new(calendar::Selector {
                scope: Scope::departments(["75"]),
                ..calendar::Selector::default()
            })))
            .await
            .unwrap();
        assert_eq!(scoped.total, 2);
        assert_eq!(scoped.days, 1);
        assert_eq!(scoped.calendar[0].count, 2);
    }
}
