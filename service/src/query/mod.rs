//! [`Query`] definition.

pub mod auction;
pub mod auctions;
pub mod calendar;
pub mod stats;

use common::operations::{By, Select};

use crate::{
    infra::{Dataset, DatasetCache},
    Service,
};

/// [`Query`] of the [`Service`].
pub use common::Handler as Query;

/// [`Query`] [`Select`]ing a `T`ype from the loaded [`Dataset`].
#[derive(Clone, Copy, Debug)]
#[expect(clippy::module_name_repetitions, reason = "more readable")]
pub struct DatasetQuery<T>(T);

impl<W, B> DatasetQuery<By<W, B>> {
    /// Creates a new [`DatasetQuery`] selecting a `W` by the provided `B`.
    #[must_use]
    pub fn by(by: B) -> Self {
        Self(By::new(by))
    }
}

impl<S, W, B> Query<DatasetQuery<By<W, B>>> for Service<S>
where
    DatasetCache<S>: Dataset<Select<By<W, B>>, Ok = W>,
{
    type Ok = W;
    type Err = <DatasetCache<S> as Dataset<Select<By<W, B>>>>::Err;

    async fn execute(
        &self,
        DatasetQuery(by): DatasetQuery<By<W, B>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.dataset().execute(Select(by)).await
    }
}

#[cfg(test)]
mod spec {
    use std::{env, fs, num::NonZeroUsize, path::PathBuf, process};

    use common::pagination::{Arguments, Order};

    use crate::{
        domain::auction,
        infra::source::File,
        read::auction::{list, view, Filter, Scope, SortBy},
        Config, Service,
    };

    use super::{auction::ById, auctions, stats, Query as _};

    fn data_dir(name: &str) -> PathBuf {
        let root = env::temp_dir().join(format!("{name}-{}", process::id()));
        fs::create_dir_all(&root).unwrap();
        fs::write(
            root.join("auctions.json"),
            r#"{
                "generatedAt": "2025-01-01T00:00:00Z",
                "auctions": [
                    {"id": "a", "status": "upcoming", "discountPercent": 35, "city": "Paris"},
                    {"id": "b", "status": "completed", "discountPercent": 10, "city": "Lyon"}
                ]
            }"#,
        )
        .unwrap();
        fs::write(
            root.join("stats.json"),
            r#"{"total": 2, "upcoming": 1, "opportunities": 1}"#,
        )
        .unwrap();
        root
    }

    #[tokio::test]
    async fn serves_queries_from_files() {
        let root = data_dir("queries");
        let (service, _) = Service::new(Config::default(), File::new(&root));

        let page = service
            .execute(auctions::List::by(list::Selector {
                filter: Filter {
                    search: Some("paris".into()),
                    ..Filter::default()
                },
                sort_by: SortBy::default(),
                order: Order::Ascending,
                arguments: Arguments::new(1, 12).unwrap(),
            }))
            .await
            .unwrap();
        assert_eq!(page.total, 1);

        let top = service
            .execute(auctions::Opportunities::by(view::Opportunities {
                limit: NonZeroUsize::new(10).unwrap(),
                scope: Scope::default(),
            }))
            .await
            .unwrap();
        assert_eq!(top.data[0].id, auction::Id::from("a"));

        let found = service
            .execute(ById::by(auction::Id::from("b")))
            .await
            .unwrap();
        assert!(found.is_some());

        let summary = service
            .execute(stats::Summary::by(Scope::default()))
            .await
            .unwrap();
        let precomputed =
            service.execute(stats::Precomputed).await.unwrap();
        assert_eq!(summary.total, precomputed.total);
        assert_eq!(summary.opportunities, precomputed.opportunities);

        fs::remove_dir_all(root).unwrap();
    }
}
