//! [`Auction`]-related [`Dataset`] implementations.

use std::convert::Infallible;

use common::{
    operations::{By, Select},
    pagination::{Order, Page},
};
use rust_decimal::Decimal;

use crate::{
    domain::{
        auction::{self, Status},
        Auction,
    },
    infra::{dataset::ListingSource, Dataset, DatasetCache},
    read::auction::{
        list,
        sort::{sort, SortBy},
        view,
    },
};

use super::top;

impl<S: ListingSource> Dataset<Select<By<list::Page, list::Selector>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, list::Selector>>,
    ) -> Result<Self::Ok, Self::Err> {
        let list::Selector {
            filter,
            sort_by,
            order,
            arguments,
        } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions.iter().filter(|a| filter.matches(a)),
            &sort_by,
            order,
        );
        Ok(Page::paginate(&matching, arguments).map(Auction::clone))
    }
}

impl<S: ListingSource> Dataset<Select<By<Option<Auction>, auction::Id>>>
    for DatasetCache<S>
{
    type Ok = Option<Auction>;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Auction>, auction::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self.load().await.iter().find(|a| a.id == id).cloned())
    }
}

impl<S: ListingSource> Dataset<Select<By<list::Page, view::Upcoming>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, view::Upcoming>>,
    ) -> Result<Self::Ok, Self::Err> {
        let view::Upcoming { limit, scope } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions
                .iter()
                .filter(|a| scope.contains(a) && a.status == Status::Upcoming),
            &SortBy::AuctionDate,
            Order::Ascending,
        );
        Ok(top(&matching, limit))
    }
}

impl<S: ListingSource> Dataset<Select<By<list::Page, view::Opportunities>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, view::Opportunities>>,
    ) -> Result<Self::Ok, Self::Err> {
        let view::Opportunities { limit, scope } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions.iter().filter(|a| {
                scope.contains(a) && a.opportunity_level().is_opportunity()
            }),
            &SortBy::DiscountPercent,
            Order::Descending,
        );
        Ok(top(&matching, limit))
    }
}

impl<S: ListingSource> Dataset<Select<By<list::Page, view::MostRecent>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, view::MostRecent>>,
    ) -> Result<Self::Ok, Self::Err> {
        let view::MostRecent { limit, scope } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions.iter().filter(|a| scope.contains(a)),
            &SortBy::CreatedAt,
            Order::Descending,
        );
        Ok(top(&matching, limit))
    }
}

impl<S: ListingSource> Dataset<Select<By<list::Page, view::Distant>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, view::Distant>>,
    ) -> Result<Self::Ok, Self::Err> {
        let view::Distant { limit, scope } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions
                .iter()
                .filter(|a| scope.contains(a) && a.status == Status::Upcoming),
            &SortBy::AuctionDate,
            Order::Descending,
        );
        Ok(top(&matching, limit))
    }
}

impl<S: ListingSource> Dataset<Select<By<list::Page, view::Incomplete>>>
    for DatasetCache<S>
{
    type Ok = list::Page;
    type Err = Infallible;

    async fn execute(
        &self,
        Select(by): Select<By<list::Page, view::Incomplete>>,
    ) -> Result<Self::Ok, Self::Err> {
        let view::Incomplete { limit } = by.into_inner();

        let auctions = self.load().await;
        let matching = sort(
            auctions
                .iter()
                .filter(|a| a.status == Status::Upcoming && is_incomplete(a)),
            &SortBy::AuctionDate,
            Order::Ascending,
        );
        Ok(top(&matching, limit))
    }
}

/// Checks whether the provided [`Auction`] lacks any of its starting price,
/// city, surface or postal code.
fn is_incomplete(auction: &Auction) -> bool {
    let missing = |n: Option<Decimal>| n.map_or(true, |n| n.is_zero());

    missing(auction.starting_price.map(Into::into))
        || missing(auction.surface.map(Into::into))
        || auction.city.as_str().is_empty()
        || auction.postal_code.as_str().is_empty()
}

#[cfg(test)]
mod spec {
    use std::num::NonZeroUsize;

    use common::{
        operations::{By, Select},
        pagination::{Arguments, Order},
    };
    use serde_json::json;

    use crate::{
        domain::{
            auction::{Id, Status},
            Auction,
        },
        infra::Dataset as _,
        read::auction::{list, view, Filter, Scope, SortBy},
    };

    use super::super::spec::{cache, ids};

    fn limit(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    fn scenario() -> serde_json::Value {
        json!([
            {
                "id": "a",
                "status": "upcoming",
                "startingPrice": 50000,
                "discountPercent": 35,
                "city": "Paris",
            },
            {
                "id": "b",
                "status": "completed",
                "startingPrice": 80000,
                "discountPercent": 10,
                "city": "Lyon",
            },
        ])
    }

    fn dataset() -> serde_json::Value {
        json!([
            {
                "id": "1",
                "status": "upcoming",
                "department": "75",
                "city": "Paris",
                "postalCode": "75001",
                "startingPrice": 100000,
                "surface": 30,
                "discountPercent": 45,
                "auctionDate": "2025-05-01",
                "createdAt": "2025-01-03T00:00:00",
            },
            {
                "id": "2",
                "status": "upcoming",
                "department": "92",
                "city": "Nanterre",
                "postalCode": "92000",
                "surface": 50,
                "discountPercent": 22,
                "auctionDate": "2025-04-01",
                "createdAt": "2025-01-01T00:00:00",
            },
            {
                "id": "3",
                "status": "upcoming",
                "department": "75",
                "city": "Paris",
                "postalCode": "75002",
                "startingPrice": 50000,
                "surface": 20,
                "discountPercent": 31,
                "createdAt": "2025-01-02T00:00:00",
            },
            {
                "id": "4",
                "status": "cancelled",
                "department": "75",
                "city": "Paris",
                "startingPrice": 70000,
                "discountPercent": 50,
                "auctionDate": "2025-06-01",
            },
        ])
    }

    #[tokio::test]
    async fn opportunities_scenario() {
        let cache = cache(scenario());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::Opportunities {
                limit: limit(10),
                scope: Scope::default(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["a"]);
        assert_eq!(page.total, 1);
        assert_eq!(page.page.get(), 1);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn lists_filtered_sorted_page() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(list::Selector {
                filter: Filter {
                    status: vec![Status::Upcoming],
                    ..Filter::default()
                },
                sort_by: SortBy::AuctionDate,
                order: Order::Ascending,
                arguments: Arguments::new(1, 2).unwrap(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["2", "1"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);

        let page = cache
            .execute(Select(By::<list::Page, _>::new(list::Selector {
                filter: Filter {
                    status: vec![Status::Upcoming],
                    ..Filter::default()
                },
                sort_by: SortBy::AuctionDate,
                order: Order::Ascending,
                arguments: Arguments::new(2, 2).unwrap(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["3"]);
    }

    #[tokio::test]
    async fn whole_page_round_trips_filter() {
        let cache = cache(dataset());
        let filter = Filter {
            city: vec!["Paris".into()],
            ..Filter::default()
        };

        let page = cache
            .execute(Select(By::<list::Page, _>::new(list::Selector {
                filter,
                sort_by: SortBy::StartingPrice,
                order: Order::Descending,
                arguments: Arguments::new(1, 3).unwrap(),
            })))
            .await
            .unwrap();

        let mut got = ids(&page.data);
        got.sort();
        assert_eq!(got, ["1", "3", "4"]);
        assert_eq!(page.total, 3);
    }

    #[tokio::test]
    async fn page_beyond_end_is_empty() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(list::Selector {
                filter: Filter::default(),
                sort_by: SortBy::default(),
                order: Order::default(),
                arguments: Arguments::new(5, 2).unwrap(),
            })))
            .await
            .unwrap();

        assert!(page.data.is_empty());
        assert_eq!(page.total, 4);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn finds_by_id() {
        let cache = cache(dataset());

        let found = cache
            .execute(Select(By::<Option<Auction>, _>::new(Id::from("3"))))
            .await
            .unwrap();
        let missing = cache
            .execute(Select(By::<Option<Auction>, _>::new(Id::from("42"))))
            .await
            .unwrap();

        assert_eq!(found.map(|a| a.id), Some(Id::from("3")));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn upcoming_puts_unknown_dates_last() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::Upcoming {
                limit: limit(2),
                scope: Scope::default(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["2", "1"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.total_pages, 2);
    }

    #[tokio::test]
    async fn views_respect_scope() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::Opportunities {
                limit: limit(10),
                scope: Scope::departments(["75"]),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["4", "1", "3"]);
    }

    #[tokio::test]
    async fn most_recent_first() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::MostRecent {
                limit: limit(10),
                scope: Scope::default(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["1", "3", "2", "4"]);
    }

    #[tokio::test]
    async fn distant_puts_unknown_dates_last() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::Distant {
                limit: limit(10),
                scope: Scope::default(),
            })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["1", "2", "3"]);
    }

    #[tokio::test]
    async fn incomplete_lacks_essentials() {
        let cache = cache(dataset());

        let page = cache
            .execute(Select(By::<list::Page, _>::new(view::Incomplete { limit: limit(10) })))
            .await
            .unwrap();

        assert_eq!(ids(&page.data), ["2"]);
    }
}
