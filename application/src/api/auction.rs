//! [`Auction`]-related API handlers.

use std::num::NonZeroUsize;

use axum::{extract::Path, Extension, Json};
use axum_extra::extract::{Query, QueryRejection};
use common::{pagination::Order, Date, Percent};
use serde::Deserialize;
use service::{
    domain::auction::{
        self, City, Court, Department, OpportunityLevel, Price, PropertyType,
        Rooms, Status, Surface,
    },
    query,
    read::auction::{list, view, Filter, Range, Scope, SortBy},
    Query as _,
};
#[cfg(doc)]
use service::domain::Auction;

use crate::{AsError as _, Error, Service};

use super::{
    ensure_loaded, loaded, AuctionError, PaginationError,
    DEFAULT_INCOMPLETE_LIMIT, DEFAULT_PAGE_SIZE, DEFAULT_VIEW_LIMIT,
    MAX_LIST_LIMIT, MAX_VIEW_LIMIT,
};

/// Query parameters of the [`Auction`]s list.
///
/// Multi-select dimensions are passed as repeated keys
/// (`?city=Paris&city=Lyon`).
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListParams {
    /// Free-text search.
    pub search: Option<String>,

    /// Allowed [`Status`]es.
    pub status: Vec<Status>,

    /// Allowed [`City`]s.
    pub city: Vec<City>,

    /// Allowed [`Department`]s.
    pub department: Vec<Department>,

    /// Allowed [`Court`]s.
    pub court: Vec<Court>,

    /// Allowed [`PropertyType`]s.
    #[serde(alias = "category")]
    pub property_type: Vec<PropertyType>,

    /// Allowed [`OpportunityLevel`]s.
    pub opportunity_level: Vec<OpportunityLevel>,

    /// Minimal starting [`Price`].
    pub min_price: Option<Price>,

    /// Maximal starting [`Price`].
    pub max_price: Option<Price>,

    /// Minimal [`Surface`].
    pub min_surface: Option<Surface>,

    /// Maximal [`Surface`].
    pub max_surface: Option<Surface>,

    /// Minimal number of [`Rooms`].
    pub min_rooms: Option<Rooms>,

    /// Maximal number of [`Rooms`].
    pub max_rooms: Option<Rooms>,

    /// Minimal discount.
    pub min_discount: Option<Percent>,

    /// Maximal discount.
    pub max_discount: Option<Percent>,

    /// Earliest day of the sale.
    pub date_from: Option<Date>,

    /// Latest day of the sale.
    pub date_to: Option<Date>,

    /// Whether at least one visit date is required.
    pub has_visit_date: bool,

    /// Key to sort by.
    pub sort_by: SortBy,

    /// Direction to sort in.
    pub sort_order: Order,

    /// 1-based page number.
    pub page: Option<usize>,

    /// Page size, at most [`MAX_LIST_LIMIT`].
    pub limit: Option<usize>,
}

impl TryFrom<ListParams> for list::Selector {
    type Error = PaginationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let ListParams {
            search,
            status,
            city,
            department,
            court,
            property_type,
            opportunity_level,
            min_price,
            max_price,
            min_surface,
            max_surface,
            min_rooms,
            max_rooms,
            min_discount,
            max_discount,
            date_from,
            date_to,
            has_visit_date,
            sort_by,
            sort_order,
            page,
            limit,
        } = params;

        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);
        if limit > MAX_LIST_LIMIT {
            return Err(PaginationError::Invalid);
        }
        let arguments = list::Arguments::new(page.unwrap_or(1), limit)
            .ok_or(PaginationError::Invalid)?;

        Ok(Self {
            filter: Filter {
                search,
                status,
                city,
                department,
                court,
                property_type,
                opportunity_level,
                price: Range::new(min_price, max_price),
                surface: Range::new(min_surface, max_surface),
                rooms: Range::new(min_rooms, max_rooms),
                discount: Range::new(min_discount, max_discount),
                date_from,
                date_to,
                has_visit_date,
            },
            sort_by,
            order: sort_order,
            arguments,
        })
    }
}

/// Query parameters of a view over [`Auction`]s.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewParams {
    /// Maximum number of [`Auction`]s to return.
    pub limit: Option<usize>,

    /// [`Department`]s to select within.
    pub department: Vec<Department>,
}

impl ViewParams {
    /// Splits these [`ViewParams`] into a limit and a [`Scope`].
    ///
    /// Missing limit is replaced with the `default` one, while a zero one or
    /// one above the `max` is rejected.
    fn into_parts(
        self,
        default: usize,
        max: usize,
    ) -> Result<(NonZeroUsize, Scope), PaginationError> {
        let limit = NonZeroUsize::new(self.limit.unwrap_or(default))
            .filter(|l| l.get() <= max)
            .ok_or(PaginationError::Invalid)?;
        Ok((limit, Scope::departments(self.department)))
    }
}

/// Lists a page of filtered and sorted [`Auction`]s.
///
/// # Errors
///
/// If the query parameters are malformed or the dataset couldn't be loaded.
pub async fn list(
    Extension(service): Extension<Service>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<list::Page>, Error> {
    let Query(params) = params.map_err(|e| e.into_error())?;
    let selector = list::Selector::try_from(params)?;

    let page = loaded(service.execute(query::auctions::List::by(selector)).await);
    ensure_loaded(&service)?;
    Ok(Json(page))
}

/// Returns a single [`Auction`] by its ID.
///
/// # Errors
///
/// With [`AuctionError::NotExists`] if there is no such [`Auction`].
pub async fn by_id(
    Extension(service): Extension<Service>,
    Path(id): Path<String>,
) -> Result<Json<auction::Auction>, Error> {
    let found = loaded(
        service
            .execute(query::auction::ById::by(auction::Id::new(id)))
            .await,
    );
    ensure_loaded(&service)?;
    found.map(Json).ok_or_else(|| AuctionError::NotExists.into())
}

/// Defines a handler serving a view over [`Auction`]s.
macro_rules! define_view {
    (
        $(#[doc = $doc:literal])*
        $handler:ident => $query:ident($view:ident)
    ) => {
        $(#[doc = $doc])*
        ///
        /// # Errors
        ///
        /// If the query parameters are malformed or the dataset couldn't be
        /// loaded.
        pub async fn $handler(
            Extension(service): Extension<Service>,
            params: Result<Query<ViewParams>, QueryRejection>,
        ) -> Result<Json<list::Page>, Error> {
            let Query(params) = params.map_err(|e| e.into_error())?;
            let (limit, scope) =
                params.into_parts(DEFAULT_VIEW_LIMIT, MAX_VIEW_LIMIT)?;

            let page = loaded(
                service
                    .execute(query::auctions::$query::by(view::$view {
                        limit,
                        scope,
                    }))
                    .await,
            );
            ensure_loaded(&service)?;
            Ok(Json(page))
        }
    };
}

define_view! {
    /// Returns the soonest upcoming [`Auction`]s.
    upcoming => Upcoming(Upcoming)
}

define_view! {
    /// Returns the [`Auction`]s with the biggest discounts.
    opportunities => Opportunities(Opportunities)
}

define_view! {
    /// Returns the most recently recorded [`Auction`]s.
    most_recent => MostRecent(MostRecent)
}

define_view! {
    /// Returns the furthest upcoming [`Auction`]s.
    distant => Distant(Distant)
}

/// Returns the upcoming [`Auction`]s lacking essential attributes.
///
/// # Errors
///
/// If the query parameters are malformed or the dataset couldn't be loaded.
pub async fn incomplete(
    Extension(service): Extension<Service>,
    params: Result<Query<ViewParams>, QueryRejection>,
) -> Result<Json<list::Page>, Error> {
    let Query(params) = params.map_err(|e| e.into_error())?;
    let (limit, _) =
        params.into_parts(DEFAULT_INCOMPLETE_LIMIT, MAX_LIST_LIMIT)?;

    let page = loaded(
        service
            .execute(query::auctions::Incomplete::by(view::Incomplete { limit }))
            .await,
    );
    ensure_loaded(&service)?;
    Ok(Json(page))
}
