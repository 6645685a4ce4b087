//! JSON HTTP API definitions.

pub mod auction;
pub mod calendar;
pub mod stats;

use std::convert::Infallible;

use axum::{routing::get, Extension, Json, Router};
use serde::Serialize;
use service::infra::dataset::State;

use crate::{define_error, Error, Service};

/// Default number of [`Auction`]s on a listed page.
///
/// [`Auction`]: service::domain::Auction
pub const DEFAULT_PAGE_SIZE: usize = 12;

/// Default number of [`Auction`]s returned by a view.
///
/// [`Auction`]: service::domain::Auction
pub const DEFAULT_VIEW_LIMIT: usize = 10;

/// Maximum number of [`Auction`]s returned by a view.
///
/// [`Auction`]: service::domain::Auction
pub const MAX_VIEW_LIMIT: usize = 50;

/// Default number of incomplete [`Auction`]s returned.
///
/// [`Auction`]: service::domain::Auction
pub const DEFAULT_INCOMPLETE_LIMIT: usize = 100;

/// Maximum number of [`Auction`]s on a listed page, and of incomplete
/// [`Auction`]s returned.
///
/// [`Auction`]: service::domain::Auction
pub const MAX_LIST_LIMIT: usize = 500;

define_error! {
    enum AuctionError {
        #[code = "AUCTION_NOT_EXISTS"]
        #[status = NOT_FOUND]
        #[message = "`Auction` doesn't exist"]
        NotExists,
    }
}

define_error! {
    enum PaginationError {
        #[code = "INVALID_PAGINATION"]
        #[status = BAD_REQUEST]
        #[message = "`page` must be positive and `limit` within its bounds"]
        Invalid,
    }
}

define_error! {
    enum DatasetError {
        #[code = "DATASET_UNAVAILABLE"]
        #[status = SERVICE_UNAVAILABLE]
        #[message = "Dataset couldn't be loaded"]
        Unavailable,
    }
}

/// Creates the API [`Router`] serving the provided [`Service`].
pub fn router(service: Service) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest(
            "/api/properties",
            Router::new()
                .route("/", get(auction::list))
                .route("/stats", get(stats::summary))
                .route("/stats/precomputed", get(stats::precomputed))
                .route("/upcoming", get(auction::upcoming))
                .route("/opportunities", get(auction::opportunities))
                .route("/recent", get(auction::most_recent))
                .route("/distant", get(auction::distant))
                .route("/incomplete", get(auction::incomplete))
                .route("/visits/calendar", get(calendar::visits))
                .route("/:id", get(auction::by_id)),
        )
        .layer(Extension(service))
}

/// Health of the [`Service`].
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    /// State of the loaded dataset.
    pub dataset: &'static str,

    /// Error of the last dataset fetch, if it failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}

/// Reports [`Health`] of the [`Service`] without loading anything.
#[expect(clippy::unused_async, reason = "`async` is required by `axum`")]
pub async fn health(Extension(service): Extension<Service>) -> Json<Health> {
    let dataset = service.dataset();
    Json(Health {
        dataset: match dataset.state() {
            State::Uninitialized => "uninitialized",
            State::Fresh => "fresh",
            State::Stale => "stale",
        },
        last_error: dataset.last_error().map(|e| e.to_string()),
    })
}

/// Unwraps the result of an in-memory [`Service`] query.
fn loaded<T>(res: Result<T, Infallible>) -> T {
    res.unwrap_or_else(|e| match e {})
}

/// Ensures the queried dataset has been loaded at least once.
///
/// An empty result served because the very first fetch failed would look
/// like "no matches", so it's reported as [`DatasetError::Unavailable`]
/// instead.
fn ensure_loaded(service: &Service) -> Result<(), Error> {
    let dataset = service.dataset();
    if dataset.state() == State::Uninitialized && dataset.last_error().is_some()
    {
        return Err(DatasetError::Unavailable.into());
    }
    Ok(())
}
