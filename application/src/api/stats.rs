//! [`Stats`]-related API handlers.

use axum::{Extension, Json};
use axum_extra::extract::{Query, QueryRejection};
use serde::Deserialize;
use service::{
    domain::auction::Department,
    query,
    read::{auction::Scope, Stats},
    Query as _,
};

use crate::{AsError as _, Error, Service};

use super::{ensure_loaded, loaded};

/// Query parameters of the [`Stats`] summary.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Params {
    /// [`Department`]s to summarize.
    pub department: Vec<Department>,
}

/// Returns [`Stats`] computed over the loaded dataset.
///
/// # Errors
///
/// If the query parameters are malformed or the dataset couldn't be loaded.
pub async fn summary(
    Extension(service): Extension<Service>,
    params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Stats>, Error> {
    let Query(Params { department }) = params.map_err(|e| e.into_error())?;

    let stats = loaded(
        service
            .execute(query::stats::Summary::by(Scope::departments(department)))
            .await,
    );
    ensure_loaded(&service)?;
    Ok(Json(stats))
}

/// Returns [`Stats`] precomputed by the exporter of the dataset.
///
/// # Errors
///
/// With [`DatasetError::Unavailable`] if they couldn't be fetched.
///
/// [`DatasetError::Unavailable`]: super::DatasetError::Unavailable
pub async fn precomputed(
    Extension(service): Extension<Service>,
) -> Result<Json<Stats>, Error> {
    service
        .execute(query::stats::Precomputed)
        .await
        .map(Json)
        .map_err(|e| e.into_error())
}
