//! [`Calendar`]-related API handlers.

use axum::{Extension, Json};
use axum_extra::extract::{Query, QueryRejection};
use common::Date;
use serde::Deserialize;
use service::{
    domain::auction::Department,
    query,
    read::{auction::Scope, calendar, Calendar},
    Query as _,
};

use crate::{AsError as _, Error, Service};

use super::{ensure_loaded, loaded};

/// Query parameters of the visits [`Calendar`].
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Params {
    /// [`Department`]s to select visits within.
    pub department: Vec<Department>,

    /// Earliest day of a visit.
    pub start_date: Option<Date>,

    /// Latest day of a visit.
    pub end_date: Option<Date>,
}

impl From<Params> for calendar::Selector {
    fn from(params: Params) -> Self {
        let Params {
            department,
            start_date,
            end_date,
        } = params;
        Self {
            scope: Scope::departments(department),
            from: start_date,
            to: end_date,
        }
    }
}

/// Returns the [`Calendar`] of visits.
///
/// # Errors
///
/// If the query parameters are malformed or the dataset couldn't be loaded.
pub async fn visits(
    Extension(service): Extension<Service>,
    params: Result<Query<Params>, QueryRejection>,
) -> Result<Json<Calendar>, Error> {
    let Query(params) = params.map_err(|e| e.into_error())?;

    let calendar = loaded(
        service
            .execute(query::calendar::Visits::by(params.into()))
            .await,
    );
    ensure_loaded(&service)?;
    Ok(Json(calendar))
}
