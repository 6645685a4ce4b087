//! HTTP [`Source`] implementation.

use std::time::Duration;

use common::operations::{By, Fetch};
use tracerr::Traced;
use tracing as log;
use url::Url;

use super::{decode, Error, Resource, Source};

/// [`Source`] fetching [`Resource`]s over HTTP from a base [`Url`].
#[derive(Clone, Debug)]
pub struct Http {
    /// Client performing requests.
    client: reqwest::Client,

    /// [`Url`] of the static data directory.
    base: Url,
}

impl Http {
    /// Creates a new [`Http`] [`Source`] serving [`Resource`]s under the
    /// provided `base` [`Url`].
    ///
    /// Requests not completed within the provided `timeout` fail.
    ///
    /// # Errors
    ///
    /// If failed to build an HTTP client.
    pub fn new(mut base: Url, timeout: Duration) -> Result<Self, Traced<Error>> {
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        Ok(Self { client, base })
    }
}

impl<T: Resource> Source<Fetch<By<T, ()>>> for Http {
    type Ok = T;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Fetch<By<T, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = self
            .base
            .join(T::PATH)
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        log::debug!("fetching `{url}`");

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(tracerr::new!(Error::Status(status.as_u16())));
        }
        let payload = resp
            .bytes()
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        decode(&payload).map_err(tracerr::wrap!())
    }
}
