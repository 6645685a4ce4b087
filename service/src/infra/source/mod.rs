//! [`Source`]-related implementations.

mod file;
#[cfg(feature = "http")]
mod http;

use std::io;

use common::operations::{By, Fetch};
use derive_more::{Display, Error as StdError, From};
use serde::de::DeserializeOwned;
use tracerr::Traced;

use crate::read::{Listing, Stats};

#[cfg(feature = "http")]
pub use self::http::Http;
pub use self::file::File;

/// Operation [`Fetch`]ing raw data from the static data directory.
pub use common::Handler as Source;

/// Resource served by a [`Source`].
pub trait Resource: DeserializeOwned {
    /// Path of this [`Resource`] relative to the static data directory.
    const PATH: &'static str;
}

impl Resource for Listing {
    const PATH: &'static str = "auctions.json";
}

impl Resource for Stats {
    const PATH: &'static str = "stats.json";
}

/// [`Source`] of the static data directory, wherever it's located.
#[derive(Clone, Debug)]
pub enum Static {
    /// Static data directory served over HTTP.
    #[cfg(feature = "http")]
    Http(Http),

    /// Static data directory on the local filesystem.
    File(File),
}

#[cfg(feature = "http")]
impl From<Http> for Static {
    fn from(source: Http) -> Self {
        Self::Http(source)
    }
}

impl From<File> for Static {
    fn from(source: File) -> Self {
        Self::File(source)
    }
}

impl<T: Resource> Source<Fetch<By<T, ()>>> for Static {
    type Ok = T;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        op: Fetch<By<T, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        match self {
            #[cfg(feature = "http")]
            Self::Http(http) => http.execute(op).await,
            Self::File(file) => file.execute(op).await,
        }
    }
}

/// [`Source`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to reach the HTTP [`Source`].
    #[cfg(feature = "http")]
    #[display("HTTP request failed: {_0}")]
    Http(reqwest::Error),

    /// HTTP [`Source`] responded with a non-success status.
    #[cfg(feature = "http")]
    #[display("Unexpected HTTP status: {_0}")]
    #[from(ignore)]
    Status(#[error(not(source))] u16),

    /// Invalid URL of a [`Resource`].
    #[cfg(feature = "http")]
    #[display("Invalid URL: {_0}")]
    Url(url::ParseError),

    /// Failed to read a local [`Resource`].
    #[display("Failed to read file: {_0}")]
    Io(io::Error),

    /// [`Resource`] payload is malformed.
    #[display("Malformed payload: {_0}")]
    Decode(serde_json::Error),
}

/// Decodes the provided payload as a [`Resource`].
fn decode<T: Resource>(payload: &[u8]) -> Result<T, Error> {
    serde_json::from_slice(payload).map_err(Into::into)
}
