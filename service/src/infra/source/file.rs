//! Local filesystem [`Source`] implementation.

use std::path::PathBuf;

use common::operations::{By, Fetch};
use tokio::fs;
use tracerr::Traced;
use tracing as log;

use super::{decode, Error, Resource, Source};

/// [`Source`] reading [`Resource`]s from a local directory.
#[derive(Clone, Debug)]
pub struct File {
    /// Path of the static data directory.
    root: PathBuf,
}

impl File {
    /// Creates a new [`File`] [`Source`] reading [`Resource`]s from the
    /// provided `root` directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl<T: Resource> Source<Fetch<By<T, ()>>> for File {
    type Ok = T;
    type Err = Traced<Error>;

    async fn execute(
        &self,
        _: Fetch<By<T, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = self.root.join(T::PATH);
        log::debug!("reading `{}`", path.display());

        let payload = fs::read(&path)
            .await
            .map_err(tracerr::from_and_wrap!(=> Error))?;

        decode(&payload).map_err(tracerr::wrap!())
    }
}
