//! Background environment for running [`Task`]s.

use std::{
    error::Error,
    future::{Future, IntoFuture},
};

use futures::{future::LocalBoxFuture, FutureExt as _, TryFutureExt as _};
use tokio::task;

#[cfg(doc)]
use crate::Task;

/// Error of a [`Task`] running in the [`Background`].
type TaskError = Box<dyn Error + 'static>;

/// Background environment for running [`Task`]s.
///
/// [`Task`]s are `!Send` and polled on a single thread once the
/// [`Background`] is awaited. It resolves with the first [`Task`] failure,
/// or once all of them complete.
#[derive(Debug, Default)]
pub struct Background {
    /// Local set driving the spawned [`Task`]s.
    set: task::LocalSet,

    /// Spawned [`Task`]s.
    tasks: task::JoinSet<Result<(), TaskError>>,
}

impl Background {
    /// Spawns a new [`Task`] inside the [`Background`] environment.
    pub fn spawn<F, E>(&mut self, future: F)
    where
        F: Future<Output = Result<(), E>> + 'static,
        E: Error + 'static,
    {
        _ = self.tasks.spawn_local_on(
            future.map_err(|e| TaskError::from(Box::new(e))),
            &self.set,
        );
    }

    /// Returns the number of [`Task`]s still running.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Indicates whether no [`Task`]s are running.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl IntoFuture for Background {
    type Output = Result<(), TaskError>;
    type IntoFuture = LocalBoxFuture<'static, Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Self { set, mut tasks } = self;
        async move {
            set.run_until(async move {
                while let Some(joined) = tasks.join_next().await {
                    joined??;
                }
                Ok::<_, TaskError>(())
            })
            .await
        }
        .boxed_local()
    }
}
