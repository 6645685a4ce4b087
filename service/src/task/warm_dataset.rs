//! [`WarmDataset`] [`Task`].

use std::{convert::Infallible, error::Error, time};

use common::operations::{By, Perform, Start};
use smart_default::SmartDefault;
use tokio::time::interval;
use tracing as log;

use crate::{
    infra::{
        dataset::{ListingSource, LoadError, DEFAULT_TTL},
        DatasetCache,
    },
    Service,
};

use super::Task;

/// Configuration for [`WarmDataset`] [`Task`].
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Interval between [`DatasetCache::load_ahead()`]s.
    ///
    /// Each one refreshes the [`Auction`]s expiring before the next one.
    ///
    /// [`Auction`]: crate::domain::Auction
    #[default(DEFAULT_TTL)]
    pub interval: time::Duration,
}

/// [`Task`] keeping the [`DatasetCache`] loaded, so requests are served
/// without waiting for a fetch.
#[derive(Clone, Copy, Debug)]
pub struct WarmDataset<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Service`] instance.
    service: S,
}

impl<S> Task<Start<By<WarmDataset<Self>, Config>>> for Service<S>
where
    WarmDataset<Service<S>>: Task<Perform<()>, Ok = usize, Err: Error>,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<WarmDataset<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let task = WarmDataset {
            config: by.into_inner(),
            service: self.clone(),
        };

        let mut interval = interval(task.config.interval);
        loop {
            let _ = interval.tick().await;
            match task.execute(Perform(())).await {
                Ok(n) => {
                    log::debug!("`task::WarmDataset` holds {n} `Auction`s");
                }
                Err(e) => log::warn!("`task::WarmDataset` failed: {e}"),
            }
        }
    }
}

impl<S: ListingSource> Task<Perform<()>> for WarmDataset<Service<S>> {
    type Ok = usize;
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let dataset = self.service.dataset();
        let auctions = dataset.load_ahead(self.config.interval).await;
        match dataset.last_error() {
            Some(e) => Err(e),
            None => Ok(auctions.len()),
        }
    }
}

/// Error of [`WarmDataset`] execution.
pub type ExecutionError = LoadError;

#[cfg(test)]
mod spec {
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use common::operations::{By, Fetch, Perform, Start};
    use derive_more::{Display, Error};
    use tokio::time;

    use crate::{
        infra::{dataset::State, Source},
        read::Listing,
        task::Task as _,
        Config, Service,
    };

    use super::{Config as WarmConfig, WarmDataset};

    #[derive(Debug, Display, Error)]
    #[display("unreachable")]
    struct Unreachable;

    #[derive(Clone, Copy, Debug)]
    struct Flaky {
        up: bool,
    }

    impl Source<Fetch<By<Listing, ()>>> for Flaky {
        type Ok = Listing;
        type Err = Unreachable;

        async fn execute(
            &self,
            _: Fetch<By<Listing, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            if self.up {
                Ok(serde_json::from_str(r#"{"auctions": [{"id": "a"}]}"#)
                    .unwrap())
            } else {
                Err(Unreachable)
            }
        }
    }

    fn warm(up: bool) -> WarmDataset<Service<Flaky>> {
        let (service, _) = Service::new(
            Config {
                dataset_ttl: Duration::from_secs(300),
                warm_dataset: super::Config::default(),
            },
            Flaky { up },
        );
        WarmDataset {
            config: super::Config::default(),
            service,
        }
    }

    #[tokio::test]
    async fn loads_dataset() {
        let task = warm(true);

        assert_eq!(task.execute(Perform(())).await.unwrap(), 1);
        assert_eq!(task.service.dataset().state(), State::Fresh);
    }

    #[tokio::test]
    async fn reports_failed_load() {
        let task = warm(false);

        let err = task.execute(Perform(())).await.unwrap_err();

        assert_eq!(err.to_string(), "unreachable");
        assert_eq!(task.service.dataset().state(), State::Uninitialized);
    }

    /// [`Source`] taking a second to serve a single [`Listing`].
    #[derive(Debug, Default)]
    struct Slow {
        fetches: AtomicUsize,
    }

    impl Source<Fetch<By<Listing, ()>>> for Slow {
        type Ok = Listing;
        type Err = Unreachable;

        async fn execute(
            &self,
            _: Fetch<By<Listing, ()>>,
        ) -> Result<Self::Ok, Self::Err> {
            _ = self.fetches.fetch_add(1, Ordering::SeqCst);
            time::sleep(Duration::from_secs(1)).await;
            Ok(serde_json::from_str(r#"{"auctions": [{"id": "a"}]}"#).unwrap())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn keeps_dataset_fresh_across_ttl() {
        let source = Arc::new(Slow::default());
        let config = Config::default();
        let (service, _) = Service::new(config, Arc::clone(&source));
        let started = time::Instant::now();

        let warm = service.execute(Start(By::new(WarmConfig::default())));
        let checks = async {
            for secs in [5, 299, 302, 450, 599, 603, 900, 1199, 1500] {
                time::sleep_until(started + Duration::from_secs(secs)).await;
                assert_eq!(
                    service.dataset().state(),
                    State::Fresh,
                    "at {secs}s",
                );
            }
        };
        tokio::select! {
            _ = warm => unreachable!("`task::WarmDataset` never completes"),
            () = checks => {}
        }

        assert!(source.fetches.load(Ordering::SeqCst) <= 7);
    }
}
