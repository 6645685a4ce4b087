//! Service implements queries over the catalog of judicial auctions.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod domain;
pub mod infra;
pub mod query;
pub mod read;
pub mod task;

use std::{error::Error, time::Duration};

use common::operations::{By, Start};
use smart_default::SmartDefault;

use self::infra::{dataset::DEFAULT_TTL, DatasetCache};
#[cfg(doc)]
use self::infra::Source;

pub use self::{query::Query, task::Task};

/// [`Service`] configuration.
#[derive(Clone, Copy, Debug, SmartDefault)]
pub struct Config {
    /// Time-to-live of the loaded dataset.
    #[default(DEFAULT_TTL)]
    pub dataset_ttl: Duration,

    /// [`task::WarmDataset`] configuration.
    pub warm_dataset: task::warm_dataset::Config,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<S> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`DatasetCache`] of this [`Service`].
    dataset: DatasetCache<S>,
}

impl<S> Service<S> {
    /// Creates a new [`Service`] loading its dataset from the provided
    /// [`Source`].
    ///
    /// The returned [`task::Background`] keeps the dataset warm and must be
    /// awaited for that.
    pub fn new(config: Config, source: S) -> (Self, task::Background)
    where
        Self: Task<
                Start<By<task::WarmDataset<Self>, task::warm_dataset::Config>>,
                Ok = (),
                Err: Error,
            > + Clone
            + 'static,
    {
        let this = Service {
            config,
            dataset: DatasetCache::new(source, config.dataset_ttl),
        };

        let mut bg = task::Background::default();
        let svc = this.clone();
        bg.spawn(async move {
            svc.execute(Start(By::new(svc.config().warm_dataset))).await
        });

        (this, bg)
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`DatasetCache`] of this [`Service`].
    #[must_use]
    pub fn dataset(&self) -> &DatasetCache<S> {
        &self.dataset
    }
}
