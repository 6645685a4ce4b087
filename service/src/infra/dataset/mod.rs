//! [`Dataset`]-related implementations.

mod impls;

use std::{
    error::Error as StdError,
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc, PoisonError, RwLock,
    },
    time::Duration,
};

use common::operations::{By, Fetch};
use tokio::{sync::Mutex, time::Instant};
use tracing as log;

use crate::{
    domain::Auction,
    infra::Source,
    read::Listing,
};

/// Operation [`Select`]ing a value out of the loaded [`Auction`]s.
///
/// [`Select`]: common::operations::Select
pub use common::Handler as Dataset;

/// Shared error of the last failed [`DatasetCache::load()`].
pub type LoadError = Arc<dyn StdError + Send + Sync>;

/// [`Source`] of [`Listing`]s a [`DatasetCache`] loads from.
pub trait ListingSource:
    Source<
    Fetch<By<Listing, ()>>,
    Ok = Listing,
    Err: StdError + Send + Sync + 'static,
>
{
}

impl<S> ListingSource for S where
    S: Source<
        Fetch<By<Listing, ()>>,
        Ok = Listing,
        Err: StdError + Send + Sync + 'static,
    >
{
}

/// Default time-to-live of a [`DatasetCache`] snapshot.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// In-memory cache of the [`Auction`]s served by a [`Source`].
///
/// Loaded [`Auction`]s are kept for a TTL, after which the next
/// [`DatasetCache::load()`] fetches them again. Failed fetches are never
/// surfaced to callers: the last successfully loaded [`Auction`]s are served
/// instead.
///
/// Cloning a [`DatasetCache`] gives a handle to the same snapshot.
pub struct DatasetCache<S>(Arc<Inner<S>>);

impl<S> Clone for DatasetCache<S> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<S: fmt::Debug> fmt::Debug for DatasetCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatasetCache")
            .field("source", &self.0.source)
            .field("ttl", &self.0.ttl)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// Shared state of a [`DatasetCache`].
struct Inner<S> {
    /// [`Source`] to fetch [`Auction`]s from.
    source: S,

    /// Time-to-live of a [`Snapshot`].
    ttl: Duration,

    /// Last successfully loaded [`Snapshot`].
    snapshot: RwLock<Option<Snapshot>>,

    /// Error of the last failed fetch, cleared on success.
    last_error: RwLock<Option<LoadError>>,

    /// Gate allowing a single fetch in flight.
    refresh: Mutex<()>,

    /// Number of finished fetch attempts, successful or not.
    attempts: AtomicU64,
}

/// Immutable set of loaded [`Auction`]s.
#[derive(Clone, Debug)]
struct Snapshot {
    /// Loaded [`Auction`]s.
    auctions: Arc<[Auction]>,

    /// [`Instant`] when the [`Auction`]s were fetched.
    fetched_at: Instant,

    /// Indicator whether this [`Snapshot`] was explicitly invalidated.
    invalidated: bool,
}

/// State of a [`DatasetCache`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Nothing has been loaded yet.
    Uninitialized,

    /// Loaded [`Auction`]s are within their TTL.
    Fresh,

    /// Loaded [`Auction`]s have outlived their TTL or were invalidated.
    Stale,
}

impl<S> DatasetCache<S> {
    /// Creates a new empty [`DatasetCache`] over the provided [`Source`].
    #[must_use]
    pub fn new(source: S, ttl: Duration) -> Self {
        Self(Arc::new(Inner {
            source,
            ttl,
            snapshot: RwLock::new(None),
            last_error: RwLock::new(None),
            refresh: Mutex::new(()),
            attempts: AtomicU64::new(0),
        }))
    }

    /// Returns the [`Source`] of this [`DatasetCache`].
    #[must_use]
    pub fn source(&self) -> &S {
        &self.0.source
    }

    /// Returns the current [`State`] of this [`DatasetCache`].
    #[must_use]
    pub fn state(&self) -> State {
        match self.snapshot() {
            None => State::Uninitialized,
            Some(s) if self.is_fresh(&s) => State::Fresh,
            Some(_) => State::Stale,
        }
    }

    /// Returns the error of the last fetch, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<LoadError> {
        self.0
            .last_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Marks the loaded [`Auction`]s as stale, so the next
    /// [`DatasetCache::load()`] fetches them again.
    ///
    /// The loaded [`Auction`]s are still served if that fetch fails.
    pub fn invalidate(&self) {
        if let Some(s) = self
            .0
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            s.invalidated = true;
        }
    }

    /// Returns the last loaded [`Snapshot`], if any.
    fn snapshot(&self) -> Option<Snapshot> {
        self.0
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns the last loaded [`Auction`]s, or none if nothing has been
    /// loaded yet.
    fn current(&self) -> Arc<[Auction]> {
        self.snapshot().map_or_else(|| Arc::from([]), |s| s.auctions)
    }

    /// Returns the loaded [`Auction`]s, if they stay within their TTL for at
    /// least the provided `margin`.
    fn fresh(&self, margin: Duration) -> Option<Arc<[Auction]>> {
        self.snapshot()
            .filter(|s| self.is_fresh_for(s, margin))
            .map(|s| s.auctions)
    }

    /// Checks whether the provided [`Snapshot`] is within its TTL.
    fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.is_fresh_for(snapshot, Duration::ZERO)
    }

    /// Checks whether the provided [`Snapshot`] stays within its TTL for at
    /// least the provided `margin`.
    fn is_fresh_for(&self, snapshot: &Snapshot, margin: Duration) -> bool {
        !snapshot.invalidated
            && snapshot.fetched_at.elapsed().saturating_add(margin) < self.0.ttl
    }
}

impl<S: ListingSource> DatasetCache<S> {
    /// Loads [`Auction`]s, fetching them from the [`Source`] only if the
    /// loaded ones are missing or stale.
    ///
    /// Never fails: if the fetch fails, the error is logged and remembered
    /// (see [`DatasetCache::last_error()`]), and the last loaded
    /// [`Auction`]s are returned (none, if nothing has been loaded yet).
    ///
    /// Concurrent calls share a single fetch along with its outcome.
    pub async fn load(&self) -> Arc<[Auction]> {
        self.load_ahead(Duration::ZERO).await
    }

    /// Same as [`DatasetCache::load()`], but also fetches [`Auction`]s
    /// expiring within the provided `margin`, so they're refreshed before
    /// any caller finds them stale.
    pub async fn load_ahead(&self, margin: Duration) -> Arc<[Auction]> {
        if let Some(auctions) = self.fresh(margin) {
            log::debug!("serving {} cached `Auction`s", auctions.len());
            return auctions;
        }

        let seen = self.0.attempts.load(Ordering::Acquire);
        let _gate = self.0.refresh.lock().await;
        // Could be refreshed while waiting for the gate.
        if let Some(auctions) = self.fresh(margin) {
            return auctions;
        }
        // Fetch attempted while waiting for the gate failed, so its outcome
        // is shared instead of retrying right away.
        if self.0.attempts.load(Ordering::Acquire) != seen {
            return self.current();
        }

        let auctions = match self
            .0
            .source
            .execute(Fetch(By::<Listing, _>::all()))
            .await
        {
            Ok(listing) => {
                let auctions = prepare(listing);
                log::info!("loaded {} `Auction`s", auctions.len());

                *self
                    .0
                    .snapshot
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Snapshot {
                    auctions: Arc::clone(&auctions),
                    fetched_at: Instant::now(),
                    invalidated: false,
                });
                *self
                    .0
                    .last_error
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = None;
                auctions
            }
            Err(e) => {
                log::error!("failed to load `Auction`s: {e}");

                *self
                    .0
                    .last_error
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(e));
                self.current()
            }
        };
        _ = self.0.attempts.fetch_add(1, Ordering::Release);
        auctions
    }
}

/// Materializes the fetched [`Listing`] as a snapshot.
///
/// [`Auction`]s missing their opportunity level get the one derived from
/// their discount, so it's serialized along with them.
fn prepare(listing: Listing) -> Arc<[Auction]> {
    listing
        .auctions
        .into_iter()
        .map(|mut a| {
            a.provided_opportunity_level = Some(a.opportunity_level());
            a
        })
        .collect()
}
