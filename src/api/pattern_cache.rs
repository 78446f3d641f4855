use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use indexmap::IndexSet;
use tracing::{debug, warn};

use crate::error::{ChartError, ChartResult};

/// Asynchronous "load a decorative fill from a location" primitive.
pub trait PatternLoader {
    type Pattern: Clone + 'static;

    fn load(&self, location: &str) -> LocalBoxFuture<'static, ChartResult<Self::Pattern>>;
}

/// Lifecycle of the cached fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternStatus {
    NotAttempted,
    Loading,
    /// A handle is cached, or every attempted candidate failed.
    Resolved,
}

type PendingLoad<P> = Shared<LocalBoxFuture<'static, Option<P>>>;

struct InFlight<P> {
    location: String,
    pending: PendingLoad<P>,
}

struct CacheState<P> {
    handle: Option<P>,
    in_flight: Option<InFlight<P>>,
    failed: IndexSet<String>,
    load_attempts: u64,
}

/// Process-lifetime cache of one decorative fill handle.
///
/// Cloning shares the cache. At most one load is in flight at a time;
/// concurrent callers await it instead of starting their own. Once a handle
/// is cached it is never evicted, and a location that failed or timed out
/// is never retried.
///
/// The load timeout runs on a tokio timer independent of any
/// `FrameScheduler`. Acquiring must happen inside a tokio runtime with the
/// time driver enabled.
pub struct PatternCache<P: Clone + 'static> {
    state: Rc<RefCell<CacheState<P>>>,
    loader: Rc<dyn PatternLoader<Pattern = P>>,
    timeout: Duration,
}

impl<P: Clone + 'static> Clone for PatternCache<P> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
            loader: Rc::clone(&self.loader),
            timeout: self.timeout,
        }
    }
}

impl<P: Clone + 'static> PatternCache<P> {
    pub fn new(loader: Rc<dyn PatternLoader<Pattern = P>>, timeout: Duration) -> Self {
        Self {
            state: Rc::new(RefCell::new(CacheState {
                handle: None,
                in_flight: None,
                failed: IndexSet::new(),
                load_attempts: 0,
            })),
            loader,
            timeout,
        }
    }

    /// Cached handle, without starting a load.
    #[must_use]
    pub fn cached(&self) -> Option<P> {
        self.state.borrow().handle.clone()
    }

    #[must_use]
    pub fn status(&self) -> PatternStatus {
        let state = self.state.borrow();
        if state.in_flight.is_some() {
            PatternStatus::Loading
        } else if state.handle.is_some() || !state.failed.is_empty() {
            PatternStatus::Resolved
        } else {
            PatternStatus::NotAttempted
        }
    }

    /// Number of underlying loader calls made so far.
    #[must_use]
    pub fn load_attempts(&self) -> u64 {
        self.state.borrow().load_attempts
    }

    /// Locations that failed or timed out, in attempt order.
    #[must_use]
    pub fn failed_locations(&self) -> Vec<String> {
        self.state.borrow().failed.iter().cloned().collect()
    }

    /// Tries `candidates` in order and returns the first handle obtained.
    ///
    /// `None` is not an error: callers draw without the fill.
    pub async fn acquire<S: AsRef<str>>(&self, candidates: &[S]) -> Option<P> {
        for candidate in candidates {
            if let Some(handle) = self.acquire_location(candidate.as_ref()).await {
                return Some(handle);
            }
        }
        None
    }

    /// Returns the cached handle, awaits an in-flight load, or loads `location`.
    pub async fn acquire_location(&self, location: &str) -> Option<P> {
        loop {
            let pending = {
                let state = self.state.borrow();
                if let Some(handle) = &state.handle {
                    return Some(handle.clone());
                }
                if state.failed.contains(location) {
                    return None;
                }
                state.in_flight.as_ref().map(|in_flight| {
                    debug!(
                        requested = location,
                        in_flight = %in_flight.location,
                        "awaiting in-flight pattern load"
                    );
                    in_flight.pending.clone()
                })
            };

            match pending {
                // The settled load may have been for another location: re-check.
                Some(pending) => {
                    pending.await;
                }
                None => return self.start_load(location).await,
            }
        }
    }

    fn start_load(&self, location: &str) -> PendingLoad<P> {
        let load = self.loader.load(location);
        let timeout = self.timeout;
        let state = Rc::clone(&self.state);
        let owned_location = location.to_owned();
        let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);

        let pending = async move {
            let outcome = match tokio::time::timeout(timeout, load).await {
                Ok(result) => result,
                Err(_) => Err(ChartError::PatternTimeout {
                    location: owned_location.clone(),
                    timeout_ms,
                }),
            };

            let mut state = state.borrow_mut();
            state.in_flight = None;
            match outcome {
                Ok(handle) => {
                    debug!(location = %owned_location, "pattern loaded");
                    state.handle = Some(handle.clone());
                    Some(handle)
                }
                Err(err) => {
                    warn!(error = %err, "pattern unavailable, drawing without fill");
                    state.failed.insert(owned_location);
                    None
                }
            }
        }
        .boxed_local()
        .shared();

        let mut state = self.state.borrow_mut();
        state.load_attempts += 1;
        state.in_flight = Some(InFlight {
            location: location.to_owned(),
            pending: pending.clone(),
        });
        debug!(location, attempt = state.load_attempts, "pattern load started");
        pending
    }
}
