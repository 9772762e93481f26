//! Members declared on compiled host-language classes.
//!
//! The host compiler model can be slow (cold classpath, large jars), so lookups
//! run on a [`HostWorker`] and the calling thread waits in short slices. Between
//! slices it checks the request's cancellation token, the per-lookup timeout and
//! the request-wide deadline, and gives up rather than blocking the editor.
//!
//! A lookup the caller gave up on keeps running until the model returns. While
//! such stalled lookups occupy every pool thread, new lookups go to a fresh
//! thread instead of queueing behind them.

use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use crate::hir::{Document, HostModel, MemberDecl, ModelError, ResolveError};
use crate::ide::candidate::Origin;

use super::{MemberProvider, Members, ProviderQuery, collect_declared};

const PROVIDER: &str = "host-declared";

const RUNNING: u8 = 0;
const FINISHED: u8 = 1;
const ABANDONED: u8 = 2;

/// Where host-model lookups run.
#[derive(Clone, Default)]
pub struct HostWorker {
    pool: Option<Arc<ThreadPool>>,
    /// Abandoned lookups still queued or running on the pool.
    stalled: Arc<AtomicUsize>,
}

impl HostWorker {
    /// Run lookups on rayon's global pool.
    pub fn global() -> Self {
        Self::default()
    }

    /// Run lookups on a dedicated pool.
    pub fn dedicated(threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("host-model-{}", i))
            .build()?;
        Ok(Self {
            pool: Some(Arc::new(pool)),
            stalled: Arc::default(),
        })
    }

    fn capacity(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Number of abandoned lookups that have not returned yet.
    pub fn stalled(&self) -> usize {
        self.stalled.load(Ordering::Acquire)
    }

    fn submit<T: Send + 'static>(&self, job: impl FnOnce() -> T + Send + 'static) -> Lookup<T> {
        let (tx, rx) = mpsc::channel();
        let state = Arc::new(AtomicU8::new(RUNNING));
        let lookup = Lookup {
            rx,
            state: Arc::clone(&state),
            stalled: Arc::clone(&self.stalled),
        };

        let stalled = Arc::clone(&self.stalled);
        let guarded = move || {
            let outcome = catch_unwind(AssertUnwindSafe(job));
            if state.swap(FINISHED, Ordering::AcqRel) == ABANDONED {
                stalled.fetch_sub(1, Ordering::AcqRel);
            }
            match outcome {
                // The receiver is gone if the caller gave up; nothing to report.
                Ok(value) => {
                    let _ = tx.send(value);
                }
                Err(_) => tracing::error!("[HOST] model lookup panicked"),
            }
        };

        if self.stalled() >= self.capacity() {
            tracing::debug!("[HOST] pool held by {} stalled lookups, using a fresh thread", self.stalled());
            // A failed spawn drops the job, which the caller sees as a disconnect.
            if let Err(err) = thread::Builder::new()
                .name("host-model-overflow".into())
                .spawn(guarded)
            {
                lookup.state.store(FINISHED, Ordering::Release);
                tracing::warn!("[HOST] could not start overflow thread: {}", err);
            }
            return lookup;
        }

        match &self.pool {
            Some(pool) => pool.spawn(guarded),
            None => rayon::spawn(guarded),
        }
        lookup
    }
}

impl fmt::Debug for HostWorker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostWorker")
            .field("dedicated", &self.pool.is_some())
            .field("stalled", &self.stalled())
            .finish()
    }
}

/// The caller's end of a submitted lookup. Dropping it before the result
/// arrives marks the job as abandoned.
struct Lookup<T> {
    rx: Receiver<T>,
    state: Arc<AtomicU8>,
    stalled: Arc<AtomicUsize>,
}

impl<T> Lookup<T> {
    fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

impl<T> Drop for Lookup<T> {
    fn drop(&mut self) {
        // Count first so the job's decrement can never run ahead of it.
        self.stalled.fetch_add(1, Ordering::AcqRel);
        if self
            .state
            .compare_exchange(RUNNING, ABANDONED, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            self.stalled.fetch_sub(1, Ordering::AcqRel);
        }
    }
}

/// Resolves members through the host compiler's symbol model.
#[derive(Clone)]
pub struct HostDeclaredProvider {
    document: Document,
    model: Arc<dyn HostModel>,
    worker: HostWorker,
    timeout: Duration,
    poll_interval: Duration,
}

impl HostDeclaredProvider {
    pub fn new(document: Document, model: Arc<dyn HostModel>, worker: HostWorker) -> Self {
        Self {
            document,
            model,
            worker,
            timeout: Duration::from_secs(2),
            poll_interval: Duration::from_millis(20),
        }
    }

    /// Set the per-lookup wait and the poll slice.
    pub fn with_timeouts(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.timeout = timeout;
        self.poll_interval = poll_interval.max(Duration::from_millis(1));
        self
    }

    fn await_members(&self, query: &ProviderQuery<'_>) -> Result<Option<Vec<MemberDecl>>, ResolveError> {
        if query.cancel.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }

        let started = Instant::now();
        let deadline = match (started.checked_add(self.timeout), query.host_deadline) {
            (Some(own), Some(request)) => Some(own.min(request)),
            (own, request) => own.or(request),
        };
        if deadline.is_some_and(|deadline| deadline <= started) {
            return Err(self.timed_out(query, Duration::ZERO));
        }

        let model = Arc::clone(&self.model);
        let type_name = query.type_name.to_string();
        let lookup = self.worker.submit(move || model.members(&type_name));

        loop {
            let slice = match deadline {
                Some(deadline) => self
                    .poll_interval
                    .min(deadline.saturating_duration_since(Instant::now())),
                None => self.poll_interval,
            };
            match lookup.recv_timeout(slice) {
                Ok(result) => {
                    return result.map_err(|err: ModelError| {
                        ResolveError::failure(PROVIDER, query.type_name, err.to_string())
                    });
                }
                Err(RecvTimeoutError::Timeout) => {
                    if query.cancel.is_cancelled() {
                        return Err(ResolveError::Cancelled);
                    }
                    if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                        return Err(self.timed_out(query, started.elapsed()));
                    }
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ResolveError::failure(
                        PROVIDER,
                        query.type_name,
                        "worker exited without a result",
                    ));
                }
            }
        }
    }

    fn timed_out(&self, query: &ProviderQuery<'_>, waited: Duration) -> ResolveError {
        ResolveError::ProviderTimeout {
            provider: PROVIDER,
            type_name: Arc::from(query.type_name),
            waited,
        }
    }
}

impl MemberProvider for HostDeclaredProvider {
    fn origin(&self) -> Origin {
        Origin::HostLanguageDeclared
    }

    fn query(&self, query: &ProviderQuery<'_>) -> Result<Members, ResolveError> {
        // Edits wait until the lookup is done, so the model never sees a torn unit.
        let _snapshot = self.document.snapshot();

        let Some(decls) = self.await_members(query)? else {
            return Ok(Members::new());
        };
        tracing::trace!("[HOST] {} members for '{}'", decls.len(), query.type_name);
        let declaring: Arc<str> = Arc::from(query.type_name);
        Ok(collect_declared(
            &decls,
            &declaring,
            Origin::HostLanguageDeclared,
            query,
        ))
    }
}

impl fmt::Debug for HostDeclaredProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostDeclaredProvider")
            .field("worker", &self.worker)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}
