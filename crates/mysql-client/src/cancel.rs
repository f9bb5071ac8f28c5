//! Cooperative query cancellation.
//!
//! Each connection may run one background watcher task. Before a blocking
//! operation, the holder registers the caller's cancellation context with
//! the watcher over a capacity-1 channel; the watcher then races that
//! context against a "finished" signal and the connection's own shutdown.
//! If cancellation wins, the watcher stores the cancellation error and
//! force-closes the connection. The watcher never writes protocol bytes:
//! its only effects are the atomic closed flag, the canceled-error slot,
//! and the shutdown token every blocking read and write races against.
//!
//! ## Example
//!
//! ```rust,ignore
//! use mysql_client::Context;
//! use tokio_util::sync::CancellationToken;
//!
//! let token = CancellationToken::new();
//! let ctx = Context::from(token.clone());
//!
//! tokio::spawn(async move {
//!     tokio::time::sleep(Duration::from_secs(5)).await;
//!     token.cancel();
//! });
//!
//! // Aborted after five seconds; the connection is then unusable.
//! let rows = conn.query(&ctx, "SELECT * FROM very_large_table", &[]).await;
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::Error;

/// External cancellation context for a single operation.
///
/// [`Context::background`] cannot be canceled and never involves the
/// watcher; a context built from a [`CancellationToken`] arms the watcher
/// for the duration of the operation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    token: Option<CancellationToken>,
}

impl Context {
    /// A context that can never be canceled.
    #[must_use]
    pub fn background() -> Self {
        Self { token: None }
    }

    /// A context canceled when `token` is canceled.
    #[must_use]
    pub fn cancellable(token: CancellationToken) -> Self {
        Self { token: Some(token) }
    }

    /// Whether the context has already been canceled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token
            .as_ref()
            .is_some_and(CancellationToken::is_cancelled)
    }

    pub(crate) fn token(&self) -> Option<&CancellationToken> {
        self.token.as_ref()
    }
}

impl From<CancellationToken> for Context {
    fn from(token: CancellationToken) -> Self {
        Self::cancellable(token)
    }
}

/// State shared between the connection holder and its watcher task.
///
/// Each field has a single writer: `closed` transitions once through a
/// compare-and-set, the canceled slot is written only by the watcher, and
/// the shutdown token is cancel-once.
#[derive(Debug)]
pub(crate) struct Shared {
    closed: AtomicBool,
    was_canceled: AtomicBool,
    canceled: Mutex<Option<Error>>,
    shutdown: CancellationToken,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            closed: AtomicBool::new(false),
            was_canceled: AtomicBool::new(false),
            canceled: Mutex::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Close the connection. Idempotent: exactly one caller wins the
    /// transition and triggers the shutdown token.
    pub(crate) fn force_close(&self) -> bool {
        if self
            .closed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            self.shutdown.cancel();
            true
        } else {
            false
        }
    }

    /// Record a cancellation cause and force-close.
    pub(crate) fn cancel(&self, cause: Error) {
        *self.canceled.lock() = Some(cause);
        self.was_canceled.store(true, Ordering::Release);
        self.force_close();
    }

    /// Take the stored cancellation error, if any. The cause is surfaced
    /// once; afterwards the connection reports itself invalid.
    pub(crate) fn take_canceled(&self) -> Option<Error> {
        self.canceled.lock().take()
    }

    pub(crate) fn was_canceled(&self) -> bool {
        self.was_canceled.load(Ordering::Acquire)
    }

    pub(crate) fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }
}

/// Holder-side endpoints of the watcher's channels.
#[derive(Debug)]
pub(crate) struct WatcherHandle {
    register: mpsc::Sender<CancellationToken>,
    finished: mpsc::Sender<()>,
}

impl WatcherHandle {
    /// Arm the watcher with a cancellation token, waiting for it to be
    /// ready if it has not yet drained the previous cycle. Returns `false`
    /// if the watcher has already exited.
    pub(crate) async fn register(&self, token: CancellationToken) -> bool {
        self.register.send(token).await.is_ok()
    }

    /// Signal that the current operation completed. The buffered send is
    /// abandoned if the watcher already exited through the shutdown path.
    pub(crate) fn finish(&self) -> bool {
        self.finished.try_send(()).is_ok()
    }
}

/// Spawn the watcher task for a connection.
pub(crate) fn spawn_watcher(shared: Arc<Shared>) -> WatcherHandle {
    let (register_tx, mut register_rx) = mpsc::channel::<CancellationToken>(1);
    let (finished_tx, mut finished_rx) = mpsc::channel::<()>(1);
    let shutdown = shared.shutdown_token();

    tokio::spawn(async move {
        loop {
            let token = tokio::select! {
                registered = register_rx.recv() => match registered {
                    Some(token) => token,
                    None => return,
                },
                () = shutdown.cancelled() => return,
            };

            tokio::select! {
                // An already-buffered "finished" must win over a
                // cancellation that arrived after the operation completed.
                biased;
                finished = finished_rx.recv() => {
                    if finished.is_none() {
                        return;
                    }
                    // Idle again, ready for the next registration.
                }
                () = token.cancelled() => {
                    tracing::debug!("cancellation signal won; force-closing connection");
                    shared.cancel(Error::Canceled);
                    return;
                }
                () = shutdown.cancelled() => return,
            }
        }
    });

    WatcherHandle {
        register: register_tx,
        finished: finished_tx,
    }
}
