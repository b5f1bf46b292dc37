//! Cancellable one-shot contact loading.
//!
//! # Responsibility
//! - Run a blocking `ContactSource` read off the caller's thread.
//! - Hand the caller an awaitable, cancellable task.
//!
//! # Invariants
//! - One task delivers at most one contact list.
//! - `contacts_or_empty` never fails; every failure becomes an empty list.
//! - No retries happen inside the loader.

use crate::model::contact::Contact;
use crate::source::contact_source::{ContactSource, SourceError, SourceResult};
use log::{info, warn};
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::{Builder, Handle, Runtime};
use tokio::task::{JoinError, JoinHandle};

const LOADER_THREAD_NAME: &str = "contacts-loader";
const LOADER_WORKER_THREADS: usize = 1;

static LOADER_RUNTIME: OnceCell<Runtime> = OnceCell::new();

/// Outcome errors of a load task.
#[derive(Debug)]
pub enum LoadError {
    /// The source reported a failure.
    Source(SourceError),
    /// The task was cancelled before it delivered.
    Cancelled,
    /// The source panicked while loading.
    Panicked(String),
    /// No async runtime was available to run the load.
    Runtime(String),
}

impl Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Cancelled => write!(f, "contact load was cancelled"),
            Self::Panicked(details) => write!(f, "contact load panicked: {details}"),
            Self::Runtime(details) => write!(f, "contact loader runtime unavailable: {details}"),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SourceError> for LoadError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Entry point that starts load tasks.
pub struct ContactLoader;

impl ContactLoader {
    /// Starts loading `source` in the background.
    ///
    /// Uses the ambient tokio runtime when called inside one, otherwise a
    /// small dedicated runtime created on first use.
    pub fn spawn(source: Arc<dyn ContactSource>) -> LoadTask {
        let source_name = source.source_name().to_string();
        info!("event=contacts_fetch module=loader status=start source={source_name}");

        let handle = match runtime_handle() {
            Ok(handle) => handle,
            Err(details) => {
                return LoadTask {
                    source_name,
                    started_at: Instant::now(),
                    state: TaskState::Unavailable(details),
                };
            }
        };

        let blocking = handle.spawn_blocking(move || source.load_contacts());
        // Blocking work cannot be aborted once running; the outer task can.
        let outer = handle.spawn(async move { blocking.await });

        LoadTask {
            source_name,
            started_at: Instant::now(),
            state: TaskState::Running(outer),
        }
    }
}

enum TaskState {
    Running(JoinHandle<Result<SourceResult<Vec<Contact>>, JoinError>>),
    Unavailable(String),
}

/// Handle to one in-flight contact load.
pub struct LoadTask {
    source_name: String,
    started_at: Instant,
    state: TaskState,
}

impl LoadTask {
    /// Requests cancellation. Awaiting afterwards yields `LoadError::Cancelled`
    /// unless the load had already finished.
    pub fn cancel(&self) {
        if let TaskState::Running(handle) = &self.state {
            handle.abort();
            info!(
                "event=contacts_fetch module=loader status=cancel_requested source={}",
                self.source_name
            );
        }
    }

    /// Whether the task has finished (successfully or not).
    pub fn is_finished(&self) -> bool {
        match &self.state {
            TaskState::Running(handle) => handle.is_finished(),
            TaskState::Unavailable(_) => true,
        }
    }

    /// Waits for the load and reports its typed outcome.
    pub async fn join(self) -> Result<Vec<Contact>, LoadError> {
        let outcome = match self.state {
            TaskState::Running(handle) => match handle.await {
                Ok(Ok(result)) => result.map_err(LoadError::Source),
                Ok(Err(inner)) => Err(join_error(inner)),
                Err(outer) => Err(join_error(outer)),
            },
            TaskState::Unavailable(details) => Err(LoadError::Runtime(details)),
        };

        let duration_ms = self.started_at.elapsed().as_millis();
        match &outcome {
            Ok(contacts) => info!(
                "event=contacts_fetch module=loader status=ok source={} count={} duration_ms={}",
                self.source_name,
                contacts.len(),
                duration_ms
            ),
            Err(err) => warn!(
                "event=contacts_fetch module=loader status=error source={} duration_ms={} error={}",
                self.source_name, duration_ms, err
            ),
        }
        outcome
    }

    /// Waits for the load, treating any failure as an empty address book.
    pub async fn contacts_or_empty(self) -> Vec<Contact> {
        self.join().await.unwrap_or_default()
    }
}

fn join_error(err: JoinError) -> LoadError {
    if err.is_cancelled() {
        LoadError::Cancelled
    } else {
        LoadError::Panicked(err.to_string())
    }
}

fn runtime_handle() -> Result<Handle, String> {
    if let Ok(handle) = Handle::try_current() {
        return Ok(handle);
    }

    LOADER_RUNTIME
        .get_or_try_init(|| {
            Builder::new_multi_thread()
                .worker_threads(LOADER_WORKER_THREADS)
                .thread_name(LOADER_THREAD_NAME)
                .build()
        })
        .map(|runtime| runtime.handle().clone())
        .map_err(|err| err.to_string())
}
