//! Resolves a pasted space URL to an existing record or a fresh transcription
//! request.
//!
//! One attempt, no retries: check the directory first, trigger the backend only
//! when the record is missing. The caller retries by resubmitting.

use std::sync::atomic::{AtomicBool, Ordering};

use sqlx::PgPool;

use crate::domain::spaces;
use crate::services::transcriber::TranscriberClient;

/// Alert shown when the flow fails for any reason.
pub const TRANSCRIBE_RETRY_MESSAGE: &str =
    "Error transcribing the space, please try again later";

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Existence lookup against the spaces collection.
pub trait SpaceDirectory {
    async fn space_exists(&self, space_id: &str) -> Result<bool, BoxError>;
}

/// The transcription-trigger side of the backend.
pub trait TranscriptionBackend {
    async fn request_transcription(&self, space_id: &str) -> Result<(), BoxError>;
}

/// Last path segment of a pasted space URL, e.g.
/// `https://x.com/i/spaces/1nAKEgjnRRkJL` -> `1nAKEgjnRRkJL`. An input without
/// any `/` is taken as the id itself; a trailing `/` yields nothing.
pub fn extract_space_id(url: &str) -> Option<&str> {
    match url.rsplit('/').next() {
        Some("") | None => None,
        Some(id) => Some(id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscribeOutcome {
    /// Nothing extractable from the input; no work was done.
    Ignored,
    /// A run is already in flight on this instance; this call did nothing.
    Busy,
    /// The record already exists; no backend call was made.
    Existing { space_id: String },
    /// The backend accepted exactly one transcription request.
    Requested { space_id: String },
    /// Lookup or trigger failed; alert, no navigation.
    Failed { message: String },
}

impl TranscribeOutcome {
    /// Detail route to navigate to, when there is one.
    pub fn location(&self) -> Option<String> {
        match self {
            TranscribeOutcome::Existing { space_id }
            | TranscribeOutcome::Requested { space_id } => Some(format!("/{}", space_id)),
            _ => None,
        }
    }
}

pub struct Orchestrator<D, B> {
    directory: D,
    backend: B,
    in_flight: AtomicBool,
}

impl<D: SpaceDirectory, B: TranscriptionBackend> Orchestrator<D, B> {
    pub fn new(directory: D, backend: B) -> Self {
        Self {
            directory,
            backend,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run the transcribe-or-navigate flow once. Overlapping calls on the same
    /// instance are dropped by the in-flight latch; this is a local reentrancy
    /// guard, not a cross-client lock.
    pub async fn transcribe_space(&self, space_url: &str) -> TranscribeOutcome {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return TranscribeOutcome::Busy;
        }

        let outcome = self.run(space_url).await;
        self.in_flight.store(false, Ordering::Release);
        outcome
    }

    async fn run(&self, space_url: &str) -> TranscribeOutcome {
        let Some(space_id) = extract_space_id(space_url) else {
            return TranscribeOutcome::Ignored;
        };

        match self.directory.space_exists(space_id).await {
            Ok(true) => TranscribeOutcome::Existing {
                space_id: space_id.to_string(),
            },
            Ok(false) => match self.backend.request_transcription(space_id).await {
                Ok(()) => TranscribeOutcome::Requested {
                    space_id: space_id.to_string(),
                },
                Err(e) => {
                    tracing::error!("Transcription request for {} failed: {}", space_id, e);
                    TranscribeOutcome::Failed {
                        message: TRANSCRIBE_RETRY_MESSAGE.to_string(),
                    }
                }
            },
            Err(e) => {
                tracing::error!("Space lookup for {} failed: {}", space_id, e);
                TranscribeOutcome::Failed {
                    message: TRANSCRIBE_RETRY_MESSAGE.to_string(),
                }
            }
        }
    }
}

/// Directory over the spaces table.
#[derive(Clone)]
pub struct PgSpaceDirectory {
    pool: PgPool,
}

impl PgSpaceDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SpaceDirectory for PgSpaceDirectory {
    async fn space_exists(&self, space_id: &str) -> Result<bool, BoxError> {
        Ok(spaces::space_exists(&self.pool, space_id).await?)
    }
}

impl TranscriptionBackend for TranscriberClient {
    async fn request_transcription(&self, space_id: &str) -> Result<(), BoxError> {
        Ok(self.transcribe_recorded_space(space_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    #[derive(Clone)]
    struct MockDirectory {
        exists: bool,
        fail: bool,
        calls: Arc<AtomicUsize>,
    }

    impl MockDirectory {
        fn returning(exists: bool) -> Self {
            Self {
                exists,
                fail: false,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                exists: false,
                fail: true,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl SpaceDirectory for MockDirectory {
        async fn space_exists(&self, _space_id: &str) -> Result<bool, BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("directory offline".into());
            }
            Ok(self.exists)
        }
    }

    #[derive(Clone)]
    struct MockBackend {
        ok: bool,
        calls: Arc<AtomicUsize>,
        gate: Option<Arc<Notify>>,
    }

    impl MockBackend {
        fn accepting() -> Self {
            Self {
                ok: true,
                calls: Arc::new(AtomicUsize::new(0)),
                gate: None,
            }
        }

        fn rejecting() -> Self {
            Self {
                ok: false,
                calls: Arc::new(AtomicUsize::new(0)),
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                ok: true,
                calls: Arc::new(AtomicUsize::new(0)),
                gate: Some(gate),
            }
        }
    }

    impl TranscriptionBackend for MockBackend {
        async fn request_transcription(&self, _space_id: &str) -> Result<(), BoxError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if self.ok {
                Ok(())
            } else {
                Err("backend rejected the job".into())
            }
        }
    }

    #[test]
    fn test_extract_space_id() {
        assert_eq!(
            extract_space_id("https://x.com/i/spaces/1nAKEgjnRRkJL"),
            Some("1nAKEgjnRRkJL")
        );
        assert_eq!(extract_space_id("1nAKEgjnRRkJL"), Some("1nAKEgjnRRkJL"));
        assert_eq!(extract_space_id("https://x.com/i/spaces/"), None);
        assert_eq!(extract_space_id(""), None);
    }

    #[tokio::test]
    async fn test_existing_record_skips_backend() {
        let directory = MockDirectory::returning(true);
        let backend = MockBackend::accepting();
        let backend_calls = backend.calls.clone();
        let orchestrator = Orchestrator::new(directory, backend);

        let outcome = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;

        assert_eq!(
            outcome,
            TranscribeOutcome::Existing {
                space_id: "1nAKEgjnRRkJL".to_string()
            }
        );
        assert_eq!(outcome.location().as_deref(), Some("/1nAKEgjnRRkJL"));
        assert_eq!(backend_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_record_triggers_once() {
        let directory = MockDirectory::returning(false);
        let backend = MockBackend::accepting();
        let backend_calls = backend.calls.clone();
        let orchestrator = Orchestrator::new(directory, backend);

        let outcome = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;

        assert_eq!(
            outcome,
            TranscribeOutcome::Requested {
                space_id: "1nAKEgjnRRkJL".to_string()
            }
        );
        assert_eq!(outcome.location().as_deref(), Some("/1nAKEgjnRRkJL"));
        assert_eq!(backend_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_backend_rejection_is_an_alert_without_navigation() {
        let orchestrator =
            Orchestrator::new(MockDirectory::returning(false), MockBackend::rejecting());

        let outcome = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;

        assert_eq!(
            outcome,
            TranscribeOutcome::Failed {
                message: TRANSCRIBE_RETRY_MESSAGE.to_string()
            }
        );
        assert_eq!(outcome.location(), None);
    }

    #[tokio::test]
    async fn test_lookup_failure_is_an_alert_without_trigger() {
        let backend = MockBackend::accepting();
        let backend_calls = backend.calls.clone();
        let orchestrator = Orchestrator::new(MockDirectory::failing(), backend);

        let outcome = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;

        assert_eq!(
            outcome,
            TranscribeOutcome::Failed {
                message: TRANSCRIBE_RETRY_MESSAGE.to_string()
            }
        );
        assert_eq!(backend_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_extraction_does_nothing() {
        let directory = MockDirectory::returning(true);
        let directory_calls = directory.calls.clone();
        let orchestrator = Orchestrator::new(directory, MockBackend::accepting());

        let outcome = orchestrator.transcribe_space("https://x.com/i/spaces/").await;

        assert_eq!(outcome, TranscribeOutcome::Ignored);
        assert_eq!(directory_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overlapping_call_is_dropped() {
        let gate = Arc::new(Notify::new());
        let directory = MockDirectory::returning(false);
        let backend = MockBackend::gated(gate.clone());
        let directory_calls = directory.calls.clone();
        let backend_calls = backend.calls.clone();
        let orchestrator = Arc::new(Orchestrator::new(directory, backend));

        let first = {
            let orchestrator = orchestrator.clone();
            tokio::spawn(async move {
                orchestrator
                    .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
                    .await
            })
        };

        // Wait until the first run is parked inside the backend call.
        while backend_calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }

        let second = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;
        assert_eq!(second, TranscribeOutcome::Busy);
        assert_eq!(directory_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend_calls.load(Ordering::SeqCst), 1);

        gate.notify_one();
        let first = first.await.unwrap();
        assert_eq!(
            first,
            TranscribeOutcome::Requested {
                space_id: "1nAKEgjnRRkJL".to_string()
            }
        );

        // The latch is released once the first run settles.
        gate.notify_one();
        let third = orchestrator
            .transcribe_space("https://x.com/i/spaces/1nAKEgjnRRkJL")
            .await;
        assert!(matches!(third, TranscribeOutcome::Requested { .. }));
    }
}
