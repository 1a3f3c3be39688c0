// ── Request lifecycle ──
//
// Generic machinery shared by every slice: the `loading`/`error` status
// block, the started → succeeded | failed transitions, and the stale
// response guard that keeps an older settlement from overwriting a newer
// dispatch of the same operation.

mod sequencer;
mod stream;

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::error::CoreError;

pub(crate) use sequencer::{Sequencer, Ticket};
pub use stream::{SliceStream, SliceWatchStream};

/// The `loading` / `error` pair every slice state carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestStatus {
    pub loading: bool,
    pub error: Option<String>,
}

impl RequestStatus {
    fn start(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn succeed(&mut self) {
        self.loading = false;
        self.error = None;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

/// A slice's owned state fragment.
pub trait SliceState: Clone + Send + Sync + 'static {
    fn status(&self) -> &RequestStatus;
    fn status_mut(&mut self) -> &mut RequestStatus;
}

/// Broad class of a failed operation, for callers that branch on it
/// (exit codes, retry prompts). The slice itself only keeps the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The credential was rejected and has been cleared.
    Unauthorized,
    /// The server answered with this non-2xx status.
    Remote(u16),
    /// The server could not be reached.
    Network,
    /// The server did not answer within this many seconds.
    Timeout(u64),
    /// Local failure (configuration, decoding, credential storage).
    Local,
}

impl From<&CoreError> for FailureKind {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::Unauthorized { .. } => Self::Unauthorized,
            CoreError::Remote { status, .. } => Self::Remote(*status),
            CoreError::Network { .. } => Self::Network,
            CoreError::Timeout { timeout_secs, .. } => Self::Timeout(*timeout_secs),
            CoreError::Credential(_) | CoreError::Config { .. } | CoreError::Internal(_) => {
                Self::Local
            }
        }
    }
}

/// A failed operation: the message recorded in state plus its kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

/// How a dispatched operation ended, from the slice's point of view.
///
/// Failures are recorded in the slice's `error` field and never re-thrown;
/// this value only tells the caller what happened to its settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Settlement {
    /// The payload was merged into state.
    Applied,
    /// The operation failed; the message is also in `state.error`.
    Failed(Failure),
    /// A newer dispatch of the same operation was issued before this one
    /// settled, so its result was discarded.
    Superseded,
}

impl Settlement {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        self.failure().map(|f| f.message.as_str())
    }
}

/// Owner of one state fragment plus its per-operation sequence table.
///
/// State is published through a `watch` channel: readers take cheap
/// snapshots or subscribe for changes, and every transition is a single
/// `send_modify` so no observer sees a half-applied update.
pub(crate) struct Slice<S: SliceState> {
    name: &'static str,
    state: watch::Sender<S>,
    sequencer: Sequencer,
}

impl<S: SliceState> Slice<S> {
    pub(crate) fn new(name: &'static str, initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            name,
            state,
            sequencer: Sequencer::new(),
        }
    }

    pub(crate) fn snapshot(&self) -> S {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> SliceStream<S> {
        SliceStream::new(self.state.subscribe())
    }

    /// Issue a ticket for `op` and enter the started state.
    pub(crate) fn begin(&self, op: &'static str) -> Ticket {
        let ticket = self.sequencer.issue(op);
        self.state.send_modify(|s| s.status_mut().start());
        debug!(slice = self.name, op, seq = ticket.seq(), "started");
        ticket
    }

    /// Whether `ticket` is still the newest dispatch of its operation.
    pub(crate) fn is_current(&self, ticket: &Ticket) -> bool {
        self.sequencer.is_current(ticket)
    }

    /// Discard every outstanding dispatch of `op`.
    pub(crate) fn invalidate(&self, op: &'static str) {
        self.sequencer.invalidate(op);
    }

    /// Apply the outcome of the dispatch identified by `ticket`.
    ///
    /// Success runs `apply` and clears `loading`; failure records the
    /// message and leaves data fields untouched. Superseded settlements
    /// change nothing.
    pub(crate) fn settle<T>(
        &self,
        ticket: &Ticket,
        result: Result<T, CoreError>,
        apply: impl FnOnce(&mut S, T),
    ) -> Settlement {
        if !self.is_current(ticket) {
            debug!(
                slice = self.name,
                op = ticket.op(),
                seq = ticket.seq(),
                "superseded; discarding settlement"
            );
            return Settlement::Superseded;
        }

        match result {
            Ok(payload) => {
                self.state.send_modify(|s| {
                    apply(s, payload);
                    s.status_mut().succeed();
                });
                debug!(slice = self.name, op = ticket.op(), "succeeded");
                Settlement::Applied
            }
            Err(err) => {
                let failure = Failure {
                    kind: FailureKind::from(&err),
                    message: err.to_string(),
                };
                debug!(slice = self.name, op = ticket.op(), error = %failure.message, "failed");
                self.state
                    .send_modify(|s| s.status_mut().fail(failure.message.clone()));
                Settlement::Failed(failure)
            }
        }
    }

    /// Apply a synchronous, local mutation outside any request lifecycle.
    pub(crate) fn mutate(&self, f: impl FnOnce(&mut S)) {
        self.state.send_modify(f);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default)]
    struct Counter {
        value: u32,
        status: RequestStatus,
    }

    impl SliceState for Counter {
        fn status(&self) -> &RequestStatus {
            &self.status
        }
        fn status_mut(&mut self) -> &mut RequestStatus {
            &mut self.status
        }
    }

    fn slice() -> Slice<Counter> {
        Slice::new("counter", Counter::default())
    }

    #[test]
    fn begin_sets_loading_and_clears_error() {
        let s = slice();
        s.mutate(|c| c.status.error = Some("old".into()));

        let _ticket = s.begin("load");
        let snap = s.snapshot();
        assert!(snap.status.loading);
        assert!(snap.status.error.is_none());
    }

    #[test]
    fn success_applies_payload() {
        let s = slice();
        let ticket = s.begin("load");
        let out = s.settle(&ticket, Ok(7), |c, v| c.value = v);

        assert_eq!(out, Settlement::Applied);
        let snap = s.snapshot();
        assert_eq!(snap.value, 7);
        assert!(!snap.status.loading);
        assert!(snap.status.error.is_none());
    }

    #[test]
    fn failure_records_message_and_keeps_data() {
        let s = slice();
        s.mutate(|c| c.value = 3);
        let ticket = s.begin("load");
        let out = s.settle::<u32>(
            &ticket,
            Err(CoreError::Network {
                message: "down".into(),
            }),
            |c, v| c.value = v,
        );

        assert_eq!(out.error(), Some("down"));
        assert_eq!(out.failure().unwrap().kind, FailureKind::Network);
        let snap = s.snapshot();
        assert_eq!(snap.value, 3);
        assert!(!snap.status.loading);
        assert_eq!(snap.status.error.as_deref(), Some("down"));
    }

    #[test]
    fn stale_settlement_is_discarded() {
        let s = slice();
        let first = s.begin("load");
        let second = s.begin("load");

        // The older call settles last but must not win.
        assert_eq!(s.settle(&second, Ok(2), |c, v| c.value = v), Settlement::Applied);
        assert_eq!(s.settle(&first, Ok(1), |c, v| c.value = v), Settlement::Superseded);
        assert_eq!(s.snapshot().value, 2);
    }

    #[test]
    fn superseded_settlement_leaves_loading_for_newer_call() {
        let s = slice();
        let first = s.begin("load");
        let _second = s.begin("load");

        let _ = s.settle(&first, Ok(1), |c, v| c.value = v);
        let snap = s.snapshot();
        assert!(snap.status.loading);
        assert_eq!(snap.value, 0);
    }

    #[test]
    fn different_operations_do_not_supersede_each_other() {
        let s = slice();
        let load = s.begin("load");
        let _other = s.begin("other");

        assert!(s.settle(&load, Ok(5), |c, v| c.value = v).is_applied());
    }

    #[test]
    fn invalidate_discards_in_flight() {
        let s = slice();
        let ticket = s.begin("load");
        s.invalidate("load");

        assert_eq!(s.settle(&ticket, Ok(9), |c, v| c.value = v), Settlement::Superseded);
    }

    #[tokio::test]
    async fn subscribers_see_transitions() {
        let s = slice();
        let mut stream = s.subscribe();

        let ticket = s.begin("load");
        let snap = stream.changed().await.unwrap();
        assert!(snap.status().loading);

        let _ = s.settle(&ticket, Ok(4), |c, v| c.value = v);
        let snap = stream.changed().await.unwrap();
        assert!(!snap.status().loading);
        assert_eq!(snap.value, 4);
    }
}
