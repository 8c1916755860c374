//! Lookup flow: validate input, fetch, map, publish.
//!
//! The controller owns both the form state and the snapshot store, so a
//! lookup can only be observed through it. At most one lookup is in flight.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::{
    model::{LookupState, LookupStatus, WeatherSnapshot},
    provider::{LookupError, WeatherProvider},
    store::SnapshotStore,
};

/// Submission rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please enter a city name!")]
    EmptyInput,

    #[error("a lookup is already in progress")]
    Busy,

    #[error("lookup controller has been shut down")]
    ShutDown,
}

/// Ticket for the one lookup currently in flight.
#[derive(Debug)]
#[must_use = "a pending lookup must be passed to `finish`"]
pub struct PendingLookup {
    id: u64,
    city: String,
    prior_status: LookupStatus,
    prior_error: Option<String>,
}

impl PendingLookup {
    /// Trimmed city name to send to the provider.
    pub fn city(&self) -> &str {
        &self.city
    }
}

#[derive(Debug)]
pub enum LookupOutcome {
    /// The store now holds a fresh snapshot for `city`.
    Loaded { city: String },
    /// Status is `Error`; store and input are unchanged.
    Failed(LookupError),
    /// The controller was shut down while waiting; nothing was applied.
    Cancelled,
}

impl LookupOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LookupOutcome::Loaded { .. })
    }
}

#[derive(Debug)]
pub struct LookupController<P> {
    provider: P,
    state: LookupState,
    store: SnapshotStore,
    cancel: CancellationToken,
    next_id: u64,
    in_flight: Option<u64>,
}

impl<P: WeatherProvider> LookupController<P> {
    pub fn new(provider: P) -> Self {
        Self::with_store(provider, SnapshotStore::new())
    }

    pub fn with_store(provider: P, store: SnapshotStore) -> Self {
        Self {
            provider,
            state: LookupState::default(),
            store,
            cancel: CancellationToken::new(),
            next_id: 0,
            in_flight: None,
        }
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Handle that aborts the in-flight lookup when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Abort any in-flight lookup and refuse further submissions.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Update the input field. Editing clears a shown error; ignored while
    /// loading because the field is disabled.
    pub fn set_input(&mut self, text: impl Into<String>) -> bool {
        if self.state.is_loading() {
            return false;
        }

        self.state.pending_text = text.into();
        if self.state.status == LookupStatus::Error {
            self.state.status = LookupStatus::Idle;
            self.state.last_error = None;
        }
        true
    }

    /// Validate `raw` and move to `Loading`. Rejections leave state untouched.
    pub fn begin(&mut self, raw: &str) -> Result<PendingLookup, SubmitError> {
        if self.cancel.is_cancelled() {
            return Err(SubmitError::ShutDown);
        }
        if self.in_flight.is_some() {
            return Err(SubmitError::Busy);
        }

        let city = raw.trim();
        if city.is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        self.next_id += 1;
        self.in_flight = Some(self.next_id);
        self.state.pending_text = raw.to_string();
        let prior_status = std::mem::replace(&mut self.state.status, LookupStatus::Loading);
        let prior_error = self.state.last_error.take();

        debug!(id = self.next_id, city, "lookup started");
        Ok(PendingLookup {
            id: self.next_id,
            city: city.to_string(),
            prior_status,
            prior_error,
        })
    }

    /// Give up on `pending` without a result, returning to the state before
    /// `begin`.
    pub fn abandon(&mut self, pending: PendingLookup) {
        if self.in_flight == Some(pending.id) {
            restore(&mut self.state, &mut self.in_flight, &pending);
        }
    }

    /// Apply the provider result for `pending`.
    pub fn finish(
        &mut self,
        pending: PendingLookup,
        result: Result<WeatherSnapshot, LookupError>,
    ) -> LookupOutcome {
        if self.in_flight != Some(pending.id) || self.cancel.is_cancelled() {
            debug!(id = pending.id, "dropping result of abandoned lookup");
            return LookupOutcome::Cancelled;
        }
        self.in_flight = None;

        match result {
            Ok(snapshot) => {
                info!(query = %pending.city, resolved = %snapshot.city, "lookup succeeded");
                let city = snapshot.city.clone();
                self.store.publish(snapshot);
                self.state.status = LookupStatus::Idle;
                self.state.pending_text.clear();
                LookupOutcome::Loaded { city }
            }
            Err(err) => {
                warn!(query = %pending.city, error = %err, "lookup failed");
                self.state.status = LookupStatus::Error;
                self.state.last_error = Some(err.to_string());
                LookupOutcome::Failed(err)
            }
        }
    }

    /// Run one full lookup: exactly one provider request per accepted
    /// submission.
    pub async fn submit(&mut self, raw: &str) -> Result<LookupOutcome, SubmitError> {
        let pending = self.begin(raw)?;

        let cancel = self.cancel.clone();
        let mut guard = InFlightGuard {
            state: &mut self.state,
            in_flight: &mut self.in_flight,
            pending: &pending,
            armed: true,
        };
        let result = tokio::select! {
            _ = cancel.cancelled() => None,
            result = self.provider.current(pending.city()) => Some(result),
        };
        guard.armed = false;
        drop(guard);

        match result {
            Some(result) => Ok(self.finish(pending, result)),
            None => {
                debug!(id = pending.id, "lookup cancelled");
                self.in_flight = None;
                Ok(LookupOutcome::Cancelled)
            }
        }
    }
}

/// Rolls back `begin` if the `submit` future is dropped before the provider
/// answers.
struct InFlightGuard<'a> {
    state: &'a mut LookupState,
    in_flight: &'a mut Option<u64>,
    pending: &'a PendingLookup,
    armed: bool,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            debug!(id = self.pending.id, "lookup dropped before completion");
            restore(self.state, self.in_flight, self.pending);
        }
    }
}

fn restore(state: &mut LookupState, in_flight: &mut Option<u64>, pending: &PendingLookup) {
    *in_flight = None;
    state.status = pending.prior_status;
    state.last_error = pending.prior_error.clone();
}

impl<P> Drop for LookupController<P> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
