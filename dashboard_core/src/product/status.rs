//! Per-step call status of the product update handler
//!
//! Each remote operation has its own [`StepStatus`]. The aggregate
//! `called`/`loading` pair is derived on demand by
//! [`OperationStatus::aggregate`], never stored.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::{Mutex, MutexGuard};

/// One remote operation used by a submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MutationStep {
    UploadFile,
    DeleteAttributeValue,
    UpdateProduct,
    UpdateVariantStocks,
    UpdateVariant,
    UpdateChannels,
    UpdateMetadata,
    UpdatePrivateMetadata,
}

impl MutationStep {
    pub const ALL: [MutationStep; 8] = [
        Self::UploadFile,
        Self::DeleteAttributeValue,
        Self::UpdateProduct,
        Self::UpdateVariantStocks,
        Self::UpdateVariant,
        Self::UpdateChannels,
        Self::UpdateMetadata,
        Self::UpdatePrivateMetadata,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::UploadFile => "upload_file",
            Self::DeleteAttributeValue => "delete_attribute_value",
            Self::UpdateProduct => "update_product",
            Self::UpdateVariantStocks => "update_variant_stocks",
            Self::UpdateVariant => "update_variant",
            Self::UpdateChannels => "update_channels",
            Self::UpdateMetadata => "update_metadata",
            Self::UpdatePrivateMetadata => "update_private_metadata",
        }
    }
}

impl fmt::Display for MutationStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Calls issued for one step so far, and how many are still in flight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStatus {
    pub calls: usize,
    pub in_flight: usize,
}

impl StepStatus {
    pub fn called(&self) -> bool {
        self.calls > 0
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }
}

/// Aggregate status across every step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStatus {
    pub called: bool,
    pub loading: bool,
}

impl OperationStatus {
    pub fn aggregate<'a>(steps: impl IntoIterator<Item = &'a StepStatus>) -> Self {
        steps
            .into_iter()
            .fold(Self::default(), |status, step| Self {
                called: status.called || step.called(),
                loading: status.loading || step.loading(),
            })
    }
}

/// Where a submit currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Uploading,
    Deleting,
    UpdatingProduct,
    UpdatingVariantsAndChannels,
    UpdatingMetadata,
    Settled,
}

#[derive(Debug, Default)]
struct BoardState {
    steps: HashMap<MutationStep, StepStatus>,
    phase: SubmitPhase,
}

/// Shared record of step statuses and the submit phase
#[derive(Debug, Default)]
pub struct StatusBoard {
    state: Mutex<BoardState>,
}

impl StatusBoard {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BoardState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Record the start of a call; the call counts as in flight until the
    /// returned guard is dropped
    pub fn begin(&self, step: MutationStep) -> StepGuard<'_> {
        let mut state = self.lock();
        let status = state.steps.entry(step).or_default();
        status.calls += 1;
        status.in_flight += 1;
        StepGuard { board: self, step }
    }

    pub fn step(&self, step: MutationStep) -> StepStatus {
        self.lock().steps.get(&step).copied().unwrap_or_default()
    }

    pub fn snapshot(&self) -> Vec<(MutationStep, StepStatus)> {
        let state = self.lock();
        MutationStep::ALL
            .iter()
            .map(|step| (*step, state.steps.get(step).copied().unwrap_or_default()))
            .collect()
    }

    pub fn aggregate(&self) -> OperationStatus {
        let state = self.lock();
        OperationStatus::aggregate(state.steps.values())
    }

    pub fn phase(&self) -> SubmitPhase {
        self.lock().phase
    }

    pub fn set_phase(&self, phase: SubmitPhase) {
        self.lock().phase = phase;
    }

    /// Run `call` as one invocation of `step`
    pub async fn tracked<F: Future>(&self, step: MutationStep, call: F) -> F::Output {
        let _guard = self.begin(step);
        call.await
    }
}

/// Marks one call of a step as finished when dropped
#[derive(Debug)]
pub struct StepGuard<'a> {
    board: &'a StatusBoard,
    step: MutationStep,
}

impl Drop for StepGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.board.lock();
        if let Some(status) = state.steps.get_mut(&self.step) {
            status.in_flight = status.in_flight.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aggregate_of_nothing_is_idle() {
        let status = OperationStatus::aggregate(&Vec::<StepStatus>::new());
        assert_eq!(status, OperationStatus::default());
    }

    #[test]
    fn test_aggregate_ors_each_flag() {
        let steps = [
            StepStatus {
                calls: 2,
                in_flight: 0,
            },
            StepStatus::default(),
            StepStatus {
                calls: 1,
                in_flight: 1,
            },
        ];

        let status = OperationStatus::aggregate(&steps);
        assert!(status.called);
        assert!(status.loading);

        let settled = OperationStatus::aggregate(&steps[..2]);
        assert!(settled.called);
        assert!(!settled.loading);
    }

    #[test]
    fn test_guard_tracks_in_flight_calls() {
        let board = StatusBoard::new();

        let first = board.begin(MutationStep::UploadFile);
        let second = board.begin(MutationStep::UploadFile);
        assert_eq!(board.step(MutationStep::UploadFile), StepStatus {
            calls: 2,
            in_flight: 2
        });
        assert!(board.aggregate().loading);

        drop(first);
        drop(second);
        assert_eq!(board.step(MutationStep::UploadFile), StepStatus {
            calls: 2,
            in_flight: 0
        });
        assert_eq!(board.aggregate(), OperationStatus {
            called: true,
            loading: false
        });
    }

    #[test]
    fn test_snapshot_lists_every_step_in_order() {
        let board = StatusBoard::new();
        drop(board.begin(MutationStep::UpdateChannels));

        let snapshot = board.snapshot();
        assert_eq!(snapshot.len(), MutationStep::ALL.len());
        assert_eq!(snapshot[0].0, MutationStep::UploadFile);
        assert!(snapshot[5].1.called());
        assert!(!snapshot[2].1.called());
    }

    #[tokio::test]
    async fn test_tracked_releases_after_completion() {
        let board = StatusBoard::new();

        let value = board
            .tracked(MutationStep::UpdateProduct, async { 42 })
            .await;

        assert_eq!(value, 42);
        assert!(board.step(MutationStep::UpdateProduct).called());
        assert!(!board.step(MutationStep::UpdateProduct).loading());
    }

    #[test]
    fn test_phase_defaults_to_idle() {
        let board = StatusBoard::new();
        assert_eq!(board.phase(), SubmitPhase::Idle);
        board.set_phase(SubmitPhase::Settled);
        assert_eq!(board.phase(), SubmitPhase::Settled);
    }
}
