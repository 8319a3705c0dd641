// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Request lifecycle shared by the encrypt and decrypt workflows.

/// Where a workflow instance is in its submit/response cycle.
///
/// `Idle` and `Failed` both accept a new attempt; `Submitting` accepts nothing
/// until the in-flight request resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

impl SubmissionState {
    /// True while a request is in flight; the trigger and inputs are locked.
    pub fn is_busy(self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }

    /// Whether a new submission may start from this state.
    pub fn can_submit(self) -> bool {
        !self.is_busy()
    }
}
