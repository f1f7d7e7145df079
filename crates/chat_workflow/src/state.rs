//! Workflow phases and the snapshot published to the presentation surface.

use serde::Serialize;

/// Lifecycle of a workflow: idle, or waiting on the transport.
#[derive(Serialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowPhase {
    /// Awaiting user input.
    #[default]
    Idle,

    /// A submission is in flight.
    Submitting,
}

/// Events that move the workflow between phases.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowEvent {
    SubmitStarted,
    SubmitSettled,
}

impl WorkflowPhase {
    /// Compute the phase that follows `event`.
    pub fn next(self, event: WorkflowEvent) -> Self {
        match (self, event) {
            (_, WorkflowEvent::SubmitStarted) => Self::Submitting,
            (_, WorkflowEvent::SubmitSettled) => Self::Idle,
        }
    }

    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    pub fn accepts_user_input(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Idle => "Ready for input",
            Self::Submitting => "Waiting for response",
        }
    }
}

/// Read-only copy of the workflow state, published after every change.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkflowSnapshot {
    pub draft: String,
    pub file_names: Vec<String>,
    pub busy: bool,
    pub response: Option<String>,
}

impl WorkflowSnapshot {
    /// The phase implied by the busy flag.
    pub fn phase(&self) -> WorkflowPhase {
        if self.busy {
            WorkflowPhase::Submitting
        } else {
            WorkflowPhase::Idle
        }
    }

    pub fn has_files(&self) -> bool {
        !self.file_names.is_empty()
    }

    /// File names joined for display.
    pub fn joined_file_names(&self) -> String {
        self.file_names.join(", ")
    }

    /// The response worth rendering; an empty string counts as absent.
    pub fn visible_response(&self) -> Option<&str> {
        self.response.as_deref().filter(|text| !text.is_empty())
    }
}
