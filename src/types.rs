//! Wire types returned by the HTTP API.

use serde::{Deserialize, Serialize};

use crate::pet::Mood;

/// Snapshot of the pet as seen by a client.
///
/// Gauges are rounded for display; the model keeps full precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetStatus {
    pub name: String,
    pub hunger: u8,
    pub happiness: u8,
    pub mood: Mood,
}

/// Body of `POST /play`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayResponse {
    #[serde(flatten)]
    pub status: PetStatus,
    pub action_allowed: bool,
}

/// Result of asking the pet to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The pet played; happiness and hunger went up.
    Allowed,
    /// The pet was too hungry; only decay was applied.
    TooHungry,
}

impl PlayOutcome {
    pub fn is_allowed(self) -> bool {
        matches!(self, PlayOutcome::Allowed)
    }
}

impl PlayResponse {
    pub fn new(status: PetStatus, outcome: PlayOutcome) -> Self {
        Self {
            status,
            action_allowed: outcome.is_allowed(),
        }
    }
}
