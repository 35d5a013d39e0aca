//! Mood classification.
//!
//! Mood is never stored. It is derived from the current gauges on every read:
//! `score = happiness - hunger * 0.5`, then bucketed by fixed thresholds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of hunger when computing the mood score.
pub const HUNGER_MOOD_WEIGHT: f64 = 0.5;

const DELIGHTED_THRESHOLD: f64 = 70.0;
const CONTENT_THRESHOLD: f64 = 50.0;
const NEUTRAL_THRESHOLD: f64 = 30.0;

/// How the pet feels right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Delighted,
    Content,
    Neutral,
    Sad,
}

/// Derived scalar used only for classification.
pub fn mood_score(hunger: f64, happiness: f64) -> f64 {
    happiness - hunger * HUNGER_MOOD_WEIGHT
}

impl Mood {
    /// Buckets a mood score. Thresholds are inclusive lower bounds,
    /// checked from the top down.
    pub fn from_score(score: f64) -> Self {
        if score >= DELIGHTED_THRESHOLD {
            Mood::Delighted
        } else if score >= CONTENT_THRESHOLD {
            Mood::Content
        } else if score >= NEUTRAL_THRESHOLD {
            Mood::Neutral
        } else {
            Mood::Sad
        }
    }

    /// Classifies raw (unrounded) gauge values.
    pub fn classify(hunger: f64, happiness: f64) -> Self {
        Self::from_score(mood_score(hunger, happiness))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Delighted => "Delighted",
            Mood::Content => "Content",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
