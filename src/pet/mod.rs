//! Pet state model.
//!
//! A single pet with two gauges, hunger and happiness, both kept in `[0, 100]`.
//! Nothing ticks in the background: every public operation first brings the
//! gauges up to date from the time elapsed since the last observation, then
//! applies its own effect. Decay is therefore a pure function of elapsed time
//! no matter how often the pet is polled.

pub mod clock;
pub mod mood;

pub use clock::{Clock, ManualClock, SystemClock};
pub use mood::{mood_score, Mood};

use chrono::{DateTime, TimeDelta, Utc};
use tracing::{debug, warn};

use crate::types::{PetStatus, PlayOutcome};

pub const MIN_GAUGE: f64 = 0.0;
pub const MAX_GAUGE: f64 = 100.0;

/// Hunger of a freshly created pet.
pub const INITIAL_HUNGER: f64 = 50.0;
/// Happiness of a freshly created pet.
pub const INITIAL_HAPPINESS: f64 = 70.0;

/// Hunger gained per elapsed minute.
pub const HUNGER_PER_MINUTE: f64 = 1.5;
/// Happiness lost per elapsed minute.
pub const HAPPINESS_LOSS_PER_MINUTE: f64 = 1.0;

pub const FEED_HUNGER_RELIEF: f64 = 25.0;
pub const FEED_HAPPINESS_BOOST: f64 = 5.0;

pub const PLAY_HAPPINESS_BOOST: f64 = 20.0;
pub const PLAY_HUNGER_COST: f64 = 10.0;
/// At or above this hunger the pet refuses to play.
pub const PLAY_HUNGER_LIMIT: f64 = 80.0;

const NANOS_PER_MINUTE: f64 = 60_000_000_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;

/// The digital pet.
#[derive(Debug, Clone)]
pub struct Pet {
    name: String,
    hunger: f64,
    happiness: f64,
    last_updated: DateTime<Utc>,
}

impl Pet {
    /// Creates a pet with the standard starting gauges, observed at `now`.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self::with_gauges(name, INITIAL_HUNGER, INITIAL_HAPPINESS, now)
    }

    /// Creates a pet with explicit gauges. Values are clamped into range.
    pub fn with_gauges(
        name: impl Into<String>,
        hunger: f64,
        happiness: f64,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            hunger: hunger.clamp(MIN_GAUGE, MAX_GAUGE),
            happiness: happiness.clamp(MIN_GAUGE, MAX_GAUGE),
            last_updated: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw hunger, full precision, as of the last update.
    pub fn hunger(&self) -> f64 {
        self.hunger
    }

    /// Raw happiness, full precision, as of the last update.
    pub fn happiness(&self) -> f64 {
        self.happiness
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Brings the gauges up to `now`.
    ///
    /// A `now` at or before `last_updated` leaves the pet untouched, so a clock
    /// that jumps backwards never rewinds it.
    pub fn apply_decay(&mut self, now: DateTime<Utc>) {
        let elapsed = now - self.last_updated;
        if elapsed <= TimeDelta::zero() {
            if elapsed < TimeDelta::zero() {
                warn!(
                    "Clock moved backwards by {}ms for {}, skipping decay",
                    -elapsed.num_milliseconds(),
                    self.name
                );
            }
            return;
        }

        let elapsed_minutes = minutes_in(elapsed);
        self.hunger = (self.hunger + elapsed_minutes * HUNGER_PER_MINUTE).min(MAX_GAUGE);
        self.happiness =
            (self.happiness - elapsed_minutes * HAPPINESS_LOSS_PER_MINUTE).max(MIN_GAUGE);
        self.last_updated = now;

        debug!(
            "Decayed {} over {:.3} min: hunger={:.3} happiness={:.3}",
            self.name, elapsed_minutes, self.hunger, self.happiness
        );
    }

    /// Feeds the pet. Always succeeds.
    pub fn feed(&mut self, now: DateTime<Utc>) {
        self.apply_decay(now);
        self.hunger = (self.hunger - FEED_HUNGER_RELIEF).max(MIN_GAUGE);
        self.happiness = (self.happiness + FEED_HAPPINESS_BOOST).min(MAX_GAUGE);
    }

    /// Plays with the pet, unless it is too hungry.
    pub fn play(&mut self, now: DateTime<Utc>) -> PlayOutcome {
        self.apply_decay(now);

        if self.hunger >= PLAY_HUNGER_LIMIT {
            return PlayOutcome::TooHungry;
        }

        self.happiness = (self.happiness + PLAY_HAPPINESS_BOOST).min(MAX_GAUGE);
        self.hunger = (self.hunger + PLAY_HUNGER_COST).min(MAX_GAUGE);
        PlayOutcome::Allowed
    }

    /// Mood from the current gauges. Does not decay; callers that need an
    /// up-to-date answer must decay first (as [`Pet::status`] does).
    pub fn mood(&self) -> Mood {
        Mood::classify(self.hunger, self.happiness)
    }

    /// Decays to `now` and returns a display snapshot.
    pub fn status(&mut self, now: DateTime<Utc>) -> PetStatus {
        self.apply_decay(now);
        self.snapshot()
    }

    /// Display snapshot of the current state without decaying.
    pub fn snapshot(&self) -> PetStatus {
        PetStatus {
            name: self.name.clone(),
            hunger: display_gauge(self.hunger),
            happiness: display_gauge(self.happiness),
            mood: self.mood(),
        }
    }
}

/// Fractional minutes in `delta`, at nanosecond resolution. Spans too long to
/// count in nanoseconds (centuries) fall back to milliseconds.
#[allow(clippy::cast_precision_loss)]
fn minutes_in(delta: TimeDelta) -> f64 {
    match delta.num_nanoseconds() {
        Some(nanos) => nanos as f64 / NANOS_PER_MINUTE,
        None => delta.num_milliseconds() as f64 / MILLIS_PER_MINUTE,
    }
}

/// Rounds a gauge for display, half to even.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn display_gauge(value: f64) -> u8 {
    value.clamp(MIN_GAUGE, MAX_GAUGE).round_ties_even() as u8
}
