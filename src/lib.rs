//! # Nova Pet
//!
//! A tiny digital pet served over HTTP. The pet's hunger and happiness drift
//! with real elapsed time and respond to two actions, feeding and playing.
//! State lives in memory only and is brought up to date lazily on each request.

pub mod config;
pub mod errors;
pub mod pet;
pub mod server;
pub mod types;

pub use config::ServerConfig;
pub use errors::{PetError, Result};
pub use pet::{Clock, ManualClock, Mood, Pet, SystemClock};
pub use server::{router, serve, start_pet_server, PetService};
pub use types::{PetStatus, PlayOutcome, PlayResponse};
