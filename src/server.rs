//! HTTP surface for the pet.
//!
//! Three routes, no request bodies, permissive CORS. Each handler takes the pet
//! lock once and runs decay, action and snapshot inside that one critical
//! section, so concurrent requests never interleave their read-modify-write.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

use crate::config::ServerConfig;
use crate::errors::{PetError, Result};
use crate::pet::{Clock, Pet, SystemClock};
use crate::types::{PetStatus, PlayResponse};

/// Shared handle to the one pet owned by the process.
///
/// Cheap to clone; every clone points at the same pet.
#[derive(Clone)]
pub struct PetService {
    pet: Arc<Mutex<Pet>>,
    clock: Arc<dyn Clock>,
    version: String,
    start_time: Instant,
}

impl PetService {
    /// Service backed by the system clock
    pub fn new(pet_name: impl Into<String>) -> Self {
        Self::with_clock(pet_name, Arc::new(SystemClock))
    }

    /// Service backed by an arbitrary clock. The pet is born at `clock.now()`.
    pub fn with_clock(pet_name: impl Into<String>, clock: Arc<dyn Clock>) -> Self {
        let pet = Pet::new(pet_name, clock.now());
        info!("Created pet {}", pet.name());
        Self {
            pet: Arc::new(Mutex::new(pet)),
            clock,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: Instant::now(),
        }
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Current status, decay applied.
    pub async fn status(&self) -> PetStatus {
        let mut pet = self.pet.lock().await;
        let now = self.clock.now();
        pet.status(now)
    }

    /// Feed, then report status.
    pub async fn feed(&self) -> PetStatus {
        let mut pet = self.pet.lock().await;
        let now = self.clock.now();
        pet.feed(now);
        let status = pet.status(now);
        info!(
            "Fed {}: hunger={} happiness={} mood={}",
            status.name, status.hunger, status.happiness, status.mood
        );
        status
    }

    /// Try to play, then report status and whether play happened.
    pub async fn play(&self) -> PlayResponse {
        let mut pet = self.pet.lock().await;
        let now = self.clock.now();
        let outcome = pet.play(now);
        let response = PlayResponse::new(pet.status(now), outcome);
        if response.action_allowed {
            info!(
                "Played with {}: hunger={} happiness={}",
                response.status.name, response.status.hunger, response.status.happiness
            );
        } else {
            info!(
                "{} is too hungry to play (hunger={})",
                response.status.name, response.status.hunger
            );
        }
        response
    }
}

async fn get_status(State(service): State<PetService>) -> Json<PetStatus> {
    debug!("GET /status");
    Json(service.status().await)
}

async fn feed_pet(State(service): State<PetService>) -> Json<PetStatus> {
    debug!("POST /feed");
    Json(service.feed().await)
}

async fn play_pet(State(service): State<PetService>) -> Json<PlayResponse> {
    debug!("POST /play");
    Json(service.play().await)
}

/// Build the router with CORS open to every origin, method and header.
pub fn router(service: PetService) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/status", get(get_status))
        .route("/feed", post(feed_pet))
        .route("/play", post(play_pet))
        .layer(cors)
        .with_state(service)
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, service: PetService, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(service))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Bind according to `config` and serve until Ctrl-C.
pub async fn start_pet_server(config: ServerConfig) -> Result<()> {
    config.validate()?;
    let addr = config.socket_addr()?;

    let listener = TcpListener::bind(addr).await.map_err(|e| PetError::Bind {
        addr: Arc::new(addr.to_string()),
        source: e,
    })?;
    let local = listener.local_addr()?;

    let service = PetService::new(config.pet_name);
    info!(
        "nova-pet {} listening on http://{}",
        service.version(),
        local
    );

    serve(listener, service.clone(), shutdown_signal()).await?;
    info!("Server stopped after {}s", service.uptime().as_secs());
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
