use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::chat::transcript::{ChatSession, SharedChat};
use crate::config::Config;
use crate::dashboard::controller::{DashboardController, SharedDashboard};
use crate::interview::session::InterviewSession;
use crate::interview::timer::SharedSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Static content, loaded once at startup and never mutated.
    pub catalog: Arc<Catalog>,
    /// Single RNG for section sub-scores and question draws. Seeded from
    /// `RNG_SEED` when set, otherwise from OS entropy.
    pub rng: Arc<Mutex<StdRng>>,
    pub dashboard: SharedDashboard,
    pub interview: SharedSession,
    pub chat: SharedChat,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<Catalog>) -> Self {
        let rng = match config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng: Arc::new(Mutex::new(rng)),
            dashboard: Arc::new(Mutex::new(DashboardController::new())),
            interview: Arc::new(Mutex::new(InterviewSession::new(Arc::clone(&catalog)))),
            chat: Arc::new(Mutex::new(ChatSession::new(catalog.chat.greeting.clone()))),
            catalog,
            config,
        }
    }
}

#[cfg(test)]
impl AppState {
    /// Built-in catalog, fixed seed, default timings.
    pub fn for_tests() -> Self {
        let config = Config {
            rng_seed: Some(42),
            ..Config::default()
        };
        Self::new(config, Arc::new(Catalog::builtin().unwrap()))
    }
}
