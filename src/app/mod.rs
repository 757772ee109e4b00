//! Application layer - orchestration and shared state.

mod check;
mod engine;
mod state;

pub use check::run_checks;
pub use engine::{DisplayPhase, PollEngine};
pub use state::AppState;

use std::sync::Arc;

use crate::adapter::console::ConsoleScreen;
use crate::adapter::lnbits::LnbitsClient;
use crate::adapter::worldtime::WorldTimeClient;
use crate::config::Config;
use crate::error::Result;
use crate::port::{RateSource, Screen, TimeSource, WalletBackend};

/// Main application struct.
pub struct App;

impl App {
    /// Wire the adapters to the engine and run it until cancelled.
    ///
    /// The configuration has already been validated by this point; every
    /// error the engine meets from here on is recoverable and handled by
    /// its retry machinery.
    pub async fn run(config: Config, state: Arc<AppState>) -> Result<()> {
        let config = Arc::new(config);

        let client = Arc::new(LnbitsClient::from_config(&config));
        let wallet: Arc<dyn WalletBackend> = client.clone();
        let rates: Arc<dyn RateSource> = client;
        let screen: Arc<dyn Screen> = Arc::new(ConsoleScreen::from_config(&config));
        let time_source: Option<Arc<dyn TimeSource>> = WorldTimeClient::from_config(&config)
            .map(|client| Arc::new(client) as Arc<dyn TimeSource>);

        let mut engine = PollEngine::new(config, wallet, rates, time_source, screen, state);
        engine.run().await
    }
}
