//! Satwatch - Lightning wallet balance watcher and display.
//!
//! This crate polls an LNbits wallet for its balance on a fixed interval,
//! converts it to fiat when a currency is configured, and renders the
//! result through a pluggable screen, staying useful across network
//! failures by falling back to the cached balance with a staleness marker.
//!
//! # Architecture
//!
//! Hexagonal: the engine talks to every external collaborator through a
//! port, and adapters implement the ports.
//!
//! - **`domain`** - balance, exchange-rate, clock, and formatting types;
//!   pure logic, no I/O
//! - **`port`** - traits for the wallet backend, rate source, time source,
//!   and screen
//! - **`adapter`** - LNbits REST client, worldtime client, console screen
//! - **`app`** - the poll engine / display state machine and its wiring
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML with placeholder-sentinel
//!   detection and validation
//! - [`domain`] - Backend-agnostic types: balances, rates, formatting
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for external collaborators
//! - [`adapter`] - Implementations of the ports
//! - [`app`] - Application orchestration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use satwatch::app::{App, AppState};
//! use satwatch::config::Config;
//!
//! # async fn run() -> satwatch::error::Result<()> {
//! let config = Config::load("satwatch.toml")?;
//! config.init_logging();
//!
//! let state = Arc::new(AppState::new());
//! App::run(config, state).await
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
