//! Core library for the `weather-lookup` tool.
//!
//! This crate defines:
//! - The weather snapshot model and its display category
//! - Strict mapping of provider payloads into snapshots
//! - The OpenWeather provider client
//! - The lookup controller that owns form state and the snapshot store
//! - Configuration handling
//!
//! It is used by `weather-lookup-cli`, but holds no terminal code, so other
//! front-ends can drive the same controller.

pub mod category;
pub mod config;
pub mod controller;
pub mod mapper;
pub mod model;
pub mod provider;
pub mod store;

pub use category::Category;
pub use config::Config;
pub use controller::{LookupController, LookupOutcome, PendingLookup, SubmitError};
pub use mapper::MappingError;
pub use model::{LookupState, LookupStatus, WeatherSnapshot};
pub use provider::{LookupError, OpenWeatherProvider, WeatherProvider, provider_from_config};
pub use store::SnapshotStore;
