//! Application Configuration Module
//!
//! Server, storage and NASA settings loaded from TOML with environment
//! overrides.
//!
//! ## Loading Order
//!
//! 1. `IMPACT_SIM_CONFIG` environment variable (path to TOML file)
//! 2. `impact_sim.toml` in the current working directory
//! 3. Built-in defaults
//!
//! Then `NASA_API_KEY`, `NASA_API_BASE_URL`, `IMPACT_SIM_ADDR`,
//! `IMPACT_SIM_CORS_ORIGINS`, `IMPACT_SIM_STORE` and `IMPACT_SIM_DATA_PATH`
//! override whatever the file said.
//!
//! ## Usage
//!
//! ```ignore
//! let _ = dotenvy::dotenv();
//! let mut config = AppConfig::load();
//! config.validate()?;
//! config::bootstrap_api_key(&mut config.nasa, interactive, Path::new(".env"));
//! ```

mod api_key;
mod app_config;
pub mod defaults;

pub use api_key::{bootstrap_api_key, persist_env_var, prompt_for_api_key};
pub use app_config::*;
