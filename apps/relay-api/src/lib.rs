//! Relay API: HTTP surface forwarding BetterGI notifications to Discord.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

pub use config::RelayConfig;
pub use routes::{relay_router, RelayState};
