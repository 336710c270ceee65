pub mod app_state;
pub mod config;
pub mod domain;
pub mod router;
pub(crate) mod routes;
pub mod telemetry;
