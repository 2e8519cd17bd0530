//! Orchestration: configuration, startup and shutdown of the storefront, and logging setup.

pub mod config;
pub mod storefront_system;
pub mod tracing;

pub use config::*;
pub use storefront_system::*;
pub use self::tracing::setup_tracing;
