//! Generic actor framework for session-scoped resources.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that resource types implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns entities and serializes every mutation
//! - [`ResourceClient`] - Type-safe handle for sending requests and subscribing to changes
//! - [`ResourceEvent`] - Change notification published after each state change
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod client;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::{ResourceClient, WeakResourceClient};
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceEvent, ResourceRequest, Response};
