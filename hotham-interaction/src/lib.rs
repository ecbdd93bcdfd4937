#![deny(missing_docs)]

//! G'day, and welcome to Hotham Interaction! 👋
//!
//! This crate lets players pick things up in VR. Each hand can grab objects it is close to, or
//! point at objects across the room and pull them in. Objects that can be grabbed are outlined so
//! the player knows what's on offer.
//!
//! # How it fits together
//! Like the rest of Hotham, everything lives in a [`hecs::World`]:
//!
//! - [`components::Grabbable`] marks an entity as something a hand can pick up.
//! - [`components::Hand`] is a controller that can grab things.
//! - The [`contexts::GrabbableRegistry`] and [`contexts::HandRegistry`] track which of those are
//!   currently active.
//! - [`systems`] are run once per tick, in order, to select, grab, move and highlight.
//!
//! The physics engine ([`rapier3d`]) answers the questions we can't: ray casts, collider bounds,
//! contacts and the simulation of anything that isn't being held.

pub use engine::{Engine, EngineBuilder, GrabEvent};
pub use glam;
pub use hecs;
pub use interaction_error::InteractionError;
pub use rapier3d;

/// Components are data that are used to update the simulation and interact with the external world
pub mod components;
/// Settings that can be loaded from JSON
pub mod config;
/// Contexts are wrappers around some external state that the systems will interact with
pub mod contexts;
mod engine;
mod interaction_error;
/// Systems are functions called each frame to update either the external state or the current simulation
pub mod systems;
/// Kitchen sink utility functions
pub mod util;

/// Hotham Interaction result type
pub type InteractionResult<T> = std::result::Result<T, InteractionError>;
