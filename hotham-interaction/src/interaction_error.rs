use hecs::{ComponentError, Entity, NoSuchEntity};
use thiserror::Error;

/// Everything that can go wrong while interacting with the world
#[derive(Error, Debug)]
pub enum InteractionError {
    /// An entity was missing a component we needed
    #[error("The entity was missing a required component")]
    ComponentError(#[from] ComponentError),
    /// The entity has been despawned
    #[error("The entity does not exist")]
    NoSuchEntity(#[from] NoSuchEntity),
    /// A rapier handle didn't point at anything
    #[error("No {kind} exists for the handle given")]
    InvalidHandle {
        /// What kind of handle was it?
        kind: &'static str,
    },
    /// Two parties disagree about who is holding what. This is fatal.
    #[error("Ownership of {entity:?} is inconsistent: {reason}")]
    OwnershipViolation {
        /// The grabbable entity in question
        entity: Entity,
        /// What was inconsistent
        reason: String,
    },
    /// The configuration could not be parsed
    #[error("Unable to parse configuration")]
    ConfigError(#[from] serde_json::Error),
    /// Catch-all
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
