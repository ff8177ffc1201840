use thiserror::Error;

/// Errors raised when constructing simulation objects
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("invalid mass {mass}: mass must be finite and greater than zero")]
    InvalidMass { mass: f32 },

    #[error("invalid radius {radius}: radius must be finite and greater than zero")]
    InvalidRadius { radius: f32 },
}
