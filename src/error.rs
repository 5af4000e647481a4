/*

    Errors surfaced by augmenters to the pipeline.

    All of these are precondition violations. None of them
    is retried or silently corrected.

    @date: 12 Nov, 2025
    @author: bartu
*/

use thiserror::Error;

use crate::numeric::Shape;

#[derive(Debug, Error, PartialEq)]
pub enum AugmentError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("augment called before prepare")]
    Unprepared,

    #[error("volume '{0}' was not part of the last prepare")]
    UnknownKey(String),

    #[error("volume '{0}' is missing from the volume spec")]
    UnknownVolume(String),

    #[error("sample has no array for volume '{0}'")]
    MissingSample(String),

    #[error("volume '{key}' has shape {found:?}, expected spatial shape {expected:?}")]
    ShapeMismatch {
        key: String,
        expected: Shape,
        found: Shape,
    },
}

pub type AugmentResult<T> = Result<T, AugmentError>;
