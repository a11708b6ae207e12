//! Errors reported by the constraint builder

use thiserror::Error;

use crate::edge::EdgePoint;
use crate::engine::EngineError;
use crate::relation::Pin;

/// Errors that can occur while building relations
#[derive(Debug, Error)]
pub enum ConstraintError {
    /// The two edges of one relation live on different axes
    #[error(
        "cannot relate {first} ({}) to {second} ({}): both edges must share an axis",
        .first.axis(),
        .second.axis()
    )]
    AxisMismatch { first: EdgePoint, second: EdgePoint },

    /// A per-edge offset list does not line up with its edges
    #[error("{edges} edges were given {offsets} offsets")]
    OffsetCountMismatch { edges: usize, offsets: usize },

    /// A constant or multiplier is NaN or infinite
    #[error("{what} must be finite, got {value}")]
    NonFiniteValue { what: &'static str, value: f64 },

    /// The layout engine refused the relation
    #[error("layout engine error: {0}")]
    Engine(#[from] EngineError),
}

impl ConstraintError {
    /// Create an axis mismatch error
    pub fn axis_mismatch(first: EdgePoint, second: EdgePoint) -> Self {
        Self::AxisMismatch { first, second }
    }

    /// Check that the constant and multiplier of `pin` are real numbers
    pub fn check_finite(pin: &Pin) -> Result<(), Self> {
        for (what, value) in [("constant", pin.constant), ("multiplier", pin.multiplier)] {
            if !value.is_finite() {
                return Err(Self::NonFiniteValue { what, value });
            }
        }
        Ok(())
    }

    /// Check that every edge has exactly one offset
    pub fn check_offsets(edges: &[EdgePoint], offsets: &[f64]) -> Result<(), Self> {
        if edges.len() == offsets.len() {
            Ok(())
        } else {
            Err(Self::OffsetCountMismatch {
                edges: edges.len(),
                offsets: offsets.len(),
            })
        }
    }
}
