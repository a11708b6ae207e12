//! The layout engine seam
//!
//! The builder never resolves geometry itself. It hands `Relation`s to a
//! `LayoutEngine`, which owns the view tree and decides how to satisfy them.
//! `Solver` is the engine shipped with this crate, backed by kasuari.

pub mod config;
pub mod solver;
pub mod view;

pub use config::SolverConfig;
pub use solver::{ActiveRelation, RelationStatus, Solver};
pub use view::Frame;

use std::fmt;

use thiserror::Error;

use crate::builder::Constrain;
use crate::relation::Relation;

/// Opaque handle to a view owned by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(usize);

impl ViewId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors reported by a layout engine while activating a relation
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown view {0}")]
    UnknownView(ViewId),

    #[error("{what} must be finite, got {value}")]
    NonFiniteValue { what: String, value: f64 },

    #[error("internal solver error: {0}")]
    Internal(String),
}

/// Everything the builder needs from the platform layout engine
pub trait LayoutEngine {
    /// The containing view, if any
    fn superview(&self, view: ViewId) -> Option<ViewId>;

    /// Make a relation effective
    ///
    /// Conflicts between active relations are the engine's business; an error
    /// here means the relation could not be registered at all.
    fn activate(&mut self, relation: Relation) -> Result<(), EngineError>;

    /// Start a fluent chain of relations on `view`
    fn constrain(&mut self, view: ViewId) -> Constrain<'_, Self>
    where
        Self: Sized,
    {
        Constrain::new(self, view)
    }
}
