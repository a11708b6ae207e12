//! Pseudo Layout - a fluent builder for view layout relations
//!
//! Views are positioned by declaring relations between their edges, centers
//! and dimensions. The builder turns each call into one or more `Relation`s
//! and hands them to a `LayoutEngine`. `Solver` is a reference engine backed
//! by a Cassowary solver.
//!
//! # Example
//!
//! ```rust
//! use pseudo_layout::{EdgePoint, LayoutEngine, Solver};
//!
//! let mut solver = Solver::new().unwrap();
//! let card = solver.add_subview(solver.root(), "card").unwrap();
//!
//! solver
//!     .constrain(card)
//!     .align_edges_with_superview(&[EdgePoint::Left, EdgePoint::Right], 16.0)?
//!     .align_edge_with_superview_safe_area(EdgePoint::Top, 8.0)?
//!     .height(120.0)?;
//!
//! solver.layout();
//! let frame = solver.frame(card).unwrap();
//! assert!((frame.width - 343.0).abs() < 1e-6);
//! # Ok::<(), pseudo_layout::ConstraintError>(())
//! ```

pub mod builder;
pub mod edge;
pub mod engine;
pub mod error;
pub mod relation;
pub mod report;
pub mod scene;

pub use builder::Constrain;
pub use edge::{Axis, AxisEdge, Dimension, EdgePoint, XEdge, YEdge};
pub use engine::{
    ActiveRelation, EngineError, Frame, LayoutEngine, RelationStatus, Solver, SolverConfig, ViewId,
};
pub use error::ConstraintError;
pub use relation::{Anchor, Comparison, EdgeInsets, Pin, Priority, Relation};
pub use scene::{Scene, SceneError};

/// Load a scene, build it and solve it
///
/// # Example
///
/// ```rust
/// use pseudo_layout::resolve;
///
/// let solver = resolve(r#"
///     [[view]]
///     name = "box"
///
///     [[view.constraint]]
///     op = "align_all_edges_with_superview"
/// "#).unwrap();
///
/// let frame = solver.frame(solver.find("box").unwrap()).unwrap();
/// assert!((frame.width - 375.0).abs() < 1e-6);
/// assert!((frame.height - 667.0).abs() < 1e-6);
/// ```
pub fn resolve(source: &str) -> Result<Solver, SceneError> {
    let scene = Scene::from_str(source)?;
    let mut solver = scene.build()?;
    solver.layout();
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_empty_scene() {
        let solver = resolve("").unwrap();
        let frame = solver.frame(solver.root()).unwrap();
        assert_eq!(frame, Frame::new(0.0, 0.0, 375.0, 667.0));
        assert!(solver.relations().is_empty());
    }

    #[test]
    fn test_resolve_reports_parse_errors() {
        let result = resolve("[[view]]\nname = ");
        assert!(matches!(result, Err(SceneError::Parse(_))));
    }

    #[test]
    fn test_resolve_reports_build_errors() {
        let result = resolve(
            r#"
[[view]]
name = "a"

[[view.constraint]]
op = "align_edge"
edge = "width"
with = "ghost"
"#,
        );
        assert!(matches!(result, Err(SceneError::UnknownView { .. })));
    }
}
