//! Fluent relation builder
//!
//! A `Constrain` borrows an engine and names one view. Every call builds one
//! or more relations with that view on one side, activates them, and hands
//! the same `Constrain` back so calls can be chained with `?`:
//!
//! ```rust
//! use pseudo_layout::{EdgePoint, LayoutEngine, Priority, Solver};
//!
//! let mut solver = Solver::new().unwrap();
//! let heading = solver.add_subview(solver.root(), "heading").unwrap();
//! let details = solver.add_subview(solver.root(), "details").unwrap();
//!
//! solver
//!     .constrain(details)
//!     .below(heading, 15.0)?
//!     .center_horizontally_in_superview(Priority::REQUIRED)?
//!     .align_edge_with_superview_safe_area(EdgePoint::Left, 25.0)?;
//!
//! assert_eq!(solver.relations().len(), 3);
//! # Ok::<(), pseudo_layout::ConstraintError>(())
//! ```

mod facade;

use crate::edge::{AxisEdge, EdgePoint};
use crate::engine::{LayoutEngine, ViewId};
use crate::error::ConstraintError;
use crate::relation::{Anchor, Pin, Relation};

/// A view plus the engine its relations are activated on
pub struct Constrain<'e, E: LayoutEngine + ?Sized> {
    engine: &'e mut E,
    view: ViewId,
}

impl<'e, E: LayoutEngine + ?Sized> Constrain<'e, E> {
    pub fn new(engine: &'e mut E, view: ViewId) -> Self {
        Self { engine, view }
    }

    /// The view relations are being built for
    pub fn view(&self) -> ViewId {
        self.view
    }

    pub fn superview(&self) -> Option<ViewId> {
        self.engine.superview(self.view)
    }

    /// Relate `edge` of this view to `to` of `other`
    ///
    /// Both edges must share an axis, and the constant and multiplier must be
    /// finite. For positional edges the relation reads
    /// `self.edge <cmp> other.to + constant`, except when `edge` is a trailing
    /// edge (right or bottom, plain or safe-area): then the sides swap to
    /// `other.to <cmp> self.edge + constant`, so a positive constant always
    /// insets this view. Dimensional relations never swap and are the only
    /// ones that honour the multiplier.
    pub fn pin(
        self,
        edge: EdgePoint,
        to: EdgePoint,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        ConstraintError::check_finite(&pin)?;
        let own = Anchor::new(self.view, edge);
        let theirs = Anchor::new(other, to);

        let relation = match (edge.classify(), to.classify()) {
            (AxisEdge::Horizontal(x), AxisEdge::Horizontal(_)) => {
                positional(own, theirs, x.is_trailing(), pin)
            }
            (AxisEdge::Vertical(y), AxisEdge::Vertical(_)) => {
                positional(own, theirs, y.is_trailing(), pin)
            }
            (AxisEdge::Dimensional(_), AxisEdge::Dimensional(_)) => {
                Relation::between(own, theirs, pin)
            }
            _ => return Err(ConstraintError::axis_mismatch(edge, to)),
        };
        self.activate(relation)
    }

    fn activate(self, relation: Relation) -> Result<Self, ConstraintError> {
        self.engine.activate(relation)?;
        Ok(self)
    }

    /// Run `op` against the superview, or do nothing when there is none
    fn with_superview<F>(self, op: &str, f: F) -> Result<Self, ConstraintError>
    where
        F: FnOnce(Self, ViewId) -> Result<Self, ConstraintError>,
    {
        match self.superview() {
            Some(superview) => f(self, superview),
            None => {
                log::debug!("{} has no superview, skipping {op}", self.view);
                Ok(self)
            }
        }
    }
}

fn positional(own: Anchor, theirs: Anchor, trailing: bool, pin: Pin) -> Relation {
    let pin = pin.with_multiplier(1.0);
    if trailing {
        Relation::between(theirs, own, pin)
    } else {
        Relation::between(own, theirs, pin)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::edge::Axis;
    use crate::engine::{EngineError, Solver};
    use crate::relation::{Comparison, Priority};

    fn two_views() -> (Solver, ViewId, ViewId) {
        let mut solver = Solver::new().unwrap();
        let a = solver.add_subview(solver.root(), "a").unwrap();
        let b = solver.add_subview(solver.root(), "b").unwrap();
        (solver, a, b)
    }

    fn last(solver: &Solver) -> Relation {
        *solver.relations().last().unwrap().relation()
    }

    #[test]
    fn test_pin_returns_same_view_and_adds_one_relation() {
        let modes = [
            Comparison::EqualTo,
            Comparison::GreaterThanOrEqualTo,
            Comparison::LessThanOrEqualTo,
        ];
        let (mut solver, a, b) = two_views();
        let mut expected = 0;

        for edge in EdgePoint::ALL {
            for to in EdgePoint::ALL.into_iter().filter(|p| p.axis() == edge.axis()) {
                for mode in modes {
                    let chain = solver
                        .constrain(a)
                        .pin(edge, to, b, Pin::from(mode).with_priority(Priority::LOW))
                        .unwrap();
                    assert_eq!(chain.view(), a);
                    expected += 1;
                    assert_eq!(solver.relations().len(), expected);
                    assert_eq!(last(&solver).comparison, mode);
                }
            }
        }
    }

    #[test]
    fn test_leading_edges_keep_self_on_the_left() {
        for edge in [
            EdgePoint::Left,
            EdgePoint::Top,
            EdgePoint::SafeAreaLeft,
            EdgePoint::SafeAreaTop,
            EdgePoint::CenterX,
            EdgePoint::CenterY,
        ] {
            let (mut solver, a, b) = two_views();
            solver.constrain(a).pin(edge, edge, b, 10.0).unwrap();

            let rel = last(&solver);
            assert_eq!(rel.first, Anchor::new(a, edge));
            assert_eq!(rel.second, Some(Anchor::new(b, edge)));
            assert_eq!(rel.constant, 10.0);
        }
    }

    #[test]
    fn test_trailing_edges_put_other_view_on_the_left() {
        for edge in [
            EdgePoint::Right,
            EdgePoint::Bottom,
            EdgePoint::SafeAreaRight,
            EdgePoint::SafeAreaBottom,
        ] {
            let (mut solver, a, b) = two_views();
            solver.constrain(a).pin(edge, edge, b, 10.0).unwrap();

            let rel = last(&solver);
            assert_eq!(rel.first, Anchor::new(b, edge));
            assert_eq!(rel.second, Some(Anchor::new(a, edge)));
            assert_eq!(rel.constant, 10.0);
        }
    }

    #[test]
    fn test_multiplier_only_applies_to_dimensions() {
        let (mut solver, a, b) = two_views();
        let pin = Pin::equal(4.0).with_multiplier(0.5);

        solver
            .constrain(a)
            .pin(EdgePoint::Width, EdgePoint::Height, b, pin)
            .unwrap();
        let rel = last(&solver);
        assert_eq!(rel.first, Anchor::new(a, EdgePoint::Width));
        assert_eq!(rel.second, Some(Anchor::new(b, EdgePoint::Height)));
        assert_eq!(rel.multiplier, 0.5);

        solver
            .constrain(a)
            .pin(EdgePoint::Left, EdgePoint::Right, b, pin)
            .unwrap();
        assert_eq!(last(&solver).multiplier, 1.0);
    }

    #[test]
    fn test_cross_axis_pin_is_rejected() {
        let (mut solver, a, b) = two_views();

        for edge in EdgePoint::ALL {
            for to in EdgePoint::ALL.into_iter().filter(|p| p.axis() != edge.axis()) {
                let result = solver.constrain(a).pin(edge, to, b, 0.0);
                match result {
                    Err(ConstraintError::AxisMismatch { first, second }) => {
                        assert_eq!((first, second), (edge, to));
                    }
                    Err(other) => panic!("expected AxisMismatch, got {other:?}"),
                    Ok(_) => panic!("{edge} -> {to} should have been rejected"),
                }
            }
        }
        assert!(solver.relations().is_empty());
    }

    #[test]
    fn test_cross_axis_error_names_axes() {
        let (mut solver, a, b) = two_views();
        let err = solver
            .constrain(a)
            .pin(EdgePoint::Width, EdgePoint::CenterY, b, 0.0)
            .err()
            .unwrap();
        assert_eq!(EdgePoint::Width.axis(), Axis::Dimensional);
        assert!(err.to_string().contains("dimensional"));
        assert!(err.to_string().contains("vertical"));
    }

    #[test]
    fn test_engine_errors_propagate() {
        let (mut solver, a, _) = two_views();
        let ghost = ViewId::new(99);
        let err = solver
            .constrain(a)
            .align_edge(EdgePoint::Left, ghost, 0.0)
            .err()
            .unwrap();
        assert!(matches!(
            err,
            ConstraintError::Engine(EngineError::UnknownView(v)) if v == ghost
        ));
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let (mut solver, a, b) = two_views();

        let err = solver
            .constrain(a)
            .pin(EdgePoint::Left, EdgePoint::Left, b, f64::NAN)
            .err()
            .unwrap();
        assert!(matches!(err, ConstraintError::NonFiniteValue { what: "constant", .. }));

        let pin = Pin::equal(0.0).with_multiplier(f64::NEG_INFINITY);
        let err = solver
            .constrain(a)
            .pin(EdgePoint::Width, EdgePoint::Width, b, pin)
            .err()
            .unwrap();
        assert!(matches!(err, ConstraintError::NonFiniteValue { what: "multiplier", .. }));

        assert!(solver.relations().is_empty());
    }
}
