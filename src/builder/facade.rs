//! Convenience operations composed from `Constrain::pin`

use crate::edge::EdgePoint;
use crate::engine::{LayoutEngine, ViewId};
use crate::error::ConstraintError;
use crate::relation::{Anchor, EdgeInsets, Pin, Priority, Relation};

use super::Constrain;

impl<'e, E: LayoutEngine + ?Sized> Constrain<'e, E> {
    // ------------------------------------------------------------------
    // Edges against another view
    // ------------------------------------------------------------------

    /// Align `edge` with the same edge of `other`
    pub fn align_edge(
        self,
        edge: EdgePoint,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        self.pin(edge, edge, other, pin)
    }

    /// Align several edges with `other`, all with the same constant
    pub fn align_edges(
        self,
        edges: &[EdgePoint],
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        edges
            .iter()
            .try_fold(self, |chain, &edge| chain.align_edge(edge, other, pin))
    }

    /// Align several edges with `other`, the i-th edge using the i-th offset
    ///
    /// The constant of `pin` is replaced by each offset. Nothing is activated
    /// unless there is exactly one finite offset per edge.
    pub fn align_edges_with_offsets(
        self,
        edges: &[EdgePoint],
        other: ViewId,
        offsets: &[f64],
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        ConstraintError::check_offsets(edges, offsets)?;
        let pin = pin.into();
        for &offset in offsets {
            ConstraintError::check_finite(&pin.with_constant(offset))?;
        }
        edges
            .iter()
            .zip(offsets)
            .try_fold(self, |chain, (&edge, &offset)| {
                chain.align_edge(edge, other, pin.with_constant(offset))
            })
    }

    // ------------------------------------------------------------------
    // Dimensions
    // ------------------------------------------------------------------

    /// Relate the width to the constant of `pin`
    pub fn width(self, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        ConstraintError::check_finite(&pin)?;
        let anchor = Anchor::new(self.view, EdgePoint::Width);
        self.activate(Relation::constant(anchor, pin))
    }

    /// Relate the height to the constant of `pin`
    pub fn height(self, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        ConstraintError::check_finite(&pin)?;
        let anchor = Anchor::new(self.view, EdgePoint::Height);
        self.activate(Relation::constant(anchor, pin))
    }

    /// Relate the width to a dimension of `other`, scaled by the multiplier
    pub fn width_to(
        self,
        point: EdgePoint,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Width, point, other, pin)
    }

    /// Relate the height to a dimension of `other`, scaled by the multiplier
    pub fn height_to(
        self,
        point: EdgePoint,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Height, point, other, pin)
    }

    // ------------------------------------------------------------------
    // Superview
    // ------------------------------------------------------------------

    /// Center in the superview; does nothing without one
    pub fn center_in_superview(self, priority: Priority) -> Result<Self, ConstraintError> {
        self.with_superview("center_in_superview", |chain, superview| {
            chain.align_center_with(superview, priority)
        })
    }

    pub fn center_horizontally_in_superview(
        self,
        priority: Priority,
    ) -> Result<Self, ConstraintError> {
        self.with_superview("center_horizontally_in_superview", |chain, superview| {
            chain.center_horizontally_with(superview, Pin::new().with_priority(priority))
        })
    }

    pub fn center_vertically_in_superview(
        self,
        priority: Priority,
    ) -> Result<Self, ConstraintError> {
        self.with_superview("center_vertically_in_superview", |chain, superview| {
            chain.center_vertically_with(superview, Pin::new().with_priority(priority))
        })
    }

    /// Align `edge` with the same edge of the superview
    pub fn align_edge_with_superview(
        self,
        edge: EdgePoint,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        self.with_superview("align_edge_with_superview", |chain, superview| {
            chain.align_edge(edge, superview, pin)
        })
    }

    /// Align `edge` with the superview's safe-area counterpart of that edge
    pub fn align_edge_with_superview_safe_area(
        self,
        edge: EdgePoint,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        self.with_superview("align_edge_with_superview_safe_area", |chain, superview| {
            chain.pin(edge, edge.safe_area_counterpart(), superview, pin)
        })
    }

    /// Align left, top, right and bottom with the superview, each inset by
    /// its side of `insets`
    pub fn align_all_edges_with_superview(
        self,
        insets: EdgeInsets,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        self.with_superview("align_all_edges_with_superview", |chain, superview| {
            for inset in [insets.left, insets.top, insets.right, insets.bottom] {
                ConstraintError::check_finite(&pin.with_constant(inset))?;
            }
            chain
                .align_edge(EdgePoint::Left, superview, pin.with_constant(insets.left))?
                .align_edge(EdgePoint::Top, superview, pin.with_constant(insets.top))?
                .align_edge(EdgePoint::Right, superview, pin.with_constant(insets.right))?
                .align_edge(EdgePoint::Bottom, superview, pin.with_constant(insets.bottom))
        })
    }

    pub fn align_edges_with_superview(
        self,
        edges: &[EdgePoint],
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        self.with_superview("align_edges_with_superview", |chain, superview| {
            chain.align_edges(edges, superview, pin)
        })
    }

    pub fn align_edges_with_superview_offsets(
        self,
        edges: &[EdgePoint],
        offsets: &[f64],
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        let pin = pin.into();
        self.with_superview("align_edges_with_superview_offsets", |chain, superview| {
            chain.align_edges_with_offsets(edges, superview, offsets, pin)
        })
    }

    // ------------------------------------------------------------------
    // Adjacent views
    // ------------------------------------------------------------------

    /// Place this view's right edge against `other`'s left edge
    pub fn to_left_of(self, other: ViewId, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Right, EdgePoint::Left, other, pin)
    }

    /// Place this view's left edge against `other`'s right edge
    pub fn to_right_of(self, other: ViewId, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Left, EdgePoint::Right, other, pin)
    }

    /// Place this view's bottom edge against `other`'s top edge
    pub fn above(self, other: ViewId, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Bottom, EdgePoint::Top, other, pin)
    }

    /// Place this view's top edge against `other`'s bottom edge
    pub fn below(self, other: ViewId, pin: impl Into<Pin>) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::Top, EdgePoint::Bottom, other, pin)
    }

    // ------------------------------------------------------------------
    // Centers
    // ------------------------------------------------------------------

    pub fn center_horizontally_with(
        self,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::CenterX, EdgePoint::CenterX, other, pin)
    }

    pub fn center_vertically_with(
        self,
        other: ViewId,
        pin: impl Into<Pin>,
    ) -> Result<Self, ConstraintError> {
        self.pin(EdgePoint::CenterY, EdgePoint::CenterY, other, pin)
    }

    /// Align both centers with `other`, which need not be the superview
    pub fn align_center_with(
        self,
        other: ViewId,
        priority: Priority,
    ) -> Result<Self, ConstraintError> {
        let pin = Pin::new().with_priority(priority);
        self.center_horizontally_with(other, pin)?
            .center_vertically_with(other, pin)
    }
}
