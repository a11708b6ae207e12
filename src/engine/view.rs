//! Views as the solver sees them

use kasuari::{Constraint, Variable};

use crate::relation::EdgeInsets;

use super::ViewId;

/// A resolved rectangle in the root view's coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// Solver variables backing one view
#[derive(Debug, Clone, Copy)]
pub(crate) struct ViewVariables {
    pub x: Variable,
    pub y: Variable,
    pub width: Variable,
    pub height: Variable,
    pub inset_left: Variable,
    pub inset_top: Variable,
    pub inset_right: Variable,
    pub inset_bottom: Variable,
}

impl ViewVariables {
    pub fn new() -> Self {
        Self {
            x: Variable::new(),
            y: Variable::new(),
            width: Variable::new(),
            height: Variable::new(),
            inset_left: Variable::new(),
            inset_top: Variable::new(),
            inset_right: Variable::new(),
            inset_bottom: Variable::new(),
        }
    }
}

/// A node in the solver's view tree
pub(crate) struct ViewNode {
    pub name: String,
    pub superview: Option<ViewId>,
    pub subviews: Vec<ViewId>,
    pub vars: ViewVariables,
    pub safe_area: EdgeInsets,
    /// Pins the inset variables to `safe_area`
    pub safe_area_constraints: Vec<Constraint>,
    pub intrinsic_size: Option<(f64, f64)>,
    pub intrinsic_constraints: Vec<Constraint>,
}

impl ViewNode {
    pub fn new(name: String, superview: Option<ViewId>) -> Self {
        Self {
            name,
            superview,
            subviews: Vec::new(),
            vars: ViewVariables::new(),
            safe_area: EdgeInsets::zero(),
            safe_area_constraints: Vec::new(),
            intrinsic_size: None,
            intrinsic_constraints: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_edges() {
        let frame = Frame::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(frame.right(), 110.0);
        assert_eq!(frame.bottom(), 70.0);
        assert_eq!(frame.center_x(), 60.0);
        assert_eq!(frame.center_y(), 45.0);
    }
}
