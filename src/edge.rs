//! Alignment points and the axis each one lives on
//!
//! `EdgePoint` is the public vocabulary used by every builder call. The
//! dispatcher never matches on it directly: it first classifies a point into
//! one of three closed per-axis sets, so a width can never reach the
//! horizontal anchor lookup and vice versa.

use std::fmt;

use serde::Deserialize;

/// A geometric property of a view that a relation can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePoint {
    Left,
    Right,
    Top,
    Bottom,
    SafeAreaLeft,
    SafeAreaRight,
    SafeAreaTop,
    SafeAreaBottom,
    CenterX,
    CenterY,
    Width,
    Height,
}

/// Which kind of quantity an edge point measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
    Dimensional,
}

/// Horizontal positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XEdge {
    Left,
    Right,
    CenterX,
    SafeAreaLeft,
    SafeAreaRight,
}

/// Vertical positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YEdge {
    Top,
    Bottom,
    CenterY,
    SafeAreaTop,
    SafeAreaBottom,
}

/// Sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Width,
    Height,
}

/// An edge point narrowed to its axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisEdge {
    Horizontal(XEdge),
    Vertical(YEdge),
    Dimensional(Dimension),
}

impl EdgePoint {
    /// Every edge point, in declaration order
    pub const ALL: [EdgePoint; 12] = [
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::SafeAreaLeft,
        Self::SafeAreaRight,
        Self::SafeAreaTop,
        Self::SafeAreaBottom,
        Self::CenterX,
        Self::CenterY,
        Self::Width,
        Self::Height,
    ];

    /// Narrow this point to the closed set of its axis
    pub fn classify(self) -> AxisEdge {
        match self {
            Self::Left => AxisEdge::Horizontal(XEdge::Left),
            Self::Right => AxisEdge::Horizontal(XEdge::Right),
            Self::CenterX => AxisEdge::Horizontal(XEdge::CenterX),
            Self::SafeAreaLeft => AxisEdge::Horizontal(XEdge::SafeAreaLeft),
            Self::SafeAreaRight => AxisEdge::Horizontal(XEdge::SafeAreaRight),
            Self::Top => AxisEdge::Vertical(YEdge::Top),
            Self::Bottom => AxisEdge::Vertical(YEdge::Bottom),
            Self::CenterY => AxisEdge::Vertical(YEdge::CenterY),
            Self::SafeAreaTop => AxisEdge::Vertical(YEdge::SafeAreaTop),
            Self::SafeAreaBottom => AxisEdge::Vertical(YEdge::SafeAreaBottom),
            Self::Width => AxisEdge::Dimensional(Dimension::Width),
            Self::Height => AxisEdge::Dimensional(Dimension::Height),
        }
    }

    pub fn axis(self) -> Axis {
        self.classify().axis()
    }

    /// The safe-area scoped variant of an outer edge
    ///
    /// Centers and dimensions have no safe-area variant and map to themselves.
    pub fn safe_area_counterpart(self) -> Self {
        match self {
            Self::Left | Self::SafeAreaLeft => Self::SafeAreaLeft,
            Self::Top | Self::SafeAreaTop => Self::SafeAreaTop,
            Self::Right | Self::SafeAreaRight => Self::SafeAreaRight,
            Self::Bottom | Self::SafeAreaBottom => Self::SafeAreaBottom,
            Self::CenterX | Self::CenterY | Self::Width | Self::Height => self,
        }
    }

    /// Trailing edges put the other view's anchor on the left-hand side
    pub fn is_trailing(self) -> bool {
        match self.classify() {
            AxisEdge::Horizontal(x) => x.is_trailing(),
            AxisEdge::Vertical(y) => y.is_trailing(),
            AxisEdge::Dimensional(_) => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::SafeAreaLeft => "safeAreaLeft",
            Self::SafeAreaRight => "safeAreaRight",
            Self::SafeAreaTop => "safeAreaTop",
            Self::SafeAreaBottom => "safeAreaBottom",
            Self::CenterX => "centerX",
            Self::CenterY => "centerY",
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for EdgePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
            Axis::Dimensional => "dimensional",
        };
        f.write_str(name)
    }
}

impl AxisEdge {
    pub fn axis(self) -> Axis {
        match self {
            AxisEdge::Horizontal(_) => Axis::Horizontal,
            AxisEdge::Vertical(_) => Axis::Vertical,
            AxisEdge::Dimensional(_) => Axis::Dimensional,
        }
    }
}

impl XEdge {
    pub fn is_trailing(self) -> bool {
        matches!(self, XEdge::Right | XEdge::SafeAreaRight)
    }
}

impl YEdge {
    pub fn is_trailing(self) -> bool {
        matches!(self, YEdge::Bottom | YEdge::SafeAreaBottom)
    }
}

impl From<XEdge> for EdgePoint {
    fn from(edge: XEdge) -> Self {
        match edge {
            XEdge::Left => EdgePoint::Left,
            XEdge::Right => EdgePoint::Right,
            XEdge::CenterX => EdgePoint::CenterX,
            XEdge::SafeAreaLeft => EdgePoint::SafeAreaLeft,
            XEdge::SafeAreaRight => EdgePoint::SafeAreaRight,
        }
    }
}

impl From<YEdge> for EdgePoint {
    fn from(edge: YEdge) -> Self {
        match edge {
            YEdge::Top => EdgePoint::Top,
            YEdge::Bottom => EdgePoint::Bottom,
            YEdge::CenterY => EdgePoint::CenterY,
            YEdge::SafeAreaTop => EdgePoint::SafeAreaTop,
            YEdge::SafeAreaBottom => EdgePoint::SafeAreaBottom,
        }
    }
}

impl From<Dimension> for EdgePoint {
    fn from(dimension: Dimension) -> Self {
        match dimension {
            Dimension::Width => EdgePoint::Width,
            Dimension::Height => EdgePoint::Height,
        }
    }
}

impl From<AxisEdge> for EdgePoint {
    fn from(edge: AxisEdge) -> Self {
        match edge {
            AxisEdge::Horizontal(x) => x.into(),
            AxisEdge::Vertical(y) => y.into(),
            AxisEdge::Dimensional(d) => d.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_is_total() {
        for point in EdgePoint::ALL {
            let axis = point.axis();
            assert!(matches!(
                axis,
                Axis::Horizontal | Axis::Vertical | Axis::Dimensional
            ));
            assert_eq!(axis, point.classify().axis());
        }
    }

    #[test]
    fn test_axis_assignment() {
        assert_eq!(EdgePoint::Left.axis(), Axis::Horizontal);
        assert_eq!(EdgePoint::SafeAreaRight.axis(), Axis::Horizontal);
        assert_eq!(EdgePoint::CenterX.axis(), Axis::Horizontal);
        assert_eq!(EdgePoint::Top.axis(), Axis::Vertical);
        assert_eq!(EdgePoint::SafeAreaBottom.axis(), Axis::Vertical);
        assert_eq!(EdgePoint::CenterY.axis(), Axis::Vertical);
        assert_eq!(EdgePoint::Width.axis(), Axis::Dimensional);
        assert_eq!(EdgePoint::Height.axis(), Axis::Dimensional);
    }

    #[test]
    fn test_classify_round_trips() {
        for point in EdgePoint::ALL {
            assert_eq!(EdgePoint::from(point.classify()), point);
        }
    }

    #[test]
    fn test_safe_area_counterpart() {
        assert_eq!(
            EdgePoint::Left.safe_area_counterpart(),
            EdgePoint::SafeAreaLeft
        );
        assert_eq!(
            EdgePoint::Bottom.safe_area_counterpart(),
            EdgePoint::SafeAreaBottom
        );
        assert_eq!(
            EdgePoint::SafeAreaTop.safe_area_counterpart(),
            EdgePoint::SafeAreaTop
        );
        assert_eq!(EdgePoint::CenterX.safe_area_counterpart(), EdgePoint::CenterX);
        assert_eq!(EdgePoint::Height.safe_area_counterpart(), EdgePoint::Height);
    }

    #[test]
    fn test_safe_area_counterpart_is_idempotent() {
        for point in EdgePoint::ALL {
            let once = point.safe_area_counterpart();
            assert_eq!(once.safe_area_counterpart(), once);
            assert_eq!(once.axis(), point.axis());
        }
    }

    #[test]
    fn test_trailing_edges() {
        let trailing: Vec<_> = EdgePoint::ALL
            .into_iter()
            .filter(|p| p.is_trailing())
            .collect();
        assert_eq!(
            trailing,
            vec![
                EdgePoint::Right,
                EdgePoint::Bottom,
                EdgePoint::SafeAreaRight,
                EdgePoint::SafeAreaBottom
            ]
        );
    }

    #[test]
    fn test_deserialize_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            edge: EdgePoint,
        }
        let w: Wrapper = toml::from_str(r#"edge = "safe_area_left""#).unwrap();
        assert_eq!(w.edge, EdgePoint::SafeAreaLeft);
    }
}
