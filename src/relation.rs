//! Relations handed to the layout engine, and the options that shape them

use std::fmt;

use serde::Deserialize;

use crate::edge::EdgePoint;
use crate::engine::ViewId;

/// Relational operator of a relation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    #[default]
    #[serde(alias = "==", alias = "equal")]
    EqualTo,
    #[serde(alias = ">=", alias = "at_least")]
    GreaterThanOrEqualTo,
    #[serde(alias = "<=", alias = "at_most")]
    LessThanOrEqualTo,
}

impl Comparison {
    pub fn symbol(self) -> &'static str {
        match self {
            Comparison::EqualTo => "==",
            Comparison::GreaterThanOrEqualTo => ">=",
            Comparison::LessThanOrEqualTo => "<=",
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Strength of a relation, from 1 (weakest) to 1000 (required)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize)]
#[serde(from = "f32")]
pub struct Priority(f32);

impl Priority {
    pub const REQUIRED: Priority = Priority(1000.0);
    pub const HIGH: Priority = Priority(750.0);
    pub const LOW: Priority = Priority(250.0);
    pub const FITTING: Priority = Priority(50.0);

    /// Create a priority, clamped to `1..=1000`
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::REQUIRED;
        }
        Self(value.clamp(1.0, 1000.0))
    }

    pub fn value(self) -> f32 {
        self.0
    }

    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl From<f32> for Priority {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-side insets, used for superview alignment and safe areas
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct EdgeInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl EdgeInsets {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn uniform(inset: f64) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Options for a single builder call
///
/// A bare `f64` converts into an equal, required pin with that constant, so
/// the common case reads `view.below(other, 15.0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub comparison: Comparison,
    pub constant: f64,
    /// Only applied to dimensional relations
    pub multiplier: f64,
    pub priority: Priority,
}

impl Default for Pin {
    fn default() -> Self {
        Self {
            comparison: Comparison::EqualTo,
            constant: 0.0,
            multiplier: 1.0,
            priority: Priority::REQUIRED,
        }
    }
}

impl Pin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equal(constant: f64) -> Self {
        Self::default().with_constant(constant)
    }

    pub fn at_least(constant: f64) -> Self {
        Self::equal(constant).with_comparison(Comparison::GreaterThanOrEqualTo)
    }

    pub fn at_most(constant: f64) -> Self {
        Self::equal(constant).with_comparison(Comparison::LessThanOrEqualTo)
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_constant(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    pub fn with_multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_priority(mut self, priority: impl Into<Priority>) -> Self {
        self.priority = priority.into();
        self
    }
}

impl From<f64> for Pin {
    fn from(constant: f64) -> Self {
        Self::equal(constant)
    }
}

impl From<Comparison> for Pin {
    fn from(comparison: Comparison) -> Self {
        Self::default().with_comparison(comparison)
    }
}

/// One geometric property of one view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Anchor {
    pub view: ViewId,
    pub point: EdgePoint,
}

impl Anchor {
    pub fn new(view: ViewId, point: EdgePoint) -> Self {
        Self { view, point }
    }
}

/// `first <comparison> multiplier * second + constant`
///
/// Without a second anchor the relation reads `first <comparison> constant`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Relation {
    pub first: Anchor,
    pub comparison: Comparison,
    pub second: Option<Anchor>,
    pub multiplier: f64,
    pub constant: f64,
    pub priority: Priority,
}

impl Relation {
    /// Relation between two anchors
    pub fn between(first: Anchor, second: Anchor, pin: Pin) -> Self {
        Self {
            first,
            comparison: pin.comparison,
            second: Some(second),
            multiplier: pin.multiplier,
            constant: pin.constant,
            priority: pin.priority,
        }
    }

    /// Relation between an anchor and a fixed value
    pub fn constant(first: Anchor, pin: Pin) -> Self {
        Self {
            first,
            comparison: pin.comparison,
            second: None,
            multiplier: 1.0,
            constant: pin.constant,
            priority: pin.priority,
        }
    }

    /// Whether the relation mentions the given view on either side
    pub fn involves(&self, view: ViewId) -> bool {
        self.first.view == view || self.second.is_some_and(|a| a.view == view)
    }

    /// Write the relation, naming views with `name`
    pub fn write_with<W, F>(&self, out: &mut W, name: F) -> fmt::Result
    where
        W: fmt::Write,
        F: Fn(ViewId) -> String,
    {
        write!(
            out,
            "{}.{} {} ",
            name(self.first.view),
            self.first.point,
            self.comparison
        )?;
        match self.second {
            Some(second) => {
                if self.multiplier != 1.0 {
                    write!(out, "{} * ", self.multiplier)?;
                }
                write!(out, "{}.{}", name(second.view), second.point)?;
                if self.constant > 0.0 {
                    write!(out, " + {}", self.constant)?;
                } else if self.constant < 0.0 {
                    write!(out, " - {}", -self.constant)?;
                }
            }
            None => write!(out, "{}", self.constant)?,
        }
        if !self.priority.is_required() {
            write!(out, " @{}", self.priority)?;
        }
        Ok(())
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_with(f, |view| view.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_clamps() {
        assert_eq!(Priority::new(5000.0), Priority::REQUIRED);
        assert_eq!(Priority::new(-3.0).value(), 1.0);
        assert_eq!(Priority::new(f32::NAN), Priority::REQUIRED);
        assert!(Priority::REQUIRED.is_required());
        assert!(!Priority::HIGH.is_required());
    }

    #[test]
    fn test_pin_defaults() {
        let pin = Pin::default();
        assert_eq!(pin.comparison, Comparison::EqualTo);
        assert_eq!(pin.constant, 0.0);
        assert_eq!(pin.multiplier, 1.0);
        assert_eq!(pin.priority, Priority::REQUIRED);
    }

    #[test]
    fn test_pin_builder_pattern() {
        let pin = Pin::at_least(8.0)
            .with_multiplier(0.5)
            .with_priority(Priority::LOW);
        assert_eq!(pin.comparison, Comparison::GreaterThanOrEqualTo);
        assert_eq!(pin.constant, 8.0);
        assert_eq!(pin.multiplier, 0.5);
        assert_eq!(pin.priority, Priority::LOW);

        let from_float: Pin = 12.0.into();
        assert_eq!(from_float, Pin::equal(12.0));
    }

    #[test]
    fn test_relation_display() {
        let a = ViewId::new(1);
        let b = ViewId::new(2);
        let rel = Relation::between(
            Anchor::new(a, EdgePoint::Top),
            Anchor::new(b, EdgePoint::Bottom),
            Pin::equal(15.0),
        );
        assert_eq!(rel.to_string(), "#1.top == #2.bottom + 15");

        let rel = Relation::between(
            Anchor::new(a, EdgePoint::Width),
            Anchor::new(b, EdgePoint::Height),
            Pin::at_most(-4.0)
                .with_multiplier(0.5)
                .with_priority(Priority::HIGH),
        );
        assert_eq!(rel.to_string(), "#1.width <= 0.5 * #2.height - 4 @750");

        let rel = Relation::constant(Anchor::new(a, EdgePoint::Height), Pin::at_least(44.0));
        assert_eq!(rel.to_string(), "#1.height >= 44");
    }

    #[test]
    fn test_relation_involves() {
        let a = ViewId::new(1);
        let b = ViewId::new(2);
        let rel = Relation::between(
            Anchor::new(a, EdgePoint::Left),
            Anchor::new(b, EdgePoint::Left),
            Pin::default(),
        );
        assert!(rel.involves(a));
        assert!(rel.involves(b));
        assert!(!rel.involves(ViewId::new(3)));
    }

    #[test]
    fn test_comparison_aliases() {
        #[derive(Deserialize)]
        struct Wrapper {
            relation: Comparison,
        }
        let w: Wrapper = toml::from_str(r#"relation = ">=""#).unwrap();
        assert_eq!(w.relation, Comparison::GreaterThanOrEqualTo);
        let w: Wrapper = toml::from_str(r#"relation = "less_than_or_equal_to""#).unwrap();
        assert_eq!(w.relation, Comparison::LessThanOrEqualTo);
    }
}
