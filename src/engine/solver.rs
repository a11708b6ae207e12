//! Constraint solver integration for the reference layout engine
//!
//! This module wraps the kasuari Cassowary solver. It owns the view tree,
//! translates `Relation`s into the solver's format and reads frames back.

use std::collections::HashMap;

use kasuari::{
    AddConstraintError, Constraint, Expression, Solver as KasuariSolver, Strength,
    Variable as KasuariVariable,
    WeightedRelation::{self, EQ, GE, LE},
};

use crate::edge::{AxisEdge, Dimension, XEdge, YEdge};
use crate::relation::{Anchor, Comparison, EdgeInsets, Priority, Relation};

use super::config::SolverConfig;
use super::view::{Frame, ViewNode};
use super::{EngineError, LayoutEngine, ViewId};

/// Whether the solver is honouring an activated relation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationStatus {
    Active,
    /// Required but unsatisfiable against the relations activated before it
    Broken,
}

/// A relation as registered with the solver
#[derive(Debug, Clone)]
pub struct ActiveRelation {
    relation: Relation,
    status: RelationStatus,
}

impl ActiveRelation {
    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn status(&self) -> RelationStatus {
        self.status
    }

    pub fn is_broken(&self) -> bool {
        self.status == RelationStatus::Broken
    }
}

/// Layout engine backed by kasuari
pub struct Solver {
    solver: KasuariSolver,
    config: SolverConfig,
    views: Vec<ViewNode>,
    relations: Vec<ActiveRelation>,
    /// Pins the root view's frame
    root_constraints: Vec<Constraint>,
    /// Last known value of every variable the solver reported
    values: HashMap<KasuariVariable, f64>,
}

/// Map a priority onto a solver strength
///
/// Required stays required; everything else scales below `STRONG` so the
/// ordering between priorities is preserved.
pub fn strength_for(priority: Priority) -> Strength {
    if priority.is_required() {
        Strength::REQUIRED
    } else {
        Strength::STRONG.mul_f64(f64::from(priority.value()) / 1000.0)
    }
}

fn weighted(comparison: Comparison, strength: Strength) -> WeightedRelation {
    match comparison {
        Comparison::EqualTo => EQ(strength),
        Comparison::GreaterThanOrEqualTo => GE(strength),
        Comparison::LessThanOrEqualTo => LE(strength),
    }
}

impl Solver {
    /// Create a solver with default configuration
    pub fn new() -> Result<Self, EngineError> {
        Self::with_config(SolverConfig::default())
    }

    pub fn with_config(config: SolverConfig) -> Result<Self, EngineError> {
        let mut solver = Self {
            solver: KasuariSolver::new(),
            views: vec![ViewNode::new(config.root_name.clone(), None)],
            config,
            relations: Vec::new(),
            root_constraints: Vec::new(),
            values: HashMap::new(),
        };

        let (width, height) = solver.config.root_size;
        solver.set_root_size(width, height)?;
        let root_safe_area = solver.config.root_safe_area;
        solver.set_safe_area_insets(solver.root(), root_safe_area)?;
        Ok(solver)
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The view every other attached view descends from
    pub fn root(&self) -> ViewId {
        ViewId::new(0)
    }

    /// Add a view inside `parent`
    pub fn add_subview(
        &mut self,
        parent: ViewId,
        name: impl Into<String>,
    ) -> Result<ViewId, EngineError> {
        self.node(parent)?;
        let view = self.push_view(name.into(), Some(parent))?;
        self.views[parent.index()].subviews.push(view);
        Ok(view)
    }

    /// Add a view with no superview
    ///
    /// Superview-relative builder calls on such a view do nothing.
    pub fn add_view(&mut self, name: impl Into<String>) -> Result<ViewId, EngineError> {
        self.push_view(name.into(), None)
    }

    fn push_view(&mut self, name: String, superview: Option<ViewId>) -> Result<ViewId, EngineError> {
        let view = ViewId::new(self.views.len());
        self.views.push(ViewNode::new(name, superview));
        self.set_safe_area_insets(view, EdgeInsets::zero())?;
        log::trace!("added view {} ({})", view, self.display_name(view));
        Ok(view)
    }

    /// Resize the root view
    ///
    /// On error the previous size stays in force.
    pub fn set_root_size(&mut self, width: f64, height: f64) -> Result<(), EngineError> {
        let vars = self.views[0].vars;
        let old = self.root_constraints.clone();
        self.root_constraints = self.replace_pins(
            &old,
            &[(vars.x, 0.0), (vars.y, 0.0), (vars.width, width), (vars.height, height)],
            Strength::REQUIRED,
            "root frame",
        )?;
        self.config.root_size = (width, height);
        Ok(())
    }

    /// Replace a view's safe-area insets
    ///
    /// Relations against safe-area anchors follow the new insets.
    pub fn set_safe_area_insets(
        &mut self,
        view: ViewId,
        insets: EdgeInsets,
    ) -> Result<(), EngineError> {
        let node = self.node(view)?;
        let vars = node.vars;
        let old = node.safe_area_constraints.clone();
        let added = self.replace_pins(
            &old,
            &[
                (vars.inset_left, insets.left),
                (vars.inset_top, insets.top),
                (vars.inset_right, insets.right),
                (vars.inset_bottom, insets.bottom),
            ],
            Strength::REQUIRED,
            "safe area",
        )?;
        let node = &mut self.views[view.index()];
        node.safe_area = insets;
        node.safe_area_constraints = added;
        Ok(())
    }

    /// Prefer a content size for a view, at the configured intrinsic priority
    pub fn set_intrinsic_size(
        &mut self,
        view: ViewId,
        width: f64,
        height: f64,
    ) -> Result<(), EngineError> {
        let node = self.node(view)?;
        let vars = node.vars;
        let old = node.intrinsic_constraints.clone();
        let added = self.replace_pins(
            &old,
            &[(vars.width, width), (vars.height, height)],
            strength_for(self.config.intrinsic_priority),
            "intrinsic size",
        )?;
        let node = &mut self.views[view.index()];
        node.intrinsic_size = Some((width, height));
        node.intrinsic_constraints = added;
        Ok(())
    }

    /// Swap `old` for constraints pinning each variable to its value
    ///
    /// Either every new constraint is in the solver and `old` is gone, or the
    /// solver is left exactly as it was.
    fn replace_pins(
        &mut self,
        old: &[Constraint],
        pairs: &[(KasuariVariable, f64)],
        strength: Strength,
        what: &str,
    ) -> Result<Vec<Constraint>, EngineError> {
        if let Some(&(_, value)) = pairs.iter().find(|(_, value)| !value.is_finite()) {
            return Err(EngineError::NonFiniteValue {
                what: what.to_string(),
                value,
            });
        }

        self.remove_all(old)?;
        match self.pin_values(pairs, strength, what) {
            Ok(added) => Ok(added),
            Err(e) => {
                for constraint in old {
                    self.solver.add_constraint(constraint.clone()).map_err(|restore| {
                        EngineError::Internal(format!("{what}: failed to restore: {restore:?}"))
                    })?;
                }
                log::warn!("keeping previous {what}: {e}");
                Err(e)
            }
        }
    }

    /// Add one constraint per pair, removing the ones already added on failure
    fn pin_values(
        &mut self,
        pairs: &[(KasuariVariable, f64)],
        strength: Strength,
        what: &str,
    ) -> Result<Vec<Constraint>, EngineError> {
        let mut added = Vec::with_capacity(pairs.len());
        for &(variable, value) in pairs {
            let constraint = variable | EQ(strength) | value;
            if let Err(e) = self.solver.add_constraint(constraint.clone()) {
                self.remove_all(&added)?;
                return Err(match e {
                    AddConstraintError::UnsatisfiableConstraint => EngineError::Internal(format!(
                        "cannot satisfy {what}: conflicts with required relations"
                    )),
                    other => EngineError::Internal(format!("{what}: {other:?}")),
                });
            }
            added.push(constraint);
        }
        Ok(added)
    }

    fn remove_all(&mut self, constraints: &[Constraint]) -> Result<(), EngineError> {
        for constraint in constraints {
            self.solver
                .remove_constraint(constraint)
                .map_err(|e| EngineError::Internal(format!("failed to remove constraint: {e:?}")))?;
        }
        Ok(())
    }

    fn node(&self, view: ViewId) -> Result<&ViewNode, EngineError> {
        self.views
            .get(view.index())
            .ok_or(EngineError::UnknownView(view))
    }

    /// Build the solver expression for an anchor
    fn expression(&self, anchor: Anchor) -> Result<Expression, EngineError> {
        let v = self.node(anchor.view)?.vars;
        let expr: Expression = match anchor.point.classify() {
            AxisEdge::Horizontal(edge) => match edge {
                XEdge::Left => v.x.into(),
                XEdge::Right => v.x + v.width,
                XEdge::CenterX => v.x + v.width * 0.5,
                XEdge::SafeAreaLeft => v.x + v.inset_left,
                XEdge::SafeAreaRight => v.x + v.width - v.inset_right,
            },
            AxisEdge::Vertical(edge) => match edge {
                YEdge::Top => v.y.into(),
                YEdge::Bottom => v.y + v.height,
                YEdge::CenterY => v.y + v.height * 0.5,
                YEdge::SafeAreaTop => v.y + v.inset_top,
                YEdge::SafeAreaBottom => v.y + v.height - v.inset_bottom,
            },
            AxisEdge::Dimensional(Dimension::Width) => v.width.into(),
            AxisEdge::Dimensional(Dimension::Height) => v.height.into(),
        };
        Ok(expr)
    }

    /// Pull the latest solution out of the solver
    pub fn layout(&mut self) {
        let mut changed = 0;
        for (variable, value) in self.solver.fetch_changes() {
            self.values.insert(*variable, *value);
            changed += 1;
        }
        log::trace!("layout pass updated {changed} values");
    }

    /// Frame of a view as of the last `layout` call
    pub fn frame(&self, view: ViewId) -> Option<Frame> {
        let vars = self.views.get(view.index())?.vars;
        let value = |variable: KasuariVariable| self.values.get(&variable).copied().unwrap_or(0.0);
        Some(Frame::new(
            value(vars.x),
            value(vars.y),
            value(vars.width),
            value(vars.height),
        ))
    }

    pub fn name(&self, view: ViewId) -> Option<&str> {
        self.views.get(view.index()).map(|n| n.name.as_str())
    }

    /// Look a view up by name
    pub fn find(&self, name: &str) -> Option<ViewId> {
        self.views
            .iter()
            .position(|n| n.name == name)
            .map(ViewId::new)
    }

    pub fn subviews(&self, view: ViewId) -> &[ViewId] {
        self.views
            .get(view.index())
            .map(|n| n.subviews.as_slice())
            .unwrap_or(&[])
    }

    pub fn safe_area_insets(&self, view: ViewId) -> Option<EdgeInsets> {
        self.views.get(view.index()).map(|n| n.safe_area)
    }

    pub fn intrinsic_size(&self, view: ViewId) -> Option<(f64, f64)> {
        self.views.get(view.index()).and_then(|n| n.intrinsic_size)
    }

    /// All views, in creation order
    pub fn views(&self) -> impl Iterator<Item = ViewId> {
        (0..self.views.len()).map(ViewId::new)
    }

    /// Every relation activated so far, in activation order
    pub fn relations(&self) -> &[ActiveRelation] {
        &self.relations
    }

    /// Relations mentioning `view` on either side
    pub fn relations_of(&self, view: ViewId) -> impl Iterator<Item = &ActiveRelation> {
        self.relations
            .iter()
            .filter(move |r| r.relation.involves(view))
    }

    pub fn broken_relations(&self) -> impl Iterator<Item = &ActiveRelation> {
        self.relations.iter().filter(|r| r.is_broken())
    }

    fn display_name(&self, view: ViewId) -> String {
        match self.name(view) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => view.to_string(),
        }
    }

    /// Render a relation using view names
    pub fn describe(&self, relation: &Relation) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = relation.write_with(&mut out, |view| self.display_name(view));
        out
    }
}

impl LayoutEngine for Solver {
    fn superview(&self, view: ViewId) -> Option<ViewId> {
        self.views.get(view.index()).and_then(|n| n.superview)
    }

    fn activate(&mut self, relation: Relation) -> Result<(), EngineError> {
        let first = self.expression(relation.first)?;
        let op = weighted(relation.comparison, strength_for(relation.priority));
        let constraint = match relation.second {
            Some(second) => {
                let rhs = relation.multiplier * self.expression(second)? + relation.constant;
                first | op | rhs
            }
            None => first | op | relation.constant,
        };

        let status = match self.solver.add_constraint(constraint) {
            Ok(()) => {
                log::debug!("activated {}", self.describe(&relation));
                RelationStatus::Active
            }
            Err(AddConstraintError::UnsatisfiableConstraint) => {
                log::warn!(
                    "unable to satisfy {}; breaking it to recover",
                    self.describe(&relation)
                );
                RelationStatus::Broken
            }
            Err(other) => {
                return Err(EngineError::Internal(format!(
                    "{}: {other:?}",
                    self.describe(&relation)
                )))
            }
        };
        self.relations.push(ActiveRelation { relation, status });
        Ok(())
    }
}
