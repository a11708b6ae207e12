//! Scene files: views and their relations declared in TOML
//!
//! A scene names the root view's geometry, then lists views in order. Each
//! view carries the builder operations to run against it:
//!
//! ```toml
//! [root]
//! width = 390.0
//! height = 844.0
//! safe_area = { top = 47.0, bottom = 34.0 }
//!
//! [[view]]
//! name = "heading"
//! intrinsic_size = [146.0, 19.0]
//!
//! [[view.constraint]]
//! op = "align_edge_with_superview_safe_area"
//! edge = "top"
//! constant = 45.0
//! ```

use std::collections::HashMap;
use std::ops::Range;
use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Deserialize;
use thiserror::Error;
use toml::Spanned;

use crate::edge::EdgePoint;
use crate::engine::{EngineError, LayoutEngine, Solver, SolverConfig, ViewId};
use crate::error::ConstraintError;
use crate::relation::{Comparison, EdgeInsets, Pin, Priority};

/// Byte range in the scene source
pub type Span = Range<usize>;

/// Errors that can occur when loading or building a scene
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("failed to read scene file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse scene TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate view '{name}'")]
    DuplicateView { name: String, span: Span },

    #[error("unknown parent '{name}' (parents must be declared before their subviews)")]
    UnknownParent { name: String, span: Span },

    #[error("detached view '{name}' cannot have a parent")]
    DetachedWithParent { name: String, span: Span },

    #[error("view '{view}' refers to unknown view '{name}'")]
    UnknownView {
        view: String,
        name: String,
        span: Span,
    },

    #[error("view '{view}': {source}")]
    Constraint {
        view: String,
        source: ConstraintError,
    },

    #[error("layout engine error: {0}")]
    Engine(#[from] EngineError),
}

impl SceneError {
    /// Get the source span if available
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Parse(e) => e.span(),
            Self::DuplicateView { span, .. }
            | Self::UnknownParent { span, .. }
            | Self::DetachedWithParent { span, .. }
            | Self::UnknownView { span, .. } => Some(span.clone()),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let Some(span) = self.span() else {
            return format!("Error: {self}");
        };
        let message = match self {
            Self::Parse(e) => e.message().to_string(),
            other => other.to_string(),
        };

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(&message)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => format!("Error: {self}"),
        }
    }
}

/// A complete scene
#[derive(Debug, Clone, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub root: RootSpec,

    #[serde(default, rename = "view")]
    pub views: Vec<ViewSpec>,
}

/// Geometry of the root view
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RootSpec {
    pub name: String,
    pub width: f64,
    pub height: f64,
    pub safe_area: EdgeInsets,
}

impl Default for RootSpec {
    fn default() -> Self {
        let config = SolverConfig::default();
        Self {
            name: config.root_name,
            width: config.root_size.0,
            height: config.root_size.1,
            safe_area: config.root_safe_area,
        }
    }
}

/// One view and the operations to run against it
#[derive(Debug, Clone, Deserialize)]
pub struct ViewSpec {
    pub name: Spanned<String>,

    /// Containing view; the root when omitted
    #[serde(default)]
    pub parent: Option<Spanned<String>>,

    /// Leave the view outside the tree, with no superview
    #[serde(default)]
    pub detached: bool,

    #[serde(default)]
    pub intrinsic_size: Option<(f64, f64)>,

    #[serde(default)]
    pub safe_area: Option<EdgeInsets>,

    #[serde(default, rename = "constraint")]
    pub constraints: Vec<Spanned<Operation>>,
}

/// Comparison, constant, multiplier and priority of one operation
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PinSpec {
    pub relation: Comparison,
    pub constant: f64,
    pub multiplier: f64,
    pub priority: Priority,
}

impl Default for PinSpec {
    fn default() -> Self {
        let pin = Pin::default();
        Self {
            relation: pin.comparison,
            constant: pin.constant,
            multiplier: pin.multiplier,
            priority: pin.priority,
        }
    }
}

impl From<PinSpec> for Pin {
    fn from(spec: PinSpec) -> Self {
        Pin::new()
            .with_comparison(spec.relation)
            .with_constant(spec.constant)
            .with_multiplier(spec.multiplier)
            .with_priority(spec.priority)
    }
}

/// A builder call, tagged by `op`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    Pin {
        edge: EdgePoint,
        to: EdgePoint,
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignEdge {
        edge: EdgePoint,
        with: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignEdges {
        edges: Vec<EdgePoint>,
        with: String,
        #[serde(default)]
        offsets: Option<Vec<f64>>,
        #[serde(flatten)]
        pin: PinSpec,
    },
    Width {
        #[serde(flatten)]
        pin: PinSpec,
    },
    Height {
        #[serde(flatten)]
        pin: PinSpec,
    },
    WidthTo {
        to: EdgePoint,
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    HeightTo {
        to: EdgePoint,
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    CenterInSuperview {
        #[serde(default)]
        priority: Priority,
    },
    CenterHorizontallyInSuperview {
        #[serde(default)]
        priority: Priority,
    },
    CenterVerticallyInSuperview {
        #[serde(default)]
        priority: Priority,
    },
    AlignEdgeWithSuperview {
        edge: EdgePoint,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignEdgeWithSuperviewSafeArea {
        edge: EdgePoint,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignAllEdgesWithSuperview {
        #[serde(default)]
        insets: EdgeInsets,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignEdgesWithSuperview {
        edges: Vec<EdgePoint>,
        #[serde(default)]
        offsets: Option<Vec<f64>>,
        #[serde(flatten)]
        pin: PinSpec,
    },
    ToLeftOf {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    ToRightOf {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    Above {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    Below {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    CenterHorizontallyWith {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    CenterVerticallyWith {
        of: String,
        #[serde(flatten)]
        pin: PinSpec,
    },
    AlignCenterWith {
        of: String,
        #[serde(default)]
        priority: Priority,
    },
}

impl Scene {
    /// Load a scene from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a scene from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SceneError> {
        Ok(toml::from_str(content)?)
    }

    /// Solver configuration described by the `[root]` table
    pub fn config(&self) -> SolverConfig {
        SolverConfig::new()
            .with_root_name(self.root.name.clone())
            .with_root_size(self.root.width, self.root.height)
            .with_root_safe_area(self.root.safe_area)
    }

    /// Create every view, then run every operation in declaration order
    pub fn build(&self) -> Result<Solver, SceneError> {
        let mut solver = Solver::with_config(self.config())?;
        let mut ids: HashMap<&str, ViewId> = HashMap::new();
        ids.insert(self.root.name.as_str(), solver.root());

        for spec in &self.views {
            let name = spec.name.get_ref().as_str();
            if ids.contains_key(name) {
                return Err(SceneError::DuplicateView {
                    name: name.to_string(),
                    span: spec.name.span(),
                });
            }

            let view = if spec.detached {
                if let Some(parent) = &spec.parent {
                    return Err(SceneError::DetachedWithParent {
                        name: name.to_string(),
                        span: parent.span(),
                    });
                }
                solver.add_view(name)?
            } else {
                let parent = match &spec.parent {
                    Some(parent) => *ids.get(parent.get_ref().as_str()).ok_or_else(|| {
                        SceneError::UnknownParent {
                            name: parent.get_ref().clone(),
                            span: parent.span(),
                        }
                    })?,
                    None => solver.root(),
                };
                solver.add_subview(parent, name)?
            };

            if let Some((width, height)) = spec.intrinsic_size {
                solver.set_intrinsic_size(view, width, height)?;
            }
            if let Some(insets) = spec.safe_area {
                solver.set_safe_area_insets(view, insets)?;
            }
            ids.insert(name, view);
        }

        for spec in &self.views {
            let name = spec.name.get_ref().as_str();
            let view = ids[name];
            let lookup = |target: &str| {
                ids.get(target)
                    .copied()
                    .ok_or_else(|| ApplyError::UnknownView(target.to_string()))
            };
            for op in &spec.constraints {
                apply(&mut solver, view, op.get_ref(), &lookup).map_err(|e| match e {
                    ApplyError::UnknownView(target) => SceneError::UnknownView {
                        view: name.to_string(),
                        name: target,
                        span: op.span(),
                    },
                    ApplyError::Constraint(source) => SceneError::Constraint {
                        view: name.to_string(),
                        source,
                    },
                })?;
            }
        }

        log::debug!(
            "built scene with {} views and {} relations",
            self.views.len(),
            solver.relations().len()
        );
        Ok(solver)
    }
}

enum ApplyError {
    UnknownView(String),
    Constraint(ConstraintError),
}

impl From<ConstraintError> for ApplyError {
    fn from(e: ConstraintError) -> Self {
        ApplyError::Constraint(e)
    }
}

fn apply<F>(solver: &mut Solver, view: ViewId, op: &Operation, lookup: &F) -> Result<(), ApplyError>
where
    F: Fn(&str) -> Result<ViewId, ApplyError>,
{
    let chain = solver.constrain(view);
    match op {
        Operation::Pin { edge, to, of, pin } => chain.pin(*edge, *to, lookup(of)?, *pin)?,
        Operation::AlignEdge { edge, with, pin } => chain.align_edge(*edge, lookup(with)?, *pin)?,
        Operation::AlignEdges {
            edges,
            with,
            offsets,
            pin,
        } => {
            let other = lookup(with)?;
            match offsets {
                Some(offsets) => chain.align_edges_with_offsets(edges, other, offsets, *pin)?,
                None => chain.align_edges(edges, other, *pin)?,
            }
        }
        Operation::Width { pin } => chain.width(*pin)?,
        Operation::Height { pin } => chain.height(*pin)?,
        Operation::WidthTo { to, of, pin } => chain.width_to(*to, lookup(of)?, *pin)?,
        Operation::HeightTo { to, of, pin } => chain.height_to(*to, lookup(of)?, *pin)?,
        Operation::CenterInSuperview { priority } => chain.center_in_superview(*priority)?,
        Operation::CenterHorizontallyInSuperview { priority } => {
            chain.center_horizontally_in_superview(*priority)?
        }
        Operation::CenterVerticallyInSuperview { priority } => {
            chain.center_vertically_in_superview(*priority)?
        }
        Operation::AlignEdgeWithSuperview { edge, pin } => {
            chain.align_edge_with_superview(*edge, *pin)?
        }
        Operation::AlignEdgeWithSuperviewSafeArea { edge, pin } => {
            chain.align_edge_with_superview_safe_area(*edge, *pin)?
        }
        Operation::AlignAllEdgesWithSuperview { insets, pin } => {
            chain.align_all_edges_with_superview(*insets, *pin)?
        }
        Operation::AlignEdgesWithSuperview {
            edges,
            offsets,
            pin,
        } => match offsets {
            Some(offsets) => chain.align_edges_with_superview_offsets(edges, offsets, *pin)?,
            None => chain.align_edges_with_superview(edges, *pin)?,
        },
        Operation::ToLeftOf { of, pin } => chain.to_left_of(lookup(of)?, *pin)?,
        Operation::ToRightOf { of, pin } => chain.to_right_of(lookup(of)?, *pin)?,
        Operation::Above { of, pin } => chain.above(lookup(of)?, *pin)?,
        Operation::Below { of, pin } => chain.below(lookup(of)?, *pin)?,
        Operation::CenterHorizontallyWith { of, pin } => {
            chain.center_horizontally_with(lookup(of)?, *pin)?
        }
        Operation::CenterVerticallyWith { of, pin } => {
            chain.center_vertically_with(lookup(of)?, *pin)?
        }
        Operation::AlignCenterWith { of, priority } => {
            chain.align_center_with(lookup(of)?, *priority)?
        }
    };
    Ok(())
}
