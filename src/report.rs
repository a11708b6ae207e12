//! Plain-text dumps of a solved layout

use std::fmt::Write;

use crate::engine::{LayoutEngine, RelationStatus, Solver, ViewId};

/// Frames of every view, children indented under their superview
///
/// Views without a superview other than the root are listed after the tree.
pub fn frames(solver: &Solver) -> String {
    let mut out = String::new();
    write_tree(solver, solver.root(), 0, &mut out);
    for view in solver.views() {
        if view != solver.root() && solver.superview(view).is_none() {
            write_tree(solver, view, 0, &mut out);
        }
    }
    out
}

fn write_tree(solver: &Solver, view: ViewId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let name = solver.name(view).unwrap_or("<anon>");
    if let Some(frame) = solver.frame(view) {
        let _ = writeln!(
            out,
            "{}[{}] x={:.1} y={:.1} w={:.1} h={:.1}",
            indent, name, frame.x, frame.y, frame.width, frame.height
        );
    }
    for &child in solver.subviews(view) {
        write_tree(solver, child, depth + 1, out);
    }
}

/// Every activated relation, one per line, with broken ones flagged
pub fn relations(solver: &Solver) -> String {
    let mut out = String::new();
    for active in solver.relations() {
        let _ = match active.status() {
            RelationStatus::Active => writeln!(out, "{}", solver.describe(active.relation())),
            RelationStatus::Broken => {
                writeln!(out, "{} (broken)", solver.describe(active.relation()))
            }
        };
    }
    out
}
