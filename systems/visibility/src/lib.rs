#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Discretised line of sight and the circular visibility field built on it.
//!
//! The field is always recomputed wholesale: every candidate cell inside the
//! radius is traced from the origin with integer Bresenham stepping and is
//! visible unless a wall lies strictly between the origin and the candidate.

mod cache;

pub use cache::VisibilityCache;

use fogmap_core::{Cell, GridSpec, VisibleSet, WallSet};

/// Iterator over the cells crossed by a straight segment, origin first.
///
/// Stepping is integer-only Bresenham. Both endpoints are produced and the
/// sequence holds one cell per unit step along the major axis.
#[derive(Clone, Debug)]
pub struct LineIter {
    x: i32,
    y: i32,
    target: Cell,
    dx: i64,
    dy: i64,
    sx: i32,
    sy: i32,
    err: i64,
    finished: bool,
}

impl LineIter {
    /// Starts a trace from `origin` toward `target`.
    #[must_use]
    pub fn new(origin: Cell, target: Cell) -> Self {
        let dx = (i64::from(target.x()) - i64::from(origin.x())).abs();
        let dy = (i64::from(target.y()) - i64::from(origin.y())).abs();
        Self {
            x: origin.x(),
            y: origin.y(),
            target,
            dx,
            dy,
            sx: step_toward(origin.x(), target.x()),
            sy: step_toward(origin.y(), target.y()),
            err: dx - dy,
            finished: false,
        }
    }
}

impl Iterator for LineIter {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.finished {
            return None;
        }

        let current = Cell::new(self.x, self.y);
        if current == self.target {
            self.finished = true;
            return Some(current);
        }

        let doubled = 2 * self.err;
        if doubled > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if doubled < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

fn step_toward(from: i32, to: i32) -> i32 {
    match to.cmp(&from) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Ordered cells crossed by the segment from `origin` to `target`.
///
/// The trace depends on the direction of travel, so `trace(a, b)` need not be
/// the reverse of `trace(b, a)`; both contain `max(dx, dy) + 1` cells.
#[must_use]
pub fn trace(origin: Cell, target: Cell) -> Vec<Cell> {
    let span = origin
        .x()
        .abs_diff(target.x())
        .max(origin.y().abs_diff(target.y()));
    let mut cells = Vec::with_capacity(usize::try_from(span).unwrap_or(0).saturating_add(1));
    cells.extend(LineIter::new(origin, target));
    cells
}

/// Reports whether `target` can be seen from `origin`.
///
/// Walls strictly between the endpoints block sight. A wall on `target`
/// itself does not: the blocking wall is visible, what lies behind it is not.
#[must_use]
pub fn has_line_of_sight(origin: Cell, target: Cell, walls: &WallSet) -> bool {
    for cell in LineIter::new(origin, target).skip(1) {
        if cell == target {
            return true;
        }
        if walls.contains(cell) {
            return false;
        }
    }
    true
}

/// Computes every cell visible from `origin` within `radius` cells.
///
/// The origin is always visible, even when walled in. Candidates come from
/// the square `[-floor(radius), floor(radius)]` around the origin, are
/// dropped when outside the grid (only while the grid is valid) or further
/// than `radius` by Euclidean distance, and are kept when
/// [`has_line_of_sight`] holds. A negative or non-finite radius yields only
/// the origin.
#[must_use]
pub fn compute(origin: Cell, radius: f32, walls: &WallSet, grid: &GridSpec) -> VisibleSet {
    let mut visible = VisibleSet::new();
    let _ = visible.insert(origin);

    if !radius.is_finite() || radius < 0.0 {
        return visible;
    }

    let reach = radius.floor().min(i32::MAX as f32) as i32;
    let radius_squared = f64::from(radius) * f64::from(radius);
    let bounded = grid.is_valid();

    for dx in -reach..=reach {
        for dy in -reach..=reach {
            let distance_squared = i64::from(dx) * i64::from(dx) + i64::from(dy) * i64::from(dy);
            if distance_squared as f64 > radius_squared {
                continue;
            }

            let candidate = origin.offset(dx, dy);
            if bounded && !grid.contains(candidate) {
                continue;
            }

            if has_line_of_sight(origin, candidate, walls) {
                let _ = visible.insert(candidate);
            }
        }
    }

    visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_to_self_is_single_cell() {
        let cell = Cell::new(-3, 7);
        assert_eq!(trace(cell, cell), vec![cell]);
    }

    #[test]
    fn trace_follows_reference_stepping() {
        assert_eq!(
            trace(Cell::new(0, 0), Cell::new(4, 2)),
            vec![
                Cell::new(0, 0),
                Cell::new(1, 0),
                Cell::new(2, 1),
                Cell::new(3, 1),
                Cell::new(4, 2),
            ]
        );
    }

    #[test]
    fn trace_handles_negative_directions() {
        assert_eq!(
            trace(Cell::new(0, 0), Cell::new(-2, -3)),
            vec![
                Cell::new(0, 0),
                Cell::new(-1, -1),
                Cell::new(-1, -2),
                Cell::new(-2, -3),
            ]
        );
    }

    #[test]
    fn wall_on_target_remains_visible() {
        let walls = WallSet::from_cells([Cell::new(3, 0)]);
        assert!(has_line_of_sight(Cell::new(0, 0), Cell::new(3, 0), &walls));
        assert!(!has_line_of_sight(Cell::new(0, 0), Cell::new(4, 0), &walls));
    }

    #[test]
    fn negative_radius_only_sees_origin() {
        let origin = Cell::new(2, 2);
        let field = compute(origin, -1.0, &WallSet::new(), &GridSpec::new(500, 500, 50.0));
        assert_eq!(field.sorted(), vec![origin]);
    }
}
