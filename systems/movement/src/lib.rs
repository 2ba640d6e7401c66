#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Move validation and the per-turn movement budget.
//!
//! Every requested move is checked against the map bounds, the wall set and
//! the remaining budget, in that order. Validation is pure: tokens are never
//! touched here, callers decide what to do with the verdict.

use fogmap_core::{Cell, GridSpec, MoveRejection, WallSet};

/// Verdict for a prospective destination, used to draw drag previews.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePreview {
    /// Destination cell under consideration.
    pub cell: Cell,
    /// Manhattan distance from the token's current cell.
    pub cost: u32,
    /// Reason the move would be refused, if any.
    pub rejection: Option<MoveRejection>,
}

impl MovePreview {
    /// Reports whether the move would be accepted.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.rejection.is_none()
    }
}

/// Checks whether a token standing on `from` may move to `target`.
///
/// While the grid is invalid the map bounds are unknown and the target only
/// has to lie inside `[0, fallback_bound)` on both axes. Wall rejection takes
/// precedence over the budget.
pub fn check(
    from: Cell,
    target: Cell,
    walls: &WallSet,
    grid: &GridSpec,
    remaining: u32,
    fallback_bound: i32,
) -> Result<(), MoveRejection> {
    if !in_bounds(target, grid, fallback_bound) {
        return Err(MoveRejection::OutOfBounds);
    }

    if walls.contains(target) {
        return Err(MoveRejection::WallBlocked);
    }

    let required = from.manhattan_distance(target);
    if required > remaining {
        return Err(MoveRejection::InsufficientBudget {
            required,
            remaining,
        });
    }

    Ok(())
}

/// Boolean form of [`check`].
#[must_use]
pub fn validate(
    from: Cell,
    target: Cell,
    walls: &WallSet,
    grid: &GridSpec,
    remaining: u32,
    fallback_bound: i32,
) -> bool {
    check(from, target, walls, grid, remaining, fallback_bound).is_ok()
}

/// Evaluates a move without committing to it.
#[must_use]
pub fn preview(
    from: Cell,
    target: Cell,
    walls: &WallSet,
    grid: &GridSpec,
    remaining: u32,
    fallback_bound: i32,
) -> MovePreview {
    MovePreview {
        cell: target,
        cost: from.manhattan_distance(target),
        rejection: check(from, target, walls, grid, remaining, fallback_bound).err(),
    }
}

fn in_bounds(target: Cell, grid: &GridSpec, fallback_bound: i32) -> bool {
    if grid.is_valid() {
        return grid.contains(target);
    }

    (0..fallback_bound).contains(&target.x()) && (0..fallback_bound).contains(&target.y())
}

/// Movement points available during the current turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovementBudget {
    total: u32,
    used: u32,
}

impl MovementBudget {
    /// Creates a fresh budget with nothing spent.
    #[must_use]
    pub const fn new(total: u32) -> Self {
        Self { total, used: 0 }
    }

    /// Points granted per turn.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.total
    }

    /// Points spent so far this turn.
    #[must_use]
    pub const fn used(&self) -> u32 {
        self.used
    }

    /// Points still available.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.used)
    }

    /// Spends `cost` points. Spending never exceeds the total.
    pub fn charge(&mut self, cost: u32) {
        self.used = self.used.saturating_add(cost).min(self.total);
    }

    /// Starts a new turn.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Changes the per-turn total. Lowering it below the spent points starts a
    /// new turn.
    pub fn set_total(&mut self, total: u32) {
        self.total = total;
        if self.used > total {
            self.used = 0;
        }
    }
}

impl Default for MovementBudget {
    fn default() -> Self {
        Self::new(5)
    }
}
