#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Smooth interpolation of tokens toward grid-aligned targets.
//!
//! A token is either idle or moving. Moving tokens advance by a fixed
//! distance per step and snap onto their target once the remaining distance
//! drops below one step, so they never overshoot.

mod clock;

pub use clock::Animator;

use fogmap_core::{Cell, TokenId, TokenSnapshot};
use glam::Vec2;

/// Remaining distance, in cells, at which an advancing token counts as arrived.
pub const ARRIVAL_EPSILON: f32 = 1e-5;

/// Movable marker placed on the map.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    id: TokenId,
    position: Vec2,
    target: Vec2,
    speed: f32,
    moving: bool,
    selected: bool,
}

impl Token {
    /// Creates an idle token resting on `cell`.
    #[must_use]
    pub fn new(id: TokenId, cell: Cell, speed: f32) -> Self {
        let position = cell.as_vec2();
        Self {
            id,
            position,
            target: position,
            speed,
            moving: false,
            selected: false,
        }
    }

    /// Identifier of the token.
    #[must_use]
    pub fn id(&self) -> &TokenId {
        &self.id
    }

    /// Continuous position measured in cells.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Destination measured in cells. Equals the position while idle.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Distance travelled per step, in cells.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Reports whether the token is travelling toward its target.
    #[must_use]
    pub const fn is_moving(&self) -> bool {
        self.moving
    }

    /// Reports whether the token is selected.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.selected
    }

    /// Marks the token as selected or not.
    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Cell nearest to the current position.
    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::nearest(self.position)
    }

    /// Captures an immutable snapshot for queries and frames.
    #[must_use]
    pub fn snapshot(&self) -> TokenSnapshot {
        TokenSnapshot {
            id: self.id.clone(),
            position: self.position,
            target: self.target,
            speed: self.speed,
            moving: self.moving,
            selected: self.selected,
        }
    }
}

/// Result of a single animation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The token was already idle and did not move.
    Idle,
    /// The token moved and is still travelling.
    Advanced,
    /// The token reached its target during this step and is now idle.
    Arrived,
}

impl StepOutcome {
    /// Reports whether the position changed during the step.
    #[must_use]
    pub const fn moved(self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// Starts moving the token toward `cell`.
///
/// Returns `false`, leaving the token idle, when it already rests on the
/// target. A moving token is redirected.
pub fn assign_target(token: &mut Token, cell: Cell) -> bool {
    let target = cell.as_vec2();
    if token.position == target {
        token.target = target;
        token.moving = false;
        return false;
    }

    token.target = target;
    token.moving = true;
    true
}

/// Advances the token by one step.
///
/// A token with a non-positive or non-finite speed snaps straight onto its
/// target.
pub fn step(token: &mut Token) -> StepOutcome {
    if !token.moving {
        return StepOutcome::Idle;
    }

    let delta = token.target - token.position;
    let distance = delta.length();
    let speed_is_usable = token.speed.is_finite() && token.speed > 0.0;
    if !speed_is_usable || distance < token.speed {
        return arrive(token);
    }

    token.position += delta / distance * token.speed;
    if token.position.distance(token.target) <= ARRIVAL_EPSILON {
        return arrive(token);
    }

    StepOutcome::Advanced
}

fn arrive(token: &mut Token) -> StepOutcome {
    token.position = token.target;
    token.moving = false;
    StepOutcome::Arrived
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_at(x: i32, y: i32, speed: f32) -> Token {
        Token::new(TokenId::new("scout"), Cell::new(x, y), speed)
    }

    #[test]
    fn assigning_current_cell_keeps_token_idle() {
        let mut token = token_at(2, 2, 0.5);
        assert!(!assign_target(&mut token, Cell::new(2, 2)));
        assert!(!token.is_moving());
        assert_eq!(step(&mut token), StepOutcome::Idle);
    }

    #[test]
    fn zero_speed_snaps_instead_of_stalling() {
        let mut token = token_at(0, 0, 0.0);
        assert!(assign_target(&mut token, Cell::new(4, 1)));
        assert_eq!(step(&mut token), StepOutcome::Arrived);
        assert_eq!(token.position(), Vec2::new(4.0, 1.0));
    }

    #[test]
    fn retargeting_redirects_moving_token() {
        let mut token = token_at(0, 0, 1.0);
        assert!(assign_target(&mut token, Cell::new(5, 0)));
        assert_eq!(step(&mut token), StepOutcome::Advanced);
        assert!(assign_target(&mut token, Cell::new(1, 3)));
        assert_eq!(token.target(), Vec2::new(1.0, 3.0));
        assert!(token.is_moving());
    }

    #[test]
    fn snapshot_reflects_selection_and_motion() {
        let mut token = token_at(1, 1, 0.25);
        token.set_selected(true);
        let _ = assign_target(&mut token, Cell::new(2, 1));
        let snapshot = token.snapshot();
        assert!(snapshot.selected);
        assert!(snapshot.moving);
        assert_eq!(snapshot.cell(), Cell::new(1, 1));
    }
}
