#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure conversions between screen pixels, map pixels and grid cells.
//!
//! Three spaces are involved. Screen space is what the pointer reports, map
//! space is the unscaled pixel space of the background image, and grid space
//! is the discrete cell lattice laid over the map. Token positions are kept in
//! continuous cell units and converted through the configured [`Anchor`].

use fogmap_core::{Anchor, Cell, GridSpec, Viewport};
use glam::Vec2;

/// Factor applied to the zoom for one zoom-in step.
pub const ZOOM_IN_FACTOR: f32 = 1.1;

/// Factor applied to the zoom for one zoom-out step.
pub const ZOOM_OUT_FACTOR: f32 = 0.9;

/// Token diameter relative to the on-screen cell size.
pub const TOKEN_DIAMETER_RATIO: f32 = 0.8;

/// Converts between the screen, map and grid spaces of a single view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    viewport: Viewport,
    grid: GridSpec,
    anchor: Anchor,
}

impl CoordinateMapper {
    /// Creates a mapper for the provided viewport, grid and token anchor.
    #[must_use]
    pub const fn new(viewport: Viewport, grid: GridSpec, anchor: Anchor) -> Self {
        Self {
            viewport,
            grid,
            anchor,
        }
    }

    /// Viewport the mapper converts through.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Grid the mapper converts through.
    #[must_use]
    pub const fn grid(&self) -> GridSpec {
        self.grid
    }

    /// Converts a screen position into map pixels.
    #[must_use]
    pub fn screen_to_map(&self, screen: Vec2) -> Vec2 {
        (screen - self.viewport.origin()) / self.viewport.zoom() + self.viewport.camera()
    }

    /// Converts map pixels into a screen position.
    #[must_use]
    pub fn map_to_screen(&self, map: Vec2) -> Vec2 {
        (map - self.viewport.camera()) * self.viewport.zoom() + self.viewport.origin()
    }

    /// Cell containing the map position, flooring toward negative infinity.
    ///
    /// Returns `None` when the grid is invalid.
    #[must_use]
    pub fn map_to_cell(&self, map: Vec2) -> Option<Cell> {
        if !self.grid.is_valid() {
            return None;
        }

        let size = self.grid.cell_size();
        Some(Cell::new(floor_div(map.x, size), floor_div(map.y, size)))
    }

    /// Map position of the cell's anchor point.
    ///
    /// Returns `None` when the grid is invalid.
    #[must_use]
    pub fn cell_to_map(&self, cell: Cell) -> Option<Vec2> {
        self.position_to_map(cell.as_vec2())
    }

    /// Map position of the anchor point of a continuous cell-unit position.
    #[must_use]
    pub fn position_to_map(&self, position: Vec2) -> Option<Vec2> {
        if !self.grid.is_valid() {
            return None;
        }

        Some((position + Vec2::splat(self.anchor.offset())) * self.grid.cell_size())
    }

    /// Screen position of the anchor point of a continuous cell-unit position.
    #[must_use]
    pub fn position_to_screen(&self, position: Vec2) -> Option<Vec2> {
        self.position_to_map(position)
            .map(|map| self.map_to_screen(map))
    }

    /// Cell under a screen position.
    #[must_use]
    pub fn screen_to_cell(&self, screen: Vec2) -> Option<Cell> {
        self.map_to_cell(self.screen_to_map(screen))
    }

    /// Reports whether a screen position lies on the token drawn at `position`.
    ///
    /// Tokens are circles whose diameter is the on-screen cell size scaled by
    /// [`TOKEN_DIAMETER_RATIO`], truncated to whole pixels. Nothing is hit
    /// while the grid is invalid.
    #[must_use]
    pub fn token_hit(&self, screen: Vec2, position: Vec2) -> bool {
        let Some(center) = self.position_to_screen(position) else {
            return false;
        };

        let diameter = (self.grid.cell_size() * self.viewport.zoom() * TOKEN_DIAMETER_RATIO).trunc();
        let radius = (diameter / 2.0).floor();
        screen.distance(center) <= radius
    }
}

/// Moves the camera opposite to the pointer travel so the map follows the pointer.
#[must_use]
pub fn pan(viewport: Viewport, delta: Vec2) -> Viewport {
    let camera = viewport.camera() - delta / viewport.zoom();
    viewport.with_camera(camera)
}

/// Zooms one step while keeping the map point under `anchor` fixed on screen.
///
/// When the zoom is already at the relevant bound the viewport is returned
/// unchanged.
#[must_use]
pub fn zoom_at(viewport: Viewport, anchor: Vec2, zoom_in: bool) -> Viewport {
    let factor = if zoom_in {
        ZOOM_IN_FACTOR
    } else {
        ZOOM_OUT_FACTOR
    };
    let old_zoom = viewport.zoom();
    let zoomed = viewport.with_zoom(old_zoom * factor);
    if zoomed.zoom() == old_zoom {
        return viewport;
    }

    let relative = anchor - viewport.origin();
    let map_under_anchor = relative / old_zoom + viewport.camera();
    let camera = map_under_anchor - relative / zoomed.zoom();
    zoomed.with_camera(camera)
}

fn floor_div(value: f32, size: f32) -> i32 {
    let quotient = (value / size).floor();
    if quotient.is_nan() {
        0
    } else {
        // `as` saturates at the i32 bounds.
        quotient as i32
    }
}
