#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Fogmap engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative session, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the session executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values describing what
//! actually changed. Systems are pure functions over the value types declared
//! here: cells, wall sets, grid specifications and viewports.

use std::{collections::HashSet, fmt, time::Duration};

use glam::Vec2;
use serde::{Deserialize, Serialize};

mod config;
mod source;

pub use config::{ConfigError, SessionConfig};
pub use source::{MapDimensions, MapId, MapSource, MapSourceError};

/// Smallest zoom factor a viewport accepts unless configured otherwise.
pub const DEFAULT_MIN_ZOOM: f32 = 0.25;

/// Largest zoom factor a viewport accepts unless configured otherwise.
pub const DEFAULT_MAX_ZOOM: f32 = 3.0;

/// Identifier of the token whose position drives the fog of war by default.
pub const DEFAULT_VISION_SOURCE: &str = "player_1";

/// Kind recorded for a location placed without one.
pub const DEFAULT_LOCATION_KIND: &str = "generic";

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Advances the animation clock by the provided delta time.
    Tick {
        /// Duration of wall-clock time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that the selected token step one cell in the given direction.
    ///
    /// Each component is reduced to its sign, so only `-1`, `0` and `1` matter.
    DirectionalInput {
        /// Horizontal component of the requested step.
        dx: i32,
        /// Vertical component of the requested step.
        dy: i32,
    },
    /// Routes a pointer interaction expressed in screen pixels.
    Pointer {
        /// Pointer location in screen pixels.
        screen: Vec2,
        /// Kind of pointer interaction that occurred.
        command: PointerCommand,
    },
    /// Selects the token with the provided identifier, deselecting all others.
    SelectToken {
        /// Identifier of the token to select.
        token: TokenId,
    },
    /// Updates the radius used when computing the visible set.
    SetVisibilityRadius {
        /// Requested radius measured in cells.
        radius: f32,
    },
    /// Updates the number of movement points available per turn.
    SetMovementPoints {
        /// Total movement points available.
        points: u32,
    },
    /// Clears the movement points consumed so far.
    ResetMovement,
    /// Pans the camera by a screen-space delta.
    PanCamera {
        /// Pointer travel in screen pixels since the previous pan update.
        delta: Vec2,
    },
    /// Zooms the camera one step around a screen-space anchor.
    ZoomCamera {
        /// Screen position that should stay fixed while zooming.
        anchor: Vec2,
        /// Zooms in when `true` and out when `false`.
        zoom_in: bool,
    },
    /// Adds a wall when the cell is free and removes it otherwise.
    ToggleWall {
        /// Cell whose wall state should flip.
        cell: Cell,
    },
    /// Adds a wall to the cell if none is present.
    PaintWall {
        /// Cell that should become a wall.
        cell: Cell,
    },
    /// Adds a door when the cell is free and removes it otherwise.
    ToggleDoor {
        /// Cell whose door state should flip.
        cell: Cell,
    },
    /// Adds a door to the cell if none is present.
    PaintDoor {
        /// Cell that should become a door.
        cell: Cell,
    },
    /// Removes both the wall and the door stored at the cell.
    EraseCell {
        /// Cell to clear.
        cell: Cell,
    },
    /// Records a named point of interest on the map.
    PlaceLocation {
        /// Location to store.
        location: Location,
    },
    /// Chooses whether tokens are anchored at cell centres or cell corners.
    SetCenterTokens {
        /// Anchors tokens at cell centres when `true`.
        enabled: bool,
    },
}

/// Pointer interactions forwarded by presentation adapters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerCommand {
    /// Selects the token under the pointer, if any.
    Select,
    /// Begins dragging the token under the pointer, if any.
    DragStart,
    /// Updates an active drag with a new pointer location.
    DragMove,
    /// Releases an active drag and requests a move to the hovered cell.
    DragEnd,
    /// Requests that the selected token move to the clicked cell.
    ClickMove,
}

/// Events broadcast by the session after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the animation clock advanced.
    TimeAdvanced {
        /// Duration that elapsed in the tick.
        dt: Duration,
        /// Number of fixed animation steps executed for the tick.
        steps: u32,
    },
    /// Announces that a token became the selected token.
    TokenSelected {
        /// Identifier of the newly selected token.
        token: TokenId,
    },
    /// Confirms that a move was accepted and the token started travelling.
    TargetAssigned {
        /// Identifier of the moving token.
        token: TokenId,
        /// Discrete cell the token occupied when the move was accepted.
        from: Cell,
        /// Destination cell of the move.
        to: Cell,
        /// Movement points charged for the move.
        cost: u32,
    },
    /// Reports that a requested move was rejected without changing state.
    MoveRejected {
        /// Identifier of the token that attempted to move.
        token: TokenId,
        /// Destination cell that was requested.
        target: Cell,
        /// Reason the move was rejected.
        reason: MoveRejection,
    },
    /// Reports that a token advanced along its path during a tick.
    TokenAdvanced {
        /// Identifier of the travelling token.
        token: TokenId,
        /// Continuous position after the tick, measured in cells.
        position: Vec2,
    },
    /// Reports that a token reached its target and became idle.
    TokenArrived {
        /// Identifier of the token that arrived.
        token: TokenId,
        /// Cell the token now occupies.
        cell: Cell,
    },
    /// Announces that the visible set was recomputed.
    ///
    /// Emitted for every fresh computation, even when the resulting cells
    /// match the previous field.
    VisibilityChanged {
        /// Cell the field was computed from.
        origin: Cell,
        /// Number of visible cells in the new field.
        visible: usize,
    },
    /// Confirms that a token is being dragged.
    DragStarted {
        /// Identifier of the dragged token.
        token: TokenId,
    },
    /// Describes where a dragged token would land if released now.
    DragPreview {
        /// Identifier of the dragged token.
        token: TokenId,
        /// Cell under the dragged token.
        cell: Cell,
        /// Movement points the move would cost.
        cost: u32,
        /// Indicates whether releasing here would be accepted.
        valid: bool,
    },
    /// Reports the current movement point accounting.
    MovementBudgetChanged {
        /// Movement points consumed this turn.
        used: u32,
        /// Movement points available per turn.
        total: u32,
    },
    /// Reports the camera after a pan or zoom.
    ViewportChanged {
        /// Camera offset in map pixels.
        camera: Vec2,
        /// Zoom factor after clamping.
        zoom: f32,
    },
    /// Reports that the wall set changed.
    WallsChanged {
        /// Version of the wall set after the change.
        version: u64,
        /// Number of wall cells after the change.
        walls: usize,
    },
    /// Reports that the door set changed.
    DoorsChanged {
        /// Number of door cells after the change.
        doors: usize,
    },
    /// Reports that a location was added to the map.
    LocationPlaced {
        /// Name of the new location.
        name: String,
        /// Position of the location in map pixels.
        position: Vec2,
        /// Number of locations after the addition.
        locations: usize,
    },
    /// Reports that the visibility radius changed.
    VisibilityRadiusChanged {
        /// Radius after clamping, measured in cells.
        radius: f32,
    },
    /// Reports the anchor used to place tokens within their cells.
    AnchorChanged {
        /// Anchor that became active.
        anchor: Anchor,
    },
}

/// Reasons a move request may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The destination lies outside the grid, or outside the fallback square
    /// when the grid is invalid.
    OutOfBounds,
    /// The destination is a wall cell.
    WallBlocked,
    /// The destination is further away than the remaining movement points.
    InsufficientBudget {
        /// Manhattan distance to the destination.
        required: u32,
        /// Movement points left in the current turn.
        remaining: u32,
    },
    /// The token is still travelling towards a previous destination.
    TokenBusy,
}

impl fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds => write!(f, "destination is out of bounds"),
            Self::WallBlocked => write!(f, "destination is a wall"),
            Self::InsufficientBudget {
                required,
                remaining,
            } => write!(
                f,
                "not enough movement points (need {required}, have {remaining})"
            ),
            Self::TokenBusy => write!(f, "token is still moving"),
        }
    }
}

/// Named point of interest placed on the map, such as an inn or a dungeon
/// entrance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Display name.
    pub name: String,
    /// Free-form category, [`DEFAULT_LOCATION_KIND`] unless specified.
    pub kind: String,
    /// Position in map pixels.
    pub position: Vec2,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

impl Location {
    /// Creates a location without notes. A blank kind becomes
    /// [`DEFAULT_LOCATION_KIND`].
    #[must_use]
    pub fn new(name: impl Into<String>, kind: impl Into<String>, position: Vec2) -> Self {
        let kind = kind.into();
        let kind = if kind.trim().is_empty() {
            DEFAULT_LOCATION_KIND.to_owned()
        } else {
            kind
        };
        Self {
            name: name.into(),
            kind,
            position,
            notes: String::new(),
        }
    }
}

/// Location of a single grid cell.
///
/// Cells are signed so positions left of or above the map origin remain
/// representable after floor division.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: i32,
    y: i32,
}

impl Cell {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the cell displaced by the provided deltas.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x
            .abs_diff(other.x)
            .saturating_add(self.y.abs_diff(other.y))
    }

    /// Computes the squared Euclidean distance between two cells.
    #[must_use]
    pub fn distance_squared(self, other: Cell) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }

    /// Cell coordinates expressed as a continuous position in cell units.
    #[must_use]
    pub fn as_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    /// Cell nearest to a continuous position measured in cell units.
    #[must_use]
    pub fn nearest(position: Vec2) -> Self {
        Self::new(position.x.round() as i32, position.y.round() as i32)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Versioned set of cells used for walls and doors.
///
/// Every effective mutation bumps [`CellSet::version`], which lets consumers
/// memoise work derived from the set.
#[derive(Clone, Debug, Default)]
pub struct CellSet {
    cells: HashSet<Cell>,
    version: u64,
}

/// Static, binary-blocking terrain.
pub type WallSet = CellSet;

/// Door annotations painted by the editor. Doors never block.
pub type DoorSet = CellSet;

impl CellSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set containing the provided cells. Duplicates collapse.
    #[must_use]
    pub fn from_cells<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Cell>,
    {
        Self {
            cells: cells.into_iter().collect(),
            version: 0,
        }
    }

    /// Reports whether the set contains the cell.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of cells in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Version counter bumped on every effective mutation.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Iterator over the cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Cells sorted by column, then row.
    #[must_use]
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Adds the cell, returning `true` when it was not present before.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let inserted = self.cells.insert(cell);
        if inserted {
            self.bump();
        }
        inserted
    }

    /// Removes the cell, returning `true` when it was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let removed = self.cells.remove(&cell);
        if removed {
            self.bump();
        }
        removed
    }

    /// Flips membership of the cell, returning `true` when it is now present.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.remove(cell) {
            false
        } else {
            self.insert(cell)
        }
    }

    fn bump(&mut self) {
        self.version = self.version.wrapping_add(1);
    }
}

impl PartialEq for CellSet {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
    }
}

impl FromIterator<Cell> for CellSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}

/// Set of cells currently visible from the vision source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VisibleSet {
    cells: HashSet<Cell>,
}

impl VisibleSet {
    /// Creates an empty visible set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell, returning `true` when it was not already visible.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Reports whether the cell is visible.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of visible cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether no cell is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterator over the visible cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Visible cells sorted by column, then row.
    #[must_use]
    pub fn sorted(&self) -> Vec<Cell> {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort_unstable();
        cells
    }

    /// Reports whether every cell of `self` is also visible in `other`.
    #[must_use]
    pub fn is_subset(&self, other: &VisibleSet) -> bool {
        self.cells.is_subset(&other.cells)
    }
}

impl FromIterator<Cell> for VisibleSet {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Describes how map pixels are divided into grid cells.
///
/// A grid is valid only when its cell size is a positive, finite number. An
/// invalid grid reports zero columns and rows, and every grid-space query
/// falls back to its documented behaviour instead of dividing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    cell_size: f32,
    columns: i32,
    rows: i32,
}

impl GridSpec {
    /// Derives the grid from map pixel dimensions using floor division.
    #[must_use]
    pub fn new(width: u32, height: u32, cell_size: f32) -> Self {
        if !is_valid_cell_size(cell_size) {
            return Self {
                cell_size,
                columns: 0,
                rows: 0,
            };
        }

        Self {
            cell_size,
            columns: cells_along(width, cell_size),
            rows: cells_along(height, cell_size),
        }
    }

    /// Derives the grid from dimensions reported by a map source.
    #[must_use]
    pub fn from_dimensions(dimensions: MapDimensions) -> Self {
        Self::new(dimensions.width, dimensions.height, dimensions.cell_size)
    }

    /// Reports whether the grid may be used for grid-space computations.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_valid_cell_size(self.cell_size)
    }

    /// Side length of a single square cell measured in map pixels.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Number of whole columns that fit within the map.
    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    /// Number of whole rows that fit within the map.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Reports whether the cell lies within `[0, columns) x [0, rows)`.
    ///
    /// Always `false` for an invalid grid.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.is_valid()
            && cell.x() >= 0
            && cell.y() >= 0
            && cell.x() < self.columns
            && cell.y() < self.rows
    }
}

fn is_valid_cell_size(cell_size: f32) -> bool {
    cell_size.is_finite() && cell_size > 0.0
}

fn cells_along(pixels: u32, cell_size: f32) -> i32 {
    let count = (f64::from(pixels) / f64::from(cell_size)).floor();
    if count >= f64::from(i32::MAX) {
        i32::MAX
    } else {
        count as i32
    }
}

/// Where a token sits inside the cell it occupies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    /// Tokens are drawn centred within their cell.
    Center,
    /// Tokens are drawn at the top-left corner of their cell.
    Corner,
}

impl Anchor {
    /// Selects the anchor matching the `center_tokens` configuration flag.
    #[must_use]
    pub const fn from_center_flag(center_tokens: bool) -> Self {
        if center_tokens {
            Self::Center
        } else {
            Self::Corner
        }
    }

    /// Offset applied to cell coordinates before scaling, in cell units.
    #[must_use]
    pub const fn offset(self) -> f32 {
        match self {
            Self::Center => 0.5,
            Self::Corner => 0.0,
        }
    }
}

/// Camera state owned by the presentation layer.
///
/// `origin` is the top-left corner of the map area on screen, `camera` the
/// map-pixel offset shown at that corner, and `zoom` the scale from map pixels
/// to screen pixels. The zoom always lies within `[min_zoom, max_zoom]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    origin: Vec2,
    camera: Vec2,
    zoom: f32,
    min_zoom: f32,
    max_zoom: f32,
}

impl Viewport {
    /// Creates a viewport at zoom 1.0 (clamped) with the camera at the map origin.
    ///
    /// Bounds that are non-positive, non-finite or inverted fall back to
    /// [`DEFAULT_MIN_ZOOM`] and [`DEFAULT_MAX_ZOOM`].
    #[must_use]
    pub fn new(origin: Vec2, min_zoom: f32, max_zoom: f32) -> Self {
        let (min_zoom, max_zoom) = if zoom_bounds_are_valid(min_zoom, max_zoom) {
            (min_zoom, max_zoom)
        } else {
            (DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
        };

        Self {
            origin,
            camera: Vec2::ZERO,
            zoom: 1.0_f32.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    /// Screen position of the map area's top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Map-pixel offset displayed at the viewport origin.
    #[must_use]
    pub const fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Scale from map pixels to screen pixels.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Lower zoom bound.
    #[must_use]
    pub const fn min_zoom(&self) -> f32 {
        self.min_zoom
    }

    /// Upper zoom bound.
    #[must_use]
    pub const fn max_zoom(&self) -> f32 {
        self.max_zoom
    }

    /// Returns a copy with the camera moved to the provided offset.
    #[must_use]
    pub fn with_camera(self, camera: Vec2) -> Self {
        Self { camera, ..self }
    }

    /// Returns a copy with the zoom clamped into bounds. Non-finite values are ignored.
    #[must_use]
    pub fn with_zoom(self, zoom: f32) -> Self {
        if !zoom.is_finite() {
            return self;
        }

        Self {
            zoom: zoom.clamp(self.min_zoom, self.max_zoom),
            ..self
        }
    }

    /// Returns a copy with the map area moved to a new screen origin.
    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self { origin, ..self }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_MIN_ZOOM, DEFAULT_MAX_ZOOM)
    }
}

pub(crate) fn zoom_bounds_are_valid(min_zoom: f32, max_zoom: f32) -> bool {
    min_zoom.is_finite() && max_zoom.is_finite() && min_zoom > 0.0 && min_zoom <= max_zoom
}

/// Unique identifier assigned to a token.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(String);

impl TokenId {
    /// Creates a new token identifier.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Retrieves the textual representation of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable representation of a single token used for queries and frames.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenSnapshot {
    /// Unique identifier of the token.
    pub id: TokenId,
    /// Continuous position measured in cells.
    pub position: Vec2,
    /// Grid-aligned destination measured in cells.
    pub target: Vec2,
    /// Distance travelled per animation step, in cells.
    pub speed: f32,
    /// Indicates whether the token is travelling.
    pub moving: bool,
    /// Indicates whether the token is the selected token.
    pub selected: bool,
}

impl TokenSnapshot {
    /// Cell nearest to the token's continuous position.
    #[must_use]
    pub fn cell(&self) -> Cell {
        Cell::nearest(self.position)
    }
}

/// Render-ready output of a single tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Frame {
    /// Visible cells sorted by column, then row.
    pub visible: Vec<Cell>,
    /// Cell the visible set was computed from, if a vision source exists.
    pub vision_origin: Option<Cell>,
    /// Snapshots of every token ordered by identifier.
    pub tokens: Vec<TokenSnapshot>,
}
