#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative per-map session state for Fogmap.
//!
//! A [`Session`] owns everything one open map needs: grid, walls, doors,
//! tokens, camera, movement budget and the current field of view. All
//! mutation flows through [`apply`], which executes a single [`Command`] and
//! reports what changed as [`Event`] values.

use std::time::Duration;

use fogmap_core::{
    Anchor, Cell, Command, DoorSet, Event, Frame, GridSpec, Location, MapId, MapSource,
    MapSourceError, MoveRejection, PointerCommand, SessionConfig, TokenId, Viewport, VisibleSet,
    WallSet,
};
use fogmap_system_animation::{self as animation, Animator, StepOutcome, Token};
use fogmap_system_coordinates::{self as coordinates, CoordinateMapper};
use fogmap_system_movement::{self as movement, MovementBudget};
use fogmap_system_visibility::VisibilityCache;
use glam::Vec2;
use tracing::{debug, info, warn};

mod memory;

pub use memory::MemoryMapSource;

/// Identifier of the companion token placed by [`default_tokens`].
pub const DEFAULT_ALLY: &str = "ally_1";

/// Starting placements used when a map does not provide its own tokens.
///
/// The vision source starts on `(5, 5)` and a single ally on `(7, 7)`.
#[must_use]
pub fn default_tokens(config: &SessionConfig) -> Vec<(TokenId, Cell)> {
    vec![
        (config.vision_source_id(), Cell::new(5, 5)),
        (TokenId::new(DEFAULT_ALLY), Cell::new(7, 7)),
    ]
}

/// State of a single open map.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    grid: GridSpec,
    walls: WallSet,
    doors: DoorSet,
    locations: Vec<Location>,
    tokens: Vec<Token>,
    viewport: Viewport,
    anchor: Anchor,
    budget: MovementBudget,
    selected: Option<TokenId>,
    drag: Option<Drag>,
    radius: f32,
    vision_source: TokenId,
    vision_origin: Option<Cell>,
    visible: VisibleSet,
    cache: VisibilityCache,
    clock: Animator,
}

#[derive(Clone, Debug)]
struct Drag {
    token: TokenId,
    offset: Vec2,
}

impl Session {
    /// Creates a session over an already loaded map.
    ///
    /// Tokens are ordered by identifier; a repeated identifier keeps its first
    /// placement. The vision source starts out selected. The radius is clamped
    /// to the configured maximum and the initial field of view is computed
    /// immediately.
    ///
    /// A configuration that fails [`SessionConfig::validate`] is replaced by
    /// the defaults and a warning is logged.
    #[must_use]
    pub fn new<I>(grid: GridSpec, walls: WallSet, tokens: I, config: SessionConfig) -> Self
    where
        I: IntoIterator<Item = (TokenId, Cell)>,
    {
        let config = match config.validate() {
            Ok(()) => config,
            Err(error) => {
                warn!(%error, "invalid session configuration, using defaults");
                SessionConfig::default()
            }
        };

        let mut placed: Vec<Token> = Vec::new();
        for (id, cell) in tokens {
            if placed.iter().any(|token| token.id() == &id) {
                warn!(token = %id, "ignoring duplicate token placement");
                continue;
            }
            placed.push(Token::new(id, cell, config.token_speed));
        }
        placed.sort_by(|left, right| left.id().cmp(right.id()));

        let vision_source = config.vision_source_id();
        let selected = placed
            .iter_mut()
            .find(|token| token.id() == &vision_source)
            .map(|token| {
                token.set_selected(true);
                token.id().clone()
            });

        let mut session = Self {
            grid,
            walls,
            doors: DoorSet::new(),
            locations: Vec::new(),
            tokens: placed,
            viewport: Viewport::new(Vec2::ZERO, config.min_zoom, config.max_zoom),
            anchor: config.anchor(),
            budget: MovementBudget::new(config.movement_points),
            selected,
            drag: None,
            radius: config.clamp_radius(config.visibility_radius),
            vision_source,
            vision_origin: None,
            visible: VisibleSet::new(),
            cache: VisibilityCache::new(),
            clock: Animator::new(config.step_interval(), config.max_steps_per_tick),
            config,
        };

        let mut ignored = Vec::new();
        session.refresh_visibility(&mut ignored);
        session
    }

    /// Opens a stored map with the [`default_tokens`] placement.
    pub fn open<S>(source: &S, map: &MapId, config: SessionConfig) -> Result<Self, MapSourceError>
    where
        S: MapSource + ?Sized,
    {
        let tokens = default_tokens(&config);
        Self::open_with_tokens(source, map, tokens, config)
    }

    /// Opens a stored map and places the provided tokens on it.
    ///
    /// Failing to load the dimensions aborts. Failing to load the walls or
    /// doors does not: the map opens without them and a warning is logged.
    pub fn open_with_tokens<S, I>(
        source: &S,
        map: &MapId,
        tokens: I,
        config: SessionConfig,
    ) -> Result<Self, MapSourceError>
    where
        S: MapSource + ?Sized,
        I: IntoIterator<Item = (TokenId, Cell)>,
    {
        let dimensions = source.load_map_dimensions(map)?;
        let walls = match source.load_walls(map) {
            Ok(cells) => WallSet::from_cells(cells),
            Err(error) => {
                warn!(map = %map, %error, "wall data unavailable, opening without walls");
                WallSet::new()
            }
        };

        let doors = match source.load_doors(map) {
            Ok(cells) => DoorSet::from_cells(cells),
            Err(error) => {
                warn!(map = %map, %error, "door data unavailable, opening without doors");
                DoorSet::new()
            }
        };

        let grid = GridSpec::from_dimensions(dimensions);
        if !grid.is_valid() {
            warn!(
                map = %map,
                cell_size = dimensions.cell_size,
                "cell size is not positive, grid queries are disabled"
            );
        }
        info!(
            map = %map,
            columns = grid.columns(),
            rows = grid.rows(),
            walls = walls.len(),
            doors = doors.len(),
            "opened map session"
        );

        let mut session = Self::new(grid, walls, tokens, config);
        session.doors = doors;
        Ok(session)
    }

    fn mapper(&self) -> CoordinateMapper {
        CoordinateMapper::new(self.viewport, self.grid, self.anchor)
    }

    fn token_index(&self, id: &TokenId) -> Option<usize> {
        self.tokens
            .binary_search_by(|token| token.id().cmp(id))
            .ok()
    }

    fn token_under(&self, screen: Vec2) -> Option<usize> {
        let mapper = self.mapper();
        self.tokens
            .iter()
            .position(|token| mapper.token_hit(screen, token.position()))
    }

    fn vision_cell(&self) -> Option<Cell> {
        self.token_index(&self.vision_source)
            .map(|index| self.tokens[index].cell())
    }

    fn refresh_visibility(&mut self, out_events: &mut Vec<Event>) {
        let Some(origin) = self.vision_cell() else {
            if self.vision_origin.take().is_some() {
                self.visible = VisibleSet::new();
            }
            return;
        };

        let (field, computed) = self
            .cache
            .refresh(origin, self.radius, &self.walls, &self.grid);
        if !computed {
            return;
        }

        self.visible = field.clone();
        self.vision_origin = Some(origin);
        debug!(
            origin = %origin,
            radius = self.radius,
            visible = self.visible.len(),
            "recomputed field of view"
        );
        out_events.push(Event::VisibilityChanged {
            origin,
            visible: self.visible.len(),
        });
    }

    fn select(&mut self, index: usize, out_events: &mut Vec<Event>) {
        for (candidate, token) in self.tokens.iter_mut().enumerate() {
            token.set_selected(candidate == index);
        }

        let id = self.tokens[index].id().clone();
        debug!(token = %id, "selected token");
        self.selected = Some(id.clone());
        out_events.push(Event::TokenSelected { token: id.clone() });

        if id == self.vision_source {
            self.refresh_visibility(out_events);
        }
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
            .as_ref()
            .and_then(|id| self.token_index(id))
    }

    fn request_move(&mut self, index: usize, target: Cell, out_events: &mut Vec<Event>) {
        let token = &self.tokens[index];
        let id = token.id().clone();
        let from = token.cell();

        if token.is_moving() {
            reject(id, target, MoveRejection::TokenBusy, out_events);
            return;
        }

        if let Err(reason) = movement::check(
            from,
            target,
            &self.walls,
            &self.grid,
            self.budget.remaining(),
            self.config.fallback_bound,
        ) {
            reject(id, target, reason, out_events);
            return;
        }

        if !animation::assign_target(&mut self.tokens[index], target) {
            return;
        }

        let cost = from.manhattan_distance(target);
        self.budget.charge(cost);
        debug!(token = %id, from = %from, to = %target, cost, "move accepted");
        out_events.push(Event::TargetAssigned {
            token: id,
            from,
            to: target,
            cost,
        });
        out_events.push(self.budget_event());
    }

    fn budget_event(&self) -> Event {
        Event::MovementBudgetChanged {
            used: self.budget.used(),
            total: self.budget.total(),
        }
    }

    fn viewport_event(&self) -> Event {
        Event::ViewportChanged {
            camera: self.viewport.camera(),
            zoom: self.viewport.zoom(),
        }
    }

    fn advance(&mut self, dt: Duration, out_events: &mut Vec<Event>) {
        let steps = self.clock.advance(dt);
        out_events.push(Event::TimeAdvanced { dt, steps });

        let mut moved = vec![false; self.tokens.len()];
        let mut arrived = vec![false; self.tokens.len()];
        for _ in 0..steps {
            let mut source_moved = false;
            for (index, token) in self.tokens.iter_mut().enumerate() {
                let outcome = animation::step(token);
                if !outcome.moved() {
                    continue;
                }
                moved[index] = true;
                arrived[index] = outcome == StepOutcome::Arrived;
                if token.id() == &self.vision_source {
                    source_moved = true;
                }
            }

            if source_moved {
                self.refresh_visibility(out_events);
            }
        }

        for (index, token) in self.tokens.iter().enumerate() {
            if moved[index] {
                out_events.push(Event::TokenAdvanced {
                    token: token.id().clone(),
                    position: token.position(),
                });
            }
            if arrived[index] {
                out_events.push(Event::TokenArrived {
                    token: token.id().clone(),
                    cell: token.cell(),
                });
            }
        }
    }

    fn handle_pointer(&mut self, screen: Vec2, command: PointerCommand, out_events: &mut Vec<Event>) {
        match command {
            PointerCommand::Select => {
                if let Some(index) = self.token_under(screen) {
                    self.select(index, out_events);
                }
            }
            PointerCommand::DragStart => {
                let Some(index) = self.token_under(screen) else {
                    return;
                };
                self.select(index, out_events);

                let token = &self.tokens[index];
                let Some(anchor) = self.mapper().position_to_screen(token.position()) else {
                    return;
                };
                let id = token.id().clone();
                self.drag = Some(Drag {
                    token: id.clone(),
                    offset: anchor - screen,
                });
                out_events.push(Event::DragStarted { token: id });
            }
            PointerCommand::DragMove => {
                let Some(drag) = self.drag.as_ref() else {
                    return;
                };
                let Some(index) = self.token_index(&drag.token) else {
                    return;
                };
                let Some(cell) = self.mapper().screen_to_cell(screen + drag.offset) else {
                    return;
                };

                let preview = movement::preview(
                    self.tokens[index].cell(),
                    cell,
                    &self.walls,
                    &self.grid,
                    self.budget.remaining(),
                    self.config.fallback_bound,
                );
                out_events.push(Event::DragPreview {
                    token: drag.token.clone(),
                    cell,
                    cost: preview.cost,
                    valid: preview.is_valid(),
                });
            }
            PointerCommand::DragEnd => {
                let Some(drag) = self.drag.take() else {
                    return;
                };
                let Some(index) = self.token_index(&drag.token) else {
                    return;
                };
                if let Some(cell) = self.mapper().screen_to_cell(screen + drag.offset) {
                    self.request_move(index, cell, out_events);
                }
            }
            PointerCommand::ClickMove => {
                let Some(index) = self.selected_index() else {
                    debug!("click move ignored without a selected token");
                    return;
                };
                if let Some(cell) = self.mapper().screen_to_cell(screen) {
                    self.request_move(index, cell, out_events);
                }
            }
        }
    }

    fn edit_accepts(&self, cell: Cell) -> bool {
        if self.grid.is_valid() && !self.grid.contains(cell) {
            debug!(cell = %cell, "ignoring edit outside the map");
            return false;
        }
        true
    }

    fn place_location(&mut self, location: Location, out_events: &mut Vec<Event>) {
        if location.name.trim().is_empty() {
            debug!("ignoring location without a name");
            return;
        }
        if let Some(cell) = self.mapper().map_to_cell(location.position) {
            if !self.edit_accepts(cell) {
                return;
            }
        }

        debug!(name = %location.name, kind = %location.kind, "placed location");
        let name = location.name.clone();
        let position = location.position;
        self.locations.push(location);
        out_events.push(Event::LocationPlaced {
            name,
            position,
            locations: self.locations.len(),
        });
    }

    fn walls_changed(&mut self, out_events: &mut Vec<Event>) {
        out_events.push(Event::WallsChanged {
            version: self.walls.version(),
            walls: self.walls.len(),
        });
        self.refresh_visibility(out_events);
    }

    fn doors_changed(&self, out_events: &mut Vec<Event>) {
        out_events.push(Event::DoorsChanged {
            doors: self.doors.len(),
        });
    }
}

fn reject(
    token: TokenId,
    target: Cell,
    reason: MoveRejection,
    out_events: &mut Vec<Event>,
) {
    debug!(token = %token, target = %target, %reason, "move rejected");
    out_events.push(Event::MoveRejected {
        token,
        target,
        reason,
    });
}

/// Applies the provided command to the session, mutating state deterministically.
pub fn apply(session: &mut Session, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick { dt } => session.advance(dt, out_events),
        Command::DirectionalInput { dx, dy } => {
            let (dx, dy) = (dx.signum(), dy.signum());
            if dx == 0 && dy == 0 {
                return;
            }
            let Some(index) = session.selected_index() else {
                debug!("directional input ignored without a selected token");
                return;
            };
            let target = session.tokens[index].cell().offset(dx, dy);
            session.request_move(index, target, out_events);
        }
        Command::Pointer { screen, command } => session.handle_pointer(screen, command, out_events),
        Command::SelectToken { token } => match session.token_index(&token) {
            Some(index) => session.select(index, out_events),
            None => debug!(token = %token, "cannot select unknown token"),
        },
        Command::SetVisibilityRadius { radius } => {
            let radius = session.config.clamp_radius(radius);
            if radius == session.radius {
                return;
            }
            session.radius = radius;
            out_events.push(Event::VisibilityRadiusChanged { radius });
            session.refresh_visibility(out_events);
        }
        Command::SetMovementPoints { points } => {
            session.budget.set_total(points);
            out_events.push(session.budget_event());
        }
        Command::ResetMovement => {
            session.budget.reset();
            out_events.push(session.budget_event());
        }
        Command::PanCamera { delta } => {
            session.viewport = coordinates::pan(session.viewport, delta);
            out_events.push(session.viewport_event());
        }
        Command::ZoomCamera { anchor, zoom_in } => {
            let zoomed = coordinates::zoom_at(session.viewport, anchor, zoom_in);
            if zoomed != session.viewport {
                session.viewport = zoomed;
                out_events.push(session.viewport_event());
            }
        }
        Command::ToggleWall { cell } => {
            if session.edit_accepts(cell) {
                let _ = session.walls.toggle(cell);
                session.walls_changed(out_events);
            }
        }
        Command::PaintWall { cell } => {
            if session.edit_accepts(cell) && session.walls.insert(cell) {
                session.walls_changed(out_events);
            }
        }
        Command::ToggleDoor { cell } => {
            if session.edit_accepts(cell) {
                let _ = session.doors.toggle(cell);
                session.doors_changed(out_events);
            }
        }
        Command::PaintDoor { cell } => {
            if session.edit_accepts(cell) && session.doors.insert(cell) {
                session.doors_changed(out_events);
            }
        }
        Command::EraseCell { cell } => {
            if !session.edit_accepts(cell) {
                return;
            }
            if session.doors.remove(cell) {
                session.doors_changed(out_events);
            }
            if session.walls.remove(cell) {
                session.walls_changed(out_events);
            }
        }
        Command::PlaceLocation { location } => session.place_location(location, out_events),
        Command::SetCenterTokens { enabled } => {
            let anchor = Anchor::from_center_flag(enabled);
            if anchor != session.anchor {
                session.anchor = anchor;
                out_events.push(Event::AnchorChanged { anchor });
            }
        }
    }
}

/// Advances the session clock and returns the frame to render.
pub fn tick(session: &mut Session, dt: Duration, out_events: &mut Vec<Event>) -> Frame {
    apply(session, Command::Tick { dt }, out_events);
    query::frame(session)
}

/// Query functions that provide read-only access to the session state.
pub mod query {
    use fogmap_core::{
        Anchor, Cell, DoorSet, Frame, GridSpec, Location, SessionConfig, TokenId, TokenSnapshot,
        Viewport, VisibleSet, WallSet,
    };
    use fogmap_system_coordinates::CoordinateMapper;
    use fogmap_system_movement::MovementBudget;

    use super::Session;

    /// Captures the render-ready state of the session.
    #[must_use]
    pub fn frame(session: &Session) -> Frame {
        Frame {
            visible: session.visible.sorted(),
            vision_origin: session.vision_origin,
            tokens: tokens(session),
        }
    }

    /// Cells currently visible from the vision source.
    #[must_use]
    pub fn visible_set(session: &Session) -> &VisibleSet {
        &session.visible
    }

    /// Cell the current field of view was computed from.
    #[must_use]
    pub fn vision_origin(session: &Session) -> Option<Cell> {
        session.vision_origin
    }

    /// Snapshots of every token ordered by identifier.
    #[must_use]
    pub fn tokens(session: &Session) -> Vec<TokenSnapshot> {
        session.tokens.iter().map(|token| token.snapshot()).collect()
    }

    /// Snapshot of a single token.
    #[must_use]
    pub fn token(session: &Session, id: &TokenId) -> Option<TokenSnapshot> {
        session
            .token_index(id)
            .map(|index| session.tokens[index].snapshot())
    }

    /// Identifier of the selected token, if any.
    #[must_use]
    pub fn selected(session: &Session) -> Option<&TokenId> {
        session.selected.as_ref()
    }

    /// Identifier of the token being dragged, if any.
    #[must_use]
    pub fn dragged(session: &Session) -> Option<&TokenId> {
        session.drag.as_ref().map(|drag| &drag.token)
    }

    /// Wall cells of the map.
    #[must_use]
    pub fn walls(session: &Session) -> &WallSet {
        &session.walls
    }

    /// Door cells painted on the map.
    #[must_use]
    pub fn doors(session: &Session) -> &DoorSet {
        &session.doors
    }

    /// Named locations in the order they were placed.
    #[must_use]
    pub fn locations(session: &Session) -> &[Location] {
        &session.locations
    }

    /// Grid laid over the map.
    #[must_use]
    pub fn grid(session: &Session) -> GridSpec {
        session.grid
    }

    /// Camera and zoom of the view.
    #[must_use]
    pub fn viewport(session: &Session) -> Viewport {
        session.viewport
    }

    /// Anchor placing tokens within their cells.
    #[must_use]
    pub fn anchor(session: &Session) -> Anchor {
        session.anchor
    }

    /// Converter between the screen, map and grid spaces of the session.
    #[must_use]
    pub fn mapper(session: &Session) -> CoordinateMapper {
        session.mapper()
    }

    /// Movement points of the current turn.
    #[must_use]
    pub fn budget(session: &Session) -> MovementBudget {
        session.budget
    }

    /// Radius of the field of view, measured in cells.
    #[must_use]
    pub fn visibility_radius(session: &Session) -> f32 {
        session.radius
    }

    /// Number of field-of-view computations performed so far.
    #[must_use]
    pub fn visibility_computations(session: &Session) -> u64 {
        session.cache.computations()
    }

    /// Configuration the session was created with.
    #[must_use]
    pub fn config(session: &Session) -> &SessionConfig {
        &session.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(
            GridSpec::new(1000, 800, 50.0),
            WallSet::new(),
            default_tokens(&SessionConfig::default()),
            SessionConfig::default(),
        )
    }

    #[test]
    fn new_session_sees_from_vision_source() {
        let session = session();
        assert_eq!(query::vision_origin(&session), Some(Cell::new(5, 5)));
        assert!(query::visible_set(&session).contains(Cell::new(5, 5)));
        assert!(query::visible_set(&session).contains(Cell::new(15, 5)));
        assert!(!query::visible_set(&session).contains(Cell::new(16, 5)));
    }

    #[test]
    fn tokens_are_ordered_and_deduplicated() {
        let session = Session::new(
            GridSpec::new(1000, 800, 50.0),
            WallSet::new(),
            [
                (TokenId::new("zeta"), Cell::new(1, 1)),
                (TokenId::new("alpha"), Cell::new(2, 2)),
                (TokenId::new("zeta"), Cell::new(3, 3)),
            ],
            SessionConfig::default(),
        );

        let tokens = query::tokens(&session);
        let ids: Vec<&str> = tokens.iter().map(|token| token.id.as_str()).collect();
        assert_eq!(ids, vec!["alpha", "zeta"]);
        assert_eq!(tokens[1].cell(), Cell::new(1, 1));
    }

    #[test]
    fn missing_vision_source_leaves_field_empty() {
        let session = Session::new(
            GridSpec::new(1000, 800, 50.0),
            WallSet::new(),
            [(TokenId::new("ally_1"), Cell::new(2, 2))],
            SessionConfig::default(),
        );
        assert_eq!(query::vision_origin(&session), None);
        assert!(query::frame(&session).visible.is_empty());
    }

    #[test]
    fn directional_input_normalises_components() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::SelectToken {
                token: TokenId::new("player_1"),
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut session,
            Command::DirectionalInput { dx: 7, dy: -3 },
            &mut events,
        );

        assert!(events.contains(&Event::TargetAssigned {
            token: TokenId::new("player_1"),
            from: Cell::new(5, 5),
            to: Cell::new(6, 4),
            cost: 2,
        }));
    }

    #[test]
    fn zero_direction_is_ignored() {
        let mut session = session();
        let mut events = Vec::new();
        apply(
            &mut session,
            Command::SelectToken {
                token: TokenId::new("player_1"),
            },
            &mut events,
        );
        events.clear();

        apply(
            &mut session,
            Command::DirectionalInput { dx: 0, dy: 0 },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn edits_outside_grid_are_ignored() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::ToggleWall {
                cell: Cell::new(20, 3),
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::PaintDoor {
                cell: Cell::new(-1, 0),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::walls(&session).is_empty());
        assert!(query::doors(&session).is_empty());
    }

    #[test]
    fn doors_never_block_sight() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::ToggleDoor {
                cell: Cell::new(6, 5),
            },
            &mut events,
        );

        assert_eq!(events, vec![Event::DoorsChanged { doors: 1 }]);
        assert!(query::visible_set(&session).contains(Cell::new(7, 5)));
    }

    #[test]
    fn vision_source_starts_selected() {
        let session = session();
        assert_eq!(query::selected(&session), Some(&TokenId::new("player_1")));

        let selected: Vec<bool> = query::tokens(&session)
            .iter()
            .map(|token| token.selected)
            .collect();
        assert_eq!(selected, vec![false, true]);
    }

    #[test]
    fn arrow_keys_move_the_player_without_selecting_first() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::DirectionalInput { dx: 0, dy: 1 },
            &mut events,
        );
        assert!(matches!(
            events.first(),
            Some(Event::TargetAssigned { to, .. }) if *to == Cell::new(5, 6)
        ));
    }

    #[test]
    fn unusable_configuration_falls_back_to_defaults() {
        for config in [
            SessionConfig {
                step_interval_ms: f32::INFINITY,
                ..SessionConfig::default()
            },
            SessionConfig {
                step_interval_ms: 1e30,
                ..SessionConfig::default()
            },
            SessionConfig {
                max_visibility_radius: f32::INFINITY,
                visibility_radius: f32::INFINITY,
                ..SessionConfig::default()
            },
        ] {
            let session = Session::new(
                GridSpec::new(1000, 800, 50.0),
                WallSet::new(),
                default_tokens(&config),
                config,
            );
            assert_eq!(query::config(&session), &SessionConfig::default());
            assert_eq!(query::visibility_radius(&session), 10.0);
            assert_eq!(query::vision_origin(&session), Some(Cell::new(5, 5)));
        }
    }

    #[test]
    fn erase_outside_grid_is_ignored() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::EraseCell {
                cell: Cell::new(-3, 2),
            },
            &mut events,
        );
        assert!(events.is_empty());
    }

    #[test]
    fn locations_require_a_name_and_a_cell_on_the_map() {
        let mut session = session();
        let mut events = Vec::new();

        apply(
            &mut session,
            Command::PlaceLocation {
                location: Location::new(" ", "inn", Vec2::new(10.0, 10.0)),
            },
            &mut events,
        );
        apply(
            &mut session,
            Command::PlaceLocation {
                location: Location::new("Far away", "", Vec2::new(5000.0, 10.0)),
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::locations(&session).is_empty());
    }
}
