#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure map-editing system that turns pointer input into wall, door and
//! location commands.

use fogmap_core::{Cell, Command, Location};
use glam::Vec2;

/// Tool currently wielded by the map editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditorTool {
    /// Pointer input selects and drags tokens; the editor stays silent.
    #[default]
    Select,
    /// Press toggles a wall, dragging paints walls.
    Wall,
    /// Press toggles a door, dragging paints doors.
    Door,
    /// Press and drag remove walls and doors alike.
    Erase,
    /// Press places the prepared location at the pointer.
    Location,
}

/// Input snapshot distilled from adapter-provided pointer data.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EditorInput {
    /// Indicates whether the button went down on this frame.
    pub pressed: bool,
    /// Indicates whether the pointer moved while the button was held.
    pub dragging: bool,
    /// Cell currently under the pointer.
    pub cursor_cell: Option<Cell>,
    /// Map-pixel position under the pointer.
    pub cursor_map: Option<Vec2>,
}

impl EditorInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(pressed: bool, dragging: bool, cursor_cell: Option<Cell>) -> Self {
        Self {
            pressed,
            dragging,
            cursor_cell,
            cursor_map: None,
        }
    }

    /// Attaches the map-pixel position under the pointer.
    #[must_use]
    pub const fn with_map_position(self, position: Vec2) -> Self {
        Self {
            cursor_map: Some(position),
            ..self
        }
    }
}

/// Editor system that translates tool and input into editing commands.
#[derive(Clone, Debug, Default)]
pub struct Editor {
    tool: EditorTool,
    last_cell: Option<Cell>,
    draft: Option<(String, String)>,
}

impl Editor {
    /// Creates a new editor holding the select tool.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tool: EditorTool::Select,
            last_cell: None,
            draft: None,
        }
    }

    /// Tool currently in use.
    #[must_use]
    pub const fn tool(&self) -> EditorTool {
        self.tool
    }

    /// Switches tools and forgets the stroke in progress.
    pub fn set_tool(&mut self, tool: EditorTool) {
        self.tool = tool;
        self.last_cell = None;
    }

    /// Names the location placed by the next press of the location tool.
    ///
    /// A blank kind is recorded as `generic`.
    pub fn prepare_location(&mut self, name: impl Into<String>, kind: impl Into<String>) {
        self.draft = Some((name.into(), kind.into()));
    }

    /// Name of the location waiting to be placed, if any.
    #[must_use]
    pub fn pending_location(&self) -> Option<&str> {
        self.draft.as_ref().map(|(name, _)| name.as_str())
    }

    /// Consumes pointer input to emit editing commands.
    ///
    /// A drag stroke emits at most one command per cell it enters, so holding
    /// the pointer still does not repeat the edit. The location tool only
    /// reacts to presses and places each prepared location once.
    pub fn handle(&mut self, input: EditorInput, out: &mut Vec<Command>) {
        if self.tool == EditorTool::Location {
            if input.pressed {
                if let Some(command) = self.place_location(input.cursor_map) {
                    out.push(command);
                }
            }
            return;
        }

        let Some(cell) = input.cursor_cell else {
            return;
        };

        if input.pressed {
            self.last_cell = Some(cell);
            if let Some(command) = self.press_command(cell) {
                out.push(command);
            }
            return;
        }

        if !input.dragging || self.last_cell == Some(cell) {
            return;
        }

        self.last_cell = Some(cell);
        if let Some(command) = self.drag_command(cell) {
            out.push(command);
        }
    }

    fn place_location(&mut self, position: Option<Vec2>) -> Option<Command> {
        let position = position?;
        let (name, kind) = self.draft.take()?;
        Some(Command::PlaceLocation {
            location: Location::new(name, kind, position),
        })
    }

    fn press_command(&self, cell: Cell) -> Option<Command> {
        match self.tool {
            EditorTool::Select | EditorTool::Location => None,
            EditorTool::Wall => Some(Command::ToggleWall { cell }),
            EditorTool::Door => Some(Command::ToggleDoor { cell }),
            EditorTool::Erase => Some(Command::EraseCell { cell }),
        }
    }

    fn drag_command(&self, cell: Cell) -> Option<Command> {
        match self.tool {
            EditorTool::Select | EditorTool::Location => None,
            EditorTool::Wall => Some(Command::PaintWall { cell }),
            EditorTool::Door => Some(Command::PaintDoor { cell }),
            EditorTool::Erase => Some(Command::EraseCell { cell }),
        }
    }
}
