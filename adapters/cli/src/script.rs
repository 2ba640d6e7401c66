//! Line-oriented input scripts that drive a session without a window.
//!
//! Each non-empty line holds one instruction; `#` starts a comment. Screen
//! positions are given in pixels, cells as column and row.
//!
//! | Instruction | Effect |
//! |---|---|
//! | `select <token>` | select a token by id |
//! | `key <dx> <dy>` | directional input |
//! | `up`, `down`, `left`, `right` | directional input shorthands |
//! | `click <x> <y>` | pointer select |
//! | `move <x> <y>` | pointer click-move |
//! | `drag <x1> <y1> <x2> <y2>` | drag start, move and release |
//! | `tick [ms]` | advance the clock, one step interval by default |
//! | `radius <cells>` | visibility radius |
//! | `points <n>` / `reset` | movement budget |
//! | `pan <dx> <dy>` / `zoom in\|out <x> <y>` | camera |
//! | `center on\|off` | token anchor |
//! | `tool select\|wall\|door\|erase\|location` | editor tool |
//! | `press <x> <y>` / `paint <x> <y>` | editor press and drag |
//! | `name <name> [kind]` | location placed by the next location press |
//! | `render` | print the current frame |

use std::{str::FromStr, time::Duration};

use fogmap_core::{Command, PointerCommand, TokenId};
use fogmap_system_editor::EditorTool;
use glam::Vec2;
use thiserror::Error;

/// Single parsed script instruction.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Step {
    /// Commands applied to the session in order.
    Apply(Vec<Command>),
    /// Advances the clock, by one step interval when no duration is given.
    Tick(Option<Duration>),
    /// Switches the editor tool.
    Tool(EditorTool),
    /// Feeds the editor a press or a drag at a screen position.
    Edit {
        /// Screen position of the pointer.
        screen: Vec2,
        /// `true` for a press, `false` for a drag.
        pressed: bool,
    },
    /// Names the location placed by the next press of the location tool.
    NameLocation {
        /// Display name, underscores read as spaces.
        name: String,
        /// Category, empty when not given.
        kind: String,
    },
    /// Prints the current frame.
    Render,
}

/// Parses a whole script.
pub(crate) fn parse(source: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            continue;
        }
        let step = parse_line(line).map_err(|reason| ScriptError {
            line: index + 1,
            reason,
        })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(line: &str) -> Result<Step, String> {
    let mut words = line.split_whitespace();
    let keyword = words.next().unwrap_or_default();
    let args: Vec<&str> = words.collect();

    let step = match (keyword, args.as_slice()) {
        ("select", [token]) => apply(Command::SelectToken {
            token: TokenId::new(*token),
        }),
        ("key", [dx, dy]) => apply(Command::DirectionalInput {
            dx: number(dx)?,
            dy: number(dy)?,
        }),
        ("up", []) => apply(Command::DirectionalInput { dx: 0, dy: -1 }),
        ("down", []) => apply(Command::DirectionalInput { dx: 0, dy: 1 }),
        ("left", []) => apply(Command::DirectionalInput { dx: -1, dy: 0 }),
        ("right", []) => apply(Command::DirectionalInput { dx: 1, dy: 0 }),
        ("click", [x, y]) => pointer(point(x, y)?, PointerCommand::Select),
        ("move", [x, y]) => pointer(point(x, y)?, PointerCommand::ClickMove),
        ("drag", [x1, y1, x2, y2]) => {
            let from = point(x1, y1)?;
            let to = point(x2, y2)?;
            Step::Apply(vec![
                pointer_command(from, PointerCommand::DragStart),
                pointer_command(to, PointerCommand::DragMove),
                pointer_command(to, PointerCommand::DragEnd),
            ])
        }
        ("tick", []) => Step::Tick(None),
        ("tick", [millis]) => Step::Tick(Some(Duration::from_millis(number(millis)?))),
        ("radius", [radius]) => apply(Command::SetVisibilityRadius {
            radius: number(radius)?,
        }),
        ("points", [points]) => apply(Command::SetMovementPoints {
            points: number(points)?,
        }),
        ("reset", []) => apply(Command::ResetMovement),
        ("pan", [dx, dy]) => apply(Command::PanCamera {
            delta: point(dx, dy)?,
        }),
        ("zoom", [direction, x, y]) => apply(Command::ZoomCamera {
            anchor: point(x, y)?,
            zoom_in: match *direction {
                "in" => true,
                "out" => false,
                other => return Err(format!("zoom direction must be `in` or `out`, not `{other}`")),
            },
        }),
        ("center", [flag]) => apply(Command::SetCenterTokens {
            enabled: match *flag {
                "on" => true,
                "off" => false,
                other => return Err(format!("center expects `on` or `off`, not `{other}`")),
            },
        }),
        ("tool", [name]) => Step::Tool(tool(name)?),
        ("press", [x, y]) => Step::Edit {
            screen: point(x, y)?,
            pressed: true,
        },
        ("paint", [x, y]) => Step::Edit {
            screen: point(x, y)?,
            pressed: false,
        },
        ("name", [name]) => name_location(name, ""),
        ("name", [name, kind]) => name_location(name, kind),
        ("render", []) => Step::Render,
        _ => return Err(format!("unrecognised instruction `{line}`")),
    };
    Ok(step)
}

fn apply(command: Command) -> Step {
    Step::Apply(vec![command])
}

fn pointer(screen: Vec2, command: PointerCommand) -> Step {
    apply(pointer_command(screen, command))
}

fn pointer_command(screen: Vec2, command: PointerCommand) -> Command {
    Command::Pointer { screen, command }
}

fn name_location(name: &str, kind: &str) -> Step {
    Step::NameLocation {
        name: name.replace('_', " "),
        kind: kind.to_owned(),
    }
}

fn number<T: FromStr>(word: &str) -> Result<T, String> {
    word.parse()
        .map_err(|_| format!("`{word}` is not a valid number"))
}

fn point(x: &str, y: &str) -> Result<Vec2, String> {
    Ok(Vec2::new(number(x)?, number(y)?))
}

fn tool(name: &str) -> Result<EditorTool, String> {
    match name {
        "select" => Ok(EditorTool::Select),
        "wall" => Ok(EditorTool::Wall),
        "door" => Ok(EditorTool::Door),
        "erase" => Ok(EditorTool::Erase),
        "location" => Ok(EditorTool::Location),
        other => Err(format!("unknown tool `{other}`")),
    }
}

/// Script line that could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("line {line}: {reason}")]
pub(crate) struct ScriptError {
    line: usize,
    reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_movement_and_camera_instructions() {
        let steps = parse(
            "select player_1\nright   # step east\n\nkey 0 1\nzoom in 400 300\ntick\ntick 250\n",
        )
        .expect("script parses");

        assert_eq!(
            steps,
            vec![
                Step::Apply(vec![Command::SelectToken {
                    token: TokenId::new("player_1"),
                }]),
                Step::Apply(vec![Command::DirectionalInput { dx: 1, dy: 0 }]),
                Step::Apply(vec![Command::DirectionalInput { dx: 0, dy: 1 }]),
                Step::Apply(vec![Command::ZoomCamera {
                    anchor: Vec2::new(400.0, 300.0),
                    zoom_in: true,
                }]),
                Step::Tick(None),
                Step::Tick(Some(Duration::from_millis(250))),
            ]
        );
    }

    #[test]
    fn drag_expands_into_three_pointer_commands() {
        let steps = parse("drag 275 275 375 275").expect("script parses");
        let Step::Apply(commands) = &steps[0] else {
            panic!("drag should produce commands");
        };
        assert_eq!(commands.len(), 3);
        assert_eq!(
            commands[2],
            Command::Pointer {
                screen: Vec2::new(375.0, 275.0),
                command: PointerCommand::DragEnd,
            }
        );
    }

    #[test]
    fn editor_instructions_keep_screen_positions() {
        let steps = parse("tool wall\npress 10 20\npaint 60 20").expect("script parses");
        assert_eq!(steps[0], Step::Tool(EditorTool::Wall));
        assert_eq!(
            steps[1],
            Step::Edit {
                screen: Vec2::new(10.0, 20.0),
                pressed: true,
            }
        );
    }

    #[test]
    fn location_names_read_underscores_as_spaces() {
        let steps = parse("tool location\nname Prancing_Pony inn\nname Barrow").expect("script parses");
        assert_eq!(steps[0], Step::Tool(EditorTool::Location));
        assert_eq!(
            steps[1],
            Step::NameLocation {
                name: "Prancing Pony".to_owned(),
                kind: "inn".to_owned(),
            }
        );
        assert_eq!(
            steps[2],
            Step::NameLocation {
                name: "Barrow".to_owned(),
                kind: String::new(),
            }
        );
    }

    #[test]
    fn reports_line_numbers() {
        let error = parse("select player_1\n\nfly away").expect_err("unknown instruction");
        assert_eq!(error.to_string(), "line 3: unrecognised instruction `fly away`");

        let error = parse("radius wide").expect_err("bad number");
        assert_eq!(error.to_string(), "line 1: `wide` is not a valid number");
    }
}
