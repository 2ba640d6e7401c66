//! Text renderings of a session frame.

use std::io::Write;

use anyhow::{Context, Result};
use fogmap_core::{Cell, Frame};
use fogmap_world::{query, Session};

/// Output format selected on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    /// Character map of the player's view followed by a status line.
    Ascii,
    /// One JSON document per frame.
    Json,
}

/// Writes the current frame of the session in the requested format.
///
/// ASCII output lists placed locations below the status line.
pub(crate) fn write_frame(
    session: &Session,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    let frame = query::frame(session);
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string(&frame).context("failed to encode frame")?;
            writeln!(out, "{json}")?;
        }
        OutputFormat::Ascii => {
            for line in ascii_lines(session, &frame) {
                writeln!(out, "{line}")?;
            }
            writeln!(out, "{}", status_line(session))?;
            for location in query::locations(session) {
                writeln!(
                    out,
                    "location {} ({}) at {}, {}",
                    location.name, location.kind, location.position.x, location.position.y
                )?;
            }
        }
    }
    Ok(())
}

/// Renders the player's view, one string per row.
///
/// `@` marks the vision source, `&` any other token, `#` a wall, `+` a door
/// and `.` open floor. Cells outside the field of view are blank. Without a
/// valid grid the bounding box of the visible cells is drawn instead.
pub(crate) fn ascii_lines(session: &Session, frame: &Frame) -> Vec<String> {
    let Some((min, max)) = bounds(session, frame) else {
        return Vec::new();
    };

    let vision_source = query::config(session).vision_source_id();
    let visible = query::visible_set(session);
    let walls = query::walls(session);
    let doors = query::doors(session);

    (min.y()..=max.y())
        .map(|y| {
            (min.x()..=max.x())
                .map(|x| {
                    let cell = Cell::new(x, y);
                    if let Some(token) = frame.tokens.iter().find(|token| token.cell() == cell) {
                        if token.id == vision_source {
                            return '@';
                        }
                        if visible.contains(cell) {
                            return '&';
                        }
                    }
                    if !visible.contains(cell) {
                        ' '
                    } else if walls.contains(cell) {
                        '#'
                    } else if doors.contains(cell) {
                        '+'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect()
}

fn bounds(session: &Session, frame: &Frame) -> Option<(Cell, Cell)> {
    let grid = query::grid(session);
    if grid.is_valid() {
        if grid.columns() == 0 || grid.rows() == 0 {
            return None;
        }
        return Some((
            Cell::new(0, 0),
            Cell::new(grid.columns() - 1, grid.rows() - 1),
        ));
    }

    let first = *frame.visible.first()?;
    let (min, max) = frame
        .visible
        .iter()
        .fold((first, first), |(min, max), cell| {
            (
                Cell::new(min.x().min(cell.x()), min.y().min(cell.y())),
                Cell::new(max.x().max(cell.x()), max.y().max(cell.y())),
            )
        });
    Some((min, max))
}

fn status_line(session: &Session) -> String {
    let budget = query::budget(session);
    let selected = query::selected(session).map_or("-", |token| token.as_str());
    format!(
        "moves {}/{}  radius {}  selected {}",
        budget.used(),
        budget.total(),
        query::visibility_radius(session),
        selected
    )
}
