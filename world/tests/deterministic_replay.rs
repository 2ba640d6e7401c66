use std::time::Duration;

use fogmap_core::{
    Cell, Command, Event, Frame, GridSpec, PointerCommand, SessionConfig, TokenId, WallSet,
};
use fogmap_world::{self as world, default_tokens, query, Session};
use glam::Vec2;

#[test]
fn replaying_the_same_script_produces_identical_outcomes() {
    let first = replay(scripted_commands());
    let second = replay(scripted_commands());

    assert_eq!(first, second, "replay diverged between runs");

    let arrivals: Vec<&Cell> = first
        .events
        .iter()
        .filter_map(|event| match event {
            Event::TokenArrived { cell, .. } => Some(cell),
            _ => None,
        })
        .collect();
    assert_eq!(
        arrivals,
        vec![&Cell::new(6, 5), &Cell::new(6, 7), &Cell::new(7, 8)],
        "scripted moves must land on their requested cells"
    );

    let rejections = first
        .events
        .iter()
        .filter(|event| matches!(event, Event::MoveRejected { .. }))
        .count();
    assert_eq!(rejections, 1, "the walled cell must be refused exactly once");

    let last = first.frames.last().expect("script produces frames");
    assert_eq!(last.vision_origin, Some(Cell::new(6, 7)));
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    events: Vec<Event>,
    frames: Vec<Frame>,
}

fn replay(commands: Vec<Command>) -> ReplayOutcome {
    let config = SessionConfig {
        token_speed: 0.25,
        ..SessionConfig::default()
    };
    let mut session = Session::new(
        GridSpec::new(1000, 800, 50.0),
        WallSet::from_cells([Cell::new(7, 5), Cell::new(3, 3)]),
        default_tokens(&config),
        config,
    );

    let mut events = Vec::new();
    let mut frames = Vec::new();
    for command in commands {
        let is_tick = matches!(command, Command::Tick { .. });
        world::apply(&mut session, command, &mut events);
        if is_tick {
            frames.push(query::frame(&session));
        }
    }

    ReplayOutcome { events, frames }
}

fn ticks(count: usize) -> impl Iterator<Item = Command> {
    std::iter::repeat(Command::Tick {
        dt: Duration::from_millis(20),
    })
    .take(count)
}

fn scripted_commands() -> Vec<Command> {
    let mut commands = vec![
        Command::SelectToken {
            token: TokenId::new("player_1"),
        },
        Command::DirectionalInput { dx: 1, dy: 0 },
    ];
    commands.extend(ticks(6));
    commands.push(Command::DirectionalInput { dx: 1, dy: 0 });
    commands.push(Command::ToggleWall {
        cell: Cell::new(6, 3),
    });
    commands.push(Command::Pointer {
        screen: Vec2::new(325.0, 375.0),
        command: PointerCommand::ClickMove,
    });
    commands.extend(ticks(12));
    commands.push(Command::Pointer {
        screen: Vec2::new(375.0, 375.0),
        command: PointerCommand::Select,
    });
    commands.push(Command::Pointer {
        screen: Vec2::new(375.0, 425.0),
        command: PointerCommand::ClickMove,
    });
    commands.extend(ticks(6));
    commands
}
