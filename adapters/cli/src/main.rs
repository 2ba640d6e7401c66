#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that replays scripted input against a map and prints
//! what the vision-source token can see.

mod map_file;
mod render;
mod script;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use fogmap_core::{Event, SessionConfig};
use fogmap_system_editor::{Editor, EditorInput};
use fogmap_world::{self as world, query, Session};
use tracing::{debug, info};

use crate::{map_file::MapFile, render::OutputFormat, script::Step};

/// Replays input against a map and renders the fog of war.
#[derive(Debug, Parser)]
#[command(name = "fogmap", version, about, long_about = None)]
struct Cli {
    /// Map file describing dimensions, walls and tokens
    #[arg(value_name = "MAP")]
    map: PathBuf,

    /// Session configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Input script to replay before rendering
    #[arg(short, long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Overrides the visibility radius, in cells
    #[arg(long, value_name = "CELLS")]
    radius: Option<f32>,

    /// Overrides the movement points available per turn
    #[arg(long, value_name = "POINTS")]
    moves: Option<u32>,

    /// Number of animation steps to run after the script
    #[arg(long, default_value_t = 0)]
    ticks: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value = "ascii")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = session_config(&cli)?;

    let map = MapFile::load(&cli.map)
        .with_context(|| format!("failed to load map {}", cli.map.display()))?;
    let steps = match &cli.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let id = map.id();
    let mut session = match map.tokens() {
        Some(tokens) => Session::open_with_tokens(&map, &id, tokens, config),
        None => Session::open(&map, &id, config),
    }
    .with_context(|| format!("failed to open map `{id}`"))?;

    let mut editor = Editor::new();
    for step in steps {
        match step {
            Step::Apply(commands) => {
                for command in commands {
                    apply(&mut session, command);
                }
            }
            Step::Tick(dt) => {
                let dt = dt.unwrap_or_else(|| step_interval(&session));
                apply(&mut session, fogmap_core::Command::Tick { dt });
            }
            Step::Tool(tool) => editor.set_tool(tool),
            Step::NameLocation { name, kind } => editor.prepare_location(name, kind),
            Step::Edit { screen, pressed } => {
                let mapper = query::mapper(&session);
                let input = EditorInput::new(pressed, !pressed, mapper.screen_to_cell(screen))
                    .with_map_position(mapper.screen_to_map(screen));
                let mut commands = Vec::new();
                editor.handle(input, &mut commands);
                for command in commands {
                    apply(&mut session, command);
                }
            }
            Step::Render => render::write_frame(&session, cli.format, out)?,
        }
    }

    for _ in 0..cli.ticks {
        let dt = step_interval(&session);
        apply(&mut session, fogmap_core::Command::Tick { dt });
    }

    render::write_frame(&session, cli.format, out)
}

fn session_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => SessionConfig::default(),
    };
    if let Some(radius) = cli.radius {
        config.visibility_radius = radius;
    }
    if let Some(moves) = cli.moves {
        config.movement_points = moves;
    }
    config
        .validate()
        .context("invalid session configuration")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<SessionConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
}

fn load_script(path: &Path) -> Result<Vec<Step>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read script {}", path.display()))?;
    script::parse(&contents).with_context(|| format!("invalid script {}", path.display()))
}

fn step_interval(session: &Session) -> Duration {
    query::config(session).step_interval()
}

fn apply(session: &mut Session, command: fogmap_core::Command) {
    let mut events = Vec::new();
    world::apply(session, command, &mut events);
    for event in events {
        match event {
            Event::MoveRejected {
                token,
                target,
                reason,
            } => info!(token = %token, target = %target, %reason, "move rejected"),
            other => debug!(event = ?other, "session event"),
        }
    }
}
