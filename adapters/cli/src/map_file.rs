//! TOML map files understood by the command-line adapter.
//!
//! ```toml
//! name = "tavern"
//! width = 1000
//! height = 800
//! cell_size = 50.0
//! walls = [[6, 5], [6, 6]]
//! doors = [[6, 7]]
//!
//! [[tokens]]
//! id = "player_1"
//! cell = [5, 5]
//! ```

use std::{fs, path::Path};

use fogmap_core::{Cell, MapDimensions, MapId, MapSource, MapSourceError, TokenId};
use serde::Deserialize;
use thiserror::Error;

/// Single map loaded from disk.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub(crate) struct MapFile {
    name: String,
    width: u32,
    height: u32,
    cell_size: f32,
    #[serde(default)]
    walls: Option<Vec<[i32; 2]>>,
    #[serde(default)]
    doors: Vec<[i32; 2]>,
    #[serde(default)]
    tokens: Vec<TokenEntry>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
struct TokenEntry {
    id: String,
    cell: [i32; 2],
}

impl MapFile {
    /// Reads and parses a map file.
    pub(crate) fn load(path: &Path) -> Result<Self, MapFileError> {
        let contents = fs::read_to_string(path).map_err(|source| MapFileError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    /// Parses map file contents.
    pub(crate) fn parse(contents: &str) -> Result<Self, MapFileError> {
        let map: Self = toml::from_str(contents)?;
        if map.name.trim().is_empty() {
            return Err(MapFileError::MissingName);
        }
        Ok(map)
    }

    /// Identifier under which the map is served.
    pub(crate) fn id(&self) -> MapId {
        MapId::new(self.name.clone())
    }

    /// Token placements declared by the file, if any.
    pub(crate) fn tokens(&self) -> Option<Vec<(TokenId, Cell)>> {
        if self.tokens.is_empty() {
            return None;
        }

        Some(
            self.tokens
                .iter()
                .map(|entry| (TokenId::new(entry.id.clone()), cell(entry.cell)))
                .collect(),
        )
    }

    fn check(&self, map: &MapId) -> Result<(), MapSourceError> {
        if map.as_str() == self.name {
            Ok(())
        } else {
            Err(MapSourceError::UnknownMap(map.clone()))
        }
    }
}

impl MapSource for MapFile {
    fn load_walls(&self, map: &MapId) -> Result<Vec<Cell>, MapSourceError> {
        self.check(map)?;
        self.walls
            .as_ref()
            .map(|walls| walls.iter().copied().map(cell).collect())
            .ok_or_else(|| MapSourceError::Unavailable(format!("map `{map}` lists no walls")))
    }

    fn load_map_dimensions(&self, map: &MapId) -> Result<MapDimensions, MapSourceError> {
        self.check(map)?;
        Ok(MapDimensions::new(self.width, self.height, self.cell_size))
    }

    fn load_doors(&self, map: &MapId) -> Result<Vec<Cell>, MapSourceError> {
        self.check(map)?;
        Ok(self.doors.iter().copied().map(cell).collect())
    }
}

fn cell([x, y]: [i32; 2]) -> Cell {
    Cell::new(x, y)
}

/// Failures raised while reading a map file.
#[derive(Debug, Error)]
pub(crate) enum MapFileError {
    /// The file could not be read.
    #[error("could not read map file {path}")]
    Io {
        /// Path that failed to load.
        path: String,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid map description.
    #[error("could not parse map file")]
    Parse(#[from] toml::de::Error),
    /// The map has an empty name.
    #[error("map file must declare a non-empty name")]
    MissingName,
}
