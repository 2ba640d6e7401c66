//! Read contracts of the persistence collaborator that stores maps.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Cell;

/// Identifier of a stored map.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MapId(String);

impl MapId {
    /// Creates a new map identifier.
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

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Pixel dimensions of a map image and the cell size laid over it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDimensions {
    /// Width of the map image in pixels.
    pub width: u32,
    /// Height of the map image in pixels.
    pub height: u32,
    /// Side length of a grid cell in pixels. Non-positive values disable the grid.
    pub cell_size: f32,
}

impl MapDimensions {
    /// Creates a new dimensions record.
    #[must_use]
    pub const fn new(width: u32, height: u32, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
        }
    }
}

/// Store that provides the static layout of a map.
pub trait MapSource {
    /// Loads the wall cells of the map. An empty list is a valid answer.
    fn load_walls(&self, map: &MapId) -> Result<Vec<Cell>, MapSourceError>;

    /// Loads the pixel dimensions and cell size of the map.
    fn load_map_dimensions(&self, map: &MapId) -> Result<MapDimensions, MapSourceError>;

    /// Loads the door cells of the map. Sources that keep no doors report none.
    fn load_doors(&self, _map: &MapId) -> Result<Vec<Cell>, MapSourceError> {
        Ok(Vec::new())
    }
}

/// Failures reported by a [`MapSource`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MapSourceError {
    /// The source holds no map with the requested identifier.
    #[error("map `{0}` does not exist")]
    UnknownMap(MapId),
    /// The source could not be read.
    #[error("map source unavailable: {0}")]
    Unavailable(String),
}
