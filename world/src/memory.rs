use std::collections::HashMap;

use fogmap_core::{Cell, MapDimensions, MapId, MapSource, MapSourceError};

/// In-memory [`MapSource`] used by tests and embedders without persistence.
#[derive(Clone, Debug, Default)]
pub struct MemoryMapSource {
    maps: HashMap<MapId, StoredMap>,
}

#[derive(Clone, Debug)]
struct StoredMap {
    dimensions: MapDimensions,
    walls: Option<Vec<Cell>>,
    doors: Vec<Cell>,
}

impl MemoryMapSource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a map together with its walls, replacing any previous entry.
    pub fn insert<I>(&mut self, map: MapId, dimensions: MapDimensions, walls: I)
    where
        I: IntoIterator<Item = Cell>,
    {
        let _ = self.maps.insert(
            map,
            StoredMap {
                dimensions,
                walls: Some(walls.into_iter().collect()),
                doors: Vec::new(),
            },
        );
    }

    /// Stores a map whose wall data cannot be retrieved.
    pub fn insert_without_walls(&mut self, map: MapId, dimensions: MapDimensions) {
        let _ = self.maps.insert(
            map,
            StoredMap {
                dimensions,
                walls: None,
                doors: Vec::new(),
            },
        );
    }

    /// Replaces the doors of a stored map. Returns `false` when the map is
    /// unknown.
    pub fn set_doors<I>(&mut self, map: &MapId, doors: I) -> bool
    where
        I: IntoIterator<Item = Cell>,
    {
        match self.maps.get_mut(map) {
            Some(stored) => {
                stored.doors = doors.into_iter().collect();
                true
            }
            None => false,
        }
    }

    fn stored(&self, map: &MapId) -> Result<&StoredMap, MapSourceError> {
        self.maps
            .get(map)
            .ok_or_else(|| MapSourceError::UnknownMap(map.clone()))
    }
}

impl MapSource for MemoryMapSource {
    fn load_walls(&self, map: &MapId) -> Result<Vec<Cell>, MapSourceError> {
        self.stored(map)?
            .walls
            .clone()
            .ok_or_else(|| MapSourceError::Unavailable(format!("no wall data stored for `{map}`")))
    }

    fn load_map_dimensions(&self, map: &MapId) -> Result<MapDimensions, MapSourceError> {
        self.stored(map).map(|stored| stored.dimensions)
    }

    fn load_doors(&self, map: &MapId) -> Result<Vec<Cell>, MapSourceError> {
        self.stored(map).map(|stored| stored.doors.clone())
    }
}
