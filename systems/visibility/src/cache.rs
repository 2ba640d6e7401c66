use fogmap_core::{Cell, GridSpec, VisibleSet, WallSet};

/// Memoises the most recent visibility field.
///
/// The field is keyed by origin, radius, grid and the version of the wall set
/// it was computed against. A cache must only ever be fed a single wall set;
/// call [`VisibilityCache::invalidate`] after replacing the set wholesale.
#[derive(Debug, Default)]
pub struct VisibilityCache {
    key: Option<FieldKey>,
    field: VisibleSet,
    computations: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct FieldKey {
    origin: Cell,
    radius_bits: u32,
    walls_version: u64,
    cell_size_bits: u32,
    columns: i32,
    rows: i32,
}

impl VisibilityCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the field for the inputs, recomputing only when they changed.
    ///
    /// The boolean reports whether a fresh computation took place.
    pub fn refresh(
        &mut self,
        origin: Cell,
        radius: f32,
        walls: &WallSet,
        grid: &GridSpec,
    ) -> (&VisibleSet, bool) {
        let key = FieldKey {
            origin,
            radius_bits: radius.to_bits(),
            walls_version: walls.version(),
            cell_size_bits: grid.cell_size().to_bits(),
            columns: grid.columns(),
            rows: grid.rows(),
        };

        let stale = self.key != Some(key);
        if stale {
            self.field = crate::compute(origin, radius, walls, grid);
            self.key = Some(key);
            self.computations += 1;
        }

        (&self.field, stale)
    }

    /// Most recently computed field, empty before the first refresh.
    #[must_use]
    pub fn field(&self) -> &VisibleSet {
        &self.field
    }

    /// Number of full computations performed so far.
    #[must_use]
    pub const fn computations(&self) -> u64 {
        self.computations
    }

    /// Forgets the memoised field so the next refresh recomputes.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}
