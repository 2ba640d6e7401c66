use fogmap_core::{Cell, GridSpec, MoveRejection, WallSet};
use fogmap_system_movement::{check, preview, validate};

const FALLBACK: i32 = 100;

fn grid() -> GridSpec {
    GridSpec::new(1000, 800, 50.0)
}

#[test]
fn wall_target_is_rejected_regardless_of_budget() {
    let walls = WallSet::from_cells([Cell::new(6, 5)]);
    let from = Cell::new(5, 5);

    for remaining in [0, 1, 5, u32::MAX] {
        assert_eq!(
            check(from, Cell::new(6, 5), &walls, &grid(), remaining, FALLBACK),
            Err(MoveRejection::WallBlocked),
            "budget {remaining} must not override a wall"
        );
    }
}

#[test]
fn empty_budget_only_allows_staying_put() {
    let walls = WallSet::new();
    let from = Cell::new(3, 3);

    assert!(validate(from, from, &walls, &grid(), 0, FALLBACK));
    for target in [Cell::new(4, 3), Cell::new(3, 2), Cell::new(4, 4)] {
        assert!(
            !validate(from, target, &walls, &grid(), 0, FALLBACK),
            "{target} should be unreachable without movement points"
        );
    }
}

#[test]
fn budget_boundary_is_inclusive() {
    let walls = WallSet::new();
    let from = Cell::new(5, 5);

    assert_eq!(check(from, Cell::new(8, 7), &walls, &grid(), 5, FALLBACK), Ok(()));
    assert_eq!(
        check(from, Cell::new(8, 8), &walls, &grid(), 5, FALLBACK),
        Err(MoveRejection::InsufficientBudget {
            required: 6,
            remaining: 5,
        })
    );
}

#[test]
fn targets_outside_grid_are_rejected() {
    let walls = WallSet::new();
    let grid = grid();
    let from = Cell::new(0, 0);

    assert_eq!(grid.columns(), 20);
    assert_eq!(grid.rows(), 16);
    for target in [Cell::new(-1, 0), Cell::new(0, -1), Cell::new(20, 0), Cell::new(0, 16)] {
        assert_eq!(
            check(from, target, &walls, &grid, u32::MAX, FALLBACK),
            Err(MoveRejection::OutOfBounds),
            "{target} lies outside the map"
        );
    }
    assert!(validate(from, Cell::new(19, 15), &walls, &grid, u32::MAX, FALLBACK));
}

#[test]
fn invalid_grid_falls_back_to_square_bound() {
    let walls = WallSet::new();
    let invalid = GridSpec::new(1000, 800, 0.0);
    let from = Cell::new(50, 50);

    assert!(validate(from, Cell::new(99, 50), &walls, &invalid, 100, FALLBACK));
    assert_eq!(
        check(from, Cell::new(100, 50), &walls, &invalid, 100, FALLBACK),
        Err(MoveRejection::OutOfBounds)
    );
}

#[test]
fn preview_reports_cost_and_verdict() {
    let walls = WallSet::from_cells([Cell::new(2, 2)]);
    let from = Cell::new(0, 0);

    let open = preview(from, Cell::new(1, 2), &walls, &grid(), 5, FALLBACK);
    assert_eq!(open.cost, 3);
    assert!(open.is_valid());

    let walled = preview(from, Cell::new(2, 2), &walls, &grid(), 5, FALLBACK);
    assert_eq!(walled.cost, 4);
    assert_eq!(walled.rejection, Some(MoveRejection::WallBlocked));
    assert!(!walled.is_valid());
}
