//! Fuzzes the pathfinding system by checking for many random lattices that a
//! path is found exactly when the endpoints share a connected component, and
//! that every found path is valid and at least as expensive as the heuristic
//! estimate between its endpoints.
use lattice_pathfinding::{
    find_path, CellId, GridDimensions, LatticeGrid, MoveCostModel, Search, SearchStatus,
};
use rand::prelude::*;
use std::collections::HashSet;

fn random_grid(cells: [usize; 3], rng: &mut StdRng) -> LatticeGrid {
    let dims = GridDimensions {
        size: [cells[0] as f64, cells[1] as f64, cells[2] as f64],
        cells,
    };
    let mut grid = LatticeGrid::new(dims).unwrap();
    let ids: Vec<CellId> = grid.cells.keys().copied().collect();
    for id in ids {
        if rng.gen_bool(0.4) {
            grid.set_traversable(&id, false).unwrap();
        }
    }
    grid
}

fn assert_valid_path(grid: &LatticeGrid, path: &[CellId], start: CellId, goal: CellId) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for pair in path.windows(2) {
        assert!(grid.cell(&pair[0]).unwrap().neighbours.contains(&pair[1]));
        assert!(grid.is_traversable(&pair[1]));
    }
    let unique: HashSet<&CellId> = path.iter().collect();
    assert_eq!(unique.len(), path.len());
}

#[test]
fn fuzz() {
    const CELLS: [usize; 3] = [5, 2, 5];
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(CELLS, &mut rng);
        let start = grid.id_at([0, 0, 0]).unwrap();
        let end = grid.id_at([4, 1, 4]).unwrap();
        grid.set_traversable(&start, true).unwrap();
        grid.set_traversable(&end, true).unwrap();
        grid.update();
        let reachable = grid.reachable(&start, &end);
        let path = find_path(&grid, start, end);
        // Show the grid if the outcome disagrees with the components
        if path.is_ok() != reachable {
            println!("start {start}, end {end}, reachable {reachable}");
            println!("{grid}");
        }
        assert_eq!(path.is_ok(), reachable);
        if let Ok(path) = path {
            assert_valid_path(&grid, &path, start, end);
        }
    }
}

#[test]
fn fuzz_stepped_matches_synchronous() {
    const CELLS: [usize; 3] = [4, 3, 4];
    const N_GRIDS: usize = 500;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut grid = random_grid(CELLS, &mut rng);
        let start = grid.id_at([0, 0, 0]).unwrap();
        let end = grid.id_at([3, 2, 3]).unwrap();
        grid.set_traversable(&start, true).unwrap();
        grid.set_traversable(&end, true).unwrap();
        grid.update();

        let synchronous = find_path(&grid, start, end);

        let mut search = Search::new(&grid, start, end).unwrap();
        while search.step() == SearchStatus::Running {}
        match search.status() {
            SearchStatus::Found => {
                let path = search.path().unwrap();
                // An admissible heuristic never overestimates the real cost.
                let model = MoveCostModel::new(&grid.dimensions);
                assert!(model.path_cost(&path) >= model.cost_between(&start, &end) - 1e-9);
                assert_eq!(Ok(path), synchronous);
            }
            SearchStatus::Exhausted => assert!(synchronous.is_err()),
            SearchStatus::Running => unreachable!(),
        }
    }
}
