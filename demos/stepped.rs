use lattice_pathfinding::{CellId, GridDimensions, LatticeGrid, Search, SearchStatus};
use rand::prelude::*;

// Drives a search one expansion at a time, the cadence an animated consumer
// would use, between two randomly selected cells of a cluttered lattice.
fn random_traversable(grid: &LatticeGrid, rng: &mut StdRng, exclude: Option<CellId>) -> CellId {
    loop {
        let ix = rng.gen_range(0..grid.len());
        if let Some((id, cell)) = grid.cells.get_index(ix) {
            if cell.traversable && Some(*id) != exclude {
                return *id;
            }
        }
    }
}

fn main() {
    let dims = GridDimensions {
        size: [20.0, 1.0, 20.0],
        cells: [10, 1, 10],
    };
    let mut grid = LatticeGrid::new(dims).expect("dimensions are valid");
    let mut rng = StdRng::seed_from_u64(7);
    let ids: Vec<CellId> = grid.cells.keys().copied().collect();
    for id in ids {
        if rng.gen_bool(0.2) {
            grid.set_traversable(&id, false).expect("cell exists");
        }
    }
    grid.update();

    let start = random_traversable(&grid, &mut rng, None);
    let end = random_traversable(&grid, &mut rng, Some(start));
    println!("{grid}");
    println!("searching from {start} to {end}");

    let mut search = Search::new(&grid, start, end).expect("endpoints are valid");
    let mut ticks = 0;
    loop {
        match search.step() {
            SearchStatus::Running => ticks += 1,
            SearchStatus::Found => {
                let path = search.path().expect("search found the goal");
                println!("found a {} cell path after {ticks} ticks:", path.len());
                for cell in path {
                    println!("{cell}");
                }
                break;
            }
            SearchStatus::Exhausted => {
                println!("no path exists after {ticks} ticks");
                break;
            }
        }
    }
}
