use lattice_pathfinding::{find_path, GridDimensions, LatticeGrid};

// In this example a path is found on a flattened 5x1x5 lattice with shape
// ....E
// .....
// .###.
// .....
// S....
// S marks the start, E the end and # blocked cells.
fn main() {
    let dims = GridDimensions {
        size: [5.0, 1.0, 5.0],
        cells: [5, 1, 5],
    };
    let mut grid = LatticeGrid::new(dims).expect("dimensions are valid");
    for x in 1..4 {
        let id = grid.id_at([x, 0, 2]).expect("index is in range");
        grid.set_traversable(&id, false).expect("cell exists");
    }
    let start = grid.id_at([0, 0, 0]).expect("index is in range");
    let end = grid.id_at([4, 0, 4]).expect("index is in range");
    println!("{grid}");
    if let Ok(path) = find_path(&grid, start, end) {
        println!("A path has been found:");
        for cell in path {
            println!("{cell}");
        }
    }
}
