use crate::grid::Grid;

use rand::Rng;

/// Apply the recursive backtracker maze generation algorithm to a grid.
/// It works by walking a random depth-first path through the cells, knocking
/// down the wall-pair to each newly visited cell, and backing up whenever the
/// current cell has no unvisited neighbours left. Every cell gets visited
/// exactly once, so the open passages form a spanning tree over the grid graph
/// - a perfect maze with exactly `size - 1` open wall-pairs and no cycles.
///
/// The random source is passed in rather than taken from a global so that a
/// seeded generator reproduces an identical maze, which the tests rely upon.
/// Given a fixed random sequence the rest of the algorithm is deterministic:
/// unvisited neighbours are always considered in N, S, E, W order before the
/// uniform pick.
///
/// The visited flags are generation scratch state only and are all reset
/// before returning.
pub fn recursive_backtracker<R: Rng>(grid: &mut Grid, rng: &mut R) {
    let start_coord = grid.random_cell(rng);
    grid.mark_visited(start_coord);

    let mut stack = vec![start_coord];
    while let Some(&current_coord) = stack.last() {

        let unvisited = grid.unvisited_neighbours(current_coord);
        if unvisited.is_empty() {
            // Dead end - backtrack.
            stack.pop();
        } else {
            let next_coord = unvisited[rng.gen::<usize>() % unvisited.len()];
            grid.remove_walls(current_coord, next_coord);
            grid.mark_visited(next_coord);
            stack.push(next_coord);
        }
    }

    grid.clear_all_visited();
}

#[cfg(test)]
mod tests {

    use quickcheck::quickcheck;
    use rand::{SeedableRng, XorShiftRng};

    use super::*;
    use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
    use crate::utils;

    fn seeded_rng(seed: u32) -> XorShiftRng {
        // Xorshift cannot take an all zeroes seed.
        XorShiftRng::from_seed([seed.wrapping_add(1), 0x9e37_79b9, 0x85eb_ca6b, 0xc2b2_ae35])
    }

    fn small_dimension(dim: u8) -> usize {
        2 + (dim % 12) as usize
    }

    /// Flood fill along open passages from the origin cell.
    fn reachable_cells_count(grid: &Grid) -> usize {
        let start = Cartesian2DCoordinate::new(0, 0);
        let mut seen = utils::fnv_hashset(grid.size());
        seen.insert(start);

        let mut frontier = vec![start];
        while let Some(coord) = frontier.pop() {
            for &dir in &*grid.open_directions(coord) {
                let neighbour_coord = grid.neighbour_at_direction(coord, dir)
                                          .expect("open wall on the grid boundary");
                if seen.insert(neighbour_coord) {
                    frontier.push(neighbour_coord);
                }
            }
        }

        seen.len()
    }

    #[test]
    fn generated_maze_is_a_spanning_tree() {
        fn prop(dim: u8, seed: u32) -> bool {
            let dimension = small_dimension(dim);
            let mut g = Grid::new(dimension).unwrap();
            recursive_backtracker(&mut g, &mut seeded_rng(seed));

            // Connected with exactly size - 1 open wall-pairs => acyclic.
            g.links_count() == g.size() - 1 && reachable_cells_count(&g) == g.size()
        }
        quickcheck(prop as fn(u8, u32) -> bool);
    }

    #[test]
    fn generation_scratch_state_is_fully_reset() {
        fn prop(dim: u8, seed: u32) -> bool {
            let dimension = small_dimension(dim);
            let mut g = Grid::new(dimension).unwrap();
            recursive_backtracker(&mut g, &mut seeded_rng(seed));
            g.iter().all(|coord| !g.is_visited(coord))
        }
        quickcheck(prop as fn(u8, u32) -> bool);
    }

    #[test]
    fn wall_pairs_stay_symmetric() {
        fn prop(dim: u8, seed: u32) -> bool {
            let dimension = small_dimension(dim);
            let mut g = Grid::new(dimension).unwrap();
            recursive_backtracker(&mut g, &mut seeded_rng(seed));

            g.iter().all(|coord| {
                CompassPrimary::ALL.iter().all(|&dir| {
                    match g.neighbour_at_direction(coord, dir) {
                        Some(neighbour_coord) => {
                            g.is_wall_closed(coord, dir) ==
                            g.is_wall_closed(neighbour_coord, dir.opposite())
                        }
                        // Boundary walls can never be carved.
                        None => g.is_wall_closed(coord, dir),
                    }
                })
            })
        }
        quickcheck(prop as fn(u8, u32) -> bool);
    }

    #[test]
    fn identical_seeds_reproduce_identical_mazes() {
        let mut first = Grid::new(8).unwrap();
        let mut second = Grid::new(8).unwrap();
        recursive_backtracker(&mut first, &mut seeded_rng(0xcafe));
        recursive_backtracker(&mut second, &mut seeded_rng(0xcafe));

        for coord in first.iter() {
            assert_eq!(first.open_directions(coord), second.open_directions(coord));
        }
        assert_eq!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn different_seeds_usually_differ() {
        let mut first = Grid::new(8).unwrap();
        let mut second = Grid::new(8).unwrap();
        recursive_backtracker(&mut first, &mut seeded_rng(1));
        recursive_backtracker(&mut second, &mut seeded_rng(2));

        // Not a hard guarantee for any single pair of seeds, but an 8x8 maze
        // colliding across these two would indicate the rng is not really
        // driving the walk.
        assert_ne!(format!("{}", first), format!("{}", second));
    }

    #[test]
    fn smallest_valid_maze_generates() {
        let mut g = Grid::new(2).unwrap();
        recursive_backtracker(&mut g, &mut seeded_rng(42));
        assert_eq!(g.links_count(), 3);
        assert_eq!(reachable_cells_count(&g), 4);
    }
}
