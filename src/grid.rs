use crate::cells::{Cartesian2DCoordinate, Cell, CompassPrimary, CoordinateSmallVec,
                   DirectionSmallVec};

use rand::Rng;
use std::error;
use std::fmt;

/// The single validated construction precondition: an m×m grid needs m >= 2.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct InvalidDimension(pub usize);

impl fmt::Display for InvalidDimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "invalid grid dimension {}, the maze dimension must be at least 2",
               self.0)
    }
}

impl error::Error for InvalidDimension {
    fn description(&self) -> &str {
        "invalid grid dimension"
    }
}

/// An m×m collection of wall-flag cells. The grid exclusively owns its cells:
/// queries hand out shared references or copies and the only wall mutation
/// path is `remove_walls`.
#[derive(Debug, Clone)]
pub struct Grid {
    dimension: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Construct a fully walled, fully unvisited `dimension` × `dimension` grid.
    /// Fails fast with no partial state when `dimension < 2`.
    pub fn new(dimension: usize) -> Result<Grid, InvalidDimension> {
        if dimension < 2 {
            return Err(InvalidDimension(dimension));
        }

        let cells = (0..dimension * dimension)
            .map(|index| Cell::closed(index_to_grid_coordinate(dimension, index)))
            .collect();
        Ok(Grid { dimension, cells })
    }

    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.dimension * self.dimension
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cartesian2DCoordinate {
        let index = rng.gen::<usize>() % self.size();
        index_to_grid_coordinate(self.dimension, index)
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.dimension && (coord.y as usize) < self.dimension
    }

    pub fn cell(&self, coord: Cartesian2DCoordinate) -> Option<&Cell> {
        self.coordinate_index(coord).map(|index| &self.cells[index])
    }

    /// The in-bounds cell 1 step away in the given direction.
    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        coord.offset(direction)
             .and_then(|neighbour_coord| if self.is_valid_coordinate(neighbour_coord) {
                 Some(neighbour_coord)
             } else {
                 None
             })
    }

    /// Grid-adjacent cells that the generation walk has not yet visited, in
    /// fixed N, S, E, W order. No side effects.
    pub fn unvisited_neighbours(&self, coord: Cartesian2DCoordinate) -> CoordinateSmallVec {
        CompassPrimary::ALL
            .iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .filter(|&neighbour_coord| {
                !self.cell(neighbour_coord)
                     .map_or(false, Cell::is_visited)
            })
            .collect()
    }

    /// Clear the wall flag on each of two adjacent cells facing the other.
    /// Both sides of the wall-pair change in this one operation, keeping the
    /// pair-state consistent at all times.
    ///
    /// Panics unless `a` and `b` are valid and exactly grid adjacent - that is
    /// a programming contract violation, not a handled error.
    pub fn remove_walls(&mut self, a: Cartesian2DCoordinate, b: Cartesian2DCoordinate) {
        let direction = CompassPrimary::ALL
            .iter()
            .cloned()
            .find(|&dir| a.offset(dir) == Some(b))
            .expect("remove_walls requires exactly grid-adjacent cells");
        let a_index = self.coordinate_index(a)
                          .expect("remove_walls given a coordinate outside the grid");
        let b_index = self.coordinate_index(b)
                          .expect("remove_walls given b coordinate outside the grid");

        self.cells[a_index].open_wall(direction);
        self.cells[b_index].open_wall(direction.opposite());
    }

    /// Is the wall still standing on this side of the cell?
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn is_wall_closed(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        self.cell(coord)
            .expect("is_wall_closed given a coordinate outside the grid")
            .is_wall_closed(direction)
    }

    /// The open passage directions out of a cell, in fixed N, S, E, W order.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn open_directions(&self, coord: Cartesian2DCoordinate) -> DirectionSmallVec {
        self.cell(coord)
            .expect("open_directions given a coordinate outside the grid")
            .open_directions()
    }

    /// The number of open wall-pairs. A perfect maze on this grid has exactly
    /// `size() - 1` of them.
    pub fn links_count(&self) -> usize {
        // Boundary walls never open, so every open flag has a matching open
        // flag on the facing cell.
        let open_flags: usize = self.cells
                                    .iter()
                                    .map(|cell| cell.open_directions().len())
                                    .sum();
        open_flags / 2
    }

    pub fn is_visited(&self, coord: Cartesian2DCoordinate) -> bool {
        self.cell(coord).map_or(false, Cell::is_visited)
    }

    /// Panics if the coordinate is outside the grid.
    pub fn mark_visited(&mut self, coord: Cartesian2DCoordinate) {
        let index = self.coordinate_index(coord)
                        .expect("mark_visited given a coordinate outside the grid");
        self.cells[index].set_visited(true);
    }

    /// Reset the generation scratch state so the grid is a plain maze artifact again.
    pub fn clear_all_visited(&mut self) {
        for cell in &mut self.cells {
            cell.set_visited(false);
        }
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            dimension: self.dimension,
            cells_count: self.size(),
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            current_row: 0,
            dimension: self.dimension,
        }
    }

    fn coordinate_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.dimension + coord.x as usize)
        } else {
            None
        }
    }
}

/// The fixed-width ASCII art form of the maze.
///
/// The top border is a space then a `2m - 1` underscore run. Every following
/// row writes `|` for the west boundary, then per cell one south-wall
/// character (`_` closed, space open) and one east-wall character (`|` closed,
/// space open).
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::with_capacity((2 * self.dimension + 2) * (self.dimension + 1));

        output.push(' ');
        for _ in 0..(2 * self.dimension - 1) {
            output.push('_');
        }
        output.push('\n');

        for row in self.iter_row() {
            output.push('|');
            for coord in row {
                output.push(if self.is_wall_closed(coord, CompassPrimary::South) {
                    '_'
                } else {
                    ' '
                });
                output.push(if self.is_wall_closed(coord, CompassPrimary::East) {
                    '|'
                } else {
                    ' '
                });
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    dimension: usize,
    cells_count: usize,
}

impl Iterator for CellIter {
    type Item = Cartesian2DCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = index_to_grid_coordinate(self.dimension, self.current_cell_number);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.cells_count - self.current_cell_number;
        (lower_bound, Some(lower_bound))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

impl<'a> IntoIterator for &'a Grid {
    type Item = Cartesian2DCoordinate;
    type IntoIter = CellIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_row: usize,
    dimension: usize,
}

impl Iterator for BatchIter {
    type Item = Vec<Cartesian2DCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.dimension {
            let coords = (0..self.dimension)
                .map(|i| Cartesian2DCoordinate::new(i as u32, self.current_row as u32))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let lower_bound = self.dimension - self.current_row;
        (lower_bound, Some(lower_bound))
    }
}
impl ExactSizeIterator for BatchIter {} // default impl using size_hint()

fn index_to_grid_coordinate(dimension: usize, one_dimensional_index: usize) -> Cartesian2DCoordinate {
    let y = one_dimensional_index / dimension;
    let x = one_dimensional_index - (y * dimension);
    Cartesian2DCoordinate {
        x: x as u32,
        y: y as u32,
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use itertools::Itertools; // a trait
    use rand;

    #[test]
    fn dimension_must_be_at_least_two() {
        assert_eq!(Grid::new(0).err(), Some(InvalidDimension(0)));
        assert_eq!(Grid::new(1).err(), Some(InvalidDimension(1)));
        assert!(Grid::new(2).is_ok());
    }

    #[test]
    fn grid_size_and_dimension() {
        let g = Grid::new(10).unwrap();
        assert_eq!(g.dimension(), 10);
        assert_eq!(g.size(), 100);
    }

    #[test]
    fn construction_state_is_fully_walled_and_unvisited() {
        let g = Grid::new(3).unwrap();
        for coord in g.iter() {
            for &dir in &CompassPrimary::ALL {
                assert!(g.is_wall_closed(coord, dir));
            }
            assert!(!g.is_visited(coord));
        }
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn neighbour_cells() {
        let g = Grid::new(10).unwrap();

        let check_expected_neighbours = |coord, expected_neighbours: &[Cartesian2DCoordinate]| {
            let neighbours: Vec<Cartesian2DCoordinate> =
                g.unvisited_neighbours(coord).iter().cloned().sorted();
            let expected: Vec<Cartesian2DCoordinate> =
                expected_neighbours.iter().cloned().sorted();
            assert_eq!(neighbours, expected);
        };
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(1, 0), gc(0, 1)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 9), &[gc(9, 8), gc(8, 9)]);

        // side element examples
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(1, 1), gc(2, 0)]);
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);

        // Some place with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(2, 1), gc(1, 2)]);
    }

    #[test]
    fn neighbours_returned_in_fixed_compass_order() {
        let g = Grid::new(3).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        // North, South, East, West of the centre cell.
        assert_eq!(&*g.unvisited_neighbours(gc(1, 1)),
                   &[gc(1, 0), gc(1, 2), gc(2, 1), gc(0, 1)]);
    }

    #[test]
    fn visited_cells_are_not_neighbour_candidates() {
        let mut g = Grid::new(3).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        g.mark_visited(gc(1, 0));
        g.mark_visited(gc(0, 1));
        assert_eq!(&*g.unvisited_neighbours(gc(1, 1)), &[gc(1, 2), gc(2, 1)]);

        g.clear_all_visited();
        assert_eq!(&*g.unvisited_neighbours(gc(1, 1)),
                   &[gc(1, 0), gc(1, 2), gc(2, 1), gc(0, 1)]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = Grid::new(2).unwrap();
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(1, 0)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(0, 1)));
    }

    #[test]
    fn removing_walls_clears_both_facing_flags() {
        let mut g = Grid::new(4).unwrap();
        let a = Cartesian2DCoordinate::new(1, 1);
        let b = Cartesian2DCoordinate::new(1, 2); // south of a

        g.remove_walls(a, b);
        assert!(!g.is_wall_closed(a, CompassPrimary::South));
        assert!(!g.is_wall_closed(b, CompassPrimary::North));

        // Untouched sides of both cells still stand.
        for &dir in &[CompassPrimary::North, CompassPrimary::East, CompassPrimary::West] {
            assert!(g.is_wall_closed(a, dir));
        }
        for &dir in &[CompassPrimary::South, CompassPrimary::East, CompassPrimary::West] {
            assert!(g.is_wall_closed(b, dir));
        }
        assert_eq!(g.links_count(), 1);
    }

    #[test]
    fn removing_walls_argument_order_is_irrelevant() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        let mut g = Grid::new(2).unwrap();
        g.remove_walls(gc(1, 0), gc(0, 0));
        assert!(!g.is_wall_closed(gc(1, 0), CompassPrimary::West));
        assert!(!g.is_wall_closed(gc(0, 0), CompassPrimary::East));
    }

    #[test]
    #[should_panic(expected = "exactly grid-adjacent")]
    fn removing_walls_between_non_adjacent_cells_is_a_contract_violation() {
        let mut g = Grid::new(4).unwrap();
        g.remove_walls(Cartesian2DCoordinate::new(0, 0),
                       Cartesian2DCoordinate::new(2, 0));
    }

    #[test]
    #[should_panic(expected = "exactly grid-adjacent")]
    fn removing_walls_between_diagonal_cells_is_a_contract_violation() {
        let mut g = Grid::new(4).unwrap();
        g.remove_walls(Cartesian2DCoordinate::new(0, 0),
                       Cartesian2DCoordinate::new(1, 1));
    }

    #[test]
    fn random_cell() {
        let g = Grid::new(4).unwrap();
        let mut rng = rand::weak_rng();
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = Grid::new(2).unwrap();
        assert_eq!(g.iter().collect::<Vec<Cartesian2DCoordinate>>(),
                   &[Cartesian2DCoordinate::new(0, 0),
                     Cartesian2DCoordinate::new(1, 0),
                     Cartesian2DCoordinate::new(0, 1),
                     Cartesian2DCoordinate::new(1, 1)]);
    }

    #[test]
    fn row_iter() {
        let g = Grid::new(2).unwrap();
        assert_eq!(g.iter_row().collect::<Vec<Vec<Cartesian2DCoordinate>>>(),
                   &[&[Cartesian2DCoordinate::new(0, 0), Cartesian2DCoordinate::new(1, 0)],
                     &[Cartesian2DCoordinate::new(0, 1), Cartesian2DCoordinate::new(1, 1)]]);
    }

    #[test]
    fn display_of_untouched_grid_draws_every_wall() {
        let g = Grid::new(2).unwrap();
        assert_eq!(format!("{}", g), " ___\n|_|_|\n|_|_|\n");
    }

    #[test]
    fn display_top_border_width_tracks_dimension() {
        let g = Grid::new(3).unwrap();
        let text = format!("{}", g);
        assert_eq!(text.lines().next().unwrap(), " _____");
    }

    #[test]
    fn display_shows_carved_passages_as_gaps() {
        let gc = |x, y| Cartesian2DCoordinate::new(x, y);

        let mut g = Grid::new(2).unwrap();
        g.remove_walls(gc(0, 0), gc(1, 0));
        assert_eq!(format!("{}", g), " ___\n|_ _|\n|_|_|\n");

        let mut g2 = Grid::new(2).unwrap();
        g2.remove_walls(gc(0, 0), gc(0, 1));
        assert_eq!(format!("{}", g2), " ___\n| |_|\n|_|_|\n");
    }
}
