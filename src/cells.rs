use smallvec::SmallVec;
use std::convert::From;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }

    /// Creates a new `Cartesian2DCoordinate` offset 1 cell away in the given direction.
    /// Returns None if the coordinate is not representable (off the zero edge).
    /// Offsets beyond the far edge of a grid are representable here and rejected
    /// by the grid's own validity check.
    pub fn offset(&self, dir: CompassPrimary) -> Option<Cartesian2DCoordinate> {
        let (x, y) = (self.x, self.y);
        match dir {
            CompassPrimary::North => {
                if y > 0 {
                    Some(Cartesian2DCoordinate { x, y: y - 1 })
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(Cartesian2DCoordinate { x, y: y + 1 }),
            CompassPrimary::East => Some(Cartesian2DCoordinate { x: x + 1, y }),
            CompassPrimary::West => {
                if x > 0 {
                    Some(Cartesian2DCoordinate { x: x - 1, y })
                } else {
                    None
                }
            }
        }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[Cartesian2DCoordinate; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// The fixed direction query order. Neighbour and open-direction queries
    /// always report in this order, so any randomness in maze generation comes
    /// from the random source alone.
    pub const ALL: [CompassPrimary; 4] = [CompassPrimary::North,
                                          CompassPrimary::South,
                                          CompassPrimary::East,
                                          CompassPrimary::West];

    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    #[inline]
    pub(crate) fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// One grid position: four independently toggleable wall flags and a `visited`
/// flag that is scratch state for the generation algorithm only.
///
/// Wall flags always hold the pair-state invariant with their neighbours -
/// the only mutation path is `Grid::remove_walls`, which clears both facing
/// flags in the same operation.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Cell {
    pub coord: Cartesian2DCoordinate,
    walls: [bool; 4],
    visited: bool,
}

impl Cell {
    /// A fully enclosed, unvisited cell - the construction state of every grid cell.
    pub fn closed(coord: Cartesian2DCoordinate) -> Cell {
        Cell {
            coord,
            walls: [true; 4],
            visited: false,
        }
    }

    #[inline]
    pub fn is_wall_closed(&self, dir: CompassPrimary) -> bool {
        self.walls[dir.wall_index()]
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    /// The directions with an open passage out of this cell, in fixed
    /// N, S, E, W order.
    pub fn open_directions(&self) -> DirectionSmallVec {
        CompassPrimary::ALL
            .iter()
            .cloned()
            .filter(|&dir| !self.is_wall_closed(dir))
            .collect()
    }

    #[inline]
    pub(crate) fn open_wall(&mut self, dir: CompassPrimary) {
        self.walls[dir.wall_index()] = false;
    }

    #[inline]
    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}
