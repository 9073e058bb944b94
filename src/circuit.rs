//! Experimental encoding of maze-path exploration as a quantum-style circuit.
//!
//! A walk of `steps` moves from a start cell is represented with two qubits
//! per step holding a direction code. Each step is a uniform superposition
//! over the open directions out of the current cell (the reverse of the move
//! that entered it excluded), and every branch controls the remainder of the
//! walk on its own code - a binary-tree shaped composition of controlled
//! sub-circuits mirroring the depth-first wall exploration order.
//!
//! No external simulator is targeted: the circuit is a plain recursive data
//! structure plus a flat gate lowering, which is all the maze side of the
//! experiment needs.

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, DirectionSmallVec};
use crate::grid::Grid;

use itertools::Itertools;
use std::fmt;

/// The fixed 2-bit code per direction: N:00, E:01, S:10, W:11.
pub fn direction_code(dir: CompassPrimary) -> u8 {
    match dir {
        CompassPrimary::North => 0b00,
        CompassPrimary::East => 0b01,
        CompassPrimary::South => 0b10,
        CompassPrimary::West => 0b11,
    }
}

/// Which of a step's qubit pair is X-flipped to prepare the direction ket
/// from |00>: qubit 0 for S/W, qubit 1 for E/W. Qubit 0 carries the high bit
/// of the direction code and qubit 1 the low bit.
pub fn direction_ket_flips(dir: CompassPrimary) -> [bool; 2] {
    let code = direction_code(dir);
    [code & 0b10 != 0, code & 0b01 != 0]
}

/// One encoded step alternative: take `direction`, then continue with `rest`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct WalkBranch {
    pub direction: CompassPrimary,
    pub rest: WalkCircuit,
}

/// The recursive walk encoding. `Superposition` vectors are never empty and
/// list branches in the fixed N, S, E, W direction query order.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum WalkCircuit {
    /// The step budget ran out, or the cell offers no passage at all.
    Halt,
    Superposition(Vec<WalkBranch>),
}

impl WalkCircuit {
    /// How many alternative paths the encoded walk superposes.
    pub fn path_count(&self) -> usize {
        match *self {
            WalkCircuit::Halt => 1,
            WalkCircuit::Superposition(ref branches) => {
                branches.iter().map(|branch| branch.rest.path_count()).sum()
            }
        }
    }
}

impl fmt::Display for WalkCircuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            WalkCircuit::Halt => write!(f, "."),
            WalkCircuit::Superposition(ref branches) => {
                let rendered = branches.iter()
                                       .map(|branch| {
                                           format!("{:?}:{:02b} -> {}",
                                                   branch.direction,
                                                   direction_code(branch.direction),
                                                   branch.rest)
                                       })
                                       .format(" + ");
                write!(f, "({})", rendered)
            }
        }
    }
}

/// Encode a walk of up to `steps` moves starting at `start`, where
/// `last_direction` is the move that entered the start cell.
///
/// At each cell the open directions are superposed, excluding the reverse of
/// the incoming direction. At a dead end (nothing else open) the walk is
/// forced back the way it came and continues from there - opportunistic
/// backtracking, so a budget is only cut short by a cell with no open
/// passages at all.
///
/// Panics if `start` is outside the grid.
pub fn encode_walk(grid: &Grid,
                   start: Cartesian2DCoordinate,
                   last_direction: CompassPrimary,
                   steps: usize)
                   -> WalkCircuit {
    if steps == 0 {
        return WalkCircuit::Halt;
    }

    let open = grid.open_directions(start);
    let eligible: DirectionSmallVec = open.iter()
                                          .cloned()
                                          .filter(|&dir| dir != last_direction.opposite())
                                          .collect();

    let branch = |dir: CompassPrimary| {
        let next_coord = grid.neighbour_at_direction(start, dir)
                             .expect("open wall on the grid boundary");
        WalkBranch {
            direction: dir,
            rest: encode_walk(grid, next_coord, dir, steps - 1),
        }
    };

    if eligible.is_empty() {
        // Dead end. Retracing the incoming move is the only continuation,
        // provided that passage exists (it does on any generated maze).
        let back = last_direction.opposite();
        if open.contains(&back) {
            WalkCircuit::Superposition(vec![branch(back)])
        } else {
            WalkCircuit::Halt
        }
    } else {
        WalkCircuit::Superposition(eligible.iter().cloned().map(branch).collect())
    }
}

/// A flat gate over the walk's qubits. Step `k` owns the qubit pair
/// `(2k, 2k + 1)`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Gate {
    /// Pauli X on a single qubit.
    X(usize),
    /// Prepare, on the step's qubit pair, an equal superposition of the given
    /// direction kets from |00>.
    Superpose {
        step: usize,
        directions: Vec<CompassPrimary>,
    },
    /// Apply the enclosed gates only when the step's qubit pair holds `code`.
    Controlled {
        step: usize,
        code: u8,
        gates: Vec<Gate>,
    },
}

/// The lowered form of a `WalkCircuit`: an ordered gate list over
/// `2 * steps` qubits. The qubit count depends on the step budget alone, not
/// on how far any particular path got.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Circuit {
    steps: usize,
    gates: Vec<Gate>,
}

impl Circuit {
    pub fn from_walk(walk: &WalkCircuit, steps: usize) -> Circuit {
        Circuit {
            steps,
            gates: lower_walk(walk, 0),
        }
    }

    #[inline]
    pub fn qubit_count(&self) -> usize {
        2 * self.steps
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "circuit over {} qubits", self.qubit_count())?;
        fmt_gates(f, &self.gates, 1)
    }
}

fn fmt_gates(f: &mut fmt::Formatter, gates: &[Gate], depth: usize) -> fmt::Result {
    for gate in gates {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        match *gate {
            Gate::X(qubit) => writeln!(f, "x q[{}]", qubit)?,
            Gate::Superpose { step, ref directions } => {
                writeln!(f,
                         "superpose q[{},{}] over {{{:?}}}",
                         2 * step,
                         2 * step + 1,
                         directions.iter().format(", "))?
            }
            Gate::Controlled { step, code, ref gates } => {
                writeln!(f, "when q[{},{}] == {:02b}:", 2 * step, 2 * step + 1, code)?;
                fmt_gates(f, gates, depth + 1)?;
            }
        }
    }
    Ok(())
}

fn lower_walk(walk: &WalkCircuit, step: usize) -> Vec<Gate> {
    match *walk {
        WalkCircuit::Halt => vec![],
        WalkCircuit::Superposition(ref branches) => {
            let mut gates = vec![];

            if let [ref only] = branches[..] {
                // A deterministic move needs no superposition, just the
                // direction ket preparation.
                let [flip_q0, flip_q1] = direction_ket_flips(only.direction);
                if flip_q0 {
                    gates.push(Gate::X(2 * step));
                }
                if flip_q1 {
                    gates.push(Gate::X(2 * step + 1));
                }
            } else {
                gates.push(Gate::Superpose {
                    step,
                    directions: branches.iter().map(|branch| branch.direction).collect(),
                });
            }

            for branch in branches {
                let rest_gates = lower_walk(&branch.rest, step + 1);
                if !rest_gates.is_empty() {
                    gates.push(Gate::Controlled {
                        step,
                        code: direction_code(branch.direction),
                        gates: rest_gates,
                    });
                }
            }

            gates
        }
    }
}
