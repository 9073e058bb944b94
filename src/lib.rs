//! **qmaze** is a maze generation and visualisation library with an
//! experimental quantum-circuit encoding of maze walks.

pub mod cells;
pub mod circuit;
pub mod generators;
pub mod grid;
pub mod renderers;
#[cfg(feature = "screen")]
mod sdl;
#[cfg(test)]
mod utils;
