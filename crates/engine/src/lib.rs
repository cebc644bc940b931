// Grid state and determinant engine

pub mod cell_input;
pub mod controller;
pub mod grid;
pub mod matrix;
