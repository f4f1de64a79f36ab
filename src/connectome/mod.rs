mod clean;
mod graph;
mod matrix;
mod sheet;

pub use clean::clean_adjacency;
pub use graph::{ConnectomeGraph, Edge};
pub use matrix::AdjacencyMatrix;
pub use sheet::{Cell, RawTable, load_sheet};
