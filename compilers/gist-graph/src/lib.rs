pub mod graph;

pub use graph::DepGraph;
