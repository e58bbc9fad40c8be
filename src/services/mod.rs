pub mod aggregate;
pub mod node_loader;
pub mod sample_data;
pub mod sort_engine;
