pub mod generator;
pub mod model;
pub mod sequence;
