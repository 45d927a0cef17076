pub mod compile;
pub mod plan;
