pub mod balloons;
pub mod error;
