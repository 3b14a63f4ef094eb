pub mod gateway;
pub mod geometry;
