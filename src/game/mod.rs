pub mod constants;
pub mod controller;
pub mod grid;
pub mod input;
pub mod particles;
pub mod render;
pub mod session;
pub mod simulation;
pub mod types;
