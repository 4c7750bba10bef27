pub mod collision;
pub mod food;
pub mod grid;
pub mod palette;
pub mod particle;
pub mod snake;
