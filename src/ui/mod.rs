pub mod draw;
pub mod gamepad;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod sound;
pub mod surface;
