pub mod clock;
pub mod control;
pub mod event;
pub mod save;
pub mod step;
pub mod world;
