pub use crate::display::Display;

pub mod display;
