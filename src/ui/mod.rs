mod application;
mod window;

pub use application::IplanApplication;
pub use window::{IplanWindow, MainWindow};
