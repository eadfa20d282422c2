mod about;
mod accels;
mod actions;
mod config;
mod error;
mod shell;
mod shortcuts;
mod ui;

use gtk4::glib;
use ui::IplanApplication;

fn main() -> glib::ExitCode {
    env_logger::init();

    let app = IplanApplication::new(env!("CARGO_PKG_VERSION"));
    app.run()
}
