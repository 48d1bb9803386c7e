//! pendulum - driven, damped pendulum synthesizer with a terminal control surface
//!
//! Run with: cargo run --release

mod app;
mod ui;

use app::PendulumApp;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    PendulumApp::new().run()
}
