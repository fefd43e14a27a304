//! Gomoku GUI
//!
//! Play Gomoku against the simulation engine or against another player.

use gomoku::config::load_config;
use gomoku::logging::init_tracing;
use gomoku::ui::GomokuApp;

fn main() -> Result<(), eframe::Error> {
    init_tracing("info");
    let config = load_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 750.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("Gomoku - Simulation Player"),
        ..Default::default()
    };

    eframe::run_native(
        "Gomoku",
        options,
        Box::new(|cc| Ok(Box::new(GomokuApp::new(cc, config)?))),
    )
}
