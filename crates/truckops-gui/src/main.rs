//! GUI entry point for TruckOps

mod app;
mod chart;
mod dashboard_screen;
mod load_form;
mod loads_screen;
mod login_screen;
mod renew_screen;
mod setup_screen;
mod signup_screen;
mod widgets;

use app::TruckOpsApp;
use eframe::egui;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "truckops=info".into()),
        )
        .init();

    let sessions = app::open_session_store().expect("no writable session store location");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TruckOps",
        options,
        Box::new(move |cc| Ok(Box::new(TruckOpsApp::new(cc, sessions)))),
    )
}
