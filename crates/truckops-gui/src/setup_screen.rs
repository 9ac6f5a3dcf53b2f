//! Backend setup screen, shown when no backend is configured

use eframe::egui::{self, Ui};
use truckops_app::{Backend, Config, Route};

use crate::widgets::{auth_field, show_status};

/// What the screen asks the app to do.
pub enum SetupEvent {
    GoTo(Route),
    /// A backend was configured and connected; the app adopts it.
    Connected(Backend),
}

pub struct SetupScreen {
    url: String,
    key: String,
    status_message: Option<(String, bool)>,
}

impl SetupScreen {
    pub fn new() -> Self {
        Self {
            url: String::new(),
            key: String::new(),
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui) -> Option<SetupEvent> {
        let mut event = None;

        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("TruckOps");
            ui.add_space(10.0);
            ui.label("Enter your database URL and KEY");
            ui.add_space(20.0);

            auth_field(ui, &mut self.url, "URL", "Enter your Supabase project URL", false);
            ui.add_space(8.0);
            auth_field(ui, &mut self.key, "KEY", "Enter your Supabase key", false);
            ui.add_space(16.0);

            let button = egui::Button::new("Connect").min_size(egui::vec2(300.0, 40.0));
            if ui.add(button).clicked() {
                event = self.connect();
            }

            ui.add_space(12.0);
            if ui.link("Back to Login").clicked() {
                event = Some(SetupEvent::GoTo(Route::Login));
            }

            show_status(ui, &self.status_message);
        });

        event
    }

    fn connect(&mut self) -> Option<SetupEvent> {
        if self.url.trim().is_empty() || self.key.trim().is_empty() {
            self.status_message = Some(("Please fill in all fields.".to_string(), true));
            return None;
        }

        let config = Config {
            supabase_url: self.url.trim().to_string(),
            supabase_key: self.key.trim().to_string(),
        };
        if let Err(e) = config.save() {
            tracing::warn!(error = %e, "failed to write env file");
            self.status_message = Some((format!("Connecting failed: {e}"), true));
            return None;
        }

        match Backend::connect(&config) {
            Ok(backend) => {
                self.status_message = Some((
                    "You successfully connected to database!".to_string(),
                    false,
                ));
                Some(SetupEvent::Connected(backend))
            }
            Err(e) => {
                tracing::warn!(error = %e, "backend connection failed");
                self.status_message = Some((format!("Connecting failed: {e}"), true));
                None
            }
        }
    }
}

impl Default for SetupScreen {
    fn default() -> Self {
        Self::new()
    }
}
