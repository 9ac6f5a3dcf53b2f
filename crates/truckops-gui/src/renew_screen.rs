//! Password reset screen

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Ui};
use truckops_app::{Backend, Route};
use truckops_domain::repository::AuthProvider;
use truckops_domain::service::credentials::validate_reset;
use truckops_types::Result;

use crate::widgets::{auth_field, show_status};

pub struct RenewScreen {
    email: String,
    is_submitting: bool,
    result_rx: Option<Receiver<Result<()>>>,
    status_message: Option<(String, bool)>,
}

impl RenewScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            is_submitting: false,
            result_rx: None,
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, backend: Option<&Backend>) -> Option<Route> {
        let mut nav = None;
        self.poll(ui.ctx());

        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("TruckOps");
            ui.add_space(10.0);
            ui.label("Reset Password");
            ui.add_space(6.0);
            ui.label("Please enter your email to get a password reset link.");
            ui.add_space(20.0);

            auth_field(ui, &mut self.email, "Email", "Enter your email address", false);
            ui.add_space(16.0);

            let button = egui::Button::new("Send Reset Link").min_size(egui::vec2(300.0, 40.0));
            if ui.add_enabled(!self.is_submitting, button).clicked() {
                self.submit(backend);
            }
            if self.is_submitting {
                ui.add_space(4.0);
                ui.spinner();
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.with_layout(
                    egui::Layout::left_to_right(egui::Align::Center).with_main_align(egui::Align::Center),
                    |ui| {
                        if ui.link("Login").clicked() {
                            nav = Some(Route::Login);
                        }
                        ui.label(" | ");
                        if ui.link("Create an account").clicked() {
                            nav = Some(Route::Signup);
                        }
                    },
                );
            });

            show_status(ui, &self.status_message);
        });

        nav
    }

    fn poll(&mut self, ctx: &egui::Context) {
        let Some(rx) = self.result_rx.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(())) => {
                self.is_submitting = false;
                self.result_rx = None;
                self.email.clear();
                self.status_message = Some((
                    "Password reset link sent! Please check your inbox.".to_string(),
                    false,
                ));
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "password reset failed");
                self.is_submitting = false;
                self.result_rx = None;
                self.status_message = Some((
                    "Failed to send reset email. Please try again.".to_string(),
                    true,
                ));
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                ctx.request_repaint();
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.is_submitting = false;
                self.result_rx = None;
            }
        }
    }

    fn submit(&mut self, backend: Option<&Backend>) {
        if let Err(e) = validate_reset(&self.email) {
            self.status_message = Some((e.user_message(), true));
            return;
        }
        let Some(backend) = backend else {
            self.status_message = Some((
                "Backend is not configured. Connect to a database first.".to_string(),
                true,
            ));
            return;
        };

        let auth = backend.auth().clone();
        let email = self.email.clone();
        let (tx, rx) = channel();
        self.result_rx = Some(rx);
        self.is_submitting = true;
        self.status_message = None;

        thread::spawn(move || {
            let _ = tx.send(auth.request_password_reset(&email));
        });
    }
}

impl Default for RenewScreen {
    fn default() -> Self {
        Self::new()
    }
}
