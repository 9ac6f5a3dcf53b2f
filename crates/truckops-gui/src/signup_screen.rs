//! Account registration screen

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Ui};
use truckops_app::{Backend, Route};
use truckops_domain::repository::AuthProvider;
use truckops_domain::service::credentials::validate_signup;
use truckops_types::Result;

use crate::widgets::{auth_field, show_status};

/// What the screen asks the app to do.
pub enum SignupEvent {
    GoTo(Route),
    /// Registration succeeded; the app returns to login with a notice.
    Registered,
}

pub struct SignupScreen {
    email: String,
    password: String,
    confirm_password: String,
    is_submitting: bool,
    result_rx: Option<Receiver<Result<()>>>,
    status_message: Option<(String, bool)>,
}

impl SignupScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            is_submitting: false,
            result_rx: None,
            status_message: None,
        }
    }

    pub fn ui(&mut self, ui: &mut Ui, backend: Option<&Backend>) -> Option<SignupEvent> {
        let mut event = self.poll(ui.ctx());

        ui.vertical_centered(|ui| {
            ui.add_space(80.0);
            ui.heading("TruckOps");
            ui.add_space(10.0);
            ui.label("Create an Account");
            ui.add_space(20.0);

            auth_field(ui, &mut self.email, "Email", "Enter email address", false);
            ui.add_space(8.0);
            auth_field(ui, &mut self.password, "Password", "Enter password", true);
            ui.add_space(8.0);
            auth_field(
                ui,
                &mut self.confirm_password,
                "Confirm Password",
                "Confirm password",
                true,
            );
            ui.add_space(16.0);

            let button = egui::Button::new("Sign up").min_size(egui::vec2(300.0, 40.0));
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
                        ui.label("Already have an account?");
                        if ui.link("Login").clicked() {
                            event = Some(SignupEvent::GoTo(Route::Login));
                        }
                    },
                );
            });
            if ui.link("Connect to database").clicked() {
                event = Some(SignupEvent::GoTo(Route::SetupDb));
            }

            show_status(ui, &self.status_message);
        });

        event
    }

    fn poll(&mut self, ctx: &egui::Context) -> Option<SignupEvent> {
        let rx = self.result_rx.as_ref()?;
        match rx.try_recv() {
            Ok(Ok(())) => {
                self.is_submitting = false;
                self.result_rx = None;
                self.email.clear();
                self.password.clear();
                self.confirm_password.clear();
                Some(SignupEvent::Registered)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "signup failed");
                self.is_submitting = false;
                self.result_rx = None;
                self.status_message = Some((e.user_message(), true));
                None
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                ctx.request_repaint();
                None
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.is_submitting = false;
                self.result_rx = None;
                None
            }
        }
    }

    fn submit(&mut self, backend: Option<&Backend>) {
        if let Err(e) = validate_signup(&self.email, &self.password, &self.confirm_password) {
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
        let password = self.password.clone();
        let (tx, rx) = channel();
        self.result_rx = Some(rx);
        self.is_submitting = true;
        self.status_message = None;

        thread::spawn(move || {
            let _ = tx.send(auth.sign_up(&email, &password));
        });
    }
}

impl Default for SignupScreen {
    fn default() -> Self {
        Self::new()
    }
}
