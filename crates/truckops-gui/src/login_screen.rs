//! Login screen

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Ui};
use truckops_app::{Backend, Route};
use truckops_domain::repository::AuthProvider;
use truckops_domain::service::credentials::validate_login;
use truckops_store::SessionStore;
use truckops_types::{Result, Session};

use crate::widgets::{auth_field, show_status};

pub struct LoginScreen {
    email: String,
    password: String,
    is_submitting: bool,
    result_rx: Option<Receiver<Result<Session>>>,
    status_message: Option<(String, bool)>,
}

impl LoginScreen {
    pub fn new() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            is_submitting: false,
            result_rx: None,
            status_message: None,
        }
    }

    /// Set by the app when a protected screen redirects here.
    pub fn set_status(&mut self, message: &str, is_error: bool) {
        self.status_message = Some((message.to_string(), is_error));
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        backend: Option<&Backend>,
        sessions: &mut SessionStore,
    ) -> Option<Route> {
        let mut nav = self.poll(ui.ctx(), sessions);

        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("TruckOps");
            ui.add_space(10.0);
            ui.label("Welcome Back!");
            ui.add_space(20.0);

            auth_field(ui, &mut self.email, "Email", "Enter your email address", false);
            ui.add_space(8.0);
            auth_field(ui, &mut self.password, "Password", "Enter password", true);
            ui.add_space(16.0);

            let button = egui::Button::new("Login").min_size(egui::vec2(300.0, 40.0));
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
                        if ui.link("Create an account").clicked() {
                            nav = Some(Route::Signup);
                        }
                        ui.label(" | ");
                        if ui.link("Forgot Password").clicked() {
                            nav = Some(Route::Renew);
                        }
                    },
                );
            });

            show_status(ui, &self.status_message);
        });

        nav
    }

    fn poll(&mut self, ctx: &egui::Context, sessions: &mut SessionStore) -> Option<Route> {
        let rx = self.result_rx.as_ref()?;
        match rx.try_recv() {
            Ok(Ok(session)) => {
                self.is_submitting = false;
                self.result_rx = None;
                self.password.clear();
                self.status_message = None;
                if let Err(e) = sessions.set_session(&session) {
                    tracing::warn!(error = %e, "failed to persist session");
                    self.status_message = Some((e.user_message(), true));
                    return None;
                }
                Some(Route::Dashboard)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "login failed");
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
        if let Err(e) = validate_login(&self.email, &self.password) {
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
            let _ = tx.send(auth.sign_in(&email, &password));
        });
    }
}

impl Default for LoginScreen {
    fn default() -> Self {
        Self::new()
    }
}
