//! Application shell: route state, sidebar, and screen dispatch

use eframe::egui;
use truckops_app::{Backend, Config, Route};
use truckops_store::SessionStore;

use crate::dashboard_screen::DashboardScreen;
use crate::loads_screen::LoadsScreen;
use crate::login_screen::LoginScreen;
use crate::renew_screen::RenewScreen;
use crate::setup_screen::{SetupEvent, SetupScreen};
use crate::signup_screen::{SignupEvent, SignupScreen};

/// Open the session store under the platform data dir, falling back to
/// a temporary directory when that location is not writable.
pub fn open_session_store() -> truckops_types::Result<SessionStore> {
    SessionStore::default_dir()
        .and_then(SessionStore::open)
        .or_else(|e| {
            tracing::warn!(error = %e, "falling back to a temporary session store");
            SessionStore::open(std::env::temp_dir().join("truckops"))
        })
}

pub struct TruckOpsApp {
    route: Route,
    backend: Option<Backend>,
    sessions: SessionStore,
    login: LoginScreen,
    signup: SignupScreen,
    renew: RenewScreen,
    setup: SetupScreen,
    dashboard: DashboardScreen,
    loads: LoadsScreen,
}

impl TruckOpsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, sessions: SessionStore) -> Self {
        let config = Config::load();
        let backend = match Backend::connect(&config) {
            Ok(backend) => Some(backend),
            Err(e) => {
                tracing::info!(error = %e, "starting without a configured backend");
                None
            }
        };

        Self {
            route: Route::initial(backend.is_some()),
            backend,
            sessions,
            login: LoginScreen::new(),
            signup: SignupScreen::new(),
            renew: RenewScreen::new(),
            setup: SetupScreen::new(),
            dashboard: DashboardScreen::new(),
            loads: LoadsScreen::new(),
        }
    }

    /// Switch screens, enforcing the session requirement and kicking
    /// off the data fetch a protected screen needs on entry.
    fn navigate(&mut self, target: Route) {
        let has_session = self.sessions.session().is_some();
        let resolved = target.resolve(has_session);
        if resolved != target {
            self.login
                .set_status("Session expired. Please log in again.", true);
        }
        self.route = resolved;

        if let (Some(backend), Some(session)) = (&self.backend, self.sessions.session()) {
            let repo = backend.loads(&session);
            match self.route {
                Route::Dashboard => self.dashboard.refresh(&repo),
                Route::Loads => self.loads.refresh(&repo),
                _ => {}
            }
        }
    }

    fn logout(&mut self) {
        if let Err(e) = self.sessions.clear() {
            tracing::warn!(error = %e, "failed to clear session store");
        }
        self.navigate(Route::Login);
    }

    fn sidebar(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("sidebar")
            .resizable(false)
            .exact_width(180.0)
            .show(ctx, |ui| {
                ui.add_space(16.0);
                ui.heading("TruckOps");
                ui.add_space(24.0);

                ui.label(egui::RichText::new("Menu").small());
                if ui
                    .selectable_label(self.route == Route::Dashboard, "Dashboard")
                    .clicked()
                {
                    self.navigate(Route::Dashboard);
                }

                ui.add_space(12.0);
                ui.label(egui::RichText::new("Operations").small());
                if ui
                    .selectable_label(self.route == Route::Loads, "Loads")
                    .clicked()
                {
                    self.navigate(Route::Loads);
                }
                ui.add_enabled(false, egui::SelectableLabel::new(false, "Chat"));

                ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                    ui.add_space(16.0);
                    if ui.button("Logout").clicked() {
                        self.logout();
                    }
                });
            });
    }
}

impl eframe::App for TruckOpsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A protected route whose session disappeared mid-flight falls
        // back to login on the next frame.
        if self.route.is_protected() && self.sessions.session().is_none() {
            self.navigate(self.route);
        }

        if self.route.is_protected() {
            self.sidebar(ctx);
        }

        let session = self.sessions.session();
        let repo = match (&self.backend, &session) {
            (Some(backend), Some(session)) => Some(backend.loads(session)),
            _ => None,
        };

        egui::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::Login => {
                if let Some(target) = self.login.ui(ui, self.backend.as_ref(), &mut self.sessions) {
                    self.navigate(target);
                }
            }
            Route::Signup => match self.signup.ui(ui, self.backend.as_ref()) {
                Some(SignupEvent::GoTo(target)) => self.navigate(target),
                Some(SignupEvent::Registered) => {
                    self.login
                        .set_status("You successfully registered an account!", false);
                    self.navigate(Route::Login);
                }
                None => {}
            },
            Route::Renew => {
                if let Some(target) = self.renew.ui(ui, self.backend.as_ref()) {
                    self.navigate(target);
                }
            }
            Route::SetupDb => match self.setup.ui(ui) {
                Some(SetupEvent::GoTo(target)) => self.navigate(target),
                Some(SetupEvent::Connected(backend)) => {
                    self.backend = Some(backend);
                }
                None => {}
            },
            Route::Dashboard => {
                self.dashboard.ui(ui, self.backend.as_ref(), repo.as_ref());
            }
            Route::Loads => {
                self.loads.ui(ui, self.backend.as_ref(), repo.as_ref());
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_opens_without_panicking() {
        // Either the data dir or the temp fallback must be writable.
        assert!(open_session_store().is_ok());
    }
}
