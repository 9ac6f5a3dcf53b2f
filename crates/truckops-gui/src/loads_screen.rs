//! Loads list: recent loads table with per-row delete

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Context, Grid, RichText, ScrollArea, Ui};
use truckops_app::Backend;
use truckops_domain::model::Load;
use truckops_domain::repository::LoadRepository;
use truckops_infra::SupabaseLoadRepository;
use truckops_types::Result;

use crate::load_form::LoadFormSheet;
use crate::widgets::{header_bar, show_status};

const RECENT_LIMIT: usize = 10;

/// The delete interaction, one row at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeleteFlow {
    Idle,
    /// Waiting for the user to confirm deleting this id
    Confirming(i64),
    /// The delete request is in flight
    Deleting(i64),
}

impl DeleteFlow {
    fn request(self, id: i64) -> Self {
        match self {
            // a delete in flight wins over a new click
            DeleteFlow::Deleting(_) => self,
            _ => DeleteFlow::Confirming(id),
        }
    }

    fn confirm(self) -> Self {
        match self {
            DeleteFlow::Confirming(id) => DeleteFlow::Deleting(id),
            other => other,
        }
    }

    fn cancel(self) -> Self {
        match self {
            DeleteFlow::Confirming(_) => DeleteFlow::Idle,
            other => other,
        }
    }
}

pub struct LoadsScreen {
    rows: Vec<Load>,
    is_loading: bool,
    fetch_rx: Option<Receiver<Result<Vec<Load>>>>,
    delete_flow: DeleteFlow,
    delete_rx: Option<Receiver<Result<()>>>,
    status_message: Option<(String, bool)>,
    add_load: LoadFormSheet,
}

impl LoadsScreen {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            is_loading: false,
            fetch_rx: None,
            delete_flow: DeleteFlow::Idle,
            delete_rx: None,
            status_message: None,
            add_load: LoadFormSheet::new(),
        }
    }

    /// Refetch the dispatcher's recent loads in the background.
    pub fn refresh(&mut self, repo: &SupabaseLoadRepository) {
        let repo = repo.clone();
        let (tx, rx) = channel();
        self.fetch_rx = Some(rx);
        self.is_loading = true;
        thread::spawn(move || {
            let _ = tx.send(repo.recent(RECENT_LIMIT));
        });
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        backend: Option<&Backend>,
        repo: Option<&SupabaseLoadRepository>,
    ) {
        self.poll(ui.ctx(), repo);

        if self.add_load.ui(ui.ctx(), backend, repo) {
            self.status_message = Some(("New load added successfully.".to_string(), false));
            if let Some(repo) = repo {
                self.refresh(repo);
            }
        }

        if header_bar(ui, "Loads") {
            self.add_load.open();
        }
        show_status(ui, &self.status_message);
        ui.add_space(12.0);

        self.confirm_dialog(ui.ctx(), repo);

        if self.is_loading && self.rows.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.spinner();
            });
            return;
        }

        if self.rows.is_empty() {
            ui.label("No loads yet. Add your first one.");
            return;
        }

        ScrollArea::vertical().show(ui, |ui| {
            self.table(ui);
        });
    }

    fn table(&mut self, ui: &mut Ui) {
        Grid::new("loads_table")
            .striped(true)
            .spacing(egui::vec2(16.0, 8.0))
            .show(ui, |ui| {
                for header in [
                    "Date",
                    "Company",
                    "Driver",
                    "Origin",
                    "Destination",
                    "Miles",
                    "Deadhead",
                    "Total Miles",
                    "Rate",
                    "Rate/Mile",
                    "",
                ] {
                    ui.label(RichText::new(header).strong());
                }
                ui.end_row();

                for row in &self.rows {
                    ui.label(row.display_date());
                    ui.label(&row.company_name);
                    ui.label(&row.driver_name);
                    ui.label(&row.origin);
                    ui.label(&row.destination);
                    ui.label(row.miles_driven.to_string());
                    ui.label(row.deadhead.to_string());
                    ui.label(row.total_miles.to_string());
                    ui.label(match row.total_rate {
                        Some(rate) => format!("$ {}", rate),
                        None => "-".to_string(),
                    });
                    ui.label(match row.rate_per_mile {
                        Some(rpm) => format!("{:.2}", rpm),
                        None => "-".to_string(),
                    });

                    let deleting = self.delete_flow == DeleteFlow::Deleting(row.id);
                    if deleting {
                        ui.spinner();
                    } else if ui.button("🗑").clicked() {
                        self.delete_flow = self.delete_flow.request(row.id);
                    }
                    ui.end_row();
                }
            });
    }

    fn confirm_dialog(&mut self, ctx: &Context, repo: Option<&SupabaseLoadRepository>) {
        let DeleteFlow::Confirming(id) = self.delete_flow else {
            return;
        };

        egui::Window::new("Please confirm")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Are you sure you want to delete this file?");
                ui.add_space(12.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        self.delete_flow = self.delete_flow.confirm();
                        self.start_delete(id, repo);
                    }
                    if ui.button("No").clicked() {
                        self.delete_flow = self.delete_flow.cancel();
                    }
                });
            });
    }

    fn start_delete(&mut self, id: i64, repo: Option<&SupabaseLoadRepository>) {
        let Some(repo) = repo else {
            self.delete_flow = DeleteFlow::Idle;
            self.status_message = Some(("You are not logged in.".to_string(), true));
            return;
        };
        let repo = repo.clone();
        let (tx, rx) = channel();
        self.delete_rx = Some(rx);
        self.status_message = None;
        thread::spawn(move || {
            let _ = tx.send(repo.delete(id));
        });
    }

    fn poll(&mut self, ctx: &Context, repo: Option<&SupabaseLoadRepository>) {
        if let Some(rx) = self.fetch_rx.as_ref() {
            match rx.try_recv() {
                Ok(Ok(rows)) => {
                    self.is_loading = false;
                    self.fetch_rx = None;
                    self.rows = rows;
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "loads fetch failed");
                    self.is_loading = false;
                    self.fetch_rx = None;
                    self.status_message = Some((e.user_message(), true));
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    ctx.request_repaint();
                }
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.is_loading = false;
                    self.fetch_rx = None;
                }
            }
        }

        if let Some(rx) = self.delete_rx.as_ref() {
            match rx.try_recv() {
                Ok(Ok(())) => {
                    self.delete_rx = None;
                    self.delete_flow = DeleteFlow::Idle;
                    self.status_message =
                        Some(("Load was deleted successfully".to_string(), false));
                    if let Some(repo) = repo {
                        self.refresh(repo);
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "load delete failed");
                    self.delete_rx = None;
                    self.delete_flow = DeleteFlow::Idle;
                    self.status_message = Some((e.user_message(), true));
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    ctx.request_repaint();
                }
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.delete_rx = None;
                    self.delete_flow = DeleteFlow::Idle;
                }
            }
        }
    }
}

impl Default for LoadsScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delete_needs_explicit_confirmation() {
        let flow = DeleteFlow::Idle.request(7);
        assert_eq!(flow, DeleteFlow::Confirming(7));
        assert_eq!(flow.confirm(), DeleteFlow::Deleting(7));
    }

    #[test]
    fn cancel_returns_to_idle() {
        let flow = DeleteFlow::Idle.request(7);
        assert_eq!(flow.cancel(), DeleteFlow::Idle);
    }

    #[test]
    fn in_flight_delete_ignores_new_requests() {
        let flow = DeleteFlow::Deleting(7);
        assert_eq!(flow.request(9), DeleteFlow::Deleting(7));
        assert_eq!(flow.cancel(), DeleteFlow::Deleting(7));
    }

    #[test]
    fn confirm_without_request_is_a_no_op() {
        assert_eq!(DeleteFlow::Idle.confirm(), DeleteFlow::Idle);
    }
}
