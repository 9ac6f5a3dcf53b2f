//! The "Add New Load" dialog
//!
//! Wraps the pure form state from the domain crate with the egui
//! window, background ZIP lookups, and the save call. Each sheet owns
//! its own form instance, so two windows never share field state.

use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;

use eframe::egui::{self, Context, TextEdit, Ui};
use egui_extras::DatePickerButton;
use truckops_app::Backend;
use truckops_domain::repository::LoadRepository;
use truckops_domain::service::load_form::{should_lookup, LoadForm};
use truckops_infra::CityState;
use truckops_infra::SupabaseLoadRepository;
use truckops_types::Result;

use crate::widgets::show_status;

/// Which of the two ZIP fields a lookup result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZipTarget {
    Origin,
    Destination,
}

pub struct LoadFormSheet {
    open: bool,
    form: LoadForm,
    is_saving: bool,
    save_rx: Option<Receiver<Result<()>>>,
    zip_tx: Sender<(ZipTarget, Result<CityState>)>,
    zip_rx: Receiver<(ZipTarget, Result<CityState>)>,
    /// Last ZIP value a lookup was fired for, per field
    last_origin_zip: String,
    last_dest_zip: String,
    status_message: Option<(String, bool)>,
}

impl LoadFormSheet {
    pub fn new() -> Self {
        let (zip_tx, zip_rx) = channel();
        Self {
            open: false,
            form: LoadForm::new(),
            is_saving: false,
            save_rx: None,
            zip_tx,
            zip_rx,
            last_origin_zip: String::new(),
            last_dest_zip: String::new(),
            status_message: None,
        }
    }

    pub fn open(&mut self) {
        self.open = true;
        self.form = LoadForm::new();
        self.last_origin_zip.clear();
        self.last_dest_zip.clear();
        self.status_message = None;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draw the dialog if it is open. Returns true on the frame a load
    /// was saved, so the owning screen can refetch.
    pub fn ui(
        &mut self,
        ctx: &Context,
        backend: Option<&Backend>,
        repo: Option<&SupabaseLoadRepository>,
    ) -> bool {
        if !self.open {
            return false;
        }

        let saved = self.poll(ctx);
        if saved {
            return true;
        }

        let mut keep_open = self.open;
        egui::Window::new("Add New Load")
            .open(&mut keep_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(480.0)
                    .show(ui, |ui| {
                        self.form_body(ui, backend, repo);
                    });
            });
        self.open = keep_open;

        false
    }

    fn form_body(
        &mut self,
        ui: &mut Ui,
        backend: Option<&Backend>,
        repo: Option<&SupabaseLoadRepository>,
    ) {
        ui.label("Date");
        ui.add(DatePickerButton::new(&mut self.form.date).id_salt("load_date"));
        ui.add_space(6.0);

        text_field(ui, "Company Name", &mut self.form.company_name);
        text_field(ui, "Driver Name", &mut self.form.driver_name);

        ui.add_space(6.0);
        ui.label("Origin");
        let origin_changed = digit_field(ui, "ZIP", &mut self.form.origin_zip, 5);
        if origin_changed
            && should_lookup(&self.form.origin_zip)
            && self.form.origin_zip != self.last_origin_zip
        {
            self.last_origin_zip = self.form.origin_zip.clone();
            self.lookup(backend, ZipTarget::Origin, self.form.origin_zip.clone());
        }
        text_field(ui, "City", &mut self.form.origin_city);
        text_field(ui, "State", &mut self.form.origin_state);

        ui.add_space(6.0);
        ui.label("Destination");
        let dest_changed = digit_field(ui, "ZIP", &mut self.form.dest_zip, 5);
        if dest_changed
            && should_lookup(&self.form.dest_zip)
            && self.form.dest_zip != self.last_dest_zip
        {
            self.last_dest_zip = self.form.dest_zip.clone();
            self.lookup(backend, ZipTarget::Destination, self.form.dest_zip.clone());
        }
        text_field(ui, "City", &mut self.form.dest_city);
        text_field(ui, "State", &mut self.form.dest_state);

        ui.add_space(6.0);
        let mut dirty = numeric_field(ui, "Miles Driven", &mut self.form.miles_driven);
        dirty |= numeric_field(ui, "Deadhead", &mut self.form.deadhead);
        dirty |= numeric_field(ui, "Total Rate", &mut self.form.total_rate);
        if dirty {
            self.form.recalculate();
        }

        ui.add_space(6.0);
        read_only_field(ui, "Total Miles", &self.form.total_miles);
        read_only_field(ui, "Rate per Mile", &self.form.rate_per_mile);

        ui.add_space(12.0);
        ui.horizontal(|ui| {
            let save = egui::Button::new("Save").min_size(egui::vec2(100.0, 32.0));
            if ui.add_enabled(!self.is_saving, save).clicked() {
                self.save(repo);
            }
            if ui.button("Cancel").clicked() {
                self.open = false;
            }
            if self.is_saving {
                ui.spinner();
            }
        });

        show_status(ui, &self.status_message);
    }

    /// Drain finished background work. Returns true when a save landed.
    fn poll(&mut self, ctx: &Context) -> bool {
        while let Ok((target, result)) = self.zip_rx.try_recv() {
            if !apply_lookup(&mut self.form, target, result) {
                self.status_message = Some(("Could not look up that ZIP code.".to_string(), true));
            }
        }

        if let Some(rx) = self.save_rx.as_ref() {
            match rx.try_recv() {
                Ok(Ok(())) => {
                    self.is_saving = false;
                    self.save_rx = None;
                    self.form.clear();
                    self.last_origin_zip.clear();
                    self.last_dest_zip.clear();
                    self.open = false;
                    return true;
                }
                Ok(Err(e)) => {
                    tracing::warn!(error = %e, "load insert failed");
                    self.is_saving = false;
                    self.save_rx = None;
                    self.status_message = Some((e.user_message(), true));
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => {
                    ctx.request_repaint();
                }
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    self.is_saving = false;
                    self.save_rx = None;
                }
            }
        }
        false
    }

    fn lookup(&self, backend: Option<&Backend>, target: ZipTarget, zip: String) {
        let Some(backend) = backend else {
            return;
        };
        let client = backend.zip().clone();
        let tx = self.zip_tx.clone();
        thread::spawn(move || {
            let _ = tx.send((target, client.lookup(&zip)));
        });
    }

    fn save(&mut self, repo: Option<&SupabaseLoadRepository>) {
        let Some(repo) = repo else {
            self.status_message = Some(("You are not logged in.".to_string(), true));
            return;
        };
        let load = match self.form.to_new_load(repo.dispatcher_id()) {
            Ok(load) => load,
            Err(e) => {
                self.status_message = Some((e.user_message(), true));
                return;
            }
        };

        let repo = repo.clone();
        let (tx, rx) = channel();
        self.save_rx = Some(rx);
        self.is_saving = true;
        self.status_message = None;

        thread::spawn(move || {
            let _ = tx.send(repo.insert(&load));
        });
    }
}

impl Default for LoadFormSheet {
    fn default() -> Self {
        Self::new()
    }
}

/// Apply a finished lookup to the form. City and state change only on
/// success; a failed lookup leaves them exactly as typed.
fn apply_lookup(form: &mut LoadForm, target: ZipTarget, result: Result<CityState>) -> bool {
    match result {
        Ok(place) => {
            match target {
                ZipTarget::Origin => form.apply_origin_lookup(&place.city, &place.state),
                ZipTarget::Destination => form.apply_dest_lookup(&place.city, &place.state),
            }
            true
        }
        Err(e) => {
            tracing::debug!(error = %e, "ZIP lookup failed");
            false
        }
    }
}

fn text_field(ui: &mut Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    ui.add(TextEdit::singleline(value).desired_width(280.0))
        .changed()
}

fn read_only_field(ui: &mut Ui, label: &str, value: &str) {
    ui.label(label);
    let mut shown = value.to_string();
    ui.add_enabled(
        false,
        TextEdit::singleline(&mut shown).desired_width(280.0),
    );
}

/// A text field that keeps only digits, capped at `max_len`.
fn digit_field(ui: &mut Ui, label: &str, value: &mut String, max_len: usize) -> bool {
    ui.label(label);
    let changed = ui
        .add(TextEdit::singleline(value).desired_width(120.0))
        .changed();
    if changed {
        value.retain(|c| c.is_ascii_digit());
        value.truncate(max_len);
    }
    changed
}

/// A text field that keeps only digits and at most one decimal point.
fn numeric_field(ui: &mut Ui, label: &str, value: &mut String) -> bool {
    ui.label(label);
    let changed = ui
        .add(TextEdit::singleline(value).desired_width(160.0))
        .changed();
    if changed {
        let mut seen_dot = false;
        value.retain(|c| {
            if c.is_ascii_digit() {
                true
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                true
            } else {
                false
            }
        });
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use truckops_types::Error;

    #[test]
    fn failed_lookup_leaves_city_and_state_as_typed() {
        let mut form = LoadForm::new();
        form.origin_city = "Atlanta".into();
        form.origin_state = "GA".into();

        let applied = apply_lookup(
            &mut form,
            ZipTarget::Origin,
            Err(Error::Network("503".to_string())),
        );

        assert!(!applied);
        assert_eq!(form.origin_city, "Atlanta");
        assert_eq!(form.origin_state, "GA");
    }

    #[test]
    fn successful_lookup_overwrites_only_the_target_fields() {
        let mut form = LoadForm::new();
        form.dest_city = "typo".into();

        let place = CityState {
            city: "Nashville".to_string(),
            state: "TN".to_string(),
        };
        assert!(apply_lookup(&mut form, ZipTarget::Destination, Ok(place)));

        assert_eq!(form.dest_city, "Nashville");
        assert_eq!(form.dest_state, "TN");
        assert!(form.origin_city.is_empty());
        assert!(form.origin_state.is_empty());
    }

    #[test]
    fn reopening_resets_the_form() {
        let mut sheet = LoadFormSheet::new();
        sheet.form.company_name = "Acme Freight".into();
        sheet.form.miles_driven = "250".into();

        sheet.open();

        assert!(sheet.is_open());
        assert!(sheet.form.company_name.is_empty());
        assert!(sheet.form.miles_driven.is_empty());
    }
}
