//! Add-load form state: derived fields and submission validation
//!
//! The form owns its field values as entered; nothing here touches
//! module-level state, so each open dialog carries its own instance.

use chrono::{Local, NaiveDate};
use truckops_types::{Error, Result};

use crate::model::NewLoad;

/// All user-editable and derived fields of one new load.
#[derive(Debug, Clone)]
pub struct LoadForm {
    pub date: NaiveDate,
    pub company_name: String,
    pub driver_name: String,
    pub origin_zip: String,
    pub origin_city: String,
    pub origin_state: String,
    pub dest_zip: String,
    pub dest_city: String,
    pub dest_state: String,
    pub miles_driven: String,
    pub deadhead: String,
    pub total_rate: String,
    /// Derived, read-only in the UI
    pub total_miles: String,
    /// Derived, read-only in the UI; blank until defined
    pub rate_per_mile: String,
}

impl LoadForm {
    pub fn new() -> Self {
        Self {
            date: Local::now().date_naive(),
            company_name: String::new(),
            driver_name: String::new(),
            origin_zip: String::new(),
            origin_city: String::new(),
            origin_state: String::new(),
            dest_zip: String::new(),
            dest_city: String::new(),
            dest_state: String::new(),
            miles_driven: String::new(),
            deadhead: "0".to_string(),
            total_rate: String::new(),
            total_miles: String::new(),
            rate_per_mile: String::new(),
        }
    }

    /// Recompute the derived fields. Called on every change to miles,
    /// deadhead, or rate. Blank or unparsable inputs count as 0; the
    /// rate per mile stays blank until miles are positive and a rate
    /// has been entered.
    pub fn recalculate(&mut self) {
        let miles = parse_or_zero(&self.miles_driven);
        let dh = parse_or_zero(&self.deadhead);
        let total = miles + dh;
        self.total_miles = format_miles(total);

        if total > 0.0 && !self.total_rate.trim().is_empty() {
            let rate = parse_or_zero(&self.total_rate);
            self.rate_per_mile = format!("{:.2}", rate / total);
        } else {
            self.rate_per_mile = String::new();
        }
    }

    /// Fill in city and state from a ZIP lookup result.
    pub fn apply_origin_lookup(&mut self, city: &str, state: &str) {
        self.origin_city = city.to_string();
        self.origin_state = state.to_string();
    }

    pub fn apply_dest_lookup(&mut self, city: &str, state: &str) {
        self.dest_city = city.to_string();
        self.dest_state = state.to_string();
    }

    /// Validate and assemble the row to insert. Every required field
    /// must be non-empty; the rejection message is the single combined
    /// one the UI shows.
    pub fn to_new_load(&self, dispatcher_id: &str) -> Result<NewLoad> {
        let required = [
            &self.company_name,
            &self.driver_name,
            &self.origin_zip,
            &self.origin_city,
            &self.origin_state,
            &self.dest_zip,
            &self.dest_city,
            &self.dest_state,
            &self.miles_driven,
            &self.deadhead,
            &self.total_rate,
        ];
        if required.iter().any(|f| f.trim().is_empty()) {
            return Err(Error::Validation(
                "Please fill out all of the fields".to_string(),
            ));
        }

        let miles_driven = parse_or_zero(&self.miles_driven);
        let deadhead = parse_or_zero(&self.deadhead);
        let total_miles = miles_driven + deadhead;
        let total_rate = parse_or_zero(&self.total_rate);
        let rate_per_mile = if total_miles > 0.0 {
            round2(total_rate / total_miles)
        } else {
            0.0
        };

        Ok(NewLoad {
            date: self.date,
            company_name: self.company_name.clone(),
            driver_name: self.driver_name.clone(),
            origin: format!("{}, {}", self.origin_city, self.origin_state),
            destination: format!("{}, {}", self.dest_city, self.dest_state),
            miles_driven,
            deadhead,
            total_miles,
            total_rate,
            rate_per_mile,
            dispatcher_name: dispatcher_id.to_string(),
        })
    }

    /// Reset every field for the next entry.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for LoadForm {
    fn default() -> Self {
        Self::new()
    }
}

/// A ZIP field triggers a lookup only at exactly five digits.
pub fn should_lookup(zip: &str) -> bool {
    zip.len() == 5 && zip.chars().all(|c| c.is_ascii_digit())
}

fn parse_or_zero(value: &str) -> f64 {
    value.trim().parse::<f64>().unwrap_or(0.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn format_miles(total: f64) -> String {
    if total == total.trunc() {
        format!("{:.0}", total)
    } else {
        format!("{}", total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_form() -> LoadForm {
        let mut form = LoadForm::new();
        form.company_name = "Acme Freight".into();
        form.driver_name = "J. Doe".into();
        form.origin_zip = "30301".into();
        form.origin_city = "Atlanta".into();
        form.origin_state = "GA".into();
        form.dest_zip = "37201".into();
        form.dest_city = "Nashville".into();
        form.dest_state = "TN".into();
        form.miles_driven = "250".into();
        form.deadhead = "50".into();
        form.total_rate = "900".into();
        form.recalculate();
        form
    }

    #[test]
    fn total_miles_is_driven_plus_deadhead() {
        let mut form = LoadForm::new();
        form.miles_driven = "300".into();
        form.deadhead = "50".into();
        form.recalculate();
        assert_eq!(form.total_miles, "350");
    }

    #[test]
    fn blank_inputs_count_as_zero() {
        let mut form = LoadForm::new();
        form.miles_driven = String::new();
        form.deadhead = String::new();
        form.recalculate();
        assert_eq!(form.total_miles, "0");
        assert_eq!(form.rate_per_mile, "");
    }

    #[test]
    fn rate_per_mile_needs_miles_and_rate() {
        let mut form = LoadForm::new();
        form.total_rate = "500".into();
        form.recalculate();
        // no miles yet
        assert_eq!(form.rate_per_mile, "");

        form.miles_driven = "200".into();
        form.recalculate();
        assert_eq!(form.rate_per_mile, "2.50");
    }

    #[test]
    fn rate_per_mile_rounds_to_two_decimals() {
        let mut form = LoadForm::new();
        form.miles_driven = "300".into();
        form.total_rate = "1000".into();
        form.recalculate();
        assert_eq!(form.rate_per_mile, "3.33");
    }

    #[test]
    fn submission_rejects_any_empty_field() {
        let mut form = filled_form();
        form.driver_name = String::new();
        let err = form.to_new_load("user-1").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn submission_builds_derived_row() {
        let form = filled_form();
        let load = form.to_new_load("user-1").unwrap();
        assert_eq!(load.total_miles, 300.0);
        assert_eq!(load.total_rate, 900.0);
        assert_eq!(load.rate_per_mile, 3.0);
        assert_eq!(load.origin, "Atlanta, GA");
        assert_eq!(load.destination, "Nashville, TN");
        assert_eq!(load.dispatcher_name, "user-1");
    }

    #[test]
    fn clear_resets_fields() {
        let mut form = filled_form();
        form.clear();
        assert!(form.company_name.is_empty());
        assert_eq!(form.deadhead, "0");
        assert!(form.rate_per_mile.is_empty());
    }

    #[test]
    fn zip_lookup_only_at_five_digits() {
        assert!(should_lookup("30301"));
        assert!(!should_lookup("3030"));
        assert!(!should_lookup("303011"));
        assert!(!should_lookup("3030a"));
    }
}
