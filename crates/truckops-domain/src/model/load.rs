use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One truck shipment record as stored in the `Loads` table.
///
/// Dates are stored in ISO form so that range filters on the backend
/// work; [`display_date`] renders the "Month DD, YYYY" form the UI shows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    pub id: i64,
    pub date: NaiveDate,
    pub company_name: String,
    pub driver_name: String,
    pub origin: String,
    pub destination: String,
    pub miles_driven: f64,
    pub deadhead: f64,
    pub total_miles: f64,
    #[serde(default)]
    pub total_rate: Option<f64>,
    #[serde(default)]
    pub rate_per_mile: Option<f64>,
    pub dispatcher_name: String,
}

impl Load {
    pub fn display_date(&self) -> String {
        display_date(self.date)
    }
}

/// A load about to be inserted. The id is assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewLoad {
    pub date: NaiveDate,
    pub company_name: String,
    pub driver_name: String,
    pub origin: String,
    pub destination: String,
    pub miles_driven: f64,
    pub deadhead: f64,
    pub total_miles: f64,
    pub total_rate: f64,
    pub rate_per_mile: f64,
    pub dispatcher_name: String,
}

/// The slice of a load row the weekly aggregator needs.
///
/// `total_rate` stays optional here: rows with a null rate are counted
/// but excluded from sums and maxima.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSample {
    pub date: NaiveDate,
    #[serde(default)]
    pub total_rate: Option<f64>,
}

/// Format a date the way the UI displays it, e.g. "August 30, 2026".
pub fn display_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format_is_month_day_year() {
        let d = NaiveDate::from_ymd_opt(2026, 8, 30).unwrap();
        assert_eq!(display_date(d), "August 30, 2026");
    }

    #[test]
    fn rate_sample_tolerates_null_rate() {
        let row: RateSample = serde_json::from_str(r#"{"date":"2026-08-24"}"#).unwrap();
        assert_eq!(row.total_rate, None);
    }
}
