//! Dashboard: weekly stat cards and the two weekday charts

use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui::{self, Color32, Context, RichText, Ui};
use truckops_domain::repository::LoadRepository;
use truckops_domain::service::weekly_stats::{
    count_axis_max, load_count_by_weekday, rate_sum, rate_sum_by_weekday, sum_axis_max, top_rate,
    WeekWindow, WeeklySummary,
};
use truckops_infra::SupabaseLoadRepository;
use truckops_types::Result;

use crate::chart::WeeklyChart;
use crate::load_form::LoadFormSheet;
use crate::widgets::{header_bar, show_status};

const SUM_CHART_COLOR: Color32 = Color32::from_rgb(0, 150, 136);
const COUNT_CHART_COLOR: Color32 = Color32::from_rgb(66, 133, 244);

/// Everything the dashboard renders, fetched in one background pass.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub summary: WeeklySummary,
    pub sum_buckets: [f64; 7],
    pub count_buckets: [f64; 7],
}

/// Run both week queries and fold them into chart-ready numbers.
fn fetch_stats(repo: &impl LoadRepository, week: &WeekWindow) -> Result<DashboardStats> {
    let samples = repo.week_samples(week)?;
    let load_count = repo.week_count(week)?;
    Ok(DashboardStats {
        summary: WeeklySummary {
            load_count,
            rate_sum: rate_sum(&samples),
            top_rate: top_rate(&samples),
        },
        sum_buckets: rate_sum_by_weekday(&samples),
        count_buckets: load_count_by_weekday(&samples),
    })
}

pub struct DashboardScreen {
    stats: Option<DashboardStats>,
    is_loading: bool,
    stats_rx: Option<Receiver<Result<DashboardStats>>>,
    status_message: Option<(String, bool)>,
    add_load: LoadFormSheet,
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            stats: None,
            is_loading: false,
            stats_rx: None,
            status_message: None,
            add_load: LoadFormSheet::new(),
        }
    }

    /// Kick off a background refresh of this week's numbers.
    pub fn refresh(&mut self, repo: &SupabaseLoadRepository) {
        let repo = repo.clone();
        let week = WeekWindow::current();
        let (tx, rx) = channel();
        self.stats_rx = Some(rx);
        self.is_loading = true;
        thread::spawn(move || {
            let _ = tx.send(fetch_stats(&repo, &week));
        });
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        backend: Option<&truckops_app::Backend>,
        repo: Option<&SupabaseLoadRepository>,
    ) {
        self.poll(ui.ctx());

        if self.add_load.ui(ui.ctx(), backend, repo) {
            self.status_message = Some(("New load added successfully.".to_string(), false));
            if let Some(repo) = repo {
                self.refresh(repo);
            }
        }

        if header_bar(ui, "Dashboard") {
            self.add_load.open();
        }
        show_status(ui, &self.status_message);
        ui.add_space(12.0);

        if self.is_loading && self.stats.is_none() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.spinner();
            });
            return;
        }

        let Some(stats) = self.stats.clone() else {
            ui.label("No data for this week yet.");
            return;
        };

        ui.horizontal(|ui| {
            stat_card(
                ui,
                "Total Loads This Week",
                &stats.summary.load_count.to_string(),
            );
            stat_card(
                ui,
                "Total Rate This Week",
                &format!("$ {}", stats.summary.rate_sum),
            );
            stat_card(
                ui,
                "Top Rate of This Week",
                &format!("$ {}", stats.summary.top_rate),
            );
            stat_card(ui, "Currently Active Loads", "Coming Soon");
        });

        ui.add_space(20.0);

        let half = (ui.available_width() - 24.0) / 2.0;
        ui.horizontal_top(|ui| {
            ui.allocate_ui(egui::vec2(half, 280.0), |ui| {
                WeeklyChart::new(
                    "Rate per Day",
                    &stats.sum_buckets,
                    sum_axis_max(&stats.sum_buckets),
                    SUM_CHART_COLOR,
                    sum_tick_label,
                )
                .show(ui);
            });
            ui.add_space(24.0);
            ui.allocate_ui(egui::vec2(half, 280.0), |ui| {
                WeeklyChart::new(
                    "Loads per Day",
                    &stats.count_buckets,
                    count_axis_max(&stats.count_buckets),
                    COUNT_CHART_COLOR,
                    count_tick_label,
                )
                .show(ui);
            });
        });
    }

    fn poll(&mut self, ctx: &Context) {
        let Some(rx) = self.stats_rx.as_ref() else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(stats)) => {
                self.is_loading = false;
                self.stats_rx = None;
                self.stats = Some(stats);
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "dashboard refresh failed");
                self.is_loading = false;
                self.stats_rx = None;
                self.status_message = Some((e.user_message(), true));
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {
                ctx.request_repaint();
            }
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                self.is_loading = false;
                self.stats_rx = None;
            }
        }
    }
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn stat_card(ui: &mut Ui, title: &str, value: &str) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_min_size(egui::vec2(200.0, 70.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.add_space(4.0);
                ui.label(RichText::new(value).heading());
            });
        });
}

/// Rate-chart y labels: thousands shown as "$Nk".
fn sum_tick_label(value: f64) -> String {
    if value >= 1000.0 {
        format!("${}k", value / 1000.0)
    } else {
        format!("${}", value)
    }
}

fn count_tick_label(value: f64) -> String {
    if value == value.trunc() {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use truckops_domain::model::{Load, NewLoad, RateSample};
    use truckops_types::Error;

    struct FakeRepo {
        samples: Vec<RateSample>,
        count: u64,
    }

    impl LoadRepository for FakeRepo {
        fn insert(&self, _load: &NewLoad) -> Result<()> {
            Ok(())
        }
        fn recent(&self, _limit: usize) -> Result<Vec<Load>> {
            Ok(Vec::new())
        }
        fn delete(&self, _id: i64) -> Result<()> {
            Ok(())
        }
        fn week_samples(&self, _week: &WeekWindow) -> Result<Vec<RateSample>> {
            Ok(self.samples.clone())
        }
        fn week_count(&self, _week: &WeekWindow) -> Result<u64> {
            Ok(self.count)
        }
    }

    struct FailingRepo;

    impl LoadRepository for FailingRepo {
        fn insert(&self, _load: &NewLoad) -> Result<()> {
            Err(Error::Network("down".to_string()))
        }
        fn recent(&self, _limit: usize) -> Result<Vec<Load>> {
            Err(Error::Network("down".to_string()))
        }
        fn delete(&self, _id: i64) -> Result<()> {
            Err(Error::Network("down".to_string()))
        }
        fn week_samples(&self, _week: &WeekWindow) -> Result<Vec<RateSample>> {
            Err(Error::Network("down".to_string()))
        }
        fn week_count(&self, _week: &WeekWindow) -> Result<u64> {
            Err(Error::Network("down".to_string()))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn stats_combine_samples_and_store_count() {
        // Mon and Wed of the same week
        let repo = FakeRepo {
            samples: vec![
                RateSample {
                    date: date(2026, 8, 24),
                    total_rate: Some(1200.0),
                },
                RateSample {
                    date: date(2026, 8, 26),
                    total_rate: Some(800.0),
                },
                RateSample {
                    date: date(2026, 8, 26),
                    total_rate: None,
                },
            ],
            count: 3,
        };
        let week = WeekWindow::containing(date(2026, 8, 24));
        let stats = fetch_stats(&repo, &week).unwrap();

        assert_eq!(stats.summary.load_count, 3);
        assert_eq!(stats.summary.rate_sum, 2000.0);
        assert_eq!(stats.summary.top_rate, 1200.0);
        assert_eq!(stats.sum_buckets[0], 1200.0);
        assert_eq!(stats.sum_buckets[2], 800.0);
        // the null-rate row still counts as a load on Wednesday
        assert_eq!(stats.count_buckets[2], 2.0);
    }

    #[test]
    fn empty_week_yields_zeroed_stats() {
        let repo = FakeRepo {
            samples: Vec::new(),
            count: 0,
        };
        let week = WeekWindow::containing(date(2026, 8, 24));
        let stats = fetch_stats(&repo, &week).unwrap();
        assert_eq!(stats.summary.load_count, 0);
        assert_eq!(stats.summary.rate_sum, 0.0);
        assert_eq!(stats.summary.top_rate, 0.0);
        assert_eq!(stats.sum_buckets, [0.0; 7]);
    }

    #[test]
    fn fetch_failure_propagates() {
        let week = WeekWindow::containing(date(2026, 8, 24));
        assert!(fetch_stats(&FailingRepo, &week).is_err());
    }

    #[test]
    fn sum_ticks_render_in_thousands() {
        assert_eq!(sum_tick_label(0.0), "$0");
        assert_eq!(sum_tick_label(1000.0), "$1k");
        assert_eq!(sum_tick_label(2500.0), "$2.5k");
    }

    #[test]
    fn count_ticks_drop_trailing_zeros() {
        assert_eq!(count_tick_label(4.0), "4");
        assert_eq!(count_tick_label(0.8), "0.8");
    }
}
