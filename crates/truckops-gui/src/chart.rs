//! Weekly line chart drawn with the egui painter
//!
//! Seven points, Monday through Sunday, with five y-axis intervals.
//! Axis scaling comes from the weekly aggregator so the chart module
//! only maps values to pixels.

use eframe::egui::{self, Align2, Color32, FontId, Pos2, RichText, Sense, Stroke, Ui, Vec2};
use truckops_domain::service::weekly_stats::tick_interval;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
const LEFT_MARGIN: f32 = 48.0;
const BOTTOM_MARGIN: f32 = 24.0;
const TOP_MARGIN: f32 = 12.0;

pub struct WeeklyChart<'a> {
    title: &'a str,
    buckets: &'a [f64; 7],
    axis_max: f64,
    color: Color32,
    tick_label: fn(f64) -> String,
}

impl<'a> WeeklyChart<'a> {
    pub fn new(
        title: &'a str,
        buckets: &'a [f64; 7],
        axis_max: f64,
        color: Color32,
        tick_label: fn(f64) -> String,
    ) -> Self {
        Self {
            title,
            buckets,
            axis_max,
            color,
            tick_label,
        }
    }

    pub fn show(&self, ui: &mut Ui) {
        ui.vertical(|ui| {
            ui.label(RichText::new(self.title).strong());
            ui.add_space(4.0);

            let desired = Vec2::new(ui.available_width(), 240.0);
            let (response, painter) = ui.allocate_painter(desired, Sense::hover());
            let outer = response.rect;
            let plot = egui::Rect::from_min_max(
                Pos2::new(outer.left() + LEFT_MARGIN, outer.top() + TOP_MARGIN),
                Pos2::new(outer.right() - 8.0, outer.bottom() - BOTTOM_MARGIN),
            );

            let grid_color = Color32::from_gray(70);
            let text_color = ui.visuals().text_color();

            // Horizontal gridlines and y labels at each tick
            let interval = tick_interval(self.axis_max);
            for i in 0..=5 {
                let value = interval * i as f64;
                let y = self.y_for(value, &plot);
                painter.line_segment(
                    [Pos2::new(plot.left(), y), Pos2::new(plot.right(), y)],
                    Stroke::new(0.5, grid_color),
                );
                painter.text(
                    Pos2::new(plot.left() - 6.0, y),
                    Align2::RIGHT_CENTER,
                    (self.tick_label)(value),
                    FontId::proportional(12.0),
                    text_color,
                );
            }

            // Baseline
            painter.line_segment(
                [plot.left_bottom(), plot.right_bottom()],
                Stroke::new(2.0, grid_color),
            );

            // Weekday labels
            for (i, label) in WEEKDAY_LABELS.iter().enumerate() {
                let x = self.x_for(i, &plot);
                painter.text(
                    Pos2::new(x, plot.bottom() + 6.0),
                    Align2::CENTER_TOP,
                    *label,
                    FontId::proportional(12.0),
                    text_color,
                );
            }

            // The data line with a dot per day
            let points: Vec<Pos2> = self
                .buckets
                .iter()
                .enumerate()
                .map(|(i, value)| Pos2::new(self.x_for(i, &plot), self.y_for(*value, &plot)))
                .collect();
            painter.add(egui::Shape::line(points.clone(), Stroke::new(3.0, self.color)));
            for point in points {
                painter.circle_filled(point, 3.5, self.color);
            }
        });
    }

    fn x_for(&self, index: usize, plot: &egui::Rect) -> f32 {
        plot.left() + plot.width() * index as f32 / 6.0
    }

    fn y_for(&self, value: f64, plot: &egui::Rect) -> f32 {
        let frac = if self.axis_max > 0.0 {
            (value / self.axis_max).clamp(0.0, 1.0) as f32
        } else {
            0.0
        };
        plot.bottom() - plot.height() * frac
    }
}
