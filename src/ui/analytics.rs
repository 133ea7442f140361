use eframe::egui;
use egui::{Color32, FontId, Pos2, RichText, Stroke, Ui};
use egui_phosphor::regular as icons;

use crate::api::{AnalyticsMetrics, LoadComparison, NamedValue, Semester};
use super::theme;
use super::widgets::{painted_button, BTN_TEXT};

const NEEDED_COLOR: Color32 = Color32::from_rgb(0x90, 0xa4, 0xae);
const SCHEDULED_COLOR: Color32 = theme::ACCENT;
const DONUT_PALETTE: [Color32; 6] = [
    Color32::from_rgb(0x19, 0x98, 0xf4),
    Color32::from_rgb(0x98, 0xc3, 0x79),
    Color32::from_rgb(0xe5, 0xc0, 0x7b),
    Color32::from_rgb(0xe0, 0x6c, 0x75),
    Color32::from_rgb(0xc6, 0x78, 0xdd),
    Color32::from_rgb(0x56, 0xb6, 0xc2),
];

#[derive(Debug, Default)]
pub struct AnalyticsResult {
    pub select_semester: Option<i64>,
    pub export: bool,
}

/// Semester picker, KPI cards, load chart and staff donut
pub fn render_analytics(
    ui: &mut Ui,
    semesters: &[Semester],
    selected: Option<i64>,
    metrics: Option<&AnalyticsMetrics>,
    loading: bool,
) -> AnalyticsResult {
    let mut result = AnalyticsResult::default();

    ui.horizontal(|ui| {
        ui.heading("Analytics");
        ui.add_space(16.0);
        let current = selected
            .and_then(|id| semesters.iter().find(|s| s.id == id))
            .map(|s| s.name.clone())
            .unwrap_or_else(|| "Select semester".to_string());
        let mut choice = selected;
        egui::ComboBox::new("analytics_semester", "")
            .selected_text(current)
            .width(200.0)
            .show_ui(ui, |ui| {
                for semester in semesters {
                    ui.selectable_value(&mut choice, Some(semester.id), &semester.name);
                }
            });
        if choice != selected {
            result.select_semester = choice;
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.add_enabled_ui(metrics.is_some(), |ui| {
                if painted_button(ui, &format!("{} Export", icons::DOWNLOAD_SIMPLE), BTN_TEXT).clicked() {
                    result.export = true;
                }
            });
        });
    });
    ui.add_space(12.0);

    let Some(metrics) = metrics else {
        ui.label(if loading { "Loading metrics..." } else { "Select a semester to see its planning metrics." });
        return result;
    };

    egui::ScrollArea::vertical().show(ui, |ui| {
        kpi_row(ui, metrics);
        ui.add_space(20.0);

        ui.columns(2, |columns| {
            chart_card(&mut columns[0], "Teaching load: needed vs scheduled", |ui| {
                load_chart(ui, &metrics.teaching_load_comparison);
            });
            chart_card(&mut columns[1], "Staff composition", |ui| {
                donut_chart(ui, &metrics.staff_composition);
            });
        });
    });

    result
}

fn kpi_row(ui: &mut Ui, metrics: &AnalyticsMetrics) {
    let (bg, text, secondary) = theme::card_colors();
    let cards = [
        ("Planning progress", format!("{}%", metrics.planning_progress), Some(metrics.planning_progress)),
        ("Total modules", metrics.total_modules.to_string(), None),
        ("Missing units", metrics.missing_units.to_string(), None),
        ("Pending requests", metrics.pending_requests.to_string(), None),
    ];
    ui.columns(cards.len(), |columns| {
        for (ui, (label, value, progress)) in columns.iter_mut().zip(cards) {
            egui::Frame::none()
                .fill(bg)
                .rounding(8.0)
                .inner_margin(egui::Margin::same(14.0))
                .show(ui, |ui| {
                    ui.set_min_height(72.0);
                    ui.label(RichText::new(label).size(12.0).color(secondary));
                    ui.label(RichText::new(value).size(26.0).color(text).strong());
                    if let Some(percent) = progress {
                        let fraction = (percent.clamp(0, 100) as f32) / 100.0;
                        ui.add(egui::ProgressBar::new(fraction).desired_height(6.0).fill(theme::ACCENT));
                    }
                });
        }
    });
}

fn chart_card(ui: &mut Ui, title: &str, add_contents: impl FnOnce(&mut Ui)) {
    let (bg, text, _) = theme::card_colors();
    egui::Frame::none()
        .fill(bg)
        .rounding(8.0)
        .inner_margin(egui::Margin::same(16.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(title).size(14.0).color(text).strong());
            ui.add_space(8.0);
            add_contents(ui);
        });
}

/// Largest value a chart axis must reach, at least 1
fn chart_max(rows: &[LoadComparison]) -> f64 {
    rows.iter()
        .flat_map(|r| [r.needed, r.scheduled])
        .fold(1.0_f64, f64::max)
}

fn load_chart(ui: &mut Ui, rows: &[LoadComparison]) {
    if rows.is_empty() {
        ui.label("No teaching load data");
        return;
    }
    let height = 220.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    let painter = ui.painter().clone();
    let (grid_line, _, label_color) = theme::grid_colors();

    let plot = egui::Rect::from_min_max(
        Pos2::new(rect.left() + 32.0, rect.top() + 4.0),
        Pos2::new(rect.right(), rect.bottom() - 22.0),
    );
    let max = chart_max(rows);

    for step in 0..=4 {
        let value = max * step as f64 / 4.0;
        let y = plot.bottom() - plot.height() * step as f32 / 4.0;
        painter.hline(plot.x_range(), y, Stroke::new(1.0, grid_line));
        painter.text(
            Pos2::new(plot.left() - 6.0, y),
            egui::Align2::RIGHT_CENTER,
            format!("{:.0}", value),
            FontId::proportional(10.0),
            label_color,
        );
    }

    let group_width = plot.width() / rows.len() as f32;
    let bar_width = (group_width * 0.3).min(28.0);
    for (i, row) in rows.iter().enumerate() {
        let center = plot.left() + group_width * (i as f32 + 0.5);
        for (offset, value, color) in [(-1.0, row.needed, NEEDED_COLOR), (0.0, row.scheduled, SCHEDULED_COLOR)] {
            let h = plot.height() * (value / max) as f32;
            let left = center + offset * bar_width;
            let bar = egui::Rect::from_min_max(
                Pos2::new(left, plot.bottom() - h),
                Pos2::new(left + bar_width, plot.bottom()),
            );
            painter.rect_filled(bar, egui::Rounding { nw: 3.0, ne: 3.0, sw: 0.0, se: 0.0 }, color);
        }
        painter.text(
            Pos2::new(center, plot.bottom() + 4.0),
            egui::Align2::CENTER_TOP,
            &row.name,
            FontId::proportional(11.0),
            label_color,
        );
    }

    ui.horizontal(|ui| {
        legend_entry(ui, NEEDED_COLOR, "Needed");
        legend_entry(ui, SCHEDULED_COLOR, "Scheduled");
    });
}

/// Share of each slice in degrees; empty or all-zero data gives no slices
fn slice_angles(values: &[NamedValue]) -> Vec<f32> {
    let total: f64 = values.iter().map(|v| v.value.max(0.0)).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    values
        .iter()
        .map(|v| (v.value.max(0.0) / total * 360.0) as f32)
        .collect()
}

fn donut_chart(ui: &mut Ui, values: &[NamedValue]) {
    let angles = slice_angles(values);
    if angles.is_empty() {
        ui.label("No staff data");
        return;
    }
    let size = 200.0;
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), size), egui::Sense::hover());
    let painter = ui.painter().clone();
    let center = rect.center();
    let radius = size / 2.0 - 14.0;
    let thickness = 26.0;

    let mut start = -90.0_f32;
    for (i, sweep) in angles.iter().enumerate() {
        if *sweep <= 0.0 {
            continue;
        }
        let color = DONUT_PALETTE[i % DONUT_PALETTE.len()];
        let segments = (sweep / 3.0).ceil().max(2.0) as usize;
        let points: Vec<Pos2> = (0..=segments)
            .map(|s| {
                let angle = (start + sweep * s as f32 / segments as f32).to_radians();
                center + egui::vec2(angle.cos(), angle.sin()) * radius
            })
            .collect();
        painter.add(egui::Shape::line(points, Stroke::new(thickness, color)));
        start += sweep;
    }

    let total: f64 = values.iter().map(|v| v.value.max(0.0)).sum();
    painter.text(
        center,
        egui::Align2::CENTER_CENTER,
        format!("{:.0}", total),
        FontId::proportional(20.0),
        Color32::WHITE,
    );

    ui.horizontal_wrapped(|ui| {
        for (i, value) in values.iter().enumerate() {
            legend_entry(ui, DONUT_PALETTE[i % DONUT_PALETTE.len()], &format!("{} ({:.0})", value.name, value.value));
        }
    });
}

fn legend_entry(ui: &mut Ui, color: Color32, label: &str) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter().rect_filled(rect, 2.0, color);
    ui.label(RichText::new(label).size(12.0));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, value: f64) -> NamedValue {
        NamedValue { name: name.into(), value }
    }

    #[test]
    fn slices_cover_the_full_circle() {
        let angles = slice_angles(&[named("Full time", 3.0), named("Freelance", 1.0)]);
        assert_eq!(angles, vec![270.0, 90.0]);
    }

    #[test]
    fn zero_totals_draw_nothing() {
        assert!(slice_angles(&[]).is_empty());
        assert!(slice_angles(&[named("Full time", 0.0)]).is_empty());
    }

    #[test]
    fn chart_axis_reaches_the_largest_bar() {
        let rows = vec![
            LoadComparison { name: "CS".into(), needed: 12.0, scheduled: 30.0 },
            LoadComparison { name: "BA".into(), needed: 18.0, scheduled: 4.0 },
        ];
        assert_eq!(chart_max(&rows), 30.0);
        assert_eq!(chart_max(&[]), 1.0);
    }
}
