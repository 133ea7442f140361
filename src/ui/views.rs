//! Timetable rendering: day / week grids, month grid, semester plan and list

use chrono::{Datelike, Local, NaiveDate, Weekday};
use eframe::egui;
use egui::{Color32, RichText, Ui};

use crate::api::time::{
    date_for_weekday, day_name, format_date_short, minutes_to_time, parse_day_of_week, short_day_name,
    DayWindow, TEACHING_DAYS,
};
use crate::api::ScheduleEntry;
use crate::config::ClockFormat;
use crate::schedule::calendar::{days_in_month, month_grid, month_name};
use crate::schedule::filter::entries_on;
use crate::schedule::layout::lanes_used;
use crate::schedule::{assign_lanes, lecturer_busy_at, sort_for_list, ScheduleFilter, SemesterSeason, ViewMode};
use super::theme::{self, module_color};

/// Format a time string "HH:MM" according to clock format
pub fn format_clock_time(time_24: &str, clock_format: ClockFormat) -> String {
    match clock_format {
        ClockFormat::Hour24 => time_24.to_string(),
        ClockFormat::Hour12 => {
            let parts: Vec<&str> = time_24.split(':').collect();
            if parts.len() >= 2 {
                if let (Ok(hour), Ok(min)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>()) {
                    let (h12, ampm) = if hour == 0 {
                        (12, "am")
                    } else if hour < 12 {
                        (hour, "am")
                    } else if hour == 12 {
                        (12, "pm")
                    } else {
                        (hour - 12, "pm")
                    };
                    return format!("{}:{:02}{}", h12, min, ampm);
                }
            }
            time_24.to_string()
        }
    }
}

fn time_range(entry: &ScheduleEntry, clock_format: ClockFormat) -> String {
    format!(
        "{} - {}",
        format_clock_time(&entry.start_time, clock_format),
        format_clock_time(&entry.end_time, clock_format)
    )
}

fn entry_details(entry: &ScheduleEntry, clock_format: ClockFormat) -> String {
    let groups = if entry.group_names.is_empty() {
        "-".to_string()
    } else {
        entry.group_names.join(", ")
    };
    format!(
        "{}\n{} {}\nLecturer: {}\nRoom: {}\nGroups: {}",
        entry.module_name,
        entry.day_of_week,
        time_range(entry, clock_format),
        entry.lecturer_name,
        entry.room_name,
        groups
    )
}

/// Everything the timetable needs for one frame
pub struct TimetableView<'a> {
    /// Full schedule of the semester; filtering happens here
    pub entries: &'a [ScheduleEntry],
    pub filter: &'a ScheduleFilter,
    pub mode: ViewMode,
    pub list_view: bool,
    pub focus_date: NaiveDate,
    pub season: SemesterSeason,
    pub season_year: i32,
    pub window: DayWindow,
    pub clock_format: ClockFormat,
    pub can_edit: bool,
}

/// What the user asked for this frame
#[derive(Debug, Default)]
pub struct TimetableResult {
    /// Empty slot clicked: weekday and "HH:MM"
    pub add_at: Option<(Weekday, String)>,
    /// Slot clicked while the filtered lecturer already teaches then
    pub busy: bool,
    pub delete: Option<ScheduleEntry>,
    /// Card clicked: edit that session
    pub edit: Option<ScheduleEntry>,
    /// Month cell clicked: open that day
    pub open_day: Option<NaiveDate>,
}

pub fn render_timetable(ui: &mut Ui, view: &TimetableView) -> TimetableResult {
    let mut result = TimetableResult::default();
    let visible = view.filter.apply(view.entries);

    if view.list_view {
        render_list(ui, view, visible, &mut result);
        return result;
    }

    match view.mode {
        ViewMode::Day | ViewMode::Week => render_grid(ui, view, &visible, &mut result),
        ViewMode::Month => render_month(ui, view, &visible, &mut result),
        ViewMode::Semester => render_semester(ui, view, &visible),
    }
    result
}

fn grid_days(view: &TimetableView, visible: &[&ScheduleEntry]) -> Vec<Weekday> {
    if view.mode == ViewMode::Day {
        return vec![view.focus_date.weekday()];
    }
    let mut days = TEACHING_DAYS.to_vec();
    for weekend in [Weekday::Sat, Weekday::Sun] {
        if visible.iter().any(|e| parse_day_of_week(&e.day_of_week) == Some(weekend)) {
            days.push(weekend);
        }
    }
    days
}

fn render_grid(ui: &mut Ui, view: &TimetableView, visible: &[&ScheduleEntry], result: &mut TimetableResult) {
    let days = grid_days(view, visible);
    let today = Local::now().date_naive();
    let window = view.window;

    // Day view rows are half hours, week view rows are hours
    let (slot_minutes, hour_height) = if view.mode == ViewMode::Day { (30, 80.0) } else { (60, 60.0) };
    let pixels_per_minute = hour_height / 60.0;
    let total_grid_height = window.len() as f32 * pixels_per_minute;

    let hour_label_width = 60.0;
    let header_height = 32.0;
    let (grid_line_color, hour_line_color, label_color) = theme::grid_colors();

    let available_width = ui.available_width();
    let day_width = (available_width - hour_label_width) / days.len().max(1) as f32;

    // Fixed day headers (outside ScrollArea)
    let (header_rect, _) = ui.allocate_exact_size(
        egui::vec2(available_width, header_height),
        egui::Sense::hover(),
    );
    let painter = ui.painter().clone();
    for (i, day) in days.iter().enumerate() {
        let date = date_for_weekday(view.focus_date, *day);
        let x = header_rect.min.x + hour_label_width + i as f32 * day_width;
        let title = if date == today {
            "Today".to_string()
        } else if view.mode == ViewMode::Day {
            day_name(*day).to_string()
        } else {
            short_day_name(*day).to_string()
        };
        let count = entries_on(visible, *day).len();
        painter.text(
            egui::pos2(x + 8.0, header_rect.center().y),
            egui::Align2::LEFT_CENTER,
            format!("{}  {}", title, date.format("%d.%m.")),
            egui::FontId::proportional(14.0),
            Color32::from_rgb(0xb0, 0xb4, 0xc0),
        );
        if count > 0 {
            painter.text(
                egui::pos2(x + day_width - 8.0, header_rect.center().y),
                egui::Align2::RIGHT_CENTER,
                count.to_string(),
                egui::FontId::new(13.0, theme::bold_family()),
                Color32::WHITE,
            );
        }
        if i > 0 {
            painter.line_segment(
                [egui::pos2(x, header_rect.min.y + 4.0), egui::pos2(x, header_rect.max.y - 4.0)],
                egui::Stroke::new(1.0, grid_line_color),
            );
        }
    }

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        let (grid_rect, _) = ui.allocate_exact_size(
            egui::vec2(available_width, total_grid_height),
            egui::Sense::hover(),
        );
        let painter = ui.painter().clone();

        for (i, day) in days.iter().enumerate() {
            if date_for_weekday(view.focus_date, *day) == today {
                let col_x = grid_rect.min.x + hour_label_width + i as f32 * day_width;
                let col_rect = egui::Rect::from_min_size(
                    egui::pos2(col_x, grid_rect.min.y),
                    egui::vec2(day_width, total_grid_height),
                );
                painter.rect_filled(col_rect, 0.0, Color32::from_rgb(0x14, 0x17, 0x20));
            }
            let x = grid_rect.min.x + hour_label_width + i as f32 * day_width;
            painter.line_segment(
                [egui::pos2(x, grid_rect.min.y), egui::pos2(x, grid_rect.max.y)],
                egui::Stroke::new(1.0, grid_line_color),
            );
        }
        painter.line_segment(
            [egui::pos2(grid_rect.max.x, grid_rect.min.y), egui::pos2(grid_rect.max.x, grid_rect.max.y)],
            egui::Stroke::new(1.0, grid_line_color),
        );

        let slots = if slot_minutes == 30 { window.half_hour_slots() } else { window.hour_slots() };
        for (idx, slot) in slots.iter().enumerate() {
            let y = grid_rect.min.y + (idx as u32 * slot_minutes) as f32 * pixels_per_minute;
            let on_hour = (idx as u32 * slot_minutes) % 60 == 0;
            if idx + 1 < slots.len() {
                painter.text(
                    egui::pos2(grid_rect.min.x + hour_label_width - 8.0, y),
                    egui::Align2::RIGHT_TOP,
                    format_clock_time(slot, view.clock_format),
                    egui::FontId::proportional(if on_hour { 11.0 } else { 10.0 }),
                    if on_hour { label_color } else { label_color.gamma_multiply(0.7) },
                );
            }
            painter.line_segment(
                [egui::pos2(grid_rect.min.x + hour_label_width, y), egui::pos2(grid_rect.max.x, y)],
                egui::Stroke::new(1.0, if on_hour { hour_line_color } else { grid_line_color }),
            );
        }

        let pointer = ui.ctx().pointer_hover_pos();

        for (day_idx, day) in days.iter().enumerate() {
            let col_x = grid_rect.min.x + hour_label_width + day_idx as f32 * day_width;
            let day_entries = entries_on(visible, *day);
            let placements = assign_lanes(&day_entries);
            let compact = lanes_used(&placements) > 2;

            let cards: Vec<(egui::Rect, &ScheduleEntry)> = placements
                .iter()
                .filter_map(|p| {
                    let (top, bottom) = p.vertical_span(&window)?;
                    let lane_width = day_width * p.width_fraction();
                    let rect = egui::Rect::from_min_size(
                        egui::pos2(
                            col_x + day_width * p.left_fraction() + 2.0,
                            grid_rect.min.y + top * total_grid_height + 1.0,
                        ),
                        egui::vec2(
                            (lane_width - 4.0).max(8.0),
                            ((bottom - top) * total_grid_height - 2.0).max(18.0),
                        ),
                    );
                    Some((rect, day_entries[p.index]))
                })
                .collect();

            let over_entry = pointer.is_some_and(|pos| cards.iter().any(|(rect, _)| rect.contains(pos)));

            // Clicks on empty space
            let col_rect = egui::Rect::from_min_size(
                egui::pos2(col_x, grid_rect.min.y),
                egui::vec2(day_width, total_grid_height),
            );
            let col_response = ui.interact(col_rect, ui.id().with(("day_col", day_idx)), egui::Sense::click());
            let slot_at = |y: f32| -> Option<u32> {
                let offset = ((y - grid_rect.min.y) / pixels_per_minute).max(0.0) as u32;
                let start = window.start + (offset / slot_minutes) * slot_minutes;
                (start < window.end).then_some(start)
            };

            if view.can_edit && col_response.hovered() && !over_entry {
                if let Some(slot_start) = pointer.and_then(|pos| slot_at(pos.y)) {
                    let ghost_y = grid_rect.min.y + (slot_start - window.start) as f32 * pixels_per_minute;
                    let ghost_rect = egui::Rect::from_min_size(
                        egui::pos2(col_x + 2.0, ghost_y),
                        egui::vec2(day_width - 4.0, 60.0 * pixels_per_minute),
                    );
                    let ghost_color = Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 60);
                    let ghost_border = Color32::from_rgba_unmultiplied(0x61, 0xAF, 0xEF, 120);
                    painter.rect(ghost_rect, 4.0, ghost_color, egui::Stroke::new(1.0, ghost_border));
                    painter.text(
                        ghost_rect.center(),
                        egui::Align2::CENTER_CENTER,
                        format!("{} + 1h", format_clock_time(&minutes_to_time(slot_start), view.clock_format)),
                        egui::FontId::proportional(13.0),
                        Color32::from_rgba_unmultiplied(255, 255, 255, 150),
                    );
                }
            }

            if view.can_edit && col_response.clicked() && !over_entry {
                if let Some(slot_start) = col_response.interact_pointer_pos().and_then(|pos| slot_at(pos.y)) {
                    let busy = view.mode == ViewMode::Day
                        && view.filter.lecturer.as_deref().is_some_and(|lecturer| {
                            lecturer_busy_at(view.entries, *day, slot_start, slot_minutes, lecturer)
                        });
                    if busy {
                        result.busy = true;
                    } else {
                        result.add_at = Some((*day, minutes_to_time(slot_start)));
                    }
                }
            }

            for (card_idx, (rect, entry)) in cards.iter().enumerate() {
                paint_entry_card(&painter, *rect, entry, view.clock_format, compact);

                let response = ui
                    .interact(*rect, ui.id().with(("entry", day_idx, card_idx, entry.id)), egui::Sense::click())
                    .on_hover_text(entry_details(entry, view.clock_format));
                if view.can_edit {
                    let trash_rect = egui::Rect::from_min_size(
                        egui::pos2(rect.max.x - 20.0, rect.min.y + 2.0),
                        egui::vec2(18.0, 18.0),
                    );
                    if response.hovered() && rect.width() > 40.0 {
                        painter.text(
                            trash_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            egui_phosphor::regular::TRASH,
                            egui::FontId::proportional(14.0),
                            theme::ERROR,
                        );
                    }
                    let on_trash = response
                        .interact_pointer_pos()
                        .is_some_and(|pos| trash_rect.contains(pos));
                    if response.clicked() {
                        if on_trash {
                            result.delete = Some((*entry).clone());
                        } else {
                            result.edit = Some((*entry).clone());
                        }
                    }
                    response.context_menu(|ui| {
                        if ui.button(format!("{} Edit session", egui_phosphor::regular::PENCIL_SIMPLE)).clicked() {
                            result.edit = Some((*entry).clone());
                            ui.close_menu();
                        }
                        if ui.button(format!("{} Delete session", egui_phosphor::regular::TRASH)).clicked() {
                            result.delete = Some((*entry).clone());
                            ui.close_menu();
                        }
                    });
                }
            }
        }
    });
}

/// Paint one class card; interaction is handled by the caller
fn paint_entry_card(
    painter: &egui::Painter,
    rect: egui::Rect,
    entry: &ScheduleEntry,
    clock_format: ClockFormat,
    compact: bool,
) {
    let colors = module_color(&entry.module_name);
    let corner_radius = 4.0;
    painter.rect(rect, corner_radius, colors.bg, egui::Stroke::new(1.0, colors.border));

    // Left accent stripe
    let accent_width = 3.0;
    let accent_rect = egui::Rect::from_min_size(rect.min, egui::vec2(accent_width, rect.height()));
    painter.rect(
        accent_rect,
        egui::Rounding {
            nw: corner_radius,
            sw: corner_radius,
            ne: 0.0,
            se: 0.0,
        },
        colors.border,
        egui::Stroke::NONE,
    );

    let clipped = painter.with_clip_rect(rect.shrink(1.0));
    let font_size = if compact { 11.0 } else { 13.0 };
    let left = rect.min.x + accent_width + 4.0;
    let mut y = rect.min.y + 3.0;

    let lines = [
        (entry.module_name.clone(), egui::FontId::new(font_size, theme::bold_family())),
        (time_range(entry, clock_format), egui::FontId::proportional(font_size - 1.0)),
        (entry.room_name.clone(), egui::FontId::proportional(font_size - 1.0)),
        (entry.lecturer_name.clone(), egui::FontId::proportional(font_size - 1.0)),
    ];
    for (text, font) in lines {
        if text.is_empty() {
            continue;
        }
        let galley = clipped.layout_no_wrap(text, font, colors.text);
        if y + galley.size().y > rect.max.y {
            break;
        }
        let height = galley.size().y;
        clipped.galley(egui::pos2(left, y), galley, colors.text);
        y += height + 1.0;
    }
}

fn render_month(ui: &mut Ui, view: &TimetableView, visible: &[&ScheduleEntry], result: &mut TimetableResult) {
    let weeks = month_grid(view.focus_date.year(), view.focus_date.month());
    let today = Local::now().date_naive();
    let (grid_line_color, _, label_color) = theme::grid_colors();
    let width = ui.available_width();
    let cell_width = width / 7.0;
    let cell_height = 110.0;
    let max_lines = 4;

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;
        for day in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri, Weekday::Sat, Weekday::Sun] {
            ui.allocate_ui_with_layout(
                egui::vec2(cell_width, 24.0),
                egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                |ui| {
                    ui.label(RichText::new(short_day_name(day)).size(13.0).color(label_color));
                },
            );
        }
    });

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        let (grid_rect, _) = ui.allocate_exact_size(
            egui::vec2(width, cell_height * weeks.len() as f32),
            egui::Sense::hover(),
        );
        let painter = ui.painter().clone();

        for (row, week) in weeks.iter().enumerate() {
            for (col, cell) in week.iter().enumerate() {
                let rect = egui::Rect::from_min_size(
                    egui::pos2(grid_rect.min.x + col as f32 * cell_width, grid_rect.min.y + row as f32 * cell_height),
                    egui::vec2(cell_width, cell_height),
                );
                painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, grid_line_color));
                let Some(date) = cell else {
                    continue;
                };
                if *date == today {
                    painter.rect_filled(rect.shrink(1.0), 0.0, Color32::from_rgb(0x14, 0x17, 0x20));
                }

                let response = ui.interact(rect, ui.id().with(("month_cell", row, col)), egui::Sense::click());
                if response.hovered() {
                    painter.rect_stroke(rect.shrink(1.0), 2.0, egui::Stroke::new(1.0, theme::ACCENT));
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if response.clicked() {
                    result.open_day = Some(*date);
                }

                painter.text(
                    rect.min + egui::vec2(6.0, 4.0),
                    egui::Align2::LEFT_TOP,
                    date.day().to_string(),
                    egui::FontId::new(13.0, theme::bold_family()),
                    if *date == today { theme::ACCENT } else { Color32::WHITE },
                );

                let mut day_entries = entries_on(visible, date.weekday());
                sort_for_list(&mut day_entries);
                let clipped = painter.with_clip_rect(rect.shrink(2.0));
                let mut y = rect.min.y + 24.0;
                for entry in day_entries.iter().take(max_lines) {
                    let colors = module_color(&entry.module_name);
                    let line_rect = egui::Rect::from_min_size(
                        egui::pos2(rect.min.x + 4.0, y),
                        egui::vec2(cell_width - 8.0, 17.0),
                    );
                    clipped.rect_filled(line_rect, 3.0, colors.bg);
                    clipped.text(
                        line_rect.left_center() + egui::vec2(4.0, 0.0),
                        egui::Align2::LEFT_CENTER,
                        format!("{}-{} {}", entry.start_time, entry.end_time, entry.module_name),
                        egui::FontId::proportional(11.0),
                        colors.text,
                    );
                    y += 19.0;
                }
                if day_entries.len() > max_lines {
                    clipped.text(
                        egui::pos2(rect.min.x + 6.0, y),
                        egui::Align2::LEFT_TOP,
                        format!("+{} more", day_entries.len() - max_lines),
                        egui::FontId::proportional(11.0),
                        label_color,
                    );
                }
            }
        }
    });
}

fn render_semester(ui: &mut Ui, view: &TimetableView, visible: &[&ScheduleEntry]) {
    let months = view.season.months(view.season_year);
    let (_, _, label_color) = theme::grid_colors();
    let weekend_color = Color32::from_rgb(90, 94, 106);
    let column_width = 240.0;

    egui::ScrollArea::both().auto_shrink([false; 2]).show(ui, |ui| {
        ui.horizontal_top(|ui| {
            for (year, month) in months {
                ui.vertical(
                    |ui| {
                        ui.set_width(column_width);
                        ui.label(
                            RichText::new(format!("{} {}", month_name(month), year))
                                .size(15.0)
                                .color(Color32::WHITE)
                                .strong(),
                        );
                        ui.separator();

                        for day in 1..=days_in_month(year, month) {
                            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                                continue;
                            };
                            let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
                            ui.horizontal_top(|ui| {
                                ui.spacing_mut().item_spacing.x = 6.0;
                                let color = if weekend { weekend_color } else { label_color };
                                ui.add_sized(
                                    [20.0, 16.0],
                                    egui::Label::new(RichText::new(day.to_string()).size(12.0).color(color)),
                                );
                                ui.add_sized(
                                    [30.0, 16.0],
                                    egui::Label::new(RichText::new(short_day_name(date.weekday())).size(12.0).color(color)),
                                );
                                if weekend {
                                    ui.label(RichText::new("-").size(12.0).color(weekend_color));
                                    return;
                                }
                                let mut day_entries = entries_on(visible, date.weekday());
                                sort_for_list(&mut day_entries);
                                ui.vertical(|ui| {
                                    ui.spacing_mut().item_spacing.y = 2.0;
                                    for entry in day_entries {
                                        let colors = module_color(&entry.module_name);
                                        let text = format!(
                                            "{} - {} {} ({})",
                                            entry.start_time, entry.end_time, entry.module_name, entry.lecturer_name
                                        );
                                        egui::Frame::none()
                                            .fill(colors.bg)
                                            .rounding(egui::Rounding::same(3.0))
                                            .inner_margin(egui::Margin::symmetric(4.0, 1.0))
                                            .show(ui, |ui| {
                                                ui.add(egui::Label::new(
                                                    RichText::new(text).size(11.0).color(colors.text),
                                                ).truncate());
                                            });
                                    }
                                });
                            });
                        }
                    },
                );
                ui.add_space(12.0);
            }
        });
    });
}

fn render_list(ui: &mut Ui, view: &TimetableView, mut visible: Vec<&ScheduleEntry>, result: &mut TimetableResult) {
    sort_for_list(&mut visible);
    if visible.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No classes scheduled").size(15.0).color(Color32::from_rgb(120, 120, 130)));
        });
        return;
    }

    let (card_bg, text_color, secondary) = theme::card_colors();
    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        let mut current_day: Option<String> = None;
        for entry in visible {
            if current_day.as_deref() != Some(entry.day_of_week.as_str()) {
                current_day = Some(entry.day_of_week.clone());
                ui.add_space(8.0);
                let heading = match parse_day_of_week(&entry.day_of_week) {
                    Some(day) => format!(
                        "{}  {}",
                        day_name(day),
                        format_date_short(date_for_weekday(view.focus_date, day))
                    ),
                    None => entry.day_of_week.clone(),
                };
                ui.label(RichText::new(heading).size(14.0).color(Color32::from_rgb(140, 140, 160)).strong());
            }

            let colors = module_color(&entry.module_name);
            egui::Frame::none()
                .fill(card_bg)
                .rounding(egui::Rounding::same(6.0))
                .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        let (stripe, _) = ui.allocate_exact_size(egui::vec2(4.0, 36.0), egui::Sense::hover());
                        ui.painter().rect_filled(stripe, 2.0, colors.border);

                        ui.vertical(|ui| {
                            ui.spacing_mut().item_spacing.y = 2.0;
                            ui.horizontal(|ui| {
                                ui.label(
                                    RichText::new(time_range(entry, view.clock_format))
                                        .size(14.0)
                                        .color(text_color)
                                        .family(theme::bold_family()),
                                );
                                ui.add(egui::Label::new(
                                    RichText::new(&entry.module_name).size(14.0).color(text_color),
                                ).truncate());
                            });
                            let mut details = vec![entry.lecturer_name.clone(), entry.room_name.clone()];
                            if !entry.group_names.is_empty() {
                                details.push(entry.group_names.join(", "));
                            }
                            details.retain(|d| !d.is_empty());
                            ui.label(RichText::new(details.join(" • ")).size(12.0).color(secondary));
                        });

                        if view.can_edit {
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if super::widgets::row_icon(ui, egui_phosphor::regular::TRASH, theme::ERROR, "Delete session") {
                                    result.delete = Some(entry.clone());
                                }
                                if super::widgets::row_icon(ui, egui_phosphor::regular::PENCIL_SIMPLE, Color32::WHITE, "Edit session") {
                                    result.edit = Some(entry.clone());
                                }
                            });
                        }
                    });
                });
            ui.add_space(4.0);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_formats() {
        assert_eq!(format_clock_time("09:30", ClockFormat::Hour24), "09:30");
        assert_eq!(format_clock_time("00:15", ClockFormat::Hour12), "12:15am");
        assert_eq!(format_clock_time("12:00", ClockFormat::Hour12), "12:00pm");
        assert_eq!(format_clock_time("17:45", ClockFormat::Hour12), "5:45pm");
        assert_eq!(format_clock_time("bogus", ClockFormat::Hour12), "bogus");
    }

    fn entry(day: &str, lecturer: &str) -> ScheduleEntry {
        ScheduleEntry {
            id: 1,
            offered_module_id: Some(1),
            day_of_week: day.into(),
            start_time: "09:00".into(),
            end_time: "10:00".into(),
            module_name: "Databases".into(),
            lecturer_name: lecturer.into(),
            room_name: "A-101".into(),
            semester: "Winter 2025".into(),
            group_ids: vec![1],
            group_names: vec!["CS-1".into()],
        }
    }

    fn view<'a>(entries: &'a [ScheduleEntry], filter: &'a ScheduleFilter, mode: ViewMode) -> TimetableView<'a> {
        TimetableView {
            entries,
            filter,
            mode,
            list_view: false,
            focus_date: NaiveDate::from_ymd_opt(2025, 10, 16).unwrap(),
            season: SemesterSeason::Winter,
            season_year: 2025,
            window: DayWindow::default(),
            clock_format: ClockFormat::Hour24,
            can_edit: true,
        }
    }

    #[test]
    fn week_grid_adds_weekends_only_when_used() {
        let filter = ScheduleFilter::default();
        let weekdays = vec![entry("Monday", "Ada")];
        let v = view(&weekdays, &filter, ViewMode::Week);
        let visible = filter.apply(&weekdays);
        assert_eq!(grid_days(&v, &visible).len(), 5);

        let with_saturday = vec![entry("Monday", "Ada"), entry("Saturday", "Ada")];
        let v = view(&with_saturday, &filter, ViewMode::Week);
        let visible = filter.apply(&with_saturday);
        assert_eq!(grid_days(&v, &visible).last(), Some(&Weekday::Sat));
    }

    #[test]
    fn day_grid_shows_the_focused_weekday() {
        let filter = ScheduleFilter::default();
        let entries = vec![entry("Monday", "Ada")];
        let v = view(&entries, &filter, ViewMode::Day);
        assert_eq!(grid_days(&v, &[]), vec![Weekday::Thu]);
    }

    #[test]
    fn details_list_groups() {
        let text = entry_details(&entry("Monday", "Ada Lovelace"), ClockFormat::Hour24);
        assert!(text.contains("Monday 09:00 - 10:00"));
        assert!(text.contains("Groups: CS-1"));
    }
}
