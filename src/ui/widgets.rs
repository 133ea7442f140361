//! Painted controls shared by every screen

use eframe::egui;
use egui::{Color32, RichText, Ui};

const BTN_BG: Color32 = Color32::from_rgb(0x28, 0x2c, 0x38);
const BTN_HOVER: Color32 = Color32::from_rgb(0x44, 0x4c, 0x62);
pub const BTN_TEXT: Color32 = Color32::from_rgb(180, 180, 190);
const ICON_IDLE: Color32 = Color32::from_rgb(150, 150, 150);

/// Frame for modal windows
pub fn dialog_frame() -> egui::Frame {
    let (content_bg, frame_color, _) = super::theme::dialog_colors();
    egui::Frame::none()
        .fill(content_bg)
        .stroke(egui::Stroke::new(2.0, frame_color))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(20.0))
}

/// Centered, non-collapsible window in the dialog frame
pub fn dialog_window(title: &str, width: f32) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .default_width(width)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .frame(dialog_frame())
}

/// Subdued button drawn by hand so hover only lightens the background
pub fn painted_button(ui: &mut Ui, text: &str, text_color: Color32) -> egui::Response {
    let font_id = egui::FontId::proportional(17.0);
    let padding = egui::vec2(18.0, 10.0);
    let size = ui.fonts(|f| f.layout_no_wrap(text.to_string(), font_id.clone(), text_color).size());
    let (rect, response) = ui.allocate_exact_size(size + padding * 2.0, egui::Sense::click());
    let bg = if response.hovered() && ui.is_enabled() { BTN_HOVER } else { BTN_BG };
    ui.painter().rect_filled(rect, egui::Rounding::same(6.0), bg);
    let color = if ui.is_enabled() { text_color } else { text_color.gamma_multiply(0.5) };
    ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, text, font_id, color);
    if response.hovered() && ui.is_enabled() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response
}

/// "Save" / "Cancel" row; returns (save, cancel)
pub fn save_cancel_row(ui: &mut Ui, saving: bool) -> (bool, bool) {
    let mut save = false;
    let mut cancel = false;
    ui.horizontal(|ui| {
        ui.add_enabled_ui(!saving, |ui| {
            save = painted_button(ui, if saving { "Saving..." } else { "Save" }, BTN_TEXT).clicked();
        });
        cancel = painted_button(ui, "Cancel", BTN_TEXT).clicked();
    });
    (save && !saving, cancel)
}

/// Gray icon that turns white on hover
pub fn icon_button(ui: &mut Ui, icon: &str, tooltip: &str) -> bool {
    let font_id = egui::FontId::proportional(18.0);
    let size = ui.fonts(|f| f.layout_no_wrap(icon.to_string(), font_id.clone(), Color32::WHITE).size());
    let (rect, response) = ui.allocate_exact_size(size + egui::vec2(8.0, 4.0), egui::Sense::click());
    let color = if response.hovered() { Color32::WHITE } else { ICON_IDLE };
    ui.painter().text(rect.center(), egui::Align2::CENTER_CENTER, icon, font_id, color);
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
    }
    response.on_hover_text(tooltip).clicked()
}

/// Small icon sized for table rows
pub fn row_icon(ui: &mut Ui, icon: &str, hover_color: Color32, tooltip: &str) -> bool {
    let response = ui.add(
        egui::Label::new(RichText::new(icon).size(15.0).color(ICON_IDLE)).sense(egui::Sense::click()),
    );
    if response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        ui.painter().text(
            response.rect.center(),
            egui::Align2::CENTER_CENTER,
            icon,
            egui::FontId::proportional(15.0),
            hover_color,
        );
    }
    response.on_hover_text(tooltip).clicked()
}

/// Pill with caret arrows around a label. Returns -1, 0 or 1.
pub fn pill_navigation(ui: &mut Ui, label: &str, min_width: f32) -> i32 {
    let (button_bg, button_text) = super::theme::button_colors();
    let mut step = 0;
    egui::Frame::none()
        .fill(button_bg)
        .rounding(egui::Rounding::same(12.0))
        .inner_margin(egui::Margin::symmetric(8.0, 4.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                let left = ui.add(egui::Label::new(
                    RichText::new(egui_phosphor::regular::CARET_LEFT).size(14.0).color(button_text),
                ).sense(egui::Sense::click()));
                if left.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if left.clicked() {
                    step = -1;
                }

                ui.add_space(4.0);
                ui.allocate_ui_with_layout(
                    egui::vec2(min_width, 14.0),
                    egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                    |ui| {
                        ui.label(RichText::new(label).size(14.0).color(button_text));
                    },
                );
                ui.add_space(4.0);

                let right = ui.add(egui::Label::new(
                    RichText::new(egui_phosphor::regular::CARET_RIGHT).size(14.0).color(button_text),
                ).sense(egui::Sense::click()));
                if right.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                }
                if right.clicked() {
                    step = 1;
                }
            });
        });
    step
}

/// Muted uppercase-ish heading above a block of fields
pub fn section_label(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).size(13.0).color(Color32::from_rgb(140, 140, 160)).strong());
}

/// Red outline around a field that failed validation
pub fn error_outline(has_error: bool) -> egui::Frame {
    if has_error {
        egui::Frame::none()
            .stroke(egui::Stroke::new(2.0, Color32::from_rgb(0xff, 0x44, 0x44)))
            .rounding(4.0)
            .inner_margin(2.0)
    } else {
        egui::Frame::none()
    }
}

/// Single-line text field inside a form grid
pub fn text_field(ui: &mut Ui, value: &mut String, hint: &str, width: f32) -> egui::Response {
    ui.add(egui::TextEdit::singleline(value).hint_text(hint).desired_width(width))
}

/// Tab strip of selectable labels; returns true when the selection changed
pub fn tab_strip<T: PartialEq + Copy>(ui: &mut Ui, current: &mut T, tabs: &[(T, &str)]) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        for (value, label) in tabs {
            let selected = *current == *value;
            let text = RichText::new(*label).size(14.0);
            let text = if selected { text.color(Color32::WHITE).strong() } else { text };
            if ui.selectable_label(selected, text).clicked() && !selected {
                *current = *value;
                changed = true;
            }
        }
    });
    changed
}

/// Rounded status chip, e.g. "Active"
pub fn badge(ui: &mut Ui, text: &str, color: Color32) {
    egui::Frame::none()
        .fill(color.gamma_multiply(0.25))
        .rounding(egui::Rounding::same(10.0))
        .inner_margin(egui::Margin::symmetric(8.0, 2.0))
        .show(ui, |ui| {
            ui.label(RichText::new(text).size(12.0).color(color));
        });
}
