use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

pub const ACCENT: Color32 = Color32::from_rgb(19, 152, 244);
pub const ERROR: Color32 = Color32::from_rgb(224, 108, 117);
pub const SUCCESS: Color32 = Color32::from_rgb(152, 195, 121);

/// Font family for filled Phosphor icons
pub fn phosphor_fill_family() -> FontFamily {
    FontFamily::Name("phosphor-fill".into())
}

/// Font family for emphasized text
pub fn bold_family() -> FontFamily {
    FontFamily::Name("bold".into())
}

pub fn setup_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();

    // Phosphor Regular icons as fallback in Proportional family
    egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

    // No bundled bold face: reuse the proportional stack under its own name
    let proportional = fonts
        .families
        .get(&FontFamily::Proportional)
        .cloned()
        .unwrap_or_default();
    fonts.families.insert(bold_family(), proportional.clone());

    // Phosphor Fill as a separate family, with regular text as fallback
    fonts.font_data.insert(
        "phosphor-fill".into(),
        egui_phosphor::Variant::Fill.font_data(),
    );
    let mut fill_stack = vec!["phosphor-fill".to_string()];
    fill_stack.extend(proportional);
    fonts.families.insert(phosphor_fill_family(), fill_stack);

    ctx.set_fonts(fonts);
}

pub fn setup_theme(ctx: &egui::Context) {
    let mut style = Style::default();

    let mut visuals = Visuals::dark();

    let bg = Color32::from_rgb(12, 14, 20);
    visuals.panel_fill = bg;
    visuals.window_fill = bg;
    visuals.faint_bg_color = Color32::from_rgb(22, 25, 34);
    visuals.extreme_bg_color = Color32::from_rgb(6, 7, 10);

    // Cool grays to sit under the navy accents
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(34, 38, 50);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(172, 178, 192));

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(46, 52, 68);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, Color32::from_rgb(200, 204, 214));

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(68, 76, 98);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.selection.bg_fill = Color32::from_rgb(43, 74, 142);
    visuals.selection.stroke = Stroke::new(1.0, Color32::WHITE);

    visuals.hyperlink_color = ACCENT;

    visuals.widgets.noninteractive.rounding = Rounding::same(6.0);
    visuals.widgets.inactive.rounding = Rounding::same(6.0);
    visuals.widgets.hovered.rounding = Rounding::same(6.0);
    visuals.widgets.active.rounding = Rounding::same(6.0);
    visuals.window_rounding = Rounding::same(8.0);

    style.visuals = visuals;

    style.text_styles = [
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(18.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(14.0, FontFamily::Monospace)),
    ]
    .into();

    style.spacing.item_spacing = egui::vec2(12.0, 10.0);
    style.spacing.button_padding = egui::vec2(14.0, 8.0);
    style.spacing.window_margin = egui::Margin::same(24.0);

    ctx.set_style(style);
}

/// Pastel card colors for one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleColors {
    pub bg: Color32,
    pub border: Color32,
    pub text: Color32,
}

const MODULE_PALETTE: [ModuleColors; 5] = [
    ModuleColors { bg: Color32::from_rgb(0xff, 0xf9, 0xc4), border: Color32::from_rgb(0xfb, 0xc0, 0x2d), text: Color32::from_rgb(0x5d, 0x40, 0x37) },
    ModuleColors { bg: Color32::from_rgb(0xc8, 0xe6, 0xc9), border: Color32::from_rgb(0x43, 0xa0, 0x47), text: Color32::from_rgb(0x1b, 0x5e, 0x20) },
    ModuleColors { bg: Color32::from_rgb(0xbb, 0xde, 0xfb), border: Color32::from_rgb(0x19, 0x76, 0xd2), text: Color32::from_rgb(0x0d, 0x47, 0xa1) },
    ModuleColors { bg: Color32::from_rgb(0xf8, 0xbb, 0xd0), border: Color32::from_rgb(0xc2, 0x18, 0x5b), text: Color32::from_rgb(0x88, 0x0e, 0x4f) },
    ModuleColors { bg: Color32::from_rgb(0xe1, 0xbe, 0xe7), border: Color32::from_rgb(0x7b, 0x1f, 0xa2), text: Color32::from_rgb(0x4a, 0x14, 0x8c) },
];

/// Palette index for a module name: `hash = c + (hash << 5) - hash` over UTF-16
/// units, with the shift done in 32 bits and the rest in doubles.
/// The same name gets the same color in every view and on every run.
fn module_color_index(name: &str) -> usize {
    let mut hash: f64 = 0.0;
    for unit in name.encode_utf16() {
        let shifted = ((hash as i64) as i32).wrapping_shl(5);
        hash = unit as f64 + (shifted as f64 - hash);
    }
    (hash.abs() % MODULE_PALETTE.len() as f64) as usize
}

pub fn module_color(name: &str) -> ModuleColors {
    MODULE_PALETTE[module_color_index(name)]
}

/// Returns (bg_color, text_color, secondary_text_color) for list cards
pub fn card_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x1a, 0x1d, 0x27),   // bg
        Color32::WHITE,                        // text
        Color32::from_rgb(160, 166, 182),      // secondary text
    )
}

/// Returns (bg_color, text_color) for button-like elements
pub fn button_colors() -> (Color32, Color32) {
    (
        Color32::from_rgb(46, 52, 68),
        Color32::from_rgb(200, 204, 214),
    )
}

/// Returns (content_bg, frame_color, frame_text) for dialogs
pub fn dialog_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(12, 14, 20),
        Color32::from_rgb(43, 74, 142),        // navy frame
        Color32::from_rgb(172, 178, 192),
    )
}

/// Returns (grid_line, hour_line, label) colors for the timetable grid
pub fn grid_colors() -> (Color32, Color32, Color32) {
    (
        Color32::from_rgb(0x26, 0x2a, 0x36),
        Color32::from_rgb(0x3a, 0x40, 0x52),
        Color32::from_rgb(0x80, 0x86, 0x96),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_colors_are_stable() {
        assert_eq!(module_color_index(""), 0);
        assert_eq!(module_color_index("A"), 0);
        assert_eq!(module_color_index("B"), 1);
        assert_eq!(module_color_index("C"), 2);
        // "AB": 65, then 66 + (65 << 5) - 65 = 2081
        assert_eq!(module_color_index("AB"), 1);
        assert_eq!(module_color("Databases"), module_color("Databases"));
    }

    #[test]
    fn long_names_stay_in_range() {
        let name = "Advanced Topics in Distributed Systems and Cloud Computing ".repeat(20);
        assert!(module_color_index(&name) < MODULE_PALETTE.len());
    }
}
