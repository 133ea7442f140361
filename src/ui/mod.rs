mod analytics;
mod app;
mod dialogs;
mod panels;
mod theme;
mod views;
mod widgets;

pub use app::PlannerApp;
pub use theme::{setup_fonts, setup_theme};
