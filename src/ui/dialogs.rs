//! Modal windows: edit forms, delete confirmation, alerts

use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::api::OfferedModule;
use crate::forms::*;
use super::panels::Catalog;
use super::theme;
use super::widgets::{dialog_window, painted_button, row_icon, save_cancel_row, section_label, text_field, BTN_TEXT};

/// The record being created or edited, with its typed-in values
#[derive(Debug, Clone, PartialEq)]
pub enum EditForm {
    Program { id: Option<i64>, draft: ProgramDraft },
    Specialization { id: Option<i64>, program_id: i64, draft: SpecializationDraft },
    /// Modules are addressed by code; `None` creates
    Module { code: Option<String>, draft: ModuleDraft },
    Room { id: Option<i64>, draft: RoomDraft },
    Lecturer { id: Option<i64>, draft: LecturerDraft },
    Group { id: Option<i64>, draft: GroupDraft },
    Semester { id: Option<i64>, draft: SemesterDraft },
    Entry { id: Option<i64>, draft: ScheduleEntryDraft },
}

impl EditForm {
    pub fn title(&self) -> &'static str {
        match self {
            EditForm::Program { id: None, .. } => "New study program",
            EditForm::Program { .. } => "Edit study program",
            EditForm::Specialization { id: None, .. } => "New specialization",
            EditForm::Specialization { .. } => "Edit specialization",
            EditForm::Module { code: None, .. } => "New module",
            EditForm::Module { .. } => "Edit module",
            EditForm::Room { id: None, .. } => "New room",
            EditForm::Room { .. } => "Edit room",
            EditForm::Lecturer { id: None, .. } => "New lecturer",
            EditForm::Lecturer { .. } => "Edit lecturer",
            EditForm::Group { id: None, .. } => "New group",
            EditForm::Group { .. } => "Edit group",
            EditForm::Semester { id: None, .. } => "New semester",
            EditForm::Semester { .. } => "Edit semester",
            EditForm::Entry { id: None, .. } => "Add session",
            EditForm::Entry { .. } => "Edit session",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Submit,
    Cancel,
}

fn combo(ui: &mut Ui, id: &str, value: &mut String, options: &[&str]) {
    egui::ComboBox::new(id, "")
        .selected_text(value.as_str())
        .width(240.0)
        .show_ui(ui, |ui| {
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}

/// Combo whose empty value reads as `none_label`
fn optional_combo(ui: &mut Ui, id: &str, value: &mut String, options: &[&str], none_label: &str) {
    let shown = if value.is_empty() { none_label.to_string() } else { value.clone() };
    egui::ComboBox::new(id, "")
        .selected_text(shown)
        .width(240.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, String::new(), none_label);
            for option in options {
                ui.selectable_value(value, option.to_string(), *option);
            }
        });
}

fn form_grid(ui: &mut Ui, id: &str, add_rows: impl FnOnce(&mut Ui)) {
    egui::Grid::new(id)
        .num_columns(2)
        .spacing([20.0, 10.0])
        .show(ui, add_rows);
}

/// Draw the open form. Returns what the user pressed, if anything.
pub fn render_form(
    ctx: &egui::Context,
    form: &mut EditForm,
    catalog: &Catalog,
    offered: &[OfferedModule],
    saving: bool,
) -> Option<FormOutcome> {
    let mut outcome = None;
    let title = form.title();

    dialog_window(title, 560.0).show(ctx, |ui| {
        ui.set_min_width(500.0);
        match form {
            EditForm::Program { draft, .. } => program_fields(ui, draft),
            EditForm::Specialization { program_id, draft, .. } => {
                let program = catalog.program(*program_id).map(|p| p.name.clone()).unwrap_or_default();
                form_grid(ui, "spec_form", |ui| {
                    ui.label("Program");
                    ui.label(RichText::new(program).strong());
                    ui.end_row();
                    ui.label("Name");
                    text_field(ui, &mut draft.name, "Data Science", 300.0);
                    ui.end_row();
                    ui.label("Acronym");
                    text_field(ui, &mut draft.acronym, "Derived from the name when empty", 300.0);
                    ui.end_row();
                });
            }
            EditForm::Module { code, draft } => module_fields(ui, draft, code.is_some(), catalog),
            EditForm::Room { draft, .. } => room_fields(ui, draft),
            EditForm::Lecturer { draft, .. } => lecturer_fields(ui, draft),
            EditForm::Group { draft, .. } => group_fields(ui, draft, catalog),
            EditForm::Semester { draft, .. } => {
                form_grid(ui, "semester_form", |ui| {
                    ui.label("Name");
                    text_field(ui, &mut draft.name, "Winter 2025", 300.0);
                    ui.end_row();
                    ui.label("Start date");
                    text_field(ui, &mut draft.start_date, "YYYY-MM-DD", 160.0);
                    ui.end_row();
                    ui.label("End date");
                    text_field(ui, &mut draft.end_date, "YYYY-MM-DD", 160.0);
                    ui.end_row();
                });
            }
            EditForm::Entry { draft, .. } => entry_fields(ui, draft, catalog, offered),
        }

        ui.add_space(16.0);
        let (save, cancel) = save_cancel_row(ui, saving);
        if save {
            outcome = Some(FormOutcome::Submit);
        }
        if cancel {
            outcome = Some(FormOutcome::Cancel);
        }
    });

    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        outcome = Some(FormOutcome::Cancel);
    }
    outcome
}

fn program_fields(ui: &mut Ui, draft: &mut ProgramDraft) {
    form_grid(ui, "program_form", |ui| {
        ui.label("Name");
        text_field(ui, &mut draft.name, "Computer Science", 300.0);
        ui.end_row();
        ui.label("Acronym");
        text_field(ui, &mut draft.acronym, "CS", 120.0);
        ui.end_row();
        ui.label("Head of program");
        text_field(ui, &mut draft.head_of_program, "Prof. Dr. ...", 300.0);
        ui.end_row();
        ui.label("Level");
        combo(ui, "program_level", &mut draft.level, &PROGRAM_LEVELS);
        ui.end_row();
        ui.label("Total ECTS");
        text_field(ui, &mut draft.total_ects, "180", 120.0);
        ui.end_row();
        ui.label("Start date");
        text_field(ui, &mut draft.start_date, "Today when empty (YYYY-MM-DD)", 240.0);
        ui.end_row();
        ui.label("Campus");
        optional_combo(ui, "program_campus", &mut draft.location, &CAMPUSES, "Not set");
        ui.end_row();
        ui.label("Status");
        ui.checkbox(&mut draft.active, "Active");
        ui.end_row();
    });
}

fn module_fields(ui: &mut Ui, draft: &mut ModuleDraft, editing: bool, catalog: &Catalog) {
    form_grid(ui, "module_form", |ui| {
        ui.label("Code");
        ui.add_enabled(
            !editing,
            egui::TextEdit::singleline(&mut draft.module_code).hint_text("CS101").desired_width(160.0),
        );
        ui.end_row();
        ui.label("Name");
        text_field(ui, &mut draft.name, "Databases", 300.0);
        ui.end_row();
        ui.label("ECTS");
        text_field(ui, &mut draft.ects, "5", 80.0);
        ui.end_row();
        ui.label("Semester");
        text_field(ui, &mut draft.semester, "1", 80.0);
        ui.end_row();
        ui.label("Category");
        combo(ui, "module_category", &mut draft.category, &MODULE_CATEGORIES);
        ui.end_row();
        ui.label("Room type");
        combo(ui, "module_room_type", &mut draft.room_type, &ROOM_TYPES);
        ui.end_row();

        ui.label("Program");
        let selected = draft
            .program_id
            .and_then(|id| catalog.program(id))
            .map(|p| format!("{} ({})", p.name, p.acronym))
            .unwrap_or_else(|| "None".to_string());
        let before = draft.program_id;
        egui::ComboBox::new("module_program", "")
            .selected_text(selected)
            .width(300.0)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut draft.program_id, None, "None");
                for program in &catalog.programs {
                    ui.selectable_value(
                        &mut draft.program_id,
                        Some(program.id),
                        format!("{} ({})", program.name, program.acronym),
                    );
                }
            });
        if draft.program_id != before {
            draft.specialization_ids.clear();
        }
        ui.end_row();

        if let Some(program_id) = draft.program_id {
            let specs: Vec<_> = catalog
                .specializations
                .iter()
                .filter(|s| s.program_id == Some(program_id))
                .collect();
            if !specs.is_empty() {
                ui.label("Specializations");
                ui.vertical(|ui| {
                    for spec in specs {
                        let mut checked = draft.specialization_ids.contains(&spec.id);
                        if ui.checkbox(&mut checked, format!("{} ({})", spec.name, spec.acronym)).changed() {
                            draft.toggle_specialization(spec.id);
                        }
                    }
                });
                ui.end_row();
            }
        }
    });

    ui.add_space(12.0);
    section_label(ui, "Assessment");
    let mut remove = None;
    for (i, item) in draft.assessments.iter_mut().enumerate() {
        ui.horizontal(|ui| {
            egui::ComboBox::new(("assessment_kind", i), "")
                .selected_text(item.kind.as_str())
                .width(200.0)
                .show_ui(ui, |ui| {
                    for kind in ASSESSMENT_TYPES {
                        ui.selectable_value(&mut item.kind, kind.to_string(), kind);
                    }
                });
            ui.add(egui::DragValue::new(&mut item.weight).speed(1.0).suffix("%"));
            item.weight = item.weight.clamp(0, 100);
            if row_icon(ui, icons::X, theme::ERROR, "Remove") {
                remove = Some(i);
            }
        });
    }
    if let Some(i) = remove {
        draft.assessments.remove(i);
    }
    ui.horizontal(|ui| {
        if ui.button(format!("{} Add part", icons::PLUS)).clicked() {
            draft.assessments.push(AssessmentItem {
                kind: ASSESSMENT_TYPES[0].to_string(),
                weight: 0,
            });
        }
        let total: i64 = draft.assessments.iter().map(|a| a.weight).sum();
        let color = if total == 100 { theme::SUCCESS } else { theme::ERROR };
        ui.label(RichText::new(format!("Total {}%", total)).color(color));
    });
}

fn room_fields(ui: &mut Ui, draft: &mut RoomDraft) {
    form_grid(ui, "room_form", |ui| {
        ui.label("Name");
        text_field(ui, &mut draft.name, "A-101", 240.0);
        ui.end_row();
        ui.label("Capacity");
        text_field(ui, &mut draft.capacity, "40", 100.0);
        ui.end_row();
        ui.label("Type");
        combo(ui, "room_type", &mut draft.room_type, &ROOM_TYPES);
        ui.end_row();
        ui.label("Campus");
        optional_combo(ui, "room_campus", &mut draft.location, &CAMPUSES, "Not set");
        ui.end_row();
        ui.label("Equipment");
        text_field(ui, &mut draft.equipment, "Projector, whiteboard", 300.0);
        ui.end_row();
        ui.label("Status");
        ui.checkbox(&mut draft.available, "Available");
        ui.end_row();
    });
}

fn lecturer_fields(ui: &mut Ui, draft: &mut LecturerDraft) {
    form_grid(ui, "lecturer_form", |ui| {
        ui.label("Title");
        text_field(ui, &mut draft.title, "Dr.", 120.0);
        ui.end_row();
        ui.label("First name");
        text_field(ui, &mut draft.first_name, "", 240.0);
        ui.end_row();
        ui.label("Last name");
        text_field(ui, &mut draft.last_name, "", 240.0);
        ui.end_row();
        ui.label("Employment");
        combo(ui, "lecturer_employment", &mut draft.employment_type, &EMPLOYMENT_TYPES);
        ui.end_row();
        ui.label("Email");
        text_field(ui, &mut draft.email, "name@university.edu", 300.0);
        ui.end_row();
        ui.label("Campus");
        optional_combo(ui, "lecturer_campus", &mut draft.location, &CAMPUSES, "Not set");
        ui.end_row();
    });
}

fn group_fields(ui: &mut Ui, draft: &mut GroupDraft, catalog: &Catalog) {
    let programs: Vec<&str> = catalog.programs.iter().map(|p| p.name.as_str()).collect();
    form_grid(ui, "group_form", |ui| {
        ui.label("Name");
        text_field(ui, &mut draft.name, "CS-1", 240.0);
        ui.end_row();
        ui.label("Size");
        text_field(ui, &mut draft.size, "25", 100.0);
        ui.end_row();
        ui.label("Program");
        optional_combo(ui, "group_program", &mut draft.program, &programs, "None");
        ui.end_row();
        ui.label("Description");
        text_field(ui, &mut draft.description, "", 300.0);
        ui.end_row();
    });
}

fn entry_fields(ui: &mut Ui, draft: &mut ScheduleEntryDraft, catalog: &Catalog, offered: &[OfferedModule]) {
    form_grid(ui, "entry_form", |ui| {
        ui.label("Day");
        ui.label(RichText::new(format!("{}, {}", draft.day_of_week, draft.start_time)).strong());
        ui.end_row();

        ui.label("End time");
        text_field(ui, &mut draft.end_time, "HH:MM", 100.0);
        ui.end_row();

        ui.label("Module");
        let selected = draft
            .offered_module_id
            .and_then(|id| offered.iter().find(|o| o.id == id))
            .map(offered_label)
            .unwrap_or_else(|| "Select module".to_string());
        egui::ComboBox::new("entry_module", "")
            .selected_text(selected)
            .width(320.0)
            .show_ui(ui, |ui| {
                for module in offered {
                    ui.selectable_value(&mut draft.offered_module_id, Some(module.id), offered_label(module));
                }
            });
        ui.end_row();

        ui.label("Room");
        let selected = draft
            .room_id
            .and_then(|id| catalog.rooms.iter().find(|r| r.id == id))
            .map(|r| r.name.clone())
            .unwrap_or_else(|| "Select room".to_string());
        egui::ComboBox::new("entry_room", "")
            .selected_text(selected)
            .width(320.0)
            .show_ui(ui, |ui| {
                for room in catalog.rooms.iter().filter(|r| r.status) {
                    ui.selectable_value(
                        &mut draft.room_id,
                        Some(room.id),
                        format!("{} ({}, {} seats)", room.name, room.room_type, room.capacity),
                    );
                }
            });
        ui.end_row();

        ui.label("Groups");
        egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
            ui.vertical(|ui| {
                for group in &catalog.groups {
                    let mut checked = draft.group_ids.contains(&group.id);
                    if ui.checkbox(&mut checked, &group.name).changed() {
                        draft.toggle_group(group.id);
                    }
                }
            });
        });
        ui.end_row();
    });
}

fn offered_label(module: &OfferedModule) -> String {
    if module.lecturer_name.is_empty() {
        module.module_name.clone()
    } else {
        format!("{} ({})", module.module_name, module.lecturer_name)
    }
}

/// Delete confirmation. `Some(true)` deletes, `Some(false)` cancels.
pub fn render_confirm_delete(ctx: &egui::Context, prompt: &str, busy: bool) -> Option<bool> {
    let mut answer = None;
    dialog_window("Confirm Delete", 400.0).show(ctx, |ui| {
        ui.add_space(10.0);
        ui.label(RichText::new(prompt).size(14.0));
        ui.add_space(20.0);
        ui.horizontal(|ui| {
            ui.add_enabled_ui(!busy, |ui| {
                if painted_button(ui, "Delete", theme::ERROR).clicked() {
                    answer = Some(true);
                }
            });
            if painted_button(ui, "Cancel", BTN_TEXT).clicked() {
                answer = Some(false);
            }
        });
    });
    answer
}

/// Blocking message; returns true once dismissed
pub fn render_alert(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    dialog_window("Notice", 420.0).show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.label(RichText::new(icons::WARNING).size(20.0).color(Color32::from_rgb(0xe5, 0xaa, 0x00)));
            ui.label(RichText::new(message).size(14.0));
        });
        ui.add_space(16.0);
        if painted_button(ui, "OK", BTN_TEXT).clicked() {
            dismissed = true;
        }
    });
    dismissed || ctx.input(|i| i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Escape))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn titles_follow_create_or_edit() {
        let form = EditForm::Room { id: None, draft: RoomDraft::new(None) };
        assert_eq!(form.title(), "New room");
        let form = EditForm::Room { id: Some(3), draft: RoomDraft::new(None) };
        assert_eq!(form.title(), "Edit room");
        let form = EditForm::Entry { id: None, draft: ScheduleEntryDraft::at("Monday", "09:00") };
        assert_eq!(form.title(), "Add session");
        let form = EditForm::Entry { id: Some(7), draft: ScheduleEntryDraft::at("Monday", "09:00") };
        assert_eq!(form.title(), "Edit session");
    }

    #[test]
    fn offered_module_labels() {
        let module = OfferedModule {
            id: 1,
            module_code: Some("CS101".into()),
            module_name: "Databases".into(),
            lecturer_name: "Ada Lovelace".into(),
            semester: None,
        };
        assert_eq!(offered_label(&module), "Databases (Ada Lovelace)");
    }
}
