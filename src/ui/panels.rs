//! List screens for programs, modules, rooms and the people/semester directory.
//! Each screen only reports what was clicked; the app owns the requests.

use eframe::egui;
use egui::{Color32, RichText, Ui};
use egui_phosphor::regular as icons;

use crate::api::*;
use crate::forms::{describe_assessments, CAMPUSES, PROGRAM_LEVELS};
use crate::session::Session;
use super::theme;
use super::widgets::{badge, painted_button, row_icon, section_label, tab_strip, BTN_TEXT};

/// Everything the list screens show, loaded together after sign-in
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub programs: Vec<StudyProgram>,
    pub specializations: Vec<Specialization>,
    pub modules: Vec<Module>,
    pub rooms: Vec<Room>,
    pub lecturers: Vec<Lecturer>,
    pub groups: Vec<Group>,
    pub semesters: Vec<Semester>,
}

impl Catalog {
    pub fn program(&self, id: i64) -> Option<&StudyProgram> {
        self.programs.iter().find(|p| p.id == id)
    }

    pub fn program_acronym(&self, id: Option<i64>) -> String {
        id.and_then(|id| self.program(id))
            .map(|p| p.acronym.clone())
            .unwrap_or_else(|| "-".to_string())
    }

    pub fn semester_named(&self, name: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.name == name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Program,
    Module,
    Room,
    Lecturer,
    Group,
    Semester,
}

/// A row the user wants to change or remove
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Program(StudyProgram),
    Specialization(Specialization),
    Module(Module),
    Room(Room),
    Lecturer(Lecturer),
    Group(Group),
    Semester(Semester),
    Entry(ScheduleEntry),
}

impl Record {
    /// Question shown in the delete confirmation
    pub fn delete_prompt(&self) -> String {
        match self {
            Record::Program(p) => format!("Delete study program \"{}\"?", p.name),
            Record::Specialization(s) => format!("Delete specialization \"{}\"?", s.name),
            Record::Module(m) => format!("Delete module {} \"{}\"?", m.module_code, m.name),
            Record::Room(r) => format!("Delete room \"{}\"?", r.name),
            Record::Lecturer(l) => format!("Delete lecturer \"{}\"?", l.display_name()),
            Record::Group(g) => format!("Delete group \"{}\"?", g.name),
            Record::Semester(s) => format!("Delete semester \"{}\"?", s.name),
            Record::Entry(_) => "Delete session?".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelAction {
    Create(RecordKind),
    CreateSpecialization(i64),
    Edit(Record),
    Delete(Record),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramTab {
    Info,
    Specializations,
    Modules,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryTab {
    Lecturers,
    Groups,
    Semesters,
}

/// Per-screen UI state that survives switching screens
#[derive(Debug, Clone)]
pub struct PanelState {
    pub program_level: &'static str,
    pub open_program: Option<i64>,
    pub program_tab: ProgramTab,
    pub module_query: String,
    /// `None` shows every campus
    pub room_campus: Option<String>,
    pub room_query: String,
    pub directory_tab: DirectoryTab,
    pub directory_query: String,
}

impl PanelState {
    pub fn new(default_campus: Option<&str>) -> Self {
        Self {
            program_level: PROGRAM_LEVELS[0],
            open_program: None,
            program_tab: ProgramTab::Info,
            module_query: String::new(),
            room_campus: Some(default_campus.unwrap_or(CAMPUSES[0]).to_string()),
            room_query: String::new(),
            directory_tab: DirectoryTab::Lecturers,
            directory_query: String::new(),
        }
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

pub fn programs_at_level<'a>(programs: &'a [StudyProgram], level: &str) -> Vec<&'a StudyProgram> {
    programs
        .iter()
        .filter(|p| p.level.eq_ignore_ascii_case(level))
        .collect()
}

/// Code or name contains the query, ignoring case
pub fn search_modules<'a>(modules: &'a [Module], query: &str) -> Vec<&'a Module> {
    let q = query.trim().to_lowercase();
    modules
        .iter()
        .filter(|m| q.is_empty() || contains_ci(&m.module_code, &q) || contains_ci(&m.name, &q))
        .collect()
}

/// Rooms on `campus` (any campus when `None`) whose name or type contains the query
pub fn filter_rooms<'a>(rooms: &'a [Room], campus: Option<&str>, query: &str) -> Vec<&'a Room> {
    let q = query.trim().to_lowercase();
    rooms
        .iter()
        .filter(|r| {
            campus.map_or(true, |c| {
                r.location.as_deref().is_some_and(|l| l.trim().eq_ignore_ascii_case(c))
            })
        })
        .filter(|r| q.is_empty() || contains_ci(&r.name, &q) || contains_ci(&r.room_type, &q))
        .collect()
}

pub fn program_specializations(specializations: &[Specialization], program_id: i64) -> Vec<&Specialization> {
    specializations
        .iter()
        .filter(|s| s.program_id == Some(program_id))
        .collect()
}

pub fn program_modules(modules: &[Module], program_id: i64) -> Vec<&Module> {
    let mut list: Vec<&Module> = modules
        .iter()
        .filter(|m| m.program_id == Some(program_id))
        .collect();
    list.sort_by(|a, b| a.semester.cmp(&b.semester).then_with(|| a.module_code.cmp(&b.module_code)));
    list
}

fn panel_header(ui: &mut Ui, title: &str, new_label: Option<&str>) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).size(20.0).color(Color32::WHITE).strong());
        if let Some(label) = new_label {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                clicked = painted_button(ui, &format!("{} {}", icons::PLUS, label), BTN_TEXT).clicked();
            });
        }
    });
    ui.add_space(8.0);
    clicked
}

fn search_box(ui: &mut Ui, query: &mut String, hint: &str) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(icons::MAGNIFYING_GLASS).size(16.0).color(Color32::from_rgb(150, 150, 150)));
        ui.add(egui::TextEdit::singleline(query).hint_text(hint).desired_width(280.0));
    });
}

fn empty_note(ui: &mut Ui, text: &str) {
    ui.add_space(16.0);
    ui.label(RichText::new(text).color(Color32::from_rgb(120, 120, 130)));
}

/// Edit and delete icons at the end of a table row
fn row_actions(ui: &mut Ui, editable: bool, record: impl Fn() -> Record, action: &mut Option<PanelAction>) {
    if !editable {
        ui.label("");
        return;
    }
    ui.horizontal(|ui| {
        if row_icon(ui, icons::PENCIL_SIMPLE, Color32::WHITE, "Edit") {
            *action = Some(PanelAction::Edit(record()));
        }
        if row_icon(ui, icons::TRASH, theme::ERROR, "Delete") {
            *action = Some(PanelAction::Delete(record()));
        }
    });
}

// --- Programs ---

pub fn render_programs(ui: &mut Ui, catalog: &Catalog, state: &mut PanelState, session: &Session) -> Option<PanelAction> {
    if let Some(program) = state.open_program.and_then(|id| catalog.program(id)) {
        return render_program_detail(ui, catalog, program, state, session);
    }
    state.open_program = None;

    let editable = session.role.can_manage_programs();
    let mut action = None;
    if panel_header(ui, "Study Programs", editable.then_some("New program")) {
        action = Some(PanelAction::Create(RecordKind::Program));
    }

    let tabs: Vec<(&'static str, &str)> = PROGRAM_LEVELS.iter().map(|l| (*l, *l)).collect();
    tab_strip(ui, &mut state.program_level, &tabs);
    ui.add_space(8.0);

    let programs = programs_at_level(&catalog.programs, state.program_level);
    if programs.is_empty() {
        empty_note(ui, "No study programs at this level");
        return action;
    }

    let (card_bg, text_color, secondary) = theme::card_colors();
    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing = egui::vec2(12.0, 12.0);
            for program in programs {
                let card = egui::Frame::none()
                    .fill(card_bg)
                    .rounding(egui::Rounding::same(8.0))
                    .inner_margin(egui::Margin::same(14.0))
                    .show(ui, |ui| {
                        ui.set_width(280.0);
                        ui.horizontal(|ui| {
                            if program.status {
                                badge(ui, "Active", theme::SUCCESS);
                            } else {
                                badge(ui, "Inactive", Color32::from_rgb(150, 150, 150));
                            }
                            ui.label(RichText::new(format!("{} ECTS", program.total_ects)).size(12.0).color(secondary));
                        });
                        ui.add(egui::Label::new(
                            RichText::new(&program.name).size(16.0).color(text_color).strong(),
                        ).truncate());
                        let head = if program.head_of_program.is_empty() { "-" } else { &program.head_of_program };
                        ui.label(RichText::new(format!("{} • Head: {}", program.acronym, head)).size(12.0).color(secondary));
                        ui.horizontal(|ui| {
                            if row_icon(ui, icons::ARROW_SQUARE_OUT, Color32::WHITE, "Open") {
                                state.open_program = Some(program.id);
                                state.program_tab = ProgramTab::Info;
                            }
                            if editable {
                                if row_icon(ui, icons::PENCIL_SIMPLE, Color32::WHITE, "Edit") {
                                    action = Some(PanelAction::Edit(Record::Program(program.clone())));
                                }
                                if row_icon(ui, icons::TRASH, theme::ERROR, "Delete") {
                                    action = Some(PanelAction::Delete(Record::Program(program.clone())));
                                }
                            }
                        });
                    });
                if card.response.interact(egui::Sense::click()).double_clicked() {
                    state.open_program = Some(program.id);
                    state.program_tab = ProgramTab::Info;
                }
            }
        });
    });
    action
}

fn render_program_detail(
    ui: &mut Ui,
    catalog: &Catalog,
    program: &StudyProgram,
    state: &mut PanelState,
    session: &Session,
) -> Option<PanelAction> {
    let editable = session.role.can_manage_programs();
    let mut action = None;

    ui.horizontal(|ui| {
        if row_icon(ui, icons::ARROW_LEFT, Color32::WHITE, "Back to programs") {
            state.open_program = None;
        }
        ui.label(RichText::new(&program.name).size(20.0).color(Color32::WHITE).strong());
        ui.label(RichText::new(&program.acronym).size(14.0).color(Color32::from_rgb(140, 140, 160)));
    });
    ui.add_space(6.0);
    tab_strip(
        ui,
        &mut state.program_tab,
        &[
            (ProgramTab::Info, "INFO"),
            (ProgramTab::Specializations, "SPECIALIZATIONS"),
            (ProgramTab::Modules, "MODULES"),
        ],
    );
    ui.add_space(10.0);

    match state.program_tab {
        ProgramTab::Info => {
            egui::Grid::new("program_info_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    let rows = [
                        ("Level", program.level.clone()),
                        ("Head of program", program.head_of_program.clone()),
                        ("Total ECTS", program.total_ects.to_string()),
                        ("Start date", program.start_date.clone()),
                        ("Location", program.location.clone().unwrap_or_default()),
                        ("Status", if program.status { "Active" } else { "Inactive" }.to_string()),
                    ];
                    for (label, value) in rows {
                        section_label(ui, label);
                        ui.label(if value.is_empty() { "-".to_string() } else { value });
                        ui.end_row();
                    }
                });
            if editable {
                ui.add_space(12.0);
                if painted_button(ui, &format!("{} Edit program", icons::PENCIL_SIMPLE), BTN_TEXT).clicked() {
                    action = Some(PanelAction::Edit(Record::Program(program.clone())));
                }
            }
        }
        ProgramTab::Specializations => {
            let specs = program_specializations(&catalog.specializations, program.id);
            if editable
                && painted_button(ui, &format!("{} Add specialization", icons::PLUS), BTN_TEXT).clicked()
            {
                action = Some(PanelAction::CreateSpecialization(program.id));
            }
            ui.add_space(8.0);
            if specs.is_empty() {
                empty_note(ui, "No specializations yet");
            } else {
                egui::Grid::new("program_specs_grid")
                    .num_columns(5)
                    .striped(true)
                    .spacing([20.0, 8.0])
                    .show(ui, |ui| {
                        for header in ["Name", "Acronym", "Start date", "Status", ""] {
                            section_label(ui, header);
                        }
                        ui.end_row();
                        for spec in specs {
                            ui.label(&spec.name);
                            ui.label(&spec.acronym);
                            ui.label(&spec.start_date);
                            ui.label(if spec.status { "Active" } else { "Inactive" });
                            row_actions(ui, editable, || Record::Specialization(spec.clone()), &mut action);
                            ui.end_row();
                        }
                    });
            }
        }
        ProgramTab::Modules => {
            let modules = program_modules(&catalog.modules, program.id);
            if modules.is_empty() {
                empty_note(ui, "No modules assigned to this program");
            } else {
                egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
                    egui::Grid::new("program_modules_grid")
                        .num_columns(5)
                        .striped(true)
                        .spacing([20.0, 8.0])
                        .show(ui, |ui| {
                            for header in ["Semester", "Code", "Name", "ECTS", "Category"] {
                                section_label(ui, header);
                            }
                            ui.end_row();
                            for module in modules {
                                ui.label(module.semester.to_string());
                                ui.label(&module.module_code);
                                ui.label(&module.name);
                                ui.label(module.ects.to_string());
                                ui.label(module.category.as_deref().unwrap_or("-"));
                                ui.end_row();
                            }
                        });
                });
            }
        }
    }
    action
}

// --- Modules ---

pub fn render_modules(ui: &mut Ui, catalog: &Catalog, state: &mut PanelState, session: &Session) -> Option<PanelAction> {
    let editable = session.role.can_manage_modules();
    let mut action = None;
    if panel_header(ui, "Modules", editable.then_some("New module")) {
        action = Some(PanelAction::Create(RecordKind::Module));
    }
    search_box(ui, &mut state.module_query, "Search by code or name");
    ui.add_space(8.0);

    let modules = search_modules(&catalog.modules, &state.module_query);
    if modules.is_empty() {
        empty_note(ui, "No modules found");
        return action;
    }

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        egui::Grid::new("modules_grid")
            .num_columns(9)
            .striped(true)
            .spacing([16.0, 8.0])
            .show(ui, |ui| {
                for header in ["Code", "Name", "ECTS", "Sem.", "Category", "Room type", "Assessment", "Program", ""] {
                    section_label(ui, header);
                }
                ui.end_row();
                for module in modules {
                    ui.label(&module.module_code);
                    ui.label(&module.name);
                    ui.label(module.ects.to_string());
                    ui.label(module.semester.to_string());
                    ui.label(module.category.as_deref().unwrap_or("-"));
                    ui.label(&module.room_type);
                    ui.label(
                        RichText::new(describe_assessments(module.assessment_type.as_deref()))
                            .size(12.0),
                    );
                    ui.label(catalog.program_acronym(module.program_id));
                    row_actions(ui, editable, || Record::Module(module.clone()), &mut action);
                    ui.end_row();
                }
            });
    });
    action
}

// --- Rooms ---

pub fn render_rooms(ui: &mut Ui, catalog: &Catalog, state: &mut PanelState, session: &Session) -> Option<PanelAction> {
    let editable = session.role.can_manage_rooms();
    let mut action = None;
    if panel_header(ui, "Rooms", editable.then_some("New room")) {
        action = Some(PanelAction::Create(RecordKind::Room));
    }

    ui.horizontal(|ui| {
        if ui.selectable_label(state.room_campus.is_none(), "All").clicked() {
            state.room_campus = None;
        }
        for campus in CAMPUSES {
            let selected = state.room_campus.as_deref() == Some(campus);
            if ui.selectable_label(selected, campus).clicked() {
                state.room_campus = Some(campus.to_string());
            }
        }
    });
    search_box(ui, &mut state.room_query, "Search by name or type");
    ui.add_space(8.0);

    let rooms = filter_rooms(&catalog.rooms, state.room_campus.as_deref(), &state.room_query);
    if rooms.is_empty() {
        empty_note(ui, "No rooms match");
        return action;
    }

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| {
        egui::Grid::new("rooms_grid")
            .num_columns(7)
            .striped(true)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                for header in ["Name", "Type", "Capacity", "Campus", "Equipment", "Status", ""] {
                    section_label(ui, header);
                }
                ui.end_row();
                for room in rooms {
                    ui.label(&room.name);
                    ui.label(&room.room_type);
                    ui.label(room.capacity.to_string());
                    ui.label(room.location.as_deref().unwrap_or("-"));
                    ui.label(room.equipment.as_deref().unwrap_or("-"));
                    if room.status {
                        ui.label(RichText::new("Available").color(theme::SUCCESS));
                    } else {
                        ui.label(RichText::new("Unavailable").color(theme::ERROR));
                    }
                    row_actions(ui, editable, || Record::Room(room.clone()), &mut action);
                    ui.end_row();
                }
            });
    });
    action
}

// --- Directory ---

pub fn render_directory(ui: &mut Ui, catalog: &Catalog, state: &mut PanelState, session: &Session) -> Option<PanelAction> {
    let role = session.role;
    let (title, new_label, kind, editable) = match state.directory_tab {
        DirectoryTab::Lecturers => ("Lecturers", "New lecturer", RecordKind::Lecturer, role.can_manage_lecturers()),
        DirectoryTab::Groups => ("Student Groups", "New group", RecordKind::Group, role.can_manage_groups()),
        DirectoryTab::Semesters => ("Semesters", "New semester", RecordKind::Semester, role.can_manage_semesters()),
    };

    let mut action = None;
    if panel_header(ui, title, editable.then_some(new_label)) {
        action = Some(PanelAction::Create(kind));
    }
    if tab_strip(
        ui,
        &mut state.directory_tab,
        &[
            (DirectoryTab::Lecturers, "Lecturers"),
            (DirectoryTab::Groups, "Groups"),
            (DirectoryTab::Semesters, "Semesters"),
        ],
    ) {
        state.directory_query.clear();
    }
    search_box(ui, &mut state.directory_query, "Search");
    ui.add_space(8.0);
    let q = state.directory_query.trim().to_lowercase();

    egui::ScrollArea::vertical().auto_shrink([false; 2]).show(ui, |ui| match state.directory_tab {
        DirectoryTab::Lecturers => {
            let lecturers: Vec<&Lecturer> = catalog
                .lecturers
                .iter()
                .filter(|l| q.is_empty() || contains_ci(&l.display_name(), &q))
                .collect();
            if lecturers.is_empty() {
                empty_note(ui, "No lecturers found");
                return;
            }
            egui::Grid::new("lecturers_grid")
                .num_columns(6)
                .striped(true)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for header in ["Name", "Title", "Employment", "Email", "Location", ""] {
                        section_label(ui, header);
                    }
                    ui.end_row();
                    for lecturer in lecturers {
                        ui.label(lecturer.display_name());
                        ui.label(&lecturer.title);
                        ui.label(&lecturer.employment_type);
                        ui.label(lecturer.mdh_email.as_deref().unwrap_or("-"));
                        ui.label(lecturer.location.as_deref().unwrap_or("-"));
                        row_actions(ui, editable, || Record::Lecturer(lecturer.clone()), &mut action);
                        ui.end_row();
                    }
                });
        }
        DirectoryTab::Groups => {
            let groups: Vec<&Group> = catalog
                .groups
                .iter()
                .filter(|g| q.is_empty() || contains_ci(&g.name, &q))
                .collect();
            if groups.is_empty() {
                empty_note(ui, "No groups found");
                return;
            }
            egui::Grid::new("groups_grid")
                .num_columns(5)
                .striped(true)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for header in ["Name", "Size", "Program", "Description", ""] {
                        section_label(ui, header);
                    }
                    ui.end_row();
                    for group in groups {
                        ui.label(&group.name);
                        ui.label(group.size.to_string());
                        ui.label(group.program.as_deref().unwrap_or("-"));
                        ui.label(group.description.as_deref().unwrap_or("-"));
                        row_actions(ui, editable, || Record::Group(group.clone()), &mut action);
                        ui.end_row();
                    }
                });
        }
        DirectoryTab::Semesters => {
            let semesters: Vec<&Semester> = catalog
                .semesters
                .iter()
                .filter(|s| q.is_empty() || contains_ci(&s.name, &q))
                .collect();
            if semesters.is_empty() {
                empty_note(ui, "No semesters found");
                return;
            }
            egui::Grid::new("semesters_grid")
                .num_columns(4)
                .striped(true)
                .spacing([20.0, 8.0])
                .show(ui, |ui| {
                    for header in ["Name", "Start", "End", ""] {
                        section_label(ui, header);
                    }
                    ui.end_row();
                    for semester in semesters {
                        ui.label(&semester.name);
                        ui.label(semester.start_date.as_deref().unwrap_or("-"));
                        ui.label(semester.end_date.as_deref().unwrap_or("-"));
                        row_actions(ui, editable, || Record::Semester(semester.clone()), &mut action);
                        ui.end_row();
                    }
                });
        }
    });
    action
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: i64, name: &str, kind: &str, location: Option<&str>) -> Room {
        Room {
            id,
            name: name.into(),
            capacity: 30,
            room_type: kind.into(),
            status: true,
            equipment: None,
            location: location.map(String::from),
        }
    }

    fn module(code: &str, name: &str, program_id: Option<i64>, semester: i64) -> Module {
        Module {
            module_code: code.into(),
            name: name.into(),
            ects: 5,
            room_type: "Seminar".into(),
            assessment_type: None,
            semester,
            category: None,
            program_id,
            specialization_ids: Vec::new(),
        }
    }

    #[test]
    fn rooms_filter_by_campus_and_query() {
        let rooms = vec![
            room(1, "A-101", "Lecture Classroom", Some("Berlin")),
            room(2, "Lab 3", "Computer Lab", Some("berlin")),
            room(3, "M-1", "Seminar", Some("Munich")),
            room(4, "Annex", "Seminar", None),
        ];
        let ids = |v: Vec<&Room>| v.iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(ids(filter_rooms(&rooms, Some("Berlin"), "")), vec![1, 2]);
        assert_eq!(ids(filter_rooms(&rooms, Some("Berlin"), "lab")), vec![2]);
        assert_eq!(ids(filter_rooms(&rooms, None, "seminar")), vec![3, 4]);
        assert!(filter_rooms(&rooms, Some("Dusseldorf"), "").is_empty());
    }

    #[test]
    fn modules_search_code_and_name() {
        let modules = vec![
            module("CS101", "Databases", Some(1), 2),
            module("MA201", "Linear Algebra", Some(2), 1),
        ];
        assert_eq!(search_modules(&modules, "cs1").len(), 1);
        assert_eq!(search_modules(&modules, "ALGEBRA")[0].module_code, "MA201");
        assert_eq!(search_modules(&modules, "  ").len(), 2);
    }

    #[test]
    fn program_modules_sorted_by_semester() {
        let modules = vec![
            module("CS301", "Compilers", Some(1), 3),
            module("CS101", "Databases", Some(1), 1),
            module("MA201", "Linear Algebra", Some(2), 1),
        ];
        let codes: Vec<&str> = program_modules(&modules, 1).iter().map(|m| m.module_code.as_str()).collect();
        assert_eq!(codes, vec!["CS101", "CS301"]);
    }

    #[test]
    fn programs_by_level_ignore_case() {
        let program = |id, level: &str| StudyProgram {
            id,
            name: format!("Program {}", id),
            acronym: "P".into(),
            head_of_program: String::new(),
            status: true,
            start_date: String::new(),
            total_ects: 180,
            location: None,
            level: level.into(),
        };
        let programs = vec![program(1, "Bachelor"), program(2, "master"), program(3, "Master")];
        assert_eq!(programs_at_level(&programs, "Master").len(), 2);
    }

    #[test]
    fn entry_delete_prompt() {
        let semester = Semester {
            id: 1,
            name: "Winter 2025".into(),
            start_date: None,
            end_date: None,
        };
        assert_eq!(Record::Semester(semester).delete_prompt(), "Delete semester \"Winter 2025\"?");
    }
}
