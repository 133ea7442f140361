use chrono::{Datelike, Local, NaiveDate};
use eframe::egui;
use egui::{Color32, RichText};
use std::future::Future;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Instant;

use crate::api::time::day_name;
use crate::api::{self, AnalyticsMetrics, LoginResponse, Me, OfferedModule, PlannerClient, ScheduleEntry};
use crate::config::{ClockFormat, Config, StartView};
use crate::export;
use crate::forms::*;
use crate::schedule::calendar::{period_title, semester_year};
use crate::schedule::{navigate, FilterOptions, ScheduleFilter, SemesterSeason, ViewMode};
use crate::session::{Role, Session};
use super::analytics;
use super::dialogs::{self, EditForm, FormOutcome};
use super::panels::{self, Catalog, PanelAction, PanelState, Record, RecordKind};
use super::views::{self, TimetableView};
use super::widgets::{dialog_window, icon_button, painted_button, pill_navigation, section_label, tab_strip, BTN_TEXT};

pub struct PlannerApp {
    config: Config,
    session: Session,
    state: AppState,
    screen: Screen,

    // Sign-in form
    signin_url: String,
    signin_email: String,
    signin_password: String,

    // Data
    catalog: Catalog,
    selected_semester: Option<String>,
    schedule: Vec<ScheduleEntry>,
    offered_modules: Vec<OfferedModule>,
    personal_lecturer: Option<String>,
    personal_schedule: Vec<ScheduleEntry>,
    analytics_semester: Option<i64>,
    analytics: Option<AnalyticsMetrics>,

    // Timetable navigation
    focus_date: NaiveDate,
    view_mode: ViewMode,
    list_view: bool,
    filter: ScheduleFilter,
    season: SemesterSeason,
    season_year: i32,

    panel_state: PanelState,

    // Modals
    form: Option<EditForm>,
    pending_delete: Option<Record>,
    alert: Option<String>,
    settings: Option<Config>,

    // Status
    status_message: Option<(String, bool)>, // (message, is_error)
    in_flight: usize,
    saving: SaveGuard,
    is_offline: bool,

    // Progress bar state
    progress: f32,
    progress_start: Instant,
    progress_phase: ProgressPhase,

    // Async communication
    runtime: tokio::runtime::Runtime,
    result_rx: Receiver<AsyncResult>,
    result_tx: Sender<AsyncResult>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum AppState {
    SignIn,
    Main,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Timetable,
    Personal,
    Programs,
    Modules,
    Rooms,
    Directory,
    Analytics,
}

impl Screen {
    fn tabs(session: &Session) -> Vec<(Screen, &'static str)> {
        let mut tabs = vec![
            (Screen::Timetable, "Timetable"),
            (Screen::Personal, "My Timetable"),
            (Screen::Programs, "Programs"),
            (Screen::Modules, "Modules"),
            (Screen::Rooms, "Rooms"),
            (Screen::Directory, "Directory"),
        ];
        if session.role.can_view_analytics() {
            tabs.push((Screen::Analytics, "Analytics"));
        }
        tabs
    }
}

/// What to reload after a successful write
#[derive(Debug, Clone, Copy, PartialEq)]
enum Reload {
    Catalog,
    Schedule,
}

enum AsyncResult {
    SignedIn(String, LoginResponse),
    Profile(Me),
    CatalogLoaded(Box<Catalog>),
    ScheduleLoaded {
        semester: String,
        entries: Vec<ScheduleEntry>,
        offered: Vec<OfferedModule>,
    },
    PersonalLoaded {
        lecturer: String,
        entries: Vec<ScheduleEntry>,
    },
    AnalyticsLoaded(i64, AnalyticsMetrics),
    Saved(String, Reload),
    Failed { failure: Failure, from_save: bool },
}

/// How a request failed, as far as the UI cares
#[derive(Debug, Clone, PartialEq)]
enum Failure {
    Error(String),
    Offline,
    Unauthorized,
}

/// Blocks a second write while one is in flight.
/// Only the write's own answer releases it; load failures leave it held.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct SaveGuard {
    active: bool,
}

impl SaveGuard {
    fn active(self) -> bool {
        self.active
    }

    /// False if a write is already running
    fn begin(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    fn settle(&mut self, result: &AsyncResult) {
        if matches!(result, AsyncResult::Saved(..) | AsyncResult::Failed { from_save: true, .. }) {
            self.active = false;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ProgressPhase {
    Idle,
    FastStart,    // 0→17% in 0.25s
    SlowCrawl,    // 17%→50% slowly
    Completing,   // snap to 100%
    FadingOut,    // fade out after completion
    Shrinking,    // shrink back on error
}

/// Map a failed request onto the UI's three failure modes
fn classify_error(what: &str, err: anyhow::Error) -> Failure {
    if api::is_offline(&err) {
        log::warn!("{} failed, service unreachable: {:#}", what, err);
        Failure::Offline
    } else if api::is_unauthorized(&err) {
        log::warn!("{} rejected, token no longer valid", what);
        Failure::Unauthorized
    } else {
        log::error!("{} failed: {:#}", what, err);
        Failure::Error(format!("{} failed: {}", what, err))
    }
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = Config::load().unwrap_or_else(|e| {
            log::warn!("Could not load settings, using defaults: {:#}", e);
            Config::default()
        });
        super::setup_fonts(&cc.egui_ctx);
        super::setup_theme(&cc.egui_ctx);
        let state = if config.is_configured() {
            AppState::Main
        } else {
            AppState::SignIn
        };

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                log::error!("Failed to create tokio runtime: {}", e);
                std::process::exit(1);
            }
        };
        let (result_tx, result_rx) = channel();

        let today = Local::now().date_naive();
        let selected_semester = config.last_semester.clone();
        let season = selected_semester
            .as_deref()
            .map(SemesterSeason::from_semester_name)
            .unwrap_or(SemesterSeason::Winter);
        let season_year = selected_semester
            .as_deref()
            .and_then(semester_year)
            .unwrap_or(today.year());

        let mut app = Self {
            session: Session::from_config(&config),
            state,
            screen: Screen::Timetable,
            signin_url: config.api_url.clone(),
            signin_email: config.email.clone(),
            signin_password: String::new(),
            catalog: Catalog::default(),
            selected_semester,
            schedule: Vec::new(),
            offered_modules: Vec::new(),
            personal_lecturer: None,
            personal_schedule: Vec::new(),
            analytics_semester: None,
            analytics: None,
            focus_date: today,
            view_mode: ViewMode::from(config.start_view),
            list_view: config.list_view,
            filter: ScheduleFilter::default(),
            season,
            season_year,
            panel_state: PanelState::new(config.default_location.as_deref()),
            form: None,
            pending_delete: None,
            alert: None,
            settings: None,
            status_message: None,
            in_flight: 0,
            saving: SaveGuard::default(),
            is_offline: false,
            progress: 0.0,
            progress_start: Instant::now(),
            progress_phase: ProgressPhase::Idle,
            runtime,
            result_rx,
            result_tx,
            config,
        };

        if state == AppState::Main {
            app.refresh_profile();
            app.refresh_all();
        }

        app
    }

    fn start_progress(&mut self) {
        if self.in_flight == 0 {
            self.progress = 0.0;
            self.progress_phase = ProgressPhase::FastStart;
            self.progress_start = Instant::now();
        }
        self.in_flight += 1;
    }

    fn finish_progress(&mut self, success: bool) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.progress_phase = if success {
                ProgressPhase::Completing
            } else {
                ProgressPhase::Shrinking
            };
            self.progress_start = Instant::now();
        }
    }

    /// Run one request on the runtime; the outcome comes back through the channel
    fn spawn<T, F, Fut, M>(&mut self, what: &'static str, task: F, on_ok: M)
    where
        T: Send + 'static,
        F: FnOnce(PlannerClient) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        M: FnOnce(T) -> AsyncResult + Send + 'static,
    {
        self.spawn_tagged(what, false, task, on_ok);
    }

    fn spawn_tagged<T, F, Fut, M>(&mut self, what: &'static str, from_save: bool, task: F, on_ok: M)
    where
        T: Send + 'static,
        F: FnOnce(PlannerClient) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<T>> + Send + 'static,
        M: FnOnce(T) -> AsyncResult + Send + 'static,
    {
        self.start_progress();
        let config = self.config.clone();
        let tx = self.result_tx.clone();

        self.runtime.spawn(async move {
            let result = async {
                let client = PlannerClient::new(&config)?;
                task(client).await
            }
            .await;

            let message = match result {
                Ok(value) => on_ok(value),
                Err(e) => AsyncResult::Failed { failure: classify_error(what, e), from_save },
            };
            let _ = tx.send(message);
        });
    }

    /// Write request that reloads `reload` on success and ends the saving state
    fn spawn_save<F, Fut>(&mut self, what: &'static str, done: String, reload: Reload, task: F)
    where
        F: FnOnce(PlannerClient) -> Fut + Send + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        if !self.saving.begin() {
            return;
        }
        log::info!("{}", what);
        self.spawn_tagged(what, true, task, move |_| AsyncResult::Saved(done, reload));
    }

    fn check_async_results(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            let success = !matches!(result, AsyncResult::Failed { .. });
            self.finish_progress(success);
            self.saving.settle(&result);

            match result {
                AsyncResult::SignedIn(email, login) => {
                    self.config.api_token = Some(login.access_token.clone());
                    self.session = Session::from_login(&email, &login);
                    self.session.store(&mut self.config);
                    if let Err(e) = self.config.save() {
                        log::warn!("Could not save settings: {:#}", e);
                    }
                    log::info!("Signed in as {} ({})", self.session.email, self.session.role.as_str());
                    self.signin_password.clear();
                    self.state = AppState::Main;
                    self.is_offline = false;
                    self.refresh_all();
                }
                AsyncResult::Profile(me) => {
                    if let Some(role) = me.role.as_deref() {
                        self.session.role = Role::parse(role);
                    }
                    self.session.lecturer_id = me.lecturer_id.or(self.session.lecturer_id);
                    if !me.email.is_empty() {
                        self.session.email = me.email;
                    }
                    self.session.store(&mut self.config);
                    if let Err(e) = self.config.save() {
                        log::warn!("Could not save settings: {:#}", e);
                    }
                }
                AsyncResult::CatalogLoaded(catalog) => {
                    self.catalog = *catalog;
                    self.is_offline = false;
                    if self
                        .panel_state
                        .open_program
                        .is_some_and(|id| self.catalog.program(id).is_none())
                    {
                        self.panel_state.open_program = None;
                    }
                    self.ensure_semester();
                    self.ensure_personal_lecturer();
                }
                AsyncResult::ScheduleLoaded { semester, entries, offered } => {
                    // Ignore answers for a semester the user already left
                    if self.selected_semester.as_deref() == Some(semester.as_str()) {
                        self.schedule = entries;
                        self.offered_modules = offered;
                    }
                    self.is_offline = false;
                }
                AsyncResult::PersonalLoaded { lecturer, entries } => {
                    if self.personal_lecturer.as_deref() == Some(lecturer.as_str()) {
                        self.personal_schedule = entries;
                    }
                }
                AsyncResult::AnalyticsLoaded(semester_id, metrics) => {
                    if self.analytics_semester == Some(semester_id) {
                        self.analytics = Some(metrics);
                    }
                }
                AsyncResult::Saved(message, reload) => {
                    log::info!("{}", message);
                    self.form = None;
                    self.pending_delete = None;
                    self.status_message = Some((message, false));
                    match reload {
                        Reload::Catalog => self.load_catalog(),
                        Reload::Schedule => {
                            self.load_schedule();
                            self.load_personal();
                        }
                    }
                }
                AsyncResult::Failed { failure: Failure::Error(msg), .. } => {
                    self.alert = Some(msg);
                }
                AsyncResult::Failed { failure: Failure::Offline, .. } => {
                    self.is_offline = true;
                }
                AsyncResult::Failed { failure: Failure::Unauthorized, .. } => {
                    if self.state == AppState::SignIn {
                        self.alert = Some("Invalid email or password.".to_string());
                    } else {
                        self.sign_out();
                        self.alert = Some("Your session has expired. Please sign in again.".to_string());
                    }
                }
            }
        }
    }

    // --- Loading ---

    fn refresh_all(&mut self) {
        self.load_catalog();
        self.load_schedule();
        if self.screen == Screen::Personal {
            self.load_personal();
        }
        if self.screen == Screen::Analytics {
            self.load_analytics();
        }
    }

    fn refresh_profile(&mut self) {
        self.spawn("Loading profile", |client| async move { client.me().await }, AsyncResult::Profile);
    }

    fn load_catalog(&mut self) {
        self.spawn(
            "Loading catalog",
            |client| async move {
                let (programs, specializations, modules, rooms, lecturers, groups, semesters) = tokio::try_join!(
                    client.get_programs(),
                    client.get_specializations(),
                    client.get_modules(),
                    client.get_rooms(),
                    client.get_lecturers(),
                    client.get_groups(),
                    client.get_semesters(),
                )?;
                Ok::<_, anyhow::Error>(Catalog {
                    programs,
                    specializations,
                    modules,
                    rooms,
                    lecturers,
                    groups,
                    semesters,
                })
            },
            |catalog| AsyncResult::CatalogLoaded(Box::new(catalog)),
        );
    }

    fn load_schedule(&mut self) {
        let Some(semester) = self.selected_semester.clone() else {
            return;
        };
        self.spawn(
            "Loading timetable",
            move |client| async move {
                let (entries, offered) =
                    tokio::try_join!(client.get_schedule(&semester), client.get_offered_modules(&semester))?;
                Ok::<_, anyhow::Error>((semester, entries, offered))
            },
            |(semester, entries, offered)| AsyncResult::ScheduleLoaded { semester, entries, offered },
        );
    }

    fn load_personal(&mut self) {
        let (Some(semester), Some(lecturer)) = (self.selected_semester.clone(), self.personal_lecturer.clone()) else {
            return;
        };
        self.spawn(
            "Loading lecturer timetable",
            move |client| async move {
                let entries = client.get_lecturer_schedule(&semester, &lecturer).await?;
                Ok::<_, anyhow::Error>((lecturer, entries))
            },
            |(lecturer, entries)| AsyncResult::PersonalLoaded { lecturer, entries },
        );
    }

    fn load_analytics(&mut self) {
        if self.analytics_semester.is_none() {
            self.analytics_semester = self
                .selected_semester
                .as_deref()
                .and_then(|name| self.catalog.semester_named(name))
                .map(|s| s.id);
        }
        let Some(semester_id) = self.analytics_semester else {
            return;
        };
        self.spawn(
            "Loading analytics",
            move |client| async move {
                let metrics = client.get_analytics_metrics(semester_id).await?;
                Ok::<_, anyhow::Error>((semester_id, metrics))
            },
            |(id, metrics)| AsyncResult::AnalyticsLoaded(id, metrics),
        );
    }

    /// Keep the remembered semester if it still exists, otherwise take the first one
    fn ensure_semester(&mut self) {
        let current = self
            .selected_semester
            .as_deref()
            .filter(|name| self.catalog.semester_named(name).is_some())
            .map(str::to_string);
        if current.is_none() {
            let first = self.catalog.semesters.first().map(|s| s.name.clone());
            if let Some(name) = first {
                self.select_semester(name);
            }
        }
    }

    fn select_semester(&mut self, name: String) {
        if self.selected_semester.as_deref() == Some(name.as_str()) {
            return;
        }
        log::info!("Switching to semester {}", name);
        self.season = SemesterSeason::from_semester_name(&name);
        self.season_year = semester_year(&name).unwrap_or(self.focus_date.year());
        self.schedule.clear();
        self.offered_modules.clear();
        self.personal_schedule.clear();
        self.filter.clear();
        self.config.last_semester = Some(name.clone());
        if let Err(e) = self.config.save() {
            log::warn!("Could not save settings: {:#}", e);
        }
        self.selected_semester = Some(name);
        self.load_schedule();
        self.load_personal();
    }

    /// The signed-in lecturer, else the first lecturer the service knows
    fn ensure_personal_lecturer(&mut self) {
        if self.personal_lecturer.is_some() {
            return;
        }
        let linked = self
            .session
            .lecturer_id
            .and_then(|id| self.catalog.lecturers.iter().find(|l| l.id == id));
        let lecturer = linked.or_else(|| self.catalog.lecturers.first());
        if let Some(lecturer) = lecturer {
            self.personal_lecturer = Some(lecturer.display_name());
            self.load_personal();
        }
    }

    // --- Sign in / out ---

    fn sign_in(&mut self) {
        let url = self.signin_url.trim().to_string();
        let email = self.signin_email.trim().to_string();
        if url.is_empty() || email.is_empty() || self.signin_password.is_empty() {
            self.alert = Some("Service URL, email and password are required.".to_string());
            return;
        }
        self.config.api_url = url;
        self.config.email = email.clone();
        self.config.api_token = None;
        let password = self.signin_password.clone();
        log::info!("Signing in to {}", self.config.base_url());
        self.spawn(
            "Sign in",
            move |client| async move {
                let login = client.login(&email, &password).await?;
                Ok::<_, anyhow::Error>((email, login))
            },
            |(email, login)| AsyncResult::SignedIn(email, login),
        );
    }

    fn sign_out(&mut self) {
        log::info!("Signing out {}", self.session.email);
        self.config.sign_out();
        if let Err(e) = self.config.save() {
            log::warn!("Could not save settings: {:#}", e);
        }
        self.session = Session::from_config(&self.config);
        self.signin_url = self.config.api_url.clone();
        self.signin_email = self.config.email.clone();
        self.catalog = Catalog::default();
        self.schedule.clear();
        self.offered_modules.clear();
        self.personal_schedule.clear();
        self.personal_lecturer = None;
        self.analytics = None;
        self.form = None;
        self.pending_delete = None;
        self.settings = None;
        self.screen = Screen::Timetable;
        self.state = AppState::SignIn;
    }

    // --- Forms ---

    fn open_create(&mut self, kind: RecordKind) {
        self.form = Some(match kind {
            RecordKind::Program => EditForm::Program { id: None, draft: ProgramDraft::default() },
            RecordKind::Module => EditForm::Module { code: None, draft: ModuleDraft::default() },
            RecordKind::Room => EditForm::Room {
                id: None,
                draft: RoomDraft::new(self.panel_state.room_campus.as_deref()),
            },
            RecordKind::Lecturer => EditForm::Lecturer { id: None, draft: LecturerDraft::default() },
            RecordKind::Group => EditForm::Group { id: None, draft: GroupDraft::default() },
            RecordKind::Semester => EditForm::Semester { id: None, draft: SemesterDraft::default() },
        });
    }

    fn open_edit(&mut self, record: Record) {
        self.form = Some(match record {
            Record::Program(p) => EditForm::Program { id: Some(p.id), draft: ProgramDraft::from_program(&p) },
            Record::Specialization(s) => match s.program_id {
                Some(program_id) => EditForm::Specialization {
                    id: Some(s.id),
                    program_id,
                    draft: SpecializationDraft::from_specialization(&s),
                },
                None => return,
            },
            Record::Module(m) => EditForm::Module {
                code: Some(m.module_code.clone()),
                draft: ModuleDraft::from_module(&m),
            },
            Record::Room(r) => EditForm::Room { id: Some(r.id), draft: RoomDraft::from_room(&r) },
            Record::Lecturer(l) => EditForm::Lecturer { id: Some(l.id), draft: LecturerDraft::from_lecturer(&l) },
            Record::Group(g) => EditForm::Group { id: Some(g.id), draft: GroupDraft::from_group(&g) },
            Record::Semester(s) => EditForm::Semester { id: Some(s.id), draft: SemesterDraft::from_semester(&s) },
            Record::Entry(e) => {
                let room_id = self.catalog.rooms.iter().find(|r| r.name == e.room_name).map(|r| r.id);
                EditForm::Entry { id: Some(e.id), draft: ScheduleEntryDraft::from_entry(&e, room_id) }
            }
        });
    }

    fn handle_panel_action(&mut self, action: PanelAction) {
        match action {
            PanelAction::Create(kind) => self.open_create(kind),
            PanelAction::CreateSpecialization(program_id) => {
                self.form = Some(EditForm::Specialization {
                    id: None,
                    program_id,
                    draft: SpecializationDraft::default(),
                });
            }
            PanelAction::Edit(record) => self.open_edit(record),
            PanelAction::Delete(record) => self.pending_delete = Some(record),
        }
    }

    /// Validate the open form and send it. Validation failures become an alert.
    fn submit_form(&mut self) {
        if self.saving.active() {
            return;
        }
        let Some(form) = self.form.clone() else {
            return;
        };
        let today = Local::now().date_naive();

        let outcome: Result<(), ValidationError> = match form {
            EditForm::Program { id, draft } => draft.validate(today).map(|payload| {
                let done = format!("Saved program {}", payload.name);
                self.spawn_save("Saving program", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_program(id, &payload).await.map(drop),
                        None => client.create_program(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Specialization { id, program_id, draft } => draft.validate(program_id, today).map(|payload| {
                let done = format!("Saved specialization {}", payload.name);
                self.spawn_save("Saving specialization", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_specialization(id, &payload).await.map(drop),
                        None => client.create_specialization(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Module { code, draft } => draft.validate().map(|payload| {
                let done = format!("Saved module {}", payload.module_code);
                self.spawn_save("Saving module", done, Reload::Catalog, move |client| async move {
                    match code {
                        Some(code) => client.update_module(&code, &payload).await.map(drop),
                        None => client.create_module(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Room { id, draft } => draft.validate().map(|payload| {
                let done = format!("Saved room {}", payload.name);
                self.spawn_save("Saving room", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_room(id, &payload).await.map(drop),
                        None => client.create_room(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Lecturer { id, draft } => draft.validate().map(|payload| {
                let done = "Saved lecturer".to_string();
                self.spawn_save("Saving lecturer", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_lecturer(id, &payload).await.map(drop),
                        None => client.create_lecturer(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Group { id, draft } => draft.validate().map(|payload| {
                let done = format!("Saved group {}", payload.name);
                self.spawn_save("Saving group", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_group(id, &payload).await.map(drop),
                        None => client.create_group(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Semester { id, draft } => draft.validate().map(|payload| {
                let done = format!("Saved semester {}", payload.name);
                self.spawn_save("Saving semester", done, Reload::Catalog, move |client| async move {
                    match id {
                        Some(id) => client.update_semester(id, &payload).await.map(drop),
                        None => client.create_semester(&payload).await.map(drop),
                    }
                });
            }),
            EditForm::Entry { id, draft } => {
                let semester = self.selected_semester.clone().unwrap_or_default();
                draft.validate(&semester).map(|payload| {
                    let done = format!("Saved session on {} {}", payload.day_of_week, payload.start_time);
                    self.spawn_save("Saving session", done, Reload::Schedule, move |client| async move {
                        match id {
                            Some(id) => client.update_schedule_entry(id, &payload).await.map(drop),
                            None => client.create_schedule_entry(&payload).await.map(drop),
                        }
                    });
                })
            }
        };

        if let Err(e) = outcome {
            self.alert = Some(e.to_string());
        }
    }

    fn confirm_delete(&mut self) {
        let Some(record) = self.pending_delete.clone() else {
            return;
        };
        let done = match &record {
            Record::Entry(_) => "Session deleted".to_string(),
            other => format!(
                "Deleted {}",
                other.delete_prompt().trim_start_matches("Delete ").trim_end_matches('?')
            ),
        };
        let reload = if matches!(record, Record::Entry(_)) {
            Reload::Schedule
        } else {
            Reload::Catalog
        };
        self.spawn_save("Deleting", done, reload, move |client| async move {
            match record {
                Record::Program(p) => client.delete_program(p.id).await,
                Record::Specialization(s) => client.delete_specialization(s.id).await,
                Record::Module(m) => client.delete_module(&m.module_code).await,
                Record::Room(r) => client.delete_room(r.id).await,
                Record::Lecturer(l) => client.delete_lecturer(l.id).await,
                Record::Group(g) => client.delete_group(g.id).await,
                Record::Semester(s) => client.delete_semester(s.id).await,
                Record::Entry(e) => client.delete_schedule_entry(e.id).await,
            }
        });
    }

    fn save_settings(&mut self, mut draft: Config) {
        if draft.day_start_hour >= draft.day_end_hour {
            self.alert = Some("The day must start before it ends.".to_string());
            return;
        }
        let url_changed = draft.base_url() != self.config.base_url();
        draft.font_scale = draft.font_scale.clamp(0.75, 2.5);
        self.config = draft;
        if let Err(e) = self.config.save() {
            log::error!("Could not save settings: {:#}", e);
            self.alert = Some(format!("Could not save settings: {}", e));
            return;
        }
        self.settings = None;
        if url_changed {
            // A token from one service means nothing to another
            self.sign_out();
        }
    }

    fn export_analytics(&mut self) {
        let Some(metrics) = &self.analytics else {
            return;
        };
        let semester = self
            .analytics_semester
            .and_then(|id| self.catalog.semesters.iter().find(|s| s.id == id))
            .map(|s| s.name.clone())
            .unwrap_or_default();
        match export::export_analytics(metrics, &semester) {
            Ok(path) => {
                log::info!("Exported analytics to {}", path.display());
                self.status_message = Some((format!("Exported to {}", path.display()), false));
            }
            Err(e) => {
                log::error!("Analytics export failed: {}", e);
                self.alert = Some(format!("Export failed: {}", e));
            }
        }
    }

    // --- Screens ---

    fn render_sign_in(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(40.0);
            ui.heading("Campus Planner");
            ui.add_space(12.0);
            ui.label("Sign in with your university account.");
            ui.add_space(20.0);
        });

        egui::Grid::new("signin_grid")
            .num_columns(2)
            .spacing([20.0, 10.0])
            .show(ui, |ui| {
                ui.label("Service URL:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.signin_url)
                        .hint_text("https://planner.example.edu/api")
                        .desired_width(350.0),
                );
                ui.end_row();

                ui.label("Email:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.signin_email)
                        .hint_text("you@university.edu")
                        .desired_width(350.0),
                );
                ui.end_row();

                ui.label("Password:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.signin_password)
                        .password(true)
                        .desired_width(350.0),
                );
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && self.in_flight == 0 {
                    self.sign_in();
                }
                ui.end_row();
            });

        ui.add_space(20.0);

        ui.add_enabled_ui(self.in_flight == 0, |ui| {
            if painted_button(ui, "Sign in", BTN_TEXT).clicked() {
                self.sign_in();
            }
        });
    }

    fn render_main(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let tabs = Screen::tabs(&self.session);
            let before = self.screen;
            if tab_strip(ui, &mut self.screen, &tabs) && self.screen != before {
                match self.screen {
                    Screen::Personal => {
                        self.ensure_personal_lecturer();
                        self.load_personal();
                    }
                    Screen::Analytics => self.load_analytics(),
                    _ => {}
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if icon_button(ui, egui_phosphor::regular::FADERS_HORIZONTAL, "Settings") {
                    self.settings = Some(self.config.clone());
                }
                ui.add_space(8.0);
                if icon_button(ui, egui_phosphor::regular::CLOUD_ARROW_DOWN, "Reload") {
                    self.refresh_all();
                }
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!("{} · {}", self.session.email, self.session.role.label()))
                        .size(12.0)
                        .color(Color32::from_rgb(120, 120, 130)),
                );
            });
        });
        ui.separator();

        if self.is_offline {
            ui.add_space(40.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(egui_phosphor::regular::WIFI_SLASH.to_string())
                        .size(34.0)
                        .color(Color32::from_rgb(224, 108, 117)),
                );
                ui.add_space(16.0);
                ui.label(RichText::new("No connection").size(20.0).color(Color32::from_rgb(200, 200, 210)));
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Check your network and try again")
                        .size(14.0)
                        .color(Color32::from_rgb(120, 120, 140)),
                );
                ui.add_space(24.0);
                let blue = Color32::from_rgb(0x13, 0x98, 0xf4);
                if ui
                    .add(
                        egui::Button::new(
                            RichText::new(format!("{} Retry", egui_phosphor::regular::ARROWS_CLOCKWISE))
                                .size(17.0)
                                .color(Color32::WHITE),
                        )
                        .fill(blue)
                        .rounding(6.0),
                    )
                    .clicked()
                {
                    self.is_offline = false;
                    self.refresh_all();
                }
            });
            return;
        }

        let action = match self.screen {
            Screen::Timetable => {
                self.render_timetable(ui);
                None
            }
            Screen::Personal => {
                self.render_personal(ui);
                None
            }
            Screen::Programs => panels::render_programs(ui, &self.catalog, &mut self.panel_state, &self.session),
            Screen::Modules => panels::render_modules(ui, &self.catalog, &mut self.panel_state, &self.session),
            Screen::Rooms => panels::render_rooms(ui, &self.catalog, &mut self.panel_state, &self.session),
            Screen::Directory => panels::render_directory(ui, &self.catalog, &mut self.panel_state, &self.session),
            Screen::Analytics => {
                let result = analytics::render_analytics(
                    ui,
                    &self.catalog.semesters,
                    self.analytics_semester,
                    self.analytics.as_ref(),
                    self.in_flight > 0,
                );
                if let Some(id) = result.select_semester {
                    self.analytics_semester = Some(id);
                    self.analytics = None;
                    self.load_analytics();
                }
                if result.export {
                    self.export_analytics();
                }
                None
            }
        };
        if let Some(action) = action {
            self.handle_panel_action(action);
        }
    }

    /// Period pill, view mode menu and list toggle shared by both timetables
    fn render_period_controls(&mut self, ui: &mut egui::Ui) {
        if self.view_mode == ViewMode::Semester && !self.list_view {
            let step = pill_navigation(ui, self.season.label(), 190.0);
            if step != 0 {
                self.season = match self.season {
                    SemesterSeason::Winter => SemesterSeason::Summer,
                    SemesterSeason::Summer => SemesterSeason::Winter,
                };
            }
        } else {
            let title = period_title(self.focus_date, if self.list_view { ViewMode::Week } else { self.view_mode });
            let step = pill_navigation(ui, &title, 170.0);
            if step != 0 {
                self.focus_date = navigate(self.focus_date, self.view_mode, self.list_view, step);
            }
        }

        if ui.small_button("Today").clicked() {
            self.focus_date = Local::now().date_naive();
        }

        ui.add_space(8.0);
        let menu_id = ui.make_persistent_id("view_mode_menu");
        let current_icon = if self.list_view {
            egui_phosphor::regular::LIST
        } else {
            egui_phosphor::regular::CALENDAR_BLANK
        };
        let label = if self.list_view { "List" } else { self.view_mode.label() };
        let btn_text = format!("{} {} {}", current_icon, label, egui_phosphor::regular::CARET_DOWN);
        let icon_color = Color32::from_rgb(160, 160, 152);
        let font_id = egui::FontId::proportional(14.0);
        let text_size = ui.fonts(|f| f.layout_no_wrap(btn_text.clone(), font_id.clone(), icon_color).size());
        let (btn_rect, btn_response) = ui.allocate_exact_size(text_size + egui::vec2(6.0, 4.0), egui::Sense::click());
        let btn_col = if btn_response.hovered() { Color32::WHITE } else { icon_color };
        ui.painter().text(btn_rect.center(), egui::Align2::CENTER_CENTER, &btn_text, font_id, btn_col);
        if btn_response.clicked() {
            ui.memory_mut(|mem| mem.toggle_popup(menu_id));
        }

        egui::popup::popup_below_widget(ui, menu_id, &btn_response, egui::PopupCloseBehavior::CloseOnClick, |ui| {
            ui.set_min_width(150.0);
            ui.style_mut().spacing.button_padding = egui::vec2(12.0, 8.0);
            for mode in ViewMode::ALL {
                let selected = !self.list_view && self.view_mode == mode;
                if ui.selectable_label(selected, RichText::new(mode.label()).size(14.0)).clicked() {
                    self.view_mode = mode;
                    self.list_view = false;
                    self.config.list_view = false;
                    if let Err(e) = self.config.save() {
                        log::warn!("Could not save settings: {:#}", e);
                    }
                }
            }
            ui.separator();
            if ui
                .selectable_label(self.list_view, RichText::new(format!("{} List", egui_phosphor::regular::LIST)).size(14.0))
                .clicked()
            {
                self.list_view = !self.list_view;
                self.config.list_view = self.list_view;
                if let Err(e) = self.config.save() {
                    log::warn!("Could not save settings: {:#}", e);
                }
            }
        });
    }

    fn render_semester_combo(&mut self, ui: &mut egui::Ui) {
        let mut choice = self.selected_semester.clone();
        egui::ComboBox::new("semester_select", "")
            .selected_text(choice.clone().unwrap_or_else(|| "Select semester".to_string()))
            .width(160.0)
            .show_ui(ui, |ui| {
                for semester in &self.catalog.semesters {
                    ui.selectable_value(&mut choice, Some(semester.name.clone()), &semester.name);
                }
            });
        if let Some(name) = choice {
            if self.selected_semester.as_deref() != Some(name.as_str()) {
                self.select_semester(name);
            }
        }
    }

    fn render_timetable(&mut self, ui: &mut egui::Ui) {
        let options = FilterOptions::from_entries(&self.schedule);
        ui.horizontal(|ui| {
            self.render_period_controls(ui);
            ui.add_space(12.0);
            self.render_semester_combo(ui);
        });
        ui.horizontal(|ui| {
            filter_combo(ui, "filter_lecturer", "All lecturers", &mut self.filter.lecturer, &options.lecturers);
            filter_combo(ui, "filter_group", "All groups", &mut self.filter.group, &options.groups);
            filter_combo(ui, "filter_room", "All rooms", &mut self.filter.room, &options.rooms);
            if !self.filter.is_empty() && ui.small_button(format!("{} Clear", egui_phosphor::regular::X)).clicked() {
                self.filter.clear();
            }
        });
        ui.add_space(8.0);

        if self.selected_semester.is_none() {
            ui.label(RichText::new("No semester yet. Create one in the directory.").color(Color32::from_rgb(120, 120, 130)));
            return;
        }

        let view = TimetableView {
            entries: &self.schedule,
            filter: &self.filter,
            mode: self.view_mode,
            list_view: self.list_view,
            focus_date: self.focus_date,
            season: self.season,
            season_year: self.season_year,
            window: self.config.day_window(),
            clock_format: self.config.clock_format,
            can_edit: self.session.role.can_edit_schedule(),
        };
        let result = views::render_timetable(ui, &view);

        if result.busy {
            self.alert = Some("Selected lecturer is busy at this time.".to_string());
        }
        if let Some((day, start)) = result.add_at {
            self.form = Some(EditForm::Entry {
                id: None,
                draft: ScheduleEntryDraft::at(day_name(day), &start),
            });
        }
        if let Some(entry) = result.edit {
            self.open_edit(Record::Entry(entry));
        }
        if let Some(entry) = result.delete {
            self.pending_delete = Some(Record::Entry(entry));
        }
        if let Some(date) = result.open_day {
            self.focus_date = date;
            self.view_mode = ViewMode::Day;
        }
    }

    fn render_personal(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.render_period_controls(ui);
            ui.add_space(12.0);
            self.render_semester_combo(ui);
            ui.add_space(12.0);

            let mut choice = self.personal_lecturer.clone();
            egui::ComboBox::new("personal_lecturer", "")
                .selected_text(choice.clone().unwrap_or_else(|| "Select lecturer".to_string()))
                .width(200.0)
                .show_ui(ui, |ui| {
                    for lecturer in &self.catalog.lecturers {
                        let name = lecturer.display_name();
                        ui.selectable_value(&mut choice, Some(name.clone()), name);
                    }
                });
            if choice != self.personal_lecturer {
                self.personal_lecturer = choice;
                self.personal_schedule.clear();
                self.load_personal();
            }
        });
        ui.add_space(8.0);

        let no_filter = ScheduleFilter::default();
        let view = TimetableView {
            entries: &self.personal_schedule,
            filter: &no_filter,
            mode: self.view_mode,
            list_view: self.list_view,
            focus_date: self.focus_date,
            season: self.season,
            season_year: self.season_year,
            window: self.config.day_window(),
            clock_format: self.config.clock_format,
            can_edit: false,
        };
        let result = views::render_timetable(ui, &view);
        if let Some(date) = result.open_day {
            self.focus_date = date;
            self.view_mode = ViewMode::Day;
        }
    }

    fn render_settings(&mut self, ctx: &egui::Context) {
        let Some(draft) = &mut self.settings else {
            return;
        };
        let mut save = false;
        let mut cancel = false;
        let mut sign_out = false;

        dialog_window("Settings", 520.0).show(ctx, |ui| {
            section_label(ui, "Connection");
            egui::Grid::new("settings_connection")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Service URL");
                    ui.add(egui::TextEdit::singleline(&mut draft.api_url).desired_width(320.0));
                    ui.end_row();

                    ui.label("Request timeout");
                    ui.add(egui::DragValue::new(&mut draft.request_timeout_secs).speed(1.0).suffix(" s"));
                    draft.request_timeout_secs = draft.request_timeout_secs.clamp(1, 300);
                    ui.end_row();
                });

            ui.add_space(16.0);
            section_label(ui, "Timetable");
            egui::Grid::new("settings_timetable")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Day starts");
                    ui.add(egui::DragValue::new(&mut draft.day_start_hour).speed(0.2).suffix(":00"));
                    draft.day_start_hour = draft.day_start_hour.min(23);
                    ui.end_row();

                    ui.label("Day ends");
                    ui.add(egui::DragValue::new(&mut draft.day_end_hour).speed(0.2).suffix(":00"));
                    draft.day_end_hour = draft.day_end_hour.clamp(1, 24);
                    ui.end_row();

                    ui.label("Clock format");
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut draft.clock_format, ClockFormat::Hour24, "14:30");
                        ui.radio_value(&mut draft.clock_format, ClockFormat::Hour12, "2:30pm");
                    });
                    ui.end_row();

                    ui.label("Start view");
                    ui.horizontal(|ui| {
                        ui.radio_value(&mut draft.start_view, StartView::Day, "Day");
                        ui.radio_value(&mut draft.start_view, StartView::Week, "Week");
                        ui.radio_value(&mut draft.start_view, StartView::Month, "Month");
                        ui.radio_value(&mut draft.start_view, StartView::Semester, "Semester");
                    });
                    ui.end_row();

                    ui.label("Default campus");
                    let shown = draft.default_location.clone().unwrap_or_else(|| CAMPUSES[0].to_string());
                    egui::ComboBox::new("settings_campus", "")
                        .selected_text(shown)
                        .show_ui(ui, |ui| {
                            for campus in CAMPUSES {
                                ui.selectable_value(&mut draft.default_location, Some(campus.to_string()), campus);
                            }
                        });
                    ui.end_row();

                    ui.label("Font scale");
                    ui.horizontal(|ui| {
                        ui.add(egui::Slider::new(&mut draft.font_scale, 0.75..=2.5).show_value(false));
                        ui.label(format!("{:.0}%", draft.font_scale * 100.0));
                    });
                    ui.end_row();
                });

            ui.add_space(24.0);
            ui.horizontal(|ui| {
                save = painted_button(ui, "Save", BTN_TEXT).clicked();
                cancel = painted_button(ui, "Cancel", BTN_TEXT).clicked();
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    sign_out = painted_button(
                        ui,
                        &format!("{} Sign out", egui_phosphor::regular::SIGN_OUT),
                        super::theme::ERROR,
                    )
                    .clicked();
                });
            });
        });

        if save {
            if let Some(draft) = self.settings.clone() {
                self.save_settings(draft);
            }
        } else if sign_out {
            self.sign_out();
        } else if cancel {
            self.settings = None;
        }
    }

    fn render_modals(&mut self, ctx: &egui::Context) {
        // Alert sits above everything else and blocks it
        if let Some(message) = &self.alert {
            if dialogs::render_alert(ctx, message) {
                self.alert = None;
            }
            return;
        }

        if let Some(form) = &mut self.form {
            let outcome = dialogs::render_form(ctx, form, &self.catalog, &self.offered_modules, self.saving.active());
            match outcome {
                Some(FormOutcome::Submit) => self.submit_form(),
                Some(FormOutcome::Cancel) if !self.saving.active() => self.form = None,
                _ => {}
            }
            return;
        }

        if let Some(record) = &self.pending_delete {
            match dialogs::render_confirm_delete(ctx, &record.delete_prompt(), self.saving.active()) {
                Some(true) => self.confirm_delete(),
                Some(false) if !self.saving.active() => self.pending_delete = None,
                _ => {}
            }
            return;
        }

        self.render_settings(ctx);
    }

    fn update_progress(&mut self, ctx: &egui::Context) {
        let elapsed = self.progress_start.elapsed().as_secs_f32();
        match self.progress_phase {
            ProgressPhase::Idle => {}
            ProgressPhase::FastStart => {
                // 0→17% in 0.25 seconds
                self.progress = (elapsed / 0.25 * 0.17).min(0.17);
                if elapsed >= 0.25 {
                    self.progress_phase = ProgressPhase::SlowCrawl;
                    self.progress_start = Instant::now();
                }
                ctx.request_repaint();
            }
            ProgressPhase::SlowCrawl => {
                // 17%→50% over ~7.5 seconds
                self.progress = 0.17 + (elapsed / 7.5 * 0.33).min(0.33);
                ctx.request_repaint();
            }
            ProgressPhase::Completing => {
                let t = (elapsed / 0.15).min(1.0);
                self.progress = self.progress + (1.0 - self.progress) * t;
                if elapsed >= 0.15 {
                    self.progress = 1.0;
                    self.progress_phase = ProgressPhase::FadingOut;
                    self.progress_start = Instant::now();
                }
                ctx.request_repaint();
            }
            ProgressPhase::FadingOut => {
                if elapsed >= 0.3 {
                    self.progress_phase = ProgressPhase::Idle;
                    self.progress = 0.0;
                }
                ctx.request_repaint();
            }
            ProgressPhase::Shrinking => {
                let t = (elapsed / 0.2).min(1.0);
                self.progress *= 1.0 - t;
                if elapsed >= 0.2 {
                    self.progress_phase = ProgressPhase::Idle;
                    self.progress = 0.0;
                }
                ctx.request_repaint();
            }
        }
        if self.in_flight > 0 {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

/// Equality filter combo; `None` is the "all" entry
fn filter_combo(ui: &mut egui::Ui, id: &str, all_label: &str, value: &mut Option<String>, options: &[String]) {
    egui::ComboBox::new(id, "")
        .selected_text(value.clone().unwrap_or_else(|| all_label.to_string()))
        .width(170.0)
        .show_ui(ui, |ui| {
            ui.selectable_value(value, None, all_label);
            for option in options {
                ui.selectable_value(value, Some(option.clone()), option);
            }
        });
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pinch-to-zoom (trackpad pinch or Ctrl+scroll)
        let zoom_delta = ctx.input(|i| i.zoom_delta());
        if zoom_delta != 1.0 {
            self.config.font_scale = (self.config.font_scale * zoom_delta).clamp(0.75, 2.5);
            if (zoom_delta - 1.0).abs() > 0.01 {
                if let Err(e) = self.config.save() {
                    log::warn!("Could not save settings: {:#}", e);
                }
            }
        }
        ctx.set_pixels_per_point(self.config.font_scale);

        self.check_async_results();
        self.update_progress(ctx);
        self.render_modals(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(egui::Margin::symmetric(12.0, 0.0)))
            .show(ctx, |ui| {
                // Progress bar at top (fixed height, no layout shift)
                let bar_height = 4.0;
                let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), bar_height), egui::Sense::hover());

                if self.progress_phase != ProgressPhase::Idle && ui.is_rect_visible(rect) && self.progress > 0.0 {
                    let fill_width = rect.width() * self.progress;
                    let bar_rect = egui::Rect::from_min_size(rect.min, egui::vec2(fill_width, bar_height));
                    let alpha = if self.progress_phase == ProgressPhase::FadingOut {
                        let t = self.progress_start.elapsed().as_secs_f32() / 0.3;
                        ((1.0 - t).max(0.0) * 255.0) as u8
                    } else {
                        255
                    };
                    ui.painter()
                        .rect_filled(bar_rect, 0.0, Color32::from_rgba_unmultiplied(255, 255, 255, alpha));
                }

                // Status line with copy and close buttons
                let mut dismiss_message = false;
                let mut copy_message: Option<String> = None;
                if let Some((msg, is_error)) = &self.status_message {
                    let color = if *is_error { super::theme::ERROR } else { super::theme::SUCCESS };
                    let dim_color = Color32::from_rgb(120, 120, 130);
                    ui.horizontal(|ui| {
                        ui.add(egui::Label::new(RichText::new(msg).color(color)));
                        ui.add_space(8.0);

                        let copy_btn = ui.add(
                            egui::Label::new(RichText::new(egui_phosphor::regular::COPY).size(14.0).color(dim_color))
                                .sense(egui::Sense::click()),
                        );
                        if copy_btn.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if copy_btn.clicked() {
                            copy_message = Some(msg.clone());
                        }

                        let close_btn = ui.add(
                            egui::Label::new(RichText::new(egui_phosphor::regular::X).size(14.0).color(dim_color))
                                .sense(egui::Sense::click()),
                        );
                        if close_btn.hovered() {
                            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
                        }
                        if close_btn.clicked() {
                            dismiss_message = true;
                        }
                    });
                }
                if let Some(text) = copy_message {
                    ui.ctx().copy_text(text);
                }
                if dismiss_message {
                    self.status_message = None;
                }

                match self.state {
                    AppState::SignIn => self.render_sign_in(ui),
                    AppState::Main => self.render_main(ui),
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn analytics_tab_follows_role() {
        let student = Session { role: Role::Student, ..Session::default() };
        assert!(!Screen::tabs(&student).iter().any(|(s, _)| *s == Screen::Analytics));
        let planner = Session { role: Role::Pm, ..Session::default() };
        assert!(Screen::tabs(&planner).iter().any(|(s, _)| *s == Screen::Analytics));
    }

    #[test]
    fn errors_map_to_ui_outcomes() {
        let offline = anyhow::Error::new(ApiError::Offline("connection refused".into()));
        assert_eq!(classify_error("Loading", offline), Failure::Offline);

        let expired = anyhow::Error::new(ApiError::Unauthorized(reqwest::StatusCode::UNAUTHORIZED));
        assert_eq!(classify_error("Loading", expired), Failure::Unauthorized);

        assert_eq!(
            classify_error("Saving room", anyhow::anyhow!("room name taken")),
            Failure::Error("Saving room failed: room name taken".into()),
        );
    }

    #[test]
    fn failed_load_keeps_a_pending_save_blocked() {
        let mut guard = SaveGuard::default();
        assert!(guard.begin());
        assert!(!guard.begin());

        guard.settle(&AsyncResult::Failed { failure: Failure::Offline, from_save: false });
        guard.settle(&AsyncResult::Failed { failure: Failure::Error("Loading schedule failed".into()), from_save: false });
        assert!(guard.active());
        assert!(!guard.begin());

        guard.settle(&AsyncResult::Failed { failure: Failure::Error("Saving room failed".into()), from_save: true });
        assert!(!guard.active());
    }

    #[test]
    fn successful_save_releases_the_guard() {
        let mut guard = SaveGuard::default();
        assert!(guard.begin());
        guard.settle(&AsyncResult::Saved("Room saved".into(), Reload::Catalog));
        assert!(!guard.active());
        assert!(guard.begin());
    }
}
