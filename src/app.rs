use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::links::LinkList;
use crate::model::{LinkType, Project, Task, TaskId, TimelineViewport};
use crate::ui;
use crate::ui::dependency_panel::DependencyAction;
use crate::ui::link_layer::ChartSurface;
use crate::ui::task_table::TaskTableAction;

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub viewport: TimelineViewport,
    pub file_path: Option<PathBuf>,
    pub selected_task: Option<TaskId>,
    pub settings: Settings,
    settings_path: PathBuf,

    pub status_message: String,
    pub search_query: String,

    // Dependency arrows and the chart surface they draw on
    links: LinkList,
    surface: ChartSurface,
}

impl GanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        ui::theme::apply_theme(&cc.egui_ctx);

        let settings_path = Settings::default_path();
        let settings = Settings::load_or_default(&settings_path);

        let restored = settings.last_project.as_ref().and_then(|path| {
            match crate::io::load_project(path) {
                Ok(project) => Some((project, path.clone())),
                Err(err) => {
                    warn!(path = %path.display(), %err, "could not reopen last project");
                    None
                }
            }
        });

        let mut app = Self::with_settings(Self::sample_project(), settings, settings_path);
        if let Some((project, path)) = restored {
            app.replace_project(project, Some(path));
            app.status_message = "Reopened last project".to_string();
        }
        app
    }

    /// Build the app around a project without touching the window system.
    pub fn with_settings(project: Project, settings: Settings, settings_path: PathBuf) -> Self {
        let today = chrono::Local::now().date_naive();
        let mut app = Self {
            viewport: TimelineViewport::fit_to(&project.tasks, today),
            project,
            file_path: None,
            selected_task: None,
            settings,
            settings_path,
            status_message: "Ready".to_string(),
            search_query: String::new(),
            links: LinkList::new(),
            surface: ChartSurface::default(),
        };
        app.links
            .sync(&app.project.dependencies, &mut app.surface.collaborators());
        app
    }

    pub fn links(&self) -> &LinkList {
        &self.links
    }

    pub fn surface_mut(&mut self) -> &mut ChartSurface {
        &mut self.surface
    }

    /// Generate a sample project for demonstration.
    pub fn sample_project() -> Project {
        let today = chrono::Local::now().date_naive();
        let days = chrono::Duration::days;
        let mut project = Project::new("Sample Project");

        let mut kickoff = Task::new("Project Kickoff", today - days(5), today - days(2));
        kickoff.progress = 1.0;
        kickoff.color = egui::Color32::from_rgb(70, 130, 180);

        let mut requirements = Task::new("Requirements", today - days(2), today + days(5));
        requirements.progress = 0.6;
        requirements.color = egui::Color32::from_rgb(60, 179, 113);

        let mut design = Task::new("UI Design", today + days(6), today + days(18));
        design.color = egui::Color32::from_rgb(218, 112, 214);

        let mut backend = Task::new("Backend Development", today + days(6), today + days(28));
        backend.color = egui::Color32::from_rgb(106, 90, 205);

        let mut testing = Task::new("Testing & QA", today + days(22), today + days(30));
        testing.color = egui::Color32::from_rgb(220, 20, 60);

        let launch = Task::new_milestone("Launch", today + days(32));

        let links = [
            (kickoff.id, requirements.id, LinkType::EndStart),
            (requirements.id, design.id, LinkType::EndStart),
            (design.id, backend.id, LinkType::StartStart),
            (backend.id, testing.id, LinkType::EndEnd),
            (testing.id, launch.id, LinkType::EndStart),
        ];

        project.tasks = vec![kickoff, requirements, design, backend, testing, launch];
        for (from, to, kind) in links {
            project.add_dependency(from, to, kind);
        }
        project
    }

    // --- File operations ---

    /// Swap in a different project, rebuilding every arrow from scratch.
    fn replace_project(&mut self, project: Project, path: Option<PathBuf>) {
        self.links.teardown(&mut self.surface.collaborators());
        self.viewport = TimelineViewport::fit_to(&project.tasks, chrono::Local::now().date_naive());
        self.project = project;
        self.file_path = path;
        self.selected_task = None;
        self.links
            .sync(&self.project.dependencies, &mut self.surface.collaborators());
    }

    pub fn new_project(&mut self) {
        self.replace_project(Project::default(), None);
        self.status_message = "New project created".to_string();
    }

    pub fn open_project(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["gantt.json", "json"])
            .pick_file()
        {
            match crate::io::load_project(&path) {
                Ok(project) => {
                    info!(path = %path.display(), tasks = project.tasks.len(), "project loaded");
                    self.replace_project(project, Some(path.clone()));
                    self.remember_project(path);
                    self.status_message = "Project loaded".to_string();
                }
                Err(e) => {
                    warn!(path = %path.display(), err = %e, "project load failed");
                    self.status_message = format!("Error loading: {}", e);
                }
            }
        }
    }

    pub fn save_project(&mut self) {
        if let Some(path) = self.file_path.clone() {
            self.write_project(path);
        } else {
            self.save_project_as();
        }
    }

    pub fn save_project_as(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["gantt.json", "json"])
            .set_file_name(format!("{}.gantt.json", self.project.name))
            .save_file()
        {
            self.file_path = Some(path.clone());
            self.write_project(path);
        }
    }

    fn write_project(&mut self, path: PathBuf) {
        self.project.touch();
        match crate::io::save_project(&self.project, &path) {
            Ok(()) => {
                info!(path = %path.display(), "project saved");
                self.remember_project(path);
                self.status_message = "Project saved".to_string();
            }
            Err(e) => {
                warn!(path = %path.display(), err = %e, "project save failed");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    fn remember_project(&mut self, path: PathBuf) {
        if self.settings.last_project.as_ref() != Some(&path) {
            self.settings.last_project = Some(path);
            self.save_settings();
        }
    }

    pub fn save_settings(&mut self) {
        if let Err(err) = self.settings.save(&self.settings_path) {
            warn!(path = %self.settings_path.display(), %err, "settings not saved");
            self.status_message = format!("Settings not saved: {}", err);
        }
    }

    // --- Task operations ---

    pub fn add_task(&mut self) {
        let today = chrono::Local::now().date_naive();
        let mut task = Task::new("New Task", today, today + chrono::Duration::days(7));
        task.color = ui::theme::task_color(self.project.tasks.len());
        self.selected_task = Some(task.id);
        self.project.tasks.push(task);
        self.project.touch();
        self.status_message = "Task added".to_string();
    }

    pub fn delete_task(&mut self, id: TaskId) {
        let name = self.project.task_name(id);
        self.links.task_removed(id, &mut self.surface.collaborators());
        self.project.remove_task(id);
        if self.selected_task == Some(id) {
            self.selected_task = None;
        }
        self.status_message = format!("Deleted '{}'", name);
    }

    // --- Dependency operations ---

    pub fn change_dependency_type(&mut self, from: TaskId, to: TaskId, kind: LinkType) {
        self.project.set_dependency_kind(from, to, kind);
        self.links
            .change_type(from, to, kind, &mut self.surface.collaborators());
        self.status_message = format!(
            "'{}' → '{}' is now {}",
            self.project.task_name(from),
            self.project.task_name(to),
            kind.label()
        );
    }

    pub fn remove_dependency(&mut self, from: TaskId, to: TaskId) {
        self.project.remove_dependency(from, to);
        self.links.remove(from, to, &mut self.surface.collaborators());
        self.status_message = "Dependency removed".to_string();
    }

    /// Turn arrows dropped on the chart into project dependencies.
    pub fn apply_confirmed_links(&mut self) {
        let kind = self.settings.default_link_type;
        for (from, to) in self.surface.take_confirmed() {
            if self.project.add_dependency(from, to, kind) {
                debug!(%from, %to, ?kind, "dependency created");
                self.links
                    .create_bound_link(from, to, kind, &mut self.surface.collaborators());
                self.status_message = format!(
                    "Linked '{}' → '{}'",
                    self.project.task_name(from),
                    self.project.task_name(to)
                );
            } else {
                self.status_message = "Those tasks are already linked".to_string();
            }
        }
    }

    /// Hide arrows whose tasks the filter hides.
    pub fn sync_link_visibility(&mut self) {
        let mut env = self.surface.collaborators();
        for task in &self.project.tasks {
            self.links
                .set_task_visible(task.id, task.matches(&self.search_query), &mut env);
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S)) {
            self.save_project();
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_HEADER)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {}  ·  Links: {}",
                                self.project.tasks.len(),
                                self.project.dependencies.len()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        let mut task_action = TaskTableAction::None;
        let mut dep_action = DependencyAction::None;
        egui::SidePanel::left("task_panel")
            .default_width(ui::theme::SIDE_PANEL_WIDTH)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_PANEL)
                    .inner_margin(egui::Margin::same(8.0))
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
            )
            .show(ctx, |ui| {
                if let Some(selected) = self.selected_task {
                    dep_action = ui::dependency_panel::show_dependency_panel(&self.project, selected, ui);
                    ui.add_space(4.0);
                    ui.separator();
                }
                task_action = ui::task_table::show_task_table(
                    &self.project.tasks,
                    self.selected_task,
                    &mut self.search_query,
                    ui,
                );
            });

        match task_action {
            TaskTableAction::Select(id) => self.selected_task = Some(id),
            TaskTableAction::Delete(id) => self.delete_task(id),
            TaskTableAction::Add => self.add_task(),
            TaskTableAction::None => {}
        }
        match dep_action {
            DependencyAction::ChangeType(from, to, kind) => self.change_dependency_type(from, to, kind),
            DependencyAction::Remove(from, to) => self.remove_dependency(from, to),
            DependencyAction::None => {}
        }
        self.sync_link_visibility();

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let interaction = ui::gantt_chart::show_gantt_chart(
                &mut self.project.tasks,
                &self.search_query,
                &mut self.viewport,
                &mut self.selected_task,
                &mut self.links,
                &mut self.surface,
                self.settings.show_dependencies,
                ui,
            );
            if interaction.changed {
                self.project.touch();
                if let Some(task) = self.selected_task.and_then(|id| self.project.task(id)) {
                    self.status_message = format!(
                        "Updated '{}' ({} → {})",
                        task.name,
                        task.start.format("%Y-%m-%d"),
                        task.end.format("%Y-%m-%d")
                    );
                }
            }
        });

        self.apply_confirmed_links();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::links::{InputEvent, LinkKey, Point, Rectangle};
    use std::collections::{BTreeSet, HashMap};

    fn app() -> GanttApp {
        let dir = std::env::temp_dir().join("gantt-links-app-tests");
        GanttApp::with_settings(
            GanttApp::sample_project(),
            Settings::default(),
            dir.join("settings.json"),
        )
    }

    /// Lay every task out on its own row, 100px wide.
    fn lay_out(app: &mut GanttApp, mouse: Point, hovered: BTreeSet<TaskId>) {
        let rects: HashMap<_, _> = app
            .project
            .tasks
            .iter()
            .enumerate()
            .map(|(row, t)| (t.id, Rectangle::new(row as f32 * 50.0, row as f32 * 32.0, 100.0, 10.0)))
            .collect();
        let surface = app.surface_mut();
        surface.layout.update(rects, Some(mouse), hovered);
    }

    #[test]
    fn sample_project_uses_every_link_type() {
        let project = GanttApp::sample_project();
        for kind in LinkType::ALL {
            assert!(project.dependencies.iter().any(|d| d.kind == kind));
        }
    }

    #[test]
    fn arrows_mirror_project_dependencies() {
        let app = app();
        assert_eq!(app.links().bound_links().count(), app.project.dependencies.len());
    }

    #[test]
    fn dropped_arrow_becomes_dependency_with_default_type() {
        let mut app = app();
        app.settings.default_link_type = LinkType::EndEnd;
        let first = app.project.tasks[0].id;
        let last = app.project.tasks[5].id;
        let before = app.project.dependencies.len();

        lay_out(&mut app, Point::new(20.0, 20.0), BTreeSet::new());
        app.links.begin_provisional_link(first, &mut app.surface.collaborators());
        lay_out(&mut app, Point::new(260.0, 165.0), [last].into());
        app.links
            .handle_input(InputEvent::Click, &mut app.surface.collaborators());
        app.apply_confirmed_links();

        assert_eq!(app.project.dependencies.len(), before + 1);
        let created = app.project.dependencies.last().unwrap();
        assert_eq!((created.from_task, created.to_task, created.kind), (first, last, LinkType::EndEnd));
        assert!(app.links().bound_links().any(|l| l.connects(first, last)));
    }

    #[test]
    fn deleting_a_task_drops_its_arrows() {
        let mut app = app();
        let requirements = app.project.tasks[1].id;
        app.delete_task(requirements);
        assert!(app.links().bound_links().all(|l| !l.contains(requirements)));
        assert_eq!(app.links().bound_links().count(), app.project.dependencies.len());
    }

    #[test]
    fn filter_hides_arrows_of_filtered_tasks() {
        let mut app = app();
        lay_out(&mut app, Point::new(0.0, 0.0), BTreeSet::new());
        app.links.on_ready(&mut app.surface.collaborators());
        let (kickoff, requirements) = (app.project.tasks[0].id, app.project.tasks[1].id);
        let key = LinkKey::Dependency { from: kickoff, to: requirements };
        assert!(app.surface.overlay.path(&key).is_some());

        app.search_query = "kickoff".to_string();
        app.sync_link_visibility();
        assert!(app.surface.overlay.path(&key).is_none());

        app.search_query.clear();
        app.sync_link_visibility();
        assert!(app.surface.overlay.path(&key).is_some());
    }

    #[test]
    fn new_project_clears_arrows() {
        let mut app = app();
        app.new_project();
        assert!(app.links().is_empty());
        assert!(!app.links().is_ready());
    }
}
