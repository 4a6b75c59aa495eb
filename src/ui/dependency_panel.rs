use egui::{RichText, Ui};

use crate::model::{Dependency, LinkType, Project, TaskId};
use crate::ui::theme;

/// Actions the dependency panel can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyAction {
    None,
    ChangeType(TaskId, TaskId, LinkType),
    Remove(TaskId, TaskId),
}

/// Arrow shown before the other task's name, from `task_id`'s side.
fn direction_label(dep: &Dependency, task_id: TaskId) -> &'static str {
    if dep.from_task == task_id {
        "→"
    } else {
        "←"
    }
}

/// List the dependencies touching the selected task, with retype and delete.
pub fn show_dependency_panel(project: &Project, task_id: TaskId, ui: &mut Ui) -> DependencyAction {
    let mut action = DependencyAction::None;

    ui.label(
        RichText::new(format!("Dependencies of '{}'", project.task_name(task_id)))
            .size(10.0)
            .color(theme::TEXT_DIM)
            .strong(),
    );
    ui.add_space(2.0);

    let deps: Vec<&Dependency> = project
        .dependencies
        .iter()
        .filter(|d| d.touches(task_id))
        .collect();

    if deps.is_empty() {
        ui.label(
            RichText::new("Drag from a bar's handle onto another bar to link tasks")
                .size(9.5)
                .color(theme::TEXT_DIM),
        );
        return action;
    }

    for dep in deps {
        let other = if dep.from_task == task_id {
            dep.to_task
        } else {
            dep.from_task
        };
        ui.horizontal(|ui| {
            let mut kind = dep.kind;
            egui::ComboBox::from_id_salt(("dep-kind", dep.from_task, dep.to_task))
                .selected_text(RichText::new(kind.label()).size(11.0))
                .width(86.0)
                .show_ui(ui, |ui| {
                    for candidate in LinkType::ALL {
                        ui.selectable_value(&mut kind, candidate, candidate.label());
                    }
                });
            if kind != dep.kind {
                action = DependencyAction::ChangeType(dep.from_task, dep.to_task, kind);
            }

            ui.label(
                RichText::new(format!(
                    "{} {}",
                    direction_label(dep, task_id),
                    project.task_name(other)
                ))
                .size(11.0)
                .color(theme::TEXT_SECONDARY),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del = ui.add(
                    egui::Button::new(RichText::new("✕").size(10.0).color(theme::TEXT_DIM))
                        .frame(false),
                );
                if del.on_hover_text("Remove dependency").clicked() {
                    action = DependencyAction::Remove(dep.from_task, dep.to_task);
                }
            });
        });
    }

    action
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn direction_follows_the_selected_side() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let dep = Dependency::new(a, b, LinkType::EndStart);
        assert_eq!(direction_label(&dep, a), "→");
        assert_eq!(direction_label(&dep, b), "←");
    }
}
