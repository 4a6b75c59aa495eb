use egui::{Color32, RichText, Ui};
use uuid::Uuid;

use crate::model::Task;
use crate::ui::theme;

/// Actions that the task table can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTableAction {
    None,
    Select(Uuid),
    Delete(Uuid),
    Add,
}

/// Render the left-side task table panel.
///
/// Only tasks matching `query` are listed; the chart hides the same rows.
pub fn show_task_table(
    tasks: &[Task],
    selected_task: Option<Uuid>,
    query: &mut String,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;
    let shown = tasks.iter().filter(|t| t.matches(query)).count();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.add_space(4.0);
        let count = if shown == tasks.len() {
            format!("({})", tasks.len())
        } else {
            format!("({} of {})", shown, tasks.len())
        };
        ui.label(RichText::new(count).size(11.0).color(theme::TEXT_DIM));
    });
    ui.add_space(4.0);

    let btn = egui::Button::new(RichText::new("＋  Add Task").color(Color32::WHITE).size(12.0))
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
    if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
        action = TaskTableAction::Add;
    }

    ui.add_space(4.0);
    ui.add_sized(
        [ui.available_width(), 22.0],
        egui::TextEdit::singleline(query).hint_text("Filter tasks..."),
    );

    ui.add_space(6.0);
    ui.separator();
    ui.add_space(2.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in tasks.iter().filter(|t| t.matches(query)).enumerate() {
                let is_selected = selected_task == Some(task.id);
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame::none()
                    .fill(row_bg)
                    .rounding(egui::Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 4.0));

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter().circle_filled(dot_rect.center(), 3.0, task.color);

                        let name = if task.is_milestone {
                            format!("◆ {}", task.name)
                        } else {
                            task.name.clone()
                        };
                        let color = if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        };
                        ui.add(egui::Label::new(RichText::new(name).size(12.0).color(color)).truncate());

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;

                            let del_btn = ui.add(
                                egui::Button::new(
                                    RichText::new("✕").size(10.0).color(theme::TEXT_DIM),
                                )
                                .frame(false),
                            );
                            if del_btn.on_hover_text("Delete task").clicked() {
                                action = TaskTableAction::Delete(task.id);
                            }

                            ui.label(
                                RichText::new(format!(
                                    "{} → {}",
                                    task.start.format("%m/%d"),
                                    task.end.format("%m/%d")
                                ))
                                .size(10.0)
                                .color(theme::TEXT_SECONDARY),
                            );
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", task.id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() && action == TaskTableAction::None {
                    action = TaskTableAction::Select(task.id);
                }

                ui.add_space(1.0);
            }
        });

    action
}
