use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, NaiveDate};
use egui::{Color32, Id, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

use crate::links::{LinkList, Point};
use crate::model::{Task, TimelineScale, TimelineViewport};
use crate::ui::link_layer::{from_rect, input_events, ChartSurface};
use crate::ui::theme;

const ROW_HEIGHT: f32 = theme::ROW_HEIGHT;
const ROW_GAP: f32 = theme::ROW_GAP;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const HANDLE_RADIUS: f32 = theme::CONNECT_HANDLE_RADIUS;

#[derive(Debug, Clone)]
struct DragSnapshot {
    start: NaiveDate,
    end: NaiveDate,
    start_pointer_x: f32,
}

/// Result details from interactions in the Gantt chart.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A task's dates were changed by dragging.
    pub changed: bool,
}

/// Render the Gantt chart area and drive the dependency arrows over it.
///
/// Arrow coordinates are relative to the chart canvas' top-left corner, so
/// scrolling never invalidates them; moving or zooming bars does.
#[allow(clippy::too_many_arguments)]
pub fn show_gantt_chart(
    tasks: &mut [Task],
    query: &str,
    viewport: &mut TimelineViewport,
    selected_task: &mut Option<Uuid>,
    links: &mut LinkList,
    surface: &mut ChartSurface,
    show_links: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let row_count = tasks.iter().filter(|t| t.matches(query)).count();
    let chart_width = viewport.total_width().max(available.x);
    let chart_height =
        (HEADER_HEIGHT + row_count as f32 * (ROW_HEIGHT + ROW_GAP) + 40.0).max(available.y);

    // Ctrl + scroll zooms
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll > 0.0 {
            viewport.zoom_in();
        } else if scroll < 0.0 {
            viewport.zoom_out();
        }
    }

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::click());
            let origin = response.rect.min;
            let pointer = ui.input(|i| i.pointer.hover_pos());
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_rows(&painter, origin, row_count, chart_width);
            draw_timeline_header(&painter, origin, viewport, chart_width, chart_height);
            draw_today_line(&painter, origin, viewport, chart_height);

            let mut rects = HashMap::new();
            let mut hovered = BTreeSet::new();
            let mut begin_link = None;

            let rows = tasks.iter_mut().filter(|t| t.matches(query));
            for (row, task) in rows.enumerate() {
                let row_top = origin.y + HEADER_HEIGHT + row as f32 * (ROW_HEIGHT + ROW_GAP) + ROW_GAP;
                let is_selected = *selected_task == Some(task.id);

                let bar_rect = if task.is_milestone {
                    draw_milestone(&painter, origin, viewport, task, row_top, is_selected)
                } else {
                    draw_task_bar(&painter, origin, viewport, task, row_top, is_selected)
                };

                let bar_response = ui.interact(
                    bar_rect.expand(3.0),
                    ui.make_persistent_id(("task-bar", task.id)),
                    Sense::click_and_drag(),
                );
                let handle_center =
                    Pos2::new(bar_rect.right() + HANDLE_RADIUS + 3.0, bar_rect.center().y);
                let handle_response = ui.interact(
                    Rect::from_center_size(handle_center, Vec2::splat(HANDLE_RADIUS * 3.0)),
                    ui.make_persistent_id(("task-connect", task.id)),
                    Sense::drag(),
                );

                if bar_response.clicked() {
                    *selected_task = Some(task.id);
                    consumed_click = true;
                }

                if bar_response.drag_started() {
                    let ptr_x = bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    ui.ctx().data_mut(|data| {
                        data.insert_temp(
                            drag_id(task.id),
                            DragSnapshot {
                                start: task.start,
                                end: task.end,
                                start_pointer_x: ptr_x,
                            },
                        );
                    });
                    *selected_task = Some(task.id);
                    consumed_click = true;
                }

                if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                    let ptr_x = bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    let snapshot = ui
                        .ctx()
                        .data(|data| data.get_temp::<DragSnapshot>(drag_id(task.id)));
                    if let Some(snapshot) = snapshot {
                        let day_delta = drag_days(ptr_x - snapshot.start_pointer_x, viewport);
                        let start = snapshot.start + chrono::Duration::days(day_delta);
                        let end = snapshot.end + chrono::Duration::days(day_delta);
                        if start != task.start {
                            task.start = start;
                            task.end = end;
                            interaction.changed = true;
                        }
                    }
                }

                if bar_response.drag_stopped() {
                    ui.ctx().data_mut(|data| data.remove::<DragSnapshot>(drag_id(task.id)));
                }

                if handle_response.drag_started() {
                    begin_link = Some(task.id);
                    consumed_click = true;
                }

                // Connection handle
                if is_selected || bar_response.hovered() || handle_response.hovered() {
                    if handle_response.hovered() {
                        ui.ctx().set_cursor_icon(egui::CursorIcon::Crosshair);
                    }
                    painter.circle_filled(handle_center, HANDLE_RADIUS, theme::CONNECT_HANDLE);
                }

                if bar_response.hovered() && !bar_response.dragged() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        Id::new(("task-tip", task.id)),
                        |ui| {
                            ui.strong(&task.name);
                            ui.label(format!(
                                "{} → {}",
                                task.start.format("%d/%m/%Y"),
                                task.end.format("%d/%m/%Y"),
                            ));
                            ui.label(format!("Progress: {}%", (task.progress * 100.0) as i32));
                        },
                    );
                }

                if pointer.is_some_and(|p| bar_rect.contains(p)) {
                    hovered.insert(task.id);
                }
                rects.insert(task.id, from_rect(origin, bar_rect));
            }

            // Publish this frame's layout, then let the arrows react to it.
            let mouse = pointer
                .filter(|p| response.rect.contains(*p))
                .map(|p| Point::new(p.x - origin.x, p.y - origin.y));
            let moved = surface.layout.update(rects, mouse, hovered);
            let laid_out = !surface.layout.is_empty();
            {
                let mut env = surface.collaborators();
                if !links.is_ready() {
                    if laid_out {
                        links.on_ready(&mut env);
                    }
                } else if moved {
                    links.redraw_all(&mut env);
                }
                if let Some(task_id) = begin_link {
                    links.begin_provisional_link(task_id, &mut env);
                }
            }

            for event in ui.input(input_events) {
                if surface.overlay.is_listening(event.listener()) {
                    links.handle_input(event, &mut surface.collaborators());
                    consumed_click = true;
                }
            }

            surface.overlay.paint(&painter, origin, show_links);

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    interaction
}

fn drag_id(task_id: Uuid) -> Id {
    Id::new(("drag", task_id))
}

fn drag_days(delta_x: f32, viewport: &TimelineViewport) -> i64 {
    (delta_x / viewport.pixels_per_day).round() as i64
}

fn draw_rows(painter: &egui::Painter, origin: Pos2, rows: usize, width: f32) {
    for i in 0..rows {
        let y = origin.y + HEADER_HEIGHT + i as f32 * (ROW_HEIGHT + ROW_GAP);
        if i % 2 == 0 {
            painter.rect_filled(
                Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, ROW_HEIGHT + ROW_GAP)),
                0.0,
                theme::BG_PANEL,
            );
        }
        let bottom = y + ROW_HEIGHT + ROW_GAP;
        painter.line_segment(
            [Pos2::new(origin.x, bottom), Pos2::new(origin.x + width, bottom)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

/// First tick at or before `date` for the given scale.
fn first_tick(date: NaiveDate, scale: TimelineScale) -> NaiveDate {
    match scale {
        TimelineScale::Days => date,
        TimelineScale::Weeks => {
            date - chrono::Duration::days(date.weekday().num_days_from_monday() as i64)
        }
        TimelineScale::Months => date.with_day(1).unwrap_or(date),
    }
}

fn next_tick(date: NaiveDate, scale: TimelineScale) -> NaiveDate {
    match scale {
        TimelineScale::Days => date + chrono::Duration::days(1),
        TimelineScale::Weeks => date + chrono::Duration::days(7),
        TimelineScale::Months => date
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(date + chrono::Duration::days(30)),
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let scale = viewport.scale;
    let mut date = first_tick(viewport.start, scale);
    while date <= viewport.end {
        let x = origin.x + viewport.date_to_x(date);
        painter.line_segment(
            [
                Pos2::new(x, origin.y + HEADER_HEIGHT),
                Pos2::new(x, origin.y + height),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );

        let sub_label = match scale {
            TimelineScale::Days if viewport.pixels_per_day >= 20.0 => {
                Some(date.format("%d").to_string())
            }
            TimelineScale::Weeks => Some(date.format("W%V").to_string()),
            _ => None,
        };
        if let Some(label) = sub_label {
            let weekend = date.weekday().num_days_from_monday() >= 5;
            let color = if scale == TimelineScale::Days && weekend {
                theme::TEXT_DIM
            } else {
                theme::TEXT_SECONDARY
            };
            painter.text(
                Pos2::new(x + 3.0, origin.y + 28.0),
                egui::Align2::LEFT_CENTER,
                label,
                theme::font_sub(),
                color,
            );
        }

        let month_start = match scale {
            TimelineScale::Days => date.day() == 1,
            TimelineScale::Weeks => date.day() <= 7,
            TimelineScale::Months => true,
        };
        if month_start {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                date.format("%b %Y").to_string(),
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }

        date = next_tick(date, scale);
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, viewport: &TimelineViewport, height: f32) {
    let today = chrono::Local::now().date_naive();
    let x = origin.x + viewport.date_to_x(today);

    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_rect = Rect::from_min_size(
        Pos2::new(x - 21.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(42.0, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

/// Bars are `BAR_HEIGHT` tall, centred in their row, name to the right.
fn draw_task_bar(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    task: &Task,
    row_top: f32,
    is_selected: bool,
) -> Rect {
    let x_start = origin.x + viewport.date_to_x(task.start);
    let x_end = origin.x + viewport.date_to_x(task.end);
    let bar_width = (x_end - x_start).max(theme::MIN_BAR_WIDTH);
    let bar_rect = Rect::from_min_size(
        Pos2::new(x_start, row_top + (ROW_HEIGHT - theme::BAR_HEIGHT) / 2.0),
        Vec2::new(bar_width, theme::BAR_HEIGHT),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(bar_rect.translate(Vec2::new(1.0, 1.5)), rounding, Color32::from_black_alpha(35));
    painter.rect_filled(bar_rect, rounding, task.color);

    if task.progress > 0.0 {
        let progress_rect = Rect::from_min_size(
            bar_rect.min,
            Vec2::new(bar_width * task.progress.clamp(0.0, 1.0), bar_rect.height()),
        );
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    painter.text(
        Pos2::new(bar_rect.right() + HANDLE_RADIUS * 2.0 + 8.0, bar_rect.center().y),
        egui::Align2::LEFT_CENTER,
        &task.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    bar_rect
}

fn draw_milestone(
    painter: &egui::Painter,
    origin: Pos2,
    viewport: &TimelineViewport,
    task: &Task,
    row_top: f32,
    is_selected: bool,
) -> Rect {
    let x = origin.x + viewport.date_to_x(task.start);
    let center = Pos2::new(x, row_top + ROW_HEIGHT / 2.0);
    let size = theme::BAR_HEIGHT * 0.7;

    let points = vec![
        Pos2::new(center.x, center.y - size),
        Pos2::new(center.x + size, center.y),
        Pos2::new(center.x, center.y + size),
        Pos2::new(center.x - size, center.y),
    ];
    let stroke = if is_selected {
        Stroke::new(2.0, theme::BORDER_ACCENT)
    } else {
        Stroke::NONE
    };
    painter.add(egui::Shape::convex_polygon(points, task.color, stroke));

    painter.text(
        Pos2::new(x + size + HANDLE_RADIUS * 2.0 + 8.0, center.y),
        egui::Align2::LEFT_CENTER,
        &task.name,
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    // Arrows treat a milestone like a bar one corner wide.
    Rect::from_center_size(center, Vec2::new(theme::BAR_HEIGHT, theme::BAR_HEIGHT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_ticks_start_on_monday() {
        // 2026-03-05 is a Thursday
        assert_eq!(first_tick(date(2026, 3, 5), TimelineScale::Weeks), date(2026, 3, 2));
        assert_eq!(next_tick(date(2026, 3, 2), TimelineScale::Weeks), date(2026, 3, 9));
    }

    #[test]
    fn month_ticks_roll_over_the_year() {
        assert_eq!(first_tick(date(2026, 12, 17), TimelineScale::Months), date(2026, 12, 1));
        assert_eq!(next_tick(date(2026, 12, 1), TimelineScale::Months), date(2027, 1, 1));
    }
}
