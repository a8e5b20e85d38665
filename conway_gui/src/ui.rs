// ui.rs - Drawing and input for the game window

use std::time::{Duration, Instant};

use eframe::egui;
use egui::{Color32, Rect, RichText, Stroke, Vec2};

use crate::{GameOfLife, GameOfLifeInterface, SIDE_MARGIN};

impl eframe::App for GameOfLife {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.tick(Instant::now());
        self.show(ctx);

        // Keep generations coming while playing; paused boards only repaint on input
        if self.board.is_playing() {
            ctx.request_repaint_after(self.time_to_next_tick(Instant::now()));
        }
    }
}

impl GameOfLife {
    fn show(&mut self, ctx: &egui::Context) {
        let frame = egui::Frame::none()
            .fill(Color32::WHITE)
            .inner_margin(egui::Margin::symmetric(SIDE_MARGIN, 10.0));

        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            self.draw_info(ui);

            ui.add_space(8.0);
            self.draw_board(ui);
            ui.add_space(8.0);

            self.draw_controls(ui);
        });
    }

    fn draw_info(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new(format!("Cycle: {}", self.board.cycles())).color(Color32::BLACK));
            ui.colored_label(Color32::BLUE, format!("Alive cells: {}", self.board.alive_cells()));
            ui.colored_label(Color32::RED, format!("Dead cells: {}", self.board.dead_cells()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new("Game 4 Life").heading().color(Color32::BLACK));
            });
        });
    }

    fn draw_board(&mut self, ui: &mut egui::Ui) {
        let cell_size = self.board.cell_size() as f32;
        let total_size = Vec2::new(
            self.board.width() as f32 * cell_size,
            self.board.height() as f32 * cell_size,
        );

        let (response, painter) = ui.allocate_painter(total_size, egui::Sense::click_and_drag());
        let origin = response.rect.min;
        self.board_rect = response.rect;

        for cell in self.board.cells() {
            let rect = Rect::from_min_size(
                origin + Vec2::new(cell.x() as f32, cell.y() as f32),
                Vec2::new(cell.width() as f32, cell.height() as f32),
            );
            let color = if cell.is_alive() { self.live_color } else { self.dead_color };

            painter.rect_filled(rect, 0.0, color);
            painter.rect_stroke(rect, 0.0, Stroke::new(0.5, Color32::BLACK));
        }

        // Board-relative pointer position
        let pointer = response.interact_pointer_pos().map(|pos| pos - origin);

        // A press already reports as a drag, so it toggles the first cell; the
        // click that follows must not toggle it back.
        if response.dragged() {
            if let Some(offset) = pointer {
                self.drag_over(offset.x, offset.y);
            }
        }

        if response.clicked() {
            if let Some(offset) = pointer {
                self.release_at(offset.x, offset.y);
            }
        }

        if response.clicked() || response.drag_released() {
            self.end_drag();
        }
    }

    fn draw_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Clean").clicked() {
                self.clear_grid();
            }

            let button_text = if self.board.is_playing() { "Stop" } else { "Start" };
            if ui.button(button_text).clicked() {
                self.toggle_playing();
            }

            if ui.button("Random").clicked() {
                self.apply_random_pattern();
            }

            ui.separator();

            ui.label("Delay:");
            let mut delay = self.update_interval.as_millis() as u64;
            if ui.add(egui::Slider::new(&mut delay, 10..=2000).suffix(" ms")).changed() {
                self.update_interval = Duration::from_millis(delay);
            }

            ui.separator();

            ui.label("Live:");
            ui.color_edit_button_srgba(&mut self.live_color);
            ui.label("Dead:");
            ui.color_edit_button_srgba(&mut self.dead_color);
        });
    }
}
