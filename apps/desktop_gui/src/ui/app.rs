use client_core::Theme;
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::QaRecord;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::ViewController, reducer::Action};
use crate::ui::theme::visuals_for_theme;

const HISTORY_PREVIEW_CHARS: usize = 48;
const HISTORY_ROW_HEIGHT: f32 = 30.0;

pub struct QaDesktopApp {
    controller: ViewController,
    ui_rx: Receiver<UiEvent>,
    base_url: String,
    applied_theme: Option<Theme>,
}

impl QaDesktopApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        theme: Theme,
        base_url: String,
    ) -> Self {
        let mut controller = ViewController::new(cmd_tx, theme);
        controller.activate();
        Self {
            controller,
            ui_rx,
            base_url,
            applied_theme: None,
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let theme = self.controller.state().theme;
        if self.applied_theme == Some(theme) {
            return;
        }
        ctx.set_visuals(visuals_for_theme(theme));
        self.applied_theme = Some(theme);
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Q&A Assistant");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.base_url).monospace().weak());
                    let status = self.controller.status();
                    if !status.is_empty() {
                        ui.label(egui::RichText::new(status).weak());
                    }
                });
            });
        });
    }

    fn show_history_panel(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let state = self.controller.state();
        egui::SidePanel::left("history_panel")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.add_space(6.0);
                ui.label(egui::RichText::new("History").strong());
                ui.separator();

                if let Some(warning) = &state.history_warning {
                    ui.colored_label(ui.visuals().warn_fg_color, warning);
                }
                if state.history.is_empty() {
                    ui.label(egui::RichText::new("No questions yet").weak());
                    return;
                }

                egui::ScrollArea::vertical().show(ui, |ui| {
                    for (index, record) in state.history.iter().enumerate() {
                        let selected = state.active_index() == Some(index);
                        if history_row(ui, record, selected).clicked() {
                            actions.push(Action::RecordSelected(index));
                        }
                    }
                });
            });
    }

    fn show_main_panel(&self, ctx: &egui::Context, actions: &mut Vec<Action>) {
        let state = self.controller.state();
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut question = state.question.clone();
            let mut submit = false;

            ui.horizontal(|ui| {
                let button_width = 80.0;
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut question)
                        .hint_text("Ask a question...")
                        .desired_width(ui.available_width() - button_width),
                );
                if edit.changed() {
                    actions.push(Action::QuestionEdited(question.clone()));
                }
                if edit.lost_focus()
                    && ui.input(|i| i.key_pressed(egui::Key::Enter))
                    && state.can_submit()
                {
                    submit = true;
                }

                let label = if state.loading { "Asking..." } else { "Ask" };
                if ui
                    .add_enabled(state.can_submit(), egui::Button::new(label))
                    .clicked()
                {
                    submit = true;
                }
            });
            if submit {
                actions.push(Action::SubmitRequested);
            }

            if let Some(error) = &state.error {
                ui.add_space(6.0);
                ui.horizontal(|ui| {
                    ui.colored_label(ui.visuals().error_fg_color, error);
                    if ui.small_button("Dismiss").clicked() {
                        actions.push(Action::ErrorDismissed);
                    }
                });
            }

            ui.add_space(10.0);
            if state.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Waiting for an answer...");
                });
            }

            match state.active_record() {
                Some(record) => show_record(ui, record),
                None => {
                    ui.label(egui::RichText::new("Ask something to get started.").weak());
                }
            }
        });
    }
}

fn history_row(ui: &mut egui::Ui, record: &QaRecord, selected: bool) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), HISTORY_ROW_HEIGHT),
        egui::Sense::click(),
    );

    let visuals = ui.visuals();
    let fill = if selected {
        visuals.selection.bg_fill
    } else if response.hovered() || response.has_focus() {
        visuals.widgets.hovered.bg_fill
    } else {
        egui::Color32::TRANSPARENT
    };
    let text_color = if selected {
        visuals.selection.stroke.color
    } else {
        visuals.text_color()
    };
    let font = egui::TextStyle::Body.resolve(ui.style());

    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, fill);
    painter.text(
        rect.left_center() + egui::vec2(8.0, 0.0),
        egui::Align2::LEFT_CENTER,
        preview_line(&record.question, HISTORY_PREVIEW_CHARS),
        font,
        text_color,
    );

    response.on_hover_text(&record.question)
}

fn show_record(ui: &mut egui::Ui, record: &QaRecord) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(&record.question).strong());
        if let Some(meta) = record_meta(record) {
            ui.label(egui::RichText::new(meta).small().weak());
        }
        ui.separator();
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.label(&record.answer);
        });
    });
}

fn record_meta(record: &QaRecord) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(id) = &record.id {
        parts.push(format!("#{id}"));
    }
    if let Some(created_at) = record.created_at {
        parts.push(created_at.format("%Y-%m-%d %H:%M UTC").to_string());
    }
    (!parts.is_empty()).then(|| parts.join("  ·  "))
}

/// First line of `text`, cut to `max_chars` characters with an ellipsis.
fn preview_line(text: &str, max_chars: usize) -> String {
    let line = text.lines().next().unwrap_or_default().trim();
    if line.chars().count() <= max_chars {
        return line.to_string();
    }
    let cut: String = line.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

impl eframe::App for QaDesktopApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.process_events(&self.ui_rx);
        self.apply_theme_if_needed(ctx);

        let mut actions = Vec::new();
        self.show_header(ctx);
        self.show_history_panel(ctx, &mut actions);
        self.show_main_panel(ctx, &mut actions);
        for action in actions {
            self.controller.apply(action);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}
