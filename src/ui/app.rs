use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use eframe::egui::{
    self, Align, Color32, Frame, Key, Layout, RichText, ScrollArea, TextEdit, TopBottomPanel, Ui,
};

use crate::config::{AppConfig, Theme};
use crate::form::state::{Command, FormEvent, FormState, NoticeKind};
use crate::ui::present::{ResultView, present};
use crate::webhook::client::{SubmissionResult, Submitter};
use crate::webhook::worker::SubmissionWorker;

const NOTICE_TTL: Duration = Duration::from_secs(4);
const BUSY_REPAINT: Duration = Duration::from_millis(50);

pub fn run_gui(config: AppConfig, submitter: Arc<dyn Submitter>) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("n8n Overlay Dashboard")
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };

    let app = OverlayDashApp::new(config, submitter);

    eframe::run_native(
        "overlaydash",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx, app.theme);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch overlay dashboard window: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context, theme: Theme) {
    let visuals = match theme {
        Theme::Dark => {
            let mut visuals = egui::Visuals::dark();
            visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
            visuals.panel_fill = Color32::from_rgb(15, 23, 42);
            visuals.window_fill = Color32::from_rgb(2, 6, 23);
            visuals.widgets.inactive.bg_fill = Color32::from_rgb(30, 41, 59);
            visuals.widgets.hovered.bg_fill = Color32::from_rgb(51, 65, 85);
            visuals.widgets.active.bg_fill = Color32::from_rgb(71, 85, 105);
            visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
            visuals
        }
        Theme::Light => {
            let mut visuals = egui::Visuals::light();
            visuals.panel_fill = Color32::from_rgb(248, 250, 252);
            visuals.window_fill = Color32::WHITE;
            visuals.selection.bg_fill = Color32::from_rgb(125, 211, 252);
            visuals
        }
    };
    ctx.set_visuals(visuals);
}

struct OverlayDashApp {
    config: AppConfig,
    state: FormState,
    worker: SubmissionWorker,
    theme: Theme,
    details_open: bool,
    notice_expires_at: Option<Instant>,
}

impl OverlayDashApp {
    fn new(config: AppConfig, submitter: Arc<dyn Submitter>) -> Self {
        let worker = SubmissionWorker::new(submitter, config.webhook_url.clone());
        Self {
            theme: config.theme,
            config,
            state: FormState::default(),
            worker,
            details_open: false,
            notice_expires_at: None,
        }
    }

    fn dispatch(&mut self, event: FormEvent) {
        let had_notice = self.state.notice.clone();
        let transition = std::mem::take(&mut self.state).apply(event);
        self.state = transition.state;

        if let Some(Command::Send(range)) = transition.command
            && let Err(err) = self.worker.start(range)
        {
            log::warn!("could not start submission: {err:#}");
            self.dispatch(FormEvent::Completed(SubmissionResult {
                response_body: format!("{err:#}"),
                payload_sent: Some(range),
                ..SubmissionResult::empty()
            }));
            return;
        }

        if self.state.notice.is_some() && self.state.notice != had_notice {
            self.notice_expires_at = Some(Instant::now() + NOTICE_TTL);
        }
    }

    fn submit_blocked(&self) -> bool {
        self.state.is_submitting() || self.worker.is_busy()
    }

    fn poll_worker(&mut self) {
        if let Some(result) = self.worker.poll() {
            self.dispatch(FormEvent::Completed(result));
        }
        if let Some(expires_at) = self.notice_expires_at
            && Instant::now() >= expires_at
        {
            self.notice_expires_at = None;
            self.dispatch(FormEvent::DismissNotice);
        }
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(
                RichText::new("n8n Overlay Dashboard")
                    .size(26.0)
                    .color(Color32::from_rgb(96, 228, 206))
                    .strong(),
            );
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = match self.theme {
                    Theme::Dark => "Light mode",
                    Theme::Light => "Dark mode",
                };
                if ui.button(label).clicked() {
                    self.theme = self.theme.toggled();
                    configure_theme(ui.ctx(), self.theme);
                }
            });
        });
        ui.label(
            RichText::new(
                "Enter the overlay starting and ending second, then send them to your n8n.",
            )
            .color(Color32::from_rgb(148, 163, 184)),
        );
    }

    fn show_form(&mut self, ui: &mut Ui, view: &ResultView) {
        ui.heading(RichText::new("Submit Range").strong());
        ui.add_space(6.0);

        let mut start = self.state.start.clone();
        let mut end = self.state.end.clone();
        let mut enter_pressed = false;

        egui::Grid::new("range_grid")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                ui.label("Starting Second");
                let response = ui.add(
                    TextEdit::singleline(&mut start)
                        .hint_text("e.g., 0")
                        .desired_width(220.0),
                );
                enter_pressed |= response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                ui.end_row();

                ui.label("Ending Second");
                let response = ui.add(
                    TextEdit::singleline(&mut end)
                        .hint_text("e.g., 16")
                        .desired_width(220.0),
                );
                enter_pressed |= response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
                ui.end_row();
            });

        if start != self.state.start {
            self.dispatch(FormEvent::EditStart(start));
        }
        if end != self.state.end {
            self.dispatch(FormEvent::EditEnd(end));
        }

        ui.add_space(8.0);
        let mut submit_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            let blocked = self.submit_blocked();
            let submit = ui.add_enabled(
                !blocked,
                egui::Button::new(RichText::new(view.submit_label).strong())
                    .fill(Color32::from_rgb(14, 116, 144))
                    .min_size(egui::vec2(110.0, 30.0)),
            );
            if blocked {
                ui.spinner();
            }
            submit_clicked = submit.clicked();
            reset_clicked = ui
                .add(egui::Button::new("Reset").min_size(egui::vec2(90.0, 30.0)))
                .clicked();
        });

        if reset_clicked {
            self.notice_expires_at = None;
            self.dispatch(FormEvent::Reset);
        } else if (submit_clicked || enter_pressed) && !self.submit_blocked() {
            self.dispatch(FormEvent::Submit);
        }

        if let Some(notice) = &view.notice {
            let color = match notice.kind {
                NoticeKind::Success => Color32::from_rgb(111, 228, 134),
                NoticeKind::Error => Color32::from_rgb(255, 124, 124),
            };
            ui.add_space(6.0);
            ui.label(RichText::new(&notice.text).color(color).strong());
        }
    }

    fn show_details(&mut self, ui: &mut Ui, view: &ResultView) {
        let toggle = if self.details_open {
            "Hide Technical Details"
        } else {
            "Show Technical Details"
        };
        if ui.button(toggle).clicked() {
            self.details_open = !self.details_open;
        }
        if !self.details_open {
            return;
        }

        ui.separator();
        ui.label(RichText::new("Webhook").size(18.0).strong());
        ui.label(RichText::new(&view.endpoint_line).monospace());
        ui.label(RichText::new(&view.override_hint).small().weak());
        ui.add_space(8.0);

        ui.label(RichText::new("Payload Preview").strong());
        code_block(ui, &view.payload_pretty, Color32::from_rgb(2, 6, 23));
        ui.add_space(8.0);

        ui.label(RichText::new("Response").strong());
        ui.label(view.status_line.as_str());
        if let Some(sent_at) = &view.sent_at_line {
            ui.label(RichText::new(sent_at).small().weak());
        }
        ui.push_id("response_block", |ui| {
            ScrollArea::vertical().max_height(220.0).show(ui, |ui| {
                code_block(ui, &view.response_text, Color32::from_rgb(30, 41, 59));
            });
        });
    }
}

fn code_block(ui: &mut Ui, text: &str, fill: Color32) {
    Frame::new()
        .fill(fill)
        .corner_radius(12.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                RichText::new(text)
                    .monospace()
                    .color(Color32::from_rgb(241, 245, 249)),
            );
        });
}

impl eframe::App for OverlayDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker();

        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Webhook {}", self.config.webhook_url))
                        .small()
                        .color(Color32::from_rgb(120, 205, 192)),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                let view = present(&self.state, &self.config);
                self.show_form(ui, &view);
                ui.add_space(12.0);
                let view = present(&self.state, &self.config);
                self.show_details(ui, &view);
            });
        });

        if self.worker.is_busy() || self.notice_expires_at.is_some() {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }
}
