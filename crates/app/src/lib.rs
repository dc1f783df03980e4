pub mod config;
pub mod upload;

use std::path::PathBuf;
use std::time::Duration;

use tcline_state::project::AppState;

use crate::config::AppConfig;
use crate::upload::{HttpTransport, UploadError, Uploader};

pub struct TimelineApp {
    state: AppState,
    uploader: Uploader<HttpTransport>,
}

impl TimelineApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig) -> Result<Self, UploadError> {
        tcline_ui::theme::apply_theme(&cc.egui_ctx);
        let transport = HttpTransport::new(&config)?;
        tracing::info!(endpoint = %config.process_endpoint(), "uploads go to backend");
        Ok(Self {
            state: AppState::default(),
            uploader: Uploader::new(transport, Some(cc.egui_ctx.clone())),
        })
    }

    fn poll_background_tasks(&mut self, ctx: &egui::Context) {
        if self.uploader.poll(&mut self.state) {
            ctx.request_repaint();
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw
                    .dropped_files
                    .iter()
                    .filter_map(|f| f.path.clone())
                    .collect::<Vec<PathBuf>>(),
            )
        });
        self.state.ui.files_hovering = hovering;
        if !dropped.is_empty() {
            self.submit(dropped);
        }
    }

    fn submit(&mut self, paths: Vec<PathBuf>) {
        let count = paths.len();
        let started = self.uploader.submit(&mut self.state, paths);
        tracing::debug!(count, started, "submitted upload batch");
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_background_tasks(ctx);
        self.handle_dropped_files(ctx);

        let mut picked: Option<Vec<PathBuf>> = None;
        let has_files = !self.state.project.files.is_empty();

        egui::TopBottomPanel::top("top_panel")
            .exact_height(32.0)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.heading("Timecode Timeline");
                    if has_files {
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            picked = tcline_ui::drop_zone::add_files_button(ui);
                        });
                    }
                });
            });

        egui::TopBottomPanel::bottom("status_panel")
            .resizable(false)
            .show(ctx, |ui| {
                tcline_ui::status::status_panel(
                    ui,
                    &self.state.ui.status,
                    self.uploader.pending_count(),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if has_files {
                tcline_ui::timeline::timeline_panel(ui, &mut self.state);
            } else if let Some(paths) = tcline_ui::drop_zone::drop_zone(ui) {
                picked = Some(paths);
            }
        });

        if self.state.ui.files_hovering {
            tcline_ui::drop_zone::drag_overlay(ctx);
        }

        if let Some(paths) = picked {
            self.submit(paths);
        }

        if self.uploader.pending_count() > 0 {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
