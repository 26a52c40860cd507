use std::path::PathBuf;
use std::thread;

use crossbeam_channel::Receiver;
use eframe::egui;

use webpick::utils::{file_display_name, format_duration, truncate_path_label, DIALOG_EXTENSIONS};
use webpick::{
    BatchEvent, BatchPlan, BatchRunner, BatchSummary, ChannelObserver, EncodeSettings, OutputTarget,
};

/// Lifecycle of the start control.
///
/// Modeled explicitly so a reentrant start request is rejected by the
/// state check, not merely by a disabled button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// Nothing selected; start disabled.
    Idle,
    /// Non-empty selection; start enabled.
    Ready,
    /// A batch is in flight; at most one at a time.
    Running,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusTone {
    Info,
    Success,
    Mixed,
    Warning,
}

impl StatusTone {
    fn color(self) -> egui::Color32 {
        match self {
            StatusTone::Info => egui::Color32::LIGHT_BLUE,
            StatusTone::Success => egui::Color32::GREEN,
            StatusTone::Mixed => egui::Color32::ORANGE,
            StatusTone::Warning => egui::Color32::RED,
        }
    }
}

/// One-line status text under the progress bar.
struct StatusLine {
    text: String,
    tone: StatusTone,
}

impl StatusLine {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Info,
        }
    }

    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Success,
        }
    }

    fn mixed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Mixed,
        }
    }

    fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: StatusTone::Warning,
        }
    }
}

/// Main GUI application structure
pub struct WebpickApp {
    // Selection state
    files: Vec<PathBuf>,
    output: OutputTarget,

    // Conversion settings, mutated live by the controls. A run
    // snapshots them into a BatchPlan when it starts.
    quality: u8,
    lossless: bool,
    keep_original: bool,

    // Run state
    state: RunState,
    progress_percent: f32,
    status: StatusLine,
    events: Option<Receiver<BatchEvent>>,

    // Terminal summary, shown as a modal until dismissed
    summary: Option<BatchSummary>,
}

impl Default for WebpickApp {
    fn default() -> Self {
        let settings = EncodeSettings::default();
        Self {
            files: Vec::new(),
            output: OutputTarget::default(),
            quality: settings.quality,
            lossless: settings.lossless,
            keep_original: true,
            state: RunState::Idle,
            progress_percent: 0.0,
            status: StatusLine::info("Ready"),
            events: None,
            summary: None,
        }
    }
}

impl eframe::App for WebpickApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_main(ui);
        });

        self.show_summary_modal(ctx);

        // Keep polling the worker channel while a batch is in flight.
        if self.state == RunState::Running {
            ctx.request_repaint();
        }
    }
}

impl WebpickApp {
    /// Replace the selection wholesale. No de-duplication and no
    /// existence checks here; every file is validated when it is
    /// decoded.
    fn set_selection(&mut self, files: Vec<PathBuf>) {
        self.files = files;
        if self.state != RunState::Running {
            self.state = if self.files.is_empty() {
                RunState::Idle
            } else {
                RunState::Ready
            };
            if self.state == RunState::Ready {
                self.status = StatusLine::info("Ready to convert");
            }
        }
    }

    fn select_images(&mut self) {
        let picked = rfd::FileDialog::new()
            .set_title("Select Images")
            .add_filter("Image files", DIALOG_EXTENSIONS)
            .add_filter("All files", &["*"])
            .pick_files();

        // An empty or cancelled pick leaves the current selection alone.
        if let Some(files) = picked {
            if !files.is_empty() {
                self.set_selection(files);
            }
        }
    }

    fn select_output_folder(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Select Output Folder")
            .pick_folder()
        {
            self.output = OutputTarget::Directory(dir);
        }
    }

    /// Snapshot the selection and settings and launch the batch on one
    /// background worker thread.
    fn start_conversion(&mut self) {
        if self.state == RunState::Running {
            // Only one batch may be in flight.
            return;
        }
        if self.files.is_empty() {
            self.status = StatusLine::warning("Please select images to convert");
            return;
        }

        let plan = BatchPlan::new(self.files.clone())
            .with_output(self.output.clone())
            .with_settings(EncodeSettings {
                quality: self.quality,
                lossless: self.lossless,
            })
            .with_keep_original(self.keep_original);

        let (sender, receiver) = crossbeam_channel::unbounded();
        self.events = Some(receiver);
        self.state = RunState::Running;
        self.progress_percent = 0.0;
        self.summary = None;
        self.status = StatusLine::info("Converting...");

        thread::spawn(move || {
            let observer = ChannelObserver::new(sender);
            BatchRunner::new(plan).run(&observer);
        });
    }

    /// Apply events posted by the worker thread. The worker never
    /// touches UI state directly; this is the only crossing point.
    fn drain_events(&mut self) {
        let mut finished = None;

        if let Some(receiver) = &self.events {
            while let Ok(event) = receiver.try_recv() {
                match event {
                    BatchEvent::FileStarted { index, total, name } => {
                        self.status = StatusLine::info(format!(
                            "Converting {}/{}: {}",
                            index + 1,
                            total,
                            name
                        ));
                    }
                    BatchEvent::Progress { percent } => {
                        self.progress_percent = percent;
                    }
                    BatchEvent::Finished { summary } => {
                        finished = Some(summary);
                    }
                }
            }
        }

        if let Some(summary) = finished {
            self.finish_run(summary);
        }
    }

    fn finish_run(&mut self, summary: BatchSummary) {
        self.status = if summary.all_succeeded() {
            StatusLine::success(format!(
                "Successfully converted {} image(s)",
                summary.converted
            ))
        } else {
            StatusLine::mixed(format!(
                "Converted {}, Failed {}",
                summary.converted, summary.failed
            ))
        };

        self.files.clear();
        self.state = RunState::Idle;
        self.progress_percent = 0.0;
        self.events = None;
        self.summary = Some(summary);
    }

    fn show_main(&mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("Image to WebP Converter");
        });
        ui.separator();
        ui.add_space(8.0);

        let busy = self.state == RunState::Running;

        // Selection
        ui.group(|ui| {
            egui::Grid::new("selection_grid")
                .num_columns(2)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    if ui
                        .add_enabled(!busy, egui::Button::new("Select Images"))
                        .clicked()
                    {
                        self.select_images();
                    }
                    let files_label = match self.files.len() {
                        0 => "No images selected".to_string(),
                        n => format!("{n} image(s) selected"),
                    };
                    ui.label(egui::RichText::new(files_label).color(egui::Color32::GRAY));
                    ui.end_row();

                    if ui
                        .add_enabled(!busy, egui::Button::new("Select Output Folder"))
                        .clicked()
                    {
                        self.select_output_folder();
                    }
                    let output_label = match &self.output {
                        OutputTarget::SourceDirectory => "Same as source".to_string(),
                        OutputTarget::Directory(dir) => {
                            truncate_path_label(&dir.display().to_string(), 40)
                        }
                    };
                    ui.label(egui::RichText::new(output_label).color(egui::Color32::GRAY));
                    ui.end_row();
                });
        });

        ui.add_space(8.0);

        // Quality settings
        ui.group(|ui| {
            ui.label(egui::RichText::new("Quality Settings").strong());
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.label("Quality:");
                // Meaningless in lossless mode, so disabled there.
                ui.add_enabled(
                    !self.lossless,
                    egui::Slider::new(&mut self.quality, 1..=100).suffix("%"),
                );
            });
        });

        ui.add_space(8.0);

        // Options
        ui.group(|ui| {
            ui.label(egui::RichText::new("Options").strong());
            ui.add_space(4.0);
            ui.checkbox(&mut self.keep_original, "Keep original files");
            ui.checkbox(&mut self.lossless, "Lossless compression");
        });

        ui.add_space(12.0);

        ui.vertical_centered(|ui| {
            let can_start = self.state == RunState::Ready;
            if ui
                .add_enabled(can_start, egui::Button::new("Convert to WebP"))
                .clicked()
            {
                self.start_conversion();
            }
        });

        ui.add_space(8.0);
        ui.add(egui::ProgressBar::new(self.progress_percent / 100.0).show_percentage());

        ui.add_space(4.0);
        ui.vertical_centered(|ui| {
            ui.colored_label(self.status.tone.color(), self.status.text.as_str());
        });

        // Converting file names can be long; show the full ones on hover.
        if !self.files.is_empty() && !busy {
            ui.add_space(8.0);
            ui.collapsing("Selected files", |ui| {
                for file in &self.files {
                    ui.label(file_display_name(file)).on_hover_text(
                        file.display().to_string(),
                    );
                }
            });
        }
    }

    fn show_summary_modal(&mut self, ctx: &egui::Context) {
        let Some(summary) = self.summary.clone() else {
            return;
        };

        let title = if summary.all_succeeded() {
            "Conversion Complete"
        } else {
            "Completed with Errors"
        };

        let mut dismissed = false;
        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(format!("Converted: {}", summary.converted));
                if summary.failed > 0 {
                    ui.colored_label(
                        egui::Color32::ORANGE,
                        format!("Failed: {}", summary.failed),
                    );
                }
                if summary.converted > 0 {
                    ui.label(format!(
                        "Space saved: {}",
                        humansize::format_size(summary.space_saved(), humansize::DECIMAL)
                    ));
                }
                ui.label(format!("Elapsed: {}", format_duration(summary.elapsed)));
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        dismissed = true;
                    }
                });
            });

        if dismissed {
            self.summary = None;
        }
    }
}
