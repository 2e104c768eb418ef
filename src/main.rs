//*** START FILE: src/main.rs ***//
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::{egui, App, NativeOptions};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, Level};

use textaug_gui::config::{load_config_or_default, Config, DEFAULT_CONFIG_FILE};
use textaug_gui::{read_local_file, HttpBackend, UiController};

struct TextAugApp {
    controller: UiController<HttpBackend>,
    config: Config,
    config_error: Option<String>,
}

impl TextAugApp {
    fn new(
        cc: &eframe::CreationContext<'_>,
        mut controller: UiController<HttpBackend>,
        config: Config,
        config_error: Option<String>,
    ) -> Self {
        // Workers poke the window when a response lands so it repaints without input.
        let ctx = cc.egui_ctx.clone();
        controller.set_waker(Arc::new(move || ctx.request_repaint()));
        Self { controller, config, config_error }
    }

    fn pick_and_upload(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Text", &["txt"])
            .add_filter("All files", &["*"])
            .pick_file()
        else {
            return;
        };
        match read_local_file(&path) {
            Ok((file_name, bytes)) => {
                self.controller.upload_file(&file_name, bytes);
            }
            // same as a failed upload: logged, nothing on screen changes
            Err(e) => error!(error = %e, "Error uploading file"),
        }
    }

    fn side_panel_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Controls"); ui.separator();
        ui.collapsing("Configuration", |ui| {
            if let Some(err) = &self.config_error {
                ui.colored_label(egui::Color32::RED, format!("Config: {}", err));
            }
            ui.label(format!("Server: {}", self.config.server_url));
            ui.label(format!("Words per sample: {}", self.config.sample_words));
        });
        ui.separator();

        ui.label("Dataset");
        ui.horizontal(|ui| {
            if ui.button("Upload File...").clicked() { self.pick_and_upload(); }
            if ui.button("Use Sample Dataset").clicked() { self.controller.use_builtin_sample(); }
        });
        let file_label = match &self.controller.session().current_file_path {
            Some(p) => format!("File: {}", p),
            None => "No file selected".to_string(),
        };
        ui.label(file_label);
        if ui.button("Get New Sample").clicked() { self.controller.get_sample(); }
        if let Some(segment) = &self.controller.session().current_segment {
            if let (Some(kind), Some(id)) = (&segment.segment_type, &segment.segment_id) {
                ui.small(format!("{} {}", kind, id));
            }
        }
        ui.separator();

        ui.label("Preprocessing");
        let form = &mut self.controller.form;
        ui.checkbox(&mut form.remove_punctuation, "Remove punctuation");
        ui.checkbox(&mut form.tokenize, "Tokenize");
        let pad_changed = ui.checkbox(&mut form.pad_text, "Pad text").changed();
        if pad_changed { self.controller.toggle_padding_fields(); }
        if self.controller.visibility().pad_length_group {
            ui.horizontal(|ui| {
                ui.label("Pad length:");
                ui.add(egui::TextEdit::singleline(&mut self.controller.form.pad_length).desired_width(60.0));
            });
        }
        if ui.button("Apply Preprocessing").clicked() { self.controller.apply_preprocessing(); }
        ui.separator();

        ui.label("Augmentation");
        let form = &mut self.controller.form;
        let ri_changed = ui.checkbox(&mut form.random_insertion, "Random insertion").changed();
        let sr_changed = ui.checkbox(&mut form.synonym_replacement, "Synonym replacement").changed();
        if ri_changed || sr_changed { self.controller.toggle_augment_params(); }
        if self.controller.visibility().augment_params_group {
            let form = &mut self.controller.form;
            ui.horizontal(|ui| {
                ui.label("Insertions:");
                ui.add(egui::TextEdit::singleline(&mut form.random_insertion_count).desired_width(40.0));
            });
            ui.horizontal(|ui| {
                ui.label("Replacements:");
                ui.add(egui::TextEdit::singleline(&mut form.synonym_replacement_count).desired_width(40.0));
            });
        }
        if ui.button("Apply Augmentation").clicked() { self.controller.apply_augmentation(); }
        ui.separator();

        if self.controller.is_busy() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("{} request(s) in flight", self.controller.in_flight()));
            });
        }
    }

    fn show_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.alert().map(str::to_string) else { return; };
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if ui.button("OK").clicked() { self.controller.take_alert(); }
            });
    }
}

fn text_column(ui: &mut egui::Ui, id: &str, heading: &str, text: &str) {
    egui::ScrollArea::both().id_source(id).auto_shrink([false, false]).show(ui, |ui| {
        ui.heading(heading);
        ui.separator();
        if text.is_empty() {
            ui.label("Get a sample to see text here.");
        } else {
            let mut s_display = text.to_string();
            ui.add(egui::TextEdit::multiline(&mut s_display)
                .desired_width(f32::INFINITY)
                .interactive(false)
                .frame(true));
        }
    });
}

impl App for TextAugApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.controller.poll();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Exit").clicked() { ctx.send_viewport_cmd(egui::ViewportCommand::Close); }
                });
            });
        });

        // the alert blocks every other control until acknowledged
        let blocked = self.controller.alert().is_some();
        egui::SidePanel::left("side_panel_left").min_width(250.0).default_width(300.0).show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| self.side_panel_controls(ui));
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let regions = self.controller.regions();
            ui.columns(3, |columns| {
                text_column(&mut columns[0], "original_text_scroll", "Original Text", &regions.original);
                text_column(&mut columns[1], "preprocessed_text_scroll", "Preprocessed Text", &regions.preprocessed);
                text_column(&mut columns[2], "augmented_text_scroll", "Augmented Text", &regions.augmented);
            });
        });

        self.show_alert(ctx);

        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let (config, config_error) = match load_config_or_default(DEFAULT_CONFIG_FILE) {
        Ok(config) => (config, None),
        Err(err_msg) => {
            error!("Error loading {}: {}", DEFAULT_CONFIG_FILE, err_msg);
            (Config::default(), Some(err_msg))
        }
    };
    info!(
        from_file = Path::new(DEFAULT_CONFIG_FILE).exists(),
        server = %config.server_url,
        "Configuration ready"
    );

    let backend = match HttpBackend::new(&config) {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = %e, "Failed to create HTTP client");
            std::process::exit(1);
        }
    };
    let controller = UiController::new(backend, &config);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([900.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Text Preprocessing & Augmentation",
        options,
        Box::new(move |cc| Box::new(TextAugApp::new(cc, controller, config, config_error))),
    )
}
//*** END FILE: src/main.rs ***//
