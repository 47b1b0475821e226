//! Live viewer for vdwsim scenarios
//!
//! Animates a scenario report by report and reloads it whenever the
//! scenario file is saved.

use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use vdwsim_core::{build_simulation, Running, ScenarioConfig, Simulation};

/// Drawn particle radius in world units
const PARTICLE_RADIUS: f32 = 0.15;

/// Open the viewer window and block until it is closed
pub fn run_viewer(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 760.0]),
        ..Default::default()
    };
    eframe::run_native(
        "vdwsim",
        options,
        Box::new(move |cc| Ok(Box::new(ViewApp::new(config_path, cc)))),
    )
    .map_err(|e| format!("viewer failed: {}", e))?;
    Ok(())
}

/// World-space rectangle kept in view
#[derive(Debug, Clone, Copy)]
struct ViewBounds {
    min: egui::Pos2,
    max: egui::Pos2,
}

impl ViewBounds {
    /// Bounding box of the initial lattice, padded by one spacing
    fn for_config(config: &ScenarioConfig) -> Self {
        let grid = &config.grid;
        let pad = grid.spacing as f32;
        let width = grid.rows.saturating_sub(1) as f32 * grid.spacing as f32;
        let height = grid.cols.saturating_sub(1) as f32 * grid.spacing as f32;
        Self {
            min: egui::pos2(-pad, -pad),
            max: egui::pos2(width + pad, height + pad),
        }
    }

    fn center(&self) -> egui::Pos2 {
        egui::pos2(
            0.5 * (self.min.x + self.max.x),
            0.5 * (self.min.y + self.max.y),
        )
    }
}

pub struct ViewApp {
    config_path: Option<PathBuf>,
    config: ScenarioConfig,
    sim_opt: Option<Simulation<Running>>,
    reports_done: usize,
    bounds: ViewBounds,
    last_load_error: Option<String>,
    playing: bool,
    speed_multiplier: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl ViewApp {
    pub fn new(config_path: Option<PathBuf>, _cc: &eframe::CreationContext<'_>) -> Self {
        // Watcher events carry absolute paths
        let config_path = config_path.map(|p| p.canonicalize().unwrap_or(p));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // Receiver may already be gone during shutdown
            let _ = tx.send(res);
        })
        .ok();

        if let (Some(w), Some(path)) = (watcher.as_mut(), config_path.as_ref()) {
            if let Err(e) = w.watch(path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", path.display(), e);
            }
        }

        let config = ScenarioConfig::default();
        let bounds = ViewBounds::for_config(&config);
        let mut app = Self {
            config_path,
            config,
            sim_opt: None,
            reports_done: 0,
            bounds,
            last_load_error: None,
            playing: false,
            speed_multiplier: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        };

        // Initial load
        app.reload();

        app
    }

    /// Re-read the scenario file (if any) and restart from t = 0
    fn reload(&mut self) {
        if let Some(path) = &self.config_path {
            match ScenarioConfig::load(path) {
                Ok(config) => self.config = config,
                Err(e) => {
                    self.fail(format!("{}", e));
                    return;
                }
            }
        }
        self.restart();
    }

    /// Restart the current scenario without touching the file
    fn restart(&mut self) {
        match build_simulation(&self.config) {
            Ok(sim) => {
                self.sim_opt = Some(sim.initialize());
                self.reports_done = 0;
                self.bounds = ViewBounds::for_config(&self.config);
                self.last_load_error = None;
            }
            Err(e) => self.fail(format!("{}", e)),
        }
    }

    fn fail(&mut self, message: String) {
        log::warn!("scenario failed to load: {}", message);
        self.last_load_error = Some(message);
        self.sim_opt = None;
        self.playing = false;
    }

    fn check_file_changes(&mut self) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if let Some(path) = &self.config_path {
                        if paths.contains(path) {
                            self.needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("file watcher error: {}", e);
                }
            }
        }

        if self.needs_reload {
            self.reload();
            self.needs_reload = false;
        }
    }

    /// Advance one report; returns true once the run is complete
    fn advance_report(&mut self) -> bool {
        let Some(sim) = self.sim_opt.as_mut() else {
            return true;
        };
        if sim.is_done() {
            return true;
        }
        sim.advance_report();
        self.reports_done += 1;
        sim.is_done()
    }
}

impl eframe::App for ViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    self.restart();
                    self.playing = false;
                }

                if ui.button("⏭ Step").clicked() {
                    self.advance_report();
                }

                ui.separator();

                ui.label("Speed:");
                ui.add(egui::Slider::new(&mut self.speed_multiplier, 1.0..=20.0));

                ui.separator();

                if let Some(sim) = &self.sim_opt {
                    ui.label(format!(
                        "t = {:.2}   report {} / {}",
                        sim.time(),
                        self.reports_done,
                        sim.params().reports
                    ));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let rect = ui.max_rect();
            let painter = ui.painter();

            // Fit the world bounds into the panel, y pointing up
            let world = self.bounds;
            let world_w = (world.max.x - world.min.x).max(f32::EPSILON);
            let world_h = (world.max.y - world.min.y).max(f32::EPSILON);
            let scale = (rect.width() / world_w).min(rect.height() / world_h);
            let origin = rect.center();
            let world_center = world.center();
            let to_screen = |x: f64, y: f64| {
                origin
                    + egui::vec2(
                        (x as f32 - world_center.x) * scale,
                        -(y as f32 - world_center.y) * scale,
                    )
            };

            if let Some(sim) = &self.sim_opt {
                let radius = (PARTICLE_RADIUS * scale).max(2.0);
                for pos in sim.state().positions() {
                    if !pos.is_finite() {
                        continue;
                    }
                    let screen_pos = to_screen(pos.x, pos.y);
                    painter.circle_filled(screen_pos, radius, egui::Color32::LIGHT_BLUE);
                    painter.circle_stroke(
                        screen_pos,
                        radius,
                        egui::Stroke::new(1.0, egui::Color32::BLUE),
                    );
                }
            }

            if let Some(ref error) = self.last_load_error {
                ui.vertical_centered(|ui| {
                    ui.add_space(rect.height() * 0.4);
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error))
                            .color(egui::Color32::RED)
                            .size(16.0),
                    );
                });
            }
        });

        if self.playing {
            let reports_per_frame = self.speed_multiplier.max(1.0).round() as usize;
            for _ in 0..reports_per_frame {
                if self.advance_report() {
                    self.playing = false;
                    break;
                }
            }
        }

        if self.playing {
            ctx.request_repaint();
        }
    }
}
