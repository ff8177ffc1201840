//! Interactive viewer for circlesim scenes
//!
//! Plays a scene in a window, spawns bodies on click, drags the cursor body
//! with the pointer and reloads the scene whenever the file changes.

use circlesim_core::{
    build_simulation_context_from_source, drive_cursor, get_body_states, spawn_body,
    step_simulation_with_dt, Color, Environment, SimulationContext, Vector2,
};
use eframe::egui;
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

/// Frame times above this are clamped before reaching the engine
const MAX_FRAME_DT: f32 = 1.0 / 30.0;

/// Time step for the next tick, also used to derive the cursor's velocity
fn tick_dt(ctx: Option<&SimulationContext>, real_time: bool, frame_dt: f32) -> f32 {
    match (ctx, real_time) {
        (Some(ctx), false) => ctx.dt,
        _ => frame_dt.min(MAX_FRAME_DT),
    }
}

/// Maps world coordinates (y grows downward) into a screen rectangle
struct View {
    origin: egui::Pos2,
    scale: f32,
    left: f32,
    top: f32,
}

impl View {
    fn fit(env: &Environment, rect: egui::Rect) -> Self {
        let scale = (rect.width() / env.width()).min(rect.height() / env.height()) * 0.95;
        let extent = egui::vec2(env.width() * scale, env.height() * scale);
        Self {
            origin: rect.center() - extent * 0.5,
            scale,
            left: env.left,
            top: env.top,
        }
    }

    fn to_screen(&self, p: Vector2) -> egui::Pos2 {
        self.origin + egui::vec2((p.x - self.left) * self.scale, (p.y - self.top) * self.scale)
    }

    fn to_world(&self, p: egui::Pos2) -> Vector2 {
        let offset = p - self.origin;
        Vector2::new(offset.x / self.scale + self.left, offset.y / self.scale + self.top)
    }
}

fn color32(c: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

pub struct SandboxApp {
    source_path: PathBuf,
    source_text: String,
    ctx_opt: Option<SimulationContext>,
    last_load_error: Option<String>,
    playing: bool,
    real_time: bool,
    speed_multiplier: f32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
    needs_reload: bool,
}

impl SandboxApp {
    pub fn new(source_path: PathBuf, _cc: &eframe::CreationContext<'_>) -> Self {
        let source_text = std::fs::read_to_string(&source_path)
            .unwrap_or_else(|e| format!("Error reading file: {}", e));

        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = tx.send(res);
        })
        .ok();

        if let Some(ref mut w) = watcher {
            if let Err(e) = w.watch(&source_path, notify::RecursiveMode::NonRecursive) {
                tracing::warn!(error = %e, "file watching disabled");
            }
        }

        let mut app = Self {
            source_path,
            source_text,
            ctx_opt: None,
            last_load_error: None,
            playing: false,
            real_time: true,
            speed_multiplier: 1.0,
            file_watcher: watcher,
            file_receiver: rx,
            needs_reload: false,
        };

        app.reload_context();

        app
    }

    fn reload_context(&mut self) {
        match build_simulation_context_from_source(&self.source_text) {
            Ok(ctx) => {
                tracing::info!(
                    path = %self.source_path.display(),
                    bodies = ctx.simulation.bodies.len(),
                    "scene loaded"
                );
                self.ctx_opt = Some(ctx);
                self.last_load_error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "scene failed to load");
                self.last_load_error = Some(format!("{}", e));
                self.ctx_opt = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if paths.contains(&self.source_path) {
                        if let Ok(new_text) = std::fs::read_to_string(&self.source_path) {
                            self.source_text = new_text;
                            self.needs_reload = true;
                        }
                    }
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "file watcher error"),
            }
        }

        if self.needs_reload {
            self.reload_context();
            self.needs_reload = false;
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui, frame_dt: f32) {
        ui.horizontal(|ui| {
            if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                self.playing = !self.playing;
            }

            if ui.button("⏮ Reset").clicked() {
                self.reload_context();
                self.playing = false;
            }

            if ui.button("⏭ Step").clicked() {
                let dt = self.step_dt(frame_dt);
                if let Some(ref mut ctx) = self.ctx_opt {
                    step_simulation_with_dt(ctx, dt);
                }
            }

            ui.separator();

            ui.label("Speed:");
            ui.add(egui::Slider::new(&mut self.speed_multiplier, 0.1..=10.0));
            ui.checkbox(&mut self.real_time, "Real-time dt");

            ui.separator();

            if let Some(ref ctx) = self.ctx_opt {
                ui.label(format!(
                    "Step: {} / {}  Bodies: {}",
                    ctx.current_step,
                    ctx.max_steps,
                    ctx.simulation.bodies.len()
                ));
            }
        });
    }

    fn step_dt(&self, frame_dt: f32) -> f32 {
        tick_dt(self.ctx_opt.as_ref(), self.real_time, frame_dt)
    }

    fn canvas(&mut self, ui: &mut egui::Ui, frame_dt: f32) {
        let rect = ui.max_rect();
        let response = ui.allocate_rect(rect, egui::Sense::click());
        let painter = ui.painter_at(rect);
        let dt = self.step_dt(frame_dt);

        let Some(ref mut ctx) = self.ctx_opt else {
            return;
        };

        let view = View::fit(&ctx.environment, rect);

        if let Some(pointer) = response.hover_pos() {
            drive_cursor(ctx, view.to_world(pointer), dt);
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                match spawn_body(ctx, view.to_world(pointer)) {
                    Ok(evicted) if !evicted.is_empty() => {
                        tracing::debug!(evicted = evicted.len(), "evicted oldest bodies");
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!(error = %e, "spawn failed"),
                }
            }
        }

        let env = ctx.environment;
        painter.rect_stroke(
            egui::Rect::from_two_pos(
                view.to_screen(Vector2::new(env.left, env.top)),
                view.to_screen(Vector2::new(env.right, env.bottom)),
            ),
            0.0,
            egui::Stroke::new(1.0, egui::Color32::DARK_GRAY),
        );

        for segment in &ctx.simulation.segments {
            painter.line_segment(
                [view.to_screen(segment.start), view.to_screen(segment.end)],
                egui::Stroke::new(2.0, color32(segment.color)),
            );
        }

        for body in get_body_states(ctx) {
            let center = view.to_screen(body.position);
            let radius = (body.radius * view.scale).max(1.0);
            painter.circle_stroke(center, radius, egui::Stroke::new(1.5, color32(body.color)));
        }
    }
}

impl eframe::App for SandboxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        let frame_dt = ctx.input(|i| i.unstable_dt);

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            self.controls(ui, frame_dt);
        });

        if let Some(ref error) = self.last_load_error {
            egui::TopBottomPanel::bottom("errors").show(ctx, |ui| {
                ui.set_max_height(100.0);
                ui.label(egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui, frame_dt);
        });

        if self.playing {
            let dt = self.step_dt(frame_dt);
            if let Some(ref mut sim_ctx) = self.ctx_opt {
                let steps_per_frame = self.speed_multiplier.max(0.1).round().max(1.0) as usize;
                for _ in 0..steps_per_frame {
                    if step_simulation_with_dt(sim_ctx, dt) {
                        self.playing = false;
                        break;
                    }
                }
            }
            ctx.request_repaint();
        }
    }
}
