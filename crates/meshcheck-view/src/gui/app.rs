use anyhow::Result;
use egui::{self, FontId};
use egui_wgpu::winit::Painter;
use egui_wgpu::{RendererOptions, WgpuConfiguration, WgpuSetup, WgpuSetupCreateNew};
use egui_winit::State as EguiWinitState;
use meshcheck_view::ViewerSession;
use meshcheck_view::viewer::{
    Align2 as ViewerAlign2, Color32, OverlayPainter, Point2, PointerButton, Rect, Stroke, Vec2,
    ViewerEvent,
};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};

/// egui reports wheel motion in points; one detent is this many.
const SCROLL_POINTS_PER_NOTCH: f32 = 50.0;

const BUTTONS: [(egui::PointerButton, PointerButton); 3] = [
    (egui::PointerButton::Primary, PointerButton::Primary),
    (egui::PointerButton::Secondary, PointerButton::Secondary),
    (egui::PointerButton::Middle, PointerButton::Middle),
];

pub fn run_gui(session: ViewerSession) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = event_loop
        .create_window(
            winit::window::Window::default_attributes()
                .with_title("meshcheck")
                .with_inner_size(LogicalSize::new(1100.0, 720.0))
                .with_min_inner_size(LogicalSize::new(800.0, 600.0)),
        )
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;
    let window = Arc::new(window);

    let egui_ctx = egui::Context::default();
    let mut painter = create_painter(egui_ctx.clone())?;
    pollster::block_on(painter.set_window(egui::ViewportId::ROOT, Some(window.clone())))
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    let mut egui_state = EguiWinitState::new(
        egui_ctx.clone(),
        egui::ViewportId::ROOT,
        &event_loop,
        Some(window.scale_factor() as f32),
        window.theme(),
        painter.max_texture_side(),
    );

    let mut app = MeshcheckApp::new(session);

    let clear_color = egui_ctx.style().visuals.window_fill;
    let [r, g, b, a] = clear_color.to_array();
    let clear_color = [
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    ];

    #[allow(deprecated)]
    event_loop
        .run(move |event, event_loop| {
            event_loop.set_control_flow(ControlFlow::Wait);
            match event {
                Event::WindowEvent { event, window_id } if window_id == window.id() => {
                    if matches!(event, WindowEvent::CloseRequested) {
                        event_loop.exit();
                        return;
                    }

                    let response = egui_state.on_window_event(&window, &event);
                    if response.repaint {
                        window.request_redraw();
                    }

                    match event {
                        WindowEvent::Resized(size) => {
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::ScaleFactorChanged { .. } => {
                            let size = window.inner_size();
                            if let (Some(width), Some(height)) =
                                (NonZeroU32::new(size.width), NonZeroU32::new(size.height))
                            {
                                painter.on_window_resized(egui::ViewportId::ROOT, width, height);
                            }
                        }
                        WindowEvent::RedrawRequested => {
                            let raw_input = egui_state.take_egui_input(&window);
                            let full_output = egui_ctx.run(raw_input, |ctx| {
                                app.ui(ctx);
                            });

                            egui_state.handle_platform_output(&window, full_output.platform_output);

                            let clipped_primitives = egui_ctx
                                .tessellate(full_output.shapes, full_output.pixels_per_point);
                            let _ = painter.paint_and_update_textures(
                                egui::ViewportId::ROOT,
                                full_output.pixels_per_point,
                                clear_color,
                                &clipped_primitives,
                                &full_output.textures_delta,
                                Vec::new(),
                            );

                            let repaint = full_output
                                .viewport_output
                                .get(&egui::ViewportId::ROOT)
                                .is_some_and(|output| output.repaint_delay.is_zero());
                            if repaint {
                                window.request_redraw();
                            }
                        }
                        _ => {}
                    }
                }
                _ => {}
            }
        })
        .map_err(|err| anyhow::anyhow!(err.to_string()))?;

    Ok(())
}

fn create_painter(ctx: egui::Context) -> Result<Painter> {
    let mut configuration = WgpuConfiguration::default();
    let power_preference = match std::env::var("MESHCHECK_POWER_PREF") {
        Ok(value) => match value.trim().to_ascii_lowercase().as_str() {
            "high" | "high_performance" | "high-performance" => {
                wgpu::PowerPreference::HighPerformance
            }
            "default" => wgpu::PowerPreference::default(),
            _ => wgpu::PowerPreference::LowPower,
        },
        Err(_) => wgpu::PowerPreference::LowPower,
    };
    debug!(?power_preference, "creating wgpu painter");
    configuration.wgpu_setup = WgpuSetup::CreateNew(WgpuSetupCreateNew {
        power_preference,
        device_descriptor: Arc::new(|adapter| {
            let required_limits =
                wgpu::Limits::downlevel_webgl2_defaults().using_resolution(adapter.limits());
            wgpu::DeviceDescriptor {
                label: Some("meshcheck-view"),
                required_features: wgpu::Features::empty(),
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::default(),
            }
        }),
        ..Default::default()
    });

    let painter = pollster::block_on(Painter::new(
        ctx,
        configuration,
        false,
        RendererOptions::default(),
    ));
    Ok(painter)
}

struct MeshcheckApp {
    session: ViewerSession,
    last_pointer: Option<Point2>,
}

impl MeshcheckApp {
    fn new(session: ViewerSession) -> Self {
        Self {
            session,
            last_pointer: None,
        }
    }

    fn ui(&mut self, ctx: &egui::Context) {
        self.handle_loads(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing = egui::vec2(10.0, 0.0);
                ui.heading("meshcheck");
                ui.add(egui::Separator::default().vertical());

                let can_reload = self.session.source().is_some();
                if ui
                    .add_enabled(can_reload, egui::Button::new("Reload (R)"))
                    .clicked()
                {
                    let _ = self.session.reload();
                }
                if ui.button("Reset View").clicked() {
                    self.session.reset_view();
                }
            });
        });

        egui::SidePanel::left("side_panel")
            .resizable(false)
            .exact_width(220.0)
            .show(ctx, |ui| {
                ui.spacing_mut().item_spacing = egui::vec2(8.0, 8.0);
                ui.add_space(12.0);
                ui.group(|ui| self.view_panel(ui));
                ui.group(|ui| self.display_panel(ui));
                ui.add_space(8.0);
                ui.label("Drop a mesh file or paste mesh JSON (Ctrl+V).");
            });

        egui::TopBottomPanel::bottom("bottom_bar").show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.label(self.session.status());
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let (rect, _response) =
                ui.allocate_exact_size(available, egui::Sense::click_and_drag());
            self.draw_viewport(ctx, ui, rect);
        });
    }

    fn view_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("View");
        if let Some(path) = self.session.source() {
            ui.label(path.display().to_string());
        }
        for (key, value) in self.session.info_rows() {
            ui.horizontal(|ui| {
                ui.label(format!("{key}:"));
                ui.label(value);
            });
        }
    }

    fn display_panel(&mut self, ui: &mut egui::Ui) {
        ui.heading("Display");
        let display = self.session.display_mut();
        ui.checkbox(&mut display.normals, "Normals");
        ui.checkbox(&mut display.markers, "Winding markers");
        ui.checkbox(&mut display.face_labels, "Face labels");
        ui.checkbox(&mut display.vertex_labels, "Vertex labels");
        ui.checkbox(&mut display.axes, "Axes");
        ui.checkbox(&mut display.cull_back_faces, "Hide back faces");
    }

    /// Dropped files, pasted text and the reload key. Failures are logged
    /// by the session and shown in the status bar.
    fn handle_loads(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped {
            if let Some(path) = &file.path {
                let _ = self.session.load_path(path);
            } else if let Some(bytes) = &file.bytes {
                let text = String::from_utf8_lossy(bytes);
                let _ = self.session.load_text(&text, &file.name);
            }
        }

        let pasted: Vec<String> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Paste(text) => Some(text.clone()),
                    _ => None,
                })
                .collect()
        });
        for text in pasted {
            let _ = self.session.load_text(&text, "clipboard");
        }

        if ctx.input(|i| i.key_pressed(egui::Key::R)) {
            let _ = self.session.reload();
        }
    }

    fn draw_viewport(&mut self, ctx: &egui::Context, ui: &mut egui::Ui, rect: egui::Rect) {
        let pointer_pos = ctx.input(|i| i.pointer.interact_pos());
        let hovered = pointer_pos.map(|pos| rect.contains(pos)).unwrap_or(false);

        self.session.handle_event(ViewerEvent::Resize {
            width: rect.width(),
            height: rect.height(),
        });
        for event in self.update_input(ctx, rect, hovered) {
            if self.session.handle_event(event) {
                ctx.request_repaint();
            }
        }
        if self.session.is_dragging() {
            ctx.request_repaint();
        }

        let viewport_rect = Rect::from_min_size(
            Point2::new(0.0, 0.0),
            Vec2::new(rect.width(), rect.height()),
        );
        let overlay_painter = ui.painter().with_clip_rect(rect);
        let mut overlay = EguiOverlayPainter::new(&overlay_painter, rect.min.to_vec2());
        self.session.paint(&mut overlay, viewport_rect);
    }

    /// Translates this frame's egui pointer state into viewer events, in
    /// viewport-local pixels.
    fn update_input(
        &mut self,
        ctx: &egui::Context,
        rect: egui::Rect,
        hovered: bool,
    ) -> Vec<ViewerEvent> {
        let mut events = Vec::new();
        let pointer_pos = ctx
            .input(|i| i.pointer.latest_pos())
            .map(|pos| Point2::new(pos.x - rect.min.x, pos.y - rect.min.y));
        let pos = pointer_pos.or(self.last_pointer).unwrap_or_default();

        for (egui_button, button) in BUTTONS {
            if hovered && ctx.input(|i| i.pointer.button_pressed(egui_button)) {
                events.push(ViewerEvent::ButtonPress { button, pos });
            }
        }

        if pointer_pos.is_some() && pointer_pos != self.last_pointer {
            events.push(ViewerEvent::PointerMove { pos });
        }
        if pointer_pos.is_some() {
            self.last_pointer = pointer_pos;
        }

        for (egui_button, button) in BUTTONS {
            if ctx.input(|i| i.pointer.button_released(egui_button)) {
                events.push(ViewerEvent::ButtonRelease { button, pos });
            }
        }

        if hovered {
            let scroll = ctx.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                events.push(ViewerEvent::Scroll {
                    notches: scroll / SCROLL_POINTS_PER_NOTCH,
                });
            }
        }
        events
    }
}

struct EguiOverlayPainter<'a> {
    painter: &'a egui::Painter,
    offset: egui::Vec2,
}

impl<'a> EguiOverlayPainter<'a> {
    fn new(painter: &'a egui::Painter, offset: egui::Vec2) -> Self {
        Self { painter, offset }
    }
}

impl OverlayPainter for EguiOverlayPainter<'_> {
    fn rect_gradient(&mut self, rect: Rect, top: Color32, bottom: Color32) {
        let rect = to_egui_rect(rect, self.offset);
        let top = to_egui_color(top);
        let bottom = to_egui_color(bottom);
        let mut mesh = egui::Mesh::default();
        mesh.colored_vertex(rect.left_top(), top);
        mesh.colored_vertex(rect.right_top(), top);
        mesh.colored_vertex(rect.right_bottom(), bottom);
        mesh.colored_vertex(rect.left_bottom(), bottom);
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn line_segment(&mut self, start: Point2, end: Point2, stroke: Stroke) {
        let points = [
            to_egui_pos(start, self.offset),
            to_egui_pos(end, self.offset),
        ];
        self.painter.line_segment(points, to_egui_stroke(stroke));
    }

    fn polygon(&mut self, points: Vec<Point2>, fill: Color32, stroke: Stroke) {
        let points: Vec<egui::Pos2> =
            points.into_iter().map(|p| to_egui_pos(p, self.offset)).collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            to_egui_color(fill),
            to_egui_stroke(stroke),
        ));
    }

    fn text(&mut self, pos: Point2, align: ViewerAlign2, text: String, size: f32, color: Color32) {
        let pos = to_egui_pos(pos, self.offset);
        let align = match align {
            ViewerAlign2::LeftBottom => egui::Align2::LEFT_BOTTOM,
            ViewerAlign2::CenterCenter => egui::Align2::CENTER_CENTER,
        };
        self.painter.text(
            pos,
            align,
            text,
            FontId::proportional(size),
            to_egui_color(color),
        );
    }

    fn rotated_text(&mut self, center: Point2, angle: f32, text: String, size: f32, color: Color32) {
        let color = to_egui_color(color);
        let galley = self
            .painter
            .layout_no_wrap(text, FontId::proportional(size), color);
        // Text shapes rotate about their top-left corner.
        let half = galley.size() * 0.5;
        let top_left = to_egui_pos(center, self.offset) - egui::emath::Rot2::from_angle(angle) * half;
        self.painter
            .add(egui::epaint::TextShape::new(top_left, galley, color).with_angle(angle));
    }
}

fn to_egui_pos(pos: Point2, offset: egui::Vec2) -> egui::Pos2 {
    egui::pos2(pos.x + offset.x, pos.y + offset.y)
}

fn to_egui_rect(rect: Rect, offset: egui::Vec2) -> egui::Rect {
    let min = to_egui_pos(rect.min, offset);
    let max = to_egui_pos(rect.max, offset);
    egui::Rect::from_min_max(min, max)
}

fn to_egui_color(color: Color32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

fn to_egui_stroke(stroke: Stroke) -> egui::Stroke {
    egui::Stroke::new(stroke.width, to_egui_color(stroke.color))
}
