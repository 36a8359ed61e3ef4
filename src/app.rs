use crate::{
    document::Document,
    element::{Element, ElementId, ElementKind},
    highlight::Highlighter,
    html, storage,
};
use egui::{Color32, CornerRadius, Pos2, Rect, Sense, Stroke, pos2, vec2};
use std::path::PathBuf;
use tracing::warn;

pub(crate) struct DesignerApp {
    palette_open: bool,
    document: Document,
    /// Zero-or-one element is selected at a time.
    selected: Option<ElementId>,
    // Drag state for spawning from the palette
    spawning: Option<ElementKind>,
    /// Page HTML, re-derived every frame from the document.
    generated: String,
    // Settings
    grid_size: f32,
    show_grid: bool,
    // Clipboard for copy/paste
    clipboard: Option<Element>,
    /// Current project file path (for Save)
    current_file: Option<PathBuf>,
    /// Error/status message to display
    status_message: Option<(String, std::time::Instant)>,
    /// Pending name/value for the inspector's custom attribute row
    custom_prop_name: String,
    custom_prop_value: String,
    /// Syntax highlighter for the HTML panel
    highlighter: Highlighter,
    /// Whether to highlight the HTML output (can be toggled for performance)
    syntax_highlighting: bool,
    /// Active tab in the right panel (0 = Inspector, 1 = HTML)
    right_panel_tab: usize,
}

impl Default for DesignerApp {
    fn default() -> Self {
        Self {
            palette_open: true,
            document: Document::default(),
            selected: None,
            spawning: None,
            generated: String::new(),
            grid_size: 1.0,
            show_grid: false,
            clipboard: None,
            current_file: None,
            status_message: None,
            custom_prop_name: String::new(),
            custom_prop_value: String::new(),
            highlighter: Highlighter::new(),
            syntax_highlighting: true,
            right_panel_tab: 0,
        }
    }
}

impl DesignerApp {
    /// Drops a new element onto the canvas and makes it the sole selection.
    fn spawn_element(&mut self, kind: ElementKind, at_global: Pos2, canvas_origin: Pos2) {
        let size = kind.default_size();
        let vecpos = at_global - canvas_origin - size * 0.5; // local to canvas
        let pos = self.snap_pos(pos2(vecpos.x, vecpos.y));
        let id = self.document.add_element(kind, pos);
        self.selected = Some(id);
    }

    fn selected_mut(&mut self) -> Option<&mut Element> {
        let id = self.selected?;
        self.document.get_mut(id)
    }

    fn delete_selected(&mut self) {
        if let Some(id) = self.selected.take() {
            self.document.remove(id);
        }
    }

    fn duplicate_selected(&mut self) {
        if let Some(id) = self.selected
            && let Some(copy) = self.document.duplicate(id)
        {
            self.selected = Some(copy);
        }
    }

    fn paste_clipboard(&mut self) {
        if let Some(el) = self.clipboard.clone() {
            let id = self
                .document
                .add_element(el.kind().clone(), el.pos + vec2(20.0, 20.0));
            if let Some(pasted) = self.document.get_mut(id) {
                pasted.size = el.size;
                pasted.props = el.props;
            }
            self.selected = Some(id);
        }
    }

    /// Save design to file
    fn save_project(&mut self, path: PathBuf) {
        match storage::save(&path, &self.document) {
            Ok(()) => {
                self.current_file = Some(path.clone());
                self.set_status(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "save failed");
                self.set_status(format!("Save failed: {e}"));
            }
        }
    }

    /// Load design from file. The current document is untouched on failure.
    fn load_project(&mut self, path: PathBuf) {
        match storage::load(&path) {
            Ok(document) => {
                self.document = document;
                self.selected = None;
                self.current_file = Some(path.clone());
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "load failed");
                self.set_status(format!("Load failed: {e}"));
            }
        }
    }

    fn export_html(&mut self, path: PathBuf) {
        match storage::export_html(&path, &self.generated) {
            Ok(()) => self.set_status(format!("Exported {}", path.display())),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "export failed");
                self.set_status(format!("Export failed: {e}"));
            }
        }
    }

    /// Set a status message that will auto-clear after a few seconds
    fn set_status(&mut self, msg: String) {
        self.status_message = Some((msg, std::time::Instant::now()));
    }

    fn snap_pos(&self, p: Pos2) -> Pos2 {
        pos2(
            (p.x / self.grid_size).round() * self.grid_size,
            (p.y / self.grid_size).round() * self.grid_size,
        )
    }

    fn canvas_ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            // Fixed canvas mirroring the exported page
            let canvas = Rect::from_min_size(ui.min_rect().min, self.document.canvas_size);

            let (resp, painter) = ui.allocate_painter(canvas.size(), Sense::hover());
            painter.rect_filled(canvas, 0.0, Color32::from_gray(245));

            if self.show_grid {
                self.draw_grid(ui, canvas);
            }

            for i in 0..self.document.elements.len() {
                let el = &mut self.document.elements[i];
                Self::draw_element(ui, canvas, self.grid_size, &mut self.selected, el);
            }

            // --- Drag ghost + drop ---
            if let Some(kind) = self.spawning.clone() {
                if let Some(mouse) = ui.ctx().pointer_interact_pos() {
                    let ghost = Rect::from_center_size(mouse, kind.default_size());
                    let layer =
                        egui::LayerId::new(egui::Order::Tooltip, egui::Id::new("drop_ghost"));
                    let painter = ui.ctx().layer_painter(layer);
                    painter.rect_filled(ghost, 4.0, kind.fill_color().gamma_multiply(0.6));
                    painter.rect_stroke(
                        ghost,
                        CornerRadius::same(4),
                        Stroke::new(1.0, Color32::LIGHT_BLUE),
                        egui::StrokeKind::Outside,
                    );
                }

                if ui.input(|i| i.pointer.any_released()) {
                    if let Some(pos) = ui.ctx().pointer_interact_pos()
                        && canvas.contains(pos)
                    {
                        self.spawn_element(kind, pos, canvas.min);
                    }
                    self.spawning = None;
                }
            }

            if resp.clicked() {
                self.selected = None;
            }
        });
    }

    fn draw_grid(&self, ui: &mut egui::Ui, rect: Rect) {
        let painter = ui.painter_at(rect);
        let g = self.grid_size;
        let cols = (rect.width() / g) as i32;
        let rows = (rect.height() / g) as i32;
        for c in 0..=cols {
            let x = rect.left() + c as f32 * g;
            painter.line_segment(
                [pos2(x, rect.top()), pos2(x, rect.bottom())],
                Stroke::new(1.0, Color32::from_gray(220)),
            );
        }
        for r in 0..=rows {
            let y = rect.top() + r as f32 * g;
            painter.line_segment(
                [pos2(rect.left(), y), pos2(rect.right(), y)],
                Stroke::new(1.0, Color32::from_gray(220)),
            );
        }
    }

    fn draw_element(
        ui: &mut egui::Ui,
        canvas_rect: Rect,
        grid: f32,
        selected: &mut Option<ElementId>,
        el: &mut Element,
    ) {
        let rect = Rect::from_min_size(canvas_rect.min + el.pos.to_vec2(), el.size);
        let is_selected = *selected == Some(el.id);

        let painter = ui.painter_at(canvas_rect);
        let fill = if is_selected {
            el.kind().fill_color().gamma_multiply(1.1)
        } else {
            el.kind().fill_color()
        };
        painter.rect_filled(rect, 2.0, fill);
        let stroke = if is_selected {
            Stroke::new(2.0, Color32::LIGHT_BLUE)
        } else {
            Stroke::new(1.0, Color32::from_gray(90))
        };
        painter.rect_stroke(rect, CornerRadius::same(2), stroke, egui::StrokeKind::Outside);

        // Tag badge + element text
        painter.text(
            rect.min + vec2(6.0, 4.0),
            egui::Align2::LEFT_TOP,
            format!("<{}>", html::tag_name(el.kind())),
            egui::FontId::monospace(10.0),
            Color32::from_gray(110),
        );
        painter.text(
            rect.min + vec2(8.0, 20.0),
            egui::Align2::LEFT_TOP,
            &el.props.text,
            egui::FontId::proportional(13.0),
            Color32::from_gray(40),
        );

        // Click selects, drag moves
        let id = ui.make_persistent_id(("element", el.id));
        let resp = ui.interact(rect, id, Sense::click_and_drag());
        if resp.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
        if resp.clicked() || resp.drag_started() {
            *selected = Some(el.id);
        }
        let drag_delta = resp.drag_delta();
        if drag_delta != egui::Vec2::ZERO {
            el.pos += drag_delta;
            el.pos = pos2(
                (el.pos.x / grid).round() * grid,
                (el.pos.y / grid).round() * grid,
            );
            let maxx = (canvas_rect.width() - el.size.x).max(0.0);
            let maxy = (canvas_rect.height() - el.size.y).max(0.0);
            el.pos.x = el.pos.x.clamp(0.0, maxx);
            el.pos.y = el.pos.y.clamp(0.0, maxy);
        }

        // Bottom-right resize handle, only while selected
        if is_selected {
            let hs = 10.0;
            let handle = Rect::from_min_size(rect.max - vec2(hs, hs), vec2(hs, hs));
            let rid = ui.make_persistent_id(("resize", el.id));
            let rresp = ui.interact(handle, rid, Sense::click_and_drag());
            if rresp.hovered() {
                ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeNwSe);
            }
            if rresp.dragged() {
                el.size += rresp.drag_delta();
                el.size.x = el.size.x.max(20.0).min(canvas_rect.width());
                el.size.y = el.size.y.max(16.0).min(canvas_rect.height());
            }
            ui.painter()
                .rect_filled(handle, 2.0, Color32::from_rgb(100, 160, 255));
        }
    }

    fn palette_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Elements");
        ui.separator();
        ui.label("Drag an element onto the page");
        ui.add_space(4.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::CollapsingHeader::new("Layout")
                    .default_open(true)
                    .show(ui, |ui| {
                        self.palette_item(ui, ElementKind::Container);
                        self.palette_item(ui, ElementKind::Section);
                        self.palette_item(ui, ElementKind::Article);
                        self.palette_item(ui, ElementKind::Navigation);
                        self.palette_item(ui, ElementKind::Footer);
                    });

                egui::CollapsingHeader::new("Content")
                    .default_open(true)
                    .show(ui, |ui| {
                        self.palette_item(ui, ElementKind::Heading1);
                        self.palette_item(ui, ElementKind::Heading2);
                        self.palette_item(ui, ElementKind::Heading3);
                        self.palette_item(ui, ElementKind::Text);
                        self.palette_item(ui, ElementKind::Image);
                        self.palette_item(ui, ElementKind::Link);
                        self.palette_item(ui, ElementKind::List);
                        self.palette_item(ui, ElementKind::Button);
                    });

                egui::CollapsingHeader::new("Forms")
                    .default_open(true)
                    .show(ui, |ui| {
                        self.palette_item(ui, ElementKind::Form);
                        self.palette_item(ui, ElementKind::Input);
                        self.palette_item(ui, ElementKind::Textarea);
                    });

                ui.add_space(8.0);
                ui.separator();
                egui::CollapsingHeader::new("Shortcuts")
                    .default_open(false)
                    .show(ui, |ui| {
                        ui.small("Arrows: nudge element");
                        ui.small("Delete: remove");
                        ui.small("Ctrl+C/V: copy/paste");
                        ui.small("Ctrl+D: duplicate");
                    });
            });
    }

    fn palette_item(&mut self, ui: &mut egui::Ui, kind: ElementKind) {
        let r = ui.add(egui::Button::new(kind.label()).sense(Sense::drag()));
        if r.drag_started() || r.clicked() {
            self.spawning = Some(kind);
        }
    }

    fn inspector_ui(&mut self, ui: &mut egui::Ui) {
        ui.heading("Properties");
        ui.separator();
        if let Some(el) = self.selected.and_then(|id| self.document.get_mut(id)) {
            ui.label(format!(
                "{}  as  <{}>",
                el.kind().label(),
                html::tag_name(el.kind())
            ));
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("x");
                ui.add(egui::DragValue::new(&mut el.pos.x));
                ui.label("y");
                ui.add(egui::DragValue::new(&mut el.pos.y));
            });
            ui.horizontal(|ui| {
                ui.label("w");
                ui.add(egui::DragValue::new(&mut el.size.x).range(20.0..=2000.0));
                ui.label("h");
                ui.add(egui::DragValue::new(&mut el.size.y).range(16.0..=2000.0));
            });
            ui.add_space(6.0);

            ui.label("ID");
            ui.text_edit_singleline(&mut el.props.id);
            ui.label("Class");
            ui.text_edit_singleline(&mut el.props.class);
            ui.label("Text");
            ui.add(egui::TextEdit::multiline(&mut el.props.text).desired_rows(2));
            ui.label("Style");
            ui.add(egui::TextEdit::multiline(&mut el.props.style).desired_rows(2));

            match el.kind() {
                ElementKind::Image => {
                    ui.add_space(4.0);
                    ui.label("Source");
                    ui.text_edit_singleline(&mut el.props.src);
                    ui.label("Alt text");
                    ui.text_edit_singleline(&mut el.props.alt);
                }
                ElementKind::Link => {
                    ui.add_space(4.0);
                    ui.label("Href");
                    ui.text_edit_singleline(&mut el.props.href);
                }
                ElementKind::Input => {
                    ui.add_space(4.0);
                    ui.label("Input type");
                    ui.text_edit_singleline(&mut el.props.input_type);
                    ui.label("Value");
                    ui.text_edit_singleline(&mut el.props.value);
                }
                _ => {}
            }

            // Open property bag: any other attribute name goes through
            // set_field and lands in the element's extra map.
            ui.add_space(6.0);
            egui::CollapsingHeader::new("Custom attribute")
                .default_open(false)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Name");
                        ui.text_edit_singleline(&mut self.custom_prop_name);
                    });
                    ui.horizontal(|ui| {
                        ui.label("Value");
                        ui.text_edit_singleline(&mut self.custom_prop_value);
                    });
                    if ui.button("Set").clicked() && !self.custom_prop_name.is_empty() {
                        el.set_field(&self.custom_prop_name, &self.custom_prop_value);
                    }
                });

            ui.add_space(6.0);
            if ui.button("Delete").clicked() {
                self.delete_selected();
            }
        } else {
            ui.weak("No selection");
        }

        ui.add_space(10.0);
        ui.separator();
        ui.strong("Global CSS");
        ui.label("Applied once at page scope");
        ui.add(
            egui::TextEdit::multiline(&mut self.document.global_css)
                .code_editor()
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        );
    }

    fn html_panel(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.heading("Page HTML");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.syntax_highlighting, "Highlighting");
            });
        });
        ui.label("Regenerated on every change. Export via File \u{2192} Export HTML.");

        egui::ScrollArea::vertical()
            .id_salt("html_output_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                if self.syntax_highlighting {
                    let job = self.highlighter.layout_job(&self.generated);
                    ui.add(egui::Label::new(job).selectable(true));
                } else {
                    // Plain read-only view; the document is the source of truth
                    let mut text = self.generated.clone();
                    ui.add(
                        egui::TextEdit::multiline(&mut text)
                            .code_editor()
                            .desired_rows(18)
                            .desired_width(f32::INFINITY),
                    );
                }
            });
    }

    fn top_bar(&mut self, ui: &mut egui::Ui) {
        // Show status message if recent
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed().as_secs() < 4 {
                let msg = msg.clone();
                ui.horizontal(|ui| {
                    ui.label(msg);
                });
            } else {
                self.status_message = None;
            }
        }

        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui
                    .button("New")
                    .on_hover_text("Start an empty design")
                    .clicked()
                {
                    self.document = Document::default();
                    self.selected = None;
                    self.current_file = None;
                    self.set_status("New design".into());
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.separator();
                if ui
                    .button("Open...")
                    .on_hover_text("Open a design file")
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Web Design", &["webdesign", "json"])
                        .pick_file()
                    {
                        self.load_project(path);
                    }
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui.button("Save").on_hover_text("Save design").clicked() {
                    if let Some(path) = self.current_file.clone() {
                        self.save_project(path);
                    } else if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Web Design", &["webdesign", "json"])
                        .set_file_name("design.webdesign")
                        .save_file()
                    {
                        self.save_project(path);
                    }
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui
                    .button("Save As...")
                    .on_hover_text("Save design to a new file")
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Web Design", &["webdesign", "json"])
                        .set_file_name("design.webdesign")
                        .save_file()
                    {
                        self.save_project(path);
                    }
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.separator();
                if ui
                    .button("Export HTML...")
                    .on_hover_text("Write the generated page to a file")
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("HTML", &["html"])
                        .set_file_name("page.html")
                        .save_file()
                    {
                        self.export_html(path);
                    }
                    ui.close_kind(egui::UiKind::Menu);
                }
            });

            ui.menu_button("Edit", |ui| {
                let has_selection = self.selected.is_some();
                ui.add_enabled_ui(has_selection, |ui| {
                    if ui
                        .button("Delete")
                        .on_hover_text("Delete selected (Del)")
                        .clicked()
                    {
                        self.delete_selected();
                        ui.close_kind(egui::UiKind::Menu);
                    }
                    if ui
                        .button("Duplicate")
                        .on_hover_text("Duplicate selected (Ctrl+D)")
                        .clicked()
                    {
                        self.duplicate_selected();
                        ui.close_kind(egui::UiKind::Menu);
                    }
                    if ui
                        .button("Copy")
                        .on_hover_text("Copy selected (Ctrl+C)")
                        .clicked()
                    {
                        if let Some(id) = self.selected {
                            self.clipboard = self.document.get(id).cloned();
                        }
                        ui.close_kind(egui::UiKind::Menu);
                    }
                });
                if ui
                    .add_enabled(self.clipboard.is_some(), egui::Button::new("Paste"))
                    .on_hover_text("Paste from clipboard (Ctrl+V)")
                    .clicked()
                {
                    self.paste_clipboard();
                    ui.close_kind(egui::UiKind::Menu);
                }
                ui.separator();
                if ui
                    .add_enabled(has_selection, egui::Button::new("Deselect"))
                    .clicked()
                {
                    self.selected = None;
                    ui.close_kind(egui::UiKind::Menu);
                }
                if ui
                    .button("Clear Page")
                    .on_hover_text("Remove all elements and reset the global CSS")
                    .clicked()
                {
                    self.document.clear();
                    self.selected = None;
                    self.set_status("Page cleared".into());
                    ui.close_kind(egui::UiKind::Menu);
                }
            });

            ui.menu_button("View", |ui| {
                ui.checkbox(&mut self.palette_open, "Show Palette");
                ui.checkbox(&mut self.show_grid, "Show Grid");
                ui.checkbox(&mut self.syntax_highlighting, "Syntax Highlighting")
                    .on_hover_text("Highlight the HTML output panel");
            });

            ui.menu_button("Settings", |ui| {
                ui.horizontal(|ui| {
                    ui.label("Grid Size");
                    ui.add(egui::DragValue::new(&mut self.grid_size).range(1.0..=64.0));
                });
                ui.horizontal(|ui| {
                    ui.label("Page size");
                    ui.add(egui::DragValue::new(&mut self.document.canvas_size.x));
                    ui.add(egui::DragValue::new(&mut self.document.canvas_size.y));
                });
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if !self.document.elements.is_empty() {
                    ui.label(format!("{} elements", self.document.elements.len()));
                    ui.separator();
                }
                ui.strong("Web Designer");
            });
        });
    }
}

impl eframe::App for DesignerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Don't steal keys while a text field has focus
        let typing = ctx.wants_keyboard_input();
        let (delete_pressed, duplicate_pressed, copy_pressed, paste_pressed, arrows) =
            ctx.input(|i| {
                let del = !typing
                    && (i.key_pressed(egui::Key::Delete) || i.key_pressed(egui::Key::Backspace));
                let dup = i.modifiers.command && i.key_pressed(egui::Key::D);
                let copy = !typing && i.modifiers.command && i.key_pressed(egui::Key::C);
                let paste = !typing && i.modifiers.command && i.key_pressed(egui::Key::V);
                let arrows = if typing {
                    [false; 4]
                } else {
                    [
                        i.key_pressed(egui::Key::ArrowUp),
                        i.key_pressed(egui::Key::ArrowDown),
                        i.key_pressed(egui::Key::ArrowLeft),
                        i.key_pressed(egui::Key::ArrowRight),
                    ]
                };
                (del, dup, copy, paste, arrows)
            });

        if delete_pressed {
            self.delete_selected();
        }

        // Arrow keys nudge the selection by one grid step
        if arrows.iter().any(|&a| a) {
            let nudge = self.grid_size.max(1.0);
            if let Some(el) = self.selected_mut() {
                let [up, down, left, right] = arrows;
                if up {
                    el.pos.y -= nudge;
                }
                if down {
                    el.pos.y += nudge;
                }
                if left {
                    el.pos.x -= nudge;
                }
                if right {
                    el.pos.x += nudge;
                }
                el.pos.x = el.pos.x.max(0.0);
                el.pos.y = el.pos.y.max(0.0);
            }
        }

        if copy_pressed && let Some(id) = self.selected {
            self.clipboard = self.document.get(id).cloned();
        }
        if paste_pressed {
            self.paste_clipboard();
        }
        if duplicate_pressed {
            self.duplicate_selected();
        }

        // The generator is pure and O(elements), so just re-derive each frame.
        self.generated = html::page_html(&self.document);

        egui::TopBottomPanel::top("menubar").show(ctx, |ui| self.top_bar(ui));
        if self.palette_open {
            egui::SidePanel::left("palette")
                .resizable(true)
                .show(ctx, |ui| {
                    self.palette_ui(ui);
                });
        }
        egui::SidePanel::right("properties")
            .default_width(280.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .selectable_label(self.right_panel_tab == 0, "Inspector")
                        .clicked()
                    {
                        self.right_panel_tab = 0;
                    }
                    if ui
                        .selectable_label(self.right_panel_tab == 1, "HTML")
                        .clicked()
                    {
                        self.right_panel_tab = 1;
                    }
                });
                ui.separator();

                match self.right_panel_tab {
                    0 => self.inspector_ui(ui),
                    1 => self.html_panel(ui),
                    _ => {}
                }
            });

        self.canvas_ui(ctx);

        if self.spawning.is_some() {
            ctx.set_cursor_icon(egui::CursorIcon::Grabbing);
        }
    }
}
