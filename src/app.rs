use std::path::PathBuf;

use crate::config::DrawingSettings;
use crate::editor::Editor;
use crate::input::{InputEvent, InputHandler};
use crate::panels::{central_panel, tools_panel};
use crate::raster::SkiaRasterizer;
use crate::renderer::Renderer;
use crate::style::Color;

/// Actions that wait for the user to confirm in a modal window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingAction {
    /// Offer to save unsaved work before starting over
    SaveBeforeNew,
    ConfirmErase,
}

/// The eframe host around an [`Editor`].
///
/// Only the drawing settings are persisted between runs; the canvas itself
/// is exported as PNG on request.
pub struct PaintApp {
    pub(crate) editor: Editor,
    pub(crate) renderer: Renderer,
    pub(crate) input: InputHandler,
    /// Colour used when the fill checkbox is switched on
    pub(crate) fill_color: Color,
    pub(crate) file_path: String,
    pub(crate) status: Option<String>,
    pub(crate) pending: Option<PendingAction>,
    title: String,
}

impl Default for PaintApp {
    fn default() -> Self {
        Self::with_settings(&DrawingSettings::default())
    }
}

impl PaintApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = cc
            .storage
            .and_then(|storage| eframe::get_value::<DrawingSettings>(storage, eframe::APP_KEY))
            .unwrap_or_default();
        log::debug!("Starting with settings {:?}", settings);
        Self::with_settings(&settings)
    }

    pub fn with_settings(settings: &DrawingSettings) -> Self {
        Self {
            editor: Editor::new(settings),
            renderer: Renderer::new(),
            input: InputHandler::new(egui::Rect::NOTHING),
            fill_color: settings.fill.color().unwrap_or(Color::WHITE),
            file_path: "untitled.png".to_owned(),
            status: None,
            pending: None,
            title: String::new(),
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    /// Feed one pointer event to the editor.
    ///
    /// A contract violation is logged and the gesture abandoned so the
    /// next press starts cleanly.
    pub(crate) fn apply_input(&mut self, event: &InputEvent) {
        if let Err(err) = self.editor.handle_input(event) {
            log::error!("Dropping gesture after {:?}: {}", event, err);
            self.editor.cancel_gesture();
        }
    }

    fn target_path(&self) -> PathBuf {
        PathBuf::from(self.file_path.trim())
    }

    /// Returns whether the file was written.
    pub(crate) fn save(&mut self) -> bool {
        let path = self.target_path();
        match self.editor.save_png(&path, &SkiaRasterizer) {
            Ok(()) => {
                self.status = Some(format!("Saved {}", path.display()));
                true
            }
            Err(err) => {
                self.status = Some(format!(
                    "Could not save the file. Please try again or save it as another name. ({err})"
                ));
                false
            }
        }
    }

    pub(crate) fn open(&mut self) {
        let path = self.target_path();
        match self.editor.open_background(&path) {
            Ok(()) => self.status = Some(format!("Opened {}", path.display())),
            Err(err) => self.status = Some(err.to_string()),
        }
    }

    pub(crate) fn request_new(&mut self) {
        if self.editor.needs_save() {
            self.pending = Some(PendingAction::SaveBeforeNew);
        } else {
            self.editor.new_document();
            self.status = None;
        }
    }

    fn show_pending(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending else {
            return;
        };
        let (caption, text) = match action {
            PendingAction::SaveBeforeNew => (
                "Save changes?",
                format!(
                    "Do you want to save changes to {}?",
                    self.editor.document().display_name()
                ),
            ),
            PendingAction::ConfirmErase => (
                "Erase?",
                "Are you sure you want to clear the canvas?".to_owned(),
            ),
        };

        let mut answer = None;
        egui::Window::new(caption)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("No").clicked() {
                        answer = Some(false);
                    }
                });
            });

        let Some(yes) = answer else {
            return;
        };
        self.pending = None;
        match (action, yes) {
            (PendingAction::SaveBeforeNew, true) => {
                // Keep the drawing if it could not be written
                if self.save() {
                    self.editor.new_document();
                }
            }
            (PendingAction::SaveBeforeNew, false) => {
                self.editor.new_document();
                self.status = None;
            }
            (PendingAction::ConfirmErase, true) => self.editor.erase(),
            (PendingAction::ConfirmErase, false) => {}
        }
    }

    fn sync_title(&mut self, ctx: &egui::Context) {
        let title = self.editor.document().window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }
}

impl eframe::App for PaintApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.editor.settings());
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        tools_panel(self, ctx);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(self.editor.session().pointer_label());
                if let Some(status) = &self.status {
                    ui.separator();
                    ui.label(status);
                }
            });
        });

        central_panel(self, ctx);
        self.show_pending(ctx);
        self.sync_title(ctx);
    }
}
