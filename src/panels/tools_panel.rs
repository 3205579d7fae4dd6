use egui::color_picker::{Alpha, color_edit_button_srgba};

use crate::PaintApp;
use crate::app::PendingAction;
use crate::style::{Color, FillMode, StrokeThickness, ToolKind};

pub fn tools_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(180.0)
        .show(ctx, |ui| {
            ui.heading("Shapes");

            // Tools are locked while a shape is being dragged
            let can_change = app.editor.can_change_tool();
            for tool in ToolKind::ALL {
                let selected = app.editor.tool() == tool;
                let label = egui::SelectableLabel::new(selected, tool.name());
                if ui.add_enabled(can_change || selected, label).clicked() {
                    if let Err(err) = app.editor.set_tool(tool) {
                        log::warn!("Tool change ignored: {}", err);
                    }
                }
            }
            ui.separator();

            ui.heading("Style");
            let style = *app.editor.style();

            ui.horizontal(|ui| {
                ui.label("Line colour:");
                let mut stroke = style.stroke_color.to_color32();
                if color_edit_button_srgba(ui, &mut stroke, Alpha::OnlyBlend).changed() {
                    app.editor.set_stroke_color(Color::from_color32(stroke));
                }
            });

            ui.horizontal(|ui| {
                let mut filled = matches!(style.fill, FillMode::Filled(_));
                if ui.checkbox(&mut filled, "Fill").changed() {
                    app.editor.set_fill(if filled {
                        FillMode::Filled(app.fill_color)
                    } else {
                        FillMode::Transparent
                    });
                }
                let mut fill = app.fill_color.to_color32();
                if color_edit_button_srgba(ui, &mut fill, Alpha::OnlyBlend).changed() {
                    app.fill_color = Color::from_color32(fill);
                    if filled {
                        app.editor.set_fill(FillMode::Filled(app.fill_color));
                    }
                }
            });

            let mut thickness = style.thickness;
            egui::ComboBox::from_label("Line thickness")
                .selected_text(thickness.to_string())
                .show_ui(ui, |ui| {
                    for option in StrokeThickness::ALL {
                        ui.selectable_value(&mut thickness, option, option.to_string());
                    }
                });
            if thickness != style.thickness {
                app.editor.set_thickness(thickness);
            }
            ui.separator();

            ui.heading("File");
            ui.text_edit_singleline(&mut app.file_path);
            ui.horizontal(|ui| {
                if ui.button("New").clicked() {
                    app.request_new();
                }
                if ui.button("Open").clicked() {
                    app.open();
                }
                if ui.button("Save").clicked() {
                    app.save();
                }
            });
            if ui.button("Erase canvas").clicked() {
                app.pending = Some(PendingAction::ConfirmErase);
            }

            if app.editor.needs_save() {
                ui.weak("Unsaved changes");
            }
        });
}
