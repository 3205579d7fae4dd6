use crate::PaintApp;

pub fn central_panel(app: &mut PaintApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let (response, painter) = ui.allocate_painter(ui.available_size(), egui::Sense::drag());
        let canvas_rect = response.rect;

        // Export uses the on-screen canvas size
        app.editor
            .set_canvas_size(canvas_rect.width() as u32, canvas_rect.height() as u32);

        app.input.set_canvas_rect(canvas_rect);
        for event in app.input.process_input(ctx, &response) {
            app.apply_input(&event);
        }

        app.renderer
            .render(ctx, &painter, canvas_rect, app.editor.document());
    });
}
