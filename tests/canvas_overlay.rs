use egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, pos2, vec2};
use set_paint::{DrawingSettings, PaintApp, panels::central_panel};

const WINDOW_POS: Pos2 = Pos2::new(400.0, 300.0);

fn raw_input(events: Vec<Event>) -> RawInput {
    RawInput {
        screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(800.0, 600.0))),
        events,
        ..Default::default()
    }
}

fn button(pos: Pos2, pressed: bool) -> Event {
    Event::PointerButton {
        pos,
        button: PointerButton::Primary,
        pressed,
        modifiers: Modifiers::default(),
    }
}

/// Press, nudge and release at `pos`, with or without a window over the canvas.
fn click_with_jitter(pos: Pos2, with_window: bool) -> PaintApp {
    let ctx = egui::Context::default();
    let mut app = PaintApp::with_settings(&DrawingSettings::default());
    let nudged = pos + vec2(5.0, 3.0);

    let frames = vec![
        vec![],
        vec![Event::PointerMoved(pos)],
        vec![button(pos, true)],
        vec![Event::PointerMoved(nudged)],
        vec![button(nudged, false)],
        vec![],
    ];
    for events in frames {
        let _ = ctx.run(raw_input(events), |ctx| {
            central_panel(&mut app, ctx);
            if with_window {
                egui::Window::new("Erase?")
                    .fixed_pos(WINDOW_POS)
                    .fixed_size([200.0, 120.0])
                    .collapsible(false)
                    .show(ctx, |ui| {
                        ui.label("Are you sure you want to clear the canvas?");
                    });
            }
        });
    }
    app
}

#[test]
fn test_click_on_window_over_canvas_draws_nothing() {
    let app = click_with_jitter(pos2(450.0, 340.0), true);
    assert_eq!(app.editor().document().shapes().count(), 0);
    assert!(!app.editor().needs_save());
    assert!(app.editor().session().state().is_idle());
}

#[test]
fn test_same_click_on_bare_canvas_draws_line() {
    let app = click_with_jitter(pos2(450.0, 340.0), false);
    assert_eq!(app.editor().document().shapes().count(), 1);
    assert!(app.editor().needs_save());
}
