use egui::{Context, Pos2, Rect, Response};

use crate::geometry::Point;

/// Pointer events in canvas-local coordinates, as consumed by the drawing session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Primary button was pressed inside the canvas
    PointerDown { position: Point },
    /// Pointer moved, with or without the primary button held
    PointerMove { position: Point, primary_held: bool },
    /// Primary button was released, possibly outside the canvas
    PointerUp { position: Point },
    /// Pointer crossed out of the canvas bounds
    PointerLeave,
}

/// One frame's worth of raw pointer state, in screen coordinates
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerSample {
    pub position: Option<Pos2>,
    pub primary_down: bool,
    pub primary_pressed: bool,
    pub primary_released: bool,
    /// Another layer or widget (a window, popup or menu) sits on top of
    /// the canvas under the pointer
    pub occluded: bool,
}

impl PointerSample {
    /// Sample the pointer for the canvas widget that produced `canvas`.
    pub fn from_context(ctx: &Context, canvas: &Response) -> Self {
        ctx.input(|input| Self {
            position: input.pointer.latest_pos(),
            primary_down: input.pointer.primary_down(),
            primary_pressed: input.pointer.primary_pressed(),
            primary_released: input.pointer.primary_released(),
            occluded: !canvas.contains_pointer(),
        })
    }
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    was_in_canvas: bool,
    canvas_rect: Rect,
}

impl InputHandler {
    pub fn new(canvas_rect: Rect) -> Self {
        Self {
            last_pointer_pos: None,
            was_in_canvas: false,
            canvas_rect,
        }
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = rect;
    }

    fn to_canvas(&self, pos: Pos2) -> Point {
        Point::from_pos2((pos - self.canvas_rect.min).to_pos2())
    }

    /// Process raw egui input for the canvas `Response` and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context, canvas: &Response) -> Vec<InputEvent> {
        self.translate(PointerSample::from_context(ctx, canvas))
    }

    pub fn translate(&mut self, sample: PointerSample) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let pos = sample.position.or(self.last_pointer_pos);
        let in_canvas = !sample.occluded
            && sample
                .position
                .is_some_and(|pos| self.canvas_rect.contains(pos));

        if let Some(pos) = sample.position {
            if Some(pos) != self.last_pointer_pos {
                events.push(InputEvent::PointerMove {
                    position: self.to_canvas(pos),
                    primary_held: sample.primary_down,
                });
            }
            self.last_pointer_pos = Some(pos);
        }

        if self.was_in_canvas && !in_canvas {
            events.push(InputEvent::PointerLeave);
        }
        self.was_in_canvas = in_canvas;

        if sample.primary_pressed && in_canvas {
            if let Some(pos) = pos {
                events.push(InputEvent::PointerDown {
                    position: self.to_canvas(pos),
                });
            }
        }
        if sample.primary_released {
            if let Some(pos) = pos {
                events.push(InputEvent::PointerUp {
                    position: self.to_canvas(pos),
                });
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(Rect::from_min_size(egui::pos2(100.0, 50.0), egui::vec2(200.0, 100.0)))
    }

    fn sample(x: f32, y: f32) -> PointerSample {
        PointerSample {
            position: Some(egui::pos2(x, y)),
            ..Default::default()
        }
    }

    #[test]
    fn test_press_inside_canvas_is_canvas_local() {
        let mut input = handler();
        let events = input.translate(PointerSample {
            primary_pressed: true,
            primary_down: true,
            ..sample(110.0, 70.0)
        });
        assert_eq!(
            events.last(),
            Some(&InputEvent::PointerDown {
                position: Point::new(10.0, 20.0)
            })
        );
    }

    #[test]
    fn test_press_outside_canvas_is_dropped() {
        let mut input = handler();
        let events = input.translate(PointerSample {
            primary_pressed: true,
            ..sample(10.0, 10.0)
        });
        assert!(!events.iter().any(|e| matches!(e, InputEvent::PointerDown { .. })));
    }

    #[test]
    fn test_press_under_overlay_is_dropped() {
        let mut input = handler();
        let events = input.translate(PointerSample {
            primary_pressed: true,
            primary_down: true,
            occluded: true,
            ..sample(150.0, 70.0)
        });
        assert!(!events.iter().any(|e| matches!(e, InputEvent::PointerDown { .. })));
    }

    #[test]
    fn test_leaving_canvas_emits_leave_once() {
        let mut input = handler();
        input.translate(sample(150.0, 60.0));

        let events = input.translate(PointerSample {
            primary_down: true,
            ..sample(400.0, 60.0)
        });
        assert_eq!(
            events,
            vec![
                InputEvent::PointerMove {
                    position: Point::new(300.0, 10.0),
                    primary_held: true,
                },
                InputEvent::PointerLeave,
            ]
        );
        assert!(input.translate(sample(401.0, 60.0)).iter().all(|e| *e != InputEvent::PointerLeave));
    }

    #[test]
    fn test_release_without_position_uses_last_known() {
        let mut input = handler();
        input.translate(sample(120.0, 60.0));
        let events = input.translate(PointerSample {
            primary_released: true,
            ..Default::default()
        });
        assert_eq!(
            events,
            vec![InputEvent::PointerLeave, InputEvent::PointerUp { position: Point::new(20.0, 10.0) }]
        );
    }
}
