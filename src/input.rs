/*
 * Input Module
 *
 * This module handles user input events for the particle simulation.
 * Mouse presses and drags publish cursor events into the model's cursor
 * slot; releases mark the current event as no longer live.
 *
 * - Left button attracts particles, any other button repels them
 * - Presses over the egui panel are left to the UI
 */

use nannou::prelude::*;
use nannou::winit::event::MouseButton;

use crate::app::Model;
use crate::cursor::CursorEvent;

// Convert a window position (centered, y up) to world coordinates (top left origin, y down)
pub fn window_to_world(window_rect: Rect, pos: Point2) -> (i32, i32) {
    let x = pos.x - window_rect.left();
    let y = window_rect.top() - pos.y;
    (x.round() as i32, y.round() as i32)
}

fn cursor_event_at(window_rect: Rect, pos: Point2, attract: bool) -> CursorEvent {
    let (x, y) = window_to_world(window_rect, pos);
    CursorEvent::new(x, y, attract)
}

// Polarity of a press: only the left button attracts
pub fn attracts(button: MouseButton) -> bool {
    matches!(button, MouseButton::Left)
}

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;

    // A drag replaces the event at the new position
    if let Some(attract) = model.pressed {
        model.cursor.publish(cursor_event_at(app.window_rect(), pos, attract));
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    let attract = attracts(button);
    model.pressed = Some(attract);
    model.cursor.publish(cursor_event_at(app.window_rect(), model.mouse_position, attract));
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, _button: MouseButton) {
    if model.pressed.take().is_some() {
        model.cursor.release();
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_center_maps_to_world_middle() {
        let rect = Rect::from_w_h(600.0, 600.0);
        assert_eq!(window_to_world(rect, pt2(0.0, 0.0)), (300, 300));
    }

    #[test]
    fn top_left_corner_is_world_origin() {
        let rect = Rect::from_w_h(600.0, 600.0);
        assert_eq!(window_to_world(rect, pt2(-300.0, 300.0)), (0, 0));
        assert_eq!(window_to_world(rect, pt2(-200.4, 100.6)), (100, 199));
    }

    #[test]
    fn only_the_left_button_attracts() {
        assert!(attracts(MouseButton::Left));
        assert!(!attracts(MouseButton::Right));
        assert!(!attracts(MouseButton::Middle));
        assert!(!attracts(MouseButton::Other(4)));
    }

    #[test]
    fn cursor_events_start_live() {
        let rect = Rect::from_w_h(600.0, 600.0);
        let event = cursor_event_at(rect, pt2(-300.0, 300.0), false);
        assert_eq!(event, CursorEvent { x: 0, y: 0, attract: false, live: true });
    }
}
