/*
 * Renderer Module
 *
 * This module handles the rendering of the particle simulation.
 * It draws the world border, the cursor indicator and the particles, plus
 * the debug overlay when enabled. A failure to draw a frame ends the app.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::error::{Error, Result};
use crate::{CURSOR_SIZE, PARTICLE_SIZE};

// Convert world coordinates (top left origin, y down) to window coordinates
pub fn world_to_screen(window_rect: Rect, x: f64, y: f64) -> Point2 {
    pt2(window_rect.left() + x as f32, window_rect.top() - y as f32)
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    if model.frame_failed.get() {
        return;
    }

    if let Err(e) = draw_frame(app, model, &frame) {
        log::error!("{e}");
        model.frame_failed.set(true);
        app.quit();
    }
}

fn draw_frame(app: &App, model: &Model, frame: &Frame) -> Result<()> {
    let draw = app.draw();
    let window_rect = app.window_rect();
    let params = model.env.params();

    draw.background().color(WHITE);

    // World border
    let top_left = world_to_screen(window_rect, 0.0, 0.0);
    let bottom_right = world_to_screen(window_rect, params.world_width, params.world_height);
    let world_rect = Rect::from_corners(top_left, bottom_right);
    draw.rect()
        .xy(world_rect.xy())
        .wh(world_rect.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.8, 0.8, 0.8, 1.0));

    // Cursor indicator, fading out once released
    if let Some(event) = model.cursor.latest() {
        if model.cursor_fade > 0.0 {
            let pos = world_to_screen(window_rect, event.x as f64, event.y as f64);
            draw.ellipse()
                .xy(pos)
                .w_h(CURSOR_SIZE, CURSOR_SIZE)
                .color(rgba(0.5, 0.5, 0.5, model.cursor_fade));
        }
    }

    // Particles are anchored at their top left corner
    let half = PARTICLE_SIZE / 2.0;
    for p in model.env.particles() {
        let pos = world_to_screen(window_rect, p.x, p.y);
        draw.ellipse()
            .x_y(pos.x + half, pos.y - half)
            .w_h(PARTICLE_SIZE, PARTICLE_SIZE)
            .color(BLUE);
    }

    if model.params.show_debug {
        for (i, line) in model.debug_info.overlay_lines().iter().enumerate() {
            draw.text(line)
                .x_y(window_rect.right() - 90.0, window_rect.top() - 15.0 - 16.0 * i as f32)
                .color(BLACK)
                .font_size(12);
        }
    }

    draw.to_frame(app, frame)
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    // Draw the egui UI
    model.egui
        .draw_to_frame(frame)
        .map_err(|e| Error::Render(format!("{e:?}")))?;

    Ok(())
}
