//! Canvas 2D renderer
//!
//! Draws a [`Snapshot`] in logical field coordinates; the context transform
//! maps them onto however many pixels the canvas currently has.

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::*;
use crate::consts::SPRITE_SIZE;
use crate::sim::Snapshot;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Logical field size
    logical: Vec2,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement, logical: Vec2) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            canvas,
            ctx,
            logical,
        })
    }

    /// Match the canvas to `width` x `height` pixels and rescale the field
    pub fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);

        let scale = fit_scale(Vec2::new(width as f32, height as f32), self.logical);
        // Resizing resets the context, but be explicit about the transform
        if let Err(e) = self
            .ctx
            .set_transform(scale.x as f64, 0.0, 0.0, scale.y as f64, 0.0, 0.0)
        {
            log::warn!("Failed to set canvas transform: {:?}", e);
        }
        log::debug!("Canvas resized to {}x{} (scale {:?})", width, height, scale);
    }

    /// Draw one frame. Never touches game state.
    pub fn render(&self, snapshot: &Snapshot) {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.logical.x as f64, self.logical.y as f64);

        self.draw_target(snapshot);

        ctx.set_global_alpha(LAUNCHER_ALPHA);
        self.draw_shuriken(snapshot.launcher.pos, snapshot.launcher.angle);
        ctx.set_global_alpha(1.0);

        for projectile in &snapshot.projectiles {
            self.draw_shuriken(projectile.pos, projectile.angle);
        }
    }

    fn draw_target(&self, snapshot: &Snapshot) {
        let target = &snapshot.target;
        self.fill_circle(target.pos, target.radius, TARGET_COLOR);
        self.fill_circle(target.pos, target.radius * 0.5, BULLSEYE_COLOR);
    }

    fn draw_shuriken(&self, pos: Vec2, angle: f32) {
        let ctx = &self.ctx;
        let outline = shuriken_outline(pos, angle, SPRITE_SIZE);
        let Some((first, rest)) = outline.split_first() else {
            return;
        };

        ctx.set_fill_style_str(SHURIKEN_COLOR);
        ctx.begin_path();
        ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            ctx.line_to(p.x as f64, p.y as f64);
        }
        ctx.close_path();
        ctx.fill();

        self.fill_circle(pos, SPRITE_SIZE / 10.0, SHURIKEN_HUB_COLOR);
    }

    fn fill_circle(&self, center: Vec2, radius: f32, color: &str) {
        let ctx = &self.ctx;
        ctx.set_fill_style_str(color);
        ctx.begin_path();
        if ctx
            .arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )
            .is_ok()
        {
            ctx.fill();
        }
    }
}
