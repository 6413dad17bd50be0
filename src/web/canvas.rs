//! [`Painter`] over a `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use crate::error::RunnerError;
use crate::runner::render::{Paint, Painter};

pub struct CanvasPainter {
    ctx: CanvasRenderingContext2d,
}

impl CanvasPainter {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, RunnerError> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or(RunnerError::NoContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| RunnerError::NoContext)?;
        Ok(Self { ctx })
    }
}

fn add_stops(gradient: &CanvasGradient, stops: &[(f32, &str)]) {
    for (offset, color) in stops {
        gradient.add_color_stop(*offset, color).ok();
    }
}

impl Painter for CanvasPainter {
    fn set_fill(&mut self, paint: Paint<'_>) {
        match paint {
            Paint::Solid(color) => self.ctx.set_fill_style_str(color),
            Paint::Linear { from, to, stops } => {
                let gradient = self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1);
                add_stops(&gradient, stops);
                self.ctx.set_fill_style_canvas_gradient(&gradient);
            }
            Paint::Radial { center, radius, stops } => {
                if let Ok(gradient) =
                    self.ctx.create_radial_gradient(center.0, center.1, 0.0, center.0, center.1, radius)
                {
                    add_stops(&gradient, stops);
                    self.ctx.set_fill_style_canvas_gradient(&gradient);
                }
            }
        }
    }

    fn set_stroke(&mut self, color: &str, width: f64) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_shadow(&mut self, color: &str, blur: f64) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur);
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.fill_rect(x, y, w, h);
    }

    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ctx.stroke_rect(x, y, w, h);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ctx.quadratic_curve_to(cx, cy, x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64) {
        self.ctx.arc(x, y, radius.max(0.0), start, end).ok();
    }

    fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64) {
        self.ctx.ellipse(x, y, rx.max(0.0), ry.max(0.0), 0.0, 0.0, TAU).ok();
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) {
        self.ctx.translate(x, y).ok();
    }

    fn rotate(&mut self, angle: f64) {
        self.ctx.rotate(angle).ok();
    }
}
