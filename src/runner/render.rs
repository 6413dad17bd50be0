//! Frame rendering. Reads the world and paints it back to front; the only
//! moving input besides the world is `t_ms`, which drives the cape sway and
//! the running stride.

use std::f64::consts::TAU;

use super::entities::{Obstacle, ObstacleKind, Player, Soul};
use super::world::World;

/// Fill source for [`Painter::set_fill`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint<'a> {
    Solid(&'a str),
    Linear { from: (f64, f64), to: (f64, f64), stops: &'a [(f32, &'a str)] },
    Radial { center: (f64, f64), radius: f64, stops: &'a [(f32, &'a str)] },
}

/// Minimal 2D drawing surface, modelled on the canvas 2D context.
pub trait Painter {
    fn set_fill(&mut self, paint: Paint<'_>);
    fn set_stroke(&mut self, color: &str, width: f64);
    fn set_alpha(&mut self, alpha: f64);
    /// Glow behind subsequent shapes; `blur == 0.0` turns it off.
    fn set_shadow(&mut self, color: &str, blur: f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn stroke_rect(&mut self, x: f64, y: f64, w: f64, h: f64);
    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start: f64, end: f64);
    fn ellipse(&mut self, x: f64, y: f64, rx: f64, ry: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f64, y: f64);
    fn rotate(&mut self, angle: f64);
}

// --- Palette -----------------------------------------------------------------

const SKY: [(f32, &str); 2] = [(0.0, "#1A1A1A"), (1.0, "#0D0D0D")];
const SKYLINE: &str = "#2a2a2a";
const STAR: &str = "#D6B36A";
const EARTH: [(f32, &str); 2] = [(0.0, "#2a2020"), (1.0, "#1a1515")];
const BRONZE: &str = "#A86A2A";
const GOLD: &str = "#D6B36A";
const SOUL_GLOW: [(f32, &str); 3] = [
    (0.0, "rgba(214, 179, 106, 0.8)"),
    (0.5, "rgba(168, 106, 42, 0.4)"),
    (1.0, "rgba(168, 106, 42, 0)"),
];
const SOUL_CORE: &str = "#F1D38A";
const SPIKE: &str = "#3A1F0F";
const SPIKE_EDGE: &str = "#9C5A1A";
const SHADE: &str = "#1a1015";
const EYES: &str = "#FF4444";
const PILLAR: &str = "#2a2520";
const PILLAR_CAP: &str = "#3a3530";
const CAPE: &str = "#8b0000";
const VISOR: &str = "#0D0D0D";
const BLADE: &str = "#e0e0e0";
const LEGS: &str = "#6a5030";

const STAR_COUNT: usize = 30;

/// Paint one frame.
pub fn draw(world: &World, p: &mut impl Painter, t_ms: f64) {
    let (w, h) = (world.width(), world.height());

    p.set_fill(Paint::Linear { from: (0.0, 0.0), to: (0.0, h), stops: &SKY });
    p.fill_rect(0.0, 0.0, w, h);

    draw_skyline(p, w, h);
    draw_stars(p, w, h, world.score());
    draw_ground(p, world);

    for soul in world.souls() {
        draw_soul(p, soul);
    }
    for obstacle in world.obstacles() {
        draw_obstacle(p, obstacle);
    }
    draw_player(p, world.player(), t_ms);
}

fn draw_skyline(p: &mut impl Painter, w: f64, h: f64) {
    p.set_fill(Paint::Solid(SKYLINE));
    p.begin_path();
    p.move_to(0.0, h - 120.0);
    let mut x = 0.0;
    while x <= w {
        let ridge = 30.0 + (x * 0.02).sin() * 20.0 + (x * 0.01).cos() * 15.0;
        p.line_to(x, h - 100.0 - ridge);
        x += 50.0;
    }
    p.line_to(w, h);
    p.line_to(0.0, h);
    p.close_path();
    p.fill();
}

/// Fixed pseudo-random stars drifting slowly right as the score grows.
fn draw_stars(p: &mut impl Painter, w: f64, h: f64, score: u32) {
    if w <= 0.0 || h <= 150.0 {
        return;
    }
    p.set_fill(Paint::Solid(STAR));
    for i in 0..STAR_COUNT {
        let x = (i as f64 * 37.0 + score as f64 * 0.1) % w;
        let y = (i as f64 * 23.0) % (h - 150.0);
        let size = 1.0 + (i % 3) as f64;
        p.set_alpha(0.2 + (i % 5) as f64 * 0.1);
        p.begin_path();
        p.arc(x, y, size, 0.0, TAU);
        p.fill();
    }
    p.set_alpha(1.0);
}

fn draw_ground(p: &mut impl Painter, world: &World) {
    let w = world.width();
    let floor = world.floor_y();

    p.set_fill(Paint::Linear { from: (0.0, floor), to: (0.0, world.height()), stops: &EARTH });
    p.fill_rect(0.0, floor, w, world.height());

    p.set_shadow(BRONZE, 10.0);
    p.set_stroke(BRONZE, 2.0);
    p.begin_path();
    p.move_to(0.0, floor);
    p.line_to(w, floor);
    p.stroke();
    p.set_shadow(BRONZE, 0.0);

    p.set_fill(Paint::Solid(BRONZE));
    p.set_alpha(0.15);
    for tile in world.ground().tiles() {
        p.fill_rect(tile.x, floor + 5.0, tile.width - 5.0, 10.0);
    }
    p.set_alpha(1.0);
}

fn draw_soul(p: &mut impl Painter, soul: &Soul) {
    let b = &soul.bounds;
    let cx = b.x + b.width / 2.0;
    let cy = soul.bob_y() + b.height / 2.0;
    let glow = b.width * 1.5;

    p.set_fill(Paint::Radial { center: (cx, cy), radius: glow, stops: &SOUL_GLOW });
    p.begin_path();
    p.arc(cx, cy, glow, 0.0, TAU);
    p.fill();

    p.set_fill(Paint::Solid(SOUL_CORE));
    p.begin_path();
    p.arc(cx, cy, b.width / 2.0 * soul.pulse(), 0.0, TAU);
    p.fill();
}

fn draw_obstacle(p: &mut impl Painter, obstacle: &Obstacle) {
    let b = &obstacle.bounds;
    match obstacle.kind {
        ObstacleKind::Spike => {
            p.set_fill(Paint::Solid(SPIKE));
            p.begin_path();
            p.move_to(b.x + b.width / 2.0, b.y);
            p.line_to(b.right(), b.bottom());
            p.line_to(b.x, b.bottom());
            p.close_path();
            p.fill();
            p.set_stroke(SPIKE_EDGE, 2.0);
            p.stroke();
        }
        ObstacleKind::Shadow => {
            p.set_fill(Paint::Solid(SHADE));
            p.fill_rect(b.x, b.y, b.width, b.height);
            // Wispy hood above the body.
            p.begin_path();
            p.move_to(b.x, b.y);
            p.quad_to(b.x + b.width / 2.0, b.y - 10.0, b.right(), b.y);
            p.fill();

            p.set_shadow(EYES, 8.0);
            p.set_fill(Paint::Solid(EYES));
            p.begin_path();
            p.arc(b.x + 10.0, b.y + 15.0, 3.0, 0.0, TAU);
            p.arc(b.right() - 10.0, b.y + 15.0, 3.0, 0.0, TAU);
            p.fill();
            p.set_shadow(EYES, 0.0);
        }
        ObstacleKind::Pillar => {
            p.set_fill(Paint::Solid(PILLAR));
            p.fill_rect(b.x, b.y, b.width, b.height);
            p.set_fill(Paint::Solid(PILLAR_CAP));
            p.fill_rect(b.x - 3.0, b.y, b.width + 6.0, 8.0);

            // Rune lines.
            p.set_stroke(BRONZE, 1.5);
            p.begin_path();
            p.move_to(b.x + b.width / 2.0, b.y + 15.0);
            p.line_to(b.x + b.width / 2.0, b.bottom() - 10.0);
            p.move_to(b.x + 5.0, b.y + 25.0);
            p.line_to(b.right() - 5.0, b.y + 25.0);
            p.stroke();
        }
    }
}

/// Vertical stride offset of the legs; frozen while airborne.
pub fn stride(player: &Player, t_ms: f64) -> f64 {
    if player.jumping { 0.0 } else { (t_ms * 0.02).sin() * 3.0 }
}

fn draw_player(p: &mut impl Painter, player: &Player, t_ms: f64) {
    let (x, y) = (player.x, player.y);
    let (w, h) = (player.width, player.height);

    // Shadow stays on the ground while jumping.
    p.set_fill(Paint::Solid("rgba(0,0,0,0.4)"));
    p.begin_path();
    p.ellipse(x + w / 2.0, player.ground_y + h, w / 2.0 + 5.0, 6.0);
    p.fill();

    let sway = (t_ms * 0.008).sin() * 3.0;
    p.set_fill(Paint::Solid(CAPE));
    p.begin_path();
    p.move_to(x + 10.0, y + 15.0);
    p.quad_to(x - 10.0, y + 30.0 + sway, x - 5.0, y + 48.0);
    p.line_to(x + 15.0, y + 42.0);
    p.close_path();
    p.fill();

    // Armour.
    p.set_fill(Paint::Solid(BRONZE));
    p.fill_rect(x + 10.0, y + 15.0, 20.0, 25.0);
    p.set_stroke(GOLD, 1.0);
    p.stroke_rect(x + 12.0, y + 17.0, 16.0, 21.0);

    // Helm and visor.
    p.set_fill(Paint::Solid(BRONZE));
    p.begin_path();
    p.arc(x + w / 2.0, y + 10.0, 10.0, 0.0, TAU);
    p.fill();
    p.set_fill(Paint::Solid(VISOR));
    p.fill_rect(x + 15.0, y + 8.0, 10.0, 4.0);

    p.save();
    p.translate(x + w - 5.0, y + 20.0);
    p.rotate(-0.3);
    p.set_shadow(GOLD, 5.0);
    p.set_fill(Paint::Solid(BLADE));
    p.fill_rect(0.0, 0.0, 4.0, 25.0);
    p.set_fill(Paint::Solid(GOLD));
    p.fill_rect(-4.0, 0.0, 12.0, 5.0);
    p.set_shadow(GOLD, 0.0);
    p.restore();

    let leg = stride(player, t_ms);
    p.set_fill(Paint::Solid(LEGS));
    p.fill_rect(x + 12.0, y + 38.0, 6.0, 12.0 + leg);
    p.fill_rect(x + 22.0, y + 38.0, 6.0, 12.0 - leg);
}
