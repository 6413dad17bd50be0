//! Game objects: the runner, obstacles, souls and the scrolling ground.

use rand::Rng;
use rand::distributions::{Distribution, Standard};

use crate::config::Tuning;

/// Axis-aligned box, `y` grows downward like canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Forgiving overlap test: each leading edge must clear the other box's
    /// trailing edge by more than `padding`. Symmetric in its two boxes.
    pub fn collides(&self, other: &Bounds, padding: f64) -> bool {
        self.x + padding < other.right()
            && self.right() - padding > other.x
            && self.y + padding < other.bottom()
            && self.bottom() - padding > other.y
    }
}

// --- Player ------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub velocity_y: f64,
    pub jumping: bool,
    pub jump_force: f64,
    pub gravity: f64,
    pub ground_y: f64,
}

impl Player {
    pub fn new(tuning: &Tuning, ground_y: f64) -> Self {
        Self {
            x: tuning.player_x,
            y: ground_y,
            width: tuning.player_width,
            height: tuning.player_height,
            velocity_y: 0.0,
            jumping: false,
            jump_force: tuning.jump_force,
            gravity: tuning.gravity,
            ground_y,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Launch upward. Ignored while airborne; returns whether it took effect.
    pub fn jump(&mut self) -> bool {
        if self.jumping {
            return false;
        }
        self.velocity_y = self.jump_force;
        self.jumping = true;
        true
    }

    /// Gravity, integration and landing for one `dt` slice. Landing needs a
    /// non-negative velocity, so a jump taken on a zero-length slice survives.
    pub fn fall(&mut self, dt: f64) {
        self.velocity_y += self.gravity * dt;
        self.y += self.velocity_y * dt;
        if self.y >= self.ground_y && self.velocity_y >= 0.0 {
            self.y = self.ground_y;
            self.velocity_y = 0.0;
            self.jumping = false;
        }
    }

    /// Put the player back on (a possibly new) ground line at rest.
    pub fn settle(&mut self, ground_y: f64) {
        self.ground_y = ground_y;
        self.y = ground_y;
        self.velocity_y = 0.0;
        self.jumping = false;
    }
}

// --- Obstacles ---------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    Spike,
    Shadow,
    Pillar,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Spike, ObstacleKind::Shadow, ObstacleKind::Pillar];

    /// (width, height)
    pub fn size(self) -> (f64, f64) {
        match self {
            ObstacleKind::Spike => (25.0, 40.0),
            ObstacleKind::Shadow => (30.0, 50.0),
            ObstacleKind::Pillar => (20.0, 70.0),
        }
    }

    /// Vertical offset of the top edge from the ground-contact line. Every
    /// variant ends up resting on the same floor as the player's feet.
    pub fn y_offset(self) -> f64 {
        match self {
            ObstacleKind::Spike => 10.0,
            ObstacleKind::Shadow => 0.0,
            ObstacleKind::Pillar => -20.0,
        }
    }
}

impl Distribution<ObstacleKind> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> ObstacleKind {
        ObstacleKind::ALL[rng.gen_range(0..ObstacleKind::ALL.len())]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub kind: ObstacleKind,
    pub bounds: Bounds,
}

impl Obstacle {
    pub fn new(kind: ObstacleKind, x: f64, ground_y: f64) -> Self {
        let (width, height) = kind.size();
        Self { kind, bounds: Bounds::new(x, ground_y + kind.y_offset(), width, height) }
    }
}

// --- Souls -------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq)]
pub struct Soul {
    pub bounds: Bounds,
    /// Drives both the vertical bob and the core pulse.
    pub float_offset: f64,
}

impl Soul {
    pub fn new(x: f64, y: f64, size: f64) -> Self {
        Self { bounds: Bounds::new(x, y, size, size), float_offset: 0.0 }
    }

    /// Rendered y including the bob.
    pub fn bob_y(&self) -> f64 {
        self.bounds.y + self.float_offset.sin() * 5.0
    }

    /// Core radius multiplier, in [0.6, 1.0].
    pub fn pulse(&self) -> f64 {
        0.8 + (self.float_offset * 2.0).sin() * 0.2
    }
}

// --- Ground ------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundTile {
    pub x: f64,
    pub width: f64,
}

/// Rolling window of decorative tiles; tiles leaving on the left are moved
/// behind the rightmost one so the strip never shows a gap.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroundStrip {
    tiles: Vec<GroundTile>,
}

impl GroundStrip {
    /// `count` tiles laid edge to edge from x = 0.
    pub fn new(tile_width: f64, count: usize) -> Self {
        let tiles = (0..count).map(|i| GroundTile { x: i as f64 * tile_width, width: tile_width }).collect();
        Self { tiles }
    }

    pub fn tiles(&self) -> &[GroundTile] {
        &self.tiles
    }

    pub fn scroll(&mut self, dx: f64) {
        if !dx.is_finite() {
            return;
        }
        for tile in &mut self.tiles {
            tile.x -= dx;
        }
        // Recycle leftmost-first so each moved tile lands after the current tail.
        loop {
            let Some(left) = self.leftmost() else { return };
            if self.tiles[left].x + self.tiles[left].width >= 0.0 {
                return;
            }
            let tail = self.tiles.iter().map(|t| t.x + t.width).fold(f64::MIN, f64::max);
            self.tiles[left].x = tail;
        }
    }

    fn leftmost(&self) -> Option<usize> {
        self.tiles
            .iter()
            .enumerate()
            .min_by(|a, b| a.1.x.total_cmp(&b.1.x))
            .map(|(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    fn sorted(strip: &GroundStrip) -> Vec<GroundTile> {
        let mut tiles = strip.tiles().to_vec();
        tiles.sort_by(|a, b| a.x.total_cmp(&b.x));
        tiles
    }

    fn assert_contiguous(strip: &GroundStrip) {
        let tiles = sorted(strip);
        for pair in tiles.windows(2) {
            let gap = pair[1].x - (pair[0].x + pair[0].width);
            assert!(gap.abs() < 1e-9, "gap {gap} between tiles at {} and {}", pair[0].x, pair[1].x);
        }
    }

    #[test]
    fn padded_collision_ignores_grazing_contact() {
        let a = Bounds::new(0.0, 0.0, 40.0, 50.0);
        // Overlaps by 6px horizontally: inside the 8px tolerance.
        let graze = Bounds::new(34.0, 0.0, 20.0, 20.0);
        assert!(!a.collides(&graze, 8.0));
        // Overlaps by 10px.
        let hit = Bounds::new(30.0, 10.0, 20.0, 20.0);
        assert!(a.collides(&hit, 8.0));
        assert!(hit.collides(&a, 8.0));
        // Without padding a graze counts.
        assert!(a.collides(&graze, 0.0));
    }

    #[test]
    fn jump_is_ignored_while_airborne() {
        let mut p = Player::new(&Tuning::default(), 320.0);
        assert!(p.jump());
        p.fall(1.0);
        let v = p.velocity_y;
        assert!(!p.jump());
        assert_eq!(p.velocity_y, v);
        assert!(p.jumping);
    }

    #[test]
    fn zero_slice_keeps_a_fresh_jump() {
        let mut p = Player::new(&Tuning::default(), 320.0);
        p.jump();
        p.fall(0.0);
        assert!(p.jumping);
        assert_eq!(p.velocity_y, -15.0);
        p.fall(1.0);
        assert!(p.y < 320.0);
    }

    #[test]
    fn player_lands_and_clamps_to_ground() {
        let mut p = Player::new(&Tuning::default(), 320.0);
        p.jump();
        for _ in 0..200 {
            p.fall(1.0);
            assert!(p.y <= p.ground_y);
        }
        assert_eq!(p.y, 320.0);
        assert_eq!(p.velocity_y, 0.0);
        assert!(!p.jumping);
    }

    #[test]
    fn obstacle_variants_rest_on_the_floor() {
        let ground_y = 320.0;
        let floor = ground_y + Tuning::default().player_height;
        for kind in ObstacleKind::ALL {
            let o = Obstacle::new(kind, 800.0, ground_y);
            assert_eq!(o.bounds.bottom(), floor, "{kind:?}");
            assert_eq!(o.bounds.x, 800.0);
        }
        let spike = Obstacle::new(ObstacleKind::Spike, 0.0, ground_y);
        assert_eq!((spike.bounds.width, spike.bounds.height), (25.0, 40.0));
        let pillar = Obstacle::new(ObstacleKind::Pillar, 0.0, ground_y);
        assert_eq!((pillar.bounds.width, pillar.bounds.height), (20.0, 70.0));
    }

    #[test]
    fn every_variant_gets_sampled() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(rng.sample::<ObstacleKind, _>(Standard));
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn soul_pulse_stays_in_range() {
        let mut soul = Soul::new(0.0, 100.0, 20.0);
        for _ in 0..100 {
            soul.float_offset += 0.37;
            let p = soul.pulse();
            assert!((0.6..=1.0).contains(&p));
            assert!((soul.bob_y() - 100.0).abs() <= 5.0);
        }
    }

    #[test]
    fn ground_recycles_without_gaps() {
        let mut strip = GroundStrip::new(60.0, 16);
        for _ in 0..500 {
            strip.scroll(7.3);
            assert_contiguous(&strip);
            let tiles = sorted(&strip);
            assert!(tiles[0].x + tiles[0].width >= 0.0);
            assert!(tiles.last().unwrap().x + 60.0 >= 800.0);
        }
        assert_eq!(strip.tiles().len(), 16);
    }

    #[test]
    fn ground_recycles_several_tiles_in_one_large_step() {
        let mut strip = GroundStrip::new(60.0, 7);
        strip.scroll(200.0);
        assert_contiguous(&strip);
        assert!(sorted(&strip)[0].x + 60.0 >= 0.0);
    }

    #[test]
    fn non_finite_scroll_leaves_ground_in_place() {
        let mut strip = GroundStrip::new(60.0, 4);
        let before = strip.tiles().to_vec();
        strip.scroll(f64::INFINITY);
        strip.scroll(f64::NAN);
        assert_eq!(strip.tiles(), &before[..]);
    }
}
