//! Simulation state for one surface: session counters, entities and the
//! per-frame step (physics, scrolling, spawning, collision, difficulty).

use rand::Rng;
use rand::distributions::Standard;
use rand::rngs::SmallRng;

use super::entities::{GroundStrip, Obstacle, ObstacleKind, Player, Soul};
use crate::config::Tuning;

/// What happened during one [`World::step`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Souls picked up this frame.
    pub collected: u32,
    /// The player touched an obstacle; the rest of the frame was skipped.
    pub crashed: bool,
}

pub struct World {
    tuning: Tuning,
    width: f64,
    height: f64,
    player: Player,
    obstacles: Vec<Obstacle>,
    souls: Vec<Soul>,
    ground: GroundStrip,
    score: u32,
    speed: f64,
    obstacle_timer: f64,
    soul_timer: f64,
    next_obstacle_at: f64,
    next_soul_at: f64,
    rng: SmallRng,
}

impl World {
    pub fn new(tuning: Tuning, width: u32, height: u32, rng: SmallRng) -> Self {
        let width = width as f64;
        let height = height as f64;
        let ground_y = height - tuning.ground_offset;
        let mut world = Self {
            player: Player::new(&tuning, ground_y),
            ground: GroundStrip::new(tuning.tile_width, tuning.tile_count(width)),
            obstacles: Vec::new(),
            souls: Vec::new(),
            score: 0,
            speed: tuning.base_speed,
            obstacle_timer: 0.0,
            soul_timer: 0.0,
            next_obstacle_at: 0.0,
            next_soul_at: 0.0,
            width,
            height,
            tuning,
            rng,
        };
        world.roll_obstacle_threshold();
        world.roll_soul_threshold();
        world
    }

    // --- Accessors ---------------------------------------------------------------

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Ground-contact line: the player's `y` at rest.
    pub fn ground_y(&self) -> f64 {
        self.player.ground_y
    }

    /// Where feet meet the floor (ground line plus player height).
    pub fn floor_y(&self) -> f64 {
        self.player.ground_y + self.player.height
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn souls(&self) -> &[Soul] {
        &self.souls
    }

    pub fn ground(&self) -> &GroundStrip {
        &self.ground
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Place an obstacle directly, bypassing the spawn timer.
    pub fn push_obstacle(&mut self, obstacle: Obstacle) {
        self.obstacles.push(obstacle);
    }

    /// Place a soul directly, bypassing the spawn timer.
    pub fn push_soul(&mut self, soul: Soul) {
        self.souls.push(soul);
    }

    // --- Lifecycle ---------------------------------------------------------------

    /// Back to a fresh session on the current surface.
    pub fn reset(&mut self) {
        self.score = 0;
        self.speed = self.tuning.base_speed;
        self.obstacles.clear();
        self.souls.clear();
        self.obstacle_timer = 0.0;
        self.soul_timer = 0.0;
        self.roll_obstacle_threshold();
        self.roll_soul_threshold();
        let ground_y = self.height - self.tuning.ground_offset;
        self.player.settle(ground_y);
    }

    /// Adopt a new surface size. Live objects follow the ground line so they
    /// keep resting on the floor.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width as f64;
        self.height = height as f64;
        let ground_y = self.height - self.tuning.ground_offset;
        let shift = ground_y - self.player.ground_y;
        for obstacle in &mut self.obstacles {
            obstacle.bounds.y += shift;
        }
        for soul in &mut self.souls {
            soul.bounds.y += shift;
        }
        self.player.settle(ground_y);
        self.ground = GroundStrip::new(self.tuning.tile_width, self.tuning.tile_count(self.width));
    }

    // --- Step --------------------------------------------------------------------

    /// Advance the simulation by `dt` normalized frames.
    pub fn step(&mut self, dt: f64) -> StepReport {
        let mut report = StepReport::default();
        let travel = self.speed * dt;

        self.player.fall(dt);
        self.ground.scroll(travel);

        self.obstacle_timer += dt;
        if self.obstacle_timer > self.next_obstacle_at {
            self.obstacle_timer = 0.0;
            self.roll_obstacle_threshold();
            self.spawn_obstacle();
        }

        self.soul_timer += dt;
        if self.soul_timer > self.next_soul_at {
            self.soul_timer = 0.0;
            self.roll_soul_threshold();
            self.spawn_soul();
        }

        let player = self.player.bounds();
        let padding = self.tuning.collision_padding;

        self.obstacles.retain_mut(|o| {
            o.bounds.x -= travel;
            o.bounds.right() >= 0.0
        });
        if self.obstacles.iter().any(|o| o.bounds.collides(&player, padding)) {
            report.crashed = true;
            return report;
        }

        let float_step = self.tuning.soul_float_rate * dt;
        self.souls.retain_mut(|soul| {
            soul.bounds.x -= travel;
            soul.float_offset += float_step;
            if soul.bounds.right() < 0.0 {
                return false;
            }
            if player.collides(&soul.bounds, padding) {
                report.collected += 1;
                return false;
            }
            true
        });
        self.score += report.collected * self.tuning.soul_points;

        self.speed = self.tuning.speed_for(self.score);
        report
    }

    fn spawn_obstacle(&mut self) {
        let kind: ObstacleKind = self.rng.sample(Standard);
        self.obstacles.push(Obstacle::new(kind, self.width, self.player.ground_y));
    }

    fn spawn_soul(&mut self) {
        let (low, high) = self.tuning.soul_height;
        let lift = self.rng.gen_range(low..high);
        let soul = Soul::new(self.width, self.player.ground_y - lift, self.tuning.soul_size);
        self.souls.push(soul);
    }

    fn roll_obstacle_threshold(&mut self) {
        let (low, high) = self.tuning.obstacle_interval;
        self.next_obstacle_at = self.rng.gen_range(low..high);
    }

    fn roll_soul_threshold(&mut self) {
        let (low, high) = self.tuning.soul_interval;
        self.next_soul_at = self.rng.gen_range(low..high);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn world(width: u32, height: u32) -> World {
        World::new(Tuning::default(), width, height, SmallRng::seed_from_u64(11))
    }

    fn soul_on_player(w: &World) -> Soul {
        let p = w.player().bounds();
        Soul::new(p.x + 10.0, p.y + 10.0, 20.0)
    }

    #[test]
    fn ground_line_sits_eighty_above_bottom() {
        let w = world(800, 400);
        assert_eq!(w.ground_y(), 320.0);
        assert_eq!(w.player().y, 320.0);
        assert_eq!(w.ground().tiles().len(), 16);
    }

    #[test]
    fn spawns_enter_at_right_edge_and_only_move_left() {
        let mut w = world(800, 400);
        // Out of reach of everything so the run never ends.
        w.player_mut().x = -1_000.0;
        let mut prev: Vec<f64> = Vec::new();
        let mut spawned = 0;
        for _ in 0..1_000 {
            let report = w.step(1.0);
            assert!(!report.crashed);
            let mut xs: Vec<f64> = w.obstacles().iter().map(|o| o.bounds.x).collect();
            // A fresh spawn appears at the edge and scrolls once in the same frame.
            if xs.last() == Some(&795.0) {
                xs.pop();
                spawned += 1;
            }
            let dropped = prev.len() - xs.len();
            for (now, before) in xs.iter().zip(&prev[dropped..]) {
                assert_eq!(*now, before - 5.0);
            }
            prev = w.obstacles().iter().map(|o| o.bounds.x).collect();
        }
        assert!(spawned > 5);
    }

    #[test]
    fn first_obstacle_waits_for_threshold() {
        let mut w = world(800, 400);
        for _ in 0..79 {
            w.step(1.0);
        }
        assert!(w.obstacles().is_empty());
        for _ in 0..62 {
            w.step(1.0);
        }
        assert!(!w.obstacles().is_empty());
    }

    #[test]
    fn souls_spawn_between_fifty_and_one_thirty_above_ground() {
        let mut w = world(800, 400);
        for _ in 0..2_000 {
            w.step(1.0);
            w.obstacles.clear();
            for soul in w.souls() {
                let lift = w.ground_y() - soul.bounds.y;
                assert!(lift > 50.0 - 1e-9 && lift < 130.0 + 1e-9, "lift {lift}");
            }
        }
    }

    #[test]
    fn collecting_a_soul_scores_ten() {
        let mut w = world(800, 400);
        let soul = soul_on_player(&w);
        w.push_soul(soul);
        let report = w.step(0.0);
        assert_eq!(report.collected, 1);
        assert_eq!(w.score(), 10);
        assert!(w.souls().is_empty());
    }

    #[test]
    fn touching_an_obstacle_crashes_and_skips_souls() {
        let mut w = world(800, 400);
        let ground_y = w.ground_y();
        w.push_obstacle(Obstacle::new(ObstacleKind::Shadow, 85.0, ground_y));
        let soul = soul_on_player(&w);
        w.push_soul(soul);
        let report = w.step(0.0);
        assert!(report.crashed);
        assert_eq!(report.collected, 0);
        assert_eq!(w.score(), 0);
        assert_eq!(w.souls().len(), 1);
    }

    #[test]
    fn airborne_player_passes_over_a_spike() {
        let mut w = world(800, 400);
        w.player_mut().jump();
        for _ in 0..5 {
            w.step(1.0);
        }
        let ground_y = w.ground_y();
        w.push_obstacle(Obstacle::new(ObstacleKind::Spike, 85.0, ground_y));
        let report = w.step(1.0);
        assert!(!report.crashed);
        assert!(w.player().jumping);
    }

    #[test]
    fn offscreen_objects_are_dropped() {
        let mut w = world(800, 400);
        let ground_y = w.ground_y();
        w.push_obstacle(Obstacle::new(ObstacleKind::Pillar, -19.0, ground_y));
        w.push_soul(Soul::new(-19.0, 100.0, 20.0));
        w.step(1.0);
        assert!(w.obstacles().is_empty());
        assert!(w.souls().is_empty());
    }

    #[test]
    fn speed_follows_score_steps() {
        let mut w = world(800, 400);
        for expected in [5.0, 5.0, 5.0, 5.0, 5.5, 5.5, 5.5, 5.5, 5.5, 6.0] {
            let soul = soul_on_player(&w);
            w.push_soul(soul);
            w.step(0.0);
            w.obstacles.clear();
            assert_eq!(w.speed(), expected, "score {}", w.score());
        }
        assert_eq!(w.score(), 100);
    }

    #[test]
    fn resize_retiles_and_regrounds() {
        let mut w = world(800, 400);
        let ground_y = w.ground_y();
        w.push_obstacle(Obstacle::new(ObstacleKind::Spike, 500.0, ground_y));
        w.player_mut().jump();
        w.step(1.0);
        w.resize(530, 300);
        assert_eq!(w.ground_y(), 220.0);
        assert_eq!(w.player().y, 220.0);
        assert!(!w.player().jumping);
        assert_eq!(w.ground().tiles().len(), 11);
        assert_eq!(w.obstacles()[0].bounds.bottom(), w.floor_y());
        let tiles = w.ground().tiles();
        for pair in tiles.windows(2) {
            assert_eq!(pair[1].x, pair[0].x + pair[0].width);
        }
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut w = world(800, 400);
        let soul = soul_on_player(&w);
        w.push_soul(soul);
        w.player_mut().jump();
        for _ in 0..30 {
            w.step(1.0);
        }
        w.reset();
        assert_eq!(w.score(), 0);
        assert_eq!(w.speed(), 5.0);
        assert!(w.obstacles().is_empty());
        assert!(w.souls().is_empty());
        assert_eq!(w.player().y, w.ground_y());
        assert_eq!(w.player().velocity_y, 0.0);
        assert!(!w.player().jumping);
    }
}
