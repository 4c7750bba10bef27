/// Particle effects: short-lived decorative points in pixel space.
///
/// A particle lives for a fixed number of ticks derived from the life step
/// (0.02 → 50 ticks). Its `life()` runs from 1.0 down in equal steps and
/// the particle is pruned on the tick where life reaches 0, so no particle
/// is ever observed with life ≤ 0.

use std::f32::consts::PI;

use rand::Rng;

use super::palette::{self, Rgb};

#[derive(Clone, Debug)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub dx: f32,
    pub dy: f32,
    pub color: Rgb,
    ticks_left: u32,
    lifespan: u32,
}

impl Particle {
    /// Opacity / remaining life in (0, 1].
    pub fn life(&self) -> f32 {
        self.ticks_left as f32 / self.lifespan as f32
    }

    /// Advance one tick. Returns true if the particle is still alive.
    fn tick(&mut self) -> bool {
        self.x += self.dx;
        self.y += self.dy;
        self.ticks_left = self.ticks_left.saturating_sub(1);
        self.ticks_left > 0
    }
}

/// How velocity angles are chosen for a burst.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Spread {
    /// `count` evenly spaced angles around the circle.
    Even,
    /// Independent uniform angle per particle.
    Random,
}

/// Where a burst's particles start.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Origin {
    Point(f32, f32),
    /// Uniformly random points over a `width` x `height` surface.
    Anywhere { width: f32, height: f32 },
}

#[derive(Clone, Copy, Debug)]
pub struct Burst<'a> {
    pub count: usize,
    pub palette: &'a [Rgb],
    /// Speed in pixels per tick, sampled in [min, max).
    pub speed: (f32, f32),
    pub spread: Spread,
}

impl Burst<'static> {
    /// Food-eaten explosion: even ring, speed 2..4.
    pub fn explosion(count: usize) -> Self {
        Burst { count, palette: &palette::EXPLOSION, speed: (2.0, 4.0), spread: Spread::Even }
    }

    /// New-high-score celebration: random angles, speed 1..4.
    pub fn celebration(count: usize) -> Self {
        Burst { count, palette: &palette::CELEBRATION, speed: (1.0, 4.0), spread: Spread::Random }
    }
}

pub struct ParticleSystem {
    particles: Vec<Particle>,
    lifespan: u32,
}

impl ParticleSystem {
    /// `life_step` is how much life a particle loses per tick.
    pub fn new(life_step: f32) -> Self {
        let lifespan = if life_step > 0.0 { (1.0 / life_step).round().max(1.0) as u32 } else { 1 };
        ParticleSystem { particles: Vec::new(), lifespan }
    }

    pub fn spawn_burst<R: Rng + ?Sized>(&mut self, rng: &mut R, origin: Origin, burst: &Burst) {
        if burst.palette.is_empty() { return; }
        self.particles.reserve(burst.count);

        for i in 0..burst.count {
            let angle = match burst.spread {
                Spread::Even => (PI * 2.0 / burst.count as f32) * i as f32,
                Spread::Random => rng.gen::<f32>() * PI * 2.0,
            };
            let (lo, hi) = burst.speed;
            let speed = lo + rng.gen::<f32>() * (hi - lo);
            let (x, y) = match origin {
                Origin::Point(x, y) => (x, y),
                Origin::Anywhere { width, height } => (rng.gen::<f32>() * width, rng.gen::<f32>() * height),
            };
            let color = burst.palette[rng.gen_range(0..burst.palette.len())];

            self.particles.push(Particle {
                x, y,
                dx: angle.cos() * speed,
                dy: angle.sin() * speed,
                color,
                ticks_left: self.lifespan,
                lifespan: self.lifespan,
            });
        }
    }

    /// Move every particle by its velocity, age it one tick, drop the dead.
    pub fn update_and_prune(&mut self) {
        self.particles.retain_mut(Particle::tick);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    #[cfg(test)]
    pub fn lifespan(&self) -> u32 {
        self.lifespan
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn lifespan_from_step() {
        assert_eq!(ParticleSystem::new(0.02).lifespan(), 50);
        assert_eq!(ParticleSystem::new(0.1).lifespan(), 10);
    }

    #[test]
    fn explosion_ring_from_center() {
        let mut ps = ParticleSystem::new(0.02);
        ps.spawn_burst(&mut rng(), Origin::Point(130.0, 110.0), &Burst::explosion(20));
        assert_eq!(ps.len(), 20);
        for p in ps.iter() {
            assert_eq!((p.x, p.y), (130.0, 110.0));
            assert_eq!(p.life(), 1.0);
            let speed = (p.dx * p.dx + p.dy * p.dy).sqrt();
            assert!(speed >= 1.999 && speed < 4.001, "speed {speed}");
            assert!(palette::EXPLOSION.contains(&p.color));
        }
        // first particle points straight right (angle 0)
        let first = ps.iter().next().unwrap();
        assert!(first.dy.abs() < 1e-5 && first.dx > 0.0);
    }

    #[test]
    fn celebration_scatters_over_surface() {
        let mut ps = ParticleSystem::new(0.02);
        let origin = Origin::Anywhere { width: 400.0, height: 400.0 };
        ps.spawn_burst(&mut rng(), origin, &Burst::celebration(50));
        assert_eq!(ps.len(), 50);
        for p in ps.iter() {
            assert!((0.0..400.0).contains(&p.x) && (0.0..400.0).contains(&p.y));
            let speed = (p.dx * p.dx + p.dy * p.dy).sqrt();
            assert!(speed >= 0.999 && speed < 4.001, "speed {speed}");
            assert!(palette::CELEBRATION.contains(&p.color));
        }
    }

    #[test]
    fn update_moves_by_velocity() {
        let mut ps = ParticleSystem::new(0.02);
        ps.spawn_burst(&mut rng(), Origin::Point(0.0, 0.0), &Burst::explosion(4));
        let before: Vec<(f32, f32, f32, f32)> = ps.iter().map(|p| (p.x, p.y, p.dx, p.dy)).collect();
        ps.update_and_prune();
        for (p, (x, y, dx, dy)) in ps.iter().zip(before) {
            assert!((p.x - (x + dx)).abs() < 1e-5);
            assert!((p.y - (y + dy)).abs() < 1e-5);
        }
    }

    #[test]
    fn life_decreases_by_step_and_prunes_exactly() {
        let mut ps = ParticleSystem::new(0.02);
        ps.spawn_burst(&mut rng(), Origin::Point(0.0, 0.0), &Burst::explosion(3));

        let mut prev = 1.0_f32;
        for tick in 1..50 {
            ps.update_and_prune();
            assert_eq!(ps.len(), 3, "alive at tick {tick}");
            let life = ps.iter().next().unwrap().life();
            assert!((prev - life - 0.02).abs() < 1e-5, "tick {tick}: {prev} -> {life}");
            assert!(life > 0.0);
            prev = life;
        }
        // 50th tick brings life to 0 → removed
        ps.update_and_prune();
        assert!(ps.is_empty());
    }

    #[test]
    fn bursts_age_independently() {
        let mut ps = ParticleSystem::new(0.1); // 10 ticks
        let mut r = rng();
        ps.spawn_burst(&mut r, Origin::Point(0.0, 0.0), &Burst::explosion(2));
        for _ in 0..5 { ps.update_and_prune(); }
        ps.spawn_burst(&mut r, Origin::Point(0.0, 0.0), &Burst::explosion(3));
        assert_eq!(ps.len(), 5);
        for _ in 0..5 { ps.update_and_prune(); }
        assert_eq!(ps.len(), 3);
        for _ in 0..5 { ps.update_and_prune(); }
        assert!(ps.is_empty());
    }

    #[test]
    fn empty_palette_spawns_nothing() {
        let mut ps = ParticleSystem::new(0.02);
        let burst = Burst { count: 10, palette: &[], speed: (1.0, 2.0), spread: Spread::Random };
        ps.spawn_burst(&mut rng(), Origin::Point(0.0, 0.0), &burst);
        assert!(ps.is_empty());
    }
}
