//! Decorative glyph particles: ambient drift, bursts, confetti rain.
//!
//! Particles live in unit space (x, y ∈ [0, 1]) and are scaled to the
//! terminal at render time. Each carries the generation of the ambient
//! set that spawned it; swapping the set retires everything older than
//! the immediately previous generation, so at most one generation is
//! ever fading out while the new one fades in.

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Confetti palette (RGB). Matches the celebration colors used across
/// the gift burst and the final rain.
pub const CONFETTI_COLORS: [(u8, u8, u8); 7] = [
    (0xff, 0x6b, 0x6b),
    (0x4e, 0xcd, 0xc4),
    (0x45, 0xb7, 0xd1),
    (0x96, 0xce, 0xb4),
    (0xfe, 0xca, 0x57),
    (0xff, 0x9f, 0xf3),
    (0x54, 0xa0, 0xff),
];

const CONFETTI_GLYPHS: [char; 4] = ['●', '■', '◆', '▲'];

/// Hard cap so a long-running final section cannot grow unbounded.
const MAX_PARTICLES: usize = 600;

// ============================================================================
// PARTICLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    vx: f32,
    vy: f32,
    pub glyph: char,
    pub age: u32,
    pub ttl: u32,
    /// `None` renders in the ambient foreground; `Some(rgb)` is confetti.
    pub color: Option<(u8, u8, u8)>,
    generation: u32,
}

impl Particle {
    /// Remaining-life fraction, 1.0 fresh → 0.0 expired.
    pub fn vitality(&self) -> f32 {
        if self.ttl == 0 {
            return 0.0;
        }
        1.0 - self.age as f32 / self.ttl as f32
    }
}

// ============================================================================
// FIELD
// ============================================================================

/// The shared particle pool behind every section.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    glyphs: Vec<char>,
    generation: u32,
    rng: SmallRng,
}

impl ParticleField {
    pub fn new() -> Self {
        ParticleField::with_rng(SmallRng::from_os_rng())
    }

    /// Deterministic field for tests.
    pub fn with_seed(seed: u64) -> Self {
        ParticleField::with_rng(SmallRng::seed_from_u64(seed))
    }

    fn with_rng(rng: SmallRng) -> Self {
        ParticleField {
            particles: Vec::new(),
            glyphs: Vec::new(),
            generation: 0,
            rng,
        }
    }

    /// Replace the ambient glyph set for a new section.
    ///
    /// The outgoing generation keeps fading on its own clock; anything
    /// older than that is dropped outright so unrelated sets never
    /// stack more than one fade-out deep.
    pub fn swap_set(&mut self, glyphs: &[char]) {
        self.generation += 1;
        let floor = self.generation.saturating_sub(1);
        self.particles.retain(|p| p.generation >= floor);
        self.glyphs = glyphs.to_vec();
    }

    /// Spawn `count` ambient glyphs drifting slowly upward.
    pub fn emit_ambient(&mut self, count: usize) {
        if self.glyphs.is_empty() {
            return;
        }
        for _ in 0..count {
            let glyph = self.glyphs[self.rng.random_range(0..self.glyphs.len())];
            let particle = Particle {
                x: self.rng.random_range(0.0..1.0),
                y: self.rng.random_range(0.55..1.0),
                vx: self.rng.random_range(-0.002..0.002),
                vy: -self.rng.random_range(0.003..0.008),
                glyph,
                age: 0,
                ttl: self.rng.random_range(60..150),
                color: None,
                generation: self.generation,
            };
            self.spawn(particle);
        }
    }

    /// Radial confetti burst from the center (gift opening).
    pub fn burst(&mut self, count: usize) {
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(0.01..0.035);
            let color = CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())];
            let glyph = CONFETTI_GLYPHS[self.rng.random_range(0..CONFETTI_GLYPHS.len())];
            let particle = Particle {
                x: 0.5,
                y: 0.5,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed * 0.6,
                glyph,
                age: 0,
                ttl: self.rng.random_range(30..80),
                color: Some(color),
                generation: self.generation,
            };
            self.spawn(particle);
        }
    }

    /// Confetti falling in from the top edge (final section).
    pub fn rain(&mut self, count: usize) {
        for _ in 0..count {
            let color = CONFETTI_COLORS[self.rng.random_range(0..CONFETTI_COLORS.len())];
            let glyph = CONFETTI_GLYPHS[self.rng.random_range(0..CONFETTI_GLYPHS.len())];
            let particle = Particle {
                x: self.rng.random_range(0.0..1.0),
                y: 0.0,
                vx: self.rng.random_range(-0.004..0.004),
                vy: self.rng.random_range(0.008..0.02),
                glyph,
                age: 0,
                ttl: self.rng.random_range(80..160),
                color: Some(color),
                generation: self.generation,
            };
            self.spawn(particle);
        }
    }

    fn spawn(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// One tick of motion and aging. Expired or offscreen particles
    /// are culled.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            // Confetti sinks a little faster as it ages.
            if p.color.is_some() {
                p.vy += 0.0006;
            }
            p.age += 1;
        }
        self.particles
            .retain(|p| p.age < p.ttl && p.y > -0.05 && p.y < 1.05 && p.x > -0.05 && p.x < 1.05);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        ParticleField::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
