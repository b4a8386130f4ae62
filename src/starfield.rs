use std::f64::consts::TAU;
use crate::config::StarfieldConfig;
use crate::constants::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StarColor {
    White,
    Cyan,
    Purple,
    Pink,
    Gold,
}

const PALETTE: [(StarColor, f64); 5] = [
    (StarColor::White, 0.7),
    (StarColor::Cyan, 0.1),
    (StarColor::Purple, 0.1),
    (StarColor::Pink, 0.05),
    (StarColor::Gold, 0.05),
];

impl StarColor {
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            StarColor::White => (255, 255, 255),
            StarColor::Cyan => (0, 217, 255),
            StarColor::Purple => (168, 85, 247),
            StarColor::Pink => (236, 72, 153),
            StarColor::Gold => (244, 208, 63),
        }
    }

    /// Cumulative-weight pick for a uniform draw in [0, 1).
    pub fn sample(u: f64) -> Self {
        let mut sum = 0.0;
        for (color, weight) in PALETTE {
            sum += weight;
            if u < sum {
                return color;
            }
        }
        StarColor::White
    }

    pub fn rgba(self, alpha: f64) -> String {
        let (r, g, b) = self.rgb();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha)
    }
}

/// Drawing operations the starfield needs from its surface.
pub trait Painter {
    fn clear(&mut self, width: f64, height: f64);
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: StarColor, alpha: f64);
    /// Radial glow from `alpha` at the centre to transparent at `radius`.
    fn fill_glow(&mut self, x: f64, y: f64, radius: f64, color: StarColor, alpha: f64);
    /// White line fading from `alpha` at `head` to transparent at `tail`.
    fn stroke_trail(&mut self, head: (f64, f64), tail: (f64, f64), alpha: f64, width: f64);
}

#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub opacity: f64,
    // Stored but never applied; stars only twinkle.
    #[allow(dead_code)]
    pub drift_speed: f64,
    pub twinkle_speed: f64,
    pub twinkle_phase: f64,
    pub color: StarColor,
}

impl Star {
    fn random(rng: &mut fastrand::Rng, w: f64, h: f64) -> Self {
        Star {
            x: rng.f64() * w,
            y: rng.f64() * h,
            radius: rng.f64() * STAR_MAX_RADIUS,
            opacity: rng.f64(),
            drift_speed: rng.f64() * DRIFT_SPEED_RANGE + DRIFT_SPEED_MIN,
            twinkle_speed: rng.f64() * TWINKLE_SPEED_RANGE + TWINKLE_SPEED_MIN,
            twinkle_phase: rng.f64() * TAU,
            color: StarColor::sample(rng.f64()),
        }
    }

    /// Advances the twinkle and returns the alpha to draw with this frame.
    fn twinkle(&mut self) -> f64 {
        self.twinkle_phase = (self.twinkle_phase + self.twinkle_speed) % TAU;
        let twinkle = (self.twinkle_phase.sin() + 1.0) / 2.0;
        self.opacity * (0.5 + twinkle * 0.5)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShootingStar {
    pub x: f64,
    pub y: f64,
    pub length: f64,
    pub speed: f64,
    pub angle: f64,
    pub opacity: f64,
}

impl ShootingStar {
    fn random(rng: &mut fastrand::Rng, w: f64) -> Self {
        ShootingStar {
            x: rng.f64() * w,
            y: 0.0,
            length: rng.f64() * SHOOTING_STAR_LENGTH_RANGE + SHOOTING_STAR_LENGTH_MIN,
            speed: rng.f64() * SHOOTING_STAR_SPEED_RANGE + SHOOTING_STAR_SPEED_MIN,
            angle: SHOOTING_STAR_ANGLE + (rng.f64() - 0.5) * SHOOTING_STAR_ANGLE_SPREAD,
            opacity: 1.0,
        }
    }

    fn advance(&mut self, fade: f64) {
        self.x += self.angle.cos() * self.speed;
        self.y += self.angle.sin() * self.speed;
        self.opacity -= fade;
    }

    fn tail(&self) -> (f64, f64) {
        (
            self.x - self.angle.cos() * self.length,
            self.y - self.angle.sin() * self.length,
        )
    }
}

/// Stars for a `w`×`h` surface. Densities under one px² per star yield none.
pub fn star_count(w: f64, h: f64, density: f64) -> usize {
    if !density.is_finite() || density < MIN_STAR_DENSITY {
        return 0;
    }
    (w.max(0.0) * h.max(0.0) / density).floor() as usize
}

/// Night-sky simulation: ambient twinkling stars plus transient shooting stars.
pub struct Starfield {
    width: f64,
    height: f64,
    density: f64,
    spawn_chance: f64,
    fade: f64,
    stars: Vec<Star>,
    shooting_stars: Vec<ShootingStar>,
    rng: fastrand::Rng,
}

impl Starfield {
    pub fn new(config: &StarfieldConfig, rng: fastrand::Rng) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            density: config.star_density,
            spawn_chance: config.shooting_star_chance,
            fade: config.shooting_star_fade,
            stars: Vec::new(),
            shooting_stars: Vec::new(),
            rng,
        }
    }

    /// Adopts a new surface size. The ambient stars are thrown away and regenerated.
    pub fn resize(&mut self, w: f64, h: f64) {
        self.width = w;
        self.height = h;
        self.create_stars();
    }

    fn create_stars(&mut self) {
        let count = star_count(self.width, self.height, self.density);
        let (w, h) = (self.width, self.height);
        let rng = &mut self.rng;
        self.stars = (0..count).map(|_| Star::random(rng, w, h)).collect();
    }

    fn maybe_spawn_shooting_star(&mut self) -> bool {
        if self.rng.f64() < self.spawn_chance {
            let star = ShootingStar::random(&mut self.rng, self.width);
            self.shooting_stars.push(star);
            true
        } else {
            false
        }
    }

    /// One animation frame: update every particle and draw it.
    pub fn tick<P: Painter>(&mut self, painter: &mut P) {
        painter.clear(self.width, self.height);

        for star in self.stars.iter_mut() {
            let alpha = star.twinkle();
            painter.fill_circle(star.x, star.y, star.radius, star.color, alpha);
            if star.radius > STAR_GLOW_MIN_RADIUS {
                painter.fill_glow(
                    star.x,
                    star.y,
                    star.radius * STAR_GLOW_SCALE,
                    star.color,
                    alpha * STAR_GLOW_ALPHA,
                );
            }
        }

        self.maybe_spawn_shooting_star();

        let fade = self.fade;
        self.shooting_stars.retain_mut(|s| {
            s.advance(fade);
            if s.opacity > 0.0 {
                painter.stroke_trail((s.x, s.y), s.tail(), s.opacity, SHOOTING_STAR_WIDTH);
                true
            } else {
                false
            }
        });
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }
}
