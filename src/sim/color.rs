//! Ball colors and the mixing rule
//!
//! Colors are RGB triples normalized to [0, 1]. Mixing happens in HSV space so
//! two saturated colors blend into another saturated color instead of drifting
//! toward grey.

use std::cmp::Ordering;

use rand::Rng;

/// Saturation range for freshly spawned balls
const SPAWN_SATURATION: (f32, f32) = (0.65, 1.0);
/// Value (brightness) range for freshly spawned balls
const SPAWN_VALUE: (f32, f32) = (0.7, 1.0);

/// RGB color, components in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from hue, saturation, value (all in [0, 1])
    pub fn from_hsv(h: f32, s: f32, v: f32) -> Self {
        if s <= 0.0 {
            return Self::new(v, v, v);
        }
        let h6 = h.rem_euclid(1.0) * 6.0;
        let sector = h6.floor();
        let f = h6 - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - s * f);
        let t = v * (1.0 - s * (1.0 - f));
        match sector as u32 % 6 {
            0 => Self::new(v, t, p),
            1 => Self::new(q, v, p),
            2 => Self::new(p, v, t),
            3 => Self::new(p, q, v),
            4 => Self::new(t, p, v),
            _ => Self::new(v, p, q),
        }
    }

    /// Convert to (hue, saturation, value)
    pub fn to_hsv(self) -> (f32, f32, f32) {
        let max = self.r.max(self.g).max(self.b);
        let min = self.r.min(self.g).min(self.b);
        let v = max;
        if max <= min || max <= 0.0 {
            return (0.0, 0.0, v);
        }
        let delta = max - min;
        let s = delta / max;
        let rc = (max - self.r) / delta;
        let gc = (max - self.g) / delta;
        let bc = (max - self.b) / delta;
        let h = if self.r == max {
            bc - gc
        } else if self.g == max {
            2.0 + rc - bc
        } else {
            4.0 + gc - rc
        };
        ((h / 6.0).rem_euclid(1.0), s, v)
    }

    /// Random vivid color
    pub fn random(rng: &mut impl Rng) -> Self {
        let h = rng.random::<f32>();
        let s = rng.random_range(SPAWN_SATURATION.0..=SPAWN_SATURATION.1);
        let v = rng.random_range(SPAWN_VALUE.0..=SPAWN_VALUE.1);
        Self::from_hsv(h, s, v)
    }

    /// Clamp every component into [0, 1]
    pub fn clamped(self) -> Self {
        Self::new(
            self.r.clamp(0.0, 1.0),
            self.g.clamp(0.0, 1.0),
            self.b.clamp(0.0, 1.0),
        )
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        let c = self.clamped();
        [c.r, c.g, c.b, alpha]
    }

    /// Total order over colors, used to canonicalize mixing operands
    fn total_cmp(&self, other: &Self) -> Ordering {
        self.r
            .total_cmp(&other.r)
            .then(self.g.total_cmp(&other.g))
            .then(self.b.total_cmp(&other.b))
    }
}

/// Blend two colors.
///
/// Hue is averaged along the shorter arc of the color wheel, saturation and
/// value lean toward the stronger operand. `mix(a, b) == mix(b, a)` holds
/// bit-for-bit because the operands are sorted first.
pub fn mix(a: Color, b: Color) -> Color {
    let (first, second) = if a.total_cmp(&b) == Ordering::Greater {
        (b, a)
    } else {
        (a, b)
    };

    let (h1, s1, v1) = first.to_hsv();
    let (h2, s2, v2) = second.to_hsv();

    let hue_diff = (h2 - h1 + 0.5).rem_euclid(1.0) - 0.5;
    let h = (h1 + hue_diff * 0.5).rem_euclid(1.0);

    let mut s = ((s1 + s2) / 2.0 + 0.2 * (s1 - s2).abs()).min(1.0);
    let mut v = (v1.max(v2) * 0.9 + (v1 + v2) / 2.0 * 0.1).min(1.0);

    // Near-white mixes get a saturation kick
    if s < 0.15 && v > 0.85 {
        s = 0.25;
        v = (v - 0.1).max(0.7);
    }

    Color::from_hsv(h, s, v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn approx(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn test_hsv_primaries() {
        assert!(approx(Color::from_hsv(0.0, 1.0, 1.0), Color::new(1.0, 0.0, 0.0)));
        assert!(approx(Color::from_hsv(1.0 / 3.0, 1.0, 1.0), Color::new(0.0, 1.0, 0.0)));
        assert!(approx(Color::from_hsv(2.0 / 3.0, 1.0, 1.0), Color::new(0.0, 0.0, 1.0)));
        assert!(approx(Color::from_hsv(0.5, 0.0, 0.4), Color::new(0.4, 0.4, 0.4)));
    }

    #[test]
    fn test_hsv_roundtrip_of_random_colors() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            let c = Color::random(&mut rng);
            let (h, s, v) = c.to_hsv();
            assert!(approx(Color::from_hsv(h, s, v), c));
        }
    }

    #[test]
    fn test_black_has_no_hue() {
        assert_eq!(Color::new(0.0, 0.0, 0.0).to_hsv(), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_mix_is_symmetric() {
        let red = Color::new(1.0, 0.0, 0.0);
        let blue = Color::new(0.0, 0.2, 0.9);
        assert_eq!(mix(red, blue), mix(blue, red));
    }

    #[test]
    fn test_mix_red_and_yellow_is_orange() {
        let red = Color::from_hsv(0.0, 1.0, 1.0);
        let yellow = Color::from_hsv(1.0 / 6.0, 1.0, 1.0);
        let (h, s, v) = mix(red, yellow).to_hsv();
        assert!((h - 1.0 / 12.0).abs() < 1e-4);
        assert!((s - 1.0).abs() < 1e-4);
        assert!((v - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_mix_takes_shorter_hue_arc() {
        // 0.9 and 0.1 meet at 0.0 (red), not at 0.5 (cyan)
        let a = Color::from_hsv(0.9, 1.0, 1.0);
        let b = Color::from_hsv(0.1, 1.0, 1.0);
        let (h, _, _) = mix(a, b).to_hsv();
        assert!(h < 0.01 || h > 0.99, "hue was {h}");
    }

    #[test]
    fn test_mix_avoids_white() {
        let white = Color::new(1.0, 1.0, 1.0);
        let (_, s, v) = mix(white, white).to_hsv();
        assert!((s - 0.25).abs() < 1e-4);
        assert!((v - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_random_colors_are_vivid() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..100 {
            let (_, s, v) = Color::random(&mut rng).to_hsv();
            assert!(s >= 0.65 - 1e-4);
            assert!(v >= 0.7 - 1e-4);
        }
    }
}
