use std::f64::consts::{FRAC_PI_2, PI};

use serde::{Deserialize, Serialize};

/// Easing curves available to states and tweens.
///
/// Every curve maps `0.0 -> 0.0` and `1.0 -> 1.0`; input outside `[0, 1]` is
/// clamped first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    #[default]
    Linear,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    PolyIn(f64),
    PolyOut(f64),
    PolyInOut(f64),
    SineIn,
    SineOut,
    SineInOut,
    ExpIn,
    ExpOut,
    ExpInOut,
    CircleIn,
    CircleOut,
    CircleInOut,
    BounceOut,
    ElasticOut,
}

impl Easing {
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match self {
            Self::Linear => t,
            Self::QuadIn => poly_in(t, 2.0),
            Self::QuadOut => poly_out(t, 2.0),
            Self::QuadInOut => poly_in_out(t, 2.0),
            Self::CubicIn => poly_in(t, 3.0),
            Self::CubicOut => poly_out(t, 3.0),
            Self::CubicInOut => poly_in_out(t, 3.0),
            Self::PolyIn(exponent) => poly_in(t, sanitize_exponent(exponent)),
            Self::PolyOut(exponent) => poly_out(t, sanitize_exponent(exponent)),
            Self::PolyInOut(exponent) => poly_in_out(t, sanitize_exponent(exponent)),
            Self::SineIn => 1.0 - (t * FRAC_PI_2).cos(),
            Self::SineOut => (t * FRAC_PI_2).sin(),
            Self::SineInOut => (1.0 - (PI * t).cos()) / 2.0,
            Self::ExpIn => 2f64.powf(10.0 * t - 10.0),
            Self::ExpOut => 1.0 - 2f64.powf(-10.0 * t),
            Self::ExpInOut => {
                if t < 0.5 {
                    2f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::CircleIn => 1.0 - (1.0 - t * t).sqrt(),
            Self::CircleOut => (1.0 - (t - 1.0).powi(2)).sqrt(),
            Self::CircleInOut => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            Self::BounceOut => bounce_out(t),
            Self::ElasticOut => {
                let period = (2.0 * PI) / 3.0;
                2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * period).sin() + 1.0
            }
        }
    }
}

fn sanitize_exponent(exponent: f64) -> f64 {
    if exponent.is_finite() && exponent > 0.0 {
        exponent
    } else {
        1.0
    }
}

fn poly_in(t: f64, exponent: f64) -> f64 {
    t.powf(exponent)
}

fn poly_out(t: f64, exponent: f64) -> f64 {
    1.0 - (1.0 - t).powf(exponent)
}

fn poly_in_out(t: f64, exponent: f64) -> f64 {
    if t < 0.5 {
        (2.0 * t).powf(exponent) / 2.0
    } else {
        (2.0 - (2.0 - 2.0 * t).powf(exponent)) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}
