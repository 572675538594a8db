//! Easing functions for animations
//!
//! Besides the CSS-style curves, this module carries the mobile platform
//! interpolators used by the view presets: accelerate, accelerate-decelerate,
//! anticipate, overshoot, and fast-out-slow-in.

use std::f32::consts::PI;

/// Default tension for [`Easing::Anticipate`] and [`Easing::Overshoot`]
pub const DEFAULT_TENSION: f32 = 2.0;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    #[default]
    Linear,
    /// Starts slow and speeds up (`t²`)
    Accelerate,
    /// Starts and ends slowly, faster through the middle (cosine curve)
    AccelerateDecelerate,
    /// Pulls back before moving forward; the tension controls how far
    Anticipate(f32),
    /// Flings past the end value then settles back; the tension controls how far
    Overshoot(f32),
    /// Material standard curve, `cubic-bezier(0.4, 0, 0.2, 1)`
    FastOutSlowIn,
    /// Cubic ease-in
    EaseIn,
    EaseOut,
    EaseInOut,
    /// CSS-style `cubic-bezier(x1, y1, x2, y2)`
    CubicBezier(f32, f32, f32, f32),
}

impl Easing {
    /// Anticipate with the platform default tension
    pub const fn anticipate() -> Self {
        Easing::Anticipate(DEFAULT_TENSION)
    }

    /// Overshoot with the platform default tension
    pub const fn overshoot() -> Self {
        Easing::Overshoot(DEFAULT_TENSION)
    }

    /// Apply the easing function to a progress value (0.0 to 1.0)
    ///
    /// Anticipate and overshoot intentionally leave the 0..1 range in the
    /// middle of the curve; endpoints always map to 0.0 and 1.0.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::AccelerateDecelerate => (((t + 1.0) * PI).cos() / 2.0) + 0.5,
            Easing::Anticipate(tension) => t * t * ((tension + 1.0) * t - tension),
            Easing::Overshoot(tension) => {
                let s = t - 1.0;
                s * s * ((tension + 1.0) * s + tension) + 1.0
            }
            Easing::FastOutSlowIn => cubic_bezier_ease(t, 0.4, 0.0, 0.2, 1.0),
            Easing::EaseIn => t * t * t,
            Easing::EaseOut => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::CubicBezier(x1, y1, x2, y2) => cubic_bezier_ease(t, *x1, *y1, *x2, *y2),
        }
    }
}

/// Cubic bezier easing calculation (matches CSS spec / browser implementations).
///
/// Uses Newton-Raphson with binary-search fallback for robustness.
/// Computes in f64 internally to avoid f32 precision jitter at 120fps.
fn cubic_bezier_ease(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    // Endpoints are always exact
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let x = t as f64;
    let x1 = x1 as f64;
    let y1 = y1 as f64;
    let x2 = x2 as f64;
    let y2 = y2 as f64;

    // Solve for parameter `p` where bezier_x(p) == x using Newton-Raphson,
    // falling back to binary search if the slope is too flat.
    let mut p = x; // initial guess
    for _ in 0..8 {
        let err = bezier_sample(p, x1, x2) - x;
        if err.abs() < 1e-7 {
            return bezier_sample(p, y1, y2) as f32;
        }
        let slope = bezier_slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break; // slope too flat, switch to binary search
        }
        p -= err / slope;
    }

    // Binary search fallback (always converges)
    let mut lo = 0.0_f64;
    let mut hi = 1.0_f64;
    p = x;
    for _ in 0..20 {
        let val = bezier_sample(p, x1, x2);
        if (val - x).abs() < 1e-7 {
            break;
        }
        if val < x {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    bezier_sample(p, y1, y2) as f32
}

/// Evaluate cubic bezier at parameter t: B(t) = 3(1-t)²t·p1 + 3(1-t)t²·p2 + t³
#[inline]
fn bezier_sample(t: f64, p1: f64, p2: f64) -> f64 {
    // Horner form: ((1-3p2+3p1)t + 3p2-6p1)t + 3p1) * t
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

/// Derivative of cubic bezier: B'(t) = 3(1-t)²·p1 + 6(1-t)t·(p2-p1) + 3t²·(1-p2)
#[inline]
fn bezier_slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::Accelerate,
        Easing::AccelerateDecelerate,
        Easing::Anticipate(DEFAULT_TENSION),
        Easing::Anticipate(4.0),
        Easing::Overshoot(DEFAULT_TENSION),
        Easing::FastOutSlowIn,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn test_endpoints() {
        for easing in ALL {
            assert_abs_diff_eq!(easing.apply(0.0), 0.0, epsilon = 1e-5);
            assert_abs_diff_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_accelerate_decelerate_midpoint() {
        assert_abs_diff_eq!(Easing::AccelerateDecelerate.apply(0.5), 0.5, epsilon = 1e-5);
        assert!(Easing::AccelerateDecelerate.apply(0.25) < 0.25);
    }

    #[test]
    fn test_anticipate_pulls_back() {
        // t²(3t - 2) is negative below t = 2/3
        assert!(Easing::anticipate().apply(0.3) < 0.0);
        assert!(Easing::Anticipate(4.0).apply(0.3) < Easing::anticipate().apply(0.3));
    }

    #[test]
    fn test_overshoot_passes_end() {
        assert!(Easing::overshoot().apply(0.8) > 1.0);
    }

    #[test]
    fn test_fast_out_slow_in_is_monotonic() {
        let mut last = 0.0;
        for i in 1..=20 {
            let v = Easing::FastOutSlowIn.apply(i as f32 / 20.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn test_ease_in_out_family() {
        assert_abs_diff_eq!(Easing::EaseIn.apply(0.5), 0.125, epsilon = 1e-6);
        assert_abs_diff_eq!(Easing::EaseOut.apply(0.5), 0.875, epsilon = 1e-6);
        assert_abs_diff_eq!(Easing::EaseInOut.apply(0.5), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(Easing::EaseInOut.apply(0.25), 0.0625, epsilon = 1e-6);

        // Ease-out mirrors ease-in
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_abs_diff_eq!(
                Easing::EaseOut.apply(t),
                1.0 - Easing::EaseIn.apply(1.0 - t),
                epsilon = 1e-5
            );
        }
    }

    #[test]
    fn test_cubic_bezier() {
        // Control points on the diagonal give a straight line
        let straight = Easing::CubicBezier(0.25, 0.25, 0.75, 0.75);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert_abs_diff_eq!(straight.apply(t), t, epsilon = 1e-4);
        }

        assert_eq!(
            Easing::CubicBezier(0.4, 0.0, 0.2, 1.0).apply(0.3),
            Easing::FastOutSlowIn.apply(0.3)
        );
        // CSS `ease` is ahead of linear at the midpoint
        assert!(Easing::CubicBezier(0.25, 0.1, 0.25, 1.0).apply(0.5) > 0.5);
    }
}
