//! Closed-form nose and transition profile curves.
//!
//! Each curve maps axial position `x` (measured from the tip) to a radius,
//! with `radius(0) = 0` and `radius(length()) = base radius`. Shape
//! coefficient domains are enforced here, at construction time; evaluation
//! is infallible. Curves are stateless and may be reused across builds.

use std::f64::consts::PI;

use rocketforge_core::error::ValidationError;
use rocketforge_core::geometry::Point2;
use rocketforge_core::params::NoseShape;

/// A validated, ready-to-evaluate profile curve.
#[derive(Debug, Clone)]
pub struct ProfileCurve {
    kind: Curve,
    length: f64,
    radius: f64,
}

/// Precomputed per-family evaluation constants.
#[derive(Debug, Clone, Copy)]
enum Curve {
    Conical,
    Elliptical,
    /// Tangent ogive: rho is the ogive circle radius.
    Ogive { rho: f64 },
    /// Secant ogive: the ogive circle is not tangent at the base.
    Secant { rho: f64, alpha: f64 },
    /// Tangent ogive with a spherical cap. `x_offset` shifts the nominal
    /// ogive coordinate so the cap apex sits at x = 0; `cap_end` is the
    /// tangency point in the shifted frame.
    Blunted {
        rho: f64,
        nominal_length: f64,
        cap_radius: f64,
        cap_center: f64,
        cap_end: f64,
        x_offset: f64,
    },
    Power { exponent: f64 },
    Parabolic { weight: f64 },
    Haack { coefficient: f64 },
}

impl ProfileCurve {
    /// Build a curve for the given shape over `[0, length]` with the given
    /// base radius. Rejects coefficients outside the family's domain.
    pub fn new(shape: NoseShape, length: f64, radius: f64) -> Result<Self, ValidationError> {
        let (kind, effective_length) = match shape {
            NoseShape::Conical => (Curve::Conical, length),
            NoseShape::Elliptical => (Curve::Elliptical, length),
            NoseShape::Ogive => {
                let rho = (radius * radius + length * length) / (2.0 * radius);
                (Curve::Ogive { rho }, length)
            }
            NoseShape::SecantOgive { rho } => {
                let min_rho = (radius * radius + length * length) / (2.0 * radius);
                if rho < min_rho {
                    return Err(ValidationError::InvalidCoefficient {
                        curve: shape.kind(),
                        value: rho,
                        expected: "at least the tangent ogive radius implied by length and diameter",
                    });
                }
                let chord = length.hypot(radius);
                let alpha = (chord / (2.0 * rho)).acos() - (radius / length).atan();
                (Curve::Secant { rho, alpha }, length)
            }
            NoseShape::BluntedOgive { cap_radius } => {
                if cap_radius <= 0.0 || cap_radius >= radius {
                    return Err(ValidationError::InvalidCoefficient {
                        curve: shape.kind(),
                        value: cap_radius,
                        expected: "in (0, base radius)",
                    });
                }
                let rho = (radius * radius + length * length) / (2.0 * radius);
                // Cap center and tangency point in the nominal ogive frame
                // (x from the would-be sharp tip).
                let center = length
                    - ((rho - cap_radius) * (rho - cap_radius)
                        - (rho - radius) * (rho - radius))
                        .sqrt();
                let y_t = cap_radius * (rho - radius) / (rho - cap_radius);
                let x_t = center - (cap_radius * cap_radius - y_t * y_t).sqrt();
                let apex = center - cap_radius;
                (
                    Curve::Blunted {
                        rho,
                        nominal_length: length,
                        cap_radius,
                        cap_center: center - apex,
                        cap_end: x_t - apex,
                        x_offset: apex,
                    },
                    length - apex,
                )
            }
            NoseShape::Power { exponent } => {
                if exponent <= 0.0 || exponent > 1.0 {
                    return Err(ValidationError::InvalidCoefficient {
                        curve: shape.kind(),
                        value: exponent,
                        expected: "in (0, 1]",
                    });
                }
                (Curve::Power { exponent }, length)
            }
            NoseShape::Parabolic { weight } => {
                if !(0.0..=1.0).contains(&weight) {
                    return Err(ValidationError::InvalidCoefficient {
                        curve: shape.kind(),
                        value: weight,
                        expected: "in [0, 1]",
                    });
                }
                (Curve::Parabolic { weight }, length)
            }
            NoseShape::Haack { coefficient } => {
                if coefficient < 0.0 {
                    return Err(ValidationError::InvalidCoefficient {
                        curve: shape.kind(),
                        value: coefficient,
                        expected: "at least 0",
                    });
                }
                (Curve::Haack { coefficient }, length)
            }
        };

        Ok(Self {
            kind,
            length: effective_length,
            radius,
        })
    }

    /// Domain length. Equal to the requested length except for blunted
    /// ogives, where the spherical cap shortens the curve.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Base radius: `radius(length())`.
    pub fn base_radius(&self) -> f64 {
        self.radius
    }

    /// Radius at axial position `x` from the tip, `x` in `[0, length()]`.
    pub fn radius(&self, x: f64) -> f64 {
        let length = self.length;
        let base = self.radius;
        match self.kind {
            Curve::Conical => base * x / length,
            Curve::Elliptical => base * (x * (2.0 * length - x)).max(0.0).sqrt() / length,
            Curve::Ogive { rho } => {
                let dx = length - x;
                (rho * rho - dx * dx).max(0.0).sqrt() + base - rho
            }
            Curve::Secant { rho, alpha } => {
                let dx = x - rho * alpha.cos();
                (rho * rho - dx * dx).max(0.0).sqrt() - rho * alpha.sin()
            }
            Curve::Blunted {
                rho,
                nominal_length,
                cap_radius,
                cap_center,
                cap_end,
                x_offset,
            } => {
                if x <= cap_end {
                    let dx = x - cap_center;
                    (cap_radius * cap_radius - dx * dx).max(0.0).sqrt()
                } else {
                    let dx = nominal_length - (x + x_offset);
                    (rho * rho - dx * dx).max(0.0).sqrt() + base - rho
                }
            }
            Curve::Power { exponent } => base * (x / length).max(0.0).powf(exponent),
            Curve::Parabolic { weight } => {
                let t = x / length;
                base * (2.0 * t - weight * t * t) / (2.0 - weight)
            }
            Curve::Haack { coefficient } => {
                let theta = (1.0 - 2.0 * x / length).clamp(-1.0, 1.0).acos();
                let term = theta - (2.0 * theta).sin() / 2.0
                    + coefficient * theta.sin().powi(3);
                base / PI.sqrt() * term.max(0.0).sqrt()
            }
        }
    }

    /// `n + 1` evenly spaced samples from tip to base, as (x, r) points.
    pub fn sample(&self, n: u32) -> Vec<Point2> {
        let n = n.max(2);
        (0..=n)
            .map(|i| {
                let x = self.length * f64::from(i) / f64::from(n);
                Point2::new(x, self.radius(x))
            })
            .collect()
    }
}
