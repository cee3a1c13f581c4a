//! Transition generating profiles.
//!
//! Component frame: the forward end is at x = 0, the aft end at
//! x = length; shoulders extend beyond either end. y is the radius and
//! the profile is revolved about the x axis. Fore and aft diameters may
//! be in either relation; the curve always spans from the smaller radius
//! toward the larger.

use rocketforge_core::error::ConstructionError;
use rocketforge_core::geometry::{
    GeneratingProfile, Point2, ProfileSegment, PROFILE_TOLERANCE,
};
use rocketforge_core::params::{ComponentFamily, TransitionParams, TransitionStyle};

use crate::curves::ProfileCurve;

fn invalid() -> ConstructionError {
    ConstructionError::InvalidShape {
        family: ComponentFamily::Transition,
        source: None,
    }
}

/// One piece of a boundary walk: a corner joined by straight lines, or a
/// pre-sampled curve section.
enum Piece {
    Corner(Point2),
    Curve(Vec<Point2>),
}

/// Chain pieces into a closed profile, bridging any gap back to the start.
fn assemble(pieces: Vec<Piece>) -> GeneratingProfile {
    let mut segments = Vec::new();
    let mut start: Option<Point2> = None;
    let mut current: Option<Point2> = None;

    for piece in pieces {
        match piece {
            Piece::Corner(p) => {
                if let Some(c) = current {
                    if c.distance_to(&p) > PROFILE_TOLERANCE {
                        segments.push(ProfileSegment::Line { from: c, to: p });
                    }
                }
                start.get_or_insert(p);
                current = Some(p);
            }
            Piece::Curve(points) => {
                if let Some(c) = current {
                    if c.distance_to(&points[0]) > PROFILE_TOLERANCE {
                        segments.push(ProfileSegment::Line {
                            from: c,
                            to: points[0],
                        });
                    }
                }
                start.get_or_insert(points[0]);
                current = Some(points[points.len() - 1]);
                segments.push(ProfileSegment::Spline { points });
            }
        }
    }

    if let (Some(s), Some(c)) = (start, current) {
        if c.distance_to(&s) > PROFILE_TOLERANCE {
            segments.push(ProfileSegment::Line { from: c, to: s });
        }
    }
    GeneratingProfile::new(segments)
}

/// Build the closed generating profile for a transition.
pub fn transition_profile(
    p: &TransitionParams,
) -> Result<GeneratingProfile, ConstructionError> {
    let length = p.length;
    let fore_r = p.fore_radius();
    let aft_r = p.aft_radius();
    let spread = aft_r - fore_r;
    let min_r = fore_r.min(aft_r);

    let curve = if spread.abs() > PROFILE_TOLERANCE {
        Some(ProfileCurve::new(p.shape, length, spread.abs()).map_err(|_| invalid())?)
    } else {
        None
    };
    // Outer radius at axial position x, exact at both ends. The curve
    // runs tip-to-base from the smaller end; blunted curves are shorter
    // than nominal, so the axial coordinate is rescaled onto the curve
    // domain.
    let radius_at = |x: f64| -> f64 {
        match &curve {
            None => fore_r,
            Some(c) => {
                let along = if spread > 0.0 { x } else { length - x };
                min_r + c.radius(along * c.length() / length)
            }
        }
    };

    let resolution = p.resolution.max(2);
    let sample = |offset: f64, lo: f64, hi: f64| -> Vec<Point2> {
        (0..=resolution)
            .map(|i| {
                let x = lo + (hi - lo) * f64::from(i) / f64::from(resolution);
                Point2::new(x, radius_at(x) + offset)
            })
            .collect()
    };

    // The walks below run counterclockwise: forward lower corner, along
    // the floor or cavity wall to the aft end, up the aft face, back
    // along the reversed outer curve, and down the forward face.
    let mut outer = sample(0.0, 0.0, length);
    outer.reverse();

    let mut pieces: Vec<Piece> = Vec::new();
    match p.style {
        TransitionStyle::Solid | TransitionStyle::SolidCore => {
            let floor = match p.style {
                TransitionStyle::SolidCore => {
                    p.core_diameter.unwrap_or(0.0) / 2.0
                }
                _ => 0.0,
            };
            match &p.fore_shoulder {
                None => pieces.push(Piece::Corner(Point2::new(0.0, floor))),
                Some(s) => pieces.push(Piece::Corner(Point2::new(-s.length, floor))),
            }
            match &p.aft_shoulder {
                None => pieces.push(Piece::Corner(Point2::new(length, floor))),
                Some(s) => {
                    pieces.push(Piece::Corner(Point2::new(length + s.length, floor)));
                    pieces.push(Piece::Corner(Point2::new(
                        length + s.length,
                        s.radius(),
                    )));
                    pieces.push(Piece::Corner(Point2::new(length, s.radius())));
                }
            }
            pieces.push(Piece::Corner(Point2::new(length, aft_r)));
            pieces.push(Piece::Curve(outer));
            pieces.push(Piece::Corner(Point2::new(0.0, fore_r)));
            if let Some(s) = &p.fore_shoulder {
                pieces.push(Piece::Corner(Point2::new(0.0, s.radius())));
                pieces.push(Piece::Corner(Point2::new(-s.length, s.radius())));
            }
            // Closing line back to the forward floor corner is implicit.
        }
        TransitionStyle::Hollow => {
            let t = p.thickness;
            // An open end keeps the cavity flush with the end plane; a
            // shoulder instead meets the cavity at a shelf one wall
            // thickness in.
            let lo = if p.fore_shoulder.is_some() { t } else { 0.0 };
            let hi = if p.aft_shoulder.is_some() { length - t } else { length };
            let inner = sample(-t, lo, hi);

            match &p.fore_shoulder {
                None => pieces.push(Piece::Corner(Point2::new(0.0, fore_r - t))),
                Some(s) => {
                    let bore = s.radius() - s.thickness;
                    pieces.push(Piece::Corner(Point2::new(-s.length, bore)));
                    pieces.push(Piece::Corner(Point2::new(t, bore)));
                }
            }
            pieces.push(Piece::Curve(inner));
            if let Some(s) = &p.aft_shoulder {
                let bore = s.radius() - s.thickness;
                pieces.push(Piece::Corner(Point2::new(length - t, bore)));
                pieces.push(Piece::Corner(Point2::new(length + s.length, bore)));
                pieces.push(Piece::Corner(Point2::new(
                    length + s.length,
                    s.radius(),
                )));
                pieces.push(Piece::Corner(Point2::new(length, s.radius())));
            }
            pieces.push(Piece::Corner(Point2::new(length, aft_r)));
            pieces.push(Piece::Curve(outer));
            pieces.push(Piece::Corner(Point2::new(0.0, fore_r)));
            if let Some(s) = &p.fore_shoulder {
                pieces.push(Piece::Corner(Point2::new(0.0, s.radius())));
                pieces.push(Piece::Corner(Point2::new(-s.length, s.radius())));
            }
        }
        TransitionStyle::Capped => {
            // A cap closes each outermost open end: the body end itself,
            // or the far end of the shoulder when one is fitted. The
            // cavity always spans [t, length - t], reached through the
            // shoulder bore when one is present.
            let t = p.thickness;
            let inner = sample(-t, t, length - t);

            match &p.fore_shoulder {
                None => pieces.push(Piece::Corner(Point2::new(t, 0.0))),
                Some(s) => {
                    let bore = s.radius() - s.thickness;
                    pieces.push(Piece::Corner(Point2::new(
                        -s.length + s.thickness,
                        0.0,
                    )));
                    pieces.push(Piece::Corner(Point2::new(
                        -s.length + s.thickness,
                        bore,
                    )));
                    pieces.push(Piece::Corner(Point2::new(t, bore)));
                }
            }
            pieces.push(Piece::Curve(inner));
            match &p.aft_shoulder {
                None => {
                    pieces.push(Piece::Corner(Point2::new(length - t, 0.0)));
                    pieces.push(Piece::Corner(Point2::new(length, 0.0)));
                }
                Some(s) => {
                    let bore = s.radius() - s.thickness;
                    pieces.push(Piece::Corner(Point2::new(length - t, bore)));
                    pieces.push(Piece::Corner(Point2::new(
                        length + s.length - s.thickness,
                        bore,
                    )));
                    pieces.push(Piece::Corner(Point2::new(
                        length + s.length - s.thickness,
                        0.0,
                    )));
                    pieces.push(Piece::Corner(Point2::new(length + s.length, 0.0)));
                    pieces.push(Piece::Corner(Point2::new(
                        length + s.length,
                        s.radius(),
                    )));
                    pieces.push(Piece::Corner(Point2::new(length, s.radius())));
                }
            }
            pieces.push(Piece::Corner(Point2::new(length, aft_r)));
            pieces.push(Piece::Curve(outer));
            pieces.push(Piece::Corner(Point2::new(0.0, fore_r)));
            match &p.fore_shoulder {
                None => pieces.push(Piece::Corner(Point2::new(0.0, 0.0))),
                Some(s) => {
                    pieces.push(Piece::Corner(Point2::new(0.0, s.radius())));
                    pieces.push(Piece::Corner(Point2::new(-s.length, s.radius())));
                    pieces.push(Piece::Corner(Point2::new(-s.length, 0.0)));
                }
            }
        }
    }

    let profile = assemble(pieces);
    if !profile.is_closed() || profile.self_intersects() {
        return Err(invalid());
    }
    Ok(profile)
}
