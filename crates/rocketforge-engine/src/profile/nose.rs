//! Nose cone generating profiles.
//!
//! Component frame: the base plane is x = 0, the tip points toward +x,
//! and the shoulder (when present) extends into negative x. y is the
//! radius. The profile is revolved about the x axis.

use rocketforge_core::error::ConstructionError;
use rocketforge_core::geometry::{GeneratingProfile, Point2, ProfileSegment};
use rocketforge_core::params::{ComponentFamily, NoseConeParams, NoseShape, WallStyle};

use crate::curves::ProfileCurve;

fn invalid() -> ConstructionError {
    ConstructionError::InvalidShape {
        family: ComponentFamily::NoseCone,
        source: None,
    }
}

/// Curve samples in the component frame, tip first, base last.
fn curve_points(curve: &ProfileCurve, resolution: u32) -> Vec<Point2> {
    let length = curve.length();
    curve
        .sample(resolution)
        .into_iter()
        .map(|p| Point2::new(length - p.x, p.y))
        .collect()
}

/// The inner cavity reuses the outer curve family at wall-offset
/// dimensions; a blunted outer falls back to the plain ogive since the
/// cavity never reaches the cap region.
fn inner_shape(shape: NoseShape) -> NoseShape {
    match shape {
        NoseShape::BluntedOgive { .. } => NoseShape::Ogive,
        other => other,
    }
}

/// Build the closed generating profile for a nose cone. The parameters
/// must already have passed validation; offset-curve combinations the
/// wall thickness cannot support still surface here as the family
/// catch-all.
pub fn nose_profile(p: &NoseConeParams) -> Result<GeneratingProfile, ConstructionError> {
    let outer =
        ProfileCurve::new(p.shape, p.length, p.radius()).map_err(|_| invalid())?;
    let tip = outer.length();
    let radius = p.radius();
    let resolution = p.resolution.max(2);

    let outer_points = curve_points(&outer, resolution);
    let mut segments = vec![ProfileSegment::Spline {
        points: outer_points,
    }];
    let base_outer = Point2::new(0.0, radius);

    // Walk the boundary from the base of the outer curve back around to
    // the tip, through whichever base, shoulder, and cavity faces the
    // style calls for.
    match p.style {
        WallStyle::Solid => match &p.shoulder {
            None => {
                push_lines(
                    &mut segments,
                    &[base_outer, Point2::new(0.0, 0.0), Point2::new(tip, 0.0)],
                );
            }
            Some(s) => {
                push_lines(
                    &mut segments,
                    &[
                        base_outer,
                        Point2::new(0.0, s.radius()),
                        Point2::new(-s.length, s.radius()),
                        Point2::new(-s.length, 0.0),
                        Point2::new(tip, 0.0),
                    ],
                );
            }
        },
        WallStyle::Hollow | WallStyle::Capped => {
            let thickness = p.thickness;
            let inner = ProfileCurve::new(
                inner_shape(p.shape),
                p.length - thickness,
                radius - thickness,
            )
            .map_err(|_| invalid())?;
            let inner_tip = inner.length();
            if inner_tip >= tip {
                return Err(invalid());
            }
            // Base-to-tip traversal of the cavity wall.
            let mut inner_points = curve_points(&inner, resolution);
            inner_points.reverse();

            let capped = p.style == WallStyle::Capped;
            match &p.shoulder {
                None => {
                    if capped {
                        // The cap closes the base; the cavity starts one
                        // wall thickness in.
                        let start = thickness;
                        let truncated = truncate_inner(&inner, inner_points, start);
                        push_lines(
                            &mut segments,
                            &[
                                base_outer,
                                Point2::new(0.0, 0.0),
                                Point2::new(start, 0.0),
                                truncated[0],
                            ],
                        );
                        segments.push(ProfileSegment::Spline { points: truncated });
                    } else {
                        push_lines(
                            &mut segments,
                            &[base_outer, Point2::new(0.0, radius - thickness)],
                        );
                        segments.push(ProfileSegment::Spline {
                            points: inner_points,
                        });
                    }
                }
                Some(s) => {
                    let bore = s.radius() - s.thickness;
                    // The shoulder bore meets the cavity at a shelf one
                    // wall thickness past the base plane.
                    let truncated = truncate_inner(&inner, inner_points, thickness);
                    let shelf = truncated[0];
                    if capped {
                        // Cap at the open end of the shoulder.
                        push_lines(
                            &mut segments,
                            &[
                                base_outer,
                                Point2::new(0.0, s.radius()),
                                Point2::new(-s.length, s.radius()),
                                Point2::new(-s.length, 0.0),
                                Point2::new(-s.length + s.thickness, 0.0),
                                Point2::new(-s.length + s.thickness, bore),
                                Point2::new(thickness, bore),
                                shelf,
                            ],
                        );
                    } else {
                        push_lines(
                            &mut segments,
                            &[
                                base_outer,
                                Point2::new(0.0, s.radius()),
                                Point2::new(-s.length, s.radius()),
                                Point2::new(-s.length, bore),
                                Point2::new(thickness, bore),
                                shelf,
                            ],
                        );
                    }
                    segments.push(ProfileSegment::Spline { points: truncated });
                }
            }
            // Tip wall between the inner and outer apex.
            segments.push(ProfileSegment::Line {
                from: Point2::new(inner_tip, 0.0),
                to: Point2::new(tip, 0.0),
            });
        }
    }

    let profile = GeneratingProfile::new(segments);
    if !profile.is_closed() || profile.self_intersects() {
        return Err(invalid());
    }
    Ok(profile)
}

fn push_lines(segments: &mut Vec<ProfileSegment>, points: &[Point2]) {
    for pair in points.windows(2) {
        segments.push(ProfileSegment::Line {
            from: pair[0],
            to: pair[1],
        });
    }
}

/// Drop cavity samples behind the cap face and start the wall exactly on
/// it. `points` is base-to-tip ordered.
fn truncate_inner(inner: &ProfileCurve, points: Vec<Point2>, start: f64) -> Vec<Point2> {
    let mut out = vec![Point2::new(start, inner.radius(inner.length() - start))];
    out.extend(points.into_iter().filter(|p| p.x > start));
    out
}
