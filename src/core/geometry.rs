//! Geometry and trig helpers shared by layout, transforms and interpolation.
//!
//! Points, sizes, rectangles and affine transforms come from `kurbo`; this
//! module adds the scalar helpers the scene layer needs on top of them.

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Linear interpolation between two scalars, exact at `t = 0` and `t = 1`.
#[must_use]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

#[must_use]
pub fn lerp_point(from: Point, to: Point, t: f64) -> Point {
    Point::new(lerp(from.x, to.x, t), lerp(from.y, to.y, t))
}

#[must_use]
pub fn lerp_rect(from: Rect, to: Rect, t: f64) -> Rect {
    Rect::new(
        lerp(from.x0, to.x0, t),
        lerp(from.y0, to.y0, t),
        lerp(from.x1, to.x1, t),
        lerp(from.y1, to.y1, t),
    )
}

/// Clamps a length to a finite, non-negative value.
#[must_use]
pub fn sanitize_length(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[must_use]
pub fn sanitize_size(size: Size) -> Size {
    Size::new(sanitize_length(size.width), sanitize_length(size.height))
}

/// Clamps `value` into `[min, max]` while tolerating an inverted range.
#[must_use]
pub fn fit_to_range(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    let mut result = value;
    if let Some(max) = max.filter(|max| max.is_finite()) {
        result = result.min(max);
    }
    if let Some(min) = min.filter(|min| min.is_finite()) {
        result = result.max(min);
    }
    result
}

/// Normalizes an angle in degrees into `[0, 360)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    if !degrees.is_finite() {
        return 0.0;
    }
    let normalized = degrees.rem_euclid(360.0);
    if normalized >= 360.0 { 0.0 } else { normalized }
}

/// Angle in degrees of the vector from `from` to `to`, in `[0, 360)`.
#[must_use]
pub fn angle_between(from: Point, to: Point) -> f64 {
    let delta = to - from;
    normalize_angle(delta.y.atan2(delta.x).to_degrees())
}

/// Point on a circle of `radius` around `center` at `degrees` (clockwise in
/// screen space, 0 pointing along +x).
#[must_use]
pub fn point_on_circle(center: Point, radius: f64, degrees: f64) -> Point {
    let radians = degrees.to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Axis-aligned bounding box of a local `size` box mapped through `transform`.
#[must_use]
pub fn transformed_bounds(transform: Affine, size: Size) -> Rect {
    transform.transform_rect_bbox(size.to_rect())
}

/// Builds the local transform used by scene nodes: translate to `origin`,
/// then rotate by `rotation_degrees`, then scale uniformly.
#[must_use]
pub fn node_transform(origin: Point, rotation_degrees: f64, scale: f64) -> Affine {
    let rotation = if rotation_degrees.is_finite() {
        rotation_degrees.to_radians()
    } else {
        0.0
    };
    let scale = if scale.is_finite() { scale } else { 1.0 };
    Affine::translate(origin.to_vec2()) * Affine::rotate(rotation) * Affine::scale(scale)
}

#[cfg(test)]
mod tests {
    use super::{
        Affine, Point, Size, angle_between, fit_to_range, lerp_rect, node_transform,
        normalize_angle, point_on_circle, sanitize_length, transformed_bounds,
    };
    use kurbo::Rect;

    #[test]
    fn normalize_angle_wraps_negative_and_large_values() {
        assert!((normalize_angle(-90.0) - 270.0).abs() <= 1e-12);
        assert!((normalize_angle(720.0 + 45.0) - 45.0).abs() <= 1e-12);
        assert_eq!(normalize_angle(f64::NAN), 0.0);
    }

    #[test]
    fn angle_between_points_uses_screen_orientation() {
        let angle = angle_between(Point::new(0.0, 0.0), Point::new(0.0, 10.0));
        assert!((angle - 90.0).abs() <= 1e-9);
        let point = point_on_circle(Point::new(10.0, 10.0), 5.0, 180.0);
        assert!((point.x - 5.0).abs() <= 1e-9);
        assert!((point.y - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn sanitize_and_fit_clamp_malformed_lengths() {
        assert_eq!(sanitize_length(-3.0), 0.0);
        assert_eq!(sanitize_length(f64::INFINITY), 0.0);
        assert_eq!(fit_to_range(120.0, Some(10.0), Some(100.0)), 100.0);
        assert_eq!(fit_to_range(5.0, Some(10.0), None), 10.0);
    }

    #[test]
    fn lerp_rect_interpolates_every_edge() {
        let rect = lerp_rect(
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 20.0, 30.0, 40.0),
            0.5,
        );
        assert_eq!(rect, Rect::new(5.0, 10.0, 20.0, 25.0));
    }

    #[test]
    fn rotated_bounds_cover_the_whole_box() {
        let transform = node_transform(Point::new(100.0, 100.0), 90.0, 1.0);
        let bounds = transformed_bounds(transform, Size::new(20.0, 10.0));
        assert!((bounds.width() - 10.0).abs() <= 1e-9);
        assert!((bounds.height() - 20.0).abs() <= 1e-9);

        let identity = transformed_bounds(Affine::IDENTITY, Size::new(4.0, 2.0));
        assert_eq!(identity, Rect::new(0.0, 0.0, 4.0, 2.0));
    }
}
