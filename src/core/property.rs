use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::geometry::{Point, Rect, lerp, lerp_point, lerp_rect};
use crate::core::invalidation_queue::{InvalidationKind, InvalidationKinds};

/// Typed identifiers for every configurable node attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKey {
    X,
    Y,
    Dx,
    Dy,
    Scale,
    Rotation,
    Opacity,
    Visible,
    Width,
    Height,
    MinWidth,
    MaxWidth,
    MinHeight,
    MaxHeight,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    MarginTop,
    MarginRight,
    MarginBottom,
    MarginLeft,
    Layout,
    HorizontalAlign,
    VerticalAlign,
    ZIndex,
    Interactive,
    Clip,
    Fill,
    FillOpacity,
    Stroke,
    StrokeWidth,
    StrokeOpacity,
    CornerRadius,
    Radius,
    Text,
    FontSize,
}

impl PropertyKey {
    /// Validation passes a change to this key requires.
    #[must_use]
    pub const fn invalidation_kinds(self) -> InvalidationKinds {
        match self {
            Self::Width
            | Self::Height
            | Self::MinWidth
            | Self::MaxWidth
            | Self::MinHeight
            | Self::MaxHeight
            | Self::PaddingTop
            | Self::PaddingRight
            | Self::PaddingBottom
            | Self::PaddingLeft
            | Self::MarginTop
            | Self::MarginRight
            | Self::MarginBottom
            | Self::MarginLeft
            | Self::Layout
            | Self::Radius
            | Self::Text
            | Self::FontSize => InvalidationKinds::from_kind(InvalidationKind::Layout),
            Self::X
            | Self::Y
            | Self::Dx
            | Self::Dy
            | Self::Scale
            | Self::Rotation
            | Self::Opacity
            | Self::HorizontalAlign
            | Self::VerticalAlign => InvalidationKinds::from_kind(InvalidationKind::Position),
            Self::Visible
            | Self::ZIndex
            | Self::Clip
            | Self::Fill
            | Self::FillOpacity
            | Self::Stroke
            | Self::StrokeWidth
            | Self::StrokeOpacity
            | Self::CornerRadius => InvalidationKinds::from_kind(InvalidationKind::Redraw),
            Self::Interactive => InvalidationKinds::none(),
        }
    }

    /// Value the passes assume when no literal is stored, for keys that have
    /// a meaningful neutral value.
    #[must_use]
    pub fn implicit_default(self) -> Option<PropertyValue> {
        match self {
            Self::X | Self::Y | Self::Dx | Self::Dy | Self::Rotation | Self::ZIndex => {
                Some(PropertyValue::Number(0.0))
            }
            Self::Scale | Self::Opacity | Self::FillOpacity | Self::StrokeOpacity => {
                Some(PropertyValue::Number(1.0))
            }
            Self::Visible => Some(PropertyValue::Bool(true)),
            Self::Interactive => Some(PropertyValue::Bool(false)),
            _ => None,
        }
    }
}

/// Child arrangement rule applied by containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LayoutMode {
    #[default]
    Absolute,
    Vertical,
    Horizontal,
    Grid(u16),
}

/// Alignment along one axis inside the parent's inner box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    #[default]
    Start,
    Center,
    End,
}

impl Align {
    /// Offset of an item of `extent` inside `available` space.
    #[must_use]
    pub fn offset(self, available: f64, extent: f64) -> f64 {
        match self {
            Self::Start => 0.0,
            Self::Center => (available - extent) / 2.0,
            Self::End => available - extent,
        }
    }
}

/// Stored property value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyValue {
    Number(f64),
    Percent(f64),
    Color(Color),
    Point(Point),
    Rect(Rect),
    Bool(bool),
    Text(String),
    Layout(LayoutMode),
    Align(Align),
}

/// Size request resolved during layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Auto,
    Pixels(f64),
    Percent(f64),
}

impl PropertyValue {
    /// Interpolated value at eased progress `t`, or `None` when the pair only
    /// switches discretely.
    #[must_use]
    pub fn interpolate(&self, to: &Self, t: f64) -> Option<Self> {
        match (self, to) {
            (Self::Number(from), Self::Number(to)) => Some(Self::Number(lerp(*from, *to, t))),
            (Self::Percent(from), Self::Percent(to)) => Some(Self::Percent(lerp(*from, *to, t))),
            (Self::Color(from), Self::Color(to)) => Some(Self::Color(from.lerp(*to, t))),
            (Self::Point(from), Self::Point(to)) => Some(Self::Point(lerp_point(*from, *to, t))),
            (Self::Rect(from), Self::Rect(to)) => Some(Self::Rect(lerp_rect(*from, *to, t))),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_color(&self) -> Option<Color> {
        match self {
            Self::Color(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_point(&self) -> Option<Point> {
        match self {
            Self::Point(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Self::Rect(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_layout(&self) -> Option<LayoutMode> {
        match self {
            Self::Layout(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_align(&self) -> Option<Align> {
        match self {
            Self::Align(value) => Some(*value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dimension(&self) -> Dimension {
        match self {
            Self::Number(value) if value.is_finite() => Dimension::Pixels(*value),
            Self::Percent(value) if value.is_finite() => Dimension::Percent(*value),
            _ => Dimension::Auto,
        }
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Color> for PropertyValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

impl From<Point> for PropertyValue {
    fn from(value: Point) -> Self {
        Self::Point(value)
    }
}

impl From<Rect> for PropertyValue {
    fn from(value: Rect) -> Self {
        Self::Rect(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<LayoutMode> for PropertyValue {
    fn from(value: LayoutMode) -> Self {
        Self::Layout(value)
    }
}

impl From<Align> for PropertyValue {
    fn from(value: Align) -> Self {
        Self::Align(value)
    }
}

/// Shorthand for a percentage size value.
#[must_use]
pub fn percent(value: f64) -> PropertyValue {
    PropertyValue::Percent(value)
}

#[cfg(test)]
mod tests {
    use super::{Align, Dimension, PropertyKey, PropertyValue, percent};
    use crate::core::color::Color;
    use crate::core::invalidation_queue::InvalidationKind;

    #[test]
    fn numeric_and_color_values_interpolate() {
        let mid = PropertyValue::Number(10.0)
            .interpolate(&PropertyValue::Number(20.0), 0.5)
            .expect("numbers interpolate");
        assert_eq!(mid, PropertyValue::Number(15.0));

        let color = PropertyValue::Color(Color::BLACK)
            .interpolate(&PropertyValue::Color(Color::WHITE), 0.5)
            .and_then(|value| value.as_color())
            .expect("colors interpolate");
        assert!((color.red - 0.5).abs() <= 1e-12);
    }

    #[test]
    fn mismatched_and_discrete_values_do_not_interpolate() {
        assert!(
            PropertyValue::Number(1.0)
                .interpolate(&percent(50.0), 0.5)
                .is_none()
        );
        assert!(
            PropertyValue::Bool(false)
                .interpolate(&PropertyValue::Bool(true), 0.5)
                .is_none()
        );
        assert!(
            PropertyValue::from("a")
                .interpolate(&PropertyValue::from("b"), 0.5)
                .is_none()
        );
    }

    #[test]
    fn dimensions_fall_back_to_auto_for_malformed_values() {
        assert_eq!(PropertyValue::Number(12.0).as_dimension(), Dimension::Pixels(12.0));
        assert_eq!(percent(50.0).as_dimension(), Dimension::Percent(50.0));
        assert_eq!(PropertyValue::Number(f64::NAN).as_dimension(), Dimension::Auto);
        assert_eq!(PropertyValue::Bool(true).as_dimension(), Dimension::Auto);
    }

    #[test]
    fn keys_map_to_their_validation_pass() {
        assert!(
            PropertyKey::Width
                .invalidation_kinds()
                .contains_kind(InvalidationKind::Layout)
        );
        assert!(
            PropertyKey::X
                .invalidation_kinds()
                .contains_kind(InvalidationKind::Position)
        );
        assert!(
            PropertyKey::Fill
                .invalidation_kinds()
                .contains_kind(InvalidationKind::Redraw)
        );
        assert!(PropertyKey::Interactive.invalidation_kinds().is_none());
    }

    #[test]
    fn align_offsets_inside_available_space() {
        assert_eq!(Align::Start.offset(100.0, 20.0), 0.0);
        assert_eq!(Align::Center.offset(100.0, 20.0), 40.0);
        assert_eq!(Align::End.offset(100.0, 20.0), 80.0);
    }

    #[test]
    fn implicit_defaults_cover_transform_and_visibility_keys() {
        assert_eq!(
            PropertyKey::Opacity.implicit_default(),
            Some(PropertyValue::Number(1.0))
        );
        assert_eq!(
            PropertyKey::Visible.implicit_default(),
            Some(PropertyValue::Bool(true))
        );
        assert_eq!(PropertyKey::Fill.implicit_default(), None);
    }
}
