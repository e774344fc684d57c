//! Built-in node content: the minimal shapes chart collaborators compose.

use crate::core::color::Color;
use crate::core::geometry::{Point, Size, sanitize_length};
use crate::core::node::NodeContent;
use crate::core::property::PropertyKey;
use crate::core::property_store::PropertyStore;
use crate::error::{SceneError, SceneResult};
use crate::render::{CirclePrimitive, DrawPrimitive, Paint, RectPrimitive, TextPrimitive};

const DEFAULT_FONT_SIZE_PX: f64 = 12.0;
/// Average glyph advance relative to font size used for headless text metrics.
const GLYPH_ADVANCE_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.2;

fn read_paint(props: &PropertyStore) -> Paint {
    let fill_opacity = props.number(PropertyKey::FillOpacity, 1.0).clamp(0.0, 1.0);
    let stroke_opacity = props
        .number(PropertyKey::StrokeOpacity, 1.0)
        .clamp(0.0, 1.0);
    Paint {
        fill: props
            .color(PropertyKey::Fill)
            .map(|color| color.clamped().with_alpha(color.clamped().alpha * fill_opacity)),
        stroke: props
            .color(PropertyKey::Stroke)
            .map(|color| color.clamped().with_alpha(color.clamped().alpha * stroke_opacity)),
        stroke_width: sanitize_length(props.number(PropertyKey::StrokeWidth, 1.0)),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RectangleContent;

impl NodeContent for RectangleContent {
    fn paint(&self, props: &PropertyStore, size: Size) -> SceneResult<Vec<DrawPrimitive>> {
        let paint = read_paint(props);
        if paint.is_invisible() || size.is_zero_area() {
            return Ok(Vec::new());
        }
        let corner_radius = sanitize_length(props.number(PropertyKey::CornerRadius, 0.0))
            .min(size.width.min(size.height) / 2.0);
        Ok(vec![DrawPrimitive::Rect(RectPrimitive::new(
            size.to_rect(),
            corner_radius,
            paint,
        ))])
    }
}

/// Circle sized by its `radius`; the node box is the circle's bounding square.
#[derive(Debug, Clone, Copy, Default)]
pub struct CircleContent;

impl NodeContent for CircleContent {
    fn measure(&self, props: &PropertyStore) -> SceneResult<Size> {
        let diameter = sanitize_length(props.number(PropertyKey::Radius, 0.0)) * 2.0;
        Ok(Size::new(diameter, diameter))
    }

    fn paint(&self, props: &PropertyStore, size: Size) -> SceneResult<Vec<DrawPrimitive>> {
        let paint = read_paint(props);
        let radius = size.width.min(size.height) / 2.0;
        if paint.is_invisible() || radius <= 0.0 {
            return Ok(Vec::new());
        }
        Ok(vec![DrawPrimitive::Circle(CirclePrimitive {
            center: Point::new(size.width / 2.0, size.height / 2.0),
            radius,
            paint,
        })])
    }
}

/// Single-line text with approximate headless metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelContent;

impl LabelContent {
    fn font_size(props: &PropertyStore) -> SceneResult<f64> {
        let font_size = props.number(PropertyKey::FontSize, DEFAULT_FONT_SIZE_PX);
        if font_size <= 0.0 {
            return Err(SceneError::Content(format!(
                "label font size must be > 0, got {font_size}"
            )));
        }
        Ok(font_size)
    }
}

impl NodeContent for LabelContent {
    fn measure(&self, props: &PropertyStore) -> SceneResult<Size> {
        let text = props.text(PropertyKey::Text).unwrap_or_default();
        if text.is_empty() {
            return Ok(Size::ZERO);
        }
        let font_size = Self::font_size(props)?;
        Ok(Size::new(
            text.chars().count() as f64 * font_size * GLYPH_ADVANCE_RATIO,
            font_size * LINE_HEIGHT_RATIO,
        ))
    }

    fn paint(&self, props: &PropertyStore, _size: Size) -> SceneResult<Vec<DrawPrimitive>> {
        let Some(text) = props.text(PropertyKey::Text).filter(|text| !text.is_empty()) else {
            return Ok(Vec::new());
        };
        let font_size = Self::font_size(props)?;
        let color = props
            .color(PropertyKey::Fill)
            .unwrap_or(Color::BLACK)
            .clamped();
        Ok(vec![DrawPrimitive::Text(TextPrimitive {
            text,
            origin: Point::ZERO,
            font_size_px: font_size,
            color,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::{CircleContent, LabelContent, RectangleContent};
    use crate::core::color::Color;
    use crate::core::geometry::Size;
    use crate::core::node::NodeContent;
    use crate::core::property::{PropertyKey, PropertyValue};
    use crate::core::property_store::PropertyStore;
    use crate::render::DrawPrimitive;

    #[test]
    fn rectangle_without_paint_emits_nothing() {
        let props = PropertyStore::new();
        let primitives = RectangleContent
            .paint(&props, Size::new(10.0, 10.0))
            .expect("paint");
        assert!(primitives.is_empty());
    }

    #[test]
    fn rectangle_clamps_corner_radius_to_half_extent() {
        let mut props = PropertyStore::new();
        props.set(PropertyKey::Fill, PropertyValue::Color(Color::WHITE));
        props.set(PropertyKey::CornerRadius, PropertyValue::Number(50.0));
        let primitives = RectangleContent
            .paint(&props, Size::new(20.0, 10.0))
            .expect("paint");
        let DrawPrimitive::Rect(rect) = &primitives[0] else {
            panic!("expected rect primitive");
        };
        assert_eq!(rect.corner_radius, 5.0);
    }

    #[test]
    fn circle_measures_to_its_diameter() {
        let mut props = PropertyStore::new();
        props.set(PropertyKey::Radius, PropertyValue::Number(7.0));
        let size = CircleContent.measure(&props).expect("measure");
        assert_eq!(size, Size::new(14.0, 14.0));
    }

    #[test]
    fn label_measures_text_and_rejects_bad_font_size() {
        let mut props = PropertyStore::new();
        props.set(PropertyKey::Text, PropertyValue::from("abcd"));
        props.set(PropertyKey::FontSize, PropertyValue::Number(10.0));
        let size = LabelContent.measure(&props).expect("measure");
        assert!((size.width - 24.0).abs() <= 1e-9);
        assert!((size.height - 12.0).abs() <= 1e-9);

        props.set(PropertyKey::FontSize, PropertyValue::Number(0.0));
        assert!(LabelContent.measure(&props).is_err());
    }
}
