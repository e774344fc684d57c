use crate::core::color::Color;
use crate::core::geometry::{Point, Rect};
use crate::error::{SceneError, SceneResult};

/// Fill and stroke applied to a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub stroke_width: f64,
}

impl Paint {
    #[must_use]
    pub const fn filled(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            stroke_width: 0.0,
        }
    }

    #[must_use]
    pub fn is_invisible(self) -> bool {
        self.fill.is_none() && (self.stroke.is_none() || self.stroke_width <= 0.0)
    }

    pub fn validate(self) -> SceneResult<()> {
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(SceneError::InvalidConfig(
                "stroke width must be finite and >= 0".to_owned(),
            ));
        }
        if let Some(fill) = self.fill {
            fill.validate()?;
        }
        if let Some(stroke) = self.stroke {
            stroke.validate()?;
        }
        Ok(())
    }
}

/// Rectangle in node-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectPrimitive {
    pub rect: Rect,
    pub corner_radius: f64,
    pub paint: Paint,
}

impl RectPrimitive {
    #[must_use]
    pub const fn new(rect: Rect, corner_radius: f64, paint: Paint) -> Self {
        Self {
            rect,
            corner_radius,
            paint,
        }
    }

    pub fn validate(self) -> SceneResult<()> {
        if !self.rect.x0.is_finite()
            || !self.rect.y0.is_finite()
            || !self.rect.x1.is_finite()
            || !self.rect.y1.is_finite()
        {
            return Err(SceneError::InvalidConfig(
                "rect coordinates must be finite".to_owned(),
            ));
        }
        if !self.corner_radius.is_finite() || self.corner_radius < 0.0 {
            return Err(SceneError::InvalidConfig(
                "corner radius must be finite and >= 0".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// Circle in node-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CirclePrimitive {
    pub center: Point,
    pub radius: f64,
    pub paint: Paint,
}

impl CirclePrimitive {
    pub fn validate(self) -> SceneResult<()> {
        if !self.center.x.is_finite() || !self.center.y.is_finite() {
            return Err(SceneError::InvalidConfig(
                "circle center must be finite".to_owned(),
            ));
        }
        if !self.radius.is_finite() || self.radius < 0.0 {
            return Err(SceneError::InvalidConfig(
                "circle radius must be finite and >= 0".to_owned(),
            ));
        }
        self.paint.validate()
    }
}

/// Line segment in node-local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePrimitive {
    pub from: Point,
    pub to: Point,
    pub stroke_width: f64,
    pub color: Color,
}

impl LinePrimitive {
    pub fn validate(self) -> SceneResult<()> {
        if !self.from.x.is_finite()
            || !self.from.y.is_finite()
            || !self.to.x.is_finite()
            || !self.to.y.is_finite()
        {
            return Err(SceneError::InvalidConfig(
                "line coordinates must be finite".to_owned(),
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "line stroke width must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Text run anchored at its top-left corner in node-local space.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrimitive {
    pub text: String,
    pub origin: Point,
    pub font_size_px: f64,
    pub color: Color,
}

impl TextPrimitive {
    pub fn validate(&self) -> SceneResult<()> {
        if self.text.is_empty() {
            return Err(SceneError::InvalidConfig(
                "text primitive must not be empty".to_owned(),
            ));
        }
        if !self.origin.x.is_finite() || !self.origin.y.is_finite() {
            return Err(SceneError::InvalidConfig(
                "text coordinates must be finite".to_owned(),
            ));
        }
        if !self.font_size_px.is_finite() || self.font_size_px <= 0.0 {
            return Err(SceneError::InvalidConfig(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// One drawable emitted by node content.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    Rect(RectPrimitive),
    Circle(CirclePrimitive),
    Line(LinePrimitive),
    Text(TextPrimitive),
}

impl DrawPrimitive {
    pub fn validate(&self) -> SceneResult<()> {
        match self {
            Self::Rect(rect) => rect.validate(),
            Self::Circle(circle) => circle.validate(),
            Self::Line(line) => line.validate(),
            Self::Text(text) => text.validate(),
        }
    }
}
