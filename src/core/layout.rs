//! Pure layout math used by the measure and position passes.

use crate::core::geometry::{Point, Size, fit_to_range, sanitize_length};
use crate::core::property::{Align, Dimension, LayoutMode, PropertyKey};
use crate::core::property_store::PropertyStore;

/// Edge offsets (padding or margin).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    #[must_use]
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    #[must_use]
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }

    #[must_use]
    pub fn padding(props: &PropertyStore) -> Self {
        Self::read(
            props,
            [
                PropertyKey::PaddingTop,
                PropertyKey::PaddingRight,
                PropertyKey::PaddingBottom,
                PropertyKey::PaddingLeft,
            ],
        )
    }

    #[must_use]
    pub fn margin(props: &PropertyStore) -> Self {
        Self::read(
            props,
            [
                PropertyKey::MarginTop,
                PropertyKey::MarginRight,
                PropertyKey::MarginBottom,
                PropertyKey::MarginLeft,
            ],
        )
    }

    fn read(props: &PropertyStore, keys: [PropertyKey; 4]) -> Self {
        let [top, right, bottom, left] = keys.map(|key| sanitize_length(props.number(key, 0.0)));
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

/// Resolves a size request against the space offered by the parent.
///
/// Percentages need a known `available` length; without it they stay unresolved.
#[must_use]
pub fn resolve_dimension(dimension: Dimension, available: Option<f64>) -> Option<f64> {
    match dimension {
        Dimension::Auto => None,
        Dimension::Pixels(pixels) => Some(sanitize_length(pixels)),
        Dimension::Percent(percent) => {
            available.map(|available| sanitize_length(available * percent / 100.0))
        }
    }
}

/// Applies optional min/max bounds and clamps the result to a valid length.
#[must_use]
pub fn clamp_length(value: f64, min: Option<f64>, max: Option<f64>) -> f64 {
    sanitize_length(fit_to_range(value, min, max))
}

/// Measured child as seen by its container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChildBox {
    pub size: Size,
    pub margin: Insets,
    /// Explicit `x`/`y` request; only absolute layout reads it for extents.
    pub position: Point,
    pub horizontal_align: Align,
    pub vertical_align: Align,
}

impl ChildBox {
    fn outer_width(&self) -> f64 {
        self.size.width + self.margin.horizontal()
    }

    fn outer_height(&self) -> f64 {
        self.size.height + self.margin.vertical()
    }
}

/// Natural size needed to hold `children` under `mode`, excluding padding.
#[must_use]
pub fn content_extent(mode: LayoutMode, children: &[ChildBox]) -> Size {
    match mode {
        LayoutMode::Absolute => children.iter().fold(Size::ZERO, |extent, child| {
            Size::new(
                extent
                    .width
                    .max(child.position.x.max(0.0) + child.outer_width()),
                extent
                    .height
                    .max(child.position.y.max(0.0) + child.outer_height()),
            )
        }),
        LayoutMode::Vertical => children.iter().fold(Size::ZERO, |extent, child| {
            Size::new(
                extent.width.max(child.outer_width()),
                extent.height + child.outer_height(),
            )
        }),
        LayoutMode::Horizontal => children.iter().fold(Size::ZERO, |extent, child| {
            Size::new(
                extent.width + child.outer_width(),
                extent.height.max(child.outer_height()),
            )
        }),
        LayoutMode::Grid(columns) => {
            let (widths, heights) = grid_tracks(columns, children);
            Size::new(widths.iter().sum(), heights.iter().sum())
        }
    }
}

/// Offsets of each child's box relative to the container's inner origin.
#[must_use]
pub fn arrange(mode: LayoutMode, inner: Size, children: &[ChildBox]) -> Vec<Point> {
    match mode {
        LayoutMode::Absolute => children
            .iter()
            .map(|child| {
                Point::new(
                    child.margin.left
                        + child.horizontal_align.offset(
                            inner.width - child.margin.horizontal(),
                            child.size.width,
                        ),
                    child.margin.top
                        + child.vertical_align.offset(
                            inner.height - child.margin.vertical(),
                            child.size.height,
                        ),
                )
            })
            .collect(),
        LayoutMode::Vertical => {
            let mut cursor = 0.0;
            children
                .iter()
                .map(|child| {
                    let x = child.margin.left
                        + child.horizontal_align.offset(
                            inner.width - child.margin.horizontal(),
                            child.size.width,
                        );
                    let y = cursor + child.margin.top;
                    cursor += child.outer_height();
                    Point::new(x, y)
                })
                .collect()
        }
        LayoutMode::Horizontal => {
            let mut cursor = 0.0;
            children
                .iter()
                .map(|child| {
                    let x = cursor + child.margin.left;
                    let y = child.margin.top
                        + child.vertical_align.offset(
                            inner.height - child.margin.vertical(),
                            child.size.height,
                        );
                    cursor += child.outer_width();
                    Point::new(x, y)
                })
                .collect()
        }
        LayoutMode::Grid(columns) => {
            let (widths, heights) = grid_tracks(columns, children);
            let columns = usize::from(columns.max(1));
            children
                .iter()
                .enumerate()
                .map(|(index, child)| {
                    let column = index % columns;
                    let row = index / columns;
                    let cell_x: f64 = widths[..column].iter().sum();
                    let cell_y: f64 = heights[..row].iter().sum();
                    Point::new(
                        cell_x
                            + child.margin.left
                            + child.horizontal_align.offset(
                                widths[column] - child.margin.horizontal(),
                                child.size.width,
                            ),
                        cell_y
                            + child.margin.top
                            + child.vertical_align.offset(
                                heights[row] - child.margin.vertical(),
                                child.size.height,
                            ),
                    )
                })
                .collect()
        }
    }
}

fn grid_tracks(columns: u16, children: &[ChildBox]) -> (Vec<f64>, Vec<f64>) {
    let columns = usize::from(columns.max(1));
    let rows = children.len().div_ceil(columns);
    let mut widths = vec![0.0_f64; columns.min(children.len().max(1))];
    let mut heights = vec![0.0_f64; rows];
    for (index, child) in children.iter().enumerate() {
        let column = index % columns;
        let row = index / columns;
        widths[column] = widths[column].max(child.outer_width());
        heights[row] = heights[row].max(child.outer_height());
    }
    (widths, heights)
}
