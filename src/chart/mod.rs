//! Line chart rendering as plain draw instructions.
//!
//! [`ChartRenderer`] turns a chronological point sequence into a list of
//! [`DrawOp`]s. It does no I/O and knows nothing about the drawing surface; a
//! thin adapter on the presentation side replays the ops onto its canvas.

pub mod labels;
pub mod render;

pub use labels::select_label_indices;
pub use render::{render, ChartRenderer};

use std::f64::consts::PI;

/// Straight RGBA colour, each channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Text attributes shared by every text op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub size: f64,
    pub bold: bool,
    pub color: Rgba,
}

/// One drawing primitive, in canvas pixels with the origin top left.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Background plus a message, emitted alone when there is too little to plot.
    Placeholder {
        width: f64,
        height: f64,
        background: Rgba,
        at: Point,
        text: String,
        font: Font,
    },
    Background {
        width: f64,
        height: f64,
        color: Rgba,
    },
    /// The y axis from `top` to `origin` and the x axis from `origin` to `right`.
    Axes {
        top: Point,
        origin: Point,
        right: Point,
        color: Rgba,
        line_width: f64,
    },
    GridLine {
        from: Point,
        to: Point,
        color: Rgba,
        line_width: f64,
    },
    /// Value label for a gridline. `at` is the text baseline start.
    Label { at: Point, text: String, font: Font },
    /// Closed polygon under the curve.
    Area { outline: Vec<Point>, color: Rgba },
    Curve {
        points: Vec<Point>,
        color: Rgba,
        line_width: f64,
    },
    Marker {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Tick {
        from: Point,
        to: Point,
        color: Rgba,
        line_width: f64,
    },
    /// Date label drawn from `anchor`, rotated clockwise by `rotation` radians.
    TickLabel {
        anchor: Point,
        rotation: f64,
        text: String,
        font: Font,
    },
    /// Horizontally centred on `center_x`, baseline at `baseline_y`.
    Title {
        center_x: f64,
        baseline_y: f64,
        text: String,
        font: Font,
    },
}

impl DrawOp {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, DrawOp::Placeholder { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Every visual constant of the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    pub padding: Padding,
    pub background: Rgba,
    pub axis_color: Rgba,
    pub axis_width: f64,
    pub grid_color: Rgba,
    pub grid_width: f64,
    /// Horizontal bands between gridlines; one more line than this is drawn.
    pub grid_divisions: u32,
    pub value_font: Font,
    /// Value labels start this far from the left edge.
    pub value_label_x: f64,
    pub area_color: Rgba,
    pub line_color: Rgba,
    pub line_width: f64,
    pub marker_color: Rgba,
    pub marker_radius: f64,
    /// Markers are drawn only up to this many visible points.
    pub marker_threshold: usize,
    pub tick_color: Rgba,
    pub tick_length: f64,
    pub tick_font: Font,
    /// Distance from the x axis to the tick label anchor.
    pub tick_label_offset: f64,
    pub tick_label_rotation: f64,
    /// Horizontal pixels reserved per tick label.
    pub label_budget: f64,
    pub title_font: Font,
    /// Title baseline sits this far above the plot area.
    pub title_offset: f64,
    pub placeholder_font: Font,
    pub placeholder_text: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        let white = Rgba::new(1.0, 1.0, 1.0, 1.0);
        let grey = Rgba::new(0.5, 0.5, 0.5, 1.0);
        Self {
            padding: Padding {
                top: 24.0,
                right: 20.0,
                bottom: 64.0,
                left: 72.0,
            },
            background: Rgba::new(0.1, 0.1, 0.1, 0.9),
            axis_color: grey,
            axis_width: 1.0,
            grid_color: Rgba::new(0.25, 0.25, 0.25, 0.6),
            grid_width: 0.5,
            grid_divisions: 5,
            value_font: Font {
                size: 11.0,
                bold: true,
                color: white,
            },
            value_label_x: 4.0,
            area_color: Rgba::new(0.5, 0.8, 1.0, 0.08),
            line_color: Rgba::new(0.5, 0.8, 1.0, 1.0),
            line_width: 2.0,
            marker_color: Rgba::new(0.3, 0.6, 1.0, 1.0),
            marker_radius: 3.0,
            marker_threshold: 30,
            tick_color: grey,
            tick_length: 4.0,
            tick_font: Font {
                size: 10.0,
                bold: true,
                color: white,
            },
            tick_label_offset: 10.0,
            tick_label_rotation: PI / 6.0,
            label_budget: 52.0,
            title_font: Font {
                size: 11.0,
                bold: true,
                color: Rgba::new(0.85, 0.85, 0.85, 1.0),
            },
            title_offset: 7.0,
            placeholder_font: Font {
                size: 12.0,
                bold: false,
                color: Rgba::new(0.8, 0.8, 0.8, 1.0),
            },
            placeholder_text: "Not enough data for this range".to_string(),
        }
    }
}
