//! The renderer proper: visible window, scales, and op emission.

use super::labels::select_label_indices;
use super::{ChartStyle, DrawOp, Point};
use crate::domain::dates::ZoomWindow;
use crate::domain::history::ChartPoint;
use crate::shared::fmt::date::{range_label, range_title, spans_years};
use crate::shared::fmt::num::{fixed, step_decimals};

use chrono::NaiveDate;

/// Render with [`ChartStyle::default`].
pub fn render(
    points: &[ChartPoint],
    zoom: ZoomWindow,
    width: f64,
    height: f64,
    today: NaiveDate,
) -> Vec<DrawOp> {
    ChartRenderer::default().render(points, zoom, width, height, today)
}

/// Pixel mapping for one render.
#[derive(Debug, Clone, Copy)]
struct Scale {
    left: f64,
    top: f64,
    plot_width: f64,
    plot_height: f64,
    y_hi: f64,
    y_span: f64,
    last_index: f64,
}

impl Scale {
    fn new(style: &ChartStyle, width: f64, height: f64, visible: &[ChartPoint]) -> Self {
        let pad = style.padding;
        let (lo, hi) = visible
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.rate), hi.max(p.rate))
            });

        // Flat series: substitute a unit span.
        let span = if hi - lo > 0.0 { hi - lo } else { 1.0 };
        let margin = span * 0.1;
        let y_lo = lo - margin;
        let y_hi = hi + margin;

        Self {
            left: pad.left,
            top: pad.top,
            plot_width: width - pad.left - pad.right,
            plot_height: height - pad.top - pad.bottom,
            y_hi,
            y_span: y_hi - y_lo,
            last_index: (visible.len().max(2) - 1) as f64,
        }
    }

    fn x(&self, index: usize) -> f64 {
        self.left + (index as f64 / self.last_index) * self.plot_width
    }

    fn y(&self, rate: f64) -> f64 {
        self.top + ((self.y_hi - rate) / self.y_span) * self.plot_height
    }

    fn bottom(&self) -> f64 {
        self.top + self.plot_height
    }

    fn right(&self) -> f64 {
        self.left + self.plot_width
    }
}

/// Stateless line chart renderer.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// The tail of `points` (chronological) that `zoom` shows as of `today`.
    pub fn visible<'p>(
        points: &'p [ChartPoint],
        zoom: ZoomWindow,
        today: NaiveDate,
    ) -> &'p [ChartPoint] {
        match zoom.cutoff(today) {
            Some(cutoff) => {
                let start = points.partition_point(|p| p.date <= cutoff);
                &points[start..]
            }
            None => points,
        }
    }

    /// Draw instructions for `points` (oldest first) on a `width` × `height` canvas.
    pub fn render(
        &self,
        points: &[ChartPoint],
        zoom: ZoomWindow,
        width: f64,
        height: f64,
        today: NaiveDate,
    ) -> Vec<DrawOp> {
        let style = &self.style;
        let visible = Self::visible(points, zoom, today);

        if visible.len() < 2 {
            return vec![DrawOp::Placeholder {
                width,
                height,
                background: style.background,
                at: Point::new(width / 2.0 - 80.0, height / 2.0),
                text: style.placeholder_text.clone(),
                font: style.placeholder_font,
            }];
        }

        let scale = Scale::new(style, width, height, visible);
        let mut ops = Vec::with_capacity(visible.len() * 2 + 16);

        ops.push(DrawOp::Background {
            width,
            height,
            color: style.background,
        });
        ops.push(DrawOp::Axes {
            top: Point::new(scale.left, scale.top),
            origin: Point::new(scale.left, scale.bottom()),
            right: Point::new(scale.right(), scale.bottom()),
            color: style.axis_color,
            line_width: style.axis_width,
        });

        self.push_grid(&mut ops, &scale);

        let curve: Vec<Point> = visible
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(scale.x(i), scale.y(p.rate)))
            .collect();

        let mut outline = curve.clone();
        outline.push(Point::new(scale.x(visible.len() - 1), scale.bottom()));
        outline.push(Point::new(scale.x(0), scale.bottom()));
        ops.push(DrawOp::Area {
            outline,
            color: style.area_color,
        });

        let markers: Vec<DrawOp> = if visible.len() <= style.marker_threshold {
            curve
                .iter()
                .map(|center| DrawOp::Marker {
                    center: *center,
                    radius: style.marker_radius,
                    color: style.marker_color,
                })
                .collect()
        } else {
            Vec::new()
        };
        ops.push(DrawOp::Curve {
            points: curve,
            color: style.line_color,
            line_width: style.line_width,
        });
        ops.extend(markers);

        self.push_ticks(&mut ops, &scale, visible);

        let (first, last) = (visible[0].date, visible[visible.len() - 1].date);
        ops.push(DrawOp::Title {
            center_x: width / 2.0,
            baseline_y: style.padding.top - style.title_offset,
            text: range_title(first, last),
            font: style.title_font,
        });

        ops
    }

    fn push_grid(&self, ops: &mut Vec<DrawOp>, scale: &Scale) {
        let style = &self.style;
        let divisions = style.grid_divisions.max(1);
        let decimals = step_decimals(scale.y_span / f64::from(divisions));

        for i in 0..=divisions {
            let t = f64::from(i) / f64::from(divisions);
            let y = scale.top + t * scale.plot_height;
            let value = scale.y_hi - t * scale.y_span;

            ops.push(DrawOp::GridLine {
                from: Point::new(scale.left, y),
                to: Point::new(scale.right(), y),
                color: style.grid_color,
                line_width: style.grid_width,
            });
            ops.push(DrawOp::Label {
                at: Point::new(style.value_label_x, y + 4.0),
                text: fixed(value, decimals),
                font: style.value_font,
            });
        }
    }

    fn push_ticks(&self, ops: &mut Vec<DrawOp>, scale: &Scale, visible: &[ChartPoint]) {
        let style = &self.style;
        let bottom = scale.bottom();
        let multi_year = spans_years(visible[0].date, visible[visible.len() - 1].date);
        let labelled = select_label_indices(visible.len(), scale.plot_width, style.label_budget);

        for (i, point) in visible.iter().enumerate() {
            let x = scale.x(i);
            ops.push(DrawOp::Tick {
                from: Point::new(x, bottom),
                to: Point::new(x, bottom + style.tick_length),
                color: style.tick_color,
                line_width: style.axis_width,
            });
            if labelled.binary_search(&i).is_ok() {
                ops.push(DrawOp::TickLabel {
                    anchor: Point::new(x, bottom + style.tick_label_offset),
                    rotation: style.tick_label_rotation,
                    text: range_label(point.date, multi_year),
                    font: style.tick_font,
                });
            }
        }
    }
}
