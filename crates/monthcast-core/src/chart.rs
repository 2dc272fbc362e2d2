//! Trend charts
//!
//! Each chart plots the observed values of one column against the period
//! labels and adds a single predicted point after the last period. Charts
//! render to standalone SVG so both the web page (inline) and the CLI
//! (`--charts <dir>`) can use them without a plotting dependency.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::analysis::Analysis;
use crate::config::DisplayConfig;
use crate::models::Variable;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 400.0;
const MARGIN_LEFT: f64 = 72.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: usize = 5;

const ACTUAL_COLOR: &str = "#1f77b4";
const INCOME_PREDICTED_COLOR: &str = "green";
const EXPENSE_PREDICTED_COLOR: &str = "red";

/// One labelled point on a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

/// Observed values of one column plus the forecast point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendChart {
    pub variable: Variable,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub actual: Vec<ChartPoint>,
    pub predicted: ChartPoint,
}

impl TrendChart {
    pub fn from_analysis(analysis: &Analysis, variable: Variable, display: &DisplayConfig) -> Self {
        let actual = analysis
            .series
            .observations()
            .iter()
            .map(|o| ChartPoint {
                label: o.period.clone(),
                value: variable.value_of(o),
            })
            .collect();

        let title = match variable {
            Variable::Income => "Income Trend",
            Variable::Expense => "Expense Trend",
        };

        Self {
            variable,
            title: title.to_string(),
            x_label: "Month".to_string(),
            y_label: variable.label().to_string(),
            actual,
            predicted: ChartPoint {
                label: display.next_label.clone(),
                value: analysis.forecast_for(variable).value(),
            },
        }
    }

    /// Expense chart first, then income (page order)
    pub fn pair(analysis: &Analysis, display: &DisplayConfig) -> [TrendChart; 2] {
        [
            Self::from_analysis(analysis, Variable::Expense, display),
            Self::from_analysis(analysis, Variable::Income, display),
        ]
    }

    /// File name used when charts are written to disk
    pub fn file_name(&self) -> &'static str {
        match self.variable {
            Variable::Income => "income_trend.svg",
            Variable::Expense => "expense_trend.svg",
        }
    }

    pub fn actual_legend(&self) -> &'static str {
        match self.variable {
            Variable::Income => "Actual Income",
            Variable::Expense => "Actual Expense",
        }
    }

    fn predicted_color(&self) -> &'static str {
        match self.variable {
            Variable::Income => INCOME_PREDICTED_COLOR,
            Variable::Expense => EXPENSE_PREDICTED_COLOR,
        }
    }

    pub fn to_svg(&self) -> String {
        self.to_string()
    }

    /// Value range covering every point, widened when flat
    fn y_range(&self) -> (f64, f64) {
        let values = self
            .actual
            .iter()
            .chain(std::iter::once(&self.predicted))
            .map(|p| p.value);
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if hi > lo {
            let pad = (hi - lo) * 0.05;
            (lo - pad, hi + pad)
        } else {
            let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
            (lo - pad, hi + pad)
        }
    }
}

/// Maps data coordinates to SVG pixels
struct Plot {
    slots: usize,
    lo: f64,
    hi: f64,
}

impl Plot {
    fn inner_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn inner_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn x(&self, slot: usize) -> f64 {
        MARGIN_LEFT + (slot as f64 + 0.5) * Self::inner_width() / self.slots as f64
    }

    fn y(&self, value: f64) -> f64 {
        MARGIN_TOP + (self.hi - value) / (self.hi - self.lo) * Self::inner_height()
    }
}

impl fmt::Display for TrendChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (lo, hi) = self.y_range();
        let plot = Plot {
            slots: self.actual.len() + 1,
            lo,
            hi,
        };
        let bottom = HEIGHT - MARGIN_BOTTOM;
        let right = WIDTH - MARGIN_RIGHT;

        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
            w = WIDTH,
            h = HEIGHT
        )?;
        writeln!(f, "<title>{}</title>", escape_xml(&self.title))?;
        writeln!(
            f,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
            WIDTH, HEIGHT
        )?;

        // Axes
        writeln!(
            f,
            r#"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="black"/>"#,
            l = MARGIN_LEFT,
            t = MARGIN_TOP,
            b = bottom
        )?;
        writeln!(
            f,
            r#"<line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="black"/>"#,
            l = MARGIN_LEFT,
            b = bottom,
            r = right
        )?;

        // Y ticks with light grid lines
        for i in 0..=Y_TICKS {
            let value = lo + (hi - lo) * i as f64 / Y_TICKS as f64;
            let y = plot.y(value);
            writeln!(
                f,
                r##"<line x1="{l}" y1="{y:.1}" x2="{r}" y2="{y:.1}" stroke="#e0e0e0"/>"##,
                l = MARGIN_LEFT,
                r = right,
                y = y
            )?;
            writeln!(
                f,
                r#"<text x="{x}" y="{y:.1}" text-anchor="end" dominant-baseline="middle">{v}</text>"#,
                x = MARGIN_LEFT - 6.0,
                y = y,
                v = format_tick(value, hi - lo)
            )?;
        }

        // X labels, predicted label last
        let labels = self
            .actual
            .iter()
            .chain(std::iter::once(&self.predicted))
            .enumerate();
        for (slot, point) in labels {
            writeln!(
                f,
                r#"<text x="{x:.1}" y="{y}" text-anchor="middle">{label}</text>"#,
                x = plot.x(slot),
                y = bottom + 16.0,
                label = escape_xml(&point.label)
            )?;
        }

        // Axis titles
        writeln!(
            f,
            r#"<text x="{x:.1}" y="{y}" text-anchor="middle">{label}</text>"#,
            x = MARGIN_LEFT + Plot::inner_width() / 2.0,
            y = HEIGHT - 12.0,
            label = escape_xml(&self.x_label)
        )?;
        writeln!(
            f,
            r#"<text x="16" y="{y:.1}" text-anchor="middle" transform="rotate(-90 16 {y:.1})">{label}</text>"#,
            y = MARGIN_TOP + Plot::inner_height() / 2.0,
            label = escape_xml(&self.y_label)
        )?;

        // Actual series: line with circle markers
        let points: Vec<String> = self
            .actual
            .iter()
            .enumerate()
            .map(|(slot, p)| format!("{:.1},{:.1}", plot.x(slot), plot.y(p.value)))
            .collect();
        writeln!(
            f,
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
            points.join(" "),
            ACTUAL_COLOR
        )?;
        for (slot, p) in self.actual.iter().enumerate() {
            writeln!(
                f,
                r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
                plot.x(slot),
                plot.y(p.value),
                ACTUAL_COLOR
            )?;
        }

        // Predicted point: cross marker
        let px = plot.x(self.actual.len());
        let py = plot.y(self.predicted.value);
        let color = self.predicted_color();
        write_cross(f, px, py, color)?;

        // Legend
        let lx = right - 150.0;
        let ly = MARGIN_TOP - 24.0;
        writeln!(
            f,
            r#"<circle cx="{:.1}" cy="{:.1}" r="4" fill="{}"/>"#,
            lx,
            ly,
            ACTUAL_COLOR
        )?;
        writeln!(
            f,
            r#"<text x="{:.1}" y="{:.1}" dominant-baseline="middle">{}</text>"#,
            lx + 10.0,
            ly,
            self.actual_legend()
        )?;
        write_cross(f, lx, ly + 16.0, color)?;
        writeln!(
            f,
            r#"<text x="{:.1}" y="{:.1}" dominant-baseline="middle">Predicted</text>"#,
            lx + 10.0,
            ly + 16.0
        )?;

        write!(f, "</svg>")
    }
}

fn write_cross(out: &mut impl Write, x: f64, y: f64, color: &str) -> fmt::Result {
    writeln!(
        out,
        r#"<path d="M{:.1} {:.1} L{:.1} {:.1} M{:.1} {:.1} L{:.1} {:.1}" stroke="{}" stroke-width="2.5"/>"#,
        x - 5.0,
        y - 5.0,
        x + 5.0,
        y + 5.0,
        x - 5.0,
        y + 5.0,
        x + 5.0,
        y - 5.0,
        color
    )
}

fn format_tick(value: f64, span: f64) -> String {
    if span >= 10.0 {
        format!("{:.0}", value)
    } else {
        format!("{:.2}", value)
    }
}

/// Escape text for SVG/HTML content and attribute values
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
