//! Income breakdown pie chart: what goes to expenses and what is left over.

use std::f64::consts::PI;
use std::fmt;

pub const EXPENSES_LABEL: &str = "Expenses";
pub const SAVINGS_LABEL: &str = "Savings";
pub const EXPENSES_COLOR: &str = "#FF9999";
pub const SAVINGS_COLOR: &str = "#99FF99";
pub const EMPTY_COLOR: &str = "#DDDDDD";
pub const EMPTY_CAPTION: &str = "No income or expenses to chart";

/// Degrees counter-clockwise from 3 o'clock where the first slice begins.
pub const START_ANGLE: f64 = 90.0;

const SVG_SIZE: f64 = 400.0;
const RADIUS: f64 = 150.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
    pub percentage: f64,
}

impl Slice {
    pub fn percentage_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }
}

/// Two-slice split of monthly income. Savings never go below zero, so a
/// deficit is drawn as 100% expenses.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownChart {
    slices: [Slice; 2],
}

impl BreakdownChart {
    pub fn new(income: f64, expenses: f64) -> Self {
        let income = non_negative(income);
        let expenses = non_negative(expenses);
        let savings = (income - expenses).max(0.0);
        let total = expenses + savings;

        // Zero total: report 0% for both slices rather than divide.
        let share = |value: f64| {
            if total > 0.0 {
                value / total * 100.0
            } else {
                0.0
            }
        };

        Self {
            slices: [
                Slice {
                    label: EXPENSES_LABEL,
                    value: expenses,
                    color: EXPENSES_COLOR,
                    percentage: share(expenses),
                },
                Slice {
                    label: SAVINGS_LABEL,
                    value: savings,
                    color: SAVINGS_COLOR,
                    percentage: share(savings),
                },
            ],
        }
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn expenses(&self) -> f64 {
        self.slices[0].value
    }

    pub fn savings(&self) -> f64 {
        self.slices[1].value
    }

    pub fn total(&self) -> f64 {
        self.expenses() + self.savings()
    }

    pub fn is_degenerate(&self) -> bool {
        self.total() <= 0.0
    }

    /// Renders the chart as a standalone SVG document. Slices run
    /// counter-clockwise from [`START_ANGLE`]; a degenerate chart is drawn
    /// as a grey disc with [`EMPTY_CAPTION`].
    pub fn to_svg(&self) -> String {
        let c = SVG_SIZE / 2.0;
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\">\n",
            SVG_SIZE
        );

        if self.is_degenerate() {
            svg.push_str(&format!(
                "  <circle cx=\"{c}\" cy=\"{c}\" r=\"{RADIUS}\" fill=\"{EMPTY_COLOR}\"/>\n"
            ));
            svg.push_str(&format!(
                "  <text x=\"{c}\" y=\"{c}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{EMPTY_CAPTION}</text>\n"
            ));
            svg.push_str("</svg>\n");
            return svg;
        }

        let mut angle = START_ANGLE;
        for slice in &self.slices {
            let sweep = slice.percentage / 100.0 * 360.0;

            if sweep >= 360.0 {
                svg.push_str(&format!(
                    "  <circle cx=\"{c}\" cy=\"{c}\" r=\"{RADIUS}\" fill=\"{}\"/>\n",
                    slice.color
                ));
            } else if sweep > 0.0 {
                let (x1, y1) = point_at(c, RADIUS, angle);
                let (x2, y2) = point_at(c, RADIUS, angle + sweep);
                let large_arc = u8::from(sweep > 180.0);
                // SVG's y axis points down, so a counter-clockwise sweep is flag 0.
                svg.push_str(&format!(
                    "  <path d=\"M {c:.2} {c:.2} L {x1:.2} {y1:.2} A {RADIUS:.2} {RADIUS:.2} 0 {large_arc} 0 {x2:.2} {y2:.2} Z\" fill=\"{}\"/>\n",
                    slice.color
                ));
            }

            // A zero slice has no wedge but keeps its labels.
            let middle = angle + sweep / 2.0;
            let (lx, ly) = point_at(c, RADIUS * 0.6, middle);
            let (tx, ty) = point_at(c, RADIUS * 1.15, middle);
            svg.push_str(&format!(
                "  <text x=\"{lx:.2}\" y=\"{ly:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{}</text>\n",
                slice.percentage_label()
            ));
            svg.push_str(&format!(
                "  <text x=\"{tx:.2}\" y=\"{ty:.2}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\">{}</text>\n",
                slice.label
            ));

            angle += sweep;
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl fmt::Display for BreakdownChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_degenerate() {
            return write!(f, "{}", EMPTY_CAPTION);
        }
        for slice in &self.slices {
            writeln!(
                f,
                "{:<9} {:>12.0}  {:>6}",
                slice.label,
                slice.value,
                slice.percentage_label()
            )?;
        }
        Ok(())
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

fn point_at(center: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let radians = degrees * PI / 180.0;
    (
        center + radius * radians.cos(),
        center - radius * radians.sin(),
    )
}
