// Chart configuration - declarative, validated at construction
use super::error::{DashboardError, Result};
use std::borrow::Cow;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(Cow<'static, str>);

impl Color {
    pub const BLUE: Color = Color(Cow::Borrowed("#3b82f6"));
    pub const RED: Color = Color(Cow::Borrowed("#dc2626"));
    pub const GREEN: Color = Color(Cow::Borrowed("#22c55e"));
    pub const AMBER: Color = Color(Cow::Borrowed("#fbbf24"));
    pub const GRAY: Color = Color(Cow::Borrowed("#6b7280"));

    /// Accepts `#rrggbb` only
    pub fn hex(value: &str) -> Result<Self> {
        let digits = value.strip_prefix('#').ok_or_else(|| {
            DashboardError::invalid(format!("color '{}' must start with '#'", value))
        })?;
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(DashboardError::invalid(format!(
                "color '{}' is not #rrggbb",
                value
            )));
        }
        Ok(Self(Cow::Owned(value.to_ascii_lowercase())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dash {
    Solid,
    Dash,
    Dot,
}

impl Dash {
    pub fn as_plotly(&self) -> &'static str {
        match self {
            Dash::Solid => "solid",
            Dash::Dash => "dash",
            Dash::Dot => "dot",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerSymbol {
    Circle,
    Diamond,
}

impl MarkerSymbol {
    pub fn as_plotly(&self) -> &'static str {
        match self {
            MarkerSymbol::Circle => "circle",
            MarkerSymbol::Diamond => "diamond",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub symbol: MarkerSymbol,
    pub size: u32,
}

/// Inclusive range of category labels
#[derive(Debug, Clone, PartialEq)]
pub struct LabelRange {
    pub from: String,
    pub to: String,
}

/// One plotted series: which data, which legend label, which color
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSpec {
    pub series: String,
    pub name: String,
    pub color: Color,
    pub range: Option<LabelRange>,
}

impl TraceSpec {
    pub fn new(series: impl Into<String>, name: impl Into<String>, color: Color) -> Self {
        Self {
            series: series.into(),
            name: name.into(),
            color,
            range: None,
        }
    }

    pub fn between(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.range = Some(LabelRange {
            from: from.into(),
            to: to.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub trace: TraceSpec,
    pub width: f64,
    pub dash: Dash,
    pub marker: Option<MarkerSpec>,
}

impl LineTrace {
    pub fn new(trace: TraceSpec) -> Self {
        Self {
            trace,
            width: 2.0,
            dash: Dash::Solid,
            marker: None,
        }
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn dash(mut self, dash: Dash) -> Self {
        self.dash = dash;
        self
    }

    pub fn markers(mut self, symbol: MarkerSymbol, size: u32) -> Self {
        self.marker = Some(MarkerSpec { symbol, size });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BarColoring {
    Solid,
    /// Bars strictly below `value` take `below`, the rest `above`
    Threshold { value: f64, below: Color, above: Color },
    /// Continuous scale over the bar values, low to high
    Gradient(Vec<Color>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AxisMark {
    Bars,
    Line { width: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisTrace {
    pub trace: TraceSpec,
    pub mark: AxisMark,
    pub title: Option<String>,
    pub range: Option<(f64, f64)>,
}

impl AxisTrace {
    pub fn bars(trace: TraceSpec) -> Self {
        Self {
            trace,
            mark: AxisMark::Bars,
            title: None,
            range: None,
        }
    }

    pub fn line(trace: TraceSpec, width: f64) -> Self {
        Self {
            trace,
            mark: AxisMark::Line { width },
            title: None,
            range: None,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.range = Some((min, max));
        self
    }
}

/// Horizontal reference line across the whole plot
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLine {
    pub y: f64,
    pub color: Color,
    pub dash: Dash,
    pub width: f64,
    pub annotation: Option<String>,
}

impl ReferenceLine {
    pub fn at(y: f64) -> Self {
        Self {
            y,
            color: Color::GRAY,
            dash: Dash::Dash,
            width: 1.0,
            annotation: None,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    pub fn annotated(mut self, text: impl Into<String>) -> Self {
        self.annotation = Some(text.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartFrame {
    pub title: String,
    pub x_title: Option<String>,
    pub y_title: Option<String>,
    pub height: u32,
    pub y_range: Option<(f64, f64)>,
    pub reference_lines: Vec<ReferenceLine>,
    pub horizontal_legend: bool,
}

impl ChartFrame {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            x_title: None,
            y_title: None,
            height: 400,
            y_range: None,
            reference_lines: Vec::new(),
            horizontal_legend: false,
        }
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn x_title(mut self, title: impl Into<String>) -> Self {
        self.x_title = Some(title.into());
        self
    }

    pub fn y_title(mut self, title: impl Into<String>) -> Self {
        self.y_title = Some(title.into());
        self
    }

    pub fn y_range(mut self, min: f64, max: f64) -> Self {
        self.y_range = Some((min, max));
        self
    }

    pub fn reference_line(mut self, line: ReferenceLine) -> Self {
        self.reference_lines.push(line);
        self
    }

    pub fn horizontal_legend(mut self) -> Self {
        self.horizontal_legend = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Line { traces: Vec<LineTrace> },
    Bar { trace: TraceSpec, coloring: BarColoring },
    /// Bars with a line/marker overlay on the same y axis
    Combo { bars: TraceSpec, overlay: LineTrace },
    DualAxis { primary: AxisTrace, secondary: AxisTrace },
}

impl ChartKind {
    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Line { .. } => "line",
            ChartKind::Bar { .. } => "bar",
            ChartKind::Combo { .. } => "combo",
            ChartKind::DualAxis { .. } => "dual_axis",
        }
    }

    /// Plotted traces in legend order
    pub fn traces(&self) -> Vec<&TraceSpec> {
        match self {
            ChartKind::Line { traces } => traces.iter().map(|t| &t.trace).collect(),
            ChartKind::Bar { trace, .. } => vec![trace],
            ChartKind::Combo { bars, overlay } => vec![bars, &overlay.trace],
            ChartKind::DualAxis { primary, secondary } => vec![&primary.trace, &secondary.trace],
        }
    }
}

/// A chart configuration that has passed validation.
///
/// Only constructible through [`ChartSpec::new`] and the per-kind shorthands,
/// so a `ChartSpec` in hand is always internally consistent. Whether its
/// series exist is checked later against a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    frame: ChartFrame,
    kind: ChartKind,
}

impl ChartSpec {
    pub fn new(frame: ChartFrame, kind: ChartKind) -> Result<Self> {
        validate_frame(&frame)?;
        validate_kind(&kind)?;
        Ok(Self { frame, kind })
    }

    pub fn line(frame: ChartFrame, traces: Vec<LineTrace>) -> Result<Self> {
        Self::new(frame, ChartKind::Line { traces })
    }

    pub fn bar(frame: ChartFrame, trace: TraceSpec, coloring: BarColoring) -> Result<Self> {
        Self::new(frame, ChartKind::Bar { trace, coloring })
    }

    pub fn combo(frame: ChartFrame, bars: TraceSpec, overlay: LineTrace) -> Result<Self> {
        Self::new(frame, ChartKind::Combo { bars, overlay })
    }

    pub fn dual_axis(frame: ChartFrame, primary: AxisTrace, secondary: AxisTrace) -> Result<Self> {
        Self::new(frame, ChartKind::DualAxis { primary, secondary })
    }

    pub fn frame(&self) -> &ChartFrame {
        &self.frame
    }

    pub fn kind(&self) -> &ChartKind {
        &self.kind
    }

    pub fn title(&self) -> &str {
        &self.frame.title
    }
}

fn validate_frame(frame: &ChartFrame) -> Result<()> {
    if frame.title.trim().is_empty() {
        return Err(DashboardError::invalid("chart title must not be empty"));
    }
    if frame.height == 0 {
        return Err(DashboardError::invalid("chart height must be positive"));
    }
    if let Some(range) = frame.y_range {
        validate_range("y axis", range)?;
    }
    for line in &frame.reference_lines {
        if !line.y.is_finite() {
            return Err(DashboardError::invalid("reference line must sit at a finite value"));
        }
        validate_width(line.width)?;
    }
    Ok(())
}

fn validate_kind(kind: &ChartKind) -> Result<()> {
    match kind {
        ChartKind::Line { traces } => {
            if traces.is_empty() {
                return Err(DashboardError::invalid("line chart needs at least one trace"));
            }
            for t in traces {
                validate_width(t.width)?;
            }
        }
        ChartKind::Bar { coloring, .. } => match coloring {
            BarColoring::Solid => {}
            BarColoring::Threshold { value, .. } => {
                if !value.is_finite() {
                    return Err(DashboardError::invalid("bar threshold must be finite"));
                }
            }
            BarColoring::Gradient(stops) => {
                if stops.len() < 2 {
                    return Err(DashboardError::invalid("gradient needs at least two colors"));
                }
            }
        },
        ChartKind::Combo { overlay, .. } => validate_width(overlay.width)?,
        ChartKind::DualAxis { primary, secondary } => {
            if primary.trace.series == secondary.trace.series {
                return Err(DashboardError::invalid(format!(
                    "dual axis chart plots '{}' on both axes",
                    primary.trace.series
                )));
            }
            for axis in [primary, secondary] {
                if let Some(range) = axis.range {
                    validate_range("secondary/primary axis", range)?;
                }
                if let AxisMark::Line { width } = axis.mark {
                    validate_width(width)?;
                }
            }
        }
    }

    let mut legend = HashSet::new();
    for trace in kind.traces() {
        if trace.series.trim().is_empty() {
            return Err(DashboardError::invalid("trace must name a series"));
        }
        if trace.name.trim().is_empty() {
            return Err(DashboardError::invalid(format!(
                "trace for '{}' has an empty legend label",
                trace.series
            )));
        }
        if !legend.insert(trace.name.as_str()) {
            return Err(DashboardError::invalid(format!(
                "duplicate legend label '{}'",
                trace.name
            )));
        }
        if let Some(range) = &trace.range {
            if range.from.is_empty() || range.to.is_empty() {
                return Err(DashboardError::invalid("label range endpoints must not be empty"));
            }
        }
    }
    Ok(())
}

fn validate_range(axis: &str, (min, max): (f64, f64)) -> Result<()> {
    if !min.is_finite() || !max.is_finite() || min >= max {
        return Err(DashboardError::invalid(format!(
            "{} range [{}, {}] is empty or reversed",
            axis, min, max
        )));
    }
    Ok(())
}

fn validate_width(width: f64) -> Result<()> {
    if !width.is_finite() || width <= 0.0 {
        return Err(DashboardError::invalid("line width must be positive"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn official() -> TraceSpec {
        TraceSpec::new("Official_BEA", "Official GDP %", Color::BLUE)
    }

    #[test]
    fn test_color_hex_validation() {
        assert_eq!(Color::hex("#3B82F6").unwrap().as_str(), "#3b82f6");
        assert!(Color::hex("3b82f6").is_err());
        assert!(Color::hex("#3b82f").is_err());
        assert!(Color::hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        let err =
            ChartSpec::line(ChartFrame::new("  "), vec![LineTrace::new(official())]).unwrap_err();
        assert!(matches!(err, DashboardError::InvalidSpec(_)));
    }

    #[test]
    fn test_line_chart_needs_traces() {
        assert!(ChartSpec::line(ChartFrame::new("GDP"), vec![]).is_err());
    }

    #[test]
    fn test_duplicate_legend_labels_rejected() {
        let traces = vec![
            LineTrace::new(official()),
            LineTrace::new(TraceSpec::new("Rosenberg_Adjusted", "Official GDP %", Color::RED)),
        ];
        assert!(ChartSpec::line(ChartFrame::new("GDP"), traces).is_err());
    }

    #[test]
    fn test_reversed_y_range_rejected() {
        let frame = ChartFrame::new("GDP").y_range(12.0, 0.0);
        assert!(ChartSpec::line(frame, vec![LineTrace::new(official())]).is_err());
    }

    #[test]
    fn test_gradient_and_threshold_checks() {
        let gradient = BarColoring::Gradient(vec![Color::RED]);
        assert!(ChartSpec::bar(ChartFrame::new("GDP"), official(), gradient).is_err());

        let threshold = BarColoring::Threshold {
            value: f64::NAN,
            below: Color::RED,
            above: Color::GREEN,
        };
        assert!(ChartSpec::bar(ChartFrame::new("GDP"), official(), threshold).is_err());
    }

    #[test]
    fn test_dual_axis_needs_distinct_series() {
        let primary = AxisTrace::bars(official());
        let secondary = AxisTrace::line(TraceSpec::new("Official_BEA", "Again", Color::RED), 3.0);
        assert!(ChartSpec::dual_axis(ChartFrame::new("GDP"), primary, secondary).is_err());
    }

    #[test]
    fn test_traces_in_legend_order() {
        let spec = ChartSpec::combo(
            ChartFrame::new("GDP"),
            official(),
            LineTrace::new(TraceSpec::new("Rosenberg_Adjusted", "Disputed GDP %", Color::RED)),
        )
        .unwrap();
        let names: Vec<&str> = spec.kind().traces().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Official GDP %", "Disputed GDP %"]);
        assert_eq!(spec.kind().name(), "combo");
    }
}
