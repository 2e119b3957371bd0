// Chart builder - maps a validated ChartSpec onto a dataset
use crate::domain::chart::{
    AxisMark, AxisTrace, BarColoring, ChartFrame, ChartKind, ChartSpec, LineTrace, ReferenceLine,
    TraceSpec,
};
use crate::domain::dataset::Dataset;
use crate::domain::error::{DashboardError, Result};
use crate::domain::figure::{
    Annotation, Axis, Figure, Layout, Legend, LineStyle, MarkerColor, MarkerStyle, PlotTrace,
    Shape, Title, TraceType,
};
use crate::domain::series::Observation;

const SECONDARY_AXIS: &str = "y2";

/// Build a plotting-ready figure.
///
/// Every referenced series (and label range) is resolved before anything is
/// built, so a mismatch never yields a partial figure. Output depends only
/// on the inputs.
pub fn build_chart(dataset: &Dataset, spec: &ChartSpec) -> Result<Figure> {
    let resolved = spec
        .kind()
        .traces()
        .into_iter()
        .map(|trace| resolve(dataset, spec, trace))
        .collect::<Result<Vec<_>>>()?;

    let data = match spec.kind() {
        ChartKind::Line { traces } => traces
            .iter()
            .zip(&resolved)
            .map(|(trace, points)| line_trace(trace, points))
            .collect(),
        ChartKind::Bar { trace, coloring } => vec![bar_trace(trace, &resolved[0], coloring)],
        ChartKind::Combo { bars, overlay } => vec![
            bar_trace(bars, &resolved[0], &BarColoring::Solid),
            line_trace(overlay, &resolved[1]),
        ],
        ChartKind::DualAxis { primary, secondary } => {
            let mut secondary_trace = axis_trace(secondary, &resolved[1]);
            secondary_trace.yaxis = Some(SECONDARY_AXIS.to_string());
            vec![axis_trace(primary, &resolved[0]), secondary_trace]
        }
    };

    let layout = build_layout(spec.frame(), spec.kind(), data.len());
    Ok(Figure { data, layout })
}

fn resolve<'d>(
    dataset: &'d Dataset,
    spec: &ChartSpec,
    trace: &TraceSpec,
) -> Result<&'d [Observation]> {
    let series = dataset
        .series(&trace.series)
        .ok_or_else(|| {
            mismatch(
                dataset,
                spec,
                format!(
                    "series '{}' (available: {})",
                    trace.series,
                    dataset.series_names().join(", ")
                ),
            )
        })?;

    match &trace.range {
        None => Ok(series.observations()),
        Some(range) => series.between(&range.from, &range.to).ok_or_else(|| {
            mismatch(
                dataset,
                spec,
                format!(
                    "label range '{}'..'{}' of series '{}'",
                    range.from, range.to, trace.series
                ),
            )
        }),
    }
}

fn mismatch(dataset: &Dataset, spec: &ChartSpec, what: String) -> DashboardError {
    DashboardError::SpecMismatch {
        chart: spec.title().to_string(),
        topic: dataset.topic().id().to_string(),
        what,
    }
}

fn xy(points: &[Observation]) -> (Vec<String>, Vec<f64>) {
    points.iter().map(|p| (p.label.clone(), p.value)).unzip()
}

fn line_trace(trace: &LineTrace, points: &[Observation]) -> PlotTrace {
    let (x, y) = xy(points);
    let color = trace.trace.color.as_str();

    let (mode, marker) = match &trace.marker {
        Some(spec) => (
            "lines+markers",
            Some(MarkerStyle {
                size: Some(spec.size),
                symbol: Some(spec.symbol.as_plotly().to_string()),
                ..MarkerStyle::solid(color)
            }),
        ),
        None => ("lines", None),
    };

    PlotTrace {
        kind: TraceType::Scatter,
        name: trace.trace.name.clone(),
        x,
        y,
        mode: Some(mode.to_string()),
        marker,
        line: Some(LineStyle {
            color: color.to_string(),
            width: trace.width,
            dash: trace.dash.as_plotly().to_string(),
        }),
        yaxis: None,
    }
}

fn bar_trace(trace: &TraceSpec, points: &[Observation], coloring: &BarColoring) -> PlotTrace {
    let (x, y) = xy(points);

    let marker = match coloring {
        BarColoring::Solid => MarkerStyle::solid(trace.color.as_str()),
        BarColoring::Threshold { value, below, above } => MarkerStyle {
            color: MarkerColor::PerPoint(
                y.iter()
                    .map(|v| if v < value { below } else { above })
                    .map(|c| c.as_str().to_string())
                    .collect(),
            ),
            ..MarkerStyle::solid(trace.color.as_str())
        },
        BarColoring::Gradient(stops) => {
            let last = (stops.len() - 1) as f64;
            MarkerStyle {
                color: MarkerColor::Values(y.clone()),
                size: None,
                symbol: None,
                colorscale: Some(
                    stops
                        .iter()
                        .enumerate()
                        .map(|(i, c)| (i as f64 / last, c.as_str().to_string()))
                        .collect(),
                ),
                showscale: Some(true),
            }
        }
    };

    PlotTrace {
        kind: TraceType::Bar,
        name: trace.name.clone(),
        x,
        y,
        mode: None,
        marker: Some(marker),
        line: None,
        yaxis: None,
    }
}

fn axis_trace(axis: &AxisTrace, points: &[Observation]) -> PlotTrace {
    match axis.mark {
        AxisMark::Bars => bar_trace(&axis.trace, points, &BarColoring::Solid),
        AxisMark::Line { width } => {
            line_trace(&LineTrace::new(axis.trace.clone()).width(width), points)
        }
    }
}

fn build_layout(frame: &ChartFrame, kind: &ChartKind, trace_count: usize) -> Layout {
    let mut yaxis = Axis {
        title: frame.y_title.clone().map(|text| Title { text }),
        range: frame.y_range.map(|(min, max)| [min, max]),
        ..Axis::default()
    };

    let yaxis2 = match kind {
        ChartKind::DualAxis { primary, secondary } => {
            if let Some(text) = &primary.title {
                yaxis.title = Some(Title { text: text.clone() });
            }
            if let Some((min, max)) = primary.range {
                yaxis.range = Some([min, max]);
            }
            Some(Axis {
                title: secondary.title.clone().map(|text| Title { text }),
                range: secondary.range.map(|(min, max)| [min, max]),
                axis_type: None,
                overlaying: Some("y".to_string()),
                side: Some("right".to_string()),
            })
        }
        _ => None,
    };

    Layout {
        title: Title {
            text: frame.title.clone(),
        },
        height: frame.height,
        xaxis: Axis {
            title: frame.x_title.clone().map(|text| Title { text }),
            // Labels like "2019" must stay categories, not numbers
            axis_type: Some("category".to_string()),
            ..Axis::default()
        },
        yaxis,
        yaxis2,
        shapes: frame.reference_lines.iter().map(reference_shape).collect(),
        annotations: frame
            .reference_lines
            .iter()
            .filter_map(reference_annotation)
            .collect(),
        legend: frame.horizontal_legend.then(|| Legend {
            orientation: "h".to_string(),
            yanchor: "bottom".to_string(),
            y: 1.02,
        }),
        showlegend: trace_count > 1,
    }
}

fn reference_shape(line: &ReferenceLine) -> Shape {
    Shape {
        kind: "line".to_string(),
        xref: "paper".to_string(),
        x0: 0.0,
        x1: 1.0,
        yref: "y".to_string(),
        y0: line.y,
        y1: line.y,
        line: LineStyle {
            color: line.color.as_str().to_string(),
            width: line.width,
            dash: line.dash.as_plotly().to_string(),
        },
    }
}

fn reference_annotation(line: &ReferenceLine) -> Option<Annotation> {
    line.annotation.as_ref().map(|text| Annotation {
        text: text.clone(),
        xref: "paper".to_string(),
        yref: "y".to_string(),
        x: 1.0,
        y: line.y,
        showarrow: false,
        xanchor: "right".to_string(),
        yanchor: "bottom".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chart::{Color, Dash, MarkerSymbol};
    use crate::domain::dataset::Topic;
    use crate::domain::series::Series;

    fn gdp() -> Dataset {
        Dataset::new(
            Topic::Gdp,
            vec![
                Series::from_pairs(
                    "Official_BEA",
                    [("Q4 24", 2.3), ("Q1 25", -0.5), ("Q2 25", 3.8), ("Q3 25", 4.3)],
                ),
                Series::from_pairs("Rosenberg_Adjusted", [("Q2 25", 1.0), ("Q3 25", 0.8)]),
            ],
        )
        .unwrap()
    }

    fn official_vs_adjusted() -> ChartSpec {
        ChartSpec::line(
            ChartFrame::new("Q2-Q3 2025 GDP: Official vs Adjusted"),
            vec![
                LineTrace::new(
                    TraceSpec::new("Official_BEA", "Official (BEA)", Color::BLUE)
                        .between("Q2 25", "Q3 25"),
                ),
                LineTrace::new(
                    TraceSpec::new("Rosenberg_Adjusted", "Adjusted (Rosenberg)", Color::RED)
                        .between("Q2 25", "Q3 25"),
                )
                .dash(Dash::Dot)
                .markers(MarkerSymbol::Diamond, 15),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_official_vs_adjusted_two_line_chart() {
        let figure = build_chart(&gdp(), &official_vs_adjusted()).unwrap();

        assert_eq!(figure.data.len(), 2);
        assert!(figure.data.iter().all(|t| t.kind == TraceType::Scatter));
        assert_eq!(figure.legend_entries(), vec!["Official (BEA)", "Adjusted (Rosenberg)"]);
        assert!(!figure.title().is_empty());
        assert!(figure.layout.showlegend);

        assert_eq!(figure.data[0].x, vec!["Q2 25", "Q3 25"]);
        assert_eq!(figure.data[0].y, vec![3.8, 4.3]);
        assert_eq!(figure.data[1].y, vec![1.0, 0.8]);
        assert_eq!(figure.data[1].mode.as_deref(), Some("lines+markers"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let dataset = gdp();
        let spec = official_vs_adjusted();
        let first = build_chart(&dataset, &spec).unwrap();
        let second = build_chart(&dataset, &spec).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_missing_series_is_spec_mismatch() {
        let spec = ChartSpec::line(
            ChartFrame::new("GDP Nowcast"),
            vec![LineTrace::new(TraceSpec::new("Atlanta_Fed_Nowcast", "Nowcast", Color::GREEN))],
        )
        .unwrap();

        let err = build_chart(&gdp(), &spec).unwrap_err();
        assert!(err.is_spec_mismatch());
        assert!(err.to_string().contains("Atlanta_Fed_Nowcast"));
    }

    #[test]
    fn test_missing_range_label_is_spec_mismatch() {
        let spec = ChartSpec::bar(
            ChartFrame::new("GDP"),
            TraceSpec::new("Rosenberg_Adjusted", "Disputed", Color::RED).between("Q1 25", "Q3 25"),
            BarColoring::Solid,
        )
        .unwrap();

        assert!(build_chart(&gdp(), &spec).unwrap_err().is_spec_mismatch());
    }

    #[test]
    fn test_threshold_bars_color_each_point() {
        let spec = ChartSpec::bar(
            ChartFrame::new("Quarterly GDP")
                .reference_line(ReferenceLine::at(0.0).annotated("Zero")),
            TraceSpec::new("Official_BEA", "GDP", Color::BLUE),
            BarColoring::Threshold {
                value: 0.0,
                below: Color::RED,
                above: Color::GREEN,
            },
        )
        .unwrap();

        let figure = build_chart(&gdp(), &spec).unwrap();
        let marker = figure.data[0].marker.as_ref().unwrap();
        assert_eq!(
            marker.color,
            MarkerColor::PerPoint(vec![
                "#22c55e".to_string(),
                "#dc2626".to_string(),
                "#22c55e".to_string(),
                "#22c55e".to_string(),
            ])
        );
        assert_eq!(figure.layout.shapes.len(), 1);
        assert_eq!(figure.layout.annotations[0].text, "Zero");
        assert!(!figure.layout.showlegend);
    }

    #[test]
    fn test_gradient_scale_stops_are_even() {
        let spec = ChartSpec::bar(
            ChartFrame::new("Quarterly GDP"),
            TraceSpec::new("Official_BEA", "GDP", Color::BLUE),
            BarColoring::Gradient(vec![Color::RED, Color::AMBER, Color::GREEN]),
        )
        .unwrap();

        let figure = build_chart(&gdp(), &spec).unwrap();
        let scale = figure.data[0].marker.as_ref().unwrap().colorscale.clone().unwrap();
        let positions: Vec<f64> = scale.iter().map(|(p, _)| *p).collect();
        assert_eq!(positions, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_dual_axis_uses_secondary_axis() {
        let spec = ChartSpec::dual_axis(
            ChartFrame::new("Official vs Adjusted"),
            AxisTrace::bars(TraceSpec::new("Official_BEA", "Official", Color::BLUE))
                .titled("Official %"),
            AxisTrace::line(TraceSpec::new("Rosenberg_Adjusted", "Adjusted", Color::RED), 3.0)
                .titled("Adjusted %")
                .range(0.0, 2.0),
        )
        .unwrap();

        let figure = build_chart(&gdp(), &spec).unwrap();
        assert_eq!(figure.data[0].yaxis, None);
        assert_eq!(figure.data[1].yaxis.as_deref(), Some("y2"));

        let y2 = figure.layout.yaxis2.as_ref().unwrap();
        assert_eq!(y2.overlaying.as_deref(), Some("y"));
        assert_eq!(y2.range, Some([0.0, 2.0]));
        assert_eq!(figure.layout.yaxis.title.as_ref().unwrap().text, "Official %");
    }

    #[test]
    fn test_frame_axis_titles_reach_layout() {
        let spec = ChartSpec::line(
            ChartFrame::new("Quarterly GDP")
                .x_title("Quarter")
                .y_title("Annualized %")
                .y_range(-30.0, 40.0),
            vec![LineTrace::new(TraceSpec::new("Official_BEA", "GDP", Color::BLUE))],
        )
        .unwrap();

        let figure = build_chart(&gdp(), &spec).unwrap();
        let layout = &figure.layout;
        assert_eq!(layout.xaxis.title.as_ref().unwrap().text, "Quarter");
        assert_eq!(layout.yaxis.title.as_ref().unwrap().text, "Annualized %");
        assert_eq!(layout.yaxis.range, Some([-30.0, 40.0]));

        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["layout"]["xaxis"]["title"]["text"], "Quarter");
    }

    #[test]
    fn test_x_axis_is_categorical() {
        let figure = build_chart(&gdp(), &official_vs_adjusted()).unwrap();
        let json = serde_json::to_value(&figure).unwrap();
        assert_eq!(json["layout"]["xaxis"]["type"], "category");
        assert!(json["layout"].get("yaxis2").is_none());
    }
}
