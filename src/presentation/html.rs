// HTML rendering - full dashboard pages around rendered blocks
use crate::application::sections::{
    Section, DASHBOARD_SUBTITLE, DASHBOARD_TITLE, DATA_SOURCES, FOOTER, FOOTER_SOURCES,
};
use crate::domain::figure::Figure;
use crate::domain::page::{Metric, Page, RenderedBlock, TextBlock, Tone};

const PLOTLY_JS: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render a composed section page
pub fn render_page(page: &Page, current: Section) -> String {
    let blocks: String = page
        .blocks
        .iter()
        .enumerate()
        .map(|(index, block)| render_block(index, block))
        .collect();
    render_document(&page.title, Some(current), &blocks)
}

/// Render a standalone error page (unknown section, failed render)
pub fn render_error_page(title: &str, message: &str) -> String {
    let body = format!(
        r#"<div class="block-error" role="alert">{}</div>"#,
        html_escape(message)
    );
    render_document(title, None, &body)
}

fn render_document(title: &str, current: Option<Section>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title} | {dashboard}</title>
    <script src="{plotly}"></script>
    <style>{css}</style>
</head>
<body>
    <nav class="sidebar">{sidebar}</nav>
    <main>
        <h1>🇺🇸 {dashboard}</h1>
        <p class="subtitle"><strong>{subtitle}</strong></p>
        <hr>
        <h2>{title}</h2>
        {body}
        <hr>
        <footer>{footer}<br>{sources}</footer>
    </main>
</body>
</html>"#,
        title = html_escape(title),
        dashboard = DASHBOARD_TITLE,
        plotly = PLOTLY_JS,
        css = inline_css(),
        sidebar = render_sidebar(current),
        subtitle = DASHBOARD_SUBTITLE,
        body = body,
        footer = FOOTER,
        sources = FOOTER_SOURCES,
    )
}

fn render_sidebar(current: Option<Section>) -> String {
    let links: String = Section::ALL
        .iter()
        .map(|section| {
            let class = if Some(*section) == current { r#" class="active""# } else { "" };
            format!(
                r#"<li><a{class} href="/sections/{slug}">{label}</a></li>"#,
                class = class,
                slug = section.slug(),
                label = section.nav_label(),
            )
        })
        .collect();

    let sources: String = DATA_SOURCES
        .iter()
        .map(|s| format!("<li>{}</li>", html_escape(s)))
        .collect();

    format!(
        r#"<h2>📊 Navigation</h2><ul class="nav">{}</ul><hr><h3>Data Sources</h3><ul class="sources">{}</ul>"#,
        links, sources
    )
}

fn render_block(position: usize, block: &RenderedBlock) -> String {
    match block {
        RenderedBlock::Chart { id, figure, .. } => render_chart(position, id, figure),
        RenderedBlock::Text { text } => render_text(text),
        RenderedBlock::Error { index, message } => render_block_error(*index, message),
    }
}

fn render_block_error(index: usize, message: &str) -> String {
    format!(
        r#"<div class="block-error" role="alert"><strong>⚠ Chart {} unavailable</strong><br>{}</div>"#,
        index + 1,
        html_escape(message)
    )
}

fn figure_json(figure: &Figure) -> serde_json::Result<(String, String)> {
    Ok((
        serde_json::to_string(&figure.data)?,
        serde_json::to_string(&figure.layout)?,
    ))
}

fn render_chart(position: usize, id: &str, figure: &Figure) -> String {
    render_chart_json(position, id, figure_json(figure))
}

fn render_chart_json(
    position: usize,
    id: &str,
    json: serde_json::Result<(String, String)>,
) -> String {
    let (data, layout) = match json {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Figure serialization error for {}: {}", id, e);
            return render_block_error(position, &format!("could not serialize {}: {}", id, e));
        }
    };

    format!(
        r#"<div class="chart" id="{id}"></div>
<script>Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});</script>
"#,
        id = html_escape(id),
        data = script_safe(&data),
        layout = script_safe(&layout),
    )
}

fn render_text(block: &TextBlock) -> String {
    match block {
        TextBlock::Heading { level, text } => {
            // h1/h2 are taken by the page header
            let level = level.saturating_add(1).min(6);
            format!("<h{level}>{}</h{level}>", render_inline(text), level = level)
        }
        TextBlock::Paragraph { text } => render_rich(text),
        TextBlock::Callout { tone, text } => format!(
            r#"<div class="callout callout-{}">{}</div>"#,
            tone_class(*tone),
            render_rich(text)
        ),
        TextBlock::Metrics { items } => {
            let cards: String = items.iter().map(render_metric).collect();
            format!(r#"<div class="metrics">{}</div>"#, cards)
        }
        TextBlock::Table { headers, rows } => render_table(headers, rows),
        TextBlock::Expander {
            title,
            text,
            expanded,
        } => format!(
            "<details{}><summary>{}</summary>{}</details>",
            if *expanded { " open" } else { "" },
            render_inline(title),
            render_rich(text)
        ),
        TextBlock::Caption { text } => {
            format!(r#"<div class="caption">{}</div>"#, render_rich(text))
        }
        TextBlock::Divider => "<hr>".to_string(),
    }
}

fn tone_class(tone: Tone) -> &'static str {
    match tone {
        Tone::Info => "info",
        Tone::Success => "success",
        Tone::Warning => "warning",
        Tone::Error => "error",
    }
}

fn render_metric(metric: &Metric) -> String {
    let delta = metric
        .delta
        .as_ref()
        .map(|d| {
            format!(
                r#"<div class="metric-delta {}">{}</div>"#,
                if metric.inverse { "delta-inverse" } else { "delta-normal" },
                html_escape(d)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div>{}</div>"#,
        html_escape(&metric.label),
        html_escape(&metric.value),
        delta
    )
}

fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", html_escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|c| format!("<td>{}</td>", html_escape(c)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!("<table><thead><tr>{}</tr></thead><tbody>{}</tbody></table>", head, body)
}

/// Paragraphs split on blank lines, `- ` lines become a bullet list,
/// remaining line breaks are kept
fn render_rich(text: &str) -> String {
    let mut html = String::new();
    let mut lines: Vec<String> = Vec::new();
    let mut items: Vec<String> = Vec::new();

    for line in text.lines().map(str::trim) {
        if let Some(item) = line.strip_prefix("- ") {
            flush_paragraph(&mut html, &mut lines);
            items.push(render_inline(item));
        } else if line.is_empty() {
            flush_paragraph(&mut html, &mut lines);
            flush_list(&mut html, &mut items);
        } else {
            flush_list(&mut html, &mut items);
            lines.push(render_inline(line));
        }
    }
    flush_paragraph(&mut html, &mut lines);
    flush_list(&mut html, &mut items);
    html
}

fn flush_paragraph(html: &mut String, lines: &mut Vec<String>) {
    if !lines.is_empty() {
        html.push_str(&format!("<p>{}</p>", lines.join("<br>")));
        lines.clear();
    }
}

fn flush_list(html: &mut String, items: &mut Vec<String>) {
    if !items.is_empty() {
        let lis: String = items.iter().map(|i| format!("<li>{}</li>", i)).collect();
        html.push_str(&format!("<ul>{}</ul>", lis));
        items.clear();
    }
}

/// Escape, then `**strong**` and `*em*`
fn render_inline(text: &str) -> String {
    let escaped = html_escape(text);
    emphasis(&escaped, "**", "strong", &|s: &str| {
        emphasis(s, "*", "em", &|t: &str| t.to_string())
    })
}

/// Wraps every other `marker`-delimited segment in `tag`; unbalanced
/// markers are left as-is
fn emphasis(text: &str, marker: &str, tag: &str, inner: &dyn Fn(&str) -> String) -> String {
    let parts: Vec<&str> = text.split(marker).collect();
    if parts.len() % 2 == 0 {
        return inner(text);
    }
    parts
        .iter()
        .enumerate()
        .map(|(i, part)| {
            if i % 2 == 1 {
                format!("<{tag}>{}</{tag}>", inner(part), tag = tag)
            } else {
                inner(part)
            }
        })
        .collect()
}

/// Keep embedded JSON from closing the surrounding `<script>`
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; color: #111827; display: flex; }
.sidebar { width: 240px; min-height: 100vh; background: #f3f4f6; padding: 20px; box-sizing: border-box; }
.sidebar ul { list-style: none; padding: 0; }
.sidebar .nav a { display: block; padding: 6px 10px; border-radius: 8px; color: #111827; text-decoration: none; }
.sidebar .nav a.active, .sidebar .nav a:hover { background: #ffffff; font-weight: 600; }
.sidebar .sources li { font-size: 13px; padding: 2px 0; }
main { flex: 1; padding: 24px 40px; max-width: 1200px; }
.subtitle { color: #374151; }
.chart { width: 100%; margin: 16px 0; }
.metrics { display: flex; gap: 16px; margin: 16px 0; }
.metric { flex: 1; background: #f8f9fa; border-radius: 10px; padding: 20px; border-left: 4px solid #3b82f6; }
.metric-label { font-size: 14px; color: #4b5563; }
.metric-value { font-size: 28px; font-weight: 600; margin: 4px 0; }
.metric-delta { font-size: 13px; }
.delta-normal { color: #15803d; }
.delta-inverse { color: #dc2626; }
.callout { border-radius: 8px; padding: 12px 16px; margin: 12px 0; }
.callout-info { background: #eff6ff; color: #1e3a8a; }
.callout-success { background: #f0fdf4; color: #14532d; }
.callout-warning { background: #fffbeb; color: #78350f; }
.callout-error { background: #fef2f2; color: #7f1d1d; }
.block-error { background: #fef2f2; border-left: 4px solid #dc2626; border-radius: 10px; padding: 16px 20px; margin: 16px 0; color: #7f1d1d; }
table { border-collapse: collapse; width: 100%; margin: 12px 0; }
th, td { border: 1px solid #e5e7eb; padding: 8px 12px; text-align: left; }
th { background: #f9fafb; }
details { border: 1px solid #e5e7eb; border-radius: 8px; padding: 8px 16px; margin: 8px 0; }
summary { cursor: pointer; font-weight: 600; }
.caption { font-size: 12px; color: #6b7280; }
footer { text-align: center; color: #6b7280; font-size: 12px; }
"#
}
