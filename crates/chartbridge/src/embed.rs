//! Helpers for placing a chart specification in an HTML page.

use crate::{ChartSpec, Result};

/// Escapes JSON so it can appear inside a `<script>` element.
///
/// `<`, `>` and `&` only occur inside JSON strings, where the `\u` escapes
/// decode to the same text. U+2028 and U+2029 are escaped for pre-ES2019
/// JavaScript parsers.
pub fn script_safe(json: &str) -> String {
    let mut out = String::with_capacity(json.len());

    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            ch => out.push(ch),
        }
    }

    out
}

/// Renders a standalone page that draws `spec` with vega-embed.
pub fn html_page(title: &str, spec: &ChartSpec) -> Result<String> {
    let spec = spec.to_embeddable_json()?;
    let title = escape_html(title);

    Ok(format!(
        r##"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <script src="https://cdn.jsdelivr.net/npm/vega@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-lite@5"></script>
  <script src="https://cdn.jsdelivr.net/npm/vega-embed@6"></script>
</head>
<body>
  <div id="chart"></div>
  <script type="text/javascript">
    vegaEmbed("#chart", {spec});
  </script>
</body>
</html>
"##
    ))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());

    for ch in s.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            ch => out.push(ch),
        }
    }

    out
}
