//! Demo page listing the stored settings as editable fields.

use super::components::html_escape;
use super::styles::STYLE;

const PROTOTYPE_JS: &str = "https://ajax.googleapis.com/ajax/libs/prototype/1.7.3.0/prototype.js";
const SCRIPTACULOUS_JS: &str =
    "https://ajax.googleapis.com/ajax/libs/scriptaculous/1.9.0/scriptaculous.js?load=effects,controls";

// ============================================================================
// Base Template
// ============================================================================

/// Full page around `content`, with the widget library loaded in the head.
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
    <script src="{prototype}"></script>
    <script src="{scriptaculous}"></script>
</head>
<body>
    <div class="container">
        <h1>{title}</h1>
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        prototype = PROTOTYPE_JS,
        scriptaculous = SCRIPTACULOUS_JS,
    )
}

/// One `<dt>/<dd>` row per rendered field.
pub fn field_list(rows: &[(String, String)]) -> String {
    let mut html = String::from("<dl class=\"fields\">");
    for (label, field_html) in rows {
        html.push_str(&format!(
            "<dt>{}</dt><dd>{}</dd>",
            html_escape(label),
            field_html
        ));
    }
    html.push_str("</dl>");
    html
}
