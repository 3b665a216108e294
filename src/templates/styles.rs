//! CSS for the demo page and the editor forms the widget injects.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
/* Solarized Light Theme */
:root {
    --base01: #586e75;
    --base00: #657b83;
    --base1: #93a1a1;
    --base2: #eee8d5;
    --base3: #fdf6e3;
    --red: #dc322f;
    --blue: #268bd2;
    --cyan: #2aa198;

    --bg: var(--base3);
    --fg: var(--base00);
    --muted: var(--base1);
    --border: var(--base2);
    --link: var(--blue);
}

* { box-sizing: border-box; }

body {
    font-family: "Inter", -apple-system, BlinkMacSystemFont, sans-serif;
    background: var(--bg);
    color: var(--fg);
    line-height: 1.6;
    margin: 0;
}

.container {
    max-width: 720px;
    margin: 0 auto;
    padding: 2rem 1rem;
}

h1 { color: var(--base01); font-weight: 600; }

dl.fields dt {
    color: var(--muted);
    font-size: 0.85rem;
    text-transform: uppercase;
    margin-top: 1.25rem;
}

dl.fields dd { margin: 0.25rem 0 0 0; }

.in_place_editor_field {
    cursor: pointer;
    padding: 0.1rem 0.25rem;
    border-bottom: 1px dashed var(--muted);
}

.inplaceeditor-form input[type="text"],
.inplaceeditor-form textarea,
.inplaceeditor-form select {
    font: inherit;
    padding: 0.25rem 0.5rem;
    border: 1px solid var(--border);
    background: #fff;
    color: var(--fg);
}

.inplaceeditor-form a { color: var(--link); margin-left: 0.5rem; }

.inplaceeditor-saving { color: var(--muted); font-style: italic; }

.edit-link { font-size: 0.85rem; color: var(--link); margin-left: 0.5rem; }

.error { color: var(--red); }
"#;
