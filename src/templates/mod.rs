//! HTML generation for in-place editors.
//!
//! ## Module Structure
//!
//! - `components` - escaping, content tags, script tags
//! - `fields` - the in-place editor helpers
//! - `page` - demo page layout
//! - `styles` - CSS constants

mod components;
mod fields;
mod page;
mod styles;

pub use components::{content_tag, html_escape, is_valid_tag_name, javascript_tag, TagOptions};
pub use fields::{
    in_place_editor, in_place_editor_field, json_update_callback, prioritized_choices, render,
    rest_in_place_editor_field, FieldRef, RenderedField, CHOICE_SEPARATOR,
};
pub use page::{base_html, field_list};
pub use styles::STYLE;
