//! Inline SVG stand-ins for catalogue entries without a photo

use crate::io::configuration::{PLACEHOLDER_HEIGHT, PLACEHOLDER_WIDTH};
use crate::io::links::encode_uri_component;

/// Scheme prefix of every synthesized placeholder
pub const PLACEHOLDER_PREFIX: &str = "data:image/svg+xml;utf8,";

/// Escape text for inclusion in SVG character data
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Build a placeholder data URL showing `title`
///
/// `uid` is embedded as an XML comment so two placeholders with the same
/// title still have distinct sources; it does not change the rendering.
pub fn placeholder_data_url(title: &str, uid: u64) -> String {
    let width = PLACEHOLDER_WIDTH;
    let height = PLACEHOLDER_HEIGHT;
    let label = if title.is_empty() { "No image" } else { title };
    let svg = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='0 0 {width} {height}'>\
<rect width='100%' height='100%' fill='#efefef'/><!--uid:{uid}-->\
<g transform='translate({cx},{cy})'>\
<text x='0' y='0' font-family='Helvetica, Arial, sans-serif' font-size='18' fill='#666' \
text-anchor='middle' dominant-baseline='middle'>{text}</text></g></svg>",
        cx = width / 2,
        cy = height / 2,
        text = escape_xml(label),
    );
    format!("{PLACEHOLDER_PREFIX}{}", encode_uri_component(&svg))
}

/// Whether a source is an inline SVG data URL
pub fn is_inline_svg(src: &str) -> bool {
    src.starts_with(PLACEHOLDER_PREFIX)
}
