//! Navigation targets and URI component escaping

use crate::analysis::normalize::{GalleryItem, SourceKind};
use crate::io::configuration::{OBJECT_DETAIL_PAGE, PROTEST_PAGE};

/// Escape a string the way browsers' `encodeURIComponent` does
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ! ~ * ' ( )`) pass through,
/// every other byte of the UTF-8 encoding becomes `%XX`.
pub fn encode_uri_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric()
            || matches!(
                byte,
                b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')'
            )
        {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

/// Reverse of [`encode_uri_component`]
///
/// Malformed escapes are kept verbatim; invalid UTF-8 is replaced lossily.
pub fn decode_uri_component(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while let Some(&byte) = bytes.get(index) {
        if byte == b'%' {
            let escape = bytes
                .get(index + 1..index + 3)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(value) = escape {
                decoded.push(value);
                index += 3;
                continue;
            }
        }
        decoded.push(byte);
        index += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Page a tile for this item navigates to
///
/// Secondary entries open the protest page, primary ones the object detail
/// page. The id is preferred; items without one are addressed by image source.
pub fn link_for_item(item: &GalleryItem) -> String {
    let page = match item.source_kind {
        SourceKind::Primary => OBJECT_DETAIL_PAGE,
        SourceKind::Secondary => PROTEST_PAGE,
    };
    match &item.id {
        Some(id) => format!("{page}?id={}", encode_uri_component(id)),
        None => format!("{page}?img={}", encode_uri_component(&item.src)),
    }
}
