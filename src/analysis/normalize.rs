//! Conversion of the two source documents into a flat list of gallery items

use crate::analysis::placeholder::placeholder_data_url;
use serde::Serialize;
use serde_json::Value;

/// Which source document an item came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    /// Catalogue objects document
    Primary,
    /// Protest/event info document
    Secondary,
}

/// One displayable catalogue entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryItem {
    /// Opaque identifier, when the record has one
    pub id: Option<String>,
    /// Display title, possibly empty
    pub title: String,
    /// Image source (path, URL or inline data URL)
    pub src: String,
    /// Originating document
    pub source_kind: SourceKind,
    /// Whether `src` is a synthesized placeholder
    pub is_placeholder: bool,
    /// Whether `src` was taken from a multi-photo gallery field
    pub from_gallery: bool,
}

impl GalleryItem {
    /// Key under which duplicate items collapse
    pub fn dedup_key(&self) -> String {
        match &self.id {
            Some(id) => format!("id:{id}|{}", self.src),
            None => format!("src:{}", self.src),
        }
    }

    /// Key identifying the catalogue object the item stands for
    pub fn object_key(&self) -> String {
        match &self.id {
            Some(id) => format!("id:{id}"),
            None => format!("src:{}", self.src),
        }
    }

    /// Caption used in listings: the title, else the id, else a generic label
    pub fn label(&self) -> String {
        if !self.title.is_empty() {
            return self.title.clone();
        }
        self.id
            .as_ref()
            .map_or_else(|| "Untitled".to_string(), |id| format!("id:{id}"))
    }
}

/// Turns raw JSON documents into [`GalleryItem`]s
///
/// Owns the placeholder counter, so placeholders from one normalizer never
/// share a source even when their titles match.
#[derive(Debug, Default)]
pub struct Normalizer {
    placeholder_counter: u64,
}

impl Normalizer {
    /// Create a normalizer with a fresh placeholder counter
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of placeholders synthesized so far
    pub const fn placeholders_issued(&self) -> u64 {
        self.placeholder_counter
    }

    /// Normalize both documents, primary entries first
    pub fn normalize(&mut self, primary: Option<&Value>, secondary: Option<&Value>) -> Vec<GalleryItem> {
        let mut items = self.normalize_primary(primary);
        items.extend(self.normalize_secondary(secondary));
        items
    }

    /// Normalize the objects document
    ///
    /// Accepts a bare array or an object carrying an `objects` or `items`
    /// array. Only one representative image per object is used:
    /// `image_filename`, then `photo`, then `image`.
    pub fn normalize_primary(&mut self, document: Option<&Value>) -> Vec<GalleryItem> {
        let Some(records) = document.and_then(|doc| record_list(doc, &["objects", "items"])) else {
            return Vec::new();
        };

        records
            .iter()
            .map(|record| {
                let id = first_identifier(record, &["id", "_id", "slug"]);
                let title = first_text(record, &["title", "name"]).unwrap_or_default();
                let src = first_text(record, &["image_filename", "photo", "image"]);
                self.build_item(id, title, src, SourceKind::Primary, false)
            })
            .collect()
    }

    /// Normalize the info document
    ///
    /// Accepts a bare array or an object carrying an `items` array. The image
    /// is `photos[0]`, then `photo`, `image`, `image_filename`, and finally the
    /// first entry of the `images[]` gallery.
    pub fn normalize_secondary(&mut self, document: Option<&Value>) -> Vec<GalleryItem> {
        let Some(records) = document.and_then(|doc| record_list(doc, &["items"])) else {
            return Vec::new();
        };

        records
            .iter()
            .map(|record| {
                let id = first_identifier(record, &["id", "slug"]);
                let title = first_text(record, &["title", "name"]).unwrap_or_default();
                let direct = record
                    .get("photos")
                    .and_then(Value::as_array)
                    .and_then(|photos| photos.first())
                    .and_then(non_empty_str)
                    .or_else(|| first_text(record, &["photo", "image", "image_filename"]));
                match direct {
                    Some(src) => self.build_item(id, title, Some(src), SourceKind::Secondary, false),
                    None => {
                        let gallery_src = first_gallery_image(record);
                        let from_gallery = gallery_src.is_some();
                        self.build_item(id, title, gallery_src, SourceKind::Secondary, from_gallery)
                    }
                }
            })
            .collect()
    }

    fn build_item(
        &mut self,
        id: Option<String>,
        title: String,
        src: Option<String>,
        source_kind: SourceKind,
        from_gallery: bool,
    ) -> GalleryItem {
        match src {
            Some(src) => GalleryItem {
                id,
                title,
                src,
                source_kind,
                is_placeholder: false,
                from_gallery,
            },
            None => {
                self.placeholder_counter += 1;
                let caption = if title.is_empty() {
                    format!("Object {}", id.as_deref().unwrap_or_default())
                } else {
                    title.clone()
                };
                GalleryItem {
                    src: placeholder_data_url(&caption, self.placeholder_counter),
                    id,
                    title,
                    source_kind,
                    is_placeholder: true,
                    from_gallery: false,
                }
            }
        }
    }
}

fn record_list<'a>(document: &'a Value, keys: &[&str]) -> Option<&'a Vec<Value>> {
    if let Some(list) = document.as_array() {
        return Some(list);
    }
    let object = document.as_object()?;
    keys.iter()
        .find_map(|key| object.get(*key).filter(|value| !value.is_null()))
        .and_then(Value::as_array)
}

fn non_empty_str(value: &Value) -> Option<String> {
    value
        .as_str()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn first_text(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|key| record.get(*key).and_then(non_empty_str))
}

// Numeric ids are accepted; zero and empty strings count as absent
fn first_identifier(record: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match record.get(*key)? {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
        _ => None,
    })
}

fn first_gallery_image(record: &Value) -> Option<String> {
    let first = record.get("images")?.as_array()?.first()?;
    match first {
        Value::String(_) => non_empty_str(first),
        Value::Object(_) => first_text(first, &["src", "image"]),
        _ => None,
    }
}
