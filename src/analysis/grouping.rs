//! Deduplication of items and grouping by shared image source

use crate::analysis::normalize::GalleryItem;
use crate::io::links::link_for_item;
use std::collections::{HashMap, HashSet};

/// Items sharing one image source, rendered as a single scatter tile
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// First member, used for the tile's own link and caption
    pub representative: GalleryItem,
    /// Shared image source
    pub src: String,
    /// Members in first-seen order; never empty
    pub members: Vec<GalleryItem>,
    /// Whether every member came from a multi-photo gallery field
    pub is_gallery_variant: bool,
}

impl Group {
    /// Multiplicity badge value
    pub fn count(&self) -> usize {
        self.members.len()
    }

    /// Key recording that this group has a tile in the current pass
    pub fn placement_key(&self) -> String {
        format!("src:{}", self.src)
    }

    /// Ids of members that have one, in member order
    pub fn member_ids(&self) -> Vec<String> {
        self.members
            .iter()
            .filter_map(|item| item.id.clone())
            .collect()
    }

    /// Caption and navigation target of each member, for the shared-image listing
    pub fn member_links(&self) -> Vec<(String, String)> {
        self.members
            .iter()
            .map(|item| (item.label(), link_for_item(item)))
            .collect()
    }
}

/// Drop empty sources and repeated `(id, src)` pairs, keeping first occurrences
pub fn dedup_items(items: &[GalleryItem]) -> Vec<GalleryItem> {
    let mut seen = HashSet::new();
    items
        .iter()
        .filter(|item| !item.src.is_empty())
        .filter(|item| seen.insert(item.dedup_key()))
        .cloned()
        .collect()
}

/// Collect deduplicated items into groups keyed by image source
///
/// Groups appear in the order their source was first seen. Items with
/// different ids but the same source join one group.
pub fn group_by_src(items: &[GalleryItem]) -> Vec<Group> {
    let mut index_by_src: HashMap<&str, usize> = HashMap::new();
    let mut buckets: Vec<Vec<GalleryItem>> = Vec::new();

    for item in items {
        if let Some(&index) = index_by_src.get(item.src.as_str()) {
            if let Some(bucket) = buckets.get_mut(index) {
                bucket.push(item.clone());
            }
        } else {
            index_by_src.insert(item.src.as_str(), buckets.len());
            buckets.push(vec![item.clone()]);
        }
    }

    buckets
        .into_iter()
        .filter_map(|members| {
            let representative = members.first()?.clone();
            let is_gallery_variant = members.iter().all(|item| item.from_gallery);
            Some(Group {
                src: representative.src.clone(),
                representative,
                members,
                is_gallery_variant,
            })
        })
        .collect()
}

/// Deduplicate and group in one step
pub fn build_groups(items: &[GalleryItem]) -> (Vec<GalleryItem>, Vec<Group>) {
    let unique = dedup_items(items);
    let groups = group_by_src(&unique);
    (unique, groups)
}
