//! The photo catalog: an ordered, read-only list of configured photos.

use serde::{Deserialize, Serialize};

/// One configured photo. Owned by configuration, read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoItem {
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default)]
    pub caption: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Ordered photo collection with tag-derived views.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: Vec<PhotoItem>,
}

impl Catalog {
    pub fn new(items: Vec<PhotoItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[PhotoItem] {
        &self.items
    }

    /// Catalog indices whose tag set contains `tag`, in catalog order.
    /// `None` means unfiltered: every index.
    pub fn indices_with_tag(&self, tag: Option<&str>) -> Vec<usize> {
        match tag {
            None => (0..self.items.len()).collect(),
            Some(tag) => self
                .items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.tags.iter().any(|t| t == tag))
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Distinct tags in first-appearance order (filter bar vocabulary).
    pub fn tags(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for item in &self.items {
            for tag in &item.tags {
                if !seen.contains(tag) {
                    seen.push(tag.clone());
                }
            }
        }
        seen
    }

    /// Wraparound index arithmetic over the full catalog.
    pub fn wrap(&self, index: i64) -> usize {
        let n = self.items.len() as i64;
        if n == 0 {
            return 0;
        }
        index.rem_euclid(n) as usize
    }
}

#[cfg(test)]
pub(crate) fn photo(src: &str, tags: &[&str]) -> PhotoItem {
    PhotoItem {
        src: src.to_string(),
        alt: String::new(),
        caption: String::new(),
        date: None,
        location: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            photo("a.jpg", &["concert"]),
            photo("b.jpg", &["walk"]),
            photo("c.jpg", &["concert", "night"]),
            photo("d.jpg", &[]),
        ])
    }

    #[test]
    fn unfiltered_view_is_every_index() {
        assert_eq!(catalog().indices_with_tag(None), vec![0, 1, 2, 3]);
    }

    #[test]
    fn tag_filter_preserves_catalog_order() {
        assert_eq!(catalog().indices_with_tag(Some("concert")), vec![0, 2]);
        assert_eq!(catalog().indices_with_tag(Some("night")), vec![2]);
        assert!(catalog().indices_with_tag(Some("nope")).is_empty());
    }

    #[test]
    fn tag_vocabulary_in_first_appearance_order() {
        assert_eq!(catalog().tags(), vec!["concert", "walk", "night"]);
    }

    #[test]
    fn wraparound_in_both_directions() {
        let c = catalog();
        assert_eq!(c.wrap(4), 0);
        assert_eq!(c.wrap(-1), 3);
        assert_eq!(c.wrap(7), 3);
    }
}
