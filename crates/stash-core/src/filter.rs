//! Free-text entry filtering
//!
//! Plain terms match the item name case-insensitively. A `c:` prefix
//! matches against the category name instead, so `c:food` narrows to
//! the FOOD category without excluding items whose names happen to
//! contain the term.

use crate::item::ItemHandle;

/// Parsed filter string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    raw: String,
    name_terms: Vec<String>,
    category_terms: Vec<String>,
}

impl Filter {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let mut filter = Filter {
            raw: raw.clone(),
            name_terms: Vec::new(),
            category_terms: Vec::new(),
        };
        for term in raw.split_whitespace() {
            if let Some(cat) = term.strip_prefix("c:") {
                if !cat.is_empty() {
                    filter.category_terms.push(cat.to_lowercase());
                }
            } else {
                filter.name_terms.push(term.to_lowercase());
            }
        }
        filter
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_empty(&self) -> bool {
        self.name_terms.is_empty() && self.category_terms.is_empty()
    }

    /// Whether `item` passes every term of the filter.
    pub fn matches(&self, item: &ItemHandle) -> bool {
        let name = item.name.to_lowercase();
        if !self.name_terms.iter().all(|term| name.contains(term)) {
            return false;
        }
        if self.category_terms.is_empty() {
            return true;
        }
        let category = item.category.name.to_lowercase();
        self.category_terms.iter().all(|term| category.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemCategory, ItemFlags, ItemId};

    fn handle(name: &str, category: &str) -> ItemHandle {
        ItemHandle {
            id: ItemId(1),
            kind: name.to_string(),
            name: name.to_string(),
            name_plural: None,
            category: ItemCategory::new(category.to_lowercase(), category, 0),
            count: 1,
            charges: None,
            weight_g: 1,
            volume_ml: 1,
            length_mm: 1,
            flags: ItemFlags::empty(),
            invlet: None,
            value: 1,
            capacity: None,
            parent: None,
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = Filter::default();
        assert!(f.is_empty());
        assert!(f.matches(&handle("canned beans", "FOOD")));
    }

    #[test]
    fn name_terms_are_caseless_substrings() {
        let f = Filter::new("BEAN");
        assert!(f.matches(&handle("canned beans", "FOOD")));
        assert!(!f.matches(&handle("rock", "OTHER")));
    }

    #[test]
    fn category_prefix_matches_category_name() {
        let f = Filter::new("c:food");
        assert!(f.matches(&handle("rock candy", "FOOD")));
        assert!(!f.matches(&handle("food processor", "TOOLS")));
    }

    #[test]
    fn mixed_terms_must_all_match() {
        let f = Filter::new("c:food bean");
        assert!(f.matches(&handle("canned beans", "FOOD")));
        assert!(!f.matches(&handle("canned ham", "FOOD")));
    }
}
