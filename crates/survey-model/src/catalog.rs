//! Question catalog: code -> (display name, theme).

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionMeta {
    pub code: String,
    pub name: String,
    pub theme: String,
}

impl QuestionMeta {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        theme: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            theme: theme.into(),
        }
    }
}

/// Question catalog keyed by code, in source order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<QuestionMeta>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog, collapsing duplicate codes (first occurrence wins).
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = QuestionMeta>,
    {
        let mut catalog = Self::default();
        for entry in entries {
            if catalog.index.contains_key(&entry.code) {
                continue;
            }
            catalog
                .index
                .insert(entry.code.clone(), catalog.entries.len());
            catalog.entries.push(entry);
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[QuestionMeta] {
        &self.entries
    }

    pub fn get(&self, code: &str) -> Option<&QuestionMeta> {
        self.index.get(code).map(|&idx| &self.entries[idx])
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.get(code).map(|meta| meta.name.as_str())
    }

    /// Distinct non-empty themes, sorted.
    pub fn themes(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|meta| meta.theme.as_str())
            .filter(|theme| !theme.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Codes belonging to `theme`, in catalog order.
    pub fn codes_for_theme<'a>(&'a self, theme: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.entries
            .iter()
            .filter(move |meta| meta.theme == theme)
            .map(|meta| meta.code.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::from_entries(vec![
            QuestionMeta::new("Q2", "Trust in people", "Trust"),
            QuestionMeta::new("Q1", "Importance of religion", "Religion"),
            QuestionMeta::new("Q3", "Trust in police", "Trust"),
            QuestionMeta::new("Q2", "Duplicate", "Other"),
            QuestionMeta::new("Q9", "Untagged", ""),
        ])
    }

    #[test]
    fn duplicates_collapse_first_wins() {
        let catalog = sample();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.display_name("Q2"), Some("Trust in people"));
        assert_eq!(catalog.get("Q2").unwrap().theme, "Trust");
    }

    #[test]
    fn themes_are_sorted_and_skip_empty() {
        assert_eq!(sample().themes(), vec!["Religion", "Trust"]);
    }

    #[test]
    fn codes_for_theme_keep_catalog_order() {
        let catalog = sample();
        let codes: Vec<&str> = catalog.codes_for_theme("Trust").collect();
        assert_eq!(codes, vec!["Q2", "Q3"]);
        assert_eq!(catalog.codes_for_theme("Unknown").count(), 0);
    }

    #[test]
    fn question_meta_serializes() {
        let json = serde_json::to_string(&QuestionMeta::new("Q1", "Name", "Trust"))
            .expect("serialize meta");
        assert_eq!(json, r#"{"code":"Q1","name":"Name","theme":"Trust"}"#);
    }
}
