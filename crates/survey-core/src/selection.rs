//! Per-theme question selection state.
//!
//! The store is the only mutable state of a session. Every selection is kept
//! a subset of the theme's valid codes (see [`AvailableCodes`]), and a theme
//! that has never been touched behaves as if all of its valid codes were
//! selected.
//!
//! Default seeding is tracked with an explicit `seen` set rather than by the
//! absence of an entry, so a theme the user emptied stays empty.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use crate::available::AvailableCodes;

static EMPTY: BTreeSet<String> = BTreeSet::new();

#[derive(Debug, Clone)]
pub struct SelectionStore {
    available: Arc<AvailableCodes>,
    selected: BTreeMap<String, BTreeSet<String>>,
    seen: BTreeSet<String>,
}

impl SelectionStore {
    pub fn new(available: Arc<AvailableCodes>) -> Self {
        Self {
            available,
            selected: BTreeMap::new(),
            seen: BTreeSet::new(),
        }
    }

    pub fn available(&self) -> &AvailableCodes {
        &self.available
    }

    /// Current selection of `theme`, seeding it with every valid code on
    /// first access. Unknown themes yield an empty set.
    pub fn get(&mut self, theme: &str) -> &BTreeSet<String> {
        self.ensure_seeded(theme);
        self.selected.get(theme).unwrap_or(&EMPTY)
    }

    /// Current selection in catalog order.
    pub fn ordered(&mut self, theme: &str) -> Vec<String> {
        self.ensure_seeded(theme);
        self.ordered_seeded(theme)
    }

    /// Replaces the selection with `codes ∩ valid_codes(theme)`.
    ///
    /// Codes outside the theme, unknown themes and duplicates are dropped
    /// silently. Returns the resulting selection size.
    pub fn set_selected<I, S>(&mut self, theme: &str, codes: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if !self.available.contains_theme(theme) {
            tracing::debug!(theme, "ignoring selection for unknown theme");
            return 0;
        }
        let mut dropped = 0usize;
        let mut kept = BTreeSet::new();
        for code in codes {
            let code = code.as_ref();
            if self.available.is_valid(theme, code) {
                kept.insert(code.to_string());
            } else {
                dropped += 1;
            }
        }
        if dropped > 0 {
            tracing::debug!(theme, dropped, "dropped codes outside theme");
        }
        let count = kept.len();
        self.seen.insert(theme.to_string());
        self.selected.insert(theme.to_string(), kept);
        count
    }

    pub fn select_all(&mut self, theme: &str) -> usize {
        let codes = self.available.valid_codes(theme).to_vec();
        self.set_selected(theme, codes)
    }

    pub fn clear(&mut self, theme: &str) -> usize {
        self.set_selected(theme, std::iter::empty::<&str>())
    }

    /// Flips one code in or out of the selection.
    ///
    /// Returns the new membership, or `None` when the code is not valid for
    /// the theme (the selection is left unchanged).
    pub fn toggle(&mut self, theme: &str, code: &str) -> Option<bool> {
        if !self.available.is_valid(theme, code) {
            return None;
        }
        self.ensure_seeded(theme);
        let selection = self.selected.entry(theme.to_string()).or_default();
        if selection.remove(code) {
            Some(false)
        } else {
            selection.insert(code.to_string());
            Some(true)
        }
    }

    /// Seeds every known theme that has not been touched yet.
    pub fn seed_all(&mut self) {
        let themes: Vec<String> = self.available.themes().map(str::to_string).collect();
        for theme in themes {
            self.ensure_seeded(&theme);
        }
    }

    pub fn is_seen(&self, theme: &str) -> bool {
        self.seen.contains(theme)
    }

    /// Themes with a non-empty selection, codes in catalog order.
    ///
    /// Untouched themes report their default (all valid codes) without being
    /// seeded.
    pub fn active_themes(&self) -> BTreeMap<String, Vec<String>> {
        self.available
            .themes()
            .filter_map(|theme| {
                let codes = if self.seen.contains(theme) {
                    self.ordered_seeded(theme)
                } else {
                    self.available.valid_codes(theme).to_vec()
                };
                (!codes.is_empty()).then(|| (theme.to_string(), codes))
            })
            .collect()
    }

    fn ensure_seeded(&mut self, theme: &str) {
        if self.seen.contains(theme) || !self.available.contains_theme(theme) {
            return;
        }
        let defaults: BTreeSet<String> = self.available.valid_codes(theme).iter().cloned().collect();
        tracing::trace!(theme, codes = defaults.len(), "seeded default selection");
        self.seen.insert(theme.to_string());
        self.selected.insert(theme.to_string(), defaults);
    }

    fn ordered_seeded(&self, theme: &str) -> Vec<String> {
        let selection = self.selected.get(theme).unwrap_or(&EMPTY);
        self.available
            .valid_codes(theme)
            .iter()
            .filter(|code| selection.contains(code.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use survey_model::{Catalog, ObservationTable, QuestionMeta};

    fn store() -> SelectionStore {
        let catalog = Catalog::from_entries(vec![
            QuestionMeta::new("Q1", "First", "Trust"),
            QuestionMeta::new("Q2", "Second", "Trust"),
            QuestionMeta::new("Q3", "Third", "Trust"),
            QuestionMeta::new("R1", "Religion", "Religion"),
            QuestionMeta::new("E1", "No data", "Empty"),
        ]);
        let table = ObservationTable::from_columns(
            ["Q1", "Q3", "R1"]
                .into_iter()
                .map(|code| (code.to_string(), Vec::new())),
        )
        .unwrap();
        SelectionStore::new(Arc::new(AvailableCodes::from_sources(&catalog, &table)))
    }

    fn set(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(|code| (*code).to_string()).collect()
    }

    #[test]
    fn first_access_seeds_all_valid_codes() {
        let mut store = store();
        assert!(!store.is_seen("Trust"));
        assert_eq!(store.get("Trust"), &set(&["Q1", "Q3"]));
        assert!(store.is_seen("Trust"));
        assert_eq!(store.get("Trust"), &set(&["Q1", "Q3"]));
    }

    #[test]
    fn emptied_theme_is_not_reseeded() {
        let mut store = store();
        store.clear("Trust");
        assert!(store.get("Trust").is_empty());
        store.seed_all();
        assert!(store.get("Trust").is_empty());
    }

    #[test]
    fn set_selected_filters_invalid_codes() {
        let mut store = store();
        let kept = store.set_selected("Trust", ["Q3", "Q2", "R1", "Q3", "nope"]);
        assert_eq!(kept, 1);
        assert_eq!(store.get("Trust"), &set(&["Q3"]));
    }

    #[test]
    fn unknown_theme_is_always_empty() {
        let mut store = store();
        assert!(store.get("Nope").is_empty());
        assert_eq!(store.set_selected("Nope", ["Q1"]), 0);
        assert!(store.get("Nope").is_empty());
        assert!(!store.is_seen("Nope"));
    }

    #[test]
    fn select_all_restores_defaults() {
        let mut store = store();
        store.clear("Trust");
        assert_eq!(store.select_all("Trust"), 2);
        assert_eq!(store.ordered("Trust"), vec!["Q1", "Q3"]);
    }

    #[test]
    fn toggle_flips_membership() {
        let mut store = store();
        assert_eq!(store.toggle("Trust", "Q1"), Some(false));
        assert_eq!(store.ordered("Trust"), vec!["Q3"]);
        assert_eq!(store.toggle("Trust", "Q1"), Some(true));
        assert_eq!(store.ordered("Trust"), vec!["Q1", "Q3"]);
        assert_eq!(store.toggle("Trust", "Q2"), None);
        assert_eq!(store.toggle("Trust", "R1"), None);
    }

    #[test]
    fn active_themes_skip_empty_and_include_defaults() {
        let mut store = store();
        store.clear("Religion");

        let active = store.active_themes();

        assert_eq!(active.len(), 1);
        assert_eq!(active["Trust"], vec!["Q1", "Q3"]);
        assert!(!store.is_seen("Trust"));
    }
}
