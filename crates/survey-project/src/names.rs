//! Reserved sheet and column names, and theme-to-sheet naming.

use std::collections::HashSet;

/// Sheet holding the selected countries.
pub const INFO_SHEET: &str = "PROJE_BILGI";

/// Only column of [`INFO_SHEET`]; one country per row.
pub const INFO_COUNTRY_COLUMN: &str = "Seçili Ülkeler";

/// Question code column of a theme sheet.
pub const CODE_COLUMN: &str = "Kod";

/// Question display name column of a theme sheet.
pub const NAME_COLUMN: &str = "Soru";

/// Maximum length of a sanitized theme sheet name, in characters.
pub const MAX_THEME_SHEET_LEN: usize = 30;

/// Hard XLSX limit on sheet names.
const MAX_SHEET_NAME_LEN: usize = 31;

const ILLEGAL_SHEET_CHARS: &[char] = &['\\', '/', '*', '?', ':', '[', ']'];

/// Sheet name Excel keeps for itself (compared case-insensitively).
const RESERVED_SHEET_NAME: &str = "History";

/// Theme name as used for its sheet: illegal characters removed, truncated
/// to [`MAX_THEME_SHEET_LEN`] characters. Blank results become `Sheet`.
///
/// Excel also rejects names that start or end with `'` and the name
/// `History`; those apostrophes are trimmed and `History` gets a `_` suffix.
///
/// ```
/// use survey_project::sanitize_sheet_name;
///
/// assert_eq!(sanitize_sheet_name("Trust [core]: people?"), "Trust core people");
/// assert_eq!(sanitize_sheet_name("'Quoted'"), "Quoted");
/// ```
pub fn sanitize_sheet_name(theme: &str) -> String {
    let cleaned: String = theme
        .chars()
        .filter(|c| !ILLEGAL_SHEET_CHARS.contains(c))
        .take(MAX_THEME_SHEET_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('\'');
    if cleaned.trim().is_empty() {
        "Sheet".to_string()
    } else if cleaned.eq_ignore_ascii_case(RESERVED_SHEET_NAME) {
        format!("{cleaned}_")
    } else {
        cleaned.to_string()
    }
}

/// Hands out distinct sheet names within one workbook.
#[derive(Debug, Default)]
pub(crate) struct SheetNamer {
    taken: HashSet<String>,
}

impl SheetNamer {
    pub(crate) fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_lowercase());
    }

    /// Returns `name` if still free, otherwise `name~N` with the smallest
    /// free `N >= 2`. XLSX compares sheet names case-insensitively.
    pub(crate) fn unique(&mut self, name: &str) -> String {
        if self.taken.insert(name.to_lowercase()) {
            return name.to_string();
        }
        let mut idx = 2usize;
        loop {
            let suffix = format!("~{idx}");
            let base: String = name
                .chars()
                .take(MAX_SHEET_NAME_LEN - suffix.chars().count())
                .collect();
            let candidate = format!("{base}{suffix}");
            if self.taken.insert(candidate.to_lowercase()) {
                return candidate;
            }
            idx += 1;
        }
    }
}
