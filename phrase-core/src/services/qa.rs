use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::model::catalog::LanguageCatalog;
use crate::model::phrase::PhraseRow;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct QaIssue {
    pub row_id: String,
    pub code: String,
    pub message: String,
}

fn issue(row: &PhraseRow, code: &str, message: String) -> QaIssue {
    QaIssue {
        row_id: row.id.clone(),
        code: code.to_string(),
        message,
    }
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\{\{\s*(\w+)\s*\}\}|\{(\w+)\}|%[sd]").expect("placeholder pattern is valid")
    })
}

/// Placeholders in `text`, normalized and sorted so two texts can be compared as multisets.
fn placeholders(text: &str) -> Vec<String> {
    let mut found: Vec<String> = placeholder_re()
        .captures_iter(text)
        .map(|caps| match (caps.get(1), caps.get(2)) {
            (Some(name), _) => format!("{{{{{}}}}}", name.as_str()),
            (_, Some(name)) => format!("{{{}}}", name.as_str()),
            _ => caps[0].to_string(),
        })
        .collect();
    found.sort();
    found
}

pub fn run(rows: &[PhraseRow], catalog: &LanguageCatalog) -> Vec<QaIssue> {
    let mut issues: Vec<QaIssue> = Vec::new();

    let mut key_counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        let key = r.phrase_key.trim();
        if !key.is_empty() {
            *key_counts.entry(key).or_default() += 1;
        }
    }

    for r in rows {
        let key = r.phrase_key.trim();
        let default_trim = r.default_translation.trim();

        if key.is_empty() {
            issues.push(issue(r, "EMPTY_PHRASE_KEY", "Phrase key is empty".to_string()));
        } else if key_counts.get(key).copied().unwrap_or(0) > 1 {
            issues.push(issue(
                r,
                "DUPLICATE_PHRASE_KEY",
                format!("Phrase key '{key}' is used by more than one row"),
            ));
        }

        if default_trim.is_empty() {
            issues.push(issue(
                r,
                "EMPTY_DEFAULT_TRANSLATION",
                "Default translation is empty".to_string(),
            ));
        }

        let expected = placeholders(&r.default_translation);

        for code in catalog.codes() {
            let text = r.translations.get(code).map(String::as_str).unwrap_or("");
            let text_trim = text.trim();

            if text_trim.is_empty() {
                issues.push(issue(
                    r,
                    "MISSING_TRANSLATION",
                    format!("Missing translation for '{code}'"),
                ));
                continue;
            }

            if !default_trim.is_empty() && text_trim == default_trim {
                issues.push(issue(
                    r,
                    "SAME_AS_DEFAULT",
                    format!("Translation for '{code}' is identical to the default text"),
                ));
            }

            if placeholders(text) != expected {
                issues.push(issue(
                    r,
                    "PLACEHOLDER_MISMATCH",
                    format!("Placeholders in '{code}' differ from the default text"),
                ));
            }
        }
    }

    issues
}
