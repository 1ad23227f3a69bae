//! Naming checks for discovered panoramas.
//!
//! Each check takes discovery output and returns `Diagnostics`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::discovery::{base_name, Item};

use super::diagnostic::{Diagnostic, Diagnostics};

/// Number of `_`-separated tokens every base name must have.
pub const REQUIRED_TOKENS: usize = 4;

/// Report every top-level name that occurs more than once.
///
/// Names are compared with their extension stripped, so `car.jpg` and a
/// `car` folder collide. All offenders are listed in a single error.
pub fn check_duplicate_names(top_level: &[PathBuf]) -> Diagnostics {
    let mut result = Diagnostics::new();

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for entry in top_level {
        if let Some(name) = base_name(entry) {
            *counts.entry(name).or_default() += 1;
        }
    }

    let repeated: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect();

    if !repeated.is_empty() {
        result.push(
            Diagnostic::error(
                "panotiles::validate::duplicate-name",
                format!("The following cars are repeated: {}", repeated.join(", ")),
            )
            .with_help("Each top-level panorama or folder needs a unique name"),
        );
    }

    result
}

/// Check that every base name splits into exactly four `_` tokens.
///
/// Stops at the first offending item.
pub fn check_token_counts(items: &[Item]) -> Diagnostics {
    let mut result = Diagnostics::new();

    if let Some((item, count)) = items
        .iter()
        .map(|item| (item, token_count(&item.base_name)))
        .find(|(_, count)| *count != REQUIRED_TOKENS)
    {
        result.push(
            Diagnostic::error(
                "panotiles::validate::token-count",
                format!(
                    "File {} contains {} underscore-separated token(s) instead of {}",
                    item.base_name, count, REQUIRED_TOKENS
                ),
            )
            .with_help("Rename it, or pass -i to skip this check"),
        );
    }

    result
}

/// Number of tokens `name` splits into on `_`.
pub fn token_count(name: &str) -> usize {
    name.split('_').count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(path: &str) -> Item {
        Item::new(path, None).unwrap()
    }

    fn first_message(d: &Diagnostics) -> String {
        d.iter().next().map(|d| d.message.clone()).unwrap_or_default()
    }

    #[test]
    fn test_token_count() {
        assert_eq!(token_count("car2"), 1);
        assert_eq!(token_count("a_b_c_d"), 4);
        assert_eq!(token_count("a__c_d"), 4);
        assert_eq!(token_count(""), 1);
        assert_eq!(token_count("a_b_c_d_e"), 5);
    }

    #[test]
    fn test_unique_names_pass() {
        let result = check_duplicate_names(&[
            PathBuf::from("p/car1"),
            PathBuf::from("p/car2.jpg"),
        ]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_duplicate_names_reports_all() {
        let result = check_duplicate_names(&[
            PathBuf::from("p/car1"),
            PathBuf::from("p/car1.jpg"),
            PathBuf::from("p/car2.jpg"),
            PathBuf::from("p/car2.tif"),
            PathBuf::from("p/car3.jpg"),
        ]);

        assert_eq!(
            first_message(&result),
            "The following cars are repeated: car1, car2"
        );
        assert!(result.into_result().is_err());
    }

    #[test]
    fn test_token_counts_pass() {
        let result = check_token_counts(&[item("p/a_b_c_d.jpg"), item("p/e_f_g_h.jpg")]);
        assert!(result.is_empty());
    }

    #[test]
    fn test_token_counts_stops_at_first_violation() {
        let result = check_token_counts(&[
            item("p/a_b_c_d.jpg"),
            item("p/car2.jpg"),
            item("p/x_y.jpg"),
        ]);

        assert_eq!(result.iter().count(), 1);
        assert_eq!(
            first_message(&result),
            "File car2 contains 1 underscore-separated token(s) instead of 4"
        );
    }
}
