//! Validation of discovered panoramas.
//!
//! Both checks are fatal: duplicate top-level names first, then the
//! four-token naming convention unless it has been switched off.

mod checks;
mod diagnostic;

pub use checks::{check_duplicate_names, check_token_counts, token_count, REQUIRED_TOKENS};
pub use diagnostic::{Diagnostic, Diagnostics, Severity};

use crate::discovery::Discovery;
use crate::error::Result;
use crate::output::Printer;

/// Run the naming checks, failing on the first one that reports an error.
pub fn validate_discovery(discovery: &Discovery, check_tokens: bool) -> Result<()> {
    check_duplicate_names(&discovery.top_level).into_result()?;

    if check_tokens {
        check_token_counts(&discovery.items).into_result()?;
    }

    Ok(())
}

/// Print diagnostics through the status printer.
pub fn print_diagnostics(printer: &Printer, diagnostics: &Diagnostics) {
    for d in diagnostics.iter() {
        let label = d.severity.to_string();
        let line = format!("[{}]: {}", d.code, d.message);
        match d.severity {
            Severity::Error => printer.error(&label, &line),
            Severity::Warning => printer.warning(&label, &line),
        }
        if let Some(help) = &d.help {
            printer.info("help", help);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::discover;
    use crate::error::TilesError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_validate_valid_tree() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("car1")).unwrap();
        fs::write(dir.path().join("car1/scene_a_b_c.jpg"), "").unwrap();
        fs::write(dir.path().join("x_y_z_w.jpg"), "").unwrap();

        let discovery = discover(dir.path()).unwrap();
        assert!(validate_discovery(&discovery, true).is_ok());
    }

    #[test]
    fn test_validate_nested_valid_top_level_invalid() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("car1")).unwrap();
        fs::write(dir.path().join("car1/scene_a_b_c.jpg"), "").unwrap();
        fs::write(dir.path().join("car2.jpg"), "").unwrap();

        let discovery = discover(dir.path()).unwrap();
        let err = validate_discovery(&discovery, true).unwrap_err();

        match err {
            TilesError::Validation { message, .. } => {
                assert!(message.contains("car2"));
                assert!(message.contains(" 1 "));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validate_token_check_disabled() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("car2.jpg"), "").unwrap();
        fs::write(dir.path().join("a_b.jpg"), "").unwrap();

        let discovery = discover(dir.path()).unwrap();
        assert!(validate_discovery(&discovery, false).is_ok());
    }

    #[test]
    fn test_validate_duplicates_even_when_tokens_disabled() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("a_b_c_d.jpg"), "").unwrap();
        fs::write(dir.path().join("a_b_c_d.tif"), "").unwrap();

        let discovery = discover(dir.path()).unwrap();
        let err = validate_discovery(&discovery, false).unwrap_err();
        assert!(err.to_string().contains("a_b_c_d"));
    }
}
