use crate::app::error::Error;
use lazy_static::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

lazy_static! {
    // Letters only: `[Category("Billing2")]` is not picked up.
    static ref CATEGORY_REGEX: Regex =
        Regex::new(r#"\s*\[\s*Category\s*\(\s*"(?P<category>[a-zA-Z]+)"\s*\)\s*\]"#)
            .expect("Regex compilation error");
}

/// Every distinct category named in `text`.
pub fn categories_in<'t>(text: &'t str) -> impl Iterator<Item = &'t str> + 't {
    CATEGORY_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.name("category"))
        .map(|category| category.as_str())
}

/// Walks `root` and returns the sorted, distinct categories found in files
/// whose name ends with `suffix`. Any unreadable file aborts the scan.
pub fn discover_categories(root: &Path, suffix: &str) -> Result<Vec<String>, Error> {
    let mut categories = BTreeSet::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            Error::Discovery {
                path,
                source: err.into(),
            }
        })?;
        if !entry.file_type().is_file() || !entry.file_name().to_string_lossy().ends_with(suffix) {
            continue;
        }
        let bytes = fs::read(entry.path()).map_err(|source| Error::Discovery {
            path: entry.path().to_path_buf(),
            source,
        })?;
        // Sources saved in a legacy code page still carry ASCII attributes.
        let source = String::from_utf8_lossy(&bytes);
        let before = categories.len();
        categories.extend(categories_in(&source).map(str::to_owned));
        debug!(
            "Scanned {}, {} new categories",
            entry.path().display(),
            categories.len() - before
        );
    }
    Ok(categories.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_categories_in_accepts_whitespace_variants() {
        let source = r#"
            [Category("Billing")]
            [ Category ( "Auth" ) ]
            [Category("Billing2")]
            [Category("Two Words")]
            [Category("snake_case")]
        "#;

        let found: Vec<&str> = categories_in(source).collect();

        assert_eq!(found, vec!["Billing", "Auth"]);
    }

    #[test]
    fn test_discovery_deduplicates_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("BillingTests.cs"),
            "[Category(\"Billing\")]\nclass A {}\n[Category(\"Auth\")]\n[Category(\"Billing\")]\n",
        )
        .unwrap();
        fs::write(dir.path().join("PlainTests.cs"), "class B {}\n").unwrap();

        let categories = discover_categories(dir.path(), ".cs").unwrap();

        assert_eq!(categories, vec!["Auth".to_owned(), "Billing".to_owned()]);
    }

    #[test]
    fn test_discovery_recurses_and_honours_suffix() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("Nested").join("Deeper");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("ZetaTests.cs"), "[Category(\"Zeta\")]").unwrap();
        fs::write(dir.path().join("notes.txt"), "[Category(\"Ignored\")]").unwrap();

        let categories = discover_categories(dir.path(), ".cs").unwrap();

        assert_eq!(categories, vec!["Zeta".to_owned()]);
    }

    #[test]
    fn test_discovery_of_missing_root_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");

        let result = discover_categories(&missing, ".cs");

        assert!(matches!(result, Err(Error::Discovery { .. })));
    }

    #[test]
    fn test_discovery_reads_non_utf8_sources() {
        let dir = tempfile::tempdir().unwrap();
        let mut latin1 = b"// Caf".to_vec();
        latin1.push(0xe9);
        latin1.extend_from_slice(b"\n[Category(\"Billing\")]\n");
        fs::write(dir.path().join("Cafe.cs"), latin1).unwrap();

        let categories = discover_categories(dir.path(), ".cs").unwrap();

        assert_eq!(categories, vec!["Billing".to_owned()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discovery_fails_on_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Good.cs"), "[Category(\"Auth\")]").unwrap();
        std::os::unix::fs::symlink(dir.path().join("Gone.cs"), dir.path().join("Broken.cs"))
            .unwrap();

        let result = discover_categories(dir.path(), ".cs");

        match result {
            Err(Error::Discovery { path, .. }) => assert!(path.ends_with("Broken.cs")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
