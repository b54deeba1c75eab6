//! Catalog file loading
//!
//! One card per line, `ID: criterion | criterion | ...`. Blank lines and
//! anything after `#` are ignored:
//!
//! ```text
//! # parity of the triangle
//! 5: even(t) | odd(t)
//! 11: t<s | t==s | t>s
//! ```

use super::{Catalog, CatalogError};
use crate::core::{Criterion, ValidatorId};
use std::fs;
use std::path::Path;

/// Load and verify a catalog from a file
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read, a parse error for a
/// malformed line, or `CatalogError::Overlap` if a card's criteria are not
/// mutually exclusive.
///
/// # Examples
/// ```no_run
/// use turing_solver::catalog::loader::load_from_file;
///
/// let catalog = load_from_file("cards.txt").unwrap();
/// println!("Loaded {} validators", catalog.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_catalog(&content)
}

/// Parse and verify catalog text
///
/// # Errors
///
/// See [`load_from_file`].
pub fn parse_catalog(content: &str) -> Result<Catalog, CatalogError> {
    let mut cards = Vec::new();

    for (index, raw) in content.lines().enumerate() {
        let line = index + 1;
        let text = raw.split('#').next().unwrap_or_default().trim();
        if text.is_empty() {
            continue;
        }

        let (id, criteria) = text.split_once(':').ok_or_else(|| CatalogError::Parse {
            line,
            message: "expected 'ID: criterion | criterion ...'".to_string(),
        })?;

        let id: ValidatorId = id.trim().parse().map_err(|_| CatalogError::Parse {
            line,
            message: format!("invalid validator id '{}'", id.trim()),
        })?;

        let criteria = criteria
            .split('|')
            .map(|c| {
                c.parse::<Criterion>()
                    .map_err(|source| CatalogError::Criterion { line, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        cards.push((id, criteria));
    }

    let catalog = Catalog::new(cards)?;
    catalog.verify()?;
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_cards_and_comments() {
        let catalog = parse_catalog(
            "# parity\n5: even(t) | odd(t)   # trailing comment\n\n11: t<s | t==s | t>s\n",
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        let parity = catalog.get(5).unwrap();
        assert_eq!(parity.to_string(), "#5 [even(t) | odd(t)]");
        assert_eq!(catalog.get(11).unwrap().len(), 3);
    }

    #[test]
    fn missing_colon_reports_line() {
        let err = parse_catalog("1: t==1 | t>1\n2 t<3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 2, .. }));
    }

    #[test]
    fn bad_id_reports_line() {
        let err = parse_catalog("x: t==1 | t>1\n").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { line: 1, .. }));
        assert_eq!(err.to_string(), "line 1: invalid validator id 'x'");
    }

    #[test]
    fn bad_criterion_reports_line() {
        let err = parse_catalog("\n\n3: s<3 | s=3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Criterion { line: 3, .. }));
    }

    #[test]
    fn overlapping_card_rejected() {
        let err = parse_catalog("7: t<=3 | t>=3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Overlap { id: 7, .. }));
    }

    #[test]
    fn duplicate_card_rejected() {
        let err = parse_catalog("1: t==1 | t>1\n1: t<3 | t>=3\n").unwrap_err();
        assert!(matches!(err, CatalogError::Duplicate(1)));
    }

    #[test]
    fn load_from_temp_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "19: t+s<6 | t+s==6 | t+s>6").unwrap();
        writeln!(file, "20: triple | pair | distinct").unwrap();

        let catalog = load_from_file(file.path()).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec![19, 20]);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_from_file("/nonexistent/catalog.txt").unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
    }
}
