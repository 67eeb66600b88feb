//! Bundled country catalog.
//!
//! The catalog ships as `data/countries.csv` (`code,name`, ISO-3166 alpha-3)
//! and is seeded into the store at startup.

use entities::Country;

const COUNTRIES_CSV: &str = include_str!("../data/countries.csv");

/// Returns every country of the bundled catalog, in file order.
pub fn countries() -> Vec<Country> {
    parse(COUNTRIES_CSV)
}

/// Parses `code,name` lines, skipping the header and blank lines.
///
/// Names may be wrapped in double quotes when they contain commas.
fn parse(csv: &str) -> Vec<Country> {
    csv.lines()
        .skip(1)
        .filter_map(|line| {
            let (code, name) = line.trim().split_once(',')?;
            let name = name.trim().trim_matches('"');
            if code.is_empty() || name.is_empty() {
                return None;
            }
            Some(Country::new(code.trim(), name))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_bundled_catalog_is_well_formed() {
        let countries = countries();
        assert!(countries.len() > 240);

        let codes: HashSet<_> = countries.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes.len(), countries.len(), "codes must be unique");
        assert!(countries.iter().all(|c| c.code.len() == 3));
    }

    #[test]
    fn test_quoted_names_keep_commas() {
        let countries = parse("code,name\nBES,\"Bonaire, Sint Eustatius and Saba\"\n\n");
        assert_eq!(
            countries,
            vec![Country::new("BES", "Bonaire, Sint Eustatius and Saba")]
        );
    }

    #[test]
    fn test_catalog_contains_france() {
        assert!(countries().contains(&Country::new("FRA", "France")));
    }
}
