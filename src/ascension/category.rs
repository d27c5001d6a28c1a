use super::{Mode, Path};
use crate::error::ClassifyError;

/// The short code a run is filed under, e.g. `HCNP`, `SCO` or `BM`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(String);

impl Category {
    pub fn new(code: &str) -> Category {
        Category(code.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

fn mode_prefix(mode: Mode) -> &'static str {
    match mode {
        Mode::Casual => "Casual",
        Mode::Hardcore => "HC",
        Mode::Softcore => "SC",
        Mode::BadMoon => "BM",
    }
}

/// Files a (mode, path) pair under its category code.
///
/// A Bad Moon run without a path, and any run on the Bad Moon path, keeps
/// the bare mode prefix. Paths outside the known list are an error so a new
/// path shows up instead of being filed somewhere wrong.
pub fn classify(mode: Mode, path: &Path) -> Result<Category, ClassifyError> {
    let prefix = mode_prefix(mode);
    let suffix = match path {
        Path::None if mode == Mode::BadMoon => "",
        Path::None => "NP",
        Path::Oxygenarian => "O",
        Path::Boozetafarian => "B",
        Path::Teetotaler => "T",
        Path::WayOfTheSurprisingFist => "WSF",
        Path::BeesHateYou => "BHY",
        Path::Trendy => "Trendy",
        Path::AvatarOfBoris => "Boris",
        Path::BadMoon => "",
        Path::Unknown(raw) => return Err(ClassifyError::UnknownPath(raw.clone())),
    };
    Ok(Category(format!("{}{}", prefix, suffix)))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::spreadsheet::ColumnMap;
    use std::collections::BTreeSet;

    const MODES: [Mode; 4] = [Mode::Casual, Mode::Hardcore, Mode::Softcore, Mode::BadMoon];

    #[test]
    fn test_known_domain_never_fails() {
        for mode in MODES.iter() {
            for path in Path::KNOWN.iter() {
                assert!(classify(*mode, path).is_ok(), "{:?} {:?}", mode, path);
            }
        }
    }

    #[test]
    fn test_tracked_pairs_cover_standard_columns() {
        let mut seen = BTreeSet::new();
        for mode in [Mode::Hardcore, Mode::Softcore].iter() {
            for path in Path::KNOWN.iter() {
                if *path == Path::BadMoon {
                    continue;
                }
                seen.insert(classify(*mode, path).unwrap());
            }
        }
        seen.insert(classify(Mode::BadMoon, &Path::None).unwrap());
        seen.insert(classify(Mode::BadMoon, &Path::BadMoon).unwrap());

        let columns = ColumnMap::standard();
        assert_eq!(seen.len(), 17);
        for category in &seen {
            assert!(columns.column_for(category).is_some(), "{}", category);
        }
    }

    #[test]
    fn test_codes() {
        assert_eq!(classify(Mode::Hardcore, &Path::None).unwrap().as_str(), "HCNP");
        assert_eq!(classify(Mode::Softcore, &Path::Oxygenarian).unwrap().as_str(), "SCO");
        assert_eq!(classify(Mode::Hardcore, &Path::BeesHateYou).unwrap().as_str(), "HCBHY");
        assert_eq!(classify(Mode::Softcore, &Path::AvatarOfBoris).unwrap().as_str(), "SCBoris");
        assert_eq!(classify(Mode::BadMoon, &Path::None).unwrap().as_str(), "BM");
        assert_eq!(classify(Mode::BadMoon, &Path::BadMoon).unwrap().as_str(), "BM");
        assert_eq!(classify(Mode::Hardcore, &Path::BadMoon).unwrap().as_str(), "HC");
        assert_eq!(classify(Mode::Casual, &Path::None).unwrap().as_str(), "CasualNP");
    }

    #[test]
    fn test_unknown_path_rejected() {
        for mode in MODES.iter() {
            let err = classify(*mode, &Path::from("SomeUnrecognizedPath")).unwrap_err();
            assert_eq!(
                err,
                ClassifyError::UnknownPath("SomeUnrecognizedPath".to_string())
            );
        }
    }
}
