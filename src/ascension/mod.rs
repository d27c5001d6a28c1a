//! Ascension history records and the personal-best logic built on them.
mod category;
mod personal_best;

pub use category::{classify, Category};
pub use personal_best::{is_better, reduce_bests, DateWindow};

use chrono::NaiveDate;

/// The ruleset a run was played under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Casual,
    Hardcore,
    Softcore,
    BadMoon,
}

/// The restriction path of a run. `Unknown` keeps the raw text so the
/// classifier can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Path {
    None,
    Oxygenarian,
    Boozetafarian,
    Teetotaler,
    WayOfTheSurprisingFist,
    BeesHateYou,
    Trendy,
    AvatarOfBoris,
    BadMoon,
    Unknown(String),
}

impl Path {
    /// Every path the classifier knows about, `Unknown` excluded.
    pub const KNOWN: [Path; 9] = [
        Path::None,
        Path::Oxygenarian,
        Path::Boozetafarian,
        Path::Teetotaler,
        Path::WayOfTheSurprisingFist,
        Path::BeesHateYou,
        Path::Trendy,
        Path::AvatarOfBoris,
        Path::BadMoon,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Path::None => "None",
            Path::Oxygenarian => "Oxygenarian",
            Path::Boozetafarian => "Boozetafarian",
            Path::Teetotaler => "Teetotaler",
            Path::WayOfTheSurprisingFist => "Way of the Surprising Fist",
            Path::BeesHateYou => "Bees Hate You",
            Path::Trendy => "Trendy",
            Path::AvatarOfBoris => "Avatar of Boris",
            Path::BadMoon => "Bad Moon",
            Path::Unknown(s) => s,
        }
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Path {
        let s = s.trim();
        Path::KNOWN
            .iter()
            .find(|p| p.as_str() == s)
            .cloned()
            .unwrap_or_else(|| Path::Unknown(s.to_string()))
    }
}

/// One run from a player's ascension history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub mode: Mode,
    pub path: Path,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub days: u32,
    pub turns: u32,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_path_from_str() {
        for p in Path::KNOWN.iter() {
            assert_eq!(&Path::from(p.as_str()), p);
        }
        assert_eq!(
            Path::from("Zombie Slayer"),
            Path::Unknown("Zombie Slayer".to_string())
        );
    }
}
