use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// AI strength. Selects the maximum search depth and whether ties between
/// equally good moves are broken at random.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Deepest iteration the search will attempt, in plies.
    pub fn max_depth(self) -> u32 {
        match self {
            Difficulty::Easy => 2,
            Difficulty::Medium => 3,
            Difficulty::Hard => 5,
        }
    }

    /// Only the lowest level picks randomly among near-equal moves; the
    /// others stay reproducible.
    pub fn randomizes_ties(self) -> bool {
        matches!(self, Difficulty::Easy)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_depth_grows_with_difficulty() {
        assert!(Difficulty::Easy.max_depth() < Difficulty::Medium.max_depth());
        assert!(Difficulty::Medium.max_depth() < Difficulty::Hard.max_depth());
    }

    #[test]
    fn test_parse_and_display() {
        for level in Difficulty::ALL {
            assert_eq!(level.to_string().parse::<Difficulty>(), Ok(level));
        }
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert!("grandmaster".parse::<Difficulty>().is_err());
        assert_eq!(
            serde_json::to_string(&Difficulty::Easy).unwrap(),
            "\"easy\""
        );
    }
}
