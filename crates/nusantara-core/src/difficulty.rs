use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Culture-themed difficulty tiers, easiest to hardest.
///
/// Each tier maps to a fixed number of cells removed from the solved grid;
/// the removal count is the only difficulty proxy the game uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Jawa,
    Bali,
    Betawi,
    Minang,
    Toraja,
    Papua,
}

/// Display data for a tier's culture theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CultureInfo {
    /// Culture name, e.g. "Minangkabau".
    pub name: &'static str,
    /// Short Indonesian tagline shown in the banner.
    pub tagline: &'static str,
    /// Emoji icon for banners and menus.
    pub icon: &'static str,
    /// Indonesian difficulty label (Mudah .. Ekstrem).
    pub level: &'static str,
}

impl Difficulty {
    /// All tiers, easiest first.
    pub fn all() -> [Difficulty; 6] {
        [
            Difficulty::Jawa,
            Difficulty::Bali,
            Difficulty::Betawi,
            Difficulty::Minang,
            Difficulty::Toraja,
            Difficulty::Papua,
        ]
    }

    /// Number of cells removed when carving a puzzle of this tier.
    pub fn removed_cells(self) -> usize {
        match self {
            Difficulty::Jawa => 41,
            Difficulty::Bali => 51,
            Difficulty::Betawi => 61,
            Difficulty::Minang => 65,
            Difficulty::Toraja => 68,
            Difficulty::Papua => 70,
        }
    }

    /// Number of givens the carved puzzle keeps.
    pub fn given_cells(self) -> usize {
        81 - self.removed_cells()
    }

    /// Lowercase key used on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Jawa => "jawa",
            Difficulty::Bali => "bali",
            Difficulty::Betawi => "betawi",
            Difficulty::Minang => "minang",
            Difficulty::Toraja => "toraja",
            Difficulty::Papua => "papua",
        }
    }

    pub fn culture(self) -> CultureInfo {
        match self {
            Difficulty::Jawa => CultureInfo {
                name: "Jawa",
                tagline: "Tanah Kelahiran Batik dan Wayang",
                icon: "\u{1F3DB}\u{FE0F}",
                level: "Mudah",
            },
            Difficulty::Bali => CultureInfo {
                name: "Bali",
                tagline: "Pulau Dewata dengan Seni Tari yang Indah",
                icon: "\u{1F549}\u{FE0F}",
                level: "Sedang",
            },
            Difficulty::Betawi => CultureInfo {
                name: "Betawi",
                tagline: "Ibu Kota dengan Ondel-Ondel dan Kerak Telor",
                icon: "\u{1F3AD}",
                level: "Sulit",
            },
            Difficulty::Minang => CultureInfo {
                name: "Minangkabau",
                tagline: "Negeri Rumah Gadang dan Rendang",
                icon: "\u{1F3D4}\u{FE0F}",
                level: "Ahli",
            },
            Difficulty::Toraja => CultureInfo {
                name: "Toraja",
                tagline: "Tanah dengan Upacara Rambu Solo",
                icon: "\u{1F3E0}",
                level: "Master",
            },
            Difficulty::Papua => CultureInfo {
                name: "Papua",
                tagline: "Surga Keanekaragaman Hayati Indonesia",
                icon: "\u{1F99C}",
                level: "Ekstrem",
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.culture().name)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jawa" => Ok(Difficulty::Jawa),
            "bali" => Ok(Difficulty::Bali),
            "betawi" => Ok(Difficulty::Betawi),
            "minang" | "minangkabau" => Ok(Difficulty::Minang),
            "toraja" => Ok(Difficulty::Toraja),
            "papua" => Ok(Difficulty::Papua),
            other => Err(format!(
                "unknown difficulty '{}' (expected one of: jawa, bali, betawi, minang, toraja, papua)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removal_counts_match_table() {
        let expected = [41, 51, 61, 65, 68, 70];
        for (difficulty, count) in Difficulty::all().into_iter().zip(expected) {
            assert_eq!(difficulty.removed_cells(), count);
            assert_eq!(difficulty.given_cells(), 81 - count);
        }
    }

    #[test]
    fn parses_lowercase_keys() {
        for difficulty in Difficulty::all() {
            assert_eq!(difficulty.key().parse::<Difficulty>(), Ok(difficulty));
        }
        assert_eq!("Minangkabau".parse::<Difficulty>(), Ok(Difficulty::Minang));
        assert!("sunda".parse::<Difficulty>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_keys() {
        let json = serde_json::to_string(&Difficulty::Betawi).unwrap();
        assert_eq!(json, "\"betawi\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Betawi);
    }
}
