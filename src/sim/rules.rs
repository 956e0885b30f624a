//! Rule sets: neighbor sum + current state -> next state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RuleError;

/// Bitmask with bit `i` set for each `i` in `sums`.
const fn mask(sums: &[u8]) -> u16 {
    let mut bits = 0u16;
    let mut i = 0;
    while i < sums.len() {
        bits |= 1 << sums[i];
        i += 1;
    }
    bits
}

/// A cellular-automaton rule variant.
///
/// Each variant is a pair of bitmasks over neighbor sums `0..=8`: bit `i` of
/// the birth mask means a dead cell with `i` live neighbors becomes alive, bit
/// `i` of the survive mask means a live cell with `i` live neighbors stays
/// alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RuleSet {
    /// B3/S23.
    #[default]
    Conway,
    /// B36/S23.
    HighLife,
    /// B3678/S345678. A live cell dies only below three neighbors.
    DayAndNight,
}

impl RuleSet {
    /// All supported variants.
    pub const ALL: [Self; 3] = [Self::Conway, Self::HighLife, Self::DayAndNight];

    const fn masks(self) -> (u16, u16) {
        match self {
            Self::Conway => (mask(&[3]), mask(&[2, 3])),
            Self::HighLife => (mask(&[3, 6]), mask(&[2, 3])),
            Self::DayAndNight => (mask(&[3, 6, 7, 8]), mask(&[3, 4, 5, 6, 7, 8])),
        }
    }

    /// Next alive state for a cell given its current state and neighbor sum.
    ///
    /// Sums above 8 cannot occur on a Moore neighborhood and yield `false`.
    #[must_use]
    #[inline]
    pub const fn next_state(self, alive: bool, neighbor_sum: u8) -> bool {
        if neighbor_sum > 8 {
            return false;
        }
        let (birth, survive) = self.masks();
        let table = if alive { survive } else { birth };
        table & (1 << neighbor_sum) != 0
    }

    /// Neighbor sums on which a dead cell is born.
    #[must_use]
    pub fn birth_sums(self) -> Vec<u8> {
        let (birth, _) = self.masks();
        (0..=8).filter(|&n| birth & (1 << n) != 0).collect()
    }

    /// Neighbor sums on which a live cell survives.
    #[must_use]
    pub fn survive_sums(self) -> Vec<u8> {
        let (_, survive) = self.masks();
        (0..=8).filter(|&n| survive & (1 << n) != 0).collect()
    }

    /// Canonical lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Conway => "conway",
            Self::HighLife => "highlife",
            Self::DayAndNight => "daynight",
        }
    }

    /// Rule string in B/S notation, e.g. `B3/S23`.
    #[must_use]
    pub fn notation(self) -> String {
        let digits = |sums: Vec<u8>| sums.iter().map(u8::to_string).collect::<String>();
        format!(
            "B{}/S{}",
            digits(self.birth_sums()),
            digits(self.survive_sums())
        )
    }
}

impl fmt::Display for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RuleSet {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "conway" | "life" | "b3/s23" => Ok(Self::Conway),
            "highlife" | "high-life" | "b36/s23" => Ok(Self::HighLife),
            "daynight" | "day-and-night" | "dayandnight" | "b3678/s345678" => {
                Ok(Self::DayAndNight)
            }
            _ => Err(RuleError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for RuleSet {
    type Error = RuleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RuleSet> for String {
    fn from(rule: RuleSet) -> Self {
        rule.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conway_table() {
        let rule = RuleSet::Conway;
        for n in 0..=8 {
            assert_eq!(rule.next_state(false, n), n == 3, "birth at {n}");
            assert_eq!(rule.next_state(true, n), n == 2 || n == 3, "survive at {n}");
        }
    }

    #[test]
    fn test_highlife_table() {
        let rule = RuleSet::HighLife;
        assert_eq!(rule.birth_sums(), vec![3, 6]);
        assert_eq!(rule.survive_sums(), vec![2, 3]);
        assert!(rule.next_state(false, 6));
        assert!(!rule.next_state(true, 6));
    }

    #[test]
    fn test_day_and_night_table() {
        let rule = RuleSet::DayAndNight;
        assert_eq!(rule.birth_sums(), vec![3, 6, 7, 8]);
        for n in 0..=8 {
            assert_eq!(rule.next_state(true, n), n >= 3, "survive at {n}");
        }
        assert!(!rule.next_state(false, 4));
        assert!(!rule.next_state(false, 5));
    }

    #[test]
    fn test_no_birth_from_nothing() {
        for rule in RuleSet::ALL {
            assert!(!rule.next_state(false, 0));
        }
    }

    #[test]
    fn test_out_of_range_sum() {
        for rule in RuleSet::ALL {
            assert!(!rule.next_state(true, 9));
            assert!(!rule.next_state(false, 255));
        }
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Conway".parse::<RuleSet>().unwrap(), RuleSet::Conway);
        assert_eq!("B36/S23".parse::<RuleSet>().unwrap(), RuleSet::HighLife);
        assert_eq!(" day-and-night ".parse::<RuleSet>().unwrap(), RuleSet::DayAndNight);
        assert_eq!(
            "seeds".parse::<RuleSet>(),
            Err(RuleError::Unknown("seeds".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrip() {
        for rule in RuleSet::ALL {
            assert_eq!(rule.to_string().parse::<RuleSet>().unwrap(), rule);
        }
        assert_eq!(RuleSet::Conway.notation(), "B3/S23");
        assert_eq!(RuleSet::DayAndNight.notation(), "B3678/S345678");
    }

    #[test]
    fn test_serde_rejects_unknown() {
        let rule: RuleSet = serde_json::from_str("\"highlife\"").unwrap();
        assert_eq!(rule, RuleSet::HighLife);
        assert!(serde_json::from_str::<RuleSet>("\"wireworld\"").is_err());
        assert_eq!(serde_json::to_string(&RuleSet::DayAndNight).unwrap(), "\"daynight\"");
    }
}
