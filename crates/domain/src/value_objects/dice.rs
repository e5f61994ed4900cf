//! Dice pools and formulas
//!
//! Every roll is a pool of d6s, either 2d6 or 3d6 keeping two of them.
//! Formulas render the way a table would write them: "2d6+1", "3d6kl2-1",
//! "3d6kh2+3".
//!
//! Item formulas authored by hand ("1d6+1", "d10", "3d6kh2") go through
//! [`DiceFormula::parse`].
//!
//! Dice are never rolled here directly. Callers inject a `FnMut(min, max)`
//! source so the domain stays free of RNG state and tests stay deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Faces on every die in the game.
pub const D6: i32 = 6;

/// Which dice of a pool count toward the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "rule", content = "count")]
pub enum KeepRule {
    /// Every die counts
    All,
    /// Keep the N lowest dice
    Lowest(u8),
    /// Keep the N highest dice
    Highest(u8),
}

/// A pool like "2d6" or "3d6kh2"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DicePool {
    /// Number of dice to roll
    pub dice_count: u8,
    /// Size of each die
    pub die_size: u8,
    /// Which dice are kept
    pub keep: KeepRule,
}

impl DicePool {
    /// Plain 2d6
    pub fn standard() -> Self {
        Self {
            dice_count: 2,
            die_size: D6 as u8,
            keep: KeepRule::All,
        }
    }

    /// 3d6, keep the lowest two
    pub fn keep_lowest_two() -> Self {
        Self {
            dice_count: 3,
            die_size: D6 as u8,
            keep: KeepRule::Lowest(2),
        }
    }

    /// 3d6, keep the highest two
    pub fn keep_highest_two() -> Self {
        Self {
            dice_count: 3,
            die_size: D6 as u8,
            keep: KeepRule::Highest(2),
        }
    }

    /// Number of dice that count toward the total.
    pub fn kept_count(&self) -> u8 {
        match self.keep {
            KeepRule::All => self.dice_count,
            KeepRule::Lowest(n) | KeepRule::Highest(n) => n.min(self.dice_count),
        }
    }

    /// Highest total the kept dice can show.
    pub fn max_total(&self) -> i32 {
        i32::from(self.kept_count()) * i32::from(self.die_size)
    }

    /// Roll the pool using the injected source.
    ///
    /// `roll_fn(min, max)` must return an integer in `min..=max`. Kept dice
    /// stay in the order they were rolled; when dice tie, the later one is
    /// dropped.
    pub fn roll<F>(&self, mut roll_fn: F) -> PoolRoll
    where
        F: FnMut(i32, i32) -> i32,
    {
        let rolled: Vec<i32> = (0..self.dice_count)
            .map(|_| roll_fn(1, self.die_size as i32))
            .collect();

        let keep_count = match self.keep {
            KeepRule::All => rolled.len(),
            KeepRule::Lowest(n) | KeepRule::Highest(n) => (n as usize).min(rolled.len()),
        };

        // Rank indices best-first for the keep rule; the tail gets dropped.
        let mut ranked: Vec<usize> = (0..rolled.len()).collect();
        match self.keep {
            KeepRule::All => {}
            KeepRule::Lowest(_) => ranked.sort_by_key(|&i| rolled[i]),
            KeepRule::Highest(_) => ranked.sort_by_key(|&i| std::cmp::Reverse(rolled[i])),
        }
        let mut keep_mask = vec![false; rolled.len()];
        for &i in ranked.iter().take(keep_count) {
            keep_mask[i] = true;
        }

        let mut kept = Vec::with_capacity(keep_count);
        let mut dropped = Vec::new();
        for (die, keep) in rolled.iter().zip(keep_mask) {
            if keep {
                kept.push(*die);
            } else {
                dropped.push(*die);
            }
        }

        PoolRoll {
            rolled,
            kept,
            dropped,
        }
    }

    /// Format as a display string (e.g., "2d6", "3d6kl2")
    pub fn display(&self) -> String {
        match self.keep {
            KeepRule::All => format!("{}d{}", self.dice_count, self.die_size),
            KeepRule::Lowest(n) => format!("{}d{}kl{}", self.dice_count, self.die_size, n),
            KeepRule::Highest(n) => format!("{}d{}kh{}", self.dice_count, self.die_size, n),
        }
    }
}

impl fmt::Display for DicePool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Raw result of rolling a pool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolRoll {
    /// Every die, in roll order
    pub rolled: Vec<i32>,
    /// Dice that count toward the total
    pub kept: Vec<i32>,
    /// Dice discarded by the keep rule
    pub dropped: Vec<i32>,
}

impl PoolRoll {
    pub fn kept_total(&self) -> i32 {
        self.kept.iter().sum()
    }
}

/// A pool plus its flat modifier, e.g. "3d6kh2+2"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiceFormula {
    pub pool: DicePool,
    /// Modifier to add/subtract after rolling
    pub modifier: i32,
}

impl DiceFormula {
    pub fn new(pool: DicePool, modifier: i32) -> Self {
        Self { pool, modifier }
    }

    /// Parse a formula string like "2d6+1", "d10", "3d6kh2-1".
    ///
    /// Whitespace is ignored, so "1d6 + 2" reads the same as "1d6+2".
    /// Anything beyond a single pool and a flat modifier is rejected.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let compact: String = input
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();
        if compact.is_empty() {
            return Err(DomainError::parse("Empty dice formula"));
        }

        let d_pos = compact.find('d').ok_or_else(|| {
            DomainError::parse(format!("Missing 'd' separator in '{}'", compact))
        })?;

        let count_str = &compact[..d_pos];
        let dice_count: u8 = if count_str.is_empty() {
            1
        } else {
            count_str
                .parse()
                .map_err(|_| DomainError::parse(format!("Invalid dice count: '{}'", count_str)))?
        };
        if dice_count == 0 {
            return Err(DomainError::parse("Dice count must be at least 1"));
        }

        let rest = &compact[d_pos + 1..];
        let size_end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let size_str = &rest[..size_end];
        let die_size: u8 = size_str
            .parse()
            .map_err(|_| DomainError::parse(format!("Invalid die size: '{}'", size_str)))?;
        if die_size < 2 {
            return Err(DomainError::parse(format!(
                "Die size must be at least 2, got {}",
                die_size
            )));
        }

        let mut rest = &rest[size_end..];
        let keep_lowest = rest.starts_with("kl");
        let keep = if keep_lowest || rest.starts_with("kh") {
            let after = &rest[2..];
            let n_end = after
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after.len());
            let n: u8 = after[..n_end]
                .parse()
                .map_err(|_| DomainError::parse(format!("Invalid keep count in '{}'", compact)))?;
            if n == 0 || n > dice_count {
                return Err(DomainError::parse(format!(
                    "Cannot keep {} of {} dice",
                    n, dice_count
                )));
            }
            rest = &after[n_end..];
            if keep_lowest {
                KeepRule::Lowest(n)
            } else {
                KeepRule::Highest(n)
            }
        } else {
            KeepRule::All
        };

        let modifier = match rest.chars().next() {
            None => 0,
            Some('+') | Some('-') => rest
                .parse::<i32>()
                .map_err(|_| DomainError::parse(format!("Invalid modifier: '{}'", rest)))?,
            Some(_) => {
                return Err(DomainError::parse(format!(
                    "Unexpected '{}' in '{}'",
                    rest, compact
                )))
            }
        };

        Ok(Self::new(
            DicePool {
                dice_count,
                die_size,
                keep,
            },
            modifier,
        ))
    }

    /// Roll the pool and add the modifier.
    pub fn roll<F>(&self, roll_fn: F) -> FormulaRoll
    where
        F: FnMut(i32, i32) -> i32,
    {
        let dice = self.pool.roll(roll_fn);
        let total = dice.kept_total().saturating_add(self.modifier);
        FormulaRoll {
            formula: *self,
            dice,
            total,
        }
    }

    /// Get the minimum possible total
    pub fn min_roll(&self) -> i32 {
        i32::from(self.pool.kept_count()).saturating_add(self.modifier)
    }

    /// Get the maximum possible total
    pub fn max_roll(&self) -> i32 {
        self.pool.max_total().saturating_add(self.modifier)
    }

    /// Format as a display string (e.g., "2d6+2", "3d6kl2-1")
    pub fn display(&self) -> String {
        if self.modifier == 0 {
            self.pool.display()
        } else if self.modifier > 0 {
            format!("{}+{}", self.pool.display(), self.modifier)
        } else {
            format!("{}{}", self.pool.display(), self.modifier)
        }
    }
}

impl fmt::Display for DiceFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl FromStr for DiceFormula {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Result of rolling a [`DiceFormula`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormulaRoll {
    pub formula: DiceFormula,
    pub dice: PoolRoll,
    pub total: i32,
}

impl FormulaRoll {
    /// e.g. `1d6+1: [4] + 1 = 5`
    pub fn breakdown(&self) -> String {
        let dice = self
            .dice
            .kept
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        match self.formula.modifier {
            0 => format!("{}: [{}] = {}", self.formula, dice, self.total),
            m if m < 0 => format!(
                "{}: [{}] - {} = {}",
                self.formula,
                dice,
                m.unsigned_abs(),
                self.total
            ),
            m => format!("{}: [{}] + {} = {}", self.formula, dice, m, self.total),
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    /// Deterministic die source that replays the given faces in order.
    pub fn sequence(faces: &[i32]) -> impl FnMut(i32, i32) -> i32 + '_ {
        let mut iter = faces.iter().copied();
        move |min, max| {
            let face = iter.next().expect("test ran out of dice");
            assert!((min..=max).contains(&face), "face {face} outside {min}..={max}");
            face
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::sequence;
    use super::*;

    #[test]
    fn test_standard_keeps_everything() {
        let roll = DicePool::standard().roll(sequence(&[3, 5]));
        assert_eq!(roll.rolled, vec![3, 5]);
        assert_eq!(roll.kept, vec![3, 5]);
        assert!(roll.dropped.is_empty());
        assert_eq!(roll.kept_total(), 8);
    }

    #[test]
    fn test_keep_lowest_drops_highest() {
        let roll = DicePool::keep_lowest_two().roll(sequence(&[6, 2, 4]));
        assert_eq!(roll.kept, vec![2, 4]);
        assert_eq!(roll.dropped, vec![6]);
    }

    #[test]
    fn test_keep_highest_drops_lowest() {
        let roll = DicePool::keep_highest_two().roll(sequence(&[6, 2, 4]));
        assert_eq!(roll.kept, vec![6, 4]);
        assert_eq!(roll.dropped, vec![2]);
    }

    #[test]
    fn test_ties_drop_one_die_only() {
        let roll = DicePool::keep_lowest_two().roll(sequence(&[5, 5, 5]));
        assert_eq!(roll.kept, vec![5, 5]);
        assert_eq!(roll.dropped, vec![5]);

        let roll = DicePool::keep_highest_two().roll(sequence(&[1, 3, 1]));
        assert_eq!(roll.kept, vec![1, 3]);
        assert_eq!(roll.dropped, vec![1]);
    }

    #[test]
    fn test_roll_requests_d6_faces() {
        let mut calls = Vec::new();
        DicePool::keep_highest_two().roll(|min, max| {
            calls.push((min, max));
            1
        });
        assert_eq!(calls, vec![(1, 6), (1, 6), (1, 6)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(DicePool::standard().display(), "2d6");
        assert_eq!(DicePool::keep_lowest_two().display(), "3d6kl2");
        assert_eq!(DicePool::keep_highest_two().display(), "3d6kh2");
        assert_eq!(DiceFormula::new(DicePool::standard(), 2).display(), "2d6+2");
        assert_eq!(
            DiceFormula::new(DicePool::keep_lowest_two(), -1).display(),
            "3d6kl2-1"
        );
        assert_eq!(DiceFormula::new(DicePool::standard(), 0).to_string(), "2d6");
    }

    #[test]
    fn test_formula_range() {
        let formula = DiceFormula::new(DicePool::keep_highest_two(), 1);
        assert_eq!(formula.min_roll(), 3);
        assert_eq!(formula.max_roll(), 13);
        assert_eq!(DicePool::keep_highest_two().max_total(), 12);
    }

    #[test]
    fn test_formula_range_saturates() {
        let formula = DiceFormula::new(DicePool::standard(), i32::MAX);
        assert_eq!(formula.max_roll(), i32::MAX);
    }

    #[test]
    fn test_parse_simple_formulas() {
        let formula = DiceFormula::parse("1d6+1").unwrap();
        assert_eq!(formula.pool.dice_count, 1);
        assert_eq!(formula.pool.die_size, 6);
        assert_eq!(formula.pool.keep, KeepRule::All);
        assert_eq!(formula.modifier, 1);

        let shorthand = DiceFormula::parse(" D10 - 2 ").unwrap();
        assert_eq!(shorthand.pool.dice_count, 1);
        assert_eq!(shorthand.pool.die_size, 10);
        assert_eq!(shorthand.modifier, -2);

        assert_eq!("2d6".parse::<DiceFormula>().unwrap().to_string(), "2d6");
    }

    #[test]
    fn test_parse_keep_rules_matches_display() {
        for text in ["3d6kl2", "3d6kh2+3", "3d6kl2-1"] {
            assert_eq!(DiceFormula::parse(text).unwrap().display(), text);
        }
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["", "abc", "0d6", "2d1", "2d", "2d6+", "2d6*2", "2d6kh3", "2d6+1d4"] {
            assert!(
                matches!(DiceFormula::parse(text), Err(DomainError::Parse(_))),
                "{text} should not parse"
            );
        }
    }

    #[test]
    fn test_formula_roll_adds_modifier() {
        let formula = DiceFormula::parse("2d4-1").unwrap();
        let mut calls = Vec::new();
        let roll = formula.roll(|min, max| {
            calls.push((min, max));
            3
        });
        assert_eq!(calls, vec![(1, 4), (1, 4)]);
        assert_eq!(roll.total, 5);
        assert_eq!(roll.breakdown(), "2d4-1: [3, 3] - 1 = 5");
    }
}
