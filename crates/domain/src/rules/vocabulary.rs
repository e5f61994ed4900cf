//! Static lookup tables for the game's fixed vocabularies.
//!
//! The tables are plain `'static` slices. Code that needs them takes a
//! `&Vocabulary` rather than reaching for a global, so tests can hand in a
//! trimmed table.

pub const THANG_TYPES: &[&str] = &[
    "animal",
    "aptitude",
    "assistant",
    "bidness",
    "connections",
    "credentials",
    "fame",
    "lab",
    "sidekick",
    "weapon",
    "professional",
    "instrument",
    "sweetride",
    "wealth",
];

pub const VEHICLE_TYPES: &[&str] = &[
    "compact",
    "sedan",
    "sports",
    "muscle",
    "luxury",
    "truck",
    "offroad",
    "race",
    "bigrig",
    "roadbike",
    "dirtbike",
    "powerboat",
    "swampboat",
];

pub const VEHICLE_TRAITS: &[&str] = &[
    "amphibious",
    "cramped",
    "fragile",
    "guzzler",
    "huge",
    "inconspicuous",
    "loud",
    "mobile",
    "offroad",
    "quick",
    "sluggish",
    "sturdy",
    "unlicensed",
    "unreliable",
    "valuable",
];

pub const WEAPON_TRAITS: &[&str] = &[
    "area",
    "armor-piercing",
    "autofire",
    "concealed",
    "clumsy",
    "dangerous",
    "fire",
    "fireproof",
    "finite",
    "fragile",
    "forceful",
    "heavy",
    "infinite",
    "loud",
    "messy",
    "precise",
    "reload",
    "stun",
    "two-handed",
    "unique",
    "valuable",
];

pub const WEAPON_RANGES: &[&str] = &["close", "near", "far"];

/// The vocabularies bundled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub thang_types: &'static [&'static str],
    pub vehicle_types: &'static [&'static str],
    pub vehicle_traits: &'static [&'static str],
    pub weapon_traits: &'static [&'static str],
    pub weapon_ranges: &'static [&'static str],
}

impl Vocabulary {
    /// The tables shipped with the game.
    pub const fn standard() -> Self {
        Self {
            thang_types: THANG_TYPES,
            vehicle_types: VEHICLE_TYPES,
            vehicle_traits: VEHICLE_TRAITS,
            weapon_traits: WEAPON_TRAITS,
            weapon_ranges: WEAPON_RANGES,
        }
    }

    pub fn is_thang_type(&self, key: &str) -> bool {
        self.thang_types.contains(&key)
    }

    pub fn is_vehicle_type(&self, key: &str) -> bool {
        self.vehicle_types.contains(&key)
    }

    pub fn is_vehicle_trait(&self, key: &str) -> bool {
        self.vehicle_traits.contains(&key)
    }

    pub fn is_weapon_trait(&self, key: &str) -> bool {
        self.weapon_traits.contains(&key)
    }

    pub fn is_weapon_range(&self, key: &str) -> bool {
        self.weapon_ranges.contains(&key)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_lookups() {
        let vocab = Vocabulary::standard();
        assert!(vocab.is_thang_type("sweetride"));
        assert!(vocab.is_vehicle_type("bigrig"));
        assert!(vocab.is_vehicle_trait("guzzler"));
        assert!(vocab.is_weapon_trait("armor-piercing"));
        assert!(!vocab.is_weapon_trait("guzzler"));
        assert!(vocab.is_weapon_range("near"));
    }

    #[test]
    fn tables_have_no_duplicates() {
        for table in [
            THANG_TYPES,
            VEHICLE_TYPES,
            VEHICLE_TRAITS,
            WEAPON_TRAITS,
            WEAPON_RANGES,
        ] {
            let mut sorted = table.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), table.len());
        }
    }
}
