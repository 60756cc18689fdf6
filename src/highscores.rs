//! Best score across runs
//!
//! Persisted to LocalStorage as a plain decimal string.

use crate::platform::storage;

/// The best score seen on this device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u64,
}

impl HighScore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "highScore";

    pub fn new(best: u64) -> Self {
        Self { best }
    }

    /// Parse a stored value the lenient way browsers parse integers:
    /// leading whitespace is skipped and trailing junk ignored.
    pub fn parse_stored(raw: &str) -> Option<u64> {
        let trimmed = raw.trim_start();
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        let end = unsigned
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(unsigned.len());
        unsigned[..end].parse().ok()
    }

    /// Offer a finished run's score; returns true if it is a new best
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from storage, falling back to zero
    pub fn load() -> Self {
        match storage::get(Self::STORAGE_KEY) {
            Ok(Some(raw)) => match Self::parse_stored(&raw) {
                Some(best) => {
                    log::info!("Loaded high score {}", best);
                    Self::new(best)
                }
                None => {
                    log::warn!("Ignoring unreadable high score {:?}", raw);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No high score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("High score unavailable: {}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) {
        match storage::set(Self::STORAGE_KEY, &self.best.to_string()) {
            Ok(()) => log::info!("High score saved ({})", self.best),
            Err(e) => log::warn!("Could not save high score: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_stored() {
        assert_eq!(HighScore::parse_stored("42"), Some(42));
        assert_eq!(HighScore::parse_stored("  17abc"), Some(17));
        assert_eq!(HighScore::parse_stored("3.9"), Some(3));
        assert_eq!(HighScore::parse_stored("+8"), Some(8));
        assert_eq!(HighScore::parse_stored(""), None);
        assert_eq!(HighScore::parse_stored("abc"), None);
        assert_eq!(HighScore::parse_stored("-5"), None);
    }

    #[test]
    fn test_record_only_improves() {
        let mut high = HighScore::new(100);
        assert!(!high.record(50));
        assert!(!high.record(100));
        assert!(high.record(150));
        assert_eq!(high.best, 150);
    }

    #[test]
    fn test_load_save() {
        assert_eq!(HighScore::load().best, 0);
        HighScore::new(320).save();
        assert_eq!(HighScore::load().best, 320);

        storage::set("highScore", "garbage").unwrap();
        assert_eq!(HighScore::load().best, 0);
    }

    proptest! {
        #[test]
        fn prop_saved_value_parses_back(best in any::<u64>()) {
            prop_assert_eq!(HighScore::parse_stored(&best.to_string()), Some(best));
        }
    }
}
