//! Shared mutable severity filter
//!
//! The dispatcher, the scoped decorator and every channel hold one of these.
//! All setters validate their input completely before touching the stored set,
//! so a rejected call leaves the previous levels in place.

use super::error::Result;
use super::log_level::{Level, LevelSelector, LevelSet};
use parking_lot::RwLock;

#[derive(Debug)]
pub struct LevelFilter {
    /// `None` means unrestricted: every severity passes
    levels: RwLock<Option<LevelSet>>,
}

impl LevelFilter {
    /// A filter that lets nothing through until configured
    pub fn closed() -> Self {
        Self::with_levels(LevelSet::empty())
    }

    /// A filter with no level set of its own
    pub fn unrestricted() -> Self {
        Self {
            levels: RwLock::new(None),
        }
    }

    pub fn with_levels(levels: LevelSet) -> Self {
        Self {
            levels: RwLock::new(Some(levels)),
        }
    }

    #[inline]
    pub fn allows(&self, level: Level) -> bool {
        match *self.levels.read() {
            Some(set) => set.contains(level),
            None => true,
        }
    }

    /// Whether an explicit level set has been configured
    pub fn is_restricted(&self) -> bool {
        self.levels.read().is_some()
    }

    /// Current set; an unrestricted filter reports every severity
    pub fn snapshot(&self) -> LevelSet {
        self.levels.read().unwrap_or_else(LevelSet::all)
    }

    /// Current configured levels in ascending order; empty when unrestricted
    pub fn levels(&self) -> Vec<Level> {
        self.levels.read().map(|set| set.to_vec()).unwrap_or_default()
    }

    /// Enable `[level, fatal]`, or nothing for `off`
    pub fn set_level(&self, level: &str) -> Result<()> {
        let selector = LevelSelector::parse_level(level)?;
        self.apply(selector);
        Ok(())
    }

    /// Enable exactly the given severities
    pub fn set_levels(&self, levels: &[&str]) -> Result<()> {
        let selector = LevelSelector::parse_levels(levels)?;
        self.apply(selector);
        Ok(())
    }

    pub fn apply(&self, selector: LevelSelector) {
        *self.levels.write() = Some(selector.to_set());
    }

    /// Drop the configured set and let every severity through
    pub fn clear(&self) {
        *self.levels.write() = None;
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_by_default() {
        let filter = LevelFilter::default();
        assert!(filter.is_restricted());
        assert!(Level::ALL.iter().all(|level| !filter.allows(*level)));
        assert!(filter.levels().is_empty());
    }

    #[test]
    fn test_unrestricted_passes_everything() {
        let filter = LevelFilter::unrestricted();
        assert!(!filter.is_restricted());
        assert!(Level::ALL.iter().all(|level| filter.allows(*level)));
        assert_eq!(filter.snapshot(), LevelSet::all());
        assert!(filter.levels().is_empty());
    }

    #[test]
    fn test_set_level_builds_suffix() {
        let filter = LevelFilter::closed();
        filter.set_level("info").unwrap();
        assert_eq!(
            filter.levels(),
            vec![Level::Info, Level::Warn, Level::Error, Level::Fatal]
        );

        filter.set_level("off").unwrap();
        assert!(filter.levels().is_empty());
        assert!(filter.is_restricted());
    }

    #[test]
    fn test_set_levels_exact() {
        let filter = LevelFilter::closed();
        filter.set_levels(&["error", "trace"]).unwrap();
        assert_eq!(filter.levels(), vec![Level::Trace, Level::Error]);
        assert!(!filter.allows(Level::Debug));

        filter.set_levels(&[]).unwrap();
        assert!(filter.levels().is_empty());
    }

    #[test]
    fn test_invalid_input_leaves_state_untouched() {
        let filter = LevelFilter::closed();
        filter.set_level("warn").unwrap();

        assert!(filter.set_level("loud").is_err());
        assert!(filter.set_levels(&["info", "all"]).is_err());

        assert_eq!(filter.levels(), vec![Level::Warn, Level::Error, Level::Fatal]);
    }

    #[test]
    fn test_clear_restores_unrestricted() {
        let filter = LevelFilter::with_levels(LevelSet::empty());
        filter.clear();
        assert!(filter.allows(Level::Trace));
    }
}
