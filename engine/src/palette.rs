use crate::settings::Color;
use crate::shuffle::shuffle_thread;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

/// Ordered list of colors suggested as a coherent theme.
///
/// Position 0 is the background, position 1 the foreground, everything after
/// that is a candidate accent.
pub type Palette = Vec<Color>;

/// Light or dark theme variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Light,
    Dark,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Light, Mode::Dark];

    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Light => "light",
            Mode::Dark => "dark",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown theme mode '{0}' (expected 'light' or 'dark')")]
pub struct UnknownMode(pub String);

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Mode::Light),
            "dark" => Ok(Mode::Dark),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Per-mode stacks of prefetched palettes.
///
/// Filled in bulk from the theme service and drained one palette at a time.
/// There is no capacity bound and no eviction; an empty stack simply means the
/// caller has to refill it.
#[derive(Debug, Default)]
pub struct PaletteCache {
    light: Mutex<Vec<Palette>>,
    dark: Mutex<Vec<Palette>>,
}

impl PaletteCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn stack(&self, mode: Mode) -> MutexGuard<'_, Vec<Palette>> {
        let stack = match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        };
        // A panic while holding the lock cannot leave a Vec half-pushed
        stack.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Pop the top palette for `mode`, or `None` when the stack is empty.
    pub fn take(&self, mode: Mode) -> Option<Palette> {
        self.stack(mode).pop()
    }

    /// Shuffle `palettes` and push them all onto the stack for `mode`.
    pub fn fill(&self, mode: Mode, mut palettes: Vec<Palette>) {
        shuffle_thread(&mut palettes);
        let mut stack = self.stack(mode);
        stack.extend(palettes);
        log::debug!("Palette cache for {mode} now holds {} entries", stack.len());
    }

    pub fn len(&self, mode: Mode) -> usize {
        self.stack(mode).len()
    }

    pub fn is_empty(&self, mode: Mode) -> bool {
        self.stack(mode).is_empty()
    }

    pub fn clear(&self) {
        for mode in Mode::ALL {
            self.stack(mode).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_none, assert_some};

    fn palette(colors: &[&str]) -> Palette {
        colors.iter().map(|c| Color::from(*c)).collect()
    }

    #[test]
    fn test_take_after_fill_returns_one_entry() {
        let cache = PaletteCache::new();
        let p1 = palette(&["#000", "#fff"]);
        let p2 = palette(&["#111", "#eee"]);

        cache.fill(Mode::Light, vec![p1.clone(), p2.clone()]);
        assert_eq!(cache.len(Mode::Light), 2);

        let taken = assert_some!(cache.take(Mode::Light));
        assert!(taken == p1 || taken == p2);
        assert_eq!(cache.len(Mode::Light), 1);
    }

    #[test]
    fn test_drained_cache_signals_empty() {
        let cache = PaletteCache::new();
        cache.fill(Mode::Dark, vec![palette(&["#000"]), palette(&["#111"])]);

        assert_some!(cache.take(Mode::Dark));
        assert_some!(cache.take(Mode::Dark));
        assert_none!(cache.take(Mode::Dark));
        assert!(cache.is_empty(Mode::Dark));
    }

    #[test]
    fn test_modes_are_independent() {
        let cache = PaletteCache::new();
        cache.fill(Mode::Light, vec![palette(&["#fff"])]);

        assert_none!(cache.take(Mode::Dark));
        assert_eq!(cache.len(Mode::Light), 1);

        cache.clear();
        assert!(cache.is_empty(Mode::Light));
    }

    #[test]
    fn test_fill_appends_to_existing_entries() {
        let cache = PaletteCache::new();
        cache.fill(Mode::Light, vec![palette(&["#1"])]);
        cache.fill(Mode::Light, vec![palette(&["#2"]), palette(&["#3"])]);
        assert_eq!(cache.len(Mode::Light), 3);
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("light".parse(), Ok(Mode::Light));
        assert_eq!(" Dark ".parse(), Ok(Mode::Dark));
        assert!("dim".parse::<Mode>().is_err());
        assert_eq!(Mode::Dark.to_string(), "dark");
    }
}
