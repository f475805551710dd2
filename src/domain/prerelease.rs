//! Pre-release suffix handling
//!
//! Derived tags carry a single pre-release label, `pre`, followed by a counter:
//! `v2.0.0-pre.0`, `v2.0.0-pre.1`, ...

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// The only pre-release label this tool writes or recognises.
pub const PRERELEASE_LABEL: &str = "pre";

fn suffix_regex() -> &'static Regex {
    static SUFFIX: OnceLock<Regex> = OnceLock::new();
    SUFFIX.get_or_init(|| {
        Regex::new(r"^(?P<main>.*)-pre\.(?P<counter>\d+)$").expect("pre-release pattern is valid")
    })
}

/// Pre-release marker with its counter (`pre.<counter>`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreRelease {
    pub counter: u64,
}

impl PreRelease {
    /// Start a new pre-release series at counter 0
    pub fn start() -> Self {
        PreRelease { counter: 0 }
    }

    /// Split `main-pre.<n>` into its main version and pre-release part.
    ///
    /// Only the exact `-pre.<integer>` form is recognised; anything else is
    /// returned untouched as the main version with no pre-release.
    ///
    /// # Examples
    /// ```ignore
    /// assert_eq!(PreRelease::split("1.0.0-pre.3"), ("1.0.0", Some(PreRelease { counter: 3 })));
    /// assert_eq!(PreRelease::split("1.0.0"), ("1.0.0", None));
    /// ```
    pub fn split(version: &str) -> (&str, Option<PreRelease>) {
        let Some(captures) = suffix_regex().captures(version) else {
            return (version, None);
        };

        let main = captures.name("main").map_or(version, |m| m.as_str());
        // Counters too large for u64 still mark a pre-release, restarting at zero.
        let counter = captures
            .name("counter")
            .and_then(|m| m.as_str().parse::<u64>().ok())
            .unwrap_or(0);

        (main, Some(PreRelease { counter }))
    }

    /// Next pre-release in the same series
    pub fn increment(&self) -> Self {
        PreRelease {
            counter: self.counter.saturating_add(1),
        }
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", PRERELEASE_LABEL, self.counter)
    }
}
