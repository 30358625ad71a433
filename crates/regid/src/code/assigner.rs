use std::collections::HashSet;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::code::{OverrideTable, normalize_words};

/// Identifiers already handed out during the current run.
///
/// Owned by the caller. [`CodeAssigner::assign`] only reads it; the caller
/// inserts each returned identifier before the next call.
pub type ClaimedSet = HashSet<String>;

/// Maps native region names to short, unique, human-readable codes.
///
/// Candidates are tried in order and the first one not in the claimed set
/// wins:
///
/// 1. the override for the exact name, if any
/// 2. the initials of every normalized word (`Hà Nội` → `HN`)
/// 3. the initials of all but the last word followed by the first 2, 3, ...
///    characters of the last word (`Hà Nam` → `HNA`, `HNAM`)
/// 4. the initials from step 2 followed by 1, 2, 3, ...
///
/// Step 4 is unbounded, so assignment always terminates with a non-empty
/// code, even for names that normalize to nothing.
///
/// The assigner holds no mutable state: identical names and claimed sets
/// always produce identical codes.
#[derive(Clone, Debug, Default)]
pub struct CodeAssigner {
    overrides: OverrideTable,
}

impl CodeAssigner {
    /// Creates an assigner that consults `overrides` before deriving codes.
    pub fn new(overrides: OverrideTable) -> Self {
        Self { overrides }
    }

    pub fn overrides(&self) -> &OverrideTable {
        &self.overrides
    }

    /// Returns a code for `name` that is not in `claimed`.
    ///
    /// # Example
    /// ```
    /// use regid::{ClaimedSet, CodeAssigner, OverrideTable};
    ///
    /// let assigner = CodeAssigner::new(OverrideTable::empty());
    /// let mut claimed = ClaimedSet::new();
    ///
    /// let code = assigner.assign("Bắc Ninh", &claimed);
    /// assert_eq!(code, "BN");
    /// claimed.insert(code);
    ///
    /// assert_eq!(assigner.assign("Bình Ninh", &claimed), "BNI");
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self, claimed), ret))]
    pub fn assign(&self, name: &str, claimed: &ClaimedSet) -> String {
        if let Some(code) = self.overrides.get(name) {
            if !claimed.contains(code) {
                return code.to_owned();
            }
        }

        let words = normalize_words(name);
        let initials = initials(&words);
        if !initials.is_empty() && !claimed.contains(&initials) {
            return initials;
        }

        if let Some(code) = expand_last_word(&words, claimed) {
            return code;
        }

        let mut suffix: u64 = 1;
        loop {
            let code = format!("{initials}{suffix}");
            if !claimed.contains(&code) {
                return code;
            }
            suffix += 1;
        }
    }
}

fn initials(words: &[String]) -> String {
    words.iter().filter_map(|word| word.chars().next()).collect()
}

fn expand_last_word(words: &[String], claimed: &ClaimedSet) -> Option<String> {
    let (last, head) = words.split_last()?;
    let head = initials(head);
    let len = last.chars().count();

    (2..=len)
        .map(|take| {
            let mut code = head.clone();
            code.extend(last.chars().take(take));
            code
        })
        .find(|code| !claimed.contains(code))
}
