//! Launch script property derivation
//!
//! A service bundle embeds a shell launch script whose `${key}`
//! placeholders are filled from a property set. This module builds that
//! set: explicit user properties always win, and derived defaults fall
//! back through an ordered candidate list, skipping absent or empty
//! values.
//!
//! Property keys iterate in lexicographic order no matter the insertion
//! order, so identical logical input always serializes identically and
//! build-cache fingerprints stay stable.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

// Literal pattern, cannot fail to compile
#[allow(clippy::unwrap_used)]
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Configuration of the launch script embedded in a service bundle
///
/// Holds the property set applied to the script template and, optionally,
/// a custom script file. When `script` is `None` the default launch
/// script is used.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LaunchScript {
    /// Sorted so serialization order is deterministic for identical input
    properties: BTreeMap<String, String>,
    /// Custom script file; `None` means the default embedded script
    #[serde(skip_serializing_if = "Option::is_none")]
    script: Option<PathBuf>,
}

impl LaunchScript {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration with defaults derived from artifact metadata
    ///
    /// Derives the three init-info properties a generated script needs:
    ///
    /// - `initInfoProvides` - the artifact base name
    /// - `initInfoShortDescription` - the description collapsed to one
    ///   line, falling back to the base name
    /// - `initInfoDescription` - the description with line feeds prefixed
    ///   for a shell comment block, falling back to the base name
    ///
    /// Call [`properties`](Self::properties) with any explicit user values
    /// *before* relying on further [`put_if_missing`](Self::put_if_missing)
    /// derivation, so derivation never overwrites user intent.
    pub fn for_artifact(base_name: &str, description: Option<&str>) -> Self {
        let mut config = Self::new();
        config.put_if_missing("initInfoProvides", &[Some(base_name)]);
        config.put_if_missing(
            "initInfoShortDescription",
            &[remove_line_breaks(description).as_deref(), Some(base_name)],
        );
        config.put_if_missing(
            "initInfoDescription",
            &[augment_line_breaks(description).as_deref(), Some(base_name)],
        );
        config
    }

    /// The properties applied to the launch script
    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Insert explicit user properties, overwriting existing entries
    ///
    /// User values always win: entries set here are never replaced by
    /// later [`put_if_missing`](Self::put_if_missing) derivation.
    pub fn apply_user_overrides<K, V>(&mut self, explicit: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in explicit {
            self.properties.insert(key.into(), value.into());
        }
    }

    /// Store the first usable candidate unless the key is already set
    ///
    /// A candidate is usable when it is `Some` and non-empty; emptiness is
    /// an exact length check, no trimming. When no candidate qualifies the
    /// key stays absent - an empty value is never stored.
    pub fn put_if_missing(&mut self, key: &str, candidates: &[Option<&str>]) {
        if self.properties.contains_key(key) {
            return;
        }
        for candidate in candidates {
            if let Some(value) = candidate {
                if !value.is_empty() {
                    self.properties.insert(key.to_string(), value.to_string());
                    return;
                }
            }
        }
    }

    /// The custom script file, when one is configured
    pub fn script(&self) -> Option<&PathBuf> {
        self.script.as_ref()
    }

    /// Set a custom script file to embed instead of the default
    pub fn set_script(&mut self, script: Option<PathBuf>) {
        self.script = script;
    }
}

/// Collapse text to a single line
///
/// Every maximal run of whitespace (spaces, tabs, line feeds, ...) becomes
/// one space. `None` passes through.
pub fn remove_line_breaks(text: Option<&str>) -> Option<String> {
    text.map(|t| WHITESPACE.replace_all(t, " ").into_owned())
}

/// Re-prefix line feeds for embedding inside a shell comment block
///
/// Every `\n` becomes `"\n#  "` so continuation lines stay commented.
/// `None` passes through.
pub fn augment_line_breaks(text: Option<&str>) -> Option<String> {
    text.map(|t| t.replace('\n', "\n#  "))
}
