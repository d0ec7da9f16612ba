//! Save-trigger rules deciding which files are formatted on save.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{PresaveError, Result};

/// Key of the legacy on-save setting.
pub const ON_SAVE_KEY: &str = "on_save";

const LEGACY_INCLUDING_KEY: &str = "including";
const LEGACY_EXCLUDING_KEY: &str = "excluding";

/// Per-language include/exclude rule.
///
/// Fragments are matched by plain, case-sensitive substring containment
/// against the full file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRule {
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

fn default_enabled() -> bool {
    true
}

impl LanguageRule {
    /// Creates an enabled rule with no fragments.
    pub fn new() -> Self {
        Self {
            enabled: true,
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Sets whether the rule is enabled.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the include fragments.
    pub fn with_include<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the exclude fragments.
    pub fn with_exclude<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if a file at `path` should be formatted on save.
    pub fn should_format(&self, path: &str) -> bool {
        if !self.enabled {
            return false;
        }

        let include_hit = self.include.iter().any(|f| path.contains(f.as_str()));
        let exclude_hit = self.exclude.iter().any(|f| path.contains(f.as_str()));

        include_hit && !exclude_hit
    }
}

impl Default for LanguageRule {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether a file at `path` should be formatted on save.
pub fn should_format(path: &str, rule: &LanguageRule) -> bool {
    rule.should_format(path)
}

/// The resolved on-save decision for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    /// Legacy boolean setting, returned as-is.
    Fixed(bool),

    /// Include/exclude rule.
    Rule(LanguageRule),
}

impl Gate {
    /// Interprets a legacy `on_save` value.
    ///
    /// A boolean is the decision itself, an object carries `including` and
    /// `excluding` fragment lists. Anything else is rejected, naming the
    /// settings source in the error.
    pub fn from_legacy(value: &Value, settings: &str) -> Result<Self> {
        let invalid = || PresaveError::InvalidOnSave {
            key: ON_SAVE_KEY.to_string(),
            settings: settings.to_string(),
        };

        match value {
            Value::Bool(enabled) => Ok(Self::Fixed(*enabled)),
            Value::Object(map) => {
                let include = fragments(map.get(LEGACY_INCLUDING_KEY)).ok_or_else(invalid)?;
                let exclude = fragments(map.get(LEGACY_EXCLUDING_KEY)).ok_or_else(invalid)?;
                Ok(Self::Rule(LanguageRule {
                    enabled: true,
                    include,
                    exclude,
                }))
            }
            _ => Err(invalid()),
        }
    }

    /// Returns true if a file at `path` should be formatted on save.
    pub fn should_format(&self, path: &str) -> bool {
        match self {
            Self::Fixed(enabled) => *enabled,
            Self::Rule(rule) => rule.should_format(path),
        }
    }
}

/// Reads a fragment list; a missing list is empty, a malformed one is `None`.
fn fragments(value: Option<&Value>) -> Option<Vec<String>> {
    match value {
        None | Some(Value::Null) => Some(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect(),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_include_hit() {
        let rule = LanguageRule::new().with_include(["Main"]);
        assert!(should_format("/src/Main.elm", &rule));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let rule = LanguageRule::new()
            .with_include(["Main"])
            .with_exclude(["Main"]);
        assert!(!should_format("/src/Main.elm", &rule));

        let rule = LanguageRule::new()
            .with_include([".elm", "src"])
            .with_exclude(["Main"]);
        assert!(!should_format("/src/Main.elm", &rule));
    }

    #[test]
    fn test_disabled_never_formats() {
        let rule = LanguageRule::new()
            .with_enabled(false)
            .with_include(["Main"]);
        assert!(!should_format("/src/Main.elm", &rule));
    }

    #[test]
    fn test_no_include_never_formats() {
        let rule = LanguageRule::new();
        assert!(!should_format("/src/Main.elm", &rule));
    }

    #[test]
    fn test_empty_fragment_matches_everything() {
        let rule = LanguageRule::new().with_include([""]);
        assert!(should_format("/any/path.txt", &rule));
    }

    #[test]
    fn test_matching_is_case_sensitive_substring() {
        let rule = LanguageRule::new().with_include(["main"]);
        assert!(!should_format("/src/Main.elm", &rule));

        let rule = LanguageRule::new().with_include(["c/Ma"]);
        assert!(should_format("/src/Main.elm", &rule));

        // Not a glob.
        let rule = LanguageRule::new().with_include(["*.elm"]);
        assert!(!should_format("/src/Main.elm", &rule));
    }

    #[test]
    fn test_rule_deserialize_defaults() {
        let rule: LanguageRule = serde_json::from_value(json!({})).unwrap();
        assert_eq!(rule, LanguageRule::new());

        let rule: LanguageRule =
            serde_json::from_value(json!({ "enabled": false, "include": ["src/"] })).unwrap();
        assert!(!rule.enabled);
        assert_eq!(rule.include, vec!["src/".to_string()]);
        assert!(rule.exclude.is_empty());
    }

    #[test]
    fn test_legacy_boolean() {
        let gate = Gate::from_legacy(&json!(true), "x.json").unwrap();
        assert_eq!(gate, Gate::Fixed(true));
        assert!(gate.should_format("/anything"));

        let gate = Gate::from_legacy(&json!(false), "x.json").unwrap();
        assert!(!gate.should_format("/src/Main.elm"));
    }

    #[test]
    fn test_legacy_object() {
        let value = json!({ "including": ["src/"], "excluding": ["elm-stuff"] });
        let gate = Gate::from_legacy(&value, "x.json").unwrap();

        assert!(gate.should_format("/app/src/Main.elm"));
        assert!(!gate.should_format("/app/elm-stuff/src/Dep.elm"));
        assert!(!gate.should_format("/app/tests/Spec.elm"));
    }

    #[test]
    fn test_legacy_invalid_shape() {
        let err = Gate::from_legacy(&json!("yes"), "elm-format-on-save.json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "\"on_save\" in \"elm-format-on-save.json\" has an invalid value"
        );

        assert!(Gate::from_legacy(&json!(1), "x.json").is_err());
        assert!(Gate::from_legacy(&json!(["src/"]), "x.json").is_err());
        assert!(Gate::from_legacy(&json!({ "including": "src/" }), "x.json").is_err());
        assert!(Gate::from_legacy(&json!({ "including": [1] }), "x.json").is_err());
    }
}
