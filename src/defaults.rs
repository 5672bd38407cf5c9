//! Scalar default registry.
//!
//! Maps a fully qualified type name to the sample value it renders as. The
//! resolver consults it first for primitives and again as a quick path for
//! class types, so well-known library types (boxes, strings, dates, JSON
//! trees) never go through structural resolution.
pub mod jdk;
pub mod thirdlib;
pub mod time;

use std::fmt;
use std::sync::Arc;
use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde_json::Value;

/// Placeholder used for `String`/`char` unless overridden.
pub const DEFAULT_STRING_PLACEHOLDER: &str = "";

#[derive(Clone)]
pub enum ScalarRule {
    Fixed(Value),
    Computed(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl ScalarRule {
    pub fn computed(f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        Self::Computed(Arc::new(f))
    }

    fn value(&self) -> Value {
        match self {
            Self::Fixed(value) => value.clone(),
            Self::Computed(f) => f(),
        }
    }
}

impl fmt::Debug for ScalarRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(value) => f.debug_tuple("Fixed").field(value).finish(),
            Self::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Value> for ScalarRule {
    fn from(value: Value) -> Self {
        Self::Fixed(value)
    }
}

/// Read-only once built; share it by reference across resolutions.
#[derive(Debug, Clone)]
pub struct ScalarDefaults {
    rules: IndexMap<String, ScalarRule>,
}

impl ScalarDefaults {
    /// Registry with every built-in rule, time values taken from the local
    /// clock at construction.
    pub fn new() -> Self {
        Self::at(Local::now())
    }

    /// Registry whose time rules all render `now`.
    pub fn at(now: DateTime<Local>) -> Self {
        let mut out = Self::empty();
        jdk::register(&mut out, DEFAULT_STRING_PLACEHOLDER);
        time::register(&mut out, now);
        thirdlib::register(&mut out);
        out
    }

    pub fn empty() -> Self {
        Self { rules: IndexMap::new() }
    }

    /// Replace the `String`/`char` family placeholder.
    pub fn with_string_placeholder(mut self, placeholder: &str) -> Self {
        jdk::register_strings(&mut self, placeholder);
        self
    }

    /// Add or replace the rule for `qualified_name`.
    pub fn register(&mut self, qualified_name: impl Into<String>, rule: impl Into<ScalarRule>) -> &mut Self {
        self.rules.insert(qualified_name.into(), rule.into());
        self
    }

    pub fn contains(&self, qualified_name: &str) -> bool {
        self.rules.contains_key(qualified_name)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `Some(value)` when a rule covers the type; `None` means "fall through
    /// to structural resolution". Generic arguments are ignored.
    pub fn lookup(&self, canonical_text: &str) -> Option<Value> {
        self.rules.get(erase_generics(canonical_text)).map(ScalarRule::value)
    }
}

impl Default for ScalarDefaults {
    fn default() -> Self {
        Self::new()
    }
}

/// `java.util.Optional<java.lang.String>` → `java.util.Optional`
pub fn erase_generics(canonical_text: &str) -> &str {
    match canonical_text.find('<') {
        Some(ix) => canonical_text[..ix].trim_end(),
        None => canonical_text.trim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_clock() -> ScalarDefaults {
        let now = Local.with_ymd_and_hms(2024, 5, 19, 22, 8, 0).unwrap();
        ScalarDefaults::at(now)
    }

    #[test]
    fn primitives_and_boxes() {
        let reg = fixed_clock();
        assert_eq!(reg.lookup("int"), Some(json!(0)));
        assert_eq!(reg.lookup("long"), Some(json!(0)));
        assert_eq!(reg.lookup("java.lang.Integer"), Some(json!(0)));
        assert_eq!(reg.lookup("double"), Some(json!(0.0)));
        assert_eq!(reg.lookup("boolean"), Some(json!(false)));
        assert_eq!(reg.lookup("java.lang.String"), Some(json!("")));
        assert_eq!(reg.lookup("void"), None);
        assert_eq!(reg.lookup("com.example.User"), None);
    }

    #[test]
    fn generic_arguments_are_erased() {
        let reg = fixed_clock();
        assert_eq!(reg.lookup("com.fasterxml.jackson.databind.node.ArrayNode"), Some(json!([])));
        assert_eq!(erase_generics("java.util.List<java.lang.String>"), "java.util.List");
        assert_eq!(erase_generics(" int "), "int");
    }

    #[test]
    fn time_values_are_stable_per_registry() {
        let reg = fixed_clock();
        assert_eq!(reg.lookup("java.time.LocalTime"), Some(json!("22:08:00")));
        assert_eq!(reg.lookup("java.time.LocalDate"), Some(json!("2024-05-19")));
        assert_eq!(reg.lookup("java.util.Date"), Some(json!("2024-05-19 22:08:00")));
        assert_eq!(reg.lookup("java.util.Date"), reg.lookup("java.util.Date"));
    }

    #[test]
    fn registration_overrides_and_extends() {
        let mut reg = fixed_clock().with_string_placeholder("text");
        assert_eq!(reg.lookup("java.lang.String"), Some(json!("text")));
        assert_eq!(reg.lookup("char"), Some(json!("text")));

        reg.register("com.example.Money", json!("0.00"));
        reg.register("com.example.Seq", ScalarRule::computed(|| json!([1, 2])));
        assert_eq!(reg.lookup("com.example.Money"), Some(json!("0.00")));
        assert_eq!(reg.lookup("com.example.Seq"), Some(json!([1, 2])));
        assert!(reg.contains("com.example.Money"));
        assert!(!ScalarDefaults::empty().contains("int"));
    }
}
