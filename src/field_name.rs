//! External JSON key for a field, honoring naming-override annotations.
use crate::host::Annotation;

pub const JACKSON_JSON_PROPERTY: &str = "com.fasterxml.jackson.annotation.JsonProperty";
pub const FASTJSON_JSON_FIELD: &str = "com.alibaba.fastjson.annotation.JSONField";

/// Jackson `@JsonProperty(value)` wins over Fastjson `@JSONField(name)`;
/// blank overrides are ignored and the declared name is used.
pub fn resolve_field_key(annotations: &[Annotation], declared_name: &str) -> String {
    let find = |marker: &str| annotations.iter().find(|a| a.qualified_name == marker);

    let jackson = find(JACKSON_JSON_PROPERTY).and_then(|a| a.attribute("value"));
    let fastjson = find(FASTJSON_JSON_FIELD).and_then(|a| a.attribute("name"));

    [jackson, fastjson]
        .into_iter()
        .flatten()
        .map(|name| name.trim_matches('"'))
        .find(|name| !name.trim().is_empty())
        .unwrap_or(declared_name)
        .to_string()
}
