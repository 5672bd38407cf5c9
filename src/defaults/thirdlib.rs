// JSON-library tree types render as an empty container of their own kind.
use serde_json::json;
use super::ScalarDefaults;

const ARRAYS: &[&str] = &[
    "com.fasterxml.jackson.databind.node.ArrayNode",
    "com.alibaba.fastjson.JSONArray",
    "com.alibaba.fastjson2.JSONArray",
    "com.google.gson.JsonArray",
];

const OBJECTS: &[&str] = &[
    "com.fasterxml.jackson.databind.JsonNode",
    "com.fasterxml.jackson.databind.node.ObjectNode",
    "com.alibaba.fastjson.JSONObject",
    "com.alibaba.fastjson2.JSONObject",
    "com.google.gson.JsonObject",
];

pub(super) fn register(reg: &mut ScalarDefaults) {
    for name in ARRAYS {
        reg.register(*name, json!([]));
    }
    for name in OBJECTS {
        reg.register(*name, json!({}));
    }
}
