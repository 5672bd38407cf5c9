use serde_json::{json, Value};
use super::ScalarDefaults;

const INTEGRAL: &[&str] = &[
    "byte", "short", "int", "long",
    "java.lang.Byte", "java.lang.Short", "java.lang.Integer", "java.lang.Long",
    "java.math.BigInteger",
    "java.util.concurrent.atomic.AtomicInteger",
    "java.util.concurrent.atomic.AtomicLong",
];

const FLOATING: &[&str] = &[
    "float", "double",
    "java.lang.Float", "java.lang.Double",
    "java.math.BigDecimal",
];

const BOOLEAN: &[&str] = &[
    "boolean",
    "java.lang.Boolean",
    "java.util.concurrent.atomic.AtomicBoolean",
];

const STRINGS: &[&str] = &[
    "char",
    "java.lang.Character",
    "java.lang.String",
    "java.lang.CharSequence",
    "java.lang.StringBuilder",
    "java.lang.StringBuffer",
];

pub(super) fn register(reg: &mut ScalarDefaults, string_placeholder: &str) {
    for name in INTEGRAL {
        reg.register(*name, json!(0));
    }
    for name in FLOATING {
        reg.register(*name, json!(0.0));
    }
    for name in BOOLEAN {
        reg.register(*name, json!(false));
    }
    register_strings(reg, string_placeholder);
    reg.register("java.util.UUID", json!("00000000-0000-0000-0000-000000000000"));
    reg.register("java.util.Locale", json!("en_US"));
    reg.register("java.util.Currency", json!("USD"));
}

pub(super) fn register_strings(reg: &mut ScalarDefaults, placeholder: &str) {
    for name in STRINGS {
        reg.register(*name, Value::from(placeholder));
    }
}
