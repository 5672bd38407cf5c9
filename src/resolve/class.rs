//! Structural (field-by-field) resolution of ordinary classes.
use serde_json::{Map, Value};
use tracing::trace;
use crate::field_name::resolve_field_key;
use crate::host::TypeHost;
use super::{Context, Resolver};

impl<H: TypeHost> Resolver<'_, H> {
    /// Mapping of field key → sample value, in field order.
    ///
    /// A single static field makes the whole class unrepresentable (`None`).
    /// Fields without a value are left out. Below the root a class with no
    /// fields at all contributes nothing instead of an empty object.
    pub(super) fn resolve_fields(
        &self,
        class: &H::Class,
        cx: &Context<H::Type>,
    ) -> Option<Value> {
        let fields = self.host.all_fields(class);
        let mut out = Map::new();
        for field in &fields {
            if field.is_static {
                trace!(class = ?class, field = %field.name, "static field; class skipped");
                return None;
            }
            let key = resolve_field_key(&field.annotations, &field.name);
            let value = match &field.initializer {
                Some(literal) if !literal.is_null() => Some(literal.clone()),
                _ => self.step(cx, &field.ty, &cx.bindings),
            };
            if let Some(value) = value {
                out.insert(key, value);
            }
        }
        if cx.depth > 0 && fields.is_empty() && out.is_empty() {
            return None;
        }
        Some(Value::Object(out))
    }
}
