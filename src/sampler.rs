use serde_json::Value;
use tracing::error;
use crate::defaults::ScalarDefaults;
use crate::error::SampleError;
use crate::host::TypeHost;
use crate::render::{render, Style};
use crate::resolve::Resolver;

/// One-call front end: root type in, JSON text out.
pub struct Sampler<'a, H: TypeHost> {
    resolver: Resolver<'a, H>,
    style: Style,
}

impl<'a, H: TypeHost> Sampler<'a, H> {
    pub fn new(host: &'a H, defaults: &'a ScalarDefaults) -> Self {
        Self { resolver: Resolver::new(host, defaults), style: Style::default() }
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn sample(&self, ty: &H::Type) -> Option<Value> {
        self.resolver.resolve_root(ty)
    }

    pub fn try_to_json_string(&self, ty: &H::Type) -> Result<String, SampleError> {
        let value = self.sample(ty);
        render(value.as_ref(), self.style)
    }

    /// Like [`Self::try_to_json_string`], but a failure is logged and
    /// reported as "no sample" instead of an error.
    pub fn to_json_string(&self, ty: &H::Type) -> Option<String> {
        match self.try_to_json_string(ty) {
            Ok(text) => Some(text),
            Err(err) => {
                error!(ty = ?ty, error = %err, "to json error");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TypeModel;

    #[test]
    fn renders_a_class_sample() {
        let model = TypeModel::from_json_strs([r#"{ "classes": [
            { "name": "com.example.Person",
              "fields": [ { "name": "name", "type": "String" }, { "name": "age", "type": "int" } ] }
        ] }"#])
        .unwrap();
        let defaults = ScalarDefaults::new();
        let ty = model.parse_type("com.example.Person").unwrap();

        let pretty = Sampler::new(&model, &defaults).to_json_string(&ty).unwrap();
        assert_eq!(pretty, "{\n  \"name\": \"\",\n  \"age\": 0\n}");

        let compact = Sampler::new(&model, &defaults).with_style(Style::Compact);
        assert_eq!(compact.to_json_string(&ty).unwrap(), r#"{"name":"","age":0}"#);
    }

    #[test]
    fn absent_root_renders_null() {
        let model = TypeModel::jdk().unwrap();
        let defaults = ScalarDefaults::new();
        let ty = model.parse_type("Class").unwrap();
        let sampler = Sampler::new(&model, &defaults);
        assert_eq!(sampler.sample(&ty), None);
        assert_eq!(sampler.try_to_json_string(&ty).unwrap(), "null");
    }
}
