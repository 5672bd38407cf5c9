//! On-disk shape of a model document.
//!
//! ```json
//! { "classes": [
//!     { "name": "com.example.Page", "typeParameters": ["T"],
//!       "fields": [ { "name": "items", "type": "List<T>" },
//!                   { "name": "size", "type": "int", "initializer": 20 } ] } ] }
//! ```
use std::path::Path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::error::ModelError;
use crate::path_de;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ModelDocument {
    #[serde(default)]
    pub classes: Vec<ClassDoc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClassDoc {
    /// Fully qualified; nested classes use dots (`com.example.Outer.Inner`).
    pub name: String,
    #[serde(default)]
    pub kind: ClassKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<String>,
    /// Superclass, or super-interfaces for an interface.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_constants: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldDoc {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
    #[serde(default, rename = "static", skip_serializing_if = "std::ops::Not::not")]
    pub is_static: bool,
    /// Literal initializer; must be a JSON scalar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initializer: Option<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<AnnotationDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AnnotationDoc {
    pub name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl ModelDocument {
    /// Read a document from disk. With `pointer`, the document is the node
    /// the JSON pointer selects inside the file.
    pub fn read(path: &Path, pointer: Option<&str>) -> Result<Self, ModelError> {
        let source = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let Some(pointer) = pointer else {
            return path_de::from_str_with_path(&source);
        };
        let mut root: Value = path_de::from_str_with_path(&source)?;
        match root.pointer_mut(pointer) {
            Some(node) => path_de::from_value_with_path(node.take()),
            None => Err(ModelError::PointerMiss(pointer.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str, body: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("sample-json-{}-{name}", std::process::id()));
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn reads_through_a_pointer() {
        let path = scratch("wrapped.json", r#"{ "data": { "model": { "classes": [ { "name": "a.B" } ] } } }"#);
        let doc = ModelDocument::read(&path, Some("/data/model")).unwrap();
        assert_eq!(doc.classes[0].name, "a.B");
        assert!(matches!(
            ModelDocument::read(&path, Some("/nope")),
            Err(ModelError::PointerMiss(p)) if p == "/nope"
        ));
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn missing_file_is_io() {
        let err = ModelDocument::read(Path::new("/definitely/not/here.json"), None).unwrap_err();
        assert!(matches!(err, ModelError::Io { .. }));
    }
}
