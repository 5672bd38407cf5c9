//! Type Descriptor API: the host-side view of declared types.
//!
//! The resolver never inspects types directly. Everything it needs (shape,
//! names, generic arguments, fields, inheritance) goes through [`TypeHost`],
//! so any introspection layer can drive it. [`crate::model::TypeModel`] is the
//! in-memory implementation used by the CLI and the tests.
use std::fmt;
use indexmap::IndexMap;
use serde_json::Value;

/// Structural classification of a type handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Primitive,
    Array,
    Class,
    /// Anything the host cannot classify (wildcards, intersections, ...).
    Other,
}

/// An annotation attached to a field: qualified marker name plus its string
/// attributes, unquoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotation {
    pub qualified_name: String,
    pub attributes: IndexMap<String, String>,
}

impl Annotation {
    pub fn new(qualified_name: impl Into<String>) -> Self {
        Self { qualified_name: qualified_name.into(), attributes: IndexMap::new() }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone)]
pub struct FieldDescriptor<T> {
    pub name: String,
    pub ty: T,
    /// Literal initializer (`int retries = 3;`), when the host can see one.
    pub initializer: Option<Value>,
    pub annotations: Vec<Annotation>,
    pub is_static: bool,
}

pub trait TypeHost {
    type Type: Clone + fmt::Debug;
    type Class: Clone + fmt::Debug;

    fn shape(&self, ty: &Self::Type) -> TypeShape;

    /// Fully qualified text including generic arguments,
    /// e.g. `java.util.Map<java.lang.String,java.lang.Integer>`.
    fn canonical_text(&self, ty: &Self::Type) -> String;

    /// Innermost non-array component of an array type (`int[][]` → `int`).
    fn deep_component_type(&self, ty: &Self::Type) -> Self::Type;

    /// Generic arguments written at this use site; empty for raw usage.
    fn type_arguments(&self, ty: &Self::Type) -> Vec<Self::Type>;

    fn resolve_class(&self, ty: &Self::Type) -> Option<Self::Class>;

    /// Whether the raw form of `ty` is, or inherits from, `base`.
    fn is_inheritor(&self, ty: &Self::Type, base: &str) -> bool;

    /// The type substituted for `class`'s type parameter at `index` in `ty`,
    /// or `None` when the use site leaves it unbound.
    fn substitute_type_parameter(
        &self,
        ty: &Self::Type,
        class: &Self::Class,
        index: usize,
    ) -> Option<Self::Type>;

    fn type_parameters(&self, class: &Self::Class) -> Vec<String>;

    /// Simple (unqualified) name.
    fn class_name(&self, class: &Self::Class) -> String;

    fn qualified_name(&self, class: &Self::Class) -> Option<String>;

    fn containing_class(&self, class: &Self::Class) -> Option<Self::Class>;

    /// Declared fields followed by inherited ones, static fields included.
    fn all_fields(&self, class: &Self::Class) -> Vec<FieldDescriptor<Self::Type>>;

    /// True when `class` stands for a generic type parameter (`T`) rather
    /// than a declared class.
    fn is_type_parameter(&self, class: &Self::Class) -> bool;

    fn enum_constants(&self, _class: &Self::Class) -> Vec<String> {
        Vec::new()
    }
}
