//! In-memory type model: a [`TypeHost`] built from JSON model documents.
//!
//! A built-in JDK prelude (collections, maps, `Class`, `Optional`) is always
//! loaded first, so documents only describe their own classes. Scalar library
//! types such as `String` or `LocalDate` need no declaration: the resolver
//! answers them from the scalar registry before asking for a class.
pub mod document;
pub mod type_expr;

use std::collections::{HashMap, HashSet};
use std::fmt;
use indexmap::IndexMap;
use serde_json::Value;
use crate::error::ModelError;
use crate::host::{Annotation, FieldDescriptor, TypeHost, TypeShape};

pub use document::{AnnotationDoc, ClassDoc, ClassKind, FieldDoc, ModelDocument};
use type_expr::TypeExpr;

const JDK_PRELUDE: &str = include_str!("model/jdk_prelude.json");

const OBJECT: &str = "java.lang.Object";

const PRIMITIVES: &[&str] = &["byte", "short", "int", "long", "float", "double", "boolean", "char", "void"];

/// `java.lang` names usable without qualification even when the model
/// does not declare them.
const JAVA_LANG: &[&str] = &[
    "Object", "String", "CharSequence", "StringBuilder", "StringBuffer",
    "Byte", "Short", "Integer", "Long", "Float", "Double", "Number",
    "Boolean", "Character", "Void", "Class", "Iterable", "Enum",
];

/// A resolved type as written at a use site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JavaType {
    Primitive(String),
    Array(Box<JavaType>),
    Class { name: String, args: Vec<JavaType> },
    /// Reference to a type parameter in scope (`T`).
    Param(String),
    Wildcard(Option<Box<JavaType>>),
}

impl JavaType {
    pub fn class(name: impl Into<String>, args: Vec<JavaType>) -> Self {
        Self::Class { name: name.into(), args }
    }

    /// Replace type-parameter references using `map`.
    pub fn substitute(&self, map: &HashMap<&str, &JavaType>) -> JavaType {
        match self {
            Self::Param(name) => map.get(name.as_str()).map_or_else(|| self.clone(), |ty| (*ty).clone()),
            Self::Array(inner) => Self::Array(Box::new(inner.substitute(map))),
            Self::Class { name, args } => Self::Class {
                name: name.clone(),
                args: args.iter().map(|arg| arg.substitute(map)).collect(),
            },
            Self::Wildcard(bound) => Self::Wildcard(bound.as_ref().map(|b| Box::new(b.substitute(map)))),
            Self::Primitive(_) => self.clone(),
        }
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(name) | Self::Param(name) => f.write_str(name),
            Self::Array(inner) => write!(f, "{inner}[]"),
            Self::Class { name, args } if args.is_empty() => f.write_str(name),
            Self::Class { name, args } => {
                write!(f, "{name}<")?;
                for (ix, arg) in args.iter().enumerate() {
                    if ix > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(">")
            }
            Self::Wildcard(None) => f.write_str("?"),
            Self::Wildcard(Some(bound)) => write!(f, "? extends {bound}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassHandle {
    Declared(usize),
    TypeParam(String),
}

#[derive(Debug, Clone)]
pub struct ClassDef {
    pub name: String,
    pub simple_name: String,
    pub kind: ClassKind,
    pub type_parameters: Vec<String>,
    pub supertypes: Vec<JavaType>,
    pub enum_constants: Vec<String>,
    pub fields: Vec<FieldDescriptor<JavaType>>,
    pub containing: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TypeModel {
    classes: IndexMap<String, ClassDef>,
}

impl TypeModel {
    /// Model holding only the JDK prelude.
    pub fn jdk() -> Result<Self, ModelError> {
        Self::from_documents(Vec::new())
    }

    /// Prelude plus `documents`, in order.
    pub fn from_documents(documents: Vec<ModelDocument>) -> Result<Self, ModelError> {
        let prelude: ModelDocument = crate::path_de::from_str_with_path(JDK_PRELUDE)?;
        let docs = std::iter::once(prelude).chain(documents).flat_map(|doc| doc.classes);
        Self::build(docs)
    }

    /// Prelude plus each JSON source text.
    pub fn from_json_strs<'s>(sources: impl IntoIterator<Item = &'s str>) -> Result<Self, ModelError> {
        let documents = sources
            .into_iter()
            .map(crate::path_de::from_str_with_path::<ModelDocument>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_documents(documents)
    }

    fn build(docs: impl IntoIterator<Item = ClassDoc>) -> Result<Self, ModelError> {
        let mut raw = IndexMap::<String, ClassDoc>::new();
        for doc in docs {
            if !type_expr::is_qualified_name(&doc.name) {
                return Err(ModelError::InvalidClassName(doc.name));
            }
            if raw.contains_key(&doc.name) {
                return Err(ModelError::DuplicateClass(doc.name));
            }
            raw.insert(doc.name.clone(), doc);
        }

        let mut simple_names = HashMap::<&str, Vec<&str>>::new();
        for name in raw.keys() {
            simple_names.entry(simple_name(name)).or_default().push(name.as_str());
        }
        let names = Names { raw: &raw, simple_names };

        let mut classes = IndexMap::with_capacity(raw.len());
        for doc in raw.values() {
            let def = names.class_def(doc)?;
            classes.insert(def.name.clone(), def);
        }
        Ok(Self { classes })
    }

    /// Parse a root type expression (no type parameters in scope).
    pub fn parse_type(&self, text: &str) -> Result<JavaType, ModelError> {
        let expr = type_expr::parse(text).map_err(|reason| ModelError::TypeSyntax {
            text: text.to_string(),
            context: "root type".to_string(),
            reason,
        })?;
        Ok(self.lower(&expr, &[]))
    }

    pub fn class(&self, name: &str) -> Option<&ClassDef> {
        self.classes.get(name)
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDef> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn lower(&self, expr: &TypeExpr, params: &[&str]) -> JavaType {
        let lookup = |name: &str| self.classes.contains_key(name);
        let simple = |name: &str| {
            let mut hits = self.classes.keys().filter(|k| simple_name(k) == name);
            match (hits.next(), hits.next()) {
                (Some(only), None) => Some(only.clone()),
                _ => None,
            }
        };
        lower_expr(expr, params, &lookup, &simple)
    }

    fn def(&self, handle: &ClassHandle) -> Option<&ClassDef> {
        match handle {
            ClassHandle::Declared(ix) => self.classes.get_index(*ix).map(|(_, def)| def),
            ClassHandle::TypeParam(_) => None,
        }
    }

    fn inherits(&self, name: &str, base: &str, seen: &mut HashSet<String>) -> bool {
        if name == base {
            return true;
        }
        if !seen.insert(name.to_string()) {
            return false;
        }
        let Some(def) = self.classes.get(name) else {
            return false;
        };
        def.supertypes.iter().any(|sup| match sup {
            JavaType::Class { name, .. } => self.inherits(name, base, seen),
            _ => false,
        })
    }

    /// Own fields, then inherited ones with the supertype's arguments
    /// substituted for its parameters. A raw supertype erases its
    /// parameters to `Object`, so they never meet the subclass's own names.
    fn collect_fields(&self, def: &ClassDef, seen: &mut HashSet<String>) -> Vec<FieldDescriptor<JavaType>> {
        let mut out = def.fields.clone();
        if !seen.insert(def.name.clone()) {
            return out;
        }
        let erased = JavaType::class(OBJECT, Vec::new());
        for sup in &def.supertypes {
            let JavaType::Class { name, args } = sup else { continue };
            let Some(sup_def) = self.classes.get(name) else { continue };
            if seen.contains(&sup_def.name) {
                continue;
            }
            let params = sup_def.type_parameters.iter().map(String::as_str);
            let map: HashMap<&str, &JavaType> = if args.len() == sup_def.type_parameters.len() {
                params.zip(args).collect()
            } else {
                params.map(|param| (param, &erased)).collect()
            };
            out.extend(self.collect_fields(sup_def, seen).into_iter().map(|mut field| {
                field.ty = field.ty.substitute(&map);
                field
            }));
        }
        out
    }
}

impl TypeHost for TypeModel {
    type Type = JavaType;
    type Class = ClassHandle;

    fn shape(&self, ty: &JavaType) -> TypeShape {
        match ty {
            JavaType::Primitive(_) => TypeShape::Primitive,
            JavaType::Array(_) => TypeShape::Array,
            JavaType::Class { .. } | JavaType::Param(_) => TypeShape::Class,
            JavaType::Wildcard(_) => TypeShape::Other,
        }
    }

    fn canonical_text(&self, ty: &JavaType) -> String {
        ty.to_string()
    }

    fn deep_component_type(&self, ty: &JavaType) -> JavaType {
        let mut current = ty;
        while let JavaType::Array(inner) = current {
            current = inner;
        }
        current.clone()
    }

    fn type_arguments(&self, ty: &JavaType) -> Vec<JavaType> {
        match ty {
            JavaType::Class { args, .. } => args.clone(),
            _ => Vec::new(),
        }
    }

    fn resolve_class(&self, ty: &JavaType) -> Option<ClassHandle> {
        match ty {
            JavaType::Class { name, .. } => self.classes.get_index_of(name).map(ClassHandle::Declared),
            JavaType::Param(name) => Some(ClassHandle::TypeParam(name.clone())),
            _ => None,
        }
    }

    fn is_inheritor(&self, ty: &JavaType, base: &str) -> bool {
        match ty {
            JavaType::Class { name, .. } => self.inherits(name, base, &mut HashSet::new()),
            _ => false,
        }
    }

    fn substitute_type_parameter(&self, ty: &JavaType, class: &ClassHandle, index: usize) -> Option<JavaType> {
        let def = self.def(class)?;
        match ty {
            JavaType::Class { args, .. } if args.len() == def.type_parameters.len() => args.get(index).cloned(),
            _ => None,
        }
    }

    fn type_parameters(&self, class: &ClassHandle) -> Vec<String> {
        self.def(class).map(|def| def.type_parameters.clone()).unwrap_or_default()
    }

    fn class_name(&self, class: &ClassHandle) -> String {
        match class {
            ClassHandle::TypeParam(name) => name.clone(),
            ClassHandle::Declared(_) => self.def(class).map(|def| def.simple_name.clone()).unwrap_or_default(),
        }
    }

    fn qualified_name(&self, class: &ClassHandle) -> Option<String> {
        self.def(class).map(|def| def.name.clone())
    }

    fn containing_class(&self, class: &ClassHandle) -> Option<ClassHandle> {
        let outer = self.def(class)?.containing.as_deref()?;
        self.classes.get_index_of(outer).map(ClassHandle::Declared)
    }

    fn all_fields(&self, class: &ClassHandle) -> Vec<FieldDescriptor<JavaType>> {
        match self.def(class) {
            Some(def) => self.collect_fields(def, &mut HashSet::new()),
            None => Vec::new(),
        }
    }

    fn is_type_parameter(&self, class: &ClassHandle) -> bool {
        matches!(class, ClassHandle::TypeParam(_))
    }

    fn enum_constants(&self, class: &ClassHandle) -> Vec<String> {
        match self.def(class) {
            Some(def) if def.kind == ClassKind::Enum => def.enum_constants.clone(),
            _ => Vec::new(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// BUILD HELPERS
// ————————————————————————————————————————————————————————————————————————————

struct Names<'a> {
    raw: &'a IndexMap<String, ClassDoc>,
    simple_names: HashMap<&'a str, Vec<&'a str>>,
}

impl Names<'_> {
    fn class_def(&self, doc: &ClassDoc) -> Result<ClassDef, ModelError> {
        let containing = self.containing(&doc.name);
        let scope = self.scope(doc);

        let supertypes = doc
            .extends
            .iter()
            .chain(&doc.implements)
            .map(|text| self.parse(text, &scope, &format!("supertype of {}", doc.name)))
            .collect::<Result<Vec<_>, _>>()?;

        let fields = doc
            .fields
            .iter()
            .map(|field| {
                let context = format!("field {}.{}", doc.name, field.name);
                let ty = self.parse(&field.ty, &scope, &context)?;
                let initializer = match &field.initializer {
                    Some(Value::Array(_) | Value::Object(_)) => {
                        return Err(ModelError::Document {
                            path: context,
                            message: "initializer must be a JSON scalar".to_string(),
                        });
                    }
                    other => other.clone(),
                };
                Ok(FieldDescriptor {
                    name: field.name.clone(),
                    ty,
                    initializer,
                    annotations: field.annotations.iter().map(annotation).collect(),
                    is_static: field.is_static,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ClassDef {
            name: doc.name.clone(),
            simple_name: simple_name(&doc.name).to_string(),
            kind: doc.kind,
            type_parameters: doc.type_parameters.clone(),
            supertypes,
            enum_constants: doc.enum_constants.clone(),
            fields,
            containing: containing.map(str::to_string),
        })
    }

    /// Longest dotted prefix of `name` that is itself a declared class.
    fn containing<'n>(&self, name: &'n str) -> Option<&'n str> {
        let mut prefix = name;
        while let Some(ix) = prefix.rfind('.') {
            prefix = &prefix[..ix];
            if self.raw.contains_key(prefix) {
                return Some(prefix);
            }
        }
        None
    }

    /// Type parameters visible inside `doc`: its own, then those of each
    /// enclosing class.
    fn scope<'d>(&'d self, doc: &'d ClassDoc) -> Vec<&'d str> {
        let mut scope: Vec<&str> = doc.type_parameters.iter().map(String::as_str).collect();
        let mut outer = self.containing(&doc.name);
        while let Some(name) = outer {
            if let Some(outer_doc) = self.raw.get(name) {
                scope.extend(outer_doc.type_parameters.iter().map(String::as_str));
            }
            outer = self.containing(name);
        }
        scope
    }

    fn parse(&self, text: &str, scope: &[&str], context: &str) -> Result<JavaType, ModelError> {
        let expr = type_expr::parse(text).map_err(|reason| ModelError::TypeSyntax {
            text: text.to_string(),
            context: context.to_string(),
            reason,
        })?;
        let lookup = |name: &str| self.raw.contains_key(name);
        let simple = |name: &str| match self.simple_names.get(name).map(Vec::as_slice) {
            Some([only]) => Some(only.to_string()),
            _ => None,
        };
        Ok(lower_expr(&expr, scope, &lookup, &simple))
    }
}

/// Name resolution order: primitive, type parameter in scope, qualified
/// name, `java.lang`, unique simple name among declared classes. Anything
/// else stays as an (unresolvable) class reference.
fn lower_expr(
    expr: &TypeExpr,
    params: &[&str],
    declared: &dyn Fn(&str) -> bool,
    by_simple_name: &dyn Fn(&str) -> Option<String>,
) -> JavaType {
    match expr {
        TypeExpr::Array(inner) => JavaType::Array(Box::new(lower_expr(inner, params, declared, by_simple_name))),
        TypeExpr::Wildcard(bound) => JavaType::Wildcard(
            bound.as_ref().map(|b| Box::new(lower_expr(b, params, declared, by_simple_name))),
        ),
        TypeExpr::Named { name, args } => {
            let args: Vec<JavaType> = args
                .iter()
                .map(|arg| lower_expr(arg, params, declared, by_simple_name))
                .collect();
            if args.is_empty() && PRIMITIVES.contains(&name.as_str()) {
                return JavaType::Primitive(name.clone());
            }
            if args.is_empty() && params.contains(&name.as_str()) {
                return JavaType::Param(name.clone());
            }
            if name.contains('.') {
                return JavaType::Class { name: name.clone(), args };
            }
            let java_lang = format!("java.lang.{name}");
            if declared(&java_lang) || JAVA_LANG.contains(&name.as_str()) {
                return JavaType::Class { name: java_lang, args };
            }
            let name = by_simple_name(name).unwrap_or_else(|| name.clone());
            JavaType::Class { name, args }
        }
    }
}

fn annotation(doc: &AnnotationDoc) -> Annotation {
    Annotation { qualified_name: doc.name.clone(), attributes: doc.attributes.clone() }
}

fn simple_name(qualified: &str) -> &str {
    qualified.rsplit('.').next().unwrap_or(qualified)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn model(doc: serde_json::Value) -> TypeModel {
        let doc: ModelDocument = serde_json::from_value(doc).unwrap();
        TypeModel::from_documents(vec![doc]).unwrap()
    }

    #[test]
    fn prelude_inheritance() {
        let m = TypeModel::jdk().unwrap();
        let list = m.parse_type("List<String>").unwrap();
        assert_eq!(m.canonical_text(&list), "java.util.List<java.lang.String>");
        assert!(m.is_inheritor(&list, "java.util.Collection"));
        assert!(m.is_inheritor(&list, "java.lang.Iterable"));
        assert!(!m.is_inheritor(&list, "java.util.Map"));

        let map = m.parse_type("LinkedHashMap<String, Integer>").unwrap();
        assert!(m.is_inheritor(&map, "java.util.Map"));
        let class = m.resolve_class(&map).unwrap();
        assert_eq!(m.type_parameters(&class), vec!["K", "V"]);
        assert_eq!(
            m.substitute_type_parameter(&map, &class, 1),
            Some(JavaType::class("java.lang.Integer", vec![])),
        );
    }

    #[test]
    fn names_resolve_in_scope_order() {
        let m = model(json!({ "classes": [
            { "name": "com.example.Box", "typeParameters": ["T"],
              "fields": [ { "name": "value", "type": "T" },
                          { "name": "owner", "type": "User" },
                          { "name": "raw", "type": "Missing" } ] },
            { "name": "com.example.User" }
        ]}));
        let def = m.class("com.example.Box").unwrap();
        assert_eq!(def.fields[0].ty, JavaType::Param("T".into()));
        assert_eq!(def.fields[1].ty, JavaType::class("com.example.User", vec![]));
        assert_eq!(def.fields[2].ty, JavaType::class("Missing", vec![]));
        assert!(m.resolve_class(&def.fields[2].ty).is_none());
    }

    #[test]
    fn nested_classes_find_their_container() {
        let m = model(json!({ "classes": [
            { "name": "com.example.Outer", "typeParameters": ["T"] },
            { "name": "com.example.Outer.Inner", "fields": [ { "name": "t", "type": "T" } ] }
        ]}));
        let inner = m.class("com.example.Outer.Inner").unwrap();
        assert_eq!(inner.containing.as_deref(), Some("com.example.Outer"));
        assert_eq!(inner.simple_name, "Inner");
        assert_eq!(inner.fields[0].ty, JavaType::Param("T".into()));
    }

    #[test]
    fn inherited_fields_are_substituted() {
        let m = model(json!({ "classes": [
            { "name": "com.example.Base", "typeParameters": ["T"],
              "fields": [ { "name": "data", "type": "T" } ] },
            { "name": "com.example.UserPage", "extends": ["com.example.Base<String>"],
              "fields": [ { "name": "page", "type": "int" } ] }
        ]}));
        let ty = m.parse_type("com.example.UserPage").unwrap();
        let class = m.resolve_class(&ty).unwrap();
        let fields = m.all_fields(&class);
        let names: Vec<_> = fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["page", "data"]);
        assert_eq!(fields[1].ty, JavaType::class("java.lang.String", vec![]));
    }

    #[test]
    fn raw_supertype_fields_are_erased() {
        let m = model(json!({ "classes": [
            { "name": "com.example.Base", "typeParameters": ["T"],
              "fields": [ { "name": "a", "type": "T" }, { "name": "all", "type": "List<T>" } ] },
            { "name": "com.example.Sub", "typeParameters": ["T"], "extends": ["com.example.Base"],
              "fields": [ { "name": "b", "type": "T" } ] }
        ]}));
        let ty = m.parse_type("com.example.Sub<Integer>").unwrap();
        let class = m.resolve_class(&ty).unwrap();
        let fields = m.all_fields(&class);
        assert_eq!(fields[0].ty, JavaType::Param("T".into()));
        assert_eq!(fields[1].ty, JavaType::class("java.lang.Object", vec![]));
        assert_eq!(m.canonical_text(&fields[2].ty), "java.util.List<java.lang.Object>");
    }

    #[test]
    fn build_errors() {
        let dup = json!({ "classes": [ { "name": "a.B" }, { "name": "a.B" } ] });
        let dup: ModelDocument = serde_json::from_value(dup).unwrap();
        assert!(matches!(TypeModel::from_documents(vec![dup]), Err(ModelError::DuplicateClass(_))));

        let bad = json!({ "classes": [ { "name": "a.B", "fields": [ { "name": "x", "type": "List<" } ] } ] });
        let bad: ModelDocument = serde_json::from_value(bad).unwrap();
        assert!(matches!(TypeModel::from_documents(vec![bad]), Err(ModelError::TypeSyntax { .. })));

        let init = json!({ "classes": [ { "name": "a.B", "fields": [ { "name": "x", "type": "int", "initializer": [1] } ] } ] });
        let init: ModelDocument = serde_json::from_value(init).unwrap();
        assert!(matches!(TypeModel::from_documents(vec![init]), Err(ModelError::Document { .. })));

        assert!(matches!(TypeModel::from_json_strs(["{ \"classes\": 1 }"]), Err(ModelError::Document { .. })));
    }

    #[test]
    fn wildcards_and_arrays() {
        let m = TypeModel::jdk().unwrap();
        let ty = m.parse_type("List<? extends Number>[][]").unwrap();
        assert_eq!(m.shape(&ty), TypeShape::Array);
        let component = m.deep_component_type(&ty);
        assert_eq!(m.canonical_text(&component), "java.util.List<? extends java.lang.Number>");
        let arg = &m.type_arguments(&component)[0];
        assert_eq!(m.shape(arg), TypeShape::Other);
    }
}
