//! Value resolution engine.
//!
//! Walks a type through the host API and produces a sample value. The walk
//! is a priority-ordered match over the type's shape; the first case that
//! applies wins:
//!
//! 1. depth ceiling reached → no value
//! 2. primitive → scalar default
//! 3. array → one-element list of the component (or `[]`)
//! 4. class with a scalar default (boxes, strings, dates, JSON trees)
//! 5. unresolvable class → `{}`; enum → its first constant
//! 6. `java.` iterables/collections → one-element list; `Optional` → its value
//! 7. `java.lang.Class<X>` → the name of `X`
//! 8. `java.` maps → `{" ": value}`
//! 9. bound type parameter → the bound type
//! 10. plain class → field-by-field mapping (see [`class`])
//! 11. generic class → field-by-field mapping with this use site's bindings
mod class;

use serde_json::{Map, Value};
use tracing::{debug, trace};
use crate::bindings::Bindings;
use crate::defaults::ScalarDefaults;
use crate::host::{TypeHost, TypeShape};

/// Hard recursion ceiling. Every descent (field, element, map value, bound
/// type parameter) adds one; a branch that reaches it yields no value.
pub const MAX_DEPTH: usize = 200;

/// Key of the single entry emitted for map types.
pub const MAP_KEY_PLACEHOLDER: &str = " ";

/// Canonical-name prefix of standard-library types eligible for the
/// container quick paths.
const LIBRARY_ORIGIN: &str = "java.";

const ITERABLE: &str = "java.lang.Iterable";
const COLLECTION: &str = "java.util.Collection";
const CLASS_TOKEN: &str = "java.lang.Class";
const OPTIONAL: &str = "java.util.Optional";
const MAP: &str = "java.util.Map";

/// Recursion state for one resolution step.
#[derive(Debug, Clone)]
pub struct Context<T> {
    pub ty: T,
    pub bindings: Bindings<T>,
    pub depth: usize,
}

impl<T: Clone> Context<T> {
    pub fn root(ty: T, bindings: Bindings<T>) -> Self {
        Self { ty, bindings, depth: 0 }
    }

    /// Child step one level deeper.
    pub fn descend(&self, ty: T, bindings: Bindings<T>) -> Self {
        Self { ty, bindings, depth: self.depth + 1 }
    }
}

/// Standard-library container families handled without looking at fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LibraryShape {
    Iterable,
    Optional,
    ClassToken,
    Map,
}

pub struct Resolver<'a, H: TypeHost> {
    host: &'a H,
    defaults: &'a ScalarDefaults,
}

impl<'a, H: TypeHost> Resolver<'a, H> {
    pub fn new(host: &'a H, defaults: &'a ScalarDefaults) -> Self {
        Self { host, defaults }
    }

    /// Resolve `ty` as the root of a sample (depth 0, bindings taken from
    /// `ty`'s own generic arguments).
    pub fn resolve_root(&self, ty: &H::Type) -> Option<Value> {
        let bindings = self.bindings_for(ty, &Bindings::empty());
        self.resolve(&Context::root(ty.clone(), bindings))
    }

    pub fn resolve(&self, cx: &Context<H::Type>) -> Option<Value> {
        if cx.depth >= MAX_DEPTH {
            debug!(depth = cx.depth, ty = ?cx.ty, "depth ceiling reached; dropping branch");
            return None;
        }
        trace!(depth = cx.depth, ty = ?cx.ty, "resolve");
        match self.host.shape(&cx.ty) {
            TypeShape::Primitive => self.defaults.lookup(&self.host.canonical_text(&cx.ty)),
            TypeShape::Array => {
                let component = self.host.deep_component_type(&cx.ty);
                let item = self.step(cx, &component, &cx.bindings);
                Some(Value::Array(item.into_iter().collect()))
            }
            TypeShape::Class => self.resolve_class_type(cx),
            TypeShape::Other => None,
        }
    }

    fn resolve_class_type(&self, cx: &Context<H::Type>) -> Option<Value> {
        let ty = &cx.ty;
        let canonical = self.host.canonical_text(ty);
        if let Some(value) = self.defaults.lookup(&canonical) {
            return Some(value);
        }
        let Some(class) = self.host.resolve_class(ty) else {
            trace!(ty = %canonical, "unresolvable class");
            return Some(Value::Object(Map::new()));
        };
        if let Some(first) = self.host.enum_constants(&class).into_iter().next() {
            return Some(Value::String(first));
        }

        let arity = self.host.type_parameters(&class).len();
        if canonical.starts_with(LIBRARY_ORIGIN) {
            if let Some(shape) = self.library_shape(ty, arity) {
                return self.resolve_library(cx, shape);
            }
        }

        if self.host.is_type_parameter(&class) {
            let name = self.host.class_name(&class);
            if let Some(bound) = cx.bindings.resolve(&name) {
                let bound = bound.clone();
                return self.step(cx, &bound, &cx.bindings);
            }
        }

        // cases 10 and 11: `cx` already carries this use site's bindings
        self.resolve_fields(&class, cx)
    }

    fn library_shape(&self, ty: &H::Type, arity: usize) -> Option<LibraryShape> {
        let is = |base: &str| self.host.is_inheritor(ty, base);
        match arity {
            1 if is(ITERABLE) || is(COLLECTION) => Some(LibraryShape::Iterable),
            1 if is(OPTIONAL) => Some(LibraryShape::Optional),
            1 if is(CLASS_TOKEN) => Some(LibraryShape::ClassToken),
            2 if is(MAP) => Some(LibraryShape::Map),
            _ => None,
        }
    }

    fn resolve_library(&self, cx: &Context<H::Type>, shape: LibraryShape) -> Option<Value> {
        let args = self.host.type_arguments(&cx.ty);
        match (shape, args.as_slice()) {
            (LibraryShape::Iterable, [item]) => {
                let item = self.step(cx, item, &cx.bindings);
                Some(Value::Array(item.into_iter().collect()))
            }
            (LibraryShape::Iterable, _) => Some(Value::Array(Vec::new())),
            (LibraryShape::Optional, [inner]) => {
                Some(self.step(cx, inner, &cx.bindings).unwrap_or(Value::Null))
            }
            (LibraryShape::Optional, _) => Some(Value::Null),
            (LibraryShape::ClassToken, [target]) if self.host.shape(target) != TypeShape::Other => {
                let target = self.concrete(target.clone(), &cx.bindings).unwrap_or_else(|| target.clone());
                Some(Value::String(self.binary_name(&target)))
            }
            (LibraryShape::ClassToken, _) => None,
            (LibraryShape::Map, [_, value]) => {
                let value = self.step(cx, value, &cx.bindings).unwrap_or(Value::Null);
                let mut entry = Map::new();
                entry.insert(MAP_KEY_PLACEHOLDER.to_string(), value);
                Some(Value::Object(entry))
            }
            (LibraryShape::Map, _) => Some(Value::Object(Map::new())),
        }
    }

    /// Resolve `ty` one level below `cx`, with `ty`'s bindings layered over
    /// `parent`.
    fn step(&self, cx: &Context<H::Type>, ty: &H::Type, parent: &Bindings<H::Type>) -> Option<Value> {
        let bindings = self.bindings_for(ty, parent);
        self.resolve(&cx.descend(ty.clone(), bindings))
    }

    /// Pair each type parameter of `ty`'s class with the argument written at
    /// this use site, layered over `parent`. Arguments are made concrete
    /// against `parent` before the layer is pushed. A parameter with no
    /// concrete argument (raw use, unbound outer parameter) is hidden so it
    /// cannot pick up a same-named binding from `parent`.
    fn bindings_for(&self, ty: &H::Type, parent: &Bindings<H::Type>) -> Bindings<H::Type> {
        if self.host.shape(ty) != TypeShape::Class {
            return parent.clone();
        }
        let Some(class) = self.host.resolve_class(ty) else {
            return parent.clone();
        };
        self.host
            .type_parameters(&class)
            .into_iter()
            .enumerate()
            .fold(parent.clone(), |acc, (index, name)| {
                let arg = self
                    .host
                    .substitute_type_parameter(ty, &class, index)
                    .and_then(|arg| self.concrete(arg, parent));
                match arg {
                    Some(arg) => acc.bind(name, arg),
                    None => acc.hide(name),
                }
            })
    }

    /// A bare type-parameter argument is replaced by its binding in
    /// `bindings`; `None` when it is unbound there.
    fn concrete(&self, arg: H::Type, bindings: &Bindings<H::Type>) -> Option<H::Type> {
        let param = self
            .host
            .resolve_class(&arg)
            .filter(|class| self.host.is_type_parameter(class));
        match param {
            None => Some(arg),
            Some(param) => bindings.resolve(&self.host.class_name(&param)).cloned(),
        }
    }

    /// `pkg.Outer$Middle$Inner` for nested classes, canonical text otherwise.
    fn binary_name(&self, ty: &H::Type) -> String {
        let Some(class) = self.host.resolve_class(ty) else {
            return self.host.canonical_text(ty);
        };
        let mut current = self.host.containing_class(&class);
        if current.is_none() {
            return self.host.canonical_text(ty);
        }
        let mut segments = vec![self.host.class_name(&class)];
        while let Some(outer) = current {
            segments.push("$".to_string());
            let next = self.host.containing_class(&outer);
            let segment = match next {
                Some(_) => self.host.class_name(&outer),
                None => self
                    .host
                    .qualified_name(&outer)
                    .unwrap_or_else(|| self.host.class_name(&outer)),
            };
            segments.push(segment);
            current = next;
        }
        segments.reverse();
        segments.concat()
    }
}
