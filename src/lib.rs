//! Sample JSON payloads from declared types.
//!
//! Given a type as seen through a [`host::TypeHost`], the resolver builds a
//! structurally correct placeholder value: zeros, `false`, empty or
//! placeholder strings, one-element lists and maps, field-keyed objects.
//! Nothing is executed; cyclic type graphs are cut at a fixed depth.
//!
//! ```no_run
//! use sample_json::{ScalarDefaults, Sampler, TypeModel};
//!
//! let model = TypeModel::jdk()?;
//! let defaults = ScalarDefaults::new();
//! let ty = model.parse_type("java.util.Map<String, Integer>")?;
//! let json = Sampler::new(&model, &defaults).to_json_string(&ty);
//! assert_eq!(json.as_deref(), Some("{\n  \" \": 0\n}"));
//! # Ok::<(), sample_json::error::ModelError>(())
//! ```
pub mod bindings;
pub mod defaults;
pub mod error;
pub mod field_name;
pub mod host;
pub mod model;
pub mod path_de;
pub mod render;
pub mod resolve;
mod sampler;

pub use defaults::{ScalarDefaults, ScalarRule};
pub use host::{Annotation, FieldDescriptor, TypeHost, TypeShape};
pub use model::{JavaType, TypeModel};
pub use render::Style;
pub use resolve::{Context, Resolver, MAX_DEPTH};
pub use sampler::Sampler;
