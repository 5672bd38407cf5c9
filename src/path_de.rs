use serde::de::DeserializeOwned;
use serde_json::Value;
use crate::error::ModelError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, ModelError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(into_model_error)
}

/// Same as [`from_str_with_path`] for an already parsed (or pointer-selected)
/// value.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, ModelError> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(into_model_error)
}

fn into_model_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> ModelError {
    let path = err.path().to_string();
    ModelError::Document { path, message: err.into_inner().to_string() }
}
