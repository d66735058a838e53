use crate::scoring::catalog::catalog;
use serde::Serialize;

pub fn to_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}

pub fn catalog_to_json() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(catalog())
}
