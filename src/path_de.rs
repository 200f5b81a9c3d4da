use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode with JSON-path context in error messages.
pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T, String> {
    match serde_path_to_error::deserialize::<_, T>(value) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}

/// Parse `src`, optionally narrow it with a JSON Pointer, then decode.
pub fn from_str_at_pointer<T: DeserializeOwned>(src: &str, pointer: Option<&str>) -> Result<T, String> {
    let mut value: Value = serde_json::from_str(src).map_err(|e| format!("invalid JSON: {e}"))?;
    if let Some(ptr) = pointer {
        value = value
            .pointer_mut(ptr)
            .map(Value::take)
            .ok_or_else(|| format!("JSON pointer {ptr} does not resolve"))?;
    }
    from_value_with_path(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema_bridge::source::Schema;

    #[test]
    fn pointer_selects_subtree() {
        let src = r#"{"defs": {"id": {"type": "array", "element": {"type": "int"}}}}"#;
        let s: Schema = from_str_at_pointer(src, Some("/defs/id")).unwrap();
        assert_eq!(s, Schema::array(Schema::Int));
    }

    #[test]
    fn decode_errors_name_the_offending_tag() {
        let src = r#"{"type": "object", "shape": {"a": {"type": "tuple", "items": [{"type": "strin"}]}}}"#;
        let err = from_str_at_pointer::<Schema>(src, None).unwrap_err();
        assert!(err.starts_with("at JSON path"), "{err}");
        assert!(err.contains("strin"), "{err}");
    }

    #[test]
    fn dangling_pointer_is_reported() {
        let err = from_str_at_pointer::<Schema>(r#"{"type": "string"}"#, Some("/nope")).unwrap_err();
        assert!(err.contains("/nope"));
    }
}
