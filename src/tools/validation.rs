//! Validate tool call arguments against a tool's parameter schema.

use super::function::ParameterSpec;

/// Check `args` against `params`.
///
/// Arguments must be a JSON object, every required parameter must be present
/// and non-null, and every declared parameter that is present must have the
/// declared type. Undeclared fields are ignored. Returns a description of the
/// first violation found.
pub fn validate_arguments(
    args: &serde_json::Value,
    params: &[ParameterSpec],
) -> std::result::Result<(), String> {
    let obj = match args.as_object() {
        Some(obj) => obj,
        None => {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(args)
            ))
        }
    };

    for param in params {
        match obj.get(&param.name) {
            None | Some(serde_json::Value::Null) => {
                if param.required {
                    return Err(format!("missing required field '{}'", param.name));
                }
            }
            Some(value) => {
                if !param.kind.matches(value) {
                    return Err(format!(
                        "field '{}' expected type '{}', got {}",
                        param.name,
                        param.kind,
                        json_type_name(value)
                    ));
                }
            }
        }
    }

    Ok(())
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
