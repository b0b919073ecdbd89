use std::fmt;

use serde_json::Value;

/// Structured diagnostic carried by a validation failure: the schema type
/// that rejected the value plus the individual violation messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub schema_type: String,
    pub violations: Vec<String>,
}

impl ValidationErrors {
    pub fn new(schema_type: &str, violations: Vec<String>) -> Self {
        Self {
            schema_type: schema_type.to_string(),
            violations,
        }
    }

    pub fn single(schema_type: &str, violation: impl Into<String>) -> Self {
        Self::new(schema_type, vec![violation.into()])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.schema_type, self.violations.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Trait for validating values against a key's declared data shape.
///
/// `normalize` guards the write path, `coerce` the read path. Both return
/// the canonical in-memory form of the value or the structured diagnostic.
pub trait Validator: Send + Sync + fmt::Debug {
    /// Validate and canonicalize a candidate value before it is written.
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors>;

    /// Validate and coerce a decoded value read back from storage. The null
    /// sentinel stands in for an absent stored value, so this is where a
    /// validator decides whether absence is acceptable.
    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors>;

    /// Get the schema type name
    fn schema_type(&self) -> &str;

    /// Get a human-readable description of the validator
    fn description(&self) -> String {
        format!("{} validator", self.schema_type())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Boolean validator (value must be a JSON boolean)
#[derive(Debug)]
pub struct BooleanValidator;

impl Validator for BooleanValidator {
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors> {
        match candidate {
            Value::Bool(_) => Ok(candidate),
            other => Err(ValidationErrors::single(
                self.schema_type(),
                format!("expected a boolean, got {}", json_type_name(&other)),
            )),
        }
    }

    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors> {
        self.normalize(decoded)
    }

    fn schema_type(&self) -> &str {
        "boolean"
    }
}

/// Number validator (accepts any JSON number - int, long, float, double)
#[derive(Debug)]
pub struct NumberValidator;

impl Validator for NumberValidator {
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors> {
        match candidate {
            Value::Number(_) => Ok(candidate),
            other => Err(ValidationErrors::single(
                self.schema_type(),
                format!("expected a number, got {}", json_type_name(&other)),
            )),
        }
    }

    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors> {
        self.normalize(decoded)
    }

    fn schema_type(&self) -> &str {
        "number"
    }
}

/// String validator (value must be a JSON string)
#[derive(Debug)]
pub struct StringValidator;

impl Validator for StringValidator {
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors> {
        match candidate {
            Value::String(_) => Ok(candidate),
            other => Err(ValidationErrors::single(
                self.schema_type(),
                format!("expected a string, got {}", json_type_name(&other)),
            )),
        }
    }

    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors> {
        self.normalize(decoded)
    }

    fn schema_type(&self) -> &str {
        "string"
    }
}

/// JSON Schema validator
#[derive(Debug)]
pub struct JsonSchemaValidator {
    validator: jsonschema::Validator,
    raw_schema: String,
}

impl JsonSchemaValidator {
    /// Compile a JSON Schema document. Fails on unparsable or uncompilable
    /// schema text; the error message is meant for configuration diagnostics.
    pub fn new(raw_schema: String) -> Result<Self, String> {
        let schema_value: Value = serde_json::from_str(&raw_schema)
            .map_err(|e| format!("Failed to parse JSON schema: {}", e))?;

        let validator = jsonschema::validator_for(&schema_value)
            .map_err(|e| format!("Failed to compile JSON schema: {}", e))?;

        Ok(Self {
            validator,
            raw_schema,
        })
    }

    fn check(&self, value: Value) -> Result<Value, ValidationErrors> {
        if self.validator.is_valid(&value) {
            Ok(value)
        } else {
            let violations: Vec<String> = self
                .validator
                .iter_errors(&value)
                .map(|e| e.to_string())
                .collect();
            Err(ValidationErrors::new(self.schema_type(), violations))
        }
    }
}

impl Validator for JsonSchemaValidator {
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors> {
        self.check(candidate)
    }

    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors> {
        self.check(decoded)
    }

    fn schema_type(&self) -> &str {
        "json_schema"
    }

    fn description(&self) -> String {
        format!(
            "JSON Schema validator: {}",
            self.raw_schema.chars().take(100).collect::<String>()
        )
    }
}

/// Wrapper that accepts the null sentinel and otherwise delegates to the
/// inner validator. A key declared optional reads back as null when absent.
#[derive(Debug)]
pub struct OptionalValidator {
    inner: Box<dyn Validator>,
    schema_type: String,
}

impl OptionalValidator {
    pub fn new(inner: Box<dyn Validator>) -> Self {
        let schema_type = format!("optional<{}>", inner.schema_type());
        Self { inner, schema_type }
    }
}

impl Validator for OptionalValidator {
    fn normalize(&self, candidate: Value) -> Result<Value, ValidationErrors> {
        match candidate {
            Value::Null => Ok(Value::Null),
            other => self.inner.normalize(other),
        }
    }

    fn coerce(&self, decoded: Value) -> Result<Value, ValidationErrors> {
        match decoded {
            Value::Null => Ok(Value::Null),
            other => self.inner.coerce(other),
        }
    }

    fn schema_type(&self) -> &str {
        &self.schema_type
    }
}
