use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::errors::{KeyStoreError, Result};
use crate::validator::{
    BooleanValidator, JsonSchemaValidator, NumberValidator, OptionalValidator, StringValidator,
    Validator,
};

/// Declarative schema for a single key, compiled to a [`Validator`] by
/// [`ValidatorFactory`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaDefinition {
    Boolean,
    Number, // Supports int, long, float, double
    String,
    JsonSchema { raw_schema: String },
    /// Accepts the null sentinel, otherwise applies the inner definition.
    Optional(Box<SchemaDefinition>),
}

/// Factory for creating validators from schema definitions
pub struct ValidatorFactory;

impl ValidatorFactory {
    /// Create a validator for the given schema definition. Fails with
    /// [`KeyStoreError::Configuration`] on a malformed JSON Schema document.
    pub fn create(schema_def: &SchemaDefinition) -> Result<Box<dyn Validator>> {
        match schema_def {
            SchemaDefinition::Boolean => Ok(Box::new(BooleanValidator)),
            SchemaDefinition::Number => Ok(Box::new(NumberValidator)),
            SchemaDefinition::String => Ok(Box::new(StringValidator)),
            SchemaDefinition::JsonSchema { raw_schema } => {
                let validator = JsonSchemaValidator::new(raw_schema.clone())
                    .map_err(KeyStoreError::Configuration)?;
                Ok(Box::new(validator))
            }
            SchemaDefinition::Optional(inner) => {
                let inner = Self::create(inner)?;
                Ok(Box::new(OptionalValidator::new(inner)))
            }
        }
    }
}

/// Immutable mapping from key name to its validator, established at
/// construction. The registry's key set is exactly the set of valid keys for
/// every store operation; it never grows or shrinks afterwards.
///
/// An empty registry is allowed and yields a store with no valid keys.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    validators: HashMap<String, Arc<dyn Validator>>,
}

impl SchemaRegistry {
    /// Compile a map of declarative definitions into a registry.
    pub fn from_definitions(definitions: HashMap<String, SchemaDefinition>) -> Result<Self> {
        let mut validators: HashMap<String, Arc<dyn Validator>> =
            HashMap::with_capacity(definitions.len());
        for (key, definition) in definitions {
            let validator = ValidatorFactory::create(&definition).map_err(|e| match e {
                KeyStoreError::Configuration(msg) => {
                    KeyStoreError::Configuration(format!("schema for key '{}': {}", key, msg))
                }
                other => other,
            })?;
            validators.insert(key, Arc::from(validator));
        }
        Ok(Self { validators })
    }

    /// Assemble a registry from already-built validators, for callers with
    /// custom [`Validator`] implementations.
    pub fn from_validators(validators: HashMap<String, Arc<dyn Validator>>) -> Self {
        Self { validators }
    }

    pub fn validator(&self, key: &str) -> Option<&dyn Validator> {
        self.validators.get(key).map(|v| v.as_ref())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.validators.contains_key(key)
    }

    /// Iterate the registered key names, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.validators.keys().map(|k| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}
