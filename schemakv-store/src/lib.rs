//! Schema-validated accessor layer over a remote key-value store.
//!
//! Each key carries its own declared data shape; writes are normalized
//! against it and reads are coerced back through it, so malformed data is
//! rejected going in and never silently trusted coming out.

mod errors;
pub use errors::{KeyStoreError, Result};

mod validator;
pub use validator::{
    BooleanValidator, JsonSchemaValidator, NumberValidator, OptionalValidator, StringValidator,
    ValidationErrors, Validator,
};

mod registry;
pub use registry::{SchemaDefinition, SchemaRegistry, ValidatorFactory};

mod store;
pub use store::{ValidatedKeyStore, MAX_BATCH_KEYS};

pub use schemakv_core::{BackingStore, MemoryStore, StorageBackend, StoreError};
