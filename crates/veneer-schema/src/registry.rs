//! Central schema registry for all Veneer model types.
//!
//! The `SchemaRegistry` builds JSON Schemas from veneer-core types at
//! construction time and provides validation via `jsonschema`.

use std::collections::HashMap;

use jsonschema::Validator;
use schemars::generate::SchemaSettings;
use schemars::transform::{Transform, transform_subschemas};
use schemars::{JsonSchema, Schema};
use serde_json::{Map, Value};

use crate::error::SchemaError;
use crate::violation::format_violation;

/// Schema name of the import/export envelope.
pub const EXPORT_ENVELOPE: &str = "export_envelope";

/// A generated schema and its compiled validator.
struct Registered {
    schema: Value,
    validator: Validator,
}

/// Central store of all JSON Schemas in the Veneer system.
///
/// Provides lookup by name and validation of arbitrary JSON values against
/// registered schemas. Validators are compiled once, with `format`
/// assertions (`date-time` and friends) switched on.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Registered>,
}

/// Removes `null` from what an `Option` field accepts. The field may still
/// be omitted.
#[derive(Debug, Clone, Copy)]
struct RejectNull;

impl Transform for RejectNull {
    fn transform(&mut self, schema: &mut Schema) {
        transform_subschemas(self, schema);
        if let Some(object) = schema.as_object_mut() {
            strip_null_type(object);
            strip_null_branch(object, "anyOf");
            strip_null_branch(object, "oneOf");
            if let Some(Value::Array(values)) = object.get_mut("enum") {
                values.retain(|value| !value.is_null());
            }
        }
    }
}

/// `"type": ["boolean", "null"]` becomes `"type": "boolean"`.
fn strip_null_type(object: &mut Map<String, Value>) {
    let Some(Value::Array(types)) = object.get_mut("type") else {
        return;
    };
    types.retain(|ty| ty.as_str() != Some("null"));
    if types.len() == 1 {
        let only = types.remove(0);
        object.insert("type".to_string(), only);
    }
}

/// `"anyOf": [{"$ref": ...}, {"type": "null"}]` collapses to the `$ref`.
fn strip_null_branch(object: &mut Map<String, Value>, keyword: &str) {
    let Some(Value::Array(branches)) = object.get_mut(keyword) else {
        return;
    };
    branches.retain(|branch| branch.get("type").and_then(Value::as_str) != Some("null"));
    if branches.len() != 1 || !branches[0].is_object() {
        return;
    }
    if let Some(Value::Object(only)) = branches.pop() {
        object.remove(keyword);
        for (key, value) in only {
            object.entry(key).or_insert(value);
        }
    }
}

/// Input schemas: `Option` fields may be omitted but a literal `null` is
/// rejected.
fn strict_schema_for<T: JsonSchema>() -> Result<Value, SchemaError> {
    let settings = SchemaSettings::draft2020_12()
        .with(|settings| settings.transforms.push(Box::new(RejectNull)));
    generate::<T>(settings)
}

/// Output schemas describe what the CLI prints, `null` included.
fn output_schema_for<T: JsonSchema>() -> Result<Value, SchemaError> {
    generate::<T>(SchemaSettings::draft2020_12())
}

fn generate<T: JsonSchema>(settings: SchemaSettings) -> Result<Value, SchemaError> {
    serde_json::to_value(settings.into_generator().into_root_schema_for::<T>())
        .map_err(|e| SchemaError::Generation(e.to_string()))
}

fn compile(schema: Value) -> Result<Registered, SchemaError> {
    let validator = jsonschema::options()
        .should_validate_formats(true)
        .build(&schema)
        .map_err(|e| SchemaError::Generation(format!("{e}")))?;
    Ok(Registered { schema, validator })
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, compile(strict_schema_for::<$ty>()?)?);
    };
    ($map:expr, $name:expr, $ty:ty, output) => {
        $map.insert($name, compile(output_schema_for::<$ty>()?)?);
    };
}

impl SchemaRegistry {
    /// Build a new registry containing the model, envelope and response schemas.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Generation` if a generated schema cannot be
    /// converted to a JSON value or compiled into a validator.
    pub fn new() -> Result<Self, SchemaError> {
        let mut schemas = HashMap::new();

        // --- Model types (4) ---
        register!(schemas, "scene_node", veneer_core::scene::SceneNode);
        register!(schemas, "node_override", veneer_core::overrides::NodeOverride);
        register!(
            schemas,
            "override_document",
            veneer_core::overrides::OverrideDocument
        );
        register!(schemas, "enhanced_node", veneer_core::enhanced::EnhancedNode);

        // --- Wire format (1) ---
        register!(schemas, EXPORT_ENVELOPE, veneer_core::envelope::ExportEnvelope);

        // --- CLI response types (5) ---
        register!(
            schemas,
            "operation_result",
            veneer_core::responses::OperationResult,
            output
        );
        register!(
            schemas,
            "path_mapping_response",
            veneer_core::responses::PathMappingResponse,
            output
        );
        register!(
            schemas,
            "tree_response",
            veneer_core::responses::TreeResponse,
            output
        );
        register!(
            schemas,
            "override_response",
            veneer_core::responses::OverrideResponse,
            output
        );
        register!(
            schemas,
            "last_model_response",
            veneer_core::responses::LastModelResponse,
            output
        );

        Ok(Self { schemas })
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.schemas.get(name).map(|registered| &registered.schema)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// Every violation is collected; validation never stops at the first one.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &Value) -> Result<(), SchemaError> {
        let registered = self
            .schemas
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let errors: Vec<String> = registered
            .validator
            .iter_errors(instance)
            .map(|e| format_violation(&e.instance_path.to_string(), &e.to_string()))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}
