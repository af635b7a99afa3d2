//! Schema-checked resource data handed between the host and the adapter.
//!
//! Holds the resource identifier and the attribute values. An empty
//! identifier means no remote object is associated with the data.

use crate::error::LinkResourceError;
use crate::schema::Block;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Persistable snapshot of resource data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Resource identifier, empty when nothing exists remotely
    #[serde(default)]
    pub id: String,
    /// Attribute values
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// Identifier plus attribute values, validated against a schema
#[derive(Debug, Clone)]
pub struct ResourceData {
    schema: &'static Block,
    id: String,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Empty data with no identifier
    pub fn new(schema: &'static Block) -> Self {
        Self {
            schema,
            id: String::new(),
            attributes: Map::new(),
        }
    }

    /// Build data from user configuration, validating its shape once.
    pub fn from_config(schema: &'static Block, config: Value) -> Result<Self, LinkResourceError> {
        let Value::Object(attributes) = config else {
            return Err(LinkResourceError::InvalidConfiguration(
                "configuration must be a map of attributes".to_string(),
            ));
        };
        schema
            .validate_config(&attributes)
            .map_err(LinkResourceError::InvalidConfiguration)?;

        Ok(Self {
            schema,
            id: String::new(),
            attributes: strip_nulls(attributes),
        })
    }

    /// Data carrying only a caller-supplied identifier, to be filled by Read
    pub fn import(schema: &'static Block, id: impl Into<String>) -> Self {
        Self {
            schema,
            id: id.into(),
            attributes: Map::new(),
        }
    }

    /// Restore data from a persisted snapshot. Types are checked; required
    /// attributes are not, since a vanished resource has none.
    pub fn from_state(schema: &'static Block, state: ResourceState) -> Result<Self, LinkResourceError> {
        schema
            .check_map(&state.attributes)
            .map_err(LinkResourceError::InvalidConfiguration)?;

        Ok(Self {
            schema,
            id: state.id,
            attributes: strip_nulls(state.attributes),
        })
    }

    /// Snapshot for persistence
    pub fn to_state(&self) -> ResourceState {
        ResourceState {
            id: self.id.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// Schema the data is checked against
    pub fn schema(&self) -> &'static Block {
        self.schema
    }

    /// Resource identifier; empty when no remote object is associated
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Set the identifier; an empty string marks the resource as gone
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// All attribute values currently set
    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Raw value of an attribute, `None` when unset
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// String value of an attribute, `None` when unset or not a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    /// Assign an attribute. `Null` clears it.
    ///
    /// Fails with `AttributeAssignmentFailed` if the attribute is not declared
    /// or the value does not match its declared type.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), LinkResourceError> {
        let attribute = self.schema.attribute(name).ok_or_else(|| {
            LinkResourceError::AttributeAssignmentFailed {
                attribute: name.to_string(),
                reason: "attribute is not declared in the schema".to_string(),
            }
        })?;

        Block::check_value(attribute, &value).map_err(|reason| {
            LinkResourceError::AttributeAssignmentFailed {
                attribute: name.to_string(),
                reason,
            }
        })?;

        if value.is_null() {
            self.attributes.remove(name);
        } else {
            self.attributes.insert(name.to_string(), value);
        }
        Ok(())
    }
}

// Unset and null are the same thing, at every nesting level.
fn strip_nulls(mut attributes: Map<String, Value>) -> Map<String, Value> {
    attributes.retain(|_, v| !v.is_null());
    for value in attributes.values_mut() {
        if let Value::Array(items) = value {
            for item in items.iter_mut() {
                if let Value::Object(nested) = item {
                    nested.retain(|_, v| !v.is_null());
                }
            }
        }
    }
    attributes
}
