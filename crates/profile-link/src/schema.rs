//! Declarative schema of the trusted profile link resource.
//!
//! Every input attribute forces recreation of the link: the IAM Identity API
//! has no update call for links.

use serde_json::{json, Map, Value};

/// Type of a schema attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeType {
    /// Plain string value
    String,
    /// List of nested blocks with bounded cardinality
    List {
        /// Element block
        block: &'static Block,
        /// Fewest elements allowed
        min_items: usize,
        /// Most elements allowed
        max_items: usize,
    },
}

/// A single attribute of a block
#[derive(Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    pub ty: AttributeType,
    /// Must be set in configuration
    pub required: bool,
    /// May be set in configuration
    pub optional: bool,
    /// Set by the server
    pub computed: bool,
    /// Changing the value requires destroying and recreating the resource
    pub force_new: bool,
    /// Human-readable description
    pub description: &'static str,
}

/// A set of attributes: the resource itself or a nested element
#[derive(Debug, PartialEq, Eq)]
pub struct Block {
    /// Attributes in declaration order
    pub attributes: &'static [Attribute],
}

/// Nested `link` element
pub static LINK_TARGET_BLOCK: Block = Block {
    attributes: &[
        Attribute {
            name: "crn",
            ty: AttributeType::String,
            required: true,
            optional: false,
            computed: false,
            force_new: false,
            description: "The CRN of the compute resource.",
        },
        Attribute {
            name: "namespace",
            ty: AttributeType::String,
            required: true,
            optional: false,
            computed: false,
            force_new: false,
            description: "The compute resource namespace, only required if cr_type is IKS_SA or ROKS_SA.",
        },
        Attribute {
            name: "name",
            ty: AttributeType::String,
            required: false,
            optional: true,
            computed: false,
            force_new: false,
            description: "Name of the compute resource, only required if cr_type is IKS_SA or ROKS_SA.",
        },
    ],
};

/// Schema of the trusted profile link resource
pub static TRUSTED_PROFILE_LINK_SCHEMA: Block = Block {
    attributes: &[
        Attribute {
            name: "profile_id",
            ty: AttributeType::String,
            required: true,
            optional: false,
            computed: false,
            force_new: true,
            description: "ID of the trusted profile.",
        },
        Attribute {
            name: "cr_type",
            ty: AttributeType::String,
            required: true,
            optional: false,
            computed: false,
            force_new: true,
            description: "The compute resource type. Valid values are VSI, IKS_SA, ROKS_SA.",
        },
        Attribute {
            name: "link",
            ty: AttributeType::List {
                block: &LINK_TARGET_BLOCK,
                min_items: 1,
                max_items: 1,
            },
            required: true,
            optional: false,
            computed: false,
            force_new: true,
            description: "Link details.",
        },
        Attribute {
            name: "name",
            ty: AttributeType::String,
            required: false,
            optional: true,
            computed: false,
            force_new: true,
            description: "Optional name of the Link.",
        },
        Attribute {
            name: "entity_tag",
            ty: AttributeType::String,
            required: false,
            optional: false,
            computed: true,
            force_new: false,
            description: "Version of the link.",
        },
        Attribute {
            name: "created_at",
            ty: AttributeType::String,
            required: false,
            optional: false,
            computed: true,
            force_new: false,
            description: "If set contains a date time string of the creation date in ISO format.",
        },
        Attribute {
            name: "modified_at",
            ty: AttributeType::String,
            required: false,
            optional: false,
            computed: true,
            force_new: false,
            description: "If set contains a date time string of the last modification date in ISO format.",
        },
    ],
};

impl Block {
    /// Look up an attribute by name
    pub fn attribute(&self, name: &str) -> Option<&'static Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Iterate over the declared attributes in declaration order
    pub fn iter(&self) -> std::slice::Iter<'static, Attribute> {
        self.attributes.iter()
    }

    /// Check that `value` is an acceptable value for `attribute`.
    ///
    /// `Null` is always accepted and means "unset".
    pub fn check_value(attribute: &Attribute, value: &Value) -> Result<(), String> {
        match (&attribute.ty, value) {
            (_, Value::Null) => Ok(()),
            (AttributeType::String, Value::String(_)) => Ok(()),
            (AttributeType::String, other) => Err(format!("expected string, got {}", kind_of(other))),
            (AttributeType::List { block, min_items, max_items }, Value::Array(items)) => {
                if items.len() < *min_items || items.len() > *max_items {
                    return Err(format!(
                        "expected between {} and {} elements, got {}",
                        min_items,
                        max_items,
                        items.len()
                    ));
                }
                for (index, item) in items.iter().enumerate() {
                    let Value::Object(map) = item else {
                        return Err(format!("element {} must be an object, got {}", index, kind_of(item)));
                    };
                    block
                        .check_map(map)
                        .map_err(|reason| format!("element {}: {}", index, reason))?;
                }
                Ok(())
            }
            (AttributeType::List { .. }, other) => Err(format!("expected list, got {}", kind_of(other))),
        }
    }

    /// Check keys and value types of a map against this block
    pub fn check_map(&self, map: &Map<String, Value>) -> Result<(), String> {
        for (key, value) in map {
            let attribute = self
                .attributes
                .iter()
                .find(|a| a.name == key.as_str())
                .ok_or_else(|| format!("unsupported attribute {:?}", key))?;
            Self::check_value(attribute, value).map_err(|reason| format!("{}: {}", key, reason))?;
        }
        Ok(())
    }

    /// Validate user configuration: types, required attributes (at every
    /// nesting level) and no computed-only attributes.
    pub fn validate_config(&self, map: &Map<String, Value>) -> Result<(), String> {
        self.check_map(map)?;

        for attribute in self.attributes {
            let value = map.get(attribute.name).filter(|v| !v.is_null());
            if attribute.computed && !attribute.optional && value.is_some() {
                return Err(format!("{}: computed attribute cannot be configured", attribute.name));
            }
            if attribute.required && value.is_none() {
                return Err(format!("{}: required attribute is missing", attribute.name));
            }
            if let (AttributeType::List { block, .. }, Some(Value::Array(items))) = (&attribute.ty, value) {
                for (index, item) in items.iter().enumerate() {
                    if let Value::Object(nested) = item {
                        block
                            .validate_config(nested)
                            .map_err(|reason| format!("{}.{}.{}", attribute.name, index, reason))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Render the block as JSON for hosts that display or export the schema
    pub fn describe(&self) -> Value {
        let mut attributes = Map::new();
        for attribute in self.attributes {
            let mut entry = json!({
                "required": attribute.required,
                "optional": attribute.optional,
                "computed": attribute.computed,
                "force_new": attribute.force_new,
                "description": attribute.description,
            });
            match attribute.ty {
                AttributeType::String => {
                    entry["type"] = json!("string");
                }
                AttributeType::List { block, min_items, max_items } => {
                    entry["type"] = json!("list");
                    entry["min_items"] = json!(min_items);
                    entry["max_items"] = json!(max_items);
                    entry["elem"] = block.describe();
                }
            }
            attributes.insert(attribute.name.to_string(), entry);
        }
        Value::Object(attributes)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
