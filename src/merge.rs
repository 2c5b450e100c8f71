//! Layer merging
//!
//! Applies one configuration document on top of a record, field by field,
//! using the merge policy declared in the schema unless the caller overrides it.

use std::collections::HashMap;

use serde_json::Value;
use tracing::trace;

use crate::configuration::ParserConfiguration;
use crate::error::Result;
use crate::schema::{self, Field, MergePolicy};

/// Per-field merge policies; fields without an override use the schema's.
#[derive(Debug, Clone, Default)]
pub struct MergePolicies {
    overrides: HashMap<Field, MergePolicy>,
}

impl MergePolicies {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: Field, policy: MergePolicy) -> Self {
        self.overrides.insert(field, policy);
        self
    }

    pub fn set(&mut self, field: Field, policy: MergePolicy) {
        self.overrides.insert(field, policy);
    }

    pub fn policy_for(&self, field: Field) -> MergePolicy {
        self.overrides
            .get(&field)
            .copied()
            .unwrap_or(schema::descriptor(field).merge)
    }
}

/// Merge `layer` into `config`. Returns the number of fields the layer set.
///
/// Fields missing from the layer keep their current value. On error the
/// record is left untouched.
pub fn apply_layer(
    config: &mut ParserConfiguration,
    layer: &Value,
    policies: &MergePolicies,
) -> Result<usize> {
    let fields = schema::extract(layer)?;
    let mut merged = config.clone();

    for (descriptor, value) in &fields {
        let policy = policies.policy_for(descriptor.field);
        trace!("Merging '{}' with {:?}", descriptor.key, policy);
        schema::write_field(&mut merged, descriptor.field, value.clone(), policy)?;
    }

    *config = merged;
    Ok(fields.len())
}
