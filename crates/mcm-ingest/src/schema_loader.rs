//! Loading of the JSON ontology/schema definition.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use mcm_model::Schema;

/// Reads a [`Schema`] from a JSON definition file.
pub fn load_schema(path: &Path) -> Result<Schema> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read schema definition: {}", path.display()))?;
    let schema = Schema::from_json_str(&contents)
        .with_context(|| format!("parse schema definition: {}", path.display()))?;
    debug!(fields = schema.len(), path = %path.display(), "loaded schema");
    Ok(schema)
}
