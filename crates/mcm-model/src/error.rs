use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid schema definition: {0}")]
    SchemaDefinition(serde_json::Error),
    #[error("side-bag text is not valid JSON: {0}")]
    ExtraData(serde_json::Error),
}
