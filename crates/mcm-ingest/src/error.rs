use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("csv read failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
