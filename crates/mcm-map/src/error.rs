use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("cannot rank against an empty candidate set")]
    EmptyCandidateSet,
}
