use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot write migration: {0}")]
    Io(#[from] io::Error),
    #[error("cannot read quiz configurations from {path:?}: {source}")]
    ConfigRead { path: PathBuf, source: io::Error },
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("gloss pool has {pool} ids, cannot sample {wanted} distinct ones")]
    PoolTooSmall { pool: usize, wanted: usize },
    #[error("a quiz needs at least one question")]
    NoQuestions,
    #[error("a question needs at least 2 options, got {0}")]
    TooFewOptions(usize),
    #[error("no quiz configurations!")]
    NoQuizzes,
}
