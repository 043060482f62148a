use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParserError {
    #[error("no parser configured for uploader {0}")]
    UnknownUploader(u64),
    #[error("a parser for uploader {0} is already registered")]
    DuplicateUploader(u64),
}
