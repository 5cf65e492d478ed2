use thiserror::Error;

/// Payload validation failures. The Display strings are the literal 400
/// response messages, so changing them changes the HTTP contract.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing '{0}' in request body")]
    MissingField(&'static str),
    #[error("Request body must contain either 'title', 'url', 'description' or 'rating'")]
    EmptyUpdate,
}
