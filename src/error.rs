use crate::kind::ObjectKind;
use crate::record::ObjectId;
use std::io;
use thiserror::Error;

/// Every failure the reader can produce.
///
/// `MalformedDocument` is fatal and aborts [`crate::Document::from_value`];
/// all other variants are scoped to a single resolve or accessor call so a
/// caller can skip a bad subtree and keep walking the rest of the graph.
#[derive(Error, Debug)]
pub enum Error {
    #[error("malformed document: field `{field}` {reason}")]
    MalformedDocument {
        field:  &'static str,
        reason: &'static str,
    },
    #[error("object {0} not found in object table")]
    NotFound(ObjectId),
    /// A reference field names an identifier with no record behind it.
    #[error("object {owner}: field `{field}` references missing object {target}")]
    DanglingReference {
        owner:  ObjectId,
        field:  String,
        target: ObjectId,
    },
    #[error("object {id}: mandatory field `{field}` is missing or mis-typed")]
    MissingField { id: ObjectId, field: String },
    #[error("object {id} has kind {found}, expected {expected}")]
    TypeMismatch {
        id:       ObjectId,
        expected: &'static str,
        found:    ObjectKind,
    },
    /// An object reference outlived the `Document` that produced it.
    #[error("object {0} is detached from its document")]
    Detached(ObjectId),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
