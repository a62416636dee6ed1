//! Identifiers and raw records.
//!
//! An [`ObjectId`] is the opaque token keying one record in the object
//! table.  It is case-sensitive and never interpreted structurally — Xcode
//! writes 24-hex-digit tokens, but nothing here depends on that.
//!
//! A [`RawRecord`] is the untyped field map for one object, classified once
//! at table-build time and immutable afterwards.  Field accessors coerce
//! defensively: plist-to-JSON conversions routinely store numbers and
//! booleans as strings (`"0"`, `"1"`, `"46"`), so every numeric accessor
//! accepts both shapes.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use serde_json::{Map, Value};
use std::fmt;

// ── ObjectId ─────────────────────────────────────────────────────────────────

/// Opaque identifier for one record, unique within a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ObjectId {
    fn from(s: &str) -> Self {
        ObjectId(s.to_owned())
    }
}

impl From<String> for ObjectId {
    fn from(s: String) -> Self {
        ObjectId(s)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── RawRecord ────────────────────────────────────────────────────────────────

/// One object's fields, exactly as decoded, plus its fixed classification.
#[derive(Debug, Clone)]
pub struct RawRecord {
    id:     ObjectId,
    kind:   ObjectKind,
    isa:    String,
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Classify and wrap one record.  The `isa` discriminant must be a
    /// string; its *value* is never a reason to fail (unknown discriminants
    /// classify as [`ObjectKind::Unknown`]).
    pub fn new(id: ObjectId, fields: Map<String, Value>) -> Result<Self> {
        let isa = match fields.get("isa") {
            Some(Value::String(s)) => s.clone(),
            _ => {
                return Err(Error::MalformedDocument {
                    field:  "objects",
                    reason: "contains a record without a string `isa` discriminant",
                })
            }
        };
        let kind = ObjectKind::classify(&isa);
        Ok(RawRecord { id, kind, isa, fields })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    /// The raw discriminant as the document spelled it.  For known kinds
    /// this equals `kind().isa()`; for Unknown it is the only place the
    /// original spelling survives.
    pub fn isa(&self) -> &str {
        &self.isa
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    // ── Scalar accessors ─────────────────────────────────────────────────────

    /// Optional string field.  `Ok(None)` when absent, `MissingField` when
    /// present with a non-string shape.
    pub fn str_field(&self, field: &str) -> Result<Option<&str>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(_) => Err(self.missing(field)),
        }
    }

    /// Mandatory string field.
    pub fn required_str(&self, field: &str) -> Result<&str> {
        self.str_field(field)?.ok_or_else(|| self.missing(field))
    }

    /// Optional integer field, accepting both JSON numbers and numeric
    /// strings.
    pub fn int_field(&self, field: &str) -> Result<Option<i64>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(v) => coerce_int(v).map(Some).ok_or_else(|| self.missing(field)),
        }
    }

    pub fn required_int(&self, field: &str) -> Result<i64> {
        self.int_field(field)?.ok_or_else(|| self.missing(field))
    }

    /// Boolean-as-number field (`0`/`1`, possibly spelled as a string).
    /// Absent counts as `false`, matching how Xcode omits cleared flags.
    pub fn flag_field(&self, field: &str) -> Result<bool> {
        Ok(self.int_field(field)?.unwrap_or(0) != 0)
    }

    /// Ordered sequence of strings.  Absent yields an empty vec; a present
    /// field must be an array of strings.
    pub fn string_seq(&self, field: &str) -> Result<Vec<&str>> {
        match self.fields.get(field) {
            None => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|v| v.as_str().ok_or_else(|| self.missing(field)))
                .collect(),
            Some(_) => Err(self.missing(field)),
        }
    }

    /// Nested raw mapping (e.g. `buildSettings`, `attributes`).  Content is
    /// deliberately left uninterpreted.
    pub fn dict_field(&self, field: &str) -> Result<Option<&Map<String, Value>>> {
        match self.fields.get(field) {
            None => Ok(None),
            Some(Value::Object(m)) => Ok(Some(m)),
            Some(_) => Err(self.missing(field)),
        }
    }

    // ── Identifier accessors (unresolved) ────────────────────────────────────

    pub fn id_field(&self, field: &str) -> Result<Option<ObjectId>> {
        Ok(self.str_field(field)?.map(ObjectId::from))
    }

    pub fn required_id(&self, field: &str) -> Result<ObjectId> {
        self.id_field(field)?.ok_or_else(|| self.missing(field))
    }

    /// Identifier sequence, source order preserved.  Absent yields an empty
    /// vec — a target with no build phases is a valid target.
    pub fn id_seq(&self, field: &str) -> Result<Vec<ObjectId>> {
        Ok(self.string_seq(field)?.into_iter().map(ObjectId::from).collect())
    }

    fn missing(&self, field: &str) -> Error {
        Error::MissingField {
            id:    self.id.clone(),
            field: field.to_owned(),
        }
    }
}

/// Accept `46`, `"46"` and `46.0`-style spellings of an integer.
fn coerce_int(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
