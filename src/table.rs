//! Object table: identifier → raw record, frozen at construction.
//!
//! The table is the arena every typed object reads through.  It is built in
//! one pass over the document's `objects` mapping, classifies every record
//! exactly once, and caches the identifier list per kind so kind-scoped
//! enumeration never rescans.  A `BTreeMap` keeps iteration deterministic
//! regardless of how the upstream decoder ordered its keys.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::record::{ObjectId, RawRecord};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

#[derive(Debug)]
pub struct ObjectTable {
    records: BTreeMap<ObjectId, Rc<RawRecord>>,
    by_kind: HashMap<ObjectKind, Vec<ObjectId>>,
}

impl ObjectTable {
    /// Build the table from the decoded `objects` mapping.  Fails with
    /// `MalformedDocument` when a record is not a mapping or carries no
    /// string `isa`; an *unknown* `isa` is fine and lands in the Unknown
    /// bucket.
    pub fn from_objects(objects: &serde_json::Map<String, Value>) -> Result<Self> {
        let mut records = BTreeMap::new();
        let mut by_kind: HashMap<ObjectKind, Vec<ObjectId>> = HashMap::new();

        for (key, value) in objects {
            let Value::Object(fields) = value else {
                return Err(Error::MalformedDocument {
                    field:  "objects",
                    reason: "contains a record that is not a mapping",
                });
            };
            let id = ObjectId::from(key.as_str());
            let record = RawRecord::new(id.clone(), fields.clone())?;
            by_kind.entry(record.kind()).or_default().push(id.clone());
            records.insert(id, Rc::new(record));
        }

        // BTreeMap insertion does not sort the per-kind lists; do it here so
        // enumeration order is stable across decoders.
        for ids in by_kind.values_mut() {
            ids.sort();
        }

        Ok(ObjectTable { records, by_kind })
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Rc<RawRecord>> {
        self.records.get(id)
    }

    /// Identifiers of every record of `kind`, in sorted order.  Computed at
    /// construction, O(1) here.
    pub fn ids_of_kind(&self, kind: ObjectKind) -> &[ObjectId] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ids(&self) -> impl Iterator<Item = &ObjectId> {
        self.records.keys()
    }

    pub fn records(&self) -> impl Iterator<Item = &Rc<RawRecord>> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
