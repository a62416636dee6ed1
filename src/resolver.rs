//! Identity cache and graph resolver.
//!
//! # Identity rules
//! One [`Object`] exists per identifier per document, full stop.  The cache
//! is the only place objects are created, and `resolve` inserts the freshly
//! built shell *before* anything can re-enter the resolver.  That ordering
//! is what makes cyclic documents terminate: when resolving A eventually
//! asks for A again (a project references its targets, a target dependency
//! references the project's container proxy, group trees loop back through
//! reference proxies), the second call is a cache hit on the shell and
//! returns the same `Rc` instead of recursing.
//!
//! Reference *fields* are never resolved here.  They resolve lazily at
//! accessor time (see [`Object`]), so `resolve` itself never recurses and
//! resolution cost is only paid for the parts of the graph a caller visits.
//!
//! The document is an in-memory read-only graph with no suspension points,
//! so `Rc`/`RefCell` carry the cache with no locking.  All other state is
//! immutable after the table is built.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::object::{ObjRef, Object};
use crate::record::ObjectId;
use crate::table::ObjectTable;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// ── Graph ────────────────────────────────────────────────────────────────────

/// The object table plus the identity cache.  Owned by the document; typed
/// objects hold a `Weak` back-reference so the ownership graph stays
/// acyclic even though the logical graph is not.
#[derive(Debug)]
pub struct Graph {
    table: ObjectTable,
    cache: RefCell<HashMap<ObjectId, ObjRef>>,
}

impl Graph {
    pub fn new(table: ObjectTable) -> Rc<Self> {
        Rc::new(Graph {
            table,
            cache: RefCell::new(HashMap::new()),
        })
    }

    pub fn table(&self) -> &ObjectTable {
        &self.table
    }

    /// Resolve one identifier to its typed object.
    ///
    /// Cache hit: the existing `Rc`, O(1).  Miss: classify the record, build
    /// the shell, insert it, return it.  Fails with `NotFound` when `id` has
    /// no record — never a silent null.
    pub fn resolve(self: &Rc<Self>, id: &ObjectId) -> Result<ObjRef> {
        if let Some(obj) = self.cache.borrow().get(id) {
            return Ok(Rc::clone(obj));
        }
        let record = self
            .table
            .get(id)
            .ok_or_else(|| Error::NotFound(id.clone()))?;
        let obj = Rc::new(Object::new(Rc::clone(record), Rc::downgrade(self)));
        // Shell goes into the cache before the caller can touch any of its
        // reference accessors.  Kind is already fixed; fields resolve later.
        self.cache
            .borrow_mut()
            .insert(id.clone(), Rc::clone(&obj));
        Ok(obj)
    }

    /// Resolve every record in the table.  Exactly `table.len()` objects
    /// exist afterwards, however many references point at each.
    pub fn resolve_all(self: &Rc<Self>) -> Result<Vec<ObjRef>> {
        let ids: Vec<ObjectId> = self.table.ids().cloned().collect();
        ids.iter().map(|id| self.resolve(id)).collect()
    }

    #[cfg(test)]
    pub(crate) fn cached_count(&self) -> usize {
        self.cache.borrow().len()
    }

    // ── Audit ────────────────────────────────────────────────────────────────

    /// Walk every declared reference field of every record and report what
    /// a strict resolution would trip over, without failing on any of it.
    /// This is the skip-and-report side of sequence resolution: dangling
    /// elements are collected individually while everything else stands.
    pub fn audit(&self) -> AuditReport {
        let mut report = AuditReport::default();

        for record in self.table.records() {
            if record.kind() == ObjectKind::Unknown {
                report.unknown.push(UnknownKind {
                    id:  record.id().clone(),
                    isa: record.isa().to_owned(),
                });
            }

            let spec = record.kind().spec();
            for &field in spec.refs {
                if let Ok(Some(target)) = record.id_field(field) {
                    self.check_edge(record.id(), field, target, &mut report);
                }
            }
            for &field in spec.ref_seqs {
                if let Ok(targets) = record.id_seq(field) {
                    for target in targets {
                        self.check_edge(record.id(), field, target, &mut report);
                    }
                }
            }
        }

        report
    }

    fn check_edge(
        &self,
        owner: &ObjectId,
        field: &str,
        target: ObjectId,
        report: &mut AuditReport,
    ) {
        report.reference_count += 1;
        if self.table.get(&target).is_none() {
            report.dangling.push(DanglingEdge {
                owner: owner.clone(),
                field: field.to_owned(),
                target,
            });
        }
    }
}

// ── Audit report ─────────────────────────────────────────────────────────────

/// One reference field naming an identifier with no record behind it.
#[derive(Debug, Clone, Serialize)]
pub struct DanglingEdge {
    pub owner:  ObjectId,
    pub field:  String,
    pub target: ObjectId,
}

/// A record whose discriminant this build does not recognise.
#[derive(Debug, Clone, Serialize)]
pub struct UnknownKind {
    pub id:  ObjectId,
    pub isa: String,
}

#[derive(Debug, Default, Serialize)]
pub struct AuditReport {
    /// Total declared reference occurrences inspected.
    pub reference_count: usize,
    pub dangling:        Vec<DanglingEdge>,
    pub unknown:         Vec<UnknownKind>,
}

impl AuditReport {
    pub fn is_clean(&self) -> bool {
        self.dangling.is_empty()
    }
}
