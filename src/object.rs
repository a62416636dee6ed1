//! Typed objects: the cached, kind-fixed wrappers the resolver hands out.
//!
//! An [`Object`] owns nothing but its raw record.  Cross-references are held
//! as identifiers and resolved on first access through a `Weak` back-pointer
//! into the graph, so the document can drop the whole structure at once no
//! matter how tangled the logical reference graph is.
//!
//! Reference accessors come in three shapes:
//! - [`Object::resolve_field`] — mandatory single reference;
//! - [`Object::resolve_field_opt`] — optional single reference;
//! - [`Object::resolve_seq_field`] — ordered sequence with *per-element*
//!   results, so one dangling entry fails that entry and nothing else.  The
//!   typed views collect these fail-fast; the audit path keeps walking.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::record::{ObjectId, RawRecord};
use crate::resolver::Graph;
use crate::views;
use std::rc::{Rc, Weak};

/// Shared handle to a typed object.  Two resolutions of the same identifier
/// always return handles for which [`Rc::ptr_eq`] holds.
pub type ObjRef = Rc<Object>;

pub struct Object {
    record: Rc<RawRecord>,
    graph:  Weak<Graph>,
}

impl Object {
    pub(crate) fn new(record: Rc<RawRecord>, graph: Weak<Graph>) -> Self {
        Object { record, graph }
    }

    pub fn id(&self) -> &ObjectId {
        self.record.id()
    }

    /// Fixed at construction from the record's discriminant.
    pub fn kind(&self) -> ObjectKind {
        self.record.kind()
    }

    pub fn isa(&self) -> &str {
        self.record.isa()
    }

    /// The untyped field map.  Escape hatch for Unknown kinds and for
    /// fields no view exposes.
    pub fn record(&self) -> &RawRecord {
        &self.record
    }

    fn graph(&self) -> Result<Rc<Graph>> {
        self.graph
            .upgrade()
            .ok_or_else(|| Error::Detached(self.id().clone()))
    }

    // ── Reference resolution ─────────────────────────────────────────────────

    /// Resolve a mandatory single-identifier field.
    pub fn resolve_field(&self, field: &str) -> Result<ObjRef> {
        self.resolve_field_opt(field)?.ok_or_else(|| Error::MissingField {
            id:    self.id().clone(),
            field: field.to_owned(),
        })
    }

    /// Resolve an optional single-identifier field.  A present identifier
    /// with no record behind it is a `DanglingReference`, not `None`.
    pub fn resolve_field_opt(&self, field: &str) -> Result<Option<ObjRef>> {
        match self.record.id_field(field)? {
            None => Ok(None),
            Some(target) => self.resolve_target(field, target).map(Some),
        }
    }

    /// Resolve an identifier-sequence field, source order preserved.
    ///
    /// The outer `Result` covers the field itself (mis-shaped value); each
    /// element carries its own `Result` so a dangling entry is scoped to
    /// that entry and the caller decides between fail-fast and
    /// skip-and-report.
    pub fn resolve_seq_field(&self, field: &str) -> Result<Vec<Result<ObjRef>>> {
        let targets = self.record.id_seq(field)?;
        Ok(targets
            .into_iter()
            .map(|target| self.resolve_target(field, target))
            .collect())
    }

    /// Fail-fast collection of [`Object::resolve_seq_field`].
    pub fn resolve_seq_strict(&self, field: &str) -> Result<Vec<ObjRef>> {
        self.resolve_seq_field(field)?.into_iter().collect()
    }

    fn resolve_target(&self, field: &str, target: ObjectId) -> Result<ObjRef> {
        match self.graph()?.resolve(&target) {
            Ok(obj) => Ok(obj),
            Err(Error::NotFound(target)) => Err(Error::DanglingReference {
                owner: self.id().clone(),
                field: field.to_owned(),
                target,
            }),
            Err(other) => Err(other),
        }
    }

    // ── Kind-checked downcasts ───────────────────────────────────────────────

    pub(crate) fn expect_kind(&self, expected: ObjectKind) -> Result<()> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(self.mismatch(expected.name()))
        }
    }

    pub(crate) fn mismatch(&self, expected: &'static str) -> Error {
        Error::TypeMismatch {
            id:       self.id().clone(),
            expected,
            found:    self.kind(),
        }
    }

    pub fn as_project(&self) -> Result<views::Project<'_>> {
        views::Project::over(self)
    }

    pub fn as_native_target(&self) -> Result<views::NativeTarget<'_>> {
        views::NativeTarget::over(self)
    }

    pub fn as_file_reference(&self) -> Result<views::FileReference<'_>> {
        views::FileReference::over(self)
    }

    pub fn as_group(&self) -> Result<views::Group<'_>> {
        views::Group::over(self)
    }

    pub fn as_build_phase(&self) -> Result<views::BuildPhase<'_>> {
        views::BuildPhase::over(self)
    }

    pub fn as_build_file(&self) -> Result<views::BuildFile<'_>> {
        views::BuildFile::over(self)
    }

    pub fn as_build_configuration(&self) -> Result<views::BuildConfiguration<'_>> {
        views::BuildConfiguration::over(self)
    }

    pub fn as_configuration_list(&self) -> Result<views::ConfigurationList<'_>> {
        views::ConfigurationList::over(self)
    }

    pub fn as_container_item_proxy(&self) -> Result<views::ContainerItemProxy<'_>> {
        views::ContainerItemProxy::over(self)
    }

    pub fn as_reference_proxy(&self) -> Result<views::ReferenceProxy<'_>> {
        views::ReferenceProxy::over(self)
    }

    pub fn as_target_dependency(&self) -> Result<views::TargetDependency<'_>> {
        views::TargetDependency::over(self)
    }
}

impl std::fmt::Debug for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Object")
            .field("id", self.id())
            .field("isa", &self.isa())
            .finish()
    }
}
