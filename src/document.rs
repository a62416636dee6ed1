//! Root document facade.
//!
//! [`Document::from_value`] validates the top-level shape of a decoded
//! project document and freezes the object table; everything below the top
//! level resolves lazily through the identity cache.  Opening either fully
//! succeeds or reports exactly which top-level field is missing or
//! mis-shaped — per-object problems never abort the open, they surface
//! later, scoped to the resolve or accessor call that hits them.
//!
//! The upstream decoder is plain JSON.  Xcode project files convert with
//! `plutil -convert json project.pbxproj -o project.json`; parsing the
//! OpenStep plist text itself is out of scope here.

use crate::error::{Error, Result};
use crate::kind::ObjectKind;
use crate::object::ObjRef;
use crate::record::ObjectId;
use crate::resolver::{AuditReport, Graph};
use crate::table::ObjectTable;
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::rc::Rc;

#[derive(Debug)]
pub struct Document {
    archive_version: i64,
    object_version:  i64,
    classes:         Map<String, Value>,
    root_object:     ObjectId,
    graph:           Rc<Graph>,
}

impl Document {
    // ── Constructors ─────────────────────────────────────────────────────────

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_reader(BufReader::new(File::open(path)?))
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_value(serde_json::from_reader(reader)?)
    }

    /// Build a document from an already-decoded tree.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(top) = value else {
            return Err(Error::MalformedDocument {
                field:  "(document)",
                reason: "top level is not a mapping",
            });
        };

        let archive_version = version_field(&top, "archiveVersion")?;
        let object_version = version_field(&top, "objectVersion")?;

        let objects = match top.get("objects") {
            Some(Value::Object(m)) => m,
            Some(_) => {
                return Err(Error::MalformedDocument { field: "objects", reason: "is not a mapping" })
            }
            None => return Err(Error::MalformedDocument { field: "objects", reason: "is missing" }),
        };

        let root_object = match top.get("rootObject") {
            Some(Value::String(s)) => ObjectId::from(s.as_str()),
            Some(_) => {
                return Err(Error::MalformedDocument {
                    field:  "rootObject",
                    reason: "is not a string",
                })
            }
            None => {
                return Err(Error::MalformedDocument { field: "rootObject", reason: "is missing" })
            }
        };

        // Informational only; most documents write `classes = {}`.
        let classes = match top.get("classes") {
            Some(Value::Object(m)) => m.clone(),
            _ => Map::new(),
        };

        let table = ObjectTable::from_objects(objects)?;
        Ok(Document {
            archive_version,
            object_version,
            classes,
            root_object,
            graph: Graph::new(table),
        })
    }

    // ── Metadata ─────────────────────────────────────────────────────────────

    pub fn archive_version(&self) -> i64 {
        self.archive_version
    }

    pub fn object_version(&self) -> i64 {
        self.object_version
    }

    pub fn classes(&self) -> &Map<String, Value> {
        &self.classes
    }

    pub fn root_object_id(&self) -> &ObjectId {
        &self.root_object
    }

    /// Number of records in the object table.
    pub fn len(&self) -> usize {
        self.graph.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.table().is_empty()
    }

    // ── Resolution ───────────────────────────────────────────────────────────

    /// Kind-agnostic lookup.  Same identifier, same object, every time.
    pub fn resolve(&self, id: impl Into<ObjectId>) -> Result<ObjRef> {
        self.graph.resolve(&id.into())
    }

    /// The root object — normally the project record.
    pub fn root(&self) -> Result<ObjRef> {
        self.graph.resolve(&self.root_object)
    }

    /// Resolve every record.  Returns one object per table entry.
    pub fn resolve_all(&self) -> Result<Vec<ObjRef>> {
        self.graph.resolve_all()
    }

    /// Freshly-collected, sorted-by-id list of every object of `kind`.
    /// Identities underneath are cached; the Vec is yours.
    pub fn objects_of_kind(&self, kind: ObjectKind) -> Result<Vec<ObjRef>> {
        self.graph
            .table()
            .ids_of_kind(kind)
            .iter()
            .map(|id| self.graph.resolve(id))
            .collect()
    }

    /// Walk every declared reference and report dangling edges and unknown
    /// discriminants without failing.
    pub fn audit(&self) -> AuditReport {
        self.graph.audit()
    }

    fn of_kind_by_id(&self, id: impl Into<ObjectId>, kind: ObjectKind) -> Result<ObjRef> {
        let obj = self.graph.resolve(&id.into())?;
        obj.expect_kind(kind)?;
        Ok(obj)
    }
}

/// One enumeration + one kind-checked direct lookup per kind.  The by-id
/// form fails with `TypeMismatch` when the identifier exists but names a
/// different kind — never a silent miss.
macro_rules! kind_accessors {
    ($(($all:ident, $by_id:ident, $kind:ident)),+ $(,)?) => {
        impl Document {
            $(
                pub fn $all(&self) -> Result<Vec<ObjRef>> {
                    self.objects_of_kind(ObjectKind::$kind)
                }

                pub fn $by_id(&self, id: impl Into<ObjectId>) -> Result<ObjRef> {
                    self.of_kind_by_id(id, ObjectKind::$kind)
                }
            )+
        }
    };
}

kind_accessors! {
    (projects,                  project_by_id,                  Project),
    (native_targets,            native_target_by_id,            NativeTarget),
    (file_references,           file_reference_by_id,           FileReference),
    (groups,                    group_by_id,                    Group),
    (variant_groups,            variant_group_by_id,            VariantGroup),
    (sources_build_phases,      sources_build_phase_by_id,      SourcesBuildPhase),
    (resources_build_phases,    resources_build_phase_by_id,    ResourcesBuildPhase),
    (frameworks_build_phases,   frameworks_build_phase_by_id,   FrameworksBuildPhase),
    (shell_script_build_phases, shell_script_build_phase_by_id, ShellScriptBuildPhase),
    (build_files,               build_file_by_id,               BuildFile),
    (build_configurations,      build_configuration_by_id,      BuildConfiguration),
    (configuration_lists,       configuration_list_by_id,       ConfigurationList),
    (container_item_proxies,    container_item_proxy_by_id,     ContainerItemProxy),
    (reference_proxies,         reference_proxy_by_id,          ReferenceProxy),
    (target_dependencies,       target_dependency_by_id,        TargetDependency),
}

/// `archiveVersion`/`objectVersion` are numbers, but plist conversions often
/// spell them as numeric strings.
fn version_field(top: &Map<String, Value>, field: &'static str) -> Result<i64> {
    match top.get(field) {
        Some(Value::Number(n)) => n
            .as_i64()
            .ok_or(Error::MalformedDocument { field, reason: "is not a number" }),
        Some(Value::String(s)) => s.trim().parse().map_err(|_| Error::MalformedDocument {
            field,
            reason: "is not a number",
        }),
        Some(_) => Err(Error::MalformedDocument { field, reason: "is not a number" }),
        None => Err(Error::MalformedDocument { field, reason: "is missing" }),
    }
}
