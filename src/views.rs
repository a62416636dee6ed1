//! Kind-checked views over typed objects.
//!
//! A view borrows one [`Object`] and exposes its fields under their domain
//! names.  Construction checks the kind and fails with `TypeMismatch`, so a
//! view in hand is proof of kind.  Scalar accessors surface `MissingField`
//! only for fields the format treats as mandatory; everything else is
//! optional and reads as `None`/empty.  Reference accessors resolve through
//! the identity cache and kind-check their targets — a group child that is
//! neither a file reference, a group, a variant group nor a reference proxy
//! is an error, never a silently wrong object.
//!
//! Build-settings and project-attributes dictionaries are exposed raw:
//! interpreting their content is build semantics, not graph structure.

use crate::error::Result;
use crate::kind::ObjectKind;
use crate::object::{ObjRef, Object};
use serde_json::{Map, Value};

/// Kinds a group child may resolve to.
const GROUP_CHILD_KINDS: &[ObjectKind] = &[
    ObjectKind::FileReference,
    ObjectKind::Group,
    ObjectKind::VariantGroup,
    ObjectKind::ReferenceProxy,
];

/// Kinds a build file's `fileRef` may resolve to.
const FILE_REF_KINDS: &[ObjectKind] = &[
    ObjectKind::FileReference,
    ObjectKind::Group,
    ObjectKind::VariantGroup,
    ObjectKind::ReferenceProxy,
];

/// Kinds a container proxy's portal may resolve to: the local project, or a
/// file reference to an external one.
const PORTAL_KINDS: &[ObjectKind] = &[ObjectKind::Project, ObjectKind::FileReference];

fn checked(obj: ObjRef, allowed: &[ObjectKind], expected: &'static str) -> Result<ObjRef> {
    if allowed.contains(&obj.kind()) {
        Ok(obj)
    } else {
        Err(obj.mismatch(expected))
    }
}

fn checked_seq(
    obj: &Object,
    field: &str,
    allowed: &[ObjectKind],
    expected: &'static str,
) -> Result<Vec<ObjRef>> {
    obj.resolve_seq_field(field)?
        .into_iter()
        .map(|item| checked(item?, allowed, expected))
        .collect()
}

// ── Project ──────────────────────────────────────────────────────────────────

/// The root record of a document (`PBXProject`).
pub struct Project<'a> {
    obj: &'a Object,
}

impl<'a> Project<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::Project)?;
        Ok(Project { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn targets(&self) -> Result<Vec<ObjRef>> {
        checked_seq(self.obj, "targets", &[ObjectKind::NativeTarget], "native target")
    }

    pub fn main_group(&self) -> Result<ObjRef> {
        checked(
            self.obj.resolve_field("mainGroup")?,
            &[ObjectKind::Group, ObjectKind::VariantGroup],
            "group",
        )
    }

    pub fn product_ref_group(&self) -> Result<Option<ObjRef>> {
        self.obj
            .resolve_field_opt("productRefGroup")?
            .map(|obj| checked(obj, &[ObjectKind::Group, ObjectKind::VariantGroup], "group"))
            .transpose()
    }

    pub fn build_configuration_list(&self) -> Result<ObjRef> {
        checked(
            self.obj.resolve_field("buildConfigurationList")?,
            &[ObjectKind::ConfigurationList],
            "configuration list",
        )
    }

    pub fn attributes(&self) -> Result<Option<&Map<String, Value>>> {
        self.obj.record().dict_field("attributes")
    }

    pub fn compatibility_version(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("compatibilityVersion")
    }

    pub fn development_region(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("developmentRegion")
    }

    pub fn has_scanned_for_encodings(&self) -> Result<bool> {
        self.obj.record().flag_field("hasScannedForEncodings")
    }

    pub fn known_regions(&self) -> Result<Vec<&str>> {
        self.obj.record().string_seq("knownRegions")
    }

    pub fn project_dir_path(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("projectDirPath")
    }

    pub fn project_root(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("projectRoot")
    }

    /// Cross-project reference entries, kept raw: each is a small mapping of
    /// `ProductGroup`/`ProjectRef` identifiers whose targets usually live in
    /// *other* documents.
    pub fn project_references(&self) -> Option<&Value> {
        self.obj.record().get("projectReferences")
    }
}

// ── NativeTarget ─────────────────────────────────────────────────────────────

pub struct NativeTarget<'a> {
    obj: &'a Object,
}

impl<'a> NativeTarget<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::NativeTarget)?;
        Ok(NativeTarget { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn name(&self) -> Result<&str> {
        self.obj.record().required_str("name")
    }

    pub fn product_name(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("productName")
    }

    pub fn product_type(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("productType")
    }

    pub fn product_reference(&self) -> Result<Option<ObjRef>> {
        self.obj
            .resolve_field_opt("productReference")?
            .map(|obj| checked(obj, &[ObjectKind::FileReference], "file reference"))
            .transpose()
    }

    pub fn build_configuration_list(&self) -> Result<ObjRef> {
        checked(
            self.obj.resolve_field("buildConfigurationList")?,
            &[ObjectKind::ConfigurationList],
            "configuration list",
        )
    }

    /// Build phases in execution order.  Fail-fast: one dangling phase fails
    /// the call; use [`Object::resolve_seq_field`] on `"buildPhases"` for the
    /// per-element form.
    pub fn build_phases(&self) -> Result<Vec<ObjRef>> {
        self.obj
            .resolve_seq_field("buildPhases")?
            .into_iter()
            .map(|phase| {
                let phase = phase?;
                if phase.kind().is_build_phase() {
                    Ok(phase)
                } else {
                    Err(phase.mismatch("build phase"))
                }
            })
            .collect()
    }

    pub fn dependencies(&self) -> Result<Vec<ObjRef>> {
        checked_seq(
            self.obj,
            "dependencies",
            &[ObjectKind::TargetDependency],
            "target dependency",
        )
    }
}

// ── FileReference ────────────────────────────────────────────────────────────

pub struct FileReference<'a> {
    obj: &'a Object,
}

impl<'a> FileReference<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::FileReference)?;
        Ok(FileReference { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn path(&self) -> Result<&str> {
        self.obj.record().required_str("path")
    }

    pub fn name(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("name")
    }

    /// `name` when present, else `path` — what Xcode shows in the navigator.
    pub fn display_name(&self) -> Result<&str> {
        match self.name()? {
            Some(name) => Ok(name),
            None => self.path(),
        }
    }

    pub fn source_tree(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("sourceTree")
    }

    pub fn last_known_file_type(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("lastKnownFileType")
    }

    pub fn explicit_file_type(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("explicitFileType")
    }

    pub fn file_encoding(&self) -> Result<Option<i64>> {
        self.obj.record().int_field("fileEncoding")
    }

    pub fn include_in_index(&self) -> Result<bool> {
        self.obj.record().flag_field("includeInIndex")
    }
}

// ── Group / VariantGroup ─────────────────────────────────────────────────────

/// `PBXGroup` or `PBXVariantGroup`; the two share every field.
pub struct Group<'a> {
    obj: &'a Object,
}

impl<'a> Group<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        if matches!(obj.kind(), ObjectKind::Group | ObjectKind::VariantGroup) {
            Ok(Group { obj })
        } else {
            Err(obj.mismatch("group"))
        }
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn is_variant(&self) -> bool {
        self.obj.kind() == ObjectKind::VariantGroup
    }

    pub fn children(&self) -> Result<Vec<ObjRef>> {
        checked_seq(self.obj, "children", GROUP_CHILD_KINDS, "group child")
    }

    pub fn name(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("name")
    }

    pub fn path(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("path")
    }

    pub fn display_name(&self) -> Result<&str> {
        if let Some(name) = self.name()? {
            return Ok(name);
        }
        Ok(self.path()?.unwrap_or(""))
    }

    pub fn source_tree(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("sourceTree")
    }
}

// ── Build phases ─────────────────────────────────────────────────────────────

/// Any of the four build-phase kinds.
pub struct BuildPhase<'a> {
    obj: &'a Object,
}

impl<'a> BuildPhase<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        if obj.kind().is_build_phase() {
            Ok(BuildPhase { obj })
        } else {
            Err(obj.mismatch("build phase"))
        }
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn files(&self) -> Result<Vec<ObjRef>> {
        checked_seq(self.obj, "files", &[ObjectKind::BuildFile], "build file")
    }

    pub fn build_action_mask(&self) -> Result<Option<i64>> {
        self.obj.record().int_field("buildActionMask")
    }

    pub fn run_only_for_deployment_postprocessing(&self) -> Result<bool> {
        self.obj
            .record()
            .flag_field("runOnlyForDeploymentPostprocessing")
    }

    /// Shell-script specifics, present only for `PBXShellScriptBuildPhase`.
    pub fn as_shell_script(&self) -> Result<ShellScript<'a>> {
        self.obj.expect_kind(ObjectKind::ShellScriptBuildPhase)?;
        Ok(ShellScript { obj: self.obj })
    }
}

pub struct ShellScript<'a> {
    obj: &'a Object,
}

impl ShellScript<'_> {
    pub fn shell_path(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("shellPath")
    }

    pub fn shell_script(&self) -> Result<&str> {
        self.obj.record().required_str("shellScript")
    }

    pub fn input_paths(&self) -> Result<Vec<&str>> {
        self.obj.record().string_seq("inputPaths")
    }

    pub fn output_paths(&self) -> Result<Vec<&str>> {
        self.obj.record().string_seq("outputPaths")
    }
}

// ── BuildFile ────────────────────────────────────────────────────────────────

pub struct BuildFile<'a> {
    obj: &'a Object,
}

impl<'a> BuildFile<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::BuildFile)?;
        Ok(BuildFile { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn file_ref(&self) -> Result<ObjRef> {
        checked(self.obj.resolve_field("fileRef")?, FILE_REF_KINDS, "file-like reference")
    }

    /// Per-file build settings (e.g. compiler flags), uninterpreted.
    pub fn settings(&self) -> Result<Option<&Map<String, Value>>> {
        self.obj.record().dict_field("settings")
    }
}

// ── BuildConfiguration / ConfigurationList ───────────────────────────────────

pub struct BuildConfiguration<'a> {
    obj: &'a Object,
}

impl<'a> BuildConfiguration<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::BuildConfiguration)?;
        Ok(BuildConfiguration { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn name(&self) -> Result<&str> {
        self.obj.record().required_str("name")
    }

    pub fn build_settings(&self) -> Result<Option<&Map<String, Value>>> {
        self.obj.record().dict_field("buildSettings")
    }

    pub fn base_configuration_reference(&self) -> Result<Option<ObjRef>> {
        self.obj
            .resolve_field_opt("baseConfigurationReference")?
            .map(|obj| checked(obj, &[ObjectKind::FileReference], "file reference"))
            .transpose()
    }
}

pub struct ConfigurationList<'a> {
    obj: &'a Object,
}

impl<'a> ConfigurationList<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::ConfigurationList)?;
        Ok(ConfigurationList { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn build_configurations(&self) -> Result<Vec<ObjRef>> {
        checked_seq(
            self.obj,
            "buildConfigurations",
            &[ObjectKind::BuildConfiguration],
            "build configuration",
        )
    }

    pub fn default_configuration_name(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("defaultConfigurationName")
    }

    pub fn default_configuration_is_visible(&self) -> Result<bool> {
        self.obj.record().flag_field("defaultConfigurationIsVisible")
    }
}

// ── Proxies and dependencies ─────────────────────────────────────────────────

pub struct ContainerItemProxy<'a> {
    obj: &'a Object,
}

impl<'a> ContainerItemProxy<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::ContainerItemProxy)?;
        Ok(ContainerItemProxy { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn container_portal(&self) -> Result<ObjRef> {
        checked(self.obj.resolve_field("containerPortal")?, PORTAL_KINDS, "container portal")
    }

    pub fn proxy_type(&self) -> Result<Option<i64>> {
        self.obj.record().int_field("proxyType")
    }

    /// Identifier of the proxied object — possibly in a *different* project
    /// document, so it is exposed as an opaque string, never resolved.
    pub fn remote_global_id(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("remoteGlobalIDString")
    }

    pub fn remote_info(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("remoteInfo")
    }
}

pub struct ReferenceProxy<'a> {
    obj: &'a Object,
}

impl<'a> ReferenceProxy<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::ReferenceProxy)?;
        Ok(ReferenceProxy { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    pub fn path(&self) -> Result<&str> {
        self.obj.record().required_str("path")
    }

    pub fn file_type(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("fileType")
    }

    pub fn source_tree(&self) -> Result<Option<&str>> {
        self.obj.record().str_field("sourceTree")
    }

    pub fn remote_ref(&self) -> Result<ObjRef> {
        checked(
            self.obj.resolve_field("remoteRef")?,
            &[ObjectKind::ContainerItemProxy],
            "container item proxy",
        )
    }
}

pub struct TargetDependency<'a> {
    obj: &'a Object,
}

impl<'a> TargetDependency<'a> {
    pub(crate) fn over(obj: &'a Object) -> Result<Self> {
        obj.expect_kind(ObjectKind::TargetDependency)?;
        Ok(TargetDependency { obj })
    }

    pub fn object(&self) -> &Object {
        self.obj
    }

    /// Absent for cross-project dependencies, which carry only a proxy.
    pub fn target(&self) -> Result<Option<ObjRef>> {
        self.obj
            .resolve_field_opt("target")?
            .map(|obj| checked(obj, &[ObjectKind::NativeTarget], "native target"))
            .transpose()
    }

    pub fn target_proxy(&self) -> Result<Option<ObjRef>> {
        self.obj
            .resolve_field_opt("targetProxy")?
            .map(|obj| checked(obj, &[ObjectKind::ContainerItemProxy], "container item proxy"))
            .transpose()
    }
}
