use pbxgraph::{Document, Error, ObjectKind};
use serde_json::json;
use std::collections::HashSet;
use std::io::Write;
use std::rc::Rc;

/// Wrap an `objects` table in a minimal valid top level.
fn doc(objects: serde_json::Value) -> Document {
    Document::from_value(json!({
        "archiveVersion": 1,
        "objectVersion": 46,
        "classes": {},
        "objects": objects,
        "rootObject": "A1",
    }))
    .unwrap()
}

#[test]
fn end_to_end_project_target_phase() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject", "targets": ["T1"], "mainGroup": "G1",
                "buildConfigurationList": "L1" },
        "T1": { "isa": "PBXNativeTarget", "name": "App", "buildPhases": ["S1"],
                "buildConfigurationList": "L1" },
        "S1": { "isa": "PBXSourcesBuildPhase", "files": [] },
        "G1": { "isa": "PBXGroup", "children": [] },
        "L1": { "isa": "XCConfigurationList", "buildConfigurations": [] },
    }));

    let root = d.root().unwrap();
    assert_eq!(root.kind(), ObjectKind::Project);

    let targets = root.as_project().unwrap().targets().unwrap();
    assert_eq!(targets.len(), 1);

    let target = targets[0].as_native_target().unwrap();
    assert_eq!(target.name().unwrap(), "App");

    let phases = target.build_phases().unwrap();
    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].kind(), ObjectKind::SourcesBuildPhase);
    assert!(phases[0].as_build_phase().unwrap().files().unwrap().is_empty());
}

#[test]
fn resolve_preserves_identity() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject", "targets": ["T1"] },
        "T1": { "isa": "PBXNativeTarget", "name": "App" },
    }));

    let once = d.resolve("T1").unwrap();
    let twice = d.resolve("T1").unwrap();
    assert!(Rc::ptr_eq(&once, &twice));

    // The same identity comes back through a reference accessor.
    let via_project = d.root().unwrap().as_project().unwrap().targets().unwrap();
    assert!(Rc::ptr_eq(&once, &via_project[0]));
}

#[test]
fn resolve_missing_id_is_not_found() {
    let d = doc(json!({ "A1": { "isa": "PBXProject" } }));
    match d.resolve("FFFF") {
        Err(Error::NotFound(id)) => assert_eq!(id.as_str(), "FFFF"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn cyclic_references_terminate_and_share_identity() {
    // A target dependency pointing back at its own target closes a cycle:
    // T1 -> D1 -> T1.  The proxy also loops through the project.
    let d = doc(json!({
        "A1": { "isa": "PBXProject", "targets": ["T1"] },
        "T1": { "isa": "PBXNativeTarget", "name": "App", "dependencies": ["D1"] },
        "D1": { "isa": "PBXTargetDependency", "target": "T1", "targetProxy": "P1" },
        "P1": { "isa": "PBXContainerItemProxy", "containerPortal": "A1" },
    }));

    let t1 = d.resolve("T1").unwrap();
    let deps = t1.as_native_target().unwrap().dependencies().unwrap();
    let back = deps[0].as_target_dependency().unwrap().target().unwrap().unwrap();
    assert!(Rc::ptr_eq(&t1, &back));

    let portal = deps[0]
        .as_target_dependency()
        .unwrap()
        .target_proxy()
        .unwrap()
        .unwrap()
        .as_container_item_proxy()
        .unwrap()
        .container_portal()
        .unwrap();
    assert!(Rc::ptr_eq(&d.root().unwrap(), &portal));

    // Depth guard: walking the cycle many times always lands on the same
    // two instances, and never recurses unboundedly.
    let mut current = Rc::clone(&t1);
    for _ in 0..10_000 {
        let deps = current.as_native_target().unwrap().dependencies().unwrap();
        current = deps[0].as_target_dependency().unwrap().target().unwrap().unwrap();
        assert!(Rc::ptr_eq(&current, &t1));
    }
}

#[test]
fn unknown_discriminant_does_not_abort() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject" },
        "Z1": { "isa": "PBXFutureThing", "mystery": 42 },
    }));

    let z = d.resolve("Z1").unwrap();
    assert_eq!(z.kind(), ObjectKind::Unknown);
    assert_eq!(z.isa(), "PBXFutureThing");
    // Raw fields stay reachable through the escape hatch.
    assert_eq!(z.record().int_field("mystery").unwrap(), Some(42));
}

#[test]
fn dangling_sequence_element_is_scoped() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject", "targets": ["T1"] },
        "T1": { "isa": "PBXNativeTarget", "name": "App",
                "buildPhases": ["S1", "DEAD"] },
        "S1": { "isa": "PBXSourcesBuildPhase", "files": [] },
    }));

    let t1 = d.resolve("T1").unwrap();
    let results = t1.resolve_seq_field("buildPhases").unwrap();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(Error::DanglingReference { owner, field, target }) => {
            assert_eq!(owner.as_str(), "T1");
            assert_eq!(field, "buildPhases");
            assert_eq!(target.as_str(), "DEAD");
        }
        other => panic!("expected DanglingReference, got {other:?}"),
    }

    // The fail-fast typed accessor refuses the whole collection.
    assert!(t1.as_native_target().unwrap().build_phases().is_err());

    // The audit reports the same edge without failing anything.
    let report = d.audit();
    assert_eq!(report.dangling.len(), 1);
    assert_eq!(report.dangling[0].target.as_str(), "DEAD");
}

#[test]
fn full_traversal_creates_one_object_per_record() {
    // Five records, many overlapping references at them.
    let d = doc(json!({
        "A1": { "isa": "PBXProject", "targets": ["T1", "T2"], "mainGroup": "G1" },
        "T1": { "isa": "PBXNativeTarget", "name": "App", "buildPhases": ["S1"] },
        "T2": { "isa": "PBXNativeTarget", "name": "Tests", "buildPhases": ["S1"] },
        "S1": { "isa": "PBXSourcesBuildPhase", "files": [] },
        "G1": { "isa": "PBXGroup", "children": [] },
    }));

    let all = d.resolve_all().unwrap();
    assert_eq!(all.len(), 5);

    let pointers: HashSet<*const pbxgraph::Object> =
        all.iter().map(|obj| Rc::as_ptr(obj)).collect();
    assert_eq!(pointers.len(), 5);

    // Walking references produces no new identities.
    for target in d.root().unwrap().as_project().unwrap().targets().unwrap() {
        assert!(pointers.contains(&Rc::as_ptr(&target)));
        for phase in target.as_native_target().unwrap().build_phases().unwrap() {
            assert!(pointers.contains(&Rc::as_ptr(&phase)));
        }
    }
}

#[test]
fn wrong_kind_lookup_is_type_mismatch() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject" },
        "F1": { "isa": "PBXFileReference", "path": "main.swift" },
    }));

    match d.native_target_by_id("F1") {
        Err(Error::TypeMismatch { expected, found, .. }) => {
            assert_eq!(expected, "native target");
            assert_eq!(found, ObjectKind::FileReference);
        }
        other => panic!("expected TypeMismatch, got {other:?}"),
    }
    // The kind-agnostic lookup still succeeds on the same id.
    assert!(d.resolve("F1").is_ok());
}

#[test]
fn group_child_of_wrong_kind_fails_loudly() {
    let d = doc(json!({
        "A1": { "isa": "PBXProject" },
        "G1": { "isa": "PBXGroup", "children": ["S1"] },
        "S1": { "isa": "PBXSourcesBuildPhase", "files": [] },
    }));

    let g1 = d.group_by_id("G1").unwrap();
    assert!(matches!(
        g1.as_group().unwrap().children(),
        Err(Error::TypeMismatch { .. })
    ));
}

#[test]
fn malformed_top_level_names_the_field() {
    let missing_root = json!({
        "archiveVersion": 1, "objectVersion": 46, "objects": {},
    });
    match Document::from_value(missing_root) {
        Err(Error::MalformedDocument { field, .. }) => assert_eq!(field, "rootObject"),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }

    let bad_objects = json!({
        "archiveVersion": 1, "objectVersion": 46,
        "objects": ["not", "a", "map"], "rootObject": "A1",
    });
    match Document::from_value(bad_objects) {
        Err(Error::MalformedDocument { field, .. }) => assert_eq!(field, "objects"),
        other => panic!("expected MalformedDocument, got {other:?}"),
    }

    assert!(matches!(
        Document::from_value(json!("scalar")),
        Err(Error::MalformedDocument { .. })
    ));
}

#[test]
fn stringly_typed_versions_coerce() {
    let d = Document::from_value(json!({
        "archiveVersion": "1",
        "objectVersion": "46",
        "objects": { "A1": { "isa": "PBXProject" } },
        "rootObject": "A1",
    }))
    .unwrap();
    assert_eq!(d.archive_version(), 1);
    assert_eq!(d.object_version(), 46);
}

#[test]
fn objects_outliving_the_document_detach() {
    let held = {
        let d = doc(json!({
            "A1": { "isa": "PBXProject", "targets": ["T1"] },
            "T1": { "isa": "PBXNativeTarget", "name": "App" },
        }));
        d.root().unwrap()
    };

    // Scalar reads still work (the record travels with the object)...
    assert_eq!(held.kind(), ObjectKind::Project);
    // ...but resolution needs the document.
    assert!(matches!(
        held.resolve_seq_field("targets").unwrap()[0],
        Err(Error::Detached(_))
    ));
}

#[test]
fn from_path_reads_json_documents() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let body = json!({
        "archiveVersion": 1,
        "objectVersion": 46,
        "objects": {
            "A1": { "isa": "PBXProject", "targets": [] },
        },
        "rootObject": "A1",
    });
    file.write_all(body.to_string().as_bytes()).unwrap();
    file.flush().unwrap();

    let d = Document::from_path(file.path()).unwrap();
    assert_eq!(d.len(), 1);
    assert_eq!(d.root().unwrap().kind(), ObjectKind::Project);
}
