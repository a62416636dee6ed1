use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pbxgraph::Document;
use serde_json::{json, Value};

/// Synthetic document: one project, `targets` targets, each with one sources
/// phase referencing `files_per_target` build files over shared file refs.
fn synthetic_document(targets: usize, files_per_target: usize) -> Value {
    let mut objects = serde_json::Map::new();
    let mut target_ids = Vec::new();

    for t in 0..targets {
        let mut build_file_ids = Vec::new();
        for f in 0..files_per_target {
            let file_ref = format!("FR{f}");
            objects.entry(file_ref.clone()).or_insert_with(|| {
                json!({ "isa": "PBXFileReference", "path": format!("src/file{f}.swift") })
            });
            let bf = format!("BF{t}_{f}");
            objects.insert(bf.clone(), json!({ "isa": "PBXBuildFile", "fileRef": file_ref }));
            build_file_ids.push(bf);
        }
        let phase = format!("S{t}");
        objects.insert(phase.clone(), json!({ "isa": "PBXSourcesBuildPhase", "files": build_file_ids }));
        let target = format!("T{t}");
        objects.insert(
            target.clone(),
            json!({ "isa": "PBXNativeTarget", "name": format!("Target{t}"), "buildPhases": [phase] }),
        );
        target_ids.push(target);
    }
    objects.insert("ROOT".into(), json!({ "isa": "PBXProject", "targets": target_ids }));

    json!({
        "archiveVersion": 1,
        "objectVersion": 46,
        "objects": Value::Object(objects),
        "rootObject": "ROOT",
    })
}

fn bench_open(c: &mut Criterion) {
    let value = synthetic_document(20, 50);
    c.bench_function("open_20x50", |b| {
        b.iter(|| Document::from_value(black_box(value.clone())).unwrap())
    });
}

fn bench_full_resolution(c: &mut Criterion) {
    let value = synthetic_document(20, 50);
    c.bench_function("resolve_all_20x50", |b| {
        b.iter(|| {
            let doc = Document::from_value(value.clone()).unwrap();
            black_box(doc.resolve_all().unwrap()).len()
        })
    });
}

fn bench_cached_resolve(c: &mut Criterion) {
    let doc = Document::from_value(synthetic_document(20, 50)).unwrap();
    doc.resolve_all().unwrap();
    c.bench_function("cached_resolve", |b| {
        b.iter(|| black_box(doc.resolve("T10").unwrap()))
    });
}

criterion_group!(benches, bench_open, bench_full_resolution, bench_cached_resolve);
criterion_main!(benches);
