//! Property tests over randomly wired reference graphs: arbitrary cycles,
//! diamonds and dangling edges must never break identity or termination.

use proptest::prelude::*;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::rc::Rc;

use pbxgraph::{Document, Error, Object};

/// A random graph of `n` group records.  `edges[i]` lists child indices for
/// record `i`; an index `>= n` is written as a dangling identifier.
fn arb_graph() -> impl Strategy<Value = (usize, Vec<Vec<usize>>)> {
    (1usize..32).prop_flat_map(|n| {
        let edges = prop::collection::vec(
            prop::collection::vec(0..n + 3, 0..6),
            n,
        );
        (Just(n), edges)
    })
}

fn build_document(n: usize, edges: &[Vec<usize>]) -> Document {
    let mut objects = serde_json::Map::new();
    for (i, children) in edges.iter().enumerate() {
        let child_ids: Vec<String> = children
            .iter()
            .map(|&c| if c < n { format!("N{c}") } else { format!("X{c}") })
            .collect();
        objects.insert(
            format!("N{i}"),
            json!({ "isa": "PBXGroup", "children": child_ids }),
        );
    }
    Document::from_value(json!({
        "archiveVersion": 1,
        "objectVersion": 46,
        "objects": Value::Object(objects),
        "rootObject": "N0",
    }))
    .unwrap()
}

proptest! {
    #[test]
    fn full_traversal_yields_one_identity_per_record((n, edges) in arb_graph()) {
        let doc = build_document(n, &edges);

        let all = doc.resolve_all().unwrap();
        prop_assert_eq!(all.len(), n);

        let pointers: HashSet<*const Object> = all.iter().map(Rc::as_ptr).collect();
        prop_assert_eq!(pointers.len(), n);

        // Re-resolving through reference fields creates nothing new and
        // terminates no matter how the edges loop.
        for obj in &all {
            for child in obj.resolve_seq_field("children").unwrap() {
                if let Ok(child) = child {
                    prop_assert!(pointers.contains(&Rc::as_ptr(&child)));
                }
            }
        }
    }

    #[test]
    fn audit_counts_every_edge((n, edges) in arb_graph()) {
        let doc = build_document(n, &edges);
        let report = doc.audit();

        let total: usize = edges.iter().map(Vec::len).sum();
        let dangling: usize = edges
            .iter()
            .flatten()
            .filter(|&&c| c >= n)
            .count();

        prop_assert_eq!(report.reference_count, total);
        prop_assert_eq!(report.dangling.len(), dangling);
    }

    #[test]
    fn dangling_elements_fail_and_valid_elements_resolve((n, edges) in arb_graph()) {
        let doc = build_document(n, &edges);

        for (i, children) in edges.iter().enumerate() {
            let obj = doc.resolve(format!("N{i}")).unwrap();
            let resolved = obj.resolve_seq_field("children").unwrap();
            prop_assert_eq!(resolved.len(), children.len());

            for (&c, result) in children.iter().zip(&resolved) {
                match result {
                    Ok(child) => {
                        let expected = format!("N{c}");
                        prop_assert!(c < n && child.id().as_str() == expected);
                    }
                    Err(Error::DanglingReference { target, .. }) => {
                        let expected = format!("X{c}");
                        prop_assert!(c >= n && target.as_str() == expected);
                    }
                    Err(other) => prop_assert!(false, "unexpected error: {other:?}"),
                }
            }
        }
    }
}
