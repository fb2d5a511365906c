//! Concurrency smoke tests for the shared engine handle
//!
//! Mutating operations take the write lock, queries the read lock; readers
//! must never observe a record mid-mutation (an item with a container but no
//! position, or the reverse).

use std::thread;

use stowage_rs::{Container, ExportScope, Item, SearchScope, Stowage};

#[test]
fn test_readers_during_writer_churn() {
    let shared = Stowage::new().into_shared();
    {
        let mut engine = shared.write();
        engine.allocate_batch(
            vec![Container::new("C1", "A"), Container::new("C2", "A")],
            (0..20)
                .map(|i| Item::new(format!("I{i}")).with_preferred_zone("A"))
                .collect(),
        );
    }

    let writer = {
        let shared = shared.clone();
        thread::spawn(move || {
            for round in 0..50 {
                let id = format!("I{}", round % 20);
                let mut engine = shared.write();
                if engine.retrieve(&id).is_ok() {
                    engine.place(&id, "C2", None).unwrap();
                }
                engine.advance_time(0.5).unwrap();
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let engine = shared.read();
                    let snapshot = engine.export(ExportScope::Items);
                    for item in snapshot.items.unwrap() {
                        // Placement fields always move together.
                        assert_eq!(item.container_id.is_some(), item.position.is_some());
                    }
                    let results = engine.search("", SearchScope::All, Some("A"));
                    assert_eq!(results.containers.len(), 2);
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    // Every retrieve/place round left an audit trail.
    let engine = shared.read();
    assert!(!engine.logs(Some("TIME"), None).is_empty());
}

#[test]
fn test_concurrent_disposals_each_succeed_once() {
    let shared = Stowage::new().into_shared();
    {
        let mut engine = shared.write();
        engine.import(
            vec![],
            (0..40).map(|i| Item::new(format!("I{i}"))).collect(),
            (0, 40),
        );
    }

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut removed = 0;
                for i in 0..40 {
                    if i % 4 == t {
                        let mut engine = shared.write();
                        if engine.dispose(&format!("I{i}")).is_ok() {
                            removed += 1;
                        }
                    }
                }
                removed
            })
        })
        .collect();

    let total: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(total, 40);
    assert_eq!(shared.read().item_count(), 0);
}
