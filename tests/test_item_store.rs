//! Item store integration tests, run against both backends.

use itemdesk::app::{
    item_create, item_delete, item_get, item_list, item_update, ItemCreateReq, ItemListReq,
    ItemStore, ItemUpdateReq,
};
use itemdesk::infra::db::init_test_db;
use itemdesk::infra::MemoryItemStore;

// ──────────────────────── Helper ────────────────────────

fn backends() -> Vec<(&'static str, Box<dyn ItemStore>)> {
    vec![
        ("sqlite", Box::new(init_test_db()) as Box<dyn ItemStore>),
        ("memory", Box::new(MemoryItemStore::new())),
    ]
}

fn create(store: &dyn ItemStore, name: &str, description: &str) -> i64 {
    item_create(
        store,
        ItemCreateReq {
            name: name.to_string(),
            description: description.to_string(),
        },
    )
    .unwrap()
    .id
}

fn names(store: &dyn ItemStore, q: &str) -> Vec<String> {
    item_list(store, ItemListReq { q: Some(q.to_string()) })
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect()
}

// ══════════════════════════════════════════════════════════
//  create / get
// ══════════════════════════════════════════════════════════

#[test]
fn create_then_get_returns_supplied_fields() {
    for (label, store) in backends() {
        let id = create(store.as_ref(), "Chair", "Wooden chair");
        let item = item_get(store.as_ref(), id).unwrap();
        assert_eq!(item.id, id, "{label}");
        assert_eq!(item.name, "Chair", "{label}");
        assert_eq!(item.description, "Wooden chair", "{label}");
    }
}

#[test]
fn create_duplicate_name_case_insensitive_fails() {
    for (label, store) in backends() {
        create(store.as_ref(), "X", "first");
        let err = item_create(
            store.as_ref(),
            ItemCreateReq {
                name: "x".to_string(),
                description: "second".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_NAME", "{label}");
        assert_eq!(names(store.as_ref(), ""), vec!["X"], "{label}");
    }
}

#[test]
fn create_duplicate_non_ascii_name_fails() {
    for (label, store) in backends() {
        create(store.as_ref(), "Été", "summer");
        let err = store.create("ÉTÉ", "again").unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_NAME", "{label}");
    }
}

#[test]
fn ids_increase_and_are_not_reused() {
    for (label, store) in backends() {
        let a = create(store.as_ref(), "A", "a");
        let b = create(store.as_ref(), "B", "b");
        assert!(b > a, "{label}");
        item_delete(store.as_ref(), b).unwrap();
        let c = create(store.as_ref(), "C", "c");
        assert!(c > b, "{label}: id {c} reused after delete of {b}");
    }
}

#[test]
fn get_missing_is_not_found() {
    for (label, store) in backends() {
        let err = item_get(store.as_ref(), 42).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND", "{label}");
    }
}

#[test]
fn no_two_items_share_a_name_key() {
    let attempts = ["Lamp", "lamp", "LAMP", "Desk", "desk ", "dEsK", "Lamp shade"];
    for (label, store) in backends() {
        for name in attempts {
            let _ = store.create(name, "d");
        }
        let mut keys: Vec<String> = names(store.as_ref(), "")
            .into_iter()
            .map(|n| n.to_lowercase())
            .collect();
        let total = keys.len();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), total, "{label}");
        // "desk " differs from "desk" by the trailing space
        assert_eq!(total, 4, "{label}");
    }
}

// ══════════════════════════════════════════════════════════
//  list
// ══════════════════════════════════════════════════════════

#[test]
fn list_empty_filter_returns_all_in_id_order() {
    for (label, store) in backends() {
        create(store.as_ref(), "Table", "t");
        create(store.as_ref(), "Chair", "c");
        create(store.as_ref(), "Armchair", "a");
        assert_eq!(
            names(store.as_ref(), ""),
            vec!["Table", "Chair", "Armchair"],
            "{label}"
        );
        let all = item_list(store.as_ref(), ItemListReq::default()).unwrap();
        assert_eq!(all.len(), 3, "{label}");
    }
}

#[test]
fn list_filter_is_case_insensitive_substring() {
    for (label, store) in backends() {
        create(store.as_ref(), "Table", "t");
        create(store.as_ref(), "Chair", "c");
        create(store.as_ref(), "ARMCHAIR", "a");
        assert_eq!(names(store.as_ref(), "chAir"), vec!["Chair", "ARMCHAIR"], "{label}");
        assert_eq!(names(store.as_ref(), "abl"), vec!["Table"], "{label}");
        assert!(names(store.as_ref(), "sofa").is_empty(), "{label}");
    }
}

#[test]
fn list_filter_treats_wildcards_literally() {
    for (label, store) in backends() {
        create(store.as_ref(), "100% cotton", "c");
        create(store.as_ref(), "Chair", "c");
        assert_eq!(names(store.as_ref(), "%"), vec!["100% cotton"], "{label}");
        assert!(names(store.as_ref(), "_").is_empty(), "{label}");
    }
}

// ══════════════════════════════════════════════════════════
//  update
// ══════════════════════════════════════════════════════════

#[test]
fn update_replaces_fields_and_keeps_id() {
    for (label, store) in backends() {
        let id = create(store.as_ref(), "Chair", "Wooden chair");
        let updated = item_update(
            store.as_ref(),
            ItemUpdateReq {
                id,
                name: "Stool".to_string(),
                description: "Metal stool".to_string(),
            },
        )
        .unwrap();
        assert_eq!(updated.id, id, "{label}");
        let fetched = item_get(store.as_ref(), id).unwrap();
        assert_eq!(fetched.name, "Stool", "{label}");
        assert_eq!(fetched.description, "Metal stool", "{label}");
    }
}

#[test]
fn update_may_change_case_of_own_name() {
    for (label, store) in backends() {
        let id = create(store.as_ref(), "chair", "c");
        let item = store.update(id, "Chair", "c").unwrap();
        assert_eq!(item.name, "Chair", "{label}");
    }
}

#[test]
fn update_onto_other_items_name_fails() {
    for (label, store) in backends() {
        create(store.as_ref(), "Chair", "c");
        let table = create(store.as_ref(), "Table", "t");
        let err = store.update(table, "CHAIR", "t2").unwrap_err();
        assert_eq!(err.code(), "DUPLICATE_NAME", "{label}");
        let unchanged = item_get(store.as_ref(), table).unwrap();
        assert_eq!(unchanged.name, "Table", "{label}");
        assert_eq!(unchanged.description, "t", "{label}");
    }
}

#[test]
fn update_missing_is_not_found_and_store_unchanged() {
    for (label, store) in backends() {
        create(store.as_ref(), "Chair", "c");
        let before = item_list(store.as_ref(), ItemListReq::default()).unwrap();
        let err = store.update(999, "Desk", "d").unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND", "{label}");
        let after = item_list(store.as_ref(), ItemListReq::default()).unwrap();
        assert_eq!(before, after, "{label}");
    }
}

// ══════════════════════════════════════════════════════════
//  delete
// ══════════════════════════════════════════════════════════

#[test]
fn delete_missing_is_not_found_and_store_unchanged() {
    for (label, store) in backends() {
        create(store.as_ref(), "Chair", "c");
        let err = item_delete(store.as_ref(), 999).unwrap_err();
        assert_eq!(err.code(), "NOT_FOUND", "{label}");
        assert_eq!(names(store.as_ref(), ""), vec!["Chair"], "{label}");
    }
}

#[test]
fn deleted_name_can_be_reused() {
    for (label, store) in backends() {
        let id = create(store.as_ref(), "Chair", "c");
        item_delete(store.as_ref(), id).unwrap();
        let again = create(store.as_ref(), "chair", "c2");
        assert_ne!(again, id, "{label}");
    }
}

// ══════════════════════════════════════════════════════════
//  end-to-end
// ══════════════════════════════════════════════════════════

#[test]
fn chair_lifecycle() {
    for (label, store) in backends() {
        let store = store.as_ref();
        let a = create(store, "Chair", "Wooden chair");
        assert_eq!(names(store, ""), vec!["Chair"], "{label}");

        assert!(store.create("chair", "dup").is_err(), "{label}");
        assert_eq!(names(store, "").len(), 1, "{label}");

        store.update(a, "Chair", "Metal chair").unwrap();
        assert_eq!(item_get(store, a).unwrap().description, "Metal chair", "{label}");

        item_delete(store, a).unwrap();
        assert!(names(store, "").is_empty(), "{label}");
        assert_eq!(item_get(store, a).unwrap_err().code(), "NOT_FOUND", "{label}");
    }
}
