use customer_store::{AllergyInfo, Customer, CustomerStore};
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::TempDir;

fn data_path(dir: &TempDir) -> PathBuf {
    dir.path().join("customers.json")
}

fn on_disk(path: &std::path::Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

// ---- modify / reload --------------------------------------------------------

#[test]
fn modify_then_reload_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let written = vec![
        Customer::new(1, "Kim", 3).with_allergens(["peanut", "milk"]),
        Customer::new(2, "Lee", 0),
        Customer::new(3, "Park", 12).with_allergens(Vec::<String>::new()),
    ];
    {
        let store = CustomerStore::open(&path);
        for c in &written {
            store.modify_customer_info(c.clone());
        }
    }
    let store = CustomerStore::open(&path);
    assert_eq!(store.read_customer_info(), written);
}

#[test]
fn first_write_creates_missing_file_and_parents() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("customers.json");
    let store = CustomerStore::open(&path);
    assert!(store.is_empty());

    store.modify_customer_info(Customer::new(1, "Kim", 0));
    assert_eq!(on_disk(&path), json!([{"id": 1, "name": "Kim", "coupon": 0}]));
}

#[test]
fn same_record_twice_is_idempotent_on_disk_only() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);
    let kim = Customer::new(1, "Kim", 3).with_allergens(["egg"]);

    store.modify_customer_info(kim.clone());
    let after_first = std::fs::read(&path).unwrap();
    store.modify_customer_info(kim.clone());
    let after_second = std::fs::read(&path).unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(store.len(), 2);
    assert_eq!(store.read_customer_info(), vec![kim.clone(), kim]);
}

#[test]
fn last_write_wins_for_shared_id() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);

    store.modify_customer_info(Customer::new(1, "A", 0));
    store.modify_customer_info(Customer::new(1, "B", 5));

    assert_eq!(on_disk(&path), json!([{"id": 1, "name": "B", "coupon": 5}]));
    assert_eq!(store.get(1), Some(Customer::new(1, "B", 5)));
}

#[test]
fn shared_id_keeps_first_position() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);

    store.modify_customer_info(Customer::new(1, "A", 0));
    store.modify_customer_info(Customer::new(2, "B", 0));
    store.modify_customer_info(Customer::new(1, "A2", 1));

    let ids: Vec<i64> = store.persisted().iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(
        on_disk(&path),
        json!([
            {"id": 1, "name": "A2", "coupon": 1},
            {"id": 2, "name": "B", "coupon": 0}
        ])
    );
}

#[test]
fn none_allergy_info_removes_key() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);

    store.modify_customer_info(Customer::new(1, "Kim", 0).with_allergens(["shrimp"]));
    assert_eq!(on_disk(&path)[0]["allergyInfo"], json!({"allergens": ["shrimp"]}));

    store.modify_customer_info(Customer::new(1, "Kim", 0));
    assert!(on_disk(&path)[0].get("allergyInfo").is_none());
}

#[test]
fn empty_allergen_list_is_written_explicitly() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);

    store.modify_customer_info(Customer::new(4, "Choi", 1).with_allergens(Vec::<String>::new()));
    assert_eq!(on_disk(&path)[0]["allergyInfo"], json!({"allergens": []}));

    let reloaded = CustomerStore::open(&path);
    assert_eq!(
        reloaded.get(4).unwrap().allergy_info,
        Some(AllergyInfo::default())
    );
}

#[test]
fn duplicate_allergens_survive() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    CustomerStore::open(&path).modify_customer_info(
        Customer::new(1, "Kim", 0).with_allergens(["milk", "milk"]),
    );
    let reloaded = CustomerStore::open(&path);
    assert_eq!(
        reloaded.get(1).unwrap().allergy_info.unwrap().allergens,
        vec!["milk".to_string(), "milk".to_string()]
    );
}

#[test]
fn reload_collapses_duplicates_written_earlier() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    {
        let store = CustomerStore::open(&path);
        store.modify_customer_info(Customer::new(1, "A", 0));
        store.modify_customer_info(Customer::new(1, "B", 0));
        assert_eq!(store.len(), 2);
    }
    let store = CustomerStore::open(&path);
    assert_eq!(store.read_customer_info(), vec![Customer::new(1, "B", 0)]);
}

// ---- reads ------------------------------------------------------------------

#[test]
fn read_returns_independent_copy() {
    let dir = TempDir::new().unwrap();
    let store = CustomerStore::open(data_path(&dir));
    store.modify_customer_info(Customer::new(1, "Kim", 3));

    let mut copy = store.read_customer_info();
    copy[0].name = "changed".into();
    copy[0].coupon = 99;
    copy.push(Customer::new(2, "ghost", 0));
    copy.clear();

    assert_eq!(store.read_customer_info(), vec![Customer::new(1, "Kim", 3)]);
    assert_eq!(store.len(), 1);
}

#[test]
fn read_on_empty_store_is_empty() {
    let dir = TempDir::new().unwrap();
    let store = CustomerStore::open(data_path(&dir));
    assert!(store.read_customer_info().is_empty());
    assert!(store.persisted().is_empty());
    assert_eq!(store.get(1), None);
}

#[test]
fn read_keeps_file_order() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    std::fs::write(
        &path,
        r#"[{"id":9,"name":"z","coupon":0},{"id":1,"name":"a","coupon":0},{"id":5,"name":"m","coupon":0}]"#,
    )
    .unwrap();
    let ids: Vec<i64> = CustomerStore::open(&path)
        .read_customer_info()
        .iter()
        .map(|c| c.id)
        .collect();
    assert_eq!(ids, vec![9, 1, 5]);
}

#[test]
fn allergy_helpers() {
    let c = Customer::new(1, "Kim", 0).with_allergens(["peanut"]);
    assert!(c.is_allergic_to("peanut"));
    assert!(!c.is_allergic_to("milk"));
    assert!(!Customer::new(2, "Lee", 0).is_allergic_to("peanut"));
}

// ---- flush ------------------------------------------------------------------

#[test]
fn flush_rewrites_projection() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);
    store.modify_customer_info(Customer::new(1, "Kim", 0));

    std::fs::remove_file(&path).unwrap();
    store.flush().unwrap();
    assert_eq!(on_disk(&path), json!([{"id": 1, "name": "Kim", "coupon": 0}]));
}

#[test]
fn flush_on_empty_store_writes_empty_array() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    CustomerStore::open(&path).flush().unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

// ---- builder ----------------------------------------------------------------

#[test]
fn builder_pretty_json() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::builder(&path).pretty(true).build();
    store.modify_customer_info(Customer::new(1, "Kim", 0));

    let raw = std::fs::read_to_string(&path).unwrap();
    // pretty JSON has newlines and indentation
    assert!(raw.contains('\n'));
    assert!(raw.contains("  "));
}

#[test]
fn builder_compact_json_by_default() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);
    store.modify_customer_info(Customer::new(1, "Kim", 0).with_allergens(["a", "b"]));

    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(!raw.contains('\n'));
}

#[test]
fn builder_atomic_leaves_no_temp_file() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::builder(&path).atomic(true).build();
    store.modify_customer_info(Customer::new(1, "Kim", 0));
    store.modify_customer_info(Customer::new(2, "Lee", 1));

    assert!(!dir.path().join("customers.json.tmp").exists());
    assert_eq!(CustomerStore::open(&path).len(), 2);
}

// ---- debug ------------------------------------------------------------------

#[test]
fn debug_impls_dont_panic() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);

    let dbg_store = format!("{:?}", store);
    assert!(dbg_store.contains("CustomerStore"));
    assert!(dbg_store.contains("path"));

    let dbg_builder = format!("{:?}", CustomerStore::builder(&path));
    assert!(dbg_builder.contains("CustomerStoreBuilder"));
}

#[test]
fn path_accessor() {
    let dir = TempDir::new().unwrap();
    let path = data_path(&dir);
    let store = CustomerStore::open(&path);
    assert_eq!(store.path(), path.as_path());
}
