use json_shop::{Cart, CartStore, Error, LineItem, NewCart};
use serde_json::json;
use tempfile::TempDir;

fn open(dir: &TempDir) -> CartStore {
    CartStore::open(dir.path().join("carts.json")).unwrap()
}

#[test]
fn new_cart_is_empty_with_id_one() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let cart = store.add_cart(NewCart::default()).unwrap();
    assert_eq!(
        cart,
        Cart {
            id: 1,
            products: vec![]
        }
    );
    assert_eq!(store.get_all_carts(), vec![cart]);
}

#[test]
fn caller_supplied_id_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let candidate: NewCart = serde_json::from_value(json!({ "id": 5 })).unwrap();
    let err = store.add_cart(candidate).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(store.is_empty());
    assert!(!store.path().exists());
}

#[test]
fn other_candidate_fields_are_ignored() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);

    let candidate: NewCart =
        serde_json::from_value(json!({ "products": [{ "id": 3, "quantity": 1 }] })).unwrap();
    let cart = store.add_cart(candidate).unwrap();
    assert!(cart.products.is_empty());
}

#[test]
fn cart_ids_never_fill_gaps() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("carts.json"),
        r#"[{"id": 1, "products": []}, {"id": 3, "products": []}]"#,
    )
    .unwrap();
    let store = open(&dir);
    assert_eq!(store.generate_cart_id().unwrap(), 4);
    assert_eq!(store.add_cart(NewCart::default()).unwrap().id, 4);
}

#[test]
fn lookup_accepts_text_ids() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();
    store.add_cart(NewCart::default()).unwrap();

    assert_eq!(store.get_cart_by_id(2_u64).unwrap().id, 2);
    assert_eq!(store.get_cart_by_id("2").unwrap().id, 2);
    let raw = String::from(" 1 ");
    assert_eq!(store.get_cart_by_id(&raw).unwrap().id, 1);

    assert_eq!(store.get_cart_by_id("0x2").unwrap().id, 2);
    assert_eq!(store.get_cart_by_id("2.0").unwrap().id, 2);

    let err = store.get_cart_by_id("abc").unwrap_err();
    assert_eq!(
        err,
        Error::NotFound {
            kind: "cart",
            id: "abc".into()
        }
    );
    assert!(store.get_cart_by_id(3_u64).unwrap_err().is_not_found());
}

#[test]
fn adding_same_product_twice_accumulates() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();

    store.add_product_to_cart(1_u64, 42, 2).unwrap();
    let cart = store.add_product_to_cart("1", 42, 3).unwrap();

    assert_eq!(cart.products, vec![LineItem { id: 42, quantity: 5 }]);
    assert_eq!(store.get_cart_by_id(1_u64).unwrap(), cart);
}

#[test]
fn distinct_products_keep_insertion_order() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();

    store.add_product_to_cart(1_u64, 7, 1).unwrap();
    store.add_product_to_cart(1_u64, 3, 4).unwrap();
    let cart = store.add_product_to_cart(1_u64, 7, 1).unwrap();

    assert_eq!(
        cart.products,
        vec![
            LineItem { id: 7, quantity: 2 },
            LineItem { id: 3, quantity: 4 },
        ]
    );
}

#[test]
fn product_ids_are_not_checked_against_a_catalog() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();
    assert!(store.add_product_to_cart(1_u64, 999_999, 1).is_ok());
}

#[test]
fn adding_to_missing_cart_is_not_found() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    let err = store.add_product_to_cart(9_u64, 1, 1).unwrap_err();
    assert!(err.is_not_found());
    assert!(!store.path().exists());
}

#[test]
fn zero_and_overflowing_quantities_are_rejected() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();

    assert!(matches!(
        store.add_product_to_cart(1_u64, 1, 0),
        Err(Error::Validation(_))
    ));
    store.add_product_to_cart(1_u64, 1, u32::MAX).unwrap();
    assert!(matches!(
        store.add_product_to_cart(1_u64, 1, 1),
        Err(Error::Validation(_))
    ));
    assert_eq!(
        store.get_cart_by_id(1_u64).unwrap().products,
        vec![LineItem {
            id: 1,
            quantity: u32::MAX
        }]
    );
}

#[test]
fn every_cart_is_persisted_after_a_line_item_change() {
    let dir = TempDir::new().unwrap();
    {
        let store = open(&dir);
        store.add_cart(NewCart::default()).unwrap();
        store.add_cart(NewCart::default()).unwrap();
        store.add_product_to_cart(2_u64, 5, 3).unwrap();
    }

    let raw = std::fs::read_to_string(dir.path().join("carts.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        json!([
            { "id": 1, "products": [] },
            { "id": 2, "products": [{ "id": 5, "quantity": 3 }] }
        ])
    );

    let reopened = open(&dir);
    assert_eq!(reopened.len(), 2);
    assert_eq!(
        reopened.get_cart_by_id(2_u64).unwrap().products,
        vec![LineItem { id: 5, quantity: 3 }]
    );
}

#[test]
fn save_carts_rewrites_a_removed_file() {
    let dir = TempDir::new().unwrap();
    let store = open(&dir);
    store.add_cart(NewCart::default()).unwrap();
    std::fs::remove_file(store.path()).unwrap();

    store.save_carts().unwrap();
    assert_eq!(open(&dir).get_all_carts(), store.get_all_carts());
}
