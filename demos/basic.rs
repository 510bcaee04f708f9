use json_shop::{NewProduct, ProductPatch, ProductStore};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), json_shop::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::temp_dir().join("json_shop_example_basic.json");
    let _ = std::fs::remove_file(&path);
    let products = ProductStore::open(&path)?;

    // add / get
    let mug = NewProduct::new("Mug", "Ceramic mug", 12_u64, "mug.png", "1001", 40_u64);
    products.add_product(mug)?;
    let tea = NewProduct::new("Tea", "Green tea", 7_u64, "tea.png", "1002", 120_u64);
    products.add_product(tea)?;
    println!("product 1 = {:?}", products.get_product_by_id(1)?);

    // duplicate codes are refused
    let copy = NewProduct::new("Mug 2", "Copy", 12_u64, "mug.png", "1001", 1_u64);
    if let Err(e) = products.add_product(copy) {
        println!("rejected: {e}");
    }

    // partial update
    products.update_product(
        1,
        ProductPatch {
            stock: Some(39_u64.into()),
            ..Default::default()
        },
    )?;
    println!("product 1 after update = {:?}", products.get_product_by_id(1)?);

    // delete, then list with a limit
    products.delete_product(2)?;
    println!("first 10 = {:?}", products.list_products(Some(10)));
    println!("next id  = {}", products.generate_id()?);

    let _ = std::fs::remove_file(&path);
    Ok(())
}
