use json_shop::{NewCart, NewProduct, Shop};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), json_shop::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let dir = std::env::temp_dir().join("json_shop_example_builder");

    // custom file names, compact JSON
    let shop = Shop::builder(&dir)
        .products_file("catalog.json")
        .carts_file("baskets.json")
        .pretty(false)
        .build()?;

    let code = shop.products.generate_id()?.to_string();
    shop.products
        .add_product(NewProduct::new("Lamp", "Desk lamp", 30_u64, "lamp.png", code, 3_u64))?;
    shop.carts.add_cart(NewCart::default())?;

    let contents = std::fs::read_to_string(shop.products.path())?;
    println!("On-disk catalog:\n{contents}");
    println!("\nDebug output: {shop:?}");

    let _ = std::fs::remove_dir_all(&dir);
    Ok(())
}
