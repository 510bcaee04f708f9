use json_shop::{CartStore, NewCart, DEFAULT_QUANTITY};
use std::sync::Arc;
use std::thread;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), json_shop::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::temp_dir().join("json_shop_example_carts.json");
    let _ = std::fs::remove_file(&path);
    let carts = Arc::new(CartStore::open(&path)?);

    let id = carts.add_cart(NewCart::default())?.id;

    // writers on one store are serialized, so no increment is lost
    let workers: Vec<_> = (0..4)
        .map(|_| {
            let carts = Arc::clone(&carts);
            thread::spawn(move || {
                for _ in 0..5 {
                    carts.add_product_to_cart(id, 1, DEFAULT_QUANTITY)?;
                }
                Ok::<_, json_shop::Error>(())
            })
        })
        .collect();
    for w in workers {
        w.join().expect("worker panicked")?;
    }

    // route parameters arrive as text
    let cart_id = id.to_string();
    carts.add_product_to_cart(cart_id.as_str(), 2, 3)?;
    println!("cart = {:?}", carts.get_cart_by_id(cart_id.as_str())?);
    println!("all  = {:?}", carts.get_all_carts());

    let _ = std::fs::remove_file(&path);
    Ok(())
}
