//! JSON-file-backed product catalog and shopping cart stores.
//!
//! Each collection lives in one JSON array on disk and is mirrored in memory.
//! Opening a store loads it exactly once; every mutation is validated, written
//! to disk (atomic temp-file + rename), and only then becomes visible.
//!
//! ```rust,no_run
//! use json_shop::{NewCart, NewProduct, Shop};
//!
//! let shop = Shop::open("data").unwrap();
//! let product = shop
//!     .products
//!     .add_product(NewProduct::new("Mug", "Ceramic mug", 12_u64, "mug.png", "1001", 40_u64))
//!     .unwrap();
//! let cart = shop.carts.add_cart(NewCart::default()).unwrap();
//! shop.carts.add_product_to_cart(cart.id, product.id, 2).unwrap();
//! ```
//!
//! **Single-process only.** Mutations on one store are serialized within the
//! process; nothing coordinates separate processes writing the same files.

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod cart;
pub mod collection;
pub mod document;
pub mod error;
mod loose;
pub mod product;
pub mod serializer;
pub mod shop;

pub use cart::{Cart, CartRef, CartStore, LineItem, NewCart, DEFAULT_QUANTITY};
pub use collection::{Collection, CollectionBuilder, Record};
pub use document::DocumentStore;
pub use error::{Error, Result};
pub use product::{NewProduct, Product, ProductCode, ProductPatch, ProductStore};
pub use shop::{Shop, ShopBuilder};
