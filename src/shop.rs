//! Wires both stores to one data directory.

use crate::cart::{Cart, CartStore};
use crate::collection::Collection;
use crate::error::{Error, Result};
use crate::product::{Product, ProductStore};
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name for the product collection.
pub const PRODUCTS_FILE: &str = "products.json";
/// Default file name for the cart collection.
pub const CARTS_FILE: &str = "carts.json";

/// Both stores, loaded and ready.
///
/// Build one before serving any request; once you hold a `Shop`, every load
/// has finished. The two stores are independent: they share no lock and no
/// transaction. Wrap in an `Arc` to share across threads.
#[derive(Debug)]
pub struct Shop {
    /// Product catalog.
    pub products: ProductStore,
    /// Shopping carts.
    pub carts: CartStore,
}

impl Shop {
    /// Open `products.json` and `carts.json` under `dir`, creating `dir` if
    /// needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder(dir).build()
    }

    /// Start configuring a shop rooted at `dir`.
    pub fn builder(dir: impl AsRef<Path>) -> ShopBuilder {
        ShopBuilder::new(dir)
    }
}

/// Configures and opens a [`Shop`].
///
/// ```rust,no_run
/// use json_shop::Shop;
///
/// let shop = Shop::builder("data")
///     .products_file("catalog.json")
///     .pretty(false)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ShopBuilder {
    dir: PathBuf,
    products_file: String,
    carts_file: String,
    pretty: bool,
}

impl ShopBuilder {
    fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            products_file: PRODUCTS_FILE.to_string(),
            carts_file: CARTS_FILE.to_string(),
            pretty: true,
        }
    }

    /// File name for products inside the data directory.
    pub fn products_file(mut self, name: impl Into<String>) -> Self {
        self.products_file = name.into();
        self
    }

    /// File name for carts inside the data directory.
    pub fn carts_file(mut self, name: impl Into<String>) -> Self {
        self.carts_file = name.into();
        self
    }

    /// Write indented JSON (default: `true`).
    pub fn pretty(mut self, yes: bool) -> Self {
        self.pretty = yes;
        self
    }

    /// Create the data directory if missing and load both collections.
    pub fn build(self) -> Result<Shop> {
        if self.products_file.is_empty() || self.carts_file.is_empty() {
            return Err(Error::Config("collection file names must not be empty".into()));
        }
        if self.products_file == self.carts_file {
            return Err(Error::Config(format!(
                "products and carts cannot share the file {}",
                self.products_file
            )));
        }
        if !self.dir.as_os_str().is_empty() {
            std::fs::create_dir_all(&self.dir)?;
        }

        let products = Collection::<Product>::builder(self.dir.join(&self.products_file))
            .pretty(self.pretty)
            .build()?;
        let carts = Collection::<Cart>::builder(self.dir.join(&self.carts_file))
            .pretty(self.pretty)
            .build()?;
        info!(dir = %self.dir.display(), "shop ready");

        Ok(Shop {
            products: ProductStore::new(products),
            carts: CartStore::new(carts),
        })
    }
}
