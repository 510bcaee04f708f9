//! Product catalog: record types and the [`ProductStore`].

use crate::collection::{next_id, Collection, Record};
use crate::error::{Error, Result};
use crate::loose;
use serde::{Deserialize, Serialize};
use serde_json::Number;
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// A product as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned, never taken from input.
    pub id: u64,
    /// Display name.
    pub title: String,
    /// Free-form description.
    pub description: String,
    /// Unit price, no currency attached.
    pub price: Number,
    /// Image path or URL.
    pub thumbnail: String,
    /// Caller-supplied, unique, numeric-valued. Stored exactly as given.
    pub code: ProductCode,
    /// Units available.
    pub stock: Number,
}

impl Record for Product {
    const KIND: &'static str = "product";

    fn id(&self) -> u64 {
        self.id
    }
}

/// A product code, kept in whichever JSON form the caller sent it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductCode {
    /// Sent as a JSON number.
    Number(Number),
    /// Sent as a JSON string.
    Text(String),
}

impl ProductCode {
    /// Strict comparison: text `"1"` and number `1` are different codes, but
    /// `1` and `1.0` are the same number.
    #[must_use]
    pub fn same_as(&self, other: &ProductCode) -> bool {
        match (self, other) {
            (ProductCode::Text(a), ProductCode::Text(b)) => a == b,
            (ProductCode::Number(a), ProductCode::Number(b)) => {
                a == b || matches!((a.as_f64(), b.as_f64()), (Some(x), Some(y)) if x == y)
            }
            _ => false,
        }
    }

    /// `true` if the code converts to a number.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        match self {
            ProductCode::Number(_) => true,
            ProductCode::Text(s) => loose::to_number(s).is_some(),
        }
    }

    fn is_blank(&self) -> bool {
        match self {
            ProductCode::Number(n) => is_zero(n),
            ProductCode::Text(s) => s.is_empty(),
        }
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductCode::Number(n) => write!(f, "{n}"),
            ProductCode::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ProductCode {
    fn from(s: &str) -> Self {
        ProductCode::Text(s.to_string())
    }
}

impl From<String> for ProductCode {
    fn from(s: String) -> Self {
        ProductCode::Text(s)
    }
}

impl From<u64> for ProductCode {
    fn from(n: u64) -> Self {
        ProductCode::Number(n.into())
    }
}

/// Candidate for [`ProductStore::add_product`]. Every field is required; any
/// `id` in the input is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewProduct {
    /// Display name.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Option<Number>,
    /// Image path or URL.
    pub thumbnail: Option<String>,
    /// Unique numeric-valued code.
    pub code: Option<ProductCode>,
    /// Units available.
    pub stock: Option<Number>,
}

impl NewProduct {
    /// Candidate with every field set.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        price: impl Into<Number>,
        thumbnail: impl Into<String>,
        code: impl Into<ProductCode>,
        stock: impl Into<Number>,
    ) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            price: Some(price.into()),
            thumbnail: Some(thumbnail.into()),
            code: Some(code.into()),
            stock: Some(stock.into()),
        }
    }
}

/// Partial update for [`ProductStore::update_product`]. Set fields replace the
/// stored ones; the id cannot be patched. Text fields and the code must not be
/// empty, but `price` and `stock` may be set to zero.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    /// Display name.
    pub title: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
    /// Unit price.
    pub price: Option<Number>,
    /// Image path or URL.
    pub thumbnail: Option<String>,
    /// Unique numeric-valued code.
    pub code: Option<ProductCode>,
    /// Units available.
    pub stock: Option<Number>,
}

impl ProductPatch {
    fn check(&self) -> Result<()> {
        let blank = [
            ("title", self.title.as_deref().is_some_and(str::is_empty)),
            ("description", self.description.as_deref().is_some_and(str::is_empty)),
            ("thumbnail", self.thumbnail.as_deref().is_some_and(str::is_empty)),
            ("code", self.code.as_ref().is_some_and(ProductCode::is_blank)),
        ];
        if let Some((field, _)) = blank.iter().find(|(_, b)| *b) {
            return Err(Error::Validation(format!("{field} must not be empty")));
        }
        Ok(())
    }

    fn apply(self, product: &mut Product) {
        if let Some(title) = self.title {
            product.title = title;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(thumbnail) = self.thumbnail {
            product.thumbnail = thumbnail;
        }
        if let Some(code) = self.code {
            product.code = code;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// Owns the product collection: validation, unique codes, id assignment and
/// persistence after every change.
#[derive(Debug)]
pub struct ProductStore {
    products: Collection<Product>,
}

impl ProductStore {
    /// Load the products at `path`. The returned store is ready for use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Collection::open(path)?))
    }

    /// Wrap an already loaded collection.
    pub fn new(products: Collection<Product>) -> Self {
        Self { products }
    }

    /// Path to the backing JSON file.
    pub fn path(&self) -> &Path {
        self.products.path()
    }

    /// Id the next added product would receive.
    pub fn generate_id(&self) -> Result<u64> {
        self.products.next_id()
    }

    /// Validate `candidate`, give it a fresh id, append it and persist.
    pub fn add_product(&self, candidate: NewProduct) -> Result<Product> {
        let NewProduct {
            title,
            description,
            price,
            thumbnail,
            code,
            stock,
        } = candidate;
        let (
            Some(title),
            Some(description),
            Some(price),
            Some(thumbnail),
            Some(code),
            Some(stock),
        ) = (
            title.filter(|s| !s.is_empty()),
            description.filter(|s| !s.is_empty()),
            price.filter(|n| !is_zero(n)),
            thumbnail.filter(|s| !s.is_empty()),
            code.filter(|c| !c.is_blank()),
            stock.filter(|n| !is_zero(n)),
        )
        else {
            debug!("rejected product with missing data");
            return Err(Error::Validation("missing data".into()));
        };

        self.products.mutate(|products| {
            ensure_unique_code(products, &code, None)?;
            ensure_numeric_code(&code)?;
            let product = Product {
                id: next_id(products.as_slice())?,
                title,
                description,
                price,
                thumbnail,
                code,
                stock,
            };
            products.push(product.clone());
            info!(id = product.id, code = %product.code, "product added");
            Ok(product)
        })
    }

    /// Every product, in insertion order.
    #[must_use]
    pub fn get_products(&self) -> Vec<Product> {
        self.products.snapshot()
    }

    /// The first `limit` products, or all of them when `limit` is `None`.
    #[must_use]
    pub fn list_products(&self, limit: Option<usize>) -> Vec<Product> {
        self.products.read(|products| {
            let n = limit.unwrap_or(products.len()).min(products.len());
            products[..n].to_vec()
        })
    }

    /// Product with exactly this id.
    pub fn get_product_by_id(&self, id: u64) -> Result<Product> {
        self.products
            .find(|p| p.id == id)
            .ok_or_else(|| Error::not_found(Product::KIND, id))
    }

    /// Merge `patch` onto the product with this id and persist. Returns the
    /// merged record.
    pub fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product> {
        self.products.mutate(|products| {
            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| Error::not_found(Product::KIND, id))?;
            patch.check()?;
            if let Some(code) = &patch.code {
                ensure_unique_code(products, code, Some(id))?;
                ensure_numeric_code(code)?;
            }
            patch.apply(&mut products[index]);
            info!(id, "product updated");
            Ok(products[index].clone())
        })
    }

    /// Remove the product with this id, keeping the order of the rest, and
    /// persist. Returns the removed record.
    pub fn delete_product(&self, id: u64) -> Result<Product> {
        self.products.mutate(|products| {
            let index = products
                .iter()
                .position(|p| p.id == id)
                .ok_or_else(|| Error::not_found(Product::KIND, id))?;
            let removed = products.remove(index);
            info!(id, "product deleted");
            Ok(removed)
        })
    }

    /// Write the current products to disk.
    pub fn save_products(&self) -> Result<()> {
        self.products.flush()
    }

    /// Number of products.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// `true` when there are no products.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn ensure_unique_code(products: &[Product], code: &ProductCode, except: Option<u64>) -> Result<()> {
    let taken = products
        .iter()
        .any(|p| Some(p.id) != except && p.code.same_as(code));
    if taken {
        debug!(code = %code, "rejected duplicate product code");
        return Err(Error::DuplicateCode(code.to_string()));
    }
    Ok(())
}

fn ensure_numeric_code(code: &ProductCode) -> Result<()> {
    if !code.is_numeric() {
        debug!(code = %code, "rejected non-numeric product code");
        return Err(Error::Validation("the code must be a number".into()));
    }
    Ok(())
}

fn is_zero(n: &Number) -> bool {
    n.as_f64() == Some(0.0)
}
