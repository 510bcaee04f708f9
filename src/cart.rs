//! Shopping carts: record types and the [`CartStore`].

use crate::collection::{next_id, Collection, Record};
use crate::error::{Error, Result};
use crate::loose;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::{debug, info};

/// Quantity a transport should use when the caller does not send one.
pub const DEFAULT_QUANTITY: u32 = 1;

/// A cart as stored on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    /// Store-assigned, never taken from input.
    pub id: u64,
    /// Line items in the order they were first added. At most one per product.
    pub products: Vec<LineItem>,
}

impl Record for Cart {
    const KIND: &'static str = "cart";

    fn id(&self) -> u64 {
        self.id
    }
}

/// One product in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product id. Not checked against the product catalog.
    pub id: u64,
    /// Units of the product in this cart.
    pub quantity: u32,
}

/// Candidate for [`CartStore::add_cart`]. A cart always starts empty; the only
/// thing looked at is whether the caller tried to pick its id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCart {
    /// Must be absent (or null).
    pub id: Option<serde_json::Value>,
}

/// A cart id as it reaches the store, either already numeric or still text
/// from a route parameter. Text is trimmed and compared by numeric value, so
/// `"5"`, `" 5 "`, `"5.0"` and `"0x5"` all name cart 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartRef<'a> {
    /// Numeric id.
    Id(u64),
    /// Raw text id.
    Text(&'a str),
}

impl CartRef<'_> {
    /// `true` if this reference names the cart with `id`.
    #[must_use]
    pub fn matches(&self, id: u64) -> bool {
        match *self {
            CartRef::Id(n) => n == id,
            CartRef::Text(raw) => {
                let s = raw.trim();
                if let Ok(n) = s.parse::<u64>() {
                    return n == id;
                }
                loose::to_number(s) == Some(id as f64)
            }
        }
    }
}

impl fmt::Display for CartRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CartRef::Id(n) => write!(f, "{n}"),
            CartRef::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for CartRef<'_> {
    fn from(id: u64) -> Self {
        CartRef::Id(id)
    }
}

impl<'a> From<&'a str> for CartRef<'a> {
    fn from(s: &'a str) -> Self {
        CartRef::Text(s)
    }
}

impl<'a> From<&'a String> for CartRef<'a> {
    fn from(s: &'a String) -> Self {
        CartRef::Text(s)
    }
}

/// Owns the cart collection: id assignment, line-item accumulation and
/// persistence after every change.
#[derive(Debug)]
pub struct CartStore {
    carts: Collection<Cart>,
}

impl CartStore {
    /// Load the carts at `path`. The returned store is ready for use.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(Collection::open(path)?))
    }

    /// Wrap an already loaded collection.
    pub fn new(carts: Collection<Cart>) -> Self {
        Self { carts }
    }

    /// Path to the backing JSON file.
    pub fn path(&self) -> &Path {
        self.carts.path()
    }

    /// Id the next created cart would receive.
    pub fn generate_cart_id(&self) -> Result<u64> {
        self.carts.next_id()
    }

    /// Create an empty cart with a fresh id and persist. Fails if the
    /// candidate carries an id of its own.
    pub fn add_cart(&self, candidate: NewCart) -> Result<Cart> {
        if candidate.id.is_some() {
            debug!("rejected cart with caller-supplied id");
            return Err(Error::Validation("cannot manually specify the 'id' field".into()));
        }
        self.carts.mutate(|carts| {
            let cart = Cart {
                id: next_id(carts.as_slice())?,
                products: Vec::new(),
            };
            carts.push(cart.clone());
            info!(id = cart.id, "cart added");
            Ok(cart)
        })
    }

    /// Cart named by `id`, compared loosely.
    pub fn get_cart_by_id<'a>(&self, id: impl Into<CartRef<'a>>) -> Result<Cart> {
        let id = id.into();
        self.carts
            .find(|c| id.matches(c.id))
            .ok_or_else(|| Error::not_found(Cart::KIND, id))
    }

    /// Every cart, in creation order.
    #[must_use]
    pub fn get_all_carts(&self) -> Vec<Cart> {
        self.carts.snapshot()
    }

    /// Add `quantity` of `product_id` to the cart, merging with an existing
    /// line item for the same product, then persist every cart. Returns the
    /// updated cart.
    pub fn add_product_to_cart<'a>(
        &self,
        cart_id: impl Into<CartRef<'a>>,
        product_id: u64,
        quantity: u32,
    ) -> Result<Cart> {
        let cart_id = cart_id.into();
        self.carts.mutate(|carts| {
            let cart = carts
                .iter_mut()
                .find(|c| cart_id.matches(c.id))
                .ok_or_else(|| Error::not_found(Cart::KIND, cart_id))?;
            if quantity == 0 {
                return Err(Error::Validation("quantity must be at least 1".into()));
            }
            match cart.products.iter_mut().find(|item| item.id == product_id) {
                Some(item) => {
                    item.quantity = item.quantity.checked_add(quantity).ok_or_else(|| {
                        Error::Validation(format!("quantity for product {product_id} overflows"))
                    })?;
                }
                None => cart.products.push(LineItem {
                    id: product_id,
                    quantity,
                }),
            }
            info!(cart = cart.id, product = product_id, quantity, "product added to cart");
            Ok(cart.clone())
        })
    }

    /// Write the current carts to disk.
    pub fn save_carts(&self) -> Result<()> {
        self.carts.flush()
    }

    /// Number of carts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.carts.len()
    }

    /// `true` when there are no carts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }
}
