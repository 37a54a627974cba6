//! # Cart
//!
//! A cart maps melon ids to quantities. It lives in the user's session and is passed in and out of
//! these functions explicitly, never shared between requests.
//!
//! - `add_to_cart` increments a quantity, creating the entry at 1
//! - Entries are never removed or decremented, so every stored quantity is at least 1
//! - `build_cart_view` prices the cart against a catalog lookup and fails on the first unknown id
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{error::CatalogError, melon::Melon};

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<String, u32>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantity for `id`, 0 when absent.
    pub fn quantity(&self, id: &str) -> u32 {
        self.items.get(id).copied().unwrap_or(0)
    }

    /// Distinct melon ids.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of melons across all entries.
    pub fn item_count(&self) -> u64 {
        self.items.values().map(|&quantity| u64::from(quantity)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, &quantity)| (id.as_str(), quantity))
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    pub melon: &'a Melon,
    pub quantity: u32,
    pub line_total: Decimal,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CartView<'a> {
    pub line_items: Vec<LineItem<'a>>,
    pub order_total: Decimal,
}

/// Returns `cart` with one more of `id`. The id is not checked against the catalog.
pub fn add_to_cart(mut cart: Cart, id: &str) -> Cart {
    let quantity = cart.items.entry(id.to_string()).or_insert(0);
    *quantity = quantity.saturating_add(1);

    cart
}

/// Prices every entry of `cart`, in id order.
pub fn build_cart_view<'a, F>(cart: &Cart, lookup: F) -> Result<CartView<'a>, CatalogError>
where
    F: Fn(&str) -> Result<&'a Melon, CatalogError>,
{
    let mut line_items = Vec::with_capacity(cart.len());
    let mut order_total = Decimal::ZERO;

    for (id, quantity) in cart.iter() {
        let melon = lookup(id)?;
        let line_total = melon
            .price
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| CatalogError::TotalOverflow { id: id.to_string() })?;
        order_total = order_total
            .checked_add(line_total)
            .ok_or_else(|| CatalogError::TotalOverflow { id: id.to_string() })?;

        line_items.push(LineItem {
            melon,
            quantity,
            line_total,
        });
    }

    Ok(CartView {
        line_items,
        order_total,
    })
}
