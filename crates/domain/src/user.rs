//! User entity with embedded cart and wishlist.

use chrono::{DateTime, Utc};
use common::{ProductId, UserId};
use serde::{Deserialize, Serialize};

/// Role attached to a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Returns true for admin accounts.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// One cart line: a live product reference plus a quantity.
///
/// Unlike order line items this is not a snapshot; product data is
/// re-expanded from the catalog on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product: ProductId,
    pub quantity: u32,
}

impl CartEntry {
    /// Creates a cart entry with the default quantity of 1.
    pub fn new(product: impl Into<ProductId>) -> Self {
        Self {
            product: product.into(),
            quantity: 1,
        }
    }
}

/// A user document; cart and wishlist live embedded in it and are
/// mutated whole (read-modify-write, last-write-wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub cart: Vec<CartEntry>,
    #[serde(default)]
    pub wishlist: Vec<ProductId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new user with an empty cart and wishlist.
    pub fn new(email: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            email: email.into(),
            role,
            cart: Vec::new(),
            wishlist: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Adds a product to the cart if not already present (idempotent,
    /// first-write-wins on quantity).
    pub fn add_to_cart(&mut self, product: ProductId) {
        if !self.cart.iter().any(|entry| entry.product == product) {
            self.cart.push(CartEntry::new(product));
            self.updated_at = Utc::now();
        }
    }

    /// Removes the entry for the given product, if present.
    pub fn remove_from_cart(&mut self, product: &ProductId) {
        self.cart.retain(|entry| &entry.product != product);
        self.updated_at = Utc::now();
    }

    /// Overwrites the quantity for an existing entry; no-op if absent.
    pub fn set_cart_quantity(&mut self, product: &ProductId, quantity: u32) {
        if let Some(entry) = self.cart.iter_mut().find(|e| &e.product == product) {
            entry.quantity = quantity;
            self.updated_at = Utc::now();
        }
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.updated_at = Utc::now();
    }

    /// Adds a product to the wishlist if not already present.
    pub fn add_to_wishlist(&mut self, product: ProductId) {
        if !self.wishlist.contains(&product) {
            self.wishlist.push(product);
            self.updated_at = Utc::now();
        }
    }

    /// Removes a product from the wishlist, if present.
    pub fn remove_from_wishlist(&mut self, product: &ProductId) {
        self.wishlist.retain(|id| id != product);
        self.updated_at = Utc::now();
    }
}
