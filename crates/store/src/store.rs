//! Store traits for the three document collections.

use async_trait::async_trait;
use common::{OrderId, ProductId, UserId};
use domain::{Order, Product, User};

use crate::Result;

/// Persistence for order documents.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Inserts a new order document.
    async fn insert_order(&self, order: Order) -> Result<()>;

    /// Fetches an order by id, or `None` if it does not exist.
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Returns all orders owned by the given buyer, most recent first.
    async fn orders_for_buyer(&self, buyer: UserId) -> Result<Vec<Order>>;

    /// Replaces an existing order document.
    ///
    /// Fails with `StoreError::NotFound` if the order was never inserted.
    async fn update_order(&self, order: Order) -> Result<()>;
}

/// Persistence for user documents (cart and wishlist live embedded).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a new user document.
    async fn insert_user(&self, user: User) -> Result<()>;

    /// Fetches a user by id, or `None` if it does not exist.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Replaces an existing user document (whole-document write;
    /// concurrent cart mutations are last-write-wins).
    async fn update_user(&self, user: User) -> Result<()>;
}

/// Persistence for catalog products.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Inserts or replaces a product document.
    async fn upsert_product(&self, product: Product) -> Result<()>;

    /// Fetches a product by id, or `None` if it does not exist.
    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>>;

    /// Returns every product in the catalog.
    async fn list_products(&self) -> Result<Vec<Product>>;

    /// Deletes a product. Fails with `StoreError::NotFound` if absent.
    async fn delete_product(&self, id: &ProductId) -> Result<()>;
}

/// Umbrella trait for a backend that stores all three collections.
pub trait ResourceStore: OrderStore + UserStore + ProductStore {}

impl<T: OrderStore + UserStore + ProductStore> ResourceStore for T {}
