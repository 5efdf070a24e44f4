//! Cart service: read-modify-write against the owning user document.
//!
//! Cart contents are live references, not snapshots. Every response is
//! re-expanded against the catalog so it reflects current product name,
//! price, and image — the deliberate contrast with order line items.

use common::{ProductId, UserId};
use domain::{Product, User};
use serde::Serialize;
use store::{ProductStore, UserStore};

use crate::error::{Result, WorkflowError};

/// A cart entry expanded with current catalog data.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemView {
    pub id: ProductId,
    pub product: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: u32,
}

impl CartItemView {
    fn from_product(product: Product, quantity: u32) -> Self {
        Self {
            id: product.id.clone(),
            product: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            kind: product.kind,
            quantity,
        }
    }
}

/// Cart operations over the user and product stores.
///
/// Mutations are whole-document read-modify-write with no optimistic
/// concurrency control; concurrent mutations for the same user are
/// last-write-wins.
pub struct CartService<S> {
    store: S,
}

impl<S: UserStore + ProductStore> CartService<S> {
    /// Creates a new cart service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load_user(&self, user_id: UserId) -> Result<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(WorkflowError::UserNotFound(user_id))
    }

    /// Expands cart entries against the catalog. Entries whose product
    /// has been deleted are silently dropped from the view.
    async fn expand(&self, user: &User) -> Result<Vec<CartItemView>> {
        let mut items = Vec::with_capacity(user.cart.len());
        for entry in &user.cart {
            if let Some(product) = self.store.get_product(&entry.product).await? {
                items.push(CartItemView::from_product(product, entry.quantity));
            }
        }
        Ok(items)
    }

    /// Returns the user's cart, expanded.
    pub async fn get_cart(&self, user_id: UserId) -> Result<Vec<CartItemView>> {
        let user = self.load_user(user_id).await?;
        self.expand(&user).await
    }

    /// Adds a product to the cart. Idempotent: adding an already-present
    /// product leaves the existing entry untouched.
    #[tracing::instrument(skip(self))]
    pub async fn add_item(&self, user_id: UserId, product_id: ProductId) -> Result<Vec<CartItemView>> {
        if self.store.get_product(&product_id).await?.is_none() {
            return Err(WorkflowError::ProductNotFound(product_id));
        }

        let mut user = self.load_user(user_id).await?;
        user.add_to_cart(product_id);
        self.store.update_user(user.clone()).await?;
        self.expand(&user).await
    }

    /// Removes the entry for a product, if present.
    #[tracing::instrument(skip(self))]
    pub async fn remove_item(
        &self,
        user_id: UserId,
        product_id: ProductId,
    ) -> Result<Vec<CartItemView>> {
        let mut user = self.load_user(user_id).await?;
        user.remove_from_cart(&product_id);
        self.store.update_user(user.clone()).await?;
        self.expand(&user).await
    }

    /// Overwrites the quantity for an existing entry; no-op if absent.
    #[tracing::instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItemView>> {
        let mut user = self.load_user(user_id).await?;
        user.set_cart_quantity(&product_id, quantity);
        self.store.update_user(user.clone()).await?;
        self.expand(&user).await
    }

    /// Empties the cart (explicit clear or checkout-complete).
    #[tracing::instrument(skip(self))]
    pub async fn clear(&self, user_id: UserId) -> Result<Vec<CartItemView>> {
        let mut user = self.load_user(user_id).await?;
        user.clear_cart();
        self.store.update_user(user).await?;
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::Role;
    use store::InMemoryStore;

    async fn setup() -> (CartService<InMemoryStore>, InMemoryStore, UserId) {
        let store = InMemoryStore::new();
        let user = User::new("a@example.com", Role::User);
        let user_id = user.id;
        store.insert_user(user).await.unwrap();
        store
            .upsert_product(Product::new("P1", "Bangle", "jewellery", 100.0))
            .await
            .unwrap();
        store
            .upsert_product(Product::new("P2", "Ring", "jewellery", 50.0))
            .await
            .unwrap();
        (CartService::new(store.clone()), store, user_id)
    }

    #[tokio::test]
    async fn add_item_is_idempotent() {
        let (cart, _, user_id) = setup().await;

        let first = cart.add_item(user_id, ProductId::new("P1")).await.unwrap();
        let second = cart.add_item(user_id, ProductId::new("P1")).await.unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].quantity, 1);
    }

    #[tokio::test]
    async fn add_unknown_product_is_rejected() {
        let (cart, _, user_id) = setup().await;
        let result = cart.add_item(user_id, ProductId::new("missing")).await;
        assert!(matches!(result, Err(WorkflowError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn cart_reflects_current_product_price() {
        let (cart, store, user_id) = setup().await;
        cart.add_item(user_id, ProductId::new("P1")).await.unwrap();

        // A later catalog edit shows through on the next read.
        store
            .upsert_product(Product::new("P1", "Bangle", "jewellery", 120.0))
            .await
            .unwrap();

        let items = cart.get_cart(user_id).await.unwrap();
        assert_eq!(items[0].price, 120.0);
    }

    #[tokio::test]
    async fn set_quantity_and_remove() {
        let (cart, _, user_id) = setup().await;
        cart.add_item(user_id, ProductId::new("P1")).await.unwrap();
        cart.add_item(user_id, ProductId::new("P2")).await.unwrap();

        let items = cart
            .set_quantity(user_id, ProductId::new("P1"), 4)
            .await
            .unwrap();
        let p1 = items.iter().find(|i| i.id.as_str() == "P1").unwrap();
        assert_eq!(p1.quantity, 4);

        // Absent product: no-op, not an error.
        let items = cart
            .set_quantity(user_id, ProductId::new("P9"), 2)
            .await
            .unwrap();
        assert_eq!(items.len(), 2);

        let items = cart
            .remove_item(user_id, ProductId::new("P1"))
            .await
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id.as_str(), "P2");
    }

    #[tokio::test]
    async fn clear_empties_the_cart() {
        let (cart, _, user_id) = setup().await;
        cart.add_item(user_id, ProductId::new("P1")).await.unwrap();

        let items = cart.clear(user_id).await.unwrap();
        assert!(items.is_empty());
        assert!(cart.get_cart(user_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn deleted_product_drops_out_of_view() {
        let (cart, store, user_id) = setup().await;
        cart.add_item(user_id, ProductId::new("P1")).await.unwrap();
        store.delete_product(&ProductId::new("P1")).await.unwrap();

        let items = cart.get_cart(user_id).await.unwrap();
        assert!(items.is_empty());
    }
}
