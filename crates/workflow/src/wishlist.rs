//! Wishlist service: same read-modify-write shape as the cart, without
//! quantities.

use common::{ProductId, UserId};
use domain::{Product, User};
use store::{ProductStore, UserStore};

use crate::error::{Result, WorkflowError};

/// Wishlist operations over the user and product stores.
pub struct WishlistService<S> {
    store: S,
}

impl<S: UserStore + ProductStore> WishlistService<S> {
    /// Creates a new wishlist service.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    async fn load_user(&self, user_id: UserId) -> Result<User> {
        self.store
            .get_user(user_id)
            .await?
            .ok_or(WorkflowError::UserNotFound(user_id))
    }

    async fn expand(&self, user: &User) -> Result<Vec<Product>> {
        let mut products = Vec::with_capacity(user.wishlist.len());
        for id in &user.wishlist {
            if let Some(product) = self.store.get_product(id).await? {
                products.push(product);
            }
        }
        Ok(products)
    }

    /// Returns the user's wishlist, expanded to full products.
    pub async fn get_wishlist(&self, user_id: UserId) -> Result<Vec<Product>> {
        let user = self.load_user(user_id).await?;
        self.expand(&user).await
    }

    /// Adds a product to the wishlist (idempotent).
    #[tracing::instrument(skip(self))]
    pub async fn add(&self, user_id: UserId, product_id: ProductId) -> Result<Vec<Product>> {
        if self.store.get_product(&product_id).await?.is_none() {
            return Err(WorkflowError::ProductNotFound(product_id));
        }

        let mut user = self.load_user(user_id).await?;
        user.add_to_wishlist(product_id);
        self.store.update_user(user.clone()).await?;
        self.expand(&user).await
    }

    /// Removes a product from the wishlist, if present.
    #[tracing::instrument(skip(self))]
    pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> Result<Vec<Product>> {
        let mut user = self.load_user(user_id).await?;
        user.remove_from_wishlist(&product_id);
        self.store.update_user(user.clone()).await?;
        self.expand(&user).await
    }
}
