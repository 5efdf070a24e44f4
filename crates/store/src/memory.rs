use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use common::{OrderId, ProductId, UserId};
use domain::{Order, Product, User};
use tokio::sync::RwLock;

use crate::{OrderStore, ProductStore, Result, StoreError, UserStore};

/// In-memory resource store.
///
/// Provides the same interface a document-database-backed implementation
/// would, with per-document atomicity and nothing more. Cloning shares
/// the underlying collections.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
    users: Arc<RwLock<HashMap<UserId, User>>>,
    products: Arc<RwLock<HashMap<ProductId, Product>>>,
    fail_writes: Arc<AtomicBool>,
}

impl InMemoryStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures every subsequent write to fail, for exercising
    /// persistence-failure paths in tests.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Returns the number of stored orders.
    pub async fn order_count(&self) -> usize {
        self.orders.read().await.len()
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("write failure injected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert_order(&self, order: Order) -> Result<()> {
        self.check_writable()?;
        self.orders.write().await.insert(order.id, order);
        Ok(())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn orders_for_buyer(&self, buyer: UserId) -> Result<Vec<Order>> {
        let orders = self.orders.read().await;
        let mut result: Vec<Order> = orders
            .values()
            .filter(|o| o.buyer == buyer)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn update_order(&self, order: Order) -> Result<()> {
        self.check_writable()?;
        let mut orders = self.orders.write().await;
        if !orders.contains_key(&order.id) {
            return Err(StoreError::NotFound {
                kind: "order",
                id: order.id.to_string(),
            });
        }
        orders.insert(order.id, order);
        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        self.check_writable()?;
        self.users.write().await.insert(user.id, user);
        Ok(())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn update_user(&self, user: User) -> Result<()> {
        self.check_writable()?;
        let mut users = self.users.write().await;
        if !users.contains_key(&user.id) {
            return Err(StoreError::NotFound {
                kind: "user",
                id: user.id.to_string(),
            });
        }
        users.insert(user.id, user);
        Ok(())
    }
}

#[async_trait]
impl ProductStore for InMemoryStore {
    async fn upsert_product(&self, product: Product) -> Result<()> {
        self.check_writable()?;
        self.products
            .write()
            .await
            .insert(product.id.clone(), product);
        Ok(())
    }

    async fn get_product(&self, id: &ProductId) -> Result<Option<Product>> {
        Ok(self.products.read().await.get(id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(result)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<()> {
        self.check_writable()?;
        let mut products = self.products.write().await;
        if products.remove(id).is_none() {
            return Err(StoreError::NotFound {
                kind: "product",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{LineItem, Role, ShippingInfo};

    fn sample_order(buyer: UserId) -> Order {
        Order::place(
            buyer,
            vec![LineItem::new("P1", "Bangle", 2, 100.0)],
            ShippingInfo {
                address: "1 Main St".to_string(),
                city: None,
                pincode: None,
                phone: None,
            },
            200.0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_and_get_order() {
        let store = InMemoryStore::new();
        let buyer = UserId::new();
        let order = sample_order(buyer);
        let id = order.id;

        store.insert_order(order).await.unwrap();

        let loaded = store.get_order(id).await.unwrap().unwrap();
        assert_eq!(loaded.buyer, buyer);
        assert_eq!(store.order_count().await, 1);
    }

    #[tokio::test]
    async fn orders_for_buyer_newest_first() {
        let store = InMemoryStore::new();
        let buyer = UserId::new();

        let mut first = sample_order(buyer);
        let mut second = sample_order(buyer);
        // Force distinct, ordered timestamps.
        first.created_at = chrono::Utc::now() - chrono::Duration::seconds(10);
        second.created_at = chrono::Utc::now();
        let second_id = second.id;

        store.insert_order(first).await.unwrap();
        store.insert_order(second).await.unwrap();
        store.insert_order(sample_order(UserId::new())).await.unwrap();

        let orders = store.orders_for_buyer(buyer).await.unwrap();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].id, second_id);
    }

    #[tokio::test]
    async fn update_missing_order_fails() {
        let store = InMemoryStore::new();
        let order = sample_order(UserId::new());
        let result = store.update_order(order).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }

    #[tokio::test]
    async fn injected_write_failure() {
        let store = InMemoryStore::new();
        store.set_fail_writes(true);

        let result = store.insert_order(sample_order(UserId::new())).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert_eq!(store.order_count().await, 0);
    }

    #[tokio::test]
    async fn user_document_roundtrip() {
        let store = InMemoryStore::new();
        let mut user = User::new("a@example.com", Role::User);
        let id = user.id;
        store.insert_user(user.clone()).await.unwrap();

        user.add_to_cart(ProductId::new("P1"));
        store.update_user(user).await.unwrap();

        let loaded = store.get_user(id).await.unwrap().unwrap();
        assert_eq!(loaded.cart.len(), 1);
    }

    #[tokio::test]
    async fn product_upsert_list_delete() {
        let store = InMemoryStore::new();
        let product = Product::new("P1", "Bangle", "jewellery", 100.0);
        store.upsert_product(product.clone()).await.unwrap();
        store
            .upsert_product(Product::new("P2", "Ring", "jewellery", 50.0))
            .await
            .unwrap();

        assert_eq!(store.list_products().await.unwrap().len(), 2);
        assert!(store.get_product(&product.id).await.unwrap().is_some());

        store.delete_product(&product.id).await.unwrap();
        assert!(store.get_product(&product.id).await.unwrap().is_none());

        let result = store.delete_product(&ProductId::new("missing")).await;
        assert!(matches!(result, Err(StoreError::NotFound { .. })));
    }
}
