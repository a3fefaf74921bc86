use crate::domain::order::{LineItem, NewOrder, Order, Timestamp};
use crate::domain::ports::OrderRepositoryBox;
use crate::error::{PosError, Result};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Number given to the first order of an empty store.
pub const DEFAULT_BASE_ORDER_NUMBER: u64 = 1001;

/// The order store: the single access point to the persisted order collection.
///
/// `OrderService` owns the storage backend and serializes every write through an
/// internal mutex, so load / number / append / save in `record_order` is one
/// critical section and concurrent callers never observe the same "current max".
/// Share it between tasks behind an `Arc`.
///
/// No counter is kept: the next number is always derived from the stored orders.
pub struct OrderService {
    repository: OrderRepositoryBox,
    base_order_number: u64,
    write_lock: Mutex<()>,
}

impl OrderService {
    /// Creates a new `OrderService` numbering from [`DEFAULT_BASE_ORDER_NUMBER`].
    ///
    /// # Arguments
    ///
    /// * `repository` - The backend holding the order collection.
    pub fn new(repository: OrderRepositoryBox) -> Self {
        Self::with_base_order_number(repository, DEFAULT_BASE_ORDER_NUMBER)
    }

    /// Creates a new `OrderService` whose first order gets `base_order_number`.
    pub fn with_base_order_number(repository: OrderRepositoryBox, base_order_number: u64) -> Self {
        Self {
            repository,
            base_order_number,
            write_lock: Mutex::new(()),
        }
    }

    pub fn base_order_number(&self) -> u64 {
        self.base_order_number
    }

    /// Returns every stored order, oldest first.
    pub async fn load_all(&self) -> Result<Vec<Order>> {
        self.repository.load().await
    }

    /// Computes the number the next recorded order will receive.
    ///
    /// This is a snapshot; only `record_order` actually reserves a number.
    pub async fn next_order_number(&self) -> Result<u64> {
        let orders = self.repository.load().await?;
        next_number(&orders, self.base_order_number)
    }

    /// Records a paid order built from its parts. See [`OrderService::record`].
    pub async fn record_order(
        &self,
        items: Vec<LineItem>,
        total: Decimal,
        payment_method: impl Into<String>,
    ) -> Result<Order> {
        self.record(NewOrder::new(items, total, payment_method)).await
    }

    /// Validates `new_order`, assigns it the next number, stamps it as paid now,
    /// and appends it to the stored collection.
    ///
    /// Invalid submissions are rejected before storage is touched.
    pub async fn record(&self, new_order: NewOrder) -> Result<Order> {
        if let Err(e) = new_order.validate() {
            warn!(error = %e, "Rejected order submission");
            return Err(e);
        }

        let _guard = self.write_lock.lock().await;

        let mut orders = self.repository.load().await?;
        let order_number = next_number(&orders, self.base_order_number)?;
        let order = Order::paid(order_number, new_order, Timestamp::now());
        orders.push(order.clone());
        self.repository.save(&orders).await?;

        info!(
            order_number,
            total = %order.total,
            items = order.items.len(),
            payment_method = %order.payment_method,
            "Order recorded"
        );
        Ok(order)
    }

    /// Returns all orders, most recent first when `newest_first` is set.
    pub async fn list_orders(&self, newest_first: bool) -> Result<Vec<Order>> {
        let mut orders = self.repository.load().await?;
        if newest_first {
            orders.reverse();
        }
        Ok(orders)
    }

    /// Wipes the whole history. Numbering restarts from the base afterwards.
    pub async fn clear_orders(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.repository.save(&[]).await?;
        info!("Order history cleared");
        Ok(())
    }
}

// Max-based rather than last-based, so out-of-order entries never cause reuse.
fn next_number(orders: &[Order], base_order_number: u64) -> Result<u64> {
    match orders.iter().map(|order| order.order_number).max() {
        None => Ok(base_order_number),
        Some(max) => max.checked_add(1).ok_or_else(|| {
            PosError::ValidationError("Order numbers exhausted".to_string())
        }),
    }
}
