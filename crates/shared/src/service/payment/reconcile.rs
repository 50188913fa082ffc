use crate::{
    abstract_trait::{
        DynOrderCommandRepository, DynOrderQueryRepository, DynSessionStore,
        PaymentStatusServiceTrait,
    },
    domain::{
        event::InvoiceCallback,
        responses::{ApiResponse, OrderResponse},
        status::OrderStatus,
    },
    errors::{RepositoryError, ServiceError},
    model::Order as OrderModel,
};
use async_trait::async_trait;
use tracing::{info, warn};

/// Folds redirect callbacks and webhook events into the order state machine.
/// `success` is terminal; everything else may keep moving.
pub struct PaymentStatusService {
    session_store: DynSessionStore,
    order_query: DynOrderQueryRepository,
    order_command: DynOrderCommandRepository,
}

impl PaymentStatusService {
    pub fn new(
        session_store: DynSessionStore,
        order_query: DynOrderQueryRepository,
        order_command: DynOrderCommandRepository,
    ) -> Self {
        Self {
            session_store,
            order_query,
            order_command,
        }
    }

    fn is_settled(order: &OrderModel) -> bool {
        OrderStatus::parse(&order.status) == Some(OrderStatus::Success)
    }

    /// Resolve the target order: parse the order id out of the external
    /// reference first, fall back to the stored invoice id.
    async fn resolve_order(
        &self,
        payload: &InvoiceCallback,
    ) -> Result<Option<OrderModel>, ServiceError> {
        if let Some(order_id) = payload.order_id()
            && let Some(order) = self.order_query.find_by_id(order_id).await?
        {
            return Ok(Some(order));
        }

        if let Some(invoice_id) = payload.invoice_id() {
            return Ok(self.order_query.find_by_invoice_id(invoice_id).await?);
        }

        Ok(None)
    }
}

#[async_trait]
impl PaymentStatusServiceTrait for PaymentStatusService {
    async fn redirect_success(
        &self,
        session_id: &str,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .order_query
            .find_by_id(order_id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        if Self::is_settled(&order) {
            info!("🔁 Order ID {} already settled, nothing to apply", order_id);
            return Ok(ApiResponse::success(
                "Order already paid",
                OrderResponse::from(order),
            ));
        }

        let order = self
            .order_command
            .update_status(order_id, OrderStatus::Success)
            .await?;

        let mut session = self.session_store.load(session_id).await?;
        session.clear_checkout_state();
        self.session_store.save(session_id, &session).await?;

        info!("✅ Order ID {} paid", order_id);

        Ok(ApiResponse::success(
            "Order paid successfully",
            OrderResponse::from(order),
        ))
    }

    async fn redirect_failed(
        &self,
        order_id: i32,
    ) -> Result<ApiResponse<OrderResponse>, ServiceError> {
        let order = self
            .order_query
            .find_by_id(order_id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        if Self::is_settled(&order) {
            warn!(
                "⚠️ Ignoring failure signal for already-paid order ID {}",
                order_id
            );
            return Ok(ApiResponse::success(
                "Order already paid",
                OrderResponse::from(order),
            ));
        }

        let order = self
            .order_command
            .update_status(order_id, OrderStatus::Failed)
            .await?;

        info!("❌ Payment failed or cancelled for order ID {}", order_id);

        Ok(ApiResponse::success(
            "Payment failed or cancelled",
            OrderResponse::from(order),
        ))
    }

    async fn apply_webhook(&self, payload: &InvoiceCallback) -> Result<(), ServiceError> {
        let Some(status) = payload.status() else {
            warn!("⚠️ Webhook without a status field, ignoring");
            return Ok(());
        };

        let Some(new_status) = OrderStatus::from_provider(status) else {
            warn!("⚠️ Unmapped provider status '{}', ignoring", status);
            return Ok(());
        };

        let Some(order) = self.resolve_order(payload).await? else {
            warn!(
                "⚠️ Webhook could not be matched to an order (external_id={:?}, invoice_id={:?})",
                payload.external_id(),
                payload.invoice_id()
            );
            return Ok(());
        };

        if Self::is_settled(&order) {
            info!(
                "🔁 Re-delivered event for settled order ID {}, no-op",
                order.order_id
            );
            return Ok(());
        }

        self.order_command
            .update_status_and_invoice(order.order_id, new_status, payload.invoice_id())
            .await?;

        info!(
            "🔔 Webhook applied: order ID {} -> {}",
            order.order_id, new_status
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            OrderCommandRepositoryTrait, OrderQueryRepositoryTrait, SessionStoreTrait,
        },
        domain::{
            requests::{FindAllOrders, NewOrder, NewOrderItem},
            session::{CartLine, SessionData},
        },
        model::OrderItem,
    };
    use std::{collections::HashMap, sync::Arc};
    use tokio::sync::Mutex;

    struct InMemorySessionStore {
        sessions: Mutex<HashMap<String, SessionData>>,
        saves: Mutex<u32>,
    }

    impl InMemorySessionStore {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                sessions: Mutex::new(HashMap::new()),
                saves: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl SessionStoreTrait for InMemorySessionStore {
        async fn load(&self, session_id: &str) -> Result<SessionData, ServiceError> {
            Ok(self
                .sessions
                .lock()
                .await
                .get(session_id)
                .cloned()
                .unwrap_or_default())
        }

        async fn save(&self, session_id: &str, data: &SessionData) -> Result<(), ServiceError> {
            *self.saves.lock().await += 1;
            self.sessions
                .lock()
                .await
                .insert(session_id.to_string(), data.clone());
            Ok(())
        }

        async fn delete(&self, session_id: &str) -> Result<(), ServiceError> {
            self.sessions.lock().await.remove(session_id);
            Ok(())
        }
    }

    struct FakeOrders {
        orders: Mutex<HashMap<i32, OrderModel>>,
        updates: Mutex<u32>,
    }

    impl FakeOrders {
        fn with(orders: Vec<OrderModel>) -> Arc<Self> {
            Arc::new(Self {
                orders: Mutex::new(
                    orders.into_iter().map(|o| (o.order_id, o)).collect(),
                ),
                updates: Mutex::new(0),
            })
        }
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for FakeOrders {
        async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
            Ok(self.orders.lock().await.get(&id).cloned())
        }

        async fn find_by_id_for_user(
            &self,
            id: i32,
            user_id: i32,
        ) -> Result<Option<OrderModel>, RepositoryError> {
            Ok(self
                .orders
                .lock()
                .await
                .get(&id)
                .filter(|o| o.user_id == user_id)
                .cloned())
        }

        async fn find_by_invoice_id(
            &self,
            invoice_id: &str,
        ) -> Result<Option<OrderModel>, RepositoryError> {
            Ok(self
                .orders
                .lock()
                .await
                .values()
                .find(|o| o.invoice_id.as_deref() == Some(invoice_id))
                .cloned())
        }

        async fn find_by_user(&self, _user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<OrderModel>, i64), RepositoryError> {
            Ok((Vec::new(), 0))
        }

        async fn find_items(&self, _order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeOrders {
        async fn create_order(&self, _order: &NewOrder) -> Result<OrderModel, RepositoryError> {
            unimplemented!("not used by reconciler")
        }

        async fn add_order_items(
            &self,
            _order_id: i32,
            _items: &[NewOrderItem],
        ) -> Result<(), RepositoryError> {
            unimplemented!("not used by reconciler")
        }

        async fn update_status(
            &self,
            order_id: i32,
            status: OrderStatus,
        ) -> Result<OrderModel, RepositoryError> {
            *self.updates.lock().await += 1;
            let mut orders = self.orders.lock().await;
            let order = orders.get_mut(&order_id).ok_or(RepositoryError::NotFound)?;
            order.status = status.as_str().to_string();
            Ok(order.clone())
        }

        async fn update_status_and_invoice(
            &self,
            order_id: i32,
            status: OrderStatus,
            invoice_id: Option<&str>,
        ) -> Result<OrderModel, RepositoryError> {
            *self.updates.lock().await += 1;
            let mut orders = self.orders.lock().await;
            let order = orders.get_mut(&order_id).ok_or(RepositoryError::NotFound)?;
            order.status = status.as_str().to_string();
            if let Some(invoice_id) = invoice_id {
                order.invoice_id = Some(invoice_id.to_string());
            }
            Ok(order.clone())
        }

        async fn update_invoice(
            &self,
            _order_id: i32,
            _invoice_id: &str,
            _invoice_url: &str,
        ) -> Result<OrderModel, RepositoryError> {
            unimplemented!("not used by reconciler")
        }
    }

    fn order(id: i32, status: &str, invoice_id: Option<&str>) -> OrderModel {
        OrderModel {
            order_id: id,
            user_id: 1,
            total: 100000,
            status: status.to_string(),
            discount_amount: 0,
            shipping_cost: 0,
            voucher_code: None,
            invoice_id: invoice_id.map(str::to_string),
            invoice_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn service(
        orders: Arc<FakeOrders>,
        sessions: Arc<InMemorySessionStore>,
    ) -> PaymentStatusService {
        PaymentStatusService::new(
            sessions as DynSessionStore,
            orders.clone() as DynOrderQueryRepository,
            orders as DynOrderCommandRepository,
        )
    }

    fn webhook(json: &str) -> InvoiceCallback {
        serde_json::from_str(json).unwrap()
    }

    #[tokio::test]
    async fn redirect_success_settles_and_clears_the_session() {
        let orders = FakeOrders::with(vec![order(1, "pending", None)]);
        let sessions = InMemorySessionStore::new();
        let mut session = SessionData::default();
        session.cart.insert(
            1,
            CartLine {
                name: "Runner".into(),
                description: String::new(),
                price: 100000,
                quantity: 1,
                image_url: String::new(),
                stock: 5,
            },
        );
        sessions.save("sid", &session).await.unwrap();
        *sessions.saves.lock().await = 0;

        let svc = service(orders.clone(), sessions.clone());
        let response = svc.redirect_success("sid", 1).await.unwrap();

        assert_eq!(response.data.status, "success");
        let stored = sessions.load("sid").await.unwrap();
        assert!(stored.cart.is_empty());
        assert!(stored.shipping.is_none());
        assert!(stored.voucher.is_none());
    }

    #[tokio::test]
    async fn redirect_failure_marks_the_order_failed() {
        let orders = FakeOrders::with(vec![order(1, "pending", None)]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        let response = svc.redirect_failed(1).await.unwrap();

        assert_eq!(response.data.status, "failed");
    }

    #[tokio::test]
    async fn failure_signal_never_downgrades_a_paid_order() {
        let orders = FakeOrders::with(vec![order(1, "success", None)]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        let response = svc.redirect_failed(1).await.unwrap();

        assert_eq!(response.data.status, "success");
        assert_eq!(*orders.updates.lock().await, 0);
    }

    #[tokio::test]
    async fn webhook_paid_settles_order_by_external_id() {
        let orders = FakeOrders::with(vec![order(42, "pending", None)]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        svc.apply_webhook(&webhook(
            r#"{ "external_id": "order-42", "status": "PAID", "id": "inv-9" }"#,
        ))
        .await
        .unwrap();

        let stored = orders.orders.lock().await;
        let order = stored.get(&42).unwrap();
        assert_eq!(order.status, "success");
        assert_eq!(order.invoice_id.as_deref(), Some("inv-9"));
    }

    #[tokio::test]
    async fn webhook_falls_back_to_invoice_id_lookup() {
        let orders = FakeOrders::with(vec![order(7, "pending", Some("inv-7"))]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        svc.apply_webhook(&webhook(
            r#"{ "external_id": "unparseable", "status": "expired", "id": "inv-7" }"#,
        ))
        .await
        .unwrap();

        assert_eq!(orders.orders.lock().await.get(&7).unwrap().status, "failed");
    }

    #[tokio::test]
    async fn redelivered_success_event_is_a_no_op() {
        let orders = FakeOrders::with(vec![order(1, "success", Some("inv-1"))]);
        let sessions = InMemorySessionStore::new();
        let svc = service(orders.clone(), sessions.clone());

        svc.apply_webhook(&webhook(
            r#"{ "external_id": "order-1", "status": "paid", "id": "inv-1" }"#,
        ))
        .await
        .unwrap();

        assert_eq!(*orders.updates.lock().await, 0);
        // The webhook path is out-of-band; it must not touch any session.
        assert_eq!(*sessions.saves.lock().await, 0);
    }

    #[tokio::test]
    async fn unknown_provider_status_is_ignored() {
        let orders = FakeOrders::with(vec![order(1, "pending", None)]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        svc.apply_webhook(&webhook(
            r#"{ "external_id": "order-1", "status": "settling", "id": "inv-1" }"#,
        ))
        .await
        .unwrap();

        assert_eq!(orders.orders.lock().await.get(&1).unwrap().status, "pending");
        assert_eq!(*orders.updates.lock().await, 0);
    }

    #[tokio::test]
    async fn unmatched_webhook_is_ignored() {
        let orders = FakeOrders::with(vec![]);
        let svc = service(orders.clone(), InMemorySessionStore::new());

        let result = svc
            .apply_webhook(&webhook(
                r#"{ "external_id": "order-99", "status": "paid", "id": "inv-404" }"#,
            ))
            .await;

        assert!(result.is_ok());
    }
}
