use crate::{
    abstract_trait::{
        CheckoutServiceTrait, DynOrderCommandRepository, DynOrderQueryRepository,
        DynProductCommandRepository, DynProductQueryRepository, DynSessionStore,
    },
    domain::{
        requests::{CreateInvoiceRequest, NewOrder, NewOrderItem},
        responses::CheckoutOutcome,
        session::SessionData,
        status::OrderStatus,
        voucher,
    },
    errors::ServiceError,
    model::Order as OrderModel,
    service::payment::PaymentGateway,
};
use async_trait::async_trait;
use tracing::{error, info};

pub struct CheckoutService {
    pub session_store: DynSessionStore,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub gateway: PaymentGateway,
    pub public_base_url: String,
}

pub struct CheckoutServiceDeps {
    pub session_store: DynSessionStore,
    pub product_query: DynProductQueryRepository,
    pub product_command: DynProductCommandRepository,
    pub order_query: DynOrderQueryRepository,
    pub order_command: DynOrderCommandRepository,
    pub gateway: PaymentGateway,
    pub public_base_url: String,
}

impl CheckoutService {
    pub fn new(deps: CheckoutServiceDeps) -> Self {
        let CheckoutServiceDeps {
            session_store,
            product_query,
            product_command,
            order_query,
            order_command,
            gateway,
            public_base_url,
        } = deps;

        Self {
            session_store,
            product_query,
            product_command,
            order_query,
            order_command,
            gateway,
            public_base_url,
        }
    }

    /// Re-reads every ordered product and rejects the first line that asks for
    /// more than is on the shelf. Cart snapshots are never trusted here.
    async fn validate_stock(&self, session: &SessionData) -> Result<(), ServiceError> {
        for (&product_id, line) in &session.cart {
            let available = self
                .product_query
                .find_by_id(product_id)
                .await?
                .map(|p| p.stock)
                .unwrap_or(0);

            if available < line.quantity {
                error!(
                    "❌ Not enough stock for product_id={}, requested={}, available={}",
                    product_id, line.quantity, available
                );
                return Err(ServiceError::InsufficientStock {
                    product_id,
                    available,
                    requested: line.quantity,
                });
            }
        }

        Ok(())
    }

    fn invoice_request(&self, order: &OrderModel, payer_email: &str) -> CreateInvoiceRequest {
        let order_id = order.order_id;

        CreateInvoiceRequest {
            external_id: format!("order-{order_id}"),
            amount: order.total,
            payer_email: payer_email.to_string(),
            description: format!("Payment for order #{order_id}"),
            success_redirect_url: format!(
                "{}/api/payment/success/{order_id}",
                self.public_base_url
            ),
            failure_redirect_url: format!(
                "{}/api/payment/failed/{order_id}",
                self.public_base_url
            ),
        }
    }

    /// Requests a hosted invoice and attaches it to the order. The applied
    /// voucher is consumed once the invoice exists; the cart and shipping info
    /// stay until a success signal comes back.
    async fn issue_invoice(
        &self,
        session_id: &str,
        mut session: SessionData,
        order: OrderModel,
        payer_email: &str,
    ) -> Result<CheckoutOutcome, ServiceError> {
        let gateway = match &self.gateway {
            PaymentGateway::Enabled(gateway) => gateway.clone(),
            PaymentGateway::Disabled => {
                return Err(ServiceError::PaymentGateway(
                    "Payment gateway is not configured".to_string(),
                ));
            }
        };

        let req = self.invoice_request(&order, payer_email);
        let invoice = gateway.create_invoice(&req).await?;

        let order = self
            .order_command
            .update_invoice(order.order_id, &invoice.id, &invoice.invoice_url)
            .await?;

        session.voucher = None;
        self.session_store.save(session_id, &session).await?;

        info!(
            "💳 Invoice {} issued for order ID {}",
            invoice.id, order.order_id
        );

        Ok(CheckoutOutcome::Invoice {
            order: order.into(),
            invoice_url: invoice.invoice_url,
        })
    }
}

#[async_trait]
impl CheckoutServiceTrait for CheckoutService {
    async fn checkout(&self, session_id: &str) -> Result<CheckoutOutcome, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        let user = session.user.clone().ok_or_else(|| {
            ServiceError::Unauthorized("You must be logged in to checkout".to_string())
        })?;

        if session.cart.is_empty() {
            return Err(ServiceError::Validation(vec!["Cart is empty".to_string()]));
        }
        if session.shipping.is_none() {
            return Err(ServiceError::Validation(vec![
                "Shipping information is missing".to_string(),
            ]));
        }

        let totals = voucher::totals(session.subtotal(), session.voucher.as_ref());

        self.validate_stock(&session).await?;

        let order = self
            .order_command
            .create_order(&NewOrder {
                user_id: user.id,
                total: totals.total,
                discount_amount: totals.discount,
                shipping_cost: totals.shipping_cost,
                voucher_code: session.voucher.as_ref().map(|v| v.code.clone()),
            })
            .await?;

        info!(
            "🏗️ Order ID {} created for user {} (total {})",
            order.order_id, user.id, order.total
        );

        let items: Vec<NewOrderItem> = session
            .cart
            .iter()
            .map(|(&product_id, line)| NewOrderItem {
                product_id,
                quantity: line.quantity,
                price: line.price,
            })
            .collect();

        self.order_command
            .add_order_items(order.order_id, &items)
            .await?;

        // Reservation is line by line; losing a race here leaves the order
        // pending with the earlier lines already taken.
        for item in &items {
            let reserved = self
                .product_command
                .decrement_stock(item.product_id, item.quantity)
                .await?;

            if !reserved {
                let available = self
                    .product_query
                    .find_by_id(item.product_id)
                    .await?
                    .map(|p| p.stock)
                    .unwrap_or(0);

                return Err(ServiceError::InsufficientStock {
                    product_id: item.product_id,
                    available,
                    requested: item.quantity,
                });
            }
        }

        match &self.gateway {
            PaymentGateway::Enabled(_) => {
                self.issue_invoice(session_id, session, order, &user.email)
                    .await
            }
            PaymentGateway::Disabled => {
                info!(
                    "ℹ️ Payment gateway not configured; order ID {} left pending (demo)",
                    order.order_id
                );

                session.clear_checkout_state();
                self.session_store.save(session_id, &session).await?;

                Ok(CheckoutOutcome::PendingDemo {
                    order: order.into(),
                })
            }
        }
    }

    async fn retry_payment(
        &self,
        session_id: &str,
        order_id: i32,
    ) -> Result<CheckoutOutcome, ServiceError> {
        let session = self.session_store.load(session_id).await?;

        let user = session.user.clone().ok_or_else(|| {
            ServiceError::Unauthorized("You must be logged in to continue payment".to_string())
        })?;

        let order = self
            .order_query
            .find_by_id_for_user(order_id, user.id)
            .await?
            .ok_or(ServiceError::Repo(crate::errors::RepositoryError::NotFound))?;

        if OrderStatus::parse(&order.status) == Some(OrderStatus::Success) {
            return Err(ServiceError::Validation(vec![format!(
                "Order #{order_id} is already paid"
            )]));
        }

        match &self.gateway {
            PaymentGateway::Enabled(_) => {
                self.issue_invoice(session_id, session, order, &user.email)
                    .await
            }
            PaymentGateway::Disabled => {
                info!(
                    "ℹ️ Payment gateway not configured; order ID {} stays pending (demo)",
                    order_id
                );

                Ok(CheckoutOutcome::PendingDemo {
                    order: order.into(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        abstract_trait::{
            DynInvoiceGateway, InvoiceGatewayTrait, OrderCommandRepositoryTrait,
            OrderQueryRepositoryTrait, ProductCommandRepositoryTrait,
            ProductQueryRepositoryTrait, SessionStoreTrait,
        },
        domain::{
            requests::{FindAllOrders, FindAllProducts},
            responses::InvoiceResponse,
            session::{CartLine, ShippingInfo, UserSession},
        },
        errors::RepositoryError,
        model::{Order, OrderItem, Product},
    };
    use chrono::Utc;
    use std::{
        collections::HashMap,
        sync::{
            Arc,
            atomic::{AtomicI32, Ordering},
        },
    };
    use tokio::sync::Mutex;

    struct InMemorySessionStore {
        sessions: Mutex<HashMap<String, SessionData>>,
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

    #[derive(Default)]
    struct FakeProducts {
        stock: Mutex<HashMap<i32, Product>>,
    }

    impl FakeProducts {
        async fn insert(&self, product: Product) {
            self.stock.lock().await.insert(product.product_id, product);
        }
    }

    #[async_trait]
    impl ProductQueryRepositoryTrait for FakeProducts {
        async fn find_all(
            &self,
            _req: &FindAllProducts,
        ) -> Result<(Vec<Product>, i64), RepositoryError> {
            let products: Vec<Product> = self.stock.lock().await.values().cloned().collect();
            let total = products.len() as i64;
            Ok((products, total))
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Product>, RepositoryError> {
            Ok(self.stock.lock().await.get(&id).cloned())
        }

        async fn find_related(
            &self,
            _category: &str,
            _exclude_id: i32,
            _limit: i64,
        ) -> Result<Vec<Product>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, RepositoryError> {
            let stock = self.stock.lock().await;
            Ok(ids.iter().filter_map(|id| stock.get(id).cloned()).collect())
        }
    }

    #[async_trait]
    impl ProductCommandRepositoryTrait for FakeProducts {
        async fn create_product(
            &self,
            _product: &crate::domain::requests::CreateProductRequest,
        ) -> Result<Product, RepositoryError> {
            unimplemented!("not used by checkout")
        }

        async fn update_product(
            &self,
            _product: &crate::domain::requests::UpdateProductRequest,
        ) -> Result<Product, RepositoryError> {
            unimplemented!("not used by checkout")
        }

        async fn delete_product(&self, _id: i32) -> Result<(), RepositoryError> {
            unimplemented!("not used by checkout")
        }

        async fn decrement_stock(
            &self,
            product_id: i32,
            qty: i32,
        ) -> Result<bool, RepositoryError> {
            let mut stock = self.stock.lock().await;
            let product = stock.get_mut(&product_id).ok_or(RepositoryError::NotFound)?;

            if product.stock < qty {
                return Ok(false);
            }

            product.stock -= qty;
            Ok(true)
        }
    }

    #[derive(Default)]
    struct FakeOrders {
        orders: Mutex<HashMap<i32, Order>>,
        items: Mutex<Vec<OrderItem>>,
        next_id: AtomicI32,
    }

    impl FakeOrders {
        fn new() -> Self {
            Self {
                next_id: AtomicI32::new(1),
                ..Default::default()
            }
        }
    }

    #[async_trait]
    impl OrderQueryRepositoryTrait for FakeOrders {
        async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
            Ok(self.orders.lock().await.get(&id).cloned())
        }

        async fn find_by_id_for_user(
            &self,
            id: i32,
            user_id: i32,
        ) -> Result<Option<Order>, RepositoryError> {
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
        ) -> Result<Option<Order>, RepositoryError> {
            Ok(self
                .orders
                .lock()
                .await
                .values()
                .find(|o| o.invoice_id.as_deref() == Some(invoice_id))
                .cloned())
        }

        async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
            Ok(self
                .orders
                .lock()
                .await
                .values()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn find_all(
            &self,
            _req: &FindAllOrders,
        ) -> Result<(Vec<Order>, i64), RepositoryError> {
            let orders: Vec<Order> = self.orders.lock().await.values().cloned().collect();
            let total = orders.len() as i64;
            Ok((orders, total))
        }

        async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
            Ok(self
                .items
                .lock()
                .await
                .iter()
                .filter(|i| i.order_id == order_id)
                .cloned()
                .collect())
        }
    }

    #[async_trait]
    impl OrderCommandRepositoryTrait for FakeOrders {
        async fn create_order(&self, order: &NewOrder) -> Result<Order, RepositoryError> {
            let order_id = self.next_id.fetch_add(1, Ordering::SeqCst);
            let model = Order {
                order_id,
                user_id: order.user_id,
                total: order.total,
                status: "pending".to_string(),
                discount_amount: order.discount_amount,
                shipping_cost: order.shipping_cost,
                voucher_code: order.voucher_code.clone(),
                invoice_id: None,
                invoice_url: None,
                created_at: None,
                updated_at: None,
            };
            self.orders.lock().await.insert(order_id, model.clone());
            Ok(model)
        }

        async fn add_order_items(
            &self,
            order_id: i32,
            items: &[NewOrderItem],
        ) -> Result<(), RepositoryError> {
            let mut stored = self.items.lock().await;
            for (idx, item) in items.iter().enumerate() {
                stored.push(OrderItem {
                    order_item_id: idx as i32 + 1,
                    order_id,
                    product_id: item.product_id,
                    quantity: item.quantity,
                    price: item.price,
                });
            }
            Ok(())
        }

        async fn update_status(
            &self,
            order_id: i32,
            status: OrderStatus,
        ) -> Result<Order, RepositoryError> {
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
        ) -> Result<Order, RepositoryError> {
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
            order_id: i32,
            invoice_id: &str,
            invoice_url: &str,
        ) -> Result<Order, RepositoryError> {
            let mut orders = self.orders.lock().await;
            let order = orders.get_mut(&order_id).ok_or(RepositoryError::NotFound)?;
            order.invoice_id = Some(invoice_id.to_string());
            order.invoice_url = Some(invoice_url.to_string());
            Ok(order.clone())
        }
    }

    struct FakeGateway {
        fail: bool,
        requests: Mutex<Vec<CreateInvoiceRequest>>,
    }

    impl FakeGateway {
        fn new(fail: bool) -> Arc<Self> {
            Arc::new(Self {
                fail,
                requests: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl InvoiceGatewayTrait for FakeGateway {
        async fn create_invoice(
            &self,
            req: &CreateInvoiceRequest,
        ) -> Result<InvoiceResponse, ServiceError> {
            self.requests.lock().await.push(req.clone());

            if self.fail {
                return Err(ServiceError::PaymentGateway("gateway down".to_string()));
            }

            Ok(InvoiceResponse {
                id: format!("inv-{}", req.external_id),
                invoice_url: format!("https://pay.example.com/{}", req.external_id),
            })
        }
    }

    fn product(id: i32, price: i64, stock: i32) -> Product {
        Product {
            product_id: id,
            name: format!("Product {id}"),
            description: None,
            price,
            stock,
            category: None,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn line(price: i64, quantity: i32) -> CartLine {
        CartLine {
            name: "Product".to_string(),
            description: String::new(),
            price,
            quantity,
            image_url: String::new(),
            stock: 100,
        }
    }

    fn user() -> UserSession {
        UserSession {
            id: 1,
            provider_user_id: "prov-1".to_string(),
            email: "jane@example.com".to_string(),
            name: "Jane".to_string(),
            role: "user".to_string(),
            login_time: Utc::now(),
        }
    }

    fn shipping() -> ShippingInfo {
        ShippingInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            mobile_phone: "0812000111".into(),
            address: "Jl. Kenanga 1".into(),
            province: "DKI Jakarta".into(),
            city: "Jakarta".into(),
            district: "Menteng".into(),
            zip_code: "10310".into(),
        }
    }

    struct Harness {
        service: CheckoutService,
        sessions: Arc<InMemorySessionStore>,
        products: Arc<FakeProducts>,
        orders: Arc<FakeOrders>,
        gateway: Option<Arc<FakeGateway>>,
    }

    async fn harness(gateway: PaymentGateway, fake: Option<Arc<FakeGateway>>) -> Harness {
        let sessions = Arc::new(InMemorySessionStore {
            sessions: Mutex::new(HashMap::new()),
        });
        let products = Arc::new(FakeProducts::default());
        let orders = Arc::new(FakeOrders::new());

        let service = CheckoutService::new(CheckoutServiceDeps {
            session_store: sessions.clone() as DynSessionStore,
            product_query: products.clone() as DynProductQueryRepository,
            product_command: products.clone() as DynProductCommandRepository,
            order_query: orders.clone() as DynOrderQueryRepository,
            order_command: orders.clone() as DynOrderCommandRepository,
            gateway,
            public_base_url: "http://localhost:8080".to_string(),
        });

        Harness {
            service,
            sessions,
            products,
            orders,
            gateway: fake,
        }
    }

    async fn enabled_harness(fail: bool) -> Harness {
        let fake = FakeGateway::new(fail);
        harness(
            PaymentGateway::Enabled(fake.clone() as DynInvoiceGateway),
            Some(fake),
        )
        .await
    }

    async fn seed_session(h: &Harness, cart: Vec<(i32, CartLine)>, voucher_code: Option<&str>) {
        let mut session = SessionData {
            user: Some(user()),
            shipping: Some(shipping()),
            ..Default::default()
        };
        for (id, line) in cart {
            session.cart.insert(id, line);
        }
        if let Some(code) = voucher_code {
            session.voucher = voucher::lookup(code);
        }
        h.sessions.save("sid", &session).await.unwrap();
    }

    #[tokio::test]
    async fn empty_cart_is_rejected_before_any_persistence() {
        let h = harness(PaymentGateway::Disabled, None).await;
        let session = SessionData {
            user: Some(user()),
            shipping: Some(shipping()),
            ..Default::default()
        };
        h.sessions.save("sid", &session).await.unwrap();

        let err = h.service.checkout("sid").await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
        assert!(h.orders.orders.lock().await.is_empty());
        assert!(h.orders.items.lock().await.is_empty());
    }

    #[tokio::test]
    async fn missing_shipping_is_rejected() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 10)).await;
        let mut session = SessionData {
            user: Some(user()),
            ..Default::default()
        };
        session.cart.insert(1, line(100000, 1));
        h.sessions.save("sid", &session).await.unwrap();

        let err = h.service.checkout("sid").await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn anonymous_checkout_is_unauthorized() {
        let h = harness(PaymentGateway::Disabled, None).await;

        let err = h.service.checkout("sid").await.unwrap_err();

        assert!(matches!(err, ServiceError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn stock_validation_rejects_over_request() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 11))], None).await;

        let err = h.service.checkout("sid").await.unwrap_err();

        match err {
            ServiceError::InsufficientStock {
                product_id,
                available,
                requested,
            } => {
                assert_eq!(product_id, 1);
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(h.orders.orders.lock().await.is_empty());
    }

    #[tokio::test]
    async fn stock_validation_accepts_exact_availability() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 10))], None).await;

        let outcome = h.service.checkout("sid").await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::PendingDemo { .. }));
        assert_eq!(
            h.products.find_by_id(1).await.unwrap().unwrap().stock,
            0
        );
    }

    #[tokio::test]
    async fn percentage_voucher_checkout_totals() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 2))], Some("DISKON10")).await;

        let outcome = h.service.checkout("sid").await.unwrap();

        let order = match outcome {
            CheckoutOutcome::PendingDemo { order } => order,
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(order.total, 180000);
        assert_eq!(order.discount_amount, 20000);
        assert_eq!(order.shipping_cost, 0);
        assert_eq!(order.voucher_code.as_deref(), Some("DISKON10"));
        assert_eq!(order.status, "pending");
    }

    #[tokio::test]
    async fn demo_checkout_clears_cart_shipping_and_voucher() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 1))], Some("DISKON10")).await;

        h.service.checkout("sid").await.unwrap();

        let session = h.sessions.load("sid").await.unwrap();
        assert!(session.cart.is_empty());
        assert!(session.shipping.is_none());
        assert!(session.voucher.is_none());
        assert!(session.user.is_some());
    }

    #[tokio::test]
    async fn gateway_checkout_issues_invoice_and_keeps_cart() {
        let h = enabled_harness(false).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 2))], Some("DISKON10")).await;

        let outcome = h.service.checkout("sid").await.unwrap();

        let (order, invoice_url) = match outcome {
            CheckoutOutcome::Invoice { order, invoice_url } => (order, invoice_url),
            other => panic!("unexpected outcome: {other:?}"),
        };
        assert_eq!(invoice_url, "https://pay.example.com/order-1");
        assert_eq!(order.invoice_id.as_deref(), Some("inv-order-1"));

        let requests = h.gateway.as_ref().unwrap().requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].external_id, "order-1");
        assert_eq!(requests[0].amount, 180000);
        assert_eq!(requests[0].payer_email, "jane@example.com");

        // Only the voucher is consumed; the buyer may come back from a failed
        // payment and try again with the same cart.
        let session = h.sessions.load("sid").await.unwrap();
        assert!(!session.cart.is_empty());
        assert!(session.shipping.is_some());
        assert!(session.voucher.is_none());
    }

    #[tokio::test]
    async fn gateway_failure_leaves_order_pending() {
        let h = enabled_harness(true).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 1))], None).await;

        let err = h.service.checkout("sid").await.unwrap_err();

        assert!(matches!(err, ServiceError::PaymentGateway(_)));

        let orders = h.orders.orders.lock().await;
        assert_eq!(orders.len(), 1);
        let order = orders.values().next().unwrap();
        assert_eq!(order.status, "pending");
        assert!(order.invoice_id.is_none());
    }

    #[tokio::test]
    async fn each_checkout_creates_a_new_order() {
        let h = harness(PaymentGateway::Disabled, None).await;
        h.products.insert(product(1, 100000, 100)).await;

        seed_session(&h, vec![(1, line(100000, 1))], None).await;
        h.service.checkout("sid").await.unwrap();
        seed_session(&h, vec![(1, line(100000, 1))], None).await;
        h.service.checkout("sid").await.unwrap();

        assert_eq!(h.orders.orders.lock().await.len(), 2);
    }

    #[tokio::test]
    async fn retry_payment_rejects_paid_orders() {
        let h = enabled_harness(false).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 1))], None).await;
        h.service.checkout("sid").await.unwrap();

        h.orders
            .update_status(1, OrderStatus::Success)
            .await
            .unwrap();

        let err = h.service.retry_payment("sid", 1).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn retry_payment_issues_a_fresh_invoice_for_failed_orders() {
        let h = enabled_harness(false).await;
        h.products.insert(product(1, 100000, 10)).await;
        seed_session(&h, vec![(1, line(100000, 1))], None).await;
        h.service.checkout("sid").await.unwrap();

        h.orders
            .update_status(1, OrderStatus::Failed)
            .await
            .unwrap();

        let outcome = h.service.retry_payment("sid", 1).await.unwrap();

        assert!(matches!(outcome, CheckoutOutcome::Invoice { .. }));
        assert_eq!(h.gateway.as_ref().unwrap().requests.lock().await.len(), 2);
        // Stored status stays until the next terminal signal arrives.
        let orders = h.orders.orders.lock().await;
        assert_eq!(orders.get(&1).unwrap().status, "failed");
    }
}
