use crate::{
    abstract_trait::{
        DynAuthService, DynCartService, DynCheckoutService, DynEmailService, DynIdentityProvider,
        DynOrderCommandService, DynOrderQueryService, DynPaymentStatusService,
        DynProductCommandService, DynProductQueryService, DynSessionStore,
    },
    config::ConnectionPool,
    repository::{OrderRepository, ProductRepository, UserRepository},
    service::{
        AuthService, AuthServiceDeps, CartService, CheckoutService, CheckoutServiceDeps, Notifier,
        OrderCommandService, OrderQueryService, PaymentGateway, PaymentStatusService,
        ProductCommandService, ProductQueryService,
    },
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct DependenciesInject {
    pub auth_service: DynAuthService,
    pub product_query_service: DynProductQueryService,
    pub product_command_service: DynProductCommandService,
    pub cart_service: DynCartService,
    pub checkout_service: DynCheckoutService,
    pub payment_status_service: DynPaymentStatusService,
    pub order_query_service: DynOrderQueryService,
    pub order_command_service: DynOrderCommandService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject").finish_non_exhaustive()
    }
}

pub struct DependenciesInjectDeps {
    pub pool: ConnectionPool,
    pub session_store: DynSessionStore,
    pub gateway: PaymentGateway,
    pub identity: DynIdentityProvider,
    pub email: DynEmailService,
    pub public_base_url: String,
}

impl DependenciesInject {
    pub fn new(deps: DependenciesInjectDeps) -> Self {
        let DependenciesInjectDeps {
            pool,
            session_store,
            gateway,
            identity,
            email,
            public_base_url,
        } = deps;

        let product_repository = ProductRepository::new(pool.clone());
        let order_repository = OrderRepository::new(pool.clone());
        let user_repository = UserRepository::new(pool.clone());

        let notifier = Notifier::new(email, public_base_url.clone());

        let product_query_service = Arc::new(ProductQueryService::new(
            product_repository.query.clone(),
        )) as DynProductQueryService;

        let product_command_service = Arc::new(ProductCommandService::new(
            product_repository.command.clone(),
        )) as DynProductCommandService;

        let cart_service = Arc::new(CartService::new(
            session_store.clone(),
            product_repository.query.clone(),
        )) as DynCartService;

        let checkout_service = Arc::new(CheckoutService::new(CheckoutServiceDeps {
            session_store: session_store.clone(),
            product_query: product_repository.query.clone(),
            product_command: product_repository.command.clone(),
            order_query: order_repository.query.clone(),
            order_command: order_repository.command.clone(),
            gateway,
            public_base_url,
        })) as DynCheckoutService;

        let payment_status_service = Arc::new(PaymentStatusService::new(
            session_store.clone(),
            order_repository.query.clone(),
            order_repository.command.clone(),
        )) as DynPaymentStatusService;

        let order_query_service = Arc::new(OrderQueryService::new(
            order_repository.query.clone(),
            product_repository.query.clone(),
        )) as DynOrderQueryService;

        let order_command_service = Arc::new(OrderCommandService::new(
            order_repository.command.clone(),
        )) as DynOrderCommandService;

        let auth_service = Arc::new(AuthService::new(AuthServiceDeps {
            identity,
            user_query: user_repository.query.clone(),
            user_command: user_repository.command.clone(),
            session_store,
            notifier,
        })) as DynAuthService;

        Self {
            auth_service,
            product_query_service,
            product_command_service,
            cart_service,
            checkout_service,
            payment_status_service,
            order_query_service,
            order_command_service,
        }
    }
}
