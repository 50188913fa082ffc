mod auth;
mod cart;
mod checkout;
mod email;
mod identity;
mod order;
mod payment;
mod payment_status;
mod product;
mod session;
mod user;

pub use self::auth::{AuthServiceTrait, DynAuthService};
pub use self::cart::{CartServiceTrait, DynCartService};
pub use self::checkout::{CheckoutServiceTrait, DynCheckoutService};
pub use self::email::{DynEmailService, EmailServiceTrait};
pub use self::identity::{DynIdentityProvider, IdentityProviderTrait};
pub use self::order::{
    DynOrderCommandRepository, DynOrderCommandService, DynOrderQueryRepository,
    DynOrderQueryService, OrderCommandRepositoryTrait, OrderCommandServiceTrait,
    OrderQueryRepositoryTrait, OrderQueryServiceTrait,
};
pub use self::payment::{DynInvoiceGateway, InvoiceGatewayTrait};
pub use self::payment_status::{DynPaymentStatusService, PaymentStatusServiceTrait};
pub use self::product::{
    DynProductCommandRepository, DynProductCommandService, DynProductQueryRepository,
    DynProductQueryService, ProductCommandRepositoryTrait, ProductCommandServiceTrait,
    ProductQueryRepositoryTrait, ProductQueryServiceTrait,
};
pub use self::session::{DynSessionStore, SessionStoreTrait};
pub use self::user::{
    DynUserCommandRepository, DynUserQueryRepository, NewUser, UserCommandRepositoryTrait,
    UserQueryRepositoryTrait,
};
