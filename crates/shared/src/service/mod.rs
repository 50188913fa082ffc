mod auth;
mod cart;
mod checkout;
mod email;
mod identity;
mod order;
pub mod payment;
mod product;

pub use self::auth::{AuthService, AuthServiceDeps};
pub use self::cart::CartService;
pub use self::checkout::{CheckoutService, CheckoutServiceDeps};
pub use self::email::{EmailService, Notifier};
pub use self::identity::HttpIdentityProvider;
pub use self::order::{OrderCommandService, OrderQueryService};
pub use self::payment::{InvoiceClient, PaymentGateway, PaymentStatusService};
pub use self::product::{ProductCommandService, ProductQueryService};
