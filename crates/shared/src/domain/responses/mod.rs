mod api;
mod cart;
mod checkout;
mod order;
mod payment;
mod product;
mod user;

pub use self::api::{ApiResponse, ApiResponsePagination, Pagination};
pub use self::cart::{CartItemResponse, CartResponse};
pub use self::checkout::CheckoutOutcome;
pub use self::order::{OrderDetailResponse, OrderItemResponse, OrderResponse};
pub use self::payment::InvoiceResponse;
pub use self::product::{ProductDetailResponse, ProductResponse};
pub use self::user::{ProviderUser, UserResponse};
