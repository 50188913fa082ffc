mod auth;
mod cart;
mod checkout;
mod email;
mod order;
mod payment;
mod product;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::cart::{
    AddCartItemRequest, ApplyVoucherRequest, CartUpdateAction, UpdateCartItemRequest,
};
pub use self::checkout::ShippingInfoRequest;
pub use self::email::EmailRequest;
pub use self::order::{FindAllOrders, NewOrder, NewOrderItem, UpdateOrderStatusRequest};
pub use self::payment::CreateInvoiceRequest;
pub use self::product::{CreateProductRequest, FindAllProducts, UpdateProductRequest};
