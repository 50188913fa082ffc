mod gateway;
mod reconcile;

pub use self::gateway::{InvoiceClient, PaymentGateway};
pub use self::reconcile::PaymentStatusService;
