use crate::{
    abstract_trait::{CartServiceTrait, DynProductQueryRepository, DynSessionStore},
    domain::{
        requests::{
            AddCartItemRequest, ApplyVoucherRequest, CartUpdateAction, ShippingInfoRequest,
            UpdateCartItemRequest,
        },
        responses::{ApiResponse, CartResponse},
        session::{CartLine, SessionData, ShippingInfo},
        voucher,
    },
    errors::{RepositoryError, ServiceError},
};
use async_trait::async_trait;
use tracing::info;

pub struct CartService {
    session_store: DynSessionStore,
    product_query: DynProductQueryRepository,
}

impl CartService {
    pub fn new(session_store: DynSessionStore, product_query: DynProductQueryRepository) -> Self {
        Self {
            session_store,
            product_query,
        }
    }

    fn response(message: &str, session: &SessionData) -> ApiResponse<CartResponse> {
        ApiResponse::success(message, CartResponse::from(session))
    }
}

#[async_trait]
impl CartServiceTrait for CartService {
    async fn view(&self, session_id: &str) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let session = self.session_store.load(session_id).await?;

        Ok(Self::response("Cart fetched successfully", &session))
    }

    async fn add_item(
        &self,
        session_id: &str,
        req: &AddCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        let product = self
            .product_query
            .find_by_id(req.product_id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        match session.cart.get_mut(&req.product_id) {
            Some(line) => {
                line.quantity += req.quantity;
            }
            None => {
                session.cart.insert(
                    req.product_id,
                    CartLine {
                        name: product.name.clone(),
                        description: product.description.unwrap_or_default(),
                        price: product.price,
                        quantity: req.quantity,
                        image_url: product.image_url.unwrap_or_default(),
                        stock: product.stock,
                    },
                );
            }
        }

        self.session_store.save(session_id, &session).await?;

        info!(
            "🛒 Added product ID {} (qty {}) to cart",
            req.product_id, req.quantity
        );

        Ok(Self::response("Product added to cart", &session))
    }

    async fn update_item(
        &self,
        session_id: &str,
        product_id: i32,
        req: &UpdateCartItemRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        let line = session
            .cart
            .get_mut(&product_id)
            .ok_or_else(|| ServiceError::Validation(vec!["Item not found in cart".to_string()]))?;

        match (req.action, req.quantity) {
            (Some(CartUpdateAction::Increase), _) => {
                line.quantity += 1;
            }
            (Some(CartUpdateAction::Decrease), _) => {
                // Floored at one; removing a line is an explicit operation.
                if line.quantity > 1 {
                    line.quantity -= 1;
                }
            }
            (None, Some(quantity)) => {
                if quantity <= 0 {
                    return Err(ServiceError::Validation(vec![
                        "Quantity must be greater than 0".to_string(),
                    ]));
                }
                line.quantity = quantity;
            }
            (None, None) => {
                return Err(ServiceError::Validation(vec![
                    "Either an action or a quantity is required".to_string(),
                ]));
            }
        }

        self.session_store.save(session_id, &session).await?;

        Ok(Self::response("Quantity updated", &session))
    }

    async fn remove_item(
        &self,
        session_id: &str,
        product_id: i32,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        if session.cart.remove(&product_id).is_some() {
            // The voucher goes with the last line.
            if session.cart.is_empty() {
                session.voucher = None;
            }

            self.session_store.save(session_id, &session).await?;

            info!("🗑️ Removed product ID {} from cart", product_id);
        }

        Ok(Self::response("Product removed from cart", &session))
    }

    async fn apply_voucher(
        &self,
        session_id: &str,
        req: &ApplyVoucherRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        match voucher::lookup(&req.code) {
            Some(voucher) => {
                info!("🎟️ Voucher {} applied", voucher.code);

                session.voucher = Some(voucher);
                self.session_store.save(session_id, &session).await?;

                Ok(Self::response("Voucher applied successfully", &session))
            }
            None => {
                // An invalid code also clears whatever was applied before.
                session.voucher = None;
                self.session_store.save(session_id, &session).await?;

                Err(ServiceError::InvalidVoucher(req.code.clone()))
            }
        }
    }

    async fn remove_voucher(
        &self,
        session_id: &str,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        session.voucher = None;
        self.session_store.save(session_id, &session).await?;

        Ok(Self::response("Voucher removed", &session))
    }

    async fn save_shipping(
        &self,
        session_id: &str,
        req: &ShippingInfoRequest,
    ) -> Result<ApiResponse<CartResponse>, ServiceError> {
        let mut session = self.session_store.load(session_id).await?;

        if session.cart.is_empty() {
            return Err(ServiceError::Validation(vec!["Cart is empty".to_string()]));
        }

        session.shipping = Some(ShippingInfo {
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            mobile_phone: req.mobile_phone.clone(),
            address: req.address.clone(),
            province: req.province.clone(),
            city: req.city.clone(),
            district: req.district.clone(),
            zip_code: req.zip_code.clone(),
        });

        self.session_store.save(session_id, &session).await?;

        Ok(Self::response("Shipping information saved", &session))
    }
}
