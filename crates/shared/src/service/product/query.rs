use crate::{
    abstract_trait::{DynProductQueryRepository, ProductQueryServiceTrait},
    domain::{
        requests::FindAllProducts,
        responses::{
            ApiResponse, ApiResponsePagination, Pagination, ProductDetailResponse, ProductResponse,
        },
    },
    errors::{RepositoryError, ServiceError},
};
use async_trait::async_trait;
use tracing::{error, info};

const RELATED_LIMIT: i64 = 4;

pub struct ProductQueryService {
    query: DynProductQueryRepository,
}

impl ProductQueryService {
    pub fn new(query: DynProductQueryRepository) -> Self {
        Self { query }
    }
}

#[async_trait]
impl ProductQueryServiceTrait for ProductQueryService {
    async fn find_all(
        &self,
        req: &FindAllProducts,
    ) -> Result<ApiResponsePagination<Vec<ProductResponse>>, ServiceError> {
        let (products, total) = self.query.find_all(req).await.map_err(|e| {
            error!("❌ Failed to fetch products: {e:?}");
            ServiceError::Repo(e)
        })?;

        let data = products.into_iter().map(ProductResponse::from).collect();

        Ok(ApiResponsePagination::success(
            "Products fetched successfully",
            data,
            Pagination::new(req.page, req.page_size, total),
        ))
    }

    async fn find_by_id(
        &self,
        id: i32,
    ) -> Result<ApiResponse<ProductDetailResponse>, ServiceError> {
        let product = self
            .query
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::Repo(RepositoryError::NotFound))?;

        let related = match product.category.as_deref() {
            Some(category) => self
                .query
                .find_related(category, id, RELATED_LIMIT)
                .await
                .unwrap_or_else(|e| {
                    // Related products are optional on the detail view.
                    error!("❌ Failed to fetch related products: {e:?}");
                    Vec::new()
                }),
            None => Vec::new(),
        };

        info!("✅ Product found with ID={id}");

        Ok(ApiResponse::success(
            "Product fetched successfully",
            ProductDetailResponse {
                product: ProductResponse::from(product),
                related: related.into_iter().map(ProductResponse::from).collect(),
            },
        ))
    }
}
