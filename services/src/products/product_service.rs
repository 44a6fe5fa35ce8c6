use crate::common::{ServiceError, ServiceResult};
use crate::model::{CreationResult, Product, ProductCreationRequest};
use crate::transport::{HttpRequest, HttpResponse, MultipartForm, Transport};
use serde::de::DeserializeOwned;
use std::sync::Arc;

pub const LIST_PRODUCTS_PATH: &str = "/get";
pub const ADD_PRODUCT_PATH: &str = "/add";

/// Client for the products collaborator.
///
/// Requests are sent once; on failure the caller decides whether to try
/// again.
pub struct ProductService {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ProductService {
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
        }
    }

    /// Fetches every product. Favorite flags come back unset.
    pub async fn list_products(&self) -> ServiceResult<Vec<Product>> {
        let url = format!("{}{LIST_PRODUCTS_PATH}", self.base_url);
        let response = self.transport.send(HttpRequest::get(url)).await?;

        let products: Vec<Product> = decode(&response)?;
        log::info!("Fetched {} products", products.len());
        Ok(products)
    }

    /// Uploads a new product as `multipart/form-data`.
    pub async fn create_product(
        &self,
        request: &ProductCreationRequest,
    ) -> ServiceResult<CreationResult> {
        let mut form = MultipartForm::new()
            .text("product_name", request.name.as_str())
            .text("product_type", request.category.as_str())
            .text("price", request.price.to_string())
            .text("tax", request.tax.to_string());

        if let Some(image) = &request.image {
            form = form.file(
                "files[]",
                image.file_name.as_str(),
                image.mime_type.as_str(),
                image.bytes.clone(),
            );
        }

        let url = format!("{}{ADD_PRODUCT_PATH}", self.base_url);

        log::info!("Creating product '{}'", request.name);
        let response = self
            .transport
            .send(HttpRequest::post_multipart(url, form))
            .await?;

        let result: CreationResult = decode(&response)?;
        log::info!(
            "Product created with id {}: {}",
            result.product_id,
            result.message
        );
        Ok(result)
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ServiceResult<T> {
    if !response.is_success() {
        log::warn!("Products request failed with status {}", response.status);
        return Err(ServiceError::InvalidResponse(format!(
            "unexpected status {}",
            response.status
        )));
    }

    serde_json::from_slice(&response.body).map_err(|e| {
        log::error!("Failed to decode products response: {e}");
        ServiceError::DecodingError(e.to_string())
    })
}
