use crate::app::msg::{FormActivityMsg, LoadingActivityMsg, Msg};
use crate::app::notify;
use crate::validation::{PRODUCT_NAME, PRODUCT_PRICE, PRODUCT_TAX, PRODUCT_TYPE, Validator};
use services::model::{CreationResult, ImageUpload, ProductCategory, ProductCreationRequest};
use services::products::ProductService;
use services::{ServiceError, ServiceResult};
use std::sync::Arc;
use std::sync::mpsc::Sender;

/// Raw form input, kept as typed until validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub category: Option<ProductCategory>,
    pub price: String,
    pub tax: String,
    pub image: Option<ImageUpload>,
}

impl ProductForm {
    /// Checks the fields in order and stops at the first invalid one.
    pub fn validate(&self) -> ServiceResult<ProductCreationRequest> {
        PRODUCT_NAME.validate(self.name.as_str())?;

        let category = self
            .category
            .clone()
            .filter(|category| !category.as_str().trim().is_empty());
        let Some(category) = category else {
            return Err(PRODUCT_TYPE.error());
        };

        let price = PRODUCT_PRICE.parse(&self.price)?;
        let tax = PRODUCT_TAX.parse(&self.tax)?;

        Ok(ProductCreationRequest {
            name: self.name.trim().to_string(),
            category,
            price,
            tax,
            image: self.image.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductFormState {
    pub form: ProductForm,
    pub is_loading: bool,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

/// Collects input for a new product and submits it.
pub struct ProductFormManager {
    service: Arc<ProductService>,
    state: ProductFormState,
    tx: Sender<Msg>,
}

impl ProductFormManager {
    pub fn new(service: Arc<ProductService>, tx: Sender<Msg>) -> Self {
        Self {
            service,
            state: ProductFormState::default(),
            tx,
        }
    }

    pub fn categories() -> Vec<ProductCategory> {
        ProductCategory::SELECTABLE.to_vec()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.state.form.name = name.into();
    }

    pub fn set_category(&mut self, category: ProductCategory) {
        self.state.form.category = Some(category);
    }

    pub fn set_price(&mut self, price: impl Into<String>) {
        self.state.form.price = price.into();
    }

    pub fn set_tax(&mut self, tax: impl Into<String>) {
        self.state.form.tax = tax.into();
    }

    pub fn set_image(&mut self, image: Option<ImageUpload>) {
        self.state.form.image = image;
    }

    pub fn state(&self) -> &ProductFormState {
        &self.state
    }

    pub fn form(&self) -> &ProductForm {
        &self.state.form
    }

    pub fn validate(&self) -> ServiceResult<ProductCreationRequest> {
        self.state.form.validate()
    }

    /// Validates and uploads the form.
    ///
    /// Invalid input never reaches the network. On success every field and
    /// the image are cleared; on failure they stay so the user can retry.
    pub async fn submit(&mut self) -> ServiceResult<CreationResult> {
        let request = match self.validate() {
            Ok(request) => request,
            Err(e) => {
                self.state.error_message = Some(e.to_string());
                self.state.success_message = None;
                if let ServiceError::ValidationError { field, message } = &e {
                    notify(
                        &self.tx,
                        Msg::FormActivity(FormActivityMsg::ValidationFailed {
                            field: field.clone(),
                            message: message.clone(),
                        }),
                    );
                }
                return Err(e);
            }
        };

        self.state.is_loading = true;
        self.state.error_message = None;
        self.state.success_message = None;
        notify(
            &self.tx,
            Msg::LoadingActivity(LoadingActivityMsg::Start("Adding product...".to_string())),
        );

        let result = self.service.create_product(&request).await;
        self.state.is_loading = false;
        notify(&self.tx, Msg::LoadingActivity(LoadingActivityMsg::Stop));

        match result {
            Ok(created) => {
                self.state.form = ProductForm::default();
                self.state.success_message = Some(created.message.clone());
                notify(
                    &self.tx,
                    Msg::FormActivity(FormActivityMsg::ProductCreated {
                        product_id: created.product_id,
                        message: created.message.clone(),
                    }),
                );
                Ok(created)
            }
            Err(e) => {
                let message = format!("Failed to add product: {e}");
                log::error!("{message}");
                self.state.error_message = Some(message.clone());
                notify(
                    &self.tx,
                    Msg::FormActivity(FormActivityMsg::SubmissionFailed(message)),
                );
                Err(e)
            }
        }
    }
}
