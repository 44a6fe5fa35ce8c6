use services::model::Product;

/// Events emitted by the managers for the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    AuthActivity(AuthActivityMsg),
    ProductActivity(ProductActivityMsg),
    FormActivity(FormActivityMsg),
    LoadingActivity(LoadingActivityMsg),
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthActivityMsg {
    /// The observable authentication flag changed value (or was re-set)
    AuthenticationChanged(bool),
    AuthenticationFailed(String),
    /// Registration succeeded and a code was sent for this user
    VerificationRequired {
        user_id: Option<String>,
        message: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProductActivityMsg {
    ProductsLoaded(usize),
    FetchFailed(String),
    FilteredViewChanged(Vec<Product>),
    FavoriteToggled { product_id: i64, is_favorite: bool },
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormActivityMsg {
    ValidationFailed { field: String, message: String },
    ProductCreated { product_id: i64, message: String },
    SubmissionFailed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadingActivityMsg {
    Start(String),
    Stop,
}
