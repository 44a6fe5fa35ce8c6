use serde::{Deserialize, Serialize};
use std::fmt;

/// A catalog entry as returned by the products collaborator.
///
/// `is_favorite` is a client-only annotation: it is never read from or
/// written to the server representation and is merged in from the local
/// store after a fetch.
///
/// # Examples
///
/// ```no_run
/// use services::model::{Product, ProductCategory};
///
/// let json = r#"{"product_id":1,"product_name":"Pen","product_type":"Product","price":10.0,"tax":5.0,"image":null}"#;
/// let product: Product = serde_json::from_str(json).unwrap();
/// assert_eq!(product.category, ProductCategory::Product);
/// assert!(!product.is_favorite);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier, absent until the product is created
    #[serde(rename = "product_id", default)]
    pub id: Option<i64>,
    #[serde(rename = "product_name")]
    pub name: String,
    #[serde(rename = "product_type")]
    pub category: ProductCategory,
    pub price: f64,
    /// Tax rate in percent
    pub tax: f64,
    /// Image URL, if the product has one
    #[serde(default)]
    pub image: Option<String>,
    #[serde(skip)]
    pub is_favorite: bool,
}

impl Product {
    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}

/// Product kind. Values the client does not know are kept verbatim so a new
/// server-side category never breaks decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProductCategory {
    Product,
    Service,
    Other(String),
}

impl ProductCategory {
    /// Categories offered when creating a product.
    pub const SELECTABLE: [ProductCategory; 2] = [ProductCategory::Product, ProductCategory::Service];

    pub fn as_str(&self) -> &str {
        match self {
            ProductCategory::Product => "Product",
            ProductCategory::Service => "Service",
            ProductCategory::Other(value) => value,
        }
    }
}

impl From<String> for ProductCategory {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Product" => ProductCategory::Product,
            "Service" => ProductCategory::Service,
            _ => ProductCategory::Other(value),
        }
    }
}

impl From<&str> for ProductCategory {
    fn from(value: &str) -> Self {
        ProductCategory::from(value.to_string())
    }
}

impl From<ProductCategory> for String {
    fn from(value: ProductCategory) -> Self {
        match value {
            ProductCategory::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Image attached to a creation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub mime_type: String,
}

impl ImageUpload {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            file_name: "image.jpg".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }
}

/// Validated input for creating a product. Discarded after submission.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCreationRequest {
    pub name: String,
    pub category: ProductCategory,
    pub price: f64,
    pub tax: f64,
    pub image: Option<ImageUpload>,
}

/// Acknowledgment returned by the products collaborator after a creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreationResult {
    pub message: String,
    pub product_details: Product,
    pub product_id: i64,
    pub success: bool,
}
