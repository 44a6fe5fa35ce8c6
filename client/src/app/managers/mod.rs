pub mod product_form_manager;
pub mod product_list_manager;
pub mod session_manager;

pub use product_form_manager::{ProductForm, ProductFormManager, ProductFormState};
pub use product_list_manager::{ProductListManager, ProductListState, filter_products};
pub use session_manager::SessionManager;
