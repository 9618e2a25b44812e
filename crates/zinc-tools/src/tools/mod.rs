//! Built-in shopping tools.

mod product_info;
mod purchase;
mod search;

pub use product_info::{ProductDetails, ProductReviews, ProductVariants};
pub use purchase::ProductPurchase;
pub use search::ProductSearch;

/// Length of a retailer product id.
pub const PRODUCT_ID_LEN: usize = 10;
