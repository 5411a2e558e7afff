//! Canonical field names the engine's default configuration refers to.
//!
//! These are normalized header keys, so they must match what the header rule
//! table produces after normalization.

pub const STOCK_NUM: &str = "stock_num";
pub const SHAPE: &str = "shape";
pub const COLOR: &str = "color";
pub const CLARITY: &str = "clarity";
pub const LAB: &str = "lab";

pub const CARAT: &str = "carat";
pub const WEIGHT: &str = "weight";
pub const CARAT_WEIGHT: &str = "carat_weight";

pub const PRICE_PER_CARAT: &str = "price_per_carat";
pub const TOTAL_SALES_PRICE: &str = "total_sales_price";

pub const CUT_GRADE: &str = "cut_grade";
pub const CUT: &str = "cut";

// Proportions
pub const TABLE: &str = "table";
pub const DEPTH: &str = "depth";

pub const IMAGE_URL_1: &str = "image_url_1";
pub const VIDEO_URL_1: &str = "video_url_1";
pub const CERT_URL_1: &str = "cert_url_1";
