use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::Vendor;

pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AffiliateClick {
    #[serde(alias = "productId")]
    pub product_id: String,
    pub vendor: Vendor,
    #[serde(default, alias = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickReceipt {
    pub success: bool,
    pub user_id: String,
}

/// Records an outbound affiliate click. Only the log stream keeps it.
pub fn record_click(click: &AffiliateClick) -> ClickReceipt {
    let user_id = click
        .user_id
        .clone()
        .filter(|user| !user.is_empty())
        .unwrap_or_else(|| ANONYMOUS_USER.to_string());
    info!(
        product_id = %click.product_id,
        vendor = %click.vendor,
        user_id = %user_id,
        "affiliate click"
    );
    ClickReceipt {
        success: true,
        user_id,
    }
}
