//! # Navigation / Action Targets
//!
//! What happens when a shopper taps a block. Serialized with an
//! `actionType` discriminator and only the fields that action needs:
//!
//! ```json
//! { "actionType": "open-category", "categoryId": "shoes" }
//! ```

use crate::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "kebab-case")]
pub enum ActionTarget {
    #[default]
    None,
    #[serde(rename_all = "camelCase")]
    OpenProduct { product_id: String },
    #[serde(rename_all = "camelCase")]
    OpenCategory { category_id: String },
    OpenScreen { screen: String },
    OpenTab { tab: String },
    OpenUrlWebview { url: String },
    OpenUrlExternal { url: String },
    #[serde(rename_all = "camelCase")]
    OpenBlog { blog_id: String },
    #[serde(rename_all = "camelCase")]
    OpenBlogCategory { category_id: String },
    #[serde(rename_all = "camelCase")]
    OpenCoupon { coupon_code: String },
}

/// Discriminator of an [`ActionTarget`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    None,
    OpenProduct,
    OpenCategory,
    OpenScreen,
    OpenTab,
    OpenUrlWebview,
    OpenUrlExternal,
    OpenBlog,
    OpenBlogCategory,
    OpenCoupon,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::None => "none",
            ActionType::OpenProduct => "open-product",
            ActionType::OpenCategory => "open-category",
            ActionType::OpenScreen => "open-screen",
            ActionType::OpenTab => "open-tab",
            ActionType::OpenUrlWebview => "open-url-webview",
            ActionType::OpenUrlExternal => "open-url-external",
            ActionType::OpenBlog => "open-blog",
            ActionType::OpenBlogCategory => "open-blog-category",
            ActionType::OpenCoupon => "open-coupon",
        }
    }
}

impl ActionTarget {
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionTarget::None => ActionType::None,
            ActionTarget::OpenProduct { .. } => ActionType::OpenProduct,
            ActionTarget::OpenCategory { .. } => ActionType::OpenCategory,
            ActionTarget::OpenScreen { .. } => ActionType::OpenScreen,
            ActionTarget::OpenTab { .. } => ActionType::OpenTab,
            ActionTarget::OpenUrlWebview { .. } => ActionType::OpenUrlWebview,
            ActionTarget::OpenUrlExternal { .. } => ActionType::OpenUrlExternal,
            ActionTarget::OpenBlog { .. } => ActionType::OpenBlog,
            ActionTarget::OpenBlogCategory { .. } => ActionType::OpenBlogCategory,
            ActionTarget::OpenCoupon { .. } => ActionType::OpenCoupon,
        }
    }

    /// Every action except `none` needs a non-empty target.
    pub fn validate(&self, field: &str) -> SchemaResult<()> {
        let (name, value) = match self {
            ActionTarget::None => return Ok(()),
            ActionTarget::OpenProduct { product_id } => ("productId", product_id),
            ActionTarget::OpenCategory { category_id } => ("categoryId", category_id),
            ActionTarget::OpenScreen { screen } => ("screen", screen),
            ActionTarget::OpenTab { tab } => ("tab", tab),
            ActionTarget::OpenUrlWebview { url } | ActionTarget::OpenUrlExternal { url } => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(SchemaError::invalid(
                        &format!("{field}.url"),
                        format!("`{url}` is not an http(s) URL"),
                    ));
                }
                ("url", url)
            }
            ActionTarget::OpenBlog { blog_id } => ("blogId", blog_id),
            ActionTarget::OpenBlogCategory { category_id } => ("categoryId", category_id),
            ActionTarget::OpenCoupon { coupon_code } => ("couponCode", coupon_code),
        };

        if value.trim().is_empty() {
            return Err(SchemaError::invalid(
                &format!("{field}.{name}"),
                format!("required for `{}`", self.action_type().as_str()),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_serialization() {
        let action = ActionTarget::OpenCategory {
            category_id: "shoes".to_string(),
        };
        let value = serde_json::to_value(&action).unwrap();
        assert_eq!(value, json!({ "actionType": "open-category", "categoryId": "shoes" }));

        let back: ActionTarget = serde_json::from_value(value).unwrap();
        assert_eq!(back, action);
    }

    #[test]
    fn test_none_has_only_discriminator() {
        let value = serde_json::to_value(ActionTarget::None).unwrap();
        assert_eq!(value, json!({ "actionType": "none" }));
    }

    #[test]
    fn test_unknown_action_type_rejected() {
        let result = serde_json::from_value::<ActionTarget>(json!({ "actionType": "open-cart" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_requires_target() {
        let action = ActionTarget::OpenCoupon {
            coupon_code: "  ".to_string(),
        };
        assert!(action.validate("action").is_err());

        let action = ActionTarget::OpenUrlExternal {
            url: "ftp://example.com".to_string(),
        };
        assert!(action.validate("action").is_err());

        let action = ActionTarget::OpenUrlWebview {
            url: "https://example.com/help".to_string(),
        };
        assert!(action.validate("action").is_ok());
    }
}
