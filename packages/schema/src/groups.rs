//! # Shared Structural Groups
//!
//! Small config groups that recur across block types. Each group is merged
//! key-wise during partial updates, so `{ "margin": { "top": 8 } }` only
//! touches `margin.top`.

use crate::{SchemaError, SchemaResult};
use serde::{Deserialize, Serialize};

/// Four-sided spacing in pixels, used for both margin and padding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub left: u32,
    pub right: u32,
    pub top: u32,
    pub bottom: u32,
}

impl Spacing {
    pub fn all(value: u32) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    pub fn symmetric(horizontal: u32, vertical: u32) -> Self {
        Self {
            left: horizontal,
            right: horizontal,
            top: vertical,
            bottom: vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxShadow {
    pub enabled: bool,
    pub blur: u32,
    /// 0.0 (transparent) to 1.0 (opaque)
    pub opacity: f64,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl Default for BoxShadow {
    fn default() -> Self {
        Self {
            enabled: false,
            blur: 8,
            opacity: 0.15,
            offset_x: 0,
            offset_y: 2,
        }
    }
}

impl BoxShadow {
    pub fn validate(&self, field: &str) -> SchemaResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(SchemaError::invalid(
                &format!("{field}.opacity"),
                format!("{} is outside 0.0..=1.0", self.opacity),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Border {
    pub enabled: bool,
    pub width: u32,
    pub color: String,
    pub radius: u32,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            enabled: false,
            width: 1,
            color: "#E5E7EB".to_string(),
            radius: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Medium,
    Bold,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_size: u32,
    pub font_weight: FontWeight,
    pub color: String,
    pub align: TextAlign,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 14,
            font_weight: FontWeight::Normal,
            color: "#111827".to_string(),
            align: TextAlign::Left,
        }
    }
}

impl TextStyle {
    pub fn validate(&self, field: &str) -> SchemaResult<()> {
        if self.font_size == 0 {
            return Err(SchemaError::invalid(
                &format!("{field}.fontSize"),
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Title row shown above list-like blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionHeader {
    pub text: String,
    pub height: u32,
    pub font_size: u32,
    pub color: String,
    pub show_view_all: bool,
}

impl Default for SectionHeader {
    fn default() -> Self {
        Self {
            text: String::new(),
            height: 40,
            font_size: 16,
            color: "#111827".to_string(),
            show_view_all: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    #[default]
    Featured,
    Category,
    Collection,
    Manual,
}

/// Where a product list pulls its items from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataSource {
    pub kind: DataSourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(default)]
    pub product_ids: Vec<String>,
    pub limit: u32,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            kind: DataSourceKind::Featured,
            category_id: None,
            collection_id: None,
            product_ids: Vec::new(),
            limit: 10,
        }
    }
}

impl DataSource {
    pub fn validate(&self, field: &str) -> SchemaResult<()> {
        if self.limit == 0 {
            return Err(SchemaError::invalid(
                &format!("{field}.limit"),
                "must be greater than zero",
            ));
        }
        match self.kind {
            DataSourceKind::Category if self.category_id.is_none() => Err(SchemaError::invalid(
                &format!("{field}.categoryId"),
                "required when kind is `category`",
            )),
            DataSourceKind::Collection if self.collection_id.is_none() => {
                Err(SchemaError::invalid(
                    &format!("{field}.collectionId"),
                    "required when kind is `collection`",
                ))
            }
            _ => Ok(()),
        }
    }
}
