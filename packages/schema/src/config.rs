//! # Block Configurations
//!
//! One struct per block type, wrapped in the tagged [`BlockConfig`] variant.
//! On the wire a block config is adjacently tagged:
//!
//! ```json
//! { "type": "banner", "config": { "height": 180, ... } }
//! ```

use crate::groups::{Border, BoxShadow, DataSource, SectionHeader, Spacing, TextStyle};
use crate::{merge, ActionTarget, BlockType, SchemaError, SchemaResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub height: u32,
    pub border_radius: u32,
    pub margin: Spacing,
    pub padding: Spacing,
    pub shadow: BoxShadow,
    pub action: ActionTarget,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            image_url: None,
            title: None,
            subtitle: None,
            height: 180,
            border_radius: 12,
            margin: Spacing::symmetric(16, 8),
            padding: Spacing::default(),
            shadow: BoxShadow::default(),
            action: ActionTarget::None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLayout {
    #[default]
    Grid,
    Row,
    Carousel,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconShape {
    #[default]
    Circle,
    Square,
    Rounded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryIcon {
    pub size: u32,
    pub shape: IconShape,
    pub background_color: String,
}

impl Default for CategoryIcon {
    fn default() -> Self {
        Self {
            size: 56,
            shape: IconShape::Circle,
            background_color: "#F3F4F6".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryItem {
    pub category_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub action: ActionTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub header: SectionHeader,
    pub layout: CategoryLayout,
    pub columns: u8,
    pub icon: CategoryIcon,
    pub show_labels: bool,
    pub label: TextStyle,
    pub border: Border,
    pub shadow: BoxShadow,
    pub margin: Spacing,
    pub padding: Spacing,
    #[serde(default)]
    pub items: Vec<CategoryItem>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            header: SectionHeader {
                text: "Shop by category".to_string(),
                ..SectionHeader::default()
            },
            layout: CategoryLayout::Grid,
            columns: 4,
            icon: CategoryIcon::default(),
            show_labels: true,
            label: TextStyle {
                font_size: 12,
                ..TextStyle::default()
            },
            border: Border::default(),
            shadow: BoxShadow::default(),
            margin: Spacing::symmetric(16, 8),
            padding: Spacing::all(8),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCarouselConfig {
    pub header: SectionHeader,
    pub data_source: DataSource,
    pub items_per_view: f64,
    pub show_price: bool,
    pub show_rating: bool,
    pub autoplay: bool,
    pub margin: Spacing,
    pub padding: Spacing,
    pub shadow: BoxShadow,
}

impl Default for ProductCarouselConfig {
    fn default() -> Self {
        Self {
            header: SectionHeader {
                text: "Featured products".to_string(),
                show_view_all: true,
                ..SectionHeader::default()
            },
            data_source: DataSource::default(),
            items_per_view: 2.5,
            show_price: true,
            show_rating: false,
            autoplay: false,
            margin: Spacing::symmetric(0, 8),
            padding: Spacing::symmetric(16, 0),
            shadow: BoxShadow::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonVariant {
    #[default]
    Filled,
    Outlined,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonConfig {
    pub label: String,
    pub variant: ButtonVariant,
    pub background_color: String,
    pub text_color: String,
    pub border_radius: u32,
    pub full_width: bool,
    pub margin: Spacing,
    pub padding: Spacing,
    pub action: ActionTarget,
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            label: "Shop now".to_string(),
            variant: ButtonVariant::Filled,
            background_color: "#111827".to_string(),
            text_color: "#FFFFFF".to_string(),
            border_radius: 8,
            full_width: false,
            margin: Spacing::symmetric(16, 8),
            padding: Spacing::symmetric(20, 12),
            action: ActionTarget::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInputStyle {
    pub background_color: String,
    pub border_radius: u32,
    pub height: u32,
    pub icon_color: String,
}

impl Default for SearchInputStyle {
    fn default() -> Self {
        Self {
            background_color: "#F3F4F6".to_string(),
            border_radius: 20,
            height: 40,
            icon_color: "#6B7280".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderSearchConfig {
    pub placeholder: String,
    pub text: TextStyle,
    pub input: SearchInputStyle,
    pub margin: Spacing,
    pub padding: Spacing,
    pub shadow: BoxShadow,
    pub action: ActionTarget,
}

impl Default for HeaderSearchConfig {
    fn default() -> Self {
        Self {
            placeholder: "Search products".to_string(),
            text: TextStyle {
                color: "#6B7280".to_string(),
                ..TextStyle::default()
            },
            input: SearchInputStyle::default(),
            margin: Spacing::default(),
            padding: Spacing::symmetric(16, 8),
            shadow: BoxShadow::default(),
            action: ActionTarget::OpenScreen {
                screen: "search".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextConfig {
    pub content: String,
    pub style: TextStyle,
    pub margin: Spacing,
    pub padding: Spacing,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            content: "Add your text here".to_string(),
            style: TextStyle::default(),
            margin: Spacing::symmetric(16, 8),
            padding: Spacing::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerConfig {
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

impl Default for SpacerConfig {
    fn default() -> Self {
        Self {
            height: 16,
            background_color: None,
        }
    }
}

/// Config of a single block, tagged by its type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "config", rename_all = "camelCase")]
pub enum BlockConfig {
    Banner(BannerConfig),
    Category(CategoryConfig),
    ProductCarousel(ProductCarouselConfig),
    Button(ButtonConfig),
    HeaderSearch(HeaderSearchConfig),
    Text(TextConfig),
    Spacer(SpacerConfig),
}

impl BlockConfig {
    /// A freshly allocated default config for `block_type`.
    pub fn default_for(block_type: BlockType) -> Self {
        match block_type {
            BlockType::Banner => BlockConfig::Banner(BannerConfig::default()),
            BlockType::Category => BlockConfig::Category(CategoryConfig::default()),
            BlockType::ProductCarousel => {
                BlockConfig::ProductCarousel(ProductCarouselConfig::default())
            }
            BlockType::Button => BlockConfig::Button(ButtonConfig::default()),
            BlockType::HeaderSearch => BlockConfig::HeaderSearch(HeaderSearchConfig::default()),
            BlockType::Text => BlockConfig::Text(TextConfig::default()),
            BlockType::Spacer => BlockConfig::Spacer(SpacerConfig::default()),
        }
    }

    pub fn block_type(&self) -> BlockType {
        match self {
            BlockConfig::Banner(_) => BlockType::Banner,
            BlockConfig::Category(_) => BlockType::Category,
            BlockConfig::ProductCarousel(_) => BlockType::ProductCarousel,
            BlockConfig::Button(_) => BlockType::Button,
            BlockConfig::HeaderSearch(_) => BlockType::HeaderSearch,
            BlockConfig::Text(_) => BlockType::Text,
            BlockConfig::Spacer(_) => BlockType::Spacer,
        }
    }

    /// The inner config object, without the type tag.
    pub fn to_value(&self) -> SchemaResult<Value> {
        let result = match self {
            BlockConfig::Banner(c) => serde_json::to_value(c),
            BlockConfig::Category(c) => serde_json::to_value(c),
            BlockConfig::ProductCarousel(c) => serde_json::to_value(c),
            BlockConfig::Button(c) => serde_json::to_value(c),
            BlockConfig::HeaderSearch(c) => serde_json::to_value(c),
            BlockConfig::Text(c) => serde_json::to_value(c),
            BlockConfig::Spacer(c) => serde_json::to_value(c),
        };
        result.map_err(|e| SchemaError::ShapeMismatch {
            block_type: self.block_type().to_string(),
            message: e.to_string(),
        })
    }

    /// Decode a config object for `block_type`.
    ///
    /// Fails if a field is missing or mistyped, if the object carries a field
    /// the type does not declare, or if a value breaks a range rule.
    pub fn from_parts(block_type: BlockType, value: Value) -> SchemaResult<Self> {
        if !value.is_object() {
            return Err(SchemaError::NotAnObject(merge::json_kind(&value).to_string()));
        }

        let config = match block_type {
            BlockType::Banner => BlockConfig::Banner(decode(block_type, &value)?),
            BlockType::Category => BlockConfig::Category(decode(block_type, &value)?),
            BlockType::ProductCarousel => {
                BlockConfig::ProductCarousel(decode(block_type, &value)?)
            }
            BlockType::Button => BlockConfig::Button(decode(block_type, &value)?),
            BlockType::HeaderSearch => BlockConfig::HeaderSearch(decode(block_type, &value)?),
            BlockType::Text => BlockConfig::Text(decode(block_type, &value)?),
            BlockType::Spacer => BlockConfig::Spacer(decode(block_type, &value)?),
        };

        // serde ignores unknown keys; compare against the canonical encoding
        // to catch fields the type does not declare.
        let canonical = config.to_value()?;
        if let Some(path) = merge::find_unknown_path(&value, &canonical) {
            return Err(SchemaError::UnknownField {
                block_type: block_type.to_string(),
                path,
            });
        }

        config.validate()?;
        Ok(config)
    }

    /// Merge a partial config object over this one and return the result.
    ///
    /// `self` is left untouched, so a rejected update never leaks into the
    /// caller's document.
    pub fn with_partial(&self, partial: &Value) -> SchemaResult<Self> {
        if !partial.is_object() {
            return Err(SchemaError::NotAnObject(merge::json_kind(partial).to_string()));
        }
        let merged = merge::merge_partial(self.to_value()?, partial);
        Self::from_parts(self.block_type(), merged)
    }

    /// Range and reference rules that the type system cannot express.
    pub fn validate(&self) -> SchemaResult<()> {
        match self {
            BlockConfig::Banner(c) => {
                c.shadow.validate("shadow")?;
                c.action.validate("action")
            }
            BlockConfig::Category(c) => {
                if !(1..=6).contains(&c.columns) {
                    return Err(SchemaError::invalid(
                        "columns",
                        format!("{} is outside 1..=6", c.columns),
                    ));
                }
                c.label.validate("label")?;
                c.shadow.validate("shadow")?;
                for (index, item) in c.items.iter().enumerate() {
                    if item.category_id.trim().is_empty() {
                        return Err(SchemaError::invalid(
                            &format!("items[{index}].categoryId"),
                            "must not be empty",
                        ));
                    }
                    item.action.validate(&format!("items[{index}].action"))?;
                }
                Ok(())
            }
            BlockConfig::ProductCarousel(c) => {
                if c.items_per_view <= 0.0 {
                    return Err(SchemaError::invalid(
                        "itemsPerView",
                        "must be greater than zero",
                    ));
                }
                c.data_source.validate("dataSource")?;
                c.shadow.validate("shadow")
            }
            BlockConfig::Button(c) => {
                if c.label.trim().is_empty() {
                    return Err(SchemaError::invalid("label", "must not be empty"));
                }
                c.action.validate("action")
            }
            BlockConfig::HeaderSearch(c) => {
                c.text.validate("text")?;
                c.shadow.validate("shadow")?;
                c.action.validate("action")
            }
            BlockConfig::Text(c) => c.style.validate("style"),
            BlockConfig::Spacer(_) => Ok(()),
        }
    }
}

fn decode<T: DeserializeOwned>(block_type: BlockType, value: &Value) -> SchemaResult<T> {
    T::deserialize(value).map_err(|e| SchemaError::ShapeMismatch {
        block_type: block_type.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_every_default_is_valid() {
        for block_type in BlockType::ALL {
            let config = BlockConfig::default_for(block_type);
            assert_eq!(config.block_type(), block_type);
            assert!(config.validate().is_ok(), "default for {block_type} should validate");
        }
    }

    #[test]
    fn test_defaults_round_trip_through_from_parts() {
        for block_type in BlockType::ALL {
            let config = BlockConfig::default_for(block_type);
            let value = config.to_value().unwrap();
            let decoded = BlockConfig::from_parts(block_type, value).unwrap();
            assert_eq!(decoded, config);
        }
    }

    #[test]
    fn test_adjacent_tagging() {
        let config = BlockConfig::default_for(BlockType::Spacer);
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value, json!({ "type": "spacer", "config": { "height": 16 } }));
    }

    #[test]
    fn test_unset_optionals_are_absent() {
        let value = BlockConfig::default_for(BlockType::Banner).to_value().unwrap();
        let object = value.as_object().unwrap();
        assert!(!object.contains_key("imageUrl"));
        assert!(!object.contains_key("title"));
    }

    #[test]
    fn test_partial_update_keeps_siblings() {
        let config = BlockConfig::default_for(BlockType::ProductCarousel);
        let updated = config
            .with_partial(&json!({ "header": { "text": "Hello" } }))
            .unwrap()
            .with_partial(&json!({ "header": { "height": 60 } }))
            .unwrap();

        match updated {
            BlockConfig::ProductCarousel(c) => {
                assert_eq!(c.header.text, "Hello");
                assert_eq!(c.header.height, 60);
                assert_eq!(c.header.font_size, 16);
                assert!(c.show_price);
            }
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_invented_field_is_rejected() {
        let config = BlockConfig::default_for(BlockType::Button);
        let result = config.with_partial(&json!({ "margin": { "diagonal": 4 } }));
        assert_eq!(
            result,
            Err(SchemaError::UnknownField {
                block_type: "button".to_string(),
                path: "margin.diagonal".to_string(),
            })
        );
    }

    #[test]
    fn test_wrong_type_is_shape_mismatch() {
        let config = BlockConfig::default_for(BlockType::Banner);
        let result = config.with_partial(&json!({ "height": "tall" }));
        assert!(matches!(result, Err(SchemaError::ShapeMismatch { .. })));
    }

    #[test]
    fn test_null_clears_optional_field() {
        let config = BlockConfig::default_for(BlockType::Banner)
            .with_partial(&json!({ "title": "Sale" }))
            .unwrap();
        let cleared = config.with_partial(&json!({ "title": null })).unwrap();
        match cleared {
            BlockConfig::Banner(c) => assert_eq!(c.title, None),
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_switching_action_type_replaces_payload() {
        let config = BlockConfig::default_for(BlockType::Banner)
            .with_partial(&json!({ "action": { "actionType": "open-product", "productId": "p-1" } }))
            .unwrap();
        let switched = config
            .with_partial(&json!({ "action": { "actionType": "open-url-external", "url": "https://example.com" } }))
            .unwrap();
        match switched {
            BlockConfig::Banner(c) => assert_eq!(
                c.action,
                ActionTarget::OpenUrlExternal {
                    url: "https://example.com".to_string()
                }
            ),
            other => panic!("unexpected config: {other:?}"),
        }
    }

    #[test]
    fn test_range_rules() {
        let config = BlockConfig::default_for(BlockType::Category);
        assert!(config.with_partial(&json!({ "columns": 9 })).is_err());
        assert!(config.with_partial(&json!({ "shadow": { "opacity": 2.0 } })).is_err());
        assert!(config.with_partial(&json!({ "columns": 3 })).is_ok());
    }

    #[test]
    fn test_non_object_partial() {
        let config = BlockConfig::default_for(BlockType::Text);
        assert_eq!(
            config.with_partial(&json!([1, 2])),
            Err(SchemaError::NotAnObject("array".to_string()))
        );
    }
}
