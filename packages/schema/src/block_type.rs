use crate::SchemaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of block types a layout may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BlockType {
    Banner,
    Category,
    ProductCarousel,
    Button,
    HeaderSearch,
    Text,
    Spacer,
}

impl BlockType {
    /// Every block type, in palette order.
    pub const ALL: [BlockType; 7] = [
        BlockType::Banner,
        BlockType::Category,
        BlockType::ProductCarousel,
        BlockType::Button,
        BlockType::HeaderSearch,
        BlockType::Text,
        BlockType::Spacer,
    ];

    /// Wire name, as used in the `type` field of a stored block.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockType::Banner => "banner",
            BlockType::Category => "category",
            BlockType::ProductCarousel => "productCarousel",
            BlockType::Button => "button",
            BlockType::HeaderSearch => "headerSearch",
            BlockType::Text => "text",
            BlockType::Spacer => "spacer",
        }
    }

    /// Human readable label for block palettes.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Banner => "Banner",
            BlockType::Category => "Category grid",
            BlockType::ProductCarousel => "Product carousel",
            BlockType::Button => "Button",
            BlockType::HeaderSearch => "Header search",
            BlockType::Text => "Text",
            BlockType::Spacer => "Spacer",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| SchemaError::UnsupportedBlockType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip() {
        for block_type in BlockType::ALL {
            let parsed: BlockType = block_type.as_str().parse().unwrap();
            assert_eq!(parsed, block_type);

            let json = serde_json::to_string(&block_type).unwrap();
            assert_eq!(json, format!("\"{}\"", block_type.as_str()));
        }
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let result = "carousel3d".parse::<BlockType>();
        assert_eq!(
            result,
            Err(SchemaError::UnsupportedBlockType("carousel3d".to_string()))
        );
    }
}
