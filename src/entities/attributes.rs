//! Enumerated clothing attributes shared by items and outfits.
//!
//! Stored as lowercase strings so the table contents stay readable and match
//! the values model providers are asked to return.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Garment category of an item
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Shirts, blouses, jumpers
    #[sea_orm(string_value = "tops")]
    Tops,
    /// Trousers, skirts, shorts
    #[sea_orm(string_value = "bottoms")]
    Bottoms,
    /// Dresses
    #[sea_orm(string_value = "dresses")]
    Dresses,
    /// Footwear
    #[sea_orm(string_value = "shoes")]
    Shoes,
    /// Everything else worn
    #[sea_orm(string_value = "accessories")]
    Accessories,
}

/// Season an item or outfit is meant for
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// Any time of year
    #[sea_orm(string_value = "all")]
    All,
    /// Summer
    #[sea_orm(string_value = "summer")]
    Summer,
    /// Winter
    #[sea_orm(string_value = "winter")]
    Winter,
    /// Spring
    #[sea_orm(string_value = "spring")]
    Spring,
    /// Autumn
    #[sea_orm(string_value = "autumn")]
    Autumn,
}

/// Occasion an item is suited for
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Occasion {
    /// Everyday wear
    #[sea_orm(string_value = "casual")]
    Casual,
    /// Office, ceremonies
    #[sea_orm(string_value = "formal")]
    Formal,
    /// Evenings out
    #[sea_orm(string_value = "party")]
    Party,
    /// Training and outdoor activity
    #[sea_orm(string_value = "sports")]
    Sports,
    /// Anything not covered above
    #[sea_orm(string_value = "other")]
    Other,
}

/// Returned when a string does not name any variant of an attribute enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAttribute(pub String);

impl fmt::Display for UnknownAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown attribute value '{}'", self.0)
    }
}

impl std::error::Error for UnknownAttribute {}

macro_rules! string_attribute {
    ($ty:ident { $($variant:ident => $value:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase storage and prompt representation
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }
        }

        impl FromStr for $ty {
            type Err = UnknownAttribute;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($value => Ok(Self::$variant),)+
                    _ => Err(UnknownAttribute(s.to_string())),
                }
            }
        }
    };
}

// Lowercase names double as the `string_value`s above.
string_attribute!(Category {
    Tops => "tops",
    Bottoms => "bottoms",
    Dresses => "dresses",
    Shoes => "shoes",
    Accessories => "accessories",
});

string_attribute!(Season {
    All => "all",
    Summer => "summer",
    Winter => "winter",
    Spring => "spring",
    Autumn => "autumn",
});

string_attribute!(Occasion {
    Casual => "casual",
    Formal => "formal",
    Party => "party",
    Sports => "sports",
    Other => "other",
});
