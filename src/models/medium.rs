//! Artistic medium enumeration.
//!
//! An order carries a set of selected mediums rather than a fixed row of
//! boolean columns, so "selected mediums" is a simple set-membership query.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Artistic medium a customer can select for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Medium {
    Acrylic,
    Charcoal,
    Ink,
    Pencil,
    OilPaint,
    Pastel,
    Digital,
    DigitalTattooStencil,
    SyntheticSkin,
    Watercolor,
}

impl Medium {
    /// All known mediums, in display order.
    pub const ALL: [Medium; 10] = [
        Medium::Acrylic,
        Medium::Charcoal,
        Medium::Ink,
        Medium::Pencil,
        Medium::OilPaint,
        Medium::Pastel,
        Medium::Digital,
        Medium::DigitalTattooStencil,
        Medium::SyntheticSkin,
        Medium::Watercolor,
    ];

    /// Get medium name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Acrylic => "acrylic",
            Self::Charcoal => "charcoal",
            Self::Ink => "ink",
            Self::Pencil => "pencil",
            Self::OilPaint => "oil_paint",
            Self::Pastel => "pastel",
            Self::Digital => "digital",
            Self::DigitalTattooStencil => "digital_tattoo_stencil",
            Self::SyntheticSkin => "synthetic_skin",
            Self::Watercolor => "watercolor",
        }
    }

    /// Parse a stored medium name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "acrylic" => Some(Self::Acrylic),
            "charcoal" => Some(Self::Charcoal),
            "ink" => Some(Self::Ink),
            "pencil" => Some(Self::Pencil),
            "oil_paint" => Some(Self::OilPaint),
            "pastel" => Some(Self::Pastel),
            "digital" => Some(Self::Digital),
            "digital_tattoo_stencil" => Some(Self::DigitalTattooStencil),
            "synthetic_skin" => Some(Self::SyntheticSkin),
            "watercolor" => Some(Self::Watercolor),
            _ => None,
        }
    }
}

impl std::fmt::Display for Medium {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medium_round_trip() {
        for medium in Medium::ALL {
            assert_eq!(Medium::parse(medium.as_str()), Some(medium));
        }
    }

    #[test]
    fn test_medium_parse_unknown() {
        assert_eq!(Medium::parse("crayon"), None);
        assert_eq!(Medium::parse(""), None);
    }
}
