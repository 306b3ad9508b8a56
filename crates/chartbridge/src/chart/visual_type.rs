use chartbridge_core::{stmt::Type, Error, Result};

use serde::Serialize;
use std::fmt;

/// How a channel interprets its field's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualType {
    Quantitative,
    Temporal,
    Nominal,
    Ordinal,
}

impl VisualType {
    /// Parses a type name or its one-letter abbreviation (`Q`, `T`, `N`,
    /// `O`) declared for `channel`.
    pub fn parse(channel: &str, s: &str) -> Result<Self> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "quantitative" | "q" => VisualType::Quantitative,
            "temporal" | "t" => VisualType::Temporal,
            "nominal" | "n" => VisualType::Nominal,
            "ordinal" | "o" => VisualType::Ordinal,
            _ => return Err(Error::invalid_encoding_type(channel, s)),
        })
    }

    /// The type a channel gets when none is declared.
    pub fn infer(ty: Option<Type>) -> Self {
        match ty {
            Some(ty) if ty.is_temporal() => VisualType::Temporal,
            Some(ty) if ty.is_numeric() => VisualType::Quantitative,
            _ => VisualType::Nominal,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            VisualType::Quantitative => "quantitative",
            VisualType::Temporal => "temporal",
            VisualType::Nominal => "nominal",
            VisualType::Ordinal => "ordinal",
        }
    }
}

impl fmt::Display for VisualType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<VisualType> for String {
    fn from(value: VisualType) -> Self {
        value.as_str().to_string()
    }
}
