use chartbridge_core::{Error, Result};

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The graphical mark a chart draws for each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bar,
    Line,
    Point,
    Area,
    Tick,
    Rect,
    Rule,
    Circle,
    Square,
    Text,
    Arc,
    Trail,
}

impl Mark {
    pub const ALL: &'static [Mark] = &[
        Mark::Bar,
        Mark::Line,
        Mark::Point,
        Mark::Area,
        Mark::Tick,
        Mark::Rect,
        Mark::Rule,
        Mark::Circle,
        Mark::Square,
        Mark::Text,
        Mark::Arc,
        Mark::Trail,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mark::Bar => "bar",
            Mark::Line => "line",
            Mark::Point => "point",
            Mark::Area => "area",
            Mark::Tick => "tick",
            Mark::Rect => "rect",
            Mark::Rule => "rule",
            Mark::Circle => "circle",
            Mark::Square => "square",
            Mark::Text => "text",
            Mark::Arc => "arc",
            Mark::Trail => "trail",
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mark {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Mark::ALL
            .iter()
            .copied()
            .find(|mark| mark.as_str() == s)
            .ok_or_else(|| Error::encoding(format!("unknown mark `{s}`")))
    }
}
