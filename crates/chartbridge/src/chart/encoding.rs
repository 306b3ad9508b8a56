use super::FieldDef;

use serde::Deserialize;

/// Which column feeds each visual channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Encoding {
    #[serde(default)]
    pub x: Option<FieldDef>,
    #[serde(default)]
    pub y: Option<FieldDef>,
    #[serde(default)]
    pub x2: Option<FieldDef>,
    #[serde(default)]
    pub y2: Option<FieldDef>,
    #[serde(default)]
    pub color: Option<FieldDef>,
    #[serde(default)]
    pub opacity: Option<FieldDef>,
    #[serde(default)]
    pub size: Option<FieldDef>,
    #[serde(default)]
    pub shape: Option<FieldDef>,
    #[serde(default)]
    pub text: Option<FieldDef>,
    #[serde(default)]
    pub detail: Option<FieldDef>,
    #[serde(default)]
    pub tooltip: Vec<FieldDef>,
}

impl Encoding {
    pub fn x(mut self, def: impl Into<FieldDef>) -> Self {
        self.x = Some(def.into());
        self
    }

    pub fn y(mut self, def: impl Into<FieldDef>) -> Self {
        self.y = Some(def.into());
        self
    }

    pub fn x2(mut self, def: impl Into<FieldDef>) -> Self {
        self.x2 = Some(def.into());
        self
    }

    pub fn y2(mut self, def: impl Into<FieldDef>) -> Self {
        self.y2 = Some(def.into());
        self
    }

    pub fn color(mut self, def: impl Into<FieldDef>) -> Self {
        self.color = Some(def.into());
        self
    }

    pub fn opacity(mut self, def: impl Into<FieldDef>) -> Self {
        self.opacity = Some(def.into());
        self
    }

    pub fn size(mut self, def: impl Into<FieldDef>) -> Self {
        self.size = Some(def.into());
        self
    }

    pub fn shape(mut self, def: impl Into<FieldDef>) -> Self {
        self.shape = Some(def.into());
        self
    }

    pub fn text(mut self, def: impl Into<FieldDef>) -> Self {
        self.text = Some(def.into());
        self
    }

    pub fn detail(mut self, def: impl Into<FieldDef>) -> Self {
        self.detail = Some(def.into());
        self
    }

    pub fn tooltip(mut self, def: impl Into<FieldDef>) -> Self {
        self.tooltip.push(def.into());
        self
    }

    /// The single-field channels that are set, in a fixed order.
    pub fn channels(&self) -> impl Iterator<Item = (&'static str, &FieldDef)> + '_ {
        [
            ("x", &self.x),
            ("y", &self.y),
            ("x2", &self.x2),
            ("y2", &self.y2),
            ("color", &self.color),
            ("opacity", &self.opacity),
            ("size", &self.size),
            ("shape", &self.shape),
            ("text", &self.text),
            ("detail", &self.detail),
        ]
        .into_iter()
        .filter_map(|(channel, def)| def.as_ref().map(|def| (channel, def)))
    }

    pub fn is_empty(&self) -> bool {
        self.channels().next().is_none() && self.tooltip.is_empty()
    }
}
