use super::{ChartConfig, Mark, TimeUnit, VisualType};
use crate::embed;

use chartbridge_core::{Error, Result};

use indexmap::IndexMap;
use serde::Serialize;

/// The Vega-Lite schema every specification declares.
pub const SCHEMA_URL: &str = "https://vega.github.io/schema/vega-lite/v5.json";

/// A serializable Vega-Lite specification with its data embedded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    #[serde(rename = "$schema")]
    schema: &'static str,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,

    mark: Mark,

    #[serde(skip_serializing_if = "Option::is_none")]
    width: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    height: Option<u32>,

    data: Data,

    encoding: IndexMap<&'static str, Channel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Data {
    values: Vec<IndexMap<String, serde_json::Value>>,
}

/// The encoding of one channel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Channel {
    Field(ChannelDef),
    List(Vec<ChannelDef>),
}

/// A resolved field definition, as emitted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDef {
    pub field: String,

    #[serde(rename = "type")]
    pub ty: VisualType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_unit: Option<TimeUnit>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl ChartSpec {
    pub(super) fn new(
        config: &ChartConfig,
        values: Vec<IndexMap<String, serde_json::Value>>,
        encoding: IndexMap<&'static str, Channel>,
    ) -> Self {
        Self {
            schema: SCHEMA_URL,
            title: config.title.clone(),
            description: config.description.clone(),
            mark: config.mark,
            width: config.width,
            height: config.height,
            data: Data { values },
            encoding,
        }
    }

    pub fn mark(&self) -> Mark {
        self.mark
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The embedded data records, in row order.
    pub fn values(&self) -> &[IndexMap<String, serde_json::Value>] {
        &self.data.values
    }

    pub fn channel(&self, name: &str) -> Option<&Channel> {
        self.encoding.get(name)
    }

    /// Iterates over every field the encoding references.
    pub fn encoded_fields(&self) -> impl Iterator<Item = &str> + '_ {
        self.encoding.values().flat_map(|channel| {
            let defs: &[ChannelDef] = match channel {
                Channel::Field(def) => std::slice::from_ref(def),
                Channel::List(defs) => defs,
            };
            defs.iter().map(|def| def.field.as_str())
        })
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|err| Error::encoding(err.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::encoding(err.to_string()))
    }

    /// Serializes to JSON that can be placed verbatim inside a `<script>`
    /// element.
    pub fn to_embeddable_json(&self) -> Result<String> {
        Ok(embed::script_safe(&self.to_json()?))
    }
}

impl Channel {
    pub fn as_field(&self) -> Option<&ChannelDef> {
        match self {
            Channel::Field(def) => Some(def),
            Channel::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ChannelDef]> {
        match self {
            Channel::List(defs) => Some(defs),
            Channel::Field(_) => None,
        }
    }
}
