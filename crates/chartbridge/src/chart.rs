//! Vega-Lite chart specifications built from columnar tables.

mod encoding;
pub use encoding::Encoding;

mod field_def;
pub use field_def::FieldDef;

mod mark;
pub use mark::Mark;

mod spec;
pub use spec::{Channel, ChannelDef, ChartSpec, SCHEMA_URL};

mod time_unit;
pub use time_unit::TimeUnit;

mod visual_type;
pub use visual_type::VisualType;

use crate::ColumnarTable;

use chartbridge_core::{stmt::Value, Error, Result};

use indexmap::IndexMap;
use serde::Deserialize;

/// A declarative chart request: the mark, the channel encodings and
/// top-level display properties.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChartConfig {
    pub mark: Mark,

    #[serde(default)]
    pub encoding: Encoding,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub width: Option<u32>,

    #[serde(default)]
    pub height: Option<u32>,
}

impl ChartConfig {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            encoding: Encoding::default(),
            title: None,
            description: None,
            width: None,
            height: None,
        }
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height);
        self
    }
}

/// Builds a chart specification embedding every row of `table`.
///
/// Every channel must reference a column of `table`. Channels without a
/// declared type get one inferred from the column's values. The table is
/// not modified; time units are emitted for the renderer to apply.
pub fn build(table: &ColumnarTable, config: &ChartConfig) -> Result<ChartSpec> {
    let mut encoding = IndexMap::new();

    for (channel, def) in config.encoding.channels() {
        let def = channel_def(table, channel, def)?;
        encoding.insert(channel, Channel::Field(def));
    }

    if !config.encoding.tooltip.is_empty() {
        let defs = config
            .encoding
            .tooltip
            .iter()
            .map(|def| channel_def(table, "tooltip", def))
            .collect::<Result<Vec<_>>>()?;
        encoding.insert("tooltip", Channel::List(defs));
    }

    Ok(ChartSpec::new(config, data_values(table)?, encoding))
}

fn channel_def(table: &ColumnarTable, channel: &str, def: &FieldDef) -> Result<ChannelDef> {
    let Some(values) = table.column(&def.field) else {
        return Err(Error::encoding(format!(
            "channel `{channel}` references column `{}`, which is not in the data",
            def.field
        )));
    };

    let ty = match (&def.ty, &def.time_unit) {
        (Some(ty), _) => VisualType::parse(channel, ty)?,
        (None, Some(_)) => VisualType::Temporal,
        (None, None) => {
            VisualType::infer(values.iter().find_map(Value::infer_ty))
        }
    };

    let time_unit = match &def.time_unit {
        Some(unit) if ty != VisualType::Temporal => {
            return Err(Error::encoding(format!(
                "time unit `{unit}` on channel `{channel}`, which is {ty} rather than temporal"
            )));
        }
        Some(unit) => Some(TimeUnit::parse(channel, unit)?),
        None => None,
    };

    Ok(ChannelDef {
        field: def.field.clone(),
        ty,
        title: def.title.clone(),
        time_unit,
        format: def.format.clone(),
    })
}

fn data_values(table: &ColumnarTable) -> Result<Vec<IndexMap<String, serde_json::Value>>> {
    let mut rows = Vec::with_capacity(table.len());

    for index in 0..table.len() {
        let Some(record) = table.record(index) else {
            break;
        };

        let row = record
            .map(|(name, value)| Ok((name.to_string(), json_value(name, value)?)))
            .collect::<Result<IndexMap<_, _>>>()?;

        rows.push(row);
    }

    Ok(rows)
}

fn json_value(column: &str, value: &Value) -> Result<serde_json::Value> {
    use serde_json::Value as Json;

    Ok(match value {
        Value::Null => Json::Null,
        Value::Bool(v) => Json::Bool(*v),
        Value::I64(v) => Json::from(*v),
        Value::U64(v) => Json::from(*v),
        Value::F64(v) => match serde_json::Number::from_f64(*v) {
            Some(v) => Json::Number(v),
            None => {
                return Err(Error::encoding(format!(
                    "column `{column}` holds {v}, which has no JSON representation"
                )))
            }
        },
        Value::String(v) => Json::String(v.clone()),
        Value::Date(v) => Json::String(v.to_string()),
        Value::DateTime(v) => Json::String(v.to_string()),
        Value::Bytes(_) => {
            return Err(Error::encoding(format!(
                "column `{column}` holds bytes, which cannot be embedded in chart data"
            )))
        }
    })
}
