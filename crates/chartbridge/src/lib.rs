//! Read rows from a foreign SQL table through a static schema mapping, shape
//! them into columns and build a Vega-Lite chart specification from them.
//!
//! The pipeline runs in three stages:
//!
//! 1. [`Reader`] reads [`Row`]s from a [`Source`], verifying the mapping
//!    against the external table first.
//! 2. [`columnar::shape`] folds the rows into a [`ColumnarTable`], applying
//!    per-column [`Transform`]s.
//! 3. [`chart::build`] combines the table with a [`ChartConfig`] into a
//!    serializable [`ChartSpec`].
//!
//! [`Pipeline`] runs all three for one chart request.

pub mod chart;
pub use chart::{ChartConfig, ChartSpec};

pub mod columnar;
pub use columnar::{ColumnSpec, ColumnarTable, Transform};

pub mod driver;

pub mod embed;

mod pipeline;
pub use pipeline::Pipeline;

mod query;
pub use query::Query;

mod reader;
pub use reader::Reader;

mod record;
pub use record::{delete_record, insert_record, read_records, update_record, Keyed, Record};

mod row;
pub use row::Row;

mod source;
pub use source::Source;

mod writer;
pub use writer::Writer;

pub use chartbridge_core::{
    bail, err, schema,
    schema::Table,
    stmt::{self, Expr, OrderBy, Type, Value, ValueRecord},
    Error, Result,
};

pub use chartbridge_macros::Record;

#[doc(hidden)]
pub mod codegen_support {
    pub use crate::{record::load_field, Keyed, Record, Result, Row};
    pub use chartbridge_core::{
        schema::{Column, ColumnId, FieldName, Identity, Table},
        stmt::{Primitive, Type, Value, ValueRecord},
    };
    pub use std::sync::{Arc, OnceLock};
}
