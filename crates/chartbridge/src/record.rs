use crate::{Query, Reader, Row, Source, Writer};

use chartbridge_core::{
    err,
    schema::Table,
    stmt::{Primitive, Value, ValueRecord},
    Error, Result,
};

use std::sync::Arc;

/// A struct mapped to a foreign table with `#[derive(Record)]`.
pub trait Record: Sized {
    /// The schema mapping generated from the struct's fields.
    fn table() -> Arc<Table>;

    /// Converts a row read through [`Record::table`] into `Self`.
    fn load(row: Row) -> Result<Self>;
}

/// A record with a declared `#[key]`. Only keyed records can be written.
pub trait Keyed: Record {
    fn key(&self) -> ValueRecord;

    fn into_values(self) -> ValueRecord;
}

/// Loads the next field of a row being converted into a record.
#[doc(hidden)]
pub fn load_field<T: Primitive>(
    fields: &mut impl Iterator<Item = Value>,
    name: &str,
) -> Result<T> {
    let Some(value) = fields.next() else {
        return Err(Error::schema_mismatch(format!(
            "row has no value for field `{name}`"
        )));
    };

    T::load(value).map_err(|err| err.context(err!("loading field `{name}`")))
}

pub async fn read_records<R: Record>(source: &Source, query: &Query) -> Result<Vec<R>> {
    Reader::for_record::<R>()
        .read(source, query)
        .await?
        .into_iter()
        .map(R::load)
        .collect()
}

pub async fn insert_record<R: Keyed>(source: &Source, record: R) -> Result<()> {
    Writer::for_record::<R>()
        .insert(source, record.into_values())
        .await
}

/// Writes every non-key field of `record` to the row sharing its key.
pub async fn update_record<R: Keyed>(source: &Source, record: R) -> Result<()> {
    let table = R::table();
    let key = record.key();
    let assignments = table
        .columns
        .iter()
        .zip(record.into_values())
        .filter(|(column, _)| !column.primary_key)
        .map(|(column, value)| (column.app_name().to_string(), value))
        .collect::<Vec<_>>();

    Writer::for_record::<R>()
        .update_by_key(source, key, assignments)
        .await
}

pub async fn delete_record<R: Keyed>(source: &Source, record: &R) -> Result<()> {
    Writer::for_record::<R>()
        .delete_by_key(source, record.key())
        .await
}
