#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited};

mod flavor;
use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder};

// Fragment serializers
mod expr;
mod statement;
mod value;

use crate::stmt::Statement;

use chartbridge_core::schema::{ColumnId, Table};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer {
    /// The database flavor handles the differences between SQL dialects and
    /// supported features.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// The mapping that resolves field names to external column names
    table: &'a Table,
}

impl Serializer {
    /// Serializes `stmt`, pushing every literal to `params`.
    ///
    /// Field names in filters and orderings are expected to have been checked
    /// against the mapping already; an unknown field is written verbatim.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            table: stmt.table(),
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }
}

impl<'a, T> Formatter<'a, T> {
    fn column_name(&self, id: ColumnId) -> Ident<&'a str> {
        Ident(self.table.column(id).storage_name())
    }

    fn field_name<'b>(&self, field: &'b str) -> Ident<&'b str>
    where
        'a: 'b,
    {
        match self.table.column_by_name(field) {
            Some(column) => Ident(column.storage_name()),
            None => Ident(field),
        }
    }
}
