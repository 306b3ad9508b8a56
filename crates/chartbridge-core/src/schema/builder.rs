use super::{is_reserved_name, is_row_id_column, Column, ColumnId, FieldName, Identity, Table};
use crate::{stmt, Error, Result};

use std::collections::HashSet;

/// Builds a [`Table`] mapping, validating it on [`Builder::build`].
#[derive(Debug)]
pub struct Builder {
    name: String,
    columns: Vec<ColumnDef>,
    key: Option<Vec<String>>,
    read_only: bool,
}

/// Declaration of a single mapped column.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    name: String,
    storage_name: Option<String>,
    ty: stmt::Type,
    nullable: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: stmt::Type) -> Self {
        Self {
            name: name.into(),
            storage_name: None,
            ty,
            nullable: false,
        }
    }

    /// Reads the field from an external column with a different name.
    pub fn storage_name(mut self, storage_name: impl Into<String>) -> Self {
        self.storage_name = Some(storage_name.into());
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn set_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}

impl Builder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            key: None,
            read_only: false,
        }
    }

    /// Adds a non-nullable column whose storage name equals `name`.
    pub fn column(self, name: impl Into<String>, ty: stmt::Type) -> Self {
        self.column_with(ColumnDef::new(name, ty))
    }

    pub fn column_with(mut self, def: ColumnDef) -> Self {
        self.columns.push(def);
        self
    }

    /// Declares the key, by field name.
    pub fn key<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.key = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn build(self) -> Result<Table> {
        let table = &self.name;

        if table.is_empty() {
            return Err(Error::invalid_schema("table name must not be empty"));
        }

        if self.columns.is_empty() {
            return Err(Error::invalid_schema(format!(
                "table `{table}` declares no columns"
            )));
        }

        let mut app_names = HashSet::new();
        let mut storage_names = HashSet::new();

        for def in &self.columns {
            if def.name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` has a column with an empty name"
                )));
            }

            if is_reserved_name(&def.name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` in table `{table}` uses a reserved name",
                    def.name
                )));
            }

            if !app_names.insert(def.name.as_str()) {
                return Err(Error::invalid_schema(format!(
                    "duplicate field `{}` in table `{table}`",
                    def.name
                )));
            }

            let storage_name = def.storage_name.as_deref().unwrap_or(&def.name);
            if storage_name.is_empty() {
                return Err(Error::invalid_schema(format!(
                    "field `{}` in table `{table}` has an empty column name",
                    def.name
                )));
            }

            if is_row_id_column(storage_name) {
                return Err(Error::invalid_schema(format!(
                    "field `{}` in table `{table}` reads the reserved column `{storage_name}`",
                    def.name
                )));
            }

            if !storage_names.insert(storage_name.to_ascii_lowercase()) {
                return Err(Error::invalid_schema(format!(
                    "column `{storage_name}` is mapped twice in table `{table}`"
                )));
            }
        }

        let mut columns: Vec<Column> = self
            .columns
            .into_iter()
            .enumerate()
            .map(|(index, def)| Column {
                id: ColumnId(index),
                name: FieldName {
                    app_name: def.name,
                    storage_name: def.storage_name,
                },
                ty: def.ty,
                nullable: def.nullable,
                primary_key: false,
            })
            .collect();

        let identity = match (self.key, self.read_only) {
            (Some(_), true) => {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` declares both a key and read_only"
                )))
            }
            (None, false) => {
                return Err(Error::invalid_schema(format!(
                    "table `{table}` must declare a key or be marked read_only"
                )))
            }
            (None, true) => Identity::ReadOnly,
            (Some(key), false) => {
                if key.is_empty() {
                    return Err(Error::invalid_schema(format!(
                        "table `{table}` declares an empty key"
                    )));
                }

                let mut ids = Vec::with_capacity(key.len());
                for name in &key {
                    let Some(column) = columns.iter_mut().find(|c| c.name.app_name == *name)
                    else {
                        return Err(Error::invalid_schema(format!(
                            "key field `{name}` is not a column of table `{table}`"
                        )));
                    };

                    if column.nullable {
                        return Err(Error::invalid_schema(format!(
                            "key field `{name}` in table `{table}` must not be nullable"
                        )));
                    }

                    if column.primary_key {
                        return Err(Error::invalid_schema(format!(
                            "key field `{name}` is listed twice in table `{table}`"
                        )));
                    }

                    column.primary_key = true;
                    ids.push(column.id);
                }
                Identity::Key(ids)
            }
        };

        Ok(Table {
            name: self.name,
            columns,
            identity,
        })
    }
}
