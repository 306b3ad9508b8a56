use super::{ErrorSet, Field, RecordAttr};

use heck::ToSnakeCase;
use std::collections::HashSet;

#[derive(Debug)]
pub(crate) struct Record {
    /// Type identifier
    pub(crate) ident: syn::Ident,

    /// Record fields, in declaration order
    pub(crate) fields: Vec<Field>,

    /// External table name
    pub(crate) table: String,

    /// Indices of the `#[key]` fields. Empty for read-only records.
    pub(crate) key: Vec<usize>,
}

impl Record {
    pub(crate) fn from_ast(ast: &syn::ItemStruct) -> syn::Result<Self> {
        let syn::Fields::Named(node) = &ast.fields else {
            return Err(syn::Error::new_spanned(
                &ast.fields,
                "record fields must be named",
            ));
        };

        // Generics are not supported
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &ast.generics,
                "record generics are not supported",
            ));
        }

        let mut record_attr = RecordAttr::default();
        let mut fields = vec![];
        let mut errs = ErrorSet::new();

        if let Err(err) = record_attr.populate_from_ast(&ast.attrs) {
            errs.push(err);
        }

        for (index, node) in node.named.iter().enumerate() {
            match Field::from_ast(node, index) {
                Ok(field) => fields.push(field),
                Err(err) => errs.push(err),
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let mut errs = ErrorSet::new();

        if fields.is_empty() {
            errs.push(syn::Error::new_spanned(
                &ast.ident,
                "record must declare at least one field",
            ));
        }

        let mut storage_names = HashSet::new();
        for field in &fields {
            if !storage_names.insert(field.storage_name().to_ascii_lowercase()) {
                errs.push(syn::Error::new_spanned(
                    &field.ident,
                    format!("column `{}` is mapped twice", field.storage_name()),
                ));
            }
        }

        let key: Vec<_> = fields
            .iter()
            .filter(|field| field.attrs.key.is_some())
            .map(|field| field.id)
            .collect();

        match (&record_attr.read_only, key.is_empty()) {
            (Some(attr), false) => errs.push(syn::Error::new_spanned(
                attr,
                "#[read_only] records cannot have #[key] fields",
            )),
            (None, true) => errs.push(syn::Error::new_spanned(
                &ast.ident,
                "record must declare a #[key] field or be marked #[read_only]",
            )),
            _ => {}
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        let table = match &record_attr.table {
            Some(lit) => lit.value(),
            None => ast.ident.to_string().to_snake_case(),
        };

        Ok(Self {
            ident: ast.ident.clone(),
            fields,
            table,
            key,
        })
    }

    pub(crate) fn is_keyed(&self) -> bool {
        !self.key.is_empty()
    }
}
