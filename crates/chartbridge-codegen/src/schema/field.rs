use super::{is_reserved_name, Column, ErrorSet};

use syn::ext::IdentExt;

#[derive(Debug)]
pub(crate) struct Field {
    /// Index of field in the containing record
    pub(crate) id: usize,

    /// Field attributes
    pub(crate) attrs: FieldAttr,

    /// Rust identifier of the field
    pub(crate) ident: syn::Ident,

    /// Application name: the identifier without any `r#` prefix
    pub(crate) name: String,

    /// Field type
    pub(crate) ty: syn::Type,
}

#[derive(Debug)]
pub(crate) struct FieldAttr {
    /// Set if the field is annotated with `#[key]`
    pub(crate) key: Option<syn::Attribute>,

    /// Optional external column name
    pub(crate) column: Option<Column>,
}

impl Field {
    pub(super) fn from_ast(field: &syn::Field, id: usize) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new_spanned(field, "record fields must be named"));
        };

        let name = ident.unraw().to_string();

        let mut errs = ErrorSet::new();
        let mut attrs = FieldAttr {
            key: None,
            column: None,
        };

        if is_reserved_name(&name) {
            errs.push(syn::Error::new_spanned(
                ident,
                format!("`{name}` is a reserved name and cannot be used as a field name"),
            ));
        }

        for attr in &field.attrs {
            if attr.path().is_ident("key") {
                if attrs.key.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate #[key] attribute"));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "expected `#[key]`"));
                } else if is_option(&field.ty) {
                    errs.push(syn::Error::new_spanned(
                        &field.ty,
                        "#[key] fields cannot be optional",
                    ));
                } else {
                    attrs.key = Some(attr.clone());
                }
            } else if attr.path().is_ident("column") {
                if attrs.column.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[column] attribute",
                    ));
                } else {
                    match Column::from_ast(attr) {
                        Ok(column) => attrs.column = Some(column),
                        Err(err) => errs.push(err),
                    }
                }
            }
        }

        if let Some(err) = errs.collect() {
            return Err(err);
        }

        Ok(Self {
            id,
            attrs,
            ident: ident.clone(),
            name,
            ty: field.ty.clone(),
        })
    }

    /// The external column this field reads.
    pub(crate) fn storage_name(&self) -> String {
        match &self.attrs.column {
            Some(column) => column.name.value(),
            None => self.name.clone(),
        }
    }
}

fn is_option(ty: &syn::Type) -> bool {
    let syn::Type::Path(path) = ty else {
        return false;
    };

    path.qself.is_none()
        && path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option")
}
