use super::ErrorSet;

#[derive(Debug, Default)]
pub(crate) struct RecordAttr {
    /// Optional external table name to map the record to
    pub(crate) table: Option<syn::LitStr>,

    /// Set if the record is annotated with `#[read_only]`
    pub(crate) read_only: Option<syn::Attribute>,
}

impl RecordAttr {
    pub(super) fn populate_from_ast(&mut self, attrs: &[syn::Attribute]) -> syn::Result<()> {
        let mut errs = ErrorSet::new();

        for attr in attrs {
            if attr.path().is_ident("table") {
                if self.table.is_some() {
                    errs.push(syn::Error::new_spanned(attr, "duplicate `table` attribute"));
                    continue;
                }

                match table_name(attr) {
                    Ok(lit) => self.table = Some(lit),
                    Err(err) => errs.push(err),
                }
            } else if attr.path().is_ident("read_only") {
                if self.read_only.is_some() {
                    errs.push(syn::Error::new_spanned(
                        attr,
                        "duplicate #[read_only] attribute",
                    ));
                } else if !matches!(attr.meta, syn::Meta::Path(_)) {
                    errs.push(syn::Error::new_spanned(attr, "expected `#[read_only]`"));
                } else {
                    self.read_only = Some(attr.clone());
                }
            }
        }

        match errs.collect() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn table_name(attr: &syn::Attribute) -> syn::Result<syn::LitStr> {
    let syn::Meta::NameValue(meta) = &attr.meta else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    let syn::Expr::Lit(syn::ExprLit {
        lit: syn::Lit::Str(lit),
        ..
    }) = &meta.value
    else {
        return Err(syn::Error::new_spanned(
            attr,
            "expected `table = \"table_name\"`",
        ));
    };

    if lit.value().is_empty() {
        return Err(syn::Error::new_spanned(lit, "table name must not be empty"));
    }

    Ok(lit.clone())
}
