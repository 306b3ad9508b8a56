use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    pub(super) fn expand_record_impl(&self) -> TokenStream {
        let chartbridge = &self.chartbridge;
        let record_ident = &self.record.ident;
        let table = self.expand_table();
        let load_fields = self.expand_load_fields();

        quote! {
            impl #chartbridge::Record for #record_ident {
                fn table() -> #chartbridge::Arc<#chartbridge::Table> {
                    static TABLE: #chartbridge::OnceLock<#chartbridge::Arc<#chartbridge::Table>> =
                        #chartbridge::OnceLock::new();
                    TABLE
                        .get_or_init(|| #chartbridge::Arc::new(#table))
                        .clone()
                }

                fn load(row: #chartbridge::Row) -> #chartbridge::Result<Self> {
                    let mut fields = row.into_record().into_iter();
                    Ok(Self {
                        #load_fields
                    })
                }
            }
        }
    }

    fn expand_load_fields(&self) -> TokenStream {
        let chartbridge = &self.chartbridge;

        self.record
            .fields
            .iter()
            .map(|field| {
                let ident = &field.ident;
                let name = &field.name;
                let ty = &field.ty;

                quote!(#ident: #chartbridge::load_field::<#ty>(&mut fields, #name)?,)
            })
            .collect()
    }
}
