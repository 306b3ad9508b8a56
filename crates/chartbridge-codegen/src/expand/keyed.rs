use super::Expand;

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Write access is only generated for records with a declared key, so a
    /// write against a read-only record does not compile.
    pub(super) fn expand_keyed_impl(&self) -> TokenStream {
        if !self.record.is_keyed() {
            return quote!();
        }

        let chartbridge = &self.chartbridge;
        let record_ident = &self.record.ident;

        let key_values = self.record.key.iter().map(|index| {
            let field = &self.record.fields[*index];
            let ident = &field.ident;
            let ty = &field.ty;
            quote!(<#ty as #chartbridge::Primitive>::into_value(::std::clone::Clone::clone(&self.#ident)))
        });

        let values = self.record.fields.iter().map(|field| {
            let ident = &field.ident;
            let ty = &field.ty;
            quote!(<#ty as #chartbridge::Primitive>::into_value(self.#ident))
        });

        quote! {
            impl #chartbridge::Keyed for #record_ident {
                fn key(&self) -> #chartbridge::ValueRecord {
                    #chartbridge::ValueRecord::from_vec(vec![ #( #key_values ),* ])
                }

                fn into_values(self) -> #chartbridge::ValueRecord {
                    #chartbridge::ValueRecord::from_vec(vec![ #( #values ),* ])
                }
            }
        }
    }
}
