use super::{util, Expand};

use proc_macro2::TokenStream;
use quote::quote;

impl Expand<'_> {
    /// Builds the `Table` literal describing the record's mapping.
    pub(super) fn expand_table(&self) -> TokenStream {
        let chartbridge = &self.chartbridge;
        let table_name = &self.record.table;

        let columns = self.record.fields.iter().map(|field| {
            let id = util::int(field.id);
            let app_name = &field.name;
            let ty = &field.ty;
            let primary_key = self.record.key.contains(&field.id);
            let storage_name = match &field.attrs.column {
                Some(column) => {
                    let name = column.name.value();
                    quote!(Some(#name.to_string()))
                }
                None => quote!(None),
            };

            quote! {
                #chartbridge::Column {
                    id: #chartbridge::ColumnId(#id),
                    name: #chartbridge::FieldName {
                        app_name: #app_name.to_string(),
                        storage_name: #storage_name,
                    },
                    ty: <#ty as #chartbridge::Primitive>::ty(),
                    nullable: <#ty as #chartbridge::Primitive>::NULLABLE,
                    primary_key: #primary_key,
                }
            }
        });

        let identity = if self.record.is_keyed() {
            let key = self.record.key.iter().map(|index| util::int(*index));
            quote!(#chartbridge::Identity::Key(vec![#( #chartbridge::ColumnId(#key) ),*]))
        } else {
            quote!(#chartbridge::Identity::ReadOnly)
        };

        quote! {
            #chartbridge::Table {
                name: #table_name.to_string(),
                columns: vec![ #( #columns ),* ],
                identity: #identity,
            }
        }
    }
}
