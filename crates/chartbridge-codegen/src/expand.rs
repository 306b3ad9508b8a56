mod keyed;
mod record;
mod table;
mod util;

use crate::schema::Record;

use proc_macro2::TokenStream;
use quote::quote;

struct Expand<'a> {
    /// The record being expanded
    record: &'a Record,

    /// Path prefix for chartbridge types
    chartbridge: TokenStream,
}

impl Expand<'_> {
    fn expand(&self) -> TokenStream {
        let record_impl = self.expand_record_impl();
        let keyed_impl = self.expand_keyed_impl();

        wrap_in_const(quote! {
            #record_impl
            #keyed_impl
        })
    }
}

pub(super) fn record(record: &Record) -> TokenStream {
    Expand {
        record,
        chartbridge: quote!(_chartbridge::codegen_support),
    }
    .expand()
}

fn wrap_in_const(code: TokenStream) -> TokenStream {
    quote! {
        const _: () = {
            use chartbridge as _chartbridge;
            #code
        };
    }
}
