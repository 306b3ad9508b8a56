extern crate proc_macro;

use proc_macro::TokenStream;

/// Derives `chartbridge::Record` for a struct mapping a foreign table.
///
/// ```ignore
/// #[derive(Debug, chartbridge::Record)]
/// #[table = "sales_2020Q4"]
/// struct SalesDay {
///     #[key]
///     day: jiff::civil::Date,
///     sales: u64,
/// }
/// ```
///
/// A record must either mark one or more fields `#[key]` or be marked
/// `#[read_only]`. Only keyed records implement `chartbridge::Keyed` and can
/// be written.
#[proc_macro_derive(Record, attributes(key, table, column, read_only))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    match chartbridge_codegen::generate(input.into()) {
        Ok(output) => output.into(),
        Err(e) => e.to_compile_error().into(),
    }
}
