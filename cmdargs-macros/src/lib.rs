use proc_macro::TokenStream;

mod arg;
mod attr;
mod derive;
mod ty;
mod value_enum;

/// Derive the `Schema` trait of a named struct, so that it can be populated from a command line.
///
/// Fields marked with `#[arg]` or `#[arg(short, long, help)]` receive argument values, the field
/// marked with `#[operands]` receives the operands. Other fields are left untouched.
#[proc_macro_derive(Schema, attributes(arg, operands))]
pub fn derive_schema(item: TokenStream) -> TokenStream {
    derive::run(item.into()).into()
}

/// Derive the `FromArg` trait of a fieldless enum, matching values against variant names.
#[proc_macro_derive(ValueEnum)]
pub fn derive_value_enum(item: TokenStream) -> TokenStream {
    value_enum::run(item.into()).into()
}
