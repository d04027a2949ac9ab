//! Value enumeration derive macro implementation.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataEnum, DeriveInput, Fields, spanned::Spanned};

pub fn run(item: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(item) {
        Ok(x) => x,
        Err(e) => return e.to_compile_error(),
    };

    try_run(&input).unwrap_or_else(|err| err.to_compile_error())
}

pub fn try_run(input: &DeriveInput) -> Result<TokenStream, syn::Error> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new(
            input.generics.span(),
            "#[derive(ValueEnum)] does not support generics",
        ));
    }

    let Data::Enum(DataEnum { ref variants, .. }) = input.data else {
        return Err(syn::Error::new(
            Span::call_site(),
            "#[derive(ValueEnum)] only supports enums",
        ));
    };

    if let Some(variant) = variants.iter().find(|x| !matches!(x.fields, Fields::Unit)) {
        return Err(syn::Error::new(
            variant.span(),
            "#[derive(ValueEnum)] only supports variants without fields",
        ));
    }

    let idents: Vec<_> = variants.iter().map(|x| &x.ident).collect();
    let names: Vec<_> = idents.iter().map(|x| x.unraw().to_string()).collect();

    Ok(quote! {
        impl cmdargs::FromArg for #ident {
            const KIND: cmdargs::ValueKind = cmdargs::ValueKind::Enum(&[#( #names ),*]);

            fn from_arg(__value: &str) -> Result<Self, cmdargs::ValueError> {
                match __value {
                    #( #names => Ok(#ident::#idents), )*
                    _ => Err(cmdargs::ValueError::UnknownVariant(&[#( #names ),*])),
                }
            }
        }
    })
}
