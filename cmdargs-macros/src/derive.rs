//! Schema derive macro implementation.

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, format_ident, quote, quote_spanned};
use syn::{Data, DataStruct, DeriveInput, Expr, ExprLit, Fields, FieldsNamed, Lit, spanned::Spanned};

use crate::arg::MetaArg;
use crate::attr::{Attr, AttrKind, AttrName, AttrValue};
use crate::ty::{Ty, get_inner_ty, is_simple_ty};

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
            "#[derive(Schema)] does not support generics",
        ));
    }

    let fields = match input.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(ref fields),
            ..
        }) => fields,

        _ => {
            let span = Span::call_site();
            let error = syn::Error::new(span, "#[derive(Schema)] only supports named structs");
            return Err(error);
        }
    };

    let meta = collect_args_meta(fields)?;
    let operands = find_operands(&meta)?;
    let args: Vec<&MetaArg> = meta.iter().filter(|x| x.is_arg()).collect();

    let infos = args
        .iter()
        .map(|x| build_arg_info(x))
        .collect::<Result<Vec<_>, syn::Error>>()?;

    let count = infos.len();

    let binders = args
        .iter()
        .enumerate()
        .map(|(index, arg)| build_arg_binder(index, arg));

    let mut cleared: Vec<_> = args.iter().map(|x| &x.id).collect();

    let operands_impl = match operands {
        Some(arg) => {
            let supported = is_supported_operands(arg);
            if supported {
                cleared.push(&arg.id);
            }

            build_operands(arg, supported)
        }
        None => TokenStream::new(),
    };

    Ok(quote! {
        impl cmdargs::Schema for #ident {
            fn args() -> &'static [cmdargs::ArgInfo] {
                static ARGS: [cmdargs::ArgInfo; #count] = [
                    #( #infos ),*
                ];
                &ARGS
            }

            fn clear(&mut self) {
                #(
                    self.#cleared = ::core::default::Default::default();
                )*
            }

            fn bind(&mut self, __index: usize, __binder: &cmdargs::Binder<'_>) -> Result<(), cmdargs::Error> {
                match __index {
                    #( #binders )*
                    _ => {}
                }
                Ok(())
            }

            #operands_impl
        }
    })
}

fn collect_args_meta(fields: &FieldsNamed) -> Result<Vec<MetaArg>, syn::Error> {
    let meta = fields
        .named
        .iter()
        .map(MetaArg::new)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(meta)
}

fn find_operands(args: &[MetaArg]) -> Result<Option<&MetaArg>, syn::Error> {
    let mut found: Option<&MetaArg> = None;

    for arg in args {
        let Some(span) = arg.find_kind(AttrKind::Operands) else {
            continue;
        };

        if arg.is_arg() {
            return Err(syn::Error::new(
                span,
                "a field cannot be both an argument and the operands",
            ));
        }

        if let Some(first) = found {
            let mut error = syn::Error::new(span, "only one field can receive the operands");
            error.combine(syn::Error::new(
                first.span,
                "the operands field is already defined here",
            ));
            return Err(error);
        }

        found = Some(arg);
    }

    Ok(found)
}

fn is_supported_operands(arg: &MetaArg) -> bool {
    Ty::from_syn_ty(&arg.ty) == Ty::Vec && is_simple_ty(get_inner_ty(&arg.ty), "String")
}

fn build_operands(arg: &MetaArg, supported: bool) -> TokenStream {
    let ident = &arg.id;
    let field = arg.name();
    let ty = arg.ty.to_token_stream().to_string().replace(' ', "");

    let binder = if supported {
        quote! {
            fn bind_operands(&mut self, __binder: &cmdargs::Binder<'_>) -> Result<(), cmdargs::Error> {
                self.#ident = __binder.operands()?;
                Ok(())
            }
        }
    } else {
        TokenStream::new()
    };

    quote! {
        fn operands() -> Option<&'static cmdargs::OperandsInfo> {
            static OPERANDS: cmdargs::OperandsInfo = cmdargs::OperandsInfo::new(#field, #ty, #supported);
            Some(&OPERANDS)
        }

        #binder
    }
}

fn build_arg_binder(index: usize, arg: &MetaArg) -> TokenStream {
    let ty = &arg.ty;
    let inner_ty = get_inner_ty(ty);
    let ident = &arg.id;

    let binder = format_ident!("__binder");
    let one = quote_spanned!(inner_ty.span()=> one::<#inner_ty>);
    let maybe = quote_spanned!(inner_ty.span()=> maybe::<#inner_ty>);
    let many = quote_spanned!(inner_ty.span()=> many::<_, #inner_ty>);

    let (getter, value) = match Ty::from_syn_ty(ty) {
        // Optional argument with required value.
        Ty::Option => (quote!(#binder.#one(#index)), quote!(Some(__value))),

        // Optional argument with optional value.
        Ty::OptionOption => (quote!(#binder.#maybe(#index)), quote!(Some(__value))),

        // Optional argument with a sequence of values.
        Ty::OptionVec => (quote!(#binder.#many(#index)), quote!(Some(__value))),

        // Argument with a sequence of values.
        Ty::Vec => (quote!(#binder.#many(#index)), quote!(__value)),

        // Argument with required value.
        Ty::Simple => (quote!(#binder.#one(#index)), quote!(__value)),
    };

    quote_spanned! { arg.span=>
        #index => {
            if let Some(__value) = #getter? {
                self.#ident = #value;
            }
        }
    }
}

fn build_arg_info(arg: &MetaArg) -> Result<TokenStream, syn::Error> {
    let name = arg.name();
    let inner_ty = get_inner_ty(&arg.ty);

    let shorts = find_attrs(arg, AttrName::Short, "short")?;
    let longs = find_attrs(arg, AttrName::Long, "long")?;
    let helps = find_attrs(arg, AttrName::Help, "help")?;

    let short = match shorts {
        Some(attr) => {
            // A field identifier has at least one character.
            let key = match parse_attr_arg_short(attr)? {
                Some(key) => key,
                None => name.chars().next().unwrap_or_default(),
            };
            quote!(Some(#key))
        }
        None => quote!(None),
    };

    let long = match longs {
        Some(attr) => {
            let key = parse_attr_arg_string(attr)?.unwrap_or_else(|| name.clone());
            quote!(Some(#key))
        }
        // Without any name, the argument gets a long name equal to the field name.
        None if shorts.is_none() => quote!(Some(#name)),
        None => quote!(None),
    };

    let help = match helps {
        Some(attr) => parse_attr_arg_string(attr)?
            .ok_or_else(|| syn::Error::new(attr.id.span(), "expected `help` to have a value"))
            .map(Some)?,
        None => arg.doc.clone(),
    };

    let kind = if Ty::from_syn_ty(&arg.ty).is_collection() {
        quote_spanned!(inner_ty.span()=> cmdargs::FieldKind::Collection(<#inner_ty as cmdargs::FromArg>::KIND))
    } else {
        quote_spanned!(inner_ty.span()=> cmdargs::FieldKind::Value(<#inner_ty as cmdargs::FromArg>::KIND))
    };

    let mut info = quote!(cmdargs::ArgInfo::new(#short, #long, #name, #kind));

    if let Some(help) = help {
        info = quote!(#info.with_help(#help));
    }

    Ok(info)
}

/// Find the unique attribute with the given name.
fn find_attrs<'a>(
    arg: &'a MetaArg,
    name: AttrName,
    label: &str,
) -> Result<Option<&'a Attr>, syn::Error> {
    let mut found = arg.attrs.iter().filter(|x| x.name == name);

    let first = found.next();
    let mut errors: Option<syn::Error> = None;

    for attr in found {
        let error = errors.get_or_insert_with(|| {
            syn::Error::new(
                attr.id.span(),
                format!("must have at most one {label} flag"),
            )
        });

        error.combine(syn::Error::new(
            attr.id.span(),
            format!("another {label} flag is defined here"),
        ));
    }

    match errors {
        Some(error) => Err(error),
        None => Ok(first),
    }
}

fn parse_attr_arg_short(attr: &Attr) -> Result<Option<char>, syn::Error> {
    match &attr.value {
        None => Ok(None),
        Some(AttrValue::Expr(Expr::Lit(ExprLit {
            lit: Lit::Char(val),
            ..
        }))) => Ok(Some(val.value())),
        Some(_) => Err(syn::Error::new(
            attr.id.span(),
            "expected `short` to be a character",
        )),
    }
}

fn parse_attr_arg_string(attr: &Attr) -> Result<Option<String>, syn::Error> {
    match &attr.value {
        None => Ok(None),
        Some(AttrValue::LitStr(lit)) => Ok(Some(lit.value())),
        Some(_) => Err(syn::Error::new(
            attr.id.span(),
            format!("expected `{}` to be a literal string", attr.id),
        )),
    }
}

#[cfg(test)]
mod tests {
    use syn::Field;

    use super::*;

    fn meta(field: Field) -> anyhow::Result<MetaArg> {
        Ok(MetaArg::new(&field)?)
    }

    #[test]
    fn it_should_build_arg_info_with_bare_attr() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            #[arg]
            value: u32
        })?;

        let given = build_arg_info(&meta)?;

        let expected = quote! {
            cmdargs::ArgInfo::new(None, Some("value"), "value", cmdargs::FieldKind::Value(<u32 as cmdargs::FromArg>::KIND))
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_arg_info_with_default_short_flag() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            #[arg(short)]
            value: u32
        })?;

        let given = build_arg_info(&meta)?;

        let expected = quote! {
            cmdargs::ArgInfo::new(Some('v'), None, "value", cmdargs::FieldKind::Value(<u32 as cmdargs::FromArg>::KIND))
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_arg_info_with_named_flags() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            #[arg(short = 'd', long = "other")]
            value: u32
        })?;

        let given = build_arg_info(&meta)?;

        let expected = quote! {
            cmdargs::ArgInfo::new(Some('d'), Some("other"), "value", cmdargs::FieldKind::Value(<u32 as cmdargs::FromArg>::KIND))
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_arg_info_with_help() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            /// Ignored documentation.
            #[arg(long, help = "Some values.")]
            values: Vec<u32>
        })?;

        let given = build_arg_info(&meta)?;

        let expected = quote! {
            cmdargs::ArgInfo::new(None, Some("values"), "values", cmdargs::FieldKind::Collection(<u32 as cmdargs::FromArg>::KIND))
                .with_help("Some values.")
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_arg_info_with_doc() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            /// Be verbose.
            #[arg(short)]
            verbose: bool
        })?;

        let given = build_arg_info(&meta)?;

        let expected = quote! {
            cmdargs::ArgInfo::new(Some('v'), None, "verbose", cmdargs::FieldKind::Value(<bool as cmdargs::FromArg>::KIND))
                .with_help("Be verbose.")
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_reject_many_short_flags() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            #[arg(short = 'a', short = 'b')]
            value: u32
        })?;

        assert!(build_arg_info(&meta).is_err());

        Ok(())
    }

    #[test]
    fn it_should_reject_non_literal_names() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote! {
            #[arg(short = "a")]
            value: u32
        })?;
        assert!(build_arg_info(&meta).is_err());

        let meta = self::meta(syn::parse_quote! {
            #[arg(long = NAME)]
            value: u32
        })?;
        assert!(build_arg_info(&meta).is_err());

        Ok(())
    }

    #[test]
    fn it_should_build_binder_for_simple_type() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[arg] value: u32))?;
        let given = build_arg_binder(0, &meta);

        let expected = quote! {
            0usize => {
                if let Some(__value) = __binder.one::<u32>(0usize)? {
                    self.value = __value;
                }
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_binder_for_option_type() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[arg] value: Option<u32>))?;
        let given = build_arg_binder(1, &meta);

        let expected = quote! {
            1usize => {
                if let Some(__value) = __binder.one::<u32>(1usize)? {
                    self.value = Some(__value);
                }
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_binder_for_option_option_type() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[arg] value: Option<Option<u32>>))?;
        let given = build_arg_binder(2, &meta);

        let expected = quote! {
            2usize => {
                if let Some(__value) = __binder.maybe::<u32>(2usize)? {
                    self.value = Some(__value);
                }
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_binder_for_option_vec_type() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[arg] value: Option<Vec<u32>>))?;
        let given = build_arg_binder(0, &meta);

        let expected = quote! {
            0usize => {
                if let Some(__value) = __binder.many::<_, u32>(0usize)? {
                    self.value = Some(__value);
                }
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_binder_for_vec_type() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[arg] value: heapless::Vec<u32, 8>))?;
        let given = build_arg_binder(0, &meta);

        let expected = quote! {
            0usize => {
                if let Some(__value) = __binder.many::<_, u32>(0usize)? {
                    self.value = __value;
                }
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_build_struct_derive() -> anyhow::Result<()> {
        let derive: DeriveInput = syn::parse_quote! {
            struct MyArgs {
                #[arg(short)]
                value1: u32,

                value2: u32,

                #[operands]
                rest: Vec<String>,
            }
        };

        let given = try_run(&derive)?;

        let expected = quote! {
            impl cmdargs::Schema for MyArgs {
                fn args() -> &'static [cmdargs::ArgInfo] {
                    static ARGS: [cmdargs::ArgInfo; 1usize] = [
                        cmdargs::ArgInfo::new(Some('v'), None, "value1", cmdargs::FieldKind::Value(<u32 as cmdargs::FromArg>::KIND))
                    ];
                    &ARGS
                }

                fn clear(&mut self) {
                    self.value1 = ::core::default::Default::default();
                    self.rest = ::core::default::Default::default();
                }

                fn bind(&mut self, __index: usize, __binder: &cmdargs::Binder<'_>) -> Result<(), cmdargs::Error> {
                    match __index {
                        0usize => {
                            if let Some(__value) = __binder.one::<u32>(0usize)? {
                                self.value1 = __value;
                            }
                        }
                        _ => {}
                    }
                    Ok(())
                }

                fn operands() -> Option<&'static cmdargs::OperandsInfo> {
                    static OPERANDS: cmdargs::OperandsInfo = cmdargs::OperandsInfo::new("rest", "Vec<String>", true);
                    Some(&OPERANDS)
                }

                fn bind_operands(&mut self, __binder: &cmdargs::Binder<'_>) -> Result<(), cmdargs::Error> {
                    self.rest = __binder.operands()?;
                    Ok(())
                }
            }
        };

        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_describe_unsupported_operands() -> anyhow::Result<()> {
        let meta = meta(syn::parse_quote!(#[operands] rest: Vec<u32>))?;
        let given = build_operands(&meta, is_supported_operands(&meta));

        let expected = quote! {
            fn operands() -> Option<&'static cmdargs::OperandsInfo> {
                static OPERANDS: cmdargs::OperandsInfo = cmdargs::OperandsInfo::new("rest", "Vec<u32>", false);
                Some(&OPERANDS)
            }
        };
        assert_eq!(expected.to_string(), given.to_string());

        Ok(())
    }

    #[test]
    fn it_should_reject_invalid_structs() {
        let derive: DeriveInput = syn::parse_quote! {
            struct Generic<T> {
                #[arg]
                value: T,
            }
        };
        assert!(try_run(&derive).is_err());

        let derive: DeriveInput = syn::parse_quote! {
            struct Tuple(u32);
        };
        assert!(try_run(&derive).is_err());

        let derive: DeriveInput = syn::parse_quote! {
            struct TwoOperands {
                #[operands]
                first: Vec<String>,

                #[operands]
                second: Vec<String>,
            }
        };
        assert!(try_run(&derive).is_err());

        let derive: DeriveInput = syn::parse_quote! {
            struct Both {
                #[arg]
                #[operands]
                value: Vec<String>,
            }
        };
        assert!(try_run(&derive).is_err());
    }
}
