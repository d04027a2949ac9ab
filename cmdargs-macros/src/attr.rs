//! Attribute helpers.

use proc_macro2::Span;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Expr, ExprLit, Ident, Lit, LitStr, Meta, Token};

/// Attribute kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrKind {
    /// Argument attribute, i.e. `#[arg(...)]`.
    Arg,

    /// Operands attribute, i.e. `#[operands]`.
    Operands,
}

/// Attribute name.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AttrName {
    /// Long name.
    Long,

    /// Short name.
    Short,

    /// Help text.
    Help,
}

/// Attribute value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrValue {
    /// LitStr is a literal string.
    LitStr(LitStr),

    /// Expr is an expression.
    Expr(Expr),
}

/// This defines an attribute.
#[derive(Clone, Debug)]
pub struct Attr {
    /// The attribute identifier.
    pub id: Ident,

    /// The attribute name.
    pub name: AttrName,

    /// The attribute optional value.
    pub value: Option<AttrValue>,
}

/// The kinds of the attributes found on an item, with their location.
pub fn parse_kinds(attrs: &[Attribute]) -> Result<Vec<(AttrKind, Span)>, syn::Error> {
    let mut kinds = Vec::new();

    for attr in attrs {
        if attr.path().is_ident("arg") {
            if let Meta::NameValue(_) = attr.meta {
                return Err(syn::Error::new(
                    attr.span(),
                    "expected `#[arg]` or `#[arg(...)]`",
                ));
            }

            kinds.push((AttrKind::Arg, attr.span()));
        } else if attr.path().is_ident("operands") {
            if !matches!(attr.meta, Meta::Path(_)) {
                return Err(syn::Error::new(
                    attr.span(),
                    "`#[operands]` does not take any argument",
                ));
            }

            kinds.push((AttrKind::Operands, attr.span()));
        }
    }

    Ok(kinds)
}

/// Collect the documentation of an item, one line per `#[doc]` attribute.
pub fn parse_doc(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|x| x.path().is_ident("doc"))
        .filter_map(|x| match &x.meta {
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(lit), ..
                }) => Some(lit.value().trim().to_string()),
                _ => None,
            },
            _ => None,
        })
        .collect();

    let doc = lines.join(" ").trim().to_string();
    if doc.is_empty() { None } else { Some(doc) }
}

impl Attr {
    /// Parse all the names of the `#[arg(...)]` attributes given as input.
    pub fn parse_all(attrs: &[Attribute]) -> Result<Vec<Self>, syn::Error> {
        let mut parsed = Vec::new();

        for attr in attrs {
            if !attr.path().is_ident("arg") {
                continue;
            }

            // A bare `#[arg]` has no name.
            if let Meta::Path(_) = attr.meta {
                continue;
            }

            let args = attr.parse_args_with(Punctuated::<Self, Token![,]>::parse_terminated)?;
            parsed.extend(args);
        }

        Ok(parsed)
    }
}

impl Parse for Attr {
    fn parse(input: ParseStream<'_>) -> Result<Self, syn::Error> {
        let id: Ident = input.parse()?;

        let name = match id.to_string().as_str() {
            "long" => AttrName::Long,
            "short" => AttrName::Short,
            "help" => AttrName::Help,
            other => {
                return Err(syn::Error::new(
                    id.span(),
                    format!("unknown argument attribute `{other}`"),
                ));
            }
        };

        let value = if input.peek(Token![=]) {
            // Skip the assign sign.
            let assign = input.parse::<Token![=]>()?;

            if input.peek(LitStr) {
                Some(AttrValue::LitStr(input.parse::<LitStr>()?))
            } else if let Ok(expr) = input.parse::<Expr>() {
                Some(AttrValue::Expr(expr))
            } else {
                return Err(syn::Error::new(
                    assign.span,
                    "expected a string or an expression after `=`",
                ));
            }
        } else {
            None
        };

        Ok(Attr { id, name, value })
    }
}
