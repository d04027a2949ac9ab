//! Field metadata.

use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::{Field, Ident, Type, spanned::Spanned};

use crate::attr::{Attr, AttrKind, parse_doc, parse_kinds};

/// Field metadata.
pub struct MetaArg {
    /// Field span.
    pub span: Span,

    /// Field identifier, possibly raw.
    pub id: Ident,

    /// Type.
    pub ty: Type,

    /// Kinds of the binding attributes, with their location.
    pub kinds: Vec<(AttrKind, Span)>,

    /// Names of the `#[arg(...)]` attributes.
    pub attrs: Vec<Attr>,

    /// Documentation.
    pub doc: Option<String>,
}

impl MetaArg {
    /// Create a new field metadata.
    pub fn new(field: &Field) -> Result<Self, syn::Error> {
        let id = field
            .ident
            .clone()
            .ok_or_else(|| syn::Error::new(field.span(), "expected a named field"))?;

        Ok(MetaArg {
            span: field.span(),
            id,
            ty: field.ty.clone(),
            kinds: parse_kinds(&field.attrs)?,
            attrs: Attr::parse_all(&field.attrs)?,
            doc: parse_doc(&field.attrs),
        })
    }

    /// The field name, without the raw prefix.
    pub fn name(&self) -> String {
        self.id.unraw().to_string()
    }

    /// Find the first binding attribute of the given kind.
    pub fn find_kind(&self, kind: AttrKind) -> Option<Span> {
        self.kinds.iter().find(|x| x.0 == kind).map(|x| x.1)
    }

    /// Evaluate if the field is bound to an argument.
    pub fn is_arg(&self) -> bool {
        self.find_kind(AttrKind::Arg).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_collect_field_metadata() -> anyhow::Result<()> {
        let field: Field = syn::parse_quote! {
            /// The type.
            #[arg(short = 't', long)]
            r#type: String
        };

        let meta = MetaArg::new(&field)?;

        assert_eq!("type", meta.name());
        assert!(meta.is_arg());
        assert!(meta.find_kind(AttrKind::Operands).is_none());
        assert_eq!(2, meta.attrs.len());
        assert_eq!(Some("The type.".to_string()), meta.doc);

        Ok(())
    }

    #[test]
    fn it_should_ignore_unannotated_field() -> anyhow::Result<()> {
        let field: Field = syn::parse_quote!(value: u32);

        let meta = MetaArg::new(&field)?;

        assert!(!meta.is_arg());
        assert!(meta.find_kind(AttrKind::Operands).is_none());
        assert!(meta.attrs.is_empty());

        Ok(())
    }
}
