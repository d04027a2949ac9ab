//! Type helpers.

use syn::{GenericArgument, PathArguments, PathSegment, Type, TypePath};

/// Field type shapes, each bound in its own way.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Ty {
    Option,
    OptionOption,
    OptionVec,
    Vec,
    Simple,
}

impl Ty {
    pub(crate) fn from_syn_ty(ty: &Type) -> Self {
        if has_ty_param_if_name(ty, "Vec") {
            Ty::Vec
        } else if let Some(param_ty) = get_ty_param_if_name(ty, "Option") {
            if has_ty_param_if_name(param_ty, "Option") {
                Ty::OptionOption
            } else if has_ty_param_if_name(param_ty, "Vec") {
                Ty::OptionVec
            } else {
                Ty::Option
            }
        } else {
            Ty::Simple
        }
    }

    /// Evaluate if the field holds all the values of its argument.
    pub(crate) fn is_collection(self) -> bool {
        matches!(self, Ty::Vec | Ty::OptionVec)
    }
}

/// Retrieve the type of each value held by the field.
pub(crate) fn get_inner_ty(ty: &Type) -> &Type {
    match Ty::from_syn_ty(ty) {
        Ty::Option | Ty::Vec => get_ty_param(ty).unwrap_or(ty),
        Ty::OptionOption | Ty::OptionVec => get_ty_param(ty).and_then(get_ty_param).unwrap_or(ty),
        Ty::Simple => ty,
    }
}

pub(crate) fn is_simple_ty(ty: &Type, name: &str) -> bool {
    last_path_segment(ty)
        .is_some_and(|segment| segment.arguments.is_none() && segment.ident == name)
}

pub(crate) fn has_ty_param_if_name(ty: &Type, name: &str) -> bool {
    get_ty_param_if_name(ty, name).is_some()
}

pub(crate) fn get_ty_param(ty: &Type) -> Option<&Type> {
    get_ty_param_if(ty, |_| true)
}

pub(crate) fn get_ty_param_if_name<'a>(ty: &'a Type, name: &str) -> Option<&'a Type> {
    get_ty_param_if(ty, |x| x.ident == name)
}

fn get_ty_param_if<F>(ty: &Type, f: F) -> Option<&Type>
where
    F: FnOnce(&PathSegment) -> bool,
{
    let segment = last_path_segment(ty).filter(|segment| f(segment))?;

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    // The first type parameter holds the value type (e.g. `heapless::Vec<T, N>`).
    args.args.iter().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Retrieve the last segment of a type path, so that `Vec`, `alloc::vec::Vec` and
/// `heapless::Vec` are seen alike.
fn last_path_segment(mut ty: &Type) -> Option<&PathSegment> {
    // Types coming from `macro_rules` expansions may be wrapped in an invisible group.
    while let Type::Group(syn::TypeGroup { elem, .. }) = ty {
        ty = elem;
    }

    match ty {
        Type::Path(TypePath { qself: None, path }) => path.segments.last(),
        _ => None,
    }
}
