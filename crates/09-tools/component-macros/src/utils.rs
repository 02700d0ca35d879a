//! 宏工具函数

use proc_macro2::Span;
use syn::{punctuated::Punctuated, Attribute, GenericArgument, Ident, Path, PathArguments, Token, Type};

/// 本 crate 提供的属性宏名称
pub const HEXY_ATTRIBUTES: [&str; 11] = [
    "injectable",
    "domain_service",
    "domain_repository",
    "domain_aggregate",
    "domain_entity",
    "domain_value_object",
    "domain_event",
    "application_service",
    "application_use_case",
    "infrastructure_service",
    "infrastructure_repository",
];

fn last_segment_is(path: &Path, names: &[&str]) -> bool {
    path.segments
        .last()
        .map(|segment| names.iter().any(|name| segment.ident == name))
        .unwrap_or(false)
}

/// 属性是否是本 crate 的属性宏
pub fn is_hexy_attribute(attr: &Attribute) -> bool {
    last_segment_is(attr.path(), &HEXY_ATTRIBUTES)
}

/// 属性是否是包含 `Injectable` 的 derive
pub fn derives_injectable(attr: &Attribute) -> bool {
    if !attr.path().is_ident("derive") {
        return false;
    }
    attr.parse_args_with(Punctuated::<Path, Token![,]>::parse_terminated)
        .map(|paths| paths.iter().any(|path| last_segment_is(path, &["Injectable"])))
        .unwrap_or(false)
}

/// 后续属性中是否还有负责生成 `Injectable` 实现的宏
pub fn injectable_impl_deferred(remaining: &[Attribute]) -> bool {
    remaining
        .iter()
        .any(|attr| is_hexy_attribute(attr) || derives_injectable(attr))
}

/// 提取 `Arc<T>` 中的 `T`
pub fn arc_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Arc" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    if args.args.len() != 1 {
        return None;
    }
    match args.args.first() {
        Some(GenericArgument::Type(inner)) => Some(inner),
        _ => None,
    }
}

/// 是否为 `dyn Trait` 类型
pub fn is_trait_object(ty: &Type) -> bool {
    match ty {
        Type::TraitObject(_) => true,
        Type::Paren(paren) => is_trait_object(&paren.elem),
        Type::Group(group) => is_trait_object(&group.elem),
        _ => false,
    }
}

/// 生成注册函数的名称
///
/// 保留结构体名称的大小写，生成的函数需要 `#[allow(non_snake_case)]`。
pub fn registration_ident(struct_name: &Ident, kind: &str) -> Ident {
    Ident::new(
        &format!("__hexy_register_{}_{}", struct_name, kind),
        Span::call_site(),
    )
}
