//! `Injectable` 实现生成

use crate::utils::{arc_inner, is_trait_object};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    Attribute, Error, Expr, Fields, Generics, Ident, LitStr, Result, Token,
};

/// 字段上的 `#[inject(...)]` 参数
enum InjectOverride {
    /// `#[inject("name")]`
    Name(LitStr),
    /// `#[inject(token = expr)]`
    Token(Expr),
}

impl Parse for InjectOverride {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        if input.peek(LitStr) {
            return Ok(Self::Name(input.parse()?));
        }

        let key: Ident = input.parse()?;
        if key != "token" {
            return Err(Error::new(
                key.span(),
                "inject 只支持 #[inject(\"name\")] 或 #[inject(token = expr)]",
            ));
        }
        input.parse::<Token![=]>()?;
        Ok(Self::Token(input.parse()?))
    }
}

fn inject_override(attrs: &[Attribute]) -> Result<Option<InjectOverride>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("inject")) {
        if found.is_some() {
            return Err(Error::new_spanned(attr, "同一字段只能有一个 #[inject]"));
        }
        found = Some(attr.parse_args::<InjectOverride>()?);
    }
    Ok(found)
}

/// 去掉字段上的 `#[inject]`，属性宏输出时使用
pub fn strip_inject_attributes(fields: &mut Fields) {
    for field in fields.iter_mut() {
        field.attrs.retain(|attr| !attr.path().is_ident("inject"));
    }
}

/// 拒绝泛型类型
pub fn reject_generics(generics: &Generics) -> Result<()> {
    if generics.params.is_empty() {
        Ok(())
    } else {
        Err(Error::new_spanned(
            generics,
            "可注入类型不能带泛型参数，请为具体类型分别声明",
        ))
    }
}

/// 生成 `Injectable` 实现
///
/// 字段按声明顺序成为构造参数：`Arc<T>` 字段以 `T` 的类型令牌解析并共享实例，
/// 其他字段以自身类型令牌解析并克隆；`#[inject]` 覆盖单个字段的令牌。
///
/// `Arc<dyn Trait>` 字段的令牌同样是 `dyn Trait`，但容器中存放的必须是
/// `Arc<dyn Trait>` 本身，例如 `Provider::value(token, repo as Arc<dyn Trait>)`，
/// 字段取到的是该值的克隆。
pub fn expand_injectable(ident: &Ident, fields: &Fields) -> Result<TokenStream> {
    let deps = format_ident!("__hexy_deps");
    let mut tokens = Vec::with_capacity(fields.len());
    let mut values = Vec::with_capacity(fields.len());

    for (index, field) in fields.iter().enumerate() {
        let ty = &field.ty;
        let inner = arc_inner(ty);

        let token = match inject_override(&field.attrs)? {
            Some(InjectOverride::Name(name)) => {
                quote! { ::hexy_di_abstractions::Token::from(#name) }
            }
            Some(InjectOverride::Token(expr)) => {
                quote! { ::core::convert::Into::<::hexy_di_abstractions::Token>::into(#expr) }
            }
            None => match inner {
                Some(inner) => quote! { ::hexy_di_abstractions::Token::of::<#inner>() },
                None => quote! { ::hexy_di_abstractions::Token::of::<#ty>() },
            },
        };
        tokens.push(token);

        let value = match inner {
            Some(inner) if !is_trait_object(inner) => quote! { #deps.arc::<#inner>(#index)? },
            _ => quote! { #deps.cloned::<#ty>(#index)? },
        };
        values.push(value);
    }

    let body = match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|field| &field.ident);
            quote! { Self { #(#names: #values),* } }
        }
        Fields::Unnamed(_) => quote! { Self(#(#values),*) },
        Fields::Unit => quote! { Self },
    };

    Ok(quote! {
        impl ::hexy_di_abstractions::Injectable for #ident {
            fn dependencies() -> ::std::vec::Vec<::hexy_di_abstractions::Token> {
                ::std::vec![#(#tokens),*]
            }

            fn construct(
                #deps: &::hexy_di_abstractions::ResolvedDependencies,
            ) -> ::core::result::Result<Self, ::hexy_di_abstractions::DependencyError> {
                ::core::result::Result::Ok(#body)
            }
        }
    })
}
