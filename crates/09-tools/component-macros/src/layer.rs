//! 分层标记宏实现

use crate::injectable::{expand_injectable, reject_generics, strip_inject_attributes};
use crate::utils::{injectable_impl_deferred, registration_ident};
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Error, ItemStruct};

/// 属性宏写入的标记
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// 只标记为可注入
    Injectable,
    /// 标记分层，同时标记为可注入
    Layer(&'static str),
}

impl Marker {
    fn suffix(self) -> &'static str {
        match self {
            Self::Injectable => "injectable",
            Self::Layer(variant) => variant,
        }
    }
}

/// 实现分层属性宏
///
/// 原样输出结构体，附加 `Injectable` 实现和启动时写入元数据的注册函数。
/// 同一结构体叠加多个属性时，只由最后一个生成 `Injectable` 实现。
pub fn layer_attribute(marker: Marker, args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return Error::new(
            proc_macro2::Span::call_site(),
            "分层属性不接受参数",
        )
        .to_compile_error()
        .into();
    }

    let mut item = parse_macro_input!(input as ItemStruct);
    if let Err(e) = reject_generics(&item.generics) {
        return e.to_compile_error().into();
    }

    let struct_name = item.ident.clone();
    let injectable_impl = if injectable_impl_deferred(&item.attrs) {
        quote! {}
    } else {
        match expand_injectable(&struct_name, &item.fields) {
            Ok(tokens) => {
                strip_inject_attributes(&mut item.fields);
                tokens
            }
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let registration_fn = registration_ident(&struct_name, &marker.suffix().to_lowercase());
    let record = match marker {
        Marker::Injectable => quote! {
            ::hexy_common::mark_injectable_type(::hexy_common::TypeInfo::of::<#struct_name>());
        },
        Marker::Layer(variant) => {
            let variant = syn::Ident::new(variant, proc_macro2::Span::call_site());
            quote! {
                ::hexy_common::tag_layer_type(
                    ::hexy_common::TypeInfo::of::<#struct_name>(),
                    ::hexy_common::LayerKind::#variant,
                );
            }
        }
    };

    let expanded = quote! {
        #item

        #injectable_impl

        // 使用 ctor 在程序启动时写入元数据
        #[::ctor::ctor]
        #[allow(non_snake_case)]
        fn #registration_fn() {
            #record
        }
    };

    TokenStream::from(expanded)
}

/// 实现 #[derive(Injectable)] 宏
pub fn derive_injectable(input: DeriveInput) -> TokenStream {
    if let Err(e) = reject_generics(&input.generics) {
        return e.to_compile_error().into();
    }

    let syn::Data::Struct(data) = &input.data else {
        return Error::new_spanned(&input.ident, "Injectable 只能用于结构体")
            .to_compile_error()
            .into();
    };

    match expand_injectable(&input.ident, &data.fields) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => e.to_compile_error().into(),
    }
}
