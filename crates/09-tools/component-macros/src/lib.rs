//! # Hexy Macros
//!
//! 这个 crate 提供了注入实现生成和分层标记的过程宏。
//!
//! ## 核心宏
//!
//! - [`macro@injectable`] - 标记为可注入并生成 `Injectable` 实现
//! - [`macro@domain_service`] 等十个分层属性 - 写入分层标记并生成 `Injectable` 实现
//! - [`derive@Injectable`] - 只生成 `Injectable` 实现，不写入任何标记
//!
//! 属性宏生成的代码引用 `hexy_common`、`hexy_di_abstractions` 和 `ctor`，
//! 使用方需要直接依赖这三个 crate。
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use hexy_macros::{domain_repository, domain_service};
//! use std::sync::Arc;
//!
//! #[domain_repository]
//! pub struct InMemoryTaskRepository;
//!
//! #[domain_service]
//! pub struct TaskService {
//!     repository: Arc<InMemoryTaskRepository>,
//!     #[inject("task.limit")]
//!     limit: usize,
//! }
//! ```

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod injectable;
mod layer;
mod utils;

use layer::{layer_attribute, Marker};

/// 可注入标记宏
///
/// 生成 `Injectable` 实现，并在程序启动时把类型标记为可注入。
/// 结构体字段按声明顺序成为构造参数：
///
/// - `Arc<T>` 字段以 `Token::of::<T>()` 解析，共享容器中的实例
/// - 其他类型的字段以自身的类型令牌解析，要求实现 `Clone`
/// - `#[inject("name")]` 或 `#[inject(token = expr)]` 覆盖单个字段的令牌
///
/// # 示例
///
/// ```rust,ignore
/// #[injectable]
/// pub struct Greeter {
///     #[inject("Name")]
///     name: String,
/// }
/// ```
#[proc_macro_attribute]
pub fn injectable(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Injectable, args, input)
}

/// 领域服务标记宏
///
/// 写入分层标记，同时标记为可注入并生成 `Injectable` 实现，字段规则与 [`macro@injectable`] 相同。
/// 其余九个分层属性的行为与此一致，只是写入的标记不同。
#[proc_macro_attribute]
pub fn domain_service(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainService"), args, input)
}

/// 领域仓储标记宏
#[proc_macro_attribute]
pub fn domain_repository(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainRepository"), args, input)
}

/// 聚合根标记宏
#[proc_macro_attribute]
pub fn domain_aggregate(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainAggregate"), args, input)
}

/// 实体标记宏
#[proc_macro_attribute]
pub fn domain_entity(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainEntity"), args, input)
}

/// 值对象标记宏
#[proc_macro_attribute]
pub fn domain_value_object(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainValueObject"), args, input)
}

/// 领域事件标记宏
#[proc_macro_attribute]
pub fn domain_event(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("DomainEvent"), args, input)
}

/// 应用服务标记宏
#[proc_macro_attribute]
pub fn application_service(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("ApplicationService"), args, input)
}

/// 用例标记宏
#[proc_macro_attribute]
pub fn application_use_case(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("ApplicationUseCase"), args, input)
}

/// 基础设施服务标记宏
#[proc_macro_attribute]
pub fn infrastructure_service(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("InfrastructureService"), args, input)
}

/// 基础设施仓储标记宏
#[proc_macro_attribute]
pub fn infrastructure_repository(args: TokenStream, input: TokenStream) -> TokenStream {
    layer_attribute(Marker::Layer("InfrastructureRepository"), args, input)
}

/// 注入派生宏
///
/// 只生成 `Injectable` 实现，不写入任何元数据。
///
/// # 示例
///
/// ```rust,ignore
/// #[derive(Injectable)]
/// pub struct Clock;
/// ```
#[proc_macro_derive(Injectable, attributes(inject))]
pub fn derive_injectable(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    layer::derive_injectable(input)
}
