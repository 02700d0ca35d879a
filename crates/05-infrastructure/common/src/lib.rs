//! # Hexy Common
//!
//! 这个 crate 提供了 Hexy 依赖注入框架各层共用的类型。
//!
//! ## 核心内容
//!
//! - [`DependencyError`] - 依赖注册与解析错误
//! - [`Scope`] - 提供者作用域（单例 / 瞬时）
//! - [`Initializable`] - 异步初始化钩子
//! - [`TypeInfo`] - 类型信息
//! - [`LayerKind`] - 分层标记，以及记录标记的全局元数据表
//!
//! ## 设计原则
//!
//! - 元数据在类型之外保存，不占用实例字段
//! - 标记只在定义期写入一次，之后只读

pub mod errors;
pub mod lifecycle;
pub mod metadata;

pub use errors::*;
pub use lifecycle::*;
pub use metadata::*;
