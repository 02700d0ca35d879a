//! # Dependency Injection Abstractions
//!
//! 依赖注入抽象层，定义令牌、提供者以及依赖解析的核心接口。
//!
//! ## 核心接口
//!
//! - [`Token`] - 依赖查找键
//! - [`Provider`] - 令牌到实例化策略的绑定
//! - [`Injectable`] - 可由容器构造的类型
//! - [`Resolver`] - 依赖解析器接口
//! - [`ProviderRegistry`] - 提供者注册表接口

pub mod container;
pub mod injectable;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod scanner;
pub mod token;

pub use container::*;
pub use injectable::*;
pub use provider::*;
pub use registry::*;
pub use resolver::*;
pub use scanner::*;
pub use token::*;

pub use hexy_common::{DependencyError, DependencyResult, Scope};
