//! 组件生命周期管理

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 提供者作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// 单例模式 - 首次解析后缓存，之后总是返回同一个实例
    #[default]
    Singleton,
    /// 瞬时模式 - 每次解析都创建新实例
    Transient,
}

impl Scope {
    /// 是否为单例
    pub fn is_singleton(self) -> bool {
        matches!(self, Self::Singleton)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Singleton => f.write_str("singleton"),
            Self::Transient => f.write_str("transient"),
        }
    }
}

/// 异步初始化钩子
///
/// 模块初始化时，单例提供者的实例若实现了此 trait，会按声明顺序依次被调用。
#[async_trait]
pub trait Initializable: Send + Sync {
    /// 初始化实例
    async fn initialize(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
