//! 容器配置与统计信息

use hexy_common::Scope;
use serde::{Deserialize, Serialize};

/// 容器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerConfig {
    /// 最大解析深度
    pub max_resolution_depth: usize,
    /// 未显式声明作用域的提供者使用的作用域
    pub default_scope: Scope,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_resolution_depth: 100,
            default_scope: Scope::Singleton,
        }
    }
}

/// 容器统计信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContainerStats {
    /// 已注册提供者数量
    pub registered_providers: usize,
    /// 已缓存的单例数量
    pub cached_singletons: usize,
    /// 顶层解析次数
    pub resolutions: usize,
    /// 解析失败次数
    pub resolution_errors: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: ContainerConfig =
            serde_json::from_str(r#"{ "default_scope": "transient" }"#).unwrap();

        assert_eq!(config.default_scope, Scope::Transient);
        assert_eq!(config.max_resolution_depth, 100);
    }
}
