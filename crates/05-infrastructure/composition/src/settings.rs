//! 框架配置加载
//!
//! 依次合并 `config/hexy.*`（可选）、显式指定的配置文件和 `HEXY__` 前缀的环境变量，
//! 后加载的来源覆盖先加载的来源。

use crate::builder::LoggingConfig;
use hexy_common::{ConfigError, ConfigResult};
use hexy_di_abstractions::ContainerConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// 默认配置文件（不含扩展名）
pub const DEFAULT_CONFIG_FILE: &str = "config/hexy";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "HEXY";

/// 框架配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexySettings {
    /// 容器配置
    pub container: ContainerConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

impl HexySettings {
    /// 从默认配置文件和环境变量加载
    pub fn load() -> ConfigResult<Self> {
        Self::load_sources(None, ENV_PREFIX)
    }

    /// 额外加载指定的配置文件，文件必须存在
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        Self::load_sources(Some(path.as_ref()), ENV_PREFIX)
    }

    fn load_sources(path: Option<&Path>, env_prefix: &str) -> ConfigResult<Self> {
        let mut builder = ::config::Config::builder()
            .add_source(::config::File::with_name(DEFAULT_CONFIG_FILE).required(false));

        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::FileNotFound {
                    path: path.display().to_string(),
                });
            }
            debug!("加载配置文件: {}", path.display());
            builder = builder.add_source(::config::File::from(path));
        }

        let settings: Self = builder
            .add_source(::config::Environment::with_prefix(env_prefix).separator("__"))
            .build()
            .and_then(|config| config.try_deserialize())
            .map_err(|e| ConfigError::ParseError {
                source: Box::new(e),
            })?;

        settings.validate()?;
        Ok(settings)
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.container.max_resolution_depth == 0 {
            return Err(ConfigError::ValidationError {
                message: "container.max_resolution_depth 必须大于 0".to_string(),
            });
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "logging.level 不能为空".to_string(),
            });
        }
        Ok(())
    }
}
