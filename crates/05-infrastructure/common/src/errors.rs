//! 错误类型定义

use thiserror::Error;

/// 依赖注入错误类型
///
/// 令牌在错误中以展示形式（`Display`）保存，便于直接打印。
#[derive(Error, Debug)]
pub enum DependencyError {
    #[error("未找到提供者: {token}")]
    NotFound { token: String },

    #[error("检测到循环依赖: {token}, 解析链: {chain}")]
    CircularDependency { token: String, chain: String },

    #[error("提供者配置无效: {token}, 原因: {message}")]
    InvalidProvider { token: String, message: String },

    #[error("实例类型不匹配: {token}, 期望类型: {expected}")]
    TypeMismatch {
        token: String,
        expected: &'static str,
    },

    #[error("依赖索引越界: 第 {index} 个依赖, 共 {len} 个")]
    DependencyIndexOutOfRange { index: usize, len: usize },

    #[error("组件创建失败: {token}, 原因: {source}")]
    ConstructionFailed {
        token: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("解析深度超出限制: {token}, 最大深度: {max_depth}")]
    ResolutionDepthExceeded { token: String, max_depth: usize },
}

impl DependencyError {
    /// 创建未找到错误
    pub fn not_found(token: impl ToString) -> Self {
        Self::NotFound {
            token: token.to_string(),
        }
    }

    /// 创建提供者配置无效错误
    pub fn invalid_provider(token: impl ToString, message: impl Into<String>) -> Self {
        Self::InvalidProvider {
            token: token.to_string(),
            message: message.into(),
        }
    }

    /// 包装构造过程中的外部错误
    pub fn construction(
        token: impl ToString,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::ConstructionFailed {
            token: token.to_string(),
            source: source.into(),
        }
    }

    /// 是否为未找到错误
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// 是否为循环依赖错误
    pub fn is_circular(&self) -> bool {
        matches!(self, Self::CircularDependency { .. })
    }
}

/// 生命周期管理错误类型
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error("模块初始化失败: {module}, 提供者: {token}, 原因: {message}")]
    InitializationFailed {
        module: String,
        token: String,
        message: String,
    },

    #[error("初始化前解析失败: {source}")]
    Resolution {
        #[from]
        source: DependencyError,
    },
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    #[error("配置解析失败: {source}")]
    ParseError {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("配置验证失败: {message}")]
    ValidationError { message: String },
}

/// 基础设施错误类型
#[derive(Error, Debug)]
pub enum InfrastructureError {
    #[error("配置错误: {source}")]
    ConfigError {
        #[from]
        source: ConfigError,
    },

    #[error("依赖注入错误: {source}")]
    DependencyError {
        #[from]
        source: DependencyError,
    },

    #[error("生命周期错误: {source}")]
    LifecycleError {
        #[from]
        source: LifecycleError,
    },

    #[error("基础设施启动失败: {message}")]
    BootstrapFailed { message: String },
}

/// 结果类型别名
pub type DependencyResult<T> = Result<T, DependencyError>;
pub type LifecycleResult<T> = Result<T, LifecycleError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type InfrastructureResult<T> = Result<T, InfrastructureError>;
