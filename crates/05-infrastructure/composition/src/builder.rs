//! 应用构建器

use crate::module::Module;
use crate::scanner::LayerScanner;
use crate::settings::HexySettings;
use hexy_common::{DependencyError, InfrastructureError, LifecycleError};
use hexy_di_abstractions::{
    ClassRef, ComponentScanner, ContainerConfig, Instance, ScanOptions, Token,
};
use hexy_di_impl::Container;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// 应用构建器
///
/// 以根模块为起点组装容器：注册根模块可见的全部提供者，再扫描额外登记的类型。
pub struct ApplicationBuilder {
    /// 根模块
    root: Arc<Module>,
    /// 容器配置
    container_config: ContainerConfig,
    /// 日志配置，未设置时不初始化日志
    logging_config: Option<LoggingConfig>,
    /// 待扫描的类型
    classes: Vec<ClassRef>,
    /// 扫描选项
    scan_options: ScanOptions,
}

impl ApplicationBuilder {
    /// 创建新的应用构建器
    pub fn new(root: Arc<Module>) -> Self {
        Self {
            root,
            container_config: ContainerConfig::default(),
            logging_config: None,
            classes: Vec::new(),
            scan_options: ScanOptions::default(),
        }
    }

    /// 设置容器配置
    pub fn with_config(mut self, config: ContainerConfig) -> Self {
        self.container_config = config;
        self
    }

    /// 使用加载好的框架配置，同时启用其中的日志配置
    pub fn with_settings(mut self, settings: HexySettings) -> Self {
        self.container_config = settings.container;
        self.logging_config = Some(settings.logging);
        self
    }

    /// 配置日志
    pub fn with_logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 登记需要扫描的类型
    pub fn scan(mut self, classes: impl IntoIterator<Item = ClassRef>) -> Self {
        self.classes.extend(classes);
        self
    }

    /// 设置扫描选项
    pub fn with_scan_options(mut self, options: ScanOptions) -> Self {
        self.scan_options = options;
        self
    }

    /// 构建应用
    pub fn build(self) -> Result<Application, InfrastructureError> {
        // 只有在明确配置了日志时才初始化日志
        if let Some(logging) = &self.logging_config {
            initialize_logging(logging)?;
        }

        info!("开始构建应用: 根模块 {}", self.root.name());
        let container = Container::with_config(self.container_config);
        container.register_many(self.root.get_all_providers())?;

        if !self.classes.is_empty() {
            let scanner = LayerScanner::new();
            let classified = scanner.scan(&container, &self.classes, &self.scan_options)?;
            debug!("扫描器 {} 分类了 {} 个类型", scanner.name(), classified.len());
        }

        info!(
            "应用构建完成，共注册 {} 个提供者",
            container.stats().registered_providers
        );
        Ok(Application {
            container: Arc::new(container),
            root: self.root,
        })
    }
}

/// 构建完成的应用
#[derive(Debug, Clone)]
pub struct Application {
    container: Arc<Container>,
    root: Arc<Module>,
}

impl Application {
    /// 依赖注入容器
    pub fn container(&self) -> &Arc<Container> {
        &self.container
    }

    /// 根模块
    pub fn root(&self) -> &Arc<Module> {
        &self.root
    }

    /// 初始化根模块及其导入的全部模块
    pub async fn initialize(&self) -> Result<(), LifecycleError> {
        self.root.initialize(self.container.as_ref()).await
    }

    /// 解析令牌对应的实例
    pub fn resolve(&self, token: impl Into<Token>) -> Result<Instance, DependencyError> {
        self.container.resolve(token)
    }

    /// 解析并转换为具体类型
    pub fn resolve_as<T: Any + Send + Sync>(
        &self,
        token: impl Into<Token>,
    ) -> Result<Arc<T>, DependencyError> {
        self.container.resolve_as(token)
    }

    /// 以类型令牌解析
    pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>, DependencyError> {
        self.container.get()
    }
}

/// 日志配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别或过滤指令，例如 `info`、`hexy_di_impl=trace`
    pub level: String,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名
    pub show_file: bool,
    /// 是否显示行号
    pub show_line_number: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            show_target: true,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 创建开发环境日志配置
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            show_target: true,
            show_thread_ids: true,
            show_file: true,
            show_line_number: true,
            json_format: false,
        }
    }

    /// 创建生产环境日志配置
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            show_target: false,
            show_thread_ids: false,
            show_file: false,
            show_line_number: false,
            json_format: true,
        }
    }
}

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先于配置中的级别。全局订阅者已存在时返回错误而不是 panic。
pub fn initialize_logging(config: &LoggingConfig) -> Result<(), InfrastructureError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| InfrastructureError::BootstrapFailed {
            message: format!("日志级别无效: {}, 原因: {}", config.level, e),
        })?;

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.show_target)
        .with_thread_ids(config.show_thread_ids)
        .with_file(config.show_file)
        .with_line_number(config.show_line_number);

    if config.json_format {
        subscriber.json().try_init()
    } else {
        subscriber.try_init()
    }
    .map_err(|e| InfrastructureError::BootstrapFailed {
        message: format!("日志初始化失败: {}", e),
    })?;

    info!("日志系统初始化完成");
    Ok(())
}
