//! # Hexy 组合层
//!
//! 把提供者组织成模块，按分层标记扫描类型，并把它们装配进一个可运行的容器。
//!
//! ## 主要功能
//!
//! - **模块组合**: 通过导入和导出控制提供者的可见性
//! - **分层扫描**: 按分层标记把类型自动注册为提供者
//! - **应用构建器**: 从根模块创建容器并完成日志、配置初始化
//!
//! ## 基本使用
//!
//! ```rust,no_run
//! use hexy_composition::{ApplicationBuilder, Module};
//! use hexy_di_abstractions::Provider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let storage = Module::builder("Storage")
//!         .provider(Provider::value("database.url", String::from("memory://")))
//!         .export_token("database.url")
//!         .build();
//!     let root = Module::builder("App").import(storage).build();
//!
//!     let app = ApplicationBuilder::new(root).build()?;
//!     app.initialize().await?;
//!
//!     let url = app.resolve_as::<String>("database.url")?;
//!     println!("数据库地址: {}", url);
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod module;
pub mod scanner;
pub mod settings;

pub use builder::{initialize_logging, Application, ApplicationBuilder, LoggingConfig};
pub use module::{Export, Module, ModuleBuilder};
pub use scanner::{register_in_layer, LayerScanner};
pub use settings::HexySettings;

// 重新导出错误类型
pub use hexy_common::{InfrastructureError, LifecycleError};
