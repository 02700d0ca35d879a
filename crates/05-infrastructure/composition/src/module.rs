//! 模块组合
//!
//! 模块是一组提供者的命名分组，通过导入和导出控制可见性：
//! 提供者默认只在模块内部可见，只有显式导出的部分才会暴露给导入方。

use futures::future::BoxFuture;
use hexy_common::LifecycleError;
use hexy_di_abstractions::{Provider, Resolver, Token};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 导出项
#[derive(Clone)]
pub enum Export {
    /// 直接导出提供者
    Provider(Provider),
    /// 转导出另一个模块的导出集合
    Module(Arc<Module>),
    /// 按令牌导出本模块自身的提供者
    Token(Token),
}

impl From<Provider> for Export {
    fn from(provider: Provider) -> Self {
        Self::Provider(provider)
    }
}

impl From<Arc<Module>> for Export {
    fn from(module: Arc<Module>) -> Self {
        Self::Module(module)
    }
}

impl From<Token> for Export {
    fn from(token: Token) -> Self {
        Self::Token(token)
    }
}

impl fmt::Debug for Export {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider(provider) => f.debug_tuple("Provider").field(provider.token()).finish(),
            Self::Module(module) => f.debug_tuple("Module").field(&module.name).finish(),
            Self::Token(token) => f.debug_tuple("Token").field(token).finish(),
        }
    }
}

/// 模块
///
/// 构建完成后不可变，以 `Arc<Module>` 的形式在导入方之间共享。
pub struct Module {
    name: String,
    providers: Vec<Provider>,
    imports: Vec<Arc<Module>>,
    exports: Vec<Export>,
}

impl Module {
    /// 创建模块构建器
    pub fn builder(name: impl Into<String>) -> ModuleBuilder {
        ModuleBuilder {
            name: name.into(),
            providers: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// 模块名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 本模块自身声明的提供者
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// 导出项
    pub fn exports(&self) -> &[Export] {
        &self.exports
    }

    /// 本模块可见的全部提供者
    ///
    /// 自身的提供者在前，随后按导入顺序追加各导入模块的导出集合。
    /// 导入模块未导出的内部提供者不会出现在这里。
    pub fn get_all_providers(&self) -> Vec<Provider> {
        let mut providers = self.providers.clone();
        for import in &self.imports {
            providers.extend(import.get_exported_providers());
        }
        providers
    }

    /// 本模块暴露给导入方的提供者
    pub fn get_exported_providers(&self) -> Vec<Provider> {
        let mut exported = Vec::new();
        for export in &self.exports {
            match export {
                Export::Module(module) => exported.extend(module.get_exported_providers()),
                Export::Provider(provider) => exported.push(provider.clone()),
                Export::Token(token) => match self.own_provider(token) {
                    Some(provider) => exported.push(provider.clone()),
                    None => warn!(
                        "模块 {} 导出的令牌没有对应的提供者，已跳过: {}",
                        self.name, token
                    ),
                },
            }
        }
        exported
    }

    /// 导入的模块
    pub fn get_imported_modules(&self) -> &[Arc<Module>] {
        &self.imports
    }

    /// 导入模块的名称
    pub fn get_imported_module_names(&self) -> Vec<&str> {
        self.imports.iter().map(|module| module.name()).collect()
    }

    /// 初始化模块
    ///
    /// 先按声明顺序逐个初始化导入的模块，再对本模块中带初始化钩子的单例提供者
    /// 依次解析并等待其初始化完成。全程串行执行，不设超时。
    ///
    /// 解析器中未注册的提供者（例如导入模块未导出的内部提供者）会被跳过。
    pub fn initialize<'a>(
        &'a self,
        resolver: &'a dyn Resolver,
    ) -> BoxFuture<'a, Result<(), LifecycleError>> {
        Box::pin(async move {
            for import in &self.imports {
                import.initialize(resolver).await?;
            }

            let mut initialized = 0_usize;
            for provider in &self.providers {
                let Some(initializer) = provider.initializer() else {
                    continue;
                };
                let scope = provider.scope().unwrap_or_else(|| resolver.default_scope());
                if !scope.is_singleton() {
                    debug!("跳过非单例提供者的初始化: {}", provider.token());
                    continue;
                }
                if !resolver.has_token(provider.token()) {
                    debug!(
                        "提供者未在解析器中注册，跳过初始化: {} (模块: {})",
                        provider.token(),
                        self.name
                    );
                    continue;
                }

                let instance = resolver.resolve_token(provider.token())?;
                debug!("初始化提供者: {} (模块: {})", provider.token(), self.name);
                initializer(instance)
                    .await
                    .map_err(|e| LifecycleError::InitializationFailed {
                        module: self.name.clone(),
                        token: provider.token().to_string(),
                        message: e.to_string(),
                    })?;
                initialized += 1;
            }

            info!("模块初始化完成: {}，初始化了 {} 个提供者", self.name, initialized);
            Ok(())
        })
    }

    fn own_provider(&self, token: &Token) -> Option<&Provider> {
        self.providers
            .iter()
            .rev()
            .find(|provider| provider.token() == token)
    }
}

impl fmt::Debug for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Module")
            .field("name", &self.name)
            .field(
                "providers",
                &self.providers.iter().map(Provider::token).collect::<Vec<_>>(),
            )
            .field("imports", &self.get_imported_module_names())
            .field("exports", &self.exports)
            .finish()
    }
}

/// 模块构建器
#[derive(Debug)]
pub struct ModuleBuilder {
    name: String,
    providers: Vec<Provider>,
    imports: Vec<Arc<Module>>,
    exports: Vec<Export>,
}

impl ModuleBuilder {
    /// 添加提供者
    pub fn provider(mut self, provider: Provider) -> Self {
        self.providers.push(provider);
        self
    }

    /// 批量添加提供者
    pub fn providers(mut self, providers: impl IntoIterator<Item = Provider>) -> Self {
        self.providers.extend(providers);
        self
    }

    /// 导入模块
    pub fn import(mut self, module: Arc<Module>) -> Self {
        self.imports.push(module);
        self
    }

    /// 添加导出项
    pub fn export(mut self, export: impl Into<Export>) -> Self {
        self.exports.push(export.into());
        self
    }

    /// 按令牌导出本模块的提供者
    pub fn export_token(self, token: impl Into<Token>) -> Self {
        self.export(Export::Token(token.into()))
    }

    /// 构建模块
    pub fn build(self) -> Arc<Module> {
        debug!(
            "构建模块: {} (提供者 {} 个, 导入 {} 个, 导出 {} 项)",
            self.name,
            self.providers.len(),
            self.imports.len(),
            self.exports.len()
        );
        Arc::new(Module {
            name: self.name,
            providers: self.providers,
            imports: self.imports,
            exports: self.exports,
        })
    }
}
