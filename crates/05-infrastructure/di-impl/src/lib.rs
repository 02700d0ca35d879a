//! # 依赖注入具体实现
//!
//! 提供具体的依赖注入容器：提供者注册、依赖解析、单例缓存与循环依赖检测

use hexy_common::{DependencyError, Scope};
use hexy_di_abstractions::{
    downcast_instance, ContainerConfig, ContainerStats, Injectable, Instance, Provider,
    ProviderRegistry, ResolveContext, ResolvedDependencies, Resolver, Strategy, Token,
};
use parking_lot::RwLock;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// 依赖注入容器
///
/// 注册与解析都是同步调用。提供者表和单例缓存由读写锁保护，
/// 解析中的令牌集合则随每次顶层解析单独创建，因此容器可以在线程间共享。
/// 调用构造函数或工厂函数时不持有任何锁。
pub struct Container {
    /// 容器配置
    config: ContainerConfig,
    /// 已注册的提供者
    providers: RwLock<HashMap<Token, Arc<Provider>>>,
    /// 单例实例缓存
    instances: RwLock<HashMap<Token, Instance>>,
    resolutions: AtomicUsize,
    resolution_errors: AtomicUsize,
}

impl Container {
    /// 创建新的容器
    pub fn new() -> Self {
        Self::with_config(ContainerConfig::default())
    }

    /// 使用指定配置创建容器
    pub fn with_config(config: ContainerConfig) -> Self {
        Self {
            config,
            providers: RwLock::new(HashMap::new()),
            instances: RwLock::new(HashMap::new()),
            resolutions: AtomicUsize::new(0),
            resolution_errors: AtomicUsize::new(0),
        }
    }

    /// 容器配置
    pub fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// 注册提供者
    ///
    /// 同一令牌重复注册时后注册者生效，旧提供者留下的单例缓存一并清除。
    pub fn register(&self, provider: Provider) -> Result<(), DependencyError> {
        provider.validate()?;

        let token = provider.token().clone();
        debug!(
            "注册提供者: {} (策略: {}, 作用域: {})",
            token,
            provider.strategy().kind(),
            self.effective_scope(&provider)
        );

        let replaced = self
            .providers
            .write()
            .insert(token.clone(), Arc::new(provider));
        if replaced.is_some() {
            warn!("提供者已存在，使用新注册的提供者替换: {}", token);
            self.instances.write().remove(&token);
        }

        Ok(())
    }

    /// 批量注册提供者
    pub fn register_many(
        &self,
        providers: impl IntoIterator<Item = Provider>,
    ) -> Result<(), DependencyError> {
        let mut count = 0_usize;
        for provider in providers {
            self.register(provider)?;
            count += 1;
        }
        info!("批量注册提供者完成，共 {} 个", count);
        Ok(())
    }

    /// 注册以类型自身为令牌的类型提供者
    ///
    /// 未指定作用域时使用容器配置的默认作用域。
    pub fn register_class<T: Injectable>(
        &self,
        scope: Option<Scope>,
    ) -> Result<(), DependencyError> {
        let provider = Provider::class::<T>();
        self.register(match scope {
            Some(scope) => provider.with_scope(scope),
            None => provider,
        })
    }

    /// 检查令牌是否已注册
    pub fn has(&self, token: impl Into<Token>) -> bool {
        self.providers.read().contains_key(&token.into())
    }

    /// 解析令牌对应的实例
    pub fn resolve(&self, token: impl Into<Token>) -> Result<Instance, DependencyError> {
        let token = token.into();
        self.resolutions.fetch_add(1, Ordering::Relaxed);

        let mut context = ResolveContext::new(self.config.max_resolution_depth);
        let result = self.resolve_in(&token, &mut context);
        debug_assert!(context.is_empty(), "解析结束后解析链必须为空");

        if let Err(err) = &result {
            self.resolution_errors.fetch_add(1, Ordering::Relaxed);
            debug!("解析失败: {}, 原因: {}", token, err);
        }
        result
    }

    /// 解析并转换为具体类型
    pub fn resolve_as<T: Any + Send + Sync>(
        &self,
        token: impl Into<Token>,
    ) -> Result<Arc<T>, DependencyError> {
        let token = token.into();
        let instance = self.resolve(&token)?;
        downcast_instance(&token, instance)
    }

    /// 以类型令牌解析
    pub fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>, DependencyError> {
        self.resolve_as::<T>(Token::of::<T>())
    }

    /// 尝试解析
    ///
    /// 令牌本身未注册时返回 `Ok(None)`；依赖链上的其他错误照常返回。
    pub fn try_resolve(
        &self,
        token: impl Into<Token>,
    ) -> Result<Option<Instance>, DependencyError> {
        let token = token.into();
        if !self.has(&token) {
            return Ok(None);
        }
        self.resolve(token).map(Some)
    }

    /// 清除所有单例实例，保留提供者注册
    pub fn clear_instances(&self) {
        let mut instances = self.instances.write();
        info!("清除单例实例缓存，共 {} 个", instances.len());
        instances.clear();
    }

    /// 清除所有提供者和单例实例
    pub fn reset(&self) {
        self.providers.write().clear();
        self.instances.write().clear();
        info!("容器已重置");
    }

    /// 所有已注册的令牌
    pub fn registered_tokens(&self) -> Vec<Token> {
        self.providers.read().keys().cloned().collect()
    }

    /// 令牌是否已有缓存的单例实例
    pub fn is_cached(&self, token: impl Into<Token>) -> bool {
        self.instances.read().contains_key(&token.into())
    }

    /// 容器统计信息
    pub fn stats(&self) -> ContainerStats {
        ContainerStats {
            registered_providers: self.providers.read().len(),
            cached_singletons: self.instances.read().len(),
            resolutions: self.resolutions.load(Ordering::Relaxed),
            resolution_errors: self.resolution_errors.load(Ordering::Relaxed),
        }
    }

    fn effective_scope(&self, provider: &Provider) -> Scope {
        provider.scope().unwrap_or(self.config.default_scope)
    }

    fn resolve_in(
        &self,
        token: &Token,
        context: &mut ResolveContext,
    ) -> Result<Instance, DependencyError> {
        context.check_cycle(token)?;

        let cached = self.instances.read().get(token).cloned();
        if let Some(instance) = cached {
            trace!("命中单例缓存: {}", token);
            return Ok(instance);
        }

        let provider = self
            .providers
            .read()
            .get(token)
            .cloned()
            .ok_or_else(|| DependencyError::not_found(token))?;
        let scope = self.effective_scope(&provider);

        trace!("开始解析: {} (深度 {})", token, context.depth());
        let instance = {
            let mut guard = context.enter(token)?;
            self.instantiate(&provider, &mut guard)?
        };

        if scope.is_singleton() {
            // 构造期间令牌可能被重新注册，只有提供者未变时才写入缓存
            let providers = self.providers.read();
            let current = providers
                .get(token)
                .is_some_and(|registered| Arc::ptr_eq(registered, &provider));
            if !current {
                debug!("提供者在构造期间被替换，不缓存实例: {}", token);
                return Ok(instance);
            }
            let mut instances = self.instances.write();
            let cached = instances.entry(token.clone()).or_insert(instance);
            return Ok(cached.clone());
        }

        Ok(instance)
    }

    fn instantiate(
        &self,
        provider: &Provider,
        context: &mut ResolveContext,
    ) -> Result<Instance, DependencyError> {
        match provider.strategy() {
            Strategy::Value(value) => Ok(value.clone()),
            Strategy::Factory(binding) => {
                let deps = self.resolve_dependencies(binding.dependencies().to_vec(), context)?;
                binding.invoke(&deps)
            }
            Strategy::Class(binding) => {
                let deps = self.resolve_dependencies(binding.parameter_tokens(), context)?;
                binding.construct(&deps)
            }
        }
    }

    /// 严格按声明顺序逐个解析依赖
    fn resolve_dependencies(
        &self,
        tokens: Vec<Token>,
        context: &mut ResolveContext,
    ) -> Result<ResolvedDependencies, DependencyError> {
        let mut instances = Vec::with_capacity(tokens.len());
        for token in &tokens {
            instances.push(self.resolve_in(token, context)?);
        }
        Ok(ResolvedDependencies::new(tokens, instances))
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("config", &self.config)
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

impl Resolver for Container {
    fn resolve_token(&self, token: &Token) -> Result<Instance, DependencyError> {
        self.resolve(token)
    }

    fn has_token(&self, token: &Token) -> bool {
        self.has(token)
    }

    fn default_scope(&self) -> Scope {
        self.config.default_scope
    }
}

impl ProviderRegistry for Container {
    fn register(&self, provider: Provider) -> Result<(), DependencyError> {
        Container::register(self, provider)
    }

    fn has(&self, token: &Token) -> bool {
        Container::has(self, token)
    }

    fn registered_tokens(&self) -> Vec<Token> {
        Container::registered_tokens(self)
    }
}
