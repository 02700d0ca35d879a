//! 提供者定义
//!
//! 提供者把一个令牌绑定到唯一的实例化策略：类型构造、固定值或工厂函数

use crate::injectable::{downcast_instance, Injectable, Instance, ResolvedDependencies};
use crate::token::Token;
use futures::future::BoxFuture;
use hexy_common::{DependencyError, Initializable, Scope, TypeInfo};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// 构造函数类型
pub type ConstructFn =
    Arc<dyn Fn(&ResolvedDependencies) -> Result<Instance, DependencyError> + Send + Sync>;

/// 初始化钩子返回的 future
pub type InitializeFuture =
    BoxFuture<'static, Result<(), Box<dyn std::error::Error + Send + Sync>>>;

/// 初始化钩子类型
pub type InitializeFn = Arc<dyn Fn(Instance) -> InitializeFuture + Send + Sync>;

/// 类型构造绑定
#[derive(Clone)]
pub struct ClassBinding {
    type_info: TypeInfo,
    parameters: Vec<Token>,
    overrides: BTreeMap<usize, Token>,
    construct: ConstructFn,
}

impl ClassBinding {
    /// 为可注入类型创建绑定，参数令牌取自 [`Injectable::dependencies`]
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            parameters: T::dependencies(),
            overrides: BTreeMap::new(),
            construct: Arc::new(|deps: &ResolvedDependencies| {
                Ok(Arc::new(T::construct(deps)?) as Instance)
            }),
        }
    }

    /// 被构造的类型
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 参数数量
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    /// 实际使用的参数令牌：逐个参数优先取覆盖令牌
    pub fn parameter_tokens(&self) -> Vec<Token> {
        self.parameters
            .iter()
            .enumerate()
            .map(|(index, token)| self.overrides.get(&index).unwrap_or(token).clone())
            .collect()
    }

    /// 调用构造函数
    pub fn construct(&self, deps: &ResolvedDependencies) -> Result<Instance, DependencyError> {
        (self.construct)(deps)
    }
}

/// 工厂绑定
#[derive(Clone)]
pub struct FactoryBinding {
    dependencies: Vec<Token>,
    invoke: ConstructFn,
}

impl FactoryBinding {
    /// 依赖令牌，按声明顺序
    pub fn dependencies(&self) -> &[Token] {
        &self.dependencies
    }

    /// 调用工厂函数
    pub fn invoke(&self, deps: &ResolvedDependencies) -> Result<Instance, DependencyError> {
        (self.invoke)(deps)
    }
}

fn factory_fn<T, F>(factory: F) -> ConstructFn
where
    T: Any + Send + Sync,
    F: Fn(&ResolvedDependencies) -> Result<T, DependencyError> + Send + Sync + 'static,
{
    Arc::new(move |deps: &ResolvedDependencies| {
        Ok(Arc::new(factory(deps)?) as Instance)
    })
}

/// 实例化策略
#[derive(Clone)]
pub enum Strategy {
    /// 构造指定类型
    Class(ClassBinding),
    /// 返回固定值
    Value(Instance),
    /// 用已解析的依赖调用工厂函数
    Factory(FactoryBinding),
}

impl Strategy {
    /// 策略名称
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Class(_) => "class",
            Self::Value(_) => "value",
            Self::Factory(_) => "factory",
        }
    }
}

/// 提供者
///
/// 构造完成后不可变；克隆只共享底层绑定。
#[derive(Clone)]
pub struct Provider {
    token: Token,
    strategy: Strategy,
    scope: Option<Scope>,
    initializer: Option<InitializeFn>,
    misconfiguration: Option<String>,
}

impl Provider {
    fn with_strategy(token: Token, strategy: Strategy) -> Self {
        Self {
            token,
            strategy,
            scope: None,
            initializer: None,
            misconfiguration: None,
        }
    }

    /// 以类型自身为令牌的类型提供者
    pub fn class<T: Injectable>() -> Self {
        Self::class_as::<T>(Token::of::<T>())
    }

    /// 绑定到指定令牌的类型提供者
    pub fn class_as<T: Injectable>(token: impl Into<Token>) -> Self {
        Self::with_strategy(token.into(), Strategy::Class(ClassBinding::of::<T>()))
    }

    /// 固定值提供者
    pub fn value<T: Any + Send + Sync>(token: impl Into<Token>, value: T) -> Self {
        Self::instance(token, Arc::new(value))
    }

    /// 使用已有共享实例的固定值提供者
    pub fn instance(token: impl Into<Token>, instance: Instance) -> Self {
        Self::with_strategy(token.into(), Strategy::Value(instance))
    }

    /// 工厂提供者，依赖通过 [`Provider::with_dependencies`] 声明
    pub fn factory<T, F>(token: impl Into<Token>, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ResolvedDependencies) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        Self::with_strategy(
            token.into(),
            Strategy::Factory(FactoryBinding {
                dependencies: Vec::new(),
                invoke: factory_fn(factory),
            }),
        )
    }

    /// 设置作用域
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// 设置为单例
    pub fn singleton(self) -> Self {
        self.with_scope(Scope::Singleton)
    }

    /// 设置为瞬时
    pub fn transient(self) -> Self {
        self.with_scope(Scope::Transient)
    }

    /// 显式声明依赖令牌列表
    ///
    /// 对工厂提供者是调用参数；对类型提供者会替换整个参数令牌列表。
    pub fn with_dependencies<I>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Token>,
    {
        let dependencies: Vec<Token> = dependencies.into_iter().map(Into::into).collect();
        match &mut self.strategy {
            Strategy::Class(binding) => binding.parameters = dependencies,
            Strategy::Factory(binding) => binding.dependencies = dependencies,
            Strategy::Value(_) => {
                self.misconfiguration = Some("固定值提供者不接受依赖声明".to_string());
            }
        }
        self
    }

    /// 覆盖类型提供者第 `index` 个构造参数的令牌
    pub fn inject_at(mut self, index: usize, token: impl Into<Token>) -> Self {
        match &mut self.strategy {
            Strategy::Class(binding) => {
                binding.overrides.insert(index, token.into());
            }
            other => {
                self.misconfiguration = Some(format!(
                    "只有类型提供者支持参数令牌覆盖, 当前策略: {}",
                    other.kind()
                ));
            }
        }
        self
    }

    /// 附加异步初始化钩子
    ///
    /// 钩子在模块初始化时对单例实例调用；实例必须是 `T` 类型。
    pub fn with_initializer<T: Initializable + Any>(mut self) -> Self {
        let token = self.token.clone();
        self.initializer = Some(Arc::new(move |instance: Instance| {
            let typed = downcast_instance::<T>(&token, instance);
            Box::pin(async move {
                let typed = typed?;
                typed.initialize().await
            }) as InitializeFuture
        }));
        self
    }

    /// 提供者令牌
    pub fn token(&self) -> &Token {
        &self.token
    }

    /// 实例化策略
    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// 显式声明的作用域，未声明时由容器决定默认值
    pub fn scope(&self) -> Option<Scope> {
        self.scope
    }

    /// 初始化钩子
    pub fn initializer(&self) -> Option<&InitializeFn> {
        self.initializer.as_ref()
    }

    /// 解析时需要先解析的令牌，按顺序
    pub fn dependency_tokens(&self) -> Vec<Token> {
        match &self.strategy {
            Strategy::Class(binding) => binding.parameter_tokens(),
            Strategy::Factory(binding) => binding.dependencies.clone(),
            Strategy::Value(_) => Vec::new(),
        }
    }

    /// 校验提供者配置
    pub fn validate(&self) -> Result<(), DependencyError> {
        if let Some(message) = &self.misconfiguration {
            return Err(DependencyError::invalid_provider(&self.token, message.clone()));
        }

        if let Strategy::Class(binding) = &self.strategy {
            if let Some(index) = binding
                .overrides
                .keys()
                .find(|index| **index >= binding.parameter_count())
            {
                return Err(DependencyError::invalid_provider(
                    &self.token,
                    format!(
                        "参数令牌覆盖越界: 第 {} 个参数, {} 只有 {} 个参数",
                        index,
                        binding.type_info.short_name(),
                        binding.parameter_count()
                    ),
                ));
            }
        }

        Ok(())
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider")
            .field("token", &self.token)
            .field("strategy", &self.strategy.kind())
            .field("scope", &self.scope)
            .field("dependencies", &self.dependency_tokens())
            .field("initializer", &self.initializer.is_some())
            .finish()
    }
}

/// 声明式提供者定义
///
/// 与 [`Provider`] 的构造函数不同，这里的各个策略字段可以同时设置，
/// 转换为 [`Provider`] 时必须恰好设置了一个策略，否则返回
/// [`DependencyError::InvalidProvider`]。
#[derive(Default)]
pub struct ProviderDefinition {
    provide: Option<Token>,
    use_class: Option<ClassBinding>,
    use_value: Option<Instance>,
    use_factory: Option<ConstructFn>,
    scope: Option<Scope>,
    inject: Option<Vec<Token>>,
}

impl ProviderDefinition {
    /// 创建定义
    pub fn new(provide: impl Into<Token>) -> Self {
        Self {
            provide: Some(provide.into()),
            ..Self::default()
        }
    }

    /// 绑定到类型
    pub fn use_class<T: Injectable>(mut self) -> Self {
        self.use_class = Some(ClassBinding::of::<T>());
        self
    }

    /// 绑定到固定值
    pub fn use_value<T: Any + Send + Sync>(mut self, value: T) -> Self {
        self.use_value = Some(Arc::new(value));
        self
    }

    /// 绑定到工厂函数
    pub fn use_factory<T, F>(mut self, factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&ResolvedDependencies) -> Result<T, DependencyError> + Send + Sync + 'static,
    {
        self.use_factory = Some(factory_fn(factory));
        self
    }

    /// 设置作用域
    pub fn scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// 显式依赖令牌
    pub fn inject<I>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Token>,
    {
        self.inject = Some(dependencies.into_iter().map(Into::into).collect());
        self
    }

    /// 转换为提供者
    pub fn build(self) -> Result<Provider, DependencyError> {
        let token = self
            .provide
            .ok_or_else(|| DependencyError::invalid_provider("<未命名>", "缺少 provide 令牌"))?;

        let mut strategies = Vec::with_capacity(1);
        if let Some(binding) = self.use_class {
            strategies.push(Strategy::Class(binding));
        }
        if let Some(value) = self.use_value {
            strategies.push(Strategy::Value(value));
        }
        if let Some(invoke) = self.use_factory {
            strategies.push(Strategy::Factory(FactoryBinding {
                dependencies: Vec::new(),
                invoke,
            }));
        }

        if strategies.len() != 1 {
            let kinds: Vec<&str> = strategies.iter().map(Strategy::kind).collect();
            return Err(DependencyError::invalid_provider(
                &token,
                format!("必须恰好指定一种实例化策略, 实际: [{}]", kinds.join(", ")),
            ));
        }

        let mut provider = Provider::with_strategy(token, strategies.remove(0));
        provider.scope = self.scope;
        if let Some(dependencies) = self.inject {
            provider = provider.with_dependencies(dependencies);
        }
        provider.validate()?;
        Ok(provider)
    }
}

impl TryFrom<ProviderDefinition> for Provider {
    type Error = DependencyError;

    fn try_from(definition: ProviderDefinition) -> Result<Self, Self::Error> {
        definition.build()
    }
}
