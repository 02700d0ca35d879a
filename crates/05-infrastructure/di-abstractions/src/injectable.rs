//! 可注入类型与已解析依赖

use crate::token::Token;
use hexy_common::DependencyError;
use std::any::Any;
use std::sync::Arc;

/// 容器中保存的类型擦除实例
pub type Instance = Arc<dyn Any + Send + Sync>;

/// 将实例向下转换为具体类型
pub fn downcast_instance<T: Any + Send + Sync>(
    token: &Token,
    instance: Instance,
) -> Result<Arc<T>, DependencyError> {
    instance
        .downcast::<T>()
        .map_err(|_| DependencyError::TypeMismatch {
            token: token.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// 已解析的依赖列表
///
/// 顺序与声明的依赖令牌一一对应。
#[derive(Clone, Default)]
pub struct ResolvedDependencies {
    tokens: Vec<Token>,
    instances: Vec<Instance>,
}

impl ResolvedDependencies {
    /// 由令牌和实例构建
    ///
    /// 两个列表长度必须一致，由容器保证。
    pub fn new(tokens: Vec<Token>, instances: Vec<Instance>) -> Self {
        debug_assert_eq!(tokens.len(), instances.len());
        Self { tokens, instances }
    }

    /// 依赖数量
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// 是否没有依赖
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// 第 `index` 个依赖的令牌
    pub fn token(&self, index: usize) -> Result<&Token, DependencyError> {
        self.tokens
            .get(index)
            .ok_or(DependencyError::DependencyIndexOutOfRange {
                index,
                len: self.tokens.len(),
            })
    }

    /// 第 `index` 个依赖的原始实例
    pub fn get(&self, index: usize) -> Result<&Instance, DependencyError> {
        self.instances
            .get(index)
            .ok_or(DependencyError::DependencyIndexOutOfRange {
                index,
                len: self.instances.len(),
            })
    }

    /// 第 `index` 个依赖，转换为共享引用
    pub fn arc<T: Any + Send + Sync>(&self, index: usize) -> Result<Arc<T>, DependencyError> {
        let instance = self.get(index)?.clone();
        downcast_instance(self.token(index)?, instance)
    }

    /// 第 `index` 个依赖，克隆出一份值
    pub fn cloned<T: Any + Send + Sync + Clone>(&self, index: usize) -> Result<T, DependencyError> {
        self.arc::<T>(index).map(|value| T::clone(&value))
    }

    /// 取出全部实例
    pub fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

impl std::fmt::Debug for ResolvedDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedDependencies")
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

/// 可注入类型
///
/// 可以手动实现，也可以用 `hexy-macros` 中的派生宏或分层属性宏生成。
/// `dependencies` 返回的令牌顺序就是 `construct` 收到的依赖顺序。
pub trait Injectable: Send + Sync + Sized + 'static {
    /// 构造参数对应的令牌
    fn dependencies() -> Vec<Token> {
        Vec::new()
    }

    /// 使用已解析的依赖构造实例
    fn construct(deps: &ResolvedDependencies) -> Result<Self, DependencyError>;
}
