//! 组件解析器抽象接口
//!
//! 提供依赖解析和循环依赖检测的能力

use crate::injectable::{downcast_instance, Instance};
use crate::token::Token;
use hexy_common::{DependencyError, Scope};
use std::any::Any;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// 组件解析器 trait
///
/// 负责根据令牌解析实例
pub trait Resolver: Send + Sync {
    /// 解析令牌对应的实例
    fn resolve_token(&self, token: &Token) -> Result<Instance, DependencyError>;

    /// 检查令牌是否已注册
    fn has_token(&self, token: &Token) -> bool;

    /// 未显式声明作用域的提供者使用的默认作用域
    fn default_scope(&self) -> Scope {
        Scope::Singleton
    }
}

/// 解析器的类型化扩展
pub trait ResolverExt: Resolver {
    /// 解析并转换为具体类型
    fn resolve_as<T: Any + Send + Sync>(
        &self,
        token: impl Into<Token>,
    ) -> Result<Arc<T>, DependencyError> {
        let token = token.into();
        let instance = self.resolve_token(&token)?;
        downcast_instance(&token, instance)
    }

    /// 以类型令牌解析
    fn get<T: Any + Send + Sync>(&self) -> Result<Arc<T>, DependencyError> {
        self.resolve_as::<T>(Token::of::<T>())
    }
}

impl<R: Resolver + ?Sized> ResolverExt for R {}

/// 解析上下文
///
/// 记录当前调用栈上正在解析的令牌，用于检测循环依赖。
/// 每次顶层解析使用一个新的上下文，因此并发的解析链互不干扰。
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// 当前解析链
    resolution_chain: Vec<Token>,
    /// 最大递归深度
    max_depth: usize,
}

impl ResolveContext {
    /// 创建新的解析上下文
    pub fn new(max_depth: usize) -> Self {
        Self {
            resolution_chain: Vec::new(),
            max_depth,
        }
    }

    /// 令牌是否正在解析中
    pub fn contains(&self, token: &Token) -> bool {
        self.resolution_chain.contains(token)
    }

    /// 当前解析深度
    pub fn depth(&self) -> usize {
        self.resolution_chain.len()
    }

    /// 是否没有正在解析的令牌
    pub fn is_empty(&self) -> bool {
        self.resolution_chain.is_empty()
    }

    /// 当前解析链
    pub fn chain(&self) -> &[Token] {
        &self.resolution_chain
    }

    /// 以 `A -> B -> A` 的形式描述闭合到 `token` 的解析链
    pub fn describe_cycle(&self, token: &Token) -> String {
        self.resolution_chain
            .iter()
            .chain(std::iter::once(token))
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    /// 检查循环依赖
    pub fn check_cycle(&self, token: &Token) -> Result<(), DependencyError> {
        if self.contains(token) {
            return Err(DependencyError::CircularDependency {
                token: token.to_string(),
                chain: self.describe_cycle(token),
            });
        }
        Ok(())
    }

    /// 将令牌标记为解析中
    ///
    /// 返回的守卫在离开作用域时移除标记，无论解析成功还是失败。
    pub fn enter(&mut self, token: &Token) -> Result<ResolutionGuard<'_>, DependencyError> {
        self.check_cycle(token)?;
        if self.resolution_chain.len() >= self.max_depth {
            return Err(DependencyError::ResolutionDepthExceeded {
                token: token.to_string(),
                max_depth: self.max_depth,
            });
        }
        self.resolution_chain.push(token.clone());
        Ok(ResolutionGuard { context: self })
    }
}

/// 解析中标记的守卫
#[derive(Debug)]
pub struct ResolutionGuard<'a> {
    context: &'a mut ResolveContext,
}

impl Deref for ResolutionGuard<'_> {
    type Target = ResolveContext;

    fn deref(&self) -> &Self::Target {
        self.context
    }
}

impl DerefMut for ResolutionGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.context
    }
}

impl Drop for ResolutionGuard<'_> {
    fn drop(&mut self) {
        self.context.resolution_chain.pop();
    }
}
