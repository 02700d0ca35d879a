//! 提供者注册表抽象接口

use crate::provider::Provider;
use crate::token::Token;
use hexy_common::DependencyError;

/// 提供者注册表 trait
///
/// 每个令牌最多对应一个提供者，重复注册时后注册者生效。
pub trait ProviderRegistry: Send + Sync {
    /// 注册提供者
    fn register(&self, provider: Provider) -> Result<(), DependencyError>;

    /// 批量注册提供者，遇到第一个无效提供者时停止
    fn register_many(&self, providers: Vec<Provider>) -> Result<(), DependencyError> {
        for provider in providers {
            self.register(provider)?;
        }
        Ok(())
    }

    /// 检查令牌是否已注册
    fn has(&self, token: &Token) -> bool;

    /// 所有已注册的令牌
    fn registered_tokens(&self) -> Vec<Token>;
}
