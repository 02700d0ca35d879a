//! 组件扫描器抽象接口
//!
//! 扫描器对一组类型进行分类，并为其生成提供者

use crate::injectable::Injectable;
use crate::provider::Provider;
use crate::registry::ProviderRegistry;
use hexy_common::{DependencyError, LayerKind, TypeInfo};
use std::fmt;

/// 扫描目标：类型擦除后的类型引用
#[derive(Clone, Copy)]
pub struct ClassRef {
    type_info: TypeInfo,
    provider: fn() -> Provider,
}

impl ClassRef {
    /// 引用一个可注入类型
    pub fn of<T: Injectable>() -> Self {
        Self {
            type_info: TypeInfo::of::<T>(),
            provider: Provider::class::<T>,
        }
    }

    /// 类型信息
    pub fn type_info(&self) -> TypeInfo {
        self.type_info
    }

    /// 以类型自身为令牌、绑定到类型自身的提供者
    pub fn provider(&self) -> Provider {
        (self.provider)()
    }
}

impl fmt::Debug for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClassRef").field(&self.type_info.name).finish()
    }
}

/// 扫描选项
#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// 是否立即注册生成的提供者
    pub auto_register: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            auto_register: true,
        }
    }
}

/// 分类后的提供者
#[derive(Debug, Clone)]
pub struct ClassifiedProvider {
    /// 命中的分层标记
    pub layer: LayerKind,
    /// 生成的提供者
    pub provider: Provider,
}

/// 组件扫描器 trait
pub trait ComponentScanner: Send + Sync {
    /// 扫描并分类，按选项决定是否注册
    fn scan(
        &self,
        registry: &dyn ProviderRegistry,
        classes: &[ClassRef],
        options: &ScanOptions,
    ) -> Result<Vec<ClassifiedProvider>, DependencyError>;

    /// 获取扫描器名称
    fn name(&self) -> &str;
}
