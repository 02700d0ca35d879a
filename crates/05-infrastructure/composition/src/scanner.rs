//! 分层扫描器
//!
//! 根据类型上的分层标记对一组类型分类，并为每个命中的类型生成以类型自身为令牌的提供者

use hexy_common::{layers_of, tag_layer, DependencyError, LayerKind, Scope};
use hexy_di_abstractions::{
    ClassRef, ClassifiedProvider, ComponentScanner, Injectable, Provider, ProviderRegistry,
    ScanOptions,
};
use tracing::{debug, info, trace};

/// 分层扫描器
///
/// 按 [`LayerKind::PRECEDENCE`] 的顺序检查标记，第一个命中的标记决定分类；
/// 没有任何标记的类型直接跳过。
#[derive(Debug, Default, Clone, Copy)]
pub struct LayerScanner;

impl LayerScanner {
    /// 创建扫描器
    pub fn new() -> Self {
        Self
    }

    /// 确定类型的分层
    pub fn classify(&self, class: &ClassRef) -> Option<LayerKind> {
        layers_of(class.type_info().id).primary()
    }
}

impl ComponentScanner for LayerScanner {
    fn scan(
        &self,
        registry: &dyn ProviderRegistry,
        classes: &[ClassRef],
        options: &ScanOptions,
    ) -> Result<Vec<ClassifiedProvider>, DependencyError> {
        let mut classified = Vec::new();

        for class in classes {
            let Some(layer) = self.classify(class) else {
                trace!("类型没有分层标记，跳过: {}", class.type_info());
                continue;
            };

            debug!("扫描到组件: {} ({})", class.type_info().short_name(), layer);
            let provider = class.provider();
            if options.auto_register {
                registry.register(provider.clone())?;
            }
            classified.push(ClassifiedProvider { layer, provider });
        }

        info!(
            "分层扫描完成: 共 {} 个类型，分类 {} 个",
            classes.len(),
            classified.len()
        );
        Ok(classified)
    }

    fn name(&self) -> &str {
        "layer-scanner"
    }
}

/// 显式登记分层并注册类型
///
/// 不使用属性宏时的注册方式：先写入分层标记，再以指定作用域注册提供者。
pub fn register_in_layer<T: Injectable>(
    registry: &dyn ProviderRegistry,
    kind: LayerKind,
    scope: Scope,
) -> Result<(), DependencyError> {
    tag_layer::<T>(kind);
    debug!("登记分层组件: {} ({})", std::any::type_name::<T>(), kind);
    registry.register(Provider::class::<T>().with_scope(scope))
}
