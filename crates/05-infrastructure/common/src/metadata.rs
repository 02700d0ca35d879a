//! 元数据定义
//!
//! 提供类型信息，以及在类型之外记录分层标记的全局元数据表

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use tracing::trace;

/// 类型信息
///
/// 相等性只由 `TypeId` 决定，名称仅用于展示。
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    /// 类型ID
    pub id: TypeId,
    /// 完整类型名称（包含模块路径）
    pub name: &'static str,
}

impl TypeInfo {
    /// 从类型获取类型信息
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// 获取简短的类型名称（不包含模块路径）
    pub fn short_name(&self) -> &'static str {
        let base = self.name.split('<').next().unwrap_or(self.name);
        base.rsplit("::").next().unwrap_or(base)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// 分层标记
///
/// 变体的声明顺序就是扫描器判定时的优先级顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerKind {
    DomainService,
    DomainRepository,
    DomainAggregate,
    DomainEntity,
    DomainValueObject,
    DomainEvent,
    ApplicationService,
    ApplicationUseCase,
    InfrastructureService,
    InfrastructureRepository,
}

impl LayerKind {
    /// 按优先级排列的全部标记
    pub const PRECEDENCE: [LayerKind; 10] = [
        LayerKind::DomainService,
        LayerKind::DomainRepository,
        LayerKind::DomainAggregate,
        LayerKind::DomainEntity,
        LayerKind::DomainValueObject,
        LayerKind::DomainEvent,
        LayerKind::ApplicationService,
        LayerKind::ApplicationUseCase,
        LayerKind::InfrastructureService,
        LayerKind::InfrastructureRepository,
    ];

    /// 标记名称
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DomainService => "domain-service",
            Self::DomainRepository => "domain-repository",
            Self::DomainAggregate => "domain-aggregate",
            Self::DomainEntity => "domain-entity",
            Self::DomainValueObject => "domain-value-object",
            Self::DomainEvent => "domain-event",
            Self::ApplicationService => "application-service",
            Self::ApplicationUseCase => "application-use-case",
            Self::InfrastructureService => "infrastructure-service",
            Self::InfrastructureRepository => "infrastructure-repository",
        }
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 分层标记集合
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LayerSet(u16);

impl LayerSet {
    /// 空集合
    pub const fn empty() -> Self {
        Self(0)
    }

    /// 添加标记
    pub fn insert(&mut self, kind: LayerKind) {
        self.0 |= kind.bit();
    }

    /// 是否包含标记
    pub fn contains(self, kind: LayerKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// 是否为空
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// 按优先级返回第一个命中的标记
    pub fn primary(self) -> Option<LayerKind> {
        LayerKind::PRECEDENCE
            .into_iter()
            .find(|kind| self.contains(*kind))
    }

    /// 按优先级遍历所有标记
    pub fn iter(self) -> impl Iterator<Item = LayerKind> {
        LayerKind::PRECEDENCE
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }
}

/// 单个类型的元数据记录
#[derive(Debug, Clone, Copy)]
pub struct ClassMetadata {
    /// 类型信息
    pub type_info: TypeInfo,
    /// 是否可注入
    pub injectable: bool,
    /// 分层标记
    pub layers: LayerSet,
}

/// 全局类型元数据表
static CLASS_METADATA: Lazy<DashMap<TypeId, ClassMetadata>> = Lazy::new(DashMap::new);

fn update_metadata(type_info: TypeInfo, apply: impl FnOnce(&mut ClassMetadata)) {
    let mut entry = CLASS_METADATA
        .entry(type_info.id)
        .or_insert_with(|| ClassMetadata {
            type_info,
            injectable: false,
            layers: LayerSet::empty(),
        });
    apply(entry.value_mut());
}

/// 标记类型为可注入
pub fn mark_injectable_type(type_info: TypeInfo) {
    trace!("标记可注入类型: {}", type_info);
    update_metadata(type_info, |meta| meta.injectable = true);
}

/// 为类型添加分层标记，同时标记为可注入
pub fn tag_layer_type(type_info: TypeInfo, kind: LayerKind) {
    trace!("添加分层标记: {} -> {}", type_info, kind);
    update_metadata(type_info, |meta| {
        meta.injectable = true;
        meta.layers.insert(kind);
    });
}

/// 标记类型为可注入
pub fn mark_injectable<T: 'static>() {
    mark_injectable_type(TypeInfo::of::<T>());
}

/// 为类型添加分层标记
pub fn tag_layer<T: 'static>(kind: LayerKind) {
    tag_layer_type(TypeInfo::of::<T>(), kind);
}

/// 读取类型的元数据
pub fn class_metadata(type_id: TypeId) -> Option<ClassMetadata> {
    CLASS_METADATA.get(&type_id).map(|entry| *entry.value())
}

/// 读取类型的分层标记
pub fn layers_of(type_id: TypeId) -> LayerSet {
    class_metadata(type_id).map_or_else(LayerSet::empty, |meta| meta.layers)
}

/// 类型是否带有指定标记
pub fn has_layer<T: 'static>(kind: LayerKind) -> bool {
    layers_of(TypeId::of::<T>()).contains(kind)
}

/// 类型是否可注入
pub fn is_injectable<T: 'static>() -> bool {
    class_metadata(TypeId::of::<T>()).is_some_and(|meta| meta.injectable)
}

pub fn is_domain_service<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainService)
}

pub fn is_domain_repository<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainRepository)
}

pub fn is_domain_aggregate<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainAggregate)
}

pub fn is_domain_entity<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainEntity)
}

pub fn is_domain_value_object<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainValueObject)
}

pub fn is_domain_event<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::DomainEvent)
}

pub fn is_application_service<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::ApplicationService)
}

pub fn is_application_use_case<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::ApplicationUseCase)
}

pub fn is_infrastructure_service<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::InfrastructureService)
}

pub fn is_infrastructure_repository<T: 'static>() -> bool {
    has_layer::<T>(LayerKind::InfrastructureRepository)
}
