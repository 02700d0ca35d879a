//! 分层标记宏集成测试

use hexy_common::{
    has_layer, is_application_service, is_application_use_case, is_domain_aggregate,
    is_domain_entity, is_domain_event, is_domain_repository, is_domain_service,
    is_domain_value_object, is_infrastructure_repository, is_infrastructure_service,
    is_injectable, LayerKind,
};
use hexy_composition::{ApplicationBuilder, LayerScanner, Module};
use hexy_di_abstractions::{
    ClassRef, ComponentScanner, Injectable, Provider, ScanOptions, Token,
};
use hexy_di_impl::Container;
use hexy_macros::{
    application_service, application_use_case, domain_aggregate, domain_entity, domain_event,
    domain_repository, domain_service, domain_value_object, infrastructure_repository,
    infrastructure_service, injectable, Injectable,
};
use std::sync::Arc;

fn limit_token() -> Token {
    Token::name("task.limit")
}

#[domain_repository]
#[derive(Debug)]
pub struct InMemoryTaskRepository;

#[domain_service]
#[derive(Debug)]
pub struct TaskService {
    repository: Arc<InMemoryTaskRepository>,
    #[inject("task.owner")]
    owner: String,
    #[inject(token = limit_token())]
    limit: usize,
}

#[application_service]
#[application_use_case]
#[derive(Debug)]
pub struct CreateTask(Arc<TaskService>);

#[domain_aggregate]
pub struct TaskAggregate;

#[domain_entity]
pub struct TaskEntity;

#[domain_value_object]
pub struct TaskTitle;

#[domain_event]
pub struct TaskCreated;

#[infrastructure_service]
pub struct Clock;

#[infrastructure_repository]
pub struct SqlTaskRepository;

#[injectable]
#[derive(Debug)]
pub struct Untagged;

#[derive(Injectable)]
pub struct DerivedOnly {
    #[inject("task.owner")]
    owner: String,
}

#[infrastructure_service]
#[derive(Injectable)]
pub struct MixedWithDerive {
    #[inject("task.owner")]
    owner: String,
}

fn task_module() -> Arc<Module> {
    Module::builder("Tasks")
        .provider(Provider::value("task.owner", String::from("hexy")))
        .provider(Provider::value(limit_token(), 50_usize))
        .build()
}

#[test]
fn test_layer_predicates() {
    assert!(is_domain_repository::<InMemoryTaskRepository>());
    assert!(is_domain_service::<TaskService>());
    assert!(is_application_service::<CreateTask>());
    assert!(is_application_use_case::<CreateTask>());
    assert!(is_domain_aggregate::<TaskAggregate>());
    assert!(is_domain_entity::<TaskEntity>());
    assert!(is_domain_value_object::<TaskTitle>());
    assert!(is_domain_event::<TaskCreated>());
    assert!(is_infrastructure_service::<Clock>());
    assert!(is_infrastructure_repository::<SqlTaskRepository>());

    assert!(!is_domain_service::<InMemoryTaskRepository>());
    assert!(is_injectable::<TaskService>());
}

#[test]
fn test_injectable_marks_without_layer() {
    assert!(is_injectable::<Untagged>());
    assert!(LayerKind::PRECEDENCE
        .iter()
        .all(|kind| !has_layer::<Untagged>(*kind)));

    assert!(!is_injectable::<DerivedOnly>());
    assert_eq!(DerivedOnly::dependencies(), vec![Token::from("task.owner")]);
}

#[test]
fn test_generated_dependencies() {
    assert_eq!(
        TaskService::dependencies(),
        vec![
            Token::of::<InMemoryTaskRepository>(),
            Token::from("task.owner"),
            limit_token(),
        ]
    );
    assert_eq!(CreateTask::dependencies(), vec![Token::of::<TaskService>()]);
    assert!(Clock::dependencies().is_empty());
}

#[test]
fn test_scanner_registers_tagged_classes() -> anyhow::Result<()> {
    let container = Container::new();
    container.register_many(task_module().get_all_providers())?;

    let classified = LayerScanner::new().scan(
        &container,
        &[
            ClassRef::of::<CreateTask>(),
            ClassRef::of::<TaskService>(),
            ClassRef::of::<InMemoryTaskRepository>(),
            ClassRef::of::<DerivedOnly>(),
        ],
        &ScanOptions::default(),
    )?;

    let layers: Vec<LayerKind> = classified.iter().map(|c| c.layer).collect();
    assert_eq!(
        layers,
        vec![
            LayerKind::ApplicationService,
            LayerKind::DomainService,
            LayerKind::DomainRepository,
        ]
    );
    assert!(!container.has(Token::of::<DerivedOnly>()));

    let create = container.get::<CreateTask>()?;
    assert_eq!(create.0.owner, "hexy");
    assert_eq!(create.0.limit, 50);
    assert!(Arc::ptr_eq(
        &create.0.repository,
        &container.get::<InMemoryTaskRepository>()?
    ));
    Ok(())
}

#[test]
fn test_application_builder_scan() -> anyhow::Result<()> {
    let app = ApplicationBuilder::new(task_module())
        .scan([
            ClassRef::of::<MixedWithDerive>(),
            ClassRef::of::<Untagged>(),
        ])
        .build()?;

    assert_eq!(app.get::<MixedWithDerive>()?.owner, "hexy");
    assert!(app.get::<Untagged>().unwrap_err().is_not_found());
    Ok(())
}

pub trait TaskRepository: Send + Sync {
    fn backend(&self) -> &'static str;
}

impl TaskRepository for InMemoryTaskRepository {
    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[application_service]
pub struct ArchiveTasks {
    #[inject("TaskRepository")]
    repository: Arc<dyn TaskRepository>,
}

#[test]
fn test_trait_object_field_resolves_shared_value() -> anyhow::Result<()> {
    assert_eq!(
        ArchiveTasks::dependencies(),
        vec![Token::from("TaskRepository")]
    );

    let repository: Arc<dyn TaskRepository> = Arc::new(InMemoryTaskRepository);
    let container = Container::new();
    container.register(Provider::value("TaskRepository", Arc::clone(&repository)))?;
    container.register(Provider::class::<ArchiveTasks>())?;

    let archive = container.get::<ArchiveTasks>()?;
    assert_eq!(archive.repository.backend(), "memory");
    assert!(Arc::ptr_eq(&archive.repository, &repository));
    Ok(())
}
