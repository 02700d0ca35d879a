//! 容器与模块组合的集中集成测试

use async_trait::async_trait;
use hexy_common::{DependencyError, Initializable, LifecycleError, Scope};
use hexy_composition::{ApplicationBuilder, Module};
use hexy_di_abstractions::{Injectable, Provider, ProviderDefinition, ResolvedDependencies, Token};
use hexy_di_impl::Container;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 任务仓储接口的令牌
fn task_repository_token() -> Token {
    Token::name("TaskRepository")
}

#[derive(Debug, Default)]
struct InMemoryTaskRepository {
    ready: AtomicBool,
}

impl Injectable for InMemoryTaskRepository {
    fn construct(_deps: &ResolvedDependencies) -> Result<Self, DependencyError> {
        Ok(Self::default())
    }
}

#[async_trait]
impl Initializable for InMemoryTaskRepository {
    async fn initialize(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Debug)]
struct TaskService {
    repository: Arc<InMemoryTaskRepository>,
    page_size: usize,
}

impl Injectable for TaskService {
    fn dependencies() -> Vec<Token> {
        vec![task_repository_token(), Token::from("task.page_size")]
    }

    fn construct(deps: &ResolvedDependencies) -> Result<Self, DependencyError> {
        Ok(Self {
            repository: deps.arc(0)?,
            page_size: deps.cloned(1)?,
        })
    }
}

fn infrastructure_module() -> Arc<Module> {
    Module::builder("TaskInfrastructureModule")
        .provider(
            Provider::class_as::<InMemoryTaskRepository>(task_repository_token())
                .with_initializer::<InMemoryTaskRepository>(),
        )
        .provider(Provider::value("connection.string", String::from("memory://")))
        .export_token(task_repository_token())
        .build()
}

fn application_module() -> Arc<Module> {
    Module::builder("TaskApplicationModule")
        .import(infrastructure_module())
        .provider(Provider::value("task.page_size", 20_usize))
        .provider(Provider::class::<TaskService>())
        .export_token(Token::of::<TaskService>())
        .build()
}

#[test]
fn test_value_scenario() -> anyhow::Result<()> {
    let container = Container::new();
    container.register(ProviderDefinition::new("A").use_value(42_i32).build()?)?;

    assert_eq!(*container.resolve_as::<i32>("A")?, 42);
    Ok(())
}

#[test]
fn test_greeter_scenario() -> anyhow::Result<()> {
    #[derive(Debug)]
    struct Greeter {
        name: String,
    }

    impl Injectable for Greeter {
        fn dependencies() -> Vec<Token> {
            vec![Token::of::<String>()]
        }

        fn construct(deps: &ResolvedDependencies) -> Result<Self, DependencyError> {
            Ok(Self {
                name: deps.cloned(0)?,
            })
        }
    }

    let container = Container::new();
    container.register(Provider::value("Name", String::from("hex")))?;
    container.register(Provider::class::<Greeter>().inject_at(0, "Name"))?;

    assert_eq!(container.get::<Greeter>()?.name, "hex");
    Ok(())
}

#[test]
fn test_module_scenario_m1_m2() {
    let m1 = Module::builder("M1")
        .provider(Provider::value("P", 1_i32))
        .export_token("P")
        .build();
    let m2 = Module::builder("M2").import(m1).build();

    let all: Vec<Token> = m2
        .get_all_providers()
        .iter()
        .map(|p| p.token().clone())
        .collect();
    assert!(all.contains(&Token::from("P")));
    assert!(m2
        .get_exported_providers()
        .iter()
        .all(|p| p.token() != &Token::from("P")));
}

#[test]
fn test_encapsulation_hides_internal_providers() -> anyhow::Result<()> {
    let app = ApplicationBuilder::new(application_module()).build()?;

    let service = app.get::<TaskService>()?;
    assert_eq!(service.page_size, 20);

    let err = app.resolve("connection.string").unwrap_err();
    assert!(err.is_not_found());
    Ok(())
}

#[test]
fn test_nested_reexport_reaches_top_level() -> anyhow::Result<()> {
    let infrastructure = infrastructure_module();
    let shared = Module::builder("SharedKernel")
        .import(Arc::clone(&infrastructure))
        .export(Arc::clone(&infrastructure))
        .build();
    let root = Module::builder("Root").import(shared).build();

    let app = ApplicationBuilder::new(root).build()?;
    assert!(app.resolve(task_repository_token()).is_ok());
    Ok(())
}

#[test]
fn test_singleton_shared_across_dependents() -> anyhow::Result<()> {
    let app = ApplicationBuilder::new(application_module()).build()?;

    let service = app.get::<TaskService>()?;
    let repository = app.resolve_as::<InMemoryTaskRepository>(task_repository_token())?;
    assert!(Arc::ptr_eq(&service.repository, &repository));
    assert!(Arc::ptr_eq(&service, &app.get::<TaskService>()?));
    Ok(())
}

#[test]
fn test_transitive_cycle_reports_chain_and_recovers() {
    let container = Container::new();
    container
        .register(
            Provider::factory("A", |deps: &ResolvedDependencies| deps.cloned::<u8>(0))
                .with_dependencies(["B"]),
        )
        .unwrap();
    container
        .register(
            Provider::factory("B", |deps: &ResolvedDependencies| deps.cloned::<u8>(0))
                .with_dependencies(["A"]),
        )
        .unwrap();
    container.register(Provider::value("C", 3_u8)).unwrap();

    let err = container.resolve("A").unwrap_err();
    assert!(err.is_circular());
    assert!(err.to_string().contains("A -> B -> A"));

    assert_eq!(*container.resolve_as::<u8>("C").unwrap(), 3);
    assert!(container.resolve("B").unwrap_err().is_circular());
}

#[test]
fn test_constructor_dependencies_resolved_left_to_right() {
    let order = Arc::new(Mutex::new(Vec::new()));
    let container = Container::new();

    for name in ["X", "Y"] {
        let order = Arc::clone(&order);
        container
            .register(
                Provider::factory(name, move |_: &ResolvedDependencies| {
                    order.lock().push(name);
                    Ok(name)
                })
                .transient(),
            )
            .unwrap();
    }

    #[derive(Debug)]
    struct Pair {
        first: &'static str,
        second: &'static str,
    }

    impl Injectable for Pair {
        fn dependencies() -> Vec<Token> {
            vec![Token::from("X"), Token::from("Y")]
        }

        fn construct(deps: &ResolvedDependencies) -> Result<Self, DependencyError> {
            Ok(Self {
                first: deps.cloned(0)?,
                second: deps.cloned(1)?,
            })
        }
    }

    container.register_class::<Pair>(Some(Scope::Transient)).unwrap();
    let pair = container.get::<Pair>().unwrap();

    assert_eq!((pair.first, pair.second), ("X", "Y"));
    assert_eq!(*order.lock(), vec!["X", "Y"]);
}

#[tokio::test]
async fn test_application_initialize_runs_exported_singleton_hooks() -> anyhow::Result<()> {
    let app = ApplicationBuilder::new(application_module()).build()?;
    app.initialize().await?;

    let repository = app.resolve_as::<InMemoryTaskRepository>(task_repository_token())?;
    assert!(repository.ready.load(Ordering::SeqCst));
    Ok(())
}

#[tokio::test]
async fn test_initialize_surfaces_resolution_errors() {
    let broken = Module::builder("Broken")
        .provider(Provider::class::<TaskService>())
        .provider(
            Provider::class::<InMemoryTaskRepository>()
                .with_initializer::<InMemoryTaskRepository>(),
        )
        .build();
    let app = ApplicationBuilder::new(broken).build().unwrap();

    assert!(app.initialize().await.is_ok());
    assert!(app.get::<TaskService>().unwrap_err().is_not_found());

    let failing = Module::builder("Failing")
        .provider(
            Provider::class_as::<TaskService>("service").with_initializer::<InMemoryTaskRepository>(),
        )
        .build();
    let app = ApplicationBuilder::new(failing).build().unwrap();
    let err = app.initialize().await.unwrap_err();
    assert!(matches!(err, LifecycleError::Resolution { .. }));
}

#[tokio::test]
async fn test_initialize_skips_private_providers_of_imported_modules() -> anyhow::Result<()> {
    let infra = Module::builder("Infra")
        .provider(
            Provider::class_as::<InMemoryTaskRepository>("pool")
                .with_initializer::<InMemoryTaskRepository>(),
        )
        .provider(
            Provider::class_as::<InMemoryTaskRepository>("repo")
                .with_initializer::<InMemoryTaskRepository>(),
        )
        .export_token("repo")
        .build();
    let root = Module::builder("Root").import(infra).build();

    let app = ApplicationBuilder::new(root).build()?;
    app.initialize().await?;

    let repository = app.resolve_as::<InMemoryTaskRepository>("repo")?;
    assert!(repository.ready.load(Ordering::SeqCst));
    assert!(app.resolve("pool").unwrap_err().is_not_found());
    Ok(())
}
