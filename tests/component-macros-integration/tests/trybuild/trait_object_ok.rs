use hexy_di_abstractions::{Injectable, Provider, Token};
use hexy_di_impl::Container;
use hexy_macros::domain_service;
use std::sync::Arc;

trait Notifier: Send + Sync {
    fn channel(&self) -> &'static str;
}

struct EmailNotifier;

impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }
}

#[domain_service]
struct Dispatch {
    notifier: Arc<dyn Notifier>,
}

fn main() {
    assert_eq!(Dispatch::dependencies(), vec![Token::of::<dyn Notifier>()]);

    let container = Container::new();
    let notifier: Arc<dyn Notifier> = Arc::new(EmailNotifier);
    container
        .register(Provider::value(Token::of::<dyn Notifier>(), notifier))
        .unwrap();
    container.register(Provider::class::<Dispatch>()).unwrap();

    assert_eq!(container.get::<Dispatch>().unwrap().notifier.channel(), "email");
}
