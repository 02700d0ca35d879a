use hexy_di_abstractions::{Injectable, Token};
use hexy_macros::{domain_entity, infrastructure_repository};
use std::sync::Arc;

#[infrastructure_repository]
struct OrderStore;

#[domain_entity]
struct Order {
    store: Arc<OrderStore>,
    #[inject("order.prefix")]
    prefix: String,
}

fn main() {
    assert_eq!(
        Order::dependencies(),
        vec![Token::of::<OrderStore>(), Token::from("order.prefix")]
    );
    assert!(hexy_common::is_domain_entity::<Order>());
    assert!(hexy_common::is_infrastructure_repository::<OrderStore>());
}
