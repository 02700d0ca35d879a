use hexy_di_abstractions::Injectable;
use hexy_macros::{application_service, domain_service, Injectable};

// 叠加的属性只生成一个 Injectable 实现
#[domain_service]
#[application_service]
struct Billing;

#[application_service]
#[derive(Injectable)]
struct Invoicing(#[inject("invoice.series")] String);

fn main() {
    assert!(Billing::dependencies().is_empty());
    assert_eq!(Invoicing::dependencies().len(), 1);
    assert!(hexy_common::is_domain_service::<Billing>());
    assert!(hexy_common::is_application_service::<Billing>());
}
