use hexy_macros::domain_service;

#[domain_service(strict)]
struct Ledger;

fn main() {}
