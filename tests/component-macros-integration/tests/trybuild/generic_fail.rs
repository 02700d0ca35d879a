use hexy_macros::domain_repository;

#[domain_repository]
struct Repository<T> {
    items: Vec<T>,
}

fn main() {}
