use hexy_macros::domain_service;

#[domain_service]
struct Mailer {
    #[inject("smtp.host")]
    #[inject("smtp.fallback")]
    host: String,
}

fn main() {}
