use hexy_macros::Injectable;

#[derive(Injectable)]
enum Channel {
    Email,
}

fn main() {
    let _channel = Channel::Email;
}
