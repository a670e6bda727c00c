pub const GREETING: &str = "Hello, world!";

pub async fn hello() -> &'static str {
    tracing::info!("/hello called");
    GREETING
}
