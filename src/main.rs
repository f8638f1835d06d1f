#[cfg(any(target_arch = "wasm32", test))]
mod clipboard;
mod config;
#[cfg(any(target_arch = "wasm32", test))]
mod contact;
mod log;
#[cfg(any(target_arch = "wasm32", test))]
mod reveal;
#[cfg(any(target_arch = "wasm32", test))]
mod skills;
#[cfg(any(target_arch = "wasm32", test))]
mod theme;
#[cfg(any(target_arch = "wasm32", test))]
mod tilt;
#[cfg(any(target_arch = "wasm32", test))]
mod typewriter;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
mod server;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    server::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
