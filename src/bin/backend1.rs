//! Backend 1: `<h1>Response from Backend 1</h1>` on 127.0.0.1:8081

use stub_backends::responder::run_backend;
use stub_backends::{BackendConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    run_backend(BackendConfig::backend_one()).await
}
