//! Second backend: `<h1>Response from Backend 2</h1>` on 127.0.0.1:8083

use stub_backends::responder::run_backend;
use stub_backends::{BackendConfig, Result};

#[tokio::main]
async fn main() -> Result<()> {
    run_backend(BackendConfig::backend_two()).await
}
