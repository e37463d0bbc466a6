use axum::body::Body;
use axum::http::Request;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use stub_backends::infrastructure::RequestMetrics;
use stub_backends::{router, BackendConfig};
use tower::ServiceExt;

fn benchmark_responder(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let app = router(&BackendConfig::backend_one(), Arc::new(RequestMetrics::new()));

    c.bench_function("static_response", |b| {
        b.iter(|| {
            let request = Request::builder()
                .uri("/anything/at/all")
                .body(Body::empty())
                .unwrap();
            let response = runtime.block_on(app.clone().oneshot(request)).unwrap();
            black_box(response)
        })
    });
}

criterion_group!(benches, benchmark_responder);
criterion_main!(benches);
