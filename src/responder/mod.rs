//! Static responder: router plus listener lifecycle

pub mod handler;
pub mod server;

pub use handler::{router, ResponderState, CONTENT_TYPE_HTML};
pub use server::{run_backend, serve_all, StubServer};
