//! HTTP server
//!
//! Thin adapter exposing the api handlers over `tiny_http`. All business
//! logic lives in `api` and `workflow`; this module only routes, parses
//! bodies, and serializes responses.

mod tiny_http;

pub use self::tiny_http::serve;
