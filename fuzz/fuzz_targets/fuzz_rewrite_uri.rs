//! Fuzz target: sidecar URI rewriting.
//!
//! Any URI the `http` crate accepts must either be left alone or rewritten
//! to a `localhost` URI under the invocation prefix. Never a panic.

#![no_main]

use hyper::Uri;
use invoke_rewriter::{rewrite_uri, INVOKE_PREFIX};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(original) = Uri::try_from(data) else {
        return;
    };
    let Some(rewritten) = rewrite_uri(&original, 3500) else {
        return;
    };
    assert_eq!(rewritten.host(), Some("localhost"));
    assert_eq!(rewritten.port_u16(), Some(3500));
    assert!(
        rewritten.path().starts_with(INVOKE_PREFIX),
        "rewritten path must start with the invocation prefix"
    );
    assert!(
        rewritten.path().ends_with(original.path()),
        "original path must follow the method segment"
    );
    assert_eq!(rewritten.query(), original.query(), "query must be preserved verbatim");
});
