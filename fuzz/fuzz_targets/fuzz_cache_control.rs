#![no_main]
use libfuzzer_sys::fuzz_target;

use job_board_proxy::domain::cached_response::CachedResponse;

fuzz_target!(|data: &[u8]| {
    if let Ok(value) = std::str::from_utf8(data) {
        let response = CachedResponse::new(200, vec![("cache-control".into(), value.into())], "");
        let _ = response.max_age();
    }
});
