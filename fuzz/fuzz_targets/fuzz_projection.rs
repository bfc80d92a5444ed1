#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(listings) = job_board_proxy::domain::listing::parse_listings(text) {
            let projected = job_board_proxy::domain::listing::project_listings(listings);
            let _ = serde_json::to_string(&projected);
        }
    }
});
