#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    object_resolver_fuzz::fuzz_access(data);
});
