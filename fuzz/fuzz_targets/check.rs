#![no_main]

use libfuzzer_sys::fuzz_target;
use typedlua::frontend::json;
use typedlua::typechecker::typecheck;

fuzz_target!(|data: &[u8]| {
    // Any chunk that decodes must check without panicking, whatever its spans point at
    if let Ok(chunk) = json::from_slice(data) {
        let source = String::from_utf8_lossy(data);
        let _ = typecheck(&chunk, &source, "fuzz.tl");
    }
});
