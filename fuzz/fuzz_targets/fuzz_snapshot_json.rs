#![no_main]

use lifegrid::persist::{decode_json, encode_json};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Decoding arbitrary text must never panic
    let Ok(grid) = decode_json(text) else {
        return;
    };

    assert!(grid.width() > 0 && grid.height() > 0);
    assert!(grid.ages().iter().all(|&age| age == 0));

    // Anything accepted must re-encode to an equivalent grid
    let encoded = encode_json(&grid).expect("accepted grid should encode");
    let again = decode_json(&encoded).expect("encoded grid should decode");
    assert!(again.same_cells(&grid), "JSON re-encode changed cells");
});
