#![no_main]

use arbitrary::Arbitrary;
use lifegrid::persist::{decode_png, encode_png};
use libfuzzer_sys::fuzz_target;

/// Raw image bytes plus the cell size to decode them with.
#[derive(Arbitrary, Debug)]
struct PngInput {
    /// Cell size in pixels; zero must be rejected, not panic.
    cell_size: u8,
    /// Candidate PNG file contents.
    bytes: Vec<u8>,
}

fuzz_target!(|input: PngInput| {
    let cell_size = u32::from(input.cell_size % 16);
    let Ok(grid) = decode_png(&input.bytes, cell_size) else {
        return;
    };

    // Cap re-encode size to avoid OOM on huge decoded images
    if grid.area() > 1 << 16 {
        return;
    }

    let encoded = encode_png(&grid, cell_size).expect("decoded grid should encode");
    let again = decode_png(&encoded, cell_size).expect("encoded grid should decode");
    assert!(again.same_cells(&grid), "PNG re-encode changed cells");
});
