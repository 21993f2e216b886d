#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // TGA decoder must never panic, whatever the header claims
    let _ = zeniconset::tga::decode(data, None, enough::Unstoppable);

    // Routed decode through every accepted extension
    for name in ["f.tga", "f.png", "f.jpg"] {
        let _ = zeniconset::DecodeRequest::new(data, name).decode(enough::Unstoppable);
    }
});
