#![no_main]
use libfuzzer_sys::fuzz_target;
use zeniconset::*;

fuzz_target!(|data: &[u8]| {
    // Keep sources small so each iteration stays fast
    let limits = Limits {
        max_pixels: Some(256 * 256),
        ..Default::default()
    };
    let Ok(raster) = DecodeRequest::new(data, "f.tga")
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    let set = AssetPipeline::new()
        .generate(&raster, enough::Unstoppable)
        .expect("decoded raster must always generate");

    // Every produced asset has its table dimensions, in table order
    let mut outputs = OUTPUTS.iter();
    for asset in &set {
        let output = outputs
            .find(|s| s.name == asset.name())
            .expect("asset out of table order");
        assert_eq!((asset.width(), asset.height()), (output.width, output.height));
    }
});
