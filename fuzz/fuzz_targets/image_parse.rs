#![no_main]
use elfparser::config::SourceListConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(image) = elfparser::ElfImage::parse(data) else {
        return;
    };
    let _ = image.list_sections();
    let _ = image.list_symbols();
    let _ = elfparser::analysis::extract_source_files(&image, &SourceListConfig::default());
    let _ = elfparser::export::write_s19(&image, &mut std::io::sink(), &Default::default());
});
