#![no_main]

use fretchord_core::AnalyzerConfig;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(config) = AnalyzerConfig::from_json(text) {
            let json = config.to_json_pretty().unwrap();
            assert_eq!(AnalyzerConfig::from_json(&json).unwrap(), config);
        }
    }
});
