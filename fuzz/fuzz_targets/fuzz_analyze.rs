#![no_main]

use fretchord_core::{analyze, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (&str, i8, bool)| {
    let (pattern, fret, capo) = input;
    let fret = i32::from(fret);
    match analyze(pattern, fret, capo) {
        Ok(names) => {
            assert!(validate(pattern, fret).is_ok());
            assert!(!names.base.render().is_empty());
            assert!(names.variations.len() < 6);
        }
        Err(e) => assert_eq!(validate(pattern, fret), Err(e)),
    }
});
