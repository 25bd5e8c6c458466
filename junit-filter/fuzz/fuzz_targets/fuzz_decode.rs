#![no_main]

use junit_filter::report::{decode_report, encode_report, Suite};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(document) = decode_report(s) {
            let merged = Suite {
                name: None,
                cases: document.into_cases().collect(),
            };
            let encoded = encode_report(&merged).expect("decoded cases always encode");
            let text = String::from_utf8(encoded).expect("encoder emits UTF-8");
            let (_, body) = text.split_once("?>").expect("encoder emits a declaration");
            decode_report(&format!("<testsuites>{body}</testsuites>"))
                .expect("encoded output always decodes");
        }
    }
});
