#![no_main]

use arbitrary::Unstructured;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    fortune::arbitrary::arbtests::sweep(&mut Unstructured::new(data)).unwrap();
});
