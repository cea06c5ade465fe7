#![no_main]
use bmpcopy::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_payload_bytes: Some(16 << 20),
        ..Default::default()
    };

    // Strict: must never panic, and a successful copy is a prefix of the input
    if let Ok((out, summary)) = CopyRequest::new()
        .with_limits(&limits)
        .copy_bytes(data, enough::Unstoppable)
    {
        assert_eq!(out.len() as u64, summary.bytes_written);
        assert_eq!(&out[..], &data[..out.len()]);
    }

    // Permissive: output always has the declared size
    if let Ok((out, summary)) = CopyRequest::new()
        .with_limits(&limits)
        .with_permissiveness(Permissiveness::Permissive)
        .copy_bytes(data, enough::Unstoppable)
    {
        assert_eq!(out.len() as u64, summary.bytes_written);
    }
});
