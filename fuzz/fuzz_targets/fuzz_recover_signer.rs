#![no_main]

use libfuzzer_sys::fuzz_target;

use ballotbox_crypto::recover_signer_from_slice;
use ballotbox_types::MessageDigest;

// First 32 bytes are the digest, the rest is the signature. Recovery must
// never panic and must reject every length other than 65.
fuzz_target!(|data: &[u8]| {
    if data.len() < 32 {
        return;
    }
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&data[..32]);
    let signature = &data[32..];

    let signer = recover_signer_from_slice(&MessageDigest::new(digest), signature);
    if signature.len() != 65 {
        assert!(signer.is_none());
    }
});
