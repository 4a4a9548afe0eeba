#![no_main]

use libfuzzer_sys::fuzz_target;

use ballotbox_types::{CredentialId, Identity, MessageDigest, Timestamp, VoteSignature};

// Parsing arbitrary text or bytes as protocol types must never panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<CredentialId>();
        let _ = text.parse::<Identity>();
        let _ = text.parse::<MessageDigest>();
        let _ = text.parse::<VoteSignature>();
    }

    let _ = VoteSignature::from_slice(data);
    let _ = bincode::deserialize::<CredentialId>(data);
    let _ = bincode::deserialize::<Identity>(data);
    let _ = bincode::deserialize::<VoteSignature>(data);
    let _ = bincode::deserialize::<Timestamp>(data);
});
