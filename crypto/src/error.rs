use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("secret key is not a valid secp256k1 scalar")]
    InvalidSecretKey,

    #[error("signing failed")]
    SigningFailed,

    #[error("OS randomness unavailable: {0}")]
    Entropy(String),
}
