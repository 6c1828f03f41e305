//! Cryptographic utilities for API signing

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha384, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha384 = Hmac<Sha384>;
type HmacSha512 = Hmac<Sha512>;

/// Digest used by an HMAC signer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

/// How a digest is rendered on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureEncoding {
    Hex,
    Base64,
}

impl SignatureEncoding {
    pub fn encode(&self, digest: &[u8]) -> String {
        match self {
            SignatureEncoding::Hex => hex::encode(digest),
            SignatureEncoding::Base64 => base64_encode(digest),
        }
    }
}

/// HMAC over `message` keyed with raw `key` bytes
pub fn hmac(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Vec<u8> {
    match algorithm {
        HashAlgorithm::Sha256 => {
            let mut mac =
                HmacSha256::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        },
        HashAlgorithm::Sha384 => {
            let mut mac =
                HmacSha384::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        },
        HashAlgorithm::Sha512 => {
            let mut mac =
                HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        },
    }
}

/// HMAC with a string secret, encoded for transport
pub fn sign(
    algorithm: HashAlgorithm,
    encoding: SignatureEncoding,
    secret: &str,
    message: &str,
) -> String {
    encoding.encode(&hmac(algorithm, secret.as_bytes(), message.as_bytes()))
}

/// HMAC-SHA256 서명을 hex 문자열로 반환
pub fn hmac_sha256_hex(secret: &str, message: &str) -> String {
    sign(HashAlgorithm::Sha256, SignatureEncoding::Hex, secret, message)
}

/// HMAC-SHA256 서명을 base64 문자열로 반환
pub fn hmac_sha256_base64(secret: &str, message: &str) -> String {
    sign(HashAlgorithm::Sha256, SignatureEncoding::Base64, secret, message)
}

pub fn sha256(data: &[u8]) -> Vec<u8> {
    Sha256::digest(data).to_vec()
}

pub fn sha512_hex(data: &[u8]) -> String {
    hex::encode(Sha512::digest(data))
}

/// Base64 인코딩
pub fn base64_encode(data: &[u8]) -> String {
    BASE64.encode(data)
}

/// Base64 디코딩
pub fn base64_decode(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    BASE64.decode(data)
}
