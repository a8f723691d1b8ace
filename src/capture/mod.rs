//! The `capture` module hands captured stills to the reconciler.
//! The camera itself belongs to the host; we only see the latest encoded
//! image it produced, fingerprint it, and normalize it for the vision model.

pub mod file;

use sha2::{Digest, Sha256};

/// An encoded still image, opaque to the reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlob {
    /// JPEG-encoded image bytes.
    pub data: Vec<u8>,
}

impl ImageBlob {
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Content fingerprint: SHA-256 of the blob bytes, hex-encoded.
    ///
    /// A pure function of content — never of capture time — so a re-render
    /// that still reports the previous blob fingerprints identically and is
    /// treated as "no new image".
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(&self.data);
        let mut out = String::with_capacity(digest.len() * 2);
        for byte in digest {
            out.push_str(&format!("{:02x}", byte));
        }
        out
    }
}

/// Source of "the latest capture this render". Polling is a pure read with
/// no side effects; a failed or absent capture is `None` either way.
pub trait ImageCaptureSource: Send + Sync {
    fn poll(&self) -> Option<ImageBlob>;
}
