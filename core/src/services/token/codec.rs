//! Compact token encoding: `base64url(header).base64url(payload).base64url(signature)`
//!
//! Segments are unpadded URL-safe base64 of UTF-8 JSON. `Header` and
//! `Payload` serialize with a fixed field order and sorted private claims,
//! so encoding the same structures always yields the same bytes to sign.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::entities::token::{Header, Payload};
use crate::errors::{ParseError, Segment, TokenError};

/// Encoded header and payload segments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedSegments {
    pub header: String,
    pub payload: String,
}

impl EncodedSegments {
    /// The bytes covered by the signature: `header.payload`
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }

    /// Appends the encoded signature to produce the final token string
    pub fn with_signature(&self, signature: &[u8]) -> String {
        format!(
            "{}.{}.{}",
            self.header,
            self.payload,
            URL_SAFE_NO_PAD.encode(signature)
        )
    }
}

/// A structurally valid token whose signature has not been checked yet
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedToken {
    pub header: Header,
    pub payload: Payload,
    pub signature: Vec<u8>,
    signing_input: String,
}

impl DecodedToken {
    /// The `header.payload` text exactly as it appeared in the token
    pub fn signing_input(&self) -> &str {
        &self.signing_input
    }
}

/// Encodes header and payload into their token segments
///
/// # Errors
///
/// * `TokenError::EncodingError` - a structure could not be serialized
pub fn encode(header: &Header, payload: &Payload) -> Result<EncodedSegments, TokenError> {
    Ok(EncodedSegments {
        header: encode_segment(header)?,
        payload: encode_segment(payload)?,
    })
}

/// Splits and decodes a token string without verifying it
pub fn decode(token: &str) -> Result<DecodedToken, ParseError> {
    let segments: Vec<&str> = token.split('.').collect();
    let [header, payload, signature] = segments[..] else {
        return Err(ParseError::SegmentCount {
            found: segments.len(),
        });
    };

    let decoded_header = decode_segment(header, Segment::Header)?;
    let decoded_payload = decode_segment(payload, Segment::Payload)?;
    let signature_bytes = decode_base64(signature, Segment::Signature)?;

    Ok(DecodedToken {
        header: decoded_header,
        payload: decoded_payload,
        signature: signature_bytes,
        signing_input: format!("{}.{}", header, payload),
    })
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value).map_err(|e| TokenError::EncodingError {
        message: e.to_string(),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

fn decode_segment<T: DeserializeOwned>(segment: &str, which: Segment) -> Result<T, ParseError> {
    let bytes = decode_base64(segment, which)?;
    serde_json::from_slice(&bytes).map_err(|_| ParseError::InvalidJson { segment: which })
}

fn decode_base64(segment: &str, which: Segment) -> Result<Vec<u8>, ParseError> {
    URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| ParseError::InvalidBase64 { segment: which })
}
