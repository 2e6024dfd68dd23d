/// Catalog item identifiers
///
/// A search query travels inside the item id: every UTF-16 code unit of the text
/// is cut down to its low byte and the bytes are base64 encoded behind the
/// add-on's namespace prefix. Latin-1 text survives the trip exactly; anything
/// wider comes back as control or Latin-1 characters, which the stream
/// handler's normalized retry strips.
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};

use crate::{error::CodecError, models::ID_PREFIX};

/// Standard alphabet, padded on encode, padding optional on decode
const ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encodes text into an identifier payload
///
/// Lossless for U+0000..U+00FF; wider code units keep only their low byte.
pub fn encode(text: &str) -> String {
    let bytes: Vec<u8> = text.encode_utf16().map(|unit| unit as u8).collect();
    ENGINE.encode(bytes)
}

/// Decodes an identifier payload back into text
pub fn decode(code: &str) -> Result<String, CodecError> {
    let bytes = ENGINE.decode(code)?;
    Ok(bytes.into_iter().map(char::from).collect())
}

/// Full catalog item id for a query
pub fn item_id(query: &str) -> String {
    format!("{}{}", ID_PREFIX, encode(query))
}

/// Recovers the query carried by a catalog item id
pub fn query_from_id(id: &str) -> Result<String, CodecError> {
    let payload = id
        .strip_prefix(ID_PREFIX)
        .ok_or_else(|| CodecError::UnknownPrefix(id.to_string()))?;
    decode(payload)
}
