//! Character encoding detection for text inputs.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Decode a byte string to UTF-8.
/// Honours a BOM, then tries UTF-8, then falls back to Windows-1252.
/// Returns the text and the name of the encoding that was used.
pub fn decode_to_utf8(bytes: &[u8]) -> (String, &'static str) {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, _) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        return (text.into_owned(), encoding.name());
    }

    match std::str::from_utf8(bytes) {
        Ok(text) => (text.to_owned(), UTF_8.name()),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            (text.into_owned(), WINDOWS_1252.name())
        }
    }
}

/// Read a text file, decoding it with [`decode_to_utf8`].
pub fn read_text(path: &std::path::Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    let (text, encoding) = decode_to_utf8(&bytes);
    if encoding != "UTF-8" {
        log::debug!("Decoded {} as {}", path.display(), encoding);
    }
    Ok(text)
}
