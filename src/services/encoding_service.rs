use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

/// Decode uploaded bytes into text. Uploaded files have unknown provenance,
/// so this never fails: detection first, then the fixed fallback chain.
/// WINDOWS_1252 is what the WHATWG standard resolves the latin1/ISO-8859-1
/// labels to, so one strict attempt covers all three single-byte candidates.
pub fn resolve_text(bytes: &[u8]) -> String {
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let guessed = detector.guess(None, true);
    if let Some(text) = decode_strict(guessed, bytes) {
        return text;
    }

    resolve_with(bytes, &[UTF_8, WINDOWS_1252])
}

/// Ordered-fallback decode: each candidate strictly, in order, then lossy
/// UTF-8 as the guaranteed-total terminal step.
pub fn resolve_with(bytes: &[u8], candidates: &[&'static Encoding]) -> String {
    for encoding in candidates {
        if let Some(text) = decode_strict(encoding, bytes) {
            return text;
        }
    }

    String::from_utf8_lossy(bytes).into_owned()
}

/// Decode with a single encoding, accepting the result only if no
/// replacement character had to be emitted. BOM sniffing is left on, so a
/// UTF-8 signature is stripped rather than leaking into the text.
fn decode_strict(encoding: &'static Encoding, bytes: &[u8]) -> Option<String> {
    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        None
    } else {
        Some(text.into_owned())
    }
}
