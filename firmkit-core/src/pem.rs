//! PEM certificate sanitization
//!
//! Issued certificates are embedded in firmware as single-line compile
//! constants, so the PEM envelope and all line breaks must be stripped
//! before persistence.

const BEGIN_MARKER: &str = "-----BEGIN CERTIFICATE-----";
const END_MARKER: &str = "-----END CERTIFICATE-----";

/// Strip the PEM envelope and every line break from a certificate
///
/// The output is the bare base64 payload on a single line. Already
/// sanitized input passes through unchanged, so the operation is safe
/// to apply twice.
pub fn sanitize_certificate(pem: &str) -> String {
    pem.replace(BEGIN_MARKER, "")
        .replace(END_MARKER, "")
        .replace(['\r', '\n'], "")
}
