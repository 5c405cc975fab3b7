//! DER encoding of the client-authentication CSR extension.
//!
//! rcgen refuses extended key usages in a CSR, so the extension is carried as
//! a custom extension whose OID is the client-auth key purpose and whose value
//! is a BasicConstraints-shaped structure:
//!
//! ```text
//! SEQUENCE {
//!     cA                BOOLEAN DEFAULT FALSE,
//!     pathLenConstraint INTEGER (0..MAX) OPTIONAL
//! }
//! ```

/// Extended key usage: TLS WWW client authentication (1.3.6.1.5.5.7.3.2).
pub const CLIENT_AUTH_OID: &[u64] = &[1, 3, 6, 1, 5, 5, 7, 3, 2];

const TAG_BOOLEAN: u8 = 0x01;
const TAG_INTEGER: u8 = 0x02;
const TAG_SEQUENCE: u8 = 0x30;

/// Value placed under [`CLIENT_AUTH_OID`]: `cA = TRUE`, no path length.
pub fn client_auth_extension_value() -> Vec<u8> {
    encode_basic_constraints(true, None)
}

/// DER-encode a BasicConstraints structure.
///
/// `cA = FALSE` is the DEFAULT and is therefore omitted, as DER requires.
pub fn encode_basic_constraints(is_ca: bool, path_len: Option<u32>) -> Vec<u8> {
    let mut body = Vec::new();

    if is_ca {
        body.extend_from_slice(&[TAG_BOOLEAN, 0x01, 0xff]);
    }

    if let Some(path_len) = path_len {
        let value = encode_unsigned(path_len);
        body.push(TAG_INTEGER);
        push_length(&mut body, value.len());
        body.extend_from_slice(&value);
    }

    let mut out = Vec::with_capacity(body.len() + 2);
    out.push(TAG_SEQUENCE);
    push_length(&mut out, body.len());
    out.extend_from_slice(&body);
    out
}

/// Minimal big-endian two's complement encoding of a non-negative integer.
fn encode_unsigned(value: u32) -> Vec<u8> {
    let bytes = value.to_be_bytes();
    let first = bytes
        .iter()
        .position(|&b| b != 0)
        .unwrap_or(bytes.len() - 1);

    let mut out = Vec::with_capacity(5);
    if bytes[first] & 0x80 != 0 {
        out.push(0x00);
    }
    out.extend_from_slice(&bytes[first..]);
    out
}

fn push_length(out: &mut Vec<u8>, len: usize) {
    if len < 0x80 {
        out.push(len as u8);
        return;
    }

    let bytes = len.to_be_bytes();
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len() - 1);
    out.push(0x80 | (bytes.len() - first) as u8);
    out.extend_from_slice(&bytes[first..]);
}
