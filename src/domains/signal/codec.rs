//! Integer wire codec shared with the simulator-side script.
//!
//! Layout version 1: every integer is 4 bytes, signed, little-endian.
//! Multi-segment payloads join encoded integer arrays with a single `|` byte.

use crate::common::{SignalError, SignalResult};

/// Bytes per encoded integer.
pub const INT_WIDTH: usize = 4;

/// Segment delimiter used in reply payloads.
pub const SEGMENT_DELIMITER: &[u8] = b"|";

/// Version of the layout described above.
pub const WIRE_VERSION: u16 = 1;

/// Number of segments in a `GetState` reply.
pub const REPLY_SEGMENTS: usize = 3;

/// Encoded size of the self-state segment (`uid`, `ambient_light`).
const OWN_SEGMENT_LEN: usize = 2 * INT_WIDTH;

pub fn encode_ints(values: &[i32]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(values.len() * INT_WIDTH);
    for value in values {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    buf
}

pub fn decode_ints(bytes: &[u8]) -> SignalResult<Vec<i32>> {
    if bytes.len() % INT_WIDTH != 0 {
        return Err(SignalError::malformed(format!(
            "{} bytes is not a multiple of {}",
            bytes.len(),
            INT_WIDTH
        )));
    }
    Ok(bytes
        .chunks_exact(INT_WIDTH)
        .map(|chunk| {
            let mut word = [0u8; INT_WIDTH];
            word.copy_from_slice(chunk);
            i32::from_le_bytes(word)
        })
        .collect())
}

/// Splits `bytes` on `delimiter`, recognising it only at integer boundaries
/// of the segment being read.
///
/// An integer whose first encoded byte equals the delimiter (124 with `|`)
/// at such a boundary is read as a delimiter. Use [`split_reply`] when the
/// segment shapes are known.
pub fn split_segments<'a>(bytes: &'a [u8], delimiter: &[u8]) -> Vec<&'a [u8]> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut pos = 0;
    loop {
        if pos >= bytes.len() {
            segments.push(&bytes[start..]);
            return segments;
        }
        if !delimiter.is_empty() && bytes[pos..].starts_with(delimiter) {
            segments.push(&bytes[start..pos]);
            pos += delimiter.len();
            start = pos;
            continue;
        }
        pos = (pos + INT_WIDTH).min(bytes.len());
    }
}

pub fn join_segments<S: AsRef<[u8]>>(segments: &[S], delimiter: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        if i > 0 {
            buf.extend_from_slice(delimiter);
        }
        buf.extend_from_slice(segment.as_ref());
    }
    buf
}

/// Frames a `GetState` reply into its three segments.
///
/// The self-state segment is always two integers and the neighbor arrays
/// share one length, so the payload length alone fixes every delimiter
/// position. Delimiter bytes inside encoded integers are therefore harmless.
pub fn split_reply(bytes: &[u8]) -> SignalResult<[&[u8]; REPLY_SEGMENTS]> {
    let delim = SEGMENT_DELIMITER.len();
    let fixed = OWN_SEGMENT_LEN + 2 * delim;
    if bytes.len() < fixed || (bytes.len() - fixed) % (2 * INT_WIDTH) != 0 {
        return Err(SignalError::malformed(format!(
            "reply of {} bytes does not fit the [uid, light] | ids | distances layout",
            bytes.len()
        )));
    }
    let array_len = (bytes.len() - fixed) / 2;

    let first = OWN_SEGMENT_LEN;
    let second = first + delim + array_len;
    for at in [first, second] {
        if &bytes[at..at + delim] != SEGMENT_DELIMITER {
            return Err(SignalError::malformed(format!(
                "expected segment delimiter at byte {}",
                at
            )));
        }
    }

    Ok([
        &bytes[..first],
        &bytes[first + delim..second],
        &bytes[second + delim..],
    ])
}

/// Builds a reply payload the way the simulator does. Used by channel doubles.
pub fn encode_reply(uid: i32, ambient_light: i32, neighbor_ids: &[i32], distances: &[i32]) -> Vec<u8> {
    join_segments(
        &[
            encode_ints(&[uid, ambient_light]),
            encode_ints(neighbor_ids),
            encode_ints(distances),
        ],
        SEGMENT_DELIMITER,
    )
}
