//! Stream-vbyte packings of `u32` sequences.
//!
//! Both layouts start with a control stream of 2-bit codes, four per byte and
//! the first value in the low bits, followed by a data stream:
//!
//! ```text
//! [control: ceil(n / 4) bytes][data]
//! ```
//!
//! * Byte packing: code `c` stores the value in `c + 1` little-endian bytes.
//! * Half-byte packing: code 0 stores nothing (value is zero), 1 one nibble,
//!   2 two nibbles, 3 four nibbles. Nibbles fill each data byte low half
//!   first, and a half-filled final byte is kept.
//!
//! These layouts are read back from stored data; they must never change.

use crate::error::{Result, VbzError};

/// Worst case size of either packing for `count` values.
#[inline]
pub fn max_packed_len(count: usize) -> usize {
    control_len(count) + count * 4
}

#[inline]
fn control_len(count: usize) -> usize {
    count.div_ceil(4)
}

#[inline]
fn code_of(control: &[u8], index: usize) -> u8 {
    (control[index / 4] >> ((index % 4) * 2)) & 0x3
}

fn split_control(input: &[u8], count: usize) -> Result<(&[u8], &[u8])> {
    let control_len = control_len(count);
    if input.len() < control_len {
        return Err(VbzError::Stream("control bytes truncated"));
    }
    Ok(input.split_at(control_len))
}

// ── byte packing ─────────────────────────────────────────────────────────────

#[inline]
fn byte_code(value: u32) -> u8 {
    if value < 1 << 8 {
        0
    } else if value < 1 << 16 {
        1
    } else if value < 1 << 24 {
        2
    } else {
        3
    }
}

pub fn encode(values: &[u32]) -> Vec<u8> {
    let mut out = vec![0u8; control_len(values.len())];
    out.reserve(values.len() * 4);
    for (i, &value) in values.iter().enumerate() {
        let code = byte_code(value);
        out[i / 4] |= code << ((i % 4) * 2);
        out.extend_from_slice(&value.to_le_bytes()[..code as usize + 1]);
    }
    out
}

/// Decode exactly `count` values. The input must be consumed exactly.
pub fn decode(input: &[u8], count: usize) -> Result<Vec<u32>> {
    let (control, mut data) = split_control(input, count)?;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let len = code_of(control, i) as usize + 1;
        if data.len() < len {
            return Err(VbzError::Stream("data bytes truncated"));
        }
        let mut bytes = [0u8; 4];
        bytes[..len].copy_from_slice(&data[..len]);
        out.push(u32::from_le_bytes(bytes));
        data = &data[len..];
    }
    if !data.is_empty() {
        return Err(VbzError::Stream("trailing bytes after last value"));
    }
    Ok(out)
}

// ── half-byte packing ────────────────────────────────────────────────────────

#[inline]
fn nibble_code(value: u32) -> u8 {
    if value == 0 {
        0
    } else if value < 1 << 4 {
        1
    } else if value < 1 << 8 {
        2
    } else {
        3
    }
}

#[inline]
fn nibble_count(code: u8) -> usize {
    match code {
        0 => 0,
        1 => 1,
        2 => 2,
        _ => 4,
    }
}

struct NibbleWriter {
    data: Vec<u8>,
    nibbles: usize,
}

impl NibbleWriter {
    fn push(&mut self, nibble: u8) {
        if self.nibbles % 2 == 0 {
            self.data.push(nibble);
        } else if let Some(last) = self.data.last_mut() {
            *last |= nibble << 4;
        }
        self.nibbles += 1;
    }
}

/// Half-byte packing. Values are stored in at most 16 bits; it is only used for
/// zigzag deltas of 1-byte samples, which never exceed 510.
pub fn encode_half(values: &[u32]) -> Vec<u8> {
    let mut control = vec![0u8; control_len(values.len())];
    let mut writer = NibbleWriter {
        data: Vec::with_capacity(values.len()),
        nibbles: 0,
    };
    for (i, &value) in values.iter().enumerate() {
        debug_assert!(value < 1 << 16, "half-byte packing holds 16 bits");
        let code = nibble_code(value);
        control[i / 4] |= code << ((i % 4) * 2);
        let mut rest = value;
        for _ in 0..nibble_count(code) {
            writer.push((rest & 0xf) as u8);
            rest >>= 4;
        }
    }
    control.extend_from_slice(&writer.data);
    control
}

/// Decode exactly `count` half-byte packed values. The input must be consumed
/// exactly.
pub fn decode_half(input: &[u8], count: usize) -> Result<Vec<u32>> {
    let (control, data) = split_control(input, count)?;
    let mut out = Vec::with_capacity(count);
    let mut nibble = 0usize;
    for i in 0..count {
        let mut value = 0u32;
        for shift in 0..nibble_count(code_of(control, i)) {
            let byte = *data
                .get(nibble / 2)
                .ok_or(VbzError::Stream("data nibbles truncated"))?;
            let bits = (byte >> ((nibble % 2) * 4)) & 0xf;
            value |= u32::from(bits) << (shift * 4);
            nibble += 1;
        }
        out.push(value);
    }
    if nibble.div_ceil(2) != data.len() {
        return Err(VbzError::Stream("trailing bytes after last value"));
    }
    Ok(out)
}
