/*
Copyright 2025 The SIMPLE-ISA Authors

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! The flat 256-byte address space shared by code and data, and the
//! `.hex`/`.bin` interchange formats.

use crate::error::ImageError;

pub const MEMORY_SIZE: usize = 256;

/// A fixed 256-cell byte-addressed memory.
pub type Memory = [u8; MEMORY_SIZE];

/// Parses a single `0xHH` (one or two hex digit) token into a byte.
pub fn parse_hex_byte(token: &str) -> Option<u8> {
    let digits = token.strip_prefix("0x")?;
    if digits.is_empty() || digits.len() > 2 {
        return None;
    }
    u8::from_str_radix(digits, 16).ok()
}

/// Parses a `.hex` file's contents (whitespace-separated `0xHH` tokens) and
/// pads the result with zero up to 256 bytes. Returns `InvalidFile` if any
/// token doesn't parse, or if there are more than 256 tokens.
pub fn load_hex_padded(text: &str) -> Result<Memory, ImageError> {
    let mut bytes = Vec::with_capacity(MEMORY_SIZE);
    for token in text.split_whitespace() {
        let byte = parse_hex_byte(token).ok_or_else(|| ImageError::InvalidFile {
            reason: format!("not a valid 0xHH byte: {token:?}"),
        })?;
        bytes.push(byte);
    }

    if bytes.len() > MEMORY_SIZE {
        return Err(ImageError::InvalidFile {
            reason: format!(
                "hex file has {} bytes, more than {MEMORY_SIZE}",
                bytes.len()
            ),
        });
    }

    bytes.resize(MEMORY_SIZE, 0);
    Ok(bytes.try_into().expect("resized to MEMORY_SIZE"))
}

/// Parses a `.bin` file's raw bytes. Must be exactly 256 bytes.
pub fn load_bin(bytes: &[u8]) -> Result<Memory, ImageError> {
    if bytes.len() != MEMORY_SIZE {
        return Err(ImageError::InvalidFile {
            reason: format!(
                "bin file is {} bytes, expected exactly {MEMORY_SIZE}",
                bytes.len()
            ),
        });
    }
    let mut memory = [0u8; MEMORY_SIZE];
    memory.copy_from_slice(bytes);
    Ok(memory)
}

/// Renders a byte slice as the newline-separated `0xHH` hex dump format
/// the assembler writes (no padding).
pub fn dump_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("0x{b:02X}"))
        .collect::<Vec<_>>()
        .join("\n")
}
