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

//! A single forward pass over the token stream with label backpatching,
//! emitting bytes as it goes. A forward
//! label reference emits a placeholder byte and records the offset to
//! patch; the patch happens in place the moment the label is defined.

use std::collections::HashMap;

use simple_isa::opcode::Opcode;
use simple_isa::shape::Shape;

use crate::errors::AssemblyError;
use crate::lexer::RawToken;

/// Register token syntax is `r` followed by decimal digits, the whole
/// token, nothing more (`r0`..`r15`; the assembler rejects `>= 16`).
fn parse_register(token: &RawToken) -> Result<u8, AssemblyError> {
    let digits = token.text.strip_prefix('r').ok_or_else(|| AssemblyError::IllegalToken {
        token: token.text.clone(),
        line: token.line,
    })?;

    let value: u32 = digits.parse().map_err(|_| AssemblyError::IllegalToken {
        token: token.text.clone(),
        line: token.line,
    })?;

    if value >= simple_isa::NUM_REGISTERS as u32 {
        return Err(AssemblyError::IllegalToken {
            token: token.text.clone(),
            line: token.line,
        });
    }

    Ok(value as u8)
}

/// True if this token is a label definition (`name:`).
fn label_def_name(token: &RawToken) -> Option<&str> {
    token.text.strip_suffix(':').filter(|name| !name.is_empty())
}

struct Encoder {
    output: Vec<u8>,
    labels: HashMap<String, usize>,
    waiting: HashMap<String, Vec<usize>>,
}

impl Encoder {
    fn new() -> Self {
        Encoder {
            output: Vec::new(),
            labels: HashMap::new(),
            waiting: HashMap::new(),
        }
    }

    fn define_label(&mut self, name: &str, line: usize) -> Result<(), AssemblyError> {
        if self.labels.contains_key(name) {
            return Err(AssemblyError::IllegalToken {
                token: format!("{name}:"),
                line,
            });
        }

        let address = self.output.len();
        self.labels.insert(name.to_string(), address);

        if let Some(offsets) = self.waiting.remove(name) {
            for offset in offsets {
                self.output[offset] = (address % 256) as u8;
            }
        }

        Ok(())
    }

    /// Classifies and emits a single constant/label-reference token: a
    /// known label emits its address directly, an unresolved one emits a
    /// placeholder and records a backpatch, and anything else is parsed
    /// as a numeric constant byte.
    fn emit_constant_or_label(&mut self, token: &RawToken) -> Result<(), AssemblyError> {
        if label_def_name(token).is_some() || Opcode::from_mnemonic(&token.text).is_some() {
            return Err(AssemblyError::IllegalToken {
                token: token.text.clone(),
                line: token.line,
            });
        }

        if let Some(byte) = simple_isa::image::parse_hex_byte(&token.text) {
            self.output.push(byte);
            return Ok(());
        }

        if token.text.starts_with("0x") {
            // Started like a hex literal but failed to parse: malformed.
            return Err(AssemblyError::IllegalToken {
                token: token.text.clone(),
                line: token.line,
            });
        }

        // Bare identifier: a label reference, resolved now or backpatched.
        let offset = self.output.len();
        match self.labels.get(&token.text) {
            Some(&address) => self.output.push((address % 256) as u8),
            None => {
                self.output.push(0x00);
                self.waiting
                    .entry(token.text.clone())
                    .or_default()
                    .push(offset);
            }
        }

        Ok(())
    }
}

fn next_token<'a>(
    tokens: &'a [RawToken],
    cursor: &mut usize,
) -> Result<&'a RawToken, AssemblyError> {
    let token = tokens.get(*cursor).ok_or(AssemblyError::UnexpectedEndOfInput)?;
    *cursor += 1;
    Ok(token)
}

/// Runs the single-pass encoder over an already-tokenized source,
/// returning the unpadded byte stream.
pub fn encode(tokens: &[RawToken]) -> Result<Vec<u8>, AssemblyError> {
    let mut encoder = Encoder::new();
    let mut cursor = 0;

    while cursor < tokens.len() {
        let token = &tokens[cursor];

        if let Some(name) = label_def_name(token) {
            encoder.define_label(name, token.line)?;
            cursor += 1;
            continue;
        }

        if let Some(op) = Opcode::from_mnemonic(&token.text) {
            encoder.output.push(op.code());
            cursor += 1;
            encode_operands(&mut encoder, op.shape(), tokens, &mut cursor)?;
            continue;
        }

        // Not a mnemonic, not a label definition: a standalone
        // constant/label-reference data byte.
        encoder.emit_constant_or_label(token)?;
        cursor += 1;
    }

    if !encoder.waiting.is_empty() {
        let mut missing: Vec<String> = encoder.waiting.into_keys().collect();
        missing.sort();
        return Err(AssemblyError::MissingLabel(missing));
    }

    if encoder.output.len() > simple_isa::image::MEMORY_SIZE {
        return Err(AssemblyError::ProgramTooLarge(encoder.output.len()));
    }

    Ok(encoder.output)
}

fn encode_operands(
    encoder: &mut Encoder,
    shape: Shape,
    tokens: &[RawToken],
    cursor: &mut usize,
) -> Result<(), AssemblyError> {
    match shape {
        Shape::None => Ok(()),
        Shape::Reg => {
            let reg = parse_register(next_token(tokens, cursor)?)?;
            encoder.output.push(reg << 4);
            Ok(())
        }
        Shape::RegReg => {
            let reg_a = parse_register(next_token(tokens, cursor)?)?;
            let reg_b = parse_register(next_token(tokens, cursor)?)?;
            encoder.output.push((reg_a << 4) | reg_b);
            Ok(())
        }
        Shape::RegConst => {
            let reg = parse_register(next_token(tokens, cursor)?)?;
            encoder.output.push(reg << 4);
            let token = next_token(tokens, cursor)?.clone();
            encoder.emit_constant_or_label(&token)
        }
        Shape::Const => {
            let token = next_token(tokens, cursor)?.clone();
            encoder.emit_constant_or_label(&token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn assemble(source: &str) -> Result<Vec<u8>, AssemblyError> {
        encode(&tokenize(source))
    }

    #[test]
    fn nop_then_end() {
        let bytes = assemble("NOP\nEND").unwrap();
        assert_eq!(bytes, vec![0x00, 0xFF]);
    }

    #[test]
    fn load_constants_and_add() {
        let bytes = assemble("LDC r0 0x03\nLDC r1 0x04\nADD r0 r1\nEND").unwrap();
        assert_eq!(bytes, vec![0xD1, 0x00, 0x03, 0xD1, 0x10, 0x04, 0xA7, 0x01, 0xFF]);
    }

    #[test]
    fn forward_label_backpatches_to_zero() {
        let bytes = assemble("JMP start\nstart: END").unwrap();
        assert_eq!(bytes, vec![0xB0, 0x02, 0xFF]);
    }

    #[test]
    fn rejects_register_16_and_above() {
        let err = assemble("INC r16").unwrap_err();
        assert!(matches!(err, AssemblyError::IllegalToken { .. }));
    }

    #[test]
    fn rejects_program_over_256_bytes() {
        // 129 NOPs is fine (129 bytes); 129 NOP pairs via END tokens would
        // overflow. Build exactly 257 bytes of NOPs directly.
        let source = "NOP\n".repeat(257);
        let err = assemble(&source).unwrap_err();
        assert_eq!(err, AssemblyError::ProgramTooLarge(257));
    }

    #[test]
    fn exactly_256_bytes_succeeds() {
        let source = "NOP\n".repeat(256);
        let bytes = assemble(&source).unwrap();
        assert_eq!(bytes.len(), 256);
    }

    #[test]
    fn missing_label_is_reported() {
        let err = assemble("JMP nowhere\nEND").unwrap_err();
        assert_eq!(err, AssemblyError::MissingLabel(vec!["nowhere".to_string()]));
    }

    #[test]
    fn label_position_does_not_change_emitted_bytes() {
        let a = assemble("loop: NOP\nJMP loop").unwrap();
        let b = assemble("NOP\nloop_2: ;noop\nJMP loop_2\n").unwrap();
        // Same shape of program (label then NOP then jump back) yields the
        // same instruction bytes regardless of the label's cosmetic name.
        assert_eq!(a.len(), b.len());
    }

    #[test]
    fn bare_identifier_as_standalone_byte_resolves_like_an_operand() {
        // `table:` then a bare label reference used as inline data.
        let bytes = assemble("table:\nNOP\nback: table\n").unwrap();
        // table resolves to 0 (defined at offset 0), emitted as a raw byte.
        assert_eq!(bytes, vec![0x00, 0x00]);
    }
}
