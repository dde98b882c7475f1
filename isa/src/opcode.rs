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

use crate::shape::Shape;

/// One of the 24 SIMPLE-ISA opcodes. The discriminant values below are the
/// single source of truth for the encoding table: every component
/// (assembler, VM, simulator) goes through `Opcode::code` /
/// `Opcode::from_byte` rather than hard-coding the hex constants again.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Opcode {
    Nop,
    End,
    Mov,
    Ldc,
    Ldm,
    Stm,
    Inc,
    Dec,
    Neg,
    Bcm,
    Usr,
    Ssr,
    Usl,
    Add,
    Sub,
    And,
    Or,
    Cmp,
    Jmp,
    Jeq,
    Jul,
    Jug,
    Jsl,
    Jsg,
}

impl Opcode {
    /// All opcodes, in encoding-table order.
    pub const ALL: [Opcode; 24] = [
        Opcode::Nop,
        Opcode::End,
        Opcode::Mov,
        Opcode::Ldc,
        Opcode::Ldm,
        Opcode::Stm,
        Opcode::Inc,
        Opcode::Dec,
        Opcode::Neg,
        Opcode::Bcm,
        Opcode::Usr,
        Opcode::Ssr,
        Opcode::Usl,
        Opcode::Add,
        Opcode::Sub,
        Opcode::And,
        Opcode::Or,
        Opcode::Cmp,
        Opcode::Jmp,
        Opcode::Jeq,
        Opcode::Jul,
        Opcode::Jug,
        Opcode::Jsl,
        Opcode::Jsg,
    ];

    pub fn code(self) -> u8 {
        match self {
            Opcode::Nop => 0x00,
            Opcode::End => 0xFF,
            Opcode::Mov => 0xD0,
            Opcode::Ldc => 0xD1,
            Opcode::Ldm => 0xD2,
            Opcode::Stm => 0xD3,
            Opcode::Inc => 0xA0,
            Opcode::Dec => 0xA1,
            Opcode::Neg => 0xA2,
            Opcode::Bcm => 0xA3,
            Opcode::Usr => 0xA4,
            Opcode::Ssr => 0xA5,
            Opcode::Usl => 0xA6,
            Opcode::Add => 0xA7,
            Opcode::Sub => 0xA8,
            Opcode::And => 0xA9,
            Opcode::Or => 0xAA,
            Opcode::Cmp => 0xAB,
            Opcode::Jmp => 0xB0,
            Opcode::Jeq => 0xB1,
            Opcode::Jul => 0xB2,
            Opcode::Jug => 0xB3,
            Opcode::Jsl => 0xB4,
            Opcode::Jsg => 0xB5,
        }
    }

    pub fn from_byte(byte: u8) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.code() == byte)
    }

    /// The case-sensitive, upper-case mnemonic as it appears in source text.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "NOP",
            Opcode::End => "END",
            Opcode::Mov => "MOV",
            Opcode::Ldc => "LDC",
            Opcode::Ldm => "LDM",
            Opcode::Stm => "STM",
            Opcode::Inc => "INC",
            Opcode::Dec => "DEC",
            Opcode::Neg => "NEG",
            Opcode::Bcm => "BCM",
            Opcode::Usr => "USR",
            Opcode::Ssr => "SSR",
            Opcode::Usl => "USL",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::And => "AND",
            Opcode::Or => "OR",
            Opcode::Cmp => "CMP",
            Opcode::Jmp => "JMP",
            Opcode::Jeq => "JEQ",
            Opcode::Jul => "JUL",
            Opcode::Jug => "JUG",
            Opcode::Jsl => "JSL",
            Opcode::Jsg => "JSG",
        }
    }

    pub fn from_mnemonic(text: &str) -> Option<Opcode> {
        Opcode::ALL.into_iter().find(|op| op.mnemonic() == text)
    }

    pub fn shape(self) -> Shape {
        match self {
            Opcode::Nop | Opcode::End => Shape::None,
            Opcode::Inc
            | Opcode::Dec
            | Opcode::Neg
            | Opcode::Bcm
            | Opcode::Usr
            | Opcode::Ssr
            | Opcode::Usl => Shape::Reg,
            Opcode::Mov
            | Opcode::Add
            | Opcode::Sub
            | Opcode::And
            | Opcode::Or
            | Opcode::Cmp
            | Opcode::Ldm
            | Opcode::Stm => Shape::RegReg,
            Opcode::Ldc => Shape::RegConst,
            Opcode::Jmp | Opcode::Jeq | Opcode::Jul | Opcode::Jug | Opcode::Jsl | Opcode::Jsg => {
                Shape::Const
            }
        }
    }

    /// Total encoded length in bytes, including the opcode byte itself.
    pub fn len(self) -> usize {
        self.shape().encoded_len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips_through_from_byte() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_byte(op.code()), Some(op));
        }
    }

    #[test]
    fn mnemonic_round_trips_through_from_mnemonic() {
        for op in Opcode::ALL {
            assert_eq!(Opcode::from_mnemonic(op.mnemonic()), Some(op));
        }
    }

    #[test]
    fn unknown_byte_is_none() {
        assert_eq!(Opcode::from_byte(0x01), None);
        assert_eq!(Opcode::from_byte(0xC0), None);
    }

    #[test]
    fn shapes_match_spec_table() {
        assert_eq!(Opcode::Nop.shape(), Shape::None);
        assert_eq!(Opcode::Inc.shape(), Shape::Reg);
        assert_eq!(Opcode::Mov.shape(), Shape::RegReg);
        assert_eq!(Opcode::Ldc.shape(), Shape::RegConst);
        assert_eq!(Opcode::Jmp.shape(), Shape::Const);
    }
}
