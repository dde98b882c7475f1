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

//! The four condition bits and the quirky update rule that both the VM and
//! the simulator's ALU must apply identically.

pub const ZERO_BIT: u8 = 0b1000;
pub const CARRY_BIT: u8 = 0b0100;
pub const OVERFLOW_BIT: u8 = 0b0010;
pub const NEGATIVE_BIT: u8 = 0b0001;

/// Packed as `ZERO(bit3), CARRY(bit2), OVERFLOW(bit1), NEGATIVE(bit0)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Flags {
    pub zero: bool,
    pub carry: bool,
    pub overflow: bool,
    pub negative: bool,
}

impl Flags {
    pub fn to_byte(self) -> u8 {
        (u8::from(self.zero) << 3)
            | (u8::from(self.carry) << 2)
            | (u8::from(self.overflow) << 1)
            | u8::from(self.negative)
    }

    pub fn from_byte(byte: u8) -> Flags {
        Flags {
            zero: byte & ZERO_BIT != 0,
            carry: byte & CARRY_BIT != 0,
            overflow: byte & OVERFLOW_BIT != 0,
            negative: byte & NEGATIVE_BIT != 0,
        }
    }
}

/// Whether a flag-affecting operation treats its result as the additive or
/// subtractive family for the purposes of the carry/overflow quirk. `Other`
/// covers operations (BCM, AND, OR, the shifts) that update zero/negative
/// but never touch carry/overflow even when the sign bit flips.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FlagEffect {
    Additive,
    Subtractive,
    Other,
}

/// Applies the quirky flag-update rule: zero and negative always follow
/// the result; carry and overflow only change when
/// the sign bit of the primary operand flipped between `a` (before) and
/// `result` (after), and even then only for the additive/subtractive
/// families. Otherwise carry/overflow retain their previous value.
///
/// `a` and `result` are taken mod 256 by the caller (both the VM and the
/// simulator's ALU already operate on `u8`, so no masking happens here).
pub fn update(effect: FlagEffect, a: u8, result: u8, prev: Flags) -> Flags {
    let mut flags = prev;
    flags.zero = result == 0;
    flags.negative = result & 0x80 != 0;

    let sign_flipped = (a & 0x80) != (result & 0x80);
    if sign_flipped {
        match effect {
            FlagEffect::Additive => {
                flags.carry = result < a;
                flags.overflow = result > a;
            }
            FlagEffect::Subtractive => {
                flags.carry = result > a;
                flags.overflow = result < a;
            }
            FlagEffect::Other => {}
        }
    }

    flags
}
