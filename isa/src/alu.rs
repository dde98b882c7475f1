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

use crate::flags::{self, FlagEffect, Flags};

/// The 11 selector values the simulator's ALU understands.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AluOp {
    PassA,
    PassB,
    NegA,
    BcmA,
    UsrA,
    SsrA,
    UslA,
    Add,
    Sub,
    And,
    Or,
}

impl AluOp {
    pub const NUM_ALU_OPS: usize = 11;

    pub fn selector(self) -> u8 {
        match self {
            AluOp::PassA => 0,
            AluOp::PassB => 1,
            AluOp::NegA => 2,
            AluOp::BcmA => 3,
            AluOp::UsrA => 4,
            AluOp::SsrA => 5,
            AluOp::UslA => 6,
            AluOp::Add => 7,
            AluOp::Sub => 8,
            AluOp::And => 9,
            AluOp::Or => 10,
        }
    }

    fn flag_effect(self) -> FlagEffect {
        match self {
            AluOp::Add => FlagEffect::Additive,
            AluOp::Sub => FlagEffect::Subtractive,
            _ => FlagEffect::Other,
        }
    }
}

/// Combinational ALU evaluation. Inputs and output are `Option<u8>` so the
/// simulator's wires can carry "unknown" (`None`) and have it propagate
/// exactly like an unwired control path. Returns the 8-bit result and the
/// packed flag nibble, or `None` for either when an input is unknown.
pub fn compute(op: AluOp, a: Option<u8>, b: Option<u8>, prev_flags: Flags) -> (Option<u8>, Option<Flags>) {
    let result = match op {
        AluOp::PassA => a,
        AluOp::PassB => b,
        AluOp::NegA => a.map(|a| (a as i8).wrapping_neg() as u8),
        AluOp::BcmA => a.map(|a| !a),
        AluOp::UsrA => a.map(|a| (a >> 1) & 0x7F),
        AluOp::SsrA => a.map(|a| (a >> 1) | (a & 0x80)),
        AluOp::UslA => a.map(|a| a.wrapping_shl(1)),
        AluOp::Add => match (a, b) {
            (Some(a), Some(b)) => Some(a.wrapping_add(b)),
            _ => None,
        },
        AluOp::Sub => match (a, b) {
            (Some(a), Some(b)) => Some(a.wrapping_sub(b)),
            _ => None,
        },
        AluOp::And => match (a, b) {
            (Some(a), Some(b)) => Some(a & b),
            _ => None,
        },
        AluOp::Or => match (a, b) {
            (Some(a), Some(b)) => Some(a | b),
            _ => None,
        },
    };

    let out_flags = match (a, result) {
        (Some(a), Some(result)) => Some(flags::update(op.flag_effect(), a, result, prev_flags)),
        _ => None,
    };

    (result, out_flags)
}
