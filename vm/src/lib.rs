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

//! A tight fetch-decode-execute loop over a 256-byte image. This is the
//! fast, directly-observable reference; `sim` models the same semantics at
//! the level of the underlying hardware and the two must agree bit-for-bit.

pub mod errors;

use simple_isa::flags::{self, FlagEffect, Flags};
use simple_isa::image::Memory;
use simple_isa::opcode::Opcode;

use errors::VmError;

#[derive(Debug, Clone)]
pub struct Vm {
    pub memory: Memory,
    pub registers: [u8; simple_isa::NUM_REGISTERS],
    pub flags: Flags,
    pub pc: u8,
    pub halted: bool,
}

impl Vm {
    pub fn new(memory: Memory) -> Self {
        Vm {
            memory,
            registers: [0; simple_isa::NUM_REGISTERS],
            flags: Flags::default(),
            pc: 0,
            halted: false,
        }
    }

    /// Runs until `END` halts execution or an unrecognized opcode is hit.
    pub fn run(&mut self) -> Result<(), VmError> {
        while !self.halted {
            self.step()?;
        }
        Ok(())
    }

    /// Executes exactly one instruction. A no-op once halted.
    pub fn step(&mut self) -> Result<(), VmError> {
        if self.halted {
            return Ok(());
        }

        let pc = self.pc as usize;
        let byte = self.memory[pc];
        let opcode = Opcode::from_byte(byte).ok_or(VmError::InvalidInstruction(byte))?;

        tracing::trace!(
            pc = self.pc,
            opcode = %opcode.mnemonic(),
            registers = ?self.registers,
            "fetch",
        );

        match opcode {
            Opcode::Nop => self.advance(opcode),
            Opcode::End => {
                self.halted = true;
            }
            Opcode::Mov => {
                let (a, b) = self.operand_regs(pc + 1);
                self.registers[a] = self.registers[b];
                self.advance(opcode);
            }
            Opcode::Ldc => {
                let (a, _) = self.operand_regs(pc + 1);
                let imm = self.memory[pc + 2];
                self.registers[a] = imm;
                self.advance(opcode);
            }
            Opcode::Ldm => {
                let (a, b) = self.operand_regs(pc + 1);
                let addr = self.registers[b] as usize;
                self.registers[a] = self.memory[addr];
                self.advance(opcode);
            }
            Opcode::Stm => {
                let (a, b) = self.operand_regs(pc + 1);
                let addr = self.registers[b] as usize;
                self.memory[addr] = self.registers[a];
                self.advance(opcode);
            }
            Opcode::Inc => self.unary(pc, opcode, FlagEffect::Additive, |a| a.wrapping_add(1)),
            Opcode::Dec => self.unary(pc, opcode, FlagEffect::Subtractive, |a| a.wrapping_sub(1)),
            Opcode::Neg => {
                self.unary(pc, opcode, FlagEffect::Other, |a| (a as i8).wrapping_neg() as u8)
            }
            Opcode::Bcm => self.unary(pc, opcode, FlagEffect::Other, |a| !a),
            Opcode::Usr => self.unary(pc, opcode, FlagEffect::Other, |a| (a >> 1) & 0x7F),
            Opcode::Ssr => self.unary(pc, opcode, FlagEffect::Other, |a| (a >> 1) | (a & 0x80)),
            Opcode::Usl => self.unary(pc, opcode, FlagEffect::Other, |a| a.wrapping_shl(1)),
            Opcode::Add => self.binary(pc, opcode, FlagEffect::Additive, |a, b| a.wrapping_add(b)),
            Opcode::Sub => {
                self.binary(pc, opcode, FlagEffect::Subtractive, |a, b| a.wrapping_sub(b))
            }
            Opcode::And => self.binary(pc, opcode, FlagEffect::Other, |a, b| a & b),
            Opcode::Or => self.binary(pc, opcode, FlagEffect::Other, |a, b| a | b),
            Opcode::Cmp => {
                let (ra, rb) = self.operand_regs(pc + 1);
                let a = self.registers[ra];
                let b = self.registers[rb];
                let result = a.wrapping_sub(b);
                self.flags = flags::update(FlagEffect::Subtractive, a, result, self.flags);
                self.advance(opcode);
            }
            Opcode::Jmp => self.pc = self.memory[pc + 1],
            Opcode::Jeq => self.branch_if(pc, opcode, self.flags.zero),
            Opcode::Jul => self.branch_if(pc, opcode, self.flags.carry),
            Opcode::Jug => self.branch_if(pc, opcode, !self.flags.carry && !self.flags.zero),
            Opcode::Jsl => self.branch_if(pc, opcode, self.flags.negative != self.flags.overflow),
            Opcode::Jsg => self.branch_if(
                pc,
                opcode,
                !self.flags.zero && self.flags.negative == self.flags.overflow,
            ),
        }

        Ok(())
    }

    fn operand_regs(&self, at: usize) -> (usize, usize) {
        let byte = self.memory[at];
        (((byte >> 4) & 0xF) as usize, (byte & 0xF) as usize)
    }

    fn advance(&mut self, opcode: Opcode) {
        self.pc = self.pc.wrapping_add(opcode.len() as u8);
    }

    fn unary(&mut self, pc: usize, opcode: Opcode, effect: FlagEffect, f: impl Fn(u8) -> u8) {
        let (reg, _) = self.operand_regs(pc + 1);
        let a = self.registers[reg];
        let result = f(a);
        self.registers[reg] = result;
        self.flags = flags::update(effect, a, result, self.flags);
        self.advance(opcode);
    }

    fn binary(
        &mut self,
        pc: usize,
        opcode: Opcode,
        effect: FlagEffect,
        f: impl Fn(u8, u8) -> u8,
    ) {
        let (ra, rb) = self.operand_regs(pc + 1);
        let a = self.registers[ra];
        let b = self.registers[rb];
        let result = f(a, b);
        self.registers[ra] = result;
        self.flags = flags::update(effect, a, result, self.flags);
        self.advance(opcode);
    }

    fn branch_if(&mut self, pc: usize, opcode: Opcode, condition: bool) {
        if condition {
            self.pc = self.memory[pc + 1];
        } else {
            self.advance(opcode);
        }
    }
}
