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

//! The microcoded Moore FSM's control-signal vocabulary. `MicroOp` is the
//! per-cycle control-signal bundle; `microcode_for` builds an opcode's
//! post-decode control-signal sequence once, factoring out the "fetch a
//! byte and latch it" shape every multi-byte instruction shares instead of
//! writing it out per opcode.

use simple_isa::alu::AluOp;
use simple_isa::opcode::Opcode;

/// Selects the ALU's `A` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluSelA {
    Pc,
    Mdr,
    RegA,
}

/// Selects the ALU's `B` input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluSelB {
    RegB,
    One,
}

/// The control-signal bundle the controller drives for one cycle, plus
/// the destination register file port used for this cycle's `RegFile`
/// read/write (always port selection `A` for writes; both ports are
/// always read).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MicroOp {
    pub alu_sel_a: Option<AluSelA>,
    pub alu_sel_b: Option<AluSelB>,
    pub alu_op: Option<AluOp>,
    pub ld_mar: bool,
    pub ld_pc: bool,
    pub ld_ir: bool,
    pub ld_reg: bool,
    pub ld_mdr: bool,
    pub ld_flags: bool,
    pub mem_read: bool,
    pub mem_write: bool,
}

/// `MAR ← PC`; shared by every fetch and operand-fetch sequence.
fn mar_from_pc() -> MicroOp {
    MicroOp {
        alu_sel_a: Some(AluSelA::Pc),
        alu_op: Some(AluOp::PassA),
        ld_mar: true,
        ..Default::default()
    }
}

/// `MemRead=1; PC ← PC+1`; shared by every fetch and operand-fetch
/// sequence.
fn read_and_advance_pc() -> MicroOp {
    MicroOp {
        mem_read: true,
        alu_sel_a: Some(AluSelA::Pc),
        alu_sel_b: Some(AluSelB::One),
        alu_op: Some(AluOp::Add),
        ld_pc: true,
        ..Default::default()
    }
}

/// `IR ← MDR`; the third microstep of the instruction fetch, and of any
/// instruction's operand-byte fetch.
fn load_ir_from_mdr() -> MicroOp {
    MicroOp {
        alu_sel_a: Some(AluSelA::Mdr),
        alu_op: Some(AluOp::PassA),
        ld_ir: true,
        ..Default::default()
    }
}

/// The three-microstep sequence that fetches one byte at `PC` and
/// latches it into `IR`. Used both for the instruction fetch itself
/// (`FETCH_0..2`) and, reused verbatim, for every instruction's operand
/// byte.
pub fn fetch_sequence() -> [MicroOp; 3] {
    [mar_from_pc(), read_and_advance_pc(), load_ir_from_mdr()]
}

fn execute_unary(op: AluOp) -> MicroOp {
    MicroOp {
        alu_sel_a: Some(AluSelA::RegA),
        alu_op: Some(op),
        ld_reg: true,
        ld_flags: true,
        ..Default::default()
    }
}

fn execute_binary(op: AluOp) -> MicroOp {
    MicroOp {
        alu_sel_a: Some(AluSelA::RegA),
        alu_sel_b: Some(AluSelB::RegB),
        alu_op: Some(op),
        ld_reg: true,
        ld_flags: true,
        ..Default::default()
    }
}

/// The three-microstep `MAR ← PC; MemRead+PC++; PC ← MDR` sequence used
/// by `JMP` and by any taken conditional jump.
pub fn jump_sequence() -> [MicroOp; 3] {
    [
        mar_from_pc(),
        read_and_advance_pc(),
        MicroOp {
            alu_sel_a: Some(AluSelA::Mdr),
            alu_op: Some(AluOp::PassA),
            ld_pc: true,
            ..Default::default()
        },
    ]
}

/// A condition-only jump's untaken path: `PC ← PC+1`, one cycle.
pub fn untaken_jump_advance() -> MicroOp {
    read_and_advance_pc()
}

/// Builds the full post-decode microcode sequence for a non-branching
/// opcode. `Jmp`/the conditional jumps are handled separately by
/// `Simulation::decode` since their length depends on the branch outcome.
pub fn microcode_for(opcode: Opcode) -> Vec<MicroOp> {
    match opcode {
        Opcode::Nop | Opcode::End => Vec::new(),
        Opcode::Mov => {
            let mut ops = fetch_sequence().to_vec();
            ops.push(execute_binary(AluOp::PassB));
            ops
        }
        Opcode::Ldc => {
            let mut ops = fetch_sequence().to_vec();
            ops.push(mar_from_pc());
            ops.push(read_and_advance_pc());
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::Mdr),
                alu_op: Some(AluOp::PassA),
                ld_reg: true,
                ..Default::default()
            });
            ops
        }
        Opcode::Ldm => {
            let mut ops = fetch_sequence().to_vec();
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::RegA),
                alu_sel_b: Some(AluSelB::RegB),
                alu_op: Some(AluOp::PassB),
                ld_mar: true,
                ..Default::default()
            });
            ops.push(MicroOp { mem_read: true, ..Default::default() });
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::Mdr),
                alu_op: Some(AluOp::PassA),
                ld_reg: true,
                ..Default::default()
            });
            ops
        }
        Opcode::Stm => {
            let mut ops = fetch_sequence().to_vec();
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::RegA),
                alu_sel_b: Some(AluSelB::RegB),
                alu_op: Some(AluOp::PassB),
                ld_mar: true,
                ..Default::default()
            });
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::RegA),
                alu_op: Some(AluOp::PassA),
                ld_mdr: true,
                ..Default::default()
            });
            ops.push(MicroOp { mem_write: true, ..Default::default() });
            ops
        }
        // INC/DEC have no dedicated ALU op; they reuse ADD/SUB with B=ONE.
        Opcode::Inc => tail(MicroOp {
            alu_sel_a: Some(AluSelA::RegA),
            alu_sel_b: Some(AluSelB::One),
            alu_op: Some(AluOp::Add),
            ld_reg: true,
            ld_flags: true,
            ..Default::default()
        }),
        Opcode::Dec => tail(MicroOp {
            alu_sel_a: Some(AluSelA::RegA),
            alu_sel_b: Some(AluSelB::One),
            alu_op: Some(AluOp::Sub),
            ld_reg: true,
            ld_flags: true,
            ..Default::default()
        }),
        Opcode::Neg => tail(execute_unary(AluOp::NegA)),
        Opcode::Bcm => tail(execute_unary(AluOp::BcmA)),
        Opcode::Usr => tail(execute_unary(AluOp::UsrA)),
        Opcode::Ssr => tail(execute_unary(AluOp::SsrA)),
        Opcode::Usl => tail(execute_unary(AluOp::UslA)),
        Opcode::Add => tail(execute_binary(AluOp::Add)),
        Opcode::Sub => tail(execute_binary(AluOp::Sub)),
        Opcode::And => tail(execute_binary(AluOp::And)),
        Opcode::Or => tail(execute_binary(AluOp::Or)),
        Opcode::Cmp => {
            let mut ops = fetch_sequence().to_vec();
            ops.push(MicroOp {
                alu_sel_a: Some(AluSelA::RegA),
                alu_sel_b: Some(AluSelB::RegB),
                alu_op: Some(AluOp::Sub),
                ld_flags: true,
                ..Default::default()
            });
            ops
        }
        Opcode::Jmp => jump_sequence().to_vec(),
        Opcode::Jeq | Opcode::Jul | Opcode::Jug | Opcode::Jsl | Opcode::Jsg => {
            // Branch-dependent length; Simulation::decode resolves this
            // against the current flags instead of reading it from here.
            Vec::new()
        }
    }
}

fn tail(execute: MicroOp) -> Vec<MicroOp> {
    let mut ops = fetch_sequence().to_vec();
    ops.push(execute);
    ops
}
