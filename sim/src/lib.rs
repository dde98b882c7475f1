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

//! The cycle-accurate datapath simulator. `Simulation` owns every hardware
//! element directly (no process-global registry) and drives them through
//! combinational evaluation → `transition` in a fixed, data-dependency
//! order each `step`.

pub mod controller;
pub mod elements;
pub mod errors;

use controller::{AluSelA, AluSelB, MicroOp};
use elements::{Alu, Memory, Mux, RegFile, Register};
use simple_isa::flags::Flags;
use simple_isa::opcode::Opcode;

use errors::SimError;

/// The controller's state tag: `HALT`, `FETCH_0..2`, and one
/// `(opcode, micro_step)` pair per in-flight instruction. Decode is not a
/// distinct clocked state here: by the time `Fetch2`'s cycle edge latches
/// `IR`, the opcode byte is already known, so dispatch happens in the
/// same cycle rather than consuming one of its own. This keeps "3 + K
/// cycles per instruction" exact instead of off-by-one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum State {
    Fetch0,
    Fetch1,
    Fetch2,
    Halt,
    Executing { opcode: Opcode, microcode: Vec<MicroOp>, index: usize },
}

impl State {
    /// A short label for tracing, mirroring the state tag's components.
    pub fn label(&self) -> String {
        match self {
            State::Fetch0 => "FETCH_0".to_string(),
            State::Fetch1 => "FETCH_1".to_string(),
            State::Fetch2 => "FETCH_2".to_string(),
            State::Halt => "HALT".to_string(),
            State::Executing { opcode, index, .. } => {
                format!("{}_{}", opcode.mnemonic(), index)
            }
        }
    }
}

pub struct Simulation {
    memory: Memory,
    regfile: RegFile,
    pc: Register,
    mar: Register,
    mdr: Register,
    ir: Register,
    flags: Flags,
    state: State,
    pub cycle_count: u64,
}

impl Simulation {
    pub fn new(image: simple_isa::Memory) -> Self {
        Simulation {
            memory: Memory::new(image),
            regfile: RegFile::new(),
            pc: Register::new(),
            mar: Register::new(),
            mdr: Register::new(),
            ir: Register::new(),
            flags: Flags::default(),
            state: State::Fetch0,
            cycle_count: 0,
        }
    }

    pub fn halted(&self) -> bool {
        self.state == State::Halt
    }

    pub fn pc(&self) -> u8 {
        self.pc.read().unwrap_or(0)
    }

    pub fn flags(&self) -> Flags {
        self.flags
    }

    pub fn registers(&self) -> [u8; simple_isa::NUM_REGISTERS] {
        std::array::from_fn(|i| self.regfile.read_ports(((i as u8) << 4) | 0).0.unwrap_or(0))
    }

    pub fn memory(&self) -> simple_isa::Memory {
        self.memory.snapshot()
    }

    pub fn state_label(&self) -> String {
        self.state.label()
    }

    /// Runs every element through one clock cycle: computes this cycle's
    /// control signals and combinational values, latches them, and
    /// advances the controller. A no-op once halted.
    pub fn step(&mut self) -> Result<(), SimError> {
        if self.halted() {
            return Ok(());
        }

        let microop = self.current_microop();
        self.run_microop(&microop)?;
        self.cycle_count += 1;
        self.advance_state()?;

        Ok(())
    }

    pub fn run(&mut self) -> Result<(), SimError> {
        while !self.halted() {
            self.step()?;
        }
        Ok(())
    }

    /// Runs to completion, calling `observer` with the simulation's state
    /// before every cycle (and once more after the final one). Exposed for
    /// an eventual interactive step-debugger; no such UI ships here.
    pub fn run_with_observer<F: FnMut(&Simulation)>(&mut self, mut observer: F) -> Result<(), SimError> {
        while !self.halted() {
            observer(self);
            self.step()?;
        }
        observer(self);
        Ok(())
    }

    fn current_microop(&self) -> MicroOp {
        match &self.state {
            State::Fetch0 => controller::fetch_sequence()[0],
            State::Fetch1 => controller::fetch_sequence()[1],
            State::Fetch2 => controller::fetch_sequence()[2],
            State::Halt => MicroOp::default(),
            State::Executing { microcode, index, .. } => microcode[*index],
        }
    }

    /// Evaluates the combinational datapath for `microop` and latches
    /// every element's next value (the cycle edge). Does not move the
    /// controller's own state forward; `advance_state` does that using
    /// the post-edge register contents.
    fn run_microop(&mut self, microop: &MicroOp) -> Result<(), SimError> {
        let ir_sel = self.ir.read().unwrap_or(0);
        let (reg_a, reg_b) = self.regfile.read_ports(ir_sel);

        let alu_a = Mux::select(
            microop.alu_sel_a.map(|sel| match sel {
                AluSelA::Pc => 0,
                AluSelA::Mdr => 1,
                AluSelA::RegA => 2,
            }),
            &[self.pc.read(), self.mdr.read(), reg_a],
        );
        let alu_b = Mux::select(
            microop.alu_sel_b.map(|sel| match sel {
                AluSelB::RegB => 0,
                AluSelB::One => 1,
            }),
            &[reg_b, Some(1)],
        );

        let (alu_out, alu_flags) = Alu::evaluate(microop.alu_op, alu_a, alu_b, self.flags);

        let addr = self.mar.read();
        let mem_data = self.memory.read(addr);

        self.pc.update(Some(microop.ld_pc), alu_out);
        self.mar.update(Some(microop.ld_mar), alu_out);
        self.ir.update(Some(microop.ld_ir), alu_out);
        self.regfile.update(self.ir.read(), alu_out, Some(microop.ld_reg));

        let mdr_enable = microop.mem_read || microop.ld_mdr;
        let mdr_data = if microop.mem_read { mem_data } else { alu_out };
        self.mdr.update(Some(mdr_enable), mdr_data);

        self.memory.update(addr, Some(microop.mem_write), self.mdr.read());

        if microop.ld_flags {
            if let Some(flags) = alu_flags {
                self.flags = flags;
            }
        }

        self.pc.transition();
        self.mar.transition();
        self.ir.transition();
        self.mdr.transition();
        self.regfile.transition();
        self.memory.transition();

        Ok(())
    }

    fn advance_state(&mut self) -> Result<(), SimError> {
        match self.state.clone() {
            State::Fetch0 => self.state = State::Fetch1,
            State::Fetch1 => self.state = State::Fetch2,
            State::Fetch2 => self.decode()?,
            State::Halt => self.state = State::Halt,
            State::Executing { opcode, microcode, index } => {
                self.state = if index + 1 < microcode.len() {
                    State::Executing { opcode, microcode, index: index + 1 }
                } else {
                    State::Fetch0
                };
            }
        }
        Ok(())
    }

    /// Dispatches on the just-latched `IR` to the opcode's state, or to
    /// `HALT`/back to `FETCH_0` for `END`/`NOP`.
    fn decode(&mut self) -> Result<(), SimError> {
        let byte = self.ir.read().ok_or(SimError::InvalidInstruction(0))?;
        let opcode = Opcode::from_byte(byte).ok_or(SimError::InvalidInstruction(byte))?;

        tracing::trace!(opcode = %opcode.mnemonic(), pc = self.pc(), "decode");

        self.state = match opcode {
            Opcode::Nop => State::Fetch0,
            Opcode::End => State::Halt,
            Opcode::Jeq => self.conditional_state(opcode, self.flags.zero),
            Opcode::Jul => self.conditional_state(opcode, self.flags.carry),
            Opcode::Jug => self.conditional_state(opcode, !self.flags.carry && !self.flags.zero),
            Opcode::Jsl => self.conditional_state(opcode, self.flags.negative != self.flags.overflow),
            Opcode::Jsg => self.conditional_state(
                opcode,
                !self.flags.zero && self.flags.negative == self.flags.overflow,
            ),
            other => State::Executing { opcode, microcode: controller::microcode_for(other), index: 0 },
        };

        Ok(())
    }

    fn conditional_state(&self, opcode: Opcode, taken: bool) -> State {
        State::Executing { opcode, microcode: self.conditional_microcode(taken), index: 0 }
    }

    fn conditional_microcode(&self, taken: bool) -> Vec<MicroOp> {
        if taken {
            controller::jump_sequence().to_vec()
        } else {
            vec![controller::untaken_jump_advance()]
        }
    }
}
