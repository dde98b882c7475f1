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

//! Shared ISA definitions for the SIMPLE-ISA toolchain: opcodes, instruction
//! shapes, condition flags, ALU operations, and the 256-byte memory image
//! format. `asm`, `vm`, and `sim` all depend on this crate independently so
//! the three tools agree on the bit-exact byte stream and flag semantics.

pub mod alu;
pub mod error;
pub mod flags;
pub mod image;
pub mod io;
pub mod opcode;
pub mod shape;

pub use alu::AluOp;
pub use flags::Flags;
pub use image::{Memory, MEMORY_SIZE};
pub use opcode::Opcode;
pub use shape::Shape;

/// Number of addressable registers in the register file (`r0`..`r15`).
pub const NUM_REGISTERS: usize = 16;
