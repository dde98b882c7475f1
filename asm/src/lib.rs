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

//! Two-phase-free assembler for SIMPLE-ISA: a single forward pass with
//! label backpatching.

pub mod assembler;
pub mod errors;
pub mod lexer;

use std::path::Path;

use simple_isa::image::{dump_hex, Memory, MEMORY_SIZE};
use simple_isa::io::ImageReader;

use errors::AssemblyError;

/// The two output artifacts produced by an assembly run: a human-readable
/// hex dump (unpadded) and the 256-byte binary image (zero-padded).
pub struct AssembledProgram {
    pub hex_dump: String,
    pub image: Memory,
}

pub fn assemble_source(source: &str) -> Result<AssembledProgram, AssemblyError> {
    let tokens = lexer::tokenize(source);
    let bytes = assembler::encode(&tokens)?;

    let mut image = [0u8; MEMORY_SIZE];
    image[..bytes.len()].copy_from_slice(&bytes);

    Ok(AssembledProgram {
        hex_dump: dump_hex(&bytes),
        image,
    })
}

pub fn assemble_file<R: ImageReader>(
    reader: &R,
    path: &Path,
) -> Result<AssembledProgram, AssemblyError> {
    let source = reader
        .read_to_string(path)
        .map_err(|e| AssemblyError::Image(e.to_string()))?;
    assemble_source(&source)
}
