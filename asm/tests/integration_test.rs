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

use simple_isa_asm::errors::AssemblyError;
use simple_isa_asm::{assemble_file, assemble_source};
use simple_isa::io::MockImageReader;
use std::path::Path;

#[test]
fn scenario_nop_then_end() {
    let program = assemble_source("NOP\nEND").unwrap();
    assert_eq!(&program.image[..2], &[0x00, 0xFF]);
    assert!(program.image[2..].iter().all(|&b| b == 0));
}

#[test]
fn scenario_load_constants_and_add() {
    let program = assemble_source(
        "LDC r0 0x03\n\
         LDC r1 0x04\n\
         ADD r0 r1\n\
         END\n",
    )
    .unwrap();
    assert_eq!(
        &program.image[..9],
        &[0xD1, 0x00, 0x03, 0xD1, 0x10, 0x04, 0xA7, 0x01, 0xFF]
    );
}

#[test]
fn scenario_unsigned_overflow() {
    let program = assemble_source("LDC r0 0xFF\nINC r0\nEND").unwrap();
    assert_eq!(&program.image[..6], &[0xD1, 0x00, 0xFF, 0xA0, 0x00, 0xFF]);
}

#[test]
fn scenario_signed_compare_and_jump() {
    let source = "\
        LDC r0 0x01\n\
        LDC r1 0xFF\n\
        CMP r0 r1\n\
        JSG greater\n\
        LDC r2 0x00\n\
        JMP done\n\
        greater: LDC r2 0xAA\n\
        done: END\n";

    let program = assemble_source(source).unwrap();
    assert_eq!(program.image[0], 0xD1); // LDC r0 0x01
    assert_eq!(program.image[6], 0xAB); // CMP r0 r1 opcode
    assert_eq!(program.image[9], 0x0F); // JSG target backpatched to `greater:` (offset 15)
}

#[test]
fn scenario_memory_round_trip() {
    let source = "\
        LDC r0 0xBE\n\
        LDC r1 0x80\n\
        STM r0 r1\n\
        LDC r0 0x00\n\
        LDM r0 r1\n\
        END\n";

    let program = assemble_source(source).unwrap();
    assert_eq!(program.image[0], 0xD1); // LDC
    assert_eq!(program.image[6], 0xD3); // STM
}

#[test]
fn scenario_loop_using_jul() {
    let source = "\
        LDC r0 0x03\n\
        LDC r1 0x01\n\
        loop: SUB r0 r1\n\
        JUL done\n\
        JMP loop\n\
        done: END\n";

    let program = assemble_source(source).unwrap();
    // loop: is at offset 6 (two LDC instructions, 3 bytes each).
    assert_eq!(program.image[6], 0xA8); // SUB opcode
}

#[test]
fn boundary_exactly_256_bytes_succeeds() {
    let source = "NOP\n".repeat(256);
    let program = assemble_source(&source).unwrap();
    assert_eq!(program.image.len(), 256);
}

#[test]
fn boundary_257_bytes_fails() {
    let source = "NOP\n".repeat(257);
    let err = assemble_source(&source).unwrap_err();
    assert_eq!(err, AssemblyError::ProgramTooLarge(257));
}

#[test]
fn boundary_forward_label_at_offset_zero_backpatches_to_0x00() {
    let program = assemble_source("start:\nJMP start\n").unwrap();
    assert_eq!(program.image[1], 0x00);
}

#[test]
fn missing_label_surfaces_as_an_error() {
    let err = assemble_source("JMP nowhere\nEND\n").unwrap_err();
    assert_eq!(err, AssemblyError::MissingLabel(vec!["nowhere".to_string()]));
}

#[test]
fn assembles_through_the_mock_file_reader() {
    let mut reader = MockImageReader::default();
    reader.add_text("loop.asm", "loop: NOP\nJMP loop\n");

    let program = assemble_file(&reader, Path::new("loop.asm")).unwrap();
    assert_eq!(&program.image[..3], &[0x00, 0xB0, 0x00]);
}

// This assembler accepts a bare identifier as a label reference in any
// data position, not just after a mnemonic — so a bare identifier used as
// a standalone data byte assembles successfully rather than being
// rejected as an illegal token.
#[test]
fn latest_revision_accepts_bare_identifiers_anywhere() {
    let program = assemble_source("table:\nNOP\ntable\n").unwrap();
    assert_eq!(&program.image[..2], &[0x00, 0x00]);
}
