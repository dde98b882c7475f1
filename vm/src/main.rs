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

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use simple_isa::io::{load_memory_file, FsImageReader};
use tracing::{debug, info};

/// Loads a SIMPLE-ISA memory image and runs it to completion.
#[derive(Parser)]
struct Cli {
    /// Memory image to load (.hex or .bin).
    input: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    debug!(input = %cli.input.display(), "loading image");
    let reader = FsImageReader;
    let memory = load_memory_file(&reader, &cli.input)
        .with_context(|| format!("failed to load {}", cli.input.display()))?;

    let mut vm = simple_isa_vm::Vm::new(memory);
    vm.run()
        .with_context(|| format!("execution of {} failed", cli.input.display()))?;

    info!(pc = vm.pc, "halted");
    println!("registers: {:02X?}", vm.registers);
    println!(
        "flags: Z={} C={} V={} N={}",
        vm.flags.zero as u8, vm.flags.carry as u8, vm.flags.overflow as u8, vm.flags.negative as u8
    );
    println!("pc: 0x{:02X}", vm.pc);

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::FAILURE
        }
    }
}
