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
use simple_isa::io::FsImageReader;
use tracing::debug;

/// Assembles a SIMPLE-ISA source file into a 256-byte memory image.
#[derive(Parser)]
struct Cli {
    /// Source file to assemble.
    input: PathBuf,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    debug!(input = %cli.input.display(), "assembling");
    let reader = FsImageReader;
    let program = simple_isa_asm::assemble_file(&reader, &cli.input)
        .with_context(|| format!("failed to assemble {}", cli.input.display()))?;

    let stem = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let hex_path = PathBuf::from(format!("{stem}.hex"));

    std::fs::write(&hex_path, &program.hex_dump)
        .with_context(|| format!("failed to write {}", hex_path.display()))?;
    std::fs::write("memory.bin", &program.image).context("failed to write memory.bin")?;

    println!(
        "Successfully assembled {} to {} and memory.bin",
        cli.input.display(),
        hex_path.display()
    );

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
