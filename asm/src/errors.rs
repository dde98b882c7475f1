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

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum AssemblyError {
    #[error("illegal token on line {line}: {token:?}")]
    IllegalToken { token: String, line: usize },

    #[error("program too large: {0} bytes (max 256)")]
    ProgramTooLarge(usize),

    #[error("unexpected end of input")]
    UnexpectedEndOfInput,

    #[error("missing labels: {0:?}")]
    MissingLabel(Vec<String>),

    #[error("{0}")]
    Image(String),
}
