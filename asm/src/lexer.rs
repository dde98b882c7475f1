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

//! Splits source text into whitespace-separated tokens, stripping `;` line
//! comments and blank lines. There is no grammar here beyond "split on
//! whitespace" — the encoder in `assembler.rs` does all
//! the classification, since a token's meaning (register / mnemonic /
//! label def / constant-or-label-reference) depends on where it sits
//! relative to a mnemonic, not on its spelling alone.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    pub text: String,
    pub line: usize,
}

pub fn tokenize(source: &str) -> Vec<RawToken> {
    let mut tokens = Vec::new();

    for (idx, line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let code = match line.find(';') {
            Some(pos) => &line[..pos],
            None => line,
        };

        for word in code.split_whitespace() {
            tokens.push(RawToken {
                text: word.to_string(),
                line: line_number,
            });
        }
    }

    tokens
}
