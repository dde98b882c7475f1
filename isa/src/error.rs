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

/// Errors from loading a `.hex`/`.bin` memory image, shared by the `vm` and
/// `sim` CLIs so the two tools report malformed input identically.
#[derive(Error, Debug)]
pub enum ImageError {
    #[error("{0}")]
    IoFailure(#[from] std::io::Error),

    #[error("invalid file: {reason}")]
    InvalidFile { reason: String },
}
