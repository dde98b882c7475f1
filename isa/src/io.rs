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

//! File-reading abstraction shared by the three CLI tools, so the loader
//! logic (`load_memory_file`) can be exercised in tests without touching
//! disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ImageError;

pub trait ImageReader {
    fn read_to_string(&self, path: &Path) -> Result<String, ImageError>;
    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, ImageError>;
}

/// Production reader, backed by `std::fs`.
pub struct FsImageReader;

impl ImageReader for FsImageReader {
    fn read_to_string(&self, path: &Path) -> Result<String, ImageError> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, ImageError> {
        Ok(std::fs::read(path)?)
    }
}

#[derive(Clone)]
enum FileData {
    Text(String),
    Binary(Vec<u8>),
}

/// In-memory reader for tests.
#[derive(Default)]
pub struct MockImageReader {
    files: HashMap<PathBuf, FileData>,
}

impl MockImageReader {
    pub fn add_text(&mut self, path: &str, content: &str) {
        self.files
            .insert(PathBuf::from(path), FileData::Text(content.to_string()));
    }

    pub fn add_binary(&mut self, path: &str, content: &[u8]) {
        self.files
            .insert(PathBuf::from(path), FileData::Binary(content.to_vec()));
    }
}

impl ImageReader for MockImageReader {
    fn read_to_string(&self, path: &Path) -> Result<String, ImageError> {
        match self.files.get(path) {
            Some(FileData::Text(content)) => Ok(content.clone()),
            Some(FileData::Binary(_)) => Err(ImageError::InvalidFile {
                reason: format!("mock file is binary, not text: {}", path.display()),
            }),
            None => Err(ImageError::InvalidFile {
                reason: format!("mock file not found: {}", path.display()),
            }),
        }
    }

    fn read_binary(&self, path: &Path) -> Result<Vec<u8>, ImageError> {
        match self.files.get(path) {
            Some(FileData::Binary(content)) => Ok(content.clone()),
            Some(FileData::Text(_)) => Err(ImageError::InvalidFile {
                reason: format!("mock file is text, not binary: {}", path.display()),
            }),
            None => Err(ImageError::InvalidFile {
                reason: format!("mock file not found: {}", path.display()),
            }),
        }
    }
}

/// Loads a 256-byte memory image from a `.hex` or `.bin` file, dispatching
/// on the extension. `.hex` files are whitespace-separated `0xHH` tokens,
/// padded with zero up to 256 bytes; `.bin` files must be exactly 256 raw
/// bytes.
pub fn load_memory_file<R: ImageReader>(
    reader: &R,
    path: &Path,
) -> Result<crate::image::Memory, ImageError> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("hex") => {
            let text = reader.read_to_string(path)?;
            crate::image::load_hex_padded(&text)
        }
        Some("bin") => {
            let bytes = reader.read_binary(path)?;
            crate::image::load_bin(&bytes)
        }
        _ => Err(ImageError::InvalidFile {
            reason: "must provide a .hex or .bin file".to_string(),
        }),
    }
}
