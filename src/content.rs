use crate::types::TextEncoding;
use std::fs;
use std::io;
use std::path::Path;

/// Result of reading a file as text with the UTF-8 then Latin-1 strategy.
#[derive(Debug)]
pub enum TextRead {
    Utf8(String),
    /// Bytes were not valid UTF-8 and were decoded as ISO-8859-1.
    Latin1(String),
    Failed(io::Error),
}

impl TextRead {
    pub fn into_parts(self) -> Result<(String, TextEncoding), io::Error> {
        match self {
            TextRead::Utf8(text) => Ok((text, TextEncoding::Utf8)),
            TextRead::Latin1(text) => Ok((text, TextEncoding::Latin1)),
            TextRead::Failed(e) => Err(e),
        }
    }
}

/// Decodes raw bytes, falling back to Latin-1, which accepts every byte.
pub fn decode_text(bytes: Vec<u8>) -> TextRead {
    match String::from_utf8(bytes) {
        Ok(text) => TextRead::Utf8(text),
        Err(e) => {
            let bytes = e.into_bytes();
            TextRead::Latin1(encoding_rs::mem::decode_latin1(&bytes).into_owned())
        }
    }
}

pub fn read_text(path: &Path) -> TextRead {
    match fs::read(path) {
        Ok(bytes) => {
            let read = decode_text(bytes);
            if matches!(read, TextRead::Latin1(_)) {
                tracing::debug!("Not UTF-8, decoded as Latin-1: {}", path.display());
            }
            read
        }
        Err(e) => TextRead::Failed(e),
    }
}
