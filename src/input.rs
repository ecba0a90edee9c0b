//! Resolution of `--data` style arguments
//!
//! A value can be given inline, read from a file with `@path`, or read from standard
//! input with `stdin` or `@-`.

use std::io::{self, Read};
use std::{env, fs};

use crate::error::NgsiError;

/// Read the bytes a data argument refers to
pub fn read_all(s: &str) -> Result<Vec<u8>, NgsiError> {
    read_all_from(s, &mut io::stdin())
}

/// Like [`read_all`], with an explicit reader standing in for standard input
pub fn read_all_from(s: &str, stdin: &mut dyn Read) -> Result<Vec<u8>, NgsiError> {
    const FUNC: &str = "readAll";

    if s.is_empty() {
        return Err(NgsiError::new(FUNC, 1, "data is empty"));
    }
    if s == "stdin" || s == "@-" {
        let mut buf = Vec::new();
        stdin
            .read_to_end(&mut buf)
            .map_err(|e| NgsiError::wrap(FUNC, 2, e))?;
        return Ok(buf);
    }
    if let Some(file) = s.strip_prefix('@') {
        if file.is_empty() {
            return Err(NgsiError::new(FUNC, 5, "file name error"));
        }
        let path = env::current_dir()
            .map(|cwd| cwd.join(file))
            .map_err(|e| NgsiError::wrap(FUNC, 3, e))?;
        return fs::read(&path).map_err(|e| NgsiError::wrap(FUNC, 4, e));
    }
    Ok(s.as_bytes().to_vec())
}
