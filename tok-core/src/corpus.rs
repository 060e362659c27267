//! # Formato de Linha dos Corpora
//!
//! Cada linha é `texto[\trótulo]*`:
//!
//! - o **tokenizador** lê o *primeiro* campo (aparado);
//! - o **avaliador** lê o *último* campo, onde os tokens estão separados por um
//!   espaço simples.
//!
//! Bytes que não formam UTF-8 válido são descartados na leitura.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{Error, Result};

/// Campo que o tokenizador processa: o primeiro campo separado por tab, aparado.
pub fn tokenizer_field(line: &str) -> &str {
    line.split('\t').next().unwrap_or_default().trim()
}

/// Tokens de uma linha já tokenizada (último campo tab, separado por espaços).
///
/// Pedaços vazios (espaços duplicados, linha vazia) são ignorados.
pub fn parse_tokenized_line(line: &str) -> Vec<String> {
    line.trim()
        .rsplit('\t')
        .next()
        .unwrap_or_default()
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decodifica UTF-8 descartando sequências inválidas.
pub fn decode_ignoring_invalid(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    let mut rest = bytes;
    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                let skip = e.error_len().unwrap_or(after.len());
                rest = &after[skip..];
            }
        }
    }
}

/// Lê a próxima linha do stream, sem o terminador `\n`. `None` no fim.
///
/// `buf` é reaproveitado entre chamadas.
pub fn next_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<Option<String>> {
    buf.clear();
    let n = reader
        .read_until(b'\n', buf)
        .map_err(|e| Error::io("reading input line", e))?;
    if n == 0 {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(decode_ignoring_invalid(buf)))
}

/// Lê todas as linhas de um stream, sem o terminador `\n`.
pub fn read_lines<R: BufRead>(mut reader: R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    while let Some(line) = next_line(&mut reader, &mut buf)? {
        lines.push(line);
    }
    Ok(lines)
}

/// Lê um corpus tokenizado: uma sequência de tokens por linha.
pub fn read_tokenized<R: BufRead>(reader: R) -> Result<Vec<Vec<String>>> {
    Ok(read_lines(reader)?
        .iter()
        .map(|line| parse_tokenized_line(line))
        .collect())
}

pub fn read_tokenized_file(path: &Path) -> Result<Vec<Vec<String>>> {
    let file = File::open(path).map_err(|e| Error::io("opening tokenized corpus", e))?;
    read_tokenized(BufReader::new(file))
}
