//! Visualização das divergências entre tokenização gold e predita.
//!
//! A renderização é separada da detecção: [`LineDiff`] guarda as duas
//! sequências com os tokens errados marcados, e [`DiffStyle`] decide como
//! destacá-los (escape ANSI no terminal, marcadores em texto puro).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

const ANSI_RED: &str = "\x1b[91m";
const ANSI_RESET: &str = "\x1b[00m";

/// Como destacar um token divergente.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DiffStyle {
    /// Vermelho brilhante via escape ANSI.
    #[default]
    Ansi,
    /// `[[token]]`, para logs e arquivos.
    Plain,
}

impl DiffStyle {
    pub fn highlight(&self, text: &str) -> String {
        match self {
            DiffStyle::Ansi => format!("{ANSI_RED}{text}{ANSI_RESET}"),
            DiffStyle::Plain => format!("[[{text}]]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffToken {
    pub text: String,
    pub is_error: bool,
}

/// Uma linha com pelo menos um falso positivo ou falso negativo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineDiff {
    /// Número da linha no corpus (começando em 1).
    pub line: usize,
    pub gold: Vec<DiffToken>,
    pub predicted: Vec<DiffToken>,
}

impl LineDiff {
    pub fn new<S: AsRef<str>>(
        line: usize,
        gold: &[S],
        predicted: &[S],
        gold_errors: &BTreeSet<usize>,
        pred_errors: &BTreeSet<usize>,
    ) -> Self {
        Self {
            line,
            gold: mark(gold, gold_errors),
            predicted: mark(predicted, pred_errors),
        }
    }

    /// Duas linhas: tokens gold e tokens preditos, com os erros destacados.
    pub fn render(&self, style: DiffStyle) -> String {
        format!(
            "{}\n{}\n",
            render_tokens(&self.gold, style),
            render_tokens(&self.predicted, style)
        )
    }
}

fn mark<S: AsRef<str>>(tokens: &[S], errors: &BTreeSet<usize>) -> Vec<DiffToken> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, t)| DiffToken {
            text: t.as_ref().to_string(),
            is_error: errors.contains(&i),
        })
        .collect()
}

pub fn render_tokens(tokens: &[DiffToken], style: DiffStyle) -> String {
    tokens
        .iter()
        .map(|t| {
            if t.is_error {
                style.highlight(&t.text)
            } else {
                t.text.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
