//! # Avaliação de Tokenização por Spans
//!
//! Compara uma tokenização predita com a gold, linha a linha, usando os spans de
//! caracteres de cada token ([`crate::span`]).
//!
//! ## Regras de contagem
//!
//! - Span gold presente no conjunto predito → **verdadeiro positivo**.
//! - Span gold ausente do conjunto predito → **falso negativo**.
//! - Span predito ausente do conjunto gold → **falso positivo**.
//!
//! As contagens são somadas no corpus inteiro e só então viram precisão,
//! revocação e F1 (micro-média, não média por linha).
//!
//! ## Pré-condições (erros fatais)
//!
//! - Os dois corpora precisam ter o mesmo número de linhas.
//! - Em cada linha, os caracteres concatenados (sem espaços) precisam ser
//!   idênticos. Caso contrário os offsets não são comparáveis e a avaliação
//!   inteira é abortada.
//!
//! ```rust
//! use tok_core::eval::align_line;
//!
//! let alignment = align_line(1, &["cat", "sat"], &["cats", "at"]).unwrap();
//! assert_eq!(alignment.counters.true_positive, 0);
//! assert_eq!(alignment.counters.false_positive, 2);
//! assert_eq!(alignment.counters.false_negative, 2);
//! ```

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::diff::{DiffStyle, LineDiff};
use crate::error::{Error, Result};
use crate::span::{text_to_spans, Span};

/// Acumuladores de VP/FP/FN. A soma é comutativa, então linhas podem ser
/// pontuadas em qualquer ordem (ou em paralelo) e combinadas depois.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounters {
    pub true_positive: usize,
    pub false_positive: usize,
    pub false_negative: usize,
}

impl ScoreCounters {
    pub fn has_errors(&self) -> bool {
        self.false_positive != 0 || self.false_negative != 0
    }

    pub fn metrics(&self) -> Metrics {
        let tp = self.true_positive as f64;
        let precision = ratio(tp, tp + self.false_positive as f64);
        let recall = ratio(tp, tp + self.false_negative as f64);
        let f1 = ratio(2.0 * precision * recall, precision + recall);
        Metrics {
            precision,
            recall,
            f1,
        }
    }
}

/// Divisão com denominador zero definida como 0.
fn ratio(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}

impl AddAssign for ScoreCounters {
    fn add_assign(&mut self, other: Self) {
        self.true_positive += other.true_positive;
        self.false_positive += other.false_positive;
        self.false_negative += other.false_negative;
    }
}

impl Add for ScoreCounters {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Sum for ScoreCounters {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Métricas finais, como frações em `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "precision: {:.2}", self.precision * 100.0)?;
        writeln!(f, "recall: {:.2}", self.recall * 100.0)?;
        write!(f, "f1: {:.2}", self.f1 * 100.0)
    }
}

/// Resultado do alinhamento de uma única linha.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineAlignment {
    pub counters: ScoreCounters,
    /// Índices dos tokens gold que não foram reproduzidos (falsos negativos).
    pub gold_errors: BTreeSet<usize>,
    /// Índices dos tokens preditos que não existem no gold (falsos positivos).
    pub pred_errors: BTreeSet<usize>,
}

/// Alinha os spans gold e preditos de uma linha.
///
/// `line` é usado apenas na mensagem de erro (numeração a partir de 1).
pub fn align_line<S: AsRef<str>>(line: usize, gold: &[S], predicted: &[S]) -> Result<LineAlignment> {
    let gold_text = concat(gold);
    let pred_text = concat(predicted);
    if gold_text != pred_text {
        return Err(Error::ContentMismatch {
            line,
            gold: gold_text,
            predicted: pred_text,
        });
    }

    let gold_spans = text_to_spans(gold);
    let pred_spans = text_to_spans(predicted);
    let gold_set: HashSet<Span> = gold_spans.iter().copied().collect();
    let pred_set: HashSet<Span> = pred_spans.iter().copied().collect();

    let mut alignment = LineAlignment::default();
    for (i, span) in gold_spans.iter().enumerate() {
        if pred_set.contains(span) {
            alignment.counters.true_positive += 1;
        } else {
            alignment.counters.false_negative += 1;
            alignment.gold_errors.insert(i);
        }
    }
    for (i, span) in pred_spans.iter().enumerate() {
        if !gold_set.contains(span) {
            alignment.counters.false_positive += 1;
            alignment.pred_errors.insert(i);
        }
    }
    Ok(alignment)
}

fn concat<S: AsRef<str>>(tokens: &[S]) -> String {
    tokens.iter().map(AsRef::as_ref).collect()
}

/// Configuração da saída do avaliador.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalOptions {
    pub diff_style: DiffStyle,
    /// Se falso, o relatório traz só o resumo.
    pub show_diff: bool,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            diff_style: DiffStyle::Ansi,
            show_diff: true,
        }
    }
}

/// Relatório de avaliação de um corpus inteiro.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalReport {
    pub lines: usize,
    pub counters: ScoreCounters,
    pub metrics: Metrics,
    /// Linhas com erro, em ordem.
    pub diffs: Vec<LineDiff>,
}

impl EvalReport {
    /// Texto do relatório: um bloco por linha divergente, seguido do resumo.
    pub fn render(&self, options: EvalOptions) -> String {
        let mut out = String::new();
        if options.show_diff {
            for diff in &self.diffs {
                out.push_str(&diff.render(options.diff_style));
                out.push('\n');
            }
        }
        out.push('\n');
        out.push_str(&self.metrics.to_string());
        out.push('\n');
        out
    }
}

/// Avalia um corpus predito contra o gold.
///
/// As linhas são pontuadas em paralelo; se mais de uma tiver conteúdo
/// divergente, o erro reportado é o da primeira delas.
pub fn evaluate<S>(gold: &[Vec<S>], predicted: &[Vec<S>]) -> Result<EvalReport>
where
    S: AsRef<str> + Sync,
{
    if gold.len() != predicted.len() {
        return Err(Error::LineCountMismatch {
            gold: gold.len(),
            predicted: predicted.len(),
        });
    }

    let alignments: Vec<Result<LineAlignment>> = gold
        .par_iter()
        .zip(predicted.par_iter())
        .enumerate()
        .map(|(i, (g, p))| align_line(i + 1, g, p))
        .collect();

    let mut counters = ScoreCounters::default();
    let mut diffs = Vec::new();
    for (i, alignment) in alignments.into_iter().enumerate() {
        let alignment = alignment?;
        counters += alignment.counters;
        if alignment.counters.has_errors() {
            debug!(
                line = i + 1,
                fp = alignment.counters.false_positive,
                fn_ = alignment.counters.false_negative,
                "linha com divergências"
            );
            diffs.push(LineDiff::new(
                i + 1,
                &gold[i],
                &predicted[i],
                &alignment.gold_errors,
                &alignment.pred_errors,
            ));
        }
    }

    let metrics = counters.metrics();
    info!(
        lines = gold.len(),
        tp = counters.true_positive,
        fp = counters.false_positive,
        fn_ = counters.false_negative,
        f1 = metrics.f1,
        "avaliação concluída"
    );

    Ok(EvalReport {
        lines: gold.len(),
        counters,
        metrics,
        diffs,
    })
}
