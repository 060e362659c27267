//! # tok-core — Tokenizador por Regras e Avaliador de Tokenização
//!
//! Este crate implementa duas peças acopladas:
//!
//! 1. Um **tokenizador** determinístico que recorta texto em tokens sub-palavra
//!    usando uma gramática léxica feita à mão.
//! 2. Um **avaliador** que compara uma tokenização predita com a gold pelos
//!    spans de caracteres de cada token, reportando precisão, revocação e F1.
//!
//! ## Arquitetura
//!
//! O dado flui linha a linha:
//!
//! 1.  **Entrada**: linha de texto bruto (primeiro campo tab, ver [`corpus`]).
//! 2.  **Normalização** ([`contractions`]): "can't" → "ca n't", "gonna" → "gon na".
//! 3.  **Varredura** ([`lexicon`], [`tokenizer`]): a primeira classe de padrão que casar vence.
//! 4.  **Spans** ([`span`]): tokens dispostos lado a lado viram intervalos `[start, end)`.
//! 5.  **Avaliação** ([`eval`], [`diff`]): VP/FP/FN por linha, métricas no corpus inteiro.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::{evaluate, tokenize};
//!
//! let tokens: Vec<String> = tokenize("hello :) world").into_iter().map(|t| t.text).collect();
//! assert_eq!(tokens, vec!["hello", ":)", "world"]);
//!
//! let gold = vec![vec!["hello".to_string(), ":)".to_string(), "world".to_string()]];
//! let report = evaluate(&gold, &vec![tokens]).unwrap();
//! assert_eq!(report.metrics.f1, 1.0);
//! ```

pub mod contractions;
pub mod corpus;
pub mod diff;
pub mod error;
pub mod eval;
pub mod lexicon;
pub mod pipeline;
pub mod span;
pub mod tokenizer;

pub use diff::{DiffStyle, LineDiff};
pub use error::{Error, Result};
pub use eval::{align_line, evaluate, EvalOptions, EvalReport, LineAlignment, Metrics, ScoreCounters};
pub use lexicon::PatternKind;
pub use pipeline::{evaluate_files, Analysis, PipelineEvent, TokenizePipeline};
pub use span::{text_to_spans, Span};
pub use tokenizer::{tokenize, tokenize_with_mode, Token, TokenizerMode};
