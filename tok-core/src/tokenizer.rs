//! # Tokenizador por Regras Léxicas
//!
//! Divide uma linha de texto em tokens sub-palavra. O processo tem duas etapas:
//!
//! 1. **Normalização** ([`crate::contractions`]): contrações viram formas separadas
//!    ("can't" → "ca n't").
//! 2. **Varredura** ([`crate::lexicon`]): da esquerda para a direita, a primeira
//!    classe de padrão que casar na posição atual define o próximo token.
//!
//! Espaços em branco são apenas separadores e nunca viram tokens. Como a classe
//! `Symbol` aceita qualquer caractere visível, todo caractere não branco do texto
//! normalizado acaba em exatamente um token.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use tok_core::tokenizer::{tokenize, token_texts};
//!
//! let tokens = tokenize("I can't wait :) see you on the 1st!");
//! assert_eq!(
//!     token_texts(&tokens),
//!     vec!["I", "ca", "n't", "wait", ":)", "see", "you", "on", "the", "1st", "!"]
//! );
//! ```

use serde::{Deserialize, Serialize};

use crate::contractions::split_contractions;
use crate::lexicon::{match_prefix, match_spaced_emoticon, PatternKind};

/// Um token extraído do texto normalizado.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "ca", "n't", ":)").
    pub text: String,
    /// Classe de padrão que reconheceu o token.
    pub kind: PatternKind,
    /// Índice de byte inicial no texto normalizado (inclusive).
    pub start: usize,
    /// Índice de byte final no texto normalizado (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na linha (0, 1, 2...).
    pub index: usize,
}

/// Estratégias de tokenização disponíveis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TokenizerMode {
    /// **Padrão**: normaliza contrações e depois aplica os padrões léxicos.
    #[default]
    Standard,
    /// **Cru**: aplica só os padrões léxicos, sem normalizar contrações.
    /// Útil para inspecionar o que a tabela de contrações está mudando.
    Raw,
}

/// Tokeniza uma linha no modo padrão.
pub fn tokenize(text: &str) -> Vec<Token> {
    tokenize_with_mode(text, TokenizerMode::Standard)
}

/// Tokeniza uma linha com o modo especificado.
///
/// Os offsets dos tokens referem-se ao texto retornado por [`prepare`].
pub fn tokenize_with_mode(text: &str, mode: TokenizerMode) -> Vec<Token> {
    scan(&prepare(text, mode))
}

/// Texto sobre o qual a varredura roda: a linha normalizada (ou crua, no modo `Raw`).
pub fn prepare(text: &str, mode: TokenizerMode) -> String {
    match mode {
        TokenizerMode::Standard => split_contractions(text),
        TokenizerMode::Raw => text.to_string(),
    }
}

/// Varre um texto já preparado, emitindo um token por casamento.
pub fn scan(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let rest = &text[pos..];
        if let Some((len, pieces)) = match_spaced_emoticon(rest) {
            for (start, end) in pieces {
                push_token(&mut tokens, &rest[start..end], PatternKind::Emoticon, pos + start);
            }
            pos += len;
            continue;
        }
        match match_prefix(rest) {
            Some((kind, len)) => {
                push_token(&mut tokens, &rest[..len], kind, pos);
                pos += len;
            }
            None => {
                // Só espaço em branco não casa; pula um caractere.
                pos += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
    }

    tokens
}

fn push_token(tokens: &mut Vec<Token>, text: &str, kind: PatternKind, start: usize) {
    let index = tokens.len();
    tokens.push(Token {
        text: text.to_string(),
        kind,
        start,
        end: start + text.len(),
        index,
    });
}

/// Textos dos tokens, na ordem.
pub fn token_texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

/// Linha de saída do tokenizador: tokens separados por um espaço.
pub fn join_tokens(tokens: &[Token]) -> String {
    token_texts(tokens).join(" ")
}
