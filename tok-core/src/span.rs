//! # Conversão de Tokens em Spans
//!
//! Para comparar duas tokenizações do mesmo texto, cada token vira um intervalo
//! semiaberto `[start, end)` de offsets de **caracteres** na concatenação dos
//! tokens sem separador.
//!
//! # Exemplo
//! `["this", "is", "a", "test"]` → `[(0,4), (4,6), (6,7), (7,11)]`

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Intervalo semiaberto de offsets de caracteres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Offset inicial (inclusivo)
    pub start: usize,
    /// Offset final (exclusivo)
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Dispõe os tokens lado a lado, sem lacunas, a partir do offset 0.
pub fn text_to_spans<S: AsRef<str>>(tokens: &[S]) -> Vec<Span> {
    let mut offset = 0;
    tokens
        .iter()
        .map(|token| {
            let start = offset;
            offset += token.as_ref().chars().count();
            Span::new(start, offset)
        })
        .collect()
}

/// Mesmo que [`text_to_spans`], para a saída do tokenizador.
pub fn tokens_to_spans(tokens: &[Token]) -> Vec<Span> {
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    text_to_spans(&texts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_text_to_spans() {
        let spans = text_to_spans(&["this", "is", "a", "test"]);
        let pairs: Vec<(usize, usize)> = spans.iter().map(|s| (s.start, s.end)).collect();
        assert_eq!(pairs, vec![(0, 4), (4, 6), (6, 7), (7, 11)]);
    }

    #[test]
    fn test_offsets_count_characters_not_bytes() {
        let spans = text_to_spans(&["café", "☕"]);
        assert_eq!(spans, vec![Span::new(0, 4), Span::new(4, 5)]);
    }

    #[test]
    fn test_empty_sequence() {
        let empty: [&str; 0] = [];
        assert!(text_to_spans(&empty).is_empty());
    }

    #[test]
    fn test_tokens_to_spans_matches_strings() {
        let tokens = tokenize("I can't :)");
        assert_eq!(
            tokens_to_spans(&tokens),
            text_to_spans(&["I", "ca", "n't", ":)"])
        );
    }
}
