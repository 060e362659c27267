//! Erros fatais do tokenizador e do avaliador.
//!
//! O tokenizador em si não falha: a regra "catch-all" do [`crate::lexicon`]
//! garante que toda linha é consumida. Os erros abaixo vêm da leitura dos
//! corpora e das pré-condições do avaliador.

use thiserror::Error;

/// Resultado padrão das operações do crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Os arquivos gold e predito não têm o mesmo número de linhas.
    #[error("Files do not have same length: gold has {gold} lines, predicted has {predicted}")]
    LineCountMismatch { gold: usize, predicted: usize },

    /// Os caracteres (sem espaços) de uma linha diferem entre gold e predito.
    #[error(
        "line {line}: the characters you returned are not the same as the ones in the gold \
         tokenization (only the whitespaces may differ)\n  gold:      {gold}\n  predicted: {predicted}"
    )]
    ContentMismatch {
        line: usize,
        gold: String,
        predicted: String,
    },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }

    /// Erros de uso são reportados antes de qualquer linha ser comparada.
    pub fn is_usage(&self) -> bool {
        matches!(self, Self::LineCountMismatch { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_classification() {
        assert!(Error::LineCountMismatch { gold: 5, predicted: 4 }.is_usage());
        let mismatch = Error::ContentMismatch {
            line: 1,
            gold: "catsat".into(),
            predicted: "catset".into(),
        };
        assert!(!mismatch.is_usage());
    }

    #[test]
    fn test_content_mismatch_message_shows_both_strings() {
        let err = Error::ContentMismatch {
            line: 3,
            gold: "abc".into(),
            predicted: "abd".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("abc"));
        assert!(msg.contains("abd"));
    }
}
