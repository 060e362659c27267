//! # Pipeline de Tokenização — Orquestrador com Eventos Observáveis
//!
//! Coordena normalização, varredura léxica e conversão em spans. Assim como no
//! modo interativo do servidor web, cada passo pode ser emitido como um
//! [`PipelineEvent`] num canal `mpsc`.
//!
//! Também expõe as duas operações de lote: tokenizar um stream de linhas
//! ([`TokenizePipeline::tokenize_stream`]) e avaliar dois arquivos
//! ([`evaluate_files`]).

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::mpsc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::corpus::{next_line, read_tokenized_file, tokenizer_field};
use crate::error::{Error, Result};
use crate::eval::{evaluate, EvalReport};
use crate::span::{tokens_to_spans, Span};
use crate::tokenizer::{join_tokens, prepare, scan, Token, TokenizerMode};

/// Eventos emitidos durante a tokenização de um texto.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum PipelineEvent {
    /// **Passo 1**: texto após a normalização de contrações.
    Normalized { text: String },
    /// **Passo 2** (um por token): uma classe de padrão casou.
    TokenMatched { token: Token },
    /// **Conclusão**: tokens e spans finais.
    Done {
        tokens: Vec<Token>,
        spans: Vec<Span>,
        total_tokens: usize,
        processing_ms: u64,
    },
}

/// Resultado completo da tokenização de um texto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub normalized: String,
    pub tokens: Vec<Token>,
    pub spans: Vec<Span>,
    pub total_tokens: usize,
}

/// Estatísticas de uma tokenização em lote.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    pub lines: usize,
    pub tokens: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenizePipeline {
    pub mode: TokenizerMode,
}

impl TokenizePipeline {
    pub fn new(mode: TokenizerMode) -> Self {
        Self { mode }
    }

    /// Processa o texto de forma síncrona e retorna o resultado final.
    pub fn analyze(&self, text: &str) -> Analysis {
        let (tx, rx) = mpsc::channel();
        self.analyze_streaming(text, tx);

        let mut analysis = Analysis {
            normalized: String::new(),
            tokens: vec![],
            spans: vec![],
            total_tokens: 0,
        };
        while let Ok(event) = rx.recv() {
            match event {
                PipelineEvent::Normalized { text } => analysis.normalized = text,
                PipelineEvent::Done {
                    tokens,
                    spans,
                    total_tokens,
                    ..
                } => {
                    analysis.tokens = tokens;
                    analysis.spans = spans;
                    analysis.total_tokens = total_tokens;
                }
                PipelineEvent::TokenMatched { .. } => {}
            }
        }
        analysis
    }

    /// Executa a tokenização enviando eventos de progresso pelo canal `tx`.
    ///
    /// Ordem: `Normalized`, um `TokenMatched` por token, `Done`. Um receptor
    /// descartado não interrompe o processamento.
    pub fn analyze_streaming(&self, text: &str, tx: mpsc::Sender<PipelineEvent>) {
        let start = std::time::Instant::now();

        let normalized = prepare(text, self.mode);
        let _ = tx.send(PipelineEvent::Normalized {
            text: normalized.clone(),
        });

        let tokens = scan(&normalized);
        for token in &tokens {
            let _ = tx.send(PipelineEvent::TokenMatched {
                token: token.clone(),
            });
        }

        let spans = tokens_to_spans(&tokens);
        let _ = tx.send(PipelineEvent::Done {
            total_tokens: tokens.len(),
            tokens,
            spans,
            processing_ms: start.elapsed().as_millis() as u64,
        });
    }

    /// Tokeniza cada linha do `reader` (primeiro campo tab) e escreve uma linha
    /// de tokens separados por espaço no `writer`.
    ///
    /// Uma linha por vez: cada linha é escrita antes da próxima ser lida.
    pub fn tokenize_stream<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<StreamStats> {
        let mut stats = StreamStats::default();
        let mut buf = Vec::new();
        while let Some(line) = next_line(&mut reader, &mut buf)? {
            let tokens = scan(&prepare(tokenizer_field(&line), self.mode));
            writeln!(writer, "{}", join_tokens(&tokens))
                .map_err(|e| Error::io("writing tokenized line", e))?;
            stats.lines += 1;
            stats.tokens += tokens.len();
        }
        writer
            .flush()
            .map_err(|e| Error::io("flushing tokenized output", e))?;
        info!(lines = stats.lines, tokens = stats.tokens, mode = ?self.mode, "tokenização concluída");
        Ok(stats)
    }
}

/// Avalia o arquivo predito contra o gold.
pub fn evaluate_files(gold: &Path, predicted: &Path) -> Result<EvalReport> {
    debug!(gold = %gold.display(), predicted = %predicted.display(), "lendo corpora");
    let gold_data = read_tokenized_file(gold)?;
    let pred_data = read_tokenized_file(predicted)?;
    evaluate(&gold_data, &pred_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, BufReader, Cursor, Read};

    #[test]
    fn test_analyze() {
        let analysis = TokenizePipeline::default().analyze("I can't :)");
        assert_eq!(analysis.normalized, "I ca n't :)");
        assert_eq!(analysis.total_tokens, 4);
        assert_eq!(analysis.spans.last().map(|s| s.end), Some(8));
    }

    #[test]
    fn test_analyze_empty() {
        let analysis = TokenizePipeline::default().analyze("");
        assert!(analysis.tokens.is_empty());
        assert!(analysis.spans.is_empty());
    }

    #[test]
    fn test_pipeline_events_streaming() {
        let pipeline = TokenizePipeline::default();
        let (tx, rx) = mpsc::channel();
        pipeline.analyze_streaming("gonna win", tx);

        let events: Vec<PipelineEvent> = rx.try_iter().collect();
        assert!(
            matches!(&events[0], PipelineEvent::Normalized { text } if text == "gon na win"),
            "Primeiro evento deve ser Normalized"
        );
        let matched = events
            .iter()
            .filter(|e| matches!(e, PipelineEvent::TokenMatched { .. }))
            .count();
        assert_eq!(matched, 3);
        assert!(
            matches!(events.last(), Some(PipelineEvent::Done { total_tokens: 3, .. })),
            "Último evento deve ser Done"
        );
    }

    #[test]
    fn test_tokenize_stream_uses_first_field() {
        let input = "I don't know\tEN\nhello :) world\n\n";
        let mut out = Vec::new();
        let stats = TokenizePipeline::default()
            .tokenize_stream(Cursor::new(input), &mut out)
            .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "I do n't know\nhello :) world\n\n"
        );
        assert_eq!(stats, StreamStats { lines: 3, tokens: 7 });
    }

    /// Entrega `data` e depois falha, como um pipe que quebra no meio.
    struct BrokenAfter {
        data: Cursor<&'static [u8]>,
    }

    impl Read for BrokenAfter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match self.data.read(buf)? {
                0 => Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream quebrado")),
                n => Ok(n),
            }
        }
    }

    #[test]
    fn test_tokenize_stream_writes_each_line_before_reading_the_next() {
        let reader = BufReader::new(BrokenAfter {
            data: Cursor::new(&b"I can't stop\tEN\n"[..]),
        });
        let mut out = Vec::new();
        let err = TokenizePipeline::default()
            .tokenize_stream(reader, &mut out)
            .unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert_eq!(String::from_utf8(out).unwrap(), "I ca n't stop\n");
    }

    #[test]
    fn test_raw_stream() {
        let mut out = Vec::new();
        TokenizePipeline::new(TokenizerMode::Raw)
            .tokenize_stream(Cursor::new("gonna"), &mut out)
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "gonna\n");
    }
}
