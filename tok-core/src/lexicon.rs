//! # Conjunto de Padrões Léxicos
//!
//! Catálogo ordenado de classes de padrão usado para recortar um texto já
//! normalizado em tokens. Em cada posição as classes são testadas na ordem de
//! [`PatternKind::PRIORITY`] e **a primeira que casar vence** — não é o casamento
//! mais longo. A ordem é uma decisão de projeto: emoticons como `:)` precisam
//! vencer a pontuação, ordinais como `1st` precisam vencer os números, etc.
//!
//! | Prioridade | Classe        | Exemplos                    |
//! |------------|---------------|-----------------------------|
//! | 1          | `Emoticon`    | `:)`, `<333`, `¯\_(ツ)_/¯`  |
//! | 2          | `Ordinal`     | `1st`, `22nd`, `3rd`        |
//! | 3          | `Url`         | `https://example.com/a?b=1` |
//! | 4          | `Numeric`     | `$4.99`, `12:30`, `1,000`   |
//! | 5          | `Negation`    | `n't`, `N'T`                |
//! | 6          | `Word`        | `hello`, `@user`, `#tag`    |
//! | 7          | `Punctuation` | `...`, `?!`, `--`           |
//! | 8          | `Symbol`      | qualquer outro caractere    |
//!
//! A classe `Symbol` casa qualquer caractere que não seja espaço, o que torna a
//! varredura total: nenhum caractere visível é descartado.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Emoticons "old school", na ordem em que são testados.
pub const EMOTICON_PATTERNS: &[&str] = &[
    r":\)", r":D", r"D:", r":P", r":\(", r";\)", r":\|", r":\^D", r":O", r":/", r"<3+",
    r":3", r":\*", r":-D", r":-\)", r":-\(", r":-P", r";-\)", r";-\(", r":-/",
    r":<", r":>", r"B\)", r";P", r"=\)", r"X\)", r"XD", r":c", r"=\(", r"¯\\_\(ツ\)_/¯",
    r":\\", r"\(:", r"\[:", r":\]", r"•\(><\)•", r";3", r":S", r"\(;",
    r"x\)", r";o", r":d", r";L", r";D", r"=\]", r";L",
];

/// Emoticons com espaço interno. Nenhum token pode conter espaço, então cada
/// pedaço entre espaços vira um token próprio e os espaços são consumidos como
/// separadores. Nenhuma entrada de [`EMOTICON_PATTERNS`] casa no início destes.
pub const SPACED_EMOTICONS: &[&str] = &["+_O ", "; 3"];

static EMOTICONS: Lazy<Vec<Regex>> = Lazy::new(|| {
    EMOTICON_PATTERNS
        .iter()
        .map(|p| Regex::new(&format!(r"\A(?:{p})")).expect("valid emoticon pattern"))
        .collect()
});

static ORDINAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\d+[ndNDthTHsSrR]+").expect("valid regex"));

static URL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\Ahttp\S+").expect("valid regex"));

static NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A\$?\d[\$:\d,./-]*").expect("valid regex"));

static NEGATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\A(?:n't|N'T)").expect("valid regex"));

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(?:[@~#]?\w+|[\w'`]+)").expect("valid regex"));

static PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A[?.><_\-,!(&)']+").expect("valid regex"));

/// Classe de padrão que produziu um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Emoticon,
    /// Dígitos seguidos de sufixo de letras (`1st`, `2nd`, `3D`).
    Ordinal,
    Url,
    /// Símbolo de moeda opcional, dígito, e então dígitos ou separadores (`$1,000.50`, `12/05`).
    Numeric,
    /// Resto de contração que sobreviveu à normalização.
    Negation,
    /// Palavra com sigilo opcional (`@`, `~`, `#`), ou sequência com apóstrofos/crases.
    Word,
    Punctuation,
    /// Catch-all: um único caractere que nenhuma outra classe aceitou.
    Symbol,
}

impl PatternKind {
    /// Ordem de teste. A primeira classe que casar um prefixo não vazio vence.
    pub const PRIORITY: [PatternKind; 8] = [
        PatternKind::Emoticon,
        PatternKind::Ordinal,
        PatternKind::Url,
        PatternKind::Numeric,
        PatternKind::Negation,
        PatternKind::Word,
        PatternKind::Punctuation,
        PatternKind::Symbol,
    ];

    /// Tenta reconhecer esta classe no início de `rest`.
    ///
    /// Retorna o tamanho em bytes do prefixo casado, nunca zero.
    pub fn recognize(self, rest: &str) -> Option<usize> {
        let len = match self {
            PatternKind::Emoticon => match_emoticon(rest),
            PatternKind::Ordinal => ORDINAL.find(rest).map(|m| m.end()),
            PatternKind::Url => URL.find(rest).map(|m| m.end()),
            PatternKind::Numeric => NUMERIC.find(rest).map(|m| m.end()),
            PatternKind::Negation => NEGATION.find(rest).map(|m| m.end()),
            PatternKind::Word => WORD.find(rest).map(|m| m.end()),
            PatternKind::Punctuation => PUNCTUATION.find(rest).map(|m| m.end()),
            PatternKind::Symbol => rest
                .chars()
                .next()
                .filter(|c| !c.is_whitespace())
                .map(char::len_utf8),
        };
        len.filter(|&n| n > 0)
    }
}

fn match_emoticon(rest: &str) -> Option<usize> {
    EMOTICONS.iter().find_map(|re| re.find(rest)).map(|m| m.end())
}

/// Casa um [`SPACED_EMOTICONS`] no início de `rest`.
///
/// Retorna o tamanho total consumido (espaços incluídos) e os intervalos de
/// bytes, relativos a `rest`, de cada pedaço que vira token.
pub fn match_spaced_emoticon(rest: &str) -> Option<(usize, Vec<(usize, usize)>)> {
    let emoticon = SPACED_EMOTICONS.iter().find(|e| rest.starts_with(**e))?;
    let mut pieces = Vec::new();
    let mut offset = 0;
    for piece in emoticon.split(' ') {
        if !piece.is_empty() {
            pieces.push((offset, offset + piece.len()));
        }
        offset += piece.len() + 1;
    }
    Some((emoticon.len(), pieces))
}

/// Casa o próximo token no início de `rest`, testando as classes em ordem.
///
/// Retorna `None` apenas quando `rest` está vazio ou começa com espaço em branco.
pub fn match_prefix(rest: &str) -> Option<(PatternKind, usize)> {
    PatternKind::PRIORITY
        .iter()
        .find_map(|&kind| kind.recognize(rest).map(|len| (kind, len)))
}
