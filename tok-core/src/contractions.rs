//! # Normalização de Contrações
//!
//! Antes da tokenização, contrações e grafias informais do inglês
//! ("can't", "gonna", "yall", ...) são reescritas numa forma canônica
//! separada por espaços ("ca n't", "gon na", "y all"). Assim o
//! [`crate::lexicon`] não precisa de casos especiais para elas.
//!
//! ## Semântica
//!
//! - As regras são aplicadas **em sequência**, na ordem da tabela: a saída de
//!   uma regra é a entrada da próxima.
//! - Cada regra substitui **todas** as ocorrências não sobrepostas do seu padrão.
//! - Só existe uma passada. A tabela é reproduzida como está, incluindo regras
//!   duplicadas e regras que nunca disparam (ex: `"won't"` já foi quebrado por
//!   `"n't"` antes de chegar na sua vez).
//! - Renormalizar a saída não muda nada, salvo um resíduo da passada única: o
//!   texto normalizado ainda contém `" im "`, `" ive "`, `"Im "`, `"didnt "` ou
//!   um `"n't"` colado à palavra anterior (ex: `"so im im here"` →
//!   `"so i m im here"`, já que os casamentos não se sobrepõem).
//!
//! ```rust
//! use tok_core::contractions::split_contractions;
//!
//! assert_eq!(split_contractions("I can't, it's gonna rain"), "I ca n't, it 's gon na rain");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// Condição extra para uma regra disparar numa ocorrência.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Toda ocorrência é reescrita.
    Always,
    /// Ocorrências já precedidas por espaço em branco ficam como estão.
    /// Usado nas regras que só inserem um separador (`"n't"` → `" n't"`): sem
    /// isso cada renormalização inseriria mais um espaço.
    NotAfterWhitespace,
}

/// Uma regra de reescrita: padrão (regex) e texto de substituição.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContractionRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
    pub guard: Guard,
}

const fn rule(pattern: &'static str, replacement: &'static str) -> ContractionRule {
    ContractionRule {
        pattern,
        replacement,
        guard: Guard::Always,
    }
}

const fn split_off(pattern: &'static str, replacement: &'static str) -> ContractionRule {
    ContractionRule {
        pattern,
        replacement,
        guard: Guard::NotAfterWhitespace,
    }
}

/// Tabela de contrações, na ordem em que são aplicadas.
///
/// A ordem (e as duplicatas) fazem parte do comportamento observável:
/// não reordenar nem deduplicar.
pub const CONTRACTION_RULES: &[ContractionRule] = &[
    rule(" im ", " i m "),
    rule(" Ur ", " U r "),
    split_off("n't", " n't"),
    rule("can't", "ca n't"),
    rule("can't", "ca n't"),
    rule("cant", "ca nt"),
    rule("didn't", "did n't"),
    rule("didnt ", "did nt"),
    rule("don't", "do n't"),
    rule("dont", "do nt"),
    rule("gotta", "got ta"),
    rule("gonna", "gon na"),
    rule("hafta", "haf ta"),
    rule("hes", "he s"),
    rule("i'm", "i 'm"),
    rule("i've", "i 've"),
    rule("it's", "it 's"),
    rule("its", "it s"),
    rule("oesnt", "oes nt"),
    rule("wanna", "wan na"),
    rule("weren't", "were n't"),
    rule("wasn't", "was n't"),
    rule("wasnt", "was nt"),
    rule("won't", "wo 'nt"),
    rule("ntgo", "nt go"),
    rule("Im ", "I m "),
    rule("Ur", "U r"),
    rule("Ur", "U r"),
    rule("N't", "N 't"),
    rule("N'T", "N 'T"),
    rule("Can't", "Ca 'nt"),
    rule("Can't", "Ca 'nt"),
    rule("Cant", "Ca nt"),
    rule("Didn't", "Did 'nt"),
    rule("Didnt", "Did nt"),
    rule("Don't", "Do 'nt"),
    rule("Gotta", "Got ta"),
    rule("Gonna", "Gon na"),
    rule("Hafta", "Haf ta"),
    rule("Hes", "He s"),
    rule("I'm", "I 'm"),
    rule("I've", "I 've"),
    rule("It's", "It 's"),
    rule("Its", "It s"),
    rule("Oesnt", "Oes nt"),
    rule("Wanna", "Wan na"),
    rule("Weren't", "Were 'nt"),
    rule("Won't", "Wo 'nt"),
    rule("WON'T", "WO N'T"),
    rule("Ntgo", "Nt go"),
    rule("YALL", "Y ALL"),
    rule("Yall", "Y all"),
    rule("y ll", "y ll"),
    rule("Yll", "Y ll"),
    rule("yall", "y all"),
    rule("aint", "ai nt"),
    rule("tryna", "try na"),
    rule("kinda", "kind a"),
    split_off("'ll", " 'll"),
    rule(" ive ", " i ve "),
    rule(r"^im\b", "i m"),
];

static COMPILED_RULES: Lazy<Vec<(Regex, ContractionRule)>> = Lazy::new(|| {
    CONTRACTION_RULES
        .iter()
        .map(|r| (Regex::new(r.pattern).expect("valid contraction pattern"), *r))
        .collect()
});

/// Aplica toda a tabela de contrações ao texto, uma regra por vez.
pub fn split_contractions(text: &str) -> String {
    let mut current = text.to_string();
    for (re, rule) in COMPILED_RULES.iter() {
        if let Some(rewritten) = rewrite(re, rule, &current) {
            current = rewritten;
        }
    }
    current
}

/// Reescreve todas as ocorrências de uma regra. `None` quando nada mudou.
fn rewrite(re: &Regex, rule: &ContractionRule, text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len() + 8);
    let mut last = 0;
    let mut changed = false;

    for m in re.find_iter(text) {
        if rule.guard == Guard::NotAfterWhitespace
            && text[..m.start()]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace)
        {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(rule.replacement);
        last = m.end();
        changed = true;
    }

    if !changed {
        return None;
    }
    out.push_str(&text[last..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        assert_eq!(COMPILED_RULES.len(), CONTRACTION_RULES.len());
    }

    #[test]
    fn test_generic_negation_split() {
        assert_eq!(split_contractions("I don't know"), "I do n't know");
        assert_eq!(split_contractions("they weren't here"), "they were n't here");
    }

    #[test]
    fn test_negation_rule_fires_before_specific_ones() {
        // "won't" nunca chega à regra "wo 'nt": "n't" já foi separado antes.
        assert_eq!(split_contractions("I won't go"), "I wo n't go");
        assert_eq!(split_contractions("Can't stop"), "Ca n't stop");
        assert_eq!(split_contractions("I WON'T"), "I WON 'T");
    }

    #[test]
    fn test_sequential_rewrites_see_previous_output() {
        // "didnt " engole o espaço e "ntgo" conserta logo depois.
        assert_eq!(split_contractions("I didnt go"), "I did nt go");
    }

    #[test]
    fn test_slang_spellings() {
        assert_eq!(split_contractions("gonna wanna gotta"), "gon na wan na got ta");
        assert_eq!(split_contractions("yall kinda tryna"), "y all kind a try na");
        assert_eq!(split_contractions("we'll see"), "we 'll see");
    }

    #[test]
    fn test_pronoun_rules() {
        assert_eq!(split_contractions("im here"), "i m here");
        assert_eq!(split_contractions("Im here"), "I m here");
        assert_eq!(split_contractions("so im here"), "so i m here");
        assert_eq!(split_contractions("and ive seen it"), "and i ve seen it");
        assert_eq!(split_contractions("it's fine"), "it 's fine");
    }

    #[test]
    fn test_substring_rules_are_not_word_bounded() {
        assert_eq!(split_contractions("Urban"), "U rban");
        assert_eq!(split_contractions("hesitate"), "he sitate");
    }

    #[test]
    fn test_line_start_rule_needs_word_boundary() {
        assert_eq!(split_contractions("image"), "image");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(split_contractions(""), "");
    }

    #[test]
    fn test_renormalization_is_idempotent() {
        let samples = [
            "I can't believe it's gonna rain",
            "we'll see, yall",
            "im tired but ive got it",
            "She doesnt know",
            "Don't you dare",
            "I didnt go home",
            "",
        ];
        for sample in samples {
            let once = split_contractions(sample);
            let twice = split_contractions(&once);
            assert_eq!(once, twice, "não idempotente para {sample:?}");
        }
    }

    #[test]
    fn test_single_pass_residue_is_rewritten_again() {
        let cases = [
            ("so im im here", "so i m im here", "so i m i m here"),
            ("so im'll go", "so im 'll go", "so i m 'll go"),
            ("so imn't", "so im n't", "so i m n't"),
            ("Im'll", "Im 'll", "I m 'll"),
            ("didnt'll", "didnt 'll", "did nt 'll"),
            ("didntn't", "did ntn't", "did nt n't"),
            ("didnt n't", "did ntn't", "did nt n't"),
        ];
        for (input, once, twice) in cases {
            assert_eq!(split_contractions(input), once, "{input:?}");
            assert_eq!(split_contractions(once), twice, "{input:?}");
        }
    }

    #[test]
    fn test_guard_skips_already_separated_occurrence() {
        assert_eq!(split_contractions("do n't"), "do n't");
        assert_eq!(split_contractions("n't"), " n't");
    }
}
