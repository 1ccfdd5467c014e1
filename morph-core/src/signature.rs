//! # Assinatura de Ambiguidade
//!
//! A assinatura identifica a **forma** da ambiguidade de uma palavra, independente da
//! palavra em si. Ela é a chave de busca na tabela de regras.
//!
//! ## Construção
//!
//! 1. Remove, enquanto todos os candidatos compartilham, o segmento inicial `XXX+`.
//! 2. Remove, enquanto todos compartilham, o segmento final `+XXX`.
//! 3. Ordena o que sobrou, remove duplicatas e junta com `$`.
//!
//! ```text
//! kitap+NOUN+A3SG+P2SG+NOM      ──►  P2SG+NOM
//! kitap+NOUN+A3SG+PNON+GEN      ──►  PNON+GEN      ──►  "P2SG+NOM$PNON+GEN"
//! ```
//!
//! A ordenação segue a colação das chaves da tabela: `^` vem antes de `+`, dígitos antes
//! de letras (ex: `"AOR^DB+ADJ+ZERO$AOR+A3SG"`). Para a saída do analisador, que já vem
//! ordenada, isso coincide com a ordem de aparição.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse::CandidateSet;

/// Separador das alternativas dentro da assinatura.
pub const ALTERNATIVE_SEPARATOR: char = '$';

/// Chave canônica da ambiguidade de uma palavra.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AmbiguitySignature(String);

impl AmbiguitySignature {
    /// Deriva a assinatura de um conjunto de candidatos.
    ///
    /// Conjunto vazio → `None`. Um único candidato → sua lista sem a raiz.
    pub fn derive(candidates: &CandidateSet) -> Option<Self> {
        let analyses = candidates.transition_lists();
        Self::from_transition_lists(&analyses)
    }

    /// Mesma derivação, a partir das listas de transições cruas.
    pub fn from_transition_lists(analyses: &[&str]) -> Option<Self> {
        match analyses {
            [] => None,
            [single] => {
                let tail = single.find('+').map(|p| &single[p + 1..]).unwrap_or(single);
                Some(Self(tail.to_string()))
            }
            _ => {
                let mut stripped: Vec<&str> = analyses.to_vec();
                strip_common_prefix(&mut stripped);
                strip_common_suffix(&mut stripped);
                stripped.sort_by(|a, b| collate(a, b));
                stripped.dedup();
                Some(Self(stripped.join("$")))
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// As alternativas em competição (ex: `["P2SG+NOM", "PNON+GEN"]`).
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.0.split(ALTERNATIVE_SEPARATOR)
    }

    /// Número de alternativas distintas.
    pub fn width(&self) -> usize {
        self.alternatives().count()
    }
}

impl fmt::Display for AmbiguitySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AmbiguitySignature {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

fn leading_segment(s: &str) -> Option<&str> {
    s.find('+').map(|p| &s[..=p])
}

fn trailing_segment(s: &str) -> Option<&str> {
    s.rfind('+').map(|p| &s[p..])
}

fn strip_common_prefix(analyses: &mut [&str]) {
    loop {
        let head = match leading_segment(analyses[0]) {
            Some(h) => h,
            None => return,
        };
        if !analyses.iter().all(|a| leading_segment(a) == Some(head)) {
            return;
        }
        for a in analyses.iter_mut() {
            let s = *a;
            *a = &s[head.len()..];
        }
    }
}

fn strip_common_suffix(analyses: &mut [&str]) {
    loop {
        let tail = match trailing_segment(analyses[0]) {
            Some(t) => t,
            None => return,
        };
        if !analyses.iter().all(|a| trailing_segment(a) == Some(tail)) {
            return;
        }
        for a in analyses.iter_mut() {
            let s = *a;
            *a = &s[..s.len() - tail.len()];
        }
    }
}

/// Peso de colação de um caractere da lista de transições.
fn weight(c: char) -> (u8, u32) {
    match c {
        '^' => (0, 0),
        '+' => (1, 0),
        '$' => (2, 0),
        '0'..='9' => (3, c as u32),
        c if c.is_alphabetic() => (4, c as u32),
        c => (5, c as u32),
    }
}

fn collate(a: &str, b: &str) -> Ordering {
    a.chars().map(weight).cmp(b.chars().map(weight))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(analyses: &[&str]) -> String {
        AmbiguitySignature::from_transition_lists(analyses)
            .map(|s| s.as_str().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn test_possessive_vs_genitive() {
        assert_eq!(
            sig(&["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
            "P2SG+NOM$PNON+GEN"
        );
    }

    #[test]
    fn test_common_suffix_is_removed() {
        assert_eq!(
            sig(&["kısım+NOUN+A3SG+P2SG+ACC", "kısım+NOUN+A3SG+P3SG+ACC"]),
            "P2SG$P3SG"
        );
    }

    #[test]
    fn test_bare_pos_alternatives() {
        assert_eq!(
            sig(&["bir+ADJ", "bir+ADV", "bir+DET", "bir+NUM+CARD"]),
            "ADJ$ADV$DET$NUM+CARD"
        );
    }

    #[test]
    fn test_derivation_boundary_sorts_before_plus() {
        assert_eq!(
            sig(&[
                "gel+VERB^DB+VERB+ABLE+POS+AOR+A3SG",
                "gel+VERB^DB+VERB+ABLE+POS+AOR^DB+ADJ+ZERO",
            ]),
            "AOR^DB+ADJ+ZERO$AOR+A3SG"
        );
    }

    #[test]
    fn test_input_order_does_not_change_key() {
        let a = sig(&["ne+PRON+QUESP+A3SG+PNON+NOM", "ne+CONJ", "ne+ADV", "ne+ADJ"]);
        let b = sig(&["ne+ADJ", "ne+ADV", "ne+CONJ", "ne+PRON+QUESP+A3SG+PNON+NOM"]);
        assert_eq!(a, "ADJ$ADV$CONJ$PRON+QUESP+A3SG+PNON+NOM");
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_roots_keep_roots() {
        assert_eq!(
            sig(&["o+PRON+PERS+A3SG+PNON+DAT", "on+NUM+CARD^DB+NOUN+ZERO+A3SG+PNON+DAT"]),
            "o+PRON+PERS$on+NUM+CARD^DB+NOUN+ZERO"
        );
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(sig(&["ev+NOUN+A3SG+PNON+NOM", "ev+NOUN+A3SG+PNON+NOM"]), "NOM");
    }

    #[test]
    fn test_single_and_empty() {
        assert_eq!(sig(&["ev+NOUN+A3SG+PNON+NOM"]), "NOUN+A3SG+PNON+NOM");
        assert!(AmbiguitySignature::from_transition_lists(&[]).is_none());
        assert!(AmbiguitySignature::derive(&CandidateSet::default()).is_none());
    }

    #[test]
    fn test_alternatives() {
        let s = AmbiguitySignature::from("ADJ$ADV$POSTP+PCABL");
        assert_eq!(s.alternatives().collect::<Vec<_>>(), vec!["ADJ", "ADV", "POSTP+PCABL"]);
        assert_eq!(s.width(), 3);
    }
}
