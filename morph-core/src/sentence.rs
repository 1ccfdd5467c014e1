//! # Sentença em Desambiguação
//!
//! Uma [`Sentence`] é a sequência fixa de palavras vinda do analisador. Cada [`Word`]
//! guarda seu [`CandidateSet`] e, depois de resolvida, o índice da análise escolhida.
//! Nenhuma palavra é inserida ou removida durante a desambiguação.
//!
//! O [`ResolvedContext`] é o registro, da esquerda para a direita, das análises já
//! escolhidas. É ele que os predicados "olham para trás" consultam.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::parse::{CandidateParse, CandidateSet};

/// Forma de troca (JSON) de uma palavra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    pub surface: String,
    #[serde(default)]
    pub analyses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chosen: Option<usize>,
}

/// Uma ocorrência de palavra com suas análises candidatas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WordRecord", into = "WordRecord")]
pub struct Word {
    surface: String,
    candidates: CandidateSet,
    chosen: Option<usize>,
}

impl Word {
    pub fn new(surface: impl Into<String>, candidates: CandidateSet) -> Self {
        Self {
            surface: surface.into(),
            candidates,
            chosen: None,
        }
    }

    /// Atalho: interpreta as listas de transições do analisador.
    pub fn from_analyses<S: AsRef<str>>(surface: &str, analyses: &[S]) -> Result<Self, ParseError> {
        Ok(Self::new(surface, CandidateSet::from_analyses(surface, analyses)?))
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn chosen_index(&self) -> Option<usize> {
        self.chosen
    }

    /// A análise escolhida, se a palavra já foi resolvida.
    pub fn chosen(&self) -> Option<&CandidateParse> {
        self.chosen.and_then(|i| self.candidates.get(i))
    }

    pub fn is_resolved(&self) -> bool {
        self.chosen.is_some()
    }

    /// Fixa a análise `index`. Devolve `false` (sem alterar nada) se o índice não
    /// pertencer ao conjunto ou se a palavra já estiver resolvida.
    pub fn choose(&mut self, index: usize) -> bool {
        if self.chosen.is_some() || index >= self.candidates.len() {
            return false;
        }
        self.chosen = Some(index);
        true
    }
}

impl TryFrom<WordRecord> for Word {
    type Error = ParseError;

    fn try_from(record: WordRecord) -> Result<Self, Self::Error> {
        let mut word = Word::from_analyses(&record.surface, record.analyses.as_slice())?;
        if let Some(index) = record.chosen {
            if !word.choose(index) {
                return Err(ParseError::ChosenOutOfRange {
                    index,
                    len: word.candidates.len(),
                });
            }
        }
        Ok(word)
    }
}

impl From<Word> for WordRecord {
    fn from(word: Word) -> Self {
        WordRecord {
            analyses: word
                .candidates
                .iter()
                .map(|p| p.transition_list().to_string())
                .collect(),
            surface: word.surface,
            chosen: word.chosen,
        }
    }
}

/// A sentença inteira, na ordem do texto.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    words: Vec<Word>,
}

impl Sentence {
    pub fn new(words: Vec<Word>) -> Self {
        Self { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, index: usize) -> Option<&Word> {
        self.words.get(index)
    }

    /// Fixa a análise `candidate` da palavra `index`; `false` se nada mudou.
    pub fn choose(&mut self, index: usize, candidate: usize) -> bool {
        self.words
            .get_mut(index)
            .map(|w| w.choose(candidate))
            .unwrap_or(false)
    }

    /// Forma de superfície da última palavra.
    pub fn last_surface(&self) -> Option<&str> {
        self.words.last().map(Word::surface)
    }

    pub fn resolved_count(&self) -> usize {
        self.words.iter().filter(|w| w.is_resolved()).count()
    }

    pub fn unresolved_count(&self) -> usize {
        self.len() - self.resolved_count()
    }

    /// Contexto com as escolhas atuais de todas as palavras.
    pub fn resolved_context(&self) -> ResolvedContext<'_> {
        ResolvedContext {
            entries: self.words.iter().map(Word::chosen).collect(),
        }
    }
}

/// Análises já escolhidas, alinhadas por índice com a sentença.
///
/// A entrada `i` é `None` quando a palavra `i` continua ambígua. O contexto só cresce:
/// [`ResolvedContext::push`] acrescenta ao final e nada é revertido.
#[derive(Debug, Clone, Default)]
pub struct ResolvedContext<'a> {
    entries: Vec<Option<&'a CandidateParse>>,
}

impl<'a> ResolvedContext<'a> {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, entry: Option<&'a CandidateParse>) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Análise escolhida para a palavra `index`, se houver.
    pub fn get(&self, index: usize) -> Option<&'a CandidateParse> {
        self.entries.get(index).copied().flatten()
    }

    /// Análises resolvidas estritamente à esquerda de `index`, da mais próxima à mais distante.
    pub fn left_of(&self, index: usize) -> impl Iterator<Item = &'a CandidateParse> + '_ {
        let end = index.min(self.entries.len());
        self.entries[..end].iter().rev().filter_map(|e| *e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_word_sentence() -> Sentence {
        Sentence::new(vec![
            Word::from_analyses("Sen", &["sen+PRON+PERS+A2SG+PNON+NOM"]).unwrap(),
            Word::from_analyses("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]).unwrap(),
        ])
    }

    #[test]
    fn test_choose_is_monotonic() {
        let mut s = two_word_sentence();
        assert!(s.choose(1, 0));
        assert!(!s.choose(1, 1), "uma palavra resolvida não muda de escolha");
        assert_eq!(s.word(1).unwrap().chosen_index(), Some(0));
    }

    #[test]
    fn test_choose_rejects_out_of_range() {
        let mut s = two_word_sentence();
        assert!(!s.choose(1, 5));
        assert!(!s.choose(9, 0));
        assert_eq!(s.resolved_count(), 0);
    }

    #[test]
    fn test_context_left_of_skips_unresolved() {
        let mut s = two_word_sentence();
        s.choose(0, 0);
        let ctx = s.resolved_context();
        assert_eq!(ctx.len(), 2);
        assert_eq!(ctx.left_of(2).count(), 1);
        assert_eq!(ctx.left_of(0).count(), 0);
        assert_eq!(ctx.left_of(99).count(), 1);
        assert!(ctx.get(1).is_none());
    }

    #[test]
    fn test_json_round_trip_keeps_choice() {
        let mut s = two_word_sentence();
        s.choose(1, 1);
        let json = serde_json::to_string(&s).unwrap();
        let back: Sentence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert_eq!(back.word(1).unwrap().chosen().unwrap().transition_list(), "kitap+NOUN+A3SG+PNON+GEN");
    }

    #[test]
    fn test_json_rejects_bad_choice() {
        let json = r#"{"words":[{"surface":"ev","analyses":["ev+NOUN+A3SG+PNON+NOM"],"chosen":3}]}"#;
        assert!(serde_json::from_str::<Sentence>(json).is_err());
    }
}
