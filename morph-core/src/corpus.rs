//! # Sentenças de Demonstração em Turco
//!
//! Pequeno conjunto de sentenças já analisadas morfologicamente (a saída que um analisador
//! produziria), cada uma exercitando um tipo de regra. Serve para a página de demonstração
//! e para os testes de cenário.
//!
//! ## Fenômenos Cobertos
//! - Possessivo de 2ª pessoa vs. genitivo (`kitabın`)
//! - Pronome interrogativo em pergunta (`ne`)
//! - Conjunção correlativa `ne ... ne`
//! - Advérbio vs. adjetivo pela classe da palavra seguinte (`çok`)
//! - Posposição regendo ablativo (`sonra`)
//! - Aoristo verbal vs. particípio adjetival (`gelebilir`)
//! - Concordância com possuidor plural (`kitapları`)

use crate::sentence::{Sentence, Word};

/// Uma sentença com as análises de cada palavra.
pub struct DemoSentence {
    /// Texto original, tokens separados por espaço.
    pub text: &'static str,
    /// O que a sentença ilustra.
    pub phenomenon: &'static str,
    /// Pares (superfície, análises candidatas na ordem do analisador).
    pub words: &'static [(&'static str, &'static [&'static str])],
    /// Resolução esperada para as palavras ambíguas: (índice, análise).
    pub expected: &'static [(usize, &'static str)],
}

impl DemoSentence {
    /// # Panics
    /// Se alguma análise embutida for malformada.
    pub fn to_sentence(&self) -> Sentence {
        Sentence::new(
            self.words
                .iter()
                .map(|&(surface, analyses)| {
                    Word::from_analyses(surface, analyses).expect("análise de demonstração válida")
                })
                .collect(),
        )
    }
}

pub fn get_demo_corpus() -> Vec<DemoSentence> {
    vec![
        DemoSentence {
            text: "Senin kitabın burada .",
            phenomenon: "possessivo de 2ª pessoa",
            words: &[
                ("Senin", &["sen+PRON+PERS+A2SG+PNON+GEN"]),
                ("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
                ("burada", &["bura+NOUN+A3SG+PNON+LOC"]),
                (".", &[".+PUNC"]),
            ],
            expected: &[(1, "kitap+NOUN+A3SG+P2SG+NOM")],
        },
        DemoSentence {
            text: "Bu ne ?",
            phenomenon: "pronome interrogativo",
            words: &[
                ("Bu", &["bu+DET", "bu+PRON+DEMONSP+A3SG+PNON+NOM"]),
                ("ne", &["ne+ADJ", "ne+ADV", "ne+CONJ", "ne+PRON+QUESP+A3SG+PNON+NOM"]),
                ("?", &["?+PUNC"]),
            ],
            expected: &[
                (0, "bu+PRON+DEMONSP+A3SG+PNON+NOM"),
                (1, "ne+PRON+QUESP+A3SG+PNON+NOM"),
            ],
        },
        DemoSentence {
            text: "Ne Ali ne Ayşe geldi .",
            phenomenon: "conjunção correlativa",
            words: &[
                ("Ne", &["ne+ADJ", "ne+ADV", "ne+CONJ", "ne+PRON+QUESP+A3SG+PNON+NOM"]),
                ("Ali", &["ali+NOUN+PROP+A3SG+PNON+NOM"]),
                ("ne", &["ne+ADJ", "ne+ADV", "ne+CONJ", "ne+PRON+QUESP+A3SG+PNON+NOM"]),
                ("Ayşe", &["ayşe+NOUN+PROP+A3SG+PNON+NOM"]),
                ("geldi", &["gel+VERB+POS+PAST+A3SG"]),
                (".", &[".+PUNC"]),
            ],
            expected: &[(0, "ne+CONJ"), (2, "ne+CONJ")],
        },
        DemoSentence {
            text: "Çok güzel bir ev aldık .",
            phenomenon: "advérbio antes de adjetivo",
            words: &[
                ("Çok", &["çok+ADJ", "çok+ADV", "çok+DET", "çok+POSTP+PCABL"]),
                ("güzel", &["güzel+ADJ", "güzel+NOUN+A3SG+PNON+NOM"]),
                ("bir", &["bir+ADJ", "bir+ADV", "bir+DET", "bir+NUM+CARD"]),
                ("ev", &["ev+NOUN+A3SG+PNON+NOM"]),
                ("aldık", &["al+VERB+POS+PAST+A1PL"]),
                (".", &[".+PUNC"]),
            ],
            expected: &[(0, "çok+ADV"), (1, "güzel+ADJ"), (2, "bir+DET")],
        },
        DemoSentence {
            text: "Evden sonra okula gittim .",
            phenomenon: "posposição com ablativo",
            words: &[
                ("Evden", &["ev+NOUN+A3SG+PNON+ABL"]),
                ("sonra", &["sonra+ADV", "sonra+NOUN+A3SG+PNON+NOM", "sonra+POSTP+PCABL"]),
                ("okula", &["okul+NOUN+A3SG+PNON+DAT"]),
                ("gittim", &["git+VERB+POS+PAST+A1SG"]),
                (".", &[".+PUNC"]),
            ],
            expected: &[(1, "sonra+POSTP+PCABL")],
        },
        DemoSentence {
            text: "Yarın yağmur gelebilir .",
            phenomenon: "aoristo no fim da sentença",
            words: &[
                ("Yarın", &["yarın+ADV", "yarın+NOUN+A3SG+PNON+NOM"]),
                ("yağmur", &["yağmur+NOUN+A3SG+PNON+NOM"]),
                (
                    "gelebilir",
                    &[
                        "gel+VERB+POS^DB+VERB+ABLE+POS+AOR+A3SG",
                        "gel+VERB+POS^DB+VERB+ABLE+POS+AOR^DB+ADJ+ZERO",
                    ],
                ),
                (".", &[".+PUNC"]),
            ],
            expected: &[(0, "yarın+ADV"), (2, "gel+VERB+POS^DB+VERB+ABLE+POS+AOR+A3SG")],
        },
        DemoSentence {
            text: "Öğrencilerin kitapları masada .",
            phenomenon: "possuidor plural",
            words: &[
                ("Öğrencilerin", &["öğrenci+NOUN+A3PL+P2SG+NOM", "öğrenci+NOUN+A3PL+PNON+GEN"]),
                (
                    "kitapları",
                    &[
                        "kitap+NOUN+A3PL+P3PL+NOM",
                        "kitap+NOUN+A3PL+P3SG+NOM",
                        "kitap+NOUN+A3PL+PNON+ACC",
                        "kitap+NOUN+A3SG+P3PL+NOM",
                    ],
                ),
                ("masada", &["masa+NOUN+A3SG+PNON+LOC"]),
                (".", &[".+PUNC"]),
            ],
            expected: &[(0, "öğrenci+NOUN+A3PL+PNON+GEN"), (1, "kitap+NOUN+A3SG+P3PL+NOM")],
        },
    ]
}

/// As sentenças de demonstração já convertidas, prontas para desambiguar.
pub fn demo_sentences() -> Vec<Sentence> {
    get_demo_corpus().iter().map(DemoSentence::to_sentence).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_corpus_is_well_formed() {
        for demo in get_demo_corpus() {
            let sentence = demo.to_sentence();
            let tokens: Vec<&str> = demo.text.split(' ').collect();
            assert_eq!(tokens.len(), sentence.len(), "{}", demo.text);
            for (i, word) in sentence.words().iter().enumerate() {
                assert_eq!(word.surface(), tokens[i]);
            }
            for (index, analysis) in demo.expected {
                let word = sentence.word(*index).unwrap();
                assert!(word.candidates().transition_lists().contains(analysis));
                assert!(word.candidates().len() > 1, "{} já não é ambígua", word.surface());
            }
        }
    }
}
