//! # Etiquetas Morfológicas
//!
//! O analisador morfológico de estados finitos descreve cada análise como uma
//! sequência de etiquetas (`NOUN`, `A3SG`, `P2SG`, `ABL`, ...). Aqui essas etiquetas
//! formam um **conjunto fechado**: qualquer etiqueta fora da lista é um erro de entrada,
//! não um valor livre.
//!
//! A forma textual (`as_str`) é exatamente a usada pelo analisador, porque as chaves
//! da tabela de regras são construídas a partir dela.
//!
//! | Grupo          | Exemplos                                   |
//! |----------------|--------------------------------------------|
//! | Classe (POS)   | NOUN, ADJ, ADV, VERB, PRON, DET, POSTP     |
//! | Concordância   | A1SG, A2SG, A3SG, A1PL, A2PL, A3PL         |
//! | Possessivo     | P1SG, P2SG, P3SG, P1PL, P2PL, P3PL, PNON   |
//! | Caso           | NOM, ACC, DAT, LOC, ABL, GEN, INS, EQU     |
//! | Tempo/Modo     | AOR, PAST, NARR, FUT, PROG1, PROG2, IMP    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;

macro_rules! morphological_tags {
    ($($(#[$doc:meta])* $variant:ident => $text:literal,)+) => {
        /// Etiqueta morfológica produzida pelo analisador.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "&'static str")]
        pub enum MorphologicalTag {
            $($(#[$doc])* $variant,)+
        }

        impl MorphologicalTag {
            /// Todas as etiquetas, na ordem de declaração.
            pub const ALL: &'static [MorphologicalTag] = &[$(MorphologicalTag::$variant,)+];

            /// Forma textual usada nas listas de transição (ex: `Ablative` → `"ABL"`).
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(MorphologicalTag::$variant => $text,)+
                }
            }

            /// Busca a etiqueta pela forma textual exata.
            pub fn from_label(s: &str) -> Option<Self> {
                match s {
                    $($text => Some(MorphologicalTag::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

morphological_tags! {
    // Classes gramaticais
    Noun => "NOUN",
    Adjective => "ADJ",
    Adverb => "ADV",
    Verb => "VERB",
    Pronoun => "PRON",
    Determiner => "DET",
    Number => "NUM",
    Conjunction => "CONJ",
    Postposition => "POSTP",
    Interjection => "INTERJ",
    Question => "QUES",
    Duplication => "DUP",
    Punctuation => "PUNC",

    // Subclasses
    ProperNoun => "PROP",
    Cardinal => "CARD",
    Ordinal => "ORD",
    Fraction => "FRACTION",
    Distributive => "DIST",
    Range => "RANGE",
    Ratio => "RATIO",
    Real => "REAL",
    Percent => "PERCENT",
    Date => "DATE",
    Time => "TIME",
    DemonstrativePronoun => "DEMONSP",
    PersonalPronoun => "PERS",
    QuestionPronoun => "QUESP",
    QuantitativePronoun => "QUANTP",
    ReflexivePronoun => "REFLEXP",
    Abbreviation => "ABBR",
    Email => "EMAIL",
    Url => "URL",
    Hashtag => "HASHTAG",
    Code => "CODE",
    Metric => "METRIC",

    // Concordância
    A1sg => "A1SG",
    A2sg => "A2SG",
    A3sg => "A3SG",
    A1pl => "A1PL",
    A2pl => "A2PL",
    A3pl => "A3PL",

    // Possessivo
    P1sg => "P1SG",
    P2sg => "P2SG",
    P3sg => "P3SG",
    P1pl => "P1PL",
    P2pl => "P2PL",
    P3pl => "P3PL",
    Pnon => "PNON",

    // Casos
    Nominative => "NOM",
    Accusative => "ACC",
    Dative => "DAT",
    Locative => "LOC",
    Ablative => "ABL",
    Genitive => "GEN",
    Instrumental => "INS",
    Equative => "EQU",

    // Regência de posposições
    PcNominative => "PCNOM",
    PcAccusative => "PCACC",
    PcDative => "PCDAT",
    PcAblative => "PCABL",
    PcGenitive => "PCGEN",
    PcInstrumental => "PCINS",

    // Polaridade, voz e modalidade verbal
    Positive => "POS",
    Negative => "NEG",
    Able => "ABLE",
    Passive => "PASS",
    Causative => "CAUS",
    Reciprocal => "RECIP",
    Reflexive => "REFLEX",
    Hastily => "HASTILY",
    EverSince => "EVERSINCE",
    Repeat => "REPEAT",
    Almost => "ALMOST",
    Stay => "STAY",
    Start => "START",

    // Tempo, aspecto e modo
    Aorist => "AOR",
    Past => "PAST",
    Narrative => "NARR",
    Future => "FUT",
    Progressive1 => "PROG1",
    Progressive2 => "PROG2",
    Present => "PRES",
    Imperative => "IMP",
    Optative => "OPT",
    Desire => "DESR",
    Conditional => "COND",
    Necessity => "NECES",
    Copula => "COP",

    // Derivações nominais e adjetivais
    Zero => "ZERO",
    Infinitive => "INF",
    Infinitive1 => "INF1",
    Infinitive2 => "INF2",
    Infinitive3 => "INF3",
    PastParticiple => "PASTPART",
    FutureParticiple => "FUTPART",
    PresentParticiple => "PRESPART",
    Agent => "AGT",
    With => "WITH",
    Without => "WITHOUT",
    Ness => "NESS",
    Ly => "LY",
    AsIf => "ASIF",
    JustLike => "JUSTLIKE",
    Since => "SINCE",
    FitFor => "FITFOR",
    Related => "RELATED",
    /// Relativo `-ki` (`evdeki`, `bugünkü`).
    Relative => "REL",
    Diminutive => "DIM",
    Acquire => "ACQUIRE",
    Become => "BECOME",
    FeelLike => "FEELLIKE",
    NotState => "NOTSTATE",
    Adamantly => "ADAMANTLY",
    InBetween => "INBETWEEN",
    ActOf => "ACTOF",

    // Derivações adverbiais
    When => "WHEN",
    While => "WHILE",
    ByDoingSo => "BYDOINGSO",
    AfterDoingSo => "AFTERDOINGSO",
    SinceDoingSo => "SINCEDOINGSO",
    WithoutHavingDoneSo => "WITHOUTHAVINGDONESO",
    WithoutBeingAbleToHaveDoneSo => "WITHOUTBEINGABLETOHAVEDONESO",
    AsLongAs => "ASLONGAS",
    As => "AS",

    // Marcas de estrutura do texto
    BeginSentence => "BSTAG",
    EndSentence => "ESTAG",
    BeginTitle => "BTTAG",
    EndTitle => "ETTAG",
    BeginDocument => "BDTAG",
    EndDocument => "EDTAG",
}

impl MorphologicalTag {
    /// Etiquetas que abrem um grupo flexional como classe gramatical.
    pub fn is_part_of_speech(&self) -> bool {
        matches!(
            self,
            MorphologicalTag::Noun
                | MorphologicalTag::Adjective
                | MorphologicalTag::Adverb
                | MorphologicalTag::Verb
                | MorphologicalTag::Pronoun
                | MorphologicalTag::Determiner
                | MorphologicalTag::Number
                | MorphologicalTag::Conjunction
                | MorphologicalTag::Postposition
                | MorphologicalTag::Interjection
                | MorphologicalTag::Question
                | MorphologicalTag::Duplication
                | MorphologicalTag::Punctuation
        )
    }

    /// Concordância de plural (A1PL, A2PL, A3PL).
    pub fn is_plural_agreement(&self) -> bool {
        matches!(
            self,
            MorphologicalTag::A1pl | MorphologicalTag::A2pl | MorphologicalTag::A3pl
        )
    }

    pub fn is_case(&self) -> bool {
        matches!(
            self,
            MorphologicalTag::Nominative
                | MorphologicalTag::Accusative
                | MorphologicalTag::Dative
                | MorphologicalTag::Locative
                | MorphologicalTag::Ablative
                | MorphologicalTag::Genitive
                | MorphologicalTag::Instrumental
                | MorphologicalTag::Equative
        )
    }
}

impl fmt::Display for MorphologicalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MorphologicalTag {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| ParseError::UnknownTag {
            tag: s.to_string(),
            analysis: s.to_string(),
        })
    }
}

impl TryFrom<String> for MorphologicalTag {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MorphologicalTag> for &'static str {
    fn from(tag: MorphologicalTag) -> Self {
        tag.as_str()
    }
}
