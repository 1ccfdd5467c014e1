//! # Tabela de Regras
//!
//! Cada entrada liga uma [`AmbiguitySignature`] a uma lista ordenada de escolhas
//! guardadas. A avaliação é de cima para baixo e a primeira guarda verdadeira vence;
//! se nenhuma vale, a palavra continua ambígua.
//!
//! ```text
//! "P2SG+NOM$PNON+GEN"
//!     any_left_second_person  ──►  "P2SG+NOM"
//!     (sempre)                ──►  "PNON+GEN"
//! ```
//!
//! ## Regras como dados
//!
//! As ~175 entradas vivem em `data/rules.json`, embutido no binário com `include_str!`.
//! As guardas são um vocabulário pequeno e fechado ([`Guard`]) que chama as funções de
//! [`crate::predicates`]; combinadores `not`/`all`/`any` cobrem os casos compostos.
//!
//! ## Validação na carga
//!
//! | Verificação                            | Erro                                   |
//! |----------------------------------------|----------------------------------------|
//! | Forma da chave (regex)                 | [`RuleTableError::MalformedSignature`] |
//! | Etiquetas da chave no conjunto fechado | [`RuleTableError::UnknownTag`]         |
//! | Chave repetida                         | [`RuleTableError::DuplicateSignature`] |
//! | Regra sem escolhas                     | [`RuleTableError::EmptyRule`]          |
//! | Escolha fora das alternativas da chave | [`RuleTableError::ForeignChoice`]      |
//!
//! A última garante que a tabela nunca inventa uma análise: toda escolha é literalmente
//! uma das alternativas da própria assinatura.

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RuleTableError;
use crate::parse::CandidateParse;
use crate::predicates;
use crate::sentence::{ResolvedContext, Sentence};
use crate::signature::{AmbiguitySignature, ALTERNATIVE_SEPARATOR};
use crate::tag::MorphologicalTag;

const BUILTIN_RULES: &str = include_str!("data/rules.json");

/// Uma alternativa de assinatura: etiquetas unidas por `+` ou `^DB+`, com `^DB` final opcional.
static SIGNATURE_ALTERNATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9]+(?:(?:\+|\^DB\+)[A-Z0-9]+)*(?:\^DB)?$").expect("valid signature regex")
});

/// Condição de contexto que protege uma escolha.
///
/// Serializada em `snake_case`: `"not_first_word"`, `{"preceding_word_has_tag": {"tag": "ABL"}}`,
/// `{"all": ["not_first_word", "capitalized"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guard {
    #[default]
    Always,
    FirstWord,
    NotFirstWord,
    PenultimateWord,
    HasNextWord,
    /// A2SG ou P2SG em qualquer palavra resolvida à esquerda.
    AnyLeftSecondPerson,
    PrecedingNounPlural,
    /// Etiqueta (normalmente de caso) no vizinho imediato à esquerda.
    PrecedingWordHasTag { tag: MorphologicalTag },
    /// Classe majoritária da próxima palavra em uma das classes listadas.
    NextWordPosIn { pos: Vec<MorphologicalTag> },
    NextWordNoun,
    NextWordNum,
    /// NOUN, ADJ ou DET.
    NextWordNounOrAdjective,
    QuestionSentence,
    SurfaceOccursTwice { form: String },
    NextSurfaceIs {
        form: String,
        #[serde(default)]
        ignore_case: bool,
    },
    /// Palavra anterior ou seguinte com exatamente essa forma.
    NeighborSurfaceIs { form: String },
    SurfaceIs { form: String },
    RootIn {
        roots: Vec<String>,
        #[serde(default)]
        ignore_case: bool,
    },
    Capitalized,
    /// Classe final do primeiro candidato (`"PROP"` para nomes próprios).
    FinalPosIs { pos: MorphologicalTag },
    Not(Box<Guard>),
    All(Vec<Guard>),
    Any(Vec<Guard>),
}

/// O que uma guarda pode olhar: a posição, a sentença crua e o contexto resolvido.
#[derive(Debug, Clone, Copy)]
pub struct GuardInput<'a> {
    pub index: usize,
    pub sentence: &'a Sentence,
    pub context: &'a ResolvedContext<'a>,
}

impl<'a> GuardInput<'a> {
    pub fn new(index: usize, sentence: &'a Sentence, context: &'a ResolvedContext<'a>) -> Self {
        Self { index, sentence, context }
    }

    /// Raiz, superfície e capitalização vêm do primeiro candidato.
    fn first_candidate(&self) -> Option<&'a CandidateParse> {
        self.sentence.word(self.index).and_then(|w| w.candidates().first())
    }

    fn surface(&self) -> Option<&'a str> {
        self.first_candidate().map(CandidateParse::surface_form)
    }
}

impl Guard {
    pub fn is_always(&self) -> bool {
        matches!(self, Guard::Always)
    }

    /// Avalia a guarda. Total: posições inexistentes simplesmente não satisfazem nada.
    pub fn holds(&self, at: &GuardInput<'_>) -> bool {
        let (i, sentence, context) = (at.index, at.sentence, at.context);
        match self {
            Guard::Always => true,
            Guard::FirstWord => predicates::is_first_word(i),
            Guard::NotFirstWord => !predicates::is_first_word(i),
            Guard::PenultimateWord => predicates::is_penultimate_word(i, sentence),
            Guard::HasNextWord => predicates::has_next_word(i, sentence),
            Guard::AnyLeftSecondPerson => predicates::any_left_word_second_person(i, context),
            Guard::PrecedingNounPlural => predicates::preceding_noun_is_plural(i, context),
            Guard::PrecedingWordHasTag { tag } => predicates::preceding_word_has_case_tag(i, context, *tag),
            Guard::NextWordPosIn { pos } => predicates::next_word_is_any_pos(i, sentence, pos),
            Guard::NextWordNoun => predicates::next_word_is_pos(i, sentence, MorphologicalTag::Noun),
            Guard::NextWordNum => predicates::next_word_is_pos(i, sentence, MorphologicalTag::Number),
            Guard::NextWordNounOrAdjective => predicates::next_word_is_noun_or_adjective_like(i, sentence),
            Guard::QuestionSentence => predicates::sentence_ends_with_question_mark(sentence),
            Guard::SurfaceOccursTwice { form } => predicates::surface_form_occurs_exactly_twice(sentence, form),
            Guard::NextSurfaceIs { form, ignore_case } => {
                predicates::next_surface_is(i, sentence, form, *ignore_case)
            }
            Guard::NeighborSurfaceIs { form } => predicates::neighbor_surface_is(i, sentence, form),
            Guard::SurfaceIs { form } => at.surface() == Some(form.as_str()),
            Guard::RootIn { roots, ignore_case } => match at.first_candidate() {
                Some(parse) if *ignore_case => {
                    let root = parse.root().to_lowercase();
                    roots.iter().any(|r| r.to_lowercase() == root)
                }
                Some(parse) => roots.iter().any(|r| r == parse.root()),
                None => false,
            },
            Guard::Capitalized => at
                .first_candidate()
                .map(CandidateParse::is_capital_word)
                .unwrap_or(false),
            Guard::FinalPosIs { pos } => at
                .first_candidate()
                .map(|p| p.final_pos() == pos.as_str())
                .unwrap_or(false),
            Guard::Not(inner) => !inner.holds(at),
            Guard::All(guards) => guards.iter().all(|g| g.holds(at)),
            Guard::Any(guards) => guards.iter().any(|g| g.holds(at)),
        }
    }
}

/// Uma escolha e a guarda que a libera. Sem `when`, a escolha é incondicional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuardedChoice {
    #[serde(default, skip_serializing_if = "Guard::is_always")]
    pub when: Guard,
    pub choose: String,
}

/// Entrada da tabela.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub signature: String,
    /// Palavras que motivaram a regra (documentação).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    pub choices: Vec<GuardedChoice>,
}

impl Rule {
    pub fn alternatives(&self) -> impl Iterator<Item = &str> {
        self.signature.split(ALTERNATIVE_SEPARATOR)
    }

    fn validate(&self) -> Result<(), RuleTableError> {
        for alternative in self.alternatives() {
            if !SIGNATURE_ALTERNATIVE.is_match(alternative) {
                return Err(RuleTableError::MalformedSignature {
                    signature: self.signature.clone(),
                });
            }
            let labels = alternative
                .split(['+', '^'])
                .filter(|l| !l.is_empty() && *l != "DB");
            for label in labels {
                if MorphologicalTag::from_label(label).is_none() {
                    return Err(RuleTableError::UnknownTag {
                        signature: self.signature.clone(),
                        tag: label.to_string(),
                    });
                }
            }
        }

        if self.choices.is_empty() {
            return Err(RuleTableError::EmptyRule {
                signature: self.signature.clone(),
            });
        }
        for choice in &self.choices {
            if !self.alternatives().any(|a| a == choice.choose) {
                return Err(RuleTableError::ForeignChoice {
                    signature: self.signature.clone(),
                    choice: choice.choose.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Resultado de uma consulta bem-sucedida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'t> {
    /// Alternativa escolhida (substring a casar com a lista de transições).
    pub choice: &'t str,
    /// Posição, dentro da regra, da guarda que disparou.
    pub guard: usize,
}

/// Mapa assinatura → regra, validado uma vez na construção.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<Rule>,
    by_signature: HashMap<String, usize>,
}

impl RuleTable {
    /// Tabela embutida no binário.
    ///
    /// # Panics
    /// Só se `data/rules.json` estiver inválido, o que os testes da crate impedem.
    pub fn builtin() -> Self {
        Self::from_json(BUILTIN_RULES).expect("embedded rule table is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, RuleTableError> {
        let rules: Vec<Rule> = serde_json::from_str(json)?;
        Self::from_rules(rules)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| RuleTableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn from_rules(rules: Vec<Rule>) -> Result<Self, RuleTableError> {
        let mut by_signature = HashMap::with_capacity(rules.len());
        for (i, rule) in rules.iter().enumerate() {
            rule.validate()?;
            if by_signature.insert(rule.signature.clone(), i).is_some() {
                return Err(RuleTableError::DuplicateSignature {
                    signature: rule.signature.clone(),
                });
            }
        }
        debug!(rules = rules.len(), "tabela de regras carregada");
        Ok(Self { rules, by_signature })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn get(&self, signature: &str) -> Option<&Rule> {
        self.by_signature.get(signature).map(|&i| &self.rules[i])
    }

    /// Consulta a regra da assinatura e devolve a primeira escolha cuja guarda vale.
    ///
    /// Assinatura desconhecida ou nenhuma guarda satisfeita → `None` (palavra segue ambígua).
    pub fn resolve(
        &self,
        signature: &AmbiguitySignature,
        index: usize,
        sentence: &Sentence,
        context: &ResolvedContext<'_>,
    ) -> Option<Resolution<'_>> {
        let rule = self.get(signature.as_str())?;
        let input = GuardInput::new(index, sentence, context);
        rule.choices
            .iter()
            .enumerate()
            .find(|(_, c)| c.when.holds(&input))
            .map(|(guard, c)| Resolution {
                choice: c.choose.as_str(),
                guard,
            })
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::CandidateSet;
    use crate::sentence::Word;

    fn word(surface: &str, analyses: &[&str]) -> Word {
        Word::from_analyses(surface, analyses).unwrap()
    }

    fn rule(signature: &str, choices: &[&str]) -> Rule {
        Rule {
            signature: signature.to_string(),
            examples: vec![],
            choices: choices
                .iter()
                .map(|c| GuardedChoice {
                    when: Guard::Always,
                    choose: c.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = RuleTable::builtin();
        assert_eq!(table.len(), 175);
        assert!(table.get("P2SG+NOM$PNON+GEN").is_some());
        assert!(table.get("ADJ$ADV$CONJ$PRON+QUESP+A3SG+PNON+NOM").is_some());
    }

    #[test]
    fn test_guard_json_shapes() {
        let g: Guard = serde_json::from_str(r#"{"all": ["not_first_word", "capitalized"]}"#).unwrap();
        assert_eq!(g, Guard::All(vec![Guard::NotFirstWord, Guard::Capitalized]));

        let g: Guard = serde_json::from_str(r#"{"preceding_word_has_tag": {"tag": "ABL"}}"#).unwrap();
        assert_eq!(g, Guard::PrecedingWordHasTag { tag: MorphologicalTag::Ablative });

        let g: Guard = serde_json::from_str(r#"{"root_in": {"roots": ["var"]}}"#).unwrap();
        assert_eq!(
            g,
            Guard::RootIn {
                roots: vec!["var".to_string()],
                ignore_case: false
            }
        );

        let c: GuardedChoice = serde_json::from_str(r#"{"choose": "DET"}"#).unwrap();
        assert!(c.when.is_always());
    }

    #[test]
    fn test_validation_errors() {
        let dup = vec![rule("ADJ$ADV", &["ADV"]), rule("ADJ$ADV", &["ADJ"])];
        assert!(matches!(
            RuleTable::from_rules(dup),
            Err(RuleTableError::DuplicateSignature { .. })
        ));
        assert!(matches!(
            RuleTable::from_rules(vec![rule("ADJ$ADV", &["NOUN"])]),
            Err(RuleTableError::ForeignChoice { choice, .. }) if choice == "NOUN"
        ));
        assert!(matches!(
            RuleTable::from_rules(vec![rule("ADJ$ADV", &[])]),
            Err(RuleTableError::EmptyRule { .. })
        ));
        assert!(matches!(
            RuleTable::from_rules(vec![rule("adj$ADV", &["ADV"])]),
            Err(RuleTableError::MalformedSignature { .. })
        ));
        assert!(matches!(
            RuleTable::from_rules(vec![rule("ADJ$FOO", &["ADJ"])]),
            Err(RuleTableError::UnknownTag { tag, .. }) if tag == "FOO"
        ));
        assert!(matches!(RuleTable::from_json("{"), Err(RuleTableError::Json(_))));
    }

    #[test]
    fn test_resolve_second_person() {
        let table = RuleTable::builtin();
        let mut s = Sentence::new(vec![
            word("Senin", &["sen+PRON+PERS+A2SG+PNON+GEN"]),
            word("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
        ]);
        s.choose(0, 0);
        let sig = AmbiguitySignature::derive(s.word(1).unwrap().candidates()).unwrap();
        let ctx = s.resolved_context();
        let r = table.resolve(&sig, 1, &s, &ctx).unwrap();
        assert_eq!(r, Resolution { choice: "P2SG+NOM", guard: 0 });

        let empty = ResolvedContext::new();
        let r = table.resolve(&sig, 1, &s, &empty).unwrap();
        assert_eq!(r, Resolution { choice: "PNON+GEN", guard: 1 });
    }

    #[test]
    fn test_resolve_can_stay_unresolved() {
        let table = RuleTable::builtin();
        let s = Sentence::new(vec![
            word("Ocak", &["ocak+NOUN+A3SG+PNON+NOM", "ocak+NOUN+PROP+A3SG+PNON+NOM"]),
            word("çok", &["çok+ADJ", "çok+ADV", "çok+DET", "çok+POSTP+PCABL"]),
            word(".", &[".+PUNC"]),
        ]);
        let ctx = ResolvedContext::new();

        let ocak = AmbiguitySignature::derive(s.word(0).unwrap().candidates()).unwrap();
        assert_eq!(ocak.as_str(), "A3SG$PROP+A3SG");
        assert!(table.resolve(&ocak, 0, &s, &ctx).is_none(), "primeira palavra não vira nome próprio");

        let cok = AmbiguitySignature::derive(s.word(1).unwrap().candidates()).unwrap();
        assert!(table.resolve(&cok, 1, &s, &ctx).is_none(), "pontuação à direita não decide");

        assert!(table.resolve(&AmbiguitySignature::from("XYZ"), 0, &s, &ctx).is_none());
    }

    #[test]
    fn test_root_and_surface_guards() {
        let s = Sentence::new(vec![
            word("Yıllardır", &["yıl+NOUN+A3PL+PNON+NOM^DB+ADV+SINCE"]),
            word("sık", &["sık+ADV"]),
            word("sık", &["sık+ADV"]),
        ]);
        let ctx = ResolvedContext::new();
        let at = GuardInput::new(0, &s, &ctx);
        let folded = Guard::RootIn {
            roots: vec!["YIL".to_string()],
            ignore_case: true,
        };
        assert!(!folded.holds(&at), "YIL em minúsculas é yil, não yıl");
        let exact = Guard::RootIn {
            roots: vec!["yıl".to_string()],
            ignore_case: false,
        };
        assert!(exact.holds(&at));
        assert!(Guard::Capitalized.holds(&at));

        let at = GuardInput::new(2, &s, &ctx);
        let repeated = Guard::All(vec![
            Guard::SurfaceIs { form: "sık".to_string() },
            Guard::NeighborSurfaceIs { form: "sık".to_string() },
        ]);
        assert!(repeated.holds(&at));
        assert!(!Guard::Not(Box::new(repeated)).holds(&at));
    }

    #[test]
    fn test_surface_guard_reads_first_candidate() {
        let candidates = CandidateSet::new(vec![CandidateParse::new("Ya", "ya+CONJ").unwrap()]);
        let s = Sentence::new(vec![
            Word::new("YA", candidates),
            Word::new("ya", CandidateSet::default()),
        ]);
        let ctx = ResolvedContext::new();
        let guard = Guard::SurfaceIs { form: "Ya".to_string() };
        assert!(guard.holds(&GuardInput::new(0, &s, &ctx)));
        assert!(!Guard::SurfaceIs { form: "YA".to_string() }.holds(&GuardInput::new(0, &s, &ctx)));
        // sem candidatos não há superfície a comparar
        let at = GuardInput::new(1, &s, &ctx);
        assert!(!Guard::SurfaceIs { form: "ya".to_string() }.holds(&at));
        assert!(!Guard::Capitalized.holds(&at));
    }

    #[test]
    fn test_from_path_loads_replacement_table() {
        let path = std::env::temp_dir().join(format!("morph-rules-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"signature": "P2SG$PNON", "choices": [{"when": "any_left_second_person", "choose": "P2SG"}, {"choose": "PNON"}]}]"#,
        )
        .unwrap();
        let table = RuleTable::from_path(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(table.len(), 1);
        let rule = table.get("P2SG$PNON").unwrap();
        assert_eq!(rule.choices[0].when, Guard::AnyLeftSecondPerson);
        assert!(rule.choices[1].when.is_always());
        assert!(table.get("P2SG+NOM$PNON+GEN").is_none());
    }
}
