//! # morph-core — Desambiguação Morfológica Automática
//!
//! Em línguas aglutinantes como o turco, o analisador morfológico costuma devolver várias
//! análises para a mesma palavra (`kitabın` = "teu livro" ou "do livro"). Este crate escolhe,
//! para cada palavra de uma sentença, uma única análise, usando regras escritas à mão sobre
//! o contexto da sentença.
//!
//! ## Arquitetura do Sistema
//!
//! 1.  **Entrada**: uma [`Sentence`] com as análises candidatas de cada palavra ([`parse`]).
//! 2.  **Assinatura** ([`signature`]): o conjunto de candidatos é reduzido à parte que
//!     realmente difere entre eles (ex: `"P2SG+NOM$PNON+GEN"`).
//! 3.  **Regras** ([`rules`]): a assinatura indexa uma regra; guardas sobre o contexto
//!     ([`predicates`]) decidem qual alternativa vale.
//! 4.  **Seleção** ([`case`]): a alternativa vira um candidato concreto.
//! 5.  **Orquestração** ([`disambiguator`]): quatro passagens em ordem fixa, salvando
//!     a sentença uma vez se algo mudou ([`store`]).
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use morph_core::{AutoDisambiguator, InMemoryStore, RuleBasedDisambiguator, Sentence, Word};
//!
//! let mut sentence = Sentence::new(vec![
//!     Word::from_analyses("Senin", &["sen+PRON+PERS+A2SG+PNON+GEN"]).unwrap(),
//!     Word::from_analyses("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]).unwrap(),
//! ]);
//!
//! let disambiguator = RuleBasedDisambiguator::new();
//! let mut store = InMemoryStore::new();
//! let report = disambiguator.auto_disambiguate(&mut sentence, &mut store).unwrap();
//!
//! assert!(report.saved);
//! assert_eq!(
//!     sentence.word(1).and_then(|w| w.chosen()).map(|p| p.transition_list()),
//!     Some("kitap+NOUN+A3SG+P2SG+NOM")
//! );
//! ```
//!
//! ## Módulos Principais
//!
//! - [`disambiguator`]: as quatro passagens e os eventos emitidos.
//! - [`rules`]: a tabela de regras (JSON embutido ou externo).
//! - [`batch`]: muitas sentenças em paralelo.
//! - [`corpus`]: sentenças de demonstração.

pub mod batch;
pub mod case;
pub mod config;
pub mod corpus;
pub mod disambiguator;
pub mod error;
pub mod parse;
pub mod predicates;
pub mod rules;
pub mod sentence;
pub mod signature;
pub mod store;
pub mod tag;

pub use config::DisambiguatorConfig;
pub use disambiguator::{
    AutoDisambiguator, DisambiguationEvent, DisambiguationReport, EventSink, PassKind, PassOutcome,
    RuleBasedDisambiguator,
};
pub use error::{ConfigError, DisambiguationError, ParseError, RuleTableError, StoreError};
pub use parse::{CandidateParse, CandidateSet, InflectionalGroup};
pub use rules::{Guard, Rule, RuleTable};
pub use sentence::{ResolvedContext, Sentence, Word};
pub use signature::AmbiguitySignature;
pub use store::{InMemoryStore, JsonFileStore, SentenceStore};
pub use tag::MorphologicalTag;
