//! # Orquestrador de Desambiguação
//!
//! Aplica, sobre uma sentença inteira, quatro passagens em ordem fixa:
//!
//! | # | Passagem                 | Resolve                                              |
//! |---|--------------------------|------------------------------------------------------|
//! | 1 | `SingleAnalysis`         | palavras com um único candidato                      |
//! | 2 | `Rules`                  | o que a tabela de regras decide, da esquerda p/ direita |
//! | 3 | `SingleRootWords`        | ambiguidade só flexional (uma raiz)                  |
//! | 4 | `MultipleRootWords`      | ambiguidade lexical (raízes diferentes)              |
//!
//! As quatro passagens **sempre** rodam: cada uma cuida de um tipo de ambiguidade e o
//! resultado de uma não dispensa as outras. A sentença é salva uma única vez, no fim, e
//! só se alguma passagem mudou alguma coisa.
//!
//! ## Eventos
//!
//! Como no pipeline de NER, cada etapa pode ser observada por um canal `mpsc`
//! ([`DisambiguationEvent`]); o servidor WebSocket repassa esses eventos ao navegador.
//!
//! ## Monotonicidade
//!
//! Uma passagem só escolhe para palavras ainda sem escolha. Rodar o orquestrador de novo
//! sobre uma sentença resolvida não muda nada e não dispara `save`.

use std::sync::mpsc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::case;
use crate::config::DisambiguatorConfig;
use crate::error::{ConfigError, DisambiguationError};
use crate::parse::CandidateSet;
use crate::rules::RuleTable;
use crate::sentence::{ResolvedContext, Sentence};
use crate::store::SentenceStore;

/// Identifica cada uma das quatro passagens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassKind {
    SingleAnalysis,
    Rules,
    SingleRootWords,
    MultipleRootWords,
}

impl PassKind {
    /// Ordem de execução.
    pub const ALL: [PassKind; 4] = [
        PassKind::SingleAnalysis,
        PassKind::Rules,
        PassKind::SingleRootWords,
        PassKind::MultipleRootWords,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PassKind::SingleAnalysis => "single_analysis",
            PassKind::Rules => "rules",
            PassKind::SingleRootWords => "single_root_words",
            PassKind::MultipleRootWords => "multiple_root_words",
        }
    }
}

/// O que uma passagem fez.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: PassKind,
    pub changed: bool,
    /// Palavras resolvidas nesta passagem.
    pub resolved: usize,
}

/// Resumo de uma execução do orquestrador.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisambiguationReport {
    pub passes: Vec<PassOutcome>,
    /// Palavras resolvidas ao final (incluindo as que já chegaram resolvidas).
    pub resolved: usize,
    pub unresolved: usize,
    pub saved: bool,
    pub processing_ms: u64,
}

impl DisambiguationReport {
    /// Alguma passagem mudou a sentença?
    pub fn modified(&self) -> bool {
        self.passes.iter().any(|p| p.changed)
    }

    pub fn pass(&self, kind: PassKind) -> Option<&PassOutcome> {
        self.passes.iter().find(|p| p.pass == kind)
    }
}

/// Eventos emitidos durante a desambiguação.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum DisambiguationEvent {
    PassStarted {
        pass: PassKind,
    },
    /// Uma palavra recebeu sua análise.
    WordResolved {
        index: usize,
        surface: String,
        analysis: String,
        pass: PassKind,
        /// Assinatura da regra usada (só na passagem de regras).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        rule: Option<String>,
    },
    PassFinished {
        pass: PassKind,
        changed: bool,
        resolved: usize,
    },
    Saved,
    Done {
        report: DisambiguationReport,
    },
}

/// Destino opcional dos eventos. Sem canal, os eventos são descartados.
#[derive(Debug, Clone, Default)]
pub struct EventSink {
    tx: Option<mpsc::Sender<DisambiguationEvent>>,
}

impl EventSink {
    pub fn silent() -> Self {
        Self { tx: None }
    }

    pub fn channel(tx: mpsc::Sender<DisambiguationEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn emit(&self, event: DisambiguationEvent) {
        if let Some(tx) = &self.tx {
            // receptor fechado não interrompe a desambiguação
            let _ = tx.send(event);
        }
    }

    fn word_resolved(&self, sentence: &Sentence, index: usize, pass: PassKind, rule: Option<String>) {
        let Some(word) = sentence.word(index) else {
            return;
        };
        let analysis = word.chosen().map(|p| p.transition_list()).unwrap_or_default();
        debug!(index, surface = word.surface(), analysis, pass = pass.label(), "palavra resolvida");
        if self.tx.is_some() {
            self.emit(DisambiguationEvent::WordResolved {
                index,
                surface: word.surface().to_string(),
                analysis: analysis.to_string(),
                pass,
                rule,
            });
        }
    }
}

/// As quatro passagens e a orquestração entre elas.
///
/// Quem implementa fornece as passagens; a ordem, o relatório e a decisão de salvar
/// vêm prontos nos métodos padrão.
pub trait AutoDisambiguator {
    fn auto_fill_single_analysis(&self, sentence: &mut Sentence, events: &EventSink) -> bool;
    fn auto_disambiguate_with_rules(&self, sentence: &mut Sentence, events: &EventSink) -> bool;
    fn auto_disambiguate_single_root_words(&self, sentence: &mut Sentence, events: &EventSink) -> bool;
    fn auto_disambiguate_multiple_root_words(&self, sentence: &mut Sentence, events: &EventSink) -> bool;

    /// Roda as quatro passagens, sem salvar.
    fn run_passes(&self, sentence: &mut Sentence, events: &EventSink) -> DisambiguationReport {
        let start = Instant::now();
        let mut passes = Vec::with_capacity(PassKind::ALL.len());

        for pass in PassKind::ALL {
            events.emit(DisambiguationEvent::PassStarted { pass });
            let before = sentence.resolved_count();
            let changed = match pass {
                PassKind::SingleAnalysis => self.auto_fill_single_analysis(sentence, events),
                PassKind::Rules => self.auto_disambiguate_with_rules(sentence, events),
                PassKind::SingleRootWords => self.auto_disambiguate_single_root_words(sentence, events),
                PassKind::MultipleRootWords => self.auto_disambiguate_multiple_root_words(sentence, events),
            };
            let resolved = sentence.resolved_count().saturating_sub(before);
            debug!(pass = pass.label(), changed, resolved, "passagem concluída");
            events.emit(DisambiguationEvent::PassFinished { pass, changed, resolved });
            passes.push(PassOutcome { pass, changed, resolved });
        }

        DisambiguationReport {
            passes,
            resolved: sentence.resolved_count(),
            unresolved: sentence.unresolved_count(),
            saved: false,
            processing_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Desambigua e salva uma vez, se algo mudou.
    fn auto_disambiguate(
        &self,
        sentence: &mut Sentence,
        store: &mut dyn SentenceStore,
    ) -> Result<DisambiguationReport, DisambiguationError> {
        self.disambiguate_and_save(sentence, store, &EventSink::silent())
    }

    /// Como [`AutoDisambiguator::auto_disambiguate`], enviando os eventos por `tx`.
    fn auto_disambiguate_streaming(
        &self,
        sentence: &mut Sentence,
        store: &mut dyn SentenceStore,
        tx: mpsc::Sender<DisambiguationEvent>,
    ) -> Result<DisambiguationReport, DisambiguationError> {
        self.disambiguate_and_save(sentence, store, &EventSink::channel(tx))
    }

    fn disambiguate_and_save(
        &self,
        sentence: &mut Sentence,
        store: &mut dyn SentenceStore,
        events: &EventSink,
    ) -> Result<DisambiguationReport, DisambiguationError> {
        let mut report = self.run_passes(sentence, events);
        if report.modified() {
            store.save(sentence)?;
            report.saved = true;
            info!(
                resolved = report.resolved,
                unresolved = report.unresolved,
                "sentença modificada e salva"
            );
            events.emit(DisambiguationEvent::Saved);
        }
        events.emit(DisambiguationEvent::Done { report: report.clone() });
        Ok(report)
    }
}

/// Desambiguador dirigido pela tabela de regras.
#[derive(Debug, Clone)]
pub struct RuleBasedDisambiguator {
    table: RuleTable,
    config: DisambiguatorConfig,
}

impl RuleBasedDisambiguator {
    /// Tabela embutida, configuração padrão.
    pub fn new() -> Self {
        Self::with_table(RuleTable::builtin())
    }

    pub fn with_table(table: RuleTable) -> Self {
        Self {
            table,
            config: DisambiguatorConfig::default(),
        }
    }

    pub fn with_config(table: RuleTable, config: DisambiguatorConfig) -> Self {
        Self { table, config }
    }

    /// Carrega a tabela indicada na configuração (ou a embutida).
    pub fn from_config(config: DisambiguatorConfig) -> Result<Self, ConfigError> {
        let table = config.load_rules()?;
        Ok(Self { table, config })
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn config(&self) -> &DisambiguatorConfig {
        &self.config
    }
}

impl Default for RuleBasedDisambiguator {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidato com menos grupos flexionais; o primeiro vence em empate.
fn least_derived(candidates: &CandidateSet) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .min_by_key(|(_, parse)| parse.group_count())
        .map(|(i, _)| i)
}

/// Aplica as decisões coletadas e avisa quem estiver ouvindo.
fn apply(
    sentence: &mut Sentence,
    decisions: Vec<(usize, usize, Option<String>)>,
    pass: PassKind,
    events: &EventSink,
) -> bool {
    let mut changed = false;
    for (index, candidate, rule) in decisions {
        if sentence.choose(index, candidate) {
            changed = true;
            events.word_resolved(sentence, index, pass, rule);
        }
    }
    changed
}

impl AutoDisambiguator for RuleBasedDisambiguator {
    fn auto_fill_single_analysis(&self, sentence: &mut Sentence, events: &EventSink) -> bool {
        let decisions = sentence
            .words()
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_resolved() && w.candidates().len() == 1)
            .map(|(i, _)| (i, 0, None))
            .collect();
        apply(sentence, decisions, PassKind::SingleAnalysis, events)
    }

    fn auto_disambiguate_with_rules(&self, sentence: &mut Sentence, events: &EventSink) -> bool {
        let decisions = {
            let frozen: &Sentence = sentence;
            let mut context = ResolvedContext::with_capacity(frozen.len());
            let mut decisions = Vec::new();

            for (index, word) in frozen.words().iter().enumerate() {
                if let Some(chosen) = word.chosen() {
                    context.push(Some(chosen));
                    continue;
                }
                match case::case_disambiguate(&self.table, index, frozen, &context) {
                    Some(decision) => {
                        context.push(word.candidates().get(decision.candidate));
                        decisions.push((index, decision.candidate, Some(decision.signature.to_string())));
                    }
                    None => context.push(None),
                }
            }
            decisions
        };
        apply(sentence, decisions, PassKind::Rules, events)
    }

    fn auto_disambiguate_single_root_words(&self, sentence: &mut Sentence, events: &EventSink) -> bool {
        if !self.config.single_root_pass {
            return false;
        }
        let decisions = sentence
            .words()
            .iter()
            .enumerate()
            .filter(|(_, w)| !w.is_resolved() && w.candidates().len() > 1)
            .filter(|(_, w)| w.candidates().root_words().len() == 1)
            .filter_map(|(i, w)| least_derived(w.candidates()).map(|c| (i, c, None)))
            .collect();
        apply(sentence, decisions, PassKind::SingleRootWords, events)
    }

    fn auto_disambiguate_multiple_root_words(&self, sentence: &mut Sentence, events: &EventSink) -> bool {
        if !self.config.multiple_root_pass {
            return false;
        }
        let decisions = {
            let frozen: &Sentence = sentence;
            let mut decisions = Vec::new();
            for (index, word) in frozen.words().iter().enumerate() {
                if word.is_resolved() || word.candidates().root_words().len() < 2 {
                    continue;
                }
                // raízes já escolhidas no resto da sentença, no início da passagem
                let known: Vec<&str> = frozen
                    .words()
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != index)
                    .filter_map(|(_, w)| w.chosen())
                    .map(|p| p.root())
                    .collect();
                let candidates = word.candidates();
                let pick = candidates
                    .iter()
                    .position(|p| known.contains(&p.root()))
                    .or_else(|| candidates.parse_with_longest_root().map(|(i, _)| i));
                if let Some(candidate) = pick {
                    decisions.push((index, candidate, None));
                }
            }
            decisions
        };
        apply(sentence, decisions, PassKind::MultipleRootWords, events)
    }
}
