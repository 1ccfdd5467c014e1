//! # Seleção do Candidato
//!
//! A tabela de regras devolve uma alternativa canônica (ex: `"PNON+GEN"`), não uma
//! análise. Este módulo acha, no conjunto da palavra, o candidato concreto que a contém.
//!
//! A busca segue a ordem do analisador e para no primeiro candidato cuja lista de
//! transições contém a alternativa como substring. Nenhum candidato → `None`, e a palavra
//! continua ambígua.

use crate::parse::{CandidateParse, CandidateSet};
use crate::rules::{Resolution, RuleTable};
use crate::sentence::{ResolvedContext, Sentence};
use crate::signature::AmbiguitySignature;

/// Índice do primeiro candidato cuja lista de transições contém `choice`.
pub fn select_index(candidates: &CandidateSet, choice: &str) -> Option<usize> {
    candidates
        .iter()
        .position(|parse| parse.transition_list().contains(choice))
}

/// O candidato em si (a mesma instância guardada no conjunto).
pub fn select<'a>(candidates: &'a CandidateSet, choice: &str) -> Option<&'a CandidateParse> {
    select_index(candidates, choice).and_then(|i| candidates.get(i))
}

/// Decisão completa para uma palavra: o candidato e o caminho até ele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDecision<'t> {
    pub candidate: usize,
    pub signature: AmbiguitySignature,
    pub resolution: Resolution<'t>,
}

/// Assinatura → regra → candidato, para a palavra `index`.
///
/// `None` se qualquer etapa falhar: conjunto vazio, assinatura sem regra, nenhuma guarda
/// satisfeita ou nenhum candidato contendo a alternativa escolhida.
pub fn case_disambiguate<'t>(
    table: &'t RuleTable,
    index: usize,
    sentence: &Sentence,
    context: &ResolvedContext<'_>,
) -> Option<CaseDecision<'t>> {
    let candidates = sentence.word(index)?.candidates();
    let signature = AmbiguitySignature::derive(candidates)?;
    let resolution = table.resolve(&signature, index, sentence, context)?;
    let candidate = select_index(candidates, resolution.choice)?;
    Some(CaseDecision {
        candidate,
        signature,
        resolution,
    })
}
