//! # Predicados de Contexto
//!
//! Funções puras que respondem perguntas locais sobre a sentença em resolução.
//! Nenhuma delas guarda estado: tudo chega por argumento.
//!
//! | Direção  | Lê                                  | Exemplos                                   |
//! |----------|-------------------------------------|--------------------------------------------|
//! | Esquerda | [`ResolvedContext`] (já escolhido)  | segunda pessoa à esquerda, caso anterior   |
//! | Direita  | [`CandidateSet`] cru do vizinho     | classe majoritária da próxima palavra      |
//! | Global   | formas de superfície da sentença    | "ne ... ne", sentença terminada em `?`     |
//!
//! Todas são **totais**: índice fora da sentença ou conjunto vazio dá `false`/`None`,
//! nunca pânico.

use crate::parse::CandidateSet;
use crate::sentence::{ResolvedContext, Sentence};
use crate::tag::MorphologicalTag;

/// Alguma palavra resolvida à esquerda de `index` carrega uma das etiquetas?
///
/// Varre o contexto inteiro à esquerda, não só o vizinho imediato.
pub fn any_left_word_has_tag(index: usize, context: &ResolvedContext<'_>, tags: &[MorphologicalTag]) -> bool {
    context
        .left_of(index)
        .any(|parse| tags.iter().any(|t| parse.contains_tag(*t)))
}

/// Segunda pessoa (A2SG ou P2SG) em qualquer palavra resolvida à esquerda.
pub fn any_left_word_second_person(index: usize, context: &ResolvedContext<'_>) -> bool {
    any_left_word_has_tag(index, context, &[MorphologicalTag::A2sg, MorphologicalTag::P2sg])
}

/// O primeiro substantivo resolvido à esquerda está no plural?
///
/// Sem substantivo à esquerda, assume singular.
pub fn preceding_noun_is_plural(index: usize, context: &ResolvedContext<'_>) -> bool {
    context
        .left_of(index)
        .find(|parse| parse.is_noun())
        .map(|noun| noun.is_plural())
        .unwrap_or(false)
}

/// Classe gramatical mais frequente entre os candidatos.
///
/// Empate: vence a classe vista primeiro.
pub fn majority_part_of_speech(candidates: &CandidateSet) -> Option<MorphologicalTag> {
    let mut counts: Vec<(MorphologicalTag, usize)> = Vec::new();
    for parse in candidates {
        let pos = parse.pos();
        match counts.iter_mut().find(|(t, _)| *t == pos) {
            Some((_, n)) => *n += 1,
            None => counts.push((pos, 1)),
        }
    }

    let mut best: Option<(MorphologicalTag, usize)> = None;
    for (tag, n) in counts {
        match best {
            Some((_, b)) if b >= n => {}
            _ => best = Some((tag, n)),
        }
    }
    best.map(|(tag, _)| tag)
}

pub fn is_first_word(index: usize) -> bool {
    index == 0
}

/// A palavra é a penúltima (normalmente seguida apenas da pontuação final).
pub fn is_penultimate_word(index: usize, sentence: &Sentence) -> bool {
    index + 2 == sentence.len()
}

pub fn has_next_word(index: usize, sentence: &Sentence) -> bool {
    index + 1 < sentence.len()
}

/// Classe majoritária da palavra seguinte, ainda não resolvida.
pub fn next_word_pos(index: usize, sentence: &Sentence) -> Option<MorphologicalTag> {
    sentence
        .word(index + 1)
        .and_then(|w| majority_part_of_speech(w.candidates()))
}

pub fn next_word_is_pos(index: usize, sentence: &Sentence, target: MorphologicalTag) -> bool {
    next_word_pos(index, sentence) == Some(target)
}

pub fn next_word_is_any_pos(index: usize, sentence: &Sentence, targets: &[MorphologicalTag]) -> bool {
    next_word_pos(index, sentence)
        .map(|pos| targets.contains(&pos))
        .unwrap_or(false)
}

/// Próxima palavra com cara de núcleo nominal: NOUN, ADJ ou DET.
pub fn next_word_is_noun_or_adjective_like(index: usize, sentence: &Sentence) -> bool {
    next_word_is_any_pos(
        index,
        sentence,
        &[
            MorphologicalTag::Noun,
            MorphologicalTag::Adjective,
            MorphologicalTag::Determiner,
        ],
    )
}

/// O vizinho imediatamente à esquerda, se resolvido, carrega a etiqueta de caso?
pub fn preceding_word_has_case_tag(index: usize, context: &ResolvedContext<'_>, tag: MorphologicalTag) -> bool {
    index > 0 && context.get(index - 1).map(|p| p.contains_tag(tag)).unwrap_or(false)
}

/// A forma aparece exatamente duas vezes na sentença (sem diferenciar maiúsculas).
///
/// Detecta construções correlativas como "ne ... ne" e "ya ... ya".
pub fn surface_form_occurs_exactly_twice(sentence: &Sentence, literal: &str) -> bool {
    let literal = literal.to_lowercase();
    sentence
        .words()
        .iter()
        .filter(|w| w.surface().to_lowercase() == literal)
        .count()
        == 2
}

pub fn sentence_ends_with_question_mark(sentence: &Sentence) -> bool {
    sentence.last_surface() == Some("?")
}

/// A forma de superfície da palavra seguinte é `form`.
pub fn next_surface_is(index: usize, sentence: &Sentence, form: &str, ignore_case: bool) -> bool {
    sentence
        .word(index + 1)
        .map(|w| surface_matches(w.surface(), form, ignore_case))
        .unwrap_or(false)
}

/// A palavra anterior ou a seguinte tem exatamente a forma `form`.
pub fn neighbor_surface_is(index: usize, sentence: &Sentence, form: &str) -> bool {
    let previous = index
        .checked_sub(1)
        .and_then(|i| sentence.word(i))
        .map(|w| w.surface() == form)
        .unwrap_or(false);
    previous || next_surface_is(index, sentence, form, false)
}

fn surface_matches(surface: &str, form: &str, ignore_case: bool) -> bool {
    if ignore_case {
        surface.to_lowercase() == form.to_lowercase()
    } else {
        surface == form
    }
}
