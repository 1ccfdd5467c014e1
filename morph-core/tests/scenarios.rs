use morph_core::case;
use morph_core::corpus;
use morph_core::{
    AutoDisambiguator, CandidateSet, DisambiguatorConfig, EventSink, InMemoryStore, PassKind,
    ResolvedContext, RuleBasedDisambiguator, RuleTable, Sentence, Word,
};

fn word(surface: &str, analyses: &[&str]) -> Word {
    Word::from_analyses(surface, analyses).unwrap()
}

fn chosen(sentence: &Sentence, index: usize) -> Option<&str> {
    sentence
        .word(index)
        .and_then(|w| w.chosen())
        .map(|p| p.transition_list())
}

fn rules_only() -> RuleBasedDisambiguator {
    RuleBasedDisambiguator::with_config(RuleTable::builtin(), DisambiguatorConfig::rules_only())
}

#[test]
fn test_demo_corpus_resolves_as_annotated() {
    let d = RuleBasedDisambiguator::new();
    for demo in corpus::get_demo_corpus() {
        let mut sentence = demo.to_sentence();
        let mut store = InMemoryStore::new();
        let report = d.auto_disambiguate(&mut sentence, &mut store).unwrap();

        for &(index, analysis) in demo.expected {
            assert_eq!(chosen(&sentence, index), Some(analysis), "{}", demo.text);
        }
        assert_eq!(report.unresolved, 0, "{}", demo.text);
        assert_eq!(store.saves(), 1);
    }
}

#[test]
fn test_repeated_runs_are_deterministic() {
    let d = RuleBasedDisambiguator::new();
    let first: Vec<Sentence> = corpus::demo_sentences()
        .into_iter()
        .map(|mut s| {
            d.run_passes(&mut s, &EventSink::silent());
            s
        })
        .collect();
    let second: Vec<Sentence> = corpus::demo_sentences()
        .into_iter()
        .map(|mut s| {
            d.run_passes(&mut s, &EventSink::silent());
            s
        })
        .collect();
    assert_eq!(first, second);
}

#[test]
fn test_chosen_analysis_is_always_a_candidate() {
    let d = RuleBasedDisambiguator::new();
    for mut sentence in corpus::demo_sentences() {
        d.run_passes(&mut sentence, &EventSink::silent());
        for w in sentence.words() {
            if let Some(parse) = w.chosen() {
                assert!(w.candidates().iter().any(|c| std::ptr::eq(c, parse)));
            }
        }
    }
}

#[test]
fn test_second_run_changes_nothing_and_does_not_save() {
    let d = RuleBasedDisambiguator::new();
    let mut store = InMemoryStore::new();
    for mut sentence in corpus::demo_sentences() {
        d.auto_disambiguate(&mut sentence, &mut store).unwrap();
        let before = sentence.clone();
        let saves = store.saves();

        let report = d.auto_disambiguate(&mut sentence, &mut store).unwrap();
        assert!(!report.modified());
        assert!(!report.saved);
        assert_eq!(store.saves(), saves);
        assert_eq!(sentence, before);
    }
}

#[test]
fn test_singleton_is_resolved_without_rules() {
    // tabela vazia: só a primeira passagem pode agir
    let d = RuleBasedDisambiguator::with_config(
        RuleTable::from_json("[]").unwrap(),
        DisambiguatorConfig::rules_only(),
    );
    let mut s = Sentence::new(vec![
        word("ev", &["ev+NOUN+A3SG+PNON+NOM"]),
        word("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
    ]);
    let report = d.run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 0), Some("ev+NOUN+A3SG+PNON+NOM"));
    assert_eq!(chosen(&s, 1), None);
    assert_eq!(report.pass(PassKind::SingleAnalysis).map(|p| p.resolved), Some(1));
}

#[test]
fn test_second_person_on_the_left_selects_possessive() {
    let d = rules_only();
    let mut s = Sentence::new(vec![
        word("evin", &["ev+NOUN+A3SG+P2SG+NOM"]),
        word("güzel", &["güzel+ADJ"]),
        word("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
    ]);
    d.run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 2), Some("kitap+NOUN+A3SG+P2SG+NOM"));
}

#[test]
fn test_question_mark_selects_interrogative_pronoun() {
    let d = rules_only();
    let ne = ["ne+ADJ", "ne+ADV", "ne+CONJ", "ne+PRON+QUESP+A3SG+PNON+NOM"];
    let mut s = Sentence::new(vec![
        word("Sen", &["sen+PRON+PERS+A2SG+PNON+NOM"]),
        word("ne", &ne),
        word("yaptın", &["yap+VERB+POS+PAST+A2SG"]),
        word("?", &["?+PUNC"]),
    ]);
    d.run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 1), Some("ne+PRON+QUESP+A3SG+PNON+NOM"));
}

#[test]
fn test_ne_twice_is_a_conjunction() {
    let d = rules_only();
    let mut s = corpus::get_demo_corpus()
        .into_iter()
        .find(|demo| demo.text.starts_with("Ne Ali"))
        .map(|demo| demo.to_sentence())
        .unwrap();
    d.run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 0), Some("ne+CONJ"));
    assert_eq!(chosen(&s, 2), Some("ne+CONJ"));
}

#[test]
fn test_empty_candidate_set_stays_unresolved() {
    let d = RuleBasedDisambiguator::new();
    let mut s = Sentence::new(vec![
        Word::new("???", CandidateSet::default()),
        word("ev", &["ev+NOUN+A3SG+PNON+NOM"]),
    ]);
    let mut store = InMemoryStore::new();
    let report = d.auto_disambiguate(&mut s, &mut store).unwrap();
    assert_eq!(chosen(&s, 0), None);
    assert_eq!(report.unresolved, 1);
    assert!(report.saved);
}

#[test]
fn test_left_to_right_order_matters() {
    // "yapamazsın" só é resolvida pela regra; a escolha (A2SG) alimenta "kitabın"
    let mut s = Sentence::new(vec![
        word(
            "yapamazsın",
            &[
                "yap+VERB^DB+VERB+ABLE+NEG+AOR+A2SG",
                "yap+VERB^DB+VERB+ABLE+NEG+AOR^DB+ADJ+ZERO^DB+ADJ+JUSTLIKE^DB+NOUN+ZERO+A3SG+P2SG+NOM",
            ],
        ),
        word("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
    ]);

    // fora de ordem: "kitabın" decidida antes de "yapamazsın"
    let table = RuleTable::builtin();
    let early = case::case_disambiguate(&table, 1, &s, &ResolvedContext::new()).unwrap();
    assert_eq!(early.resolution.choice, "PNON+GEN");

    rules_only().run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 0), Some("yap+VERB^DB+VERB+ABLE+NEG+AOR+A2SG"));
    assert_eq!(chosen(&s, 1), Some("kitap+NOUN+A3SG+P2SG+NOM"));
}

#[test]
fn test_right_context_does_not_leak_into_backward_rules() {
    let d = rules_only();
    let mut s = Sentence::new(vec![
        word("kitabın", &["kitap+NOUN+A3SG+P2SG+NOM", "kitap+NOUN+A3SG+PNON+GEN"]),
        word("senin", &["sen+PRON+PERS+A2SG+PNON+GEN"]),
    ]);
    d.run_passes(&mut s, &EventSink::silent());
    assert_eq!(chosen(&s, 0), Some("kitap+NOUN+A3SG+PNON+GEN"));
}

#[test]
fn test_every_pass_runs_even_after_an_early_change() {
    let d = RuleBasedDisambiguator::new();
    let mut s = Sentence::new(vec![
        word("ev", &["ev+NOUN+A3SG+PNON+NOM"]),
        word(
            "okuma",
            &["oku+VERB+NEG+IMP+A2SG", "oku+VERB+POS^DB+NOUN+INF2+A3SG+PNON+NOM^DB+ADJ+WITH"],
        ),
    ]);
    let report = d.run_passes(&mut s, &EventSink::silent());
    let order: Vec<PassKind> = report.passes.iter().map(|p| p.pass).collect();
    assert_eq!(order, PassKind::ALL.to_vec());
    assert!(report.pass(PassKind::SingleAnalysis).unwrap().changed);
    assert!(report.pass(PassKind::SingleRootWords).unwrap().changed);
}

#[test]
fn test_relative_and_abbreviation_words_flow_through() {
    let d = RuleBasedDisambiguator::new();
    let mut s = Sentence::new(vec![
        word("ABD", &["abd+NOUN+ABBR+A3SG+PNON+NOM"]),
        word("evdeki", &["ev+NOUN+A3SG+PNON+LOC^DB+ADJ+REL"]),
        word(
            "bugünkü",
            &["bugün+ADV^DB+ADJ+REL", "bugün+NOUN+A3SG+PNON+NOM^DB+ADJ+REL"],
        ),
        word(".", &[".+PUNC"]),
    ]);
    let mut store = InMemoryStore::new();
    let report = d.auto_disambiguate(&mut s, &mut store).unwrap();
    assert_eq!(report.unresolved, 0);
    assert_eq!(chosen(&s, 1), Some("ev+NOUN+A3SG+PNON+LOC^DB+ADJ+REL"));
    assert!(chosen(&s, 2).is_some());
}
