use std::sync::LazyLock;

use proptest::prelude::*;
use solace_instruments::lexicon::{GAD7, GHQ12_BINARY, PHQ9, REQUIRED_SCALES};
use solace_instruments::scoring::ScaleResult;
use solace_instruments::{AggregateResult, Screener};

static SCREENER: LazyLock<Screener> = LazyLock::new(|| Screener::builtin().unwrap());

const VOCABULARY: &[&str] = &[
    "I", "feel", "so", "hopeless", "worthless", "tired", "can't sleep", "anxious", "panic",
    "suicide", "want to die", "restless", "sad", "happy", "well", "never", "not", "no", "don't",
    "daily", "every day", "often", "sometimes", "not at all", "overwhelmed", "depressed",
    "insomnia", "scared", "stressed", "and", "but", "lately", ".", ",", "\n", "héllo", "日本語",
    "🙂",
];

fn sentence() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(VOCABULARY), 0..40).prop_map(|w| w.join(" "))
}

fn assert_scale(result: &AggregateResult, key: &str) -> Result<(), TestCaseError> {
    let (instrument, scale) = SCREENER.lexicon().scale(key).unwrap();
    let max_item = scale.mode().max_item_score();
    let max_total = u32::from(max_item) * instrument.items().len() as u32;
    let scale_result: &ScaleResult = match key {
        PHQ9 => &result.phq9,
        GAD7 => &result.gad7,
        GHQ12_BINARY => &result.ghq12_binary,
        _ => &result.ghq12_likert,
    };

    for item in scale_result.per_item.values() {
        prop_assert!(item.score <= max_item);
        prop_assert_eq!(item.score == 0, item.evidence.is_empty());
    }
    prop_assert!(scale_result.total <= max_total);
    let sum: u32 = scale_result.per_item.values().map(|r| u32::from(r.score)).sum();
    prop_assert_eq!(scale_result.total, sum);
    Ok(())
}

fn assert_bounds(result: &AggregateResult) -> Result<(), TestCaseError> {
    for key in REQUIRED_SCALES {
        assert_scale(result, key)?;
    }
    Ok(())
}

proptest! {
    #[test]
    fn scores_stay_in_range_for_arbitrary_text(fragments in prop::collection::vec(any::<String>(), 0..4)) {
        let result = SCREENER.estimate(&fragments);
        assert_bounds(&result)?;
    }

    #[test]
    fn scores_stay_in_range_for_symptom_sentences(fragments in prop::collection::vec(sentence(), 0..4)) {
        let result = SCREENER.estimate(&fragments);
        assert_bounds(&result)?;
    }

    #[test]
    fn scoring_is_idempotent(fragments in prop::collection::vec(sentence(), 0..4)) {
        prop_assert_eq!(SCREENER.estimate(&fragments), SCREENER.estimate(&fragments));
    }

    #[test]
    fn flags_follow_self_harm_item(text in sentence()) {
        let result = SCREENER.estimate(&[text.as_str()]);
        prop_assert_eq!(!result.flags.is_empty(), result.phq9.per_item[&9].score >= 1);
    }

    #[test]
    fn binary_and_likert_agree_on_positive_items(text in sentence()) {
        let result = SCREENER.estimate(&[text.as_str()]);
        for (id, likert) in &result.ghq12_likert.per_item {
            let binary = &result.ghq12_binary.per_item[id];
            prop_assert_eq!(binary.score, u8::from(likert.score >= 1));
            prop_assert_eq!(&binary.evidence, &likert.evidence);
        }
    }

    #[test]
    fn evidence_is_taken_from_the_input(text in sentence()) {
        let result = SCREENER.estimate(&[text.as_str()]);
        for item in result.phq9.per_item.values() {
            prop_assert!(text.contains(item.evidence.as_str()));
        }
    }
}
