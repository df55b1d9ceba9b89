//! Property tests for the classification engine

use proptest::prelude::*;
use stancelens_classifiers::{
    LexiconPolarity, PolarityScorer, SentimentClassifier, StanceClassifier,
};
use stancelens_core::{text, StanceLabel};

proptest! {
    #[test]
    fn prop_sentiment_confidence_bounded(input in "\\PC{0,300}") {
        let classifier = SentimentClassifier::new().unwrap();
        let result = classifier.analyze(&input).unwrap();
        prop_assert!((0.1..=1.0).contains(&result.confidence));
        prop_assert!(result.scores.is_normalized());
    }

    #[test]
    fn prop_stance_confidence_bounded(
        input in "[a-zA-Z !.,']{0,200}",
        target in "[a-zA-Z ]{0,20}",
    ) {
        let classifier = StanceClassifier::new().unwrap();
        let result = classifier.analyze(&input, &target).unwrap();
        prop_assert!((0.1..=1.0).contains(&result.confidence));
        prop_assert!((-1.0..=1.0).contains(&result.combined_score));
        prop_assert!((0.0..=1.0).contains(&result.consistency));
        prop_assert_eq!(&result.target, &target);
    }

    #[test]
    fn prop_absent_target_is_neutral(input in "[a-m ]{3,200}") {
        // the target uses letters the text never contains
        let classifier = StanceClassifier::new().unwrap();
        let result = classifier.analyze(&input, "zyx").unwrap();
        prop_assert_eq!(result.mention_count, 0);
        prop_assert_eq!(result.label, StanceLabel::Neutral);
        prop_assert_eq!(result.confidence, 0.1);
    }

    #[test]
    fn prop_analysis_is_idempotent(input in "[a-zA-Z !?.]{0,150}") {
        let sentiment = SentimentClassifier::new().unwrap();
        prop_assert_eq!(sentiment.analyze(&input).unwrap(), sentiment.analyze(&input).unwrap());

        let stance = StanceClassifier::new().unwrap();
        prop_assert_eq!(
            stance.analyze(&input, "apple").unwrap(),
            stance.analyze(&input, "apple").unwrap()
        );
    }

    #[test]
    fn prop_polarity_vector_normalized(input in "\\PC{0,200}") {
        let scores = LexiconPolarity::new().score(&input).unwrap();
        prop_assert!(scores.is_normalized());
    }

    #[test]
    fn prop_fold_case_keeps_char_count(input in "\\PC{0,100}") {
        prop_assert_eq!(text::char_len(&text::fold_case(&input)), text::char_len(&input));
    }
}
