use crate::constants::MIN_CONTENT_LENGTH;
use crate::pipeline::processing::classify::classify;
use crate::pipeline::processing::normalize::{normalize, text_length};
use crate::pipeline::processing::sentiment::{
    default_scorer, LexiconAnalyzer, SentimentAnalyzer, SentimentScorer,
};
use crate::types::{EnrichedRecord, RawRecord};

/// Trait for turning raw posts into enriched records
pub trait Enricher: Send + Sync {
    /// Compute the sentiment columns for a record, without admission filtering
    fn annotate(&self, record: &RawRecord) -> EnrichedRecord;

    /// Enrich a record, returning `None` when it fails the admission filter
    fn enrich(&self, record: &RawRecord) -> Option<EnrichedRecord> {
        let enriched = self.annotate(record);
        admit(&enriched).then_some(enriched)
    }
}

/// Admission filter: cleaned content must be at least [`MIN_CONTENT_LENGTH`] characters
pub fn admit(record: &EnrichedRecord) -> bool {
    record.content_length >= MIN_CONTENT_LENGTH
}

/// Enricher that scores posts with a [`SentimentScorer`]
pub struct SentimentEnricher<'a, A> {
    scorer: &'a SentimentScorer<A>,
}

impl<'a, A: SentimentAnalyzer> SentimentEnricher<'a, A> {
    pub fn new(scorer: &'a SentimentScorer<A>) -> Self {
        Self { scorer }
    }
}

impl Default for SentimentEnricher<'static, LexiconAnalyzer> {
    fn default() -> Self {
        Self::new(default_scorer())
    }
}

impl<A: SentimentAnalyzer> Enricher for SentimentEnricher<'_, A> {
    fn annotate(&self, record: &RawRecord) -> EnrichedRecord {
        let content = record.content();

        let cleaned_content = normalize(&content);
        let content_length = text_length(&cleaned_content);

        // Scored from the original content; the scorer normalizes on its own
        let sentiment = self.scorer.score(&content);

        EnrichedRecord {
            raw: record.clone(),
            cleaned_content,
            content_length,
            sentiment_score: sentiment.polarity,
            sentiment_label: classify(sentiment.polarity),
            subjectivity: sentiment.subjectivity,
        }
    }
}

/// Enrich a record with the bundled lexicon scorer
pub fn enrich(record: &RawRecord) -> Option<EnrichedRecord> {
    SentimentEnricher::default().enrich(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use crate::types::{CellValue, SentimentLabel, SentimentResult};

    struct FailingAnalyzer;

    impl SentimentAnalyzer for FailingAnalyzer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn analyze(&self, _text: &str) -> Result<SentimentResult, ScoringError> {
            Err(ScoringError::NonFinite { field: "polarity" })
        }
    }

    fn post(content: &str) -> RawRecord {
        let mut record = RawRecord::with_content(content);
        record.set("author", CellValue::from("someone"));
        record.set("number_of_likes", CellValue::Integer(42));
        record
    }

    #[test]
    fn test_enrich_positive_post() {
        let enriched = enrich(&post("I love this!!! https://x.co/a")).unwrap();

        assert_eq!(enriched.cleaned_content, "I love this!!!");
        assert_eq!(enriched.content_length, 14);
        assert!(enriched.sentiment_score > 0.1);
        assert_eq!(enriched.sentiment_label, SentimentLabel::Positive);
        assert!((0.0..=1.0).contains(&enriched.subjectivity));
    }

    #[test]
    fn test_passthrough_fields_are_forwarded_untouched() {
        let record = post("What a wonderful morning");
        let enriched = enrich(&record).unwrap();
        assert_eq!(enriched.raw, record);
        assert_eq!(enriched.raw.get("number_of_likes"), Some(&CellValue::Integer(42)));
    }

    #[test]
    fn test_whitespace_only_is_dropped() {
        let record = post("   ");
        assert!(enrich(&record).is_none());

        let annotated = SentimentEnricher::default().annotate(&record);
        assert_eq!(annotated.cleaned_content, "");
        assert_eq!(annotated.content_length, 0);
    }

    #[test]
    fn test_short_content_is_dropped() {
        assert!(enrich(&post("ok")).is_none());
        assert!(enrich(&post("four")).is_none());
        assert!(enrich(&post("five!")).is_some());
    }

    #[test]
    fn test_missing_and_null_content_is_dropped() {
        let mut record = RawRecord::new();
        record.set("author", CellValue::from("someone"));
        assert!(enrich(&record).is_none());

        let annotated = SentimentEnricher::default().annotate(&record);
        assert_eq!(annotated.sentiment_score, 0.0);
        assert_eq!(annotated.subjectivity, 0.5);
        assert_eq!(annotated.sentiment_label, SentimentLabel::Neutral);

        record.set("content", CellValue::Null);
        assert!(enrich(&record).is_none());
    }

    #[test]
    fn test_negative_post() {
        let enriched = enrich(&post("This is the worst, most awful service ever")).unwrap();
        assert!(enriched.sentiment_score < -0.1);
        assert_eq!(enriched.sentiment_label, SentimentLabel::Negative);
    }

    #[test]
    fn test_scoring_failure_still_yields_record() {
        let scorer = SentimentScorer::new(FailingAnalyzer);
        let enricher = SentimentEnricher::new(&scorer);

        let enriched = enricher.enrich(&post("I love this so much")).unwrap();
        assert_eq!(enriched.sentiment_score, 0.0);
        assert_eq!(enriched.subjectivity, 0.5);
        assert_eq!(enriched.sentiment_label, SentimentLabel::Neutral);
    }

    #[test]
    fn test_dropped_iff_cleaned_length_below_minimum() {
        let samples = [
            "",
            "a",
            "abcd",
            "abcde",
            "  ab  cd  ",
            "https://only.a/link",
            "www.x.y hello",
            "hey www.x.y you",
        ];
        for sample in samples {
            let record = post(sample);
            let dropped = enrich(&record).is_none();
            assert_eq!(dropped, text_length(&normalize(sample)) < 5, "{sample:?}");
        }
    }
}
