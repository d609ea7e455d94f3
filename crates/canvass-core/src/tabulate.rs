//! Per-question frequency aggregation across a response population.
//!
//! Tabulation is pure and idempotent: the same population always produces
//! the same counts, and every count vector comes back in a deterministic
//! order so views and snapshots are stable.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::answer::parse_bool;
use crate::model::{index_letter, Question, QuestionKind, ResponseRecord};

/// The tabulated view of an entire collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tabulation {
    /// Name of the survey or test the population nominally belongs to.
    pub subject: String,
    /// How many response records were considered.
    pub respondents: usize,
    pub entries: Vec<QuestionTally>,
}

/// The tabulated view of one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionTally {
    /// Zero-based position of the question in its collection.
    pub index: usize,
    pub prompt: String,
    pub tally: Tally,
}

/// Kind-specific summary of a response population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Tally {
    /// True/false counts; answers that normalize to neither are dropped.
    TrueFalse {
        true_count: usize,
        false_count: usize,
    },
    /// Per-letter counts over the full choice range, zeros included.
    Choices { counts: Vec<ChoiceCount> },
    /// Frequency of each distinct trimmed answer, case-sensitive.
    Text { counts: Vec<TextCount> },
    /// Every essay response verbatim, in population order.
    Essays { responses: Vec<String> },
    /// Count of each distinct full matching assignment.
    Assignments { assignments: Vec<AssignmentCount> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceCount {
    pub letter: char,
    pub choice: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextCount {
    pub answer: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentCount {
    /// Upper-cased pair codes sorted by letter.
    pub pairs: Vec<String>,
    pub count: usize,
}

/// Tabulate a population of records against an ordered question list.
///
/// Records shorter than the question list contribute to the indexes they
/// do have; nothing is rejected wholesale.
pub fn tabulate<'a, I>(subject: &str, questions: I, records: &[ResponseRecord]) -> Tabulation
where
    I: IntoIterator<Item = &'a Question>,
{
    let entries = questions
        .into_iter()
        .enumerate()
        .map(|(index, question)| {
            let column: Vec<&[String]> = records
                .iter()
                .filter_map(|record| record.answers.get(index).map(Vec::as_slice))
                .collect();
            QuestionTally {
                index,
                prompt: question.prompt().to_string(),
                tally: tally_question(question, &column),
            }
        })
        .collect();
    Tabulation {
        subject: subject.to_string(),
        respondents: records.len(),
        entries,
    }
}

fn tally_question(question: &Question, column: &[&[String]]) -> Tally {
    match question.kind() {
        QuestionKind::TrueFalse => {
            let mut true_count = 0;
            let mut false_count = 0;
            for answers in column {
                for answer in *answers {
                    match parse_bool(answer) {
                        Some(true) => true_count += 1,
                        Some(false) => false_count += 1,
                        None => {}
                    }
                }
            }
            Tally::TrueFalse {
                true_count,
                false_count,
            }
        }
        QuestionKind::MultipleChoice { choices } => {
            let mut counts: Vec<ChoiceCount> = choices
                .iter()
                .enumerate()
                .map(|(i, choice)| ChoiceCount {
                    letter: index_letter(i),
                    choice: choice.clone(),
                    count: 0,
                })
                .collect();
            for answers in column {
                for answer in *answers {
                    let normalized = answer.trim().to_uppercase();
                    let mut chars = normalized.chars();
                    if let (Some(letter), None) = (chars.next(), chars.next()) {
                        if let Some(slot) = counts.iter_mut().find(|c| c.letter == letter) {
                            slot.count += 1;
                        }
                    }
                }
            }
            Tally::Choices { counts }
        }
        QuestionKind::ShortAnswer | QuestionKind::Date => {
            let mut counts: BTreeMap<String, usize> = BTreeMap::new();
            for answers in column {
                for answer in *answers {
                    *counts.entry(answer.trim().to_string()).or_default() += 1;
                }
            }
            Tally::Text {
                counts: counts
                    .into_iter()
                    .map(|(answer, count)| TextCount { answer, count })
                    .collect(),
            }
        }
        QuestionKind::Essay => Tally::Essays {
            responses: column
                .iter()
                .flat_map(|answers| answers.iter().cloned())
                .collect(),
        },
        QuestionKind::Matching { .. } => {
            let mut counts: BTreeMap<Vec<String>, usize> = BTreeMap::new();
            for answers in column {
                let mut pairs: Vec<String> =
                    answers.iter().map(|a| a.trim().to_uppercase()).collect();
                pairs.sort();
                *counts.entry(pairs).or_default() += 1;
            }
            Tally::Assignments {
                assignments: counts
                    .into_iter()
                    .map(|(pairs, count)| AssignmentCount { pairs, count })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    fn record(subject: &str, per_question: Vec<Vec<String>>) -> ResponseRecord {
        ResponseRecord::new(subject, per_question)
    }

    #[test]
    fn true_false_counts_drop_unparseable() {
        let questions = vec![Question::true_false("Sure?")];
        let records = vec![
            record("s", vec![answers(&["True"])]),
            record("s", vec![answers(&["t"])]),
            record("s", vec![answers(&["False"])]),
            record("s", vec![answers(&["garbled"])]),
        ];
        let tab = tabulate("s", &questions, &records);
        assert_eq!(
            tab.entries[0].tally,
            Tally::TrueFalse {
                true_count: 2,
                false_count: 1,
            }
        );
    }

    #[test]
    fn adding_one_true_increments_only_true() {
        let questions = vec![Question::true_false("Sure?")];
        let mut records = vec![
            record("s", vec![answers(&["True"])]),
            record("s", vec![answers(&["False"])]),
        ];
        let before = tabulate("s", &questions, &records);
        records.push(record("s", vec![answers(&["t"])]));
        let after = tabulate("s", &questions, &records);

        let (Tally::TrueFalse { true_count: t0, false_count: f0 },
             Tally::TrueFalse { true_count: t1, false_count: f1 }) =
            (&before.entries[0].tally, &after.entries[0].tally)
        else {
            panic!("expected true/false tallies");
        };
        assert_eq!(*t1, t0 + 1);
        assert_eq!(f1, f0);
    }

    #[test]
    fn tabulation_is_idempotent() {
        let questions = vec![
            Question::true_false("Q1"),
            Question::short_answer("Q2", 1).unwrap(),
        ];
        let records = vec![
            record("s", vec![answers(&["t"]), answers(&["alpha"])]),
            record("s", vec![answers(&["f"]), answers(&["beta"])]),
        ];
        assert_eq!(
            tabulate("s", &questions, &records),
            tabulate("s", &questions, &records)
        );
    }

    #[test]
    fn choice_counts_cover_full_range() {
        let questions = vec![Question::multiple_choice(
            "Pick",
            vec!["Red".into(), "Green".into(), "Blue".into()],
            1,
        )
        .unwrap()];
        let records = vec![
            record("s", vec![answers(&["A"])]),
            record("s", vec![answers(&["a"])]),
            record("s", vec![answers(&["C"])]),
            record("s", vec![answers(&["Z"])]),
        ];
        let tab = tabulate("s", &questions, &records);
        let Tally::Choices { counts } = &tab.entries[0].tally else {
            panic!("expected choice tally");
        };
        assert_eq!(counts.len(), 3);
        assert_eq!((counts[0].letter, counts[0].count), ('A', 2));
        assert_eq!((counts[1].letter, counts[1].count), ('B', 0));
        assert_eq!((counts[2].letter, counts[2].count), ('C', 1));
    }

    #[test]
    fn text_counts_are_case_sensitive_and_sorted() {
        let questions = vec![Question::short_answer("Name?", 1).unwrap()];
        let records = vec![
            record("s", vec![answers(&["Ferris"])]),
            record("s", vec![answers(&["ferris"])]),
            record("s", vec![answers(&[" Ferris "])]),
        ];
        let tab = tabulate("s", &questions, &records);
        let Tally::Text { counts } = &tab.entries[0].tally else {
            panic!("expected text tally");
        };
        assert_eq!(counts.len(), 2);
        assert_eq!((counts[0].answer.as_str(), counts[0].count), ("Ferris", 2));
        assert_eq!((counts[1].answer.as_str(), counts[1].count), ("ferris", 1));
    }

    #[test]
    fn essays_listed_in_population_order() {
        let questions = vec![Question::essay("Discuss", 1).unwrap()];
        let records = vec![
            record("s", vec![answers(&["first essay"])]),
            record("s", vec![answers(&["second essay"])]),
        ];
        let tab = tabulate("s", &questions, &records);
        assert_eq!(
            tab.entries[0].tally,
            Tally::Essays {
                responses: vec!["first essay".into(), "second essay".into()],
            }
        );
    }

    #[test]
    fn matching_assignments_keyed_canonically() {
        let questions = vec![Question::matching(
            "Match",
            vec!["France".into(), "Peru".into()],
            vec!["Lima".into(), "Paris".into()],
        )
        .unwrap()];
        let records = vec![
            record("s", vec![answers(&["A-2", "B-1"])]),
            record("s", vec![answers(&["b-1", "a-2"])]),
            record("s", vec![answers(&["A-1", "B-2"])]),
        ];
        let tab = tabulate("s", &questions, &records);
        let Tally::Assignments { assignments } = &tab.entries[0].tally else {
            panic!("expected assignment tally");
        };
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[0].pairs, vec!["A-1", "B-2"]);
        assert_eq!(assignments[0].count, 1);
        assert_eq!(assignments[1].pairs, vec!["A-2", "B-1"]);
        assert_eq!(assignments[1].count, 2);
    }

    #[test]
    fn short_records_skip_missing_indexes() {
        let questions = vec![
            Question::true_false("Q1"),
            Question::true_false("Q2"),
        ];
        let records = vec![
            record("s", vec![answers(&["t"]), answers(&["f"])]),
            record("s", vec![answers(&["t"])]),
        ];
        let tab = tabulate("s", &questions, &records);
        assert_eq!(
            tab.entries[0].tally,
            Tally::TrueFalse { true_count: 2, false_count: 0 }
        );
        assert_eq!(
            tab.entries[1].tally,
            Tally::TrueFalse { true_count: 0, false_count: 1 }
        );
    }
}
