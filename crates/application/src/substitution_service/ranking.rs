//! Ranking adapter: optional generative reordering with a deterministic
//! fallback. No failure in here reaches the caller.

use serde_json::{Value, json};
use tracing::warn;

use servir_domain::{MinistryId, Schedule};

use super::{MAX_SUGGESTIONS, ResolvedCandidate, SubstituteSuggestion, SubstitutionService};

const NO_CANDIDATES_REASONING: &str =
    "No available volunteers were found for this ministry and date.";
const DEFAULT_REASONING: &str = "Suggestions based on availability and ministry membership.";
const RANKED_REASONING: &str = "Suggestions optimized by AI based on candidate profiles.";

impl SubstitutionService {
    /// Orders `resolved` into a top-[`MAX_SUGGESTIONS`] suggestion.
    ///
    /// Consults the configured text generator when there is one; any
    /// failure on that path (missing capability, transport error, timeout,
    /// unparseable response) falls back to the resolver's deterministic
    /// order.
    pub(super) async fn rank(
        &self,
        schedule: &Schedule,
        ministry_id: MinistryId,
        resolved: Vec<ResolvedCandidate>,
    ) -> SubstituteSuggestion {
        if resolved.is_empty() {
            return SubstituteSuggestion {
                candidates: Vec::new(),
                reasoning: NO_CANDIDATES_REASONING.to_owned(),
            };
        }

        let Some(ranker) = self.ranker.as_ref() else {
            return fallback_suggestion(resolved);
        };

        let prompt = build_ranking_prompt(schedule, ministry_id, &resolved);

        match ranker.generate(&prompt).await {
            Ok(response) => match extract_ranked_ids(&response) {
                Some(ids) => SubstituteSuggestion {
                    candidates: apply_ranking(resolved, &ids),
                    reasoning: RANKED_REASONING.to_owned(),
                },
                None => {
                    warn!(schedule_id = %schedule.id, "ranking response contained no parseable id array, using fallback order");
                    fallback_suggestion(resolved)
                }
            },
            Err(error) => {
                warn!(schedule_id = %schedule.id, %error, "ranking call failed, using fallback order");
                fallback_suggestion(resolved)
            }
        }
    }
}

fn fallback_suggestion(resolved: Vec<ResolvedCandidate>) -> SubstituteSuggestion {
    SubstituteSuggestion {
        candidates: resolved
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|candidate| candidate.view)
            .collect(),
        reasoning: DEFAULT_REASONING.to_owned(),
    }
}

fn build_ranking_prompt(
    schedule: &Schedule,
    ministry_id: MinistryId,
    resolved: &[ResolvedCandidate],
) -> String {
    let payload: Vec<Value> = resolved
        .iter()
        .map(|candidate| {
            json!({
                "id": candidate.view.profile_id.to_string(),
                "name": candidate.view.name,
                "ministries": candidate
                    .ministry_ids
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>(),
            })
        })
        .collect();

    format!(
        "I need a substitute for a church service schedule.\n\
         Date: {date}. Ministry id: {ministry_id}.\n\n\
         Available candidates:\n{candidates}\n\n\
         Analyse them and pick the top {count} candidates.\n\
         Return ONLY a JSON array with the ids of the best candidates,\n\
         best first, for example: [\"id1\", \"id2\"].",
        date = schedule.date,
        candidates = Value::Array(payload),
        count = MAX_SUGGESTIONS,
    )
}

/// Extracts a ranked id list from free-form generator output.
///
/// Best-effort parse with a defined fallback: takes the outermost
/// `[...]`-shaped substring, parses it as JSON, and keeps the string
/// elements. Returns `None` when no array can be recovered.
#[must_use]
pub fn extract_ranked_ids(text: &str) -> Option<Vec<String>> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    if end < start {
        return None;
    }

    let parsed: Value = serde_json::from_str(&text[start..=end]).ok()?;
    let items = parsed.as_array()?;

    Some(
        items
            .iter()
            .filter_map(|item| item.as_str().map(ToOwned::to_owned))
            .collect(),
    )
}

/// Reorders candidates so ids named by the ranker come first, in the
/// ranker's order, followed by the rest in resolver order; unknown ids are
/// ignored. Truncates to [`MAX_SUGGESTIONS`].
fn apply_ranking(resolved: Vec<ResolvedCandidate>, ids: &[String]) -> Vec<super::CandidateView> {
    let mut remaining: Vec<ResolvedCandidate> = resolved;
    let mut ordered = Vec::with_capacity(remaining.len());

    for id in ids {
        if let Some(position) = remaining
            .iter()
            .position(|candidate| candidate.view.profile_id.to_string() == *id)
        {
            ordered.push(remaining.remove(position));
        }
    }

    ordered.extend(remaining);

    ordered
        .into_iter()
        .take(MAX_SUGGESTIONS)
        .map(|candidate| candidate.view)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_ranked_ids;

    #[test]
    fn extracts_a_bare_array() {
        assert_eq!(
            extract_ranked_ids(r#"["a", "b"]"#),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }

    #[test]
    fn extracts_an_array_buried_in_prose() {
        let text = "Sure! Based on the profiles, here is my ranking:\n[\"id2\", \"id1\"]\nHope that helps.";
        assert_eq!(
            extract_ranked_ids(text),
            Some(vec!["id2".to_owned(), "id1".to_owned()])
        );
    }

    #[test]
    fn extracts_an_array_spanning_lines() {
        let text = "[\n  \"x\",\n  \"y\"\n]";
        assert_eq!(
            extract_ranked_ids(text),
            Some(vec!["x".to_owned(), "y".to_owned()])
        );
    }

    #[test]
    fn ignores_non_string_elements() {
        assert_eq!(
            extract_ranked_ids(r#"[1, "a", null, {"id": "b"}]"#),
            Some(vec!["a".to_owned()])
        );
    }

    #[test]
    fn empty_array_is_still_an_array() {
        assert_eq!(extract_ranked_ids("[]"), Some(Vec::new()));
    }

    #[test]
    fn rejects_text_without_an_array() {
        assert_eq!(extract_ranked_ids("no ranking today"), None);
        assert_eq!(extract_ranked_ids(""), None);
    }

    #[test]
    fn rejects_malformed_json() {
        assert_eq!(extract_ranked_ids(r#"["a", "b""#), None);
        assert_eq!(extract_ranked_ids(r#"["a",]"#), None);
    }

    #[test]
    fn rejects_reversed_brackets() {
        assert_eq!(extract_ranked_ids("] oops ["), None);
    }

    #[test]
    fn rejects_an_object_without_an_array() {
        assert_eq!(extract_ranked_ids(r#"{"ids": "a"}"#), None);
    }

    #[test]
    fn recovers_an_array_nested_in_an_object() {
        assert_eq!(
            extract_ranked_ids(r#"{"ids": ["a", "b"]}"#),
            Some(vec!["a".to_owned(), "b".to_owned()])
        );
    }
}
