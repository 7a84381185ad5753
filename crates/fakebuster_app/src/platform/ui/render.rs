use fakebuster_core::{AppViewModel, LifecycleStatus, MatchRowView, ResultView, NO_MATCHES_TEXT};
use fakebuster_engine::{ClassifyError, RelatedNews};

/// Status and result panel; the article itself is only shown on request.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let status_label = match view.status {
        LifecycleStatus::Idle => "Idle",
        LifecycleStatus::Submitting => "Submitting",
        LifecycleStatus::Succeeded => "Succeeded",
        LifecycleStatus::Failed => "Failed",
    };
    let button = if view.submit_enabled {
        format!("[{}]", view.submit_label)
    } else {
        format!("({})", view.submit_label)
    };

    let mut lines = vec![format!("Status: {status_label} | {button}")];
    if let Some(result) = &view.result {
        lines.extend(render_result(result));
    }
    lines
}

pub fn render_article(view: &AppViewModel) -> Vec<String> {
    if view.article.is_empty() {
        return vec!["Article: (empty)".to_string()];
    }
    let mut lines = vec![format!("Article ({} chars):", view.article.chars().count())];
    lines.extend(view.article.lines().map(|line| format!("  | {line}")));
    lines
}

fn render_result(result: &ResultView) -> Vec<String> {
    let mut lines = vec![
        format!("Result: {} [{}]", result.verdict, result.bucket.as_str()),
        format!(
            "Detected language: {} | Confidence: {}",
            result.detected_language, result.confidence
        ),
        "Matches:".to_string(),
    ];
    if result.matches.is_empty() {
        lines.push(format!("  {NO_MATCHES_TEXT}"));
    } else {
        lines.extend(result.matches.iter().map(format_match_row));
    }
    lines
}

fn format_match_row(row: &MatchRowView) -> String {
    match row.url.as_deref().filter(|url| !url.is_empty()) {
        Some(url) => format!(
            "  - {}: {} <{}> ({})",
            row.source, row.headline, url, row.score_text
        ),
        None => format!("  - {}: {} ({})", row.source, row.headline, row.score_text),
    }
}

pub fn render_related(query: &str, result: &Result<RelatedNews, ClassifyError>) -> Vec<String> {
    let news = match result {
        Ok(news) => news,
        Err(_) => return vec![format!("Related news for {query:?} is unavailable.")],
    };
    let mut lines = vec![format!(
        "Related news for {:?} (searched as {:?}, language {}):",
        query, news.query_translated, news.detected_language
    )];
    if news.results.is_empty() {
        lines.push("  Nothing found.".to_string());
    }
    for article in &news.results {
        let headline = article.headline.as_deref().unwrap_or("(untitled)");
        let mut line = format!("  - {headline}");
        if let Some(date) = &article.pub_date {
            line.push_str(&format!(" [{date}]"));
        }
        if let Some(url) = &article.url {
            line.push_str(&format!(" <{url}>"));
        }
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebuster_core::{update, AnalysisOutcome, AnalysisResult, AppState, MatchItem, Msg};

    fn settled(matches: Vec<MatchItem>) -> AppViewModel {
        let (state, _) = update(AppState::new(), Msg::ArticleChanged("story".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        let (state, _) = update(
            state,
            Msg::AnalysisCompleted {
                generation: 1,
                outcome: AnalysisOutcome::Succeeded(AnalysisResult {
                    verdict: "FAKE".into(),
                    detected_language: "en".into(),
                    confidence: "0.92".into(),
                    matches,
                }),
            },
        );
        state.view()
    }

    #[test]
    fn idle_view_is_a_single_status_line() {
        let view = AppState::new().view();
        assert_eq!(render(&view), vec!["Status: Idle | [Check Fake News]"]);
    }

    #[test]
    fn submitting_shows_disabled_button() {
        let (state, _) = update(AppState::new(), Msg::ArticleChanged("story".into()));
        let (state, _) = update(state, Msg::SubmitClicked);
        assert_eq!(
            render(&state.view()),
            vec!["Status: Submitting | (Analyzing...)"]
        );
    }

    #[test]
    fn result_lists_matches_with_two_decimal_scores() {
        let view = settled(vec![
            MatchItem {
                source: "Reuters".into(),
                headline: "No color anomaly reported".into(),
                url: None,
                score: 0.81,
            },
            MatchItem {
                source: "NYT".into(),
                headline: "Skies".into(),
                url: Some("https://nyt.example/x".into()),
                score: 0.6,
            },
        ]);
        assert_eq!(
            render(&view),
            vec![
                "Status: Succeeded | [Check Fake News]",
                "Result: FAKE [fake]",
                "Detected language: en | Confidence: 0.92",
                "Matches:",
                "  - Reuters: No color anomaly reported (0.81)",
                "  - NYT: Skies <https://nyt.example/x> (0.60)",
            ]
        );
    }

    #[test]
    fn blank_url_gets_no_link() {
        let view = settled(vec![MatchItem {
            source: "AP".into(),
            headline: "Nothing unusual".into(),
            url: Some(String::new()),
            score: 0.7,
        }]);
        assert_eq!(
            render(&view).last().map(String::as_str),
            Some("  - AP: Nothing unusual (0.70)")
        );
    }

    #[test]
    fn empty_matches_say_so() {
        let lines = render(&settled(Vec::new()));
        assert_eq!(lines.last().map(String::as_str), Some("  No close matches found."));
    }

    #[test]
    fn article_is_quoted_line_by_line() {
        let (state, _) = update(AppState::new(), Msg::ArticleChanged("a\nb".into()));
        assert_eq!(
            render_article(&state.view()),
            vec!["Article (3 chars):", "  | a", "  | b"]
        );
    }
}
