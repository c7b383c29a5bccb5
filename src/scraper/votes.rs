//! Vote extraction with the hidden-figure reveal fallback.
//!
//! Failures never leave this module: they are logged and become a
//! `(None, None)` pair so the drivers can keep going.

use tracing::{debug, warn};

use super::parsers::odds::{REVEAL_BUTTON, SECONDARY_ODDS};
use super::parsers::OddsParser;
use super::session::{wait_for_selector, PageSession, Readiness, WaitPolicy};
use crate::error::ExtractError;
use crate::types::Party;

/// Extracted figures keyed by party
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Votes {
    pub republican: String,
    pub democrat: String,
}

/// Map (primary, secondary) onto parties according to the leader indicator
pub fn assign(leader: Party, primary: String, secondary: String) -> Votes {
    match leader {
        Party::Republican => Votes {
            republican: primary,
            democrat: secondary,
        },
        Party::Democrat => Votes {
            republican: secondary,
            democrat: primary,
        },
    }
}

/// Extract `(republican_pct, democrat_pct)` from a fetched event page.
///
/// `html` must be the markup currently shown by `session`; the session is
/// only touched when the secondary figure has to be revealed.
pub async fn extract_votes<S>(
    session: &mut S,
    html: &str,
    reveal: &WaitPolicy,
) -> (Option<String>, Option<String>)
where
    S: PageSession + ?Sized,
{
    match try_extract_votes(session, html, reveal).await {
        Ok(votes) => (Some(votes.republican), Some(votes.democrat)),
        Err(e) => {
            warn!("Error extracting votes: {}", e);
            (None, None)
        }
    }
}

/// Fallible core of [`extract_votes`]
pub async fn try_extract_votes<S>(
    session: &mut S,
    html: &str,
    reveal: &WaitPolicy,
) -> Result<Votes, ExtractError>
where
    S: PageSession + ?Sized,
{
    let leader = OddsParser::parse_leader(html)?;
    let primary = OddsParser::parse_primary(html)?;

    let secondary = match OddsParser::parse_secondary(html)? {
        Some(value) => value,
        None => reveal_secondary(session, reveal).await?,
    };

    Ok(assign(leader, primary, secondary))
}

/// Click the reveal control and read the secondary figure once it renders
async fn reveal_secondary<S>(session: &mut S, policy: &WaitPolicy) -> Result<String, ExtractError>
where
    S: PageSession + ?Sized,
{
    debug!("Secondary odds hidden, clicking {}", REVEAL_BUTTON);
    session.click(REVEAL_BUTTON).await.map_err(ExtractError::Reveal)?;

    let readiness = wait_for_selector(session, SECONDARY_ODDS, policy)
        .await
        .map_err(ExtractError::Reveal)?;

    match readiness {
        Readiness::Ready(html) => {
            OddsParser::parse_secondary(&html)?.ok_or(ExtractError::MissingElement(SECONDARY_ODDS))
        }
        Readiness::TimedOut(_) => Err(ExtractError::RevealTimeout(policy.timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::testing::{fast_policy, race_page, FakeSession};

    const URL: &str = "https://polymarket.com/event/maine-presidential-election-winner";

    async fn loaded(session: &mut FakeSession) -> String {
        session.navigate(URL).await.unwrap();
        session.content().await.unwrap()
    }

    #[test]
    fn test_assign_symmetry() {
        let pairs = [("61%", "39%"), ("50.5%", "49.5%"), ("1%", "99%")];
        for (p, s) in pairs {
            let rep = assign(Party::Republican, p.to_string(), s.to_string());
            assert_eq!((rep.republican.as_str(), rep.democrat.as_str()), (p, s));

            let dem = assign(Party::Democrat, p.to_string(), s.to_string());
            assert_eq!((dem.republican.as_str(), dem.democrat.as_str()), (s, p));
        }
    }

    #[tokio::test]
    async fn test_extract_both_visible_republican_leader() {
        let mut session = FakeSession::new().with_page(
            URL,
            race_page("Republican", Some("Buy Yes 61¢"), Some("Buy Yes 39¢")),
        );
        let html = loaded(&mut session).await;

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (Some("61%".to_string()), Some("39%".to_string())));
        assert!(session.clicks.is_empty());
    }

    #[tokio::test]
    async fn test_extract_both_visible_democratic_leader() {
        let mut session = FakeSession::new().with_page(
            URL,
            race_page("Democratic", Some("Buy Yes 61¢"), Some("Buy Yes 39¢")),
        );
        let html = loaded(&mut session).await;

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (Some("39%".to_string()), Some("61%".to_string())));
    }

    #[tokio::test]
    async fn test_extract_reveals_hidden_secondary() {
        let mut session = FakeSession::new()
            .with_page(URL, race_page("Democratic", Some("Buy Yes 58.2¢"), None))
            .with_revealed(
                URL,
                race_page("Democratic", Some("Buy Yes 58.2¢"), Some("Buy Yes 41.8¢")),
            );
        let html = loaded(&mut session).await;

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (Some("41.8%".to_string()), Some("58.2%".to_string())));
        assert_eq!(session.clicks, vec![REVEAL_BUTTON.to_string()]);
    }

    #[tokio::test]
    async fn test_reveal_that_never_renders_fails_softly() {
        let mut session = FakeSession::new()
            .with_page(URL, race_page("Republican", Some("Buy Yes 70¢"), None));
        let html = loaded(&mut session).await;

        let err = try_extract_votes(&mut session, &html, &fast_policy())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::RevealTimeout(_)));

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (None, None));
    }

    #[tokio::test]
    async fn test_missing_reveal_button_fails_softly() {
        let html = r#"<html><body>
            <button class="c-PJLV c-cRTVfI"><p class="c-cZBbTr">Republican</p></button>
            <div class="c-gBrBnR c-kJKHmO c-gBrBnR-ifgGdkS-css">Buy Yes 70¢</div>
        </body></html>"#;
        let mut session = FakeSession::new().with_page(URL, html);
        let html = loaded(&mut session).await;

        let err = try_extract_votes(&mut session, &html, &fast_policy())
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Reveal(_)));
    }

    #[tokio::test]
    async fn test_missing_primary_returns_nulls_without_reveal() {
        let mut session = FakeSession::new()
            .with_page(URL, race_page("Republican", None, Some("Buy Yes 30¢")));
        let html = loaded(&mut session).await;

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (None, None));
        assert!(session.clicks.is_empty());
    }

    #[tokio::test]
    async fn test_missing_leader_returns_nulls() {
        let html = r#"<div class="c-gBrBnR c-kJKHmO c-gBrBnR-ifgGdkS-css">Buy Yes 70¢</div>"#;
        let mut session = FakeSession::new().with_page(URL, html);
        let html = loaded(&mut session).await;

        let votes = extract_votes(&mut session, &html, &fast_policy()).await;
        assert_eq!(votes, (None, None));
    }
}
