use std::sync::Arc;

use reqwest::{header, StatusCode};
use serde_json::Value;

use crate::server::{
    error::wtrl::WtrlError,
    wtrl::poll::{excerpt, PollConfig, PollFailure, PollOutcome},
};

static WTRL_API_VERSION: &str = "2.7";
static SCHEDULE_TOKEN: &str = "c2NoZWR1bGU=";

/// HTTP client for the WTRL API.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Clone)]
pub struct WtrlClient {
    inner: Arc<WtrlClientRef>,
}

struct WtrlClientRef {
    http: reqwest::Client,
    base_url: String,
    cookie: String,
    poll: PollConfig,
}

impl WtrlClient {
    /// Creates a client whose requests carry `user_agent` and the WTRL session `cookie`
    pub fn new(
        base_url: &str,
        cookie: &str,
        user_agent: &str,
        poll: PollConfig,
    ) -> Result<Self, WtrlError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(poll.request_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(WtrlClientRef {
                http,
                base_url: base_url.trim_end_matches('/').to_string(),
                cookie: cookie.to_string(),
                poll,
            }),
        })
    }

    pub fn poll_config(&self) -> &PollConfig {
        &self.inner.poll
    }

    pub fn results_url(&self, season: i32, class_id: &str, race: i32) -> String {
        format!(
            "{}/api/zrl/results/{}/{}/{}",
            self.inner.base_url, season, class_id, race
        )
    }

    pub fn league_url(&self, season: i32, class_id: &str, race: i32) -> String {
        format!(
            "{}/api/zrl/league/{}/{}/{}",
            self.inner.base_url, season, class_id, race
        )
    }

    /// Polls the results document of one race until WTRL has it ready
    pub async fn poll_results(&self, season: i32, class_id: &str, race: i32) -> PollOutcome {
        self.poll(&self.results_url(season, class_id, race)).await
    }

    /// Polls the cumulative league standings after one race
    pub async fn poll_league(&self, season: i32, class_id: &str, race: i32) -> PollOutcome {
        self.poll(&self.league_url(season, class_id, race)).await
    }

    /// GET `url` until it answers 200.
    ///
    /// 202 responses and transport errors are retried with a jittered exponential
    /// backoff; any other status stops immediately. Never mutates anything.
    pub async fn poll(&self, url: &str) -> PollOutcome {
        let config = &self.inner.poll;
        let mut last_status = None;
        let mut last_excerpt = String::new();
        let mut attempts = 0;

        while attempts < config.max_retries {
            attempts += 1;

            match self.get(url).send().await {
                Ok(response) => {
                    let status = response.status();
                    last_status = Some(status.as_u16());

                    if status == StatusCode::OK {
                        match response.text().await {
                            Ok(body) => {
                                return match serde_json::from_str::<Value>(&body) {
                                    Ok(json) => {
                                        tracing::debug!(
                                            "{} ready after {} attempt(s)",
                                            url,
                                            attempts
                                        );
                                        PollOutcome::Ready(json)
                                    }
                                    Err(e) => {
                                        tracing::warn!(
                                            "WTRL returned non-JSON body for {}: {}",
                                            url,
                                            e
                                        );
                                        PollOutcome::Failed(PollFailure {
                                            status: last_status,
                                            excerpt: excerpt(&body),
                                            attempts,
                                        })
                                    }
                                };
                            }
                            Err(e) => {
                                tracing::warn!("Failed to read WTRL body from {}: {}", url, e);
                                last_excerpt = excerpt(&e.to_string());
                            }
                        }
                    } else {
                        let body = response.text().await.unwrap_or_default();
                        last_excerpt = excerpt(&body);

                        if status != StatusCode::ACCEPTED {
                            tracing::warn!(
                                "WTRL returned HTTP {} for {}: {}",
                                status.as_u16(),
                                url,
                                last_excerpt
                            );

                            return PollOutcome::Failed(PollFailure {
                                status: last_status,
                                excerpt: last_excerpt,
                                attempts,
                            });
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Request to {} failed (attempt {}): {}", url, attempts, e);
                    last_excerpt = excerpt(&e.to_string());
                }
            }

            if attempts < config.max_retries {
                let wait = config.sleep_for_attempt(attempts - 1);
                tracing::debug!(
                    "{} not ready (attempt {}/{}), retrying in {:?}",
                    url,
                    attempts,
                    config.max_retries,
                    wait
                );
                tokio::time::sleep(wait).await;
            }
        }

        tracing::warn!("Giving up on {} after {} attempts", url, attempts);

        PollOutcome::Failed(PollFailure {
            status: last_status,
            excerpt: last_excerpt,
            attempts,
        })
    }

    /// Fetches the roster of one team
    pub async fn fetch_team(&self, season: i32, trc: i32) -> Result<Value, WtrlError> {
        let url = format!("{}/api/zrl/{}/teams/{}", self.inner.base_url, season, trc);
        let referer = format!(
            "{}/zwift-racing-league/teams/{}/{}",
            self.inner.base_url, season, trc
        );

        let request = self
            .get(&url)
            .header(header::REFERER, referer)
            .header("wtrl-api-version", WTRL_API_VERSION);

        self.fetch_json(request, url).await
    }

    /// Fetches the race schedule of one category (`A` to `D`)
    pub async fn fetch_schedule(&self, season: i32, category: &str) -> Result<Value, WtrlError> {
        let url = format!("{}/api/wtrlruby/", self.inner.base_url);
        let referer = format!(
            "{}/zwift-racing-league/schedule/{}/r1/",
            self.inner.base_url, season
        );

        let season = season.to_string();

        let request = self
            .get(&url)
            .query(&[
                ("wtrlid", "zrl"),
                ("season", season.as_str()),
                ("category", category),
                ("action", "schedule"),
                ("test", SCHEDULE_TOKEN),
            ])
            .header(header::REFERER, referer)
            .header("wtrl-api-version", WTRL_API_VERSION);

        self.fetch_json(request, url).await
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.inner
            .http
            .get(url)
            .header(header::COOKIE, &self.inner.cookie)
            .header(header::ACCEPT, "application/json")
    }

    async fn fetch_json(
        &self,
        request: reqwest::RequestBuilder,
        url: String,
    ) -> Result<Value, WtrlError> {
        let response = request.send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            return Err(WtrlError::UnexpectedStatus { status, url });
        }

        let body = response.text().await?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    mod poll {
        use serde_json::json;
        use zrl_test_utils::prelude::*;

        use crate::server::wtrl::{PollConfig, PollOutcome, WtrlClient};

        fn client(test: &TestContext, max_retries: u32) -> WtrlClient {
            WtrlClient::new(
                &test.server_url(),
                TEST_COOKIE,
                TEST_USER_AGENT,
                PollConfig::fast(max_retries),
            )
            .unwrap()
        }

        /// Expected: Ready with the body once WTRL stops answering 202
        #[tokio::test]
        async fn returns_body_after_pending_responses() -> Result<(), TestError> {
            let body = factory::payload(vec![json!({"id5": 1})]);
            let test = TestBuilder::new()
                .with_results_endpoint(TEST_SEASON, "A1", 1, body.clone(), 3, 1)
                .build()
                .await?;

            let outcome = client(&test, 14).poll_results(TEST_SEASON, "A1", 1).await;

            assert_eq!(outcome, PollOutcome::Ready(body));
            test.assert_mocks();

            Ok(())
        }

        /// Expected: Failed after exactly max_retries requests when WTRL never finishes
        #[tokio::test]
        async fn stops_at_retry_ceiling() -> Result<(), TestError> {
            let mut test = TestBuilder::new().build().await?;
            let mock = test.wtrl().create_status_endpoint(
                "/api/zrl/results/17/A1/1",
                202,
                "still working",
                4,
            );

            let outcome = client(&test, 4).poll_results(TEST_SEASON, "A1", 1).await;

            let PollOutcome::Failed(failure) = outcome else {
                panic!("expected failure, got {:?}", outcome);
            };
            assert_eq!(failure.attempts, 4);
            assert_eq!(failure.status, Some(202));
            mock.assert();

            Ok(())
        }

        /// Expected: Failed immediately on a hard error, with a truncated excerpt
        #[tokio::test]
        async fn aborts_on_unexpected_status() -> Result<(), TestError> {
            let mut test = TestBuilder::new().build().await?;
            let body = "e".repeat(1500);
            let mock =
                test.wtrl()
                    .create_status_endpoint("/api/zrl/results/17/B2/3", 403, &body, 1);

            let outcome = client(&test, 14).poll_results(TEST_SEASON, "B2", 3).await;

            let PollOutcome::Failed(failure) = outcome else {
                panic!("expected failure, got {:?}", outcome);
            };
            assert_eq!(failure.status, Some(403));
            assert_eq!(failure.attempts, 1);
            assert_eq!(failure.excerpt.len(), 800);
            mock.assert();

            Ok(())
        }

        /// Expected: a 200 with a non-JSON body is a failure, not a retry
        #[tokio::test]
        async fn fails_on_non_json_body() -> Result<(), TestError> {
            let mut test = TestBuilder::new().build().await?;
            let mock = test.wtrl().create_status_endpoint(
                "/api/zrl/league/17/A1/1",
                200,
                "<html>maintenance</html>",
                1,
            );

            let outcome = client(&test, 14).poll_league(TEST_SEASON, "A1", 1).await;

            assert!(matches!(outcome, PollOutcome::Failed(f) if f.status == Some(200)));
            mock.assert();

            Ok(())
        }

        /// Expected: network errors count towards the ceiling and report no status
        #[tokio::test]
        async fn retries_network_errors() -> Result<(), TestError> {
            let client = WtrlClient::new(
                "http://127.0.0.1:9",
                TEST_COOKIE,
                TEST_USER_AGENT,
                PollConfig::fast(2),
            )
            .unwrap();

            let outcome = client.poll_results(TEST_SEASON, "A1", 1).await;

            let PollOutcome::Failed(failure) = outcome else {
                panic!("expected failure, got {:?}", outcome);
            };
            assert_eq!(failure.attempts, 2);
            assert_eq!(failure.status, None);

            Ok(())
        }
    }

    mod fetch {
        use zrl_test_utils::prelude::*;

        use crate::server::{
            error::wtrl::WtrlError,
            wtrl::{PollConfig, WtrlClient},
        };

        /// Expected: the roster JSON is returned for a 200
        #[tokio::test]
        async fn fetches_team_roster() -> Result<(), TestError> {
            let roster = factory::team_roster(4411, "Team Rocket", "A1", vec![]);
            let test = TestBuilder::new()
                .with_team_endpoint(TEST_SEASON, 4411, roster.clone(), 1)
                .build()
                .await?;
            let client = WtrlClient::new(
                &test.server_url(),
                TEST_COOKIE,
                TEST_USER_AGENT,
                PollConfig::fast(1),
            )
            .unwrap();

            let result = client.fetch_team(TEST_SEASON, 4411).await;

            assert_eq!(result.unwrap(), roster);
            test.assert_mocks();

            Ok(())
        }

        /// Expected: UnexpectedStatus for anything but 200
        #[tokio::test]
        async fn fails_on_error_status() -> Result<(), TestError> {
            let mut test = TestBuilder::new().build().await?;
            let mock = test
                .wtrl()
                .create_status_endpoint("/api/zrl/17/teams/1", 404, "not found", 1);
            let client = WtrlClient::new(
                &test.server_url(),
                TEST_COOKIE,
                TEST_USER_AGENT,
                PollConfig::fast(1),
            )
            .unwrap();

            let result = client.fetch_team(TEST_SEASON, 1).await;

            assert!(matches!(
                result,
                Err(WtrlError::UnexpectedStatus { status, .. }) if status.as_u16() == 404
            ));
            mock.assert();

            Ok(())
        }
    }
}
