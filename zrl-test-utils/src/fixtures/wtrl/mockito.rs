//! Mock WTRL endpoints.
//!
//! Polled endpoints answer `202 Accepted` `pending` times before the final response,
//! which matches how WTRL behaves while it is still building a document. The 202
//! mock is created first so mockito serves it until its expected hits are used up.

use mockito::{Matcher, Mock};
use serde_json::Value;

use crate::fixtures::wtrl::WtrlFixtures;

impl<'a> WtrlFixtures<'a> {
    /// `GET /api/zrl/results/{season}/{class}/{race}`
    pub fn create_results_endpoint(
        &mut self,
        season: i32,
        class_id: &str,
        race: i32,
        body: &Value,
        pending: usize,
        hits: usize,
    ) -> Vec<Mock> {
        let path = format!("/api/zrl/results/{}/{}/{}", season, class_id, race);

        self.create_polled_endpoint(&path, body, pending, hits)
    }

    /// `GET /api/zrl/league/{season}/{class}/{race}`
    pub fn create_league_endpoint(
        &mut self,
        season: i32,
        class_id: &str,
        race: i32,
        body: &Value,
        pending: usize,
        hits: usize,
    ) -> Vec<Mock> {
        let path = format!("/api/zrl/league/{}/{}/{}", season, class_id, race);

        self.create_polled_endpoint(&path, body, pending, hits)
    }

    /// `GET /api/zrl/{season}/teams/{trc}`
    pub fn create_team_endpoint(
        &mut self,
        season: i32,
        trc: i32,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        let path = format!("/api/zrl/{}/teams/{}", season, trc);

        self.setup
            .server
            .mock("GET", path.as_str())
            .match_header("wtrl-api-version", "2.7")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// `GET /api/wtrlruby/?...&category={category}&action=schedule`
    pub fn create_schedule_endpoint(
        &mut self,
        season: i32,
        category: &str,
        body: &Value,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", "/api/wtrlruby/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("wtrlid".into(), "zrl".into()),
                Matcher::UrlEncoded("season".into(), season.to_string()),
                Matcher::UrlEncoded("category".into(), category.into()),
                Matcher::UrlEncoded("action".into(), "schedule".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Any endpoint answering a fixed status and body `expected_requests` times
    pub fn create_status_endpoint(
        &mut self,
        path: &str,
        status: usize,
        body: &str,
        expected_requests: usize,
    ) -> Mock {
        self.setup
            .server
            .mock("GET", path)
            .with_status(status)
            .with_body(body)
            .expect(expected_requests)
            .create()
    }

    fn create_polled_endpoint(
        &mut self,
        path: &str,
        body: &Value,
        pending: usize,
        hits: usize,
    ) -> Vec<Mock> {
        let mut mocks = Vec::new();

        if pending > 0 {
            mocks.push(
                self.setup
                    .server
                    .mock("GET", path)
                    .with_status(202)
                    .with_body("{\"status\":\"processing\"}")
                    .expect(pending)
                    .create(),
            );
        }

        mocks.push(
            self.setup
                .server
                .mock("GET", path)
                .with_status(200)
                .with_header("content-type", "application/json")
                .with_body(body.to_string())
                .expect(hits)
                .create(),
        );

        mocks
    }
}
