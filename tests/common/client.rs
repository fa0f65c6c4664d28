//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per songs-server endpoint.
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    /// GET an arbitrary path
    pub async fn get(&self, path: &str) -> Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    // ========================================================================
    // Songs Endpoints
    // ========================================================================

    /// GET /songs?artist=..&genre=..&year=..
    pub async fn list_songs(&self, query: &[(&str, &str)]) -> Response {
        self.client
            .get(format!("{}/songs", self.base_url))
            .query(query)
            .send()
            .await
            .expect("List songs request failed")
    }

    /// GET /songs, decoded
    pub async fn list_song_ids(&self, query: &[(&str, &str)]) -> Vec<i64> {
        let songs: Vec<Value> = self
            .list_songs(query)
            .await
            .json()
            .await
            .expect("Songs listing is not a JSON array");
        songs
            .iter()
            .map(|s| s["id"].as_i64().expect("Song without numeric id"))
            .collect()
    }

    /// GET /songs/{id}
    pub async fn get_song(&self, id: impl std::fmt::Display) -> Response {
        self.client
            .get(format!("{}/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Get song request failed")
    }

    /// POST /songs
    pub async fn create_song(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/songs", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create song request failed")
    }

    /// PUT /songs/{id}
    pub async fn update_song(&self, id: impl std::fmt::Display, body: &Value) -> Response {
        self.client
            .put(format!("{}/songs/{}", self.base_url, id))
            .json(body)
            .send()
            .await
            .expect("Update song request failed")
    }

    /// DELETE /songs/{id}
    pub async fn delete_song(&self, id: impl std::fmt::Display) -> Response {
        self.client
            .delete(format!("{}/songs/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete song request failed")
    }
}
