//! Score submission collaborator
//!
//! The simulation hands the frozen final score of a run to a [`ScoreSink`]
//! exactly once. Sinks must not block the frame loop; network work is
//! spawned and its failures only logged.

use serde::{Deserialize, Serialize};

/// Receives the final score of a finished run
pub trait ScoreSink {
    fn submit(&mut self, final_score: u32);
}

impl<F: FnMut(u32)> ScoreSink for F {
    fn submit(&mut self, final_score: u32) {
        self(final_score)
    }
}

/// Request body posted to the score endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub score: u32,
}

impl ScoreSubmission {
    pub fn to_json(&self) -> String {
        // A struct of one integer field always serializes
        serde_json::to_string(self).unwrap_or_else(|_| format!("{{\"score\":{}}}", self.score))
    }
}

/// Sink that only records the submission in the log
#[derive(Debug, Default)]
pub struct LogSink {
    pub player: String,
}

impl ScoreSink for LogSink {
    fn submit(&mut self, final_score: u32) {
        log::info!("Score of {} submitted for {}", final_score, self.player);
    }
}

/// Posts scores to the hosting page's submit endpoint (WASM only)
#[cfg(target_arch = "wasm32")]
pub struct FetchSink {
    pub endpoint: String,
}

#[cfg(target_arch = "wasm32")]
impl FetchSink {
    pub const DEFAULT_ENDPOINT: &'static str = "/api/submit-score";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    async fn post(endpoint: String, body: String) -> Result<(), wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast;
        use wasm_bindgen_futures::JsFuture;
        use web_sys::{Request, RequestInit, Response};

        let opts = RequestInit::new();
        opts.set_method("POST");
        opts.set_body(&wasm_bindgen::JsValue::from_str(&body));

        let request = Request::new_with_str_and_init(&endpoint, &opts)?;
        request.headers().set("Content-Type", "application/json")?;

        let window = web_sys::window().ok_or("no window")?;
        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(format!("HTTP {}", response.status()).into());
        }
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreSink for FetchSink {
    fn submit(&mut self, final_score: u32) {
        let endpoint = self.endpoint.clone();
        let body = ScoreSubmission { score: final_score }.to_json();
        wasm_bindgen_futures::spawn_local(async move {
            match Self::post(endpoint, body).await {
                Ok(()) => log::info!("Score of {} submitted", final_score),
                Err(e) => log::error!("Failed to submit score {}: {:?}", final_score, e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submission_body() {
        let body = ScoreSubmission { score: 17 }.to_json();
        assert_eq!(body, r#"{"score":17}"#);
        let parsed: ScoreSubmission = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed.score, 17);
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |score: u32| seen.push(score);
            sink.submit(3);
        }
        assert_eq!(seen, vec![3]);
    }

    #[test]
    fn test_log_sink_accepts_scores() {
        let mut sink = LogSink {
            player: "tester".to_string(),
        };
        sink.submit(0);
        sink.submit(12);
    }
}
