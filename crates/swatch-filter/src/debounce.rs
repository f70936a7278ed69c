//! Search-as-you-type debouncing.
//!
//! Keystrokes go into a `QueryInput`; `SettledQueries` yields a query only once
//! no newer one has arrived for the configured delay. The engine itself stays
//! synchronous; `SettledQueries::drive` is the thin loop that feeds it.
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;
use tracing::debug;

use crate::engine::CatalogFilterEngine;

#[derive(Debug, Clone)]
pub struct QueryInput {
    tx: mpsc::UnboundedSender<String>,
}

impl QueryInput {
    /// Returns `false` once the receiving side is gone.
    pub fn push(&self, query: impl Into<String>) -> bool {
        self.tx.send(query.into()).is_ok()
    }
}

#[derive(Debug)]
pub struct SettledQueries {
    rx: mpsc::UnboundedReceiver<String>,
    delay: Duration,
}

pub fn debounced(delay: Duration) -> (QueryInput, SettledQueries) {
    let (tx, rx) = mpsc::unbounded_channel();
    (QueryInput { tx }, SettledQueries { rx, delay })
}

impl SettledQueries {
    /// Waits for the next burst and returns its last query. A burst still
    /// pending when every `QueryInput` is dropped is flushed; after that
    /// `None` is returned.
    pub async fn next(&mut self) -> Option<String> {
        let mut latest = self.rx.recv().await?;
        let mut superseded = 0usize;
        loop {
            match timeout(self.delay, self.rx.recv()).await {
                Ok(Some(newer)) => {
                    latest = newer;
                    superseded += 1;
                }
                Ok(None) | Err(_) => break,
            }
        }
        debug!(query = %latest, superseded, "query settled");
        Some(latest)
    }

    /// Applies each settled query to `engine` until the input side closes.
    pub async fn drive(mut self, engine: &mut CatalogFilterEngine) {
        while let Some(query) = self.next().await {
            engine.set_text_query(&query);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_core::config::EngineConfig;

    #[tokio::test(start_paused = true)]
    async fn burst_collapses_to_last_query() {
        let (input, mut settled) = debounced(EngineConfig::default().debounce());
        for q in ["r", "re", "red"] {
            assert!(input.push(q));
        }
        assert_eq!(settled.next().await.as_deref(), Some("red"));

        input.push("blue");
        assert_eq!(settled.next().await.as_deref(), Some("blue"));

        drop(input);
        assert_eq!(settled.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_typing_settles_each_query() {
        let (input, mut settled) = debounced(Duration::from_millis(100));
        let typist = tokio::spawn(async move {
            input.push("p");
            tokio::time::sleep(Duration::from_millis(250)).await;
            input.push("pi");
        });
        assert_eq!(settled.next().await.as_deref(), Some("p"));
        assert_eq!(settled.next().await.as_deref(), Some("pi"));
        typist.await.unwrap();
        assert_eq!(settled.next().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn drive_feeds_settled_queries_to_engine() {
        use swatch_core::types::PolishRecord;

        let mut engine = CatalogFilterEngine::default();
        engine.load_catalog(vec![PolishRecord::new("1", "Red Hot"), PolishRecord::new("2", "Blue")]);
        let (input, settled) = debounced(Duration::from_millis(50));
        input.push("bl");
        input.push("blue");
        drop(input);
        settled.drive(&mut engine).await;
        assert_eq!(engine.state().text_query, "blue");
        assert_eq!(engine.visible_records().len(), 1);
    }
}
