//! Call history recording and replay.

use crate::store::KvStore;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Records the inputs and outputs of one named operation in two parallel
/// store lists (`{name}:inputs` / `{name}:outputs`).
///
/// The two lists must stay pairwise aligned by position. Because the store
/// gives no cross-command atomicity, a per-instance mutex is held across the
/// input-append, the body, and the output-append: concurrent invocations of
/// the same operation serialize, different operations never contend.
///
/// When the body fails, an `{"error": ...}` marker is appended to the
/// outputs log in place of a result so the logs cannot drift out of
/// alignment; the error itself still propagates to the caller.
pub struct CallHistory {
    store: Arc<dyn KvStore>,
    name: String,
    inputs_key: String,
    outputs_key: String,
    write_lock: Mutex<()>,
}

impl CallHistory {
    pub fn new(store: Arc<dyn KvStore>, name: impl Into<String>) -> Self {
        let name = name.into();
        let inputs_key = format!("{name}:inputs");
        let outputs_key = format!("{name}:outputs");
        Self {
            store,
            name,
            inputs_key,
            outputs_key,
            write_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Record `args`, run the body, record its result, and return it.
    pub async fn invoke<A, T, F, Fut>(&self, args: &A, body: F) -> Result<T>
    where
        A: Serialize + ?Sized,
        T: Serialize,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let _guard = self.write_lock.lock().await;
        self.store
            .append_to_list(&self.inputs_key, &serde_json::to_vec(args)?)
            .await?;
        match body().await {
            Ok(output) => {
                self.store
                    .append_to_list(&self.outputs_key, &serde_json::to_vec(&output)?)
                    .await?;
                Ok(output)
            }
            Err(err) => {
                let marker = serde_json::json!({ "error": err.to_string() });
                self.store
                    .append_to_list(&self.outputs_key, &serde_json::to_vec(&marker)?)
                    .await?;
                Err(err)
            }
        }
    }

    /// Read the full history and pair inputs with outputs in call order.
    ///
    /// A length mismatch between the two logs means the recording invariant
    /// was broken and surfaces as [`Error::DataCorruption`].
    pub async fn replay(&self) -> Result<Replay> {
        let inputs = self.store.list_range(&self.inputs_key, 0, -1).await?;
        let outputs = self.store.list_range(&self.outputs_key, 0, -1).await?;
        if inputs.len() != outputs.len() {
            return Err(Error::DataCorruption {
                name: self.name.clone(),
                inputs: inputs.len(),
                outputs: outputs.len(),
            });
        }
        let entries = inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| ReplayEntry {
                input: String::from_utf8_lossy(&input).into_owned(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
            .collect();
        Ok(Replay {
            name: self.name.clone(),
            entries,
        })
    }
}

/// One recorded call: the JSON text of its input and of its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayEntry {
    pub input: String,
    pub output: String,
}

/// An operation's recorded history, ordered by call.
#[derive(Debug, Clone)]
pub struct Replay {
    pub name: String,
    pub entries: Vec<ReplayEntry>,
}

impl Replay {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Display for Replay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} was called {} times:", self.name, self.entries.len())?;
        for entry in &self.entries {
            writeln!(f, "{}({}) -> {}", self.name, entry.input, entry.output)?;
        }
        Ok(())
    }
}
