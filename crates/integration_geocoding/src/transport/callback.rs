//! Callback-wrapped response handling
//!
//! Providers without permissive cross-origin access answer with a script of
//! the form `callback_name({...})`. Every outstanding request owns a
//! uniquely named slot in a [`CallbackRegistry`]; the slot is removed when
//! its response settles, fails, or is abandoned by the caller.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::oneshot;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::GeocodingError;

const CALLBACK_PREFIX: &str = "geocoder_cb_";

type Settle = oneshot::Sender<Result<Value, GeocodingError>>;

/// Registry of outstanding callback names
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    slots: Arc<Mutex<HashMap<String, Settle>>>,
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("pending", &self.pending())
            .finish()
    }
}

impl CallbackRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh callback name
    ///
    /// The returned receiver settles when the slot is invoked or failed, and
    /// reports a closed channel if the slot is dropped first.
    #[must_use]
    pub fn register(&self) -> (CallbackSlot, oneshot::Receiver<Result<Value, GeocodingError>>) {
        let name = format!("{CALLBACK_PREFIX}{}", Uuid::new_v4().simple());
        let (tx, rx) = oneshot::channel();
        self.slots.lock().insert(name.clone(), tx);
        debug!(callback = %name, "Registered callback slot");

        (
            CallbackSlot {
                name,
                registry: self.clone(),
            },
            rx,
        )
    }

    /// Deliver `payload` to the slot called `name`
    ///
    /// # Errors
    ///
    /// Returns `CallbackNotInvoked` if no such slot is outstanding.
    pub fn invoke(&self, name: &str, payload: Value) -> Result<(), GeocodingError> {
        let settle = self
            .slots
            .lock()
            .remove(name)
            .ok_or_else(|| GeocodingError::CallbackNotInvoked(name.to_string()))?;
        // The caller may have stopped waiting; the slot is gone either way.
        let _ = settle.send(Ok(payload));
        Ok(())
    }

    /// Number of outstanding slots
    #[must_use]
    pub fn pending(&self) -> usize {
        self.slots.lock().len()
    }

    fn fail(&self, name: &str, error: GeocodingError) {
        if let Some(settle) = self.slots.lock().remove(name) {
            let _ = settle.send(Err(error));
        }
    }

    fn release(&self, name: &str) {
        if self.slots.lock().remove(name).is_some() {
            debug!(callback = %name, "Released unsettled callback slot");
        }
    }
}

/// Ownership of one registered callback name
///
/// Dropping the slot deregisters the name.
pub struct CallbackSlot {
    name: String,
    registry: CallbackRegistry,
}

impl fmt::Debug for CallbackSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackSlot")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl CallbackSlot {
    /// The callback name to send to the provider
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settle the slot from a callback-wrapped script body
    ///
    /// Only an invocation of this slot's own name delivers the payload. A
    /// malformed body or one addressed to any other name fails this slot and
    /// leaves every other slot untouched.
    pub fn settle_script(self, body: &str) {
        let outcome = parse_script(body).and_then(|(name, payload)| {
            if name == self.name {
                Ok(payload)
            } else {
                debug!(
                    callback = %self.name,
                    callee = %name,
                    "Callback body names another slot"
                );
                Err(GeocodingError::CallbackNotInvoked(self.name.clone()))
            }
        });

        match outcome {
            Ok(payload) => {
                // Already released only if the slot was failed concurrently.
                let _ = self.registry.invoke(&self.name, payload);
            },
            Err(e) => self.fail(e),
        }
    }

    /// Settle the slot with a transport failure
    pub fn fail(self, error: GeocodingError) {
        warn!(callback = %self.name, error = %error, "Callback request failed");
        self.registry.fail(&self.name, error);
    }
}

impl Drop for CallbackSlot {
    fn drop(&mut self) {
        self.registry.release(&self.name);
    }
}

/// Split `name({...});` into the callee and its JSON argument
fn parse_script(body: &str) -> Result<(&str, Value), GeocodingError> {
    let body = body.trim().trim_start_matches("/**/").trim();
    let body = body.strip_suffix(';').unwrap_or(body).trim_end();

    let open = body
        .find('(')
        .ok_or_else(|| GeocodingError::ParseError("callback body has no invocation".into()))?;
    let inner = body[open + 1..]
        .strip_suffix(')')
        .ok_or_else(|| GeocodingError::ParseError("callback invocation is not closed".into()))?;

    let name = body[..open].trim();
    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$' || c == '.');
    if !valid_name {
        return Err(GeocodingError::ParseError(format!(
            "invalid callback name '{name}'"
        )));
    }

    let payload = serde_json::from_str(inner)
        .map_err(|e| GeocodingError::ParseError(format!("callback argument: {e}")))?;
    Ok((name, payload))
}
