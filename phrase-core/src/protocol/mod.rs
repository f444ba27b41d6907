use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{CoreError, Result};
use crate::session::Session;

mod command;
mod cultures;
mod phrases;

pub use command::Command;

fn get_cmd(req: &Value) -> &str {
    req.get("cmd").and_then(|v| v.as_str()).unwrap_or("")
}

fn get_id(req: &Value) -> Value {
    req.get("id").cloned().unwrap_or(Value::Null)
}

fn get_payload(req: &Value) -> &Value {
    static EMPTY: Value = Value::Null;
    req.get("payload").unwrap_or(&EMPTY)
}

fn ok(id: Value, payload: Value) -> String {
    json!({
        "id": id,
        "status": "ok",
        "payload": payload
    })
    .to_string()
}

fn err(id: Value, message: impl Into<String>) -> String {
    json!({
        "id": id,
        "status": "error",
        "message": message.into()
    })
    .to_string()
}

pub(crate) fn str_field<'a>(payload: &'a Value, key: &str) -> Result<&'a str> {
    payload
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| CoreError::invalid_payload(format!("payload.{key} is required")))
}

pub(crate) fn opt_str<'a>(payload: &'a Value, key: &str) -> Option<&'a str> {
    payload.get(key).and_then(|v| v.as_str())
}

pub(crate) fn usize_field(payload: &Value, key: &str) -> Result<usize> {
    payload
        .get(key)
        .and_then(|v| v.as_u64())
        .map(|n| n as usize)
        .ok_or_else(|| CoreError::invalid_payload(format!("payload.{key} must be a number")))
}

pub(crate) fn typed_field<T: DeserializeOwned>(payload: &Value, key: &str) -> Result<T> {
    let raw = payload
        .get(key)
        .cloned()
        .ok_or_else(|| CoreError::invalid_payload(format!("payload.{key} is required")))?;
    serde_json::from_value(raw)
        .map_err(|e| CoreError::invalid_payload(format!("invalid payload.{key}: {e}")))
}

/// Handles one request line and returns the response line.
pub fn handle(session: &mut Session, input: &str) -> String {
    let req: Value = match serde_json::from_str(input) {
        Ok(v) => v,
        Err(_) => {
            return json!({
                "status": "error",
                "message": "invalid json"
            })
            .to_string();
        }
    };

    let id = get_id(&req);
    let cmd_str = get_cmd(&req);
    let payload = get_payload(&req);

    let cmd = Command::from(cmd_str);
    debug!(cmd = cmd_str, "request");

    let result = match cmd {
        Command::Ping => Ok(json!({ "message": "phrase-core alive" })),
        Command::Unknown => return err(id, "unknown command"),
        Command::CulturesList
        | Command::CulturesMove
        | Command::CulturesAdd
        | Command::CulturesEdit
        | Command::CulturesSave
        | Command::CulturesCancel
        | Command::CulturesDelete => cultures::handle(cmd, &mut session.cultures, payload),
        _ => phrases::handle(cmd, &mut session.phrases, payload),
    };

    match result {
        Ok(v) => ok(id, v),
        Err(e) => {
            warn!(cmd = cmd_str, error = %e, "request rejected");
            err(id, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(session: &mut Session, line: &str) -> Value {
        serde_json::from_str(&handle(session, line)).unwrap()
    }

    #[test]
    fn invalid_json_and_unknown_command() {
        let mut session = Session::default();
        let resp = call(&mut session, "{not json");
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid json");

        let resp = call(&mut session, r#"{"id": 3, "cmd": "nope"}"#);
        assert_eq!(resp["id"], 3);
        assert_eq!(resp["message"], "unknown command");

        let resp = call(&mut session, r#"{"id": 4, "cmd": "detect_encoding"}"#);
        assert_eq!(resp["message"], "unknown command");
    }

    #[test]
    fn missing_field_is_reported() {
        let mut session = Session::default();
        let resp = call(&mut session, r#"{"id": "a", "cmd": "phrases.delete", "payload": {}}"#);
        assert_eq!(resp["status"], "error");
        assert_eq!(resp["message"], "invalid payload: payload.id is required");
    }

    #[test]
    fn ping_echoes_request_id() {
        let mut session = Session::default();
        let resp = call(&mut session, r#"{"id": "x1", "cmd": "ping"}"#);
        assert_eq!(resp["status"], "ok");
        assert_eq!(resp["id"], "x1");
    }
}
