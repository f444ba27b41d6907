use serde_json::{json, Value};

use super::{opt_str, str_field, usize_field, Command};
use crate::error::{CoreError, Result};
use crate::services::cultures::CultureList;

fn snapshot(list: &CultureList) -> Value {
    json!({
        "entries": list.entries(),
        "editing_id": list.editing_id(),
    })
}

pub fn handle(cmd: Command, list: &mut CultureList, payload: &Value) -> Result<Value> {
    match cmd {
        Command::CulturesList => Ok(snapshot(list)),

        Command::CulturesMove => {
            let source = usize_field(payload, "source")?;
            let target = usize_field(payload, "target")?;
            let moved = list.move_entry(source, target);
            let mut out = snapshot(list);
            out["moved"] = json!(moved);
            Ok(out)
        }

        Command::CulturesAdd => {
            let id = list.add_entry();
            let mut out = snapshot(list);
            out["id"] = json!(id);
            Ok(out)
        }

        Command::CulturesEdit => {
            let id = str_field(payload, "id")?;
            if !list.begin_edit(id) {
                return Err(CoreError::unknown_culture(id));
            }
            Ok(snapshot(list))
        }

        Command::CulturesSave => {
            let id = str_field(payload, "id")?;
            let code = opt_str(payload, "code").unwrap_or("");
            let name = opt_str(payload, "name").unwrap_or("");
            if !list.save_entry(id, code, name) {
                return Err(CoreError::unknown_culture(id));
            }
            Ok(snapshot(list))
        }

        Command::CulturesCancel => {
            list.cancel_edit();
            Ok(snapshot(list))
        }

        Command::CulturesDelete => {
            let id = str_field(payload, "id")?;
            if !list.delete_entry(id) {
                return Err(CoreError::unknown_culture(id));
            }
            Ok(snapshot(list))
        }

        _ => Err(CoreError::invalid_payload("command not handled by culture list")),
    }
}
