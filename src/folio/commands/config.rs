use crate::commands::{CmdMessage, CmdResult, FolioPaths};
use crate::config::FolioConfig;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
    Unset(String),
}

pub fn run(paths: &FolioPaths, action: ConfigAction) -> Result<CmdResult> {
    let dir = &paths.data_dir;
    match action {
        ConfigAction::ShowAll => {
            let config = FolioConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = FolioConfig::load(dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Ok(Some(val)) => result.add_message(CmdMessage::info(val)),
                Ok(None) => result.add_message(CmdMessage::info(format!("{} is not set", key))),
                Err(e) => result.add_message(CmdMessage::error(e.to_string())),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            let mut config = FolioConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let display_val = config.get(&key).ok().flatten().unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
        ConfigAction::Unset(key) => {
            let mut config = FolioConfig::load(dir)?;
            if let Err(e) = config.unset(&key) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(dir)?;
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} reset to default", key)));
            Ok(result)
        }
    }
}
