use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::BoardId;

/// Transport used by network boards. Serialized as its integer code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "IpProtocolRef", into = "i32")]
pub enum IpProtocol {
    #[default]
    None,
    Udp,
    Tcp,
}

impl IpProtocol {
    pub fn code(self) -> i32 {
        match self {
            IpProtocol::None => 0,
            IpProtocol::Udp => 1,
            IpProtocol::Tcp => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            IpProtocol::None => "NO_IP_PROTOCOL",
            IpProtocol::Udp => "UDP",
            IpProtocol::Tcp => "TCP",
        }
    }
}

impl From<IpProtocol> for i32 {
    fn from(proto: IpProtocol) -> Self {
        proto.code()
    }
}

impl TryFrom<i32> for IpProtocol {
    type Error = ConfigError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(IpProtocol::None),
            1 => Ok(IpProtocol::Udp),
            2 => Ok(IpProtocol::Tcp),
            _ => Err(ConfigError::UnknownIpProtocol(code.to_string())),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum IpProtocolRef {
    Code(i32),
    Name(String),
}

impl TryFrom<IpProtocolRef> for IpProtocol {
    type Error = ConfigError;

    fn try_from(value: IpProtocolRef) -> Result<Self, Self::Error> {
        match value {
            IpProtocolRef::Code(code) => IpProtocol::try_from(code),
            IpProtocolRef::Name(name) => [IpProtocol::None, IpProtocol::Udp, IpProtocol::Tcp]
                .into_iter()
                .find(|p| p.name() == name)
                .ok_or(ConfigError::UnknownIpProtocol(name)),
        }
    }
}

#[cfg(feature = "schema")]
impl schemars::JsonSchema for IpProtocol {
    fn schema_name() -> String {
        "IpProtocol".to_string()
    }

    fn json_schema(gen: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <i32 as schemars::JsonSchema>::json_schema(gen)
    }
}

/// A persisted acquisition session: which board to open and how to reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct BoardConfig {
    pub name: String,
    pub board_id: BoardId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_port: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address_aux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address_anc: Option<String>,
    #[serde(default)]
    pub ip_port: u16,
    #[serde(default)]
    pub ip_port_aux: u16,
    #[serde(default)]
    pub ip_port_anc: u16,
    #[serde(default)]
    pub ip_protocol: IpProtocol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other_info: Option<String>,
    /// Seconds; 0 leaves the driver default.
    #[serde(default)]
    pub timeout: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_aux: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_anc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_board: Option<BoardId>,
}

impl BoardConfig {
    pub fn new(name: impl Into<String>, board_id: BoardId) -> Self {
        Self {
            name: name.into(),
            board_id,
            serial_port: None,
            mac_address: None,
            ip_address: None,
            ip_address_aux: None,
            ip_address_anc: None,
            ip_port: 0,
            ip_port_aux: 0,
            ip_port_anc: 0,
            ip_protocol: IpProtocol::None,
            other_info: None,
            timeout: 0,
            serial_number: None,
            file: None,
            file_aux: None,
            file_anc: None,
            master_board: None,
        }
    }

    /// Playback and streaming sources replay another board's layout, so they
    /// need a concrete master board to describe it.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.board_id {
            BoardId::NoBoard => Err(ConfigError::UnusableBoard(BoardId::NoBoard)),
            BoardId::PlaybackFileBoard | BoardId::StreamingBoard => {
                let master = self
                    .master_board
                    .ok_or(ConfigError::MissingMasterBoard(self.board_id))?;
                if master.is_virtual() && master != BoardId::SyntheticBoard {
                    return Err(ConfigError::InvalidMasterBoard {
                        board: self.board_id,
                        master,
                    });
                }
                if self.board_id == BoardId::PlaybackFileBoard && self.file.is_none() {
                    return Err(ConfigError::MissingField {
                        board: self.board_id,
                        field: "file",
                    });
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

/// Session configs keyed by name.
#[derive(Debug, Default, Clone)]
pub struct BoardConfigSet {
    pub configs: HashMap<String, BoardConfig>,
}

impl BoardConfigSet {
    /// Names are unique within a set; a second config with the same name is rejected.
    pub fn insert(&mut self, cfg: BoardConfig) -> Result<(), ConfigError> {
        if self.configs.contains_key(&cfg.name) {
            return Err(ConfigError::DuplicateName(cfg.name));
        }
        self.configs.insert(cfg.name.clone(), cfg);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Configs targeting `board`, sorted by name.
    pub fn for_board(&self, board: BoardId) -> Vec<&BoardConfig> {
        let mut out: Vec<&BoardConfig> = self
            .configs
            .values()
            .filter(|c| c.board_id == board)
            .collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

fn is_config_ext(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yml" | "yaml" | "json")
    )
}

pub fn load_board_config_file(path: impl AsRef<Path>) -> anyhow::Result<BoardConfig> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading board config: {}", path.display()))?;
    let cfg: BoardConfig = if path.extension().is_some_and(|e| e == "json") {
        serde_json::from_str(&raw)
            .with_context(|| format!("parsing json: {}", path.display()))?
    } else {
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing yaml: {}", path.display()))?
    };
    cfg.validate()
        .with_context(|| format!("validating board config: {}", path.display()))?;
    debug!(name = %cfg.name, board = %cfg.board_id, "loaded board config");
    Ok(cfg)
}

pub fn load_board_configs_dir(dir: impl AsRef<Path>) -> anyhow::Result<BoardConfigSet> {
    let dir = dir.as_ref();
    let mut set = BoardConfigSet::default();
    let mut entries: Vec<PathBuf> = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("reading directory: {}", dir.display()))?
    {
        let path = entry?.path();
        if is_config_ext(&path) {
            entries.push(path);
        }
    }
    entries.sort();
    let mut origins: HashMap<String, PathBuf> = HashMap::new();
    for p in entries {
        let cfg = load_board_config_file(&p)?;
        let name = cfg.name.clone();
        set.insert(cfg).with_context(|| match origins.get(&name) {
            Some(first) => format!("{} redefines config from {}", p.display(), first.display()),
            None => format!("adding board config: {}", p.display()),
        })?;
        origins.insert(name, p);
    }
    info!(count = set.len(), dir = %dir.display(), "loaded board configs");
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_yaml_by_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "cyton.yaml",
            "name: lab-cyton\nboard_id: 0\nserial_port: /dev/ttyUSB0\n",
        );
        let cfg = load_board_config_file(&path).unwrap();
        assert_eq!(cfg.board_id, BoardId::CytonBoard);
        assert_eq!(cfg.serial_port.as_deref(), Some("/dev/ttyUSB0"));
        assert_eq!(cfg.ip_protocol, IpProtocol::None);
    }

    #[test]
    fn test_json_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "stream.json",
            r#"{"name":"relay","board_id":"STREAMING_BOARD","master_board":2,
                "ip_address":"225.1.1.1","ip_port":6677,"ip_protocol":"UDP"}"#,
        );
        let cfg = load_board_config_file(&path).unwrap();
        assert_eq!(cfg.board_id, BoardId::StreamingBoard);
        assert_eq!(cfg.master_board, Some(BoardId::CytonDaisyBoard));
        assert_eq!(cfg.ip_protocol.code(), 1);
    }

    #[test]
    fn test_unknown_code_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.yaml", "name: bad\nboard_id: 43\n");
        assert!(load_board_config_file(&path).is_err());
    }

    #[test]
    fn test_validate_master_board() {
        let mut cfg = BoardConfig::new("replay", BoardId::PlaybackFileBoard);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MissingMasterBoard(BoardId::PlaybackFileBoard))
        );

        cfg.master_board = Some(BoardId::StreamingBoard);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidMasterBoard { .. })
        ));

        cfg.master_board = Some(BoardId::SyntheticBoard);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MissingField {
                board: BoardId::PlaybackFileBoard,
                field: "file"
            })
        );

        cfg.file = Some("session.csv".into());
        assert_eq!(cfg.validate(), Ok(()));

        assert_eq!(
            BoardConfig::new("none", BoardId::NoBoard).validate(),
            Err(ConfigError::UnusableBoard(BoardId::NoBoard))
        );
        assert_eq!(BoardConfig::new("g", BoardId::GanglionBoard).validate(), Ok(()));
    }

    #[test]
    fn test_load_dir() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yaml", "name: a\nboard_id: -1\n");
        write(dir.path(), "b.yml", "name: b\nboard_id: SYNTHETIC_BOARD\n");
        write(dir.path(), "c.json", r#"{"name":"c","board_id":38}"#);
        write(dir.path(), "notes.txt", "ignored");
        let set = load_board_configs_dir(dir.path()).unwrap();
        assert_eq!(set.len(), 3);
        let synth: Vec<&str> = set
            .for_board(BoardId::SyntheticBoard)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(synth, vec!["a", "b"]);
    }

    #[test]
    fn test_serializes_board_as_code() {
        let mut cfg = BoardConfig::new("x", BoardId::MuseSBoard);
        cfg.master_board = Some(BoardId::CytonBoard);
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["board_id"], 39);
        assert_eq!(v["master_board"], 0);
        assert_eq!(v["ip_protocol"], 0);
        assert!(v.get("timeout").is_some());
    }

    #[test]
    fn test_input_params_shape() {
        let cfg: BoardConfig = serde_json::from_str(
            r#"{"name":"x","board_id":0,"ip_protocol":1,"timeout":5,
                "ip_address_aux":"10.0.0.2","ip_port_aux":2001,
                "ip_address_anc":"10.0.0.3","ip_port_anc":2002,
                "other_info":"gain=24","file_aux":"aux.csv","file_anc":"anc.csv"}"#,
        )
        .unwrap();
        assert_eq!(cfg.ip_protocol, IpProtocol::Udp);
        assert_eq!(cfg.timeout, 5);
        assert_eq!(cfg.ip_address_aux.as_deref(), Some("10.0.0.2"));
        assert_eq!(cfg.ip_port_aux, 2001);
        assert_eq!(cfg.ip_address_anc.as_deref(), Some("10.0.0.3"));
        assert_eq!(cfg.ip_port_anc, 2002);
        assert_eq!(cfg.other_info.as_deref(), Some("gain=24"));
        assert_eq!(cfg.file_aux.as_deref(), Some("aux.csv"));
        assert_eq!(cfg.file_anc.as_deref(), Some("anc.csv"));
    }

    #[test]
    fn test_ip_protocol_wire_form() {
        assert_eq!(serde_json::to_string(&IpProtocol::Tcp).unwrap(), "2");
        let by_name: IpProtocol = serde_json::from_str("\"TCP\"").unwrap();
        assert_eq!(by_name, IpProtocol::Tcp);
        let by_code: IpProtocol = serde_json::from_str("0").unwrap();
        assert_eq!(by_code, IpProtocol::None);
        assert!(serde_json::from_str::<IpProtocol>("3").is_err());
        assert!(serde_json::from_str::<IpProtocol>("\"tcp\"").is_err());
        assert_eq!(
            IpProtocol::try_from(-1),
            Err(ConfigError::UnknownIpProtocol("-1".into()))
        );
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.yaml", "name: lab\nboard_id: 0\n");
        write(dir.path(), "b.yaml", "name: lab\nboard_id: 1\n");
        let err = load_board_configs_dir(dir.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("a.yaml"), "{msg}");
        assert!(msg.contains("b.yaml"), "{msg}");
        assert!(msg.contains("duplicate board config name"), "{msg}");

        let mut set = BoardConfigSet::default();
        set.insert(BoardConfig::new("lab", BoardId::CytonBoard)).unwrap();
        assert_eq!(
            set.insert(BoardConfig::new("lab", BoardId::GanglionBoard)),
            Err(ConfigError::DuplicateName("lab".into()))
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.configs["lab"].board_id, BoardId::CytonBoard);
    }
}
