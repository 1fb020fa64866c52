//! Synthetic status alerts shown in the corner of the hologram.

use std::collections::VecDeque;
use std::fmt;

use rand::seq::IndexedRandom;
use rand::RngCore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Status,
    Location,
    Security,
    Performance,
}

impl AlertKind {
    pub const ALL: [AlertKind; 4] = [
        AlertKind::Status,
        AlertKind::Location,
        AlertKind::Security,
        AlertKind::Performance,
    ];

    fn messages(self) -> &'static [Message] {
        match self {
            AlertKind::Status => STATUS_MESSAGES,
            AlertKind::Location => LOCATION_MESSAGES,
            AlertKind::Security => SECURITY_MESSAGES,
            AlertKind::Performance => PERFORMANCE_MESSAGES,
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertKind::Status => "status",
            AlertKind::Location => "location",
            AlertKind::Security => "security",
            AlertKind::Performance => "performance",
        })
    }
}

/// Table entry: either literal text or a generator producing fresh text.
#[derive(Clone, Copy)]
enum Message {
    Fixed(&'static str),
    Generated(fn(&mut dyn RngCore) -> String),
}

impl Message {
    fn resolve(&self, rng: &mut dyn RngCore) -> String {
        match self {
            Message::Fixed(text) => (*text).to_owned(),
            Message::Generated(generate) => generate(rng),
        }
    }
}

const LOCATIONS: &[&str] = &[
    "NEW YORK",
    "CALIFORNIA",
    "TEXAS",
    "FLORIDA",
    "ILLINOIS",
    "PENNSYLVANIA",
    "OHIO",
    "MICHIGAN",
    "GEORGIA",
    "WASHINGTON",
    "FRANCE",
    "GERMANY",
    "UNITED KINGDOM",
    "ITALY",
    "SPAIN",
    "NETHERLANDS",
    "SWEDEN",
    "NORWAY",
    "SWITZERLAND",
    "AUSTRIA",
    "UAE",
    "SAUDI ARABIA",
    "QATAR",
    "BAHRAIN",
    "KUWAIT",
    "OMAN",
    "JORDAN",
    "ISRAEL",
    "TURKEY",
];

fn geo_grid(rng: &mut dyn RngCore) -> String {
    let picked: Vec<&str> = LOCATIONS.choose_multiple(rng, 2).copied().collect();
    format!("GEO GRID LIVE: {}", picked.join(", "))
}

const STATUS_MESSAGES: &[Message] = &[
    Message::Fixed("SYSTEM EFFICIENCY: 92.4%"),
    Message::Fixed("NEURAL NETWORK: STABLE"),
    Message::Fixed("CORE TEMPERATURE: NOMINAL"),
    Message::Fixed("BANDWIDTH USAGE: 78.3%"),
    Message::Fixed("QUANTUM SYNC: OPTIMIZED"),
];

const LOCATION_MESSAGES: &[Message] = &[
    Message::Generated(geo_grid),
    Message::Fixed("SATELLITE UPLINK: CONNECTED"),
    Message::Fixed("GLOBAL NODES: 127 ACTIVE"),
    Message::Fixed("NETWORK LATENCY: 12ms"),
];

const SECURITY_MESSAGES: &[Message] = &[
    Message::Fixed("FIREWALL STATUS: OPTIMAL"),
    Message::Fixed("ENCRYPTION: QUANTUM-SAFE"),
    Message::Fixed("THREAT LEVEL: MINIMAL"),
    Message::Fixed("SECURITY PROTOCOLS: ACTIVE"),
];

const PERFORMANCE_MESSAGES: &[Message] = &[
    Message::Fixed("QUANTUM PROCESSING: ACTIVE"),
    Message::Fixed("AI CORES: 100% OPERATIONAL"),
    Message::Fixed("MEMORY USAGE: 42.7%"),
    Message::Fixed("PROCESSING POWER: OPTIMAL"),
];

/// Shown once, shortly after the hologram mounts.
pub const GREETING: &str = "READING: USER DETECTED";

#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub timestamp_ms: f64,
    pub id: String,
}

/// Picks a random category, then a random message from its table.
pub fn emit_alert(rng: &mut dyn RngCore, now_ms: f64, id: String) -> Alert {
    let kind = *AlertKind::ALL
        .choose(rng)
        .unwrap_or(&AlertKind::Status);
    let message = kind
        .messages()
        .choose(rng)
        .map(|m| m.resolve(rng))
        .unwrap_or_default();
    Alert {
        kind,
        message,
        timestamp_ms: now_ms,
        id,
    }
}

/// Newest-first alert list holding at most `capacity` entries, and always
/// room for at least one.
#[derive(Debug, Clone)]
pub struct AlertFeed {
    capacity: usize,
    entries: VecDeque<Alert>,
    next_id: u64,
}

impl AlertFeed {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity + 1),
            next_id: 1,
        }
    }

    /// Adds `alert` at the front, dropping the oldest entries past capacity.
    pub fn push(&mut self, alert: Alert) {
        self.entries.push_front(alert);
        self.entries.truncate(self.capacity);
    }

    /// Generates and pushes a random alert with the next `alert-N` id.
    pub fn emit(&mut self, rng: &mut dyn RngCore, now_ms: f64) -> &Alert {
        let id = format!("alert-{}", self.next_id);
        self.next_id += 1;
        self.push(emit_alert(rng, now_ms, id));
        &self.entries[0]
    }

    pub fn newest(&self) -> Option<&Alert> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
