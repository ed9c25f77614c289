use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event offered for registration. The backend may omit any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventSummary {
    // Older backend revisions shipped `event_id`; keep decoding both.
    #[serde(default, alias = "event_id")]
    pub id: Option<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
}

/// Registrant already known to the backend for the current event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Registrant {
    #[serde(default)]
    pub id: Option<Value>,
    // Older backend revisions used `attender_*` field names.
    #[serde(default, alias = "attender_name")]
    pub name: Option<String>,
    #[serde(default, alias = "attender_company")]
    pub company: Option<String>,
    #[serde(default, alias = "attender_phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "attender_email")]
    pub email: Option<String>,
}

/// Payload of a successful `bootstrap` response.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct BootstrapData {
    #[serde(default)]
    pub event: Option<EventSummary>,
    #[serde(default, alias = "attender")]
    pub user: Option<Registrant>,
    #[serde(default, alias = "registered", alias = "is_registered")]
    pub is_registered_for_current_event: Option<bool>,
}

impl BootstrapData {
    /// Decodes the `data` member of a bootstrap response. Absent or null
    /// payloads decode as empty.
    pub fn decode(data: Option<&Value>) -> Result<Self, serde_json::Error> {
        match data {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(v) => serde_json::from_value(v.clone()),
        }
    }

    pub fn registered(&self) -> bool {
        self.is_registered_for_current_event.unwrap_or(false)
    }
}

/// In-progress registration form values, distinct from the confirmed
/// [`Registrant`] record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Draft {
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
}

impl Draft {
    /// Seeds a first-time form: the host default name fills an untouched
    /// name field, everything else keeps what was already typed.
    pub fn seed_for_form(&mut self, fallback_name: &str) {
        if self.name.is_empty() {
            self.name = fallback_name.to_owned();
        }
    }

    /// Seeds from a known registrant. Server values win over typed input;
    /// typed input wins over the host default.
    pub fn seed_from_user(&mut self, user: &Registrant, fallback_name: &str) {
        self.name = pick(&user.name, &self.name, fallback_name);
        self.company = pick(&user.company, &self.company, "");
        self.phone = pick(&user.phone, &self.phone, "");
        self.email = pick(&user.email, &self.email, "");
    }
}

fn pick(server: &Option<String>, typed: &str, fallback: &str) -> String {
    match server.as_deref().filter(|s| !s.is_empty()) {
        Some(s) => s.to_owned(),
        None if !typed.is_empty() => typed.to_owned(),
        None => fallback.to_owned(),
    }
}
