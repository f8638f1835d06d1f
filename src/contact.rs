use serde_json::Value;
use url::Url;

pub const SENDING_MESSAGE: &str = "Mengirim...";
pub const DELIVERED_MESSAGE: &str = "Pesan terkirim. Terima kasih!";
pub const REJECTED_FALLBACK_MESSAGE: &str = "Gagal mengirim. Silakan coba lagi atau salin email.";
pub const NETWORK_FAILURE_MESSAGE: &str = "Kesalahan jaringan. Coba lagi atau gunakan email langsung.";

const REMOTE_SERVICE_HOST: &str = "formspree.io";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Where a submission goes, decided by the form's `action`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitTarget {
    Remote(Url),
    Mailto,
}

impl SubmitTarget {
    pub fn classify(action: &str) -> Self {
        let Ok(url) = Url::parse(action.trim()) else {
            return Self::Mailto;
        };

        if url.scheme() != "https" {
            return Self::Mailto;
        }

        let recognized = url.host_str().is_some_and(|host| {
            let host = host.to_ascii_lowercase();
            host == REMOTE_SERVICE_HOST || host.ends_with(&format!(".{REMOTE_SERVICE_HOST}"))
        });

        if recognized {
            Self::Remote(url)
        } else {
            Self::Mailto
        }
    }
}

pub fn mailto_subject(name: &str) -> String {
    format!("Kontak dari website — {name}")
}

pub fn mailto_body(message: &ContactMessage) -> String {
    format!(
        "Nama: {}\nEmail: {}\n\n{}",
        message.name, message.email, message.message
    )
}

pub fn build_mailto(recipient: &str, message: &ContactMessage) -> String {
    let subject = urlencoding::encode(&mailto_subject(&message.name)).into_owned();
    let body = urlencoding::encode(&mailto_body(message)).into_owned();
    format!("mailto:{}?subject={subject}&body={body}", recipient.trim())
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    Rejected { server_message: Option<String> },
    NetworkFailure,
}

impl SubmitOutcome {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Delivered => "delivered",
            Self::Rejected { .. } => "rejected",
            Self::NetworkFailure => "network_failure",
        }
    }

    pub fn feedback(&self) -> String {
        match self {
            Self::Delivered => DELIVERED_MESSAGE.to_string(),
            Self::Rejected {
                server_message: Some(message),
            } => message.clone(),
            Self::Rejected {
                server_message: None,
            } => REJECTED_FALLBACK_MESSAGE.to_string(),
            Self::NetworkFailure => NETWORK_FAILURE_MESSAGE.to_string(),
        }
    }

    pub fn should_reset(&self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Pulls the human-readable error out of a rejected response body, if any.
/// `error` wins whenever it is a non-blank string, whatever shape `errors` has.
pub fn parse_error_body(body: &str) -> Option<String> {
    let payload = serde_json::from_str::<Value>(body).ok()?;

    if let Some(error) = payload
        .get("error")
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
    {
        return Some(error.to_string());
    }

    let joined = payload
        .get("errors")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("message").and_then(Value::as_str))
                .filter(|message| !message.trim().is_empty())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default();

    (!joined.is_empty()).then_some(joined)
}

/// Maps a finished HTTP exchange to an outcome.
pub fn outcome_from_response(ok: bool, body: Option<&str>) -> SubmitOutcome {
    if ok {
        return SubmitOutcome::Delivered;
    }

    SubmitOutcome::Rejected {
        server_message: body.and_then(parse_error_body),
    }
}

/// Lets at most one submission run at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitGate {
    in_flight: bool,
}

impl SubmitGate {
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn try_begin(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Message,
}

/// What the caller still has to do once a submission has finished.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitFollowUp {
    pub close_after_ms: Option<u32>,
}

/// Contact dialog state: visibility, the form draft, the shared status line and submit sequencing.
#[derive(Clone, Debug)]
pub struct ContactFlow {
    open: bool,
    focus_pending: bool,
    draft: ContactMessage,
    status: String,
    gate: SubmitGate,
    close_delay_ms: u32,
}

impl ContactFlow {
    pub fn new(close_delay_ms: u32) -> Self {
        Self {
            open: false,
            focus_pending: false,
            draft: ContactMessage::default(),
            status: String::new(),
            gate: SubmitGate::default(),
            close_delay_ms,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
        self.focus_pending = true;
    }

    pub fn close(&mut self) {
        self.open = false;
        self.focus_pending = false;
    }

    /// Returns `true` when the key closed the dialog.
    pub fn on_key(&mut self, key: &str) -> bool {
        if key != "Escape" || !self.open {
            return false;
        }
        self.close();
        true
    }

    /// `on_backdrop` is true only when the click landed outside the inner panel.
    pub fn on_backdrop_click(&mut self, on_backdrop: bool) -> bool {
        if !on_backdrop || !self.open {
            return false;
        }
        self.close();
        true
    }

    /// Set once per open; the first input is focused when this yields `true`.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_pending)
    }

    pub fn draft(&self) -> &ContactMessage {
        &self.draft
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.draft.name = value,
            Field::Email => self.draft.email = value,
            Field::Message => self.draft.message = value,
        }
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn show_status(&mut self, message: String) {
        self.status = message;
    }

    pub fn in_flight(&self) -> bool {
        self.gate.in_flight()
    }

    /// Starts a submission, or returns `None` while another one is still running.
    /// A mailto submission completes immediately and releases the gate.
    pub fn begin_submit(&mut self, action: &str) -> Option<SubmitTarget> {
        if !self.gate.try_begin() {
            return None;
        }

        self.status = SENDING_MESSAGE.to_string();
        let target = SubmitTarget::classify(action);
        if target == SubmitTarget::Mailto {
            self.gate.finish();
        }
        Some(target)
    }

    pub fn finish_submit(&mut self, outcome: &SubmitOutcome) -> SubmitFollowUp {
        self.gate.finish();
        self.status = outcome.feedback();

        if !outcome.should_reset() {
            return SubmitFollowUp {
                close_after_ms: None,
            };
        }

        self.draft = ContactMessage::default();
        SubmitFollowUp {
            close_after_ms: Some(self.close_delay_ms),
        }
    }
}
