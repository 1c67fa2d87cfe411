use serde::Deserialize;
use std::collections::HashMap;

pub struct ContactSubmission {
    fields: HashMap<String, String>,
}

impl ContactSubmission {
    pub fn from_fields(fields: HashMap<String, String>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    pub fn acknowledgment(&self) -> String {
        let name = self.field("name").unwrap_or("there");
        format!("Thank you for your message, {name}! I'll get back to you soon.")
    }
}

#[derive(Deserialize)]
pub struct SubmissionResponse {
    pub ok: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SubmissionOutcome {
    Delivered,
    RejectedByEndpoint,
    NetworkUnreachable,
}

impl SubmissionOutcome {
    pub fn from_response(response: &SubmissionResponse) -> Self {
        if response.ok {
            Self::Delivered
        } else {
            Self::RejectedByEndpoint
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            Self::Delivered => "Message sent successfully!",
            Self::RejectedByEndpoint => "Error sending message. Please try again.",
            Self::NetworkUnreachable => "Unable to reach the server. Please try again.",
        }
    }

    // Entered data survives any non-delivered outcome.
    pub fn should_reset_form(self) -> bool {
        matches!(self, Self::Delivered)
    }
}
