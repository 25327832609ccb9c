use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::provider::ExternalIdentity;

/// The system's own user record, keyed 1:1 by the provider-assigned id
///
/// All attribute fields are optional and default to NULL. `first_name`
/// and `last_name` are only ever filled by the merge engine when they are
/// currently empty; human edits are never overwritten by automation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LocalProfile {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LocalProfile {
    /// Create an empty profile for a new identity
    pub fn new(id: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            first_name: None,
            last_name: None,
            bio: None,
            phone: None,
            job_title: None,
            company: None,
            location: None,
            timezone: None,
            website: None,
            twitter: None,
            linkedin: None,
            github: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Fill-only patch the merge engine stages against an existing profile
///
/// Fields are `Some` only when the merge decided to backfill them; the
/// store applies each present field and leaves the rest untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Presence-sensitive profile edit from an explicit update request
///
/// A field is only touched when it is present in the incoming JSON; an
/// explicit empty string clears the stored value to NULL. Unknown fields
/// are ignored by deserialization.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub twitter: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
}

fn clear_on_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

impl ProfileUpdate {
    /// Apply the present fields onto `profile`
    pub fn apply(&self, profile: &mut LocalProfile) {
        if let Some(email) = &self.email {
            profile.email = email.clone();
        }

        let attrs = [
            (&self.first_name, &mut profile.first_name),
            (&self.last_name, &mut profile.last_name),
            (&self.bio, &mut profile.bio),
            (&self.phone, &mut profile.phone),
            (&self.job_title, &mut profile.job_title),
            (&self.company, &mut profile.company),
            (&self.location, &mut profile.location),
            (&self.timezone, &mut profile.timezone),
            (&self.website, &mut profile.website),
            (&self.twitter, &mut profile.twitter),
            (&self.linkedin, &mut profile.linkedin),
            (&self.github, &mut profile.github),
        ];
        for (incoming, target) in attrs {
            if let Some(value) = incoming {
                *target = clear_on_empty(value);
            }
        }
    }
}

/// The single merged user view returned to clients
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalUser {
    pub id: String,
    pub email: String,
    pub is_admin: bool,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: String,
    pub bio: Option<String>,
    pub phone: Option<String>,
    pub job_title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub timezone: Option<String>,
    pub website: Option<String>,
    pub twitter: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CanonicalUser {
    /// Merge a verified identity with the stored profile (when one exists)
    /// into the response view. Read-only: assembly never writes.
    pub fn assemble(
        identity: &ExternalIdentity,
        profile: Option<&LocalProfile>,
        admin_emails: &HashSet<String>,
    ) -> Self {
        // The provider email wins for display; the stored one fills in when
        // the provider omitted it. A mismatch is surfaced, not corrected.
        let email = if identity.email.is_empty() {
            profile.map(|p| p.email.clone()).unwrap_or_default()
        } else {
            identity.email.clone()
        };

        let first_name = profile
            .and_then(|p| non_blank(p.first_name.as_deref()))
            .or_else(|| non_blank(identity.metadata_first_name.as_deref()));
        let last_name = profile
            .and_then(|p| non_blank(p.last_name.as_deref()))
            .or_else(|| non_blank(identity.metadata_last_name.as_deref()));

        let full_name = derive_full_name(first_name.as_deref(), last_name.as_deref(), &email);
        let is_admin = !email.is_empty() && admin_emails.contains(&email);

        Self {
            id: identity.id.clone(),
            email,
            is_admin,
            first_name,
            last_name,
            full_name,
            bio: profile.and_then(|p| p.bio.clone()),
            phone: profile.and_then(|p| p.phone.clone()),
            job_title: profile.and_then(|p| p.job_title.clone()),
            company: profile.and_then(|p| p.company.clone()),
            location: profile.and_then(|p| p.location.clone()),
            timezone: profile.and_then(|p| p.timezone.clone()),
            website: profile.and_then(|p| p.website.clone()),
            twitter: profile.and_then(|p| p.twitter.clone()),
            linkedin: profile.and_then(|p| p.linkedin.clone()),
            github: profile.and_then(|p| p.github.clone()),
            created_at: identity.created_at,
        }
    }
}

/// Trimmed value, or None when the input is absent or whitespace
pub(crate) fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// "First Last" when both parts are present, else the local-part of the email
fn derive_full_name(first: Option<&str>, last: Option<&str>, email: &str) -> String {
    match (first, last) {
        (Some(first), Some(last)) => format!("{first} {last}"),
        _ => email.split('@').next().unwrap_or_default().to_string(),
    }
}
