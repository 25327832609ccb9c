use chrono::Utc;

use crate::provider::ExternalIdentity;

use super::types::{LocalProfile, ProfilePatch, non_blank};

/// The minimal write needed to reconcile an identity with the store
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// The stored profile already reflects the identity
    NoOp,
    /// No profile exists yet; insert the merged one
    Insert,
    /// Backfill the staged fields on the existing row
    Patch(ProfilePatch),
}

/// Result of a merge: the reconciled profile and the write that realizes it
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub profile: LocalProfile,
    pub write: WriteOp,
}

/// Reconcile a verified identity with the locally stored profile.
///
/// A missing profile is created from the identity, taking names from the
/// provider metadata only when they are non-blank after trimming. An
/// existing profile is backfilled: a name field is staged only when the
/// stored value is empty AND the metadata value is non-blank. Fields a
/// human has filled in are never overwritten, and email is never changed
/// here; an email mismatch is tolerated and surfaced via the response
/// payload instead.
pub fn merge(identity: &ExternalIdentity, existing: Option<&LocalProfile>) -> MergeOutcome {
    let metadata_first = non_blank(identity.metadata_first_name.as_deref());
    let metadata_last = non_blank(identity.metadata_last_name.as_deref());

    let Some(existing) = existing else {
        let mut profile = LocalProfile::new(identity.id.clone(), identity.email.clone());
        profile.first_name = metadata_first;
        profile.last_name = metadata_last;
        return MergeOutcome {
            profile,
            write: WriteOp::Insert,
        };
    };

    let stage_first = non_blank(existing.first_name.as_deref()).is_none() && metadata_first.is_some();
    let stage_last = non_blank(existing.last_name.as_deref()).is_none() && metadata_last.is_some();

    if !stage_first && !stage_last {
        return MergeOutcome {
            profile: existing.clone(),
            write: WriteOp::NoOp,
        };
    }

    let patch = ProfilePatch {
        first_name: if stage_first { metadata_first } else { None },
        last_name: if stage_last { metadata_last } else { None },
        updated_at: Utc::now(),
    };

    let mut profile = existing.clone();
    if let Some(first) = &patch.first_name {
        profile.first_name = Some(first.clone());
    }
    if let Some(last) = &patch.last_name {
        profile.last_name = Some(last.clone());
    }
    profile.updated_at = patch.updated_at;

    MergeOutcome {
        profile,
        write: WriteOp::Patch(patch),
    }
}
