use crate::models::TradeProfile;

/// Check if `profile` may be ranked for `subject`
///
/// A candidate holds the opposite trade role and is not the subject itself.
/// Admin accounts are never candidates and never receive matches.
#[inline]
pub fn is_candidate(subject: &TradeProfile, profile: &TradeProfile) -> bool {
    if profile.id == subject.id {
        return false;
    }

    subject.user_type.counterpart() == Some(profile.user_type)
}
