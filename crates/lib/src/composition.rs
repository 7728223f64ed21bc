use crate::codec;
use crate::error::LaunchError;
use crate::url::SessionDescriptor;

/// Fragment key the client preloader reads the session from
pub const AUTH_FRAGMENT: &str = "#web_auth_token=";

/// Build the final composition argument for the player.
///
/// Trailing slashes are stripped; an empty result is an error. When a session
/// is present its encoded form is appended as the web auth token fragment.
pub fn finalize(
    composition: Option<&str>,
    session: Option<&SessionDescriptor>,
) -> Result<String, LaunchError> {
    let trimmed = composition.unwrap_or_default().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(LaunchError::MissingComposition);
    }

    Ok(match session {
        Some(session) => format!("{trimmed}{AUTH_FRAGMENT}{}", codec::encode(session.to_string())),
        None => trimmed.to_string(),
    })
}
