//! `taw://` URL parsing
//!
//! # Format
//!
//! ```text
//! taw://<sessionName>:<sessionId>:<uid>[:<composition>]
//! ```
//!
//! The payload after the scheme is percent-decoded once and then split on
//! `:` into at most four fields. The composition field is percent-decoded a
//! second time, so a composition that was encoded before being embedded
//! (`file%253A...` or `http%3A%2F%2F...`) comes out as the plain locator.

use std::fmt;

use crate::codec;
use crate::error::LaunchError;

/// Scheme prefix recognised on the command line
pub const SCHEME: &str = "taw://";

/// Authenticated session triple carried by a taw URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDescriptor {
    pub session_name: String,
    pub session_id: String,
    pub uid: String,
}

impl fmt::Display for SessionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.session_name, self.session_id, self.uid)
    }
}

/// A decoded taw URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TawUrl {
    pub session: SessionDescriptor,
    pub composition: Option<String>,
}

impl TawUrl {
    /// Whether a command-line token is a taw URL
    pub fn matches(token: &str) -> bool {
        token.starts_with(SCHEME)
    }

    /// Parse a full `taw://...` token
    pub fn parse(token: &str) -> Result<Self, LaunchError> {
        let payload = token.strip_prefix(SCHEME).ok_or_else(|| {
            LaunchError::Format(format!("not a taw URL (expected {SCHEME} prefix): {token}"))
        })?;
        let payload = codec::decode_str(payload)?;

        let mut fields = payload.splitn(4, ':');
        let (Some(session_name), Some(session_id), Some(uid)) =
            (fields.next(), fields.next(), fields.next())
        else {
            return Err(LaunchError::Format(
                "TAW URL must consist of 4 colon-delimited fields: session name, session id, \
                 uid, composition (taw://[sessionName]:[sessionId]:[uid]:[composition])"
                    .to_string(),
            ));
        };

        let composition = fields.next().map(codec::decode_str).transpose()?;

        Ok(Self {
            session: SessionDescriptor {
                session_name: session_name.to_string(),
                session_id: session_id.to_string(),
                uid: uid.to_string(),
            },
            composition,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_session_and_composition() {
        let url = TawUrl::parse("taw://alpha:beta:gamma:%252Fhome%252Fuser%252Fgame.comp").unwrap();
        assert_eq!(url.session.to_string(), "alpha:beta:gamma");
        assert_eq!(url.session.session_name, "alpha");
        assert_eq!(url.session.session_id, "beta");
        assert_eq!(url.session.uid, "gamma");
        assert_eq!(url.composition.as_deref(), Some("/home/user/game.comp"));
    }

    #[test]
    fn plain_composition_is_kept() {
        let url = TawUrl::parse("taw://s1:s2:s3:/home/user/game.comp").unwrap();
        assert_eq!(url.composition.as_deref(), Some("/home/user/game.comp"));
    }

    #[test]
    fn composition_with_colons_survives_single_encoding() {
        let url = TawUrl::parse("taw://a:b:c:http%3A%2F%2Fexample.com%3A8080%2Fgame").unwrap();
        assert_eq!(url.composition.as_deref(), Some("http://example.com:8080/game"));
    }

    #[test]
    fn three_fields_leave_composition_unset() {
        let url = TawUrl::parse("taw://a:b:c").unwrap();
        assert_eq!(url.session.to_string(), "a:b:c");
        assert_eq!(url.composition, None);
    }

    #[test]
    fn empty_fields_are_allowed() {
        let url = TawUrl::parse("taw://::").unwrap();
        assert_eq!(url.session.to_string(), "::");
    }

    #[test]
    fn two_fields_is_a_format_error() {
        let err = TawUrl::parse("taw://alpha:beta").unwrap_err();
        assert!(matches!(err, LaunchError::Format(_)));
        assert!(err.to_string().contains("4 colon-delimited fields"));
    }

    #[test]
    fn malformed_escape_is_a_decode_error() {
        let err = TawUrl::parse("taw://a:b:c:%G1").unwrap_err();
        assert!(matches!(err, LaunchError::Decode(_)));
    }

    #[test]
    fn scheme_detection() {
        assert!(TawUrl::matches("taw://a:b:c"));
        assert!(!TawUrl::matches("http://example.com"));
        assert!(!TawUrl::matches("/home/user/taw://x"));
    }
}
