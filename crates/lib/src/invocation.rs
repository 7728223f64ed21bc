use std::path::PathBuf;

use crate::error::LaunchError;
use crate::url::{SessionDescriptor, TawUrl};

/// Everything extracted from the launcher's command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Explicit player executable, if one was requested
    pub player: Option<PathBuf>,
    /// Session carried by the last taw URL seen
    pub session: Option<SessionDescriptor>,
    /// Composition path or URL, before finalization
    pub composition: Option<String>,
    /// Extra tokens after the composition. Kept for logging only, the
    /// player is never given them.
    pub passthrough: Vec<String>,
}

impl Invocation {
    /// Classify positional tokens in order.
    ///
    /// A `taw://` token sets the session (and the composition, if it has a
    /// fourth field). The first other token becomes the composition when none
    /// is set yet; anything after that is passthrough.
    pub fn build<I, S>(player: Option<PathBuf>, tokens: I) -> Result<Self, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut invocation = Self {
            player,
            ..Self::default()
        };

        for token in tokens {
            let token = token.into();
            if TawUrl::matches(&token) {
                let url = TawUrl::parse(&token)?;
                invocation.session = Some(url.session);
                if url.composition.is_some() {
                    invocation.composition = url.composition;
                }
            } else if invocation.composition.is_none() {
                invocation.composition = Some(token);
            } else {
                invocation.passthrough.push(token);
            }
        }

        Ok(invocation)
    }
}
