use crate::config::AuthConfig;

/// What the shell needs from an identity provider. The provider owns the
/// session; the shell only reads whether someone is signed in.
pub trait Identity: Send {
    fn is_authenticated(&self) -> bool;
    fn sign_in(&mut self);
    fn sign_out(&mut self);
    fn display_name(&self) -> Option<&str> {
        None
    }
}

/// Single-user session kept for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct LocalSession {
    user_name: Option<String>,
    signed_in: bool,
}

impl LocalSession {
    pub fn from_config(auth: &AuthConfig) -> Self {
        LocalSession {
            user_name: auth.user_name.clone().filter(|n| !n.trim().is_empty()),
            signed_in: auth.start_signed_in,
        }
    }
}

impl Identity for LocalSession {
    fn is_authenticated(&self) -> bool {
        self.signed_in
    }

    fn sign_in(&mut self) {
        if !self.signed_in {
            tracing::info!("Signed in as {}", self.display_name().unwrap_or("guest"));
        }
        self.signed_in = true;
    }

    fn sign_out(&mut self) {
        if self.signed_in {
            tracing::info!("Signed out");
        }
        self.signed_in = false;
    }

    fn display_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }
}
