use crate::models::Identity;

/// Where unauthenticated users are sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Read-only view of the sign-in state owned by the auth provider.
///
/// Handed to the fetcher and reconciler at construction; nothing in this
/// crate changes it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    access_token: Option<String>,
    admin: Option<Identity>,
}

impl Session {
    pub fn authenticated(access_token: impl Into<String>, admin: Option<Identity>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            admin,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }

    pub fn current_user(&self) -> Option<&Identity> {
        self.admin.as_ref()
    }

    /// Bearer credential attached to every service call.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gate {
    Render,
    Redirect(&'static str),
}

pub fn gate(session: &Session) -> Gate {
    if session.is_authenticated() {
        Gate::Render
    } else {
        Gate::Redirect(LOGIN_ROUTE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_redirects_anonymous() {
        assert_eq!(gate(&Session::anonymous()), Gate::Redirect("/login"));
    }

    #[test]
    fn test_gate_renders_signed_in() {
        let admin = Identity {
            first_name: "Grace".into(),
            last_name: "Hopper".into(),
            email: None,
        };
        let session = Session::authenticated("tok", Some(admin.clone()));
        assert_eq!(gate(&session), Gate::Render);
        assert_eq!(session.current_user(), Some(&admin));
        assert_eq!(session.access_token(), Some("tok"));
    }
}
