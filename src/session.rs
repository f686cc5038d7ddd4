use std::cell::RefCell;
use std::rc::Rc;

use crate::graphql::LoginUser;

#[derive(Hash, Clone, Debug, PartialEq, Eq)]
pub struct UserIdentity {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Hash, Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
}

pub type SharedSession = Rc<RefCell<AuthSession>>;

impl AuthSession {
    pub fn new() -> Self {
        AuthSession {
            user: None,
            token: None,
        }
    }

    // only a session holding a token counts as signed in; a login reply
    // without a token leaves the viewer anonymous for guess persistence
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn apply_login(&mut self, login: LoginUser) {
        self.user = Some(UserIdentity {
            id: login.id,
            username: login.username,
            email: login.email,
        });

        if let Some(token) = login.token {
            self.token = Some(token);
        }
    }

    pub fn clear(&mut self) {
        self.user = None;
        self.token = None;
    }
}

pub fn shared_session() -> SharedSession {
    Rc::new(RefCell::new(AuthSession::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login_user(token: Option<&str>) -> LoginUser {
        LoginUser {
            id: "u1".into(),
            email: "joe@example.com".into(),
            username: "joe".into(),
            token: token.map(|token| token.into()),
        }
    }

    #[test]
    fn fresh_sessions_are_anonymous() {
        let session = AuthSession::new();
        assert!(!session.is_authenticated());
        assert_eq!(session.user, None);
    }

    #[test]
    fn login_with_token_authenticates() {
        let mut session = AuthSession::new();
        session.apply_login(login_user(Some("9al132kff")));

        assert!(session.is_authenticated());
        assert_eq!(session.token, Some("9al132kff".into()));
        assert_eq!(session.user.unwrap().username, "joe");
    }

    #[test]
    fn login_without_token_stays_anonymous() {
        let mut session = AuthSession::new();
        session.apply_login(login_user(None));

        // the identity is known but guesses still persist locally
        assert!(!session.is_authenticated());
        assert_eq!(session.user.unwrap().username, "joe");
    }

    #[test]
    fn login_without_token_keeps_an_existing_token() {
        let mut session = AuthSession::new();
        session.apply_login(login_user(Some("9al132kff")));
        session.apply_login(login_user(None));

        assert!(session.is_authenticated());
    }

    #[test]
    fn clear_resets_the_session() {
        let mut session = AuthSession::new();
        session.apply_login(login_user(Some("9al132kff")));
        session.clear();

        assert!(!session.is_authenticated());
        assert_eq!(session, AuthSession::new());
    }
}
