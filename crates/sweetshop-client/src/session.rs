use sweetshop_domain::user::User;

/// A signed-in user and the bearer token the server issued.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}
