//! Explicit session context.
//!
//! Views receive a [`SessionContext`] instead of reading global state. It
//! is created anonymous, started when a user signs in, refreshed when the
//! user's profile changes and ended at logout. Authentication itself
//! happens elsewhere; this only holds its result.

use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::SessionError;

/// User role. Parsed case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Superadmin,
    Nutritionist,
    Rector,
    Parent,
    Student,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Superadmin,
        Role::Nutritionist,
        Role::Rector,
        Role::Parent,
        Role::Student,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Nutritionist => "nutritionist",
            Role::Rector => "rector",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Roles that administer a whole school rather than one family.
    pub fn is_staff(self) -> bool {
        matches!(self, Role::Superadmin | Role::Nutritionist | Role::Rector)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == name)
            .ok_or_else(|| SessionError::UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: i64,
    #[serde(alias = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(alias = "rol")]
    pub role: Role,
    #[serde(default, alias = "escuela_id")]
    pub school_id: Option<i64>,
    #[serde(default = "default_active", alias = "activo")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl UserProfile {
    pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            school_id: None,
            active: true,
        }
    }

    pub fn with_school(mut self, school_id: i64) -> Self {
        self.school_id = Some(school_id);
        self
    }
}

/// Branding and contact details of the user's school.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchoolInfo {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub motto: Option<String>,
    pub level: Option<String>,
}

impl SchoolInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: id.into(),
            short_name: name.clone(),
            name,
            motto: None,
            level: None,
        }
    }
}

/// An active session.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    user: UserProfile,
    school: Option<SchoolInfo>,
    started_at: DateTime<Utc>,
}

impl Session {
    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn school(&self) -> Option<&SchoolInfo> {
        self.school.as_ref()
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SessionState {
    #[default]
    Anonymous,
    Active(Session),
}

/// Session lifecycle holder, passed explicitly to the views that need it.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: SessionState,
}

impl SessionContext {
    /// Creates an anonymous context.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            SessionState::Active(session) => Some(session),
            SessionState::Anonymous => None,
        }
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.session().map(Session::user)
    }

    pub fn role(&self) -> Option<Role> {
        self.session().map(Session::role)
    }

    pub fn school(&self) -> Option<&SchoolInfo> {
        self.session().and_then(Session::school)
    }

    /// Starts a session, replacing any previous one.
    pub fn start(&mut self, user: UserProfile, school: Option<SchoolInfo>) {
        if let SessionState::Active(previous) = &self.state {
            log::debug!("Session: replacing session of user {}", previous.user.id);
        }
        log::debug!("Session: started for user {} ({})", user.id, user.role);
        self.state = SessionState::Active(Session {
            user,
            school,
            started_at: Utc::now(),
        });
    }

    /// Replaces the user profile of the active session.
    ///
    /// School info is dropped when the role or school changes. Returns
    /// `false` when no session is active.
    pub fn refresh_user(&mut self, user: UserProfile) -> bool {
        let SessionState::Active(session) = &mut self.state else {
            log::warn!("Session: refresh_user without an active session");
            return false;
        };
        if session.user.role != user.role || session.user.school_id != user.school_id {
            log::debug!(
                "Session: user {} changed role or school, clearing school info",
                user.id
            );
            session.school = None;
        }
        session.user = user;
        true
    }

    /// Sets the school info of the active session.
    pub fn set_school(&mut self, school: SchoolInfo) -> bool {
        match &mut self.state {
            SessionState::Active(session) => {
                session.school = Some(school);
                true
            }
            SessionState::Anonymous => false,
        }
    }

    /// Ends the session, returning to anonymous.
    pub fn end(&mut self) -> Option<Session> {
        match std::mem::take(&mut self.state) {
            SessionState::Active(session) => {
                log::debug!("Session: ended for user {}", session.user.id);
                Some(session)
            }
            SessionState::Anonymous => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nutritionist() -> UserProfile {
        UserProfile::new(7, "Laura", "laura@example.com", Role::Nutritionist).with_school(1)
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("RECTOR".parse::<Role>().unwrap(), Role::Rector);
        assert_eq!(" Parent ".parse::<Role>().unwrap(), Role::Parent);
        assert_eq!(
            "chef".parse::<Role>(),
            Err(SessionError::UnknownRole("chef".to_string()))
        );
    }

    #[test]
    fn test_user_profile_accepts_backend_field_names() {
        let user: UserProfile = serde_json::from_value(json!({
            "id": 3,
            "nombre": "Carlos",
            "email": "carlos@example.com",
            "rol": "Student",
            "escuela_id": 2,
            "activo": false
        }))
        .unwrap();
        assert_eq!(user.role, Role::Student);
        assert_eq!(user.school_id, Some(2));
        assert!(!user.active);
    }

    #[test]
    fn test_lifecycle() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.is_active());
        assert!(ctx.end().is_none());

        ctx.start(nutritionist(), Some(SchoolInfo::new("central", "Colegio Central")));
        assert_eq!(ctx.role(), Some(Role::Nutritionist));
        assert_eq!(ctx.school().map(|s| s.short_name.as_str()), Some("Colegio Central"));

        let ended = ctx.end().unwrap();
        assert_eq!(ended.user().id, 7);
        assert_eq!(ctx.state(), &SessionState::Anonymous);
    }

    #[test]
    fn test_refresh_user_keeps_school_unless_role_changes() {
        let mut ctx = SessionContext::new();
        assert!(!ctx.refresh_user(nutritionist()));

        ctx.start(nutritionist(), Some(SchoolInfo::new("central", "Colegio Central")));
        let mut renamed = nutritionist();
        renamed.name = "Laura M.".to_string();
        assert!(ctx.refresh_user(renamed));
        assert!(ctx.school().is_some());
        assert_eq!(ctx.user().unwrap().name, "Laura M.");

        let mut promoted = nutritionist();
        promoted.role = Role::Rector;
        assert!(ctx.refresh_user(promoted));
        assert!(ctx.school().is_none());

        assert!(ctx.set_school(SchoolInfo::new("norte", "Instituto Técnico del Norte")));
        assert!(ctx.school().is_some());
    }
}
