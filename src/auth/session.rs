use std::fmt;

/// Состояние одной интерактивной сессии. Явное значение, которым владеет
/// вызывающая сторона; никогда не сериализуется и не живёт в глобальном
/// состоянии.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated {
        username: String,
    },
}

////////////////////////////////////////////////////////////////////////////////
// Собственные методы
////////////////////////////////////////////////////////////////////////////////

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated { username } => Some(username),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Общие реализации трейтов для SessionState
////////////////////////////////////////////////////////////////////////////////

impl fmt::Display for SessionState {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated { username } => {
                write!(f, "authenticated as {username}")
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// Тесты
////////////////////////////////////////////////////////////////////////////////
