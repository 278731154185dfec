//! Screen variants and the transition function.
//!
//! The UI's views form a closed enum, and screen changes go through a
//! single pure transition function, so every reachable state is enumerable
//! and testable.

/// The screen currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Role selection: employee or admin.
    #[default]
    RoleSelect,
    /// Admin email/password form.
    AdminLogin,
    /// The attendance form.
    MarkAttendance,
    /// Submission confirmed.
    Success,
    /// Duplicate submission notice.
    AlreadyMarked,
    /// The admin record browser.
    Dashboard,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RoleSelect => write!(f, "role-select"),
            Self::AdminLogin => write!(f, "admin-login"),
            Self::MarkAttendance => write!(f, "mark-attendance"),
            Self::Success => write!(f, "success"),
            Self::AlreadyMarked => write!(f, "already-marked"),
            Self::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// A screen-changing outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// The employee role was chosen.
    ChooseEmployee,
    /// The admin role was chosen.
    ChooseAdmin,
    /// A submission was persisted.
    Submitted,
    /// The duplicate check rejected a submission.
    Duplicate,
    /// Admin credentials were accepted.
    SignedIn,
    /// The admin session ended.
    SignedOut,
    /// Navigation back to the start.
    Back,
}

/// Compute the next screen. Total: events that do not apply to the current
/// screen leave it unchanged.
#[must_use]
pub fn transition(screen: Screen, event: Event) -> Screen {
    match (screen, event) {
        (Screen::RoleSelect, Event::ChooseEmployee) => Screen::MarkAttendance,
        (Screen::RoleSelect, Event::ChooseAdmin) => Screen::AdminLogin,
        (Screen::MarkAttendance, Event::Submitted) => Screen::Success,
        (Screen::MarkAttendance, Event::Duplicate) => Screen::AlreadyMarked,
        (Screen::AdminLogin, Event::SignedIn) => Screen::Dashboard,
        (Screen::Dashboard, Event::SignedOut) => Screen::RoleSelect,
        (_, Event::Back) => Screen::RoleSelect,
        (unchanged, _) => unchanged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_SCREENS: [Screen; 6] = [
        Screen::RoleSelect,
        Screen::AdminLogin,
        Screen::MarkAttendance,
        Screen::Success,
        Screen::AlreadyMarked,
        Screen::Dashboard,
    ];

    const ALL_EVENTS: [Event; 7] = [
        Event::ChooseEmployee,
        Event::ChooseAdmin,
        Event::Submitted,
        Event::Duplicate,
        Event::SignedIn,
        Event::SignedOut,
        Event::Back,
    ];

    #[test]
    fn test_employee_flow() {
        let s = transition(Screen::RoleSelect, Event::ChooseEmployee);
        assert_eq!(s, Screen::MarkAttendance);
        assert_eq!(transition(s, Event::Submitted), Screen::Success);
        assert_eq!(transition(Screen::Success, Event::Back), Screen::RoleSelect);
    }

    #[test]
    fn test_duplicate_flow() {
        let s = transition(Screen::MarkAttendance, Event::Duplicate);
        assert_eq!(s, Screen::AlreadyMarked);
        assert_eq!(transition(s, Event::Back), Screen::RoleSelect);
    }

    #[test]
    fn test_admin_flow() {
        let s = transition(Screen::RoleSelect, Event::ChooseAdmin);
        assert_eq!(s, Screen::AdminLogin);
        let s = transition(s, Event::SignedIn);
        assert_eq!(s, Screen::Dashboard);
        assert_eq!(transition(s, Event::SignedOut), Screen::RoleSelect);
    }

    #[test]
    fn test_back_always_returns_to_role_select() {
        for screen in ALL_SCREENS {
            assert_eq!(transition(screen, Event::Back), Screen::RoleSelect);
        }
    }

    #[test]
    fn test_transition_is_total() {
        // Every (screen, event) pair yields some screen without panicking.
        for screen in ALL_SCREENS {
            for event in ALL_EVENTS {
                let _ = transition(screen, event);
            }
        }
    }

    #[test]
    fn test_inapplicable_events_keep_screen() {
        assert_eq!(
            transition(Screen::Dashboard, Event::Submitted),
            Screen::Dashboard
        );
        assert_eq!(
            transition(Screen::Success, Event::SignedIn),
            Screen::Success
        );
    }

    #[test]
    fn test_screen_display() {
        assert_eq!(Screen::RoleSelect.to_string(), "role-select");
        assert_eq!(Screen::Dashboard.to_string(), "dashboard");
    }

    #[test]
    fn test_default_screen() {
        assert_eq!(Screen::default(), Screen::RoleSelect);
    }
}
