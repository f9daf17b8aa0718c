//! Navigation state machine mapping inbound user actions to screens.
//!
//! The progression is stateless: every transition is derived purely from
//! which action arrived, never from a stored "current screen", so pressing
//! a stale button simply re-runs that screen against content fetched fresh
//! at request time.

/// Command that enters the funnel
pub const ENTRY_COMMAND: &str = "/start";

/// Callback-data wire ids for inline buttons
pub mod callback {
    pub const START_TAP: &str = "start_bot";
    pub const ACTIVATE: &str = "activate_ai";
    pub const CONNECT: &str = "connect";
    pub const RESCAN: &str = "rescan";
    /// Prefix for category scan buttons; the category key follows it
    pub const SCAN_PREFIX: &str = "scan_";
}

/// An inbound user action: the entry command or one of the button presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    EntryCommand,
    StartTap,
    Activate,
    Connect,
    SelectCategory(String),
    Rescan,
}

impl Action {
    /// Parse callback data into an action. Unknown data yields `None` and
    /// is ignored by the caller.
    pub fn parse(data: &str) -> Option<Action> {
        if let Some(key) = data.strip_prefix(callback::SCAN_PREFIX) {
            if key.is_empty() {
                return None;
            }
            return Some(Action::SelectCategory(key.to_string()));
        }
        match data {
            callback::START_TAP => Some(Action::StartTap),
            callback::ACTIVATE => Some(Action::Activate),
            callback::CONNECT => Some(Action::Connect),
            callback::RESCAN => Some(Action::Rescan),
            _ => None,
        }
    }

    /// Whether this action dispenses scan content and is therefore subject
    /// to the cooldown gate
    pub fn is_dispensing(&self) -> bool {
        matches!(self, Action::SelectCategory(_))
    }
}

/// A named step in the funnel, each with its own rendering template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Intro,
    PostIntro,
    AiActivated,
    CountrySelect,
    ScanResult,
    ScanAgainPrompt,
}

/// Screen rendered in response to an action
pub fn next_screen(action: &Action) -> Screen {
    match action {
        Action::EntryCommand => Screen::Intro,
        Action::StartTap => Screen::PostIntro,
        Action::Activate => Screen::AiActivated,
        Action::Connect | Action::Rescan => Screen::CountrySelect,
        Action::SelectCategory(_) => Screen::ScanResult,
    }
}

/// Content category the action's screen draws from, or `None` for screens
/// built from static strings only
pub fn required_category<'a>(action: &'a Action, default_category: &'a str) -> Option<&'a str> {
    match action {
        Action::EntryCommand | Action::StartTap | Action::Activate => Some(default_category),
        Action::SelectCategory(key) => Some(key),
        Action::Connect | Action::Rescan => None,
    }
}

/// Screen sent automatically after another, with no user action in between
pub fn follow_up(screen: Screen) -> Option<Screen> {
    match screen {
        Screen::ScanResult => Some(Screen::ScanAgainPrompt),
        _ => None,
    }
}
