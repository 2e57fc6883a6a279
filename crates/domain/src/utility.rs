//! Admin utility actions.

use std::fmt;
use std::time::Duration;

/// A fire-and-forget maintenance action on the assistant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UtilityAction {
    Restart,
    Reboot,
    TrainAssistant,
    WipeAll,
    Update,
    AddUser,
    AddWakeword,
    TuneWakeword,
}

impl UtilityAction {
    pub const ALL: [Self; 8] = [
        Self::Restart,
        Self::Reboot,
        Self::TrainAssistant,
        Self::WipeAll,
        Self::Update,
        Self::AddUser,
        Self::AddWakeword,
        Self::TuneWakeword,
    ];

    /// Endpoint under `/admin/`.
    #[must_use]
    pub const fn endpoint(self) -> &'static str {
        match self {
            Self::Restart => "restart",
            Self::Reboot => "reboot",
            Self::TrainAssistant => "trainAssistant",
            Self::WipeAll => "wipeAll",
            // the backend route really is spelled this way
            Self::Update => "updatee",
            Self::AddUser => "addUser",
            Self::AddWakeword => "addWakeword",
            Self::TuneWakeword => "tuneWakeword",
        }
    }

    /// Wait before the first readiness probe.
    #[must_use]
    pub const fn settle_delay(self) -> Duration {
        match self {
            Self::Reboot => Duration::from_secs(10),
            Self::Restart | Self::TrainAssistant | Self::WipeAll | Self::Update => {
                Duration::from_secs(5)
            }
            Self::AddUser | Self::AddWakeword | Self::TuneWakeword => Duration::from_secs(1),
        }
    }
}

impl fmt::Display for UtilityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.endpoint())
    }
}
