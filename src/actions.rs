use crate::backend::command::{try_in_order, AllFailed, CommandSpec, Executor};
use core::future::Future;
use log::{error, info, warn};
use strum::{Display, EnumIter};

const HYPRLOCK: CommandSpec = CommandSpec::new("hyprlock", &[]);
const FALLBACK_LOCKERS: [CommandSpec; 4] = [
    CommandSpec::new("loginctl", &["lock-session"]),
    CommandSpec::new("dm-tool", &["lock"]),
    CommandSpec::new("i3lock", &[]),
    CommandSpec::new("swaylock", &[]),
];
pub const REBOOT: CommandSpec = CommandSpec::new("systemctl", &["reboot"]);
pub const POWEROFF: CommandSpec = CommandSpec::new("systemctl", &["poweroff"]);

/// The buttons of the menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Action {
    Lock,
    Reboot,
    Shutdown,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpec {
    pub action: Action,
    pub label: &'static str,
    pub icon_name: &'static str,
}

impl Action {
    pub const fn spec(self) -> ActionSpec {
        let (label, icon_name) = match self {
            Self::Lock => ("Lock", "system-lock-screen-symbolic"),
            Self::Reboot => ("Reboot", "system-reboot-symbolic"),
            Self::Shutdown => ("Shutdown", "system-shutdown-symbolic"),
            Self::Cancel => ("Cancel", "window-close-symbolic"),
        };
        ActionSpec {
            action: self,
            label,
            icon_name,
        }
    }

    /// The question to ask before doing this action, if any.
    pub const fn prompt(self) -> Option<Prompt> {
        match self {
            Self::Reboot => Some(Prompt {
                title: "Reboot",
                message: "Restart the system?",
            }),
            Self::Shutdown => Some(Prompt {
                title: "Shutdown",
                message: "Power off the system?",
            }),
            Self::Lock | Self::Cancel => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub title: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Yes,
    No,
}

/// How a dispatched action ended. Only `Completed` closes the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    Cancelled,
    Failed,
}

impl Outcome {
    pub const fn closes_menu(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Every locker to try, in order. `hyprlock` is only worth trying inside Hyprland.
pub fn lock_chain(is_hyprland: bool) -> Vec<CommandSpec> {
    let mut chain = Vec::with_capacity(FALLBACK_LOCKERS.len() + 1);
    if is_hyprland {
        chain.push(HYPRLOCK);
    }
    chain.extend(FALLBACK_LOCKERS);
    chain
}

#[derive(Debug)]
pub struct Dispatcher<E> {
    executor: E,
    is_hyprland: bool,
}

impl<E: Executor> Dispatcher<E> {
    pub const fn new(executor: E, is_hyprland: bool) -> Self {
        Self {
            executor,
            is_hyprland,
        }
    }

    #[cfg(test)]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Perform `action`, asking `confirm` first for the destructive ones.
    pub async fn dispatch<F, Fut>(&self, action: Action, confirm: F) -> Outcome
    where
        F: FnOnce(Prompt) -> Fut,
        Fut: Future<Output = Response>,
    {
        match action {
            Action::Cancel => Outcome::Completed,
            Action::Lock => self.lock(),
            Action::Reboot => self.power(action, REBOOT, confirm).await,
            Action::Shutdown => self.power(action, POWEROFF, confirm).await,
        }
    }

    fn lock(&self) -> Outcome {
        match try_in_order(&self.executor, &lock_chain(self.is_hyprland)) {
            Ok(command) => info!("Locked the session with `{command}`"),
            Err(AllFailed(errors)) => {
                // the menu still closes, there's nothing more we can try
                let errors: Vec<_> = errors.iter().map(ToString::to_string).collect();
                warn!("Cannot lock the session: {}", errors.join(", "));
            }
        }
        Outcome::Completed
    }

    async fn power<F, Fut>(&self, action: Action, command: CommandSpec, confirm: F) -> Outcome
    where
        F: FnOnce(Prompt) -> Fut,
        Fut: Future<Output = Response>,
    {
        let Some(prompt) = action.prompt() else {
            return Outcome::Cancelled;
        };
        if confirm(prompt).await == Response::No {
            return Outcome::Cancelled;
        }

        match self.executor.spawn(&command) {
            Ok(()) => {
                info!("Started `{command}`");
                Outcome::Completed
            }
            Err(e) => {
                error!("{action} failed: {e}");
                Outcome::Failed
            }
        }
    }
}
