use core::fmt::{self, Display};
use log::debug;
use std::{
    io,
    process::{Command, ExitStatus},
};

/// A fixed command line, resolved through `$PATH` when executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: &'static str,
    pub args: &'static [&'static str],
}

impl CommandSpec {
    pub const fn new(program: &'static str, args: &'static [&'static str]) -> Self {
        Self { program, args }
    }

    fn to_command(self) -> Command {
        let mut command = Command::new(self.program);
        command.args(self.args);
        command
    }
}

impl Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program)?;
        for arg in self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("`{0}` not found")]
    NotFound(&'static str),
    #[error("`{command}` exited with {status}")]
    Failed {
        command: CommandSpec,
        status: ExitStatus,
    },
    #[error("cannot start `{command}`: {source}")]
    Spawn {
        command: CommandSpec,
        #[source]
        source: io::Error,
    },
}

impl CommandError {
    fn from_io(command: CommandSpec, error: io::Error) -> Self {
        if error.kind() == io::ErrorKind::NotFound {
            Self::NotFound(command.program)
        } else {
            Self::Spawn {
                command,
                source: error,
            }
        }
    }
}

/// Every command of a chain failed, errors are in the same order as the chain.
#[derive(Debug, thiserror::Error)]
#[error("all {} commands failed", .0.len())]
pub struct AllFailed(pub Vec<CommandError>);

pub trait Executor {
    /// Run the command and wait for it, succeeding only on a zero exit status.
    fn run(&self, command: &CommandSpec) -> Result<(), CommandError>;
    /// Start the command without waiting for it.
    fn spawn(&self, command: &CommandSpec) -> Result<(), CommandError>;
}

/// Executes commands as child processes of the menu.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
        let status = command
            .to_command()
            .status()
            .map_err(|e| CommandError::from_io(*command, e))?;

        if status.success() {
            Ok(())
        } else {
            Err(CommandError::Failed {
                command: *command,
                status,
            })
        }
    }

    fn spawn(&self, command: &CommandSpec) -> Result<(), CommandError> {
        command
            .to_command()
            .spawn()
            .map(drop)
            .map_err(|e| CommandError::from_io(*command, e))
    }
}

/// Run each command of `chain` until one succeeds, and return it.
pub fn try_in_order<'a>(
    executor: &impl Executor,
    chain: &'a [CommandSpec],
) -> Result<&'a CommandSpec, AllFailed> {
    let mut errors = Vec::with_capacity(chain.len());
    for command in chain {
        match executor.run(command) {
            Ok(()) => return Ok(command),
            Err(e) => {
                debug!("{e}, trying next command");
                errors.push(e);
            }
        }
    }

    Err(AllFailed(errors))
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::{cell::RefCell, collections::HashSet};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Call {
        Run(CommandSpec),
        Spawn(CommandSpec),
    }

    /// Records every call, and fails the programs it was told to.
    #[derive(Debug, Default)]
    pub struct RecordingExecutor {
        pub calls: RefCell<Vec<Call>>,
        failing: HashSet<&'static str>,
    }

    impl RecordingExecutor {
        pub fn failing(programs: &[&'static str]) -> Self {
            Self {
                calls: RefCell::default(),
                failing: programs.iter().copied().collect(),
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn result(&self, command: &CommandSpec) -> Result<(), CommandError> {
            if self.failing.contains(command.program) {
                Err(CommandError::NotFound(command.program))
            } else {
                Ok(())
            }
        }
    }

    impl Executor for RecordingExecutor {
        fn run(&self, command: &CommandSpec) -> Result<(), CommandError> {
            self.calls.borrow_mut().push(Call::Run(*command));
            self.result(command)
        }

        fn spawn(&self, command: &CommandSpec) -> Result<(), CommandError> {
            self.calls.borrow_mut().push(Call::Spawn(*command));
            self.result(command)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{Call, RecordingExecutor};
    use super::*;

    const CHAIN: &[CommandSpec] = &[
        CommandSpec::new("first", &[]),
        CommandSpec::new("second", &["--flag"]),
        CommandSpec::new("third", &[]),
    ];

    #[test]
    fn test_display() {
        assert_eq!(
            CommandSpec::new("loginctl", &["lock-session"]).to_string(),
            "loginctl lock-session"
        );
        assert_eq!(CommandSpec::new("i3lock", &[]).to_string(), "i3lock");
    }

    #[test]
    fn test_first_succeeds() {
        let executor = RecordingExecutor::default();
        let used = try_in_order(&executor, CHAIN).unwrap();
        assert_eq!(used, &CHAIN[0]);
        assert_eq!(executor.calls(), vec![Call::Run(CHAIN[0])]);
    }

    #[test]
    fn test_stops_at_first_success() {
        let executor = RecordingExecutor::failing(&["first"]);
        let used = try_in_order(&executor, CHAIN).unwrap();
        assert_eq!(used, &CHAIN[1]);
        assert_eq!(
            executor.calls(),
            vec![Call::Run(CHAIN[0]), Call::Run(CHAIN[1])]
        );
    }

    #[test]
    fn test_all_failed() {
        let executor = RecordingExecutor::failing(&["first", "second", "third"]);
        let AllFailed(errors) = try_in_order(&executor, CHAIN).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[2], CommandError::NotFound("third")));
        assert_eq!(executor.calls().len(), 3);
    }

    #[test]
    fn test_empty_chain() {
        let executor = RecordingExecutor::default();
        assert!(try_in_order(&executor, &[]).unwrap_err().0.is_empty());
    }

    #[test]
    fn test_system_executor_not_found() {
        let command = CommandSpec::new("powermenu-this-program-does-not-exist", &[]);
        assert!(matches!(
            SystemExecutor.run(&command),
            Err(CommandError::NotFound(_))
        ));
    }

    #[test]
    fn test_system_executor_exit_status() {
        assert!(SystemExecutor.run(&CommandSpec::new("true", &[])).is_ok());
        assert!(matches!(
            SystemExecutor.run(&CommandSpec::new("false", &[])),
            Err(CommandError::Failed { .. })
        ));
    }
}
