//! Command tree: registration, argv resolution and invocation context
//!
//! The tree is assembled once by [`crate::cli::commands::build_registry`] and
//! rendered to a `clap::Command` for parsing. Leaves carry an [`Action`]; the
//! resolved action plus an immutable [`Context`] is handed to dispatch.

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::error::ErrorKind;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::debug;

use crate::cli::commands::{self, Action};
use crate::cli::{CliError, CliResult};
use crate::infrastructure::di::ServiceContainer;

/// How a flag consumes argv.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `--name`, true when present
    Switch,
    /// `-n -n -n`, counts occurrences
    Count,
    /// `--name <VALUE>`
    Value { value_name: &'static str },
    /// Required positional argument, optionally restricted to `choices`
    Positional {
        value_name: &'static str,
        choices: &'static [&'static str],
    },
}

/// A flag declared on a command node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
    pub kind: FlagKind,
    /// Inherited by every descendant command
    pub global: bool,
}

impl FlagSpec {
    fn new(name: &'static str, help: &'static str, kind: FlagKind) -> Self {
        Self {
            name,
            short: None,
            help,
            kind,
            global: false,
        }
    }

    pub fn switch(name: &'static str, help: &'static str) -> Self {
        Self::new(name, help, FlagKind::Switch)
    }

    pub fn count(name: &'static str, help: &'static str) -> Self {
        Self::new(name, help, FlagKind::Count)
    }

    pub fn value(name: &'static str, value_name: &'static str, help: &'static str) -> Self {
        Self::new(name, help, FlagKind::Value { value_name })
    }

    pub fn positional(
        name: &'static str,
        value_name: &'static str,
        choices: &'static [&'static str],
        help: &'static str,
    ) -> Self {
        Self::new(
            name,
            help,
            FlagKind::Positional {
                value_name,
                choices,
            },
        )
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn global(mut self) -> Self {
        self.global = true;
        self
    }

    fn to_arg(&self) -> Arg {
        let mut arg = Arg::new(self.name).help(self.help);
        arg = match self.kind {
            FlagKind::Switch => arg.long(self.name).action(ArgAction::SetTrue),
            FlagKind::Count => arg.long(self.name).action(ArgAction::Count),
            FlagKind::Value { value_name } => arg
                .long(self.name)
                .value_name(value_name)
                .action(ArgAction::Set),
            FlagKind::Positional {
                value_name,
                choices,
            } => {
                let arg = arg.value_name(value_name).required(true);
                if choices.is_empty() {
                    arg
                } else {
                    arg.value_parser(PossibleValuesParser::new(choices.iter().copied()))
                }
            }
        };
        if let Some(short) = self.short {
            arg = arg.short(short);
        }
        if self.global {
            arg = arg.global(true);
        }
        arg
    }
}

/// A node in the command tree. Leaves have an action; groups have children.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub long_about: Option<&'static str>,
    pub flags: Vec<FlagSpec>,
    pub action: Option<Action>,
}

impl CommandSpec {
    /// A grouping node that only holds subcommands.
    pub fn group(name: &'static str, about: &'static str) -> Self {
        Self {
            name,
            about,
            long_about: None,
            flags: Vec::new(),
            action: None,
        }
    }

    /// A leaf command that runs `action`.
    pub fn leaf(name: &'static str, about: &'static str, action: Action) -> Self {
        Self {
            action: Some(action),
            ..Self::group(name, about)
        }
    }

    pub fn long_about(mut self, text: &'static str) -> Self {
        self.long_about = Some(text);
        self
    }

    pub fn flag(mut self, flag: FlagSpec) -> Self {
        self.flags.push(flag);
        self
    }
}

#[derive(Debug, Clone)]
struct CommandNode {
    spec: CommandSpec,
    children: Vec<CommandNode>,
}

impl CommandNode {
    fn new(spec: CommandSpec) -> Self {
        Self {
            spec,
            children: Vec::new(),
        }
    }

    fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.spec.name == name)
    }

    fn child_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        self.children.iter_mut().find(|c| c.spec.name == name)
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(self.spec.name).about(self.spec.about);
        if let Some(long_about) = self.spec.long_about {
            cmd = cmd.long_about(long_about);
        }
        for flag in &self.spec.flags {
            cmd = cmd.arg(flag.to_arg());
        }
        if !self.children.is_empty() {
            cmd = cmd.arg_required_else_help(true);
            for child in &self.children {
                cmd = cmd.subcommand(child.to_command());
            }
        }
        cmd
    }
}

/// Global flag values resolved for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    /// Resolved command path below the root, e.g. `["battery", "status"]`
    pub path: Vec<String>,
    pub verbose: bool,
    /// Accepted config file, if given
    pub config: Option<PathBuf>,
    /// Logging verbosity (`-d` count)
    pub debug: u8,
}

impl Context {
    fn from_matches(path: Vec<String>, matches: &ArgMatches) -> Self {
        Self {
            path,
            verbose: flag_set(matches, "verbose"),
            config: matches
                .try_get_one::<String>("config")
                .ok()
                .flatten()
                .map(PathBuf::from),
            debug: matches
                .try_get_one::<u8>("debug")
                .ok()
                .flatten()
                .copied()
                .unwrap_or(0),
        }
    }
}

fn flag_set(matches: &ArgMatches, name: &str) -> bool {
    matches
        .try_get_one::<bool>(name)
        .ok()
        .flatten()
        .copied()
        .unwrap_or(false)
}

/// What to do with a parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// Run a leaf command's action
    Run(Action),
    /// Print text (help, version) and succeed
    Print(String),
}

/// A fully resolved command line.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub dispatch: Dispatch,
    pub context: Context,
    matches: ArgMatches,
}

impl Invocation {
    /// Value of a local string flag or positional on the resolved leaf.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .map(String::as_str)
    }
}

/// Tree of named commands with inherited global flags.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    root: CommandNode,
}

impl CommandRegistry {
    /// Create a registry whose root is `root`; its global flags apply to every command.
    pub fn new(root: CommandSpec) -> Self {
        Self {
            root: CommandNode::new(root),
        }
    }

    pub fn name(&self) -> &'static str {
        self.root.spec.name
    }

    /// Attach `spec` under the command at `parent` (empty slice = root).
    ///
    /// Fails if the parent does not exist or is a leaf, if a sibling already
    /// has the same name, or if a flag clashes with one it would inherit.
    pub fn register(&mut self, parent: &[&str], spec: CommandSpec) -> CliResult<()> {
        let location = self.describe(parent);
        let mut inherited: Vec<&FlagSpec> = Vec::new();
        let mut node = &self.root;
        inherited.extend(node.spec.flags.iter().filter(|f| f.global));
        for name in parent {
            node = node.child(name).ok_or_else(|| {
                CliError::Registration(format!("parent path '{}' does not exist", location))
            })?;
            inherited.extend(node.spec.flags.iter().filter(|f| f.global));
        }
        if node.spec.action.is_some() {
            return Err(CliError::Registration(format!(
                "'{}' is a leaf command and cannot have subcommands",
                location
            )));
        }
        if node.child(spec.name).is_some() {
            return Err(CliError::Registration(format!(
                "command '{}' already registered under '{}'",
                spec.name, location
            )));
        }
        for (i, flag) in spec.flags.iter().enumerate() {
            let earlier = spec.flags[..i].iter();
            if let Some(clash) = inherited
                .iter()
                .copied()
                .chain(earlier)
                .find(|other| flags_clash(flag, other))
            {
                return Err(CliError::Registration(format!(
                    "flag '{}' on '{} {}' clashes with '{}'",
                    flag.name, location, spec.name, clash.name
                )));
            }
        }

        let mut node = &mut self.root;
        for name in parent {
            node = match node.child_mut(name) {
                Some(child) => child,
                None => {
                    return Err(CliError::Registration(format!(
                        "parent path '{}' does not exist",
                        location
                    )))
                }
            };
        }
        debug!("register: '{} {}'", location, spec.name);
        node.children.push(CommandNode::new(spec));
        Ok(())
    }

    fn describe(&self, path: &[&str]) -> String {
        std::iter::once(self.root.spec.name)
            .chain(path.iter().copied())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render the tree as a clap command (also used for completions).
    pub fn to_command(&self) -> Command {
        self.root
            .to_command()
            .version(env!("CARGO_PKG_VERSION"))
            .propagate_version(true)
    }

    /// Parse `argv` (including the program name) into an [`Invocation`].
    ///
    /// Unknown commands or flags yield [`CliError::Usage`] carrying the rendered
    /// usage text. Help and version requests, and group commands given without
    /// a subcommand, resolve to [`Dispatch::Print`].
    pub fn resolve<I, T>(&self, argv: I) -> CliResult<Invocation>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        debug!(stage = "parsing");
        let matches = match self.to_command().try_get_matches_from(argv) {
            Ok(matches) => matches,
            Err(e) => {
                return match e.kind() {
                    ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => Ok(Invocation {
                        dispatch: Dispatch::Print(e.render().to_string()),
                        context: Context::default(),
                        matches: ArgMatches::default(),
                    }),
                    _ => Err(CliError::Usage(e.render().to_string())),
                }
            }
        };

        let mut node = &self.root;
        let mut path = Vec::new();
        let mut leaf = &matches;
        while let Some((name, sub)) = leaf.subcommand() {
            node = node
                .child(name)
                .ok_or_else(|| CliError::Usage(format!("unknown command '{}'", name)))?;
            path.push(name.to_string());
            leaf = sub;
        }

        let context = Context::from_matches(path, leaf);
        debug!(path = ?context.path, verbose = context.verbose, "resolved");

        // a group reached with only flags (`battery -v`) shows its help
        let dispatch = match node.spec.action {
            Some(action) => Dispatch::Run(action),
            None => Dispatch::Print(self.help_for(&context.path)),
        };

        Ok(Invocation {
            dispatch,
            context,
            matches: leaf.clone(),
        })
    }

    /// Rendered help of the command at `path` below the root.
    fn help_for(&self, path: &[String]) -> String {
        let mut cmd = self.to_command();
        cmd.build();
        for name in path {
            match cmd.find_subcommand(name) {
                Some(sub) => cmd = sub.clone(),
                None => break,
            }
        }
        cmd.render_help().to_string()
    }

    /// Resolve `argv` and run the selected handler, writing to `out`.
    ///
    /// A usage error returns before any handler (and so any external tool) runs.
    pub fn execute<I, T>(
        &self,
        argv: I,
        container: &ServiceContainer,
        out: &mut dyn Write,
    ) -> CliResult<()>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let invocation = self.resolve(argv)?;
        commands::dispatch(self, &invocation, container, out)
    }
}

fn flags_clash(a: &FlagSpec, b: &FlagSpec) -> bool {
    a.name == b.name || (a.short.is_some() && a.short == b.short)
}
