//! cli::demo
//!
//! The command set served by `cmdtree-console`.
//!
//! # Commands
//!
//! ```text
//! scoreboard objectives add <objective>
//! scoreboard objectives list
//! scoreboard players set <player> <objective> <score>
//! scoreboard players add <player> <objective> <amount>
//! scoreboard players get <player> <objective>
//! tp <x> <y> <z>
//! say <message>            (alias: echo)
//! gamemode <mode>          (operators only)
//! help
//! ```
//!
//! Every callback runs against a [`ConsoleSession`] and writes its output
//! into the session rather than to stdout.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fmt;

use anyhow::{bail, Context as _};

use crate::core::arguments::{DoubleParser, GreedyStringParser, IntParser, StringParser};
use crate::core::error::CommandError;
use crate::core::parser::ArgumentParser;
use crate::core::reader::StringReader;
use crate::core::source::Source;
use crate::engine::{CommandBuilder, Registry, RegistryOptions};

/// State shared by every command run in one console session.
#[derive(Debug)]
pub struct ConsoleSession {
    name: String,
    operator: bool,
    objectives: RefCell<BTreeMap<String, BTreeMap<String, i32>>>,
    position: Cell<[f64; 3]>,
    game_mode: Cell<GameMode>,
    output: RefCell<Vec<String>>,
}

impl ConsoleSession {
    pub fn new(name: impl Into<String>, operator: bool) -> Self {
        Self {
            name: name.into(),
            operator,
            objectives: RefCell::new(BTreeMap::new()),
            position: Cell::new([0.0; 3]),
            game_mode: Cell::new(GameMode::Survival),
            output: RefCell::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_operator(&self) -> bool {
        self.operator
    }

    pub fn position(&self) -> [f64; 3] {
        self.position.get()
    }

    pub fn game_mode(&self) -> GameMode {
        self.game_mode.get()
    }

    /// Current score, if the objective exists and the player has one.
    pub fn score(&self, player: &str, objective: &str) -> Option<i32> {
        self.objectives
            .borrow()
            .get(objective)
            .and_then(|scores| scores.get(player))
            .copied()
    }

    pub fn objective_names(&self) -> Vec<String> {
        self.objectives.borrow().keys().cloned().collect()
    }

    /// Append a line of command output.
    pub fn say(&self, line: impl Into<String>) {
        self.output.borrow_mut().push(line.into());
    }

    /// Drain the output produced since the last call.
    pub fn take_output(&self) -> Vec<String> {
        self.output.take()
    }

    fn add_objective(&self, objective: String) -> anyhow::Result<()> {
        let mut objectives = self.objectives.borrow_mut();
        if objectives.contains_key(&objective) {
            bail!("objective '{objective}' already exists");
        }
        objectives.insert(objective, BTreeMap::new());
        Ok(())
    }

    fn update_score(
        &self,
        player: String,
        objective: &str,
        update: impl FnOnce(i32) -> i32,
    ) -> anyhow::Result<i32> {
        let mut objectives = self.objectives.borrow_mut();
        let scores = objectives
            .get_mut(objective)
            .with_context(|| format!("unknown objective '{objective}'"))?;
        let score = scores.entry(player).or_insert(0);
        *score = update(*score);
        Ok(*score)
    }
}

/// Game modes accepted by `gamemode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    Survival,
    Creative,
    Adventure,
    Spectator,
}

impl GameMode {
    pub const ALL: [GameMode; 4] = [
        GameMode::Survival,
        GameMode::Creative,
        GameMode::Adventure,
        GameMode::Spectator,
    ];

    pub fn name(self) -> &'static str {
        match self {
            GameMode::Survival => "survival",
            GameMode::Creative => "creative",
            GameMode::Adventure => "adventure",
            GameMode::Spectator => "spectator",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.name() == name)
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a [`GameMode`] by name.
#[derive(Debug, Clone, Copy)]
pub struct GameModeParser;

impl ArgumentParser for GameModeParser {
    type Output = GameMode;
    const NAME: &'static str = "game mode";

    fn parse(reader: &mut StringReader) -> Result<GameMode, CommandError> {
        let start = reader.cursor();
        let word = reader.read_unquoted_string()?;
        GameMode::from_name(&word).ok_or_else(|| {
            reader.set_cursor(start);
            CommandError::parser(Self::NAME, format!("Unknown game mode '{word}'"), start)
        })
    }
}

fn session<'a>(source: &Source<'a>) -> anyhow::Result<&'a ConsoleSession> {
    Ok(source.get::<ConsoleSession>()?)
}

fn is_operator(source: &Source<'_>) -> bool {
    source
        .try_get::<ConsoleSession>()
        .is_some_and(ConsoleSession::is_operator)
}

fn objective_suggestions(source: &Source<'_>) -> Vec<String> {
    source
        .try_get::<ConsoleSession>()
        .map(ConsoleSession::objective_names)
        .unwrap_or_default()
}

fn scoreboard() -> CommandBuilder {
    let objectives = CommandBuilder::new("objectives")
        .description("Manage objectives")
        .then(
            CommandBuilder::new("add")
                .description("Create an objective")
                .argument::<StringParser>("objective", "Objective name")
                .execute(|source, objective| {
                    let session = session(source)?;
                    session.add_objective(objective.clone())?;
                    session.say(format!("Created objective {objective}"));
                    Ok(())
                }),
        )
        .then(
            CommandBuilder::new("list")
                .description("List objectives")
                .execute(|source| {
                    let session = session(source)?;
                    let names = session.objective_names();
                    if names.is_empty() {
                        session.say("There are no objectives");
                    } else {
                        session.say(format!("Objectives: {}", names.join(", ")));
                    }
                    Ok(())
                }),
        );

    let players = CommandBuilder::new("players")
        .description("Manage player scores")
        .then(
            CommandBuilder::new("set")
                .description("Set a player's score")
                .argument::<StringParser>("player", "Player name")
                .argument::<StringParser>("objective", "Objective name")
                .argument::<IntParser>("score", "New score")
                .suggests(objective_suggestions)
                .execute(|source, player, objective, score| {
                    let session = session(source)?;
                    session.update_score(player.clone(), &objective, |_| score)?;
                    session.say(format!("Set {objective} for {player} to {score}"));
                    Ok(())
                }),
        )
        .then(
            CommandBuilder::new("add")
                .description("Add to a player's score")
                .argument::<StringParser>("player", "Player name")
                .argument::<StringParser>("objective", "Objective name")
                .argument::<IntParser>("amount", "Amount to add")
                .suggests(objective_suggestions)
                .execute(|source, player, objective, amount| {
                    let session = session(source)?;
                    let score = session.update_score(player.clone(), &objective, |current| {
                        current.saturating_add(amount)
                    })?;
                    session.say(format!("Set {objective} for {player} to {score}"));
                    Ok(())
                }),
        )
        .then(
            CommandBuilder::new("get")
                .description("Show a player's score")
                .argument::<StringParser>("player", "Player name")
                .argument::<StringParser>("objective", "Objective name")
                .suggests(objective_suggestions)
                .execute(|source, player, objective| {
                    let session = session(source)?;
                    let score = session
                        .score(&player, &objective)
                        .with_context(|| format!("{player} has no score for {objective}"))?;
                    session.say(format!("{player} has {score} {objective}"));
                    Ok(())
                }),
        );

    CommandBuilder::new("scoreboard")
        .description("Track player scores")
        .then(objectives)
        .then(players)
}

/// The tree served by the console.
pub fn registry(options: RegistryOptions) -> Registry {
    let mut registry = Registry::with_options(options);

    registry
        .add(scoreboard())
        .add(
            CommandBuilder::new("tp")
                .description("Teleport to a position")
                .argument::<DoubleParser>("x", "X coordinate")
                .argument::<DoubleParser>("y", "Y coordinate")
                .argument::<DoubleParser>("z", "Z coordinate")
                .suggests(|source| {
                    source
                        .try_get::<ConsoleSession>()
                        .map(|session| {
                            let [x, y, z] = session.position();
                            vec![format!("{x} {y} {z}")]
                        })
                        .unwrap_or_default()
                })
                .execute(|source, x, y, z| {
                    let session = session(source)?;
                    session.position.set([x, y, z]);
                    session.say(format!("Teleported {} to {x}, {y}, {z}", session.name()));
                    Ok(())
                }),
        )
        .add(
            CommandBuilder::new("say")
                .description("Broadcast a message")
                .alias("echo")
                .argument::<GreedyStringParser>("message", "Text to send")
                .execute(|source, message| {
                    let session = session(source)?;
                    session.say(format!("[{}] {message}", session.name()));
                    Ok(())
                }),
        )
        .add(
            CommandBuilder::new("gamemode")
                .description("Change game mode")
                .requires(is_operator)
                .argument::<GameModeParser>("mode", "survival, creative, adventure or spectator")
                .suggests(|_| GameMode::ALL.iter().map(|m| m.name().to_string()).collect())
                .execute(|source, mode| {
                    let session = session(source)?;
                    session.game_mode.set(mode);
                    session.say(format!("Set own game mode to {mode}"));
                    Ok(())
                }),
        )
        .add(
            CommandBuilder::new("help")
                .description("List commands")
                .execute(|source| {
                    let session = session(source)?;
                    session.say("Commands: scoreboard, tp, say, gamemode, help");
                    Ok(())
                }),
        );

    registry
}

/// Check permission along the literal path the input selects.
///
/// Returns the name of the first node `source` may not use.
pub fn denied_node(registry: &Registry, source: &Source<'_>, input: &str) -> Option<String> {
    let mut reader = StringReader::new(input);
    reader.skip_whitespace();
    let literal = reader.read_string().ok()?;
    let mut node = registry.get(&literal)?;

    loop {
        if !node.can_use(source) {
            return Some(node.name().to_string());
        }
        let Some(next) = reader
            .read_string()
            .ok()
            .and_then(|literal| node.child(&literal))
        else {
            return None;
        };
        node = next;
    }
}
