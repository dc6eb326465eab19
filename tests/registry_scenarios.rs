//! End-to-end scenarios for the registry.
//!
//! Each test builds a small tree, drives it with input text, and checks
//! which callbacks ran and with what.

use std::cell::{Cell, RefCell};

use cmdtree::core::arguments::{GreedyStringParser, IntParser, StringParser};
use cmdtree::core::error::CommandError;
use cmdtree::core::reader::StringReader;
use cmdtree::core::source::Source;
use cmdtree::engine::{CommandBuilder, Registry, RegistryOptions};

// =============================================================================
// Test Fixtures
// =============================================================================

/// Context object recording callback invocations.
#[derive(Default)]
struct Recorder {
    calls: Cell<u32>,
    ints: RefCell<Vec<i32>>,
    strings: RefCell<Vec<String>>,
}

impl Recorder {
    fn hit(&self) {
        self.calls.set(self.calls.get() + 1);
    }
}

fn recorder<'a>(source: &Source<'a>) -> anyhow::Result<&'a Recorder> {
    Ok(source.get::<Recorder>()?)
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn zero_argument_command_runs_once_per_parse() {
    let mut registry = Registry::new();
    registry.add(CommandBuilder::new("test").execute(|source| {
        recorder(source)?.hit();
        Ok(())
    }));

    let rec = Recorder::default();
    registry.execute(&rec, "test").unwrap();
    assert_eq!(rec.calls.get(), 1);

    let err = registry.execute(&rec, "test2").unwrap_err();
    assert!(matches!(err, CommandError::UnknownCommand { ref literal, cursor: 0 } if literal == "test2"));
    assert_eq!(rec.calls.get(), 1);
}

#[test]
fn int_argument_is_decoded() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .argument::<IntParser>("n", "a number")
            .execute(|source, n| {
                let rec = recorder(source)?;
                rec.hit();
                rec.ints.borrow_mut().push(n);
                Ok(())
            }),
    );

    let rec = Recorder::default();
    registry.execute(&rec, "test 14").unwrap();
    assert_eq!(rec.calls.get(), 1);
    assert_eq!(*rec.ints.borrow(), [14]);

    let err = registry.execute(&rec, "test aze").unwrap_err();
    assert!(err.is_syntax());
    assert_eq!(err.cursor(), Some(5));
    assert_eq!(rec.calls.get(), 1);
}

#[test]
fn input_after_last_argument_is_left_unread() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .argument::<IntParser>("n", "")
            .execute(|source, n| {
                recorder(source)?.ints.borrow_mut().push(n);
                Ok(())
            }),
    );

    let rec = Recorder::default();
    registry.execute(&rec, "test 15 extra").unwrap();
    registry.execute(&rec, "test 15!").unwrap();
    assert_eq!(*rec.ints.borrow(), [15, 15]);

    assert!(!registry.is_valid("test 15 extra"));
    assert!(!registry.is_valid("test 15!"));
    assert!(registry.is_valid("test 15"));
}

#[test]
fn string_argument_accepts_unquoted_and_quoted() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .argument::<StringParser>("s", "")
            .execute(|source, s| {
                let rec = recorder(source)?;
                rec.hit();
                rec.strings.borrow_mut().push(s);
                Ok(())
            }),
    );

    let rec = Recorder::default();
    registry.execute(&rec, "test aze").unwrap();
    registry.execute(&rec, "test 'aze rty'").unwrap();
    registry.execute(&rec, r#"test "say \"hi\"""#).unwrap();
    assert_eq!(rec.calls.get(), 3);
    assert_eq!(*rec.strings.borrow(), ["aze", "aze rty", r#"say "hi""#]);

    assert!(registry.execute(&rec, "test 'unterminated").is_err());
    assert_eq!(rec.calls.get(), 3);
}

#[test]
fn parent_and_child_with_arguments() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .argument::<IntParser>("n", "")
            .execute(|source, n| {
                let rec = recorder(source)?;
                rec.hit();
                rec.ints.borrow_mut().push(n);
                Ok(())
            })
            .then(
                CommandBuilder::new("subcommand")
                    .argument::<IntParser>("n", "")
                    .execute(|source, n| {
                        let rec = recorder(source)?;
                        rec.hit();
                        rec.ints.borrow_mut().push(-n);
                        Ok(())
                    }),
            ),
    );

    let rec = Recorder::default();
    registry.execute(&rec, "test 14").unwrap();
    registry.execute(&rec, "test subcommand 14").unwrap();
    assert_eq!(rec.calls.get(), 2);
    assert_eq!(*rec.ints.borrow(), [14, -14]);

    assert!(registry.execute(&rec, "test subcommand").is_err());
    assert!(registry.execute(&rec, "test aze").is_err());
    assert_eq!(rec.calls.get(), 2);

    assert!(registry.is_valid("test 1"));
    assert!(registry.is_valid("test subcommand 1"));
    assert!(!registry.is_valid("test subcommand"));
}

#[test]
fn suggestions_fall_back_to_current_node() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .suggests(|_| vec!["alpha".into(), "beta".into()])
            .execute(|_| Ok(()))
            .then(
                CommandBuilder::new("sub")
                    .suggests(|_| vec!["gamma".into()])
                    .execute(|_| Ok(())),
            ),
    );

    let source = Source::empty();
    assert_eq!(registry.suggest(&source, "test unknown"), ["alpha", "beta"]);
    assert_eq!(registry.suggest(&source, "test sub"), ["gamma"]);
    assert!(registry.suggest(&source, "missing").is_empty());
}

#[test]
fn name_collisions_resolve_in_registration_order() {
    let mut registry = Registry::new();
    registry
        .add(
            CommandBuilder::new("first")
                .alias("shared")
                .execute(|source| {
                    recorder(source)?.ints.borrow_mut().push(1);
                    Ok(())
                }),
        )
        .add(CommandBuilder::new("shared").execute(|source| {
            recorder(source)?.ints.borrow_mut().push(2);
            Ok(())
        }));

    let rec = Recorder::default();
    registry.execute(&rec, "shared").unwrap();
    registry.execute(&rec, "shared").unwrap();
    assert_eq!(*rec.ints.borrow(), [1, 1]);
    assert_eq!(registry.get("shared").map(|n| n.name()), Some("first"));
}

#[test]
fn greedy_string_takes_the_rest() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("say")
            .alias("echo")
            .argument::<GreedyStringParser>("message", "")
            .execute(|source, message| {
                recorder(source)?.strings.borrow_mut().push(message);
                Ok(())
            }),
    );

    let rec = Recorder::default();
    registry.execute(&rec, "say hello 'there' \"x").unwrap();
    registry.execute(&rec, "echo sub").unwrap();
    assert_eq!(*rec.strings.borrow(), ["hello 'there' \"x", "sub"]);
    assert!(registry.execute(&rec, "say").is_err());
}

#[test]
fn wrong_context_type_is_reported() {
    let mut registry = Registry::new();
    registry.add(CommandBuilder::new("test").execute(|source| {
        recorder(source)?.hit();
        Ok(())
    }));

    let err = registry.execute(&"not a recorder", "test").unwrap_err();
    assert!(matches!(err, CommandError::Context(_)));
}

#[test]
fn callbacks_share_one_tree_across_threads() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("add")
            .argument::<IntParser>("n", "")
            .execute(|source, n| {
                let total = source.get::<std::sync::atomic::AtomicI32>()?;
                total.fetch_add(n, std::sync::atomic::Ordering::SeqCst);
                Ok(())
            }),
    );
    let registry = std::sync::Arc::new(registry);

    let handles: Vec<_> = (1..=4)
        .map(|i| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || {
                let total = std::sync::atomic::AtomicI32::new(0);
                for _ in 0..10 {
                    registry.execute(&total, &format!("add {i}")).unwrap();
                }
                total.into_inner()
            })
        })
        .collect();

    let totals: Vec<i32> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(totals, [10, 20, 30, 40]);
}

#[test]
fn usage_and_availability_respect_permissions() {
    let mut registry = Registry::new();
    registry
        .add(
            CommandBuilder::new("kick")
                .requires(|source| source.try_get::<bool>().copied().unwrap_or(false))
                .argument::<StringParser>("player", "")
                .execute(|_, _| Ok(())),
        )
        .add(
            CommandBuilder::new("list").execute(|_| Ok(())).then(
                CommandBuilder::new("page")
                    .argument::<IntParser>("n", "")
                    .execute(|_, _| Ok(())),
            ),
        );

    let admin = Source::new(&true);
    let guest = Source::new(&false);
    assert_eq!(
        registry.usage_lines(&admin),
        ["kick <player>", "list", "list page <n>"]
    );
    assert_eq!(registry.usage_lines(&guest), ["list", "list page <n>"]);
    assert_eq!(registry.available(&guest).len(), 1);
}

#[test]
fn input_limit_from_options() {
    let mut registry = Registry::with_options(RegistryOptions {
        max_input_length: Some(8),
    });
    registry.add(CommandBuilder::new("say").argument::<GreedyStringParser>("m", "").execute(|_, _| Ok(())));

    assert!(registry.parse_str(&Source::empty(), "say hi").is_ok());
    assert!(matches!(
        registry.parse_str(&Source::empty(), "say hello world"),
        Err(CommandError::InputTooLong { length: 15, limit: 8 })
    ));
}

#[test]
fn parse_from_a_mid_string_cursor() {
    let mut registry = Registry::new();
    registry.add(
        CommandBuilder::new("test")
            .argument::<IntParser>("n", "")
            .execute(|source, n| {
                recorder(source)?.ints.borrow_mut().push(n);
                Ok(())
            }),
    );

    let rec = Recorder::default();
    let mut reader = StringReader::with_cursor("/test 3", 1);
    registry.parse(&Source::new(&rec), &mut reader).unwrap();
    assert_eq!(*rec.ints.borrow(), [3]);
    assert!(!reader.can_read());
}
