use miette::{IntoDiagnostic, Result};
use morale_editor_core::{
    BoosterConfig, ComponentKind, DEFAULT_TRIGGER_CHAR, DEFAULT_TRIGGER_PHRASE, EditorPlugin,
    EditorState, InputDispatcher, SelectionState, StateCell, TriggerPolicy, type_text,
};
use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Parser)]
#[command(version, about = "Morale - type text through the morale booster editor", long_about = None)]
struct Cli {
    /// File of typed characters (stdin when absent)
    script: Option<PathBuf>,

    /// Path to a JSON booster config
    #[arg(long, env = "MORALE_CONFIG")]
    config: Option<PathBuf>,

    /// Widget trigger policy, overriding the config
    #[arg(long, value_enum)]
    trigger: Option<TriggerKind>,

    /// Trigger phrase (implies --trigger phrase)
    #[arg(long)]
    phrase: Option<String>,

    /// Trigger character (implies --trigger char)
    #[arg(long = "char")]
    trigger_char: Option<char>,

    /// Print the final caret after the blocks
    #[arg(long)]
    show_selection: bool,

    /// Undo this many steps after replaying
    #[arg(long, default_value_t = 0)]
    undo: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum TriggerKind {
    Char,
    Phrase,
}

fn main() -> Result<()> {
    init_miette()?;
    init_tracing();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => BoosterConfig::load(path).into_diagnostic()?,
        None => BoosterConfig::default(),
    };
    if let Some(policy) = trigger_override(&cli) {
        config.trigger = policy;
    }

    let dispatcher = config.build_dispatcher().into_diagnostic()?;
    let script = read_script(cli.script.as_ref())?;

    let mut host = StateCell::new(config.initial_state());
    let handled = type_text(&mut host, &dispatcher, &script).into_diagnostic()?;
    tracing::info!(chars = script.chars().count(), handled, "replayed script");

    let state = undo_steps(host.into_inner(), cli.undo);
    print_blocks(&state, &dispatcher);
    if cli.show_selection {
        println!("{}", format_selection(state.selection()));
    }

    Ok(())
}

/// Policy from the command line, if any trigger flag was given.
fn trigger_override(cli: &Cli) -> Option<TriggerPolicy> {
    let kind = cli.trigger.or(match (&cli.phrase, cli.trigger_char) {
        (Some(_), _) => Some(TriggerKind::Phrase),
        (None, Some(_)) => Some(TriggerKind::Char),
        (None, None) => None,
    })?;
    Some(match kind {
        TriggerKind::Char => TriggerPolicy::Char {
            ch: cli.trigger_char.unwrap_or(DEFAULT_TRIGGER_CHAR),
        },
        TriggerKind::Phrase => TriggerPolicy::Phrase {
            phrase: cli
                .phrase
                .clone()
                .unwrap_or_else(|| DEFAULT_TRIGGER_PHRASE.to_string()),
        },
    })
}

/// Script text with one trailing newline dropped, so files typed in an
/// ordinary editor do not end with an extra empty block.
fn read_script(path: Option<&PathBuf>) -> Result<String> {
    let mut script = match path {
        Some(path) => std::fs::read_to_string(path).into_diagnostic()?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf).into_diagnostic()?;
            buf
        }
    };
    if script.ends_with('\n') {
        script.pop();
        if script.ends_with('\r') {
            script.pop();
        }
    }
    Ok(script.replace("\r\n", "\n"))
}

fn undo_steps(mut state: EditorState, steps: usize) -> EditorState {
    for step in 0..steps {
        match state.undo() {
            Some(previous) => state = previous,
            None => {
                tracing::warn!(requested = steps, done = step, "nothing left to undo");
                break;
            }
        }
    }
    state
}

fn print_blocks(state: &EditorState, dispatcher: &InputDispatcher) {
    for block in state.current_content().blocks() {
        match dispatcher.block_renderer(block) {
            Some(component) => {
                let kind = match component.component {
                    ComponentKind::ImagePlaceholder => "image",
                };
                println!("[{}] widget({kind})", block.key());
            }
            None => println!("[{}] text {:?}", block.key(), block.text()),
        }
    }
}

fn format_selection(selection: &SelectionState) -> String {
    if selection.is_collapsed() {
        format!("caret: {}:{}", selection.focus_key, selection.focus_offset)
    } else {
        format!(
            "selection: {}:{} -> {}:{}",
            selection.anchor_key,
            selection.anchor_offset,
            selection.focus_key,
            selection.focus_offset
        )
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn init_miette() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .with_cause_chain()
                .context_lines(2)
                .build(),
        )
    }))
    .into_diagnostic()?;
    miette::set_panic_hook();
    Ok(())
}
