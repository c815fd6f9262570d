mod edit_script;
mod test_runner;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use compositor::loader::load_payload;
use compositor::pane::PaneContext;
use compositor::{Config, EventBatch, reducer};
use storykeep::payload::{ButtonPayload, ElementPayload, MarkdownPayload, ModalPayload, ParentPayload};

#[derive(Parser)]
#[command(name = "storykeep", version, about = "StoryKeep compositor tools")]
struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Compositor config file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve an action expression to its href
    Action(ActionArgs),

    /// Reduce a class payload to Tailwind classes
    Classes(ClassesArgs),

    /// Render a markdown pane with its payload
    Render(RenderArgs),

    /// Replay an edit script through an edit session
    Edit(EditArgs),

    /// Run .test.md fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct ActionArgs {
    /// Action expression, e.g. "(goto (storyFragment about))"
    expr: String,

    /// Slug of the page the action fires on
    #[arg(long, default_value = "")]
    slug: String,

    /// The page is a context pane
    #[arg(long)]
    context: bool,

    /// Dump the lexed tree
    #[arg(long)]
    ast: bool,

    /// Also print the click event recorded for this pane ID
    #[arg(long, value_name = "ID")]
    events: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PayloadKind {
    Element,
    Parent,
    Modal,
    Button,
}

#[derive(clap::Args)]
struct ClassesArgs {
    /// Payload file (.json, otherwise TOML)
    file: PathBuf,

    #[arg(long, value_enum, default_value_t = PayloadKind::Element)]
    kind: PayloadKind,
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown source file
    file: PathBuf,

    /// Markdown payload file (.json, otherwise TOML)
    #[arg(long)]
    payload: Option<PathBuf>,

    #[arg(long, default_value = "")]
    slug: String,

    #[arg(long)]
    context: bool,

    /// Pane ID recorded on click events
    #[arg(long, default_value = "pane")]
    id: String,

    /// Print the click events after the HTML
    #[arg(long)]
    events: bool,
}

#[derive(clap::Args)]
struct EditArgs {
    /// Edit script (TOML with [[field]] and [[step]] tables)
    script: PathBuf,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.md file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.no_color);

    let config = match &cli.config {
        Some(path) => Config::load(path).unwrap_or_else(|e| fail(e)),
        None => Config::default(),
    };

    match cli.command {
        Command::Action(args) => do_action(args, &config, cli.no_color),
        Command::Classes(args) => do_classes(args),
        Command::Render(args) => do_render(args, &config),
        Command::Edit(args) => {
            let report = edit_script::run(&args.script, &config).unwrap_or_else(|e| fail(e));
            print_json(&report);
        }
        Command::Test(args) => {
            let path = Path::new(&args.path);
            if args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &args.category, &config);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: bool, no_color: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .without_time()
        .init();
}

fn do_action(args: ActionArgs, config: &Config, no_color: bool) {
    let mut files = SimpleFiles::new();
    let file_id = files.add("<action>".to_string(), args.expr.clone());

    let lexed = storykeep::parser::Parser::new(args.expr.clone(), file_id).lex_action();
    if !lexed.is_clean() {
        let color_choice = if no_color {
            ColorChoice::Never
        } else {
            ColorChoice::Auto
        };
        let writer = StandardStream::stderr(color_choice);
        let term_config = term::Config::default();
        for diagnostic in &lexed.diagnostics {
            let _ = term::emit_to_write_style(&mut writer.lock(), &term_config, &files, &diagnostic.to_diagnostic());
        }
    }

    if args.ast {
        println!("{:#?}", lexed.nodes);
        return;
    }

    println!("{}", compositor::pre_parse_action(&lexed.nodes, &args.slug, args.context));

    if let Some(id) = &args.events {
        let mut batch = EventBatch::new();
        if let Some(event) = compositor::pre_parse_clicked(id, &lexed.nodes, config) {
            batch.push(event.into());
        }
        if let Some(seek) = compositor::pre_parse_bunny(&lexed.nodes) {
            tracing::debug!(slug = %seek.slug, t = seek.t, "video seek");
        }
        match batch.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => fail(e),
        }
    }
}

fn do_classes(args: ClassesArgs) {
    match args.kind {
        PayloadKind::Element => {
            let payload: ElementPayload = load_payload(&args.file).unwrap_or_else(|e| fail(e));
            print_json(&reducer::reduce_element(&payload));
        }
        PayloadKind::Parent => {
            let payload: ParentPayload = load_payload(&args.file).unwrap_or_else(|e| fail(e));
            print_json(&reducer::reduce_parent(&payload));
        }
        PayloadKind::Modal => {
            let payload: ModalPayload = load_payload(&args.file).unwrap_or_else(|e| fail(e));
            print_json(&reducer::reduce_modal(&payload));
        }
        PayloadKind::Button => {
            let payload: ButtonPayload = load_payload(&args.file).unwrap_or_else(|e| fail(e));
            print_json(&reducer::reduce_button(&payload));
        }
    }
}

fn do_render(args: RenderArgs, config: &Config) {
    let source = std::fs::read_to_string(&args.file).unwrap_or_else(|e| {
        fail(format!("cannot read '{}': {}", args.file.display(), e))
    });
    let payload: MarkdownPayload = match &args.payload {
        Some(path) => load_payload(path).unwrap_or_else(|e| fail(e)),
        None => MarkdownPayload::default(),
    };

    let doc = storykeep::parser::parse_markdown(&source);
    let ctx = PaneContext {
        id: &args.id,
        slug: &args.slug,
        is_context: args.context,
    };
    let rendered = compositor::render_pane(&doc, &payload, &ctx, config);
    print!("{}", rendered.html);

    if args.events {
        let mut batch = EventBatch::new();
        for event in rendered.events {
            batch.push(event.into());
        }
        print_json(&batch);
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn fail(error: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", error);
    process::exit(1);
}
