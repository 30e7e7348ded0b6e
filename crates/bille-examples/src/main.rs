use facet::Facet;
use figue as args;
use std::time::Duration;

mod scenarios;

use scenarios::RunOptions;

type AnyResult<T> = Result<T, String>;

const DEFAULT_TIMEOUT_MS: u64 = 5_000;

#[derive(Facet, Debug)]
struct Cli {
    #[facet(flatten)]
    builtins: args::FigueBuiltins,
    /// Global timeout in milliseconds; overrides BILLE_TIMEOUT_MS.
    #[facet(args::named, default)]
    timeout_ms: Option<u64>,
    /// Fold values closer together than this many milliseconds.
    #[facet(args::named, default)]
    merge_threshold_ms: Option<u64>,
    /// Give every lane the default color instead of its branch color.
    #[facet(args::named, default)]
    no_inherit_color: bool,
    #[facet(args::named, default)]
    pretty: bool,
    #[facet(args::subcommand)]
    scenario: ScenarioKind,
}

#[derive(Facet, Debug)]
#[repr(u8)]
enum ScenarioKind {
    Ticks,
    HigherOrder,
    Burst,
    Failing,
    Payloads,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> AnyResult<()> {
    let cli = parse_cli()?;

    let timeout_ms = cli
        .timeout_ms
        .or_else(|| {
            std::env::var("BILLE_TIMEOUT_MS")
                .ok()
                .and_then(|value| value.parse().ok())
        })
        .unwrap_or(DEFAULT_TIMEOUT_MS);

    let options = RunOptions {
        timeout: Duration::from_millis(timeout_ms),
        merge_threshold_ms: cli.merge_threshold_ms,
        inherit_main_color: !cli.no_inherit_color,
        pretty: cli.pretty,
    };

    match cli.scenario {
        ScenarioKind::Ticks => scenarios::ticks::run(&options).await,
        ScenarioKind::HigherOrder => scenarios::higher_order::run(&options).await,
        ScenarioKind::Burst => scenarios::burst::run(&options).await,
        ScenarioKind::Failing => scenarios::failing::run(&options).await,
        ScenarioKind::Payloads => scenarios::payloads::run(&options).await,
    }
}

fn parse_cli() -> AnyResult<Cli> {
    let figue_config = args::builder::<Cli>()
        .map_err(|e| format!("failed to build CLI schema: {e}"))?
        .cli(|cli| cli.strict())
        .help(|h| {
            h.program_name("bille-examples")
                .description("Trace demo streams and print their marble-diagram models")
                .version(option_env!("CARGO_PKG_VERSION").unwrap_or("dev"))
        })
        .build();

    args::Driver::new(figue_config)
        .run()
        .into_result()
        .map(|v| v.value)
        .map_err(|e| e.to_string())
}
