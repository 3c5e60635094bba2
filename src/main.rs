use std::env;
use std::io;
use std::process::ExitCode;

use dotenvy::dotenv;

use broker_portal::dto::list::ListQuery;
use broker_portal::forms::list::ListQueryForm;
use broker_portal::models::config::PortalConfig;
use broker_portal::repository::SnapshotRepository;
use broker_portal::services::ListViewKind;
use broker_portal::services::export::export_list_view;
use broker_portal::services::lists::render_list_page_json;
use broker_portal::services::{ServiceError, ServiceResult};

const USAGE: &str = "usage: broker-portal <users|clients|companies|brokers|certificates> [QUERY] [--csv]\n\
    QUERY is a URL query string, e.g. 'search=acme&tag=active&from=2024-01-01&to=2024-06-30&page=2'";

struct Args {
    view: ListViewKind,
    query: String,
    csv: bool,
}

enum Command {
    Help,
    /// No view given, or more than one query string.
    Usage,
    Run(Args),
}

fn parse_args<I>(args: I) -> ServiceResult<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut view = None;
    let mut query = None;
    let mut csv = false;

    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--csv" => csv = true,
            _ if view.is_none() => view = Some(arg.parse::<ListViewKind>()?),
            _ if query.is_none() => query = Some(arg),
            _ => return Ok(Command::Usage),
        }
    }

    Ok(match view {
        Some(view) => Command::Run(Args {
            view,
            query: query.unwrap_or_default(),
            csv,
        }),
        None => Command::Usage,
    })
}

fn run(args: Args, config: &PortalConfig) -> ServiceResult<()> {
    let repo = SnapshotRepository::new(&config.data_dir);
    let form = ListQueryForm::from_query_string(&args.query)?;
    let query = ListQuery::try_from(form)?;

    if args.csv {
        let stdout = io::stdout();
        export_list_view(&repo, args.view, &query.filters, stdout.lock())?;
    } else {
        let json = render_list_page_json(&repo, args.view, &query, config.items_per_page)?;
        println!("{json}");
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let args = match parse_args(env::args().skip(1)) {
        Ok(Command::Run(args)) => args,
        Ok(Command::Help) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Ok(Command::Usage) => {
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
        Err(err @ ServiceError::UnknownView(_)) => {
            log::error!("{err}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match PortalConfig::load("config", &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading portal config: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
