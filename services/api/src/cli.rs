use crate::demo::{run_demo, run_rank, run_report, DemoArgs, RankArgs, ReportArgs};
use crate::explore::{
    run_compare, run_navigate, run_search, CompareArgs, NavigateArgs, SearchArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use sodapop::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "sodapop",
    about = "Rank regions by welfare urgency and draft regional demographic reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the welfare-urgency ranking for a year
    Rank(RankArgs),
    /// Print the narrative report for one region
    Report(ReportArgs),
    /// Print a side-by-side brief for two regions
    Compare(CompareArgs),
    /// Show a region's parent, children, siblings and path
    Navigate(NavigateArgs),
    /// Find regions by part of their name
    Search(SearchArgs),
    /// Rank and report over seeded synthetic data
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Serve a CSV export instead of the configured data source
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Rank(args) => run_rank(args),
        Command::Report(args) => run_report(args),
        Command::Compare(args) => run_compare(args),
        Command::Navigate(args) => run_navigate(args),
        Command::Search(args) => run_search(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sodapop::demographics::{AdminLevel, RankBy};

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["sodapop"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_requires_a_region_code() {
        assert!(Cli::try_parse_from(["sodapop", "report"]).is_err());
        let cli = Cli::try_parse_from(["sodapop", "report", "--code", "11680", "--year", "2024"])
            .expect("parses");
        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.code.as_str(), "1168000000");
                assert_eq!(args.year, Some(2024));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn rank_rejects_zero_limit() {
        assert!(Cli::try_parse_from(["sodapop", "rank", "--limit", "0"]).is_err());
    }

    #[test]
    fn rank_accepts_a_measure() {
        let cli = Cli::try_parse_from(["sodapop", "rank", "--by", "aging_velocity"]).expect("parses");
        match cli.command {
            Some(Command::Rank(args)) => assert_eq!(args.by, Some(RankBy::AgingVelocity)),
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["sodapop", "rank", "--by", "households"]).is_err());
    }

    #[test]
    fn compare_needs_both_regions() {
        assert!(Cli::try_parse_from(["sodapop", "compare", "--first", "11680"]).is_err());
        let cli = Cli::try_parse_from([
            "sodapop", "compare", "--first", "11680", "--second", "47720", "--year", "2024",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Compare(args)) => {
                assert_eq!(args.second.as_str(), "4772000000");
                assert_eq!(args.year, Some(2024));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn navigate_and_search_parse() {
        let cli = Cli::try_parse_from(["sodapop", "navigate", "--code", "1168010100"]).expect("parses");
        assert!(matches!(cli.command, Some(Command::Navigate(_))));

        let cli = Cli::try_parse_from(["sodapop", "search", "강남", "--level", "municipality"])
            .expect("parses");
        match cli.command {
            Some(Command::Search(args)) => {
                assert_eq!(args.query, "강남");
                assert_eq!(args.level, Some(AdminLevel::Municipality));
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(Cli::try_parse_from(["sodapop", "search", "강남", "--level", "ward"]).is_err());
    }
}
