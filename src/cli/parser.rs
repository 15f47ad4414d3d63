use clap::{Parser, Subcommand};

/// Command-line interface definition for rTraining
#[derive(Parser)]
#[command(
    name = "rtraining",
    version = env!("CARGO_PKG_VERSION"),
    about = "Normalize training-program workbooks into SQLite and measure coverage, efficacy and monthly compliance",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the active configuration
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Inspect the database
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show row counts and reference diagnostics")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long = "operation", help = "Only rows of this operation (e.g. import)")]
        operation: Option<String>,
    },

    /// Import a workbook (.xlsx/.xls/.ods file, or a directory of <sheet>.csv files)
    Import {
        /// Workbook path
        workbook: String,

        #[arg(long = "strict", help = "Exit with an error if any sheet fails to import")]
        strict: bool,
    },

    /// Coverage, efficacy and monthly compliance
    Report {
        #[arg(long = "json", help = "Print the report as JSON")]
        json: bool,
    },

    /// Show or maintain the schedule of one role in one month
    Schedule {
        #[arg(long = "role", help = "Role the schedule applies to")]
        role: String,

        #[arg(long = "month", help = "Month (YYYY-MM)")]
        month: String,

        #[arg(long = "add", num_args = 1.., value_name = "EVENT_ID", help = "Schedule these events")]
        add: Vec<String>,

        #[arg(
            long = "delete",
            conflicts_with = "add",
            help = "Delete every entry of this role and month"
        )]
        delete: bool,
    },

    /// Append one execution (attendance) record
    Record {
        #[arg(long = "person", help = "Person id")]
        person: String,

        #[arg(long = "event", help = "Event id")]
        event: String,

        #[arg(long = "date", help = "Execution date (YYYY-MM-DD), default today")]
        date: Option<String>,

        #[arg(long = "hours", help = "Hours attended, default the event duration")]
        hours: Option<f64>,

        #[arg(long = "result", help = "Outcome, default Approved")]
        result: Option<String>,
    },
}
