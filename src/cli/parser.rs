use crate::config::ViewMode;
use crate::export::ExportFormat;
use crate::models::stop_kind::StopKind;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for loomshift
/// Production monitoring of a weaving shift, stored in SQLite
#[derive(Parser)]
#[command(
    name = "loomshift",
    version = env!("CARGO_PKG_VERSION"),
    about = "Weaving shift monitor: loom readings, stops, ITH micro-stops, efficiency and OEE",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// View mode for this invocation (overrides `default_view`)
    #[arg(global = true, long = "view", value_enum)]
    pub view: Option<ViewMode>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing fields to the configuration file")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,

        #[arg(long, help = "Only the most recent N rows")]
        limit: Option<usize>,
    },

    /// Start, end or inspect the active shift
    Shift {
        #[command(subcommand)]
        action: ShiftAction,
    },

    /// Loom counter readings
    Reading {
        #[command(subcommand)]
        action: ReadingAction,
    },

    /// Maintenance stops and operational interventions
    Stop {
        #[command(subcommand)]
        action: StopAction,
    },

    /// Residue and off-spec fabric
    Quality {
        #[command(subcommand)]
        action: QualityAction,
    },

    /// ITH micro-stops
    Ith {
        #[command(subcommand)]
        action: IthAction,
    },

    /// Live metrics of the active shift
    Dashboard {
        #[arg(long, help = "Show the detail of one loom (id or code)")]
        loom: Option<String>,
    },

    /// Pareto ranking of stop time (or ITH reasons with --ith)
    Pareto {
        #[arg(long, help = "Rank ITH reasons instead of stop minutes")]
        ith: bool,

        #[arg(long, help = "Restrict to one loom (id or code)")]
        loom: Option<String>,
    },

    /// Production per clock hour for one loom
    Hourly {
        #[arg(long, help = "Loom id or code")]
        loom: String,
    },

    /// Closed shifts
    History {
        #[command(subcommand)]
        action: HistoryAction,
    },

    /// Operator catalog
    Operator {
        #[command(subcommand)]
        action: OperatorAction,
    },

    /// Product catalog
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },

    /// Loom catalog and assignments
    Loom {
        #[command(subcommand)]
        action: LoomAction,
    },

    /// Stop reason lists
    Reason {
        #[command(subcommand)]
        action: ReasonAction,
    },

    /// ITH reason catalog
    IthReason {
        #[command(subcommand)]
        action: IthReasonAction,
    },

    /// Goals, company and shift windows
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Shift, operator and ITH reports
    Report {
        #[command(subcommand)]
        action: ReportAction,
    },

    /// Export the whole document (json) or the active shift report
    Export {
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Replace the whole document with an exported JSON file
    Restore {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },

    /// Write a backup copy of the document
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long)]
        compress: bool,
    },

    /// Mirror the document into a local JSON file
    Sync {
        #[command(subcommand)]
        action: SyncAction,
    },
}

#[derive(Subcommand)]
pub enum ShiftAction {
    /// Open the shift of the current time window
    Start {
        #[arg(long)]
        responsible: String,

        #[arg(long)]
        recorder: String,
    },
    /// Close the active shift and move it to the history
    End {
        #[arg(long, default_value = "")]
        summary: String,

        #[arg(long = "plans", default_value = "")]
        action_plans: String,
    },
    /// Summary of the active shift
    Status,
}

#[derive(Subcommand)]
pub enum ReadingAction {
    /// Log counter values as LOOM=VALUE pairs (one timestamp for all)
    Log {
        #[arg(required = true, value_name = "LOOM=VALUE")]
        values: Vec<String>,
    },
    /// Correct a reading
    Edit {
        id: String,

        #[arg(long)]
        value: Option<String>,

        #[arg(long, help = "HH:MM on the same day, or YYYY-MM-DD HH:MM")]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a reading (the shift baseline cannot be deleted)
    Del { id: String },
    /// List the readings of the active shift
    List {
        #[arg(long)]
        loom: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum StopAction {
    /// Open a stop on a loom
    Start {
        loom: String,

        #[arg(long, value_enum)]
        kind: StopKind,

        #[arg(long)]
        reason: String,

        #[arg(long)]
        notes: Option<String>,
    },
    /// Close the active stop of a loom
    End {
        loom: String,

        #[arg(long, value_enum, help = "Which stop to close when both are open")]
        kind: Option<StopKind>,
    },
    /// List stops of the active shift
    List {
        #[arg(long, help = "Only stops still running")]
        active: bool,

        #[arg(long, value_enum)]
        kind: Option<StopKind>,
    },
}

#[derive(Subcommand)]
pub enum QualityAction {
    /// Record residue and off-spec fabric for a loom
    Add {
        loom: String,

        #[arg(long, default_value_t = 0.0)]
        residue: f64,

        #[arg(long = "off-spec", default_value_t = 0.0)]
        off_spec: f64,

        #[arg(long)]
        notes: Option<String>,
    },
    List,
}

#[derive(Subcommand)]
pub enum IthAction {
    /// Log an ITH micro-stop
    Add {
        loom: String,

        #[arg(long, help = "ITH reason code")]
        reason: String,
    },
    /// Change the reason, loom or time of an intervention
    Edit {
        id: String,

        #[arg(long, help = "ITH reason code")]
        reason: Option<String>,

        #[arg(long)]
        loom: Option<String>,

        #[arg(long, help = "HH:MM on the same day, or YYYY-MM-DD HH:MM")]
        at: Option<String>,
    },
    Del { id: String },
    List {
        #[arg(long)]
        loom: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Closed shifts, newest first
    List {
        #[arg(long, help = "Start date (YYYY-MM-DD)")]
        date: Option<String>,

        #[arg(long, help = "Filter on the responsible name")]
        responsible: Option<String>,
    },
    /// Detail of history entry N (1 = most recent)
    Show { n: usize },
}

#[derive(Args)]
pub struct OperatorFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long = "employee-id")]
    pub employee_id: Option<String>,

    #[arg(long)]
    pub role: Option<String>,

    #[arg(long)]
    pub shift: Option<String>,
}

#[derive(Subcommand)]
pub enum OperatorAction {
    Add {
        #[command(flatten)]
        fields: OperatorFields,
    },
    Edit {
        id: String,

        #[command(flatten)]
        fields: OperatorFields,
    },
    Del { id: String },
    List,
}

#[derive(Args)]
pub struct ProductFields {
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub code: Option<String>,

    #[arg(long, help = "Standard RPM")]
    pub rpm: Option<f64>,

    #[arg(long, help = "Threads per 10 cm")]
    pub density: Option<f64>,

    #[arg(long, help = "g/m²")]
    pub grammage: Option<f64>,

    #[arg(long, help = "Fabric width in metres")]
    pub width: Option<f64>,

    #[arg(long = "weft-dtex")]
    pub weft_dtex: Option<f64>,

    #[arg(long = "weft-color")]
    pub weft_color: Option<String>,

    #[arg(long = "warp-dtex")]
    pub warp_dtex: Option<f64>,

    #[arg(long = "warp-color")]
    pub warp_color: Option<String>,
}

#[derive(Subcommand)]
pub enum ProductAction {
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    Edit {
        id: String,

        #[command(flatten)]
        fields: ProductFields,
    },
    Del { id: String },
    List,
}

#[derive(Subcommand)]
pub enum LoomAction {
    Add {
        #[arg(long)]
        code: String,

        #[arg(long, default_value = "")]
        sector: String,

        #[arg(long, help = "Product id")]
        product: String,
    },
    /// Change a loom: product, sector, code or operator assignments
    Set {
        loom: String,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        sector: Option<String>,

        #[arg(long, help = "Product id")]
        product: Option<String>,

        #[arg(long = "operator", value_name = "SHIFT=OPERATOR_ID")]
        operators: Vec<String>,

        #[arg(long = "unassign", value_name = "SHIFT")]
        unassign: Vec<String>,
    },
    Del { loom: String },
    List,
}

#[derive(Subcommand)]
pub enum ReasonAction {
    /// Add a stop reason to the maintenance or operational list
    Add {
        #[arg(long, value_enum)]
        kind: StopKind,

        reason: String,
    },
    List,
}

#[derive(Subcommand)]
pub enum IthReasonAction {
    Add { code: String, description: String },
    Edit {
        id: String,

        #[arg(long)]
        code: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },
    Del { id: String },
    List,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    Show,
    Set {
        #[arg(long)]
        company: Option<String>,

        #[arg(long = "efficiency-goal")]
        efficiency_goal: Option<f64>,

        #[arg(long = "hourly-goal", help = "Fallback goal in m/h")]
        hourly_goal: Option<f64>,
    },
    /// Add or replace a shift window
    ShiftSet {
        name: String,

        #[arg(long, help = "HH:MM")]
        start: String,

        #[arg(long, help = "HH:MM")]
        end: String,
    },
    ShiftDel { name: String },
}

#[derive(Subcommand)]
pub enum ReportAction {
    /// Report of the active shift or a closed one
    Shift {
        #[arg(long, value_enum, default_value = "xlsx")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, help = "History entry N (1 = most recent) instead of the active shift")]
        history: Option<usize>,

        #[arg(long, short = 'f')]
        force: bool,
    },
    /// Readings of the looms assigned to an operator on one day
    Operator {
        #[arg(long, help = "Operator id")]
        operator: String,

        #[arg(long, help = "YYYY-MM-DD (default: today)")]
        date: Option<String>,

        #[arg(long, help = "Restrict to one shift name")]
        shift: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
    /// ITH interventions of one day grouped by hour
    Ith {
        #[arg(long, help = "YYYY-MM-DD (default: today)")]
        date: Option<String>,

        #[arg(long)]
        loom: Option<String>,

        #[arg(long, value_enum, default_value = "pdf")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum SyncAction {
    /// Bind a JSON file; a valid document in it replaces the current one
    Connect {
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'y', help = "Do not ask for confirmation")]
        yes: bool,
    },
    Disconnect,
    Status,
}
