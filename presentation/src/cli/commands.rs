//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use debate_domain::OutputFormat;
use std::path::PathBuf;

/// Output format for reports and question lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// Human-readable console output
    Text,
    /// JSON output
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// CLI arguments for doc-debate
#[derive(Parser, Debug)]
#[command(name = "doc-debate")]
#[command(author, version, about = "Question generation and multi-agent debate over documents")]
#[command(long_about = r#"
doc-debate asks language models questions about documents and lets
document-bound agents answer, debate and converge on a final answer.

Commands:
  chat        Ask questions about one document interactively
  questions   Generate questions from a document
  follow-up   Answer generated questions, judging each answer and asking follow-ups
  panel       Several agents answer once; a synthesizer merges the answers
  debate      Several agents answer, then debate for a number of rounds

Configuration files are loaded from (in priority order):
1. DOC_DEBATE_* environment variables
2. --config <path>                          Explicit config file
3. ./debate.toml or ./.debate.toml          Project-level config
4. ~/.config/doc-debate/config.toml         Global config

Example:
  doc-debate questions report.md -n 3
  doc-debate follow-up report.md notes.md --max-follow-ups 1
  doc-debate debate report.md --answer a.md --answer b.md --max-rounds 3
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Write diagnostic logs to this file
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Record every model request and debate event as JSONL
    #[arg(long, value_name = "PATH", global = true)]
    pub conversation_log: Option<PathBuf>,

    /// Output format (overrides [output] format)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormatArg>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask questions about a document interactively
    Chat {
        /// Document the answers must come from
        document: PathBuf,
    },

    /// Generate questions from a document and print them
    Questions {
        document: PathBuf,

        /// Number of questions to generate
        #[arg(short, long, value_name = "N")]
        num_questions: Option<usize>,
    },

    /// Answer generated questions from a second document, with judged follow-ups
    FollowUp {
        /// Document the questions are generated from
        question_document: PathBuf,

        /// Document the answers must come from
        answer_document: PathBuf,

        /// Number of initial questions to generate
        #[arg(short, long, value_name = "N")]
        num_questions: Option<usize>,

        /// Follow-up questions allowed per initial question
        #[arg(long, value_name = "N")]
        max_follow_ups: Option<usize>,

        /// Do not ask before moving to the next question
        #[arg(short, long)]
        yes: bool,
    },

    /// Answer agents respond once; a synthesizer merges their answers
    Panel(DebateArgs),

    /// Answer agents respond, debate for several rounds, then a synthesizer concludes
    Debate {
        #[command(flatten)]
        args: DebateArgs,

        /// Debate rounds after the initial answers
        #[arg(short = 'r', long, value_name = "N")]
        max_rounds: Option<u32>,
    },

    /// Show configuration sources and the effective configuration
    ShowConfig,
}

/// Arguments shared by the panel and debate commands
#[derive(Args, Debug, Clone)]
pub struct DebateArgs {
    /// Document the questions are generated from
    pub question_document: PathBuf,

    /// Document for one answer agent (repeat for each agent)
    #[arg(short, long = "answer", value_name = "PATH")]
    pub answers: Vec<PathBuf>,

    /// Directory whose .txt and .md files each get an answer agent
    #[arg(long, value_name = "DIR")]
    pub answer_dir: Option<PathBuf>,

    /// Markdown log to write (defaults to <output_dir>/<question-doc>_<kind>_log.md)
    #[arg(long, value_name = "PATH")]
    pub output_path: Option<PathBuf>,

    /// Number of questions to generate
    #[arg(short, long, value_name = "N")]
    pub num_questions: Option<usize>,
}

impl Cli {
    /// Output format from the command line, if given.
    pub fn output_format(&self) -> Option<OutputFormat> {
        self.output.map(OutputFormat::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_debate_with_repeated_answers() {
        let cli = Cli::try_parse_from([
            "doc-debate",
            "debate",
            "report.md",
            "--answer",
            "a.md",
            "-a",
            "b.md",
            "--max-rounds",
            "3",
            "-n",
            "2",
        ])
        .unwrap();

        let Command::Debate { args, max_rounds } = cli.command else {
            panic!("expected debate command");
        };
        assert_eq!(args.question_document, PathBuf::from("report.md"));
        assert_eq!(args.answers, vec![PathBuf::from("a.md"), PathBuf::from("b.md")]);
        assert_eq!(args.num_questions, Some(2));
        assert_eq!(max_rounds, Some(3));
        assert!(args.output_path.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "doc-debate",
            "questions",
            "report.md",
            "-vv",
            "--output",
            "json",
            "--no-color",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert!(cli.no_color);
        assert_eq!(cli.output_format(), Some(OutputFormat::Json));
        assert!(matches!(cli.command, Command::Questions { num_questions: None, .. }));
    }

    #[test]
    fn test_follow_up_flags() {
        let cli = Cli::try_parse_from([
            "doc-debate",
            "follow-up",
            "q.md",
            "a.md",
            "--max-follow-ups",
            "0",
            "--yes",
        ])
        .unwrap();

        let Command::FollowUp {
            max_follow_ups,
            yes,
            num_questions,
            ..
        } = cli.command
        else {
            panic!("expected follow-up command");
        };
        assert_eq!(max_follow_ups, Some(0));
        assert!(yes);
        assert_eq!(num_questions, None);
    }

    #[test]
    fn test_negative_rounds_rejected() {
        let result = Cli::try_parse_from(["doc-debate", "debate", "q.md", "--max-rounds", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["doc-debate"]).is_err());
    }
}
