//! CLI entrypoint for doc-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use colored::Colorize;
use debate_application::{
    AgentBackend, AlwaysContinue, AnswerParticipant, AskDocumentUseCase, ContinuePrompt,
    ConversationLogger, DebateAgents, DebateSession, DocumentLoader, FollowUpAgents,
    FollowUpGenerator, FollowUpProgressNotifier, GenerateQuestionsUseCase, NoConversationLogger,
    NoFollowUpProgress, PromptBudget, QuestionGenerator, RunFollowUpInput, RunFollowUpUseCase,
    SatisfactionJudge, Synthesizer, verify_setup,
};
use debate_domain::{DebateProtocol, GenerationOptions, Model, OutputFormat, SessionConfig};
use debate_infrastructure::{
    ConfigLoader, DOCUMENT_EXTENSIONS, FileConfig, FsDocumentLoader, JsonlConversationLogger,
    MarkdownTranscriptFile, ModelRouter, TiktokenEstimator, list_documents,
};
use debate_presentation::{
    ChatRepl, Cli, Command, ConsoleFormatter, DebateArgs, DebateProgress,
    FollowUpProgressReporter, InteractiveContinuePrompt, SimpleFollowUpProgress,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const PANEL_LOG_SUFFIX: &str = "panel_log";
const DEBATE_LOG_SUFFIX: &str = "debate_log";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())
            .map_err(|e| anyhow!("Failed to load configuration: {e}"))?
    };

    let log_file = cli.log_file.clone().or_else(|| config.logging.file.clone());
    let _log_guard = init_logging(cli.verbose, log_file.as_deref())?;

    if cli.no_color || !config.output.color {
        colored::control::set_override(false);
    }

    if let Command::ShowConfig = cli.command {
        return show_config(&cli, &config);
    }

    let warnings = config.check()?;
    for issue in &warnings {
        eprintln!("{} {}", "Warning:".yellow().bold(), issue.message);
    }

    info!("Starting doc-debate");

    let services = Services::new(&cli, &config)?;
    let format = cli
        .output_format()
        .or(config.output.format)
        .unwrap_or_default();
    let show_progress = !cli.quiet && config.repl.show_progress;

    match cli.command {
        Command::Chat { document } => {
            let participant = services.participant("Answer Agent", &config.models.answer_model())?;
            let use_case = AskDocumentUseCase::load(&*services.loader, &document, participant)?;

            ChatRepl::new(use_case)
                .with_progress(show_progress)
                .with_history_path(config.repl.history_path())
                .run()
                .await?;
            Ok(())
        }

        Command::Questions {
            document,
            num_questions,
        } => {
            let count = positive(num_questions.unwrap_or(config.debate.num_questions))?;
            let generator =
                QuestionGenerator::new(services.backend(&config.models.question_model())?);
            let questions = GenerateQuestionsUseCase::new(services.loader.clone(), generator)
                .execute(&document, count)
                .await?;

            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::questions(&questions)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::questions_json(&questions)),
            }
            Ok(())
        }

        Command::FollowUp {
            question_document,
            answer_document,
            num_questions,
            max_follow_ups,
            yes,
        } => {
            let input = RunFollowUpInput::new(question_document, answer_document)
                .with_num_questions(positive(
                    num_questions.unwrap_or(config.debate.num_questions),
                )?)
                .with_max_follow_ups(max_follow_ups.unwrap_or(config.debate.max_follow_ups));

            let judge_model = config.models.judge_model();
            let agents = FollowUpAgents {
                question_generator: QuestionGenerator::new(
                    services.backend(&config.models.question_model())?,
                ),
                participant: services.participant("Answer Agent", &config.models.answer_model())?,
                judge: SatisfactionJudge::new(services.backend(&judge_model)?),
                follow_up_generator: FollowUpGenerator::new(services.backend(&judge_model)?),
            };

            let prompt: Arc<dyn ContinuePrompt> = if yes {
                Arc::new(AlwaysContinue)
            } else {
                Arc::new(InteractiveContinuePrompt)
            };
            let use_case =
                RunFollowUpUseCase::new(services.loader.clone(), agents).with_continue_prompt(prompt);

            let progress: Box<dyn FollowUpProgressNotifier> =
                match (cli.quiet || format == OutputFormat::Json, show_progress) {
                    (true, _) => Box::new(NoFollowUpProgress),
                    (false, true) => Box::new(FollowUpProgressReporter::new()),
                    (false, false) => Box::new(SimpleFollowUpProgress),
                };
            let report = use_case.execute_with_progress(input, progress.as_ref()).await?;

            match format {
                OutputFormat::Text => print!("{}", ConsoleFormatter::follow_up_report(&report)),
                OutputFormat::Json => {
                    println!("{}", ConsoleFormatter::follow_up_report_json(&report))
                }
            }
            Ok(())
        }

        Command::Panel(args) => {
            let session = DebateRun {
                args,
                protocol: DebateProtocol::Panel,
                suffix: PANEL_LOG_SUFFIX,
            };
            session.run(&services, &config, format, show_progress).await
        }

        Command::Debate { args, max_rounds } => {
            let session = DebateRun {
                args,
                protocol: DebateProtocol::MultiRound {
                    max_rounds: max_rounds.unwrap_or(config.debate.max_rounds),
                },
                suffix: DEBATE_LOG_SUFFIX,
            };
            session.run(&services, &config, format, show_progress).await
        }

        // Handled before services are built.
        Command::ShowConfig => Ok(()),
    }
}

/// Install the tracing subscriber: stderr always, plus a file when requested.
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::new(level));

    let Some(path) = log_file else {
        tracing_subscriber::registry().with(stderr_layer).init();
        return Ok(None);
    };

    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
    std::fs::create_dir_all(directory)
        .with_context(|| format!("Could not create log directory {}", directory.display()))?;

    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(EnvFilter::new(file_level(level)));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();
    Ok(Some(guard))
}

/// The file log records at least `debug`, whatever the console shows.
fn file_level(console_level: &str) -> &'static str {
    if console_level == "trace" {
        "trace"
    } else {
        "debug"
    }
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (highest priority first):");
    for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
        println!("{line}");
    }

    let mut effective = serde_json::to_value(config)?;
    for provider in ["openai", "deepseek", "local"] {
        if let Some(key) = effective
            .pointer_mut(&format!("/providers/{provider}/api_key"))
            .filter(|v| !v.is_null())
        {
            *key = serde_json::Value::String("<redacted>".to_string());
        }
    }
    println!("\nEffective configuration:");
    println!("{}", serde_json::to_string_pretty(&effective)?);

    match config.check() {
        Ok(warnings) => {
            for issue in warnings {
                println!("{} {}", "Warning:".yellow().bold(), issue.message);
            }
        }
        Err(e) => println!("{} {}", "Error:".red().bold(), e),
    }
    Ok(())
}

fn positive(count: usize) -> Result<usize> {
    if count == 0 {
        bail!("Number of questions must be at least 1.");
    }
    Ok(count)
}

/// Shared adapters every command builds its agents from
struct Services {
    router: ModelRouter,
    budget: PromptBudget,
    options: GenerationOptions,
    loader: Arc<dyn DocumentLoader>,
    conversation_logger: Arc<dyn ConversationLogger>,
}

impl Services {
    fn new(cli: &Cli, config: &FileConfig) -> Result<Self> {
        let router = ModelRouter::new(config.provider_config(), &config.network_config())?;
        let budget = PromptBudget::new(
            Arc::new(TiktokenEstimator::new()),
            config.limits.max_input_tokens,
        );

        let conversation_logger: Arc<dyn ConversationLogger> = match cli
            .conversation_log
            .as_ref()
            .or(config.logging.conversation_log.as_ref())
        {
            Some(path) => {
                let logger = JsonlConversationLogger::open(path).with_context(|| {
                    format!("Could not open conversation log {}", path.display())
                })?;
                info!("Conversation log: {}", logger.path().display());
                Arc::new(logger)
            }
            None => Arc::new(NoConversationLogger),
        };

        Ok(Self {
            router,
            budget,
            options: config.limits.generation_options(),
            loader: Arc::new(FsDocumentLoader::new()),
            conversation_logger,
        })
    }

    fn backend(&self, model: &Model) -> Result<AgentBackend> {
        let gateway = self
            .router
            .gateway_for(model)
            .with_context(|| format!("Could not create a client for model {model}"))?;
        Ok(AgentBackend::new(gateway, self.budget.clone())
            .with_options(self.options.clone())
            .with_conversation_logger(self.conversation_logger.clone()))
    }

    fn participant(&self, name: &str, model: &Model) -> Result<AnswerParticipant> {
        Ok(AnswerParticipant::new(name, self.backend(model)?))
    }
}

/// A panel or multi-round debate invocation
struct DebateRun {
    args: DebateArgs,
    protocol: DebateProtocol,
    suffix: &'static str,
}

impl DebateRun {
    fn answer_documents(&self) -> Result<Vec<PathBuf>> {
        let mut documents = self.args.answers.clone();
        if let Some(dir) = &self.args.answer_dir {
            let found = list_documents(dir, &DOCUMENT_EXTENSIONS)?;
            if found.is_empty() {
                warn!("No .txt or .md files in {}", dir.display());
            }
            documents.extend(found);
        }
        if documents.is_empty() {
            bail!("At least one answer document is required (--answer or --answer-dir).");
        }
        Ok(documents)
    }

    async fn run(
        self,
        services: &Services,
        config: &FileConfig,
        format: OutputFormat,
        show_progress: bool,
    ) -> Result<()> {
        let answer_documents = self.answer_documents()?;
        let output_path = self.args.output_path.clone().unwrap_or_else(|| {
            config
                .debate
                .transcript_path(&self.args.question_document, self.suffix)
        });
        let num_questions = self.args.num_questions.unwrap_or(config.debate.num_questions);

        let session_config = SessionConfig::new(
            &self.args.question_document,
            answer_documents.clone(),
            &output_path,
        )
        .with_num_questions(num_questions)
        .with_protocol(self.protocol);

        let participants = config
            .models
            .participant_models(answer_documents.len())
            .iter()
            .enumerate()
            .map(|(i, model)| services.participant(&format!("Answer Agent {}", i + 1), model))
            .collect::<Result<Vec<_>>>()?;

        verify_setup(&session_config, participants.len(), &*services.loader)?;

        let agents = DebateAgents {
            question_generator: QuestionGenerator::new(
                services.backend(&config.models.question_model())?,
            ),
            participants,
            synthesizer: Synthesizer::new(services.backend(&config.models.synthesizer_model())?),
        };
        let mut session = DebateSession::new(
            session_config,
            agents,
            services.loader.clone(),
            Box::new(MarkdownTranscriptFile::new(&output_path)),
        )
        .with_conversation_logger(services.conversation_logger.clone());

        let progress = DebateProgress::new(show_progress && format == OutputFormat::Text);
        loop {
            tokio::select! {
                event = session.next_event() => {
                    let Some(event) = event else { break };
                    let line = match format {
                        OutputFormat::Text => ConsoleFormatter::event(&event),
                        OutputFormat::Json => ConsoleFormatter::event_json(&event),
                    };
                    progress.show(&event, &line);
                }
                _ = tokio::signal::ctrl_c() => {
                    progress.finish();
                    eprintln!(
                        "\n{} Sections already written to {} are kept.",
                        "Interrupted.".yellow().bold(),
                        output_path.display()
                    );
                    bail!("Debate interrupted");
                }
            }
        }
        progress.finish();

        if session.is_aborted() {
            bail!("Debate session aborted");
        }
        Ok(())
    }
}
