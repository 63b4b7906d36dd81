use clap::Parser;
use small_quiz::app::App;
use small_quiz::config::cli::Command;
use small_quiz::core::ConfigProvider;
use small_quiz::utils::error::ErrorSeverity;
use small_quiz::utils::{logger, validation::Validate};
use small_quiz::{AnswerSheet, CliConfig, QuizConfig, QuizError, QuizService, Served};
use std::path::Path;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();
    let interactive = matches!(cli.command, None | Some(Command::Tui));

    let config = match cli.resolve().and_then(|config| config.validate().map(|_| config)) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(e);
        }
    };

    if interactive {
        let log_path = Path::new(config.data_dir()).join("quiz.log");
        if let Err(e) = logger::init_file_logger(cli.verbose, &log_path) {
            eprintln!("❌ Could not open log file {}: {}", log_path.display(), e);
            std::process::exit(1);
        }
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting small-quiz");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(cli.command.unwrap_or(Command::Tui), &config).await {
        exit_with(e);
    }
}

async fn run(command: Command, config: &QuizConfig) -> small_quiz::Result<()> {
    let service = QuizService::from_config(config)?;

    match command {
        Command::Tui => {
            let mut app = App::new(
                service,
                Duration::from_secs(config.success_message_seconds()),
            );
            small_quiz::ui::run(&mut app).await?;
        }
        Command::List => {
            let served = service.list_questions().await;
            print_source(&served);
            let questions = served.into_inner();
            if questions.is_empty() {
                println!("No Questions Available");
            }
            for (index, question) in questions.iter().enumerate() {
                println!(
                    "{}. {}  [id {}, {}]",
                    index + 1,
                    question.text(),
                    question.id,
                    question.difficulty()
                );
                for (label, option) in question.present_options() {
                    println!("     {}. {}", label, option);
                }
            }
        }
        Command::Add(args) => {
            let draft = args.to_form().validate()?;
            let served = service.add_question(draft).await?;
            print_source(&served);
            println!("✅ Question added successfully! (id {})", served.into_inner().id);
        }
        Command::Submit { answers } => {
            let sheet = answers
                .iter()
                .map(|pair| AnswerSheet::parse_pair(pair))
                .collect::<small_quiz::Result<AnswerSheet>>()?;
            let served = service.submit_quiz(&sheet).await;
            print_source(&served);
            let score = served.into_inner();
            println!(
                "Score: {}% ({} of {} answered questions correct)",
                score.score, score.correct_answers, score.total_questions
            );
        }
    }

    Ok(())
}

fn print_source<T>(served: &Served<T>) {
    if served.is_local() {
        println!("(quiz server unavailable, using local questions)");
    }
}

fn exit_with(e: QuizError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
