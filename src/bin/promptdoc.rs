//! promptdoc CLI — token counting, budgeted truncation, document text
//! extraction, and the LLM-backed prompt/summarization flows.
//!
//! Usage:
//!   promptdoc count <file> [--model <m>]                 Count tokens in a document
//!   promptdoc truncate <file> --max-tokens <n> [--model <m>]
//!   promptdoc extract <file>                             Print extracted text
//!   promptdoc prompt [--role <r>] [--task <t>] ...       Structured prompt flow
//!   promptdoc summarize <file>                           Two-step summarization flow

use promptdoc::extract::extract_text_or_diagnostic;
use promptdoc::prompt::PromptParts;
use promptdoc::tokens::{count_tokens, truncate_to_token_limit};
use promptdoc::{AppConfig, PromptOps};
use std::path::{Path, PathBuf};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "count" => cmd_count(&args[2..]),
        "truncate" => cmd_truncate(&args[2..]),
        "extract" => cmd_extract(&args[2..]),
        "prompt" => cmd_prompt(&args[2..]).await,
        "summarize" => cmd_summarize(&args[2..]).await,
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!(
        r#"promptdoc — prompt builder & document summarizer

USAGE:
    promptdoc <COMMAND> [OPTIONS]

COMMANDS:
    count <file> [--model <m>]                     Extract a document and count its tokens
    truncate <file> --max-tokens <n> [--model <m>] Truncate a document to a token budget
    extract <file>                                 Print extracted plain text
    prompt [--role <r>] [--task <t>] [--instruction <i>] [--context <c>]
           [--examples <e>] [--reasoning-steps <s>] [--delimiters <d>]
                                                   Generate an improved structured prompt
    summarize <file>                               Generate a summarization prompt, then a summary
    version                                        Show version information
    help                                           Show this help message

ENVIRONMENT:
    OPENAI_API_KEY        API key (required for prompt/summarize)
    OPENAI_MODEL          Model id (default gpt-3.5-turbo)
    OPENAI_BASE_URL       Endpoint base URL (default https://api.openai.com/v1)
    OPENAI_TEMPERATURE    Sampling temperature for the prompt flow
    OPENAI_MAX_TOKENS     Output-token budget for the prompt flow"#
    );
}

fn cmd_version() {
    println!("promptdoc {}", env!("CARGO_PKG_VERSION"));
}

fn cmd_count(args: &[String]) {
    let path = required_path(args, "count");
    let model = flag_value(args, "--model").unwrap_or_else(default_model);
    let text = extract_text_or_diagnostic(&path);
    println!("{}", count_tokens(&text, &model));
}

fn cmd_truncate(args: &[String]) {
    let path = required_path(args, "truncate");
    let model = flag_value(args, "--model").unwrap_or_else(default_model);
    let max_tokens: usize = match flag_value(args, "--max-tokens").and_then(|v| v.parse().ok()) {
        Some(n) => n,
        None => {
            eprintln!("truncate requires --max-tokens <n>");
            std::process::exit(1);
        }
    };

    let text = extract_text_or_diagnostic(&path);
    let (truncated, token_count) = truncate_to_token_limit(&text, max_tokens, &model);
    eprintln!("[{token_count} tokens]");
    println!("{truncated}");
}

fn cmd_extract(args: &[String]) {
    let path = required_path(args, "extract");
    println!("{}", extract_text_or_diagnostic(&path));
}

async fn cmd_prompt(args: &[String]) {
    let parts = PromptParts {
        role: flag_value(args, "--role").unwrap_or_default(),
        task: flag_value(args, "--task").unwrap_or_default(),
        instruction: flag_value(args, "--instruction").unwrap_or_default(),
        context: flag_value(args, "--context").unwrap_or_default(),
        examples: flag_value(args, "--examples").unwrap_or_default(),
        reasoning_steps: flag_value(args, "--reasoning-steps").unwrap_or_default(),
        delimiters: flag_value(args, "--delimiters").unwrap_or_default(),
    };

    if parts.is_blank() {
        eprintln!("Please fill in at least one field to generate a prompt.");
        std::process::exit(1);
    }

    let ops = build_ops();
    match ops.generate_prompt(&parts).await {
        Ok(generated) => {
            println!("=== Combined Prompt ===\n{}\n", generated.combined);
            println!("=== Generated Prompt ===\n{}", generated.response);
        }
        Err(e) => {
            // Failures surface as describable text, never a panic; the
            // combined prompt is still useful on its own.
            println!("=== Combined Prompt ===\n{}\n", parts.combine());
            println!("Error calling completion API: {e}");
            std::process::exit(1);
        }
    }
}

async fn cmd_summarize(args: &[String]) {
    let path = required_path(args, "summarize");
    let document = extract_text_or_diagnostic(&path);

    let ops = build_ops();
    let summarization_prompt = match ops.generate_summarization_prompt(&document).await {
        Ok(p) => p,
        Err(e) => {
            println!("Error generating summarization prompt: {e}");
            std::process::exit(1);
        }
    };
    println!("=== Summarization Prompt ===\n{summarization_prompt}\n");

    match ops
        .summarize_with_prompt(&document, &summarization_prompt)
        .await
    {
        Ok(summary) => println!("=== Summary ===\n{summary}"),
        Err(e) => {
            println!("Error summarizing document: {e}");
            std::process::exit(1);
        }
    }
}

fn build_ops() -> PromptOps {
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });
    PromptOps::new(config).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn default_model() -> String {
    std::env::var("OPENAI_MODEL").unwrap_or_else(|_| promptdoc::config::DEFAULT_MODEL.to_string())
}

fn required_path(args: &[String], command: &str) -> PathBuf {
    let mut i = 0;
    while i < args.len() {
        if args[i].starts_with("--") {
            // Skip the flag's value too.
            i += 2;
        } else {
            return Path::new(&args[i]).to_path_buf();
        }
    }
    eprintln!("{command} requires a file path");
    std::process::exit(1);
}

fn flag_value(args: &[String], name: &str) -> Option<String> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
