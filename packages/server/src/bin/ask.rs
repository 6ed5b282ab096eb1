//! Ask one question about a business from the command line.
//!
//! ```text
//! ask --url https://www.yelp.com/biz/some-place --question "What should I order?"
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use review_rag::{AskRequest, RagConfig};
use review_server::{build_review_qa, logging::init_cli_tracing, OpenAISettings};

#[derive(Parser)]
#[command(name = "ask")]
#[command(about = "Answer a question from a business's reviews", long_about = None)]
struct Cli {
    /// Business page URL
    #[arg(short, long)]
    url: String,

    /// Question to answer
    #[arg(short, long)]
    question: String,

    /// Review pages to scrape
    #[arg(long, default_value_t = 5)]
    max_pages: usize,

    /// Reviews passed to the language model
    #[arg(long, default_value_t = 20)]
    max_docs: usize,

    /// Print corpus and retrieval counts after the answer
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_cli_tracing();

    let cli = Cli::parse();

    let openai = OpenAISettings::from_env().context("Failed to load OpenAI settings")?;
    let rag = RagConfig::new(cli.max_pages, cli.max_docs).context("Invalid arguments")?;
    let qa = build_review_qa(&openai, openai.apply_models(rag))?;

    let answer = qa
        .answer(&AskRequest::new(cli.url, cli.question))
        .await
        .context("Failed to answer question")?;

    println!("{}", answer.text);
    if cli.verbose {
        eprintln!(
            "reviews collected: {}, reviews used: {}",
            answer.corpus_size, answer.retrieved
        );
    }

    Ok(())
}
