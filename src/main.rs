//! Fee Desk - electricity-bill customer-service dialogue
//!
//! A read-print loop over a small dialogue state machine. Each utterance is
//! classified by a chat model, routed, and answered by one flow step.

mod classifier;
mod llm;
mod runtime;
mod state_machine;

use classifier::{IntentClassifier, KeywordClassifier, LlmIntentClassifier};
use llm::LlmConfig;
use runtime::{Session, TurnRunner};
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const EXIT_COMMAND: &str = "退出";
const FAREWELL: &str = "感谢你的咨询，再见！";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Development credentials live in .env
    dotenvy::dotenv().ok();

    // Logs go to stderr; stdout carries the dialogue
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fee_desk=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let llm_config = LlmConfig::from_env();
    let classifier: Arc<dyn IntentClassifier> = if let Some(llm) = llm_config.build_service()? {
        tracing::info!(
            model = %llm_config.model,
            base_url = %llm_config.base_url,
            timeout_secs = llm_config.classify_timeout.as_secs(),
            "Using model classifier"
        );
        Arc::new(LlmIntentClassifier::new(llm))
    } else {
        tracing::warn!("DEEPSEEK_API_KEY not set, falling back to keyword classification");
        Arc::new(KeywordClassifier)
    };

    let runner = TurnRunner::new(classifier, llm_config.classify_timeout);
    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_loop(&runner, stdin, &mut stdout).await
}

/// Prompt, read a line, answer, until the exit command or end of input
async fn run_loop<C, R, W>(
    runner: &TurnRunner<C>,
    input: R,
    output: &mut W,
) -> Result<(), Box<dyn std::error::Error>>
where
    C: IntentClassifier,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::new();
    let mut lines = input.lines();

    writeln!(output, "===== 电费客服极简会话 =====")?;
    writeln!(output, "输入 '{EXIT_COMMAND}' 结束会话")?;

    loop {
        write!(output, "\n你：")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            tracing::debug!("input closed");
            break;
        };

        if line.trim() == EXIT_COMMAND {
            writeln!(output, "客服：{FAREWELL}")?;
            break;
        }

        let reply = session.respond(runner, &line).await;
        writeln!(output, "客服：{reply}")?;
    }

    tracing::debug!(step = session.persisted().step.index(), "Session ended");
    Ok(())
}
