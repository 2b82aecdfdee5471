//! Web 服务器主程序入口

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use xhtml_translator::env::EnvConfig;
use xhtml_translator::translation::{
    OllamaClient, OllamaConfig, TranslationConfig, TranslationService,
};
use xhtml_translator::web::{WebConfig, WebServer};

/// XHTML 文档翻译服务
#[derive(Parser, Debug)]
#[command(name = "xhtml-translator-server", version, about)]
struct Args {
    /// Bind address [env: XHTML_TRANSLATOR_BIND_ADDRESS, default: 0.0.0.0]
    #[arg(short, long)]
    bind: Option<String>,

    /// Port number [env: PORT, default: 8090]
    #[arg(short, long)]
    port: Option<u16>,

    /// Ollama-compatible generate endpoint
    #[arg(long)]
    llm_url: Option<String>,

    /// Model name sent to the LLM endpoint
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum number of in-flight translation calls per document
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..=100))]
    concurrency: Option<u16>,

    /// Whole-document timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Per-call LLM timeout in seconds
    #[arg(long)]
    llm_timeout: Option<u64>,
}

impl Args {
    /// 命令行参数覆盖环境变量
    fn apply(self, mut env: EnvConfig) -> EnvConfig {
        if let Some(bind) = self.bind {
            env.web_bind_address = bind;
        }
        if let Some(port) = self.port {
            env.web_port = port;
        }
        if let Some(llm_url) = self.llm_url {
            env.llm_url = llm_url;
        }
        if let Some(model) = self.model {
            env.model = model;
        }
        if let Some(concurrency) = self.concurrency {
            env.max_concurrent_requests = usize::from(concurrency);
        }
        if let Some(timeout) = self.timeout {
            env.request_timeout = Duration::from_secs(timeout);
        }
        if let Some(llm_timeout) = self.llm_timeout {
            env.llm_timeout = Duration::from_secs(llm_timeout);
        }
        env
    }
}

/// 加载 .env 文件
fn load_dotenv() -> Option<&'static str> {
    let env_files = [".env.local", ".env"];

    env_files
        .into_iter()
        .find(|env_file| Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let loaded_env_file = load_dotenv();

    let env = args.apply(EnvConfig::from_env()?);

    let level: tracing::Level = env.log_level.parse()?;
    tracing_subscriber::fmt().with_max_level(level).init();

    if let Some(env_file) = loaded_env_file {
        tracing::info!("已加载环境变量文件: {}", env_file);
    }
    if env.is_development() {
        env.print_summary();
    }

    let client = OllamaClient::new(OllamaConfig::from(&env))?;
    let service = TranslationService::new(Arc::new(client), TranslationConfig::from(&env))?;

    let server = WebServer::new(WebConfig::from(&env), Arc::new(service));
    server.start().await?;

    Ok(())
}
