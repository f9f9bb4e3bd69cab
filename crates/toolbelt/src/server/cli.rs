#[derive(Debug, clap::Parser)]
#[command(name = "serve")]
#[command(about = "Serve the pure tools over JSON-RPC")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// One JSON-RPC request per line on stdin, responses on stdout
    #[clap(name = "stdio")]
    Stdio,

    /// JSON-RPC over HTTP with an SSE endpoint
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}
