//! pgeforge server daemon.
//!
//! Wires configuration into the build pipeline and runs the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use pgeforge_core::{BuildInvoker, BuildPipeline, BuildRoot, SystemRunner, ToolchainConfig};
use pgeforge_server::ServerConfig;

#[derive(Parser)]
#[command(name = "pgeforge")]
#[command(about = "Online C++ to WebAssembly build service for olcPixelGameEngine")]
#[command(version)]
struct Cli {
    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "3000")]
    port: u16,

    /// Directory for per-request build workspaces
    #[arg(long, default_value = "cache/build")]
    build_root: PathBuf,

    /// Directory containing the toolchain build scripts
    #[arg(long, default_value = "scripts")]
    scripts_dir: PathBuf,

    /// Script set to build with (`<toolchain>-compile.sh` / `<toolchain>-link.sh`)
    #[arg(long, default_value = "emscripten")]
    toolchain: String,

    /// Static front-end directory served at `/`
    #[arg(long, default_value = "public_html")]
    public: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        tracing_subscriber::EnvFilter::from_default_env()
            .add_directive(tracing::Level::DEBUG.into())
    } else {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let toolchain = ToolchainConfig::new(cli.scripts_dir, cli.toolchain);

    // A missing script pair would otherwise only surface as an opaque
    // failure on the first request.
    for script in [toolchain.compile_script(), toolchain.link_script()] {
        if !script.is_file() {
            anyhow::bail!("build script not found: {}", script.display());
        }
    }

    tracing::info!(
        "building with the {} scripts, workspaces under {}",
        toolchain.toolchain,
        cli.build_root.display()
    );

    let build_root = BuildRoot::new(&cli.build_root)?;
    let invoker = BuildInvoker::new(Arc::new(SystemRunner), toolchain);
    let pipeline = Arc::new(BuildPipeline::new(build_root, invoker));

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        public_dir: cli.public,
    };

    pgeforge_server::serve(pipeline, config).await?;

    Ok(())
}
