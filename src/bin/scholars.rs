use scholars::{cli, config};

fn init_tracing() {
    // Install global collector configured based on SCHOLARS_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env(config::env::LOG_DIRECTIVE)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(num_cpus::get())
        .on_thread_start(|| tracing::trace!("thread start"))
        .on_thread_stop(|| tracing::trace!("thread stop"))
        .enable_time()
        .build();

    let runtime = match runtime {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("build runtime: {}", err);
            std::process::exit(1);
        }
    };

    runtime.block_on(async {
        run().await;
    })
}

async fn run() {
    if let Err(err) = run_inner().await {
        let code = if err.is_authentication_failure() { 2 } else { 1 };
        eprintln!("{}", err);
        std::process::exit(code);
    };
}

async fn run_inner() -> scholars::Result<()> {
    let cli::ScholarsCommand { options, command } = cli::parse();

    let navigator = cli::initialize(options).await?;

    match command {
        cli::Command::Login(login) => login.run(navigator).await,
        cli::Command::Register(register) => register.run(navigator).await,
        cli::Command::Logout(logout) => logout.run(navigator).await,
        cli::Command::Whoami(whoami) => whoami.run(navigator).await,
        cli::Command::Navigate(navigate) => navigate.run(navigator).await,
    }
}
