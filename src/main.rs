use studymate_lib::AppConfig;

#[tokio::main]
async fn main() {
    // Default to info-level output unless RUST_LOG says otherwise
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    println!("\n=== Starting StudyMate ===");
    if let Err(e) = studymate_lib::run(config).await {
        eprintln!("Error running StudyMate: {}", e);
        std::process::exit(1);
    }
}
