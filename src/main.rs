//! Mind map desktop shell.
//!
//! Entry point: opens the main window with the application menu and the file
//! bridge. `--dev` opens the developer tools once the window is shown.
//! When built without the `gui` feature, runs a headless console demo.

use mindmap::config::{AppConfig, CliArgs};
use mindmap::logging;

#[cfg(feature = "gui")]
fn main() {
    let args = CliArgs::from_env();
    let (config, source) = AppConfig::load();
    let config = config.with_cli(&args);
    logging::init(&config.log_filter);
    source.log();

    if let Err(e) = mindmap::ui::webview_app::run(config) {
        tracing::error!(error = %e, "Mind map shell failed");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    let args = CliArgs::from_env();
    let (config, source) = AppConfig::load();
    let config = config.with_cli(&args);
    logging::init(&config.log_filter);
    source.log();

    println!();
    println!("  Mind Map v{}, headless demo", env!("CARGO_PKG_VERSION"));
    println!("  (build with the `gui` feature for the desktop window)");
    println!();

    if let Err(e) = demo(config) {
        eprintln!("  demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn section(name: &str) {
    println!("───────────────────────────────────────────────────────────────");
    println!("  {}", name);
    println!("───────────────────────────────────────────────────────────────");
}

#[cfg(not(feature = "gui"))]
fn demo(config: AppConfig) -> anyhow::Result<()> {
    use mindmap::app::App;
    use mindmap::bridge::file_operations::FileOperations;
    use mindmap::managers::menu_manager::MenuManagerTrait;
    use mindmap::platform::headless::{HeadlessPlatform, HeadlessWindow};

    section("Window + menu (messages to the UI are printed as JSON)");
    let platform = HeadlessPlatform::stdout();
    let mut app: App<HeadlessWindow> = App::new(config);
    app.startup(&platform)?;
    app.ready_to_show();

    let accelerators: Vec<_> = app
        .menu()
        .template()
        .items()
        .filter_map(|item| item.accelerator)
        .collect();
    for accelerator in &accelerators {
        print!("  {:<16} ", accelerator.for_platform());
        let outcome = app.handle_accelerator(&platform, accelerator);
        if !matches!(outcome, Some(mindmap::app::MenuOutcome::Sent(_))) {
            println!("{:?}", outcome);
        }
    }
    println!();

    section("File bridge");
    let dir = std::env::temp_dir().join(format!("mindmap-demo-{}", std::process::id()));
    std::fs::create_dir_all(&dir)?;
    let files = FileOperations::with_base_dir(&dir);
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let doc = r#"{"root":{"text":"Idea","children":[]}}"#;
        let written = files.write_file("demo.json", doc).await?;
        let read = files.read_file("demo.json").await?;
        println!("  write -> {}, read back identical: {}", written, read == doc);
        println!("  exists(demo.json) = {}", files.file_exists("demo.json").await);
        println!("  exists(missing.json) = {}", files.file_exists("missing.json").await);
        for (path, data) in [("notes.txt", doc), ("broken.json", "{oops")] {
            match files.write_file(path, data).await {
                Ok(_) => println!("  write {} -> accepted", path),
                Err(e) => println!("  write {} -> {}", path, e),
            }
        }
        Ok::<_, anyhow::Error>(())
    })?;
    let _ = std::fs::remove_dir_all(&dir);
    println!();
    Ok(())
}
