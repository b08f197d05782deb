use android_adb_gui::args::{self, Args, ArgsOutcome, Mode};
use android_adb_gui::config::AppConfig;
use android_adb_gui::gui::dioxus_app::run_gui;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = match Args::parse() {
        Ok(ArgsOutcome::Run(args)) => args,
        Ok(ArgsOutcome::Help) => {
            args::print_help();
            return ExitCode::SUCCESS;
        }
        Ok(ArgsOutcome::Version) => {
            println!(
                "Android ADB GUI v{} (c) {}",
                env!("APP_VERSION_DISPLAY"),
                env!("APP_BUILD_YEAR")
            );
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("❌ {message}");
            args::print_help();
            return ExitCode::from(2);
        }
    };

    let mut config = AppConfig::from_env();
    config.apply_args(&args);

    let default_level = if config.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .init();

    if args.mode == Mode::Gui {
        println!("🚀 Launching Android ADB GUI...");
        run_gui(config);
        return ExitCode::SUCCESS;
    }

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("❌ Failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    let code = runtime.block_on(android_adb_gui::cli::run(&config, &args));
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
