use clap::Parser;
use workflowproj_cli::{execute_export, execute_print, init_logging, Cli, Commands};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.command.project().log_level) {
        eprintln!("{error}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Commands::Export(command) => execute_export(command),
        Commands::Print(command) => execute_print(command),
    };

    match result {
        Ok(output) => {
            print!("{output}");
        }
        Err(error) => {
            eprintln!("error: {error}");
            let mut source = std::error::Error::source(&error);
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(1);
        }
    }
}
