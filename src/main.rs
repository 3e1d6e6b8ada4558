use chess_engine::cli;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match cli::parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("error: {}", message);
            cli::print_help();
            std::process::exit(2);
        }
    };

    if let Err(e) = cli::run_game(&config) {
        eprintln!("i/o error: {}", e);
        std::process::exit(1);
    }
}
