fn main() {
    let cli = flight_network_explorer::cli::parse();
    let code = flight_network_explorer::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
