fn main() {
    use docsite_kit::cli::parse;
    let cli = parse();
    docsite_kit::utils::logging::init(cli.quiet, cli.verbose);
    let code = docsite_kit::app::run_cli(cli);
    if code != 0 {
        std::process::exit(code);
    }
}
