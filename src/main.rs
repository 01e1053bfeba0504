fn main() {
    #[cfg(feature = "cli")]
    bbpack::cli::run();

    #[cfg(not(feature = "cli"))]
    {
        eprintln!("bbpack: CLI not enabled. Rebuild with `--features cli`.");
        std::process::exit(1);
    }
}
